//! Category store
//!
//! Holds the ordered mapping of category name to raw item amounts for the
//! month being edited. Items stay raw strings until totals are derived, so
//! half-typed input never breaks the model. Two invariants hold after every
//! operation: every item list has at least one entry, and every category
//! name is unique and non-empty.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::focus::FocusTarget;

/// One budget category and its raw line-item amounts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    pub items: Vec<String>,
}

impl Category {
    fn empty(name: &str) -> Self {
        Self {
            name: name.to_string(),
            items: vec![String::new()],
        }
    }
}

/// The full category state at one instant, in display order
pub type CategorySnapshot = Vec<Category>;

/// Ordered category → items store
///
/// Invalid mutation requests (duplicate or empty category names,
/// out-of-bounds indexes, unknown categories) are silently ignored rather
/// than reported; the store never leaves a previously-valid state.
#[derive(Debug, Clone)]
pub struct CategoryStore {
    categories: Vec<Category>,
    default_layout: Vec<String>,
}

impl CategoryStore {
    /// Create a store seeded with the given default category layout
    ///
    /// The layout is also what the store resets to when its last category
    /// is removed.
    pub fn new(default_layout: &[String]) -> Self {
        let mut store = Self {
            categories: Vec::new(),
            default_layout: default_layout.to_vec(),
        };
        store.reset_to_default();
        store
    }

    /// Append a new category with a single empty item slot
    ///
    /// No-op when the name is empty or already present.
    pub fn add_category(&mut self, name: &str) {
        let name = name.trim();
        if name.is_empty() || self.categories.iter().any(|c| c.name == name) {
            debug!("ignoring add_category for empty or duplicate name {name:?}");
            return;
        }
        self.categories.push(Category::empty(name));
    }

    /// Remove a category; resets to the default layout when the store empties
    pub fn remove_category(&mut self, name: &str) {
        self.categories.retain(|c| c.name != name);
        if self.categories.is_empty() {
            self.reset_to_default();
        }
    }

    /// Replace the item at `index` in `name`'s list
    ///
    /// Unknown categories and out-of-bounds indexes are ignored.
    pub fn set_item(&mut self, name: &str, index: usize, value: &str) {
        if let Some(slot) = self
            .categories
            .iter_mut()
            .find(|c| c.name == name)
            .and_then(|c| c.items.get_mut(index))
        {
            *slot = value.to_string();
        }
    }

    /// Append an empty item slot and return the focus target for it
    pub fn add_item(&mut self, name: &str) -> Option<FocusTarget> {
        let category = self.categories.iter_mut().find(|c| c.name == name)?;
        category.items.push(String::new());
        Some(FocusTarget {
            category: name.to_string(),
            index: category.items.len() - 1,
        })
    }

    /// Remove the item at `index`; an emptied list becomes a single empty slot
    pub fn remove_item(&mut self, name: &str, index: usize) {
        let Some(category) = self.categories.iter_mut().find(|c| c.name == name) else {
            return;
        };
        if index >= category.items.len() {
            return;
        }
        category.items.remove(index);
        if category.items.is_empty() {
            category.items.push(String::new());
        }
    }

    /// Clone the current state for derivation or history recording
    pub fn snapshot(&self) -> CategorySnapshot {
        self.categories.clone()
    }

    /// Borrow the categories in display order
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn contains(&self, name: &str) -> bool {
        self.categories.iter().any(|c| c.name == name)
    }

    /// Item count for a category, 0 when absent
    pub fn item_count(&self, name: &str) -> usize {
        self.categories
            .iter()
            .find(|c| c.name == name)
            .map_or(0, |c| c.items.len())
    }

    fn reset_to_default(&mut self) {
        self.categories = self
            .default_layout
            .iter()
            .map(|name| Category::empty(name))
            .collect();
    }
}
