//! Focus coordination
//!
//! When an item slot is added the UI should move input focus to it. The
//! coordinator is a one-slot mailbox: the store produces a target on every
//! add, the presentation layer takes it exactly once and applies it. Setting
//! a new target before the previous one is consumed overwrites it.

/// The item input that should receive focus next
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FocusTarget {
    pub category: String,
    pub index: usize,
}

/// One-slot, last-write-wins mailbox for the pending focus target
#[derive(Debug, Default)]
pub struct FocusCoordinator {
    pending: Option<FocusTarget>,
}

impl FocusCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the pending target
    pub fn set(&mut self, target: FocusTarget) {
        self.pending = Some(target);
    }

    /// Consume and clear the pending target
    pub fn take(&mut self) -> Option<FocusTarget> {
        self.pending.take()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}
