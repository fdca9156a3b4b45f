//! Interactive planning session
//!
//! Line-oriented front end over `planner_core::Planner`. The loop is
//! generic over its input and output streams so tests can drive it with
//! scripted commands. After `item <category>` the session follows the focus
//! mailbox: the prompt moves to the new slot, entering a value extends the
//! list with another slot, and an empty entry removes the trailing slot and
//! ends the run.

use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use planner_core::{assemble_comparison, CalcClient, ComparisonSeries, Error, MonthKey, Planner};

const HELP: &str = "\
Commands:
  show                      Show categories, items, and totals
  month <YYYY-MM>           Switch to a different month
  add <category>            Add a category
  rm <category>             Remove a category
  item <category>           Add item slots (empty entry ends the run)
  set <category> <i> <amt>  Set item i of a category
  del <category> <i>        Delete item i of a category
  calc                      Ask the calculation service for the month total
  export [dir]              Write the budget sheet (requires a calculated total)
  compare                   Compare the two most recent calculated months
  help                      Show this help
  quit                      End the session";

/// One parsed session command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    Help,
    Show,
    Month(String),
    AddCategory(String),
    RemoveCategory(String),
    AddItem(String),
    SetItem {
        category: String,
        index: usize,
        value: String,
    },
    RemoveItem {
        category: String,
        index: usize,
    },
    Calculate,
    Export(Option<PathBuf>),
    Compare,
    Quit,
}

impl SessionCommand {
    /// Parse one input line; `Err` carries a usage message
    pub fn parse(line: &str) -> std::result::Result<Self, String> {
        let line = line.trim();
        let (command, rest) = match line.split_once(char::is_whitespace) {
            Some((command, rest)) => (command, rest.trim()),
            None => (line, ""),
        };

        match command {
            "help" | "?" => Ok(Self::Help),
            "show" => Ok(Self::Show),
            "quit" | "exit" => Ok(Self::Quit),
            "calc" | "calculate" => Ok(Self::Calculate),
            "compare" => Ok(Self::Compare),
            "export" => Ok(Self::Export(if rest.is_empty() {
                None
            } else {
                Some(PathBuf::from(rest))
            })),
            "month" => require(rest, "month <YYYY-MM>").map(Self::Month),
            "add" => require(rest, "add <category>").map(Self::AddCategory),
            "rm" => require(rest, "rm <category>").map(Self::RemoveCategory),
            "item" => require(rest, "item <category>").map(Self::AddItem),
            "set" => {
                // Category names may contain spaces; index and value are the
                // last two tokens.
                let mut tokens: Vec<&str> = rest.split_whitespace().collect();
                if tokens.len() < 3 {
                    return Err("usage: set <category> <index> <amount>".to_string());
                }
                let value = tokens.pop().unwrap().to_string();
                let index = parse_index(tokens.pop().unwrap())?;
                Ok(Self::SetItem {
                    category: tokens.join(" "),
                    index,
                    value,
                })
            }
            "del" => {
                let mut tokens: Vec<&str> = rest.split_whitespace().collect();
                if tokens.len() < 2 {
                    return Err("usage: del <category> <index>".to_string());
                }
                let index = parse_index(tokens.pop().unwrap())?;
                Ok(Self::RemoveItem {
                    category: tokens.join(" "),
                    index,
                })
            }
            other => Err(format!("unknown command: {other} (try 'help')")),
        }
    }
}

fn require(rest: &str, usage: &str) -> std::result::Result<String, String> {
    if rest.is_empty() {
        Err(format!("usage: {usage}"))
    } else {
        Ok(rest.to_string())
    }
}

fn parse_index(token: &str) -> std::result::Result<usize, String> {
    token
        .parse()
        .map_err(|_| format!("not an item index: {token}"))
}

/// Run the interactive session until quit or end of input
pub async fn run_session<R: BufRead, W: Write>(
    planner: &mut Planner,
    client: &CalcClient,
    input: &mut R,
    out: &mut W,
) -> Result<()> {
    writeln!(out, "📊 Monthly Budget Planner")?;
    writeln!(out, "   Planning {} (try 'help')", planner.selected_month().display_name())?;

    loop {
        write!(out, "{}> ", planner.selected_month())?;
        out.flush()?;
        let Some(line) = read_line(input)? else {
            break;
        };
        if line.trim().is_empty() {
            continue;
        }

        let command = match SessionCommand::parse(&line) {
            Ok(command) => command,
            Err(message) => {
                writeln!(out, "   {message}")?;
                continue;
            }
        };

        match command {
            SessionCommand::Quit => break,
            SessionCommand::Help => writeln!(out, "{HELP}")?,
            SessionCommand::Show => render_overview(planner, out)?,
            SessionCommand::Month(raw) => match MonthKey::parse(&raw) {
                Ok(month) => {
                    planner.select_month(month);
                    writeln!(out, "📅 Planning {}", planner.selected_month().display_name())?;
                }
                Err(e) => writeln!(out, "   {e}")?,
            },
            SessionCommand::AddCategory(name) => {
                planner.add_category(&name);
                render_overview(planner, out)?;
            }
            SessionCommand::RemoveCategory(name) => {
                planner.remove_category(&name);
                render_overview(planner, out)?;
            }
            SessionCommand::AddItem(name) => {
                if planner.store().contains(&name) {
                    planner.add_item(&name);
                    run_item_entry(planner, input, out)?;
                    render_overview(planner, out)?;
                } else {
                    writeln!(out, "   no such category: {name}")?;
                }
            }
            SessionCommand::SetItem {
                category,
                index,
                value,
            } => {
                planner.set_item(&category, index, &value);
                render_overview(planner, out)?;
            }
            SessionCommand::RemoveItem { category, index } => {
                planner.remove_item(&category, index);
                render_overview(planner, out)?;
            }
            SessionCommand::Calculate => {
                let month = planner.selected_month().clone();
                match planner.calculate(client).await {
                    Ok(total) => writeln!(
                        out,
                        "✅ {} Total: {}",
                        month.display_name(),
                        planner_core::format_amount(planner.currency(), total)
                    )?,
                    Err(_) => render_error_banner(planner, out)?,
                }
            }
            SessionCommand::Export(dir) => render_export(planner, dir.as_deref(), out)?,
            SessionCommand::Compare => render_comparison(planner, out)?,
        }
    }

    Ok(())
}

/// Focus-driven item entry: keep filling the focused slot until an empty
/// entry ends the run
fn run_item_entry<R: BufRead, W: Write>(
    planner: &mut Planner,
    input: &mut R,
    out: &mut W,
) -> Result<()> {
    while let Some(target) = planner.take_focus() {
        write!(out, "  {}[{}] = ", target.category, target.index)?;
        out.flush()?;
        let Some(line) = read_line(input)? else {
            // End of input: drop the empty trailing slot.
            planner.remove_item(&target.category, target.index);
            break;
        };
        let value = line.trim();
        if value.is_empty() {
            planner.remove_item(&target.category, target.index);
            break;
        }
        planner.set_item(&target.category, target.index, value);
        // Filling the last slot extends the list, which re-arms the mailbox.
        planner.add_item(&target.category);
    }
    Ok(())
}

fn render_overview<W: Write>(planner: &Planner, out: &mut W) -> Result<()> {
    let currency = planner.currency();
    for category in planner.categories() {
        let total = planner.totals().get(&category.name).unwrap_or(0.0);
        let items: Vec<String> = category
            .items
            .iter()
            .map(|item| {
                if item.is_empty() {
                    "·".to_string()
                } else {
                    item.clone()
                }
            })
            .collect();
        writeln!(
            out,
            "   {}: [{}] = {}",
            category.name,
            items.join(", "),
            planner_core::format_amount(currency, total)
        )?;
    }
    if let Some(grand_total) = planner.totals().grand_total {
        writeln!(
            out,
            "   ✅ Server total: {}",
            planner_core::format_amount(currency, grand_total)
        )?;
    }
    render_error_banner(planner, out)
}

fn render_error_banner<W: Write>(planner: &Planner, out: &mut W) -> Result<()> {
    if let Some(banner) = planner.error_banner() {
        writeln!(out, "   ❌ {banner}")?;
    }
    Ok(())
}

fn render_export<W: Write>(planner: &Planner, dir: Option<&Path>, out: &mut W) -> Result<()> {
    let sheet = match planner.export() {
        Ok(sheet) => sheet,
        Err(Error::NoGrandTotal) => {
            writeln!(out, "   Calculate the month before exporting")?;
            return Ok(());
        }
        Err(e) => return Err(e).context("failed to assemble export"),
    };

    // The xlsx encoding is the spreadsheet tool's job; we write the sheet
    // data as CSV under the matching name.
    let csv_name = sheet.file_name.replace(".xlsx", ".csv");
    let path = dir.unwrap_or_else(|| Path::new(".")).join(&csv_name);
    std::fs::write(&path, &sheet.csv)
        .with_context(|| format!("failed to write {}", path.display()))?;
    writeln!(out, "📥 Wrote {} (sheet: {})", path.display(), sheet.file_name)?;
    Ok(())
}

fn render_comparison<W: Write>(planner: &Planner, out: &mut W) -> Result<()> {
    let (month_a, month_b) = match planner.history().two_most_recent() {
        Ok(pair) => pair,
        Err(Error::MissingHistory) => {
            writeln!(
                out,
                "   Not enough months calculated yet. Calculate at least 2 months first."
            )?;
            return Ok(());
        }
        Err(e) => return Err(e).context("failed to select months"),
    };

    let series = assemble_comparison(month_a, month_b, planner.history());
    render_bars(&series, out)?;

    // Category-wise spending for the later month.
    if let Some(record) = planner.history().get(&series.month_b) {
        writeln!(out, "🧾 Category-wise Spending ({})", series.month_b)?;
        for total in &record.totals {
            writeln!(
                out,
                "   {}: {}",
                total.name,
                planner_core::format_amount(planner.currency(), total.total)
            )?;
        }
    }
    Ok(())
}

fn render_bars<W: Write>(series: &ComparisonSeries, out: &mut W) -> Result<()> {
    const WIDTH: usize = 24;
    let max = series
        .series_a
        .iter()
        .chain(series.series_b.iter())
        .fold(0.0_f64, |max, v| max.max(v.abs()));

    writeln!(out, "📊 {} vs {}", series.month_a, series.month_b)?;
    for (i, label) in series.labels.iter().enumerate() {
        writeln!(out, "   {label}")?;
        for (month, value) in [
            (&series.month_a, series.series_a[i]),
            (&series.month_b, series.series_b[i]),
        ] {
            let len = if max > 0.0 {
                ((value.abs() / max) * WIDTH as f64).round() as usize
            } else {
                0
            };
            writeln!(out, "     {month} {} {value:.2}", "█".repeat(len))?;
        }
    }
    Ok(())
}

fn read_line<R: BufRead>(input: &mut R) -> std::io::Result<Option<String>> {
    let mut buf = String::new();
    if input.read_line(&mut buf)? == 0 {
        return Ok(None);
    }
    Ok(Some(buf.trim_end_matches(['\n', '\r']).to_string()))
}
