//! Plain-text rendering of the list screen.

use grocery_core::screen::{SCREEN_SUBTITLE, SCREEN_TITLE};
use grocery_core::{Filter, ItemRow, ListScreen, TodoItem};
use std::io::{self, Write};

const NAME_WIDTH: usize = 24;
const QUANTITY_WIDTH: usize = 18;

/// Writes one line per row; `numbered` prefixes the 1-based position used by shell commands.
pub fn render_rows(out: &mut impl Write, rows: &[ItemRow], numbered: bool) -> io::Result<()> {
    if rows.is_empty() {
        return writeln!(out, "  (no items)");
    }
    for (index, row) in rows.iter().enumerate() {
        let position = if numbered {
            format!("{:>3}.", index + 1)
        } else {
            format!("#{:<4}", row.id)
        };
        writeln!(
            out,
            "{position} [{}] {:<NAME_WIDTH$} {:<QUANTITY_WIDTH$} {}",
            if row.is_done { "x" } else { " " },
            row.name,
            row.quantity_label,
            row.created_label,
        )?;
    }
    Ok(())
}

/// Renders header, filter bar, rows and the pending notification.
pub fn render_screen(
    out: &mut impl Write,
    screen: &ListScreen,
    items: &[TodoItem],
) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "== {SCREEN_TITLE} ==")?;
    writeln!(out, "{SCREEN_SUBTITLE}")?;
    let tabs: Vec<String> = [Filter::All, Filter::Done]
        .into_iter()
        .map(|filter| {
            if filter == screen.filter() {
                format!("[{}]", filter.label())
            } else {
                format!(" {} ", filter.label())
            }
        })
        .collect();
    writeln!(out, "{}", tabs.join(" "))?;
    render_rows(out, &screen.rows(items), true)?;

    if let Some(snackbar) = screen.snackbar() {
        match snackbar.action {
            Some(action) => writeln!(out, "-- {}  (u) {}", snackbar.message, action.label())?,
            None => writeln!(out, "-- {}", snackbar.message)?,
        }
    }
    Ok(())
}

pub fn render_help(out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "commands:")?;
    writeln!(out, "  a            add an item")?;
    writeln!(out, "  t <n>        toggle done for row n")?;
    writeln!(out, "  d <n>        delete row n")?;
    writeln!(out, "  u            undo last delete")?;
    writeln!(out, "  f all|done   change filter")?;
    writeln!(out, "  x            dismiss notification")?;
    writeln!(out, "  h            help")?;
    writeln!(out, "  q            quit")
}
