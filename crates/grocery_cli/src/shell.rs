//! Interactive line-based list screen.

use crate::render::{render_help, render_screen};
use anyhow::Result;
use grocery_core::screen::{DIALOG_TITLE, NAME_FIELD_LABEL, QUANTITY_FIELD_LABEL};
use grocery_core::{Filter, ListScreen, TodoItem};
use log::debug;
use std::io::{BufRead, Write};
use std::time::Instant;
use tokio::runtime::Runtime;

/// Runs the screen until `q` or end of input.
pub fn run(
    runtime: &Runtime,
    screen: &mut ListScreen,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> Result<()> {
    debug!("event=shell_start module=cli status=ok");
    render_help(out)?;
    refresh(runtime, screen, out)?;

    while let Some(line) = prompt(input, out, "> ")? {
        let mut words = line.split_whitespace();
        let Some(command) = words.next() else {
            continue;
        };
        let argument = words.next();

        match command {
            "q" | "quit" => break,
            "h" | "help" => {
                render_help(out)?;
                continue;
            }
            "a" | "add" => add_via_dialog(screen, input, out)?,
            "t" | "toggle" => match pick_row(screen, argument) {
                Some(item) => screen.toggle(&item),
                None => writeln!(out, "no such row")?,
            },
            "d" | "delete" => match pick_row(screen, argument) {
                Some(item) => screen.delete(&item),
                None => writeln!(out, "no such row")?,
            },
            "u" | "undo" => {
                if !screen.undo() {
                    writeln!(out, "nothing to undo")?;
                }
            }
            "f" | "filter" => match argument.map(str::parse::<Filter>) {
                Some(Ok(filter)) => screen.set_filter(filter),
                Some(Err(err)) => writeln!(out, "{err}")?,
                None => writeln!(out, "usage: f all|done")?,
            },
            "x" | "dismiss" => screen.dismiss_snackbar(),
            other => {
                writeln!(out, "unknown command `{other}`; h for help")?;
                continue;
            }
        }
        refresh(runtime, screen, out)?;
    }

    debug!("event=shell_stop module=cli status=ok");
    Ok(())
}

fn add_via_dialog(
    screen: &mut ListScreen,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> Result<()> {
    screen.open_add_dialog();
    writeln!(out, "{DIALOG_TITLE}")?;
    let Some(name) = prompt(input, out, &format!("{NAME_FIELD_LABEL}: "))? else {
        screen.cancel_add_dialog();
        return Ok(());
    };
    let Some(quantity) = prompt(input, out, &format!("{QUANTITY_FIELD_LABEL}: "))? else {
        screen.cancel_add_dialog();
        return Ok(());
    };

    screen.dialog_mut().name = name;
    screen.dialog_mut().quantity = quantity;
    if !screen.submit_add_dialog() {
        writeln!(out, "{NAME_FIELD_LABEL} and {QUANTITY_FIELD_LABEL} are both required.")?;
        screen.cancel_add_dialog();
    }
    Ok(())
}

/// Resolves a 1-based row number against the currently visible rows.
fn pick_row(screen: &ListScreen, argument: Option<&str>) -> Option<TodoItem> {
    let position = argument?.parse::<usize>().ok()?.checked_sub(1)?;
    let items = screen.view_model().todo_list().current();
    screen.visible_items(&items).into_iter().nth(position)
}

fn refresh(runtime: &Runtime, screen: &mut ListScreen, out: &mut impl Write) -> Result<()> {
    runtime.block_on(screen.view_model().settled());
    screen.expire_snackbar(Instant::now());
    let items = screen.view_model().todo_list().current();
    render_screen(out, screen, &items)?;
    out.flush()?;
    Ok(())
}

fn prompt(input: &mut impl BufRead, out: &mut impl Write, label: &str) -> Result<Option<String>> {
    write!(out, "{label}")?;
    out.flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}
