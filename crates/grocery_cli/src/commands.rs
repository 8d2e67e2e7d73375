//! One-shot subcommands.

use crate::cli::Command;
use crate::render::render_rows;
use crate::shell;
use anyhow::{bail, Result};
use grocery_core::model::item::is_blank;
use grocery_core::{core_version, Filter, ItemRow, ListScreen, TodoStore, TodoViewModel};
use std::io::{self, Write};
use std::sync::Arc;
use tokio::runtime::Runtime;

/// Everything a subcommand needs: the store, its view model and the runtime driving it.
pub struct Context {
    pub runtime: Runtime,
    pub store: Arc<TodoStore>,
    pub view_model: TodoViewModel,
}

impl Context {
    pub fn new(store: TodoStore) -> Result<Self> {
        let runtime = Runtime::new()?;
        let store = Arc::new(store);
        let view_model = TodoViewModel::new(Arc::clone(&store), runtime.handle());
        Ok(Self {
            runtime,
            store,
            view_model,
        })
    }

    fn settle(&self) {
        self.runtime.block_on(self.view_model.settled());
    }
}

pub fn execute(command: Command, ctx: &Context, out: &mut impl Write) -> Result<()> {
    match command {
        Command::Add { name, quantity } => add(ctx, &name, &quantity, out),
        Command::List { filter, json } => list(ctx, filter, json, out),
        Command::Toggle { id } => toggle(ctx, id, out),
        Command::Delete { id } => delete(ctx, id, out),
        Command::Shell => {
            let mut screen = ListScreen::new(ctx.view_model.clone());
            shell::run(&ctx.runtime, &mut screen, &mut io::stdin().lock(), out)
        }
        Command::Version => print_version(out),
    }
}

pub fn print_version(out: &mut impl Write) -> Result<()> {
    writeln!(out, "grocery {}", core_version())?;
    Ok(())
}

fn add(ctx: &Context, name: &str, quantity: &str, out: &mut impl Write) -> Result<()> {
    if is_blank(name) || is_blank(quantity) {
        bail!("item name and quantity must not be blank");
    }
    let before = ctx.store.snapshot().len();
    ctx.view_model.add_todo(name, quantity);
    ctx.settle();

    let items = ctx.store.snapshot();
    match items.first() {
        Some(item) if items.len() > before => {
            writeln!(out, "added #{} {} ({})", item.id, item.name, item.quantity)?;
        }
        _ => bail!("item was not stored; see logs for details"),
    }
    Ok(())
}

fn list(ctx: &Context, filter: Filter, json: bool, out: &mut impl Write) -> Result<()> {
    let rows: Vec<ItemRow> = ctx
        .store
        .snapshot()
        .iter()
        .filter(|item| filter.matches(item))
        .map(ItemRow::from_item)
        .collect();

    if json {
        serde_json::to_writer_pretty(&mut *out, &rows)?;
        writeln!(out)?;
    } else {
        render_rows(out, &rows, false)?;
    }
    Ok(())
}

fn toggle(ctx: &Context, id: i64, out: &mut impl Write) -> Result<()> {
    let Some(item) = ctx.store.get(id)? else {
        writeln!(out, "no item #{id}; nothing changed")?;
        return Ok(());
    };
    ctx.view_model.toggle_done(&item);
    ctx.settle();
    let state = if item.is_done { "not done" } else { "done" };
    writeln!(out, "#{id} {} marked {state}", item.name)?;
    Ok(())
}

fn delete(ctx: &Context, id: i64, out: &mut impl Write) -> Result<()> {
    let Some(item) = ctx.store.get(id)? else {
        writeln!(out, "no item #{id}; nothing changed")?;
        return Ok(());
    };
    ctx.view_model.delete_todo(&item);
    ctx.settle();
    writeln!(out, "deleted #{id} {}", item.name)?;
    writeln!(
        out,
        "undo: grocery add {:?} {:?}",
        item.name, item.quantity
    )?;
    Ok(())
}
