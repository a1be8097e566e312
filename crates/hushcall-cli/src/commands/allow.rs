use crate::commands::{print_json, Context};
use crate::error::not_found;
use crate::util::{now_utc, parse_allow_id};
use anyhow::Result;
use clap::{ArgAction, Args, Subcommand};
use hushcall_core::domain::AllowListEntry;
use hushcall_core::phone;
use tracing::warn;

#[derive(Debug, Subcommand)]
pub enum AllowCommand {
    Add(AllowAddArgs),
    Ls(AllowListArgs),
    Show(AllowIdArgs),
    Rm(AllowIdArgs),
    Enable(AllowIdArgs),
    Disable(AllowIdArgs),
}

#[derive(Debug, Args)]
pub struct AllowAddArgs {
    pub number: String,
}

#[derive(Debug, Args)]
pub struct AllowListArgs {
    /// Include disabled entries
    #[arg(long, action = ArgAction::SetTrue)]
    pub all: bool,
}

#[derive(Debug, Args)]
pub struct AllowIdArgs {
    pub id: String,
}

pub fn add(ctx: &Context<'_>, args: AllowAddArgs) -> Result<()> {
    if let Err(err) = phone::parse(&args.number, ctx.region()) {
        warn!(number = %args.number, error = %err, "allow-list number does not parse with the current region");
    }
    let entry = ctx.store.allow_list().add(now_utc(), &args.number)?;

    if ctx.json {
        return print_json(&entry);
    }
    println!("allowed {} ({})", entry.phone_number, entry.id);
    Ok(())
}

pub fn list(ctx: &Context<'_>, args: AllowListArgs) -> Result<()> {
    let entries = ctx.store.allow_list().list(args.all)?;

    if ctx.json {
        return print_json(&entries);
    }

    if entries.is_empty() {
        println!("allow list is empty");
        return Ok(());
    }

    for entry in entries {
        println!("{}", entry_line(&entry));
    }
    Ok(())
}

pub fn show(ctx: &Context<'_>, args: AllowIdArgs) -> Result<()> {
    let id = parse_allow_id(&args.id)?;
    let entry = ctx
        .store
        .allow_list()
        .get(id)?
        .ok_or_else(|| not_found(format!("allow-list entry {}", id)))?;

    if ctx.json {
        return print_json(&entry);
    }
    println!("{}", entry_line(&entry));
    Ok(())
}

pub fn remove(ctx: &Context<'_>, args: AllowIdArgs) -> Result<()> {
    let id = parse_allow_id(&args.id)?;
    ctx.store.allow_list().delete(id)?;

    if ctx.json {
        return print_json(&serde_json::json!({ "id": id, "removed": true }));
    }
    println!("removed {}", id);
    Ok(())
}

pub fn set_active(ctx: &Context<'_>, args: AllowIdArgs, is_active: bool) -> Result<()> {
    let id = parse_allow_id(&args.id)?;
    let entry = ctx.store.allow_list().set_active(id, is_active)?;

    if ctx.json {
        return print_json(&entry);
    }
    println!("{}", entry_line(&entry));
    Ok(())
}

fn entry_line(entry: &AllowListEntry) -> String {
    let state = if entry.is_active { "active" } else { "disabled" };
    format!("{}  {}  [{}]", entry.id, entry.phone_number, state)
}
