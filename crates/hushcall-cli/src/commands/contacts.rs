use crate::commands::{print_json, Context};
use crate::util::{now_utc, parse_contact_id};
use anyhow::Result;
use clap::{Args, Subcommand};
use hushcall_core::domain::ContactPhone;
use hushcall_core::phone;
use hushcall_store::repo::ContactNew;
use tracing::warn;

#[derive(Debug, Subcommand)]
pub enum ContactCommand {
    Add(ContactAddArgs),
    Ls(ContactListArgs),
    Rm(ContactRemoveArgs),
}

#[derive(Debug, Args)]
pub struct ContactAddArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long, value_name = "NUMBER")]
    pub phone: Vec<String>,
}

#[derive(Debug, Args)]
pub struct ContactListArgs {}

#[derive(Debug, Args)]
pub struct ContactRemoveArgs {
    pub id: String,
}

pub fn add(ctx: &Context<'_>, args: ContactAddArgs) -> Result<()> {
    let phones = args
        .phone
        .iter()
        .map(|raw| ContactPhone {
            raw: raw.trim().to_string(),
            e164: canonical(ctx, raw),
        })
        .collect();

    let contact = ctx.store.contacts().create(
        now_utc(),
        ContactNew {
            display_name: args.name,
            phones,
        },
    )?;

    if ctx.json {
        return print_json(&contact);
    }
    println!("{} {}", contact.id, contact.display_name);
    Ok(())
}

pub fn list(ctx: &Context<'_>, _args: ContactListArgs) -> Result<()> {
    let contacts = ctx.store.contacts().list()?;

    if ctx.json {
        return print_json(&contacts);
    }

    if contacts.is_empty() {
        println!("no contacts");
        return Ok(());
    }

    for contact in contacts {
        let phones: Vec<&str> = contact
            .phones
            .iter()
            .map(|phone| phone.e164.as_deref().unwrap_or(phone.raw.as_str()))
            .collect();
        println!("{}  {}  {}", contact.id, contact.display_name, phones.join(", "));
    }
    Ok(())
}

pub fn remove(ctx: &Context<'_>, args: ContactRemoveArgs) -> Result<()> {
    let id = parse_contact_id(&args.id)?;
    ctx.store.contacts().delete(id)?;

    if ctx.json {
        return print_json(&serde_json::json!({ "id": id, "removed": true }));
    }
    println!("removed {}", id);
    Ok(())
}

fn canonical(ctx: &Context<'_>, raw: &str) -> Option<String> {
    match phone::parse(raw, ctx.region()) {
        Ok(number) => Some(number.e164()),
        Err(err) => {
            warn!(number = %raw, error = %err, "contact phone not indexed");
            None
        }
    }
}
