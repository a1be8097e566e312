use crate::commands::{print_json, Context};
use anyhow::Result;
use clap::Subcommand;
use hushcall_core::screening::{CheckSet, ScreeningConfig};
use hushcall_core::sources::SourceAccess;
use serde::Serialize;
use std::fmt::Display;

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Print the effective screening configuration
    Show,
}

#[derive(Debug, Serialize)]
struct EffectiveConfig<'a> {
    home_region: Option<&'a str>,
    screening: &'a ScreeningConfig,
    access: SourceAccess,
}

pub fn show(ctx: &Context<'_>) -> Result<()> {
    let screening = &ctx.config.screening;

    if ctx.json {
        return print_json(&EffectiveConfig {
            home_region: ctx.region(),
            screening,
            access: ctx.config.access,
        });
    }

    println!("home region: {}", ctx.region().unwrap_or("(none)"));
    println!("contacts:    always");
    println!(
        "contacted:   {}",
        category(screening.contacted_checked, &screening.contacted)
    );
    println!(
        "groups:      {}",
        category(screening.groups_checked, &screening.groups)
    );
    if screening.repeated_checked {
        println!(
            "repeated:    {} calls within {} min",
            screening.repeated_count, screening.repeated_minutes
        );
    } else {
        println!("repeated:    off");
    }
    println!(
        "messages:    {}",
        category(screening.messages_checked, &screening.messages)
    );
    println!(
        "access:      contacts={} call_log={} messages={}",
        ctx.config.access.contacts, ctx.config.access.call_log, ctx.config.access.messages
    );
    Ok(())
}

fn category<T: Display>(enabled: bool, checks: &CheckSet<T>) -> String {
    if !enabled {
        return "off".to_string();
    }
    if checks.is_empty() {
        return "on (no checks)".to_string();
    }
    checks
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
