use crate::commands::{print_json, Context, DEFAULT_LOG_LIMIT};
use crate::util::{format_timestamp_ms, now_ms};
use anyhow::Result;
use clap::{Args, Subcommand};
use hushcall_core::domain::{CallKind, MessageFolder};
use hushcall_core::phone;
use hushcall_store::repo::{CallNew, MessageNew};
use serde::Serialize;

#[derive(Debug, Subcommand)]
pub enum LogCommand {
    /// Append a call to the call log
    Call(LogCallArgs),
    /// Append a message to the message log
    Message(LogMessageArgs),
    /// Show the most recent calls
    Calls(LogListArgs),
    /// Show the most recent messages
    Messages(LogListArgs),
}

#[derive(Debug, Args)]
pub struct LogCallArgs {
    pub number: String,
    /// incoming|outgoing|missed|rejected|blocked
    #[arg(long)]
    pub kind: CallKind,
    /// Unix timestamp in milliseconds (defaults to now)
    #[arg(long)]
    pub at_ms: Option<i64>,
}

#[derive(Debug, Args)]
pub struct LogMessageArgs {
    /// Stored verbatim; screening compares it to the E.164 form
    pub address: String,
    /// inbox|sent
    #[arg(long)]
    pub folder: MessageFolder,
    #[arg(long)]
    pub at_ms: Option<i64>,
}

#[derive(Debug, Args)]
pub struct LogListArgs {
    #[arg(long, default_value_t = DEFAULT_LOG_LIMIT)]
    pub limit: i64,
}

#[derive(Debug, Serialize)]
struct CallDto {
    id: i64,
    number: String,
    e164: Option<String>,
    kind: CallKind,
    occurred_at_ms: i64,
}

#[derive(Debug, Serialize)]
struct MessageDto {
    id: i64,
    address: String,
    folder: MessageFolder,
    occurred_at_ms: i64,
}

pub fn log_call(ctx: &Context<'_>, args: LogCallArgs) -> Result<()> {
    let e164 = phone::parse(&args.number, ctx.region())
        .ok()
        .map(|number| number.e164());
    let record = ctx.store.calls().record(CallNew {
        number: args.number,
        e164,
        kind: args.kind,
        occurred_at_ms: args.at_ms.unwrap_or_else(now_ms),
    })?;

    if ctx.json {
        return print_json(&CallDto {
            id: record.id,
            number: record.number,
            e164: record.e164,
            kind: record.kind,
            occurred_at_ms: record.occurred_at_ms,
        });
    }
    println!("logged {} call from {}", record.kind, record.number);
    Ok(())
}

pub fn log_message(ctx: &Context<'_>, args: LogMessageArgs) -> Result<()> {
    let record = ctx.store.messages().record(MessageNew {
        address: args.address,
        folder: args.folder,
        occurred_at_ms: args.at_ms.unwrap_or_else(now_ms),
    })?;

    if ctx.json {
        return print_json(&MessageDto {
            id: record.id,
            address: record.address,
            folder: record.folder,
            occurred_at_ms: record.occurred_at_ms,
        });
    }
    println!("logged {} message for {}", record.folder, record.address);
    Ok(())
}

pub fn list_calls(ctx: &Context<'_>, args: LogListArgs) -> Result<()> {
    let calls = ctx.store.calls().list_recent(args.limit)?;

    if ctx.json {
        let items: Vec<CallDto> = calls
            .into_iter()
            .map(|call| CallDto {
                id: call.id,
                number: call.number,
                e164: call.e164,
                kind: call.kind,
                occurred_at_ms: call.occurred_at_ms,
            })
            .collect();
        return print_json(&items);
    }

    for call in calls {
        println!(
            "{}  {:<8}  {}",
            format_timestamp_ms(call.occurred_at_ms),
            call.kind,
            call.e164.as_deref().unwrap_or(call.number.as_str())
        );
    }
    Ok(())
}

pub fn list_messages(ctx: &Context<'_>, args: LogListArgs) -> Result<()> {
    let messages = ctx.store.messages().list_recent(args.limit)?;

    if ctx.json {
        let items: Vec<MessageDto> = messages
            .into_iter()
            .map(|message| MessageDto {
                id: message.id,
                address: message.address,
                folder: message.folder,
                occurred_at_ms: message.occurred_at_ms,
            })
            .collect();
        return print_json(&items);
    }

    for message in messages {
        println!(
            "{}  {:<5}  {}",
            format_timestamp_ms(message.occurred_at_ms),
            message.folder,
            message.address
        );
    }
    Ok(())
}
