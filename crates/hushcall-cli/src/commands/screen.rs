use crate::commands::{print_json, Context};
use crate::util::now_ms;
use anyhow::Result;
use clap::Args;
use hushcall_core::domain::CallKind;
use hushcall_core::phone;
use hushcall_core::screening::{Heuristic, Screener, Screening, Sources};
use hushcall_core::sources::FixedRegion;
use hushcall_store::repo::CallNew;
use hushcall_store::StoreSources;
use serde::Serialize;
use tracing::warn;

#[derive(Debug, Args)]
pub struct ScreenArgs {
    /// Caller number as presented by the network
    pub number: String,
    /// Append the call to the call log (blocked when silenced)
    #[arg(long)]
    pub record: bool,
}

#[derive(Debug, Serialize)]
struct ScreenReport {
    number: String,
    e164: Option<String>,
    allowed: bool,
    matched: Option<Heuristic>,
}

pub fn screen(ctx: &Context<'_>, args: ScreenArgs) -> Result<()> {
    let now = now_ms();
    let region = FixedRegion::new(ctx.region());

    let (e164, screening) = match phone::parse(&args.number, ctx.region()) {
        Ok(number) => {
            let sources = StoreSources::new(ctx.store, ctx.config.access);
            let screener = Screener::new(Sources::from_store(&region, &sources));
            let screening = screener.screen(&number, &ctx.config.screening, now);
            (Some(number.e164()), screening)
        }
        Err(err) => {
            warn!(number = %args.number, error = %err, "caller number unparseable, silencing");
            (
                None,
                Screening {
                    allowed: false,
                    matched: None,
                },
            )
        }
    };

    if args.record {
        let kind = if screening.allowed {
            CallKind::Incoming
        } else {
            CallKind::Blocked
        };
        ctx.store.calls().record(CallNew {
            number: args.number.clone(),
            e164: e164.clone(),
            kind,
            occurred_at_ms: now,
        })?;
    }

    if ctx.json {
        return print_json(&ScreenReport {
            number: args.number,
            e164,
            allowed: screening.allowed,
            matched: screening.matched,
        });
    }

    match screening.matched {
        Some(heuristic) => println!("allow ({})", heuristic),
        None => println!("silence"),
    }
    Ok(())
}
