use anyhow::Result;
use hushcall_config::AppConfig;
use hushcall_store::Store;
use serde::Serialize;
use std::io::{self, Write};

pub mod allow;
pub mod completions;
pub mod contacts;
pub mod log;
pub mod screen;
pub mod settings;

pub const DEFAULT_LOG_LIMIT: i64 = 20;

pub struct Context<'a> {
    pub store: &'a Store,
    pub json: bool,
    pub config: &'a AppConfig,
    /// `--region` when given, otherwise the configured home region.
    pub region: Option<String>,
}

impl Context<'_> {
    pub fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }
}

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value)?;
    writeln!(stdout)?;
    Ok(())
}
