//! The allow/silence decision for one incoming call.

pub mod checks;
pub mod config;
pub mod facts;
mod heuristics;

pub use checks::{CheckSet, ContactedCheck, GroupCheck, MessageCheck};
pub use config::{
    validate_repeated_count, validate_repeated_minutes, ScreeningConfig, DEFAULT_REPEATED_COUNT,
    DEFAULT_REPEATED_MINUTES, MAX_REPEATED_COUNT, MAX_REPEATED_MINUTES,
};
pub use facts::NumberFacts;

use crate::phone::PhoneNumber;
use crate::sources::{AllowList, CallLog, ContactsIndex, MessageLog, RegionProvider};
use serde::Serialize;
use std::fmt;
use tracing::debug;

/// The collaborators a decision may read from.
#[derive(Clone, Copy)]
pub struct Sources<'a> {
    pub region: &'a dyn RegionProvider,
    pub contacts: &'a dyn ContactsIndex,
    pub calls: &'a dyn CallLog,
    pub messages: &'a dyn MessageLog,
    pub allow_list: &'a dyn AllowList,
}

impl<'a> Sources<'a> {
    /// Uses one value for every data source and a separate region provider.
    pub fn from_store<S>(region: &'a dyn RegionProvider, store: &'a S) -> Self
    where
        S: ContactsIndex + CallLog + MessageLog + AllowList,
    {
        Self {
            region,
            contacts: store,
            calls: store,
            messages: store,
            allow_list: store,
        }
    }
}

/// The heuristic that let a call through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Heuristic {
    Contacts,
    Contacted(ContactedCheck),
    Groups(GroupCheck),
    Repeated,
    Messages(MessageCheck),
}

impl fmt::Display for Heuristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Heuristic::Contacts => f.write_str("contacts"),
            Heuristic::Contacted(check) => write!(f, "contacted:{}", check),
            Heuristic::Groups(check) => write!(f, "groups:{}", check),
            Heuristic::Repeated => f.write_str("repeated"),
            Heuristic::Messages(check) => write!(f, "messages:{}", check),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Screening {
    pub allowed: bool,
    pub matched: Option<Heuristic>,
}

pub struct Screener<'a> {
    sources: Sources<'a>,
}

impl<'a> Screener<'a> {
    pub fn new(sources: Sources<'a>) -> Self {
        Self { sources }
    }

    /// `true` lets the call through, `false` silences it.
    pub fn decide(&self, number: &PhoneNumber, config: &ScreeningConfig, now_ms: i64) -> bool {
        self.screen(number, config, now_ms).allowed
    }

    /// Runs the contacts lookup, then each enabled category in fixed order,
    /// stopping at the first match. A disabled category never touches its
    /// data source.
    pub fn screen(&self, number: &PhoneNumber, config: &ScreeningConfig, now_ms: i64) -> Screening {
        let facts = NumberFacts::new(number, self.sources.region);
        let matched = self.first_match(&facts, config, now_ms);
        debug!(
            number = %facts.dial_string(),
            allowed = matched.is_some(),
            matched = ?matched,
            "screened call"
        );
        Screening {
            allowed: matched.is_some(),
            matched,
        }
    }

    fn first_match(
        &self,
        facts: &NumberFacts<'_>,
        config: &ScreeningConfig,
        now_ms: i64,
    ) -> Option<Heuristic> {
        let sources = &self.sources;

        if heuristics::contacts(sources, facts) {
            return Some(Heuristic::Contacts);
        }

        if config.contacted_checked {
            if let Some(check) = heuristics::contacted(sources, facts, &config.contacted) {
                return Some(Heuristic::Contacted(check));
            }
        }

        if config.groups_checked {
            if let Some(check) = heuristics::groups(facts, &config.groups) {
                return Some(Heuristic::Groups(check));
            }
        }

        if config.repeated_checked
            && heuristics::repeated(
                sources,
                facts,
                config.repeated_minutes,
                config.repeated_count,
                now_ms,
            )
        {
            return Some(Heuristic::Repeated);
        }

        if config.messages_checked {
            if let Some(check) = heuristics::messages(sources, facts, &config.messages) {
                return Some(Heuristic::Messages(check));
            }
        }

        None
    }
}
