//! Read-only contracts for the data sources screening consults.
//!
//! Every method takes `&self`; a decision never mutates a source.

use crate::domain::AllowListEntry;
use crate::phone::normalize_region;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Contacts,
    CallLog,
    Messages,
    AllowList,
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SourceKind::Contacts => "contacts",
            SourceKind::CallLog => "call log",
            SourceKind::Messages => "messages",
            SourceKind::AllowList => "allow list",
        })
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SourceError {
    #[error("permission denied: {0}")]
    PermissionDenied(SourceKind),
    #[error("{source_kind} unavailable: {message}")]
    Unavailable {
        source_kind: SourceKind,
        message: String,
    },
}

pub type SourceResult<T> = std::result::Result<T, SourceError>;

pub trait RegionProvider {
    /// Home network region as an ISO 3166 alpha-2 code, if known.
    fn home_region(&self) -> Option<String>;
}

pub trait ContactsIndex {
    fn lookup(&self, dial_string: &str) -> SourceResult<bool>;
}

pub trait CallLog {
    fn query_outgoing(&self, dial_string: &str) -> SourceResult<bool>;
    /// Blocked calls from `dial_string` strictly after `since_ms`.
    fn count_blocked_since(&self, dial_string: &str, since_ms: i64) -> SourceResult<i64>;
}

pub trait MessageLog {
    fn query_sent(&self, address: &str) -> SourceResult<bool>;
    fn query_received(&self, address: &str) -> SourceResult<bool>;
}

pub trait AllowList {
    fn list_active(&self) -> SourceResult<Vec<AllowListEntry>>;
}

/// Region provider backed by a fixed, already-resolved value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FixedRegion(Option<String>);

impl FixedRegion {
    pub fn new(region: Option<&str>) -> Self {
        Self(region.and_then(normalize_region))
    }
}

impl RegionProvider for FixedRegion {
    fn home_region(&self) -> Option<String> {
        self.0.clone()
    }
}

/// Which platform data sources the user has granted access to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceAccess {
    pub contacts: bool,
    pub call_log: bool,
    pub messages: bool,
}

impl Default for SourceAccess {
    fn default() -> Self {
        Self {
            contacts: true,
            call_log: true,
            messages: true,
        }
    }
}

impl SourceAccess {
    pub fn check(&self, kind: SourceKind) -> SourceResult<()> {
        let granted = match kind {
            SourceKind::Contacts => self.contacts,
            SourceKind::CallLog => self.call_log,
            SourceKind::Messages => self.messages,
            SourceKind::AllowList => true,
        };
        if granted {
            Ok(())
        } else {
            Err(SourceError::PermissionDenied(kind))
        }
    }
}
