use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CallKind {
    Incoming,
    Outgoing,
    Missed,
    Rejected,
    Blocked,
}

impl CallKind {
    pub fn as_str(self) -> &'static str {
        match self {
            CallKind::Incoming => "incoming",
            CallKind::Outgoing => "outgoing",
            CallKind::Missed => "missed",
            CallKind::Rejected => "rejected",
            CallKind::Blocked => "blocked",
        }
    }
}

impl fmt::Display for CallKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CallKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "incoming" => Ok(CallKind::Incoming),
            "outgoing" => Ok(CallKind::Outgoing),
            "missed" => Ok(CallKind::Missed),
            "rejected" => Ok(CallKind::Rejected),
            "blocked" => Ok(CallKind::Blocked),
            _ => Err(CoreError::InvalidCallKind(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageFolder {
    Inbox,
    Sent,
}

impl MessageFolder {
    pub fn as_str(self) -> &'static str {
        match self {
            MessageFolder::Inbox => "inbox",
            MessageFolder::Sent => "sent",
        }
    }
}

impl fmt::Display for MessageFolder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MessageFolder {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "inbox" => Ok(MessageFolder::Inbox),
            "sent" => Ok(MessageFolder::Sent),
            _ => Err(CoreError::InvalidMessageFolder(s.to_string())),
        }
    }
}
