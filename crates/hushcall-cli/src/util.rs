use crate::error::invalid_input;
use anyhow::Result;
use chrono::{DateTime, Local, Utc};
use hushcall_core::domain::{AllowEntryId, ContactId};
use std::str::FromStr;

pub fn now_ms() -> i64 {
    Utc::now().timestamp_millis()
}

pub fn now_utc() -> i64 {
    Utc::now().timestamp()
}

pub fn format_timestamp_ms(ts_ms: i64) -> String {
    let dt = DateTime::<Utc>::from_timestamp_millis(ts_ms)
        .unwrap_or_default()
        .with_timezone(&Local);
    dt.format("%Y-%m-%d %H:%M:%S").to_string()
}

pub fn parse_allow_id(raw: &str) -> Result<AllowEntryId> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(invalid_input("allow-list id cannot be empty"));
    }
    AllowEntryId::from_str(trimmed).map_err(|_| invalid_input("invalid allow-list id"))
}

pub fn parse_contact_id(raw: &str) -> Result<ContactId> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(invalid_input("contact id cannot be empty"));
    }
    ContactId::from_str(trimmed).map_err(|_| invalid_input("invalid contact id"))
}

#[cfg(test)]
mod tests {
    use super::{format_timestamp_ms, parse_allow_id};

    #[test]
    fn parse_allow_id_rejects_garbage() {
        assert!(parse_allow_id("").is_err());
        assert!(parse_allow_id("not-a-uuid").is_err());
        assert!(parse_allow_id("67e55044-10b1-426f-9247-bb680e5fe0c8").is_ok());
    }

    #[test]
    fn format_timestamp_ms_has_seconds() {
        assert_eq!(format_timestamp_ms(0).len(), "1970-01-01 00:00:00".len());
    }
}
