use crate::error::CoreError;
use crate::screening::checks::{CheckSet, ContactedCheck, GroupCheck, MessageCheck};
use serde::{Deserialize, Serialize};

pub const DEFAULT_REPEATED_MINUTES: u32 = 5;
pub const DEFAULT_REPEATED_COUNT: u32 = 3;
pub const MAX_REPEATED_MINUTES: u32 = 24 * 60;
pub const MAX_REPEATED_COUNT: u32 = 100;

/// Snapshot of the screening settings, read once per decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreeningConfig {
    pub contacted_checked: bool,
    pub groups_checked: bool,
    pub repeated_checked: bool,
    pub messages_checked: bool,
    pub contacted: CheckSet<ContactedCheck>,
    pub groups: CheckSet<GroupCheck>,
    pub messages: CheckSet<MessageCheck>,
    pub repeated_minutes: u32,
    pub repeated_count: u32,
}

impl Default for ScreeningConfig {
    fn default() -> Self {
        Self {
            contacted_checked: false,
            groups_checked: false,
            repeated_checked: false,
            messages_checked: false,
            contacted: [ContactedCheck::Call, ContactedCheck::Message]
                .into_iter()
                .collect(),
            groups: CheckSet::new(),
            messages: CheckSet::new(),
            repeated_minutes: DEFAULT_REPEATED_MINUTES,
            repeated_count: DEFAULT_REPEATED_COUNT,
        }
    }
}

pub fn validate_repeated_minutes(minutes: u32) -> Result<u32, CoreError> {
    if minutes == 0 || minutes > MAX_REPEATED_MINUTES {
        return Err(CoreError::InvalidRepeatedMinutes(minutes));
    }
    Ok(minutes)
}

pub fn validate_repeated_count(count: u32) -> Result<u32, CoreError> {
    if count == 0 || count > MAX_REPEATED_COUNT {
        return Err(CoreError::InvalidRepeatedCount(count));
    }
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::{validate_repeated_count, validate_repeated_minutes, ScreeningConfig};
    use crate::error::CoreError;
    use crate::screening::checks::ContactedCheck;

    #[test]
    fn defaults_disable_every_category() {
        let config = ScreeningConfig::default();
        assert!(!config.contacted_checked);
        assert!(!config.groups_checked);
        assert!(!config.repeated_checked);
        assert!(!config.messages_checked);
        assert!(config.contacted.contains(&ContactedCheck::Call));
        assert_eq!(config.repeated_count, 3);
    }

    #[test]
    fn repeated_thresholds_are_bounded() {
        assert_eq!(validate_repeated_minutes(15).unwrap(), 15);
        assert_eq!(
            validate_repeated_minutes(0).unwrap_err(),
            CoreError::InvalidRepeatedMinutes(0)
        );
        assert!(validate_repeated_minutes(24 * 60 + 1).is_err());
        assert_eq!(validate_repeated_count(1).unwrap(), 1);
        assert_eq!(
            validate_repeated_count(0).unwrap_err(),
            CoreError::InvalidRepeatedCount(0)
        );
    }
}
