use crate::domain::ids::ContactId;
use crate::error::CoreError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactPhone {
    pub raw: String,
    /// Canonical dial string when `raw` could be parsed.
    pub e164: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub id: ContactId,
    pub display_name: String,
    pub phones: Vec<ContactPhone>,
    pub created_at: i64,
}

pub fn normalize_display_name(value: &str) -> Result<String, CoreError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CoreError::EmptyDisplayName);
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::normalize_display_name;
    use crate::error::CoreError;

    #[test]
    fn display_name_is_trimmed() {
        assert_eq!(normalize_display_name("  Ada  ").unwrap(), "Ada");
    }

    #[test]
    fn display_name_rejects_blank() {
        assert_eq!(
            normalize_display_name("   ").unwrap_err(),
            CoreError::EmptyDisplayName
        );
    }
}
