use crate::domain::ids::AllowEntryId;
use serde::{Deserialize, Serialize};

/// A number the user marked as always safe.
///
/// `phone_number` is kept exactly as entered and parsed again at screening
/// time with the current home region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllowListEntry {
    pub id: AllowEntryId,
    pub phone_number: String,
    pub is_active: bool,
    pub created_at: i64,
}
