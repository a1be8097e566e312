pub mod allow;
pub mod contact;
pub mod ids;
pub mod log;

pub use allow::AllowListEntry;
pub use contact::{Contact, ContactPhone};
pub use ids::{AllowEntryId, ContactId};
pub use log::{CallKind, MessageFolder};
