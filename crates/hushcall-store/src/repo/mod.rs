pub mod allow_list;
pub mod calls;
pub mod contacts;
pub mod messages;

pub use allow_list::AllowListRepo;
pub use calls::{CallLogRepo, CallNew, CallRecord};
pub use contacts::{ContactNew, ContactsRepo};
pub use messages::{MessageNew, MessageRecord, MessagesRepo};
