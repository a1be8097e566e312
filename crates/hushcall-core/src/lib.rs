pub mod classify;
pub mod domain;
pub mod error;
pub mod phone;
pub mod screening;
pub mod sources;

pub use classify::{classify, is_local, NumberType};
pub use domain::*;
pub use error::CoreError;
pub use phone::{equals, format, parse, PhoneError, PhoneNumber};
pub use screening::*;
pub use sources::{
    AllowList, CallLog, ContactsIndex, FixedRegion, MessageLog, RegionProvider, SourceAccess,
    SourceError, SourceKind,
};
