use crate::error::StoreError;
use crate::Store;
use hushcall_core::domain::{AllowListEntry, MessageFolder};
use hushcall_core::sources::{
    AllowList, CallLog, ContactsIndex, MessageLog, SourceAccess, SourceError, SourceKind,
    SourceResult,
};

/// The store seen through the screening collaborator contracts.
///
/// Reads for a source whose grant is revoked fail with
/// `SourceError::PermissionDenied` before touching the database.
pub struct StoreSources<'a> {
    store: &'a Store,
    access: SourceAccess,
}

impl<'a> StoreSources<'a> {
    pub fn new(store: &'a Store, access: SourceAccess) -> Self {
        Self { store, access }
    }
}

fn unavailable(kind: SourceKind) -> impl Fn(StoreError) -> SourceError {
    move |err| SourceError::Unavailable {
        source_kind: kind,
        message: err.to_string(),
    }
}

impl ContactsIndex for StoreSources<'_> {
    fn lookup(&self, dial_string: &str) -> SourceResult<bool> {
        self.access.check(SourceKind::Contacts)?;
        self.store
            .contacts()
            .exists_e164(dial_string)
            .map_err(unavailable(SourceKind::Contacts))
    }
}

impl CallLog for StoreSources<'_> {
    fn query_outgoing(&self, dial_string: &str) -> SourceResult<bool> {
        self.access.check(SourceKind::CallLog)?;
        self.store
            .calls()
            .has_outgoing(dial_string)
            .map_err(unavailable(SourceKind::CallLog))
    }

    fn count_blocked_since(&self, dial_string: &str, since_ms: i64) -> SourceResult<i64> {
        self.access.check(SourceKind::CallLog)?;
        self.store
            .calls()
            .count_blocked_since(dial_string, since_ms)
            .map_err(unavailable(SourceKind::CallLog))
    }
}

impl MessageLog for StoreSources<'_> {
    fn query_sent(&self, address: &str) -> SourceResult<bool> {
        self.access.check(SourceKind::Messages)?;
        self.store
            .messages()
            .exists(MessageFolder::Sent, address)
            .map_err(unavailable(SourceKind::Messages))
    }

    fn query_received(&self, address: &str) -> SourceResult<bool> {
        self.access.check(SourceKind::Messages)?;
        self.store
            .messages()
            .exists(MessageFolder::Inbox, address)
            .map_err(unavailable(SourceKind::Messages))
    }
}

impl AllowList for StoreSources<'_> {
    fn list_active(&self) -> SourceResult<Vec<AllowListEntry>> {
        self.store
            .allow_list()
            .list_active()
            .map_err(unavailable(SourceKind::AllowList))
    }
}
