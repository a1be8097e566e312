use crate::classify::NumberType;
use crate::phone;
use crate::screening::checks::{CheckSet, ContactedCheck, GroupCheck, MessageCheck};
use crate::screening::facts::NumberFacts;
use crate::screening::Sources;
use crate::sources::SourceResult;
use tracing::debug;

const MINUTE_MS: i64 = 60_000;

/// A failed read never counts as evidence that the caller is safe.
fn recover<T>(result: SourceResult<T>, heuristic: &'static str) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(err) => {
            debug!(heuristic, error = %err, "source read failed, treating as no match");
            None
        }
    }
}

pub(crate) fn contacts(sources: &Sources<'_>, facts: &NumberFacts<'_>) -> bool {
    recover(sources.contacts.lookup(facts.dial_string()), "contacts").unwrap_or(false)
}

pub(crate) fn contacted(
    sources: &Sources<'_>,
    facts: &NumberFacts<'_>,
    checks: &CheckSet<ContactedCheck>,
) -> Option<ContactedCheck> {
    checks.iter().copied().find(|check| match check {
        ContactedCheck::Call => {
            recover(sources.calls.query_outgoing(facts.dial_string()), "contacted.call")
                .unwrap_or(false)
        }
        ContactedCheck::Message => {
            recover(sources.messages.query_sent(facts.dial_string()), "contacted.message")
                .unwrap_or(false)
        }
    })
}

pub(crate) fn groups(facts: &NumberFacts<'_>, checks: &CheckSet<GroupCheck>) -> Option<GroupCheck> {
    checks.iter().copied().find(|check| match check {
        GroupCheck::TollFree => facts.number_type() == NumberType::TollFree,
        GroupCheck::Mobile => facts.is_mobile(),
        GroupCheck::Local => facts.is_local(),
        GroupCheck::NotLocal => !facts.is_local(),
        GroupCheck::LocalMobile => facts.is_local() && facts.is_mobile(),
    })
}

/// True when this call would be the `repeated_count`-th blocked attempt
/// inside the window.
pub(crate) fn repeated(
    sources: &Sources<'_>,
    facts: &NumberFacts<'_>,
    minutes: u32,
    count: u32,
    now_ms: i64,
) -> bool {
    let since_ms = now_ms - i64::from(minutes) * MINUTE_MS;
    match recover(
        sources.calls.count_blocked_since(facts.dial_string(), since_ms),
        "repeated",
    ) {
        Some(blocked) => blocked >= i64::from(count) - 1,
        None => false,
    }
}

pub(crate) fn messages(
    sources: &Sources<'_>,
    facts: &NumberFacts<'_>,
    checks: &CheckSet<MessageCheck>,
) -> Option<MessageCheck> {
    checks.iter().copied().find(|check| match check {
        MessageCheck::Inbox => {
            facts.is_mobile()
                && recover(
                    sources.messages.query_received(facts.dial_string()),
                    "messages.inbox",
                )
                .unwrap_or(false)
        }
        MessageCheck::Text => allow_listed(sources, facts),
    })
}

fn allow_listed(sources: &Sources<'_>, facts: &NumberFacts<'_>) -> bool {
    let Some(entries) = recover(sources.allow_list.list_active(), "messages.text") else {
        return false;
    };
    let region = facts.home_region();
    entries
        .iter()
        .filter(|entry| entry.is_active)
        .any(|entry| match phone::parse(&entry.phone_number, region) {
            Ok(candidate) => phone::equals(&candidate, facts.number()),
            Err(err) => {
                debug!(entry = %entry.id, error = %err, "skipping unparseable allow-list entry");
                false
            }
        })
}
