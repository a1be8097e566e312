use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Sub-checks of one category. Variants are declared in evaluation order and
/// `Ord` follows declaration order, so iterating a `CheckSet` visits them in
/// the order they must run.
pub type CheckSet<T> = BTreeSet<T>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactedCheck {
    Call,
    Message,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupCheck {
    TollFree,
    Mobile,
    Local,
    NotLocal,
    LocalMobile,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageCheck {
    Inbox,
    Text,
}

impl ContactedCheck {
    pub fn as_str(self) -> &'static str {
        match self {
            ContactedCheck::Call => "call",
            ContactedCheck::Message => "message",
        }
    }
}

impl GroupCheck {
    pub fn as_str(self) -> &'static str {
        match self {
            GroupCheck::TollFree => "toll_free",
            GroupCheck::Mobile => "mobile",
            GroupCheck::Local => "local",
            GroupCheck::NotLocal => "not_local",
            GroupCheck::LocalMobile => "local_mobile",
        }
    }
}

impl MessageCheck {
    pub fn as_str(self) -> &'static str {
        match self {
            MessageCheck::Inbox => "inbox",
            MessageCheck::Text => "text",
        }
    }
}

impl fmt::Display for ContactedCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for GroupCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for MessageCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::{CheckSet, GroupCheck, MessageCheck};

    #[test]
    fn group_set_iterates_in_declared_order() {
        let set: CheckSet<GroupCheck> = [
            GroupCheck::LocalMobile,
            GroupCheck::TollFree,
            GroupCheck::NotLocal,
            GroupCheck::Mobile,
        ]
        .into_iter()
        .collect();
        let order: Vec<_> = set.into_iter().collect();
        assert_eq!(
            order,
            vec![
                GroupCheck::TollFree,
                GroupCheck::Mobile,
                GroupCheck::NotLocal,
                GroupCheck::LocalMobile,
            ]
        );
    }

    #[test]
    fn message_set_ignores_duplicates() {
        let set: CheckSet<MessageCheck> = [MessageCheck::Text, MessageCheck::Inbox, MessageCheck::Text]
            .into_iter()
            .collect();
        assert_eq!(set.len(), 2);
        assert_eq!(set.first(), Some(&MessageCheck::Inbox));
    }
}
