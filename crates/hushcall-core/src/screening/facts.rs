use crate::classify::{self, NumberType};
use crate::phone::{normalize_region, PhoneNumber};
use crate::sources::RegionProvider;
use std::cell::OnceCell;

/// Per-decision view of the caller number.
///
/// Each derived value is computed on first use and at most once; nothing is
/// computed for heuristics that never ask.
pub struct NumberFacts<'a> {
    number: &'a PhoneNumber,
    region: &'a dyn RegionProvider,
    dial_string: OnceCell<String>,
    home_region: OnceCell<Option<String>>,
    number_type: OnceCell<NumberType>,
    is_local: OnceCell<bool>,
}

impl<'a> NumberFacts<'a> {
    pub fn new(number: &'a PhoneNumber, region: &'a dyn RegionProvider) -> Self {
        Self {
            number,
            region,
            dial_string: OnceCell::new(),
            home_region: OnceCell::new(),
            number_type: OnceCell::new(),
            is_local: OnceCell::new(),
        }
    }

    pub fn number(&self) -> &PhoneNumber {
        self.number
    }

    pub fn dial_string(&self) -> &str {
        self.dial_string.get_or_init(|| self.number.e164())
    }

    pub fn home_region(&self) -> Option<&str> {
        self.home_region
            .get_or_init(|| {
                self.region
                    .home_region()
                    .as_deref()
                    .and_then(normalize_region)
            })
            .as_deref()
    }

    pub fn number_type(&self) -> NumberType {
        *self
            .number_type
            .get_or_init(|| classify::classify(self.number))
    }

    pub fn is_mobile(&self) -> bool {
        self.number_type() == NumberType::Mobile
    }

    pub fn is_local(&self) -> bool {
        *self
            .is_local
            .get_or_init(|| classify::is_local(self.number, self.home_region()))
    }
}

#[cfg(test)]
mod tests {
    use super::NumberFacts;
    use crate::classify::NumberType;
    use crate::phone::parse;
    use crate::sources::RegionProvider;
    use std::cell::Cell;

    struct CountingRegion {
        calls: Cell<usize>,
    }

    impl RegionProvider for CountingRegion {
        fn home_region(&self) -> Option<String> {
            self.calls.set(self.calls.get() + 1);
            Some("gb".to_string())
        }
    }

    #[test]
    fn region_is_read_once_and_only_when_needed() {
        let region = CountingRegion {
            calls: Cell::new(0),
        };
        let number = parse("+447400123456", None).unwrap();
        let facts = NumberFacts::new(&number, &region);

        assert_eq!(facts.number_type(), NumberType::Mobile);
        assert_eq!(region.calls.get(), 0);

        assert!(facts.is_local());
        assert!(facts.is_local());
        assert_eq!(facts.home_region(), Some("GB"));
        assert_eq!(region.calls.get(), 1);
    }

    #[test]
    fn dial_string_is_e164() {
        let region = CountingRegion {
            calls: Cell::new(0),
        };
        let number = parse("07400 123456", Some("GB")).unwrap();
        let facts = NumberFacts::new(&number, &region);
        assert_eq!(facts.dial_string(), "+447400123456");
        assert!(facts.is_mobile());
    }
}
