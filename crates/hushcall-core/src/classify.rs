use crate::phone::{normalize_region, region_id, PhoneNumber};
use phonenumber::metadata::DATABASE;
use phonenumber::Type;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumberType {
    Mobile,
    TollFree,
    Geographic,
    Unknown,
}

/// Numbering-plan type of `number`, taken from the range tables of its
/// country calling code.
///
/// Ranges a plan shares between fixed lines and mobiles (the whole NANP, for
/// instance) count as geographic, never as mobile.
pub fn classify(number: &PhoneNumber) -> NumberType {
    match number.metadata_number().number_type(&DATABASE) {
        Type::Mobile => NumberType::Mobile,
        Type::TollFree => NumberType::TollFree,
        Type::FixedLine | Type::FixedLineOrMobile => NumberType::Geographic,
        _ => NumberType::Unknown,
    }
}

/// True when `number` is valid and assigned within `home_region`'s plan.
pub fn is_local(number: &PhoneNumber, home_region: Option<&str>) -> bool {
    let Some(home) = home_region
        .and_then(normalize_region)
        .and_then(|code| region_id(&code))
    else {
        return false;
    };

    let inner = number.metadata_number();
    inner.is_valid() && inner.country().id() == Some(home)
}

#[cfg(test)]
mod tests {
    use super::{classify, is_local, NumberType};
    use crate::phone::parse;

    #[test]
    fn classify_reads_plan_ranges() {
        let mobile = parse("+447400123456", None).unwrap();
        assert_eq!(classify(&mobile), NumberType::Mobile);

        let toll_free = parse("+18002345678", None).unwrap();
        assert_eq!(classify(&toll_free), NumberType::TollFree);

        let fixed = parse("+441212345678", None).unwrap();
        assert_eq!(classify(&fixed), NumberType::Geographic);
    }

    #[test]
    fn nanp_fixed_or_mobile_is_not_mobile() {
        let number = parse("+12015550123", None).unwrap();
        assert_eq!(classify(&number), NumberType::Geographic);
    }

    #[test]
    fn is_local_matches_home_region() {
        let number = parse("+447400123456", None).unwrap();
        assert!(is_local(&number, Some("GB")));
        assert!(is_local(&number, Some("gb")));
        assert!(!is_local(&number, Some("US")));
    }

    #[test]
    fn is_local_is_false_without_region() {
        let number = parse("+447400123456", None).unwrap();
        assert!(!is_local(&number, None));
        assert!(!is_local(&number, Some("")));
        assert!(!is_local(&number, Some("QQ")));
    }
}
