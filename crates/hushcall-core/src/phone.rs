use phonenumber::{country, Mode};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PhoneError {
    #[error("phone number has no digits")]
    NoDigits,
    #[error("phone number has no country prefix and no region hint")]
    MissingRegion,
    #[error("unknown region code: {0}")]
    UnknownRegion(String),
    #[error("invalid phone number {raw:?}: {reason}")]
    Parse { raw: String, reason: String },
}

/// A caller number reduced to country calling code and national number.
///
/// Equality is exact: country code, national number (including the count of
/// significant leading zeros) and extension must all agree. The raw input is
/// kept for display and never takes part in comparisons.
#[derive(Debug, Clone)]
pub struct PhoneNumber {
    inner: phonenumber::PhoneNumber,
    raw: String,
}

impl PhoneNumber {
    pub fn country_code(&self) -> u16 {
        self.inner.code().value()
    }

    pub fn national_number(&self) -> u64 {
        self.inner.national().value()
    }

    pub fn raw_input(&self) -> &str {
        &self.raw
    }

    /// Canonical dial string, `+<country code><national number>`.
    pub fn e164(&self) -> String {
        self.inner.format().mode(Mode::E164).to_string()
    }

    pub fn is_valid(&self) -> bool {
        self.inner.is_valid()
    }

    pub(crate) fn metadata_number(&self) -> &phonenumber::PhoneNumber {
        &self.inner
    }
}

impl PartialEq for PhoneNumber {
    fn eq(&self, other: &Self) -> bool {
        self.inner.code().value() == other.inner.code().value()
            && self.inner.national().value() == other.inner.national().value()
            && self.inner.national().zeros() == other.inner.national().zeros()
            && self.inner.extension() == other.inner.extension()
    }
}

impl Eq for PhoneNumber {}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.e164())
    }
}

/// Parses a dialed or caller-id string.
///
/// `region_hint` is an ISO 3166 alpha-2 code used for numbers written without
/// a `+` prefix. Prefixed numbers are parsed without it, so the hint region's
/// trunk prefix is never stripped from a foreign national number. A hint that
/// does not name a known region is rejected for unprefixed numbers.
pub fn parse(raw: &str, region_hint: Option<&str>) -> Result<PhoneNumber, PhoneError> {
    let digits = dial_digits(raw).ok_or(PhoneError::NoDigits)?;
    let prefixed = digits.starts_with('+');

    let region = if prefixed {
        None
    } else {
        let code = region_hint
            .and_then(normalize_region)
            .ok_or(PhoneError::MissingRegion)?;
        Some(region_id(&code).ok_or(PhoneError::UnknownRegion(code))?)
    };

    let inner = phonenumber::parse(region, raw.trim()).map_err(|err| PhoneError::Parse {
        raw: raw.to_string(),
        reason: err.to_string(),
    })?;

    Ok(PhoneNumber {
        inner,
        raw: raw.to_string(),
    })
}

pub fn format(number: &PhoneNumber) -> String {
    number.e164()
}

/// Exact-match equivalence. Looser national-only matches never count.
pub fn equals(a: &PhoneNumber, b: &PhoneNumber) -> bool {
    a == b
}

/// Trims and uppercases a region code; blank input means "no region".
pub fn normalize_region(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(trimmed.to_ascii_uppercase())
}

pub fn is_known_region(value: &str) -> bool {
    normalize_region(value)
        .and_then(|code| region_id(&code))
        .is_some()
}

pub(crate) fn region_id(code: &str) -> Option<country::Id> {
    code.parse::<country::Id>().ok()
}

/// Strips formatting from a dial string, keeping a leading `+`.
///
/// Returns `None` when no digit precedes an extension marker.
fn dial_digits(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    let mut out = String::new();
    let mut saw_digit = false;

    if trimmed.starts_with('+') {
        out.push('+');
    }

    for ch in trimmed.chars() {
        if ch.is_ascii_digit() {
            out.push(ch);
            saw_digit = true;
            continue;
        }

        if matches!(ch, 'x' | 'X' | '#' | ';' | ',') {
            if !saw_digit {
                return None;
            }
            break;
        }
    }

    if !saw_digit {
        return None;
    }

    Some(out)
}

#[cfg(test)]
mod tests {
    use super::{dial_digits, equals, format, is_known_region, parse, PhoneError};
    use crate::classify::{classify, NumberType};

    #[test]
    fn dial_digits_strips_formatting() {
        assert_eq!(dial_digits("  (415) 555-1212  ").unwrap(), "4155551212");
        assert_eq!(dial_digits("+1 (415) 555-1212").unwrap(), "+14155551212");
    }

    #[test]
    fn dial_digits_rejects_extension_only_values() {
        assert!(dial_digits("ext 123").is_none());
        assert!(dial_digits("x123").is_none());
        assert!(dial_digits("   ").is_none());
    }

    #[test]
    fn parse_international_and_national_forms_match() {
        let international = parse("+14155552671", None).unwrap();
        let national = parse("4155552671", Some("US")).unwrap();
        assert!(equals(&international, &national));
        assert!(equals(&national, &international));
        assert!(equals(&international, &international));
    }

    #[test]
    fn parse_accepts_lowercase_padded_region() {
        let number = parse("(415) 555-2671", Some(" us ")).unwrap();
        assert_eq!(number.country_code(), 1);
        assert_eq!(number.national_number(), 4155552671);
        assert_eq!(number.raw_input(), "(415) 555-2671");
    }

    #[test]
    fn format_renders_e164_without_separators() {
        let number = parse("020 7031 3000", Some("GB")).unwrap();
        assert_eq!(format(&number), "+442070313000");
    }

    #[test]
    fn parse_requires_region_for_unprefixed_numbers() {
        assert_eq!(
            parse("4155552671", None).unwrap_err(),
            PhoneError::MissingRegion
        );
        assert_eq!(
            parse("4155552671", Some("")).unwrap_err(),
            PhoneError::MissingRegion
        );
        assert!(matches!(
            parse("4155552671", Some("QQ")).unwrap_err(),
            PhoneError::UnknownRegion(_)
        ));
    }

    #[test]
    fn parse_ignores_unknown_region_for_prefixed_numbers() {
        let number = parse("+442070313000", Some("QQ")).unwrap();
        assert_eq!(number.country_code(), 44);
    }

    #[test]
    fn prefixed_numbers_keep_their_own_trunk_digits() {
        let hinted = parse("+4915123456789", Some("US")).unwrap();
        let bare = parse("+4915123456789", None).unwrap();
        assert!(equals(&hinted, &bare));
        assert_eq!(format(&hinted), "+4915123456789");
        assert_eq!(classify(&hinted), NumberType::Mobile);

        let uk = parse("+441212345678", Some("US")).unwrap();
        assert_eq!(format(&uk), "+441212345678");
    }

    #[test]
    fn parse_rejects_strings_without_digits() {
        assert_eq!(parse("anonymous", Some("US")).unwrap_err(), PhoneError::NoDigits);
        assert_eq!(parse("", Some("US")).unwrap_err(), PhoneError::NoDigits);
    }

    #[test]
    fn different_countries_do_not_match() {
        let us = parse("+12025550123", None).unwrap();
        let gb = parse("+442070313000", None).unwrap();
        assert!(!equals(&us, &gb));
    }

    #[test]
    fn known_region_checks_iso_codes() {
        assert!(is_known_region("de"));
        assert!(!is_known_region(""));
        assert!(!is_known_region("QQ"));
    }
}
