// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

#![warn(missing_docs, clippy::all)]

//! RFC 5545 recurrence rule (`RRULE`) parsing.
//!
//! This crate turns a wire-format value such as
//! `FREQ=MONTHLY;INTERVAL=2;BYDAY=1MO,-1FR` into a validated [`Rule`], and
//! back again. It has no notion of occurrence expansion — that lives in
//! `recal-core`, which consumes the [`Rule`] this crate produces.

mod datetime;
mod error;
mod freq;
mod keyword;
mod parser;
mod rule;
mod weekday;

pub use datetime::DateTimeValue;
pub use error::ParseError;
pub use freq::Freq;
pub use rule::{Rule, RuleParts};
pub use weekday::{ByDayEntry, Weekday};

/// Parse a recurrence rule value, e.g. `"FREQ=DAILY;COUNT=10"`.
///
/// The `RRULE:` property prefix, if present, must be stripped by the
/// caller — this function parses the value only.
pub fn parse(input: &str) -> Result<Rule, ParseError> {
    parser::parse(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_minimal_rule() {
        let rule = parse("FREQ=DAILY").unwrap();
        assert_eq!(rule.freq(), Freq::Daily);
        assert_eq!(rule.interval(), 1);
        assert_eq!(rule.count(), None);
        assert_eq!(rule.until(), None);
    }

    #[test]
    fn parses_full_rule() {
        let rule = parse("FREQ=MONTHLY;INTERVAL=2;COUNT=5;BYDAY=1MO,-1FR;BYMONTH=1,6").unwrap();
        assert_eq!(rule.freq(), Freq::Monthly);
        assert_eq!(rule.interval(), 2);
        assert_eq!(rule.count(), Some(5));
        assert_eq!(rule.by_month(), &[1, 6]);
        assert_eq!(rule.by_day().len(), 2);
    }

    #[test]
    fn rejects_unknown_key() {
        let err = parse("FREQ=DAILY;BOGUS=1").unwrap_err();
        assert_eq!(
            err,
            ParseError::UnknownKey {
                key: "BOGUS".to_string()
            }
        );
    }

    #[test]
    fn rejects_duplicate_key() {
        let err = parse("FREQ=DAILY;FREQ=WEEKLY").unwrap_err();
        assert_eq!(
            err,
            ParseError::DuplicateKey {
                key: "FREQ".to_string()
            }
        );
    }

    #[test]
    fn rejects_count_and_until_together() {
        let err = parse("FREQ=DAILY;COUNT=5;UNTIL=20260101").unwrap_err();
        assert!(matches!(err, ParseError::Incompatible { .. }));
    }

    #[test]
    fn rejects_bysetpos_without_another_by_rule() {
        let err = parse("FREQ=MONTHLY;BYSETPOS=1").unwrap_err();
        assert!(matches!(err, ParseError::Incompatible { .. }));
    }

    #[test]
    fn rejects_byweekno_outside_yearly() {
        let err = parse("FREQ=MONTHLY;BYWEEKNO=20").unwrap_err();
        assert!(matches!(err, ParseError::Incompatible { .. }));
    }

    #[test]
    fn rejects_ordinal_byday_outside_monthly_yearly() {
        let err = parse("FREQ=WEEKLY;BYDAY=1MO").unwrap_err();
        assert!(matches!(err, ParseError::Incompatible { .. }));
    }

    #[test]
    fn rejects_zero_ordinal() {
        let err = parse("FREQ=MONTHLY;BYDAY=0MO").unwrap_err();
        assert!(matches!(err, ParseError::BadValue { .. }));
    }

    #[test]
    fn rejects_empty_list_entry() {
        let err = parse("FREQ=DAILY;BYMONTH=1,,3").unwrap_err();
        assert!(matches!(err, ParseError::BadValue { .. }));
    }

    #[test]
    fn rejects_interval_zero() {
        let err = parse("FREQ=DAILY;INTERVAL=0").unwrap_err();
        assert!(matches!(err, ParseError::BadValue { .. }));
    }

    #[test]
    fn count_zero_is_allowed() {
        let rule = parse("FREQ=DAILY;COUNT=0").unwrap();
        assert_eq!(rule.count(), Some(0));
    }

    #[test]
    fn until_bare_date_normalizes_to_end_of_day() {
        let rule = parse("FREQ=DAILY;UNTIL=20260115").unwrap();
        let until = rule.until().unwrap();
        assert_eq!(until.time(), chrono::NaiveTime::from_hms_opt(23, 59, 59).unwrap());
    }

    #[test]
    fn until_utc_round_trips() {
        let rule = parse("FREQ=DAILY;UNTIL=20260115T103000Z").unwrap();
        assert_eq!(rule.to_string(), "FREQ=DAILY;UNTIL=20260115T103000Z");
    }

    #[test]
    fn display_round_trips_through_parse() {
        let original = "FREQ=YEARLY;INTERVAL=3;COUNT=7;BYMONTH=3,6,9;BYDAY=1MO,-1FR;WKST=SU";
        let rule = parse(original).unwrap();
        let rendered = rule.to_string();
        assert_eq!(parse(&rendered).unwrap(), rule);
    }

    #[test]
    fn display_omits_defaults() {
        let rule = parse("FREQ=DAILY").unwrap();
        assert_eq!(rule.to_string(), "FREQ=DAILY");
    }
}
