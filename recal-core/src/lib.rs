// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

#![warn(missing_docs, clippy::all)]

//! The RRULE occurrence engine: given a [`recal_ical::Rule`] and an anchor
//! date-time, produces the lazy, strictly-ascending sequence of
//! occurrences, and answers point membership queries without generating
//! the full sequence.
//!
//! This crate has no notion of wire-format parsing — that lives in
//! `recal-ical`, whose [`Rule`] this crate's functions consume directly.

mod calendar;
mod engine;
mod error;
mod expand;
mod membership;
mod period;
mod weekno;

pub use calendar::generate_calendar_mode;
pub use engine::{Occurrences, generate, generate_capped, generate_range};
pub use error::EngineError;
pub use membership::is_member;
pub use recal_ical::{DateTimeValue, Rule};

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;
    use recal_ical::parse;

    fn dt(s: &str) -> DateTimeValue {
        DateTimeValue::Floating(NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap())
    }

    fn dates(rule: &Rule, anchor: DateTimeValue) -> Vec<NaiveDateTime> {
        generate(rule, anchor).map(|d| d.naive()).collect()
    }

    fn d(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
    }

    // spec §8 concrete end-to-end scenarios.

    #[test]
    fn scenario_1_basic_daily() {
        let rule = parse("FREQ=DAILY;COUNT=3").unwrap();
        let anchor = dt("2025-01-01 00:00:00");
        assert_eq!(
            dates(&rule, anchor),
            vec![d("2025-01-01 00:00:00"), d("2025-01-02 00:00:00"), d("2025-01-03 00:00:00")]
        );
    }

    #[test]
    fn scenario_2_last_day_of_month() {
        let rule = parse("FREQ=MONTHLY;BYMONTHDAY=-1;COUNT=6").unwrap();
        let anchor = dt("2025-01-31 10:00:00");
        assert_eq!(
            dates(&rule, anchor),
            vec![
                d("2025-01-31 10:00:00"),
                d("2025-02-28 10:00:00"),
                d("2025-03-31 10:00:00"),
                d("2025-04-30 10:00:00"),
                d("2025-05-31 10:00:00"),
                d("2025-06-30 10:00:00"),
            ]
        );
    }

    #[test]
    fn scenario_3_feb_29_leap_year_yearly() {
        let rule = parse("FREQ=YEARLY;COUNT=4").unwrap();
        let anchor = dt("2024-02-29 10:00:00");
        assert_eq!(
            dates(&rule, anchor),
            vec![
                d("2024-02-29 10:00:00"),
                d("2028-02-29 10:00:00"),
                d("2032-02-29 10:00:00"),
                d("2036-02-29 10:00:00"),
            ]
        );
    }

    #[test]
    fn scenario_4_first_and_last_weekday_of_month() {
        let rule = parse("FREQ=MONTHLY;BYDAY=MO,TU,WE,TH,FR;BYSETPOS=1,-1;COUNT=4").unwrap();
        let anchor = dt("2025-01-01 10:00:00");
        assert_eq!(
            dates(&rule, anchor),
            vec![
                d("2025-01-01 10:00:00"),
                d("2025-01-31 10:00:00"),
                d("2025-02-03 10:00:00"),
                d("2025-02-28 10:00:00"),
            ]
        );
    }

    #[test]
    fn scenario_5_weekly_bysetpos() {
        let rule = parse("FREQ=WEEKLY;BYDAY=MO,WE,FR;BYSETPOS=1;COUNT=4").unwrap();
        let anchor = dt("2025-01-01 10:00:00"); // Wednesday
        assert_eq!(
            dates(&rule, anchor),
            vec![
                d("2025-01-01 10:00:00"),
                d("2025-01-06 10:00:00"),
                d("2025-01-13 10:00:00"),
                d("2025-01-20 10:00:00"),
            ]
        );
    }

    #[test]
    fn scenario_6_bymonthday_31_skips_short_months() {
        let rule = parse("FREQ=MONTHLY;BYMONTHDAY=31;COUNT=7").unwrap();
        let anchor = dt("2025-01-31 10:00:00");
        assert_eq!(
            dates(&rule, anchor),
            vec![
                d("2025-01-31 10:00:00"),
                d("2025-03-31 10:00:00"),
                d("2025-05-31 10:00:00"),
                d("2025-07-31 10:00:00"),
                d("2025-08-31 10:00:00"),
                d("2025-10-31 10:00:00"),
                d("2025-12-31 10:00:00"),
            ]
        );
    }

    // §8 universal properties.

    #[test]
    fn property_ascending_and_deduped() {
        let rule = parse("FREQ=MONTHLY;BYDAY=MO,TU,WE,TH,FR,SA,SU;COUNT=50").unwrap();
        let anchor = dt("2025-01-01 00:00:00");
        let seq = dates(&rule, anchor);
        assert!(seq.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn property_determinism() {
        let rule = parse("FREQ=WEEKLY;BYDAY=MO,WE,FR;COUNT=20").unwrap();
        let anchor = dt("2025-01-01 08:00:00");
        assert_eq!(dates(&rule, anchor), dates(&rule, anchor));
    }

    #[test]
    fn property_count_law() {
        let rule = parse("FREQ=DAILY;COUNT=5").unwrap();
        let anchor = dt("2025-01-01 00:00:00");
        assert_eq!(dates(&rule, anchor).len(), 5);
    }

    #[test]
    fn property_until_law() {
        let rule = parse("FREQ=DAILY;UNTIL=20250105T000000").unwrap();
        let anchor = dt("2025-01-01 00:00:00");
        let seq = dates(&rule, anchor);
        assert_eq!(*seq.last().unwrap(), d("2025-01-05 00:00:00"));
        assert!(seq.iter().all(|dt| *dt <= d("2025-01-05 00:00:00")));
    }

    #[test]
    fn property_range_law() {
        let rule = parse("FREQ=DAILY;COUNT=10").unwrap();
        let anchor = dt("2025-01-01 00:00:00");
        let full = dates(&rule, anchor);
        let a = dt("2025-01-03 00:00:00");
        let b = dt("2025-01-06 00:00:00");
        let ranged: Vec<NaiveDateTime> = generate_range(&rule, anchor, a, b).map(|x| x.naive()).collect();
        let expected: Vec<NaiveDateTime> = full
            .into_iter()
            .filter(|x| *x >= a.naive() && *x <= b.naive())
            .collect();
        assert_eq!(ranged, expected);
    }

    #[test]
    fn property_interval_law_pure_cadence() {
        let rule = parse("FREQ=HOURLY;INTERVAL=3;COUNT=4").unwrap();
        let anchor = dt("2025-01-01 00:00:00");
        assert_eq!(
            dates(&rule, anchor),
            vec![
                d("2025-01-01 00:00:00"),
                d("2025-01-01 03:00:00"),
                d("2025-01-01 06:00:00"),
                d("2025-01-01 09:00:00"),
            ]
        );
    }

    #[test]
    fn property_bysetpos_negative_index() {
        let rule = parse("FREQ=MONTHLY;BYDAY=MO,TU,WE,TH,FR,SA,SU;BYSETPOS=-1;COUNT=2").unwrap();
        let anchor = dt("2025-01-01 00:00:00");
        assert_eq!(dates(&rule, anchor), vec![d("2025-01-31 00:00:00"), d("2025-02-28 00:00:00")]);
    }

    #[test]
    fn membership_equivalence_with_generation() {
        let rule = parse("FREQ=DAILY;COUNT=5").unwrap();
        let anchor = dt("2025-01-01 00:00:00");
        for emitted in dates(&rule, anchor) {
            assert!(is_member(&rule, anchor, DateTimeValue::Floating(emitted)));
        }
        assert!(!is_member(&rule, anchor, dt("2025-01-06 00:00:00")));
    }

    #[test]
    fn capped_generation_truncates() {
        let rule = parse("FREQ=DAILY").unwrap();
        let anchor = dt("2025-01-01 00:00:00");
        let capped: Vec<_> = generate_capped(&rule, anchor, 3).collect();
        assert_eq!(capped.len(), 3);
    }

    #[test]
    fn structurally_empty_rule_terminates() {
        // Feb never has a 30th or 31st; a monthly rule confined to February
        // with no matching BYMONTHDAY can never fire.
        let rule = parse("FREQ=MONTHLY;BYMONTH=2;BYMONTHDAY=30").unwrap();
        let anchor = dt("2025-01-01 00:00:00");
        assert!(generate(&rule, anchor).next().is_none());
    }
}
