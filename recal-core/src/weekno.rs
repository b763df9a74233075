// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! `WKST`-anchored, ISO-8601-style week numbering (spec §4.3: "`BYWEEKNO`
//! uses ISO-8601-style week numbering anchored at `wkst`: week 1 is the
//! earliest week containing at least 4 days of the new year").

use chrono::{Datelike, NaiveDate, NaiveTime};
use recal_ical::Weekday;

use crate::period;

/// The first day of week 1 of `year` under `wkst`'s anchoring: the
/// `wkst`-aligned week containing January 4th (equivalently, the earliest
/// week with ≥ 4 days in `year`).
fn week1_start(year: i32, wkst: Weekday) -> NaiveDate {
    let jan4 = NaiveDate::from_ymd_opt(year, 1, 4).expect("Jan 4 is always valid");
    period::period_start(recal_ical::Freq::Weekly, wkst, jan4.and_time(NaiveTime::MIN)).date()
}

/// The number of `wkst`-anchored weeks in `year` (52 or 53).
fn weeks_in_year(year: i32, wkst: Weekday) -> i64 {
    let this_year = week1_start(year, wkst);
    let next_year = week1_start(year + 1, wkst);
    (next_year - this_year).num_days() / 7
}

/// `date`'s week-year and 1-based week number. A date near a calendar-year
/// boundary can belong to the adjacent year's week scheme, exactly as in
/// plain ISO-8601 (e.g. Dec 31 can be "week 1" of the following year).
fn week_year_and_number(date: NaiveDate, wkst: Weekday) -> (i32, i64) {
    let numbered_in = |year: i32| {
        let week = (date - week1_start(year, wkst)).num_days() / 7 + 1;
        (year, week)
    };

    let year = date.year();
    if date < week1_start(year, wkst) {
        return numbered_in(year - 1);
    }
    if date >= week1_start(year + 1, wkst) {
        return numbered_in(year + 1);
    }
    numbered_in(year)
}

/// Whether `date`'s `wkst`-anchored week number matches any entry in
/// `by_week_no`, with negative entries counting from the final week of
/// `date`'s own week-year.
pub(crate) fn week_no_matches(date: NaiveDate, wkst: Weekday, by_week_no: &[i8]) -> bool {
    let (week_year, week_number) = week_year_and_number(date, wkst);
    let total = weeks_in_year(week_year, wkst);
    by_week_no.iter().any(|&target| {
        let target = i64::from(target);
        if target > 0 {
            week_number == target
        } else {
            week_number == total + target + 1
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn week1_contains_jan_four_monday_start() {
        // 2025-01-01 is a Wednesday; with MO as wkst, week 1 starts Monday 2024-12-30.
        let start = week1_start(2025, Weekday::Monday);
        assert_eq!(start, NaiveDate::from_ymd_opt(2024, 12, 30).unwrap());
    }

    #[test]
    fn last_week_of_year_matches_negative_one() {
        let dec_29_2025 = NaiveDate::from_ymd_opt(2025, 12, 29).unwrap();
        assert!(week_no_matches(dec_29_2025, Weekday::Monday, &[-1]));
    }
}
