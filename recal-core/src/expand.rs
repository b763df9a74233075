// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Per-period candidate generation: the frequency-specific expansion table
//! in spec §4.3. Calendar-grained frequencies (`YEARLY`..`DAILY`) walk the
//! period's days and expand/limit them through the date-valued `BY*`
//! rules; clock-grained frequencies (`HOURLY`..`SECONDLY`) fix the period's
//! own hour/minute/second and only expand the finer-grained fields.
//!
//! `BYWEEKNO` and ordinal `BYDAY` never reach the clock-grained path: the
//! rule invariants in `recal_ical::Rule::from_parts` guarantee they're
//! empty unless `FREQ` is `YEARLY` (or `MONTHLY`/`YEARLY` for ordinals).

use std::collections::HashSet;

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use recal_ical::{ByDayEntry, Freq, Rule, Weekday};

use crate::period;
use crate::weekno::week_no_matches;

/// Generate, sort, and deduplicate this period's candidate date-times.
///
/// `BYSETPOS` is applied by the caller (the engine), not here — it acts on
/// the full sorted candidate set, after this step.
pub(crate) fn period_candidates(
    rule: &Rule,
    anchor: NaiveDateTime,
    period_start: NaiveDateTime,
) -> Vec<NaiveDateTime> {
    let mut candidates = match rule.freq() {
        Freq::Yearly | Freq::Monthly | Freq::Weekly | Freq::Daily => {
            calendar_period(rule, anchor, period_start)
        }
        Freq::Hourly | Freq::Minutely | Freq::Secondly => clock_period(rule, anchor, period_start),
    };
    candidates.sort();
    candidates.dedup();
    candidates
}

fn calendar_period(rule: &Rule, anchor: NaiveDateTime, period_start: NaiveDateTime) -> Vec<NaiveDateTime> {
    let mut days = days_in_span(period::calendar_span(rule.freq(), period_start));

    if !rule.by_month().is_empty() {
        days.retain(|d| rule.by_month().contains(&(d.month() as u8)));
    }
    if !rule.by_week_no().is_empty() {
        days.retain(|d| week_no_matches(*d, rule.wkst(), rule.by_week_no()));
    }
    if !rule.by_year_day().is_empty() && rule.freq() == Freq::Yearly {
        days.retain(|d| year_day_matches(*d, rule.by_year_day()));
    }
    if !rule.by_month_day().is_empty() && rule.freq() != Freq::Weekly {
        days.retain(|d| month_day_matches(*d, rule.by_month_day()));
    }

    let ordinal_entries: Vec<&ByDayEntry> = rule.by_day().iter().filter(|e| e.ordinal.is_some()).collect();
    if !ordinal_entries.is_empty() {
        let selected = ordinal_days(rule, period_start, &ordinal_entries);
        days.retain(|d| selected.contains(d));
    }

    let plain_weekdays: Vec<Weekday> = rule
        .by_day()
        .iter()
        .filter(|e| e.ordinal.is_none())
        .map(|e| e.weekday)
        .collect();
    if !plain_weekdays.is_empty() {
        days.retain(|d| plain_weekdays.contains(&Weekday::from_chrono(d.weekday())));
    }

    // No BY* rule selects which days of the period survive: default the
    // unconstrained date component(s) from the anchor rather than emitting
    // every day in the period (spec §3, §8 scenario 3 — a plain
    // `FREQ=YEARLY` recurs on the anchor's month/day each year, not daily).
    let no_day_rule = rule.by_month_day().is_empty()
        && rule.by_year_day().is_empty()
        && rule.by_week_no().is_empty()
        && rule.by_day().is_empty();
    if no_day_rule {
        match rule.freq() {
            Freq::Yearly => {
                if rule.by_month().is_empty() {
                    days.retain(|d| d.month() == anchor.month());
                }
                days.retain(|d| d.day() == anchor.day());
            }
            Freq::Monthly => days.retain(|d| d.day() == anchor.day()),
            Freq::Weekly => days.retain(|d| d.weekday() == anchor.weekday()),
            Freq::Daily => {}
            Freq::Hourly | Freq::Minutely | Freq::Secondly => unreachable!("clock-grained frequencies use clock_period"),
        }
    }

    days.iter().flat_map(|&d| expand_times(rule, anchor, d)).collect()
}

fn clock_period(rule: &Rule, anchor: NaiveDateTime, period_start: NaiveDateTime) -> Vec<NaiveDateTime> {
    let date = period_start.date();
    if !rule.by_month().is_empty() && !rule.by_month().contains(&(date.month() as u8)) {
        return Vec::new();
    }
    if !rule.by_month_day().is_empty() && !month_day_matches(date, rule.by_month_day()) {
        return Vec::new();
    }
    if !rule.by_year_day().is_empty() && !year_day_matches(date, rule.by_year_day()) {
        return Vec::new();
    }
    let plain_weekdays: Vec<Weekday> = rule
        .by_day()
        .iter()
        .filter(|e| e.ordinal.is_none())
        .map(|e| e.weekday)
        .collect();
    if !plain_weekdays.is_empty() && !plain_weekdays.contains(&Weekday::from_chrono(date.weekday())) {
        return Vec::new();
    }

    let hour = period_start.hour();
    if !rule.by_hour().is_empty() && !rule.by_hour().contains(&(hour as u8)) {
        return Vec::new();
    }

    let minutes: Vec<u32> = if rule.freq() == Freq::Hourly {
        if rule.by_minute().is_empty() {
            vec![anchor.minute()]
        } else {
            rule.by_minute().iter().map(|&m| u32::from(m)).collect()
        }
    } else {
        let minute = period_start.minute();
        if !rule.by_minute().is_empty() && !rule.by_minute().contains(&(minute as u8)) {
            return Vec::new();
        }
        vec![minute]
    };

    let seconds: Vec<u32> = if rule.freq() == Freq::Secondly {
        let second = period_start.second();
        if !rule.by_second().is_empty() && !rule.by_second().contains(&(second as u8)) {
            return Vec::new();
        }
        vec![second]
    } else if rule.by_second().is_empty() {
        vec![anchor.second()]
    } else {
        rule.by_second().iter().map(|&s| u32::from(s)).collect()
    };

    minutes
        .into_iter()
        .flat_map(|m| seconds.iter().map(move |&s| (m, s)))
        .filter_map(|(m, s)| NaiveTime::from_hms_opt(hour, m, s))
        .map(|time| date.and_time(time))
        .collect()
}

fn days_in_span((start, end): (NaiveDate, NaiveDate)) -> Vec<NaiveDate> {
    let mut days = Vec::new();
    let mut d = start;
    while d < end {
        days.push(d);
        d = d.succ_opt().expect("date arithmetic stays in range within one period");
    }
    days
}

/// The month's or year's day list, honoring ordinal `BYDAY` entries
/// (`1MO`, `-1FR`). Scope: a calendar month for `FREQ=MONTHLY`; for
/// `FREQ=YEARLY`, the whole year, or each `BYMONTH`-selected month
/// individually when `BYMONTH` is also present (RFC 5545 leaves this
/// combination underspecified; see DESIGN.md).
fn ordinal_days(
    rule: &Rule,
    period_start: NaiveDateTime,
    entries: &[&ByDayEntry],
) -> HashSet<NaiveDate> {
    let scopes: Vec<(NaiveDate, NaiveDate)> = match rule.freq() {
        Freq::Monthly => vec![period::calendar_span(Freq::Monthly, period_start)],
        Freq::Yearly => {
            if rule.by_month().is_empty() {
                vec![period::calendar_span(Freq::Yearly, period_start)]
            } else {
                rule.by_month()
                    .iter()
                    .map(|&month| {
                        let month_start = NaiveDate::from_ymd_opt(period_start.year(), u32::from(month), 1)
                            .expect("BYMONTH values are validated to 1..=12")
                            .and_time(NaiveTime::MIN);
                        period::calendar_span(Freq::Monthly, month_start)
                    })
                    .collect()
            }
        }
        _ => Vec::new(),
    };

    let mut selected = HashSet::new();
    for scope in scopes {
        let scope_days = days_in_span(scope);
        for entry in entries {
            let ordinal = entry.ordinal.expect("filtered to ordinal entries");
            let matching: Vec<&NaiveDate> = scope_days
                .iter()
                .filter(|d| Weekday::from_chrono(d.weekday()) == entry.weekday)
                .collect();
            if let Some(day) = nth(&matching, ordinal) {
                selected.insert(*day);
            }
        }
    }
    selected
}

/// 1-indexed from the front for positive `n`, from the back for negative.
fn nth<T: Copy>(items: &[T], n: i8) -> Option<T> {
    if n > 0 {
        items.get(n as usize - 1).copied()
    } else {
        let len = items.len() as i64;
        let index = len + i64::from(n);
        usize::try_from(index).ok().and_then(|i| items.get(i)).copied()
    }
}

fn month_day_matches(date: NaiveDate, by_month_day: &[i8]) -> bool {
    let days_in_month = days_in_month(date.year(), date.month());
    by_month_day.iter().any(|&target| {
        let resolved = if target > 0 {
            i64::from(target)
        } else {
            i64::from(days_in_month) + i64::from(target) + 1
        };
        resolved == i64::from(date.day())
    })
}

fn year_day_matches(date: NaiveDate, by_year_day: &[i16]) -> bool {
    let days_in_year = if is_leap_year(date.year()) { 366 } else { 365 };
    by_year_day.iter().any(|&target| {
        let resolved = if target > 0 {
            i64::from(target)
        } else {
            i64::from(days_in_year) + i64::from(target) + 1
        };
        resolved == i64::from(date.ordinal())
    })
}

fn days_in_month(year: i32, month: u32) -> u32 {
    let next_month_first = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    }
    .expect("valid (year, month) always has a following first-of-month");
    let this_month_first =
        NaiveDate::from_ymd_opt(year, month, 1).expect("validated by caller to 1..=12");
    (next_month_first - this_month_first).num_days() as u32
}

fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Expand `date` into candidate date-times via `BYHOUR`/`BYMINUTE`/`BYSECOND`,
/// or preserve `anchor`'s time-of-day verbatim when none are set (spec §3:
/// "Time-of-day is preserved verbatim ... unless a BY* rule explicitly
/// overrides hour/minute/second").
fn expand_times(rule: &Rule, anchor: NaiveDateTime, date: NaiveDate) -> Vec<NaiveDateTime> {
    if rule.by_hour().is_empty() && rule.by_minute().is_empty() && rule.by_second().is_empty() {
        return vec![date.and_time(anchor.time())];
    }
    let hours: Vec<u32> = if rule.by_hour().is_empty() {
        vec![anchor.hour()]
    } else {
        rule.by_hour().iter().map(|&h| u32::from(h)).collect()
    };
    let minutes: Vec<u32> = if rule.by_minute().is_empty() {
        vec![anchor.minute()]
    } else {
        rule.by_minute().iter().map(|&m| u32::from(m)).collect()
    };
    let seconds: Vec<u32> = if rule.by_second().is_empty() {
        vec![anchor.second()]
    } else {
        rule.by_second().iter().map(|&s| u32::from(s)).collect()
    };

    let mut out = Vec::with_capacity(hours.len() * minutes.len() * seconds.len());
    for &h in &hours {
        for &m in &minutes {
            for &s in &seconds {
                // A BYSECOND=60 leap second has no representable NaiveTime;
                // such candidates are silently skipped (see DESIGN.md).
                if let Some(time) = NaiveTime::from_hms_opt(h, m, s) {
                    out.push(date.and_time(time));
                }
            }
        }
    }
    out
}
