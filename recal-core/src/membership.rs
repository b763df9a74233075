// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Point membership queries, spec §4.4: answer "would `candidate` appear in
//! `generate(rule, anchor)`?" by expanding only `candidate`'s own period,
//! not the full prefix up to it.

use chrono::{Datelike, NaiveDateTime};
use recal_ical::{DateTimeValue, Freq, Rule};

use crate::engine::period_survivors;
use crate::period;

/// Whether `candidate` would appear in the unbounded Pure-mode sequence
/// `generate(rule, anchor)` produces.
pub fn is_member(rule: &Rule, anchor: DateTimeValue, candidate: DateTimeValue) -> bool {
    let anchor_naive = anchor.naive();
    let candidate_naive = candidate.naive();

    if candidate_naive < anchor_naive {
        return false;
    }
    if let Some(until) = rule.until() {
        if candidate_naive > until.naive() {
            return false;
        }
    }

    let freq = rule.freq();
    let wkst = rule.wkst();
    let anchor_period = period::period_start(freq, wkst, anchor_naive);
    let candidate_period = period::period_start(freq, wkst, candidate_naive);

    let elapsed = periods_between(freq, anchor_period, candidate_period);
    if elapsed < 0 || elapsed % i64::from(rule.interval()) != 0 {
        return false;
    }

    let survivors = period_survivors(rule, anchor_naive, candidate_period);
    let Some(position) = survivors.iter().position(|dt| *dt == candidate_naive) else {
        return false;
    };

    match rule.count() {
        None => true,
        Some(count) => {
            let emitted_before = count_emissions_before(rule, anchor_naive, anchor_period, candidate_period);
            let emission_index = emitted_before + position as u64 + 1;
            emission_index <= u64::from(count)
        }
    }
}

/// Count emissions in periods strictly before `candidate_period`, walking
/// periods (not individual emissions) from `anchor_period` — spec §4.4:
/// "O(periods) not O(emissions)".
fn count_emissions_before(
    rule: &Rule,
    anchor_naive: NaiveDateTime,
    anchor_period: NaiveDateTime,
    candidate_period: NaiveDateTime,
) -> u64 {
    let mut total = 0u64;
    let mut cursor = anchor_period;
    while cursor < candidate_period {
        total += period_survivors(rule, anchor_naive, cursor).len() as u64;
        match period::advance(rule.freq(), cursor, rule.interval()) {
            Some(next) => cursor = next,
            None => break,
        }
    }
    total
}

/// Whole `freq`-unit periods from `from` to `to` (both already
/// period-aligned starts). Negative if `to` precedes `from`.
fn periods_between(freq: Freq, from: NaiveDateTime, to: NaiveDateTime) -> i64 {
    match freq {
        Freq::Yearly => i64::from(to.year() - from.year()),
        Freq::Monthly => {
            i64::from(to.year() - from.year()) * 12 + i64::from(to.month() as i32 - from.month() as i32)
        }
        Freq::Weekly => (to.date() - from.date()).num_days() / 7,
        Freq::Daily => (to.date() - from.date()).num_days(),
        Freq::Hourly => (to - from).num_hours(),
        Freq::Minutely => (to - from).num_minutes(),
        Freq::Secondly => (to - from).num_seconds(),
    }
}
