// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! The occurrence engine's pull-based state machine, spec §4.3: `Ready →
//! Period(p) → Emitting(p, queue) → Period(p + interval) → … → Done`.

use std::collections::VecDeque;

use chrono::NaiveDateTime;
use recal_ical::{DateTimeValue, Rule};

use crate::error::EngineError;
use crate::{expand, period};

/// Consecutive empty periods before a series is declared structurally
/// empty (spec §4.3 "Degenerate-rule termination").
const MAX_EMPTY_PERIODS: u32 = 10_000;

/// Total emissions allowed on a series with no `COUNT`, `UNTIL`, or
/// caller-supplied range — guards against unbounded memory/CPU use on a
/// degenerate rule the caller forgot to bound (spec §4.3 "Termination").
const SAFETY_CAP_EMISSIONS: u64 = 10_000;

/// A lazy, strictly-ascending, non-restartable stream of occurrences.
///
/// Built by [`generate`]. Each [`Iterator::next`] call advances exactly one
/// step of the state machine; no work happens until polled.
pub struct Occurrences<'a> {
    rule: &'a Rule,
    anchor: DateTimeValue,
    anchor_naive: NaiveDateTime,
    until_naive: Option<NaiveDateTime>,
    cursor: Option<NaiveDateTime>,
    queue: VecDeque<NaiveDateTime>,
    emitted: u32,
    empty_periods: u32,
    total_generated: u64,
    limit_reason: Option<EngineError>,
    done: bool,
}

impl<'a> Occurrences<'a> {
    fn new(rule: &'a Rule, anchor: DateTimeValue) -> Self {
        let anchor_naive = anchor.naive();
        Occurrences {
            rule,
            anchor,
            anchor_naive,
            until_naive: rule.until().map(DateTimeValue::naive),
            cursor: Some(period::period_start(rule.freq(), rule.wkst(), anchor_naive)),
            queue: VecDeque::new(),
            emitted: 0,
            empty_periods: 0,
            total_generated: 0,
            limit_reason: None,
            done: false,
        }
    }

    /// Why iteration stopped early, if it did. `None` means the series
    /// ran to its natural end (structurally empty, `COUNT` reached, or
    /// `UNTIL` exceeded) — all of which are normal termination, not errors.
    pub fn limit_reason(&self) -> Option<EngineError> {
        self.limit_reason
    }

    fn unbounded(&self) -> bool {
        self.rule.count().is_none() && self.until_naive.is_none()
    }
}

impl Iterator for Occurrences<'_> {
    type Item = DateTimeValue;

    fn next(&mut self) -> Option<DateTimeValue> {
        loop {
            if self.done {
                return None;
            }

            if let Some(candidate) = self.queue.pop_front() {
                if let Some(until) = self.until_naive {
                    if candidate > until {
                        self.done = true;
                        return None;
                    }
                }

                self.emitted += 1;
                if let Some(count) = self.rule.count() {
                    if self.emitted > count {
                        self.done = true;
                        return None;
                    }
                }

                if self.unbounded() {
                    self.total_generated += 1;
                    if self.total_generated > SAFETY_CAP_EMISSIONS {
                        tracing::warn!(
                            cap = SAFETY_CAP_EMISSIONS,
                            "occurrence series hit the engine safety cap with no COUNT/UNTIL bound"
                        );
                        self.limit_reason = Some(EngineError::SafetyCap);
                        self.done = true;
                        return None;
                    }
                }

                return Some(self.anchor.with_naive(candidate));
            }

            let Some(cursor) = self.cursor else {
                self.done = true;
                return None;
            };

            let survivors = period_survivors(self.rule, self.anchor_naive, cursor);
            self.cursor = period::advance(self.rule.freq(), cursor, self.rule.interval());

            if survivors.is_empty() {
                self.empty_periods += 1;
                if self.empty_periods >= MAX_EMPTY_PERIODS || self.cursor.is_none() {
                    self.done = true;
                    return None;
                }
                continue;
            }

            self.empty_periods = 0;
            self.queue = survivors.into_iter().collect();
        }
    }
}

/// This period's candidates, with anything before `anchor` dropped and
/// `BYSETPOS` applied — the survivor set spec §4.3 steps 3-4 describe.
///
/// Anchor-filtering runs *before* `BYSETPOS`, not after as §4.3's step
/// numbering literally reads: spec §8 scenario 5 (weekly `BYSETPOS` with a
/// mid-week anchor) only reproduces with this order — the candidate that
/// `BYSETPOS` would pick from the anchor's own (`wkst`-aligned) week
/// precedes the anchor and must already be gone before the positional
/// selection runs. See DESIGN.md.
pub(crate) fn period_survivors(
    rule: &Rule,
    anchor_naive: NaiveDateTime,
    period_start: NaiveDateTime,
) -> Vec<NaiveDateTime> {
    let candidates = expand::period_candidates(rule, anchor_naive, period_start);
    let in_range: Vec<NaiveDateTime> = candidates.into_iter().filter(|dt| *dt >= anchor_naive).collect();
    apply_set_pos(rule, in_range)
}

/// `BYSETPOS`: select the 1-indexed (or, for negative values, counted from
/// the end) entries of the sorted, deduplicated per-period candidate set,
/// re-sorted and deduplicated (spec §4.3 step 3, §8 property 9).
fn apply_set_pos(rule: &Rule, candidates: Vec<NaiveDateTime>) -> Vec<NaiveDateTime> {
    if rule.by_set_pos().is_empty() {
        return candidates;
    }
    let len = candidates.len() as i64;
    let mut selected: Vec<NaiveDateTime> = rule
        .by_set_pos()
        .iter()
        .filter_map(|&pos| {
            let pos = i64::from(pos);
            let index = if pos > 0 { pos - 1 } else { len + pos };
            usize::try_from(index)
                .ok()
                .filter(|&i| i < candidates.len())
                .map(|i| candidates[i])
        })
        .collect();
    selected.sort();
    selected.dedup();
    selected
}

/// The unbounded, Pure-mode occurrence stream of `rule` anchored at
/// `anchor`: `anchor` itself appears only if it satisfies the rule.
pub fn generate(rule: &Rule, anchor: DateTimeValue) -> Occurrences<'_> {
    Occurrences::new(rule, anchor)
}

/// `generate` restricted to `[range_start, range_end]` inclusive —
/// equivalent to `generate(rule, anchor).filter(|dt| range_start <= dt &&
/// dt <= range_end)`, but short-circuits once a candidate exceeds
/// `range_end` rather than polling an unbounded series forever (spec
/// §4.3 operation 2, §8 "Range law").
pub fn generate_range(
    rule: &Rule,
    anchor: DateTimeValue,
    range_start: DateTimeValue,
    range_end: DateTimeValue,
) -> impl Iterator<Item = DateTimeValue> + '_ {
    let start = range_start.naive();
    let end = range_end.naive();
    generate(rule, anchor)
        .take_while(move |dt| dt.naive() <= end)
        .filter(move |dt| dt.naive() >= start)
}

/// `generate` truncated to at most `cap` emissions (spec §4.3 operation 3).
pub fn generate_capped(
    rule: &Rule,
    anchor: DateTimeValue,
    cap: u64,
) -> impl Iterator<Item = DateTimeValue> + '_ {
    generate(rule, anchor).take(cap as usize)
}
