// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! The recurrence rule value type (RFC 5545 §3.3.10) and its construction
//! invariants.

use std::fmt::{self, Display};

use crate::datetime::DateTimeValue;
use crate::error::ParseError;
use crate::freq::Freq;
use crate::weekday::{ByDayEntry, Weekday};

/// A validated, immutable recurrence rule.
///
/// `Rule` can only be built through [`crate::parse`] (or, for callers
/// assembling one programmatically, [`Rule::from_parts`]): every invariant
/// in this module's `from_parts` is enforced at construction, so a `Rule`
/// that exists is always internally consistent.
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    freq: Freq,
    interval: u32,
    count: Option<u32>,
    until: Option<DateTimeValue>,
    by_second: Vec<u8>,
    by_minute: Vec<u8>,
    by_hour: Vec<u8>,
    by_day: Vec<ByDayEntry>,
    by_month_day: Vec<i8>,
    by_year_day: Vec<i16>,
    by_week_no: Vec<i8>,
    by_month: Vec<u8>,
    by_set_pos: Vec<i16>,
    wkst: Weekday,
}

/// The unvalidated collection of rule parts a parser (or a programmatic
/// caller) assembles before handing it to [`Rule::from_parts`].
///
/// Mirrors the `recur-rule-part` grammar 1:1 — every field here is exactly
/// what one wire key/value pair produces, before any cross-parameter rule
/// is checked.
#[derive(Debug, Clone, Default)]
pub struct RuleParts {
    /// `FREQ`.
    pub freq: Option<Freq>,
    /// `INTERVAL`.
    pub interval: Option<u32>,
    /// `COUNT`.
    pub count: Option<u32>,
    /// `UNTIL`.
    pub until: Option<DateTimeValue>,
    /// `BYSECOND`.
    pub by_second: Vec<u8>,
    /// `BYMINUTE`.
    pub by_minute: Vec<u8>,
    /// `BYHOUR`.
    pub by_hour: Vec<u8>,
    /// `BYDAY`.
    pub by_day: Vec<ByDayEntry>,
    /// `BYMONTHDAY`.
    pub by_month_day: Vec<i8>,
    /// `BYYEARDAY`.
    pub by_year_day: Vec<i16>,
    /// `BYWEEKNO`.
    pub by_week_no: Vec<i8>,
    /// `BYMONTH`.
    pub by_month: Vec<u8>,
    /// `BYSETPOS`.
    pub by_set_pos: Vec<i16>,
    /// `WKST`.
    pub wkst: Option<Weekday>,
}

impl Rule {
    /// Validate `parts` and build a [`Rule`], enforcing every invariant in
    /// spec §3: `COUNT`/`UNTIL` mutual exclusion, `BYSETPOS`'s dependency on
    /// another `BY*` rule, `BYWEEKNO` requiring `FREQ=YEARLY`, and ordinal
    /// `BYDAY` requiring `FREQ` in `{MONTHLY, YEARLY}`.
    pub fn from_parts(parts: RuleParts) -> Result<Rule, ParseError> {
        let freq = parts
            .freq
            .ok_or_else(|| ParseError::incompatible("FREQ is required"))?;

        if parts.count.is_some() && parts.until.is_some() {
            return Err(ParseError::incompatible(
                "COUNT and UNTIL are mutually exclusive",
            ));
        }

        let has_other_by_rule = !parts.by_day.is_empty()
            || !parts.by_month_day.is_empty()
            || !parts.by_month.is_empty()
            || !parts.by_week_no.is_empty()
            || !parts.by_year_day.is_empty()
            || !parts.by_hour.is_empty()
            || !parts.by_minute.is_empty()
            || !parts.by_second.is_empty();
        if !parts.by_set_pos.is_empty() && !has_other_by_rule {
            return Err(ParseError::incompatible(
                "BYSETPOS requires at least one other BY* rule",
            ));
        }

        if !parts.by_week_no.is_empty() && freq != Freq::Yearly {
            return Err(ParseError::incompatible("BYWEEKNO requires FREQ=YEARLY"));
        }

        let has_ordinal_by_day = parts.by_day.iter().any(|d| d.ordinal.is_some());
        if has_ordinal_by_day && !freq.allows_ordinal_by_day() {
            return Err(ParseError::incompatible(
                "ordinal BYDAY prefixes require FREQ in {MONTHLY, YEARLY}",
            ));
        }
        if has_ordinal_by_day && freq == Freq::Monthly && !parts.by_week_no.is_empty() {
            return Err(ParseError::incompatible(
                "ordinal BYDAY with FREQ=MONTHLY is incompatible with BYWEEKNO",
            ));
        }

        Ok(Rule {
            freq,
            interval: parts.interval.unwrap_or(1),
            count: parts.count,
            until: parts.until,
            by_second: parts.by_second,
            by_minute: parts.by_minute,
            by_hour: parts.by_hour,
            by_day: parts.by_day,
            by_month_day: parts.by_month_day,
            by_year_day: parts.by_year_day,
            by_week_no: parts.by_week_no,
            by_month: parts.by_month,
            by_set_pos: parts.by_set_pos,
            wkst: parts.wkst.unwrap_or(Weekday::Monday),
        })
    }

    /// The base cadence.
    pub fn freq(&self) -> Freq {
        self.freq
    }

    /// The interval between recurrences, always ≥ 1.
    pub fn interval(&self) -> u32 {
        self.interval
    }

    /// The emission count cap, if set.
    pub fn count(&self) -> Option<u32> {
        self.count
    }

    /// The inclusive cutoff, if set.
    pub fn until(&self) -> Option<&DateTimeValue> {
        self.until.as_ref()
    }

    /// `BYSECOND` values, `0..=60`.
    pub fn by_second(&self) -> &[u8] {
        &self.by_second
    }

    /// `BYMINUTE` values, `0..=59`.
    pub fn by_minute(&self) -> &[u8] {
        &self.by_minute
    }

    /// `BYHOUR` values, `0..=23`.
    pub fn by_hour(&self) -> &[u8] {
        &self.by_hour
    }

    /// `BYDAY` entries, in parse order.
    pub fn by_day(&self) -> &[ByDayEntry] {
        &self.by_day
    }

    /// `BYMONTHDAY` values, non-zero in `-31..=31`.
    pub fn by_month_day(&self) -> &[i8] {
        &self.by_month_day
    }

    /// `BYYEARDAY` values, non-zero in `-366..=366`.
    pub fn by_year_day(&self) -> &[i16] {
        &self.by_year_day
    }

    /// `BYWEEKNO` values, non-zero in `-53..=53`.
    pub fn by_week_no(&self) -> &[i8] {
        &self.by_week_no
    }

    /// `BYMONTH` values, `1..=12`.
    pub fn by_month(&self) -> &[u8] {
        &self.by_month
    }

    /// `BYSETPOS` values, non-zero in `-366..=366`.
    pub fn by_set_pos(&self) -> &[i16] {
        &self.by_set_pos
    }

    /// The first day of the week, default Monday.
    pub fn wkst(&self) -> Weekday {
        self.wkst
    }
}

impl Display for Rule {
    /// Canonical `KEY=VALUE;...` serialization, spec §6: fixed key order,
    /// omitting defaulted/absent fields. Round-trips through
    /// [`crate::parse`]: `parse(rule.to_string()) == rule`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts: Vec<String> = Vec::new();
        parts.push(format!("FREQ={}", self.freq));
        if self.interval != 1 {
            parts.push(format!("INTERVAL={}", self.interval));
        }
        if let Some(count) = self.count {
            parts.push(format!("COUNT={count}"));
        }
        if let Some(until) = &self.until {
            parts.push(format!("UNTIL={until}"));
        }
        push_list(&mut parts, "BYSECOND", &self.by_second);
        push_list(&mut parts, "BYMINUTE", &self.by_minute);
        push_list(&mut parts, "BYHOUR", &self.by_hour);
        if !self.by_day.is_empty() {
            let rendered: Vec<String> = self.by_day.iter().map(ToString::to_string).collect();
            parts.push(format!("BYDAY={}", rendered.join(",")));
        }
        push_list(&mut parts, "BYMONTHDAY", &self.by_month_day);
        push_list(&mut parts, "BYYEARDAY", &self.by_year_day);
        push_list(&mut parts, "BYWEEKNO", &self.by_week_no);
        push_list(&mut parts, "BYMONTH", &self.by_month);
        push_list(&mut parts, "BYSETPOS", &self.by_set_pos);
        if self.wkst != Weekday::Monday {
            parts.push(format!("WKST={}", self.wkst));
        }
        write!(f, "{}", parts.join(";"))
    }
}

fn push_list<T: Display>(parts: &mut Vec<String>, key: &str, values: &[T]) {
    if values.is_empty() {
        return;
    }
    let rendered: Vec<String> = values.iter().map(ToString::to_string).collect();
    parts.push(format!("{key}={}", rendered.join(",")));
}
