// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Calendar mode, spec §4.3 "Anchor handling": the iCalendar convention
//! that the anchor (`DTSTART`) is always the series' first occurrence,
//! even if it doesn't itself satisfy the rule. This is the behavior the
//! VEVENT/VTODO bridge uses; direct `recal_core::generate` callers get
//! Pure mode instead.

use recal_ical::{DateTimeValue, Rule};

use crate::{engine, membership};

/// `generate(rule, anchor)`, but with `anchor` prepended when it doesn't
/// already satisfy the rule.
///
/// The prepended anchor does not consume a `COUNT` slot: `COUNT` bounds the
/// engine's own pure emissions (spec §3), and this prepend is an additive
/// compatibility behavior layered on top by the calendar bridge (see
/// DESIGN.md).
pub fn generate_calendar_mode(rule: &Rule, anchor: DateTimeValue) -> impl Iterator<Item = DateTimeValue> + '_ {
    let needs_prefix = !membership::is_member(rule, anchor, anchor);
    let prefix = needs_prefix.then_some(anchor);
    prefix.into_iter().chain(engine::generate(rule, anchor))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;
    use recal_ical::parse;

    fn dt(s: &str) -> DateTimeValue {
        DateTimeValue::Floating(NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap())
    }

    #[test]
    fn prepends_non_matching_anchor() {
        // anchor is a Wednesday; the rule only fires on Mondays.
        let rule = parse("FREQ=WEEKLY;BYDAY=MO;COUNT=2").unwrap();
        let anchor = dt("2025-01-01 10:00:00");
        let occurrences: Vec<_> = generate_calendar_mode(&rule, anchor).collect();
        assert_eq!(occurrences[0].naive(), anchor.naive());
        assert_eq!(occurrences.len(), 3); // prepended anchor + 2 rule emissions
    }

    #[test]
    fn does_not_duplicate_matching_anchor() {
        let rule = parse("FREQ=DAILY;COUNT=2").unwrap();
        let anchor = dt("2025-01-01 10:00:00");
        let occurrences: Vec<_> = generate_calendar_mode(&rule, anchor).collect();
        assert_eq!(occurrences.len(), 2);
    }
}
