// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! The three date-time flavors RFC 5545 distinguishes (§3.3.5), preserved
//! end to end rather than normalized to a single representation.

use std::cmp::Ordering;
use std::fmt::{self, Display};
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc, offset::LocalResult};
use chrono_tz::Tz;

/// A date-time value that may carry a `Z`-suffixed UTC instant, no timezone
/// at all (floating / "clock-wall" interpretation), or an IANA timezone
/// supplied by the surrounding calendar layer.
///
/// The occurrence engine never converts between these: every occurrence it
/// emits carries the same flavor as the anchor it was generated from.
#[derive(Debug, Clone, Copy)]
pub enum DateTimeValue {
    /// A UTC instant (wire form has a trailing `Z`).
    Utc(NaiveDateTime),
    /// A floating, zone-less clock-wall date-time.
    Floating(NaiveDateTime),
    /// A date-time in a caller-supplied IANA timezone.
    Zoned(NaiveDateTime, Tz),
}

impl DateTimeValue {
    /// The wall-clock reading, independent of flavor.
    pub fn naive(&self) -> NaiveDateTime {
        match self {
            DateTimeValue::Utc(dt) | DateTimeValue::Floating(dt) => *dt,
            DateTimeValue::Zoned(dt, _) => *dt,
        }
    }

    /// Rebuild this value with a new wall-clock reading, preserving flavor
    /// (and timezone, for [`DateTimeValue::Zoned`]).
    pub fn with_naive(&self, naive: NaiveDateTime) -> Self {
        match self {
            DateTimeValue::Utc(_) => DateTimeValue::Utc(naive),
            DateTimeValue::Floating(_) => DateTimeValue::Floating(naive),
            DateTimeValue::Zoned(_, tz) => DateTimeValue::Zoned(naive, *tz),
        }
    }

    /// The date part.
    pub fn date(&self) -> NaiveDate {
        self.naive().date()
    }

    /// The time-of-day part.
    pub fn time(&self) -> NaiveTime {
        self.naive().time()
    }

    /// Resolve a [`DateTimeValue::Zoned`] value to a concrete instant in its
    /// timezone, handling DST ambiguity/gaps the way the teacher's
    /// `LooseDateTime` conversions do: an ambiguous local time picks the
    /// earlier candidate, a nonexistent one (a DST spring-forward gap)
    /// reinterprets the naive reading as UTC.
    pub fn resolve_zoned(&self) -> Option<DateTime<Tz>> {
        match self {
            DateTimeValue::Zoned(naive, tz) => Some(match tz.from_local_datetime(naive) {
                LocalResult::Single(dt) => dt,
                LocalResult::Ambiguous(a, b) => {
                    tracing::warn!(%naive, %tz, "ambiguous local time, picking earliest");
                    if a <= b { a } else { b }
                }
                LocalResult::None => {
                    tracing::warn!(%naive, %tz, "local time does not exist, reinterpreting as UTC");
                    Utc.from_utc_datetime(naive).with_timezone(tz)
                }
            }),
            _ => None,
        }
    }
}

/// Parses the same bare-date/floating/UTC wire forms as an `UNTIL` value
/// (`YYYYMMDD`, `YYYYMMDDTHHMMSS`, `YYYYMMDDTHHMMSSZ`), for callers outside
/// the RRULE grammar itself — `recal-cli`'s anchor/candidate arguments, for
/// instance. A bare date normalizes to `23:59:59`, matching the parser.
impl FromStr for DateTimeValue {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (body, zulu) = match s.strip_suffix('Z') {
            Some(rest) => (rest, true),
            None => (s, false),
        };
        let (date_s, time_s) = match body.split_once('T') {
            Some((d, t)) => (d, Some(t)),
            None => (body, None),
        };

        let date = NaiveDate::parse_from_str(date_s, "%Y%m%d").map_err(|_| format!("invalid date: {s}"))?;
        let time = match time_s {
            Some(t) => NaiveTime::parse_from_str(t, "%H%M%S").map_err(|_| format!("invalid time: {s}"))?,
            None => NaiveTime::from_hms_opt(23, 59, 59).expect("23:59:59 is a valid time"),
        };
        let naive = NaiveDateTime::new(date, time);

        if zulu && time_s.is_none() {
            return Err(format!("a bare date cannot carry a Z suffix: {s}"));
        }
        Ok(if zulu { DateTimeValue::Utc(naive) } else { DateTimeValue::Floating(naive) })
    }
}

impl PartialEq for DateTimeValue {
    fn eq(&self, other: &Self) -> bool {
        self.naive() == other.naive()
    }
}

impl Eq for DateTimeValue {}

impl PartialOrd for DateTimeValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for DateTimeValue {
    fn cmp(&self, other: &Self) -> Ordering {
        self.naive().cmp(&other.naive())
    }
}

impl Display for DateTimeValue {
    /// Canonical wire form: `YYYYMMDDTHHMMSS[Z]`. Zoned values serialize
    /// without the zone id, matching RFC 5545's UNTIL grammar (the zone
    /// itself travels on `DTSTART;TZID=...`, not on the RRULE value).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let naive = self.naive();
        write!(f, "{}", naive.format("%Y%m%dT%H%M%S"))?;
        if matches!(self, DateTimeValue::Utc(_)) {
            write!(f, "Z")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_str_bare_date_normalizes_to_end_of_day() {
        let dt: DateTimeValue = "20250617".parse().unwrap();
        assert_eq!(dt, DateTimeValue::Floating(NaiveDateTime::parse_from_str("20250617T235959", "%Y%m%dT%H%M%S").unwrap()));
    }

    #[test]
    fn from_str_utc_round_trips_through_display() {
        let dt: DateTimeValue = "20250617T080000Z".parse().unwrap();
        assert_eq!(dt.to_string(), "20250617T080000Z");
    }

    #[test]
    fn from_str_rejects_bare_date_with_zulu() {
        assert!("20250617Z".parse::<DateTimeValue>().is_err());
    }

    #[test]
    fn from_str_rejects_garbage() {
        assert!("not-a-date".parse::<DateTimeValue>().is_err());
    }
}
