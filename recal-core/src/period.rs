// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Period cursor arithmetic: the unit `FREQ` implies, and how to find and
//! advance it. Spec §4.3 "Core algorithm: period expansion".

use chrono::{Datelike, Days, Months, NaiveDate, NaiveDateTime, NaiveTime};
use recal_ical::{Freq, Weekday};

/// The start of the period (in `freq`'s unit) containing `dt`.
///
/// For `WEEKLY`, the period start is the `wkst`-aligned first day of the
/// week containing `dt` — this is also the anchor RFC 5545 uses for
/// `WEEKLY` `INTERVAL` boundaries (spec §4.3 "Date arithmetic rules").
pub(crate) fn period_start(freq: Freq, wkst: Weekday, dt: NaiveDateTime) -> NaiveDateTime {
    match freq {
        Freq::Yearly => NaiveDate::from_ymd_opt(dt.year(), 1, 1)
            .expect("Jan 1 is always valid")
            .and_time(NaiveTime::MIN),
        Freq::Monthly => NaiveDate::from_ymd_opt(dt.year(), dt.month(), 1)
            .expect("first of month is always valid")
            .and_time(NaiveTime::MIN),
        Freq::Weekly => {
            let our_weekday = Weekday::from_chrono(dt.weekday());
            let offset = our_weekday.index_from(wkst);
            (dt.date() - Days::new(offset as u64)).and_time(NaiveTime::MIN)
        }
        Freq::Daily => dt.date().and_time(NaiveTime::MIN),
        Freq::Hourly => dt
            .date()
            .and_hms_opt(dt.hour(), 0, 0)
            .expect("zeroing minute/second keeps the time valid"),
        Freq::Minutely => dt
            .date()
            .and_hms_opt(dt.hour(), dt.minute(), 0)
            .expect("zeroing second keeps the time valid"),
        Freq::Secondly => dt,
    }
}

/// Advance `start` forward by `interval` periods of `freq`.
///
/// Returns `None` on calendar overflow (e.g. `INTERVAL`-years past
/// `NaiveDate`'s representable range), which the engine treats as a
/// normal series end rather than an error.
pub(crate) fn advance(freq: Freq, start: NaiveDateTime, interval: u32) -> Option<NaiveDateTime> {
    match freq {
        Freq::Yearly => start.checked_add_months(Months::new(interval.checked_mul(12)?)),
        Freq::Monthly => start.checked_add_months(Months::new(interval)),
        Freq::Weekly => start.checked_add_days(Days::new(u64::from(interval) * 7)),
        Freq::Daily => start.checked_add_days(Days::new(u64::from(interval))),
        Freq::Hourly => start.checked_add_signed(chrono::Duration::hours(i64::from(interval))),
        Freq::Minutely => start.checked_add_signed(chrono::Duration::minutes(i64::from(interval))),
        Freq::Secondly => start.checked_add_signed(chrono::Duration::seconds(i64::from(interval))),
    }
}

/// The `[start, end)` date span of the single-unit period (ignoring
/// `INTERVAL`) that `period_start` begins — the brute-force iteration
/// range `expand::calendar` walks day by day.
pub(crate) fn calendar_span(freq: Freq, period_start: NaiveDateTime) -> (NaiveDate, NaiveDate) {
    let start = period_start.date();
    let end = advance(freq, period_start, 1)
        .expect("single-unit advance from a valid date does not overflow")
        .date();
    (start, end)
}
