// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! The RRULE lexer/validator, spec §4.1.
//!
//! Top-level tokenization (`;`-separated `KEY=VALUE` pairs, dispatch on
//! `KEY`) is plain string splitting — nothing about it benefits from a
//! combinator grammar. Each value's inner grammar (integer lists with
//! per-field ranges, `weekdaynum` lists, the `UNTIL` date-time forms) is
//! exactly the kind of small recursive grammar the teacher reaches for
//! `chumsky` to express (`ical/src/value/rrule.rs`), so those keep using it.

use std::collections::HashSet;

use chumsky::prelude::*;

use crate::datetime::DateTimeValue;
use crate::error::ParseError;
use crate::freq::Freq;
use crate::keyword::{
    KW_RRULE_BYDAY, KW_RRULE_BYHOUR, KW_RRULE_BYMINUTE, KW_RRULE_BYMONTH, KW_RRULE_BYMONTHDAY,
    KW_RRULE_BYSECOND, KW_RRULE_BYSETPOS, KW_RRULE_BYWEEKNO, KW_RRULE_BYYEARDAY, KW_RRULE_COUNT,
    KW_RRULE_FREQ, KW_RRULE_INTERVAL, KW_RRULE_UNTIL, KW_RRULE_WKST,
};
use crate::rule::{Rule, RuleParts};
use crate::weekday::{ByDayEntry, Weekday};

type Extra<'src> = extra::Err<Rich<'src, char>>;

/// Parse a single `FREQ=...;...` RRULE value into a validated [`Rule`].
///
/// Fails atomically: on any error, no `Rule` is produced. See spec §4.1.
pub fn parse(input: &str) -> Result<Rule, ParseError> {
    let mut parts = RuleParts::default();
    let mut seen = HashSet::new();

    for segment in input.split(';') {
        let Some((key_raw, raw_value)) = segment.split_once('=') else {
            return Err(ParseError::bad_value(
                "<cross>",
                segment,
                "expected KEY=VALUE",
            ));
        };
        let key = key_raw.trim().to_ascii_uppercase();
        let raw_value = raw_value.trim();

        if !seen.insert(key.clone()) {
            return Err(ParseError::DuplicateKey { key });
        }

        match key.as_str() {
            KW_RRULE_FREQ => {
                parts.freq = Some(
                    Freq::from_keyword(raw_value)
                        .ok_or_else(|| ParseError::bad_value(&key, raw_value, "unknown FREQ"))?,
                );
            }
            KW_RRULE_WKST => {
                parts.wkst = Some(Weekday::from_keyword(raw_value).ok_or_else(|| {
                    ParseError::bad_value(&key, raw_value, "unknown weekday")
                })?);
            }
            KW_RRULE_COUNT => {
                parts.count = Some(raw_value.parse::<u32>().map_err(|_| {
                    ParseError::bad_value(&key, raw_value, "must be a non-negative integer")
                })?);
            }
            KW_RRULE_INTERVAL => {
                let n = raw_value.parse::<u32>().map_err(|_| {
                    ParseError::bad_value(&key, raw_value, "must be a positive integer")
                })?;
                if n == 0 {
                    return Err(ParseError::bad_value(&key, raw_value, "INTERVAL=0 is not allowed"));
                }
                parts.interval = Some(n);
            }
            KW_RRULE_UNTIL => {
                parts.until = Some(run(until(), &key, raw_value)?);
            }
            KW_RRULE_BYSECOND => {
                parts.by_second = run(int_list(0, 60, false), &key, raw_value)?
                    .into_iter()
                    .map(|n| n as u8)
                    .collect();
            }
            KW_RRULE_BYMINUTE => {
                parts.by_minute = run(int_list(0, 59, false), &key, raw_value)?
                    .into_iter()
                    .map(|n| n as u8)
                    .collect();
            }
            KW_RRULE_BYHOUR => {
                parts.by_hour = run(int_list(0, 23, false), &key, raw_value)?
                    .into_iter()
                    .map(|n| n as u8)
                    .collect();
            }
            KW_RRULE_BYMONTH => {
                parts.by_month = run(int_list(1, 12, false), &key, raw_value)?
                    .into_iter()
                    .map(|n| n as u8)
                    .collect();
            }
            KW_RRULE_BYMONTHDAY => {
                parts.by_month_day = run(signed_int_list(31), &key, raw_value)?
                    .into_iter()
                    .map(|n| n as i8)
                    .collect();
            }
            KW_RRULE_BYYEARDAY => {
                parts.by_year_day = run(signed_int_list(366), &key, raw_value)?
                    .into_iter()
                    .map(|n| n as i16)
                    .collect();
            }
            KW_RRULE_BYWEEKNO => {
                parts.by_week_no = run(signed_int_list(53), &key, raw_value)?
                    .into_iter()
                    .map(|n| n as i8)
                    .collect();
            }
            KW_RRULE_BYSETPOS => {
                parts.by_set_pos = run(signed_int_list(366), &key, raw_value)?
                    .into_iter()
                    .map(|n| n as i16)
                    .collect();
            }
            KW_RRULE_BYDAY => {
                parts.by_day = run(by_day_list(), &key, raw_value)?;
            }
            _ => return Err(ParseError::UnknownKey { key }),
        }
    }

    Rule::from_parts(parts)
}

/// Run a `chumsky` value parser over one key's raw value, translating its
/// error into our [`ParseError::BadValue`].
fn run<'src, O>(
    parser: impl Parser<'src, &'src str, O, Extra<'src>>,
    key: &str,
    raw: &'src str,
) -> Result<O, ParseError> {
    parser
        .then_ignore(end())
        .parse(raw)
        .into_result()
        .map_err(|errs| {
            let cause = errs
                .first()
                .map(ToString::to_string)
                .unwrap_or_else(|| "invalid value".to_string());
            ParseError::bad_value(key, raw, cause)
        })
}

fn digits1<'src>() -> impl Parser<'src, &'src str, String, Extra<'src>> + Clone {
    any()
        .filter(char::is_ascii_digit)
        .repeated()
        .at_least(1)
        .collect::<String>()
}

fn sign<'src>() -> impl Parser<'src, &'src str, bool, Extra<'src>> + Clone {
    just('-').to(true).or(just('+').to(false)).or_not().map(|s| s.unwrap_or(false))
}

/// An unsigned integer in `lo..=hi`, optionally disallowing zero.
fn uint_in_range<'src>(
    lo: i64,
    hi: i64,
) -> impl Parser<'src, &'src str, i64, Extra<'src>> + Clone {
    digits1().try_map(move |s, span| {
        let n: i64 = s
            .parse()
            .map_err(|_| Rich::custom(span, "not a valid integer"))?;
        if n < lo || n > hi {
            return Err(Rich::custom(span, format!("must be in {lo}..={hi}")));
        }
        Ok(n)
    })
}

/// A signed, non-zero integer in `-bound..=bound`, the shape shared by
/// `BYMONTHDAY`, `BYYEARDAY`, `BYWEEKNO` and `BYSETPOS` (spec §3).
fn signed_nonzero<'src>(bound: i64) -> impl Parser<'src, &'src str, i64, Extra<'src>> + Clone {
    sign()
        .then(digits1())
        .try_map(move |(negative, s), span| {
            let magnitude: i64 = s
                .parse()
                .map_err(|_| Rich::custom(span, "not a valid integer"))?;
            let n = if negative { -magnitude } else { magnitude };
            if n == 0 {
                return Err(Rich::custom(span, "0 is not allowed"));
            }
            if n < -bound || n > bound {
                return Err(Rich::custom(span, format!("must be in -{bound}..={bound}, excluding 0")));
            }
            Ok(n)
        })
}

fn int_list<'src>(
    lo: i64,
    hi: i64,
    _zero_allowed: bool,
) -> impl Parser<'src, &'src str, Vec<i64>, Extra<'src>> {
    uint_in_range(lo, hi).separated_by(just(',')).at_least(1).collect()
}

fn signed_int_list<'src>(bound: i64) -> impl Parser<'src, &'src str, Vec<i64>, Extra<'src>> {
    signed_nonzero(bound).separated_by(just(',')).at_least(1).collect()
}

fn weekday<'src>() -> impl Parser<'src, &'src str, Weekday, Extra<'src>> + Clone {
    choice((
        just("SU").to(Weekday::Sunday),
        just("MO").to(Weekday::Monday),
        just("TU").to(Weekday::Tuesday),
        just("WE").to(Weekday::Wednesday),
        just("TH").to(Weekday::Thursday),
        just("FR").to(Weekday::Friday),
        just("SA").to(Weekday::Saturday),
    ))
}

/// `weekdaynum = [[plus / minus] ordwk] weekday`, RFC 5545 §3.3.10.
fn by_day_entry<'src>() -> impl Parser<'src, &'src str, ByDayEntry, Extra<'src>> {
    signed_nonzero(53)
        .map(|n| n as i8)
        .or_not()
        .then(weekday())
        .map(|(ordinal, weekday)| ByDayEntry { weekday, ordinal })
}

fn by_day_list<'src>() -> impl Parser<'src, &'src str, Vec<ByDayEntry>, Extra<'src>> {
    by_day_entry().separated_by(just(',')).at_least(1).collect()
}

/// `UNTIL`'s three accepted wire forms (spec §6): `YYYYMMDD`,
/// `YYYYMMDDTHHMMSS`, `YYYYMMDDTHHMMSSZ`. A bare date is normalized to the
/// end of that day so it behaves as an inclusive cutoff (see DESIGN.md).
fn until<'src>() -> impl Parser<'src, &'src str, DateTimeValue, Extra<'src>> {
    let digit_run = |n: usize| {
        any()
            .filter(char::is_ascii_digit)
            .repeated()
            .exactly(n)
            .collect::<String>()
    };

    let date = digit_run(8);
    let time = just('T').ignore_then(digit_run(6));

    date.then(time.or_not())
        .then(just('Z').or_not())
        .try_map(|((date_s, time_s), zulu), span| {
            let date = chrono::NaiveDate::parse_from_str(&date_s, "%Y%m%d")
                .map_err(|_| Rich::custom(span, "invalid date"))?;
            let time = match &time_s {
                Some(t) => chrono::NaiveTime::parse_from_str(t, "%H%M%S")
                    .map_err(|_| Rich::custom(span, "invalid time"))?,
                None => chrono::NaiveTime::from_hms_opt(23, 59, 59)
                    .expect("23:59:59 is a valid time"),
            };
            let naive = chrono::NaiveDateTime::new(date, time);
            if zulu.is_some() {
                if time_s.is_none() {
                    return Err(Rich::custom(span, "a bare date cannot carry a Z suffix"));
                }
                Ok(DateTimeValue::Utc(naive))
            } else {
                Ok(DateTimeValue::Floating(naive))
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn until_rejects_garbage() {
        let src = "not-a-date";
        let errs = until()
            .then_ignore(end())
            .parse(src)
            .into_result()
            .unwrap_err();
        assert!(!errs.is_empty());
    }

    /// `chumsky::error::Rich` diagnostics render through `ariadne`, the way
    /// the teacher's top-level `parse` does for the full iCalendar grammar.
    /// We don't expose a `Report`-returning API (our `ParseError` is a plain
    /// enum, spec §4.1), but the underlying `Rich` errors still render.
    #[test]
    fn until_error_renders_as_ariadne_report() {
        use ariadne::{Label, Report, ReportKind, Source};

        let src = "20261301"; // month 13 doesn't exist
        let errs = until()
            .then_ignore(end())
            .parse(src)
            .into_result()
            .unwrap_err();
        let err = errs.first().expect("at least one error");

        let mut rendered = Vec::new();
        Report::build(ReportKind::Error, err.span().into_range())
            .with_message(err.to_string())
            .with_label(Label::new(err.span().into_range()).with_message(err.reason().to_string()))
            .finish()
            .write(Source::from(src), &mut rendered)
            .expect("ariadne can render the report");

        let rendered = String::from_utf8(rendered).unwrap();
        assert!(rendered.contains("invalid date"));
    }

    #[test]
    fn int_list_rejects_empty_entry() {
        let errs = int_list(1, 12, false)
            .then_ignore(end())
            .parse("1,,3")
            .into_result()
            .unwrap_err();
        assert!(!errs.is_empty());
    }

    #[test]
    fn by_day_parses_ordinal_and_bare() {
        let entries = by_day_list()
            .then_ignore(end())
            .parse("1MO,-1FR,TU")
            .into_result()
            .expect("valid BYDAY list");
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].ordinal, Some(1));
        assert_eq!(entries[1].ordinal, Some(-1));
        assert_eq!(entries[2].ordinal, None);
    }

    #[test]
    fn by_day_rejects_zero_ordinal() {
        let errs = by_day_list()
            .then_ignore(end())
            .parse("0MO")
            .into_result()
            .unwrap_err();
        assert!(!errs.is_empty());
    }
}
