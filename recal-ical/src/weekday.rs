// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! The `weekday` token and `BYDAY` rule part, RFC 5545 §3.3.10.

use std::fmt::{self, Display};

use crate::keyword::{KW_DAY_FR, KW_DAY_MO, KW_DAY_SA, KW_DAY_SU, KW_DAY_TH, KW_DAY_TU, KW_DAY_WE};

/// A day of the week, Monday- or Sunday- agnostic (RFC 5545 has no inherent
/// first day; [`Weekday::index_from`] gives the 0-based offset relative to
/// an arbitrary first day, used for `WKST`-anchored arithmetic).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Weekday {
    /// Sunday
    Sunday,
    /// Monday
    Monday,
    /// Tuesday
    Tuesday,
    /// Wednesday
    Wednesday,
    /// Thursday
    Thursday,
    /// Friday
    Friday,
    /// Saturday
    Saturday,
}

impl Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kw = match self {
            Weekday::Sunday => KW_DAY_SU,
            Weekday::Monday => KW_DAY_MO,
            Weekday::Tuesday => KW_DAY_TU,
            Weekday::Wednesday => KW_DAY_WE,
            Weekday::Thursday => KW_DAY_TH,
            Weekday::Friday => KW_DAY_FR,
            Weekday::Saturday => KW_DAY_SA,
        };
        write!(f, "{kw}")
    }
}

impl Weekday {
    pub(crate) fn from_keyword(s: &str) -> Option<Self> {
        Some(match s {
            KW_DAY_SU => Weekday::Sunday,
            KW_DAY_MO => Weekday::Monday,
            KW_DAY_TU => Weekday::Tuesday,
            KW_DAY_WE => Weekday::Wednesday,
            KW_DAY_TH => Weekday::Thursday,
            KW_DAY_FR => Weekday::Friday,
            KW_DAY_SA => Weekday::Saturday,
            _ => return None,
        })
    }

    /// 0-based index, Monday = 0 .. Sunday = 6, matching `chrono::Weekday`'s
    /// ISO numbering. Used as the arithmetic basis for [`Self::index_from`].
    const fn iso_index(self) -> i64 {
        match self {
            Weekday::Monday => 0,
            Weekday::Tuesday => 1,
            Weekday::Wednesday => 2,
            Weekday::Thursday => 3,
            Weekday::Friday => 4,
            Weekday::Saturday => 5,
            Weekday::Sunday => 6,
        }
    }

    /// 0-based offset of `self` relative to `first`, wrapping at 7. For
    /// example `Weekday::Wednesday.index_from(Weekday::Monday) == 2`.
    pub fn index_from(self, first: Weekday) -> i64 {
        (self.iso_index() - first.iso_index()).rem_euclid(7)
    }

    /// Convert from `chrono::Weekday`.
    pub fn from_chrono(w: chrono::Weekday) -> Self {
        match w {
            chrono::Weekday::Mon => Weekday::Monday,
            chrono::Weekday::Tue => Weekday::Tuesday,
            chrono::Weekday::Wed => Weekday::Wednesday,
            chrono::Weekday::Thu => Weekday::Thursday,
            chrono::Weekday::Fri => Weekday::Friday,
            chrono::Weekday::Sat => Weekday::Saturday,
            chrono::Weekday::Sun => Weekday::Sunday,
        }
    }

    /// Convert to `chrono::Weekday`.
    pub fn to_chrono(self) -> chrono::Weekday {
        match self {
            Weekday::Monday => chrono::Weekday::Mon,
            Weekday::Tuesday => chrono::Weekday::Tue,
            Weekday::Wednesday => chrono::Weekday::Wed,
            Weekday::Thursday => chrono::Weekday::Thu,
            Weekday::Friday => chrono::Weekday::Fri,
            Weekday::Saturday => chrono::Weekday::Sat,
            Weekday::Sunday => chrono::Weekday::Sun,
        }
    }
}

/// A `weekdaynum`: a weekday with an optional ordinal prefix, e.g. the `1` in
/// `1MO` or the `-1` in `-1FR`. A bare `MO` has `ordinal == None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ByDayEntry {
    /// The weekday.
    pub weekday: Weekday,
    /// The ordinal prefix, non-zero when present.
    pub ordinal: Option<i8>,
}

impl Display for ByDayEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(n) = self.ordinal {
            write!(f, "{n}")?;
        }
        write!(f, "{}", self.weekday)
    }
}
