// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! The `FREQ` rule part, RFC 5545 §3.3.10.

use std::fmt::{self, Display};

use crate::keyword::{
    KW_RRULE_FREQ_DAILY, KW_RRULE_FREQ_HOURLY, KW_RRULE_FREQ_MINUTELY, KW_RRULE_FREQ_MONTHLY,
    KW_RRULE_FREQ_SECONDLY, KW_RRULE_FREQ_WEEKLY, KW_RRULE_FREQ_YEARLY,
};

/// The base cadence of a recurrence rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Freq {
    /// Secondly
    Secondly,
    /// Minutely
    Minutely,
    /// Hourly
    Hourly,
    /// Daily
    Daily,
    /// Weekly
    Weekly,
    /// Monthly
    Monthly,
    /// Yearly
    Yearly,
}

impl Display for Freq {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kw = match self {
            Freq::Secondly => KW_RRULE_FREQ_SECONDLY,
            Freq::Minutely => KW_RRULE_FREQ_MINUTELY,
            Freq::Hourly => KW_RRULE_FREQ_HOURLY,
            Freq::Daily => KW_RRULE_FREQ_DAILY,
            Freq::Weekly => KW_RRULE_FREQ_WEEKLY,
            Freq::Monthly => KW_RRULE_FREQ_MONTHLY,
            Freq::Yearly => KW_RRULE_FREQ_YEARLY,
        };
        write!(f, "{kw}")
    }
}

impl Freq {
    pub(crate) fn from_keyword(s: &str) -> Option<Self> {
        Some(match s {
            KW_RRULE_FREQ_SECONDLY => Freq::Secondly,
            KW_RRULE_FREQ_MINUTELY => Freq::Minutely,
            KW_RRULE_FREQ_HOURLY => Freq::Hourly,
            KW_RRULE_FREQ_DAILY => Freq::Daily,
            KW_RRULE_FREQ_WEEKLY => Freq::Weekly,
            KW_RRULE_FREQ_MONTHLY => Freq::Monthly,
            KW_RRULE_FREQ_YEARLY => Freq::Yearly,
            _ => return None,
        })
    }

    /// Whether ordinal-prefixed `BYDAY` entries (e.g. `1MO`, `-1FR`) are
    /// legal for this frequency. RFC 5545 §3.3.10 / spec §3 invariants.
    pub fn allows_ordinal_by_day(self) -> bool {
        matches!(self, Freq::Monthly | Freq::Yearly)
    }
}
