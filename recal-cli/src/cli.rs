// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Argument definitions for the `recal` binary.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use recal_ical::DateTimeValue;

/// A thin command-line exerciser of the `recal` occurrence engine.
#[derive(Debug, Parser)]
#[command(name = "recal", version, about = "Inspect RFC 5545 recurrence rules")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Enumerate occurrences of an RRULE anchored at a given date-time
    Generate(GenerateArgs),
    /// Answer whether a candidate date-time would occur
    Members(MembersArgs),
}

#[derive(Debug, Parser)]
pub struct GenerateArgs {
    /// The RRULE value, e.g. "FREQ=WEEKLY;BYDAY=MO,WE,FR;COUNT=10"
    pub rrule: String,

    /// The anchor (DTSTART) date-time, e.g. "20250101T100000"
    #[arg(long)]
    pub anchor: DateTimeValue,

    /// Cap the number of occurrences printed when the rule has no
    /// COUNT/UNTIL of its own
    #[arg(long, default_value_t = 50)]
    pub limit: u64,

    /// Only print occurrences within [range-start, range-end]
    #[arg(long, requires = "range_end")]
    pub range_start: Option<DateTimeValue>,

    /// Only print occurrences within [range-start, range-end]
    #[arg(long, requires = "range_start")]
    pub range_end: Option<DateTimeValue>,

    /// Use calendar-mode semantics (anchor always appears first)
    #[arg(long)]
    pub calendar_mode: bool,

    /// Write occurrences to this file instead of stdout
    #[arg(long, value_name = "PATH")]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Parser)]
pub struct MembersArgs {
    /// The RRULE value, e.g. "FREQ=WEEKLY;BYDAY=MO,WE,FR;COUNT=10"
    pub rrule: String,

    /// The anchor (DTSTART) date-time
    #[arg(long)]
    pub anchor: DateTimeValue,

    /// The date-time to test for membership
    #[arg(long)]
    pub candidate: DateTimeValue,
}
