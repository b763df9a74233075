// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Engine-level failure signals.
//!
//! The engine never fails on data: a rule that structurally cannot fire
//! (e.g. `BYMONTHDAY=31` in February-only months) simply yields an empty
//! sequence, not an error. [`EngineError`] exists for one case only — a
//! safety cap breach on a series with no caller-supplied bound.

use thiserror::Error;

/// A diagnostic signal raised while generating an occurrence sequence.
///
/// Unlike [`recal_ical::ParseError`], this is informational rather than
/// fatal: the engine has already produced a (truncated) valid prefix by the
/// time this is surfaced. See [`crate::Occurrences::limit_reason`].
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum EngineError {
    /// An unbounded series (no `COUNT`, `UNTIL`, or caller-supplied range)
    /// hit the engine's internal emission safety cap.
    #[error("occurrence series hit the engine's safety cap with no COUNT/UNTIL/range bound")]
    SafetyCap,
}
