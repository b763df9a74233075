// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Errors produced while parsing or validating an RRULE value.

use thiserror::Error;

/// A failure encountered while parsing or validating a `recur` value.
///
/// The parser never partially accepts a rule: on any error no [`Rule`] is
/// produced (see `recal_ical::Rule`).
#[non_exhaustive]
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseError {
    /// A `KEY=VALUE` pair used a key this grammar does not recognize.
    #[error("unknown key '{key}'")]
    UnknownKey {
        /// The offending key, canonicalized to upper case.
        key: String,
    },

    /// The same key appeared more than once in the rule.
    #[error("duplicate key '{key}'")]
    DuplicateKey {
        /// The offending key.
        key: String,
    },

    /// A key's value was syntactically or semantically invalid.
    #[error("{key}: value '{raw}' is not allowed ({cause})")]
    BadValue {
        /// The offending key.
        key: String,
        /// The raw, unparsed value text.
        raw: String,
        /// A human-readable explanation of why the value was rejected.
        cause: String,
    },

    /// A cross-parameter compatibility rule (§3 invariants) was violated.
    #[error("<cross>: {cause}")]
    Incompatible {
        /// A human-readable explanation of which rule was violated.
        cause: String,
    },
}

impl ParseError {
    pub(crate) fn bad_value(key: &str, raw: impl Into<String>, cause: impl Into<String>) -> Self {
        ParseError::BadValue {
            key: key.to_string(),
            raw: raw.into(),
            cause: cause.into(),
        }
    }

    pub(crate) fn incompatible(cause: impl Into<String>) -> Self {
        ParseError::Incompatible {
            cause: cause.into(),
        }
    }
}
