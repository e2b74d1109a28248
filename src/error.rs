// SPDX-License-Identifier: Apache-2.0

#![warn(missing_docs)]

//! Errors raised from this library.
//!

use peg::{error::ParseError, str::LineCol};
use std::borrow::Cow;
use thiserror::Error;

/// Variants of error raised from this library.
#[derive(Debug, Error)]
pub enum MyError {
    /// Data serialization/deserialization, parsing + validation errors.
    #[error("I/O error: {0}")]
    IO(#[from] std::io::Error),

    /// Date, time + timestamp (`jiff`) parsing error.
    #[error("Date-Time error: {0}")]
    Time(#[from] jiff::Error),

    /// Text-encoding (`peg`) related error.
    #[error("PEG error: {0:?}")]
    Text(ParseError<LineCol>),

    /// JSON-encoding (`serde`) related error.
    #[error("Json [Try]From error: {0}")]
    Json(#[from] serde_json::Error),

    /// Input violates the request grammar or a value fails expansion.
    #[error("User error: {0}")]
    User(Cow<'static, str>),

    /// A MARS key needed to deduce a GRIB key is missing or unmappable.
    #[error("Deduction error: {0}")]
    Deduction(Cow<'static, str>),

    /// A concept failed or was dispatched outside its applicability domain.
    /// Always carries the concept, variant, stage and section context.
    #[error("Concept error in {concept}/{variant} (stage {stage}, section {section}): {source}")]
    Concept {
        /// Name of the offending concept.
        concept: &'static str,
        /// Variant the matcher selected.
        variant: &'static str,
        /// Pipeline stage at the time of failure.
        stage: &'static str,
        /// GRIB2 section index at the time of failure.
        section: usize,
        /// The wrapped underlying error.
        source: Box<MyError>,
    },

    /// A post-encode check failed.
    #[error("Validation error [{check}]: {reason}")]
    Validation {
        /// Name of the failed check.
        check: &'static str,
        /// Why the check failed.
        reason: Cow<'static, str>,
    },

    /// Configuration inconsistency, framing failure or truncated message.
    #[error("Error: {0}")]
    Generic(Cow<'static, str>),
}

impl MyError {
    // Wrap `self` w/ full concept dispatch context.
    pub(crate) fn in_concept(
        self,
        concept: &'static str,
        variant: &'static str,
        stage: &'static str,
        section: usize,
    ) -> Self {
        MyError::Concept {
            concept,
            variant,
            stage,
            section,
            source: Box::new(self),
        }
    }
}
