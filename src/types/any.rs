// SPDX-License-Identifier: Apache-2.0

#![warn(missing_docs)]

//! Passthrough keywords --no validation, no normalization.
//!

use crate::MyError;

/// Any keyword payload.
#[derive(Clone, Debug)]
pub(crate) struct TypeAny;

impl TypeAny {
    pub(crate) fn new() -> Self {
        TypeAny
    }

    pub(crate) fn expand_one(&self, value: &str) -> Result<String, MyError> {
        Ok(value.to_owned())
    }
}
