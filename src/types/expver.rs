// SPDX-License-Identifier: Apache-2.0

#![warn(missing_docs)]

//! Experiment-version keywords: the 4-character experiment id.
//!
//! Numeric inputs are zero-padded (`1` becomes `0001`); free-form
//! alphanumeric ids are accepted when exactly 4 characters long.
//!

use crate::MyError;

/// Expver keyword payload.
#[derive(Clone, Debug)]
pub(crate) struct TypeExpver;

impl TypeExpver {
    pub(crate) fn new() -> Self {
        TypeExpver
    }

    pub(crate) fn expand_one(&self, name: &str, value: &str) -> Result<String, MyError> {
        if !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit()) {
            let n: u32 = value.parse().map_err(|_| {
                MyError::User(format!("'{value}' is not a valid '{name}'").into())
            })?;
            if n > 9999 {
                return Err(MyError::User(
                    format!("'{value}' does not fit the 4-character '{name}'").into(),
                ));
            }
            return Ok(format!("{n:04}"));
        }

        if value.len() == 4 && value.bytes().all(|b| b.is_ascii_alphanumeric()) {
            return Ok(value.to_ascii_lowercase());
        }
        Err(MyError::User(
            format!("'{value}' is not a valid '{name}': want 4 alphanumeric characters").into(),
        ))
    }
}
