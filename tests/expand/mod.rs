// SPDX-License-Identifier: Apache-2.0

//! Expansion behaviour: the §-laws plus the end-to-end scenarios.
//!

mod dates;
mod defaults;
mod params;
mod steps;
mod strictness;

use jiff::civil;
use marskit::{ExpandContext, MarsExpansion, MarsRequest};

// every test pins the wall clock to the same civil date...
pub(crate) fn fixed_today() -> civil::Date {
    civil::date(2025, 3, 15)
}

pub(crate) fn driver(strict: bool) -> MarsExpansion {
    MarsExpansion::with_context(false, strict, ExpandContext::fixed(fixed_today()))
}

pub(crate) fn expand(text: &str) -> MarsRequest {
    let rs = marskit::text::mars::requests(text).expect("parse failed");
    assert_eq!(rs.len(), 1, "want exactly one request");
    driver(true).expand_one(&rs[0]).expect("expansion failed")
}
