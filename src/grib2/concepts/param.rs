// SPDX-License-Identifier: Apache-2.0

#![warn(missing_docs)]

//! The `param` concept: the encoded parameter identity.
//!
//! Applicable at (Runtime, Product Definition Section): the paramId is the
//! last word on what the payload means, so it lands after every preset +
//! override has run.
//!

use crate::{
    MyError,
    grib2::{
        MISSING, Stage,
        concepts::OpFn,
        dict::{Dictionary, Value, get_or_throw, set_or_throw},
        section,
    },
};

pub(super) const VARIANTS: &[&str] = &["default"];
const DEFAULT: usize = 0;

pub(super) fn matcher(mars: &dyn Dictionary, _opt: &dyn Dictionary) -> usize {
    if mars.has("param") { DEFAULT } else { MISSING }
}

pub(super) fn entry(stage: Stage, sec: usize, variant: usize) -> Option<OpFn> {
    match (stage, sec, variant) {
        (Stage::Runtime, section::PRODUCT_DEFINITION, DEFAULT) => Some(default),
        _ => None,
    }
}

fn default(
    mars: &dyn Dictionary,
    _par: &dyn Dictionary,
    _opt: &dyn Dictionary,
    out: &mut dyn Dictionary,
) -> Result<(), MyError> {
    let param: i64 = get_or_throw(mars, "param")?;
    set_or_throw(out, "paramId", Value::Long(param))
}
