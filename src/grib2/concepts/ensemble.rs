// SPDX-License-Identifier: Apache-2.0

#![warn(missing_docs)]

//! The `ensemble` concept: individual ensemble member metadata.
//!
//! Applicable at (Preset, Product Definition Section); encodes
//! `perturbationNumber` from the MARS `number` plus, when the
//! parametrization provides it, `numberOfForecastsInEnsemble`.
//!

use crate::{
    MyError,
    grib2::{
        MISSING, Stage,
        concepts::OpFn,
        dict::{Dictionary, Value, get_opt, get_or_throw, set_or_throw},
        section,
    },
};

pub(super) const VARIANTS: &[&str] = &["individual"];
const INDIVIDUAL: usize = 0;

pub(super) fn matcher(mars: &dyn Dictionary, _opt: &dyn Dictionary) -> usize {
    if mars.has("number") { INDIVIDUAL } else { MISSING }
}

pub(super) fn entry(stage: Stage, sec: usize, variant: usize) -> Option<OpFn> {
    match (stage, sec, variant) {
        (Stage::Preset, section::PRODUCT_DEFINITION, INDIVIDUAL) => Some(individual),
        _ => None,
    }
}

fn individual(
    mars: &dyn Dictionary,
    par: &dyn Dictionary,
    _opt: &dyn Dictionary,
    out: &mut dyn Dictionary,
) -> Result<(), MyError> {
    let number: i64 = get_or_throw(mars, "number")?;
    set_or_throw(out, "perturbationNumber", Value::Long(number))?;
    if let Some(n) = get_opt::<i64>(par, "numberOfForecastsInEnsemble") {
        set_or_throw(out, "numberOfForecastsInEnsemble", Value::Long(n))?;
    }
    Ok(())
}
