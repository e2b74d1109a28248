// SPDX-License-Identifier: Apache-2.0

#![warn(missing_docs)]

//! The `wave` concept: 2d wave spectra + wave period metadata.
//!
//! Applicable at (Preset, Product Definition Section). The `spectra`
//! variant encodes the direction/frequency discretization; the `period`
//! variant the period interval bounds. Counts + bounds come from the
//! parametrization dictionary, w/ the standard WAM discretization as
//! fallback.
//!

use crate::{
    MyError,
    grib2::{
        MISSING, Stage,
        concepts::{OpFn, configured_variant},
        dict::{Dictionary, Value, get_opt, set_or_throw},
        section,
    },
};

pub(super) const VARIANTS: &[&str] = &["spectra", "period"];
const SPECTRA: usize = 0;
const PERIOD: usize = 1;

pub(super) fn matcher(_mars: &dyn Dictionary, opt: &dyn Dictionary) -> usize {
    configured_variant(opt, "wave", VARIANTS).unwrap_or(MISSING)
}

pub(super) fn entry(stage: Stage, sec: usize, variant: usize) -> Option<OpFn> {
    match (stage, sec, variant) {
        (Stage::Preset, section::PRODUCT_DEFINITION, SPECTRA) => Some(spectra),
        (Stage::Preset, section::PRODUCT_DEFINITION, PERIOD) => Some(period),
        _ => None,
    }
}

fn spectra(
    _mars: &dyn Dictionary,
    par: &dyn Dictionary,
    _opt: &dyn Dictionary,
    out: &mut dyn Dictionary,
) -> Result<(), MyError> {
    let directions = get_opt::<i64>(par, "numberOfWaveDirections").unwrap_or(24);
    let frequencies = get_opt::<i64>(par, "numberOfWaveFrequencies").unwrap_or(30);
    set_or_throw(out, "numberOfWaveDirections", Value::Long(directions))?;
    set_or_throw(out, "numberOfWaveFrequencies", Value::Long(frequencies))
}

fn period(
    _mars: &dyn Dictionary,
    par: &dyn Dictionary,
    _opt: &dyn Dictionary,
    out: &mut dyn Dictionary,
) -> Result<(), MyError> {
    let lower = get_opt::<i64>(par, "lowerWavePeriodLimit").unwrap_or(2);
    let upper = get_opt::<i64>(par, "upperWavePeriodLimit").unwrap_or(30);
    set_or_throw(out, "scaleFactorOfLowerWavePeriodLimit", Value::Long(0))?;
    set_or_throw(out, "scaledValueOfLowerWavePeriodLimit", Value::Long(lower))?;
    set_or_throw(out, "scaleFactorOfUpperWavePeriodLimit", Value::Long(0))?;
    set_or_throw(out, "scaledValueOfUpperWavePeriodLimit", Value::Long(upper))
}
