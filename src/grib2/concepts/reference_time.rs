// SPDX-License-Identifier: Apache-2.0

#![warn(missing_docs)]

//! The `referenceTime` concept: the reference date + time of the product.
//!
//! Applicable at (Preset, Identification Section). The `standard` variant
//! takes `dataDate`/`dataTime` straight from MARS `date`/`time`; the
//! `reforecast` variant additionally records the model-version date from
//! MARS `hdate`.
//!

use crate::{
    MyError,
    grib2::{
        MISSING, Stage,
        concepts::{OpFn, configured_variant},
        dict::{Dictionary, Value, get_or_throw, set_or_throw},
        section,
    },
};

pub(super) const VARIANTS: &[&str] = &["standard", "reforecast"];
const STANDARD: usize = 0;
const REFORECAST: usize = 1;

pub(super) fn matcher(mars: &dyn Dictionary, opt: &dyn Dictionary) -> usize {
    if !mars.has("date") || !mars.has("time") {
        return MISSING;
    }
    configured_variant(opt, "referenceTime", VARIANTS).unwrap_or(STANDARD)
}

pub(super) fn entry(stage: Stage, sec: usize, variant: usize) -> Option<OpFn> {
    match (stage, sec, variant) {
        (Stage::Preset, section::IDENTIFICATION, STANDARD) => Some(standard),
        (Stage::Preset, section::IDENTIFICATION, REFORECAST) => Some(reforecast),
        _ => None,
    }
}

fn set_date_time(mars: &dyn Dictionary, out: &mut dyn Dictionary) -> Result<(), MyError> {
    let date: i64 = get_or_throw(mars, "date")?;
    let time: i64 = get_or_throw(mars, "time")?;
    set_or_throw(out, "significanceOfReferenceTime", Value::Long(1))?;
    set_or_throw(out, "dataDate", Value::Long(date))?;
    set_or_throw(out, "dataTime", Value::Long(time))
}

fn standard(
    mars: &dyn Dictionary,
    _par: &dyn Dictionary,
    _opt: &dyn Dictionary,
    out: &mut dyn Dictionary,
) -> Result<(), MyError> {
    set_date_time(mars, out)
}

fn reforecast(
    mars: &dyn Dictionary,
    _par: &dyn Dictionary,
    _opt: &dyn Dictionary,
    out: &mut dyn Dictionary,
) -> Result<(), MyError> {
    set_date_time(mars, out)?;
    let hdate: i64 = get_or_throw(mars, "hdate")?;
    set_or_throw(out, "referenceDate", Value::Long(hdate))
}
