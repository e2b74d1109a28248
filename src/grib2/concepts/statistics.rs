// SPDX-License-Identifier: Apache-2.0

#![warn(missing_docs)]

//! The `statistics` concept: statistical post-processing metadata.
//!
//! Applicable at (Preset, Product Definition Section). The variant names
//! the statistic (code table 4.10); the length of the processing interval
//! is deduced from the MARS step range (`A-B`).
//!

use crate::{
    MyError,
    grib2::{
        MISSING, Stage,
        concepts::{OpFn, configured_variant},
        dict::{Dictionary, Value, get_or_throw, set_or_throw},
        section,
    },
    types::StepRange,
};

pub(super) const VARIANTS: &[&str] = &["average", "accumulation", "maximum", "minimum"];

pub(super) fn matcher(_mars: &dyn Dictionary, opt: &dyn Dictionary) -> usize {
    configured_variant(opt, "statistics", VARIANTS).unwrap_or(MISSING)
}

pub(super) fn entry(stage: Stage, sec: usize, variant: usize) -> Option<OpFn> {
    if stage != Stage::Preset || sec != section::PRODUCT_DEFINITION {
        return None;
    }
    match variant {
        0 => Some(|m, p, o, out| encode(m, p, o, out, 0)),
        1 => Some(|m, p, o, out| encode(m, p, o, out, 1)),
        2 => Some(|m, p, o, out| encode(m, p, o, out, 2)),
        3 => Some(|m, p, o, out| encode(m, p, o, out, 3)),
        _ => None,
    }
}

fn encode(
    mars: &dyn Dictionary,
    _par: &dyn Dictionary,
    _opt: &dyn Dictionary,
    out: &mut dyn Dictionary,
    statistic: i64,
) -> Result<(), MyError> {
    let step: String = get_or_throw(mars, "step")?;
    let range = StepRange::parse(&step)?;
    let Some(to) = range.to else {
        return Err(MyError::Deduction(
            format!("statistics need a step range, got step={step}").into(),
        ));
    };

    let length_minutes = to - range.from;
    set_or_throw(out, "typeOfStatisticalProcessing", Value::Long(statistic))?;
    if length_minutes % 60 == 0 {
        // hours
        set_or_throw(out, "indicatorOfUnitForTimeRange", Value::Long(1))?;
        set_or_throw(out, "lengthOfTimeRange", Value::Long(length_minutes / 60))
    } else {
        // minutes
        set_or_throw(out, "indicatorOfUnitForTimeRange", Value::Long(0))?;
        set_or_throw(out, "lengthOfTimeRange", Value::Long(length_minutes))
    }
}
