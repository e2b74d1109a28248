// SPDX-License-Identifier: Apache-2.0

#![warn(missing_docs)]

//! The `dataType` concept: the kind of processed data in the product.
//!
//! Applicable at (Preset, Product Definition Section); maps the MARS `type`
//! onto `typeOfProcessedData` (code table 1.4).
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

const TYPE_OF_PROCESSED_DATA: &[(&str, i64)] = &[
    ("an", 0),
    ("4v", 0),
    ("fc", 1),
    ("cf", 3),
    ("pf", 4),
    ("em", 5),
    ("es", 5),
];

pub(super) fn matcher(mars: &dyn Dictionary, _opt: &dyn Dictionary) -> usize {
    if mars.has("type") { DEFAULT } else { MISSING }
}

pub(super) fn entry(stage: Stage, sec: usize, variant: usize) -> Option<OpFn> {
    match (stage, sec, variant) {
        (Stage::Preset, section::PRODUCT_DEFINITION, DEFAULT) => Some(default),
        _ => None,
    }
}

fn default(
    mars: &dyn Dictionary,
    _par: &dyn Dictionary,
    _opt: &dyn Dictionary,
    out: &mut dyn Dictionary,
) -> Result<(), MyError> {
    let type_: String = get_or_throw(mars, "type")?;
    let code = TYPE_OF_PROCESSED_DATA
        .iter()
        .find(|(t, _)| t.eq_ignore_ascii_case(&type_))
        .map(|(_, c)| *c)
        .ok_or_else(|| {
            MyError::Deduction(format!("no processed-data code for type '{type_}'").into())
        })?;
    set_or_throw(out, "typeOfProcessedData", Value::Long(code))
}
