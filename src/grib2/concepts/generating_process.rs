// SPDX-License-Identifier: Apache-2.0

#![warn(missing_docs)]

//! The `generatingProcess` concept: origin of the data generation process.
//!
//! Applicable at (Preset, Product Definition Section). Encodes
//! `backgroundProcess` from an explicit model table and
//! `typeOfGeneratingProcess` from the MARS `type`; an optional
//! `generatingProcessIdentifier` passes through from the parametrization
//! dictionary.
//!
//! The previous encoder derived `backgroundProcess` implicitly from
//! `mars.model` inside the GRIB library. That path is kept behind the
//! `generatingProcess.use-model` option until every producer has migrated.
//!

use crate::{
    MyError,
    grib2::{
        Stage,
        concepts::OpFn,
        dict::{Dictionary, Value, get_opt, get_or_throw, set_or_throw},
        section,
    },
};

pub(super) const VARIANTS: &[&str] = &["default"];
const DEFAULT: usize = 0;

// model -> backgroundProcess, per the local generating-process table.
const BACKGROUND_PROCESS: &[(&str, i64)] = &[
    ("ifs", 153),
    ("hres", 153),
    ("aifs", 214),
    ("wam", 114),
    ("nemo", 115),
];

// mars type -> typeOfGeneratingProcess (code table 4.3).
const TYPE_OF_GENERATING_PROCESS: &[(&str, i64)] = &[
    ("an", 0),
    ("4v", 0),
    ("fg", 1),
    ("fc", 2),
    ("cf", 4),
    ("pf", 4),
];

pub(super) fn matcher(_mars: &dyn Dictionary, _opt: &dyn Dictionary) -> usize {
    DEFAULT
}

pub(super) fn entry(stage: Stage, sec: usize, variant: usize) -> Option<OpFn> {
    match (stage, sec, variant) {
        (Stage::Preset, section::PRODUCT_DEFINITION, DEFAULT) => Some(default),
        _ => None,
    }
}

fn default(
    mars: &dyn Dictionary,
    par: &dyn Dictionary,
    opt: &dyn Dictionary,
    out: &mut dyn Dictionary,
) -> Result<(), MyError> {
    // TODO remove once no producer relies on the implicit mars.model hop.
    let use_model = get_opt::<bool>(opt, "generatingProcess.use-model").unwrap_or(false);
    if use_model {
        let model: String = get_or_throw(mars, "model")?;
        set_or_throw(out, "model", Value::Str(model))?;
    } else {
        let model: String = get_or_throw(mars, "model")?;
        let background = BACKGROUND_PROCESS
            .iter()
            .find(|(m, _)| m.eq_ignore_ascii_case(&model))
            .map(|(_, id)| *id)
            .ok_or_else(|| {
                MyError::Deduction(format!("no background process for model '{model}'").into())
            })?;
        set_or_throw(out, "backgroundProcess", Value::Long(background))?;
    }

    if let Some(type_) = get_opt::<String>(mars, "type") {
        let code = TYPE_OF_GENERATING_PROCESS
            .iter()
            .find(|(t, _)| t.eq_ignore_ascii_case(&type_))
            .map(|(_, c)| *c)
            .ok_or_else(|| {
                MyError::Deduction(
                    format!("no type of generating process for type '{type_}'").into(),
                )
            })?;
        set_or_throw(out, "typeOfGeneratingProcess", Value::Long(code))?;
    }

    if let Some(id) = get_opt::<i64>(par, "generatingProcessIdentifier") {
        set_or_throw(out, "generatingProcessIdentifier", Value::Long(id))?;
    }
    Ok(())
}
