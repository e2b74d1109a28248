// SPDX-License-Identifier: Apache-2.0

#![warn(missing_docs)]

//! The `longrange` concept: seasonal/long-range forecast metadata in the
//! Local Use Section.
//!
//! Applicable at (Preset, Local Use Section) only. Validates that the local
//! definition in effect is one of the long-range ones, then encodes
//! `methodNumber` + `systemNumber` from the MARS `method` + `system` keys.
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

// local definitions that carry method/system.
const ACCEPTED_LOCAL_DEFINITIONS: &[i64] = &[15];

pub(super) fn matcher(mars: &dyn Dictionary, _opt: &dyn Dictionary) -> usize {
    if mars.has("method") && mars.has("system") {
        DEFAULT
    } else {
        MISSING
    }
}

pub(super) fn entry(stage: Stage, sec: usize, variant: usize) -> Option<OpFn> {
    match (stage, sec, variant) {
        (Stage::Preset, section::LOCAL_USE, DEFAULT) => Some(default),
        _ => None,
    }
}

fn default(
    mars: &dyn Dictionary,
    _par: &dyn Dictionary,
    _opt: &dyn Dictionary,
    out: &mut dyn Dictionary,
) -> Result<(), MyError> {
    let local = get_or_throw::<i64>(out, "localDefinitionNumber")?;
    if !ACCEPTED_LOCAL_DEFINITIONS.contains(&local) {
        return Err(MyError::Generic(
            format!(
                "local definition {local} does not carry long-range keys (want one of {ACCEPTED_LOCAL_DEFINITIONS:?})"
            )
            .into(),
        ));
    }

    let method: i64 = get_or_throw(mars, "method")?;
    let system: i64 = get_or_throw(mars, "system")?;
    set_or_throw(out, "methodNumber", Value::Long(method))?;
    set_or_throw(out, "systemNumber", Value::Long(system))
}
