// SPDX-License-Identifier: Apache-2.0

#![warn(missing_docs)]

//! The `tables` concept: GRIB2 table versioning.
//!
//! Runs at (Allocate, Identification Section) and pins `tablesVersion` +
//! `localTablesVersion`. The `custom` variant takes the version from the
//! recipe; `default` uses the latest version the back-end ships.
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

pub(super) const VARIANTS: &[&str] = &["custom", "default"];
const CUSTOM: usize = 0;
const DEFAULT: usize = 1;

// latest master table the generated samples are pinned against.
const LATEST_TABLES_VERSION: i64 = 32;

pub(super) fn matcher(_mars: &dyn Dictionary, opt: &dyn Dictionary) -> usize {
    match configured_variant(opt, "tables", VARIANTS) {
        Some(v) => v,
        None if opt.has("tables.tables-version") => CUSTOM,
        None => MISSING,
    }
}

pub(super) fn entry(stage: Stage, sec: usize, variant: usize) -> Option<OpFn> {
    match (stage, sec, variant) {
        (Stage::Allocate, section::IDENTIFICATION, CUSTOM) => Some(custom),
        (Stage::Allocate, section::IDENTIFICATION, DEFAULT) => Some(default),
        _ => None,
    }
}

fn custom(
    _mars: &dyn Dictionary,
    _par: &dyn Dictionary,
    opt: &dyn Dictionary,
    out: &mut dyn Dictionary,
) -> Result<(), MyError> {
    let version: i64 = get_or_throw(opt, "tables.tables-version")?;
    set_or_throw(out, "tablesVersion", Value::Long(version))?;
    set_or_throw(out, "localTablesVersion", Value::Long(0))
}

fn default(
    _mars: &dyn Dictionary,
    _par: &dyn Dictionary,
    _opt: &dyn Dictionary,
    out: &mut dyn Dictionary,
) -> Result<(), MyError> {
    set_or_throw(out, "tablesVersion", Value::Long(LATEST_TABLES_VERSION))?;
    set_or_throw(out, "localTablesVersion", Value::Long(0))
}
