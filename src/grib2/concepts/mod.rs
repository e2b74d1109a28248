// SPDX-License-Identifier: Apache-2.0

#![warn(missing_docs)]

//! The concept catalog.
//!
//! A concept is a named unit encoding a narrow set of GRIB keys. Each one
//! declares its closed variant list, a matcher classifying a request into a
//! variant (or [`MISSING`] to skip), and an entry table giving the operation
//! for every applicable (stage, section, variant) cell --inapplicable cells
//! are `None` and the driver skips them silently.
//!
//! [`MISSING`]: crate::grib2::MISSING
//!

mod data_type;
mod ensemble;
mod generating_process;
mod longrange;
mod param;
mod reference_time;
mod statistics;
mod tables;
mod wave;

use crate::{MyError, grib2::Stage, grib2::dict::Dictionary};

/// One concept operation, fully specialized on (stage, section, variant).
pub type OpFn = fn(
    &dyn Dictionary, // mars
    &dyn Dictionary, // par
    &dyn Dictionary, // opt
    &mut dyn Dictionary,
) -> Result<(), MyError>;

/// Classifies a request into a variant index, or `MISSING`.
pub type MatcherFn = fn(&dyn Dictionary, &dyn Dictionary) -> usize;

/// A concept descriptor: the unit of registration.
pub struct Concept {
    /// Canonical concept name; the recipe refers to it.
    pub name: &'static str,
    /// The closed variant list.
    pub variants: &'static [&'static str],
    /// The runtime classifier.
    pub matcher: MatcherFn,
    /// The (stage, section, variant) dispatch table.
    pub entry: fn(Stage, usize, usize) -> Option<OpFn>,
}

// catalog declaration order is dispatch order w/in a stage.
static CATALOG: &[Concept] = &[
    Concept {
        name: "tables",
        variants: tables::VARIANTS,
        matcher: tables::matcher,
        entry: tables::entry,
    },
    Concept {
        name: "referenceTime",
        variants: reference_time::VARIANTS,
        matcher: reference_time::matcher,
        entry: reference_time::entry,
    },
    Concept {
        name: "longrange",
        variants: longrange::VARIANTS,
        matcher: longrange::matcher,
        entry: longrange::entry,
    },
    Concept {
        name: "generatingProcess",
        variants: generating_process::VARIANTS,
        matcher: generating_process::matcher,
        entry: generating_process::entry,
    },
    Concept {
        name: "dataType",
        variants: data_type::VARIANTS,
        matcher: data_type::matcher,
        entry: data_type::entry,
    },
    Concept {
        name: "ensemble",
        variants: ensemble::VARIANTS,
        matcher: ensemble::matcher,
        entry: ensemble::entry,
    },
    Concept {
        name: "statistics",
        variants: statistics::VARIANTS,
        matcher: statistics::matcher,
        entry: statistics::entry,
    },
    Concept {
        name: "param",
        variants: param::VARIANTS,
        matcher: param::matcher,
        entry: param::entry,
    },
    Concept {
        name: "wave",
        variants: wave::VARIANTS,
        matcher: wave::matcher,
        entry: wave::entry,
    },
];

/// The full catalog, in declaration order.
pub fn catalog() -> &'static [Concept] {
    CATALOG
}

/// Look a concept up by name.
pub fn find(name: &str) -> Option<&'static Concept> {
    CATALOG.iter().find(|c| c.name == name)
}

/// The variant index named by the recipe for `concept`, read from the
/// options dictionary (`<concept>.type`).
pub(crate) fn configured_variant(
    opt: &dyn Dictionary,
    concept: &'static str,
    variants: &'static [&'static str],
) -> Option<usize> {
    let key = format!("{concept}.type");
    let name = crate::grib2::dict::get_opt::<String>(opt, &key)?;
    variants.iter().position(|v| v.eq_ignore_ascii_case(&name))
}
