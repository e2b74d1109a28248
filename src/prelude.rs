// SPDX-License-Identifier: Apache-2.0

#![warn(missing_docs)]

//! Group imports of many common traits and types by adding a glob import for
//! use by clients of this library.
//!

pub use super::context::*;
pub use super::environment;
pub use super::error::*;
pub use super::expand::*;
pub use super::grib2::concepts::{Concept, MatcherFn, OpFn};
pub use super::grib2::config::{ConceptSlot, EncoderConfig, SectionCfg};
pub use super::grib2::dict::{
    Dictionary, OutDict, Value, get_opt, get_or_throw, mars_dict, set_or_throw,
};
pub use super::grib2::encoder::Grib2Encoder;
pub use super::grib2::{MISSING, Stage, section};
pub use super::language::{Language, best_match, expand_verb, verbs};
pub use super::message::*;
pub use super::request::{MarsRequest, Parameter};
pub use super::types::{ExpandContext, Type};
pub use super::version::{vcs_version, version};
