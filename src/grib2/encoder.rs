// SPDX-License-Identifier: Apache-2.0

#![warn(missing_docs)]

//! The encoding driver.
//!
//! For each section in ascending order the driver runs the section
//! initializer for its configured template, then walks the four stages; at
//! every stage, each concept named by the recipe (in declaration order) is
//! matched against the request and, when its entry table has an operation
//! for this (stage, section, variant), invoked on the output dictionary.
//! Failures are rethrown w/ full (concept, variant, stage, section)
//! context. Encoding is all-or-nothing; nothing is returned on error.
//!

use crate::{
    MyError,
    grib2::{
        MISSING, NUM_SECTIONS, Stage, checks,
        concepts::{self, Concept},
        config::EncoderConfig,
        dict::{Dictionary, OutDict, Value, mars_dict},
        sections,
    },
    request::MarsRequest,
};
use tracing::debug;

/// Encodes expanded requests + payloads into GRIB2 key dictionaries, ready
/// for the sample-writing back-end.
pub struct Grib2Encoder {
    cfg: EncoderConfig,
    opt: OutDict,
}

impl Grib2Encoder {
    /// Build a driver for one parsed recipe.
    pub fn new(cfg: EncoderConfig) -> Result<Self, MyError> {
        let opt = Self::options(&cfg)?;
        Ok(Grib2Encoder { cfg, opt })
    }

    // flatten the recipe's concept slots into the options dictionary:
    // `<concept>.type` carries the variant, `<concept>.<field>` the rest.
    fn options(cfg: &EncoderConfig) -> Result<OutDict, MyError> {
        let mut opt = OutDict::new();
        opt.set("applyChecks", Value::Bool(cfg.apply_checks))?;
        for sec in &cfg.sections {
            for slot in &sec.concepts {
                opt.set(
                    &format!("{}.type", slot.concept),
                    Value::Str(slot.variant.clone()),
                )?;
                for (field, v) in &slot.fields {
                    let key = format!("{}.{field}", slot.concept);
                    let value = match v {
                        serde_json::Value::Bool(b) => Value::Bool(*b),
                        serde_json::Value::Number(n) if n.is_i64() => {
                            Value::Long(n.as_i64().unwrap_or_default())
                        }
                        serde_json::Value::Number(n) => {
                            Value::Double(n.as_f64().unwrap_or_default())
                        }
                        serde_json::Value::String(s) => Value::Str(s.clone()),
                        other => Value::Str(other.to_string()),
                    };
                    opt.set(&key, value)?;
                }
            }
        }
        Ok(opt)
    }

    /// Encode one request + payload into an output dictionary.
    pub fn encode(
        &self,
        request: &MarsRequest,
        par: &dyn Dictionary,
        payload: &[f64],
    ) -> Result<OutDict, MyError> {
        let mars = mars_dict(request);
        let mut out = OutDict::new();

        for sec in 0..NUM_SECTIONS {
            sections::initialize(sec, self.cfg.sections[sec].template_number, &mut out)?;
            for stage in Stage::ALL {
                for slot in &self.cfg.sections[sec].concepts {
                    let concept = concepts::find(&slot.concept).ok_or_else(|| {
                        MyError::Generic(format!("unknown concept '{}'", slot.concept).into())
                    })?;
                    self.dispatch(concept, stage, sec, &mars, par, &mut out)?;
                }
            }
        }

        out.set("values", Value::Doubles(payload.to_vec()))?;
        checks::run(&self.cfg, &self.opt, &out)?;
        Ok(out)
    }

    fn dispatch(
        &self,
        concept: &'static Concept,
        stage: Stage,
        sec: usize,
        mars: &OutDict,
        par: &dyn Dictionary,
        out: &mut OutDict,
    ) -> Result<(), MyError> {
        let variant = (concept.matcher)(mars, &self.opt);
        if variant == MISSING {
            return Ok(());
        }
        if variant >= concept.variants.len() {
            return Err(MyError::Generic(
                format!("concept '{}' matched an invalid variant", concept.name).into(),
            ));
        }
        let Some(op) = (concept.entry)(stage, sec, variant) else {
            return Ok(());
        };
        debug!(
            "concept {}/{} at {}/{sec}",
            concept.name,
            concept.variants[variant],
            stage.name()
        );
        op(mars, par, &self.opt, out).map_err(|e| {
            e.in_concept(concept.name, concept.variants[variant], stage.name(), sec)
        })
    }
}
