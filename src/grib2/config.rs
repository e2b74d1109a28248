// SPDX-License-Identifier: Apache-2.0

#![warn(missing_docs)]

//! Encoder recipes: the per-section template number + concept slots, w/ the
//! legacy alias rewrites older recipes still rely on.
//!

use crate::{
    MyError,
    grib2::{NUM_SECTIONS, concepts},
};
use serde_json::Value;

// recipe section names, §GRIB2 sections 0..5.
const SECTION_NAMES: [&str; NUM_SECTIONS] = [
    "indicator-section",
    "identification-section",
    "local-use-section",
    "grid-definition-section",
    "product-definition-section",
    "data-representation-section",
];

/// One configured concept slot.
#[derive(Clone, Debug)]
pub struct ConceptSlot {
    /// Canonical concept name (after alias rewriting).
    pub concept: String,
    /// Variant name (the slot's `type`).
    pub variant: String,
    /// Remaining per-concept fields.
    pub fields: Vec<(String, Value)>,
}

/// One configured section.
#[derive(Clone, Debug, Default)]
pub struct SectionCfg {
    /// The section's template number.
    pub template_number: i64,
    /// Concept slots, in recipe order.
    pub concepts: Vec<ConceptSlot>,
}

/// A parsed encoder recipe.
#[derive(Clone, Debug)]
pub struct EncoderConfig {
    /// Per-section configuration, indexed by section number.
    pub sections: [SectionCfg; NUM_SECTIONS],
    /// Whether post-encode checks run.
    pub apply_checks: bool,
}

impl EncoderConfig {
    /// Parse a JSON recipe.
    pub fn from_json(cfg: &Value) -> Result<Self, MyError> {
        let root = cfg
            .as_object()
            .ok_or_else(|| MyError::Generic("encoder recipe is not a mapping".into()))?;

        let mut sections: [SectionCfg; NUM_SECTIONS] = Default::default();
        for (sec, name) in SECTION_NAMES.iter().enumerate() {
            let section = root
                .get(*name)
                .ok_or_else(|| MyError::Generic(format!("{name} is missing").into()))?;
            sections[sec] = Self::parse_section(cfg, name, section)?;
        }

        Ok(EncoderConfig {
            sections,
            apply_checks: root
                .get("apply-checks")
                .and_then(Value::as_bool)
                .unwrap_or_else(|| crate::config::config().apply_checks()),
        })
    }

    fn parse_section(root: &Value, name: &str, section: &Value) -> Result<SectionCfg, MyError> {
        let obj = section
            .as_object()
            .ok_or_else(|| MyError::Generic(format!("{name} is not a mapping").into()))?;
        let template_number = obj
            .get("template-number")
            .and_then(Value::as_i64)
            .ok_or_else(|| MyError::Generic(format!("{name} has no template number").into()))?;

        let mut out = SectionCfg {
            template_number,
            concepts: vec![],
        };
        for (key, concept_cfg) in obj {
            if key == "template-number" {
                continue;
            }
            let slot = Self::parse_slot(root, key, concept_cfg)?;
            if concepts::find(&slot.concept).is_none() {
                return Err(MyError::Generic(
                    format!("unknown concept '{}' in {name}", slot.concept).into(),
                ));
            }
            if out.concepts.iter().any(|s| s.concept == slot.concept) {
                return Err(MyError::Generic(
                    format!("duplicate concept '{}' in {name}", slot.concept).into(),
                ));
            }
            out.concepts.push(slot);
        }
        Ok(out)
    }

    // one slot, w/ the legacy alias rewrites.
    fn parse_slot(root: &Value, name: &str, cfg: &Value) -> Result<ConceptSlot, MyError> {
        let key = name.strip_suffix("-configurator").unwrap_or(name);
        let obj = cfg
            .as_object()
            .ok_or_else(|| MyError::Generic(format!("concept '{key}' is not a mapping").into()))?;
        let type_ = obj.get("type").and_then(Value::as_str);

        let (concept, variant) = match key {
            "model" => ("generatingProcess", required_type(key, type_)?),
            "data-type" => ("dataType", required_type(key, type_)?),
            "reference-time" => ("referenceTime", reference_time_variant(root)?),
            "direction-frequency" => ("wave", "spectra".to_owned()),
            "period" => ("wave", "period".to_owned()),
            "ensemble" => ("ensemble", "individual".to_owned()),
            "param" => ("param", "default".to_owned()),
            "time-statistics" => ("statistics", statistics_variant(obj)?),
            other => (other, required_type(key, type_)?),
        };

        let fields = obj
            .iter()
            .filter(|(k, _)| k.as_str() != "type")
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        Ok(ConceptSlot {
            concept: concept.to_owned(),
            variant,
            fields,
        })
    }
}

fn required_type(key: &str, type_: Option<&str>) -> Result<String, MyError> {
    type_
        .map(str::to_owned)
        .ok_or_else(|| MyError::Generic(format!("no type found for concept {key}").into()))
}

// reforecast products are recognized by their product definition template.
fn reference_time_variant(root: &Value) -> Result<String, MyError> {
    let template = root
        .get("product-definition-section")
        .and_then(|s| s.get("template-number"))
        .and_then(Value::as_i64)
        .ok_or_else(|| {
            MyError::Generic("no product definition template number in configuration".into())
        })?;
    Ok(if template == 60 || template == 61 {
        "reforecast".to_owned()
    } else {
        "standard".to_owned()
    })
}

fn statistics_variant(obj: &serde_json::Map<String, Value>) -> Result<String, MyError> {
    let sub = obj
        .get("type-of-statistical-processing")
        .and_then(Value::as_str)
        .ok_or_else(|| {
            MyError::Generic("time-statistics w/o type-of-statistical-processing".into())
        })?;
    match sub {
        "average" => Ok("average".into()),
        "accumul" => Ok("accumulation".into()),
        "max" => Ok("maximum".into()),
        "min" => Ok("minimum".into()),
        other => Err(MyError::Generic(
            format!("unknown statistical processing '{other}'").into(),
        )),
    }
}
