// SPDX-License-Identifier: Apache-2.0

//! GRIB2 encoding: recipes, the stage x section x concept drive and the
//! check layer.
//!

mod concepts;
mod recipes;

use marskit::prelude::*;
use serde_json::json;

pub(crate) fn recipe(extra: serde_json::Value) -> EncoderConfig {
    let mut cfg = json!({
        "apply-checks": true,
        "indicator-section": {"template-number": 0},
        "identification-section": {
            "template-number": 0,
            "tables": {"type": "default"},
        },
        "local-use-section": {"template-number": 1},
        "grid-definition-section": {"template-number": 40},
        "product-definition-section": {"template-number": 8},
        "data-representation-section": {"template-number": 42},
    });
    if let (Some(base), Some(over)) = (cfg.as_object_mut(), extra.as_object()) {
        for (k, v) in over {
            match base.get_mut(k) {
                Some(serde_json::Value::Object(section)) => {
                    for (kk, vv) in v.as_object().expect("section overlay") {
                        section.insert(kk.clone(), vv.clone());
                    }
                }
                _ => {
                    base.insert(k.clone(), v.clone());
                }
            }
        }
    }
    EncoderConfig::from_json(&cfg).expect("bad recipe")
}

pub(crate) fn request(text: &str) -> MarsRequest {
    MarsRequest::parse(text, true).expect("bad request")
}
