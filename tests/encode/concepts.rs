// SPDX-License-Identifier: Apache-2.0

//! Concept dispatch from the user's point of view: expanded request in,
//! GRIB keys out, errors w/ full concept context.
//!

use super::{recipe, request};
use marskit::prelude::*;
use serde_json::json;

fn full_recipe() -> EncoderConfig {
    recipe(json!({
        "local-use-section": {
            "template-number": 15,
            "longrange": {"type": "default"},
        },
        "identification-section": {
            "reference-time": {"type": "x"},
        },
        "product-definition-section": {
            "model": {"type": "default"},
            "data-type": {"type": "default"},
            "ensemble": {"type": "individual"},
            "param": {"type": "default"},
        },
    }))
}

#[test]
fn test_seasonal_member() {
    let enc = Grib2Encoder::new(full_recipe()).unwrap();
    let r = request(
        "ret,date=-1,stream=msmm,type=pf,levtype=sfc,param=167,number=3,method=1,system=51,model=ifs",
    );
    let out = enc.encode(&r, &OutDict::new(), &[1.0]).unwrap();

    // longrange...
    assert_eq!(get_or_throw::<i64>(&out, "methodNumber").unwrap(), 1);
    assert_eq!(get_or_throw::<i64>(&out, "systemNumber").unwrap(), 51);
    // reference time from the expanded date/time...
    assert!(out.has("dataDate"));
    assert_eq!(get_or_throw::<i64>(&out, "dataTime").unwrap(), 1200);
    // generating process, explicit table...
    assert_eq!(get_or_throw::<i64>(&out, "backgroundProcess").unwrap(), 153);
    assert_eq!(get_or_throw::<i64>(&out, "typeOfGeneratingProcess").unwrap(), 4);
    // data type + ensemble + param...
    assert_eq!(get_or_throw::<i64>(&out, "typeOfProcessedData").unwrap(), 4);
    assert_eq!(get_or_throw::<i64>(&out, "perturbationNumber").unwrap(), 3);
    assert_eq!(get_or_throw::<i64>(&out, "paramId").unwrap(), 167);
}

#[test]
fn test_concept_error_carries_context() {
    let enc = Grib2Encoder::new(full_recipe()).unwrap();
    // no model: the generatingProcess deduction cannot run...
    let r = request("ret,date=-1,type=pf,levtype=sfc,param=167,number=3,method=1,system=51");
    match enc.encode(&r, &OutDict::new(), &[]).unwrap_err() {
        MyError::Concept {
            concept,
            variant,
            stage,
            section,
            ..
        } => {
            assert_eq!(concept, "generatingProcess");
            assert_eq!(variant, "default");
            assert_eq!(stage, "preset");
            assert_eq!(section, 4);
        }
        other => panic!("wanted a concept error, got: {other}"),
    }
}

#[test]
fn test_matchers_skip_inapplicable_concepts() {
    let enc = Grib2Encoder::new(full_recipe()).unwrap();
    // deterministic analysis: no number, no method/system, no model needed
    // means generatingProcess would still run; give it one.
    let r = request("ret,date=-1,levtype=sfc,param=167,model=ifs");
    let out = enc.encode(&r, &OutDict::new(), &[]).unwrap();
    assert!(!out.has("methodNumber"));
    assert!(!out.has("perturbationNumber"));
    assert_eq!(get_or_throw::<i64>(&out, "typeOfProcessedData").unwrap(), 0);
}

#[test]
fn test_statistics_over_step_range() {
    let enc = Grib2Encoder::new(recipe(json!({
        "product-definition-section": {
            "time-statistics": {"type": "x", "type-of-statistical-processing": "max"},
        },
    })))
    .unwrap();
    let r = request("ret,date=-1,type=fc,levtype=sfc,param=167,step=12-36");
    let out = enc.encode(&r, &OutDict::new(), &[]).unwrap();
    assert_eq!(get_or_throw::<i64>(&out, "typeOfStatisticalProcessing").unwrap(), 2);
    assert_eq!(get_or_throw::<i64>(&out, "indicatorOfUnitForTimeRange").unwrap(), 1);
    assert_eq!(get_or_throw::<i64>(&out, "lengthOfTimeRange").unwrap(), 24);
}

#[test]
fn test_wave_spectra_via_legacy_alias() {
    let enc = Grib2Encoder::new(recipe(json!({
        "product-definition-section": {
            "direction-frequency": {"type": "whatever"},
        },
    })))
    .unwrap();
    let r = request("ret,date=-1,stream=wave,levtype=sfc,param=2dfd");
    let out = enc.encode(&r, &OutDict::new(), &[]).unwrap();
    assert_eq!(get_or_throw::<i64>(&out, "numberOfWaveDirections").unwrap(), 24);
    assert_eq!(get_or_throw::<i64>(&out, "numberOfWaveFrequencies").unwrap(), 30);
}

#[test]
fn test_legacy_model_passthrough_option() {
    let enc = Grib2Encoder::new(recipe(json!({
        "product-definition-section": {
            "model": {"type": "default", "use-model": true},
        },
    })))
    .unwrap();
    let r = request("ret,date=-1,levtype=sfc,param=167,model=ifs");
    let out = enc.encode(&r, &OutDict::new(), &[]).unwrap();
    assert_eq!(get_or_throw::<String>(&out, "model").unwrap(), "ifs");
    assert!(!out.has("backgroundProcess"));
}
