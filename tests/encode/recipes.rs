// SPDX-License-Identifier: Apache-2.0

//! Recipe parsing + the section scaffolding it drives.
//!

use super::{recipe, request};
use marskit::prelude::*;
use serde_json::json;

#[test]
fn test_sections_in_order() {
    let enc = Grib2Encoder::new(recipe(json!({}))).unwrap();
    let out = enc
        .encode(
            &request("ret,date=-1,levtype=sfc,param=167"),
            &OutDict::new(),
            &[273.15, 274.0],
        )
        .unwrap();

    assert_eq!(get_or_throw::<i64>(&out, "localDefinitionNumber").unwrap(), 1);
    assert_eq!(get_or_throw::<i64>(&out, "gridDefinitionTemplateNumber").unwrap(), 40);
    assert_eq!(get_or_throw::<i64>(&out, "productDefinitionTemplateNumber").unwrap(), 8);
    assert_eq!(get_or_throw::<i64>(&out, "dataRepresentationTemplateNumber").unwrap(), 42);
    assert_eq!(get_or_throw::<i64>(&out, "tablesVersion").unwrap(), 32);
    assert_eq!(
        get_or_throw::<Vec<f64>>(&out, "values").unwrap(),
        vec![273.15, 274.0]
    );
}

#[test]
fn test_destine_virtual_templates() {
    let enc = Grib2Encoder::new(recipe(json!({
        "local-use-section": {"template-number": 1001},
    })))
    .unwrap();
    let out = enc
        .encode(
            &request("ret,date=-1,levtype=sfc,param=167"),
            &OutDict::new(),
            &[],
        )
        .unwrap();
    assert_eq!(get_or_throw::<i64>(&out, "localDefinitionNumber").unwrap(), 1);
    assert_eq!(
        get_or_throw::<i64>(&out, "productionStatusOfProcessedData").unwrap(),
        12
    );
    assert_eq!(get_or_throw::<String>(&out, "dataset").unwrap(), "climate-dt");
}

#[test]
fn test_spectral_template() {
    let enc = Grib2Encoder::new(recipe(json!({
        "grid-definition-section": {"template-number": 50},
    })))
    .unwrap();
    let out = enc
        .encode(
            &request("ret,date=-1,levtype=sfc,param=167"),
            &OutDict::new(),
            &[],
        )
        .unwrap();
    assert_eq!(get_or_throw::<i64>(&out, "spectralType").unwrap(), 1);
    assert_eq!(get_or_throw::<i64>(&out, "J").unwrap(), 1);
    // section 5 still owns the final data representation...
    assert_eq!(
        get_or_throw::<i64>(&out, "dataRepresentationTemplateNumber").unwrap(),
        42
    );
}

#[test]
fn test_missing_section_is_config_error() {
    let cfg = json!({
        "indicator-section": {"template-number": 0},
    });
    assert!(matches!(
        EncoderConfig::from_json(&cfg),
        Err(MyError::Generic(_))
    ));
}

#[test]
fn test_custom_tables_version() {
    let enc = Grib2Encoder::new(recipe(json!({
        "identification-section": {"tables": {"type": "custom", "tables-version": 21}},
    })))
    .unwrap();
    let out = enc
        .encode(
            &request("ret,date=-1,levtype=sfc,param=167"),
            &OutDict::new(),
            &[],
        )
        .unwrap();
    assert_eq!(get_or_throw::<i64>(&out, "tablesVersion").unwrap(), 21);
}
