// SPDX-License-Identifier: Apache-2.0

#![warn(missing_docs)]

//! Per-(section, template) initializers: the structural keys that make the
//! output carry the requested template.
//!

use crate::{
    MyError,
    grib2::{
        dict::{Dictionary, Value, set_or_throw},
        section,
    },
};

/// Run the initializer of one section for its configured template number.
pub fn initialize(
    sec: usize,
    template: i64,
    out: &mut dyn Dictionary,
) -> Result<(), MyError> {
    match sec {
        section::INDICATOR | section::IDENTIFICATION => Ok(()),
        section::LOCAL_USE => local_use(template, out),
        section::GRID_DEFINITION => grid_definition(template, out),
        section::PRODUCT_DEFINITION => {
            set_or_throw(out, "productDefinitionTemplateNumber", Value::Long(template))
        }
        section::DATA_REPRESENTATION => {
            set_or_throw(out, "dataRepresentationTemplateNumber", Value::Long(template))
        }
        _ => Err(MyError::Generic(
            format!("no initializer for section {sec}").into(),
        )),
    }
}

// Section 2. Template numbers 1001/1002 are virtual local definitions used
// by the DestinE encoders; they are not defined in the official tables.
fn local_use(template: i64, out: &mut dyn Dictionary) -> Result<(), MyError> {
    set_or_throw(out, "setLocalDefinition", Value::Long(1))?;
    set_or_throw(out, "localUsePresent", Value::Long(1))?;
    match template {
        1001 => {
            set_or_throw(out, "localDefinitionNumber", Value::Long(1))?;
            set_or_throw(out, "productionStatusOfProcessedData", Value::Long(12))?;
            set_or_throw(out, "dataset", Value::Str("climate-dt".into()))
        }
        1002 => {
            set_or_throw(out, "localDefinitionNumber", Value::Long(1))?;
            set_or_throw(out, "productionStatusOfProcessedData", Value::Long(12))?;
            set_or_throw(out, "dataset", Value::Str("extremes-dt".into()))
        }
        n => set_or_throw(out, "localDefinitionNumber", Value::Long(n)),
    }
}

// Section 3. Template 50 (spherical harmonics) needs the whole spectral
// scaffold; anything else just pins the template number.
fn grid_definition(template: i64, out: &mut dyn Dictionary) -> Result<(), MyError> {
    if template != 50 {
        return set_or_throw(out, "gridDefinitionTemplateNumber", Value::Long(template));
    }
    set_or_throw(out, "numberOfDataPoints", Value::Long(6))?;
    set_or_throw(out, "numberOfValues", Value::Long(6))?;
    set_or_throw(out, "bitsPerValue", Value::Long(16))?;
    set_or_throw(out, "typeOfFirstFixedSurface", Value::Long(105))?;
    set_or_throw(
        out,
        "values",
        Value::Doubles(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]),
    )?;
    set_or_throw(out, "scaleFactorOfFirstFixedSurface", Value::Long(0))?;
    set_or_throw(out, "scaledValueOfFirstFixedSurface", Value::Long(0))?;
    set_or_throw(out, "gridDefinitionTemplateNumber", Value::Long(50))?;
    set_or_throw(out, "J", Value::Long(1))?;
    set_or_throw(out, "K", Value::Long(1))?;
    set_or_throw(out, "M", Value::Long(1))?;
    set_or_throw(out, "spectralType", Value::Long(1))?;
    set_or_throw(out, "spectralMode", Value::Long(1))?;
    set_or_throw(out, "numberOfOctectsForNumberOfPoints", Value::Long(0))?;
    set_or_throw(out, "interpretationOfNumberOfPoints", Value::Long(0))?;
    set_or_throw(out, "dataRepresentationTemplateNumber", Value::Long(51))
}
