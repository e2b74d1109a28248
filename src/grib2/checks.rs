// SPDX-License-Identifier: Apache-2.0

#![warn(missing_docs)]

//! Post-encode validators, gated by the `applyChecks` option.
//!

use crate::{
    MyError,
    grib2::{
        config::EncoderConfig,
        dict::{Dictionary, get_opt, get_or_throw},
        section,
    },
};
use tracing::debug;

// checks run only when asked for AND the back-end can be read back.
fn enabled(opt: &dyn Dictionary, out: &dyn Dictionary) -> bool {
    out.supports_checks() && get_opt::<bool>(opt, "applyChecks").unwrap_or(false)
}

/// Run every configured check against the encoded output.
pub fn run(
    cfg: &EncoderConfig,
    opt: &dyn Dictionary,
    out: &dyn Dictionary,
) -> Result<(), MyError> {
    if !enabled(opt, out) {
        return Ok(());
    }
    check_local_use_section(out)?;
    check_template_numbers(cfg, out)?;
    debug!("all post-encode checks passed");
    Ok(())
}

// the Local Use Section must exist once section 2 was configured.
fn check_local_use_section(out: &dyn Dictionary) -> Result<(), MyError> {
    let present = get_or_throw::<i64>(out, "localUsePresent").map_err(|e| {
        MyError::Validation {
            check: "local-use-section",
            reason: e.to_string().into(),
        }
    })?;
    if present == 0 {
        return Err(MyError::Validation {
            check: "local-use-section",
            reason: "Local Use Section not present in the sample".into(),
        });
    }
    Ok(())
}

// configured template numbers must match what the initializers applied.
fn check_template_numbers(cfg: &EncoderConfig, out: &dyn Dictionary) -> Result<(), MyError> {
    let probes: [(usize, &str); 3] = [
        (section::GRID_DEFINITION, "gridDefinitionTemplateNumber"),
        (section::PRODUCT_DEFINITION, "productDefinitionTemplateNumber"),
        (section::DATA_REPRESENTATION, "dataRepresentationTemplateNumber"),
    ];
    for (sec, key) in probes {
        let Some(applied) = get_opt::<i64>(out, key) else {
            continue;
        };
        let configured = cfg.sections[sec].template_number;
        if applied != configured {
            return Err(MyError::Validation {
                check: "template-number",
                reason: format!(
                    "section {sec} applied template {applied}, configured {configured}"
                )
                .into(),
            });
        }
    }
    Ok(())
}
