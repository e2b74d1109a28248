// SPDX-License-Identifier: Apache-2.0

#![warn(missing_docs)]

//! Configuration parameters affecting the behaviour of this library.
//!

use dotenvy::var;
use std::sync::OnceLock;

#[derive(Debug)]
pub struct Config {
    strict: bool,
    apply_checks: bool,
}

static CONFIG: OnceLock<Config> = OnceLock::new();
/// This library configuration Singleton.
pub fn config() -> &'static Config {
    CONFIG.get_or_init(Config::default)
}

impl Default for Config {
    fn default() -> Self {
        let strict = var("MARS_STRICT")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);
        let apply_checks = var("MARS_APPLY_CHECKS")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(true);
        Self {
            strict,
            apply_checks,
        }
    }
}

impl Config {
    /// Whether expansion defaults to strict mode.
    pub fn strict(&self) -> bool {
        self.strict
    }

    /// Whether post-encode checks run by default.
    pub fn apply_checks(&self) -> bool {
        self.apply_checks
    }
}
