// SPDX-License-Identifier: Apache-2.0

#![warn(missing_docs)]

//! Version reporting.
//!

/// The crate semver string.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// The VCS revision the crate was built from, when the build exported it.
pub fn vcs_version() -> &'static str {
    option_env!("MARSKIT_VCS_REVISION").unwrap_or("unknown")
}
