// SPDX-License-Identifier: Apache-2.0

//! The opaque-handle C ABI, driven the way a C client would.
//!

mod round_trip;
