// SPDX-License-Identifier: Apache-2.0

//! Grammar-level behaviour of the request parser.
//!

mod grammar;
mod round_trip;
