// SPDX-License-Identifier: Apache-2.0

#![warn(missing_docs)]

//! MARS request-processing + GRIB2 message-encoding toolkit.
//!
//! The next paragraphs explain in more detail the elements of this project
//! as well as the rationale behind some of the decisions that shaped its
//! components.
//!
//! # Requests
//!
//! The kernel of this project is the MARS request, represented by
//! [`MarsRequest`]: a verb naming an archive operation plus an ordered list
//! of `keyword=value/value...` assertions. Parsing user-provided input is
//! done through [`MarsRequest::parse()`] (one request, expanded) or the raw
//! [`text::mars`] grammar entry points:
//! ```rust
//! use marskit::prelude::*;
//! use std::error::Error;
//!
//! # fn test() -> Result<(), Box<dyn Error>> {
//! let r = MarsRequest::parse("ret,date=-1,param=2t/msl,step=0/to/24/by/6", true)?;
//! assert!(r.is("class", "od")); // a default, inserted by expansion
//! # Ok(())
//! # }
//! ```
//! An `Ok` result implies a syntactically correct AND semantically expanded
//! request: aliases are resolved (`param=2t` becomes `param=167`), dates are
//! evaluated (`date=-1` is yesterday), `to`/`by` lists are walked, defaults
//! are inserted and the `only`/`never` cross-keyword rules have pruned
//! whatever they forbid.
//!
//! # Expansion
//!
//! Expansion is driven by a [`MarsExpansion`], which caches one [`Language`]
//! per verb. A `Language` owns one typed rule per keyword --the closed set
//! of keyword classes lives behind [`Type`]. Batch scripts rely on
//! *inheritance*: w/ `inherit` enabled each expanded request becomes the
//! defaults of the next one, the way MARS batch jobs have always worked.
//!
//! Flattening --the Cartesian product over the multi-valued keywords marked
//! `flatten`-- is exposed as a callback iteration:
//! ```rust
//! use marskit::prelude::*;
//! # use std::error::Error;
//! # fn test() -> Result<(), Box<dyn Error>> {
//! let mut x = MarsExpansion::new(false, true);
//! let r = x.expand_one(&MarsRequest::parse("ret,date=-2/to/-1", true)?)?;
//! let mut leaves = 0;
//! x.flatten(&r, &mut |_one| leaves += 1)?;
//! assert_eq!(leaves, r.count());
//! #     Ok(())
//! # }
//! ```
//!
//! # Messages
//!
//! Independently of the language front-end, the [`message`] module splits
//! concatenated binary messages (GRIB editions 1 + 2, BUFR, ODB) out of a
//! byte source and decodes their metadata into the same request shape,
//! normalized through the language so that every spelling of a parameter
//! collides onto its canonical paramId.
//!
//! # Encoding
//!
//! The [`grib2`] module turns an expanded request + numeric payload into a
//! GRIB2 key dictionary. The pipeline is organized as six sections x four
//! stages (`Allocate`, `Preset`, `Override`, `Runtime`) and driven by a
//! catalog of narrow *concepts* (`tables`, `longrange`,
//! `generatingProcess`, ...), each encoding a handful of related GRIB keys
//! for the variant a matcher selects. Recipes (§ [`EncoderConfig`]) choose
//! the template number + concept slots per section.
//!
//! # Third-party crates
//!
//! This project relies on few 3<sup>rd</sup> party crates. The most
//! important ones...
//!
//! 1. PEG
//!    * [`peg`](https://crates.io/crates/peg): provides a Rust macro that
//!      builds a recursive descent parser from a concise definition of the
//!      request grammar.
//!
//! 2. Date + Time:
//!    * [jiff](https://crates.io/crates/jiff): for civil-date arithmetic
//!      (`date=-1`, `to`/`by` stepping).
//!
//! 3. Case-insensitive strings:
//!    * [unicase](https://crates.io/crates/unicase): keyword + alias tables
//!      compare case-insensitively.
//!
//! 4. Declarative data:
//!    * [serde](https://crates.io/crates/serde) +
//!      [serde_json](https://crates.io/crates/serde_json): the language
//!      description, the parameter tables and the encoder recipes are all
//!      plain JSON documents.
//!
//! [`MarsRequest`]: crate::request::MarsRequest
//! [`MarsRequest::parse()`]: crate::request::MarsRequest::parse
//! [`MarsExpansion`]: crate::expand::MarsExpansion
//! [`Language`]: crate::language::Language
//! [`Type`]: crate::types::Type
//! [`EncoderConfig`]: crate::grib2::config::EncoderConfig
//!

pub mod capi;
mod config;
mod context;
pub mod environment;
mod error;
mod expand;
pub mod grib2;
mod language;
pub mod message;
mod request;
pub mod text;
mod types;
pub mod version;

pub use config::{Config, config};
pub use context::*;
pub use error::MyError;
pub use expand::MarsExpansion;
pub use language::Language;
pub use request::{MarsRequest, Parameter};
pub use types::{ExpandContext, Type};

pub mod prelude;
