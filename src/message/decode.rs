// SPDX-License-Identifier: Apache-2.0

#![warn(missing_docs)]

//! Per-format metadata decoders.
//!
//! Decoders turn a message into a key/value property bag shaped as a
//! [`MarsRequest`], then push every value through the MARS language so that
//! spellings collide onto canonicals --`param=2t` and `param=167` both come
//! out as `param=167`.
//!
//! Key enumeration itself belongs to the format libraries (the GRIB code
//! library, the ODB reader); they sit behind [`MarsKeySource`] and the
//! splitter's frame reader.
//!

use crate::{
    MyError,
    language::Language,
    message::splitter::Span,
    request::MarsRequest,
    types::ExpandContext,
};
use tracing::debug;

/// The external GRIB-library interface: enumerate the `mars` namespace of
/// one message as key/value pairs.
pub trait MarsKeySource {
    /// The `mars` namespace keys of the underlying message.
    fn mars_keys(&self) -> Result<Vec<(String, String)>, MyError>;
}

/// Decodes GRIB message metadata into a normalized request.
pub struct GribMetadataDecoder {
    language: Language,
    ctx: ExpandContext,
}

impl GribMetadataDecoder {
    /// A decoder normalizing through the `retrieve` language.
    pub fn new() -> Result<Self, MyError> {
        Ok(GribMetadataDecoder {
            language: Language::new("retrieve")?,
            ctx: ExpandContext::new(),
        })
    }

    /// Extract + normalize the metadata of one message.
    pub fn decode(&self, source: &dyn MarsKeySource) -> Result<MarsRequest, MyError> {
        let mut r = MarsRequest::new("retrieve");
        for (key, value) in source.mars_keys()? {
            let key = key.to_ascii_lowercase();
            let tidied = self.language.tidy(&self.ctx, &key, &value);
            if tidied != value {
                debug!("normalized {key}: '{value}' -> '{tidied}'");
            }
            r.set_values(&key, vec![tidied]);
        }
        Ok(r)
    }
}

/// Decodes the column span of one ODB logical message into a normalized
/// request.
pub struct OdbMetadataDecoder {
    language: Language,
    ctx: ExpandContext,
}

impl OdbMetadataDecoder {
    /// A decoder normalizing through the `retrieve` language.
    pub fn new() -> Result<Self, MyError> {
        Ok(OdbMetadataDecoder {
            language: Language::new("retrieve")?,
            ctx: ExpandContext::new(),
        })
    }

    /// Convert a frame span (`columnName -> set<value>`) into a request.
    /// Column names carry their ODB table suffix (`class@desc`), which is
    /// stripped.
    pub fn decode(&self, span: &Span) -> Result<MarsRequest, MyError> {
        let mut r = MarsRequest::new("retrieve");
        for (column, values) in span {
            let key = column
                .split('@')
                .next()
                .unwrap_or(column)
                .to_ascii_lowercase();
            let vv: Vec<String> = values
                .iter()
                .map(|v| self.language.tidy(&self.ctx, &key, v))
                .collect();
            if vv.is_empty() {
                continue;
            }
            r.set_values(&key, vv);
        }
        Ok(r)
    }
}
