// SPDX-License-Identifier: Apache-2.0

#![warn(missing_docs)]

//! Binary meteorological messages: framed views over a byte source.
//!

mod decode;
mod splitter;

pub use decode::{GribMetadataDecoder, MarsKeySource, OdbMetadataDecoder};
pub use splitter::{FrameSource, OdbFrame, OdbSplitter, Span, Splitter};

use std::sync::Arc;

/// Wire formats the splitter recognizes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Format {
    /// GRIB edition 1.
    Grib1,
    /// GRIB edition 2.
    Grib2,
    /// BUFR.
    Bufr,
    /// ODB-2 frames.
    Odb,
}

/// A read-only view over one logical message.
///
/// The backing store is shared: a message cut out of a byte source holds a
/// reference-counted handle on that source, an owned buffer otherwise.
#[derive(Clone, Debug)]
pub struct Message {
    data: Arc<[u8]>,
    offset: usize,
    length: usize,
    format: Format,
}

impl Message {
    pub(crate) fn new(data: Arc<[u8]>, offset: usize, length: usize, format: Format) -> Self {
        Message {
            data,
            offset,
            length,
            format,
        }
    }

    /// An owned-buffer message.
    pub fn owned(bytes: Vec<u8>, format: Format) -> Self {
        let length = bytes.len();
        Message {
            data: bytes.into(),
            offset: 0,
            length,
            format,
        }
    }

    /// The message bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.data[self.offset..self.offset + self.length]
    }

    /// Offset of this message w/in its backing store.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Message length in bytes.
    pub fn length(&self) -> usize {
        self.length
    }

    /// The wire format tag.
    pub fn format(&self) -> Format {
        self.format
    }
}
