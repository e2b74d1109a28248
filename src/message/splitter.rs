// SPDX-License-Identifier: Apache-2.0

#![warn(missing_docs)]

//! Streaming recognition of concatenated GRIB1/GRIB2/BUFR/ODB messages.
//!
//! The splitter peeks the first few bytes of the remaining input to select a
//! format, reads the total length from the section-0 header, sanity-checks
//! the `7777` trailer and yields a zero-copy [`Message`] view. It never
//! rewinds; when the input is exhausted it yields `None` and the total bytes
//! consumed equal the total bytes supplied.
//!
//! ODB input is framed by an external reader (the frame layout belongs to
//! the ODB library); [`OdbSplitter`] only implements the grouping rule: one
//! logical message per run of consecutive frames sharing the same span.
//!

use crate::{MyError, message::{Format, Message}};
use std::{
    collections::{BTreeMap, BTreeSet},
    sync::Arc,
};
use tracing::debug;

const GRIB_MAGIC: &[u8; 4] = b"GRIB";
const BUFR_MAGIC: &[u8; 4] = b"BUFR";
const ODB_MAGIC: &[u8; 5] = &[0xff, 0xff, b'O', b'D', b'A'];
const TRAILER: &[u8; 4] = b"7777";

/// Splitter over an in-memory byte source for the length-framed formats.
pub struct Splitter {
    data: Arc<[u8]>,
    pos: usize,
}

impl Splitter {
    /// Wrap a byte source.
    pub fn new(data: impl Into<Arc<[u8]>>) -> Self {
        Splitter {
            data: data.into(),
            pos: 0,
        }
    }

    /// Read everything from `reader` and wrap it.
    pub fn from_reader(mut reader: impl std::io::Read) -> Result<Self, MyError> {
        let mut buf = vec![];
        reader.read_to_end(&mut buf)?;
        Ok(Splitter::new(buf))
    }

    /// Bytes consumed so far.
    pub fn consumed(&self) -> usize {
        self.pos
    }

    /// The next framed message, or `None` once the input is exhausted.
    pub fn next(&mut self) -> Result<Option<Message>, MyError> {
        let rest = &self.data[self.pos..];
        if rest.is_empty() {
            return Ok(None);
        }

        if rest.starts_with(GRIB_MAGIC) {
            return self.next_grib().map(Some);
        }
        if rest.starts_with(BUFR_MAGIC) {
            return self.next_framed(Format::Bufr).map(Some);
        }
        if rest.starts_with(ODB_MAGIC) {
            return Err(MyError::Generic(
                "ODB content must go through an OdbSplitter".into(),
            ));
        }
        Err(MyError::Generic(
            format!("unrecognized message at offset {}", self.pos).into(),
        ))
    }

    // GRIB1 keeps the total length in 3 bytes at offset 4; GRIB2 in 8 bytes
    // at offset 8. The edition number sits at offset 7 in both.
    fn next_grib(&mut self) -> Result<Message, MyError> {
        let rest = &self.data[self.pos..];
        if rest.len() < 16 {
            return Err(truncated(self.pos));
        }
        let (length, format) = match rest[7] {
            1 => (be_u64(&rest[4..7]), Format::Grib1),
            2 => (be_u64(&rest[8..16]), Format::Grib2),
            e => {
                return Err(MyError::Generic(
                    format!("unsupported GRIB edition {e} at offset {}", self.pos).into(),
                ));
            }
        };
        self.take(length as usize, format)
    }

    // BUFR: 3-byte total length at offset 4.
    fn next_framed(&mut self, format: Format) -> Result<Message, MyError> {
        let rest = &self.data[self.pos..];
        if rest.len() < 8 {
            return Err(truncated(self.pos));
        }
        let length = be_u64(&rest[4..7]);
        self.take(length as usize, format)
    }

    fn take(&mut self, length: usize, format: Format) -> Result<Message, MyError> {
        let rest = &self.data[self.pos..];
        if length < 8 || length > rest.len() {
            return Err(truncated(self.pos));
        }
        if &rest[length - 4..length] != TRAILER {
            return Err(MyError::Generic(
                format!("missing 7777 trailer at offset {}", self.pos + length - 4).into(),
            ));
        }
        let m = Message::new(Arc::clone(&self.data), self.pos, length, format);
        debug!("{format:?} message, {length} bytes at offset {}", self.pos);
        self.pos += length;
        Ok(m)
    }
}

fn truncated(at: usize) -> MyError {
    MyError::Generic(format!("truncated message at offset {at}").into())
}

fn be_u64(bytes: &[u8]) -> u64 {
    bytes.iter().fold(0u64, |acc, &b| (acc << 8) | b as u64)
}

/// The metadata projection of one ODB frame over the fixed MARS column set.
pub type Span = BTreeMap<String, BTreeSet<String>>;

/// One frame handed over by the external ODB reader.
#[derive(Clone, Debug)]
pub struct OdbFrame {
    /// The encoded frame bytes.
    pub bytes: Vec<u8>,
    /// The frame's span.
    pub span: Span,
}

/// The external ODB frame reader interface. Frame boundaries and column
/// decoding belong to the ODB library behind this trait.
pub trait FrameSource {
    /// The next frame, or `None` at end of input.
    fn next_frame(&mut self) -> Result<Option<OdbFrame>, MyError>;
}

/// Groups consecutive ODB frames w/ identical spans into logical messages.
pub struct OdbSplitter<S: FrameSource> {
    source: S,
    pending: Option<OdbFrame>,
    eof: bool,
}

impl<S: FrameSource> OdbSplitter<S> {
    /// Wrap a frame source.
    pub fn new(source: S) -> Self {
        OdbSplitter {
            source,
            pending: None,
            eof: false,
        }
    }

    /// The next logical message + its span, or `None` once exhausted.
    pub fn next(&mut self) -> Result<Option<(Message, Span)>, MyError> {
        if self.eof && self.pending.is_none() {
            return Ok(None);
        }

        let first = match self.pending.take() {
            Some(f) => f,
            None => match self.source.next_frame()? {
                Some(f) => f,
                None => {
                    self.eof = true;
                    return Ok(None);
                }
            },
        };

        let span = first.span.clone();
        let mut buffer = first.bytes;
        loop {
            match self.source.next_frame()? {
                Some(f) if f.span == span => buffer.extend_from_slice(&f.bytes),
                Some(f) => {
                    // span changed: the next run starts here.
                    self.pending = Some(f);
                    break;
                }
                None => {
                    self.eof = true;
                    break;
                }
            }
        }
        Ok(Some((Message::owned(buffer, Format::Odb), span)))
    }
}
