// SPDX-License-Identifier: Apache-2.0

//! Metadata decoding: the normalization hop through the language, plus the
//! ODB span-grouping scenario.
//!

use marskit::MyError;
use marskit::message::{
    FrameSource, GribMetadataDecoder, MarsKeySource, OdbFrame, OdbMetadataDecoder, OdbSplitter,
    Span,
};
use std::collections::BTreeSet;

struct StubKeys(Vec<(&'static str, &'static str)>);

impl MarsKeySource for StubKeys {
    fn mars_keys(&self) -> Result<Vec<(String, String)>, MyError> {
        Ok(self
            .0
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect())
    }
}

#[test]
fn test_grib_keys_normalize() {
    let d = GribMetadataDecoder::new().unwrap();
    let r = d
        .decode(&StubKeys(vec![
            ("class", "od"),
            ("expver", "1"),
            ("param", "2t"),
            ("time", "12"),
        ]))
        .unwrap();
    assert!(r.is("class", "od"));
    assert!(r.is("expver", "0001"));
    assert!(r.is("param", "167"));
    assert!(r.is("time", "1200"));
}

#[test]
fn test_param_spellings_collide() {
    let d = GribMetadataDecoder::new().unwrap();
    let by_name = d.decode(&StubKeys(vec![("param", "2t")])).unwrap();
    let by_id = d.decode(&StubKeys(vec![("param", "167")])).unwrap();
    let dotted = d.decode(&StubKeys(vec![("param", "167.128")])).unwrap();
    assert_eq!(
        by_name.values("param", false).unwrap(),
        by_id.values("param", false).unwrap()
    );
    assert_eq!(
        by_name.values("param", false).unwrap(),
        dotted.values("param", false).unwrap()
    );
}

struct Frames(Vec<OdbFrame>);

impl FrameSource for Frames {
    fn next_frame(&mut self) -> Result<Option<OdbFrame>, MyError> {
        if self.0.is_empty() {
            Ok(None)
        } else {
            Ok(Some(self.0.remove(0)))
        }
    }
}

fn frame(bytes: &[u8], class: &str, expver: &str) -> OdbFrame {
    let mut span = Span::new();
    span.insert("class@desc".into(), BTreeSet::from([class.to_string()]));
    span.insert("expver@desc".into(), BTreeSet::from([expver.to_string()]));
    OdbFrame {
        bytes: bytes.to_vec(),
        span,
    }
}

#[test]
fn test_odb_two_spans_two_messages() {
    // scenario: two distinct spans produce two messages, boundary at the
    // span change...
    let mut s = OdbSplitter::new(Frames(vec![
        frame(b"111", "od", "1"),
        frame(b"222", "od", "1"),
        frame(b"333", "rd", "1"),
    ]));

    let (m1, span1) = s.next().unwrap().expect("first logical message");
    assert_eq!(m1.bytes(), b"111222");
    let (m2, span2) = s.next().unwrap().expect("second logical message");
    assert_eq!(m2.bytes(), b"333");
    assert!(s.next().unwrap().is_none());

    let d = OdbMetadataDecoder::new().unwrap();
    let r1 = d.decode(&span1).unwrap();
    assert!(r1.is("class", "od"));
    assert!(r1.is("expver", "0001"));
    let r2 = d.decode(&span2).unwrap();
    assert!(r2.is("class", "rd"));
}
