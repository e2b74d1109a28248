// SPDX-License-Identifier: Apache-2.0

//! Splitter completeness: every well-framed concatenation comes back out,
//! in order, w/ nothing left over.
//!

use super::{fake_bufr, fake_grib1, fake_grib2};
use marskit::message::{Format, Splitter};

#[test]
fn test_two_identical_grib_messages() {
    let one = fake_grib2(128, 0x5a);
    let mut data = one.clone();
    data.extend_from_slice(&one);

    let mut s = Splitter::new(data);
    let m1 = s.next().unwrap().expect("first message");
    let m2 = s.next().unwrap().expect("second message");
    assert!(s.next().unwrap().is_none());

    assert_eq!(m1.length(), one.len());
    assert_eq!(m2.length(), one.len());
    assert_eq!(m1.bytes(), &one[..]);
    assert_eq!(m1.bytes(), m2.bytes());
    assert_eq!(m1.offset(), 0);
    assert_eq!(m2.offset(), one.len());
}

#[test]
fn test_bytes_consumed_equal_bytes_supplied() {
    let mut data = vec![];
    let sizes = [48usize, 64, 20, 256, 32];
    for (i, n) in sizes.iter().enumerate() {
        data.extend_from_slice(&fake_grib2(*n, i as u8));
    }
    let total = data.len();

    let mut s = Splitter::new(data);
    let mut seen = 0;
    let mut lengths = vec![];
    while let Some(m) = s.next().unwrap() {
        seen += m.length();
        lengths.push(m.length());
    }
    assert_eq!(lengths, sizes.to_vec());
    assert_eq!(seen, total);
    assert_eq!(s.consumed(), total);
}

#[test]
fn test_format_tags() {
    let mut data = fake_grib1(40);
    data.extend_from_slice(&fake_grib2(40, 9));
    data.extend_from_slice(&fake_bufr(24));

    let mut s = Splitter::new(data);
    assert_eq!(s.next().unwrap().unwrap().format(), Format::Grib1);
    assert_eq!(s.next().unwrap().unwrap().format(), Format::Grib2);
    assert_eq!(s.next().unwrap().unwrap().format(), Format::Bufr);
    assert!(s.next().unwrap().is_none());
}

#[test]
fn test_truncated_tail_is_an_error() {
    let mut data = fake_grib2(64, 1);
    data.extend_from_slice(&fake_grib2(64, 2)[..32]);

    let mut s = Splitter::new(data);
    assert!(s.next().unwrap().is_some());
    assert!(s.next().is_err());
}

#[test]
fn test_exhausted_splitter_stays_exhausted() {
    let mut s = Splitter::new(fake_grib2(32, 0));
    assert!(s.next().unwrap().is_some());
    assert!(s.next().unwrap().is_none());
    assert!(s.next().unwrap().is_none());
}
