// SPDX-License-Identifier: Apache-2.0

//! Date ranges + the day-of-month filter scenario.
//!

use super::{driver, expand};

#[test]
fn test_date_range() {
    let r = expand("ret,date=20250301/to/20250306");
    assert_eq!(
        r.values("date", false).unwrap(),
        &[
            "20250301", "20250302", "20250303", "20250304", "20250305", "20250306"
        ]
    );
}

#[test]
fn test_date_range_with_by() {
    let r = expand("ret,date=-5/to/-1/by/2");
    assert_eq!(
        r.values("date", false).unwrap(),
        &["20250310", "20250312", "20250314"]
    );
}

#[test]
fn test_filter_request_by_day() {
    let mut r = expand("ret,date=20250301/to/20250306");
    let f = expand("filter,day=1/3/5");

    assert!(r.filter(&f));
    assert_eq!(
        r.values("date", false).unwrap(),
        &["20250301", "20250303", "20250305"]
    );
    // all other expanded defaults unchanged...
    assert!(r.is("class", "od"));
    assert!(r.is("expver", "0001"));
    assert!(r.is("param", "129"));
    assert!(r.is("time", "1200"));
}

#[test]
fn test_filter_day_to_by() {
    let f = expand("filter,day=1/to/31/by/2");
    assert_eq!(f.count_values("day"), 16);

    let mut r = expand("ret,date=20250301/to/20250310");
    assert!(r.filter(&f));
    assert_eq!(
        r.values("date", false).unwrap(),
        &["20250301", "20250303", "20250305", "20250307", "20250309"]
    );
}

#[test]
fn test_reversed_date_range_is_user_error() {
    let rs = marskit::text::mars::requests("ret,date=-1/to/-5").unwrap();
    let e = driver(true).expand_one(&rs[0]).unwrap_err();
    assert!(matches!(e, marskit::MyError::User(_)));
}

#[test]
fn test_named_dates() {
    let r = expand("ret,date=yesterday");
    assert_eq!(r.values("date", false).unwrap(), &["20250314"]);
    let r = expand("ret,date=today");
    assert_eq!(r.values("date", false).unwrap(), &["20250315"]);
}

#[test]
fn test_iso_dates() {
    let r = expand("ret,date=2025-03-01/2025-03-04");
    assert_eq!(r.values("date", false).unwrap(), &["20250301", "20250304"]);
}

#[test]
fn test_day_out_of_range() {
    let rs = marskit::text::mars::requests("filter,day=0").unwrap();
    assert!(driver(true).expand_one(&rs[0]).is_err());
    let rs = marskit::text::mars::requests("filter,day=32").unwrap();
    assert!(driver(true).expand_one(&rs[0]).is_err());
    let rs = marskit::text::mars::requests("filter,day=1/to/48").unwrap();
    assert!(driver(true).expand_one(&rs[0]).is_err());
}
