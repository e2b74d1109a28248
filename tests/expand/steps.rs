// SPDX-License-Identifier: Apache-2.0

//! Step expansion: unit normalization, ranges and `to`/`by` walks.
//!

use super::{driver, expand};

#[test]
fn test_scalar_normalization() {
    let r = expand("ret,date=-1,step=30m/1h/1h30m/120m");
    assert_eq!(
        r.values("step", false).unwrap(),
        &["30m", "1", "1h30m", "2"]
    );
}

#[test]
fn test_minute_walk_renders_mixed_units() {
    let r = expand("ret,date=-1,step=0m/to/1440m/by/10m");
    let vv = r.values("step", false).unwrap();
    assert_eq!(vv.len(), 145);
    assert_eq!(
        &vv[..8],
        &["0", "10m", "20m", "30m", "40m", "50m", "1", "1h10m"]
    );
    assert_eq!(vv[12], "2");
    assert_eq!(vv.last().unwrap(), "24");
}

#[test]
fn test_range_walk() {
    let r = expand("ret,date=-1,step=0-3/to/9-12/by/3h");
    assert_eq!(
        r.values("step", false).unwrap(),
        &["0-3", "3-6", "6-9", "9-12"]
    );
}

#[test]
fn test_range_walk_bounded_by_target_start() {
    let r = expand("ret,date=-1,step=0-3/to/0-12/by/3");
    assert_eq!(r.values("step", false).unwrap(), &["0-3"]);
}

#[test]
fn test_subhour_ranges() {
    let r = expand("ret,date=-1,step=0-30m/to/1h30m-2h/by/30m");
    assert_eq!(
        r.values("step", false).unwrap(),
        &["0-30m", "30m-1", "1-1h30m", "1h30m-2"]
    );
}

#[test]
fn test_reversed_range_rejected() {
    let rs = marskit::text::mars::requests("ret,date=-1,step=2-1").unwrap();
    assert!(driver(true).expand_one(&rs[0]).is_err());
}

#[test]
fn test_monotonic_walk() {
    let r = expand("ret,date=-1,step=0/to/240/by/12");
    let vv = r.values("step", false).unwrap();
    assert_eq!(vv.len(), 21);
    let hours: Vec<i64> = vv.iter().map(|s| s.parse().unwrap()).collect();
    assert_eq!(hours[0], 0);
    assert_eq!(*hours.last().unwrap(), 240);
    assert!(hours.windows(2).all(|w| w[1] - w[0] == 12));
}

#[test]
fn test_time_to_by() {
    let r = expand("ret,date=-1,time=0/to/18/by/6");
    assert_eq!(
        r.values("time", false).unwrap(),
        &["0000", "0600", "1200", "1800"]
    );
}
