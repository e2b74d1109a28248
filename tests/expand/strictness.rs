// SPDX-License-Identifier: Apache-2.0

//! Strict vs best-effort expansion.
//!

use super::driver;
use marskit::MyError;

fn parse_one(text: &str) -> marskit::MarsRequest {
    marskit::text::mars::requests(text).unwrap().remove(0)
}

#[test]
fn test_unknown_keyword() {
    let r = parse_one("ret,date=-1,frobnicate=1");
    assert!(matches!(
        driver(true).expand_one(&r),
        Err(MyError::User(_))
    ));
    // best-effort drops it w/ a diagnostic...
    let x = driver(false).expand_one(&r).unwrap();
    assert!(!x.has("frobnicate"));
}

#[test]
fn test_ambiguous_keyword_abbreviation() {
    // `level` prefixes both levtype and levelist...
    let r = parse_one("ret,date=-1,lev=sfc");
    assert!(driver(true).expand_one(&r).is_err());
    let x = driver(false).expand_one(&r).unwrap();
    // best-effort picked one of the candidates...
    assert!(x.has("levelist") || x.has("levtype"));
}

#[test]
fn test_unknown_enum_value() {
    let r = parse_one("ret,date=-1,class=zz");
    assert!(driver(true).expand_one(&r).is_err());
    let x = driver(false).expand_one(&r).unwrap();
    assert!(x.is("class", "zz"));
}

#[test]
fn test_multiple_values_for_scalar_keyword() {
    let r = parse_one("ret,date=-1,expver=1/2");
    assert!(matches!(
        driver(true).expand_one(&r),
        Err(MyError::User(_))
    ));
}

#[test]
fn test_duplicate_flatten_values() {
    let r = parse_one("ret,date=-1,levtype=sfc,param=167/167");
    assert!(matches!(
        driver(true).expand_one(&r),
        Err(MyError::User(_))
    ));
}

#[test]
fn test_bad_integer_names_keyword() {
    let r = parse_one("ret,date=-1,levtype=ml,levelist=abc");
    let e = driver(true).expand_one(&r).unwrap_err();
    assert!(e.to_string().contains("levelist"));
}

#[test]
fn test_only_rule_soundness() {
    // number is only valid for ensemble types; a surviving pair never
    // violates only/never...
    let r = parse_one("ret,date=-1,type=an,number=5");
    let x = driver(true).expand_one(&r).unwrap();
    assert!(!x.has("number"));

    let r = parse_one("ret,date=-1,type=pf,number=5");
    let x = driver(true).expand_one(&r).unwrap();
    assert!(x.is("number", "5"));
}

#[test]
fn test_frequency_only_for_wave_streams() {
    let r = parse_one("ret,date=-1,levtype=sfc,frequency=1/2");
    let x = driver(true).expand_one(&r).unwrap();
    assert!(!x.has("frequency"));

    let r = parse_one("ret,date=-1,stream=wave,levtype=sfc,param=swh,frequency=1/2");
    let x = driver(true).expand_one(&r).unwrap();
    assert_eq!(x.values("frequency", false).unwrap(), &["1", "2"]);
}
