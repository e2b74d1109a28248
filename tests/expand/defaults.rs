// SPDX-License-Identifier: Apache-2.0

//! Scenario: date arithmetic + default insertion.
//!
//! `ret,date=-1` on a fixed wall clock must come back w/ yesterday's date
//! and the full set of operational defaults.
//!

use super::{driver, expand};

#[test]
fn test_date_minus_one_and_defaults() {
    let r = expand("ret,date=-1");

    assert_eq!(r.verb(), "retrieve");
    assert_eq!(r.values("date", false).unwrap(), &["20250314"]);
    assert!(r.is("class", "od"));
    assert!(r.is("expver", "0001"));
    assert!(r.is("stream", "oper"));
    assert!(r.is("type", "an"));
    assert!(r.is("domain", "g"));
    assert!(r.is("levtype", "pl"));
    assert_eq!(
        r.values("levelist", false).unwrap(),
        &["1000", "850", "700", "500", "400", "300"]
    );
    assert!(r.is("param", "129"));
    assert!(r.is("time", "1200"));
    assert!(r.is("step", "0"));
}

#[test]
fn test_bare_request_defaults_to_today() {
    let r = expand("ret");
    assert_eq!(r.values("date", false).unwrap(), &["20250315"]);
}

#[test]
fn test_explicit_values_beat_defaults() {
    let r = expand("ret,class=rd,expver=abcd,time=06");
    assert!(r.is("class", "rd"));
    assert!(r.is("expver", "abcd"));
    assert!(r.is("time", "0600"));
}

#[test]
fn test_expansion_idempotence() {
    let once = expand("ret,date=-1,param=2t/msl,levtype=sfc,step=0/to/24/by/6");
    let twice = driver(true).expand_one(&once).unwrap();
    assert_eq!(once, twice);
}

#[test]
fn test_levelist_dropped_for_surface() {
    let r = expand("ret,date=-1,levtype=sfc");
    assert!(!r.has("levelist"));
}

#[test]
fn test_verb_abbreviations() {
    for (short, full) in [
        ("ret", "retrieve"),
        ("retr", "retrieve"),
        ("arch", "archive"),
        ("li", "list"),
        ("dis", "disseminate"),
    ] {
        let rs = marskit::text::mars::requests(&format!("{short},date=20250314")).unwrap();
        let r = driver(true).expand_one(&rs[0]).unwrap();
        assert_eq!(r.verb(), full, "'{short}' should expand to '{full}'");
    }
}

#[test]
fn test_off_removes_keyword() {
    let r = expand("ret,date=-1,grid=off");
    assert!(!r.has("grid"));
}

#[test]
fn test_grid_uppercases() {
    let r = expand("ret,date=-1,grid=f320");
    assert!(r.is("grid", "F320"));
    let r = expand("ret,date=-1,grid=o640");
    assert!(r.is("grid", "O640"));
}

#[test]
fn test_inheritance() {
    let mut x = super::MarsExpansion::with_context(
        true,
        true,
        marskit::ExpandContext::fixed(super::fixed_today()),
    );
    let rs = marskit::text::mars::requests(
        "ret,date=-2,levtype=ml,levelist=1/to/5\nret,param=130\nret,levelist=off",
    )
    .unwrap();
    let rr = x.expand(&rs).unwrap();

    // second request inherits everything it did not say...
    assert_eq!(rr[1].values("date", false).unwrap(), &["20250313"]);
    assert!(rr[1].is("levtype", "ml"));
    assert_eq!(rr[1].values("levelist", false).unwrap(), &["1", "2", "3", "4", "5"]);
    assert!(rr[1].is("param", "130"));

    // `off` drops an inherited keyword...
    assert!(!rr[2].has("levelist"));
    x.reset();
}
