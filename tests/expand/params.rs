// SPDX-License-Identifier: Apache-2.0

//! Parameter resolution, incl. the context-dependent second pass.
//!

use super::expand;

#[test]
fn test_short_names() {
    let r = expand("ret,date=-1,levtype=sfc,param=2t/msl/10u");
    assert_eq!(r.values("param", false).unwrap(), &["167", "151", "165"]);
}

#[test]
fn test_numeric_and_dotted() {
    let r = expand("ret,date=-1,param=130.128/251.140/167");
    assert_eq!(
        r.values("param", false).unwrap(),
        &["130", "140251", "167"]
    );
}

#[test]
fn test_wave_cross_resolution() {
    // scenario: the wave stream selects the wave parameter table, so the
    // same short name lands on a different paramId...
    let r = expand(
        "ret,class=od,expver=1,stream=wave,date=-1,time=00,type=an,levtype=sfc,step=24,param=2dfd",
    );
    assert!(r.is("param", "140251"));
}

#[test]
fn test_case_insensitive_names() {
    let a = expand("ret,date=-1,levtype=sfc,param=2T");
    let b = expand("ret,date=-1,levtype=sfc,param=2t");
    assert_eq!(
        a.values("param", false).unwrap(),
        b.values("param", false).unwrap()
    );
}

#[test]
fn test_chem_constituents() {
    let r = expand("ret,date=-1,levtype=sfc,chem=co2/ch4/no2");
    assert_eq!(r.values("chem", false).unwrap(), &["3", "2", "5"]);
}

#[test]
fn test_unknown_param_strict() {
    let rs = marskit::text::mars::requests("ret,date=-1,param=nosuchfield").unwrap();
    assert!(super::driver(true).expand_one(&rs[0]).is_err());
    // non-strict keeps the spelling + warns...
    let r = super::driver(false).expand_one(&rs[0]).unwrap();
    assert!(r.is("param", "nosuchfield"));
}
