// SPDX-License-Identifier: Apache-2.0

//! Accepted + rejected inputs of the request grammar.
//!

use marskit::text::mars;

#[test]
fn test_minimal() {
    let r = mars::request("retrieve").expect("a bare verb is a request");
    assert_eq!(r.verb(), "retrieve");
    assert!(r.is_empty());
}

#[test]
fn test_terminator_dot() {
    let rs = mars::requests("end .").expect("parse failed");
    assert_eq!(rs.len(), 1);
    assert_eq!(rs[0].verb(), "end");
}

#[test]
fn test_idchar_set() {
    let r = mars::request("archive,target=mars:od.oper_2025-03@ecmwf").unwrap();
    assert_eq!(
        r.values("target", false).unwrap(),
        &["mars:od.oper_2025-03@ecmwf"]
    );
}

#[test]
fn test_whitespace_everywhere() {
    let r = mars::request("  ret ,\n\tdate = -1 ,\n param = 129 / 130 \n").unwrap();
    assert_eq!(r.values("param", false).unwrap(), &["129", "130"]);
}

#[test]
fn test_comments_between_tokens() {
    const TEXT: &str = "ret,# step\n  date=-1,\n# another comment\nparam=129\n";
    let r = mars::request(TEXT).unwrap();
    assert!(r.has("date"));
    assert!(r.has("param"));
}

#[test]
fn test_escapes() {
    let r = mars::request(r#"archive,target="a\"b\\c\/d\te""#).unwrap();
    assert_eq!(r.values("target", false).unwrap(), &["a\"b\\c/d\te"]);
}

#[test]
fn test_unicode_escape_rejected_with_line() {
    let e = mars::requests("ret,date=-1\narchive,target=\"\\u0058\"").unwrap_err();
    assert_eq!(e.location.line, 2);
}

#[test]
fn test_rejects() {
    assert!(mars::requests("ret,=1").is_err());
    assert!(mars::requests("ret,key=").is_err());
    assert!(mars::requests("ret,key==x").is_err());
    assert!(mars::requests("1ret,key=x").is_err());
    assert!(mars::requests("ret,key=a//b").is_err());
}

#[test]
fn test_multi_request_file() {
    const TEXT: &str = "
# daily batch
retrieve,date=-1,param=129
retrieve,date=-1,param=130
archive,source=x,database=marsod
end
";
    let rs = mars::requests(TEXT).unwrap();
    assert_eq!(rs.len(), 4);
    assert_eq!(rs[3].verb(), "end");
}
