// SPDX-License-Identifier: Apache-2.0

#![warn(missing_docs)]

//! PEG parser rules and actions for the MARS request language.
//!
//! The grammar recognizes the classic comma-separated form
//!
//! ```text
//! verb,key=value[/value...],key=value...[.]
//! ```
//!
//! Being a PEG parser means the following limits/constraints/directives
//! should be observed when writing and ordering rules...
//!
//! * put the longest or most specific choice first, and the shortest or most
//!   general choice last,
//! * once a rule parses successfully it has consumed its characters for good;
//!   the next rule only ever sees what was left over.
//!
//! Comments are introduced by `#` and run to the end of the line. Both single
//! and double quoted strings are accepted w/ JSON-style escapes; `\uXXXX` is
//! deliberately rejected --the diagnostic carries the offending line + column.
//!

use crate::request::MarsRequest;

peg::parser! {
    // MARS request grammar.
    pub grammar mars() for str {
        rule ws() = [' ' | '\t' | '\r' | '\n' | '\u{0B}' | '\u{0C}']

        rule comment() = "#" (!['\n'] [_])*

        rule _ = quiet! { (ws() / comment())* }

        rule idchar() = ['a'..='z' | 'A'..='Z' | '0'..='9' | '_' | ':' | '-' | '.' | '@']

        rule ident() -> String = s:$(idchar()+) { s.to_string() }

        // a verb must lead w/ a letter (or underscore)...
        rule verb() -> String
        = s:$(['a'..='z' | 'A'..='Z' | '_'] idchar()*) { s.to_ascii_lowercase() }

        rule escape() -> char
        = "\"" { '"' }
        / "'" { '\'' }
        / "\\" { '\\' }
        / "/" { '/' }
        / "b" { '\u{08}' }
        / "f" { '\u{0C}' }
        / "n" { '\n' }
        / "r" { '\r' }
        / "t" { '\t' }
        / "u" {? Err("no \\uXXXX escapes") }

        rule dq_char() -> char
        = "\\" c:escape() { c }
        / c:[^ '"' | '\\'] { c }

        rule sq_char() -> char
        = "\\" c:escape() { c }
        / c:[^ '\'' | '\\'] { c }

        rule quoted() -> String
        = "\"" cs:dq_char()* "\"" { cs.into_iter().collect() }
        / "'" cs:sq_char()* "'" { cs.into_iter().collect() }

        rule value() -> String = quoted() / ident()

        rule values() -> Vec<String> = v:(value() ++ (_ "/" _)) { v }

        rule param() -> (String, Vec<String>)
        = k:ident() _ "=" _ v:values() { (k.to_ascii_lowercase(), v) }

        // a single request; a trailing `.` terminator is tolerated.
        pub rule request() -> MarsRequest
        = _ v:verb() ps:(_ "," _ p:param() { p })* _ ("." _)? {
            let mut r = MarsRequest::new(&v);
            for (k, vals) in ps {
                r.set_values(&k, vals);
            }
            r
        }

        // a whole file of requests.
        pub rule requests() -> Vec<MarsRequest>
        = rs:request()* _ ![_] { rs }
    }
}
