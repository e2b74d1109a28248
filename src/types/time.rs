// SPDX-License-Identifier: Apache-2.0

#![warn(missing_docs)]

//! Time-of-day keywords.
//!
//! Accepted forms: `H`, `HH`, `HHmm`, `HHMM` and the suffixed `XhYm`
//! (`1h30m`, `90m`). Canonical output is always the 4-digit `HHMM` form, so
//! `12` prints as `1200` and `0` as `0000`.
//!

use crate::{
    MyError,
    types::toby::{self, ToByDomain, hm_minutes},
};
use serde_json::Value;

/// Time keyword payload.
#[derive(Clone, Debug)]
pub(crate) struct TypeTime {
    by: i64,
}

impl TypeTime {
    pub(crate) fn new(settings: &Value) -> Result<Self, MyError> {
        let by = match settings.get("by") {
            None | Some(Value::Null) => 60,
            Some(v) => {
                let s = match v {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                parse_minutes(&s)
                    .ok_or_else(|| MyError::Generic(format!("bad time 'by': {s}").into()))?
            }
        };
        Ok(TypeTime { by })
    }

    pub(crate) fn expand_one(&self, value: &str) -> Result<String, MyError> {
        let d = TimeDomain { by: self.by };
        Ok(d.render(d.parse(value)?))
    }

    pub(crate) fn expand_list(&self, values: &[String]) -> Result<Vec<String>, MyError> {
        toby::expand_list(&TimeDomain { by: self.by }, values)
    }
}

// minutes since midnight from any accepted form.
fn parse_minutes(s: &str) -> Option<i64> {
    let s = s.trim();
    if !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()) {
        return match s.len() {
            1 | 2 => {
                let h: i64 = s.parse().ok()?;
                (h < 24).then_some(h * 60)
            }
            3 | 4 => {
                let (hh, mm) = s.split_at(s.len() - 2);
                let h: i64 = hh.parse().ok()?;
                let m: i64 = mm.parse().ok()?;
                (h < 24 && m < 60).then_some(h * 60 + m)
            }
            _ => None,
        };
    }
    let m = hm_minutes(s)?;
    (m < 24 * 60).then_some(m)
}

struct TimeDomain {
    by: i64,
}

impl ToByDomain for TimeDomain {
    type V = i64;

    fn parse(&self, s: &str) -> Result<i64, MyError> {
        parse_minutes(s)
            .ok_or_else(|| MyError::User(format!("'{s}' is not a valid time").into()))
    }

    fn render(&self, v: i64) -> String {
        format!("{:02}{:02}", v / 60, v % 60)
    }

    fn step(&self, s: &str) -> Result<i64, MyError> {
        self.parse(s)
    }

    fn default_by(&self) -> i64 {
        self.by
    }

    fn le(&self, a: i64, b: i64) -> bool {
        a <= b
    }

    fn advance(&self, v: i64, by: i64) -> Option<i64> {
        let next = v + by;
        (next < 24 * 60).then_some(next)
    }
}
