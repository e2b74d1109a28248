// SPDX-License-Identifier: Apache-2.0

#![warn(missing_docs)]

//! Integer keywords w/ an optional inclusive `[lo, hi]` range and `to`/`by`
//! list support.
//!

use crate::{
    MyError,
    types::toby::{self, ToByDomain},
};
use serde_json::Value;

/// Integer keyword payload.
#[derive(Clone, Debug)]
pub(crate) struct TypeInteger {
    range: Option<(i64, i64)>,
    by: i64,
}

impl TypeInteger {
    pub(crate) fn new(settings: &Value) -> Result<Self, MyError> {
        let range = match settings.get("range") {
            None | Some(Value::Null) => None,
            Some(Value::Array(a)) if a.len() == 2 => {
                let lo = a[0]
                    .as_i64()
                    .ok_or_else(|| MyError::Generic("range bounds must be integers".into()))?;
                let hi = a[1]
                    .as_i64()
                    .ok_or_else(|| MyError::Generic("range bounds must be integers".into()))?;
                Some((lo, hi))
            }
            _ => {
                return Err(MyError::Generic("range must be a [lo, hi] pair".into()));
            }
        };
        Ok(TypeInteger {
            range,
            by: settings.get("by").and_then(Value::as_i64).unwrap_or(1),
        })
    }

    pub(crate) fn expand_one(&self, name: &str, value: &str) -> Result<String, MyError> {
        let n = self.domain(name).parse(value)?;
        Ok(n.to_string())
    }

    pub(crate) fn expand_list(
        &self,
        name: &str,
        values: &[String],
    ) -> Result<Vec<String>, MyError> {
        toby::expand_list(&self.domain(name), values)
    }

    fn domain<'a>(&'a self, name: &'a str) -> IntDomain<'a> {
        IntDomain {
            name,
            range: self.range,
            by: self.by,
        }
    }
}

struct IntDomain<'a> {
    name: &'a str,
    range: Option<(i64, i64)>,
    by: i64,
}

impl ToByDomain for IntDomain<'_> {
    type V = i64;

    fn parse(&self, s: &str) -> Result<i64, MyError> {
        let n: i64 = s.trim().parse().map_err(|_| {
            MyError::User(format!("'{s}' is not a valid integer for '{}'", self.name).into())
        })?;
        if let Some((lo, hi)) = self.range
            && !(lo..=hi).contains(&n)
        {
            return Err(MyError::User(
                format!("'{n}' is out of range [{lo}, {hi}] for '{}'", self.name).into(),
            ));
        }
        Ok(n)
    }

    fn render(&self, v: i64) -> String {
        v.to_string()
    }

    fn step(&self, s: &str) -> Result<i64, MyError> {
        s.trim().parse().map_err(|_| {
            MyError::User(format!("'{s}' is not a valid step for '{}'", self.name).into())
        })
    }

    fn default_by(&self) -> i64 {
        self.by
    }

    fn le(&self, a: i64, b: i64) -> bool {
        a <= b
    }

    fn advance(&self, v: i64, by: i64) -> Option<i64> {
        v.checked_add(by)
    }
}
