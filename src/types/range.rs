// SPDX-License-Identifier: Apache-2.0

#![warn(missing_docs)]

//! Forecast-step keywords: scalar steps and hyphenated step ranges.
//!
//! A scalar step is a duration: plain digits mean whole hours, the suffixed
//! forms (`30m`, `1h30m`) mean what they say. A range is `A-B` w/ `B >= A`.
//! Canonical rendering preserves units: whole hours print unit-less (`120m`
//! prints as `2`), sub-hour amounts keep the `m` suffix and anything in
//! between uses `XhYm`.
//!

use crate::{
    MyError,
    types::toby::{self, ToByDomain, hm_minutes},
};
use serde_json::Value;

/// One parsed step: minutes from, optionally minutes to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct StepRange {
    pub(crate) from: i64,
    pub(crate) to: Option<i64>,
}

impl StepRange {
    /// Parse a scalar-or-range step token.
    pub(crate) fn parse(s: &str) -> Result<Self, MyError> {
        let parts: Vec<&str> = s.split('-').collect();
        match parts.as_slice() {
            [one] => Ok(StepRange {
                from: minutes(one)?,
                to: None,
            }),
            [a, b] => {
                let from = minutes(a)?;
                let to = minutes(b)?;
                if from > to {
                    return Err(MyError::User(
                        format!("invalid step range '{s}': start is after end").into(),
                    ));
                }
                Ok(StepRange {
                    from,
                    to: Some(to),
                })
            }
            _ => Err(MyError::User(
                format!("'{s}' is not a valid step").into(),
            )),
        }
    }

    /// Canonical unit-preserving rendering.
    pub(crate) fn render(&self) -> String {
        match self.to {
            None => render_minutes(self.from),
            Some(to) => format!("{}-{}", render_minutes(self.from), render_minutes(to)),
        }
    }
}

// a duration: plain digits are hours, else the h/m suffix forms.
fn minutes(s: &str) -> Result<i64, MyError> {
    let s = s.trim();
    if !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()) {
        let h: i64 = s
            .parse()
            .map_err(|_| MyError::User(format!("'{s}' is not a valid step").into()))?;
        return Ok(h * 60);
    }
    hm_minutes(s).ok_or_else(|| MyError::User(format!("'{s}' is not a valid step").into()))
}

fn render_minutes(m: i64) -> String {
    if m % 60 == 0 {
        (m / 60).to_string()
    } else if m < 60 {
        format!("{m}m")
    } else {
        format!("{}h{}m", m / 60, m % 60)
    }
}

/// Step keyword payload.
#[derive(Clone, Debug)]
pub(crate) struct TypeRange {
    by: i64,
}

impl TypeRange {
    pub(crate) fn new(settings: &Value) -> Result<Self, MyError> {
        let by = match settings.get("by") {
            None | Some(Value::Null) => 60,
            Some(v) => {
                let s = match v {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                minutes(&s)?
            }
        };
        Ok(TypeRange { by })
    }

    pub(crate) fn expand_one(&self, value: &str) -> Result<String, MyError> {
        Ok(StepRange::parse(value)?.render())
    }

    pub(crate) fn expand_list(&self, values: &[String]) -> Result<Vec<String>, MyError> {
        toby::expand_list(&StepDomain { by: self.by }, values)
    }
}

struct StepDomain {
    by: i64,
}

impl ToByDomain for StepDomain {
    type V = StepRange;

    fn parse(&self, s: &str) -> Result<StepRange, MyError> {
        StepRange::parse(s)
    }

    fn render(&self, v: StepRange) -> String {
        v.render()
    }

    fn step(&self, s: &str) -> Result<i64, MyError> {
        minutes(s)
    }

    fn default_by(&self) -> i64 {
        self.by
    }

    // ranges advance in lockstep; ordering is on the range start.
    fn le(&self, a: StepRange, b: StepRange) -> bool {
        a.from <= b.from
    }

    fn advance(&self, v: StepRange, by: i64) -> Option<StepRange> {
        Some(StepRange {
            from: v.from.checked_add(by)?,
            to: match v.to {
                Some(t) => Some(t.checked_add(by)?),
                None => None,
            },
        })
    }
}
