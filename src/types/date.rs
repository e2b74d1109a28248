// SPDX-License-Identifier: Apache-2.0

#![warn(missing_docs)]

//! Calendar-date keywords.
//!
//! Accepted forms: `YYYYMMDD`, ISO `YYYY-MM-DD`, non-positive offsets
//! (`-N` is today minus N days, `0` is today), and the named shortcuts
//! `today` / `yesterday` / `tomorrow`. Canonical output is always
//! `YYYYMMDD`. `to`/`by` lists step in whole days.
//!

use crate::{
    MyError,
    request::MarsRequest,
    types::{
        ExpandContext,
        toby::{self, ToByDomain},
    },
};
use jiff::{Span, civil};
use std::collections::BTreeSet;

/// Date keyword payload.
#[derive(Clone, Debug)]
pub(crate) struct TypeDate {
    by: i64,
}

impl TypeDate {
    pub(crate) fn new(settings: &serde_json::Value) -> Result<Self, MyError> {
        Ok(TypeDate {
            by: settings
                .get("by")
                .and_then(serde_json::Value::as_i64)
                .unwrap_or(1),
        })
    }

    pub(crate) fn expand_one(
        &self,
        ctx: &ExpandContext,
        value: &str,
    ) -> Result<String, MyError> {
        let d = DateDomain {
            today: ctx.today(),
            by: self.by,
        };
        Ok(d.render(d.parse(value)?))
    }

    pub(crate) fn expand_list(
        &self,
        ctx: &ExpandContext,
        values: &[String],
    ) -> Result<Vec<String>, MyError> {
        let d = DateDomain {
            today: ctx.today(),
            by: self.by,
        };
        toby::expand_list(&d, values)
    }

    // a sibling `day` keyword restricts multi-valued dates to matching
    // days-of-month.
    pub(crate) fn pass2(
        &self,
        name: &str,
        request: &mut MarsRequest,
        _strict: bool,
    ) -> Result<(), MyError> {
        let Ok(days) = request.values("day", false) else {
            return Ok(());
        };
        let dates = request.values(name, true).unwrap_or(&[]).to_vec();
        if dates.len() < 2 {
            return Ok(());
        }

        let days: BTreeSet<i8> = days
            .iter()
            .filter_map(|d| d.parse::<i8>().ok())
            .collect();
        if days.is_empty() {
            return Ok(());
        }

        let kept: Vec<String> = dates
            .into_iter()
            .filter(|s| match parse_yyyymmdd(s) {
                Some(d) => days.contains(&d.day()),
                None => true,
            })
            .collect();
        if kept.is_empty() {
            return Err(MyError::User(
                format!("no value of '{name}' matches day={days:?}").into(),
            ));
        }
        let type_ = request
            .parameters()
            .find(|p| p.name() == name)
            .map(|p| p.type_().clone());
        if let Some(t) = type_ {
            request.set_values_typed(t, kept);
        }
        Ok(())
    }

    // filter values that look like days-of-month restrict by calendar day;
    // anything else intersects canonically.
    pub(crate) fn filter(&self, filter: &[String], values: &mut Vec<String>) -> bool {
        let days: Option<BTreeSet<i8>> = filter
            .iter()
            .map(|s| s.parse::<i8>().ok().filter(|d| (1..=31).contains(d)))
            .collect();
        match days {
            Some(days) => {
                values.retain(|s| match parse_yyyymmdd(s) {
                    Some(d) => days.contains(&d.day()),
                    None => false,
                });
            }
            None => {
                let keep: BTreeSet<&String> = filter.iter().collect();
                values.retain(|v| keep.contains(v));
            }
        }
        !values.is_empty()
    }
}

fn parse_yyyymmdd(s: &str) -> Option<civil::Date> {
    if s.len() != 8 || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let y: i16 = s[0..4].parse().ok()?;
    let m: i8 = s[4..6].parse().ok()?;
    let d: i8 = s[6..8].parse().ok()?;
    civil::Date::new(y, m, d).ok()
}

struct DateDomain {
    today: civil::Date,
    by: i64,
}

impl ToByDomain for DateDomain {
    type V = civil::Date;

    fn parse(&self, s: &str) -> Result<civil::Date, MyError> {
        let lower = s.to_ascii_lowercase();
        match lower.as_str() {
            "today" => return Ok(self.today),
            "yesterday" => return self.advance(self.today, -1).ok_or_else(overflow),
            "tomorrow" => return self.advance(self.today, 1).ok_or_else(overflow),
            _ => {}
        }

        if let Some(d) = parse_yyyymmdd(s) {
            return Ok(d);
        }
        if let Ok(d) = s.parse::<civil::Date>() {
            return Ok(d);
        }
        if let Ok(n) = s.parse::<i64>() {
            if n > 0 {
                return Err(MyError::User(
                    format!("date offset must not be positive: '{s}'").into(),
                ));
            }
            return self.advance(self.today, n).ok_or_else(overflow);
        }
        Err(MyError::User(format!("'{s}' is not a valid date").into()))
    }

    fn render(&self, v: civil::Date) -> String {
        format!("{:04}{:02}{:02}", v.year(), v.month(), v.day())
    }

    fn step(&self, s: &str) -> Result<i64, MyError> {
        s.parse()
            .map_err(|_| MyError::User(format!("'{s}' is not a valid day step").into()))
    }

    fn default_by(&self) -> i64 {
        self.by
    }

    fn le(&self, a: civil::Date, b: civil::Date) -> bool {
        a <= b
    }

    fn advance(&self, v: civil::Date, by: i64) -> Option<civil::Date> {
        let span = Span::new().try_days(by).ok()?;
        v.checked_add(span).ok()
    }
}

fn overflow() -> MyError {
    MyError::User("date arithmetic overflow".into())
}
