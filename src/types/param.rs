// SPDX-License-Identifier: Apache-2.0

#![warn(missing_docs)]

//! Parameter keywords.
//!
//! A param value may be a short name (`2t`), a numeric GRIB paramId (`167`)
//! or the dotted legacy `PARAM.TABLE` form. Short names resolve through a
//! table whose applicable row set depends on sibling keywords (`stream`,
//! `levtype`, `type`, `class`, ...); the second expansion pass re-runs the
//! selection once those siblings are themselves expanded.
//!

use crate::{MyError, request::MarsRequest};
use serde_json::Value;
use std::sync::OnceLock;
use tracing::warn;
use unicase::UniCase;

#[derive(Debug)]
struct Entry {
    id: String,
    aliases: Vec<String>,
}

#[derive(Debug)]
struct Rule {
    match_: Vec<(String, Vec<String>)>,
    entries: Vec<Entry>,
}

impl Rule {
    fn applies(&self, request: &MarsRequest) -> bool {
        self.match_.iter().all(|(key, accepted)| {
            request
                .values(key, true)
                .map(|vv| vv.iter().any(|v| accepted.contains(v)))
                .unwrap_or(false)
        })
    }

    fn lookup(&self, name: &str) -> Option<&str> {
        let probe = UniCase::new(name);
        self.entries
            .iter()
            .find(|e| e.aliases.iter().any(|a| UniCase::new(a.as_str()) == probe))
            .map(|e| e.id.as_str())
    }
}

static TABLE: OnceLock<Vec<Rule>> = OnceLock::new();

fn table() -> &'static [Rule] {
    TABLE.get_or_init(|| {
        parse_table(include_str!("../../share/params.json")).expect("malformed params table")
    })
}

fn parse_table(text: &str) -> Result<Vec<Rule>, MyError> {
    let doc: Value = serde_json::from_str(text)?;
    let Value::Array(rules) = doc else {
        return Err(MyError::Generic("params table is not a list".into()));
    };
    let mut out = vec![];
    for rule in &rules {
        let mut match_ = vec![];
        if let Some(Value::Object(m)) = rule.get("match") {
            for (k, v) in m {
                let accepted = match v {
                    Value::Array(a) => a
                        .iter()
                        .map(|x| x.as_str().map(str::to_owned))
                        .collect::<Option<Vec<_>>>()
                        .ok_or_else(|| MyError::Generic("bad param match values".into()))?,
                    Value::String(s) => vec![s.clone()],
                    _ => return Err(MyError::Generic("bad param match values".into())),
                };
                match_.push((k.clone(), accepted));
            }
        }
        let Some(Value::Array(pp)) = rule.get("params") else {
            return Err(MyError::Generic("param rule w/o params".into()));
        };
        let mut entries = vec![];
        for p in pp {
            let Value::Array(row) = p else {
                return Err(MyError::Generic("param row is not a list".into()));
            };
            let id = match row.first() {
                Some(Value::Number(n)) => n.to_string(),
                Some(Value::String(s)) => s.clone(),
                _ => return Err(MyError::Generic("param row w/o id".into())),
            };
            let aliases = row[1..]
                .iter()
                .map(|x| x.as_str().map(str::to_owned))
                .collect::<Option<Vec<_>>>()
                .ok_or_else(|| MyError::Generic("bad param aliases".into()))?;
            entries.push(Entry { id, aliases });
        }
        out.push(Rule { match_, entries });
    }
    Ok(out)
}

// `P.T` maps to paramId P when T is table 128, else `T*1000 + P`.
fn dotted_id(s: &str) -> Option<String> {
    let (p, t) = s.split_once('.')?;
    let p: i64 = p.parse().ok()?;
    let t: i64 = t.parse().ok()?;
    Some(if t == 128 {
        p.to_string()
    } else {
        (t * 1000 + p).to_string()
    })
}

/// Param keyword payload.
#[derive(Clone, Debug)]
pub(crate) struct TypeParam;

impl TypeParam {
    pub(crate) fn new(_settings: &Value) -> Result<Self, MyError> {
        Ok(TypeParam)
    }

    pub(crate) fn expand_one(
        &self,
        request: &MarsRequest,
        value: &str,
        strict: bool,
    ) -> Result<String, MyError> {
        // numeric paramIds pass through untouched...
        if !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit()) {
            let n: i64 = value
                .parse()
                .map_err(|_| MyError::User(format!("'{value}' is not a valid paramId").into()))?;
            return Ok(n.to_string());
        }
        if let Some(id) = dotted_id(value) {
            return Ok(id);
        }

        let rule = table()
            .iter()
            .find(|r| r.applies(request))
            .or_else(|| table().iter().find(|r| r.match_.is_empty()));

        if let Some(rule) = rule
            && let Some(id) = rule.lookup(value)
        {
            return Ok(id.to_owned());
        }

        if strict {
            Err(MyError::User(
                format!("unknown parameter '{value}' in {request}").into(),
            ))
        } else {
            warn!("unknown parameter '{value}', keeping as is");
            Ok(value.to_owned())
        }
    }

    pub(crate) fn expand_list(
        &self,
        request: &MarsRequest,
        values: &[String],
        strict: bool,
    ) -> Result<Vec<String>, MyError> {
        values
            .iter()
            .map(|v| self.expand_one(request, v, strict))
            .collect()
    }
}
