// SPDX-License-Identifier: Apache-2.0

#![warn(missing_docs)]

//! Context rules --predicates over an in-flight request that gate the
//! per-keyword settings overlays of the language.
//!

use crate::{MyError, request::MarsRequest};
use core::fmt;
use std::collections::BTreeSet;

/// A single predicate over one keyword of a request.
///
/// The pseudo-key `_verb` tests the request verb instead of a parameter.
#[derive(Clone, Debug, PartialEq)]
pub enum ContextRule {
    /// Matches when at least one of the request's values for the key is in
    /// the set.
    Include(String, BTreeSet<String>),
    /// Matches when the key is present and none of its values is in the set.
    /// An absent key does NOT match --absence is only matched by [`Undef`].
    ///
    /// [`Undef`]: ContextRule::Undef
    Exclude(String, BTreeSet<String>),
    /// Presence test.
    Def(String),
    /// Absence test.
    Undef(String),
}

impl ContextRule {
    /// Evaluate this rule against a request.
    pub fn matches(&self, request: &MarsRequest) -> bool {
        match self {
            ContextRule::Include(key, set) => {
                if key == "_verb" {
                    return set.contains(request.verb());
                }
                match request.values(key, true) {
                    Ok(vv) if !vv.is_empty() => vv.iter().any(|v| set.contains(v)),
                    _ => false,
                }
            }
            ContextRule::Exclude(key, set) => match request.values(key, true) {
                Ok(vv) if !vv.is_empty() => vv.iter().all(|v| !set.contains(v)),
                _ => false,
            },
            ContextRule::Def(key) => request.has(key),
            ContextRule::Undef(key) => !request.has(key),
        }
    }
}

impl fmt::Display for ContextRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContextRule::Include(k, vv) => write!(f, "Include[key={k},vals={vv:?}]"),
            ContextRule::Exclude(k, vv) => write!(f, "Exclude[key={k},vals={vv:?}]"),
            ContextRule::Def(k) => write!(f, "Def[key={k}]"),
            ContextRule::Undef(k) => write!(f, "Undef[key={k}]"),
        }
    }
}

/// A conjunction of [`ContextRule`]s.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Context {
    rules: Vec<ContextRule>,
}

impl Context {
    /// An empty (always matching) context.
    pub fn new() -> Self {
        Context::default()
    }

    /// Add one more rule to the conjunction.
    pub fn add(&mut self, rule: ContextRule) {
        self.rules.push(rule);
    }

    /// TRUE when every rule matches the request.
    pub fn matches(&self, request: &MarsRequest) -> bool {
        self.rules.iter().all(|r| r.matches(request))
    }

    /// Build from the declarative `match` object of a language `contexts`
    /// entry: string values mean Include-one (or Def/Undef for the literals
    /// `"def"`/`"undef"`), lists mean Include, `{"exclude": [...]}` means
    /// Exclude.
    pub fn from_json(spec: &serde_json::Value) -> Result<Self, MyError> {
        let obj = spec
            .as_object()
            .ok_or_else(|| MyError::Generic("context 'match' is not an object".into()))?;
        let mut ctx = Context::new();
        for (key, v) in obj {
            let rule = match v {
                serde_json::Value::String(s) if s == "def" => ContextRule::Def(key.clone()),
                serde_json::Value::String(s) if s == "undef" => ContextRule::Undef(key.clone()),
                serde_json::Value::String(s) => {
                    ContextRule::Include(key.clone(), BTreeSet::from([s.clone()]))
                }
                serde_json::Value::Array(_) => {
                    ContextRule::Include(key.clone(), string_set(v)?)
                }
                serde_json::Value::Object(m) => match m.get("exclude") {
                    Some(x) => ContextRule::Exclude(key.clone(), string_set(x)?),
                    None => {
                        return Err(MyError::Generic(
                            format!("unsupported context rule for '{key}'").into(),
                        ));
                    }
                },
                _ => {
                    return Err(MyError::Generic(
                        format!("unsupported context rule for '{key}'").into(),
                    ));
                }
            };
            ctx.add(rule);
        }
        Ok(ctx)
    }
}

fn string_set(v: &serde_json::Value) -> Result<BTreeSet<String>, MyError> {
    let list = v
        .as_array()
        .ok_or_else(|| MyError::Generic("expected a list of strings".into()))?;
    list.iter()
        .map(|x| {
            x.as_str()
                .map(str::to_owned)
                .ok_or_else(|| MyError::Generic("expected a string".into()))
        })
        .collect()
}
