// SPDX-License-Identifier: Apache-2.0

#![warn(missing_docs)]

//! MARS requests --the kernel data structure of this library.
//!
//! A [`MarsRequest`] is a `verb` naming the operation (retrieve, archive,
//! stage, ...) plus an **ordered** sequence of [`Parameter`]s, each mapping a
//! keyword to a non-empty ordered list of string values. Order is preserved
//! for deterministic printing; re-setting an existing keyword keeps its
//! position.
//!
//! Every parameter carries a reference to its resolved [`Type`]; a freshly
//! parsed request holds the shared "undefined" sentinel until expansion.
//!

use crate::{
    MyError,
    expand::MarsExpansion,
    text,
    types::{self, Type},
};
use core::fmt;
use std::{cmp::Ordering, rc::Rc};

/// One `key=value[/value...]` assertion inside a request.
#[derive(Clone)]
pub struct Parameter {
    type_: Rc<Type>,
    values: Vec<String>,
}

impl Parameter {
    pub(crate) fn new(values: Vec<String>, type_: Rc<Type>) -> Self {
        type_.check(&values);
        Parameter { type_, values }
    }

    /// The keyword this parameter is bound to.
    pub fn name(&self) -> &str {
        self.type_.name()
    }

    /// The ordered values of this parameter.
    pub fn values(&self) -> &[String] {
        &self.values
    }

    /// The type governing expansion of this parameter.
    pub fn type_(&self) -> &Rc<Type> {
        &self.type_
    }

    /// Effective cardinality for flattening purposes.
    pub fn count(&self) -> usize {
        self.type_.count(&self.values)
    }

    // Keep only values listed in `filter`; FALSE when nothing survives.
    pub(crate) fn filter(&mut self, filter: &[String]) -> bool {
        self.type_.filter(filter, &mut self.values)
    }

    // TRUE when at least one of `match_` occurs in our values.
    pub(crate) fn matches(&self, match_: &[String]) -> bool {
        self.type_.matches(match_, &self.values)
    }
}

impl Default for Parameter {
    fn default() -> Self {
        Parameter {
            type_: types::undefined(),
            values: vec![],
        }
    }
}

impl fmt::Debug for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={:?}", self.name(), self.values)
    }
}

impl PartialEq for Parameter {
    fn eq(&self, other: &Self) -> bool {
        self.name() == other.name() && self.values == other.values
    }
}

impl Eq for Parameter {}

impl PartialOrd for Parameter {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Parameter {
    fn cmp(&self, other: &Self) -> Ordering {
        self.name()
            .cmp(other.name())
            .then_with(|| self.values.cmp(&other.values))
    }
}

/// A MARS request: verb + ordered parameters.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MarsRequest {
    verb: String,
    params: Vec<Parameter>,
}

impl MarsRequest {
    /// Construct an empty request w/ the given verb.
    pub fn new(verb: &str) -> Self {
        MarsRequest {
            verb: verb.to_ascii_lowercase(),
            params: vec![],
        }
    }

    /// Parse a single request from text and expand it against the language
    /// of its verb. `strict` escalates ambiguities + unknown keywords to
    /// errors instead of diagnostics.
    pub fn parse(text: &str, strict: bool) -> Result<Self, MyError> {
        let mut all = text::mars::requests(text).map_err(MyError::Text)?;
        match all.len() {
            0 => Err(MyError::User("no request found in input".into())),
            1 => {
                let mut expansion = MarsExpansion::new(false, strict);
                expansion.expand_one(&all.remove(0))
            }
            n => Err(MyError::User(
                format!("expected a single request, found {n}").into(),
            )),
        }
    }

    /// This request's verb.
    pub fn verb(&self) -> &str {
        &self.verb
    }

    /// Replace this request's verb.
    pub fn set_verb(&mut self, verb: &str) {
        self.verb = verb.to_ascii_lowercase();
    }

    /// TRUE if a parameter named `key` is present.
    pub fn has(&self, key: &str) -> bool {
        self.find(key).is_some()
    }

    /// TRUE when this request carries no parameters.
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// The values of parameter `key`. W/ `allow_missing` a missing keyword
    /// yields an empty slice instead of an error.
    pub fn values(&self, key: &str, allow_missing: bool) -> Result<&[String], MyError> {
        match self.find(key) {
            Some(i) => Ok(&self.params[i].values),
            None if allow_missing => Ok(&[]),
            None => Err(MyError::User(
                format!("no parameter called '{key}' in request {self}").into(),
            )),
        }
    }

    /// Number of values held by parameter `key`; 0 when absent.
    pub fn count_values(&self, key: &str) -> usize {
        self.find(key).map_or(0, |i| self.params[i].values.len())
    }

    /// Convenience: TRUE when `key` holds exactly the single value `value`.
    pub fn is(&self, key: &str, value: &str) -> bool {
        self.find(key)
            .map(|i| {
                let v = &self.params[i].values;
                v.len() == 1 && v[0] == value
            })
            .unwrap_or(false)
    }

    /// Set (or overwrite in place) parameter `key` w/ untyped values.
    pub fn set_values(&mut self, key: &str, values: Vec<String>) {
        self.set_values_typed(types::any(key), values)
    }

    /// Set (or overwrite in place) a parameter bound to `type_`.
    pub fn set_values_typed(&mut self, type_: Rc<Type>, values: Vec<String>) {
        let p = Parameter::new(values, Rc::clone(&type_));
        match self.find(type_.name()) {
            Some(i) => self.params[i] = p,
            None => self.params.push(p),
        }
    }

    /// Remove parameter `key` if present.
    pub fn unset(&mut self, key: &str) {
        if let Some(i) = self.find(key) {
            self.params.remove(i);
        }
    }

    /// Deduplicating union of the other request's value lists into ours,
    /// preserving our order. Parameters we do not have yet are appended.
    pub fn merge(&mut self, other: &MarsRequest) {
        for p in &other.params {
            match self.find(p.name()) {
                Some(i) => {
                    let ours = &mut self.params[i].values;
                    for v in &p.values {
                        if !ours.contains(v) {
                            ours.push(v.clone());
                        }
                    }
                }
                None => self.params.push(p.clone()),
            }
        }
    }

    /// A copy of this request restricted to the named keywords.
    pub fn subset(&self, keys: &[&str]) -> MarsRequest {
        MarsRequest {
            verb: self.verb.clone(),
            params: self
                .params
                .iter()
                .filter(|p| keys.contains(&p.name()))
                .cloned()
                .collect(),
        }
    }

    /// Keep, per parameter, only the values also present in `filter`.
    /// A `day` filter keyword applies to calendar-date parameters, by
    /// day-of-month. FALSE when some filtered parameter ends up w/ no
    /// values at all.
    pub fn filter(&mut self, filter: &MarsRequest) -> bool {
        for p in &mut self.params {
            let f = match filter.values(p.name(), true) {
                Ok(vv) if !vv.is_empty() => vv.to_vec(),
                _ if p.type_.class() == "date" => {
                    match filter.values("day", true) {
                        Ok(vv) if !vv.is_empty() => vv.to_vec(),
                        _ => continue,
                    }
                }
                _ => continue,
            };
            if !p.filter(&f) {
                return false;
            }
        }
        true
    }

    /// TRUE when every parameter of `other` has a non-empty intersection w/
    /// the same-named parameter here.
    pub fn matches(&self, other: &MarsRequest) -> bool {
        for p in &other.params {
            match self.find(p.name()) {
                Some(i) => {
                    if !self.params[i].matches(&p.values) {
                        return false;
                    }
                }
                None => return false,
            }
        }
        true
    }

    /// The names of all parameters, in declaration order.
    pub fn params(&self) -> Vec<&str> {
        self.params.iter().map(|p| p.name()).collect()
    }

    /// Iterate the parameters in declaration order.
    pub fn parameters(&self) -> impl Iterator<Item = &Parameter> {
        self.params.iter()
    }

    /// Product of the per-parameter flatten cardinalities.
    pub fn count(&self) -> usize {
        self.params.iter().map(|p| p.count()).product()
    }

    /// Pretty-print w/ parameterized separators; `cr` goes after every
    /// comma, `tab` indents every parameter line.
    pub fn dump(
        &self,
        f: &mut dyn fmt::Write,
        cr: &str,
        tab: &str,
        include_verb: bool,
    ) -> fmt::Result {
        let mut lead = if include_verb {
            write!(f, "{}", self.verb)?;
            true
        } else {
            false
        };
        for p in &self.params {
            if lead {
                write!(f, ",{cr}{tab}")?;
            } else {
                lead = true;
            }
            write!(f, "{}=", p.name())?;
            for (i, v) in p.values.iter().enumerate() {
                if i > 0 {
                    write!(f, "/")?;
                }
                write_quoted(f, v)?;
            }
        }
        write!(f, "{cr}")
    }

    fn find(&self, key: &str) -> Option<usize> {
        self.params.iter().position(|p| p.name() == key)
    }
}

impl PartialOrd for MarsRequest {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for MarsRequest {
    fn cmp(&self, other: &Self) -> Ordering {
        self.verb
            .cmp(&other.verb)
            .then_with(|| self.params.cmp(&other.params))
    }
}

// canonical one-line form: `verb,k1=v1a/v1b,k2=v2,...`
impl fmt::Display for MarsRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.dump(f, "", "", true)
    }
}

// quote a value iff it contains characters outside the identifier set.
fn write_quoted(f: &mut dyn fmt::Write, value: &str) -> fmt::Result {
    let plain = !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | ':' | '-' | '.' | '@'));
    if plain {
        write!(f, "{value}")
    } else {
        write!(f, "\"{value}\"")
    }
}
