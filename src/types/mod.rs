// SPDX-License-Identifier: Apache-2.0

#![warn(missing_docs)]

//! Typed keyword rules.
//!
//! Every MARS keyword is governed by exactly one [`Type`]: an immutable bundle
//! of common settings (`flatten`, `multiple`, defaults, `only`/`never`,
//! context overlays) plus one algorithm-specific payload held in the closed
//! [`TypeKind`] sum. The set of keyword classes is stable, so a tagged union
//! is preferred over open inheritance.
//!
//! Types are shared: a [`Language`] owns them behind `Rc` and hands clones of
//! the handle to every [`Parameter`] it expands. The only post-construction
//! mutation is the defaults store (updated on inheritance, restored by
//! [`Type::reset`]) and the lazily loaded value tables of large enums.
//!
//! [`Language`]: crate::language::Language
//! [`Parameter`]: crate::request::Parameter
//!

mod any;
mod chem;
mod date;
mod enums;
mod expver;
mod integer;
mod param;
mod range;
mod time;
mod toby;

pub(crate) use range::StepRange;

use crate::{MyError, context::Context, request::MarsRequest};
use core::fmt;
use jiff::civil;
use serde_json::Value;
use std::{cell::RefCell, collections::BTreeSet, rc::Rc};
use tracing::{debug, warn};

/// Ambient state of one expansion pass.
///
/// Carries the wall-clock anchor used by date arithmetic so tests can pin
/// `today` to a fixed civil date.
#[derive(Clone, Debug)]
pub struct ExpandContext {
    today: civil::Date,
}

impl Default for ExpandContext {
    fn default() -> Self {
        ExpandContext {
            today: jiff::Zoned::now().date(),
        }
    }
}

impl ExpandContext {
    /// Context anchored at the real wall clock.
    pub fn new() -> Self {
        Self::default()
    }

    /// Context anchored at a fixed civil date.
    pub fn fixed(today: civil::Date) -> Self {
        ExpandContext { today }
    }

    /// The date `0` (and offset `-N`) arithmetic resolves against.
    pub fn today(&self) -> civil::Date {
        self.today
    }
}

/// The closed set of keyword classes.
#[derive(Clone, Debug)]
pub(crate) enum TypeKind {
    /// Case-insensitive alias table, §4.D Enum.
    Enum(enums::TypeEnum),
    /// Integer literals w/ optional inclusive range.
    Integer(integer::TypeInteger),
    /// Calendar dates w/ offset arithmetic.
    Date(date::TypeDate),
    /// Time of day.
    Time(time::TypeTime),
    /// Forecast steps + hyphenated step ranges.
    Range(range::TypeRange),
    /// Parameter table w/ context-dependent resolution.
    Param(param::TypeParam),
    /// Chemistry constituent table.
    Chem(chem::TypeChem),
    /// 4-character experiment version.
    Expver(expver::TypeExpver),
    /// Passthrough.
    Any(any::TypeAny),
}

/// Result of expanding a single token: enum groups may fan one alias out to
/// several canonicals.
pub(crate) enum Expanded {
    One(String),
    Many(Vec<String>),
}

/// Immutable configuration of one keyword.
pub struct Type {
    name: String,
    class: String,
    category: String,
    flatten: bool,
    multiple: bool,
    defaults: RefCell<Vec<String>>,
    original_defaults: Vec<String>,
    only: Vec<(String, BTreeSet<String>)>,
    never: Vec<(String, BTreeSet<String>)>,
    contexts: Vec<(Context, Value)>,
    settings: Value,
    kind: TypeKind,
}

impl fmt::Debug for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Type[{}/{}]", self.class, self.name)
    }
}

impl Type {
    /// Build a type from its declarative settings (§4.C of the language
    /// description).
    pub fn new(name: &str, settings: &Value) -> Result<Self, MyError> {
        let class = settings
            .get("type")
            .and_then(Value::as_str)
            .unwrap_or("any")
            .to_owned();

        let kind = match class.as_str() {
            "enum" => TypeKind::Enum(enums::TypeEnum::new(name, settings)?),
            "integer" => TypeKind::Integer(integer::TypeInteger::new(settings)?),
            "date" => TypeKind::Date(date::TypeDate::new(settings)?),
            "time" => TypeKind::Time(time::TypeTime::new(settings)?),
            "range" => TypeKind::Range(range::TypeRange::new(settings)?),
            "param" => TypeKind::Param(param::TypeParam::new(settings)?),
            "chem" => TypeKind::Chem(chem::TypeChem::new(settings)?),
            "expver" => TypeKind::Expver(expver::TypeExpver::new()),
            "any" => TypeKind::Any(any::TypeAny::new()),
            other => {
                return Err(MyError::Generic(
                    format!("unknown keyword class '{other}' for '{name}'").into(),
                ));
            }
        };

        let defaults = match settings.get("default") {
            None | Some(Value::Null) => vec![],
            Some(Value::Array(a)) => a.iter().map(scalar_string).collect(),
            Some(v) => vec![scalar_string(v)],
        };

        let mut contexts = vec![];
        if let Some(Value::Array(cc)) = settings.get("contexts") {
            for c in cc {
                let match_ = c.get("match").cloned().unwrap_or(Value::Null);
                contexts.push((Context::from_json(&match_)?, c.clone()));
            }
        }

        Ok(Type {
            name: name.to_owned(),
            category: settings
                .get("category")
                .and_then(Value::as_str)
                .unwrap_or("")
                .to_owned(),
            flatten: settings
                .get("flatten")
                .and_then(Value::as_bool)
                .unwrap_or(true),
            multiple: settings
                .get("multiple")
                .and_then(Value::as_bool)
                .unwrap_or(false),
            original_defaults: defaults.clone(),
            defaults: RefCell::new(defaults),
            only: rule_sets(settings.get("only"))?,
            never: rule_sets(settings.get("never"))?,
            contexts,
            settings: settings.clone(),
            class,
            kind,
        })
    }

    fn new_any(name: &str) -> Self {
        Type {
            name: name.to_owned(),
            class: "any".into(),
            category: String::new(),
            flatten: true,
            multiple: true,
            defaults: RefCell::new(vec![]),
            original_defaults: vec![],
            only: vec![],
            never: vec![],
            contexts: vec![],
            settings: Value::Null,
            kind: TypeKind::Any(any::TypeAny::new()),
        }
    }

    /// The keyword this type governs.
    pub fn name(&self) -> &str {
        &self.name
    }

    // the declarative class name ("enum", "date", ...).
    pub(crate) fn class(&self) -> &str {
        &self.class
    }

    /// The keyword category (e.g. `data`).
    pub fn category(&self) -> &str {
        &self.category
    }

    /// TRUE for axis keywords that participate in the Cartesian product.
    pub fn flatten(&self) -> bool {
        self.flatten
    }

    /// TRUE when the keyword accepts a value list.
    pub fn multiple(&self) -> bool {
        self.multiple
    }

    /// Effective cardinality for flattening.
    pub fn count(&self, values: &[String]) -> usize {
        if self.flatten { values.len() } else { 1 }
    }

    /// The current default values (possibly updated by inheritance).
    pub fn defaults(&self) -> Vec<String> {
        self.defaults.borrow().clone()
    }

    /// Replace the defaults (inheritance between requests).
    pub(crate) fn set_defaults(&self, values: &[String]) {
        *self.defaults.borrow_mut() = values.to_vec();
    }

    /// Restore the original language-file defaults.
    pub fn reset(&self) {
        *self.defaults.borrow_mut() = self.original_defaults.clone();
    }

    // Duplicate values under `flatten` break the product laws.
    pub(crate) fn check(&self, values: &[String]) {
        if self.flatten {
            let set: BTreeSet<&String> = values.iter().collect();
            if set.len() != values.len() {
                warn!("duplicate values in {}={:?}", self.name, values);
            }
        }
    }

    /// Normalize a whole value list in place.
    pub fn expand_values(
        &self,
        ctx: &ExpandContext,
        request: &MarsRequest,
        values: &mut Vec<String>,
        strict: bool,
    ) -> Result<(), MyError> {
        // `keyword=off` disables a keyword (possibly inherited); finalise
        // removes it.
        if values.len() == 1 && values[0].eq_ignore_ascii_case("off") {
            values[0] = "off".into();
            return Ok(());
        }

        let expanded = match &self.kind {
            TypeKind::Integer(t) => t.expand_list(&self.name, values)?,
            TypeKind::Date(t) => t.expand_list(ctx, values)?,
            TypeKind::Time(t) => t.expand_list(values)?,
            TypeKind::Range(t) => t.expand_list(values)?,
            TypeKind::Param(t) => t.expand_list(request, values, strict)?,
            _ => {
                let mut out = Vec::with_capacity(values.len());
                for v in values.iter() {
                    match self.expand_one(ctx, request, v, strict)? {
                        Expanded::One(x) => out.push(x),
                        Expanded::Many(xs) => out.extend(xs),
                    }
                }
                out
            }
        };
        *values = expanded;

        if !self.multiple && values.len() > 1 {
            return Err(MyError::User(
                format!("only one value possible for '{}'", self.name).into(),
            ));
        }
        if self.flatten {
            let set: BTreeSet<&String> = values.iter().collect();
            if set.len() != values.len() {
                return Err(MyError::User(
                    format!("duplicate values in {}={:?}", self.name, values).into(),
                ));
            }
        }
        Ok(())
    }

    // Normalize a single token.
    pub(crate) fn expand_one(
        &self,
        ctx: &ExpandContext,
        request: &MarsRequest,
        value: &str,
        strict: bool,
    ) -> Result<Expanded, MyError> {
        match &self.kind {
            TypeKind::Enum(t) => t.expand_one(&self.name, value, strict),
            TypeKind::Integer(t) => t.expand_one(&self.name, value).map(Expanded::One),
            TypeKind::Date(t) => t.expand_one(ctx, value).map(Expanded::One),
            TypeKind::Time(t) => t.expand_one(value).map(Expanded::One),
            TypeKind::Range(t) => t.expand_one(value).map(Expanded::One),
            TypeKind::Param(t) => t.expand_one(request, value, strict).map(Expanded::One),
            TypeKind::Chem(t) => t.expand_one(&self.name, value, strict).map(Expanded::One),
            TypeKind::Expver(t) => t.expand_one(&self.name, value).map(Expanded::One),
            TypeKind::Any(t) => t.expand_one(value).map(Expanded::One),
        }
    }

    /// Best-effort single-value normalization; returns the input unchanged
    /// when it does not expand. Used by the metadata decoders.
    pub fn tidy(&self, ctx: &ExpandContext, value: &str) -> String {
        let request = MarsRequest::default();
        match self.expand_one(ctx, &request, value, false) {
            Ok(Expanded::One(x)) => x,
            Ok(Expanded::Many(xs)) => xs.join("/"),
            Err(_) => value.to_owned(),
        }
    }

    /// Order-preserving intersection w/ `filter`; FALSE when empty.
    pub fn filter(&self, filter: &[String], values: &mut Vec<String>) -> bool {
        match &self.kind {
            TypeKind::Date(t) => t.filter(filter, values),
            _ => {
                let keep: BTreeSet<&String> = filter.iter().collect();
                values.retain(|v| keep.contains(v));
                !values.is_empty()
            }
        }
    }

    /// Non-empty intersection test.
    pub fn matches(&self, match_: &[String], values: &[String]) -> bool {
        let set: BTreeSet<&String> = match_.iter().collect();
        values.iter().any(|v| set.contains(v))
    }

    /// Second-pass hook, run after every keyword went through its first
    /// pass. Param + chem re-run table selection against the now-expanded
    /// siblings.
    pub(crate) fn pass2(
        self: &Rc<Self>,
        _ctx: &ExpandContext,
        request: &mut MarsRequest,
        strict: bool,
    ) -> Result<(), MyError> {
        match &self.kind {
            TypeKind::Param(t) => {
                let Ok(values) = request.values(&self.name, false) else {
                    return Ok(());
                };
                let new = t.expand_list(request, &values.to_vec(), strict)?;
                request.set_values_typed(Rc::clone(self), new);
                Ok(())
            }
            TypeKind::Chem(t) => {
                let Ok(values) = request.values(&self.name, false) else {
                    return Ok(());
                };
                let mut new = Vec::with_capacity(values.len());
                for v in values.to_vec() {
                    new.push(t.expand_one(&self.name, &v, strict)?);
                }
                request.set_values_typed(Rc::clone(self), new);
                Ok(())
            }
            TypeKind::Date(t) => t.pass2(&self.name, request, strict),
            _ => Ok(()),
        }
    }

    /// Apply `only`/`never` against the final expanded request; a violated
    /// rule (or the single value `off`) unsets the keyword.
    pub(crate) fn finalise(&self, request: &mut MarsRequest) {
        let values = request.values(&self.name, true).unwrap_or(&[]).to_vec();
        if values.is_empty() {
            return;
        }

        let mut ok = !(values.len() == 1 && values[0] == "off");

        for (key, only) in &self.only {
            if !ok {
                break;
            }
            for v in request.values(key, true).unwrap_or(&[]) {
                if !only.contains(v) {
                    ok = false;
                    break;
                }
            }
        }

        for (key, never) in &self.never {
            if !ok {
                break;
            }
            for v in request.values(key, true).unwrap_or(&[]) {
                if never.contains(v) {
                    ok = false;
                    break;
                }
            }
        }

        if !ok {
            debug!("finalise drops '{}' from {request}", self.name);
            request.unset(&self.name);
        }
    }

    /// The type in effect for this expansion: the base type, or a fresh one
    /// w/ every matching context overlay folded into its settings.
    pub(crate) fn effective(self: &Rc<Self>, request: &MarsRequest) -> Result<Rc<Type>, MyError> {
        let matched: Vec<&Value> = self
            .contexts
            .iter()
            .filter(|(c, _)| c.matches(request))
            .map(|(_, s)| s)
            .collect();
        if matched.is_empty() {
            return Ok(Rc::clone(self));
        }

        let mut merged = self.settings.clone();
        for overlay in matched {
            if let (Value::Object(base), Value::Object(over)) = (&mut merged, overlay) {
                for (k, v) in over {
                    if k != "match" {
                        base.insert(k.clone(), v.clone());
                    }
                }
            }
        }
        debug!("context overlay in effect for '{}'", self.name);
        Ok(Rc::new(Type::new(&self.name, &merged)?))
    }
}

// `only`/`never` come as a list of single-key mappings.
fn rule_sets(rules: Option<&Value>) -> Result<Vec<(String, BTreeSet<String>)>, MyError> {
    let Some(rules) = rules else {
        return Ok(vec![]);
    };
    let list = rules
        .as_array()
        .ok_or_else(|| MyError::Generic("only/never must be a list of mappings".into()))?;
    let mut out: Vec<(String, BTreeSet<String>)> = vec![];
    for item in list {
        let obj = item
            .as_object()
            .ok_or_else(|| MyError::Generic("only/never entries must be mappings".into()))?;
        for (key, v) in obj {
            let values: BTreeSet<String> = match v {
                Value::Array(a) => a.iter().map(scalar_string).collect(),
                other => BTreeSet::from([scalar_string(other)]),
            };
            match out.iter_mut().find(|(k, _)| k == key) {
                Some((_, set)) => set.extend(values),
                None => out.push((key.clone(), values)),
            }
        }
    }
    Ok(out)
}

fn scalar_string(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

thread_local! {
    // one canonical undefined sentinel per thread of requests.
    static UNDEFINED: Rc<Type> = Rc::new(Type::new_any("<undefined>"));
}

/// The shared "undefined type" sentinel carried by freshly parsed
/// parameters.
pub(crate) fn undefined() -> Rc<Type> {
    UNDEFINED.with(Rc::clone)
}

/// A passthrough type named after an arbitrary keyword.
pub(crate) fn any(name: &str) -> Rc<Type> {
    Rc::new(Type::new_any(name))
}
