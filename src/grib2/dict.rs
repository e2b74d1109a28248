// SPDX-License-Identifier: Apache-2.0

#![warn(missing_docs)]

//! The dictionary trait layer: uniform typed get/set over heterogeneous
//! property bags.
//!

use crate::{MyError, request::MarsRequest};
use core::fmt;

/// A typed dictionary value.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// Integral value.
    Long(i64),
    /// Floating point value.
    Double(f64),
    /// Boolean value.
    Bool(bool),
    /// String value.
    Str(String),
    /// Numeric payload.
    Doubles(Vec<f64>),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Long(x) => write!(f, "{x}"),
            Value::Double(x) => write!(f, "{x}"),
            Value::Bool(x) => write!(f, "{x}"),
            Value::Str(x) => write!(f, "{x}"),
            Value::Doubles(x) => write!(f, "[{} values]", x.len()),
        }
    }
}

/// The property-bag contract shared by every encoding back-end.
pub trait Dictionary {
    /// TRUE when `key` is present.
    fn has(&self, key: &str) -> bool;

    /// The raw value of `key`, if any.
    fn get(&self, key: &str) -> Option<&Value>;

    /// Set (or overwrite) `key`.
    fn set(&mut self, key: &str, value: Value) -> Result<(), MyError>;

    /// Whether post-encode checks can read this dictionary back.
    fn supports_checks(&self) -> bool {
        true
    }

    /// Whether the override stage may rewrite existing keys.
    fn override_enabled(&self) -> bool {
        true
    }
}

/// Conversion out of a dictionary [`Value`].
pub trait FromValue: Sized {
    /// Extract `Self`, tolerating the natural widenings (a numeric string
    /// reads fine as a long).
    fn from_value(v: &Value) -> Option<Self>;
    /// Human-readable type label for diagnostics.
    const LABEL: &'static str;
}

impl FromValue for i64 {
    fn from_value(v: &Value) -> Option<Self> {
        match v {
            Value::Long(x) => Some(*x),
            Value::Str(s) => s.trim().parse().ok(),
            _ => None,
        }
    }
    const LABEL: &'static str = "long";
}

impl FromValue for f64 {
    fn from_value(v: &Value) -> Option<Self> {
        match v {
            Value::Double(x) => Some(*x),
            Value::Long(x) => Some(*x as f64),
            Value::Str(s) => s.trim().parse().ok(),
            _ => None,
        }
    }
    const LABEL: &'static str = "double";
}

impl FromValue for bool {
    fn from_value(v: &Value) -> Option<Self> {
        match v {
            Value::Bool(x) => Some(*x),
            Value::Long(x) => Some(*x != 0),
            _ => None,
        }
    }
    const LABEL: &'static str = "bool";
}

impl FromValue for String {
    fn from_value(v: &Value) -> Option<Self> {
        match v {
            Value::Str(s) => Some(s.clone()),
            Value::Long(x) => Some(x.to_string()),
            Value::Double(x) => Some(x.to_string()),
            _ => None,
        }
    }
    const LABEL: &'static str = "string";
}

impl FromValue for Vec<f64> {
    fn from_value(v: &Value) -> Option<Self> {
        match v {
            Value::Doubles(x) => Some(x.clone()),
            _ => None,
        }
    }
    const LABEL: &'static str = "vector<double>";
}

/// Typed read; a missing or unconvertible key is a deduction failure.
pub fn get_or_throw<T: FromValue>(d: &dyn Dictionary, key: &str) -> Result<T, MyError> {
    match d.get(key) {
        Some(v) => T::from_value(v).ok_or_else(|| {
            MyError::Deduction(format!("key '{key}' is not a {}: {v}", T::LABEL).into())
        }),
        None => Err(MyError::Deduction(format!("key '{key}' is missing").into())),
    }
}

/// Typed read of an optional key.
pub fn get_opt<T: FromValue>(d: &dyn Dictionary, key: &str) -> Option<T> {
    d.get(key).and_then(T::from_value)
}

/// Typed write.
pub fn set_or_throw(d: &mut dyn Dictionary, key: &str, value: Value) -> Result<(), MyError> {
    d.set(key, value)
}

/// The ordered in-memory dictionary used as the encoder output.
#[derive(Clone, Debug, Default)]
pub struct OutDict {
    entries: Vec<(String, Value)>,
}

impl OutDict {
    /// An empty dictionary.
    pub fn new() -> Self {
        OutDict::default()
    }

    /// Iterate entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// TRUE when nothing was set yet.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Dictionary for OutDict {
    fn has(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    fn get(&self, key: &str) -> Option<&Value> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    fn set(&mut self, key: &str, value: Value) -> Result<(), MyError> {
        match self.entries.iter_mut().find(|(k, _)| k == key) {
            Some((_, v)) => *v = value,
            None => self.entries.push((key.to_owned(), value)),
        }
        Ok(())
    }
}

/// Snapshot a request as a read-only dictionary: single values become longs
/// when they parse, strings otherwise; lists join w/ `/`.
pub fn mars_dict(request: &MarsRequest) -> OutDict {
    let mut d = OutDict::new();
    for p in request.parameters() {
        let v = match p.values() {
            [single] => match single.parse::<i64>() {
                Ok(n) => Value::Long(n),
                Err(_) => Value::Str(single.clone()),
            },
            many => Value::Str(many.join("/")),
        };
        let _ = d.set(p.name(), v);
    }
    d
}
