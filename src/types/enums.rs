// SPDX-License-Identifier: Apache-2.0

#![warn(missing_docs)]

//! Enumerated keywords: a case-insensitive table of `alias -> canonical`.
//!
//! Matching is `equal` first then unique-`prefix`; an ambiguous prefix is an
//! error under strict expansion and a best-guess otherwise. A table entry may
//! carry several canonicals ("groups"), in which case one alias fans out to
//! the whole list. Large tables can live in an external values file loaded
//! lazily exactly once.
//!

use crate::{MyError, types::Expanded};
use serde_json::Value;
use std::{cell::RefCell, collections::HashMap};
use tracing::{debug, warn};
use unicase::UniCase;

#[derive(Clone, Debug)]
struct Entry {
    canonicals: Vec<String>,
}

#[derive(Clone, Debug, Default)]
struct Table {
    entries: Vec<Entry>,
    // alias -> entry index, compared case-insensitively
    index: HashMap<UniCase<String>, u16>,
}

impl Table {
    fn add(&mut self, entry: &Value, uppercase: bool) -> Result<(), MyError> {
        let (canonicals, aliases): (Vec<String>, Vec<String>) = match entry {
            Value::String(s) => (vec![recase(s, uppercase)], vec![s.clone()]),
            Value::Array(items) if !items.is_empty() => {
                let canonicals = match &items[0] {
                    // a grouped entry: one alias expands to a list...
                    Value::Array(group) => group
                        .iter()
                        .map(|v| as_string(v).map(|s| recase(&s, uppercase)))
                        .collect::<Result<_, _>>()?,
                    other => vec![recase(&as_string(other)?, uppercase)],
                };
                // group members do not alias the group itself; only the
                // names that follow do.
                let mut aliases: Vec<String> = vec![];
                for item in items {
                    match item {
                        Value::Array(_) => {}
                        other => aliases.push(as_string(other)?),
                    }
                }
                (canonicals, aliases)
            }
            _ => {
                return Err(MyError::Generic("malformed enum values entry".into()));
            }
        };

        let idx = self.entries.len() as u16;
        self.entries.push(Entry { canonicals });
        for a in aliases {
            let key = UniCase::new(a);
            if self.index.contains_key(&key) {
                debug!("enum alias '{key}' already mapped, first mapping wins");
                continue;
            }
            self.index.insert(key, idx);
        }
        Ok(())
    }
}

fn as_string(v: &Value) -> Result<String, MyError> {
    match v {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        _ => Err(MyError::Generic("enum values must be strings".into())),
    }
}

fn recase(s: &str, uppercase: bool) -> String {
    if uppercase {
        s.to_ascii_uppercase()
    } else {
        s.to_ascii_lowercase()
    }
}

/// Enum keyword payload.
#[derive(Clone, Debug)]
pub(crate) struct TypeEnum {
    uppercase: bool,
    values_file: Option<String>,
    table: RefCell<Table>,
    // one-shot flag protecting the lazy values-file load
    loaded: RefCell<bool>,
}

impl TypeEnum {
    pub(crate) fn new(name: &str, settings: &Value) -> Result<Self, MyError> {
        let uppercase = settings
            .get("uppercase")
            .and_then(Value::as_bool)
            .unwrap_or(false);

        let mut table = Table::default();
        if let Some(Value::Array(vv)) = settings.get("values") {
            for entry in vv {
                table.add(entry, uppercase)?;
            }
        } else if settings.get("values-file").is_none() {
            return Err(MyError::Generic(
                format!("enum '{name}' has neither 'values' nor 'values-file'").into(),
            ));
        }

        Ok(TypeEnum {
            uppercase,
            values_file: settings
                .get("values-file")
                .and_then(Value::as_str)
                .map(str::to_owned),
            table: RefCell::new(table),
            loaded: RefCell::new(false),
        })
    }

    // load the external values file on first use, exactly once.
    fn ensure_loaded(&self) -> Result<(), MyError> {
        let Some(path) = &self.values_file else {
            return Ok(());
        };
        let mut loaded = self.loaded.borrow_mut();
        if *loaded {
            return Ok(());
        }
        *loaded = true;

        let text = std::fs::read_to_string(path)?;
        let doc: Value = serde_json::from_str(&text)?;
        let Value::Array(vv) = &doc else {
            return Err(MyError::Generic(
                format!("values file '{path}' is not a list").into(),
            ));
        };
        let mut table = self.table.borrow_mut();
        for entry in vv {
            table.add(entry, self.uppercase)?;
        }
        debug!("loaded {} enum entries from '{path}'", vv.len());
        Ok(())
    }

    pub(crate) fn expand_one(
        &self,
        name: &str,
        value: &str,
        strict: bool,
    ) -> Result<Expanded, MyError> {
        self.ensure_loaded()?;

        let table = self.table.borrow();

        // equal beats prefix...
        if let Some(&i) = table.index.get(&UniCase::new(value.to_owned())) {
            return Ok(entry_value(&table.entries[i as usize]));
        }

        // ...then a unique prefix wins; two distinct entries sharing the
        // prefix make it ambiguous.
        let key = value.to_ascii_lowercase();
        let mut hits: Vec<(String, u16)> = table
            .index
            .iter()
            .map(|(alias, &i)| (alias.to_string(), i))
            .filter(|(alias, _)| alias.to_ascii_lowercase().starts_with(&key))
            .collect();
        hits.sort();
        let mut seen = std::collections::BTreeSet::new();
        hits.retain(|(_, i)| seen.insert(*i));

        match hits.len() {
            0 => {
                if strict {
                    Err(MyError::User(
                        format!("'{value}' is not a valid value for '{name}'").into(),
                    ))
                } else {
                    warn!("'{value}' is not a valid value for '{name}', keeping as is");
                    Ok(Expanded::One(value.to_owned()))
                }
            }
            1 => Ok(entry_value(&table.entries[hits[0].1 as usize])),
            _ => {
                let candidates: Vec<&str> = hits.iter().map(|(a, _)| a.as_str()).collect();
                if strict {
                    Err(MyError::User(
                        format!("'{value}' is ambiguous for '{name}': {candidates:?}").into(),
                    ))
                } else {
                    warn!("'{value}' is ambiguous for '{name}' {candidates:?}, using first");
                    Ok(entry_value(&table.entries[hits[0].1 as usize]))
                }
            }
        }
    }
}

fn entry_value(e: &Entry) -> Expanded {
    if e.canonicals.len() == 1 {
        Expanded::One(e.canonicals[0].clone())
    } else {
        Expanded::Many(e.canonicals.clone())
    }
}
