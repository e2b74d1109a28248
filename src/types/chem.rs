// SPDX-License-Identifier: Apache-2.0

#![warn(missing_docs)]

//! Chemistry constituent keywords --the `param` pattern over the WMO
//! constituent-type table.
//!

use crate::MyError;
use serde_json::Value;
use std::sync::OnceLock;
use tracing::warn;
use unicase::UniCase;

#[derive(Debug)]
struct Entry {
    id: String,
    aliases: Vec<String>,
}

static TABLE: OnceLock<Vec<Entry>> = OnceLock::new();

fn table() -> &'static [Entry] {
    TABLE.get_or_init(|| {
        parse_table(include_str!("../../share/chem.json")).expect("malformed chem table")
    })
}

fn parse_table(text: &str) -> Result<Vec<Entry>, MyError> {
    let doc: Value = serde_json::from_str(text)?;
    let Value::Array(rows) = doc else {
        return Err(MyError::Generic("chem table is not a list".into()));
    };
    let mut out = vec![];
    for row in &rows {
        let Value::Array(row) = row else {
            return Err(MyError::Generic("chem row is not a list".into()));
        };
        let id = match row.first() {
            Some(Value::Number(n)) => n.to_string(),
            Some(Value::String(s)) => s.clone(),
            _ => return Err(MyError::Generic("chem row w/o id".into())),
        };
        let aliases = row[1..]
            .iter()
            .map(|x| x.as_str().map(str::to_owned))
            .collect::<Option<Vec<_>>>()
            .ok_or_else(|| MyError::Generic("bad chem aliases".into()))?;
        out.push(Entry { id, aliases });
    }
    Ok(out)
}

/// Chem keyword payload.
#[derive(Clone, Debug)]
pub(crate) struct TypeChem;

impl TypeChem {
    pub(crate) fn new(_settings: &Value) -> Result<Self, MyError> {
        Ok(TypeChem)
    }

    pub(crate) fn expand_one(
        &self,
        name: &str,
        value: &str,
        strict: bool,
    ) -> Result<String, MyError> {
        if !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit()) {
            let n: i64 = value.parse().map_err(|_| {
                MyError::User(format!("'{value}' is not a valid constituent code").into())
            })?;
            return Ok(n.to_string());
        }

        let probe = UniCase::new(value);
        if let Some(e) = table()
            .iter()
            .find(|e| e.aliases.iter().any(|a| UniCase::new(a.as_str()) == probe))
        {
            return Ok(e.id.clone());
        }

        if strict {
            Err(MyError::User(
                format!("unknown constituent '{value}' for '{name}'").into(),
            ))
        } else {
            warn!("unknown constituent '{value}', keeping as is");
            Ok(value.to_owned())
        }
    }
}
