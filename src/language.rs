// SPDX-License-Identifier: Apache-2.0

#![warn(missing_docs)]

//! One verb's keyword registry + the expansion pipeline.
//!
//! A [`Language`] owns the [`Type`]s of every keyword one verb understands,
//! loaded from the declarative language description embedded in the crate.
//! Expanding a request runs, in order:
//!
//! 1. a first pass expanding every present keyword through its type,
//! 2. context overlays, re-expanding keywords whose effective settings
//!    changed,
//! 3. the `pass2` hook of every keyword (param/chem table re-selection),
//! 4. default insertion for absent keywords,
//! 5. `finalise`, applying `only`/`never` and dropping invalidated keywords.
//!
//! The same registry drives flattening: the Cartesian product over
//! flatten-marked keywords in declaration order.
//!

use crate::{
    MyError,
    request::MarsRequest,
    types::{ExpandContext, Type},
};
use serde_json::Value;
use std::{rc::Rc, sync::OnceLock};
use tracing::{debug, warn};

static LANGUAGE_DOC: OnceLock<Value> = OnceLock::new();

// the embedded language description (§ language file).
fn language_doc() -> &'static Value {
    LANGUAGE_DOC.get_or_init(|| {
        serde_json::from_str(include_str!("../share/language.json"))
            .expect("malformed language description")
    })
}

/// The catalog of known verbs.
pub fn verbs() -> Vec<String> {
    language_doc()
        .as_object()
        .map(|m| m.keys().cloned().collect())
        .unwrap_or_default()
}

/// Resolve a possibly abbreviated verb to its canonical form.
pub fn expand_verb(verb: &str, strict: bool) -> Result<String, MyError> {
    let candidates = verbs();
    match best_match(verb, &candidates, strict, false)? {
        Some(v) => Ok(v),
        None => Err(MyError::User(format!("unknown verb '{verb}'").into())),
    }
}

/// Best-match resolution: exact (case-insensitive) beats prefix; a prefix
/// hit must be unique. W/ `fail` an ambiguous or unknown input is an error,
/// otherwise ambiguity degrades to the first candidate (w/ a diagnostic) and
/// unknown inputs yield `None`. `full_match` disables prefix matching.
pub fn best_match(
    what: &str,
    candidates: &[String],
    fail: bool,
    full_match: bool,
) -> Result<Option<String>, MyError> {
    let lower = what.to_ascii_lowercase();
    if let Some(hit) = candidates.iter().find(|c| c.to_ascii_lowercase() == lower) {
        return Ok(Some(hit.clone()));
    }
    if full_match {
        return if fail {
            Err(MyError::User(format!("unknown value '{what}'").into()))
        } else {
            Ok(None)
        };
    }

    let hits: Vec<&String> = candidates
        .iter()
        .filter(|c| c.to_ascii_lowercase().starts_with(&lower))
        .collect();
    match hits.len() {
        0 => {
            if fail {
                Err(MyError::User(format!("unknown value '{what}'").into()))
            } else {
                Ok(None)
            }
        }
        1 => Ok(Some(hits[0].clone())),
        _ => {
            if fail {
                Err(MyError::User(
                    format!("'{what}' is ambiguous: {hits:?}").into(),
                ))
            } else {
                warn!("'{what}' is ambiguous {hits:?}, using '{}'", hits[0]);
                Ok(Some(hits[0].clone()))
            }
        }
    }
}

/// The keyword registry + expansion engine of one verb.
pub struct Language {
    verb: String,
    types: Vec<(String, Rc<Type>)>,
}

impl Language {
    /// Build the language of a canonical verb from the embedded description.
    pub fn new(verb: &str) -> Result<Self, MyError> {
        let spec = language_doc().get(verb).ok_or_else(|| {
            MyError::Generic(format!("no language for verb '{verb}'").into())
        })?;
        let obj = spec.as_object().ok_or_else(|| {
            MyError::Generic(format!("language of '{verb}' is not a mapping").into())
        })?;

        let mut types = vec![];
        for (name, settings) in obj {
            types.push((name.clone(), Rc::new(Type::new(name, settings)?)));
        }
        Ok(Language {
            verb: verb.to_owned(),
            types,
        })
    }

    /// The canonical verb this language serves.
    pub fn verb(&self) -> &str {
        &self.verb
    }

    /// The keywords this language understands, in declaration order.
    pub fn keywords(&self) -> Vec<String> {
        self.types.iter().map(|(n, _)| n.clone()).collect()
    }

    /// Look a keyword type up by exact name.
    pub fn type_(&self, name: &str) -> Option<&Rc<Type>> {
        self.types.iter().find(|(n, _)| n == name).map(|(_, t)| t)
    }

    /// TRUE when the keyword belongs to the `data` category.
    pub fn is_data(&self, keyword: &str) -> bool {
        self.type_(keyword).is_some_and(|t| t.category() == "data")
    }

    /// Restore every keyword's original defaults.
    pub fn reset(&self) {
        for (_, t) in &self.types {
            t.reset();
        }
    }

    /// Best-effort canonicalization of one key/value pair --the
    /// normalization hop used by the metadata decoders.
    pub fn tidy(&self, ctx: &ExpandContext, key: &str, value: &str) -> String {
        match self.type_(key) {
            Some(t) => t.tidy(ctx, value),
            None => value.to_owned(),
        }
    }

    /// Expand a request (§ expansion pipeline above). `inherit` makes the
    /// expanded values become the defaults seen by the next expansion;
    /// `strict` escalates diagnostics to errors.
    pub fn expand(
        &self,
        ctx: &ExpandContext,
        request: &MarsRequest,
        inherit: bool,
        strict: bool,
    ) -> Result<MarsRequest, MyError> {
        let keywords = self.keywords();
        let mut result = MarsRequest::new(&self.verb);

        // 1. first pass, in parameter order...
        for p in request.parameters() {
            match best_match(p.name(), &keywords, strict, false)? {
                Some(name) => {
                    let type_ = self
                        .type_(&name)
                        .expect("best_match returned an unknown keyword")
                        .clone();
                    let mut values = p.values().to_vec();
                    match type_.expand_values(ctx, request, &mut values, strict) {
                        Ok(()) => {}
                        Err(MyError::User(msg)) if !strict => {
                            // best-effort: diagnose + keep the raw values.
                            warn!("{msg}; keeping {name}={:?}", p.values());
                            values = p.values().to_vec();
                        }
                        Err(e) => return Err(e),
                    }
                    result.set_values_typed(type_, values);
                }
                None => {
                    warn!("ignoring unknown keyword '{}' in {request}", p.name());
                }
            }
        }

        // 2. context overlays, re-expanding where settings changed...
        for name in result.params().iter().map(|s| s.to_string()).collect::<Vec<_>>() {
            let Some(base) = self.type_(&name) else {
                continue;
            };
            let eff = base.effective(&result)?;
            if !Rc::ptr_eq(&eff, base) {
                let mut values = result.values(&name, false)?.to_vec();
                match eff.expand_values(ctx, &result, &mut values, strict) {
                    Ok(()) => {}
                    Err(MyError::User(msg)) if !strict => {
                        warn!("{msg}; keeping {name} as is");
                        values = result.values(&name, false)?.to_vec();
                    }
                    Err(e) => return Err(e),
                }
                result.set_values_typed(eff, values);
            }
        }

        // 3. second pass hooks, in parameter order...
        let snapshot: Vec<Rc<Type>> = result.parameters().map(|p| p.type_().clone()).collect();
        for t in snapshot {
            t.pass2(ctx, &mut result, strict)?;
        }

        // 4. defaults for absent keywords, in declaration order...
        for (name, base) in &self.types {
            if result.has(name) {
                continue;
            }
            let eff = base.effective(&result)?;
            let mut defaults = eff.defaults();
            if defaults.is_empty() {
                continue;
            }
            eff.expand_values(ctx, &result, &mut defaults, strict)?;
            debug!("inserting default {name}={defaults:?}");
            result.set_values_typed(eff, defaults);
        }

        // 5. only/never against the final state...
        let snapshot: Vec<Rc<Type>> = result.parameters().map(|p| p.type_().clone()).collect();
        for t in snapshot {
            t.finalise(&mut result);
        }

        if inherit {
            for p in result.parameters() {
                if let Some(base) = self.type_(p.name()) {
                    base.set_defaults(p.values());
                }
            }
        }

        Ok(result)
    }

    /// Iterate the Cartesian product over flatten-marked keywords in
    /// declaration order, feeding each single-valued leaf to `callback`.
    pub fn flatten(
        &self,
        _ctx: &ExpandContext,
        request: &MarsRequest,
        callback: &mut dyn FnMut(&MarsRequest),
    ) {
        let mut leaf = request.clone();
        self.flatten_rec(request, 0, &mut leaf, callback);
    }

    fn flatten_rec(
        &self,
        request: &MarsRequest,
        i: usize,
        leaf: &mut MarsRequest,
        callback: &mut dyn FnMut(&MarsRequest),
    ) {
        let params: Vec<_> = request.parameters().collect();
        if i == params.len() {
            callback(leaf);
            return;
        }
        let p = params[i];
        if p.type_().flatten() && p.values().len() > 1 {
            for v in p.values() {
                leaf.set_values_typed(p.type_().clone(), vec![v.clone()]);
                self.flatten_rec(request, i + 1, leaf, callback);
            }
            // restore the full list for sibling branches...
            leaf.set_values_typed(p.type_().clone(), p.values().to_vec());
        } else {
            self.flatten_rec(request, i + 1, leaf, callback);
        }
    }
}
