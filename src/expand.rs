// SPDX-License-Identifier: Apache-2.0

#![warn(missing_docs)]

//! The expansion driver: a per-verb cache of [`Language`]s plus the
//! inherit/strict policy of one expansion session.
//!

use crate::{
    MyError,
    language::{self, Language},
    request::MarsRequest,
    types::ExpandContext,
};
use std::collections::HashMap;
use tracing::debug;

/// Drives request expansion across verbs.
pub struct MarsExpansion {
    inherit: bool,
    strict: bool,
    ctx: ExpandContext,
    languages: HashMap<String, Language>,
}

impl MarsExpansion {
    /// A driver w/ the given inheritance + strictness policy, anchored at
    /// the real wall clock.
    pub fn new(inherit: bool, strict: bool) -> Self {
        Self::with_context(inherit, strict, ExpandContext::new())
    }

    /// Same, but w/ an explicit expansion context (fixed wall clock).
    pub fn with_context(inherit: bool, strict: bool, ctx: ExpandContext) -> Self {
        MarsExpansion {
            inherit,
            strict,
            ctx,
            languages: HashMap::new(),
        }
    }

    // the language serving `verb`, creating it on first use.
    fn language(&mut self, verb: &str) -> Result<&Language, MyError> {
        let v = language::expand_verb(verb, self.strict)?;
        if !self.languages.contains_key(&v) {
            debug!("loading language for '{v}'");
            self.languages.insert(v.clone(), Language::new(&v)?);
        }
        Ok(&self.languages[&v])
    }

    /// Expand a batch of requests in order.
    pub fn expand(&mut self, requests: &[MarsRequest]) -> Result<Vec<MarsRequest>, MyError> {
        requests.iter().map(|r| self.expand_one(r)).collect()
    }

    /// Expand a single request.
    pub fn expand_one(&mut self, request: &MarsRequest) -> Result<MarsRequest, MyError> {
        let (inherit, strict, ctx) = (self.inherit, self.strict, self.ctx.clone());
        let lang = self.language(request.verb())?;
        lang.expand(&ctx, request, inherit, strict)
    }

    /// Expand, then hand the result to `callback`.
    pub fn expand_with(
        &mut self,
        request: &MarsRequest,
        callback: &mut dyn FnMut(&MarsRequest),
    ) -> Result<(), MyError> {
        let r = self.expand_one(request)?;
        callback(&r);
        Ok(())
    }

    /// Flatten an (already expanded) request through the language of its
    /// verb.
    pub fn flatten(
        &mut self,
        request: &MarsRequest,
        callback: &mut dyn FnMut(&MarsRequest),
    ) -> Result<(), MyError> {
        let ctx = self.ctx.clone();
        let lang = self.language(request.verb())?;
        lang.flatten(&ctx, request, callback);
        Ok(())
    }

    /// Restore the original defaults of every language touched so far.
    pub fn reset(&mut self) {
        for lang in self.languages.values() {
            lang.reset();
        }
    }
}
