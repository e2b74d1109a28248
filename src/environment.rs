// SPDX-License-Identifier: Apache-2.0

#![warn(missing_docs)]

//! The process-wide request environment: host, user, pid and client tag,
//! captured once and exposed as an `environ`-verb request.
//!

use crate::request::MarsRequest;
use std::sync::{Mutex, OnceLock};

#[derive(Debug)]
struct Environment {
    // key/value pairs of the environ request; guarded for `update`.
    entries: Mutex<Vec<(String, String)>>,
}

static ENVIRONMENT: OnceLock<Environment> = OnceLock::new();

fn instance() -> &'static Environment {
    ENVIRONMENT.get_or_init(|| Environment {
        entries: Mutex::new(vec![
            ("host".into(), hostname()),
            ("user".into(), username()),
            ("pid".into(), std::process::id().to_string()),
            (
                "client".into(),
                format!("marskit/{}", crate::version::version()),
            ),
        ]),
    })
}

fn hostname() -> String {
    std::env::var("HOSTNAME")
        .or_else(|_| std::env::var("HOST"))
        .unwrap_or_else(|_| "localhost".into())
}

fn username() -> String {
    std::env::var("USER")
        .or_else(|_| std::env::var("LOGNAME"))
        .unwrap_or_else(|_| "unknown".into())
}

/// The current environment as an `environ` request.
pub fn request() -> MarsRequest {
    let entries = instance().entries.lock().expect("environment poisoned");
    let mut r = MarsRequest::new("environ");
    for (key, value) in entries.iter() {
        r.set_values(key, vec![value.clone()]);
    }
    r
}

/// Update one field of the shared environment.
pub fn update(key: &str, value: &str) {
    let mut entries = instance().entries.lock().expect("environment poisoned");
    match entries.iter_mut().find(|(k, _)| k == key) {
        Some((_, v)) => *v = value.to_owned(),
        None => entries.push((key.to_owned(), value.to_owned())),
    }
}
