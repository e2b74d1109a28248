// SPDX-License-Identifier: Apache-2.0

#![warn(missing_docs)]
#![allow(non_camel_case_types)]

//! The opaque-handle C ABI.
//!
//! Every function returns an error code; string results go out through
//! `const char*` pointers that stay valid until the next call on the same
//! handle. Panics never cross the boundary --they come back as
//! `MARSKIT_ERROR_ASSERT`.
//!

use crate::{MyError, expand::MarsExpansion, request::MarsRequest, text};
use std::{
    ffi::{CStr, CString},
    os::raw::{c_char, c_int},
    panic::{AssertUnwindSafe, catch_unwind},
};

/// Operation succeeded.
pub const MARSKIT_SUCCESS: c_int = 0;
/// Operation failed.
pub const MARSKIT_ERROR: c_int = 1;
/// Failed w/ an unknown error.
pub const MARSKIT_ERROR_UNKNOWN: c_int = 2;
/// Failed w/ a user error.
pub const MARSKIT_ERROR_USER: c_int = 3;
/// Failed w/ an assertion (panic).
pub const MARSKIT_ERROR_ASSERT: c_int = 4;

/// Iterator: an element is available.
pub const MARSKIT_ITERATOR_SUCCESS: c_int = 0;
/// Iterator: all elements have been returned.
pub const MARSKIT_ITERATOR_COMPLETE: c_int = 1;
/// Iterator: failed; treat as fatal.
pub const MARSKIT_ITERATOR_ERROR: c_int = 2;

/// Opaque request handle.
pub struct marsrequest_t {
    inner: MarsRequest,
    // buffers for strings returned through this handle.
    buf: Vec<CString>,
}

/// Opaque iterator over parsed requests.
pub struct requestiterator_t {
    items: Vec<MarsRequest>,
    pos: Option<usize>,
}

/// Opaque iterator over a request's parameter names.
pub struct paramiterator_t {
    names: Vec<CString>,
    pos: Option<usize>,
}

fn code_of(e: &MyError) -> c_int {
    match e {
        MyError::User(_) => MARSKIT_ERROR_USER,
        MyError::Text(_) => MARSKIT_ERROR_USER,
        _ => MARSKIT_ERROR,
    }
}

fn guarded(f: impl FnOnce() -> c_int) -> c_int {
    catch_unwind(AssertUnwindSafe(f)).unwrap_or(MARSKIT_ERROR_ASSERT)
}

// SAFETY helpers: every pointer dereference in this module is guarded by an
// explicit null check; the caller owns pointer validity.
unsafe fn str_arg<'a>(p: *const c_char) -> Option<&'a str> {
    if p.is_null() {
        return None;
    }
    unsafe { CStr::from_ptr(p) }.to_str().ok()
}

impl marsrequest_t {
    fn stash(&mut self, s: &str) -> *const c_char {
        self.buf.clear();
        match CString::new(s) {
            Ok(c) => {
                self.buf.push(c);
                self.buf[0].as_ptr()
            }
            Err(_) => std::ptr::null(),
        }
    }
}

/// A stable label for an error code.
#[unsafe(no_mangle)]
pub extern "C" fn marskit_get_error_string(code: c_int) -> *const c_char {
    let label: &'static [u8] = match code {
        MARSKIT_SUCCESS => b"success\0",
        MARSKIT_ERROR => b"error\0",
        MARSKIT_ERROR_UNKNOWN => b"unknown error\0",
        MARSKIT_ERROR_USER => b"user error\0",
        MARSKIT_ERROR_ASSERT => b"assertion failed\0",
        _ => b"invalid error code\0",
    };
    label.as_ptr() as *const c_char
}

/// The crate semver string.
#[unsafe(no_mangle)]
pub extern "C" fn marskit_version(out: *mut *const c_char) -> c_int {
    if out.is_null() {
        return MARSKIT_ERROR;
    }
    const VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), "\0");
    unsafe { *out = VERSION.as_ptr() as *const c_char };
    MARSKIT_SUCCESS
}

/// The VCS revision string.
#[unsafe(no_mangle)]
pub extern "C" fn marskit_vcs_version(out: *mut *const c_char) -> c_int {
    if out.is_null() {
        return MARSKIT_ERROR;
    }
    static REV: std::sync::OnceLock<CString> = std::sync::OnceLock::new();
    let rev = REV.get_or_init(|| {
        CString::new(crate::version::vcs_version()).unwrap_or_else(|_| c"unknown".into())
    });
    unsafe { *out = rev.as_ptr() };
    MARSKIT_SUCCESS
}

/// Allocate an empty request handle.
#[unsafe(no_mangle)]
pub extern "C" fn marskit_new_request(out: *mut *mut marsrequest_t) -> c_int {
    if out.is_null() {
        return MARSKIT_ERROR;
    }
    let h = Box::new(marsrequest_t {
        inner: MarsRequest::default(),
        buf: vec![],
    });
    unsafe { *out = Box::into_raw(h) };
    MARSKIT_SUCCESS
}

/// Free a request handle.
///
/// # Safety
/// `request` must come from this library and not be used afterwards.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn marskit_free_request(request: *mut marsrequest_t) -> c_int {
    if !request.is_null() {
        drop(unsafe { Box::from_raw(request) });
    }
    MARSKIT_SUCCESS
}

/// Set a parameter to a list of values.
///
/// # Safety
/// All pointers must be valid; `values` must hold `num_values` C strings.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn marskit_request_set(
    request: *mut marsrequest_t,
    param: *const c_char,
    values: *const *const c_char,
    num_values: c_int,
) -> c_int {
    guarded(|| {
        let Some(r) = (unsafe { request.as_mut() }) else {
            return MARSKIT_ERROR;
        };
        let Some(param) = (unsafe { str_arg(param) }) else {
            return MARSKIT_ERROR;
        };
        if values.is_null() || num_values < 1 {
            return MARSKIT_ERROR;
        }
        let mut vv = vec![];
        for i in 0..num_values as usize {
            let p = unsafe { *values.add(i) };
            match unsafe { str_arg(p) } {
                Some(s) => vv.push(s.to_owned()),
                None => return MARSKIT_ERROR,
            }
        }
        r.inner.set_values(param, vv);
        MARSKIT_SUCCESS
    })
}

/// Set a parameter to a single value.
///
/// # Safety
/// All pointers must be valid C strings.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn marskit_request_set_one(
    request: *mut marsrequest_t,
    param: *const c_char,
    value: *const c_char,
) -> c_int {
    unsafe { marskit_request_set(request, param, &value, 1) }
}

/// Replace the request verb.
///
/// # Safety
/// All pointers must be valid.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn marskit_request_set_verb(
    request: *mut marsrequest_t,
    verb: *const c_char,
) -> c_int {
    guarded(|| {
        match (unsafe { request.as_mut() }, unsafe { str_arg(verb) }) {
            (Some(r), Some(v)) => {
                r.inner.set_verb(v);
                MARSKIT_SUCCESS
            }
            _ => MARSKIT_ERROR,
        }
    })
}

/// Read the request verb.
///
/// # Safety
/// All pointers must be valid; the result lives until the next call on
/// `request`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn marskit_request_verb(
    request: *mut marsrequest_t,
    out: *mut *const c_char,
) -> c_int {
    guarded(|| {
        let Some(r) = (unsafe { request.as_mut() }) else {
            return MARSKIT_ERROR;
        };
        if out.is_null() {
            return MARSKIT_ERROR;
        }
        let verb = r.inner.verb().to_owned();
        unsafe { *out = r.stash(&verb) };
        MARSKIT_SUCCESS
    })
}

/// TRUE through `has` when the parameter is present.
///
/// # Safety
/// All pointers must be valid.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn marskit_request_has_param(
    request: *const marsrequest_t,
    param: *const c_char,
    has: *mut bool,
) -> c_int {
    guarded(|| {
        match (unsafe { request.as_ref() }, unsafe { str_arg(param) }) {
            (Some(r), Some(p)) if !has.is_null() => {
                unsafe { *has = r.inner.has(p) };
                MARSKIT_SUCCESS
            }
            _ => MARSKIT_ERROR,
        }
    })
}

/// Iterate the request's parameter names.
///
/// # Safety
/// All pointers must be valid. Free the iterator w/
/// [`marskit_free_paramiterator`].
#[unsafe(no_mangle)]
pub unsafe extern "C" fn marskit_request_params(
    request: *const marsrequest_t,
    out: *mut *mut paramiterator_t,
) -> c_int {
    guarded(|| {
        let Some(r) = (unsafe { request.as_ref() }) else {
            return MARSKIT_ERROR;
        };
        if out.is_null() {
            return MARSKIT_ERROR;
        }
        let names: Vec<CString> = r
            .inner
            .params()
            .into_iter()
            .filter_map(|n| CString::new(n).ok())
            .collect();
        let it = Box::new(paramiterator_t { names, pos: None });
        unsafe { *out = Box::into_raw(it) };
        MARSKIT_SUCCESS
    })
}

/// Number of values of one parameter.
///
/// # Safety
/// All pointers must be valid.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn marskit_request_count_values(
    request: *const marsrequest_t,
    param: *const c_char,
    count: *mut usize,
) -> c_int {
    guarded(|| {
        match (unsafe { request.as_ref() }, unsafe { str_arg(param) }) {
            (Some(r), Some(p)) if !count.is_null() => {
                unsafe { *count = r.inner.count_values(p) };
                MARSKIT_SUCCESS
            }
            _ => MARSKIT_ERROR,
        }
    })
}

/// One value of one parameter by index.
///
/// # Safety
/// All pointers must be valid; the result lives until the next call on
/// `request`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn marskit_request_value(
    request: *mut marsrequest_t,
    param: *const c_char,
    index: c_int,
    out: *mut *const c_char,
) -> c_int {
    guarded(|| {
        let Some(r) = (unsafe { request.as_mut() }) else {
            return MARSKIT_ERROR;
        };
        let Some(p) = (unsafe { str_arg(param) }) else {
            return MARSKIT_ERROR;
        };
        if out.is_null() || index < 0 {
            return MARSKIT_ERROR;
        }
        let value = match r.inner.values(p, false) {
            Ok(vv) => match vv.get(index as usize) {
                Some(v) => v.clone(),
                None => return MARSKIT_ERROR_USER,
            },
            Err(e) => return code_of(&e),
        };
        unsafe { *out = r.stash(&value) };
        MARSKIT_SUCCESS
    })
}

/// Expand `request` into `expanded`.
///
/// # Safety
/// Both handles must be valid and distinct.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn marskit_request_expand(
    request: *const marsrequest_t,
    expanded: *mut marsrequest_t,
    inherit: bool,
    strict: bool,
) -> c_int {
    guarded(|| {
        match (unsafe { request.as_ref() }, unsafe { expanded.as_mut() }) {
            (Some(r), Some(x)) => {
                let mut driver = MarsExpansion::new(inherit, strict);
                match driver.expand_one(&r.inner) {
                    Ok(result) => {
                        x.inner = result;
                        MARSKIT_SUCCESS
                    }
                    Err(e) => code_of(&e),
                }
            }
            _ => MARSKIT_ERROR,
        }
    })
}

/// Merge `other` into `request`.
///
/// # Safety
/// Both handles must be valid.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn marskit_request_merge(
    request: *mut marsrequest_t,
    other: *const marsrequest_t,
) -> c_int {
    guarded(|| {
        match (unsafe { request.as_mut() }, unsafe { other.as_ref() }) {
            (Some(r), Some(o)) => {
                r.inner.merge(&o.inner);
                MARSKIT_SUCCESS
            }
            _ => MARSKIT_ERROR,
        }
    })
}

/// Parse a string of requests into an iterator.
///
/// # Safety
/// All pointers must be valid. Free the iterator w/
/// [`marskit_free_requestiterator`].
#[unsafe(no_mangle)]
pub unsafe extern "C" fn marskit_parse_marsrequests(
    text_ptr: *const c_char,
    out: *mut *mut requestiterator_t,
    strict: bool,
) -> c_int {
    guarded(|| {
        let Some(s) = (unsafe { str_arg(text_ptr) }) else {
            return MARSKIT_ERROR;
        };
        if out.is_null() {
            return MARSKIT_ERROR;
        }
        let parsed = match text::mars::requests(s) {
            Ok(p) => p,
            Err(_) => return MARSKIT_ERROR_USER,
        };
        let mut driver = MarsExpansion::new(false, strict);
        let items = match driver.expand(&parsed) {
            Ok(items) => items,
            Err(e) => return code_of(&e),
        };
        let it = Box::new(requestiterator_t { items, pos: None });
        unsafe { *out = Box::into_raw(it) };
        MARSKIT_SUCCESS
    })
}

/// Advance the request iterator.
///
/// # Safety
/// The handle must be valid.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn marskit_requestiterator_next(it: *mut requestiterator_t) -> c_int {
    guarded(|| {
        let Some(it) = (unsafe { it.as_mut() }) else {
            return MARSKIT_ITERATOR_ERROR;
        };
        let next = it.pos.map_or(0, |p| p + 1);
        if next < it.items.len() {
            it.pos = Some(next);
            MARSKIT_ITERATOR_SUCCESS
        } else {
            it.pos = Some(it.items.len());
            MARSKIT_ITERATOR_COMPLETE
        }
    })
}

/// Copy the iterator's current request into a handle.
///
/// # Safety
/// Both handles must be valid; `next` must have succeeded.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn marskit_requestiterator_current(
    it: *const requestiterator_t,
    request: *mut marsrequest_t,
) -> c_int {
    guarded(|| {
        match (unsafe { it.as_ref() }, unsafe { request.as_mut() }) {
            (Some(it), Some(r)) => match it.pos.and_then(|p| it.items.get(p)) {
                Some(current) => {
                    r.inner = current.clone();
                    MARSKIT_ITERATOR_SUCCESS
                }
                None => MARSKIT_ITERATOR_ERROR,
            },
            _ => MARSKIT_ITERATOR_ERROR,
        }
    })
}

/// Free a request iterator.
///
/// # Safety
/// The handle must come from this library and not be used afterwards.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn marskit_free_requestiterator(it: *mut requestiterator_t) -> c_int {
    if !it.is_null() {
        drop(unsafe { Box::from_raw(it) });
    }
    MARSKIT_SUCCESS
}

/// Advance the parameter-name iterator.
///
/// # Safety
/// The handle must be valid.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn marskit_paramiterator_next(it: *mut paramiterator_t) -> c_int {
    guarded(|| {
        let Some(it) = (unsafe { it.as_mut() }) else {
            return MARSKIT_ITERATOR_ERROR;
        };
        let next = it.pos.map_or(0, |p| p + 1);
        if next < it.names.len() {
            it.pos = Some(next);
            MARSKIT_ITERATOR_SUCCESS
        } else {
            it.pos = Some(it.names.len());
            MARSKIT_ITERATOR_COMPLETE
        }
    })
}

/// The current parameter name; valid while the iterator lives.
///
/// # Safety
/// All pointers must be valid; `next` must have succeeded.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn marskit_paramiterator_param(
    it: *const paramiterator_t,
    out: *mut *const c_char,
) -> c_int {
    guarded(|| {
        let Some(it) = (unsafe { it.as_ref() }) else {
            return MARSKIT_ITERATOR_ERROR;
        };
        if out.is_null() {
            return MARSKIT_ITERATOR_ERROR;
        }
        match it.pos.and_then(|p| it.names.get(p)) {
            Some(name) => {
                unsafe { *out = name.as_ptr() };
                MARSKIT_ITERATOR_SUCCESS
            }
            None => MARSKIT_ITERATOR_ERROR,
        }
    })
}

/// Free a parameter-name iterator.
///
/// # Safety
/// The handle must come from this library and not be used afterwards.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn marskit_free_paramiterator(it: *mut paramiterator_t) -> c_int {
    if !it.is_null() {
        drop(unsafe { Box::from_raw(it) });
    }
    MARSKIT_SUCCESS
}
