// SPDX-License-Identifier: Apache-2.0

//! Build, expand + iterate requests through the C surface only.
//!

use marskit::capi::*;
use std::ffi::CStr;
use std::os::raw::c_char;
use std::ptr;

#[test]
fn test_build_expand_read_back() {
    unsafe {
        let mut h: *mut marsrequest_t = ptr::null_mut();
        assert_eq!(marskit_new_request(&mut h), MARSKIT_SUCCESS);
        assert_eq!(
            marskit_request_set_verb(h, c"retrieve".as_ptr()),
            MARSKIT_SUCCESS
        );
        assert_eq!(
            marskit_request_set_one(h, c"date".as_ptr(), c"20250314".as_ptr()),
            MARSKIT_SUCCESS
        );
        assert_eq!(
            marskit_request_set_one(h, c"levtype".as_ptr(), c"sfc".as_ptr()),
            MARSKIT_SUCCESS
        );
        assert_eq!(
            marskit_request_set_one(h, c"param".as_ptr(), c"2t".as_ptr()),
            MARSKIT_SUCCESS
        );

        let mut x: *mut marsrequest_t = ptr::null_mut();
        assert_eq!(marskit_new_request(&mut x), MARSKIT_SUCCESS);
        assert_eq!(marskit_request_expand(h, x, false, true), MARSKIT_SUCCESS);

        let mut verb: *const c_char = ptr::null();
        assert_eq!(marskit_request_verb(x, &mut verb), MARSKIT_SUCCESS);
        assert_eq!(CStr::from_ptr(verb).to_str().unwrap(), "retrieve");

        // the parameter got canonicalized...
        let mut v: *const c_char = ptr::null();
        assert_eq!(
            marskit_request_value(x, c"param".as_ptr(), 0, &mut v),
            MARSKIT_SUCCESS
        );
        assert_eq!(CStr::from_ptr(v).to_str().unwrap(), "167");

        // ...and defaults were inserted.
        let mut has = false;
        assert_eq!(
            marskit_request_has_param(x, c"class".as_ptr(), &mut has),
            MARSKIT_SUCCESS
        );
        assert!(has);

        marskit_free_request(h);
        marskit_free_request(x);
    }
}

#[test]
fn test_param_iterator() {
    unsafe {
        let mut h: *mut marsrequest_t = ptr::null_mut();
        marskit_new_request(&mut h);
        marskit_request_set_verb(h, c"retrieve".as_ptr());
        marskit_request_set_one(h, c"date".as_ptr(), c"-1".as_ptr());
        marskit_request_set_one(h, c"param".as_ptr(), c"129".as_ptr());

        let mut it: *mut paramiterator_t = ptr::null_mut();
        assert_eq!(marskit_request_params(h, &mut it), MARSKIT_SUCCESS);

        let mut names = vec![];
        while marskit_paramiterator_next(it) == MARSKIT_ITERATOR_SUCCESS {
            let mut p: *const c_char = ptr::null();
            assert_eq!(marskit_paramiterator_param(it, &mut p), MARSKIT_ITERATOR_SUCCESS);
            names.push(CStr::from_ptr(p).to_str().unwrap().to_owned());
        }
        assert_eq!(names, vec!["date", "param"]);

        marskit_free_paramiterator(it);
        marskit_free_request(h);
    }
}

#[test]
fn test_merge() {
    unsafe {
        let mut a: *mut marsrequest_t = ptr::null_mut();
        marskit_new_request(&mut a);
        marskit_request_set_verb(a, c"retrieve".as_ptr());
        marskit_request_set_one(a, c"param".as_ptr(), c"129".as_ptr());

        let mut b: *mut marsrequest_t = ptr::null_mut();
        marskit_new_request(&mut b);
        let values = [c"129".as_ptr(), c"130".as_ptr()];
        marskit_request_set(b, c"param".as_ptr(), values.as_ptr(), 2);

        assert_eq!(marskit_request_merge(a, b), MARSKIT_SUCCESS);
        let mut count = 0usize;
        marskit_request_count_values(a, c"param".as_ptr(), &mut count);
        assert_eq!(count, 2);

        marskit_free_request(a);
        marskit_free_request(b);
    }
}

#[test]
fn test_iterator_protocol() {
    unsafe {
        let mut it: *mut requestiterator_t = ptr::null_mut();
        let rc = marskit_parse_marsrequests(
            c"ret,date=20250314,levtype=sfc\nret,date=20250315,levtype=sfc".as_ptr(),
            &mut it,
            true,
        );
        assert_eq!(rc, MARSKIT_SUCCESS);

        let mut h: *mut marsrequest_t = ptr::null_mut();
        marskit_new_request(&mut h);

        // current before next is an iterator error...
        assert_eq!(marskit_requestiterator_current(it, h), MARSKIT_ITERATOR_ERROR);

        let mut n = 0;
        loop {
            match marskit_requestiterator_next(it) {
                MARSKIT_ITERATOR_SUCCESS => {
                    assert_eq!(
                        marskit_requestiterator_current(it, h),
                        MARSKIT_ITERATOR_SUCCESS
                    );
                    n += 1;
                }
                MARSKIT_ITERATOR_COMPLETE => break,
                other => panic!("iterator failed w/ {other}"),
            }
        }
        assert_eq!(n, 2);
        // complete stays complete...
        assert_eq!(marskit_requestiterator_next(it), MARSKIT_ITERATOR_COMPLETE);

        marskit_free_request(h);
        marskit_free_requestiterator(it);
    }
}

#[test]
fn test_error_codes_and_strings() {
    unsafe {
        let mut it: *mut requestiterator_t = ptr::null_mut();
        assert_eq!(
            marskit_parse_marsrequests(c"=broken=".as_ptr(), &mut it, true),
            MARSKIT_ERROR_USER
        );
        assert_eq!(
            marskit_parse_marsrequests(ptr::null(), &mut it, true),
            MARSKIT_ERROR
        );
    }
    assert_eq!(
        unsafe { CStr::from_ptr(marskit_get_error_string(MARSKIT_ERROR_USER)) }
            .to_str()
            .unwrap(),
        "user error"
    );

    let mut v: *const c_char = ptr::null();
    assert_eq!(marskit_version(&mut v), MARSKIT_SUCCESS);
    let semver = unsafe { CStr::from_ptr(v) }.to_str().unwrap();
    assert_eq!(semver.split('.').count(), 3);
}
