//! Fixture plugin whose capabilities always fail with a fixed error code,
//! and which exposes the last-error companion entry point.
#![allow(non_snake_case)]

use std::os::raw::{c_char, c_int};

static LAST_ERROR: &[u8] = b"simulated sink failure\0";

#[no_mangle]
pub extern "C" fn setOperatingStatus(_service_name: *const c_char, _value: u8) -> c_int {
    42
}

#[no_mangle]
pub extern "C" fn setHealthState(_service_name: *const c_char, _value: u8) -> c_int {
    42
}

#[no_mangle]
pub extern "C" fn getPluginLastError() -> *const c_char {
    LAST_ERROR.as_ptr() as *const c_char
}
