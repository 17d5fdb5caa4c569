//! Fixture plugin exporting only the operating status capability.
#![allow(non_snake_case)]

use std::ffi::CStr;
use std::fs;
use std::os::raw::{c_char, c_int};

#[no_mangle]
pub extern "C" fn setOperatingStatus(service_name: *const c_char, value: u8) -> c_int {
    if service_name.is_null() {
        return 1;
    }
    let service = match unsafe { CStr::from_ptr(service_name) }.to_str() {
        Ok(s) => s,
        Err(_) => return 2,
    };
    match fs::write(format!("{}.operating", service), value.to_string()) {
        Ok(()) => 0,
        Err(_) => 3,
    }
}
