//! Fixture plugin exporting both status capabilities. Each received byte is
//! recorded in `<serviceName>.operating` / `<serviceName>.health` so tests
//! can read it back.
#![allow(non_snake_case)]

use std::ffi::CStr;
use std::fs;
use std::os::raw::{c_char, c_int};

static PLUGIN_NAME: &[u8] = b"file-sink test plugin\0";

fn write_sink(service_name: *const c_char, kind: &str, value: u8) -> c_int {
    if service_name.is_null() {
        return 1;
    }
    let service = match unsafe { CStr::from_ptr(service_name) }.to_str() {
        Ok(s) => s,
        Err(_) => return 2,
    };
    match fs::write(format!("{}.{}", service, kind), value.to_string()) {
        Ok(()) => 0,
        Err(_) => 3,
    }
}

#[no_mangle]
pub extern "C" fn setOperatingStatus(service_name: *const c_char, value: u8) -> c_int {
    write_sink(service_name, "operating", value)
}

#[no_mangle]
pub extern "C" fn setHealthState(service_name: *const c_char, value: u8) -> c_int {
    write_sink(service_name, "health", value)
}

#[no_mangle]
pub extern "C" fn getPluginName() -> *const c_char {
    PLUGIN_NAME.as_ptr() as *const c_char
}
