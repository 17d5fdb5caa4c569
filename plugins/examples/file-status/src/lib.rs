//! Example status provider plugin.
//!
//! Persists every received status byte to a file next to the process working
//! directory: `<serviceName>.operating` for operating statuses and
//! `<serviceName>.health` for health states. Exposes the full optional
//! surface of the provider contract: both capability entry points, the
//! plugin identifier and the last-error companion.
//!
//! The host treats these symbols as individually optional; this plugin
//! simply exports all of them.
#![allow(non_snake_case)]

use std::ffi::{CStr, CString};
use std::fs;
use std::os::raw::{c_char, c_int};
use std::sync::Mutex;

static PLUGIN_NAME: &[u8] = b"file-status example plugin\0";
static NO_ERROR: &[u8] = b"\0";

/// Message for the most recent failure on this module.
///
/// The contract is single threaded and the pointer handed out by
/// [`getPluginLastError`] is only guaranteed valid until the next call into
/// this module, so a process-wide slot is acceptable here.
static LAST_ERROR: Mutex<Option<CString>> = Mutex::new(None);

fn record_error(message: String) {
    let stored = CString::new(message).unwrap_or_else(|_| {
        CString::new("error message contained an interior NUL").expect("static message is valid")
    });
    if let Ok(mut slot) = LAST_ERROR.lock() {
        *slot = Some(stored);
    }
}

fn clear_error() {
    if let Ok(mut slot) = LAST_ERROR.lock() {
        *slot = None;
    }
}

fn write_status_file(service_name: *const c_char, suffix: &str, value: u8) -> c_int {
    if service_name.is_null() {
        record_error("service name pointer is null".to_string());
        return 1;
    }
    let service = match unsafe { CStr::from_ptr(service_name) }.to_str() {
        Ok(s) => s,
        Err(_) => {
            record_error("service name is not valid UTF-8".to_string());
            return 2;
        }
    };

    let path = format!("{}.{}", service, suffix);
    match fs::write(&path, value.to_string()) {
        Ok(()) => {
            log::debug!("recorded status {} in {}", value, path);
            clear_error();
            0
        }
        Err(err) => {
            record_error(format!("cannot write {}: {}", path, err));
            3
        }
    }
}

#[no_mangle]
pub extern "C" fn setOperatingStatus(service_name: *const c_char, status: u8) -> c_int {
    write_status_file(service_name, "operating", status)
}

#[no_mangle]
pub extern "C" fn setHealthState(service_name: *const c_char, state: u8) -> c_int {
    write_status_file(service_name, "health", state)
}

#[no_mangle]
pub extern "C" fn getPluginName() -> *const c_char {
    PLUGIN_NAME.as_ptr() as *const c_char
}

/// Returns the message for the most recent failure, or an empty string.
///
/// The pointer stays valid until the next call into this module.
#[no_mangle]
pub extern "C" fn getPluginLastError() -> *const c_char {
    match LAST_ERROR.lock() {
        Ok(slot) => match slot.as_ref() {
            Some(message) => message.as_ptr(),
            None => NO_ERROR.as_ptr() as *const c_char,
        },
        Err(_) => NO_ERROR.as_ptr() as *const c_char,
    }
}
