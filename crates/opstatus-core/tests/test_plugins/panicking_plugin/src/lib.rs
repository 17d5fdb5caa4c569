//! Fixture plugin whose health entry point panics instead of returning a
//! code. An unwinding plugin is out of contract; this fixture exists to pin
//! down what the host does with one: either the unwind is caught at the call
//! site or the runtime aborts the process, but a success report is never
//! produced.
#![allow(non_snake_case)]

use std::os::raw::{c_char, c_int};

#[no_mangle]
pub extern "C-unwind" fn setHealthState(_service_name: *const c_char, _value: u8) -> c_int {
    panic!("deliberate health state failure");
}
