//! FFI boundary shared with provider plugins.
//!
//! A provider plugin is a plain shared library; no registration machinery is
//! involved. At load time the symbols below are probed by exact name, each
//! independently optional. A module exporting only one capability is fully
//! valid — absence of a symbol is a missing capability, never a load error.

use std::os::raw::{c_char, c_int};

/// Capability entry point receiving a status value.
///
/// The first argument is the service name as a NUL-terminated C string, the
/// second the raw status byte. The plugin reports failure through the return
/// code; unwinding out of the entry point is out of contract. The "C-unwind"
/// ABI keeps such an unwind well defined rather than undefined behavior: the
/// host catches it at the call site when its runtime recognizes the unwind,
/// and the runtime aborts the process when it does not (a panic raised by an
/// independently built plugin arrives as a foreign exception).
pub type SetStatusFn =
    unsafe extern "C-unwind" fn(service_name: *const c_char, value: u8) -> c_int;

/// Informational entry point returning a stable, human readable identifier
/// for the plugin.
pub type PluginNameFn = unsafe extern "C-unwind" fn() -> *const c_char;

/// Informational entry point returning the message for the most recent
/// failure on this module. The returned pointer is only guaranteed valid
/// until the next call into the module, so callers must copy immediately.
pub type PluginLastErrorFn = unsafe extern "C-unwind" fn() -> *const c_char;

/// Symbol probed for the operating status capability.
pub const SET_OPERATING_STATUS_SYMBOL: &[u8] = b"setOperatingStatus\0";

/// Symbol probed for the health state capability.
pub const SET_HEALTH_STATE_SYMBOL: &[u8] = b"setHealthState\0";

/// Symbol probed for the plugin identifier.
pub const GET_PLUGIN_NAME_SYMBOL: &[u8] = b"getPluginName\0";

/// Symbol probed for the last error message.
pub const GET_PLUGIN_LAST_ERROR_SYMBOL: &[u8] = b"getPluginLastError\0";

/// Return code meaning the call succeeded.
pub const PLUGIN_OK: c_int = 0;

/// Sentinel reported when a capability entry point was never resolved.
///
/// This value is owned by the loading layer. A plugin returning `-1` as its
/// own error code stays distinguishable because the two cases surface as
/// different [`StatusCallError`](crate::provider::error::StatusCallError)
/// variants.
pub const CAPABILITY_UNSUPPORTED: c_int = -1;

/// Sentinel reported when a plugin call was interrupted by a caught panic.
///
/// Also owned by the loading layer, and distinct from
/// [`CAPABILITY_UNSUPPORTED`] so the two failure shapes never collide
/// numerically.
pub const CALL_PANICKED: c_int = -2;
