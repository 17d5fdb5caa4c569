use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};

use libloading::Library;

use crate::provider::contract::{
    PluginLastErrorFn, PluginNameFn, SetStatusFn, GET_PLUGIN_LAST_ERROR_SYMBOL,
    GET_PLUGIN_NAME_SYMBOL, PLUGIN_OK, SET_HEALTH_STATE_SYMBOL, SET_OPERATING_STATUS_SYMBOL,
};
use crate::provider::error::{ProviderSystemError, StatusCallError};
use crate::status::{HealthState, OperatingStatus};

/// One loaded status provider module, scoped to exactly one service name.
///
/// A provider either loads completely or not at all: if the shared library
/// cannot be opened, no provider exists and no resource is leaked. Each
/// capability entry point is probed independently at load time; a module
/// exporting only one of them is fully valid.
///
/// The provider is the sole owner of the module handle. It is deliberately
/// not `Clone`: two owners of the same handle would unload the module twice
/// and leave the other holding dangling entry points. The resolved function
/// pointers never leave this struct; they are only ever invoked through
/// [`set_operating_status`](Self::set_operating_status) and
/// [`set_health_state`](Self::set_health_state) while the library is held
/// alive by `self`.
#[derive(Debug)]
pub struct ServiceStatusProvider {
    service_name: String,
    /// Cached C form of the service name, handed to every entry point call.
    service_name_c: CString,
    /// Canonical absolute path of the loaded module, the deduplication key.
    module_path: PathBuf,
    set_operating_status: Option<SetStatusFn>,
    set_health_state: Option<SetStatusFn>,
    get_last_error: Option<PluginLastErrorFn>,
    plugin_name: Option<String>,
    /// Keeps the resolved entry points valid. `Some` for the provider's
    /// whole life; released exactly once, in `Drop`.
    library: Option<Library>,
}

impl Drop for ServiceStatusProvider {
    fn drop(&mut self) {
        log::trace!("unloading status module {}", self.module_path.display());
        // Unloading invalidates the resolved entry points, which cannot be
        // reached anymore once `self` is gone.
        drop(self.library.take());
    }
}

impl ServiceStatusProvider {
    /// Open the shared library at `module_path` and probe it for status
    /// capability entry points.
    ///
    /// Fails if the module cannot be opened (missing file, not a loadable
    /// object, architecture mismatch), if its path cannot be canonicalized,
    /// or if `service_name` cannot cross the FFI boundary as a C string.
    /// Missing capability symbols are recorded as absent, not errors.
    pub fn load(
        service_name: impl Into<String>,
        module_path: impl AsRef<Path>,
    ) -> Result<Self, ProviderSystemError> {
        let service_name = service_name.into();
        let service_name_c = CString::new(service_name.as_str()).map_err(|_| {
            ProviderSystemError::InvalidServiceName {
                name: service_name.clone(),
            }
        })?;

        let requested = module_path.as_ref();
        let library =
            unsafe { Library::new(requested) }.map_err(|source| ProviderSystemError::ModuleOpen {
                path: requested.to_path_buf(),
                source,
            })?;

        // Canonicalize so that collections can deduplicate on the path no
        // matter how the caller spelled it (symlinks, relative segments).
        let module_path =
            requested
                .canonicalize()
                .map_err(|source| ProviderSystemError::Canonicalize {
                    path: requested.to_path_buf(),
                    source,
                })?;

        let set_operating_status = resolve::<SetStatusFn>(&library, SET_OPERATING_STATUS_SYMBOL);
        let set_health_state = resolve::<SetStatusFn>(&library, SET_HEALTH_STATE_SYMBOL);
        let get_last_error = resolve::<PluginLastErrorFn>(&library, GET_PLUGIN_LAST_ERROR_SYMBOL);

        // The identifier is stable for the lifetime of the module, so probe
        // it once here and keep the copy.
        let plugin_name = resolve::<PluginNameFn>(&library, GET_PLUGIN_NAME_SYMBOL)
            .and_then(|name_fn| unsafe { owned_string(name_fn()) });

        Ok(Self {
            service_name,
            service_name_c,
            module_path,
            set_operating_status,
            set_health_state,
            get_last_error,
            plugin_name,
            library: Some(library),
        })
    }

    /// Name of the service this provider reports for.
    pub fn service_name(&self) -> &str {
        &self.service_name
    }

    /// Canonical absolute path of the loaded module.
    pub fn module_path(&self) -> &Path {
        &self.module_path
    }

    /// Human readable identifier exported by the plugin, if it has one.
    pub fn plugin_name(&self) -> Option<&str> {
        self.plugin_name.as_deref()
    }

    /// Whether the module exported the operating status entry point.
    pub fn supports_operating_status(&self) -> bool {
        self.set_operating_status.is_some()
    }

    /// Whether the module exported the health state entry point.
    pub fn supports_health_state(&self) -> bool {
        self.set_health_state.is_some()
    }

    /// Deliver an operating status value to the plugin.
    pub fn set_operating_status(&self, status: OperatingStatus) -> Result<(), StatusCallError> {
        self.call(self.set_operating_status, "setOperatingStatus", status.as_u8())
    }

    /// Deliver a health state value to the plugin.
    pub fn set_health_state(&self, state: HealthState) -> Result<(), StatusCallError> {
        self.call(self.set_health_state, "setHealthState", state.as_u8())
    }

    /// Message for the most recent failure on this module, if the plugin
    /// exports one. The C string is copied immediately; the plugin may
    /// invalidate it on its next call.
    pub fn last_error(&self) -> Option<String> {
        let last_error_fn = self.get_last_error?;
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| unsafe {
            owned_string(last_error_fn())
        }));
        outcome.unwrap_or(None)
    }

    fn call(
        &self,
        entry: Option<SetStatusFn>,
        operation: &'static str,
        value: u8,
    ) -> Result<(), StatusCallError> {
        let Some(entry) = entry else {
            return Err(StatusCallError::Unsupported { operation });
        };

        let name_ptr = self.service_name_c.as_ptr();
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| unsafe { entry(name_ptr, value) }));
        match outcome {
            Ok(PLUGIN_OK) => Ok(()),
            Ok(code) => Err(StatusCallError::Plugin { operation, code }),
            Err(panic_obj) => Err(StatusCallError::Panicked {
                operation,
                message: panic_message(panic_obj),
            }),
        }
    }
}

/// Resolve a named symbol from `library`, treating absence as `None`.
fn resolve<T: Copy>(library: &Library, symbol: &[u8]) -> Option<T> {
    unsafe { library.get::<T>(symbol).map(|s| *s).ok() }
}

/// Copy a C string returned by a plugin into an owned `String`.
///
/// # Safety
/// If non-null, `ptr` must point at a NUL-terminated string that stays valid
/// for the duration of this call. Null and non-UTF-8 both yield `None`.
unsafe fn owned_string(ptr: *const c_char) -> Option<String> {
    if ptr.is_null() {
        return None;
    }
    unsafe { CStr::from_ptr(ptr) }.to_str().ok().map(str::to_owned)
}

fn panic_message(panic_obj: Box<dyn std::any::Any + Send>) -> String {
    if let Some(s) = panic_obj.downcast_ref::<&'static str>() {
        (*s).to_string()
    } else if let Some(s) = panic_obj.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic reason".to_string()
    }
}
