use std::collections::HashMap;
use std::path::{Path, PathBuf};

use glob::Pattern;

use crate::provider::error::ProviderSystemError;
use crate::provider::loader::ServiceStatusProvider;
use crate::status::{HealthState, OperatingStatus};
use crate::utils::fs::list_matching_paths;

/// A keyed set of [`ServiceStatusProvider`]s, all reporting for one service.
///
/// Providers are keyed by their canonical module path, so the same module
/// cannot be loaded twice into one collection no matter how its path is
/// spelled. The collection exclusively owns its members: dropping it (or
/// removing a member) unloads the corresponding modules.
pub struct ProviderCollection {
    service_name: String,
    providers: HashMap<PathBuf, ServiceStatusProvider>,
}

/// What happened during one directory discovery pass.
///
/// Batch discovery deliberately continues past individual bad modules; the
/// paths that failed are kept here as a diagnostics side channel instead of
/// aborting the pass.
#[derive(Debug, Default)]
pub struct DiscoveryReport {
    /// Number of providers added to the collection.
    pub loaded: usize,
    /// Candidate paths that failed to load, with the reason for each.
    pub failures: Vec<(PathBuf, ProviderSystemError)>,
}

/// A provider the collection refused to adopt.
///
/// Carries the provider back to the caller, so a rejected module is neither
/// lost nor unloaded by the failed attempt.
#[derive(Debug, thiserror::Error)]
#[error("{reason}")]
pub struct AddProviderError {
    pub provider: ServiceStatusProvider,
    #[source]
    pub reason: ProviderSystemError,
}

impl ProviderCollection {
    /// Create an empty collection for `service_name`. Performs no I/O.
    pub fn new(service_name: impl Into<String>) -> Self {
        Self {
            service_name: service_name.into(),
            providers: HashMap::new(),
        }
    }

    /// Name of the service every member provider reports for.
    pub fn service_name(&self) -> &str {
        &self.service_name
    }

    /// Load the module at `path` and add it to the collection.
    ///
    /// Atomic: on any failure (load failure or duplicate canonical path) the
    /// collection is unchanged and the error is surfaced.
    pub fn add_path(&mut self, path: impl AsRef<Path>) -> Result<(), ProviderSystemError> {
        let provider = ServiceStatusProvider::load(self.service_name.clone(), path)?;
        self.insert(provider).map_err(|rejected| rejected.reason)
    }

    /// Adopt ownership of an already constructed provider.
    ///
    /// The provider must have been built for this collection's service name
    /// and must not collide with a member's module path; otherwise it is
    /// handed back inside the error and the collection is unchanged.
    pub fn add_provider(
        &mut self,
        provider: ServiceStatusProvider,
    ) -> Result<(), AddProviderError> {
        if provider.service_name() != self.service_name {
            let reason = ProviderSystemError::ServiceMismatch {
                expected: self.service_name.clone(),
                found: provider.service_name().to_string(),
            };
            return Err(AddProviderError { provider, reason });
        }
        self.insert(provider)
    }

    fn insert(&mut self, provider: ServiceStatusProvider) -> Result<(), AddProviderError> {
        let key = provider.module_path().to_path_buf();
        if self.providers.contains_key(&key) {
            let reason = ProviderSystemError::DuplicateModule {
                service: self.service_name.clone(),
                path: key,
            };
            return Err(AddProviderError { provider, reason });
        }
        log::info!(
            "loaded status module {} for service '{}' (operating: {}, health: {})",
            key.display(),
            self.service_name,
            provider.supports_operating_status(),
            provider.supports_health_state(),
        );
        self.providers.insert(key, provider);
        Ok(())
    }

    /// Discover and load every module in `dir`, regardless of name.
    pub fn add_from_directory(
        &mut self,
        dir: impl AsRef<Path>,
    ) -> Result<DiscoveryReport, ProviderSystemError> {
        self.add_matching(dir, "*")
    }

    /// Discover and load the modules in `dir` whose file name matches the
    /// glob `pattern`.
    ///
    /// A missing or unreadable directory counts as "nothing found". Per-path
    /// failures never abort the pass: they are logged, collected into the
    /// report and the remaining candidates are still attempted, so one bad
    /// module cannot block the rest. Only an unparseable pattern is an
    /// up-front error.
    pub fn add_matching(
        &mut self,
        dir: impl AsRef<Path>,
        pattern: &str,
    ) -> Result<DiscoveryReport, ProviderSystemError> {
        let compiled =
            Pattern::new(pattern).map_err(|source| ProviderSystemError::InvalidPattern {
                pattern: pattern.to_string(),
                source,
            })?;

        let mut report = DiscoveryReport::default();
        for path in list_matching_paths(dir.as_ref(), &compiled) {
            match self.add_path(&path) {
                Ok(()) => report.loaded += 1,
                Err(err) => {
                    log::warn!("skipping status module {}: {}", path.display(), err);
                    report.failures.push((path, err));
                }
            }
        }
        Ok(report)
    }

    /// Remove the provider loaded from `path`, unloading its module.
    ///
    /// Idempotent: removing a path that is not present is a no-op. When the
    /// module file has been deleted the lookup degrades to lexical matching;
    /// see [`get`](Self::get).
    pub fn remove(&mut self, path: impl AsRef<Path>) {
        let key = lookup_key(path.as_ref());
        if self.providers.remove(&key).is_some() {
            log::info!(
                "removed status module {} from service '{}'",
                key.display(),
                self.service_name
            );
        }
    }

    /// Apply an operating status to every member that supports it.
    ///
    /// Fire and forget by design: providers lacking the capability are
    /// silently skipped and per-provider plugin failures are not surfaced.
    /// Callers that need per-provider outcomes should iterate
    /// [`providers`](Self::providers) and call the single-provider methods.
    pub fn set_all_operating_status(&self, status: OperatingStatus) {
        for (path, provider) in &self.providers {
            if !provider.supports_operating_status() {
                continue;
            }
            if let Err(err) = provider.set_operating_status(status) {
                log::debug!(
                    "status module {} rejected operating status {}: {}",
                    path.display(),
                    status,
                    err
                );
            }
        }
    }

    /// Apply a health state to every member that supports it. Same
    /// fire-and-forget semantics as [`set_all_operating_status`](Self::set_all_operating_status).
    pub fn set_all_health_state(&self, state: HealthState) {
        for (path, provider) in &self.providers {
            if !provider.supports_health_state() {
                continue;
            }
            if let Err(err) = provider.set_health_state(state) {
                log::debug!(
                    "status module {} rejected health state {}: {}",
                    path.display(),
                    state,
                    err
                );
            }
        }
    }

    /// Read-only view of the members, keyed by canonical module path.
    ///
    /// The view cannot be used to unload or replace providers; mutation goes
    /// through [`add_path`](Self::add_path) and [`remove`](Self::remove).
    pub fn providers(&self) -> &HashMap<PathBuf, ServiceStatusProvider> {
        &self.providers
    }

    /// Iterate over `(canonical path, provider)` pairs in no defined order.
    pub fn iter(&self) -> impl Iterator<Item = (&PathBuf, &ServiceStatusProvider)> {
        self.providers.iter()
    }

    /// Look up a member by module path.
    ///
    /// The path may be spelled with relative segments or through symlinks.
    /// Once the module file has been deleted only lexical matching remains,
    /// so a deleted member is still reachable through `.` spellings of its
    /// canonical path but no longer through a symlinked or `..` one.
    pub fn get(&self, path: impl AsRef<Path>) -> Option<&ServiceStatusProvider> {
        self.providers.get(&lookup_key(path.as_ref()))
    }

    /// Whether a provider for `path` is a member.
    pub fn contains(&self, path: impl AsRef<Path>) -> bool {
        self.get(path).is_some()
    }

    /// Number of member providers.
    pub fn len(&self) -> usize {
        self.providers.len()
    }

    /// Whether the collection has no members.
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

/// Resolve a caller-supplied path to the collection's key form.
///
/// Members are keyed by canonical path. When the module file no longer
/// exists (so canonicalization fails), fall back to lexically absolutizing
/// the spelling as given; symlinked spellings of a deleted module cannot be
/// matched anymore.
fn lookup_key(path: &Path) -> PathBuf {
    path.canonicalize()
        .or_else(|_| std::path::absolute(path))
        .unwrap_or_else(|_| path.to_path_buf())
}
