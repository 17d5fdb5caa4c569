use std::fs;
use std::path::{Path, PathBuf};

use glob::Pattern;

/// List the immediate entries of `dir` whose base name matches `pattern`,
/// resolved to canonical absolute paths.
///
/// Deliberately forgiving: a directory that does not exist, is not a
/// directory or cannot be read yields an empty list, mirroring "nothing
/// found". Subdirectories are not descended into and entries that disappear
/// between listing and canonicalization are skipped.
pub fn list_matching_paths<P: AsRef<Path>>(dir: P, pattern: &Pattern) -> Vec<PathBuf> {
    let mut result = Vec::new();

    let entries = match fs::read_dir(dir.as_ref()) {
        Ok(entries) => entries,
        Err(err) => {
            log::debug!(
                "not scanning {}: {}",
                dir.as_ref().display(),
                err
            );
            return result;
        }
    };

    for entry in entries.flatten() {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let name_matches = path
            .file_name()
            .map_or(false, |name| pattern.matches(&name.to_string_lossy()));
        if !name_matches {
            continue;
        }
        match path.canonicalize() {
            Ok(canonical) => result.push(canonical),
            Err(err) => log::debug!("cannot canonicalize {}: {}", path.display(), err),
        }
    }

    result
}

/// The file name glob for shared libraries on the running platform.
pub fn platform_module_pattern() -> &'static str {
    if cfg!(target_os = "windows") {
        "*.dll"
    } else if cfg!(target_os = "macos") {
        "*.dylib"
    } else {
        "*.so"
    }
}
