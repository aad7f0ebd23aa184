//! Runtime library loading.
//!
//! The library lives at a build-time-fixed path relative to the executable
//! directory. One platform backend is compiled in: `dlopen`/`dlsym` on unix,
//! `LoadLibraryW`/`GetProcAddress` on windows. A missing library or missing
//! creation symbol is a fatal configuration error, reported once.

use std::ffi::CStr;
use std::mem;
use std::os::raw::c_void;
use std::path::Path;
use std::ptr::NonNull;

use caravel_jni::CreateVmFn;

use crate::config;
use crate::error::LaunchError;

#[cfg(unix)]
#[path = "dylib/unix.rs"]
mod platform;

#[cfg(windows)]
#[path = "dylib/windows.rs"]
mod platform;

/// Opaque ownership token for a loaded shared library. Its only capability
/// is symbol resolution; the handle is never released (the process is
/// short-lived and exit reclaims it).
#[derive(Debug)]
pub struct Library {
    handle: NonNull<c_void>,
}

impl Library {
    pub fn open(path: &Path) -> Result<Library, LaunchError> {
        let handle = platform::open(path).map_err(|detail| LaunchError::LibraryLoad {
            path: path.to_path_buf(),
            detail,
        })?;
        Ok(Library { handle })
    }

    pub fn symbol(&self, name: &CStr) -> Result<NonNull<c_void>, LaunchError> {
        platform::symbol(self.handle, name).map_err(|detail| LaunchError::Symbol {
            what: name.to_string_lossy().into_owned(),
            detail,
        })
    }
}

/// Loads the runtime library next to the executable and resolves the typed
/// creation function.
pub fn load_runtime(exe_dir: &Path) -> Result<CreateVmFn, LaunchError> {
    let lib_path = exe_dir.join(config::LIB_RELPATH);
    let lib = Library::open(&lib_path)?;
    let sym = lib.symbol(config::CREATE_VM_SYMBOL)?;
    Ok(unsafe { mem::transmute::<NonNull<c_void>, CreateVmFn>(sym) })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn open_missing_library_is_load_failure() {
        let path = PathBuf::from("/nonexistent/libcaravelvm.so");
        match Library::open(&path) {
            Err(LaunchError::LibraryLoad { path: p, detail }) => {
                assert_eq!(p, path);
                assert!(!detail.is_empty());
            }
            other => panic!("expected LibraryLoad, got {other:?}"),
        }
    }

    #[test]
    fn load_runtime_reports_computed_path() {
        let dir = std::env::temp_dir();
        match load_runtime(&dir) {
            Err(LaunchError::LibraryLoad { path, .. }) => {
                assert!(path.starts_with(&dir));
                assert!(path.ends_with(config::LIB_RELPATH));
            }
            Err(other) => panic!("expected LibraryLoad, got {other:?}"),
            Ok(_) => panic!("no runtime library expected under {}", dir.display()),
        }
    }
}
