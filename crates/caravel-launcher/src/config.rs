//! Build-time launcher configuration.
//!
//! The distribution layout (library location, launcher class, built-in
//! classpath) is fixed when the launcher binary is built, via `CARAVEL_*`
//! environment variables read at compile time. Nothing here is consulted at
//! run time from the environment: the library path derives purely from the
//! executable's own location plus these constants.

use std::ffi::CStr;

/// Relative path from the executable directory to the runtime library.
pub const LIB_RELPATH: &str = match option_env!("CARAVEL_LIB_RELPATH") {
    Some(path) => path,
    None => DEFAULT_LIB_RELPATH,
};

#[cfg(target_os = "macos")]
const DEFAULT_LIB_RELPATH: &str = "lib/server/libcaravelvm.dylib";
#[cfg(all(unix, not(target_os = "macos")))]
const DEFAULT_LIB_RELPATH: &str = "lib/server/libcaravelvm.so";
#[cfg(windows)]
const DEFAULT_LIB_RELPATH: &str = "lib\\server\\caravelvm.dll";

/// Dotted name of the concrete language launcher class, injected as the
/// first startup option so the managed side knows what to bootstrap.
pub const LAUNCHER_CLASS: &str = match option_env!("CARAVEL_LAUNCHER_CLASS") {
    Some(class) => class,
    None => "org.caravel.launcher.DefaultLauncher",
};

/// Built-in classpath entries, relative to the executable directory. The
/// override is a single `CP_SEP`-joined string.
pub fn launcher_classpath() -> Vec<&'static str> {
    match option_env!("CARAVEL_LAUNCHER_CLASSPATH") {
        Some(joined) => joined.split(CP_SEP).filter(|e| !e.is_empty()).collect(),
        None => vec!["lib/caravel-launcher.jar"],
    }
}

/// Creation symbol resolved from the runtime library. Fixed by the JNI
/// invocation contract.
pub const CREATE_VM_SYMBOL: &CStr = c"JNI_CreateJavaVM";

/// Well-known dispatch class holding the managed entry point, and the entry
/// point itself: `static void runLauncher(byte[][] args, int argc, long argv)`.
pub const ENTRY_POINT_CLASS: &CStr = c"org/caravel/launcher/LanguageLauncher";
pub const ENTRY_POINT_METHOD: &CStr = c"runLauncher";
pub const ENTRY_POINT_SIG: &CStr = c"([[BIJ)V";

pub const BYTE_ARRAY_CLASS: &CStr = c"[B";

pub const LAUNCHER_CLASS_PROPERTY: &str = "-Dorg.caravel.launcher.class=";
pub const CLASS_PATH_PROPERTY: &str = "-Djava.class.path=";

pub const NATIVE_FLAG: &str = "--native";
pub const VM_ARG_PREFIX: &str = "--vm.";
pub const VM_CP_ARG_PREFIX: &str = "--vm.cp=";
pub const VM_CLASSPATH_ARG_PREFIX: &str = "--vm.classpath=";

#[cfg(unix)]
pub const CP_SEP: char = ':';
#[cfg(windows)]
pub const CP_SEP: char = ';';
