use std::ffi::{CString, OsString};
use std::os::raw::c_char;

/// The process argument vector, captured once at startup.
///
/// Arguments are held as NUL-terminated C copies so that classification and
/// marshaling see the raw bytes, and an argv-style pointer table is kept
/// alongside so the managed entry point can be handed the original vector's
/// address for native-side introspection.
pub struct ProcessArgs {
    c_args: Vec<CString>,
    c_ptrs: Vec<*const c_char>,
}

impl ProcessArgs {
    pub fn from_env() -> ProcessArgs {
        ProcessArgs::from_os(std::env::args_os().collect())
    }

    pub fn from_os(raw: Vec<OsString>) -> ProcessArgs {
        let c_args: Vec<CString> = raw
            .into_iter()
            // OS-provided arguments cannot contain interior NUL bytes
            .map(|arg| CString::new(os_bytes(arg)).expect("UNREACHABLE"))
            .collect();
        let mut c_ptrs: Vec<*const c_char> = c_args.iter().map(|arg| arg.as_ptr()).collect();
        c_ptrs.push(std::ptr::null());
        ProcessArgs { c_args, c_ptrs }
    }

    /// Total argument count, program name included.
    pub fn len(&self) -> usize {
        self.c_args.len()
    }

    pub fn iter_bytes(&self) -> impl Iterator<Item = &[u8]> {
        self.c_args.iter().map(|arg| arg.to_bytes())
    }

    /// Address of the NULL-terminated argv-style table. Stable for the
    /// lifetime of `self`: the table points into the owned `CString` buffers.
    pub fn argv_ptr(&self) -> *const *const c_char {
        self.c_ptrs.as_ptr()
    }

    /// Program name for diagnostics (argv[0], lossily decoded).
    pub fn program_name(&self) -> String {
        self.c_args
            .first()
            .map(|arg| String::from_utf8_lossy(arg.to_bytes()).into_owned())
            .unwrap_or_else(|| "caravel".to_string())
    }
}

#[cfg(unix)]
fn os_bytes(arg: OsString) -> Vec<u8> {
    use std::os::unix::ffi::OsStringExt;
    arg.into_vec()
}

#[cfg(windows)]
fn os_bytes(arg: OsString) -> Vec<u8> {
    arg.to_string_lossy().into_owned().into_bytes()
}
