use std::ffi::{CStr, CString};
use std::os::raw::c_void;
use std::os::unix::ffi::OsStrExt;
use std::path::Path;
use std::ptr::NonNull;

pub fn open(path: &Path) -> Result<NonNull<c_void>, String> {
    let c_path = CString::new(path.as_os_str().as_bytes())
        .map_err(|_| "path contains a NUL byte".to_string())?;
    unsafe { libc::dlerror() }; // clear stale error state
    let handle = unsafe { libc::dlopen(c_path.as_ptr(), libc::RTLD_NOW) };
    NonNull::new(handle).ok_or_else(last_error)
}

pub fn symbol(handle: NonNull<c_void>, name: &CStr) -> Result<NonNull<c_void>, String> {
    unsafe { libc::dlerror() };
    let sym = unsafe { libc::dlsym(handle.as_ptr(), name.as_ptr()) };
    NonNull::new(sym).ok_or_else(last_error)
}

fn last_error() -> String {
    let msg = unsafe { libc::dlerror() };
    if msg.is_null() {
        "unknown dynamic loader error".to_string()
    } else {
        unsafe { CStr::from_ptr(msg) }.to_string_lossy().into_owned()
    }
}
