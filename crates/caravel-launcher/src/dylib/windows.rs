use std::ffi::CStr;
use std::os::raw::c_void;
use std::os::windows::ffi::OsStrExt;
use std::path::Path;
use std::ptr::NonNull;

type Hmodule = *mut c_void;

// kernel32.dll
extern "system" {
    fn LoadLibraryW(file_name: *const u16) -> Hmodule;
    fn GetProcAddress(module: Hmodule, proc_name: *const u8) -> *mut c_void;
    fn GetLastError() -> u32;
}

pub fn open(path: &Path) -> Result<NonNull<c_void>, String> {
    let mut wide: Vec<u16> = path.as_os_str().encode_wide().collect();
    wide.push(0);
    let handle = unsafe { LoadLibraryW(wide.as_ptr()) };
    NonNull::new(handle).ok_or_else(|| last_error("LoadLibraryW"))
}

pub fn symbol(handle: NonNull<c_void>, name: &CStr) -> Result<NonNull<c_void>, String> {
    let sym = unsafe { GetProcAddress(handle.as_ptr(), name.as_ptr().cast()) };
    NonNull::new(sym).ok_or_else(|| last_error("GetProcAddress"))
}

fn last_error(call: &str) -> String {
    format!("{call} failed (error {})", unsafe { GetLastError() })
}
