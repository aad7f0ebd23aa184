//! Minimal JNI surface for the native launcher.
//!
//! Only the slice of the invocation API the launcher actually touches is
//! declared here: the creation entry point, the init-args records, and a
//! partial environment function table with the nine calls the bootstrap
//! sequence makes. Unused table slots are covered by padding arrays so that
//! every declared function pointer sits at its exact jni.h index; the layout
//! is locked by the tests at the bottom of this file.

use std::os::raw::{c_char, c_void};

pub type Jint = i32;
pub type Jsize = Jint;
pub type Jbyte = i8;
pub type Jboolean = u8;
pub type Jchar = u16;
pub type Jshort = i16;
pub type Jlong = i64;
pub type Jfloat = f32;
pub type Jdouble = f64;

/// Opaque local reference into the runtime. Never dereferenced on this side.
pub type Jobject = *mut c_void;
pub type Jclass = Jobject;
pub type JobjectArray = Jobject;
pub type JbyteArray = Jobject;
pub type JmethodId = *mut c_void;

/// Opaque VM handle produced by the creation call. The launcher never calls
/// through its invoke interface (no `DestroyJavaVM`; process exit reclaims
/// the runtime), so the type stays fully opaque.
#[repr(C)]
pub struct JavaVm {
    _opaque: [u8; 0],
}

pub const JNI_OK: Jint = 0;
pub const JNI_VERSION_1_8: Jint = 0x0001_0008;
pub const JNI_FALSE: Jboolean = 0;
pub const JNI_TRUE: Jboolean = 1;

#[repr(C)]
pub struct JavaVmOption {
    pub option_string: *const c_char,
    pub extra_info: *mut c_void,
}

#[repr(C)]
pub struct JavaVmInitArgs {
    pub version: Jint,
    pub n_options: Jint,
    pub options: *mut JavaVmOption,
    pub ignore_unrecognized: Jboolean,
}

/// `JNI_CreateJavaVM`: fills the VM and environment handle sinks from an
/// options blob, returns `JNI_OK` on success.
pub type CreateVmFn =
    unsafe extern "system" fn(*mut *mut JavaVm, *mut *mut c_void, *mut c_void) -> Jint;

/// Value union for the `A` method-call variants.
#[repr(C)]
#[derive(Clone, Copy)]
pub union Jvalue {
    pub z: Jboolean,
    pub b: Jbyte,
    pub c: Jchar,
    pub s: Jshort,
    pub i: Jint,
    pub j: Jlong,
    pub f: Jfloat,
    pub d: Jdouble,
    pub l: Jobject,
}

/// Raw environment handle: pointer to a pointer to the function table.
pub type EnvPtr = *mut *const JniInterface;

/// Partial `JNINativeInterface_`. Field positions follow jni.h slot indices;
/// the padding arrays stand in for the calls the launcher never makes.
#[repr(C)]
pub struct JniInterface {
    _reserved: [*mut c_void; 6], // slots 0..=5: reserved0..3, GetVersion, DefineClass
    pub find_class: unsafe extern "system" fn(EnvPtr, *const c_char) -> Jclass, // slot 6
    _pad_to_exception_describe: [*mut c_void; 9], // slots 7..=15
    pub exception_describe: unsafe extern "system" fn(EnvPtr), // slot 16
    _pad_to_get_static_method_id: [*mut c_void; 96], // slots 17..=112
    pub get_static_method_id:
        unsafe extern "system" fn(EnvPtr, Jclass, *const c_char, *const c_char) -> JmethodId, // slot 113
    _pad_to_call_static_void_method_a: [*mut c_void; 29], // slots 114..=142
    pub call_static_void_method_a:
        unsafe extern "system" fn(EnvPtr, Jclass, JmethodId, *const Jvalue), // slot 143
    _pad_to_new_object_array: [*mut c_void; 28], // slots 144..=171
    pub new_object_array:
        unsafe extern "system" fn(EnvPtr, Jsize, Jclass, Jobject) -> JobjectArray, // slot 172
    _pad_to_set_object_array_element: [*mut c_void; 1], // slot 173
    pub set_object_array_element:
        unsafe extern "system" fn(EnvPtr, JobjectArray, Jsize, Jobject), // slot 174
    _pad_to_new_byte_array: [*mut c_void; 1], // slot 175
    pub new_byte_array: unsafe extern "system" fn(EnvPtr, Jsize) -> JbyteArray, // slot 176
    _pad_to_set_byte_array_region: [*mut c_void; 31], // slots 177..=207
    pub set_byte_array_region:
        unsafe extern "system" fn(EnvPtr, JbyteArray, Jsize, Jsize, *const Jbyte), // slot 208
    _pad_to_exception_check: [*mut c_void; 19], // slots 209..=227
    pub exception_check: unsafe extern "system" fn(EnvPtr) -> Jboolean, // slot 228
    _pad_tail: [*mut c_void; 4], // slots 229..=232
}

/// Borrowed environment handle. All methods are unsafe: the wrapper only
/// forwards through the foreign function table, it cannot vouch for the
/// handle staying valid or for reference lifetimes on the runtime side.
#[derive(Clone, Copy)]
pub struct Env {
    raw: EnvPtr,
}

impl Env {
    /// # Safety
    /// `raw` must be the environment pointer produced by a successful
    /// creation call, on the thread that created it.
    pub unsafe fn from_raw(raw: *mut c_void) -> Env {
        Env { raw: raw.cast() }
    }

    unsafe fn table(&self) -> &JniInterface {
        &**self.raw
    }

    pub unsafe fn find_class(&self, name: &std::ffi::CStr) -> Jclass {
        (self.table().find_class)(self.raw, name.as_ptr())
    }

    pub unsafe fn get_static_method_id(
        &self,
        class: Jclass,
        name: &std::ffi::CStr,
        signature: &std::ffi::CStr,
    ) -> JmethodId {
        (self.table().get_static_method_id)(self.raw, class, name.as_ptr(), signature.as_ptr())
    }

    pub unsafe fn new_object_array(
        &self,
        len: Jsize,
        element_class: Jclass,
        initial: Jobject,
    ) -> JobjectArray {
        (self.table().new_object_array)(self.raw, len, element_class, initial)
    }

    pub unsafe fn set_object_array_element(
        &self,
        array: JobjectArray,
        index: Jsize,
        value: Jobject,
    ) {
        (self.table().set_object_array_element)(self.raw, array, index, value)
    }

    pub unsafe fn new_byte_array(&self, len: Jsize) -> JbyteArray {
        (self.table().new_byte_array)(self.raw, len)
    }

    pub unsafe fn set_byte_array_region(
        &self,
        array: JbyteArray,
        start: Jsize,
        len: Jsize,
        buf: *const Jbyte,
    ) {
        (self.table().set_byte_array_region)(self.raw, array, start, len, buf)
    }

    pub unsafe fn call_static_void_method_a(
        &self,
        class: Jclass,
        method: JmethodId,
        args: *const Jvalue,
    ) {
        (self.table().call_static_void_method_a)(self.raw, class, method, args)
    }

    pub unsafe fn exception_check(&self) -> bool {
        (self.table().exception_check)(self.raw) != JNI_FALSE
    }

    /// Flushes a pending exception description through the runtime's own
    /// diagnostic facility, if one is pending. Clears the exception as a side
    /// effect of describing it, which is fine: every caller exits right after.
    pub unsafe fn describe_pending_exception(&self) {
        if self.exception_check() {
            (self.table().exception_describe)(self.raw);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::mem::{offset_of, size_of};

    const SLOT: usize = size_of::<*mut c_void>();

    #[test]
    fn interface_slots_match_jni_indices() {
        assert_eq!(offset_of!(JniInterface, find_class), 6 * SLOT);
        assert_eq!(offset_of!(JniInterface, exception_describe), 16 * SLOT);
        assert_eq!(offset_of!(JniInterface, get_static_method_id), 113 * SLOT);
        assert_eq!(offset_of!(JniInterface, call_static_void_method_a), 143 * SLOT);
        assert_eq!(offset_of!(JniInterface, new_object_array), 172 * SLOT);
        assert_eq!(offset_of!(JniInterface, set_object_array_element), 174 * SLOT);
        assert_eq!(offset_of!(JniInterface, new_byte_array), 176 * SLOT);
        assert_eq!(offset_of!(JniInterface, set_byte_array_region), 208 * SLOT);
        assert_eq!(offset_of!(JniInterface, exception_check), 228 * SLOT);
        // full table: slots 0..=232
        assert_eq!(size_of::<JniInterface>(), 233 * SLOT);
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn init_args_layout_matches_c() {
        assert_eq!(offset_of!(JavaVmInitArgs, version), 0);
        assert_eq!(offset_of!(JavaVmInitArgs, n_options), 4);
        assert_eq!(offset_of!(JavaVmInitArgs, options), 8);
        assert_eq!(offset_of!(JavaVmInitArgs, ignore_unrecognized), 16);
        assert_eq!(offset_of!(JavaVmOption, option_string), 0);
        assert_eq!(offset_of!(JavaVmOption, extra_info), SLOT);
    }

    #[test]
    fn jvalue_is_word_sized() {
        assert_eq!(size_of::<Jvalue>(), 8);
    }
}
