//! Runtime creation and entry-point invocation.
//!
//! Drives the foreign side of the pipeline: create the runtime from the
//! assembled options, resolve the fixed entry point, marshal the forwarded
//! arguments into an array of byte arrays, invoke, and surface any pending
//! exception as a launch failure. A pending exception must be checked after
//! every foreign call; control returning alone does not indicate success.

use std::os::raw::c_void;
use std::ptr;

use caravel_jni::{
    CreateVmFn, Env, JavaVm, JavaVmInitArgs, Jint, Jlong, Jsize, Jvalue, JNI_FALSE, JNI_OK,
    JNI_VERSION_1_8,
};

use crate::args::ProcessArgs;
use crate::config;
use crate::error::LaunchError;
use crate::options::{self, StartupOptions};

pub fn bootstrap(
    create_vm: CreateVmFn,
    options: &StartupOptions,
    args: &ProcessArgs,
) -> Result<(), LaunchError> {
    let mut vm_options = options.vm_options();
    let mut init_args = JavaVmInitArgs {
        version: JNI_VERSION_1_8,
        n_options: options.len() as Jint,
        options: vm_options.as_mut_ptr(),
        ignore_unrecognized: JNI_FALSE,
    };

    let mut vm: *mut JavaVm = ptr::null_mut();
    let mut env_raw: *mut c_void = ptr::null_mut();
    let status = unsafe {
        create_vm(
            &mut vm,
            &mut env_raw,
            (&mut init_args as *mut JavaVmInitArgs).cast(),
        )
    };
    if status != JNI_OK || env_raw.is_null() {
        return Err(LaunchError::Creation { status });
    }
    let env = unsafe { Env::from_raw(env_raw) };

    let byte_array_class = unsafe { env.find_class(config::BYTE_ARRAY_CLASS) };
    if byte_array_class.is_null() {
        unsafe { env.describe_pending_exception() };
        return Err(symbol_missing("Byte array class"));
    }
    let launcher_class = unsafe { env.find_class(config::ENTRY_POINT_CLASS) };
    if launcher_class.is_null() {
        unsafe { env.describe_pending_exception() };
        return Err(symbol_missing("Launcher class"));
    }
    let entry_point = unsafe {
        env.get_static_method_id(
            launcher_class,
            config::ENTRY_POINT_METHOD,
            config::ENTRY_POINT_SIG,
        )
    };
    if entry_point.is_null() {
        unsafe { env.describe_pending_exception() };
        return Err(symbol_missing("Launcher entry point"));
    }

    let forwarded = options::forwarded_args(args);
    let array =
        unsafe { env.new_object_array(forwarded.len() as Jsize, byte_array_class, ptr::null_mut()) };
    if array.is_null() || unsafe { env.exception_check() } {
        unsafe { env.describe_pending_exception() };
        return Err(LaunchError::Marshal {
            what: "NewObjectArray",
        });
    }
    for (slot, arg) in forwarded.iter().enumerate() {
        let bytes = unsafe { env.new_byte_array(arg.len() as Jsize) };
        if bytes.is_null() || unsafe { env.exception_check() } {
            unsafe { env.describe_pending_exception() };
            return Err(LaunchError::Marshal {
                what: "NewByteArray",
            });
        }
        unsafe { env.set_byte_array_region(bytes, 0, arg.len() as Jsize, arg.as_ptr().cast()) };
        if unsafe { env.exception_check() } {
            unsafe { env.describe_pending_exception() };
            return Err(LaunchError::Marshal {
                what: "SetByteArrayRegion",
            });
        }
        unsafe { env.set_object_array_element(array, slot as Jsize, bytes) };
        if unsafe { env.exception_check() } {
            unsafe { env.describe_pending_exception() };
            return Err(LaunchError::Marshal {
                what: "SetObjectArrayElement",
            });
        }
    }

    // The entry point also receives the original argument count and the
    // argv table address, for native-side introspection on the managed side.
    let call_args = [
        Jvalue { l: array },
        Jvalue {
            i: args.len() as Jint,
        },
        Jvalue {
            j: args.argv_ptr() as usize as Jlong,
        },
    ];
    unsafe { env.call_static_void_method_a(launcher_class, entry_point, call_args.as_ptr()) };
    if unsafe { env.exception_check() } {
        unsafe { env.describe_pending_exception() };
        return Err(LaunchError::Invocation);
    }
    Ok(())
}

fn symbol_missing(what: &str) -> LaunchError {
    LaunchError::Symbol {
        what: what.to_string(),
        detail: String::new(),
    }
}
