//! Startup option assembly.
//!
//! Splits the raw argument vector into launcher-level `--vm.*` arguments and
//! program arguments. `--vm.cp=`/`--vm.classpath=` fragments are collected
//! into a single combined `-Djava.class.path=` option; every other `--vm.X`
//! becomes the system option `-X`; everything else is left for the managed
//! entry point untouched.

use std::ffi::CString;
use std::path::Path;

use caravel_jni::JavaVmOption;

use crate::args::ProcessArgs;
use crate::config;
use crate::error::LaunchError;

/// Assembled startup options, in invocation order: the launcher-class
/// property first, then each synthesized `-X` option in first-seen order,
/// then exactly one combined classpath option, last.
#[derive(Debug)]
pub struct StartupOptions {
    options: Vec<CString>,
}

impl StartupOptions {
    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn as_slice(&self) -> &[CString] {
        &self.options
    }

    /// Option table for the creation call. The returned records borrow the
    /// option strings; `self` must outlive the call.
    pub fn vm_options(&self) -> Vec<JavaVmOption> {
        self.options
            .iter()
            .map(|opt| JavaVmOption {
                option_string: opt.as_ptr(),
                extra_info: std::ptr::null_mut(),
            })
            .collect()
    }
}

/// A launcher-level argument, consumed here and skipped when arguments are
/// forwarded to the managed entry point.
pub fn is_vm_arg(arg: &[u8]) -> bool {
    arg.starts_with(config::VM_ARG_PREFIX.as_bytes())
}

/// Classpath fragment carried by either spelling of the classpath flag.
fn cp_fragment(arg: &[u8]) -> Option<&[u8]> {
    arg.strip_prefix(config::VM_CP_ARG_PREFIX.as_bytes())
        .or_else(|| arg.strip_prefix(config::VM_CLASSPATH_ARG_PREFIX.as_bytes()))
}

/// Program arguments in original order, launcher-level arguments and the
/// program name filtered out, with no index gaps.
pub fn forwarded_args(args: &ProcessArgs) -> Vec<&[u8]> {
    args.iter_bytes()
        .skip(1)
        .filter(|arg| !is_vm_arg(arg))
        .collect()
}

pub fn assemble(args: &ProcessArgs, exe_dir: &Path) -> Result<StartupOptions, LaunchError> {
    let mut options = Vec::new();
    options.push(to_option(
        format!("{}{}", config::LAUNCHER_CLASS_PROPERTY, config::LAUNCHER_CLASS).into_bytes(),
    ));

    // Scan the full vector, program name included, preserving first-seen
    // order among both classpath fragments and plain vm options.
    let mut user_cp: Vec<&[u8]> = Vec::new();
    for arg in args.iter_bytes() {
        if arg == config::NATIVE_FLAG.as_bytes() {
            return Err(LaunchError::NativeUnsupported {
                exe: args.program_name(),
            });
        }
        if let Some(fragment) = cp_fragment(arg) {
            user_cp.push(fragment);
        } else if let Some(rest) = arg.strip_prefix(config::VM_ARG_PREFIX.as_bytes()) {
            // `--vm.X` becomes `-X`: the longer prefix is stripped and a
            // single dash re-prefixed, so the option cannot alias the
            // original argument memory.
            let mut opt = Vec::with_capacity(rest.len() + 1);
            opt.push(b'-');
            opt.extend_from_slice(rest);
            options.push(to_option(opt));
        }
    }

    options.push(to_option(class_path_option(exe_dir, &user_cp)));
    Ok(StartupOptions { options })
}

/// `-Djava.class.path=` + built-in entries (each prefixed with the
/// executable directory), then user fragments, joined with `CP_SEP`. No
/// leading or trailing separator; zero user fragments is valid.
fn class_path_option(exe_dir: &Path, user_cp: &[&[u8]]) -> Vec<u8> {
    let exe_dir = os_bytes(exe_dir);
    let mut cp = Vec::from(config::CLASS_PATH_PROPERTY.as_bytes());
    let mut first = true;
    for entry in config::launcher_classpath() {
        if !first {
            cp.push(config::CP_SEP as u8);
        }
        first = false;
        cp.extend_from_slice(&exe_dir);
        cp.push(std::path::MAIN_SEPARATOR as u8);
        cp.extend_from_slice(entry.as_bytes());
    }
    for fragment in user_cp {
        if !first {
            cp.push(config::CP_SEP as u8);
        }
        first = false;
        cp.extend_from_slice(fragment);
    }
    cp
}

fn to_option(bytes: Vec<u8>) -> CString {
    // every input derives from NUL-free argument or path bytes
    CString::new(bytes).expect("UNREACHABLE")
}

#[cfg(unix)]
fn os_bytes(path: &Path) -> Vec<u8> {
    use std::os::unix::ffi::OsStrExt;
    path.as_os_str().as_bytes().to_vec()
}

#[cfg(windows)]
fn os_bytes(path: &Path) -> Vec<u8> {
    path.to_string_lossy().into_owned().into_bytes()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsString;
    use std::path::PathBuf;

    const SEP: char = config::CP_SEP;

    fn args(raw: &[&str]) -> ProcessArgs {
        let mut full = vec![OsString::from("caravel")];
        full.extend(raw.iter().map(OsString::from));
        ProcessArgs::from_os(full)
    }

    fn exe_dir() -> PathBuf {
        PathBuf::from("/opt/caravel/bin")
    }

    fn rendered(opts: &StartupOptions) -> Vec<String> {
        opts.as_slice()
            .iter()
            .map(|o| String::from_utf8_lossy(o.to_bytes()).into_owned())
            .collect()
    }

    fn builtin_cp() -> String {
        config::launcher_classpath()
            .iter()
            .map(|e| format!("{}{}{e}", exe_dir().display(), std::path::MAIN_SEPARATOR))
            .collect::<Vec<_>>()
            .join(&SEP.to_string())
    }

    #[test]
    fn no_vm_flags_yields_builtin_options_only() {
        let opts = assemble(&args(&["run", "script.cv"]), &exe_dir()).expect("assemble");
        let rendered = rendered(&opts);
        assert_eq!(rendered.len(), 2);
        assert_eq!(
            rendered[0],
            format!("{}{}", config::LAUNCHER_CLASS_PROPERTY, config::LAUNCHER_CLASS)
        );
        assert_eq!(
            rendered[1],
            format!("{}{}", config::CLASS_PATH_PROPERTY, builtin_cp())
        );
    }

    #[test]
    fn classpath_option_is_always_last_and_unique() {
        let opts = assemble(
            &args(&["--vm.Xmx1g", "--vm.cp=/a", "prog", "--vm.Dx=y"]),
            &exe_dir(),
        )
        .expect("assemble");
        let rendered = rendered(&opts);
        let cp_positions: Vec<usize> = rendered
            .iter()
            .enumerate()
            .filter(|(_, o)| o.starts_with(config::CLASS_PATH_PROPERTY))
            .map(|(i, _)| i)
            .collect();
        assert_eq!(cp_positions, vec![rendered.len() - 1]);
    }

    #[test]
    fn user_entries_append_in_first_seen_order() {
        let opts = assemble(
            &args(&["--vm.cp=/first", "--vm.classpath=/second"]),
            &exe_dir(),
        )
        .expect("assemble");
        let cp = rendered(&opts).pop().expect("classpath option");
        assert!(
            cp.ends_with(&format!("/first{SEP}/second")),
            "classpath: {cp}"
        );
        assert!(cp.contains(&format!("{}{SEP}/first", builtin_cp())));
    }

    #[test]
    fn vm_option_reprefixed_with_single_dash() {
        let opts = assemble(&args(&["--vm.Xmx1g", "--vm.Dfoo=bar"]), &exe_dir()).expect("assemble");
        let rendered = rendered(&opts);
        assert_eq!(rendered[1], "-Xmx1g");
        assert_eq!(rendered[2], "-Dfoo=bar");
    }

    #[test]
    fn prefix_boundaries_are_exact() {
        // `--vm.` alone strips to a bare dash; `--vm.cp` and
        // `--vm.classpath` without `=` are plain vm options, not classpath
        // flags.
        let opts = assemble(
            &args(&["--vm.", "--vm.cp", "--vm.classpath"]),
            &exe_dir(),
        )
        .expect("assemble");
        let rendered = rendered(&opts);
        assert_eq!(rendered[1], "-");
        assert_eq!(rendered[2], "-cp");
        assert_eq!(rendered[3], "-classpath");
        // none of them contributed classpath fragments
        assert_eq!(
            *rendered.last().expect("classpath option"),
            format!("{}{}", config::CLASS_PATH_PROPERTY, builtin_cp())
        );
    }

    #[test]
    fn empty_classpath_fragment_keeps_its_slot() {
        let opts = assemble(&args(&["--vm.cp="]), &exe_dir()).expect("assemble");
        let cp = rendered(&opts).pop().expect("classpath option");
        assert_eq!(
            cp,
            format!("{}{}{SEP}", config::CLASS_PATH_PROPERTY, builtin_cp())
        );
    }

    #[test]
    fn forwarded_args_preserve_order_without_gaps() {
        let a = args(&["--vm.a", "prog1", "--vm.cp=p", "prog2"]);
        assert_eq!(forwarded_args(&a), vec![&b"prog1"[..], b"prog2"]);
    }

    #[test]
    fn program_name_is_never_forwarded() {
        let a = args(&[]);
        assert!(forwarded_args(&a).is_empty());
    }

    #[test]
    fn native_flag_is_fatal_anywhere() {
        for argv in [
            &["--native"][..],
            &["prog", "--native"],
            &["--vm.Xmx1g", "--native", "prog"],
        ] {
            match assemble(&args(argv), &exe_dir()) {
                Err(LaunchError::NativeUnsupported { exe }) => assert_eq!(exe, "caravel"),
                other => panic!("expected NativeUnsupported, got {other:?}"),
            }
        }
    }

    #[test]
    fn assembly_is_deterministic() {
        let argv = ["--vm.Xmx1g", "--vm.cp=/a", "prog", "--vm.classpath=/b"];
        let first = rendered(&assemble(&args(&argv), &exe_dir()).expect("first"));
        let second = rendered(&assemble(&args(&argv), &exe_dir()).expect("second"));
        assert_eq!(first, second);
    }

    #[test]
    fn option_count_matches_populated_entries() {
        let opts = assemble(&args(&["--vm.Xss2m", "prog"]), &exe_dir()).expect("assemble");
        assert_eq!(opts.len(), opts.as_slice().len());
        assert_eq!(opts.vm_options().len(), opts.len());
    }
}
