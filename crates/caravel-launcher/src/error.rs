use std::path::PathBuf;

/// Failure taxonomy for the bootstrap pipeline. Every variant is fatal and
/// non-retried; `main` renders it once to stderr and exits with -1.
#[derive(Debug)]
pub enum LaunchError {
    /// The executable directory could not be determined. Nothing downstream
    /// is possible without it.
    Location { detail: String },
    /// The runtime shared library was missing or unloadable at the computed
    /// path.
    LibraryLoad { path: PathBuf, detail: String },
    /// A required symbol was missing: the creation function, the byte-array
    /// class, the launcher class, or the entry-point method.
    Symbol { what: String, detail: String },
    /// The creation call returned a non-success status.
    Creation { status: i32 },
    /// A forwarded argument failed to convert into the runtime's array
    /// representation.
    Marshal { what: &'static str },
    /// The entry point itself raised a pending exception (already described
    /// through the runtime's diagnostic facility by the time this surfaces).
    Invocation,
    /// `--native` was passed, but this binary has no native-image
    /// counterpart to fall back to.
    NativeUnsupported { exe: String },
}

impl std::fmt::Display for LaunchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LaunchError::Location { detail } => {
                write!(f, "Could not determine the executable directory: {detail}")
            }
            LaunchError::LibraryLoad { path, detail } => {
                write!(
                    f,
                    "Could not load runtime library {}: {detail}",
                    path.display()
                )
            }
            LaunchError::Symbol { what, detail } => {
                if detail.is_empty() {
                    write!(f, "{what} not found.")
                } else {
                    write!(f, "{what} not found: {detail}")
                }
            }
            LaunchError::Creation { status } => {
                write!(f, "Creation of the runtime failed (status {status}).")
            }
            LaunchError::Marshal { what } => write!(f, "Error in {what}."),
            LaunchError::Invocation => {
                write!(f, "Launcher entry point raised an exception.")
            }
            LaunchError::NativeUnsupported { exe } => {
                write!(
                    f,
                    "The native version of {exe} does not exist: cannot use '--native'."
                )
            }
        }
    }
}

impl std::error::Error for LaunchError {}
