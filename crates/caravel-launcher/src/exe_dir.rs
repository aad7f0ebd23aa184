use std::path::PathBuf;

use crate::error::LaunchError;

/// Directory containing the running executable, symlinks resolved.
///
/// Canonicalization matters: the runtime library is found at a fixed path
/// relative to this directory, and that computation must not depend on how
/// the executable was invoked.
pub fn locate() -> Result<PathBuf, LaunchError> {
    let exe = std::env::current_exe().map_err(|err| LaunchError::Location {
        detail: err.to_string(),
    })?;
    let exe = exe.canonicalize().map_err(|err| LaunchError::Location {
        detail: format!("{}: {err}", exe.display()),
    })?;
    let dir = exe.parent().ok_or_else(|| LaunchError::Location {
        detail: format!("{} has no parent directory", exe.display()),
    })?;
    Ok(dir.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn locate_returns_existing_absolute_dir() {
        let dir = locate().expect("locate");
        assert!(dir.is_absolute());
        assert!(dir.is_dir());
    }

    #[test]
    fn locate_is_stable_across_calls() {
        assert_eq!(locate().expect("first"), locate().expect("second"));
    }
}
