//! Lookup of external executables on `PATH`.

use crate::error::SetupError;
use std::path::PathBuf;

/// Resolve `name` to an executable path. Bare names are searched on `PATH`;
/// names containing a separator are checked in place.
pub fn require_utility(name: &str) -> Result<PathBuf, SetupError> {
    match which::which(name) {
        Ok(path) => {
            tracing::debug!(utility = name, path = %path.display(), "resolved utility");
            Ok(path)
        }
        Err(e) => {
            tracing::debug!(utility = name, error = %e, "utility lookup failed");
            Err(SetupError::MissingUtility(name.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finds_shell() {
        let path = require_utility("sh").unwrap();
        assert!(path.ends_with("sh"));
    }

    #[test]
    fn test_missing_utility() {
        let err = require_utility("clipask-definitely-not-installed").unwrap_err();
        assert!(matches!(err, SetupError::MissingUtility(ref n) if n == "clipask-definitely-not-installed"));
        assert!(err.to_string().contains("Please install"));
    }

    #[cfg(unix)]
    #[test]
    fn test_absolute_path_requires_exec_bit() {
        use std::os::unix::fs::PermissionsExt;
        let dir = tempfile::TempDir::new().unwrap();
        let script = dir.path().join("tool");
        std::fs::write(&script, "#!/bin/sh\n").unwrap();

        let name = script.to_string_lossy().to_string();
        assert!(require_utility(&name).is_err());

        std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();
        assert_eq!(require_utility(&name).unwrap(), script);
    }
}
