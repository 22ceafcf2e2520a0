use std::path::PathBuf;
use thiserror::Error;

/// Failures a cleanup operation can report.
///
/// Errors are caught at the narrowest scope (per browser, per service,
/// per external command), logged, and folded into the operation's result.
/// Nothing here unwinds past an operation boundary.
#[derive(Error, Debug)]
pub enum CleanupError {
    /// Elevation required but absent
    #[error("{0}")]
    PermissionDenied(String),

    /// No cleanup branch defined for the detected OS
    #[error("Unsupported OS: {0}")]
    UnsupportedPlatform(String),

    /// Child process failed to launch or exited unsuccessfully
    #[error("Command '{command}' failed: {detail}")]
    ExternalCommandFailed { command: String, detail: String },

    /// A deletion was refused by the filesystem (permissions, lock, I/O fault)
    #[error("Cannot remove '{path}': {source}")]
    FilesystemAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Coarse error classification, for callers that match on failure kind
/// rather than parse messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    PermissionDenied,
    UnsupportedPlatform,
    ExternalCommandFailed,
    FilesystemAccess,
}

impl CleanupError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CleanupError::PermissionDenied(_) => ErrorKind::PermissionDenied,
            CleanupError::UnsupportedPlatform(_) => ErrorKind::UnsupportedPlatform,
            CleanupError::ExternalCommandFailed { .. } => ErrorKind::ExternalCommandFailed,
            CleanupError::FilesystemAccess { .. } => ErrorKind::FilesystemAccess,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_platform_names_the_os() {
        let err = CleanupError::UnsupportedPlatform("freebsd".into());
        assert!(err.to_string().contains("freebsd"));
        assert_eq!(err.kind(), ErrorKind::UnsupportedPlatform);
    }

    #[test]
    fn filesystem_error_keeps_the_path() {
        let err = CleanupError::FilesystemAccess {
            path: PathBuf::from("/tmp/Cookies"),
            source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
        };
        assert!(err.to_string().contains("/tmp/Cookies"));
        assert_eq!(err.kind(), ErrorKind::FilesystemAccess);
    }

    #[test]
    fn command_error_names_the_command() {
        let err = CleanupError::ExternalCommandFailed {
            command: "ipconfig /flushdns".into(),
            detail: "exited with nonzero status".into(),
        };
        assert!(err.to_string().contains("ipconfig /flushdns"));
    }
}
