use std::path::PathBuf;

/// Errors produced while loading, compiling, scanning, or reconciling patterns.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Malformed pattern document, invalid offsets, or malformed run-config.
    #[error("config error: {message}")]
    Config {
        message: String,
        path: Option<PathBuf>,
    },

    /// Invalid command-line arguments.
    #[error("argument error: {0}")]
    Argument(String),

    /// File I/O error.
    #[error("io error: {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A pattern's combined regex could not be compiled.
    #[error("compile error: pattern {type_label}: {message}")]
    Compile { type_label: String, message: String },

    /// An `additional_match` / `additional_not_match` filter regex failed to compile.
    #[error("filter regex compile error: {0}")]
    FilterCompile(String),

    /// An observed match set did not reconcile against declared expectations.
    #[error("reconciliation error: {0}")]
    Reconciliation(String),

    /// The host platform is not supported by the matcher.
    #[error("platform error: {0}")]
    Platform(String),

    /// Internal error (bug).
    #[error("internal error: {0}")]
    Internal(String),

    /// File exceeds the maximum size gate.
    #[error("file too large: {} ({} bytes, max: {} bytes)", .path.display(), .size, .max_size)]
    FileTooLarge {
        path: PathBuf,
        size: u64,
        max_size: u64,
    },

    /// Directory walk error.
    #[error("walk error: {message}")]
    Walk { message: String },
}

/// Result type using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Process exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// All checks passed.
    Success = 0,
    /// Fixture failure, platform error, or compile error.
    CheckFailed = 1,
    /// Configuration or argument error.
    ConfigError = 2,
    /// Internal error.
    InternalError = 3,
}

impl From<&Error> for ExitCode {
    fn from(err: &Error) -> Self {
        match err {
            Error::Config { .. } | Error::Argument(_) => ExitCode::ConfigError,
            Error::Compile { .. }
            | Error::FilterCompile(_)
            | Error::Reconciliation(_)
            | Error::Platform(_) => ExitCode::CheckFailed,
            Error::Io { .. } => ExitCode::InternalError,
            Error::Internal(_) => ExitCode::InternalError,
            Error::FileTooLarge { .. } => ExitCode::CheckFailed,
            Error::Walk { .. } => ExitCode::InternalError,
        }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
