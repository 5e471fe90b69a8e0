//! Error types for the compile pipeline.

use emberweb_core::{ConfigError, Violation};

/// Errors that abort a web UI compile.
///
/// Every variant is a build-time hard stop; there is no recoverable or
/// warning-level path out of this pipeline.
#[derive(Debug)]
pub enum CompileError {
    /// A configuration shape error, detected before any resource work.
    Config(ConfigError),
    /// Version-gated constraints violated somewhere in the tree. Carries
    /// the complete set collected over the whole traversal.
    Validation(Vec<Violation>),
    /// An include file could not be read.
    Read {
        /// Project-relative path of the offending file.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}

impl std::fmt::Display for CompileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config(err) => write!(f, "{err}"),
            Self::Validation(violations) => {
                write!(f, "{} configuration violation(s)", violations.len())?;
                for violation in violations {
                    write!(f, "\n  {violation}")?;
                }
                Ok(())
            }
            Self::Read { path, source } => write!(f, "failed to read '{path}': {source}"),
        }
    }
}

impl std::error::Error for CompileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(err) => Some(err),
            Self::Validation(_) => None,
            Self::Read { source, .. } => Some(source),
        }
    }
}

impl From<ConfigError> for CompileError {
    fn from(err: ConfigError) -> Self {
        Self::Config(err)
    }
}

/// Result type for the compile pipeline.
pub type Result<T> = std::result::Result<T, CompileError>;
