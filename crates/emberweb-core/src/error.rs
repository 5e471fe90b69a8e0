//! Error types for configuration projection.

use crate::version::WebVersion;

/// A locally detectable configuration shape error.
///
/// These abort the compile immediately, before any resource work begins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A field holds a value of the wrong shape.
    FieldType {
        /// Config key, relative to the web UI section.
        field: &'static str,
        /// Shape the field must have.
        expected: &'static str,
    },
    /// `version` is not one of the supported protocol versions.
    UnsupportedVersion(i64),
    /// `port` is outside the TCP port range.
    PortRange(i64),
    /// An auth credential is present but empty.
    EmptyCredential(&'static str),
    /// `local` asset hosting requested on a version without an embedded
    /// UI bundle.
    LocalUnsupported(WebVersion),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FieldType { field, expected } => {
                write!(f, "'{field}' must be a {expected}")
            }
            Self::UnsupportedVersion(got) => {
                write!(f, "'version' must be one of 1, 2, 3, got {got}")
            }
            Self::PortRange(got) => write!(f, "'port' must be in 1..=65535, got {got}"),
            Self::EmptyCredential(field) => write!(f, "'auth.{field}' must not be empty"),
            Self::LocalUnsupported(version) => {
                write!(f, "'local' is not supported in version {version}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Result type for configuration projection.
pub type Result<T> = std::result::Result<T, ConfigError>;
