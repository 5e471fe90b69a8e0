//! Configuration model and validation for the emberweb web UI compiler.
//!
//! This crate owns the build-time configuration side of the firmware web
//! UI: the [`ConfigNode`] tree model, the typed [`WebServerConfig`]
//! projection with per-version URL defaulting, and the whole-tree
//! validation of version-gated constraints. Resource assembly and
//! encoding live in `emberweb-codegen`.

pub mod error;
pub mod node;
pub mod validate;
pub mod version;
pub mod webserver;

pub use error::{ConfigError, Result};
pub use node::{ConfigNode, PathSegment, Scalar, TreePath};
pub use validate::{validate_sorting_weights, Violation, SORTING_WEIGHT_KEY};
pub use version::{UrlDefaults, WebVersion};
pub use webserver::{AuthConfig, WebServerConfig, WEB_UI_KEY};
