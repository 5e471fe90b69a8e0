//! Web UI protocol versions and the per-version URL policy.
//!
//! Every behavior that differs between UI versions lives in this module
//! as a lookup on [`WebVersion`], so the whole version policy is
//! auditable in one place.

use std::fmt;

use serde::{Serialize, Serializer};

/// Selected web UI protocol version.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WebVersion {
    /// Legacy table UI, served entirely from external URLs.
    V1,
    /// Card UI served from an embedded index document.
    V2,
    /// Card UI with per-entity sorting support.
    V3,
}

/// Default asset URLs for one UI version. Empty string means the asset is
/// served from an embedded resource instead of an external URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UrlDefaults {
    /// Stylesheet URL used when `css_url` is not configured.
    pub css_url: &'static str,
    /// Script URL used when `js_url` is not configured.
    pub js_url: &'static str,
}

impl WebVersion {
    /// Parse the `version` config value.
    pub const fn from_int(value: i64) -> Option<Self> {
        match value {
            1 => Some(WebVersion::V1),
            2 => Some(WebVersion::V2),
            3 => Some(WebVersion::V3),
            _ => None,
        }
    }

    /// The numeric form used in defines and diagnostics.
    pub const fn as_u8(self) -> u8 {
        match self {
            WebVersion::V1 => 1,
            WebVersion::V2 => 2,
            WebVersion::V3 => 3,
        }
    }

    /// Default asset URLs for this version, applied only to unset fields.
    pub const fn url_defaults(self) -> UrlDefaults {
        match self {
            WebVersion::V1 => UrlDefaults {
                css_url: "https://emberweb.dev/_static/webui-v1.min.css",
                js_url: "https://emberweb.dev/_static/webui-v1.min.js",
            },
            WebVersion::V2 => UrlDefaults {
                css_url: "",
                js_url: "https://ui.emberweb.dev/v2/www.js",
            },
            WebVersion::V3 => UrlDefaults {
                css_url: "",
                js_url: "https://ui.emberweb.dev/v3/www.js",
            },
        }
    }

    /// Whether the index document is assembled and embedded at build time.
    /// Version 1 serves the whole UI from external URLs instead.
    pub const fn has_embedded_index(self) -> bool {
        !matches!(self, WebVersion::V1)
    }

    /// Whether entities may carry an explicit sorting weight.
    pub const fn supports_sorting_weight(self) -> bool {
        matches!(self, WebVersion::V3)
    }

    /// Whether the UI bundle may be hosted on the device itself.
    pub const fn supports_local(self) -> bool {
        !matches!(self, WebVersion::V1)
    }
}

impl fmt::Display for WebVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_u8())
    }
}

impl Serialize for WebVersion {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.as_u8())
    }
}
