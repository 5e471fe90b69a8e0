//! Compile-time feature defines derived from the configuration.
//!
//! The runtime web server is compiled against these: features that are
//! off at build time do not exist in the firmware image at all.

/// Web UI enabled.
pub const USE_WEBUI: &str = "USE_WEBUI";
/// Listening port.
pub const USE_WEBUI_PORT: &str = "USE_WEBUI_PORT";
/// Selected UI protocol version.
pub const USE_WEBUI_VERSION: &str = "USE_WEBUI_VERSION";
/// Emit Private-Network-Access response headers.
pub const USE_WEBUI_PRIVATE_NETWORK_ACCESS: &str = "USE_WEBUI_PRIVATE_NETWORK_ACCESS";
/// Serve the UI bundle from the device itself.
pub const USE_WEBUI_LOCAL: &str = "USE_WEBUI_LOCAL";
/// Cache-Control header value for UI responses.
pub const USE_WEBUI_CACHE_CONTROL: &str = "USE_WEBUI_CACHE_CONTROL";
/// An embedded stylesheet include is present.
pub const USE_WEBUI_CSS_INCLUDE: &str = "USE_WEBUI_CSS_INCLUDE";
/// An embedded script include is present.
pub const USE_WEBUI_JS_INCLUDE: &str = "USE_WEBUI_JS_INCLUDE";
/// An embedded web app manifest is present.
pub const USE_WEBUI_MANIFEST_INCLUDE: &str = "USE_WEBUI_MANIFEST_INCLUDE";
/// An embedded favicon is present.
pub const USE_WEBUI_FAVICON_INCLUDE: &str = "USE_WEBUI_FAVICON_INCLUDE";
/// An embedded Apple touch icon is present.
pub const USE_WEBUI_APPLE_ICON_INCLUDE: &str = "USE_WEBUI_APPLE_ICON_INCLUDE";

/// Value carried by a define, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DefineValue {
    /// Numeric value, rendered bare.
    Int(i64),
    /// String value, rendered as a quoted C string literal.
    Str(String),
}

/// One compile-time define handed to the external code emitter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Define {
    /// Define name.
    pub name: &'static str,
    /// Optional value; bare flag when `None`.
    pub value: Option<DefineValue>,
}

impl Define {
    /// A bare feature flag.
    pub const fn flag(name: &'static str) -> Self {
        Self { name, value: None }
    }

    /// A define carrying an integer value.
    pub const fn int(name: &'static str, value: i64) -> Self {
        Self { name, value: Some(DefineValue::Int(value)) }
    }

    /// A define carrying a string value.
    pub fn string(name: &'static str, value: impl Into<String>) -> Self {
        Self { name, value: Some(DefineValue::Str(value.into())) }
    }

    /// Render as a preprocessor line.
    pub fn render(&self) -> String {
        match &self.value {
            None => format!("#define {}", self.name),
            Some(DefineValue::Int(value)) => format!("#define {} {}", self.name, value),
            Some(DefineValue::Str(value)) => {
                format!("#define {} \"{}\"", self.name, value.replace('"', "\\\""))
            }
        }
    }
}
