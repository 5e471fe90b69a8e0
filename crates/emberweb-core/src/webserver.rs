//! Typed projection of the web UI configuration section.

use serde::Serialize;

use crate::error::{ConfigError, Result};
use crate::node::ConfigNode;
use crate::version::WebVersion;

/// Key of the web UI section in the root configuration mapping.
pub const WEB_UI_KEY: &str = "web_ui";

const KEY_PORT: &str = "port";
const KEY_VERSION: &str = "version";
const KEY_CSS_URL: &str = "css_url";
const KEY_CSS_INCLUDE: &str = "css_include";
const KEY_JS_URL: &str = "js_url";
const KEY_JS_INCLUDE: &str = "js_include";
const KEY_ADD_HEAD: &str = "add_head";
const KEY_ADD_BODY: &str = "add_body";
const KEY_ADD_FAVICON: &str = "add_favicon";
const KEY_ADD_APPLE_ICON: &str = "add_apple_icon";
const KEY_ADD_MANIFEST: &str = "add_manifest";
const KEY_LANG: &str = "lang";
const KEY_CACHE_CONTROL: &str = "header_cache_control";
const KEY_PNA: &str = "enable_private_network_access";
const KEY_AUTH: &str = "auth";
const KEY_USERNAME: &str = "username";
const KEY_PASSWORD: &str = "password";
const KEY_INCLUDE_INTERNAL: &str = "include_internal";
const KEY_OTA: &str = "ota";
const KEY_LOG: &str = "log";
const KEY_LOCAL: &str = "local";

/// HTTP basic auth credentials. Both fields are non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthConfig {
    /// Basic auth username.
    pub username: String,
    /// Basic auth password.
    pub password: String,
}

/// The validated, normalized web UI configuration.
///
/// Constructed once from the raw [`ConfigNode`] tree at compile time and
/// immutable afterwards; the HTML assembler, the resource encoder and the
/// downstream code generator all read from this.
#[derive(Debug, Clone, Serialize)]
pub struct WebServerConfig {
    /// Selected UI protocol version.
    pub version: WebVersion,
    /// TCP port the device serves the UI on.
    pub port: u16,
    /// External stylesheet URL. `None` until defaulting has run; empty
    /// string afterwards means "no external stylesheet".
    pub css_url: Option<String>,
    /// External script URL, same lifecycle as `css_url`.
    pub js_url: Option<String>,
    /// Project-relative path of a stylesheet to embed.
    pub css_include: Option<String>,
    /// Project-relative path of a script to embed.
    pub js_include: Option<String>,
    /// Project-relative path of a web app manifest to embed.
    pub add_manifest: Option<String>,
    /// Project-relative path of a favicon image to embed.
    pub add_favicon: Option<String>,
    /// Project-relative path of an Apple touch icon image to embed.
    pub add_apple_icon: Option<String>,
    /// Raw HTML inserted verbatim into the document head.
    pub add_head: Option<String>,
    /// Raw HTML inserted verbatim at the start of the document body.
    pub add_body: Option<String>,
    /// UI language tag handed to the runtime.
    pub lang: Option<String>,
    /// Basic auth credentials, if the UI is password protected.
    pub auth: Option<AuthConfig>,
    /// Whether Private-Network-Access response headers are emitted.
    pub enable_private_network_access: bool,
    /// Whether internal-only entities are exposed in the UI.
    pub include_internal: bool,
    /// Whether the OTA update endpoint is enabled.
    pub allow_ota: bool,
    /// Whether the device log is streamed to the UI.
    pub expose_log: bool,
    /// Host the UI bundle on the device instead of a CDN. Not available
    /// for version 1.
    pub local: Option<bool>,
    /// Cache-Control header value for UI responses.
    pub header_cache_control: Option<String>,
}

impl WebServerConfig {
    /// Project the web UI section of the configuration tree.
    ///
    /// Shape errors (wrong leaf type, unknown version, empty credential,
    /// `local` on version 1) abort here, before any resource work.
    pub fn from_node(section: &ConfigNode) -> Result<Self> {
        if section.as_mapping().is_none() {
            return Err(ConfigError::FieldType {
                field: WEB_UI_KEY,
                expected: "mapping",
            });
        }

        let version = match opt_int(section, KEY_VERSION)? {
            None => WebVersion::V2,
            Some(raw) => {
                WebVersion::from_int(raw).ok_or(ConfigError::UnsupportedVersion(raw))?
            }
        };

        let port = match opt_int(section, KEY_PORT)? {
            None => 80,
            Some(raw) => u16::try_from(raw)
                .ok()
                .filter(|p| *p != 0)
                .ok_or(ConfigError::PortRange(raw))?,
        };

        // Presence alone is rejected: the v1 bundle has no local-hosting
        // support, so even `local: false` is a misconfiguration there.
        let local = opt_bool(section, KEY_LOCAL)?;
        if local.is_some() && !version.supports_local() {
            return Err(ConfigError::LocalUnsupported(version));
        }

        let auth = match section.get(KEY_AUTH) {
            None => None,
            Some(node) => Some(AuthConfig {
                username: credential(node, KEY_USERNAME)?,
                password: credential(node, KEY_PASSWORD)?,
            }),
        };

        Ok(Self {
            version,
            port,
            css_url: opt_str(section, KEY_CSS_URL)?,
            js_url: opt_str(section, KEY_JS_URL)?,
            css_include: opt_str(section, KEY_CSS_INCLUDE)?,
            js_include: opt_str(section, KEY_JS_INCLUDE)?,
            add_manifest: opt_str(section, KEY_ADD_MANIFEST)?,
            add_favicon: opt_str(section, KEY_ADD_FAVICON)?,
            add_apple_icon: opt_str(section, KEY_ADD_APPLE_ICON)?,
            add_head: opt_str(section, KEY_ADD_HEAD)?,
            add_body: opt_str(section, KEY_ADD_BODY)?,
            lang: opt_str(section, KEY_LANG)?,
            auth,
            enable_private_network_access: opt_bool(section, KEY_PNA)?.unwrap_or(true),
            include_internal: opt_bool(section, KEY_INCLUDE_INTERNAL)?.unwrap_or(false),
            allow_ota: opt_bool(section, KEY_OTA)?.unwrap_or(true),
            expose_log: opt_bool(section, KEY_LOG)?.unwrap_or(true),
            local,
            header_cache_control: opt_str(section, KEY_CACHE_CONTROL)?,
        })
    }

    /// Fill unset asset URLs with the version defaults. Pure; configured
    /// values are never touched.
    pub fn with_default_urls(mut self) -> Self {
        let defaults = self.version.url_defaults();
        if self.css_url.is_none() {
            self.css_url = Some(defaults.css_url.to_owned());
        }
        if self.js_url.is_none() {
            self.js_url = Some(defaults.js_url.to_owned());
        }
        self
    }
}

fn opt_str(section: &ConfigNode, key: &'static str) -> Result<Option<String>> {
    match section.get(key) {
        None => Ok(None),
        Some(node) => node
            .as_str()
            .map(|s| Some(s.to_owned()))
            .ok_or(ConfigError::FieldType { field: key, expected: "string" }),
    }
}

fn opt_bool(section: &ConfigNode, key: &'static str) -> Result<Option<bool>> {
    match section.get(key) {
        None => Ok(None),
        Some(node) => node
            .as_bool()
            .map(Some)
            .ok_or(ConfigError::FieldType { field: key, expected: "boolean" }),
    }
}

fn opt_int(section: &ConfigNode, key: &'static str) -> Result<Option<i64>> {
    match section.get(key) {
        None => Ok(None),
        Some(node) => node
            .as_int()
            .map(Some)
            .ok_or(ConfigError::FieldType { field: key, expected: "integer" }),
    }
}

fn credential(auth: &ConfigNode, key: &'static str) -> Result<String> {
    let field = match key {
        KEY_USERNAME => "auth.username",
        _ => "auth.password",
    };
    let value = auth
        .get(key)
        .and_then(ConfigNode::as_str)
        .ok_or(ConfigError::FieldType { field, expected: "string" })?;
    if value.is_empty() {
        return Err(ConfigError::EmptyCredential(key));
    }
    Ok(value.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section(json: serde_json::Value) -> ConfigNode {
        ConfigNode::from(json)
    }

    #[test]
    fn test_defaults_for_empty_section() {
        let config = WebServerConfig::from_node(&section(serde_json::json!({}))).unwrap();
        assert_eq!(config.version, WebVersion::V2);
        assert_eq!(config.port, 80);
        assert!(config.enable_private_network_access);
        assert!(!config.include_internal);
        assert!(config.allow_ota);
        assert!(config.expose_log);
        assert_eq!(config.css_url, None);
        assert_eq!(config.auth, None);
    }

    #[test]
    fn test_full_section_projection() {
        let config = WebServerConfig::from_node(&section(serde_json::json!({
            "version": 3,
            "port": 8080,
            "css_include": "style.css",
            "js_include": "app.js",
            "add_head": "<meta name=theme-color content=#222>",
            "add_body": "<p>hi</p>",
            "add_favicon": "icons/favicon.png",
            "add_apple_icon": "icons/apple.png",
            "add_manifest": "manifest.json",
            "lang": "de",
            "header_cache_control": "max-age=3600",
            "local": true,
            "auth": {"username": "admin", "password": "hunter2"},
            "enable_private_network_access": false,
            "include_internal": true,
            "ota": false,
            "log": false,
        })))
        .unwrap();
        assert_eq!(config.version, WebVersion::V3);
        assert_eq!(config.port, 8080);
        assert_eq!(config.css_include.as_deref(), Some("style.css"));
        assert_eq!(config.local, Some(true));
        assert_eq!(config.auth.as_ref().unwrap().username, "admin");
        assert!(!config.enable_private_network_access);
        assert!(config.include_internal);
        assert!(!config.allow_ota);
        assert!(!config.expose_log);
        assert_eq!(config.header_cache_control.as_deref(), Some("max-age=3600"));
    }

    #[test]
    fn test_unsupported_version() {
        let err = WebServerConfig::from_node(&section(serde_json::json!({"version": 4})))
            .unwrap_err();
        assert_eq!(err, ConfigError::UnsupportedVersion(4));
    }

    #[test]
    fn test_port_range() {
        let err = WebServerConfig::from_node(&section(serde_json::json!({"port": 70000})))
            .unwrap_err();
        assert_eq!(err, ConfigError::PortRange(70000));
        let err = WebServerConfig::from_node(&section(serde_json::json!({"port": 0})))
            .unwrap_err();
        assert_eq!(err, ConfigError::PortRange(0));
    }

    #[test]
    fn test_local_rejected_on_v1() {
        let err = WebServerConfig::from_node(&section(serde_json::json!({
            "version": 1,
            "local": true,
        })))
        .unwrap_err();
        assert_eq!(err, ConfigError::LocalUnsupported(WebVersion::V1));

        // Presence is what matters, not the value.
        let err = WebServerConfig::from_node(&section(serde_json::json!({
            "version": 1,
            "local": false,
        })))
        .unwrap_err();
        assert_eq!(err, ConfigError::LocalUnsupported(WebVersion::V1));
    }

    #[test]
    fn test_local_accepted_on_v2_and_v3() {
        for version in [2, 3] {
            let config = WebServerConfig::from_node(&section(serde_json::json!({
                "version": version,
                "local": true,
            })))
            .unwrap();
            assert_eq!(config.local, Some(true));
        }
    }

    #[test]
    fn test_empty_credentials_rejected() {
        let err = WebServerConfig::from_node(&section(serde_json::json!({
            "auth": {"username": "", "password": "pw"},
        })))
        .unwrap_err();
        assert_eq!(err, ConfigError::EmptyCredential("username"));

        let err = WebServerConfig::from_node(&section(serde_json::json!({
            "auth": {"username": "admin", "password": ""},
        })))
        .unwrap_err();
        assert_eq!(err, ConfigError::EmptyCredential("password"));
    }

    #[test]
    fn test_wrong_field_type() {
        let err = WebServerConfig::from_node(&section(serde_json::json!({
            "css_url": 12,
        })))
        .unwrap_err();
        assert_eq!(
            err,
            ConfigError::FieldType { field: "css_url", expected: "string" }
        );
    }

    #[test]
    fn test_default_urls_v1() {
        let config = WebServerConfig::from_node(&section(serde_json::json!({"version": 1})))
            .unwrap()
            .with_default_urls();
        assert_eq!(
            config.css_url.as_deref(),
            Some("https://emberweb.dev/_static/webui-v1.min.css")
        );
        assert_eq!(
            config.js_url.as_deref(),
            Some("https://emberweb.dev/_static/webui-v1.min.js")
        );
    }

    #[test]
    fn test_default_urls_v2_v3() {
        let config = WebServerConfig::from_node(&section(serde_json::json!({"version": 2})))
            .unwrap()
            .with_default_urls();
        assert_eq!(config.css_url.as_deref(), Some(""));
        assert_eq!(config.js_url.as_deref(), Some("https://ui.emberweb.dev/v2/www.js"));

        let config = WebServerConfig::from_node(&section(serde_json::json!({"version": 3})))
            .unwrap()
            .with_default_urls();
        assert_eq!(config.css_url.as_deref(), Some(""));
        assert_eq!(config.js_url.as_deref(), Some("https://ui.emberweb.dev/v3/www.js"));
    }

    #[test]
    fn test_default_urls_never_override() {
        let config = WebServerConfig::from_node(&section(serde_json::json!({
            "version": 1,
            "css_url": "https://example.com/custom.css",
        })))
        .unwrap()
        .with_default_urls();
        assert_eq!(config.css_url.as_deref(), Some("https://example.com/custom.css"));
        assert_eq!(
            config.js_url.as_deref(),
            Some("https://emberweb.dev/_static/webui-v1.min.js")
        );
    }
}
