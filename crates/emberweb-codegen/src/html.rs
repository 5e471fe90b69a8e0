//! Index document assembly.
//!
//! The index HTML is a fixed concatenation driven by configuration
//! flags, not a template: identical configuration input must produce
//! byte-identical output, because the document is embedded into the
//! firmware image and image reproducibility is checked downstream.

use emberweb_core::WebServerConfig;

/// Build the index document for web UI version 2 and later.
///
/// `add_head` and `add_body` are inserted verbatim, without HTML
/// escaping. This is a trust boundary, not an oversight: whoever writes
/// these fragments also owns the device configuration file, and escaping
/// would break byte-reproducibility of existing images.
///
/// Call after URL defaulting; unset `css_url`/`js_url` are treated as
/// empty (no link emitted).
pub fn build_index_html(config: &WebServerConfig) -> String {
    let mut html = String::from("<!DOCTYPE html><html><head><meta charset=\"UTF-8\"/>");

    if let Some(head) = &config.add_head {
        html.push_str(head);
    }

    if config.add_favicon.is_some() {
        html.push_str("<link rel=\"icon\" href=\"/favicon.png\" />");
    } else {
        // data: placeholder suppresses the browser's automatic
        // /favicon.ico request.
        html.push_str("<link rel=icon href=data:>");
    }

    if config.add_apple_icon.is_some() {
        html.push_str("<link rel=\"apple-touch-icon\" href=\"/apple_icon.png\" />");
        html.push_str("<link rel=\"apple-touch-startup-image\" href=\"/apple_icon.png\" />");
    }

    if config.add_manifest.is_some() {
        html.push_str(
            "<link rel=\"manifest\" crossorigin=\"use-credentials\" href=\"/manifest.webmanifest\"/>",
        );
    }

    if config.css_include.is_some() {
        html.push_str("<link rel=stylesheet href=/0.css>");
    }
    if let Some(css_url) = config.css_url.as_deref() {
        if !css_url.is_empty() {
            html.push_str(&format!("<link rel=stylesheet href=\"{css_url}\">"));
        }
    }

    html.push_str("</head><body>");

    if let Some(body) = &config.add_body {
        html.push_str(body);
    }

    if config.js_include.is_some() {
        html.push_str("<script type=module src=/0.js></script>");
    }
    html.push_str("<ember-app></ember-app>");
    if let Some(js_url) = config.js_url.as_deref() {
        if !js_url.is_empty() {
            html.push_str(&format!("<script src=\"{js_url}\"></script>"));
        }
    }

    html.push_str("</body></html>");
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use emberweb_core::ConfigNode;

    fn config(json: serde_json::Value) -> WebServerConfig {
        WebServerConfig::from_node(&ConfigNode::from(json))
            .unwrap()
            .with_default_urls()
    }

    #[test]
    fn test_minimal_v2_document() {
        let html = build_index_html(&config(serde_json::json!({"version": 2})));
        assert_eq!(
            html,
            "<!DOCTYPE html><html><head><meta charset=\"UTF-8\"/>\
             <link rel=icon href=data:></head><body><ember-app></ember-app>\
             <script src=\"https://ui.emberweb.dev/v2/www.js\"></script></body></html>"
        );
    }

    #[test]
    fn test_deterministic_output() {
        let cfg = config(serde_json::json!({
            "version": 3,
            "css_include": "a.css",
            "add_head": "<meta name=x>",
        }));
        assert_eq!(build_index_html(&cfg), build_index_html(&cfg));
    }

    #[test]
    fn test_favicon_reference_replaces_placeholder() {
        let html = build_index_html(&config(serde_json::json!({
            "version": 2,
            "add_favicon": "f.png",
        })));
        assert!(html.contains("<link rel=\"icon\" href=\"/favicon.png\" />"));
        assert!(!html.contains("href=data:"));
    }

    #[test]
    fn test_full_document_order() {
        let html = build_index_html(&config(serde_json::json!({
            "version": 3,
            "css_url": "https://cdn.example/x.css",
            "add_head": "<title>Device</title>",
            "add_body": "<noscript>enable JS</noscript>",
            "add_favicon": "f.png",
            "add_apple_icon": "a.png",
            "add_manifest": "m.json",
            "css_include": "s.css",
            "js_include": "s.js",
        })));
        let expected_order = [
            "<meta charset=\"UTF-8\"/>",
            "<title>Device</title>",
            "<link rel=\"icon\" href=\"/favicon.png\" />",
            "<link rel=\"apple-touch-icon\" href=\"/apple_icon.png\" />",
            "<link rel=\"apple-touch-startup-image\" href=\"/apple_icon.png\" />",
            "<link rel=\"manifest\" crossorigin=\"use-credentials\" href=\"/manifest.webmanifest\"/>",
            "<link rel=stylesheet href=/0.css>",
            "<link rel=stylesheet href=\"https://cdn.example/x.css\">",
            "</head><body>",
            "<noscript>enable JS</noscript>",
            "<script type=module src=/0.js></script>",
            "<ember-app></ember-app>",
            "<script src=\"https://ui.emberweb.dev/v3/www.js\"></script>",
            "</body></html>",
        ];
        let mut cursor = 0;
        for fragment in expected_order {
            let at = html[cursor..]
                .find(fragment)
                .unwrap_or_else(|| panic!("{fragment} missing or out of order"));
            cursor += at + fragment.len();
        }
    }

    #[test]
    fn test_empty_css_url_emits_no_link() {
        // Version 2 defaults css_url to the empty string.
        let html = build_index_html(&config(serde_json::json!({"version": 2})));
        assert!(!html.contains("rel=stylesheet"));
    }

    #[test]
    fn test_raw_fragments_not_escaped() {
        let html = build_index_html(&config(serde_json::json!({
            "version": 2,
            "add_head": "<script>let a = 1 < 2 && \"x\";</script>",
        })));
        assert!(html.contains("<script>let a = 1 < 2 && \"x\";</script>"));
    }
}
