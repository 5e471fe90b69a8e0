//! The compile pipeline.
//!
//! One configuration tree in, one artifact bundle out: normalized
//! config, feature defines, encoded resources and sort entries. Each
//! invocation owns its own traversal state and registry; nothing is
//! cached between runs.

use emberweb_core::{
    validate_sorting_weights, ConfigNode, TreePath, WebServerConfig, SORTING_WEIGHT_KEY,
    WEB_UI_KEY,
};

use crate::define::{self, Define};
use crate::error::{CompileError, Result};
use crate::html::build_index_html;
use crate::resolver::PathResolver;
use crate::resource::{EncodedResource, Resource, ResourceKind};
use crate::sorting::{SortEntry, SortRegistry};

const KEY_ID: &str = "id";

/// Everything a compile run hands to the external code emitter.
#[derive(Debug)]
pub struct Artifacts {
    /// The validated, normalized web UI configuration.
    pub config: WebServerConfig,
    /// Compile-time feature defines, in emission order.
    pub defines: Vec<Define>,
    /// Encoded embeddable resources, in emission order.
    pub resources: Vec<EncodedResource>,
    /// Sort entries for entities declaring an explicit weight, in
    /// declaration order.
    pub sort_entries: Vec<SortEntry>,
}

/// Compile the web UI section of a device configuration.
///
/// Returns `Ok(None)` when the tree has no `web_ui` section. Any shape
/// error, constraint violation or unreadable include aborts the whole
/// compile; no partial artifact set is ever produced.
pub fn compile(root: &ConfigNode, resolver: &dyn PathResolver) -> Result<Option<Artifacts>> {
    let Some(section) = root.get(WEB_UI_KEY) else {
        return Ok(None);
    };

    let config = WebServerConfig::from_node(section)?.with_default_urls();

    // Sorting weights may be declared on entities anywhere in the tree,
    // so the gate runs over the whole tree, and all violations are
    // collected before reporting.
    let violations = validate_sorting_weights(root, config.version);
    if !violations.is_empty() {
        return Err(CompileError::Validation(violations));
    }

    let mut defines = vec![
        Define::flag(define::USE_WEBUI),
        Define::int(define::USE_WEBUI_PORT, i64::from(config.port)),
        Define::int(define::USE_WEBUI_VERSION, i64::from(config.version.as_u8())),
    ];
    let mut resources = Vec::new();

    if config.version.has_embedded_index() {
        // The index is embedded uncompressed: its gzipped size is nearly
        // identical, so compression buys nothing here.
        let html = build_index_html(&config);
        log::debug!("assembled index document, {} bytes", html.len());
        resources.push(Resource::new(ResourceKind::IndexHtml, html.into_bytes(), false).encode());
    }

    if config.enable_private_network_access {
        defines.push(Define::flag(define::USE_WEBUI_PRIVATE_NETWORK_ACCESS));
    }

    if let Some(path) = &config.css_include {
        defines.push(Define::flag(define::USE_WEBUI_CSS_INCLUDE));
        let text = read_text(resolver, path)?;
        resources.push(encode_logged(Resource::text(ResourceKind::CssInclude, &text)));
    }
    if let Some(path) = &config.js_include {
        defines.push(Define::flag(define::USE_WEBUI_JS_INCLUDE));
        let text = read_text(resolver, path)?;
        resources.push(encode_logged(Resource::text(ResourceKind::JsInclude, &text)));
    }
    if let Some(path) = &config.add_manifest {
        defines.push(Define::flag(define::USE_WEBUI_MANIFEST_INCLUDE));
        let text = read_text(resolver, path)?;
        resources.push(encode_logged(Resource::text(ResourceKind::ManifestInclude, &text)));
    }
    if let Some(path) = &config.add_favicon {
        defines.push(Define::flag(define::USE_WEBUI_FAVICON_INCLUDE));
        let bytes = read_bytes(resolver, path)?;
        resources.push(encode_logged(Resource::binary(ResourceKind::FaviconInclude, bytes)));
    }
    if let Some(path) = &config.add_apple_icon {
        defines.push(Define::flag(define::USE_WEBUI_APPLE_ICON_INCLUDE));
        let bytes = read_bytes(resolver, path)?;
        resources.push(encode_logged(Resource::binary(ResourceKind::AppleIconInclude, bytes)));
    }

    if config.local == Some(true) {
        defines.push(Define::flag(define::USE_WEBUI_LOCAL));
    }
    if let Some(cache_control) = &config.header_cache_control {
        defines.push(Define::string(define::USE_WEBUI_CACHE_CONTROL, cache_control));
    }

    let mut registry = SortRegistry::new();
    if config.version.supports_sorting_weight() {
        collect_sort_entries(root, &TreePath::root(), &mut registry);
    }

    log::debug!(
        "web UI compile done: {} defines, {} resources, {} sort entries",
        defines.len(),
        resources.len(),
        registry.entries().len()
    );

    Ok(Some(Artifacts {
        config,
        defines,
        resources,
        sort_entries: registry.into_entries(),
    }))
}

/// Pre-order walk registering every entity that declares an explicit
/// sorting weight. Entities are identified by their `id` scalar when
/// they have one, by their tree path otherwise. Only runs under version
/// 3; other versions were already rejected by the validator.
fn collect_sort_entries(node: &ConfigNode, path: &TreePath, registry: &mut SortRegistry) {
    match node {
        ConfigNode::Scalar(_) => {}
        ConfigNode::Sequence(items) => {
            for (i, item) in items.iter().enumerate() {
                collect_sort_entries(item, &path.index(i), registry);
            }
        }
        ConfigNode::Mapping(entries) => {
            if let Some(weight_node) = node.get(SORTING_WEIGHT_KEY) {
                // The schema layer already coerced the leaf; a non-numeric
                // value can only come from a caller bypassing it.
                match weight_node.as_float() {
                    Some(weight) => {
                        let entity_id = node
                            .get(KEY_ID)
                            .and_then(ConfigNode::as_str)
                            .map(str::to_owned)
                            .unwrap_or_else(|| path.to_string());
                        registry.register(entity_id, Some(weight), path.clone());
                    }
                    None => log::warn!("non-numeric sorting weight at {path}"),
                }
            }
            for (key, value) in entries {
                collect_sort_entries(value, &path.child(key), registry);
            }
        }
    }
}

fn encode_logged(resource: Resource) -> EncodedResource {
    let kind = resource.kind;
    let raw_size = resource.content.len();
    let encoded = resource.encode();
    log::debug!(
        "encoded {} resource: {} -> {} bytes",
        kind.name(),
        raw_size,
        encoded.size
    );
    encoded
}

fn read_bytes(resolver: &dyn PathResolver, path: &str) -> Result<Vec<u8>> {
    resolver
        .resolve(path)
        .map_err(|source| CompileError::Read { path: path.to_owned(), source })
}

fn read_text(resolver: &dyn PathResolver, path: &str) -> Result<String> {
    let bytes = read_bytes(resolver, path)?;
    String::from_utf8(bytes).map_err(|_| CompileError::Read {
        path: path.to_owned(),
        source: std::io::Error::new(std::io::ErrorKind::InvalidData, "file is not valid UTF-8"),
    })
}
