//! Resource encoding for firmware embedding.
//!
//! Each configured asset becomes a named byte array compiled into the
//! firmware image, optionally gzip-compressed first (the runtime serves
//! compressed resources with `Content-Encoding: gzip`). Output must be
//! byte-deterministic: the gzip header carries no mtime or filename.

use std::io::Write;

use flate2::write::GzEncoder;
use flate2::Compression;

/// Logical identity of an embeddable resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    /// The assembled index document (version >= 2).
    IndexHtml,
    /// User-supplied stylesheet include.
    CssInclude,
    /// User-supplied script include.
    JsInclude,
    /// Web app manifest include.
    ManifestInclude,
    /// Favicon image include.
    FaviconInclude,
    /// Apple touch icon image include.
    AppleIconInclude,
}

impl ResourceKind {
    /// The fixed logical name used in generated symbols.
    pub const fn name(self) -> &'static str {
        match self {
            ResourceKind::IndexHtml => "INDEX_HTML",
            ResourceKind::CssInclude => "CSS_INCLUDE",
            ResourceKind::JsInclude => "JS_INCLUDE",
            ResourceKind::ManifestInclude => "MANIFEST_INCLUDE",
            ResourceKind::FaviconInclude => "FAVICON_INCLUDE",
            ResourceKind::AppleIconInclude => "APPLE_ICON_INCLUDE",
        }
    }
}

/// A named blob of bytes destined for embedding, before encoding.
///
/// Consumed exactly once by [`Resource::encode`].
#[derive(Debug, Clone)]
pub struct Resource {
    /// Logical identity.
    pub kind: ResourceKind,
    /// Raw content bytes (UTF-8 for text resources).
    pub content: Vec<u8>,
    /// Whether to gzip the content before embedding.
    pub compress: bool,
}

impl Resource {
    /// Create a resource with an explicit compression choice.
    pub const fn new(kind: ResourceKind, content: Vec<u8>, compress: bool) -> Self {
        Self { kind, content, compress }
    }

    /// A text resource, compressed by default.
    pub fn text(kind: ResourceKind, content: &str) -> Self {
        Self::new(kind, content.as_bytes().to_vec(), true)
    }

    /// A binary resource, compressed by default.
    pub const fn binary(kind: ResourceKind, content: Vec<u8>) -> Self {
        Self::new(kind, content, true)
    }

    /// Encode into the embeddable form, consuming the resource.
    pub fn encode(self) -> EncodedResource {
        let bytes = if self.compress {
            gzip(&self.content)
        } else {
            self.content
        };
        EncodedResource { kind: self.kind, size: bytes.len(), bytes }
    }
}

/// An encoded resource, ready for the external code emitter.
#[derive(Debug, Clone)]
pub struct EncodedResource {
    /// Logical identity.
    pub kind: ResourceKind,
    /// Final byte length after optional compression.
    pub size: usize,
    /// Final bytes, in embedding order.
    pub bytes: Vec<u8>,
}

impl EncodedResource {
    /// The generated symbol name, e.g. `EMBERWEB_INDEX_HTML`.
    pub fn symbol(&self) -> String {
        format!("EMBERWEB_{}", self.kind.name())
    }

    /// Render the byte-array declaration embedded into the firmware.
    pub fn array_declaration(&self) -> String {
        let bytes = self
            .bytes
            .iter()
            .map(|b| b.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        format!(
            "const uint8_t {}[{}] PROGMEM = {{{}}};",
            self.symbol(),
            self.size,
            bytes
        )
    }

    /// Render the companion size constant.
    pub fn size_declaration(&self) -> String {
        format!("const size_t {}_SIZE = {};", self.symbol(), self.size)
    }
}

fn gzip(data: &[u8]) -> Vec<u8> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    // The sink is a Vec, which never fails to write.
    encoder.write_all(data).expect("gzip into Vec cannot fail");
    encoder.finish().expect("gzip into Vec cannot fail")
}
