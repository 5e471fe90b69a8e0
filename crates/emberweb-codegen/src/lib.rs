//! Build-time compiler for the emberweb firmware web UI.
//!
//! Takes a validated device configuration tree and produces everything
//! the external code emitter needs to bake the web UI into a firmware
//! image: the assembled index document, gzip-compressed asset includes,
//! compile-time feature defines and per-entity sort entries.
//!
//! The pipeline is a pure transform with no global state and no caching
//! between runs, so identical configuration input yields byte-identical
//! artifacts (see [`compile`]).

pub mod compile;
pub mod define;
pub mod error;
pub mod html;
pub mod resolver;
pub mod resource;
pub mod sorting;

pub use compile::{compile, Artifacts};
pub use define::{Define, DefineValue};
pub use error::{CompileError, Result};
pub use html::build_index_html;
pub use resolver::{DirResolver, PathResolver};
pub use resource::{EncodedResource, Resource, ResourceKind};
pub use sorting::{SortEntry, SortRegistry, DEFAULT_SORTING_WEIGHT};
