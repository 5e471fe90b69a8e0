//! Entity display ordering for the web UI.
//!
//! Every UI-exposed entity gets a numeric sort weight; lower values sort
//! earlier and ties keep declaration order, so the registry is an
//! append-only list rather than a sorted structure. One registry exists
//! per compile run and is never reused across runs.

use emberweb_core::TreePath;

/// Weight assigned to entities with no explicit override. Mid-range, so
/// overrides can sort both before and after the defaults.
pub const DEFAULT_SORTING_WEIGHT: f64 = 50.0;

/// One entity's position in the web UI listing.
#[derive(Debug, Clone, PartialEq)]
pub struct SortEntry {
    /// Identifier of the entity, as known to the code generator.
    pub entity_id: String,
    /// Final sort weight (explicit override or the default).
    pub weight: f64,
    /// Where in the configuration tree the entity was declared.
    pub declared_at: TreePath,
}

/// Append-only registry of sort entries, in entity declaration order.
///
/// Re-registering an entity appends a second entry; the registry never
/// deduplicates. Explicit weights are only legal under web UI version 3;
/// that gate is enforced by the whole-tree validator before anything is
/// registered, so the registry itself accepts what it is given.
#[derive(Debug, Default)]
pub struct SortRegistry {
    entries: Vec<SortEntry>,
}

impl SortRegistry {
    /// Create an empty registry for one compile run.
    pub const fn new() -> Self {
        Self { entries: Vec::new() }
    }

    /// Register an entity, with an explicit weight or the default.
    pub fn register(
        &mut self,
        entity_id: impl Into<String>,
        explicit_weight: Option<f64>,
        declared_at: TreePath,
    ) -> &SortEntry {
        self.entries.push(SortEntry {
            entity_id: entity_id.into(),
            weight: explicit_weight.unwrap_or(DEFAULT_SORTING_WEIGHT),
            declared_at,
        });
        // Just pushed, so the list is non-empty.
        self.entries.last().expect("entry just pushed")
    }

    /// Registered entries in declaration order.
    pub fn entries(&self) -> &[SortEntry] {
        &self.entries
    }

    /// Consume the registry, yielding the entries in declaration order.
    pub fn into_entries(self) -> Vec<SortEntry> {
        self.entries
    }
}
