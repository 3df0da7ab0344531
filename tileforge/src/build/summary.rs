//! Build outcome summary.

/// Counters accumulated over one complete build.
///
/// Non-fatal conditions encountered during processing end up here rather
/// than aborting the build; callers inspect [`has_warnings`](Self::has_warnings)
/// to decide whether the output deserves a closer look.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildSummary {
    /// Levels processed after the root pass.
    pub levels: u32,

    /// Tiles fully processed (including the root).
    pub tiles_processed: u64,

    /// Pending tiles skipped because their node extract was missing.
    pub tiles_skipped: u64,

    /// Node index entries written across all tiles.
    pub nodes_indexed: u64,

    /// Way index entries written across all tiles.
    pub ways_indexed: u64,

    /// Relation index entries written across all tiles.
    pub relations_indexed: u64,

    /// Way/relation member references that could not be resolved.
    pub dangling_references: u64,

    /// Nodes dropped because their coordinates were out of range.
    pub malformed_coordinates: u64,
}

impl BuildSummary {
    /// Creates an empty summary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if any non-fatal condition occurred.
    pub fn has_warnings(&self) -> bool {
        self.tiles_skipped > 0 || self.dangling_references > 0 || self.malformed_coordinates > 0
    }
}
