//! Node pass: partition nodes into the four child quadrants.
//!
//! The node pass runs first within a level because way and relation
//! assignment both depend on where the nodes landed. It produces the node
//! index for the parent tile, the per-child node extracts, and the set of
//! non-empty children that drives further recursion.

use crate::entity::{Entity, EntityKind};
use crate::index::TileIndex;
use crate::storage::{ExtractSet, TileStore};
use crate::stream::EntitySource;
use crate::tile::Tile;

use super::error::BuildResult;

/// Outcome of one node pass.
pub struct NodePass {
    /// Node id → owning child tile.
    pub index: TileIndex,

    /// Children that received at least one node, ascending `(x, y)`.
    pub non_empty: Vec<Tile>,

    /// True if the children can themselves be split further.
    pub has_more_levels: bool,

    /// Nodes dropped because their coordinates were out of range.
    pub malformed: u64,
}

/// Assigns every node in `source` to one child of `parent`.
///
/// Each node's identifier → child-tile pair is recorded in the returned
/// index and its record appended to the child's node extract. The stream is
/// ordered with nodes first, so the first way or relation ends the pass.
///
/// Nodes with coordinates outside the representable range are dropped and
/// counted, never silently clamped.
pub fn process<S: EntitySource>(
    source: &mut S,
    store: &TileStore,
    max_zoom: u8,
    parent: Tile,
) -> BuildResult<NodePass> {
    let mut index = TileIndex::new();
    let mut extracts = ExtractSet::new(store, EntityKind::Node);
    let mut malformed = 0u64;

    while let Some(entity) = source.next_entity()? {
        let node = match entity {
            Entity::Node(node) => node,
            _ => break,
        };

        let child = match parent.child_containing(node.lon, node.lat) {
            Ok(child) => child,
            Err(e) => {
                tracing::warn!(
                    id = node.id,
                    lon = node.lon,
                    lat = node.lat,
                    error = %e,
                    "Dropping node with malformed coordinates"
                );
                malformed += 1;
                continue;
            }
        };

        index.insert(node.id, child);
        extracts.append(child, &Entity::Node(node))?;
    }

    let non_empty = extracts.finish()?;

    Ok(NodePass {
        index,
        non_empty,
        has_more_levels: parent.zoom + 1 < max_zoom,
        malformed,
    })
}
