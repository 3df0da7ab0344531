//! Way pass: assign ways to the child tiles their nodes landed in.
//!
//! A way's placement is derived entirely from the node index produced
//! earlier in the same pass, so the result does not depend on stream order.
//! Ways crossing a tile boundary are duplicated into every touched child so
//! each tile's extract stays geometrically self-contained.

use std::collections::BTreeSet;

use crate::entity::{Entity, EntityKind};
use crate::index::TileIndex;
use crate::storage::{ExtractSet, TileStore};
use crate::stream::EntitySource;
use crate::tile::Tile;

use super::error::BuildResult;

/// Outcome of one way pass.
pub struct WayPass {
    /// Way id → owning child tile(s).
    pub index: TileIndex,

    /// Member node references that could not be resolved.
    pub dangling: u64,
}

/// Assigns every way in `source` to the child tiles its member nodes
/// resolved to.
///
/// A way referencing any node absent from `node_index` is dropped for this
/// pass; each missing reference is counted. Entities of other kinds in the
/// stream are skipped.
pub fn process<S: EntitySource>(
    source: &mut S,
    store: &TileStore,
    node_index: &TileIndex,
) -> BuildResult<WayPass> {
    let mut index = TileIndex::new();
    let mut extracts = ExtractSet::new(store, EntityKind::Way);
    let mut dangling = 0u64;

    while let Some(entity) = source.next_entity()? {
        let way = match entity {
            Entity::Way(way) => way,
            _ => continue,
        };

        let mut touched: BTreeSet<Tile> = BTreeSet::new();
        let mut missing = 0u64;
        for node_id in &way.nodes {
            let owners = node_index.get(*node_id);
            if owners.is_empty() {
                missing += 1;
            } else {
                touched.extend(owners.iter().copied());
            }
        }

        if missing > 0 {
            tracing::debug!(
                id = way.id,
                missing = missing,
                "Dropping way with dangling node references"
            );
            dangling += missing;
            continue;
        }
        if touched.is_empty() {
            // A way without nodes has no geometry to place.
            continue;
        }

        for tile in &touched {
            index.insert(way.id, *tile);
            extracts.append(*tile, &Entity::Way(way.clone()))?;
        }
    }

    extracts.finish()?;

    Ok(WayPass { index, dangling })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{Node, Way};
    use crate::stream::{EntitySource as _, ExtractReader, MemorySource};

    /// Node index with node 1 in the north-west child and node 2 in the
    /// north-east child of the root.
    fn two_quadrant_index() -> TileIndex {
        let mut index = TileIndex::new();
        index.insert(1, Tile::new(1, 0, 0));
        index.insert(2, Tile::new(1, 1, 0));
        index
    }

    #[test]
    fn test_way_within_one_tile() {
        let dir = tempfile::tempdir().unwrap();
        let store = TileStore::new(dir.path());
        let mut node_index = TileIndex::new();
        node_index.insert(1, Tile::new(1, 0, 0));
        node_index.insert(2, Tile::new(1, 0, 0));

        let mut source = MemorySource::new(vec![Entity::Way(Way::new(10, vec![1, 2]))]);
        let pass = process(&mut source, &store, &node_index).unwrap();

        assert_eq!(pass.index.get(10), &[Tile::new(1, 0, 0)]);
        assert_eq!(pass.dangling, 0);
    }

    #[test]
    fn test_boundary_crossing_way_duplicated() {
        let dir = tempfile::tempdir().unwrap();
        let store = TileStore::new(dir.path());
        let node_index = two_quadrant_index();

        let way = Way::new(10, vec![1, 2]);
        let mut source = MemorySource::new(vec![Entity::Way(way.clone())]);
        let pass = process(&mut source, &store, &node_index).unwrap();

        // Indexed under both tiles.
        assert_eq!(
            pass.index.get(10),
            &[Tile::new(1, 0, 0), Tile::new(1, 1, 0)]
        );

        // Full record present in both extracts.
        for tile in [Tile::new(1, 0, 0), Tile::new(1, 1, 0)] {
            let mut reader =
                ExtractReader::open(store.extract_path(&tile, EntityKind::Way)).unwrap();
            let entity = reader.next_entity().unwrap().unwrap();
            assert_eq!(entity, Entity::Way(way.clone()));
            assert!(reader.next_entity().unwrap().is_none());
        }
    }

    #[test]
    fn test_dangling_reference_drops_way() {
        let dir = tempfile::tempdir().unwrap();
        let store = TileStore::new(dir.path());
        let node_index = two_quadrant_index();

        // Node 99 was never assigned; the whole way is dropped.
        let mut source = MemorySource::new(vec![Entity::Way(Way::new(10, vec![1, 99]))]);
        let pass = process(&mut source, &store, &node_index).unwrap();

        assert!(pass.index.is_empty());
        assert_eq!(pass.dangling, 1);
        assert!(!store
            .extract_path(&Tile::new(1, 0, 0), EntityKind::Way)
            .exists());
    }

    #[test]
    fn test_each_missing_reference_counted() {
        let dir = tempfile::tempdir().unwrap();
        let store = TileStore::new(dir.path());
        let node_index = two_quadrant_index();

        let mut source = MemorySource::new(vec![Entity::Way(Way::new(10, vec![98, 99, 1]))]);
        let pass = process(&mut source, &store, &node_index).unwrap();

        assert_eq!(pass.dangling, 2);
    }

    #[test]
    fn test_non_way_entities_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let store = TileStore::new(dir.path());
        let node_index = two_quadrant_index();

        let mut source = MemorySource::new(vec![
            Entity::Node(Node::new(1, -10.0, 10.0)),
            Entity::Way(Way::new(10, vec![1])),
        ]);
        let pass = process(&mut source, &store, &node_index).unwrap();

        assert_eq!(pass.index.len(), 1);
    }

    #[test]
    fn test_result_independent_of_stream_order() {
        let node_index = two_quadrant_index();
        let ways = vec![
            Entity::Way(Way::new(10, vec![1, 2])),
            Entity::Way(Way::new(11, vec![2])),
        ];

        let dir_a = tempfile::tempdir().unwrap();
        let store_a = TileStore::new(dir_a.path());
        let mut forward = MemorySource::new(ways.clone());
        let pass_a = process(&mut forward, &store_a, &node_index).unwrap();

        let dir_b = tempfile::tempdir().unwrap();
        let store_b = TileStore::new(dir_b.path());
        let mut reversed = MemorySource::new(ways.into_iter().rev().collect());
        let pass_b = process(&mut reversed, &store_b, &node_index).unwrap();

        assert_eq!(pass_a.index, pass_b.index);
    }
}
