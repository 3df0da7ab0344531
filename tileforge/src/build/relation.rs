//! Relation pass: assign relations to the tiles their members landed in.
//!
//! Relations close out a tile's pass; they never drive further recursion.
//! Members are resolved per kind: node members against the node index, way
//! members against the way index when one was produced. Relation members
//! referencing other relations are not resolved and count as dangling.

use std::collections::BTreeSet;

use crate::entity::{Entity, EntityKind, MemberKind};
use crate::index::TileIndex;
use crate::storage::{ExtractSet, TileStore};
use crate::stream::EntitySource;
use crate::tile::Tile;

use super::error::BuildResult;

/// Outcome of one relation pass.
pub struct RelationPass {
    /// Relation id → owning child tile(s).
    pub index: TileIndex,

    /// Member references that could not be resolved.
    pub dangling: u64,
}

/// Assigns every relation in `source` to the union of child tiles its
/// resolvable members landed in.
///
/// Unresolvable members are dropped individually and counted; a relation is
/// kept as long as at least one member resolves, and dropped entirely when
/// none do. `way_index` is `None` when no way pass ran for this tile, which
/// makes every way member dangling.
pub fn process<S: EntitySource>(
    source: &mut S,
    store: &TileStore,
    node_index: &TileIndex,
    way_index: Option<&TileIndex>,
) -> BuildResult<RelationPass> {
    let mut index = TileIndex::new();
    let mut extracts = ExtractSet::new(store, EntityKind::Relation);
    let mut dangling = 0u64;

    while let Some(entity) = source.next_entity()? {
        let relation = match entity {
            Entity::Relation(relation) => relation,
            _ => continue,
        };

        let mut touched: BTreeSet<Tile> = BTreeSet::new();
        let mut missing = 0u64;
        for member in &relation.members {
            let owners: &[Tile] = match member.kind {
                MemberKind::Node => node_index.get(member.id),
                MemberKind::Way => way_index.map(|i| i.get(member.id)).unwrap_or(&[]),
                // Relation-of-relation membership is not resolved.
                MemberKind::Relation => &[],
            };
            if owners.is_empty() {
                missing += 1;
            } else {
                touched.extend(owners.iter().copied());
            }
        }

        dangling += missing;

        if touched.is_empty() {
            tracing::debug!(
                id = relation.id,
                members = relation.members.len(),
                "Dropping relation with no resolvable members"
            );
            continue;
        }

        for tile in &touched {
            index.insert(relation.id, *tile);
            extracts.append(*tile, &Entity::Relation(relation.clone()))?;
        }
    }

    extracts.finish()?;

    Ok(RelationPass { index, dangling })
}
