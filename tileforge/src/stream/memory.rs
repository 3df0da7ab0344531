//! In-memory entity source.

use crate::entity::Entity;

use super::{EntitySource, StreamError};

/// Resettable source over an in-memory entity list.
///
/// Useful for tests and for embedders that already hold their dataset in
/// memory. Entities are yielded in list order; a well-formed input orders
/// nodes before ways before relations.
pub struct MemorySource {
    entities: Vec<Entity>,
    pos: usize,
}

impl MemorySource {
    /// Creates a source over the given entities.
    pub fn new(entities: Vec<Entity>) -> Self {
        Self { entities, pos: 0 }
    }
}

impl EntitySource for MemorySource {
    fn can_reset(&self) -> bool {
        true
    }

    fn reset(&mut self) -> Result<(), StreamError> {
        self.pos = 0;
        Ok(())
    }

    fn next_entity(&mut self) -> Result<Option<Entity>, StreamError> {
        let entity = self.entities.get(self.pos).cloned();
        if entity.is_some() {
            self.pos += 1;
        }
        Ok(entity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{Node, Way};

    #[test]
    fn test_yields_in_order_then_none() {
        let mut source = MemorySource::new(vec![
            Entity::Node(Node::new(1, 0.0, 0.0)),
            Entity::Way(Way::new(2, vec![1])),
        ]);

        assert_eq!(source.next_entity().unwrap().unwrap().id(), 1);
        assert_eq!(source.next_entity().unwrap().unwrap().id(), 2);
        assert!(source.next_entity().unwrap().is_none());
        // Stays exhausted.
        assert!(source.next_entity().unwrap().is_none());
    }

    #[test]
    fn test_reset_restarts_iteration() {
        let mut source = MemorySource::new(vec![Entity::Node(Node::new(1, 0.0, 0.0))]);

        assert!(source.can_reset());
        source.next_entity().unwrap();
        assert!(source.next_entity().unwrap().is_none());

        source.reset().unwrap();
        assert_eq!(source.next_entity().unwrap().unwrap().id(), 1);
    }
}
