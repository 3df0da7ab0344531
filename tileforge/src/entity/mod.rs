//! Geographic entity model.
//!
//! The dataset consists of three dependent entity kinds: nodes carry a
//! coordinate, ways reference nodes, relations reference nodes and ways.
//! The kinds form a closed set, modeled as the [`Entity`] sum type with
//! exhaustive handling in every pass, since each kind has materially
//! different tile-resolution logic.
//!
//! Identifiers are 64-bit and unique within one kind's namespace only; a
//! node and a way may share an id without colliding.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A point entity with a geographic coordinate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Identifier, unique among nodes.
    pub id: i64,

    /// Longitude in degrees.
    pub lon: f64,

    /// Latitude in degrees.
    pub lat: f64,

    /// Key/value tags carried through to the output tiles.
    pub tags: Vec<(String, String)>,
}

impl Node {
    /// Creates an untagged node.
    pub fn new(id: i64, lon: f64, lat: f64) -> Self {
        Self {
            id,
            lon,
            lat,
            tags: Vec::new(),
        }
    }
}

/// A linear or area entity defined by an ordered sequence of node references.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Way {
    /// Identifier, unique among ways.
    pub id: i64,

    /// Ordered node references; the way's geometry is the path through
    /// those nodes' coordinates.
    pub nodes: Vec<i64>,

    /// Key/value tags carried through to the output tiles.
    pub tags: Vec<(String, String)>,
}

impl Way {
    /// Creates an untagged way over the given node references.
    pub fn new(id: i64, nodes: Vec<i64>) -> Self {
        Self {
            id,
            nodes,
            tags: Vec::new(),
        }
    }
}

/// A grouping entity referencing nodes and/or ways as typed members.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Relation {
    /// Identifier, unique among relations.
    pub id: i64,

    /// Ordered member references.
    pub members: Vec<Member>,

    /// Key/value tags carried through to the output tiles.
    pub tags: Vec<(String, String)>,
}

impl Relation {
    /// Creates an untagged relation over the given members.
    pub fn new(id: i64, members: Vec<Member>) -> Self {
        Self {
            id,
            members,
            tags: Vec::new(),
        }
    }
}

/// One typed member reference within a relation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    /// Kind of the referenced entity.
    pub kind: MemberKind,

    /// Identifier within the referenced kind's namespace.
    pub id: i64,

    /// Role of the member within the relation (may be empty).
    pub role: String,
}

impl Member {
    /// Creates a member reference with an empty role.
    pub fn new(kind: MemberKind, id: i64) -> Self {
        Self {
            kind,
            id,
            role: String::new(),
        }
    }

    /// Creates a member reference with the given role.
    pub fn with_role(kind: MemberKind, id: i64, role: impl Into<String>) -> Self {
        Self {
            kind,
            id,
            role: role.into(),
        }
    }
}

/// Kind of entity a relation member refers to.
///
/// `Relation` members occur in input but relation-of-relation membership is
/// not resolved; such members are treated as dangling references.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MemberKind {
    Node,
    Way,
    Relation,
}

/// A geographic entity of one of the three kinds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Entity {
    Node(Node),
    Way(Way),
    Relation(Relation),
}

impl Entity {
    /// Returns the entity's identifier within its kind's namespace.
    pub fn id(&self) -> i64 {
        match self {
            Entity::Node(n) => n.id,
            Entity::Way(w) => w.id,
            Entity::Relation(r) => r.id,
        }
    }

    /// Returns the entity's kind tag.
    pub fn kind(&self) -> EntityKind {
        match self {
            Entity::Node(_) => EntityKind::Node,
            Entity::Way(_) => EntityKind::Way,
            Entity::Relation(_) => EntityKind::Relation,
        }
    }
}

impl From<Node> for Entity {
    fn from(node: Node) -> Self {
        Entity::Node(node)
    }
}

impl From<Way> for Entity {
    fn from(way: Way) -> Self {
        Entity::Way(way)
    }
}

impl From<Relation> for Entity {
    fn from(relation: Relation) -> Self {
        Entity::Relation(relation)
    }
}

/// Entity kind tag, used to key per-kind files and indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Node,
    Way,
    Relation,
}

impl EntityKind {
    /// Plural name used in file names (`nodes`, `ways`, `relations`).
    pub fn plural(&self) -> &'static str {
        match self {
            EntityKind::Node => "nodes",
            EntityKind::Way => "ways",
            EntityKind::Relation => "relations",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.plural())
    }
}
