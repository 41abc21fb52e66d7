//! The immutable selector value.

use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, LazyLock};

use mc_coord::{ChunkPos, Point};
use mc_entity::{Entity, EntityCast, Target, UnknownName};
use uuid::Uuid;

use crate::Builder;

/// A test against an origin point and a candidate entity.
pub type Predicate = Arc<dyn Fn(Point, &dyn Entity) -> bool + Send + Sync>;

/// Where an index should start looking for candidates.
///
/// Gathering is only an optimization; every candidate is still checked
/// against the selector's predicates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Gather {
    /// The entity with this id.
    Only(i32),
    /// The entity with this UUID.
    OnlyUuid(Uuid),
    /// Entities strictly closer to the origin than this many blocks.
    Range(f64),
    /// Entities in this chunk column.
    Chunk { x: i32, z: i32 },
    /// Entities within this many chunks of the origin's chunk.
    ChunkRange(u32),
}

impl Gather {
    /// Only the given entity.
    #[must_use]
    pub fn only(entity: &dyn Entity) -> Self {
        Self::Only(entity.id())
    }

    /// The chunk containing `point`.
    #[must_use]
    pub fn chunk_at(point: Point) -> Self {
        let ChunkPos { x, z } = point.chunk();
        Self::Chunk { x, z }
    }
}

/// Result ordering relative to the query origin.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Sort {
    /// No defined order.
    #[default]
    Arbitrary,
    Furthest,
    Nearest,
    Random,
}

impl Sort {
    pub const ALL: [Self; 4] = [Self::Arbitrary, Self::Furthest, Self::Nearest, Self::Random];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Arbitrary => "arbitrary",
            Self::Furthest => "furthest",
            Self::Nearest => "nearest",
            Self::Random => "random",
        }
    }
}

/// Parses case-insensitively.
impl FromStr for Sort {
    type Err = UnknownName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|sort| sort.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownName {
                kind: "sort",
                name: s.to_string(),
            })
    }
}

/// An immutable description of an entity query.
pub struct EntitySelector<T: ?Sized = dyn Entity> {
    pub(crate) target: Target<T>,
    pub(crate) gather: Option<Gather>,
    pub(crate) sort: Sort,
    pub(crate) limit: usize,
    pub(crate) predicates: Arc<[Predicate]>,
}

impl<T: ?Sized + EntityCast> EntitySelector<T> {
    /// A selector matching every entity of the target class.
    #[must_use]
    pub fn of(target: Target<T>) -> Self {
        Builder::new(target).build()
    }

    /// Start building a selector for `target`.
    #[must_use]
    pub fn builder(target: Target<T>) -> Builder<T> {
        Builder::new(target)
    }
}

impl<T: ?Sized> EntitySelector<T> {
    /// Check every predicate, in registration order.
    ///
    /// Gather, sort and limit are not considered; this only answers whether
    /// `entity` would pass the filter when queried from `origin`.
    pub fn test(&self, origin: Point, entity: &dyn Entity) -> bool {
        self.predicates
            .iter()
            .all(|predicate| predicate(origin, entity))
    }

    #[must_use]
    pub const fn target(&self) -> Target<T> {
        self.target
    }

    #[must_use]
    pub const fn gather(&self) -> Option<Gather> {
        self.gather
    }

    #[must_use]
    pub const fn sort(&self) -> Sort {
        self.sort
    }

    /// Maximum number of results, or 0 for no limit.
    #[must_use]
    pub const fn limit(&self) -> usize {
        self.limit
    }

    #[must_use]
    pub fn predicate_count(&self) -> usize {
        self.predicates.len()
    }
}

impl<T: ?Sized> Clone for EntitySelector<T> {
    fn clone(&self) -> Self {
        Self {
            target: self.target,
            gather: self.gather,
            sort: self.sort,
            limit: self.limit,
            predicates: Arc::clone(&self.predicates),
        }
    }
}

impl<T: ?Sized> fmt::Debug for EntitySelector<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntitySelector")
            .field("target", &self.target)
            .field("gather", &self.gather)
            .field("sort", &self.sort)
            .field("limit", &self.limit)
            .field("predicates", &self.predicates.len())
            .finish()
    }
}

static ALL: LazyLock<EntitySelector> = LazyLock::new(|| EntitySelector::of(Target::entity()));
static PLAYERS: LazyLock<EntitySelector> = LazyLock::new(|| EntitySelector::of(Target::player()));

/// Every entity.
pub fn all() -> &'static EntitySelector {
    &ALL
}

/// Every player.
pub fn players() -> &'static EntitySelector {
    &PLAYERS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_parse_ignores_case() {
        assert_eq!("NEAREST".parse::<Sort>(), Ok(Sort::Nearest));
        assert_eq!("random".parse::<Sort>(), Ok(Sort::Random));
        assert_eq!("Furthest".parse::<Sort>(), Ok(Sort::Furthest));
        assert!("closest".parse::<Sort>().is_err());
    }

    #[test]
    fn test_gather_chunk_at() {
        assert_eq!(
            Gather::chunk_at(Point::new(-1.0, 64.0, 33.0)),
            Gather::Chunk { x: -1, z: 2 }
        );
    }

    #[test]
    fn test_shared_selectors() {
        assert_eq!(all().target().class().name(), "entity");
        assert_eq!(players().target().class().name(), "player");
        assert_eq!(all().limit(), 0);
        assert_eq!(all().gather(), None);
    }
}
