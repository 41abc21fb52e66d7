//! Index state guarded by the tracker lock.

use std::sync::Arc;

use hashbrown::{HashMap, HashSet};
use mc_coord::{
    ChunkIndex, ChunkPos, Point, chunk_count, chunks_in_range, chunks_in_range_differing,
};
use mc_entity::{EntityCast, EntityClass, EntityRef};
use mc_selector::{EntitySelector, Gather, Sort};
use rand::seq::SliceRandom;
use rayon::prelude::*;
use rustc_hash::FxBuildHasher;
use smallvec::SmallVec;
use tracing::error;
use uuid::Uuid;

use crate::{IndexKind, TrackerError, Update};

type FxHashMap<K, V> = HashMap<K, V, FxBuildHasher>;
type FxHashSet<T> = HashSet<T, FxBuildHasher>;

/// A class followed by its ancestors, up to the root.
type Lineage = SmallVec<[&'static EntityClass; 4]>;

pub(crate) struct TrackedEntity {
    pub(crate) entity: EntityRef,
    pub(crate) last_position: Point,
}

impl std::fmt::Debug for TrackedEntity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrackedEntity")
            .field("id", &self.entity.id())
            .field("last_position", &self.last_position)
            .finish_non_exhaustive()
    }
}

/// The three entity indexes.
///
/// Every registered id appears in `entities`, in `by_uuid`, in the `by_class`
/// set of each class in its lineage, and in exactly one `by_chunk` cell: the
/// one containing its last position. Empty sets are removed.
#[derive(Default)]
pub(crate) struct TrackerState {
    entities: FxHashMap<i32, TrackedEntity>,
    by_class: HashMap<&'static EntityClass, FxHashSet<i32>>,
    by_uuid: HashMap<Uuid, i32>,
    by_chunk: FxHashMap<ChunkIndex, FxHashSet<i32>>,
    lineages: HashMap<&'static EntityClass, Lineage>,
}

impl TrackerState {
    pub(crate) fn len(&self) -> usize {
        self.entities.len()
    }

    pub(crate) fn get(&self, id: i32) -> Option<&TrackedEntity> {
        self.entities.get(&id)
    }

    fn lineage(&mut self, class: &'static EntityClass) -> Lineage {
        self.lineages
            .entry(class)
            .or_insert_with(|| class.ancestors().collect())
            .clone()
    }

    /// Index `entity` at `point`. Nothing is modified on error.
    pub(crate) fn register(&mut self, entity: EntityRef, point: Point) -> Result<(), TrackerError> {
        let id = entity.id();
        let uuid = entity.uuid();
        if self.entities.contains_key(&id) {
            return Err(TrackerError::DuplicateId(id));
        }
        if self.by_uuid.contains_key(&uuid) {
            return Err(TrackerError::DuplicateUuid(uuid));
        }

        for class in self.lineage(entity.class()) {
            self.by_class.entry(class).or_default().insert(id);
        }
        self.by_uuid.insert(uuid, id);
        self.by_chunk
            .entry(point.chunk().index())
            .or_default()
            .insert(id);
        self.entities.insert(
            id,
            TrackedEntity {
                entity,
                last_position: point,
            },
        );

        Ok(())
    }

    /// Drop `id` from every index, returning its entry. `Ok(None)` if it was
    /// never registered.
    ///
    /// Removal always runs to completion; a missing entry in any index is
    /// reported afterwards, naming the first index found inconsistent.
    pub(crate) fn unregister(&mut self, id: i32) -> Result<Option<TrackedEntity>, TrackerError> {
        let Some(tracked) = self.entities.remove(&id) else {
            return Ok(None);
        };
        let mut missing = None;

        if self.by_uuid.remove(&tracked.entity.uuid()).is_none() {
            missing.get_or_insert(IndexKind::Uuid);
        }

        for class in self.lineage(tracked.entity.class()) {
            let removed = self
                .by_class
                .get_mut(class)
                .is_some_and(|members| members.remove(&id));
            if !removed {
                missing.get_or_insert(IndexKind::Type);
            }
            if self.by_class.get(class).is_some_and(HashSet::is_empty) {
                self.by_class.remove(class);
            }
        }

        if !self.remove_from_cell(tracked.last_position.chunk().index(), id) {
            missing.get_or_insert(IndexKind::Spatial);
        }

        match missing {
            Some(index) => Err(TrackerError::MissingIndexEntry { id, index }),
            None => Ok(Some(tracked)),
        }
    }

    /// Record a new position for `id` and move it between cells if needed.
    /// Returns the previous position, or `None` if `id` is not registered.
    pub(crate) fn relocate(&mut self, id: i32, point: Point) -> Option<Point> {
        let tracked = self.entities.get_mut(&id)?;
        let old = std::mem::replace(&mut tracked.last_position, point);

        if !old.same_chunk(point) {
            self.remove_from_cell(old.chunk().index(), id);
            self.by_chunk
                .entry(point.chunk().index())
                .or_default()
                .insert(id);
        }

        Some(old)
    }

    fn remove_from_cell(&mut self, index: ChunkIndex, id: i32) -> bool {
        let Some(cell) = self.by_chunk.get_mut(&index) else {
            return false;
        };
        let removed = cell.remove(&id);
        if cell.is_empty() {
            self.by_chunk.remove(&index);
        }
        removed
    }

    /// Entities in the cell at `pos`.
    fn cell(&self, pos: ChunkPos) -> impl Iterator<Item = &TrackedEntity> {
        self.resolve(self.by_chunk.get(&pos.index()).into_iter().flatten().copied())
    }

    fn resolve(&self, ids: impl IntoIterator<Item = i32>) -> impl Iterator<Item = &TrackedEntity> {
        ids.into_iter().filter_map(|id| {
            let tracked = self.entities.get(&id);
            if tracked.is_none() {
                error!(id, "indexed entity has no tracker entry");
            }
            tracked
        })
    }

    /// Report entities that enter or leave a `radius` chunk view when the
    /// viewer moves from `old` to `new`. `viewer` itself is skipped.
    pub(crate) fn difference(
        &self,
        old: Point,
        new: Point,
        radius: u32,
        viewer: i32,
        update: &mut dyn Update,
    ) {
        let mut entered = Vec::new();
        let mut left = Vec::new();
        chunks_in_range_differing(
            new.chunk(),
            old.chunk(),
            radius,
            |pos| entered.push(pos),
            |pos| left.push(pos),
        );

        for pos in entered {
            for tracked in self.cell(pos).filter(|tracked| tracked.entity.id() != viewer) {
                update.add(&tracked.entity);
            }
        }
        for pos in left {
            for tracked in self.cell(pos).filter(|tracked| tracked.entity.id() != viewer) {
                update.remove(&tracked.entity);
            }
        }
    }

    /// Evaluate `selector` from `origin`, narrowing survivors to `T`.
    ///
    /// Narrowing happens before the limit is applied, so an entity that does
    /// not match the declared Rust type never takes a slot from one that does.
    pub(crate) fn select<T: ?Sized + EntityCast>(
        &self,
        selector: &EntitySelector<T>,
        origin: Point,
        parallel_threshold: usize,
    ) -> Vec<Arc<T>> {
        let Some(members) = self
            .by_class
            .get(selector.target().class())
            .filter(|members| !members.is_empty())
        else {
            return Vec::new();
        };

        let mut candidates: Vec<&TrackedEntity> = match selector.gather() {
            Some(Gather::Only(id)) => self.resolve(members.get(&id).copied()).collect(),
            Some(Gather::OnlyUuid(uuid)) => self
                .resolve(
                    self.by_uuid
                        .get(&uuid)
                        .copied()
                        .filter(|id| members.contains(id)),
                )
                .collect(),
            Some(Gather::Range(radius)) => {
                let radius_squared = radius * radius;
                self.resolve(members.iter().copied())
                    .filter(|tracked| {
                        origin.distance_squared(tracked.last_position) < radius_squared
                    })
                    .collect()
            }
            Some(Gather::Chunk { x, z }) => self
                .cell(ChunkPos::new(x, z))
                .filter(|tracked| members.contains(&tracked.entity.id()))
                .collect(),
            Some(Gather::ChunkRange(radius)) => {
                let ids = self.chunk_range_ids(origin.chunk(), radius, parallel_threshold);
                self.resolve(ids.into_iter().filter(|id| members.contains(id)))
                    .collect()
            }
            None => self.resolve(members.iter().copied()).collect(),
        };

        candidates.retain(|tracked| selector.test(origin, &*tracked.entity));

        let distance = |tracked: &TrackedEntity| origin.distance_squared(tracked.last_position);
        match selector.sort() {
            Sort::Arbitrary => {}
            Sort::Nearest => candidates.sort_by(|a, b| distance(a).total_cmp(&distance(b))),
            Sort::Furthest => candidates.sort_by(|a, b| distance(b).total_cmp(&distance(a))),
            Sort::Random => candidates.shuffle(&mut rand::thread_rng()),
        }

        let limit = match selector.limit() {
            0 => usize::MAX,
            limit => limit,
        };
        candidates
            .into_iter()
            .filter_map(|tracked| {
                let narrowed = T::cast(Arc::clone(&tracked.entity));
                if narrowed.is_none() {
                    error!(
                        id = tracked.entity.id(),
                        "selected entity does not match the selector target type"
                    );
                }
                narrowed
            })
            .take(limit)
            .collect()
    }

    /// Ids in every cell within `radius` chunks of `center`, in cell order.
    fn chunk_range_ids(&self, center: ChunkPos, radius: u32, parallel_threshold: usize) -> Vec<i32> {
        if chunk_count(radius) < parallel_threshold {
            return chunks_in_range(center, radius)
                .filter_map(|pos| self.by_chunk.get(&pos.index()))
                .flatten()
                .copied()
                .collect();
        }

        let cells: Vec<ChunkPos> = chunks_in_range(center, radius).collect();
        cells
            .par_iter()
            .filter_map(|pos| self.by_chunk.get(&pos.index()))
            .flat_map_iter(|cell| cell.iter().copied())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use mc_entity::testing::TestEntity;
    use mc_entity::{ENTITY, ENTITY_CREATURE, EntityType, LIVING_ENTITY, PLAYER, Target};

    use super::*;

    fn zombie(id: i32, x: f64, z: f64) -> EntityRef {
        TestEntity::creature(id, EntityType::Zombie, Point::new(x, 64.0, z)).into_ref()
    }

    fn register(state: &mut TrackerState, entity: EntityRef) {
        let point = entity.position();
        state.register(entity, point).unwrap();
    }

    fn ids(found: &[EntityRef]) -> Vec<i32> {
        found.iter().map(|entity| entity.id()).collect()
    }

    #[test]
    fn test_register_indexes_lineage() {
        let mut state = TrackerState::default();
        register(&mut state, zombie(1, 0.0, 0.0));

        assert_eq!(state.len(), 1);
        for class in [&ENTITY_CREATURE, &LIVING_ENTITY, &ENTITY] {
            assert!(state.by_class[class].contains(&1), "{class}");
        }
        assert!(!state.by_class.contains_key(&PLAYER));
        assert_eq!(state.by_chunk.len(), 1);
    }

    #[test]
    fn test_unregister_clears_everything() {
        let mut state = TrackerState::default();
        register(&mut state, zombie(1, 0.0, 0.0));

        let tracked = state.unregister(1).unwrap().unwrap();
        assert_eq!(tracked.entity.id(), 1);
        assert!(state.entities.is_empty());
        assert!(state.by_class.is_empty());
        assert!(state.by_uuid.is_empty());
        assert!(state.by_chunk.is_empty());

        assert!(state.unregister(1).unwrap().is_none());
    }

    #[test]
    fn test_relocate_moves_cells() {
        let mut state = TrackerState::default();
        register(&mut state, zombie(1, 0.0, 0.0));

        assert_eq!(
            state.relocate(1, Point::new(4.0, 64.0, 4.0)),
            Some(Point::new(0.0, 64.0, 0.0))
        );
        assert_eq!(state.by_chunk.len(), 1);
        assert!(state.by_chunk.contains_key(&ChunkPos::new(0, 0).index()));

        state.relocate(1, Point::new(40.0, 64.0, 4.0));
        assert_eq!(state.by_chunk.len(), 1);
        assert!(state.by_chunk.contains_key(&ChunkPos::new(2, 0).index()));

        assert_eq!(state.relocate(99, Point::ZERO), None);
    }

    #[test]
    fn test_missing_index_entry_is_reported() {
        let mut state = TrackerState::default();
        register(&mut state, zombie(1, 0.0, 0.0));
        state.by_chunk.clear();

        assert_eq!(
            state.unregister(1).unwrap_err(),
            TrackerError::MissingIndexEntry {
                id: 1,
                index: IndexKind::Spatial,
            }
        );
    }

    #[test]
    fn test_unregister_completes_despite_missing_entry() {
        let mut state = TrackerState::default();
        let entity = zombie(1, 0.0, 0.0);
        let uuid = entity.uuid();
        register(&mut state, entity);
        state.by_uuid.remove(&uuid);

        assert_eq!(
            state.unregister(1).unwrap_err(),
            TrackerError::MissingIndexEntry {
                id: 1,
                index: IndexKind::Uuid,
            }
        );
        assert!(state.entities.is_empty());
        assert!(state.by_class.is_empty());
        assert!(state.by_chunk.is_empty());
    }

    #[test]
    fn test_chunk_range_parallel_matches_sequential() {
        let mut state = TrackerState::default();
        for i in 0..50 {
            let offset = f64::from(i) * 7.0 - 150.0;
            register(&mut state, zombie(i, offset, -offset));
        }

        let center = ChunkPos::new(0, 0);
        let sequential = state.chunk_range_ids(center, 6, usize::MAX);
        let parallel = state.chunk_range_ids(center, 6, 0);
        assert_eq!(sequential, parallel);
        assert!(!sequential.is_empty());
    }

    #[test]
    fn test_select_sorts_before_limit() {
        let mut state = TrackerState::default();
        register(&mut state, zombie(1, 30.0, 0.0));
        register(&mut state, zombie(2, 10.0, 0.0));
        register(&mut state, zombie(3, 20.0, 0.0));

        let nearest = mc_selector::entity(|builder| {
            builder.sort(Sort::Nearest).limit(2);
        });
        assert_eq!(ids(&state.select(&nearest, Point::ZERO, usize::MAX)), vec![2, 3]);

        let furthest = mc_selector::entity(|builder| {
            builder.sort(Sort::Furthest).limit(1);
        });
        assert_eq!(ids(&state.select(&furthest, Point::ZERO, usize::MAX)), vec![1]);
    }

    #[test]
    fn test_select_unknown_class_is_empty() {
        let mut state = TrackerState::default();
        register(&mut state, zombie(1, 0.0, 0.0));

        let players = EntitySelector::of(Target::player());
        assert!(state.select(&players, Point::ZERO, usize::MAX).is_empty());
    }
}
