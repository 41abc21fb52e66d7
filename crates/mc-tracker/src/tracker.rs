//! The locked tracker.

use std::fmt;
use std::sync::Arc;
use std::vec;

use mc_coord::Point;
use mc_entity::{Entity, EntityCast, EntityRef};
use mc_selector::{EntitySelector, Gather};
use parking_lot::Mutex;
use tracing::{debug, trace, warn};

use crate::index::TrackerState;
use crate::{TrackerConfig, TrackerError, Update};

/// Indexes live entities by id, UUID, class and chunk, and answers
/// [`EntitySelector`] queries against them.
///
/// Every operation takes a single lock, so registration, movement and
/// selection are linearized. Share a tracker between threads with `Arc`.
pub struct Tracker {
    state: Mutex<TrackerState>,
    config: TrackerConfig,
    view: EntitySelector,
}

impl Default for Tracker {
    fn default() -> Self {
        Self::new(TrackerConfig::default())
    }
}

impl Tracker {
    #[must_use]
    pub fn new(config: TrackerConfig) -> Self {
        let view = mc_selector::entity(|builder| {
            builder.gather(Gather::ChunkRange(config.view_distance));
        });

        Self {
            state: Mutex::new(TrackerState::default()),
            config,
            view,
        }
    }

    /// Start tracking `entity` at `point`.
    ///
    /// With an `update` sink, the sink is told the new reference point and
    /// receives [`Update::add`] for every other entity within view distance.
    pub fn register(
        &self,
        entity: EntityRef,
        point: Point,
        update: Option<&mut dyn Update>,
    ) -> Result<(), TrackerError> {
        let id = entity.id();
        let mut state = self.state.lock();
        state.register(entity, point)?;
        debug!(id, chunk = %point.chunk(), "registered entity");

        if let Some(update) = update {
            update.reference_update(point, Some(self));
            for other in state.select(&self.view, point, self.config.parallel_gather_threshold) {
                if other.id() != id {
                    update.add(&other);
                }
            }
        }

        Ok(())
    }

    /// Stop tracking `entity`. Does nothing if it is not tracked.
    ///
    /// With an `update` sink, the sink's reference point is cleared and it
    /// receives [`Update::remove`] for every entity that was within view
    /// distance.
    pub fn unregister(
        &self,
        entity: &dyn Entity,
        update: Option<&mut dyn Update>,
    ) -> Result<(), TrackerError> {
        let id = entity.id();
        let mut state = self.state.lock();
        let Some(tracked) = state.unregister(id)? else {
            trace!(id, "ignoring unregister of untracked entity");
            return Ok(());
        };
        debug!(id, "unregistered entity");

        if let Some(update) = update {
            let point = tracked.last_position;
            update.reference_update(point, None);
            for other in state.select(&self.view, point, self.config.parallel_gather_threshold) {
                if other.id() != id {
                    update.remove(&other);
                }
            }
        }

        Ok(())
    }

    /// Record that `entity` moved to `point`.
    ///
    /// Moving an untracked entity is logged and ignored, since it can race
    /// with [`unregister`](Self::unregister). When the entity changes chunk,
    /// the `update` sink receives adds and removes for the entities entering
    /// and leaving its view, never for the entity itself.
    pub fn move_entity(&self, entity: &dyn Entity, point: Point, update: Option<&mut dyn Update>) {
        let id = entity.id();
        let mut state = self.state.lock();
        let Some(old) = state.relocate(id, point) else {
            warn!(id, "attempted to move unregistered entity");
            return;
        };
        if old.same_chunk(point) {
            return;
        }
        trace!(id, from = %old.chunk(), to = %point.chunk(), "entity changed chunk");

        if let Some(update) = update {
            state.difference(old, point, self.config.view_distance, id, update);
            update.reference_update(point, Some(self));
        }
    }

    /// Evaluate `selector` from `origin`.
    ///
    /// Results are collected and narrowed to `T` under the lock; the returned
    /// iterator owns them and may be consumed while calling back into the
    /// tracker. Entities that cannot be narrowed are logged and skipped before
    /// the selector's limit is applied.
    pub fn select_entity<T: ?Sized + EntityCast>(
        &self,
        selector: &EntitySelector<T>,
        origin: Point,
    ) -> Selection<T> {
        let threshold = self.config.parallel_gather_threshold;
        let found = self.state.lock().select(selector, origin, threshold);
        Selection::new(found)
    }

    /// Number of tracked entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.state.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn contains(&self, id: i32) -> bool {
        self.state.lock().get(id).is_some()
    }

    /// The position the tracker last recorded for `id`.
    #[must_use]
    pub fn last_position(&self, id: i32) -> Option<Point> {
        self.state.lock().get(id).map(|tracked| tracked.last_position)
    }

    #[must_use]
    pub const fn view_distance(&self) -> u32 {
        self.config.view_distance
    }

    #[must_use]
    pub const fn config(&self) -> &TrackerConfig {
        &self.config
    }
}

impl fmt::Debug for Tracker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tracker")
            .field("entities", &self.len())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Entities matched by a selector, narrowed to the selector's target type.
pub struct Selection<T: ?Sized> {
    found: vec::IntoIter<Arc<T>>,
}

impl<T: ?Sized> Selection<T> {
    fn new(found: Vec<Arc<T>>) -> Self {
        Self {
            found: found.into_iter(),
        }
    }
}

impl<T: ?Sized> Iterator for Selection<T> {
    type Item = Arc<T>;

    fn next(&mut self) -> Option<Self::Item> {
        self.found.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.found.size_hint()
    }
}

impl<T: ?Sized> ExactSizeIterator for Selection<T> {}
