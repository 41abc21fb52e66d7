//! Per-player visibility bookkeeping.

use hashbrown::HashSet;
use mc_coord::Point;
use mc_entity::EntityRef;
use mc_tracker::{Tracker, Update};
use tracing::trace;

/// The set of entity ids a player currently sees.
#[derive(Debug, Default)]
pub struct Visibility {
    pub viewer: i32,
    pub reference: Option<Point>,
    pub visible: HashSet<i32>,
    pub spawned: u64,
    pub despawned: u64,
}

impl Visibility {
    pub fn new(viewer: i32) -> Self {
        Self {
            viewer,
            ..Self::default()
        }
    }
}

impl Update for Visibility {
    fn reference_update(&mut self, point: Point, tracker: Option<&Tracker>) {
        self.reference = tracker.map(|_| point);
    }

    fn add(&mut self, entity: &EntityRef) {
        trace!(viewer = self.viewer, id = entity.id(), "spawn");
        self.visible.insert(entity.id());
        self.spawned += 1;
    }

    fn remove(&mut self, entity: &EntityRef) {
        trace!(viewer = self.viewer, id = entity.id(), "despawn");
        self.visible.remove(&entity.id());
        self.despawned += 1;
    }
}
