//! Shared fixtures for tracker integration tests.

use mc_coord::Point;
use mc_entity::testing::TestEntity;
use mc_entity::{Entity, EntityRef, EntityType};
use mc_tracker::{Tracker, Update};

pub fn at(x: f64, z: f64) -> Point {
    Point::new(x, 64.0, z)
}

pub fn mob(id: i32, kind: EntityType, point: Point) -> EntityRef {
    TestEntity::creature(id, kind, point).into_ref()
}

pub fn player(id: i32, name: &str, point: Point) -> EntityRef {
    TestEntity::player(id, name, point).into_ref()
}

/// Register `entity` at its own position.
pub fn track(tracker: &Tracker, entity: &EntityRef) {
    tracker
        .register(entity.clone(), entity.position(), None)
        .unwrap();
}

pub fn ids(entities: impl IntoIterator<Item = EntityRef>) -> Vec<i32> {
    entities.into_iter().map(|entity| entity.id()).collect()
}

pub fn sorted_ids(entities: impl IntoIterator<Item = EntityRef>) -> Vec<i32> {
    let mut ids = ids(entities);
    ids.sort_unstable();
    ids
}

/// Records every visibility callback.
#[derive(Default, Debug)]
pub struct Recorder {
    pub references: usize,
    pub added: Vec<i32>,
    pub removed: Vec<i32>,
}

impl Recorder {
    pub fn sorted(&self) -> (Vec<i32>, Vec<i32>) {
        let mut added = self.added.clone();
        let mut removed = self.removed.clone();
        added.sort_unstable();
        removed.sort_unstable();
        (added, removed)
    }
}

impl Update for Recorder {
    fn reference_update(&mut self, _point: Point, _tracker: Option<&Tracker>) {
        self.references += 1;
    }

    fn add(&mut self, entity: &EntityRef) {
        self.added.push(entity.id());
    }

    fn remove(&mut self, entity: &EntityRef) {
        self.removed.push(entity.id());
    }
}
