//! Visibility callbacks.

use mc_coord::Point;
use mc_entity::EntityRef;

use crate::Tracker;

/// Receives visibility changes while the tracker registers, unregisters or
/// moves an entity.
///
/// Calls happen with the tracker locked. Implementations must not call back
/// into the same tracker or they will deadlock.
pub trait Update {
    /// The reference point of the entity being updated. `tracker` is `None`
    /// when the entity is leaving the tracker.
    fn reference_update(&mut self, point: Point, tracker: Option<&Tracker>);

    /// `entity` came into view.
    fn add(&mut self, entity: &EntityRef);

    /// `entity` went out of view.
    fn remove(&mut self, entity: &EntityRef);
}
