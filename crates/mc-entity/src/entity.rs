//! The entity handle trait.

use std::any::Any;
use std::sync::Arc;

use mc_coord::Point;
use uuid::Uuid;

use crate::{EntityClass, EntityType, GameMode};

/// Shared handle to a live entity.
pub type EntityRef = Arc<dyn Entity>;

/// Read access to an entity owned by the world driver.
///
/// `id` and `uuid` must stay constant for the lifetime of the entity, and
/// `class` must always return the same class. Player-only accessors default to
/// `None` and should be overridden by player implementations.
pub trait Entity: Send + Sync + 'static {
    /// Numeric entity id, unique among live entities.
    fn id(&self) -> i32;

    fn uuid(&self) -> Uuid;

    /// Runtime class used for type indexing.
    fn class(&self) -> &'static EntityClass;

    fn entity_type(&self) -> EntityType;

    /// Current position. The tracker keeps its own copy of the last position it
    /// was told about, so this may run ahead of the tracker between moves.
    fn position(&self) -> Point;

    fn username(&self) -> Option<&str> {
        None
    }

    fn game_mode(&self) -> Option<GameMode> {
        None
    }

    fn level(&self) -> Option<i32> {
        None
    }

    fn experience(&self) -> Option<f32> {
        None
    }

    /// Upcast for downcasting to the concrete type. Implement as `self`.
    fn into_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync>;
}

/// Narrowing from an [`EntityRef`] to the type a selector declares.
///
/// Implemented for `dyn Entity` (always succeeds) and for every concrete
/// [`Entity`] type (downcast).
pub trait EntityCast: Send + Sync + 'static {
    fn cast(entity: EntityRef) -> Option<Arc<Self>>;
}

impl EntityCast for dyn Entity {
    fn cast(entity: EntityRef) -> Option<Arc<Self>> {
        Some(entity)
    }
}

impl<T: Entity> EntityCast for T {
    fn cast(entity: EntityRef) -> Option<Arc<Self>> {
        entity.into_any().downcast::<T>().ok()
    }
}
