//! Entity references as seen by the tracker.
//!
//! The tracker never owns entity state. The world driver hands it
//! [`EntityRef`] handles, and the tracker reads identity, class, type and
//! position through the [`Entity`] trait.
//!
//! # Class Hierarchy
//!
//! Every entity has a runtime [`EntityClass`]. Classes form a single-parent
//! chain up to [`ENTITY`]:
//!
//! ```text
//! entity
//! └── living_entity
//!     ├── entity_creature
//!     └── player
//! ```
//!
//! Drivers extend the hierarchy with their own `static` classes. A
//! [`Target`] pairs a class with the Rust type query results are narrowed to.

mod class;
mod entity;
mod game_mode;
mod kind;
mod target;

#[cfg(feature = "testing")]
pub mod testing;

pub use class::{Ancestors, ENTITY, ENTITY_CREATURE, EntityClass, LIVING_ENTITY, PLAYER};
pub use entity::{Entity, EntityCast, EntityRef};
pub use game_mode::GameMode;
pub use kind::EntityType;
pub use target::Target;

/// A name did not match any known variant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind}: {name}")]
pub struct UnknownName {
    pub kind: &'static str,
    pub name: String,
}
