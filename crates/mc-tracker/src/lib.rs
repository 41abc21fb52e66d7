//! Entity tracker
//!
//! Keeps three indexes over live entities and evaluates
//! [`EntitySelector`](mc_selector::EntitySelector)s against them:
//!
//! - **type**: every class in an entity's lineage maps to the entity, so a
//!   `living_entity` query sees zombies and players alike
//! - **uuid**: one entry per entity
//! - **spatial**: entities bucketed by the chunk of their last position
//!
//! # Example
//!
//! ```
//! use mc_coord::Point;
//! use mc_selector::{Gather, Sort};
//! use mc_tracker::{Finder, Tracker};
//! # use mc_entity::{Entity, EntityClass, EntityType, ENTITY_CREATURE};
//! # use std::{any::Any, sync::Arc};
//! # struct Cow(i32, Point);
//! # impl Entity for Cow {
//! #     fn id(&self) -> i32 { self.0 }
//! #     fn uuid(&self) -> uuid::Uuid { uuid::Uuid::from_u128(self.0 as u128) }
//! #     fn class(&self) -> &'static EntityClass { &ENTITY_CREATURE }
//! #     fn entity_type(&self) -> EntityType { EntityType::Cow }
//! #     fn position(&self) -> Point { self.1 }
//! #     fn into_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync> { self }
//! # }
//!
//! let tracker = Tracker::default();
//! for (id, x) in [(1, 5.0), (2, 50.0)] {
//!     let point = Point::new(x, 64.0, 0.0);
//!     tracker.register(Arc::new(Cow(id, point)), point, None).unwrap();
//! }
//!
//! let nearest = mc_selector::entity(|builder| {
//!     builder.gather(Gather::Range(10.0)).sort(Sort::Nearest).limit(1);
//! });
//! let found = tracker.select_entity_first(&nearest).unwrap();
//! assert_eq!(found.id(), 1);
//! ```
//!
//! # Locking
//!
//! A tracker is one [`parking_lot::Mutex`] around all three indexes.
//! [`Update`] sinks are called with that lock held and must not re-enter the
//! tracker. Selections are collected before the lock is released.

mod config;
mod error;
mod finder;
mod index;
mod tracker;
mod update;

pub use config::{PARALLEL_GATHER_THRESHOLD_ENV, TrackerConfig, VIEW_DISTANCE_ENV, env_or};
pub use error::{IndexKind, TrackerError};
pub use finder::Finder;
pub use tracker::{Selection, Tracker};
pub use update::Update;
