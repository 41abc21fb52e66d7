//! Entity selectors.
//!
//! An [`EntitySelector`] describes which entities a query wants, without
//! saying how to find them:
//!
//! - a [`Target`] class (and the Rust type results are narrowed to)
//! - an optional [`Gather`] hint telling an index where to start looking
//! - predicates over [`Property`] values, all of which must pass
//! - a [`Sort`] order and a result limit
//!
//! Selectors are immutable once built and cheap to clone, so the same value
//! can be shared between threads and evaluated many times.
//!
//! # Example
//!
//! ```
//! use mc_entity::{EntityType, GameMode};
//! use mc_selector::{Gather, Sort, properties, player};
//!
//! let nearest_survivor = player(|builder| {
//!     builder
//!         .gather(Gather::ChunkRange(4))
//!         .predicate_equals(properties::GAME_MODE, Some(GameMode::Survival))
//!         .sort(Sort::Nearest)
//!         .limit(1);
//! });
//!
//! assert_eq!(nearest_survivor.limit(), 1);
//! assert_eq!(nearest_survivor.gather(), Some(Gather::ChunkRange(4)));
//! ```

mod builder;
mod property;
mod selector;

pub mod properties;

pub use builder::{Builder, SelectorError, entity, living, player, selector};
pub use mc_entity::Target;
pub use property::Property;
pub use selector::{EntitySelector, Gather, Predicate, Sort, all, players};
