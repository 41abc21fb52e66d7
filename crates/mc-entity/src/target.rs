//! Typed query targets.

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use crate::{ENTITY, Entity, EntityCast, EntityClass, LIVING_ENTITY, PLAYER};

/// The class a query selects from, paired with the Rust type results are
/// narrowed to.
///
/// `Target<dyn Entity>` is the common case. Drivers with concrete entity
/// types can declare `Target::<MyZombie>::of(&MY_ZOMBIE_CLASS)` to receive
/// `Arc<MyZombie>` directly.
pub struct Target<T: ?Sized> {
    class: &'static EntityClass,
    _marker: PhantomData<fn() -> Arc<T>>,
}

impl Target<dyn Entity> {
    /// Every entity.
    #[must_use]
    pub fn entity() -> Self {
        Self::of(&ENTITY)
    }

    #[must_use]
    pub fn living() -> Self {
        Self::of(&LIVING_ENTITY)
    }

    #[must_use]
    pub fn player() -> Self {
        Self::of(&PLAYER)
    }
}

impl<T: ?Sized + EntityCast> Target<T> {
    #[must_use]
    pub const fn of(class: &'static EntityClass) -> Self {
        Self {
            class,
            _marker: PhantomData,
        }
    }
}

impl<T: ?Sized> Target<T> {
    #[must_use]
    pub const fn class(self) -> &'static EntityClass {
        self.class
    }
}

impl<T: ?Sized> Clone for Target<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: ?Sized> Copy for Target<T> {}

impl<T: ?Sized> fmt::Debug for Target<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Target({})", self.class.name())
    }
}
