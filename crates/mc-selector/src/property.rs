//! Named entity accessors.

use std::fmt;

use mc_entity::Entity;

/// A named, pure accessor from an entity to a value.
///
/// Properties let selectors filter on entity state without reaching into the
/// entity directly. The name only appears in diagnostics.
pub struct Property<V> {
    name: &'static str,
    get: fn(&dyn Entity) -> V,
}

impl<V> Property<V> {
    #[must_use]
    pub const fn new(name: &'static str, get: fn(&dyn Entity) -> V) -> Self {
        Self { name, get }
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Read the property from an entity.
    pub fn get(&self, entity: &dyn Entity) -> V {
        (self.get)(entity)
    }
}

impl<V> Clone for Property<V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<V> Copy for Property<V> {}

impl<V> fmt::Debug for Property<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Property({})", self.name)
    }
}
