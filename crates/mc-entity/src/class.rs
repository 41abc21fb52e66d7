//! Runtime entity classes.

use std::fmt;
use std::hash::{Hash, Hasher};

/// A node in the entity class hierarchy.
///
/// Classes are identified by name, so every class in a process must have a
/// distinct name. Declare them as `static` items so parents can be referenced:
///
/// ```
/// use mc_entity::{EntityClass, PLAYER};
///
/// static CUSTOM_PLAYER: EntityClass = EntityClass::extends("custom_player", &PLAYER);
///
/// assert!(PLAYER.is_assignable_from(&CUSTOM_PLAYER));
/// assert!(!CUSTOM_PLAYER.is_assignable_from(&PLAYER));
/// ```
pub struct EntityClass {
    name: &'static str,
    parent: Option<&'static EntityClass>,
}

/// Root of every entity class.
pub static ENTITY: EntityClass = EntityClass::root("entity");
pub static LIVING_ENTITY: EntityClass = EntityClass::extends("living_entity", &ENTITY);
pub static ENTITY_CREATURE: EntityClass = EntityClass::extends("entity_creature", &LIVING_ENTITY);
pub static PLAYER: EntityClass = EntityClass::extends("player", &LIVING_ENTITY);

impl EntityClass {
    /// A class with no parent. Only [`ENTITY`] should be declared this way.
    #[must_use]
    pub const fn root(name: &'static str) -> Self {
        Self { name, parent: None }
    }

    #[must_use]
    pub const fn extends(name: &'static str, parent: &'static EntityClass) -> Self {
        Self {
            name,
            parent: Some(parent),
        }
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    #[must_use]
    pub const fn parent(&self) -> Option<&'static EntityClass> {
        self.parent
    }

    /// This class followed by each of its ancestors up to the root.
    #[must_use]
    pub const fn ancestors(&self) -> Ancestors<'_> {
        Ancestors { next: Some(self) }
    }

    /// Whether an entity of class `other` can be used where `self` is expected.
    #[must_use]
    pub fn is_assignable_from(&self, other: &EntityClass) -> bool {
        other.ancestors().any(|class| class == self)
    }
}

impl PartialEq for EntityClass {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for EntityClass {}

impl Hash for EntityClass {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl fmt::Debug for EntityClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EntityClass({})", self.name)
    }
}

impl fmt::Display for EntityClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Iterator over a class and its ancestors, most specific first.
#[derive(Clone)]
pub struct Ancestors<'a> {
    next: Option<&'a EntityClass>,
}

impl<'a> Iterator for Ancestors<'a> {
    type Item = &'a EntityClass;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.parent;
        Some(current)
    }
}
