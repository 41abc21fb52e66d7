//! Mutable selector builder.

use std::fmt;
use std::sync::Arc;

use hashbrown::HashSet;
use mc_coord::Point;
use mc_entity::{Entity, EntityCast, EntityType, Target};

use crate::{EntitySelector, Gather, Predicate, Property, Sort, properties};

/// Error raised while building a selector.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectorError {
    #[error("cannot reinterpret {current} selector as {requested}: not a subtype")]
    NotASubtype {
        current: &'static str,
        requested: &'static str,
    },
}

/// Accumulates selector configuration.
///
/// [`build`](Self::build) snapshots the current state, so a builder can keep
/// being modified without affecting selectors it already produced.
pub struct Builder<T: ?Sized> {
    target: Target<T>,
    gather: Option<Gather>,
    sort: Sort,
    limit: usize,
    predicates: Vec<Predicate>,
}

impl<T: ?Sized + EntityCast> Builder<T> {
    #[must_use]
    pub fn new(target: Target<T>) -> Self {
        Self {
            target,
            gather: None,
            sort: Sort::Arbitrary,
            limit: 0,
            predicates: Vec::new(),
        }
    }

    /// Replace the target class.
    pub fn target(&mut self, target: Target<T>) -> &mut Self {
        self.target = target;
        self
    }

    /// Require `test` to hold for the value of `property`.
    ///
    /// Predicates are ANDed and evaluated in registration order, so register
    /// cheap ones first.
    pub fn predicate<V: 'static>(
        &mut self,
        property: Property<V>,
        test: impl Fn(Point, V) -> bool + Send + Sync + 'static,
    ) -> &mut Self {
        self.predicates
            .push(Arc::new(move |origin: Point, entity: &dyn Entity| {
                test(origin, property.get(entity))
            }));
        self
    }

    /// Require `property` to equal `value`.
    pub fn predicate_equals<V>(&mut self, property: Property<V>, value: V) -> &mut Self
    where
        V: PartialEq + Send + Sync + 'static,
    {
        self.predicate(property, move |_, actual| actual == value)
    }

    /// Set the gather strategy, replacing any previous one.
    pub fn gather(&mut self, gather: Gather) -> &mut Self {
        self.gather = Some(gather);
        self
    }

    /// Only admit entities of the given vanilla types.
    pub fn types(&mut self, types: &[EntityType]) -> &mut Self {
        let allowed: HashSet<EntityType> = types.iter().copied().collect();
        self.predicate(properties::TYPE, move |_, kind| allowed.contains(&kind))
    }

    /// Cap the number of results.
    ///
    /// # Panics
    ///
    /// Panics if `limit` is 0.
    pub fn limit(&mut self, limit: usize) -> &mut Self {
        assert!(limit > 0, "limit must be greater than 0");
        self.limit = limit;
        self
    }

    pub fn sort(&mut self, sort: Sort) -> &mut Self {
        self.sort = sort;
        self
    }

    /// Narrow the declared result type to a subclass of the current target.
    ///
    /// Only the declared type changes; predicates, gather, sort and limit carry
    /// over untouched.
    pub fn reinterpret<G: ?Sized + EntityCast>(
        self,
        target: Target<G>,
    ) -> Result<Builder<G>, SelectorError> {
        let current = self.target.class();
        let requested = target.class();
        if !current.is_assignable_from(requested) {
            return Err(SelectorError::NotASubtype {
                current: current.name(),
                requested: requested.name(),
            });
        }

        Ok(Builder {
            target,
            gather: self.gather,
            sort: self.sort,
            limit: self.limit,
            predicates: self.predicates,
        })
    }

    /// Snapshot the builder into an immutable selector.
    #[must_use]
    pub fn build(&self) -> EntitySelector<T> {
        EntitySelector {
            target: self.target,
            gather: self.gather,
            sort: self.sort,
            limit: self.limit,
            predicates: self.predicates.iter().cloned().collect(),
        }
    }
}

impl<T: ?Sized> fmt::Debug for Builder<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Builder")
            .field("target", &self.target)
            .field("gather", &self.gather)
            .field("sort", &self.sort)
            .field("limit", &self.limit)
            .field("predicates", &self.predicates.len())
            .finish()
    }
}

/// Build a selector for `target` by running `configure` over a fresh builder.
pub fn selector<T: ?Sized + EntityCast>(
    target: Target<T>,
    configure: impl FnOnce(&mut Builder<T>),
) -> EntitySelector<T> {
    let mut builder = Builder::new(target);
    configure(&mut builder);
    builder.build()
}

/// [`selector`] over every entity.
pub fn entity(configure: impl FnOnce(&mut Builder<dyn Entity>)) -> EntitySelector {
    selector(Target::entity(), configure)
}

/// [`selector`] over living entities.
pub fn living(configure: impl FnOnce(&mut Builder<dyn Entity>)) -> EntitySelector {
    selector(Target::living(), configure)
}

/// [`selector`] over players.
pub fn player(configure: impl FnOnce(&mut Builder<dyn Entity>)) -> EntitySelector {
    selector(Target::player(), configure)
}
