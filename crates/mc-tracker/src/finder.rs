//! Selection shortcuts.

use std::sync::Arc;

use mc_coord::Point;
use mc_entity::EntityCast;
use mc_selector::EntitySelector;

use crate::{Selection, Tracker};

/// Anything that can evaluate selectors.
///
/// The `_at` variants take an explicit origin. The others use
/// [`Point::ZERO`], which is fine for selectors whose result does not depend
/// on distance, such as id and UUID lookups.
pub trait Finder {
    fn select_entity<T: ?Sized + EntityCast>(
        &self,
        selector: &EntitySelector<T>,
        origin: Point,
    ) -> Selection<T>;

    fn select_entity_first_at<T: ?Sized + EntityCast>(
        &self,
        selector: &EntitySelector<T>,
        origin: Point,
    ) -> Option<Arc<T>> {
        self.select_entity(selector, origin).next()
    }

    fn select_entity_first<T: ?Sized + EntityCast>(
        &self,
        selector: &EntitySelector<T>,
    ) -> Option<Arc<T>> {
        self.select_entity_first_at(selector, Point::ZERO)
    }

    /// Run `consumer` over every match. The tracker is not locked while
    /// `consumer` runs.
    fn select_entity_consume_at<T: ?Sized + EntityCast>(
        &self,
        selector: &EntitySelector<T>,
        origin: Point,
        consumer: impl FnMut(Arc<T>),
    ) {
        self.select_entity(selector, origin).for_each(consumer);
    }

    fn select_entity_consume<T: ?Sized + EntityCast>(
        &self,
        selector: &EntitySelector<T>,
        consumer: impl FnMut(Arc<T>),
    ) {
        self.select_entity_consume_at(selector, Point::ZERO, consumer);
    }
}

impl Finder for Tracker {
    fn select_entity<T: ?Sized + EntityCast>(
        &self,
        selector: &EntitySelector<T>,
        origin: Point,
    ) -> Selection<T> {
        Self::select_entity(self, selector, origin)
    }
}
