//! Built-in properties.
//!
//! Player-only properties read `None` for entities that are not players.

use mc_coord::Point;
use mc_entity::{Entity, EntityType, GameMode};
use uuid::Uuid;

use crate::Property;

pub const ID: Property<i32> = Property::new("id", id);
pub const UUID: Property<Uuid> = Property::new("uuid", uuid);
pub const NAME: Property<Option<String>> = Property::new("name", name);
pub const POS: Property<Point> = Property::new("coord", pos);
pub const TYPE: Property<EntityType> = Property::new("entity_type", entity_type);
pub const GAME_MODE: Property<Option<GameMode>> = Property::new("game_mode", game_mode);
pub const LEVEL: Property<Option<i32>> = Property::new("level", level);
pub const EXPERIENCE: Property<Option<f32>> = Property::new("experience", experience);

fn id(entity: &dyn Entity) -> i32 {
    entity.id()
}

fn uuid(entity: &dyn Entity) -> Uuid {
    entity.uuid()
}

fn name(entity: &dyn Entity) -> Option<String> {
    entity.username().map(str::to_owned)
}

fn pos(entity: &dyn Entity) -> Point {
    entity.position()
}

fn entity_type(entity: &dyn Entity) -> EntityType {
    entity.entity_type()
}

fn game_mode(entity: &dyn Entity) -> Option<GameMode> {
    entity.game_mode()
}

fn level(entity: &dyn Entity) -> Option<i32> {
    entity.level()
}

fn experience(entity: &dyn Entity) -> Option<f32> {
    entity.experience()
}
