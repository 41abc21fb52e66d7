//! In-memory entities for tests and benchmarks.

use std::any::Any;
use std::sync::Arc;

use mc_coord::Point;
use parking_lot::RwLock;
use uuid::Uuid;

use crate::{ENTITY_CREATURE, Entity, EntityClass, EntityRef, EntityType, GameMode, PLAYER};

/// A plain entity whose state lives in memory.
///
/// The UUID is derived from the id unless overridden with
/// [`with_uuid`](Self::with_uuid).
pub struct TestEntity {
    id: i32,
    uuid: Uuid,
    class: &'static EntityClass,
    kind: EntityType,
    position: RwLock<Point>,
    username: Option<String>,
    game_mode: Option<GameMode>,
    level: Option<i32>,
    experience: Option<f32>,
}

impl TestEntity {
    #[must_use]
    pub fn new(id: i32, class: &'static EntityClass, kind: EntityType, position: Point) -> Self {
        Self {
            id,
            uuid: Uuid::from_u128(0x7e57_0000_0000_0000_0000_0000_0000_0000 | u128::from(id as u32)),
            class,
            kind,
            position: RwLock::new(position),
            username: None,
            game_mode: None,
            level: None,
            experience: None,
        }
    }

    /// A creature of the given vanilla type.
    #[must_use]
    pub fn creature(id: i32, kind: EntityType, position: Point) -> Self {
        Self::new(id, &ENTITY_CREATURE, kind, position)
    }

    /// A survival-mode player at level 0.
    #[must_use]
    pub fn player(id: i32, username: &str, position: Point) -> Self {
        Self {
            username: Some(username.to_string()),
            game_mode: Some(GameMode::Survival),
            level: Some(0),
            experience: Some(0.0),
            ..Self::new(id, &PLAYER, EntityType::Player, position)
        }
    }

    #[must_use]
    pub fn with_uuid(mut self, uuid: Uuid) -> Self {
        self.uuid = uuid;
        self
    }

    #[must_use]
    pub fn with_class(mut self, class: &'static EntityClass) -> Self {
        self.class = class;
        self
    }

    #[must_use]
    pub fn with_game_mode(mut self, game_mode: GameMode) -> Self {
        self.game_mode = Some(game_mode);
        self
    }

    #[must_use]
    pub fn with_level(mut self, level: i32) -> Self {
        self.level = Some(level);
        self
    }

    pub fn set_position(&self, position: Point) {
        *self.position.write() = position;
    }

    #[must_use]
    pub fn into_ref(self) -> EntityRef {
        Arc::new(self)
    }
}

impl Entity for TestEntity {
    fn id(&self) -> i32 {
        self.id
    }

    fn uuid(&self) -> Uuid {
        self.uuid
    }

    fn class(&self) -> &'static EntityClass {
        self.class
    }

    fn entity_type(&self) -> EntityType {
        self.kind
    }

    fn position(&self) -> Point {
        *self.position.read()
    }

    fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    fn game_mode(&self) -> Option<GameMode> {
        self.game_mode
    }

    fn level(&self) -> Option<i32> {
        self.level
    }

    fn experience(&self) -> Option<f32> {
        self.experience
    }

    fn into_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync> {
        self
    }
}
