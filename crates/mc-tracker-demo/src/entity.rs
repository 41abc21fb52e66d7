//! Entities owned by the demo world.

use std::any::Any;
use std::sync::Arc;

use mc_coord::Point;
use mc_entity::{ENTITY_CREATURE, Entity, EntityClass, EntityType, GameMode, PLAYER};
use parking_lot::RwLock;
use rand::Rng;
use uuid::Uuid;

const MOBS: [EntityType; 6] = [
    EntityType::Zombie,
    EntityType::Skeleton,
    EntityType::Creeper,
    EntityType::Cow,
    EntityType::Pig,
    EntityType::Sheep,
];

struct PlayerState {
    username: String,
    game_mode: GameMode,
    level: i32,
}

pub struct DemoEntity {
    id: i32,
    uuid: Uuid,
    kind: EntityType,
    position: RwLock<Point>,
    player: Option<PlayerState>,
}

impl DemoEntity {
    /// A random mob somewhere within `spread` blocks of the origin.
    pub fn mob(id: i32, spread: f64, rng: &mut impl Rng) -> Self {
        let kind = MOBS[rng.gen_range(0..MOBS.len())];
        Self {
            id,
            uuid: Uuid::new_v4(),
            kind,
            position: RwLock::new(random_point(spread, rng)),
            player: None,
        }
    }

    pub fn player(id: i32, spread: f64, rng: &mut impl Rng) -> Self {
        let game_mode = GameMode::ALL[rng.gen_range(0..GameMode::ALL.len())];
        Self {
            id,
            uuid: Uuid::new_v4(),
            kind: EntityType::Player,
            position: RwLock::new(random_point(spread, rng)),
            player: Some(PlayerState {
                username: format!("player{id}"),
                game_mode,
                level: rng.gen_range(0..30),
            }),
        }
    }

    pub const fn is_player(&self) -> bool {
        self.player.is_some()
    }

    /// Take a random step of up to `stride` blocks and return the new position.
    pub fn wander(&self, stride: f64, rng: &mut impl Rng) -> Point {
        let mut position = self.position.write();
        position.x += rng.gen_range(-stride..=stride);
        position.z += rng.gen_range(-stride..=stride);
        *position
    }
}

fn random_point(spread: f64, rng: &mut impl Rng) -> Point {
    Point::new(
        rng.gen_range(-spread..=spread),
        64.0,
        rng.gen_range(-spread..=spread),
    )
}

impl Entity for DemoEntity {
    fn id(&self) -> i32 {
        self.id
    }

    fn uuid(&self) -> Uuid {
        self.uuid
    }

    fn class(&self) -> &'static EntityClass {
        if self.is_player() { &PLAYER } else { &ENTITY_CREATURE }
    }

    fn entity_type(&self) -> EntityType {
        self.kind
    }

    fn position(&self) -> Point {
        *self.position.read()
    }

    fn username(&self) -> Option<&str> {
        self.player.as_ref().map(|player| player.username.as_str())
    }

    fn game_mode(&self) -> Option<GameMode> {
        self.player.as_ref().map(|player| player.game_mode)
    }

    fn level(&self) -> Option<i32> {
        self.player.as_ref().map(|player| player.level)
    }

    fn experience(&self) -> Option<f32> {
        self.player.as_ref().map(|_| 0.0)
    }

    fn into_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync> {
        self
    }
}
