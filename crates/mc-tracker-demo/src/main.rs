//! Entity tracker demo
//!
//! This binary:
//! 1. Spawns a population of mobs and players into a tracker
//! 2. Wanders them around for a number of ticks, keeping each player's
//!    visible set current through the tracker's update callbacks
//! 3. Evaluates every command line argument as a target selector from the
//!    first player's point of view
//!
//! Environment:
//! - `DEMO_ENTITY_COUNT` - entities to spawn (default 2000)
//! - `DEMO_TICKS` - ticks to simulate (default 100)
//! - `DEMO_SPREAD` - half-width of the spawn square in blocks (default 256)
//! - `MC_ENTITY_VIEW_DISTANCE`, `MC_PARALLEL_GATHER_THRESHOLD` - tracker config

mod entity;
mod visibility;

use std::sync::Arc;
use std::time::Instant;

use entity::DemoEntity;
use mc_entity::{Entity, EntityRef};
use mc_selector_parser::EntityArgument;
use mc_tracker::{Tracker, TrackerConfig, Update, env_or};
use tracing::{debug, info, warn};
use visibility::Visibility;

const DEFAULT_SELECTORS: [&str; 5] = [
    "@e[type=zombie,distance=..32]",
    "@n",
    "@a[gamemode=!spectator,sort=furthest,limit=3]",
    "@e[type=!player,type=!cow,limit=10,sort=nearest]",
    "@s",
];

/// Walking pace in blocks per tick.
const STRIDE: f64 = 4.0;

fn main() -> eyre::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("mc_tracker_demo=info".parse()?)
                .add_directive("mc_tracker=warn".parse()?),
        )
        .init();

    let count: i32 = env_or("DEMO_ENTITY_COUNT", 2000);
    let ticks: u32 = env_or("DEMO_TICKS", 100);
    let spread: f64 = env_or("DEMO_SPREAD", 256.0);

    let tracker = Tracker::new(TrackerConfig::from_env());
    info!(?tracker, count, ticks, spread, "starting tracker demo");

    let mut rng = rand::thread_rng();
    let entities: Vec<Arc<DemoEntity>> = (0..count)
        .map(|id| {
            let entity = if id % 10 == 0 {
                DemoEntity::player(id, spread, &mut rng)
            } else {
                DemoEntity::mob(id, spread, &mut rng)
            };
            Arc::new(entity)
        })
        .collect();

    let mut viewers = Vec::new();
    for entity in &entities {
        let handle: EntityRef = entity.clone();
        if entity.is_player() {
            let mut visibility = Visibility::new(entity.id());
            tracker.register(handle, entity.position(), Some(&mut visibility))?;
            viewers.push(visibility);
        } else {
            tracker.register(handle, entity.position(), None)?;
        }
    }
    info!(tracked = tracker.len(), players = viewers.len(), "spawned");

    let start = Instant::now();
    for tick in 0..ticks {
        let mut viewers = viewers.iter_mut();
        for entity in &entities {
            let point = entity.wander(STRIDE, &mut rng);
            let update = if entity.is_player() {
                viewers.next().map(|visibility| visibility as &mut dyn Update)
            } else {
                None
            };
            tracker.move_entity(&**entity, point, update);
        }
        debug!(tick, "tick complete");
    }
    let elapsed = start.elapsed();

    let spawned: u64 = viewers.iter().map(|v| v.spawned).sum();
    let despawned: u64 = viewers.iter().map(|v| v.despawned).sum();
    info!(?elapsed, spawned, despawned, "simulation finished");
    if let Some(first) = viewers.first() {
        info!(
            viewer = first.viewer,
            visible = first.visible.len(),
            reference = ?first.reference,
            "first player's view"
        );
    }

    let sender = entities.iter().find(|entity| entity.is_player());
    run_selectors(&tracker, sender.map(|entity| &**entity as &dyn Entity));

    for entity in &entities {
        tracker.unregister(&**entity, None)?;
    }
    info!(tracked = tracker.len(), "despawned everything");

    Ok(())
}

/// Evaluate each selector given on the command line, or a few samples.
fn run_selectors(tracker: &Tracker, sender: Option<&dyn Entity>) {
    let argument = EntityArgument::entity("targets");
    let origin = sender.map(Entity::position).unwrap_or_default();

    let mut inputs: Vec<String> = std::env::args().skip(1).collect();
    if inputs.is_empty() {
        inputs = DEFAULT_SELECTORS.iter().map(ToString::to_string).collect();
    }

    for input in &inputs {
        match argument.parse(sender, input) {
            Ok(selector) => {
                let found: Vec<i32> = tracker
                    .select_entity(&selector, origin)
                    .map(|entity| entity.id())
                    .collect();
                info!(selector = %input, matches = found.len(), ids = ?found, "selected");
            }
            Err(err) => warn!(selector = %input, code = err.code.code(), "{err}"),
        }
    }
}
