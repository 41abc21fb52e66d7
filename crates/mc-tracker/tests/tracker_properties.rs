//! Index invariants and selection behaviour of the tracker.

mod common;

use common::{Recorder, at, ids, mob, player, sorted_ids, track};
use mc_coord::Point;
use mc_entity::testing::TestEntity;
use mc_entity::{
    ENTITY, ENTITY_CREATURE, Entity, EntityClass, EntityRef, EntityType, LIVING_ENTITY, PLAYER,
    Target,
};
use mc_selector::{EntitySelector, Gather, Sort};
use mc_tracker::{Finder, Tracker, TrackerConfig, TrackerError};
use pretty_assertions::assert_eq;

fn gather(class: &'static EntityClass, gather: Gather) -> EntitySelector {
    mc_selector::selector(Target::of(class), |builder| {
        builder.gather(gather);
    })
}

fn chunk_of(point: Point) -> Gather {
    Gather::chunk_at(point)
}

// ============================================================================
// Type index
// ============================================================================

#[test]
fn every_ancestor_finds_the_entity() {
    let tracker = Tracker::default();
    let zombie = mob(1, EntityType::Zombie, at(0.0, 0.0));
    let steve = player(2, "Steve", at(3.0, 3.0));
    track(&tracker, &zombie);
    track(&tracker, &steve);

    for class in [&ENTITY_CREATURE, &LIVING_ENTITY, &ENTITY] {
        let found = ids(tracker.select_entity(&gather(class, Gather::Only(1)), Point::ZERO));
        assert_eq!(found, vec![1], "{class}");
    }
    for class in [&PLAYER, &LIVING_ENTITY, &ENTITY] {
        let found = ids(tracker.select_entity(&gather(class, Gather::Only(2)), Point::ZERO));
        assert_eq!(found, vec![2], "{class}");
    }

    let zombie_as_player = gather(&PLAYER, Gather::Only(1));
    assert!(tracker.select_entity_first(&zombie_as_player).is_none());

    tracker.unregister(&*zombie, None).unwrap();
    for class in [&ENTITY_CREATURE, &LIVING_ENTITY, &ENTITY] {
        assert!(tracker.select_entity_first(&gather(class, Gather::Only(1))).is_none());
    }
    assert!(tracker.select_entity_first(&gather(&PLAYER, Gather::Only(2))).is_some());
}

#[test]
fn full_scan_respects_target_class() {
    let tracker = Tracker::default();
    track(&tracker, &mob(1, EntityType::Cow, at(0.0, 0.0)));
    track(&tracker, &player(2, "Alex", at(0.0, 0.0)));
    track(&tracker, &mob(3, EntityType::Pig, at(500.0, 500.0)));

    let everyone = sorted_ids(tracker.select_entity(mc_selector::all(), Point::ZERO));
    let players = sorted_ids(tracker.select_entity(mc_selector::players(), Point::ZERO));
    assert_eq!(everyone, vec![1, 2, 3]);
    assert_eq!(players, vec![2]);
}

// ============================================================================
// Registration preconditions
// ============================================================================

#[test]
fn duplicate_uuid_is_rejected_without_mutation() {
    let tracker = Tracker::default();
    let original = TestEntity::creature(1, EntityType::Cow, at(0.0, 0.0));
    let uuid = original.uuid();
    track(&tracker, &original.into_ref());

    let clone: EntityRef = TestEntity::creature(2, EntityType::Cow, at(100.0, 100.0))
        .with_uuid(uuid)
        .into_ref();
    let err = tracker.register(clone, at(100.0, 100.0), None).unwrap_err();

    assert_eq!(err, TrackerError::DuplicateUuid(uuid));
    assert_eq!(tracker.len(), 1);
    assert!(!tracker.contains(2));
    assert!(tracker.select_entity_first(&gather(&ENTITY, Gather::Only(2))).is_none());
    assert!(
        tracker
            .select_entity_first(&gather(&ENTITY, chunk_of(at(100.0, 100.0))))
            .is_none()
    );
    let by_uuid = tracker.select_entity_first(&gather(&ENTITY, Gather::OnlyUuid(uuid)));
    assert_eq!(by_uuid.map(|entity| entity.id()), Some(1));
}

#[test]
fn duplicate_id_is_rejected() {
    let tracker = Tracker::default();
    track(&tracker, &mob(1, EntityType::Cow, at(0.0, 0.0)));

    let impostor = TestEntity::creature(1, EntityType::Pig, at(50.0, 0.0))
        .with_uuid(uuid::Uuid::from_u128(0xdead_beef))
        .into_ref();
    assert_eq!(
        tracker.register(impostor, at(50.0, 0.0), None),
        Err(TrackerError::DuplicateId(1))
    );
    assert_eq!(tracker.len(), 1);
    assert_eq!(tracker.last_position(1), Some(at(0.0, 0.0)));
}

// ============================================================================
// Spatial index
// ============================================================================

fn assert_only_in_own_cell(tracker: &Tracker, entity: &EntityRef) {
    let id = entity.id();
    let position = tracker.last_position(id).unwrap();
    let home = ids(tracker.select_entity(&gather(&ENTITY, chunk_of(position)), Point::ZERO));
    assert!(home.contains(&id), "{id} missing from its cell");

    for (dx, dz) in [(16.0, 0.0), (-16.0, 0.0), (0.0, 16.0), (0.0, -16.0)] {
        let neighbour = Point::new(position.x + dx, position.y, position.z + dz);
        let found = ids(tracker.select_entity(&gather(&ENTITY, chunk_of(neighbour)), Point::ZERO));
        assert!(!found.contains(&id), "{id} leaked into a neighbouring cell");
    }
}

#[test]
fn cells_follow_register_move_unregister() {
    let tracker = Tracker::default();
    let a = mob(1, EntityType::Zombie, at(0.0, 0.0));
    let b = mob(2, EntityType::Zombie, at(-20.0, 40.0));
    let c = player(3, "Steve", at(100.0, -3.0));
    for entity in [&a, &b, &c] {
        track(&tracker, entity);
    }

    tracker.move_entity(&*a, at(17.0, 0.0), None);
    tracker.move_entity(&*b, at(-20.5, 41.0), None);
    tracker.move_entity(&*c, at(-100.0, -100.0), None);
    tracker.move_entity(&*a, at(33.0, -1.0), None);

    for entity in [&a, &b, &c] {
        assert_only_in_own_cell(&tracker, entity);
    }

    tracker.unregister(&*b, None).unwrap();
    let old_cell = gather(&ENTITY, chunk_of(at(-20.5, 41.0)));
    assert!(tracker.select_entity_first(&old_cell).is_none());
    for entity in [&a, &c] {
        assert_only_in_own_cell(&tracker, entity);
    }
}

#[test]
fn chunk_gather_filters_by_class() {
    let tracker = Tracker::default();
    track(&tracker, &mob(1, EntityType::Cow, at(1.0, 1.0)));
    track(&tracker, &player(2, "Alex", at(2.0, 2.0)));

    let players_here = gather(&PLAYER, chunk_of(at(0.0, 0.0)));
    assert_eq!(ids(tracker.select_entity(&players_here, Point::ZERO)), vec![2]);
}

#[test]
fn move_within_a_cell_reports_nothing() {
    let tracker = Tracker::new(TrackerConfig {
        view_distance: 2,
        ..TrackerConfig::default()
    });
    let walker = mob(1, EntityType::Zombie, at(1.0, 1.0));
    track(&tracker, &walker);
    track(&tracker, &mob(2, EntityType::Zombie, at(60.0, 0.0)));

    let mut recorder = Recorder::default();
    tracker.move_entity(&*walker, at(15.0, 14.0), Some(&mut recorder));

    assert_eq!(recorder.references, 0);
    assert!(recorder.added.is_empty());
    assert!(recorder.removed.is_empty());
    assert_eq!(tracker.last_position(1), Some(at(15.0, 14.0)));
    assert_only_in_own_cell(&tracker, &walker);
}

#[test]
fn move_across_cells_reports_symmetric_difference() {
    let tracker = Tracker::new(TrackerConfig {
        view_distance: 1,
        ..TrackerConfig::default()
    });
    let viewer = mob(1, EntityType::Zombie, at(8.0, 8.0));
    let behind = mob(2, EntityType::Cow, at(-8.0, 8.0));
    let beside = mob(3, EntityType::Cow, at(4.0, 20.0));
    let ahead = mob(4, EntityType::Cow, at(40.0, 8.0));
    let further = mob(5, EntityType::Cow, at(72.0, -8.0));
    let distant = mob(6, EntityType::Cow, at(104.0, 8.0));
    for entity in [&viewer, &behind, &beside, &ahead, &further, &distant] {
        track(&tracker, entity);
    }

    let mut recorder = Recorder::default();
    tracker.move_entity(&*viewer, at(56.0, 8.0), Some(&mut recorder));

    let (added, removed) = recorder.sorted();
    assert_eq!(added, vec![4, 5]);
    assert_eq!(removed, vec![2, 3]);
    assert_eq!(recorder.references, 1);
}

#[test]
fn register_and_unregister_seed_and_tear_down_view() {
    let tracker = Tracker::new(TrackerConfig {
        view_distance: 1,
        ..TrackerConfig::default()
    });
    track(&tracker, &mob(1, EntityType::Cow, at(0.0, 0.0)));
    track(&tracker, &mob(2, EntityType::Cow, at(20.0, 20.0)));
    track(&tracker, &mob(3, EntityType::Cow, at(200.0, 0.0)));

    let newcomer = player(10, "Steve", at(5.0, 5.0));
    let mut joined = Recorder::default();
    tracker
        .register(newcomer.clone(), at(5.0, 5.0), Some(&mut joined))
        .unwrap();
    assert_eq!(joined.sorted(), (vec![1, 2], vec![]));
    assert_eq!(joined.references, 1);

    let mut left = Recorder::default();
    tracker.unregister(&*newcomer, Some(&mut left)).unwrap();
    assert_eq!(left.sorted(), (vec![], vec![1, 2]));
    assert_eq!(left.references, 1);
}

// ============================================================================
// Selection
// ============================================================================

#[test]
fn nearest_two_of_three_players() {
    let tracker = Tracker::default();
    let origin = at(0.0, 0.0);
    track(&tracker, &player(3, "Far", at(3.0, 0.0)));
    track(&tracker, &player(1, "Near", at(1.0, 0.0)));
    track(&tracker, &player(2, "Middle", at(0.0, 2.0)));

    let selector = mc_selector::player(|builder| {
        builder.sort(Sort::Nearest).limit(2);
    });
    assert_eq!(ids(tracker.select_entity(&selector, origin)), vec![1, 2]);

    let furthest = mc_selector::player(|builder| {
        builder.sort(Sort::Furthest);
    });
    assert_eq!(ids(tracker.select_entity(&furthest, origin)), vec![3, 2, 1]);
}

#[test]
fn repeated_selection_is_deterministic() {
    let tracker = Tracker::default();
    for id in 0..40 {
        let offset = f64::from(id);
        track(&tracker, &mob(id, EntityType::Sheep, at(offset * 3.0, offset * -2.0)));
    }

    for sort in [Sort::Arbitrary, Sort::Nearest, Sort::Furthest] {
        for gather in [None, Some(Gather::ChunkRange(3)), Some(Gather::Range(50.0))] {
            let selector = mc_selector::entity(|builder| {
                builder.sort(sort);
                if let Some(gather) = gather {
                    builder.gather(gather);
                }
            });
            let first = ids(tracker.select_entity(&selector, at(10.0, -10.0)));
            let second = ids(tracker.select_entity(&selector, at(10.0, -10.0)));
            assert_eq!(first, second, "{sort:?} {gather:?}");
        }
    }
}

#[test]
fn random_sort_is_a_permutation() {
    let tracker = Tracker::default();
    for id in 0..10 {
        track(&tracker, &mob(id, EntityType::Chicken, at(f64::from(id), 0.0)));
    }

    let selector = mc_selector::entity(|builder| {
        builder.sort(Sort::Random);
    });
    let mut shuffled = ids(tracker.select_entity(&selector, Point::ZERO));
    shuffled.sort_unstable();
    assert_eq!(shuffled, (0..10).collect::<Vec<_>>());
}

#[test]
fn limit_truncates_to_matching_count() {
    let tracker = Tracker::default();
    for id in 0..3 {
        track(&tracker, &mob(id, EntityType::Zombie, at(f64::from(id), 0.0)));
    }
    track(&tracker, &mob(10, EntityType::Skeleton, at(0.0, 0.0)));

    for limit in 1..=5 {
        let selector = mc_selector::entity(|builder| {
            builder.predicate_equals(mc_selector::properties::TYPE, EntityType::Zombie);
            builder.limit(limit);
        });
        let found = tracker.select_entity(&selector, Point::ZERO).count();
        assert_eq!(found, limit.min(3), "limit {limit}");
    }
}

#[test]
fn range_gather_is_strict() {
    let tracker = Tracker::default();
    track(&tracker, &mob(1, EntityType::Cow, at(3.0, 0.0)));
    track(&tracker, &mob(2, EntityType::Cow, at(5.0, 0.0)));
    track(&tracker, &mob(3, EntityType::Cow, at(0.0, 4.9)));

    let selector = gather(&ENTITY, Gather::Range(5.0));
    assert_eq!(sorted_ids(tracker.select_entity(&selector, at(0.0, 0.0))), vec![1, 3]);
}

#[test]
fn uuid_gather_respects_target_class() {
    let tracker = Tracker::default();
    let cow = TestEntity::creature(1, EntityType::Cow, at(0.0, 0.0));
    let uuid = cow.uuid();
    track(&tracker, &cow.into_ref());

    let as_player = gather(&PLAYER, Gather::OnlyUuid(uuid));
    let as_living = gather(&LIVING_ENTITY, Gather::OnlyUuid(uuid));
    assert!(tracker.select_entity_first(&as_player).is_none());
    assert!(tracker.select_entity_first(&as_living).is_some());
}

#[test]
fn chunk_range_gather_covers_the_square() {
    let tracker = Tracker::new(TrackerConfig {
        parallel_gather_threshold: 1,
        ..TrackerConfig::default()
    });
    track(&tracker, &mob(1, EntityType::Cow, at(0.0, 0.0)));
    track(&tracker, &mob(2, EntityType::Cow, at(47.0, -32.0)));
    track(&tracker, &mob(3, EntityType::Cow, at(48.0, 0.0)));

    let selector = gather(&ENTITY, Gather::ChunkRange(2));
    assert_eq!(sorted_ids(tracker.select_entity(&selector, at(8.0, 8.0))), vec![1, 2]);
}

#[test]
fn consume_may_reenter_the_tracker() {
    let tracker = Tracker::default();
    let a = mob(1, EntityType::Cow, at(0.0, 0.0));
    track(&tracker, &a);
    track(&tracker, &mob(2, EntityType::Cow, at(0.0, 0.0)));

    let mut seen = Vec::new();
    tracker.select_entity_consume(mc_selector::all(), |entity| {
        seen.push((entity.id(), tracker.contains(entity.id())));
        tracker.move_entity(&*entity, at(100.0, 100.0), None);
    });

    seen.sort_unstable();
    assert_eq!(seen, vec![(1, true), (2, true)]);
    assert_eq!(tracker.last_position(1), Some(at(100.0, 100.0)));
}

#[test]
fn empty_tracker_selects_nothing() {
    let tracker = Tracker::default();
    assert!(tracker.is_empty());
    assert!(tracker.select_entity_first(mc_selector::all()).is_none());
    assert!(
        tracker
            .select_entity_first_at(mc_selector::players(), at(5.0, 5.0))
            .is_none()
    );
}
