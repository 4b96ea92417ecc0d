use std::sync::Arc;

use roomgen::{
    CoordinatorError, DungeonSeed, GridCoord, LocalSession, MemoryScene, MeshSlotData, Phase,
    RoomConfiguration, SeedBus, SeedChannel, SeedCoordinator, generate_room,
};

fn shared_room() -> Arc<RoomConfiguration> {
    Arc::new(
        RoomConfiguration::grid_builder(400.0, 5, 5)
            .default_floor(["floor_a", "floor_b", "floor_c", "floor_d"])
            .cell(GridCoord::new(2, 0), MeshSlotData::wall(["door_a", "door_b"], None))
            .build()
            .expect("valid config"),
    )
}

#[test]
fn every_peer_rebuilds_the_same_plan() {
    let mut session = LocalSession::new(Some(shared_room()), 3);
    session.start_generation(DungeonSeed(2024)).expect("authority");
    assert_eq!(session.pump(), 3);

    let fingerprints = session.fingerprints();
    assert_eq!(fingerprints.len(), 4);
    assert!(fingerprints.windows(2).all(|pair| pair[0] == pair[1]));

    let expected = generate_room(DungeonSeed(2024), Some(&shared_room()));
    assert_eq!(session.authority().last_plan(), &expected);
    for index in 0..session.observer_count() {
        let observer = session.observer(index).expect("observer");
        assert_eq!(observer.last_plan(), &expected);
        assert_eq!(observer.anchor().attached_plan(), expected);
        assert_eq!(observer.phase(), Phase::Generated(DungeonSeed(2024)));
    }
}

#[test]
fn each_new_seed_regenerates_every_peer_once() {
    let mut session = LocalSession::new(Some(shared_room()), 2);
    for (round, seed) in [10, 20, 30].into_iter().enumerate() {
        session.start_generation(DungeonSeed(seed)).expect("authority");
        assert_eq!(session.pump(), 2);
        assert!(session.in_sync());

        let expected_generations = round as u64 + 1;
        assert_eq!(session.authority().generations(), expected_generations);
        for index in 0..2 {
            let observer = session.observer(index).expect("observer");
            assert_eq!(observer.generations(), expected_generations);
            assert_eq!(observer.anchor().len(), observer.last_plan().len());
        }
    }
}

#[test]
fn last_seed_wins_when_seeds_arrive_faster_than_delivery() {
    let mut session = LocalSession::new(Some(shared_room()), 2);
    session.start_generation(DungeonSeed(1)).expect("authority");
    session.start_generation(DungeonSeed(2)).expect("authority");
    session.start_generation(DungeonSeed(3)).expect("authority");

    assert_eq!(session.pump(), 2, "only the latest seed is delivered");
    assert!(session.in_sync());
    for index in 0..2 {
        let observer = session.observer(index).expect("observer");
        assert_eq!(observer.dungeon_seed(), Some(DungeonSeed(3)));
        assert_eq!(observer.generations(), 1);
    }
}

#[test]
fn observer_entry_point_is_rejected_and_changes_nothing() {
    let mut bus = SeedBus::default();
    bus.publish(DungeonSeed(5));
    let mut observer = SeedCoordinator::observer(Some(shared_room()), MemoryScene::default());
    observer.on_seed_received(DungeonSeed(5));
    let before = observer.last_plan().clone();

    let result = observer.start_generation(DungeonSeed(99), &mut bus);
    assert_eq!(result.err(), Some(CoordinatorError::NotAuthority));
    assert_eq!(bus.latest(), Some(DungeonSeed(5)));
    assert_eq!(observer.dungeon_seed(), Some(DungeonSeed(5)));
    assert_eq!(observer.last_plan(), &before);
    assert_eq!(observer.generations(), 1);
}

#[test]
fn peers_without_config_stay_empty_but_in_sync() {
    let mut session = LocalSession::new(None, 2);
    session.start_generation(DungeonSeed(8)).expect("authority");
    session.pump();
    assert!(session.in_sync());
    assert!(session.authority().last_plan().is_empty());
}

#[test]
fn republishing_the_current_seed_regenerates_only_the_authority() {
    let mut session = LocalSession::new(Some(shared_room()), 2);
    session.start_generation(DungeonSeed(77)).expect("authority");
    assert_eq!(session.pump(), 2);

    session.start_generation(DungeonSeed(77)).expect("authority");
    assert_eq!(session.pump(), 0, "unchanged seed is not redelivered");

    assert_eq!(session.authority().generations(), 2);
    for index in 0..2 {
        assert_eq!(session.observer(index).expect("observer").generations(), 1);
    }
    assert!(session.in_sync());
}
