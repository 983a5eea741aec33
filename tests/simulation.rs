use driftsim::{
    consts::HISTORY_CAPACITY,
    sim::{InputVector, Session, SessionConfig, SessionMode, VehicleState},
};

const THROTTLE_RIGHT: InputVector = InputVector {
    up: true,
    right: true,
    ..InputVector::DEFAULT
};

const THROTTLE: InputVector = InputVector {
    up: true,
    ..InputVector::DEFAULT
};

fn drive(session: &mut Session, input: InputVector, ticks: u32) {
    session.set_controls(input);
    for _ in 0..ticks {
        session.step();
    }
}

#[test]
fn sustained_corner_starts_a_scoring_drift() {
    let mut session = Session::default();
    drive(&mut session, THROTTLE_RIGHT, 120);

    let score = session.score();
    assert!(score.is_drifting, "no drift after 2s of full-lock throttle");
    assert!(score.current_score > 0.0);
    assert!(score.combo >= 1);
    assert!(session.vehicle().drift_angle.abs() >= 15.0);
}

#[test]
fn replay_buffer_is_bounded_and_evicts_from_the_front() {
    let mut session = Session::default();
    session.set_controls(THROTTLE);

    session.step();
    session.step();
    let second_tick_state = *session.vehicle();

    for _ in 2..(HISTORY_CAPACITY + 1) {
        session.step();
    }
    assert_eq!(session.replay_len(), HISTORY_CAPACITY);

    // After capacity + 1 ticks the head of the buffer is the second tick
    session.enter_replay();
    session.replay_toggle_pause();
    session.replay_seek(0.0);
    session.step();
    assert_eq!(*session.vehicle(), second_tick_state);
}

#[test]
fn exiting_replay_resumes_from_the_last_recorded_frame() {
    let mut session = Session::default();
    drive(&mut session, THROTTLE, 200);
    let last_live = *session.vehicle();

    session.enter_replay();
    assert_eq!(session.mode(), SessionMode::Replay);
    for _ in 0..50 {
        session.step();
    }
    assert_ne!(*session.vehicle(), last_live);

    session.exit_replay();
    assert_eq!(session.mode(), SessionMode::Live);
    assert_eq!(*session.vehicle(), last_live);
}

#[test]
fn replay_status_is_throttled_to_every_sixth_tick() {
    let mut session = Session::default();
    drive(&mut session, THROTTLE, 60);

    session.enter_replay();
    let mut updates = 0;
    for _ in 0..12 {
        session.step();
        if session.poll_replay_status().is_some() {
            updates += 1;
        }
    }
    assert_eq!(updates, 2);
}

#[test]
fn replay_mode_bypasses_physics_and_scoring() {
    let mut session = Session::default();
    drive(&mut session, THROTTLE_RIGHT, 120);
    let banked_state = *session.score();
    let recorded = session.replay_len();

    session.enter_replay();
    drive(&mut session, THROTTLE_RIGHT, 60);

    // Controls are ignored, nothing records and the score is untouched
    assert_eq!(session.replay_len(), recorded);
    assert_eq!(*session.score(), banked_state);
}

#[test]
fn reset_respawns_and_clears_history() {
    let config = SessionConfig::DEFAULT;
    let mut session = Session::new(config);
    drive(&mut session, THROTTLE_RIGHT, 300);
    assert!(session.replay_len() > 0);

    session.reset();

    assert_eq!(session.replay_len(), 0);
    assert_eq!(session.run_tick(), 0);
    assert_eq!(session.score().total_score, 0.0);
    assert_eq!(session.vehicle().pos, config.spawn);
    assert_eq!(session.vehicle().speed, 0.0);
}

#[test]
fn best_run_survives_as_the_ghost() {
    let mut session = Session::default();

    // First run: straight line, banks nothing
    drive(&mut session, THROTTLE, 120);
    session.reset();
    let baseline = session.best_ghost().expect("first run stores a ghost");
    assert_eq!(baseline.total_score, 0.0);

    // Second run: long drift, straighten out past the grace period to bank
    drive(&mut session, THROTTLE_RIGHT, 240);
    drive(&mut session, THROTTLE, 200);
    assert!(session.score().total_score > 0.0);
    session.reset();

    let best_score = session.best_ghost().expect("ghost retained").total_score;
    assert!(best_score > 0.0);

    // Third run: worse (empty) score must not displace it
    drive(&mut session, THROTTLE, 60);
    session.reset();
    assert_eq!(session.best_ghost().unwrap().total_score, best_score);
}

#[test]
fn ghost_pose_is_indexed_by_run_tick() {
    let mut session = Session::default();
    drive(&mut session, THROTTLE, 100);
    session.reset();

    // Fresh run at tick 0: the stored run has a frame for every early tick
    assert!(session.ghost_frame().is_some());
    drive(&mut session, THROTTLE, 99);
    assert!(session.ghost_frame().is_some());

    // Past the stored run's length the overlay simply ends
    drive(&mut session, THROTTLE, 1);
    assert!(session.ghost_frame().is_none());
}

#[test]
fn audio_frame_mirrors_the_live_tick() {
    let mut session = Session::default();
    drive(&mut session, THROTTLE, 30);

    let audio = session.audio_frame();
    assert!(audio.is_accelerating);
    assert!(audio.speed > 0.0);
    assert_eq!(audio.speed, session.vehicle().speed);
}

#[test]
fn snapshot_is_a_value_copy_of_the_tick() {
    let mut session = Session::default();
    drive(&mut session, THROTTLE_RIGHT, 90);

    let snapshot = session.snapshot();
    assert_eq!(snapshot.vehicle, *session.vehicle());
    assert_eq!(snapshot.tick_count, session.tick_count());
    assert_eq!(snapshot.run_tick, session.run_tick());
    assert_eq!(snapshot.mode, SessionMode::Live);

    // Advancing the session leaves the snapshot untouched
    session.step();
    assert_ne!(snapshot.vehicle, *session.vehicle());
}

#[test]
fn default_session_uses_the_viewport_as_world_bounds() {
    let session = Session::default();
    let bounds = session.world_bounds();
    assert_eq!(bounds.x, driftsim::consts::viewport::WORLD_WIDTH);
    assert_eq!(bounds.y, driftsim::consts::viewport::WORLD_HEIGHT);
}

#[test]
fn stopping_mid_drift_banks_nothing() {
    let mut session = Session::default();
    drive(&mut session, THROTTLE_RIGHT, 120);
    assert!(session.score().is_drifting);

    // Braking to a stop drops |speed| below the scoring floor
    let stop = InputVector {
        down: true,
        ..InputVector::DEFAULT
    };
    drive(&mut session, stop, 120);

    assert!(!session.score().is_drifting);
    assert_eq!(session.score().total_score, 0.0);
    assert_eq!(session.score().current_score, 0.0);
}

#[test]
fn default_state_round_trips_through_replay_entry() {
    // Entering replay with an empty buffer must not panic or move the car
    let mut session = Session::default();
    let spawn = *session.vehicle();

    session.enter_replay();
    session.step();
    assert_eq!(*session.vehicle(), spawn);

    session.exit_replay();
    assert_eq!(*session.vehicle(), spawn);
}

#[test]
fn spawned_vehicle_matches_config_scale() {
    let mut config = SessionConfig::DEFAULT;
    config.physics.car_scale = 2.0;
    let session = Session::new(config);

    let expected = VehicleState::spawned_at(config.spawn, &config.physics);
    assert_eq!(session.vehicle().size, expected.size);
}
