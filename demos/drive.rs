use driftsim::{
    scheduler::FixedStepScheduler,
    sim::{InputVector, Session},
};
use std::time::Instant;

/// Ten seconds of scripted driving: build speed, hold a long right-hand
/// drift, flick left to chain the combo, then straighten out to bank.
fn controls_for(tick: u64) -> InputVector {
    match tick {
        0..120 => InputVector {
            up: true,
            ..InputVector::DEFAULT
        },
        120..300 => InputVector {
            up: true,
            right: true,
            ..InputVector::DEFAULT
        },
        300..420 => InputVector {
            up: true,
            left: true,
            ..InputVector::DEFAULT
        },
        _ => InputVector {
            up: true,
            ..InputVector::DEFAULT
        },
    }
}

fn main() {
    driftsim::logging::init();

    let mut session = Session::default();
    let mut scheduler = FixedStepScheduler::default();

    let start = Instant::now();
    while session.tick_count() < 600 {
        if !scheduler.poll(Instant::now()) {
            continue;
        }

        session.set_controls(controls_for(session.tick_count()));
        session.step();

        if session.tick_count() % 60 == 0 {
            let s = session.snapshot();
            println!(
                "t={:>3} speed={:>5.2} drift={:>7.2} combo={} current={:>8.1} total={:>8.1}",
                s.tick_count,
                s.vehicle.speed,
                s.vehicle.drift_angle,
                s.score.combo,
                s.score.current_score,
                s.score.total_score,
            );
        }
    }
    println!(
        "Simulated {} ticks in {:.2}s of wall time",
        session.tick_count(),
        Instant::now().duration_since(start).as_secs_f32()
    );

    session.enter_replay();
    session.replay_set_speed(2.0);
    for _ in 0..120 {
        session.step();
        if let Some(status) = session.poll_replay_status() {
            println!(
                "replay frame {}/{} speed {}x",
                status.frame, status.total, status.speed
            );
        }
    }
    session.exit_replay();

    session.reset();
    if let Some(best) = session.best_ghost() {
        println!(
            "ghost stored: {} frames, banked score {}",
            best.len(),
            best.total_score
        );
    }
}
