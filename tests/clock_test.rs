use std::{thread::sleep, time::Duration};

use tank_scene::clock::Clock;

#[test]
fn deltas_add_up_to_the_elapsed_time() {
    let mut clock = Clock::new();
    let mut total = Duration::ZERO;

    for _ in 0..3 {
        sleep(Duration::from_millis(5));
        total += clock.delta();
    }

    assert!(total >= Duration::from_millis(15));
    assert!(total <= clock.elapsed());
}

#[test]
fn delta_measures_from_the_previous_sample() {
    let mut clock = Clock::new();
    sleep(Duration::from_millis(20));
    let first = clock.delta();

    let second = clock.delta();

    assert!(first >= Duration::from_millis(20));
    assert!(second < first);
}

#[test]
fn reset_restarts_the_clock() {
    let mut clock = Clock::new();
    sleep(Duration::from_millis(20));

    clock.reset();

    assert!(clock.elapsed() < Duration::from_millis(20));
    assert!(clock.delta() < Duration::from_millis(20));
}
