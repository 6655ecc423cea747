//! Whole trees driven tick by tick, the way game logic uses them.

use bvtree::builder::*;
use bvtree::{ArgRef, Driver, DriverConfig, ManualClock, Status};
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[derive(Default)]
struct Caster {
    attempts_left: u32,
    succeeded: bool,
    retries: u32,
    /// Cells of requests still waiting for a reply.
    outstanding: Vec<ArgRef>,
    swings: u32,
}

#[test]
fn spell_cast_retries_after_timeout() {
    init_tracing();
    let clock = ManualClock::new();

    let send_request = lambda_stage(|caster: &mut Caster, reply: &ArgRef| {
        caster.attempts_left -= 1;
        caster.outstanding.push(reply.clone());
    });
    let attempt = if_branch(
        op_timeout_with_clock(clock.shared(), 100, send_request),
        lambda(|caster: &mut Caster| {
            caster.succeeded = true;
            Status::Success
        }),
        lambda(|caster: &mut Caster| {
            caster.retries += 1;
            Status::Success
        }),
    );
    let tree = always_success(loop_while(
        lambda_bool(|caster: &mut Caster| !caster.succeeded && caster.attempts_left > 0),
        attempt,
    ));

    let mut driver = Driver::new(tree).label("cast");
    let mut caster = Caster {
        attempts_left: 3,
        ..Default::default()
    };

    // First attempt goes out and waits for a reply.
    assert_eq!(driver.tick(&mut caster), Ok(Status::Pending));
    assert_eq!(caster.outstanding.len(), 1);

    // No reply in time: the attempt fails and the next one is sent at once.
    clock.advance(150);
    assert_eq!(driver.tick(&mut caster), Ok(Status::Pending));
    assert_eq!(caster.retries, 1);
    assert_eq!(caster.attempts_left, 1);

    // The reply to the second attempt arrives.
    let reply = caster.outstanding.pop().expect("second request is outstanding");
    reply.assign(Status::Success);
    clock.advance(10);
    assert_eq!(driver.tick(&mut caster), Ok(Status::Success));
    assert!(caster.succeeded);
    assert_eq!(caster.retries, 1);
    assert!(!driver.is_running());
}

#[test]
fn spell_cast_gives_up_when_attempts_run_out() {
    init_tracing();
    let clock = ManualClock::new();

    let attempt = catch_abort(abort_failure(op_timeout_with_clock(
        clock.shared(),
        20,
        lambda_stage(|caster: &mut Caster, _reply: &ArgRef| caster.attempts_left -= 1),
    )));
    let tree = loop_while(
        lambda_bool(|caster: &mut Caster| caster.attempts_left > 0),
        attempt,
    );

    let mut driver = Driver::new(tree);
    let mut caster = Caster {
        attempts_left: 2,
        ..Default::default()
    };

    assert_eq!(driver.tick(&mut caster), Ok(Status::Pending));
    clock.advance(21);
    assert_eq!(driver.tick(&mut caster), Ok(Status::Pending));
    clock.advance(21);
    // Loop condition fails once attempts are spent.
    assert_eq!(driver.tick(&mut caster), Ok(Status::Failure));
    assert_eq!(caster.attempts_left, 0);
}

#[test]
fn combo_swings_are_paced_by_slowdown() {
    init_tracing();
    let clock = ManualClock::new();
    let swings = ArgRef::with_value(3_i64);

    let swing = op_slowdown_with_clock(
        clock.shared(),
        50,
        lambda(|caster: &mut Caster| {
            caster.swings += 1;
            Status::Success
        }),
    );
    let tree = loop_repeat_arg(swings, swing);

    let mut driver = Driver::with_config(tree, DriverConfig::until_settled(4));
    let mut caster = Caster::default();

    for expected_swings in 1..=3 {
        assert_eq!(driver.tick(&mut caster), Ok(Status::Pending));
        assert_eq!(caster.swings, expected_swings);
        clock.advance(50);
    }
    assert_eq!(driver.tick(&mut caster), Ok(Status::Success));
    assert_eq!(caster.swings, 3);
}

#[test]
fn recovery_waits_then_heals() {
    init_tracing();
    let clock = ManualClock::new();

    let tree = if_check(
        op_wait_with_clock(clock.shared(), 500),
        lambda(|caster: &mut Caster| {
            caster.attempts_left = 3;
            Status::Success
        }),
    );
    let mut driver = Driver::new(tree);
    let mut caster = Caster::default();

    assert_eq!(driver.tick(&mut caster), Ok(Status::Pending));
    clock.advance(500);
    assert_eq!(driver.tick(&mut caster), Ok(Status::Pending));
    clock.advance(1);
    assert_eq!(driver.tick(&mut caster), Ok(Status::Success));
    assert_eq!(caster.attempts_left, 3);
}
