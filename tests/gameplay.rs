use eth_snake::game::{
    Direction, EndReason, Food, FoodKind, GameConfig, GameEngine, GameEvent, ManualClock,
    Position, RecordingObserver, SecurityStatus, TickOutcome,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;

type Engine = GameEngine<RecordingObserver, ManualClock>;

/// A started run with no random food, on a hand-driven clock
fn scripted_run() -> (Engine, ManualClock) {
    let clock = ManualClock::new();
    let config = GameConfig {
        initial_food: 0,
        max_food: 0,
        ..GameConfig::default()
    };
    let mut engine = GameEngine::with_clock(config, RecordingObserver::new(), clock.clone());
    engine.start();
    engine.observer_mut().take();
    (engine, clock)
}

fn place(engine: &mut Engine, x: i32, y: i32, kind: FoodKind, verified: bool) {
    let mut food = Food::new(Position::new(x, y), kind, kind.label());
    food.verified = verified;
    engine.state_mut().unwrap().foods.push(food);
}

#[test]
fn start_reports_initial_hud() {
    let mut engine =
        GameEngine::with_clock(GameConfig::default(), RecordingObserver::new(), ManualClock::new())
            .with_seed(21);
    engine.start();

    assert_eq!(
        engine.observer().events,
        vec![
            GameEvent::Score(0),
            GameEvent::Time(90),
            GameEvent::Security {
                status: SecurityStatus::Stable,
                danger_count: 0
            },
            GameEvent::LastL2("—".to_string()),
        ]
    );
}

#[test]
fn fraud_eaten_without_adjacency_is_fatal() {
    let (mut engine, _) = scripted_run();
    // Spawned right in front of the head: no tick ever ends next to it
    place(&mut engine, 11, 10, FoodKind::Fraud, false);

    assert_eq!(
        engine.tick_movement(),
        TickOutcome::Ended(EndReason::UnverifiedFraud)
    );
    let outcome = engine.outcome().unwrap();
    assert_eq!(
        outcome.reason.to_string(),
        "A fraud-proof L2 was eaten before verification."
    );
    assert_eq!(outcome.final_score, 0);
}

#[test]
fn passing_next_to_fraud_verifies_it() {
    let (mut engine, _) = scripted_run();
    place(&mut engine, 11, 11, FoodKind::Fraud, false);

    // Head moves to (11, 10), directly above the item
    engine.tick_movement();
    assert!(engine.state().unwrap().foods[0].verified);

    engine.set_direction(Direction::Down);
    assert_eq!(engine.tick_movement(), TickOutcome::Advanced);

    let state = engine.state().unwrap();
    assert_eq!(state.score, 10);
    assert!(state.foods.is_empty());
    assert!(!state.is_ended());
}

#[test]
fn three_powered_items_in_window_collapse() {
    let (mut engine, clock) = scripted_run();
    place(&mut engine, 11, 10, FoodKind::Fraud, true);
    place(&mut engine, 12, 10, FoodKind::Jam, false);
    place(&mut engine, 13, 10, FoodKind::Drain, false);

    engine.tick_movement();
    clock.advance(5_000);
    engine.tick_movement();
    clock.advance(5_000);

    assert_eq!(
        engine.tick_movement(),
        TickOutcome::Ended(EndReason::SecurityCollapse)
    );
    assert_eq!(engine.outcome().unwrap().final_score, 24);
}

#[test]
fn powered_items_spread_over_window_survive() {
    let (mut engine, clock) = scripted_run();
    place(&mut engine, 11, 10, FoodKind::Fraud, true);
    place(&mut engine, 12, 10, FoodKind::Jam, false);
    place(&mut engine, 13, 10, FoodKind::Drain, false);

    engine.tick_movement();
    engine.tick_movement();
    assert_eq!(engine.state().unwrap().danger_count(), 2);
    assert!(engine.observer().events.contains(&GameEvent::Security {
        status: SecurityStatus::Shaky,
        danger_count: 2
    }));

    clock.advance(15_001);
    assert_eq!(engine.tick_movement(), TickOutcome::Advanced);
    assert_eq!(engine.state().unwrap().danger_count(), 1);
    assert_eq!(engine.state().unwrap().score, 24);
}

#[test]
fn reaching_target_wins_and_freezes() {
    let (mut engine, _) = scripted_run();
    engine.state_mut().unwrap().score = 95;
    place(&mut engine, 11, 10, FoodKind::Shield, false);

    assert_eq!(
        engine.tick_movement(),
        TickOutcome::Ended(EndReason::TargetReached)
    );
    assert_eq!(
        engine.observer().events.last(),
        Some(&GameEvent::Win { final_score: 103 })
    );

    let frozen = engine.state().unwrap().clone();
    for _ in 0..5 {
        assert_eq!(engine.tick_movement(), TickOutcome::Idle);
        assert_eq!(engine.tick_clock(), TickOutcome::Idle);
    }
    assert_eq!(engine.state().unwrap(), &frozen);
}

#[test]
fn countdown_expires_after_ninety_seconds() {
    let (mut engine, clock) = scripted_run();

    let mut last = TickOutcome::Idle;
    for _ in 0..90 {
        clock.advance(1_000);
        last = engine.tick_clock();
    }

    assert_eq!(last, TickOutcome::Ended(EndReason::TimeUp));
    assert_eq!(engine.state().unwrap().time_remaining, 0);
    assert_eq!(
        engine.observer().events.last(),
        Some(&GameEvent::GameOver {
            reason: EndReason::TimeUp,
            final_score: 0
        })
    );
}

#[test]
fn reversal_is_rejected() {
    let (mut engine, _) = scripted_run();
    assert_eq!(engine.state().unwrap().snake.direction, Direction::Right);

    engine.set_direction(Direction::Left);
    assert_eq!(engine.state().unwrap().pending_direction, Direction::Right);
}

#[test]
fn jam_negates_input_until_it_expires() {
    let (mut engine, clock) = scripted_run();
    place(&mut engine, 11, 10, FoodKind::Jam, false);
    engine.tick_movement();

    clock.advance(2_999);
    engine.set_direction(Direction::Left);
    assert_eq!(engine.state().unwrap().pending_direction, Direction::Right);

    clock.advance(1);
    engine.set_direction(Direction::Down);
    assert_eq!(engine.state().unwrap().pending_direction, Direction::Down);
}

#[test]
fn shield_freezes_snake_for_two_seconds() {
    let (mut engine, clock) = scripted_run();
    place(&mut engine, 11, 10, FoodKind::Shield, false);
    engine.tick_movement();

    for _ in 0..10 {
        clock.advance(140);
        assert_eq!(engine.tick_movement(), TickOutcome::Idle);
    }
    assert_eq!(engine.state().unwrap().snake.head(), Position::new(11, 10));

    clock.advance(700);
    assert_eq!(engine.tick_movement(), TickOutcome::Advanced);
    assert_eq!(engine.state().unwrap().snake.head(), Position::new(12, 10));
}

#[test]
fn random_play_keeps_invariants() {
    for seed in 0..20u64 {
        let clock = ManualClock::new();
        let mut engine =
            GameEngine::with_clock(GameConfig::default(), RecordingObserver::new(), clock.clone())
                .with_seed(seed);
        engine.start();
        let mut inputs = StdRng::seed_from_u64(seed ^ 0xA5A5);
        let mut last_score = 0;

        for tick in 0..3_000u32 {
            if inputs.gen_bool(0.3) {
                let direction = match inputs.gen_range(0..4) {
                    0 => Direction::Up,
                    1 => Direction::Down,
                    2 => Direction::Left,
                    _ => Direction::Right,
                };
                engine.set_direction(direction);
            }

            clock.advance(140);
            engine.tick_movement();
            if tick % 7 == 6 {
                engine.tick_clock();
            }

            let state = engine.state().unwrap();
            assert!(state.snake.len() >= 2, "seed {seed}: snake shrank below 2");
            assert!(state.score >= last_score, "seed {seed}: score decreased");
            assert!(state.foods.len() <= 5);
            last_score = state.score;

            if state.is_ended() {
                break;
            }

            let cells: HashSet<_> = state.snake.body.iter().collect();
            assert_eq!(cells.len(), state.snake.len(), "seed {seed}: overlapping segments");
            for food in &state.foods {
                assert!(!state.snake.occupies(food.position));
            }
        }

        assert!(engine.outcome().is_some(), "seed {seed}: run never ended");
    }
}
