//! Controller driven by the real tick source with a short period.

use std::time::{Duration, Instant};

use tui_slidetoe::clock::ClockDriver;
use tui_slidetoe::core::GamePhase;
use tui_slidetoe::engine::{EventLog, TurnController};
use tui_slidetoe::types::{GameAction, Player};

/// Run the same drain/sync cycle as the binary until `done` or timeout.
fn pump(
    clock: &mut ClockDriver,
    game: &mut TurnController,
    log: &mut EventLog,
    limit: Duration,
    done: impl Fn(&TurnController) -> bool,
) -> bool {
    let deadline = Instant::now() + limit;
    while Instant::now() < deadline {
        while let Some(token) = clock.try_recv() {
            game.on_tick(token, log);
        }
        clock.sync(game.armed());
        if done(game) {
            return true;
        }
        std::thread::sleep(Duration::from_millis(5));
    }
    false
}

#[test]
fn running_clock_expires_in_real_time() {
    let mut clock = ClockDriver::with_period(Duration::from_millis(20)).unwrap();
    let mut game = TurnController::new(3);
    let mut log = EventLog::new();

    game.handle(GameAction::StartGame, &mut log);
    let finished = pump(&mut clock, &mut game, &mut log, Duration::from_secs(3), |g| {
        g.phase().is_over()
    });

    assert!(finished, "clock never ran out");
    assert_eq!(game.phase(), GamePhase::TimedOut(Player::X));
    assert_eq!(game.timer().remaining(Player::O), 3);
    assert_eq!(log.last_popup(), Some("X ran out of time! Opponent wins!"));
    assert_eq!(clock.armed(), None);
}

#[test]
fn only_the_player_to_move_loses_time() {
    let mut clock = ClockDriver::with_period(Duration::from_millis(20)).unwrap();
    let mut game = TurnController::new(1000);
    let mut log = EventLog::new();

    game.handle(GameAction::StartGame, &mut log);
    pump(&mut clock, &mut game, &mut log, Duration::from_millis(120), |_| false);
    let x_after_turn = {
        game.handle(GameAction::CellClicked(4), &mut log);
        game.timer().remaining(Player::X)
    };
    assert!(x_after_turn < 1000);

    pump(&mut clock, &mut game, &mut log, Duration::from_millis(150), |_| false);
    assert_eq!(game.timer().remaining(Player::X), x_after_turn);
    assert!(game.timer().remaining(Player::O) < 1000);
    assert_eq!(clock.armed().map(|t| t.player), Some(Player::O));
}

#[test]
fn reset_disarms_the_tick_source() {
    let mut clock = ClockDriver::with_period(Duration::from_millis(20)).unwrap();
    let mut game = TurnController::new(1000);
    let mut log = EventLog::new();

    game.handle(GameAction::StartGame, &mut log);
    pump(&mut clock, &mut game, &mut log, Duration::from_millis(60), |_| false);
    game.handle(GameAction::ResetGame, &mut log);
    pump(&mut clock, &mut game, &mut log, Duration::from_millis(100), |_| false);

    assert_eq!(clock.armed(), None);
    assert_eq!(game.timer().remaining(Player::X), 1000);
    assert_eq!(game.phase(), GamePhase::NotStarted);
}
