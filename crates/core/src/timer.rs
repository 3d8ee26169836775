//! Per-player countdown clocks
//!
//! At most one clock runs at a time. Each arming hands out a [`ClockToken`];
//! a tick only counts if it carries the token of the current arming. Stopping,
//! switching or resetting invalidates every earlier token, so a tick that was
//! already in flight for the outgoing player is dropped instead of charged to
//! the wrong clock.

use crate::types::Player;

/// Identifies one arming of one player's clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClockToken {
    pub player: Player,
    pub generation: u64,
}

/// What the clock is doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockState {
    Stopped,
    Running(ClockToken),
    /// Terminal until [`TimerService::reset`]
    Expired(Player),
}

/// Result of delivering one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Stale token, or no clock running
    Ignored,
    Decremented { player: Player, remaining: u32 },
    /// `player` reached zero and lost on time
    Expired(Player),
}

#[derive(Debug, Clone)]
pub struct TimerService {
    initial_secs: u32,
    remaining: [u32; 2],
    state: ClockState,
    generation: u64,
}

impl TimerService {
    pub fn new(initial_secs: u32) -> Self {
        Self {
            initial_secs,
            remaining: [initial_secs; 2],
            state: ClockState::Stopped,
            generation: 0,
        }
    }

    pub fn initial_secs(&self) -> u32 {
        self.initial_secs
    }

    pub fn remaining(&self, player: Player) -> u32 {
        self.remaining[player.index()]
    }

    pub fn state(&self) -> ClockState {
        self.state
    }

    /// Player whose clock is currently counting down
    pub fn running(&self) -> Option<Player> {
        match self.state {
            ClockState::Running(token) => Some(token.player),
            _ => None,
        }
    }

    /// Token of the current arming
    pub fn token(&self) -> Option<ClockToken> {
        match self.state {
            ClockState::Running(token) => Some(token),
            _ => None,
        }
    }

    pub fn expired(&self) -> Option<Player> {
        match self.state {
            ClockState::Expired(player) => Some(player),
            _ => None,
        }
    }

    /// Stop whatever runs and start `player`'s clock.
    ///
    /// Returns `None` once a clock has expired.
    pub fn start(&mut self, player: Player) -> Option<ClockToken> {
        if matches!(self.state, ClockState::Expired(_)) {
            return None;
        }
        self.generation = self.generation.wrapping_add(1);
        let token = ClockToken {
            player,
            generation: self.generation,
        };
        self.state = ClockState::Running(token);
        Some(token)
    }

    /// Halt the running clock. No-op if nothing runs.
    pub fn stop(&mut self) {
        if let ClockState::Running(_) = self.state {
            self.generation = self.generation.wrapping_add(1);
            self.state = ClockState::Stopped;
        }
    }

    /// Stop the outgoing clock and start `player`'s as one step.
    pub fn switch_to(&mut self, player: Player) -> Option<ClockToken> {
        self.stop();
        self.start(player)
    }

    /// Charge one second to the clock `token` was issued for.
    pub fn on_tick(&mut self, token: ClockToken) -> TickOutcome {
        if self.state != ClockState::Running(token) {
            return TickOutcome::Ignored;
        }
        let slot = &mut self.remaining[token.player.index()];
        *slot = slot.saturating_sub(1);
        if *slot == 0 {
            self.generation = self.generation.wrapping_add(1);
            self.state = ClockState::Expired(token.player);
            return TickOutcome::Expired(token.player);
        }
        TickOutcome::Decremented {
            player: token.player,
            remaining: *slot,
        }
    }

    /// Both clocks back to the initial value, nothing running
    pub fn reset(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        self.remaining = [self.initial_secs; 2];
        self.state = ClockState::Stopped;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DEFAULT_CLOCK_SECS;

    #[test]
    fn test_new_timer_is_stopped() {
        let timer = TimerService::new(DEFAULT_CLOCK_SECS);
        assert_eq!(timer.state(), ClockState::Stopped);
        assert_eq!(timer.remaining(Player::X), 180);
        assert_eq!(timer.remaining(Player::O), 180);
        assert_eq!(timer.running(), None);
    }

    #[test]
    fn test_tick_decrements_running_player_only() {
        let mut timer = TimerService::new(10);
        let token = timer.start(Player::X).unwrap();
        assert_eq!(
            timer.on_tick(token),
            TickOutcome::Decremented {
                player: Player::X,
                remaining: 9
            }
        );
        assert_eq!(timer.remaining(Player::O), 10);
    }

    #[test]
    fn test_stale_token_is_ignored_after_switch() {
        let mut timer = TimerService::new(10);
        let old = timer.start(Player::X).unwrap();
        let new = timer.switch_to(Player::O).unwrap();
        assert_eq!(timer.on_tick(old), TickOutcome::Ignored);
        assert_eq!(timer.remaining(Player::X), 10);
        assert!(matches!(timer.on_tick(new), TickOutcome::Decremented { .. }));
        assert_eq!(timer.remaining(Player::O), 9);
    }

    #[test]
    fn test_rearming_same_player_invalidates_old_token() {
        let mut timer = TimerService::new(10);
        let first = timer.start(Player::X).unwrap();
        let second = timer.start(Player::X).unwrap();
        assert_ne!(first, second);
        assert_eq!(timer.on_tick(first), TickOutcome::Ignored);
    }

    #[test]
    fn test_stop_is_noop_when_stopped() {
        let mut timer = TimerService::new(10);
        timer.stop();
        assert_eq!(timer.state(), ClockState::Stopped);
        let token = timer.start(Player::O).unwrap();
        timer.stop();
        timer.stop();
        assert_eq!(timer.on_tick(token), TickOutcome::Ignored);
    }

    #[test]
    fn test_expires_after_exactly_initial_ticks() {
        let mut timer = TimerService::new(DEFAULT_CLOCK_SECS);
        let token = timer.start(Player::O).unwrap();
        for _ in 0..DEFAULT_CLOCK_SECS - 1 {
            assert!(matches!(timer.on_tick(token), TickOutcome::Decremented { .. }));
        }
        assert_eq!(timer.on_tick(token), TickOutcome::Expired(Player::O));
        assert_eq!(timer.remaining(Player::O), 0);
        assert_eq!(timer.expired(), Some(Player::O));
        assert_eq!(timer.on_tick(token), TickOutcome::Ignored);
        assert_eq!(timer.start(Player::X), None);
    }

    #[test]
    fn test_reset_restores_clocks() {
        let mut timer = TimerService::new(5);
        let token = timer.start(Player::X).unwrap();
        timer.on_tick(token);
        timer.reset();
        assert_eq!(timer.remaining(Player::X), 5);
        assert_eq!(timer.state(), ClockState::Stopped);
        assert_eq!(timer.on_tick(token), TickOutcome::Ignored);
    }
}
