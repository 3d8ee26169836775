//! Clock runtime integration.
//!
//! Bridges the sync game loop with an async tick source. The game loop says
//! which clock arming should be live ([`ClockDriver::sync`]); the driver keeps
//! exactly one tokio task running for it and aborts the task as soon as the
//! arming changes. Every tick carries the [`ClockToken`] it was spawned for, so
//! a tick that was already queued when the turn changed is recognised as stale
//! by [`TimerService::on_tick`](tui_slidetoe_core::TimerService::on_tick).
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//! use tui_slidetoe_clock::core::TimerService;
//! use tui_slidetoe_clock::types::Player;
//! use tui_slidetoe_clock::ClockDriver;
//!
//! let mut timer = TimerService::new(180);
//! let mut clock = ClockDriver::start().unwrap();
//!
//! timer.start(Player::X);
//! clock.sync(timer.token());
//!
//! std::thread::sleep(Duration::from_millis(1100));
//! while let Some(token) = clock.try_recv() {
//!     timer.on_tick(token);
//! }
//! ```

use std::time::Duration;

use anyhow::{Context, Result};
use tokio::runtime::{Builder, Runtime};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, trace};

pub use tui_slidetoe_core as core;
pub use tui_slidetoe_types as types;

use crate::core::ClockToken;
use crate::types::CLOCK_TICK_MS;

struct Armed {
    token: ClockToken,
    handle: JoinHandle<()>,
}

/// Running tick source.
pub struct ClockDriver {
    rt: Runtime,
    period: Duration,
    tick_tx: mpsc::UnboundedSender<ClockToken>,
    tick_rx: mpsc::UnboundedReceiver<ClockToken>,
    armed: Option<Armed>,
}

impl ClockDriver {
    /// Start a driver ticking once per second.
    pub fn start() -> Result<Self> {
        Self::with_period(Duration::from_millis(CLOCK_TICK_MS))
    }

    pub fn with_period(period: Duration) -> Result<Self> {
        let rt = Builder::new_multi_thread()
            .worker_threads(1)
            .thread_name("slidetoe-clock")
            .enable_time()
            .build()
            .context("failed to create clock runtime")?;
        let (tick_tx, tick_rx) = mpsc::unbounded_channel();

        Ok(Self {
            rt,
            period,
            tick_tx,
            tick_rx,
            armed: None,
        })
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Arming currently served
    pub fn armed(&self) -> Option<ClockToken> {
        self.armed.as_ref().map(|a| a.token)
    }

    /// Make the running task match `wanted`.
    ///
    /// No-op when `wanted` is already being served.
    pub fn sync(&mut self, wanted: Option<ClockToken>) {
        if self.armed() == wanted {
            return;
        }
        match wanted {
            Some(token) => self.arm(token),
            None => self.disarm(),
        }
    }

    /// Cancel any running task and start ticking for `token`.
    pub fn arm(&mut self, token: ClockToken) {
        self.disarm();
        let tx = self.tick_tx.clone();
        let period = self.period;
        let handle = self.rt.spawn(run_clock(token, period, tx));
        debug!(?token, "clock armed");
        self.armed = Some(Armed { token, handle });
    }

    /// Cancel the running task, if any.
    pub fn disarm(&mut self) {
        if let Some(armed) = self.armed.take() {
            armed.handle.abort();
            debug!(token = ?armed.token, "clock disarmed");
        }
    }

    /// Next delivered tick, without blocking.
    pub fn try_recv(&mut self) -> Option<ClockToken> {
        self.tick_rx.try_recv().ok()
    }
}

impl Drop for ClockDriver {
    fn drop(&mut self) {
        self.disarm();
    }
}

async fn run_clock(token: ClockToken, period: Duration, tx: mpsc::UnboundedSender<ClockToken>) {
    // First tick one full period after arming.
    let mut interval = time::interval_at(Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    loop {
        interval.tick().await;
        trace!(?token, "tick");
        if tx.send(token).is_err() {
            break;
        }
    }
}
