//! Elapsed-time tick source.
//!
//! The [`Timer`] does not count anything itself. While running it sends a
//! [`Tick`] on a channel once per interval; the session runner checks the
//! tick with [`Timer::accepts`] and forwards it to the session, so every
//! increment happens on the session's own event loop.

use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::trace;

/// One interval elapsed on the timer generation `epoch`.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Tick {
    pub epoch: u64,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum TimerState {
    Stopped,
    Running,
}

/// Owned periodic tick source.
///
/// The background task is aborted on [`stop`](Timer::stop) and on drop, so
/// no tick source outlives its owner.
pub struct Timer {
    period: Duration,
    epoch: u64,
    task: Option<JoinHandle<()>>,
    sink: UnboundedSender<Tick>,
}

impl Timer {
    pub fn new(period: Duration, sink: UnboundedSender<Tick>) -> Self {
        Self {
            period,
            epoch: 0,
            task: None,
            sink,
        }
    }

    /// Start ticking from zero.
    ///
    /// A running timer is stopped first, and the epoch is bumped so ticks
    /// already queued by the previous run are rejected by
    /// [`accepts`](Timer::accepts). Must be called within a tokio runtime.
    pub fn start(&mut self) {
        self.stop();
        self.epoch += 1;

        let epoch = self.epoch;
        let period = self.period;
        let sink = self.sink.clone();
        self.task = Some(tokio::spawn(async move {
            let mut interval = interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                trace!(epoch, "timer tick");
                if sink.send(Tick { epoch }).is_err() {
                    break;
                }
            }
        }));
    }

    /// Stop ticking. Idempotent.
    pub fn stop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }

    pub fn state(&self) -> TimerState {
        if self.task.is_some() {
            TimerState::Running
        } else {
            TimerState::Stopped
        }
    }

    pub fn is_running(&self) -> bool {
        self.state() == TimerState::Running
    }

    /// True iff the tick belongs to the current run.
    pub fn accepts(&self, tick: Tick) -> bool {
        self.is_running() && tick.epoch == self.epoch
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Render seconds as `MM:SS`. Minutes are not wrapped at an hour.
pub fn format_elapsed(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}
