//! Inactivity observer: a restartable idle countdown.
//!
//! # Responsibility
//! - Fire one terminal callback after `timeout` without user activity.
//! - Restart the countdown on every qualifying activity signal.
//!
//! # Invariants
//! - The callback runs at most once per observer; after it fires the
//!   observer is finished and further signals are ignored.
//! - Stopping or dropping the observer cancels the countdown without firing.

use log::{debug, trace};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{sleep_until, Instant};

/// Idle period after which the session is terminated.
pub const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_secs(30);

/// User interaction that counts as activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActivitySignal {
    PointerMove,
    PointerDown,
    KeyPress,
    Scroll,
}

impl ActivitySignal {
    pub const ALL: [Self; 4] = [
        Self::PointerMove,
        Self::PointerDown,
        Self::KeyPress,
        Self::Scroll,
    ];

    /// Maps a DOM event name to a signal; other events do not reset the timer.
    pub fn from_dom_event(name: &str) -> Option<Self> {
        match name {
            "mousemove" | "pointermove" => Some(Self::PointerMove),
            "mousedown" | "pointerdown" => Some(Self::PointerDown),
            "keypress" | "keydown" => Some(Self::KeyPress),
            "scroll" | "wheel" => Some(Self::Scroll),
            _ => None,
        }
    }
}

/// Running idle countdown. Must be started inside a tokio runtime.
#[derive(Debug)]
pub struct InactivityObserver {
    signals: mpsc::UnboundedSender<ActivitySignal>,
    task: JoinHandle<()>,
    timeout: Duration,
}

impl InactivityObserver {
    /// Starts the countdown immediately.
    pub fn start<F>(timeout: Duration, on_timeout: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        let (signals, receiver) = mpsc::unbounded_channel();
        let task = tokio::spawn(run_countdown(timeout, receiver, on_timeout));
        debug!(
            "event=idle_observer_start module=session status=ok timeout_ms={}",
            timeout.as_millis()
        );
        Self {
            signals,
            task,
            timeout,
        }
    }

    /// Restarts the countdown.
    ///
    /// Returns `false` when the observer already fired or was stopped.
    pub fn notify(&self, signal: ActivitySignal) -> bool {
        self.signals.send(signal).is_ok()
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Returns whether the countdown is over (fired or cancelled).
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Cancels the countdown without firing.
    pub fn stop(self) {
        debug!("event=idle_observer_stop module=session status=ok");
        drop(self);
    }
}

impl Drop for InactivityObserver {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn run_countdown<F>(
    timeout: Duration,
    mut signals: mpsc::UnboundedReceiver<ActivitySignal>,
    on_timeout: F,
) where
    F: FnOnce(),
{
    let mut deadline = Instant::now() + timeout;
    loop {
        tokio::select! {
            signal = signals.recv() => match signal {
                Some(signal) => {
                    trace!("event=idle_reset module=session signal={signal:?}");
                    deadline = Instant::now() + timeout;
                }
                None => return,
            },
            _ = sleep_until(deadline) => {
                debug!("event=idle_timeout module=session status=fired");
                on_timeout();
                return;
            }
        }
    }
}
