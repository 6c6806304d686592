//! crates/session_report_core/src/inactivity.rs
//!
//! The inactivity-expiry state machine: sustained user inactivity walks the
//! session from `Active` through a grace period to a forced logout. The
//! transitions are plain functions; the async driver below runs them on a
//! single timer task.

use std::future::Future;
use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::time::{sleep_until, Instant};
use tokio_util::sync::CancellationToken;

/// Inactivity before the grace period starts.
pub const INACTIVITY_WINDOW: Duration = Duration::from_secs(5 * 60);

/// Further inactivity before logout is enforced.
pub const GRACE_WINDOW: Duration = Duration::from_secs(5 * 60);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityState {
    Active,
    GracePeriod,
    LoggedOut,
}

impl ActivityState {
    /// A qualifying activity event returns the machine to `Active` from any
    /// state.
    pub fn reset(self) -> ActivityState {
        ActivityState::Active
    }

    /// The timer expiring advances the machine one step; `LoggedOut` is
    /// terminal.
    pub fn on_timeout(self) -> ActivityState {
        match self {
            ActivityState::Active => ActivityState::GracePeriod,
            ActivityState::GracePeriod | ActivityState::LoggedOut => ActivityState::LoggedOut,
        }
    }

    /// How long the machine may sit in this state before the next timeout,
    /// or `None` once it is terminal.
    pub fn window(self) -> Option<Duration> {
        match self {
            ActivityState::Active => Some(INACTIVITY_WINDOW),
            ActivityState::GracePeriod => Some(GRACE_WINDOW),
            ActivityState::LoggedOut => None,
        }
    }
}

/// The user-activity events that qualify as a reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityEvent {
    PointerMove,
    PointerDown,
    KeyDown,
    Scroll,
    TouchStart,
}

/// Drives the state machine on its own timer task.
///
/// One deadline models both timers: each reset recomputes it, so cancelling
/// pending timeouts on activity is total, not partial. The logout callback
/// fires exactly once, on entry to `LoggedOut`, after which the task exits.
pub struct InactivityMonitor {
    events: mpsc::Sender<ActivityEvent>,
    state: watch::Receiver<ActivityState>,
    cancel: CancellationToken,
}

impl InactivityMonitor {
    /// Spawns the timer task. `logout` is the best-effort logout request;
    /// its failure is the caller's concern.
    pub fn spawn<F, Fut>(logout: F) -> Self
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send,
    {
        let (event_tx, mut event_rx) = mpsc::channel::<ActivityEvent>(32);
        let (state_tx, state_rx) = watch::channel(ActivityState::Active);
        let cancel = CancellationToken::new();
        let token = cancel.clone();

        tokio::spawn(async move {
            let mut logout = Some(logout);
            let mut state = ActivityState::Active;
            let mut deadline = Instant::now() + INACTIVITY_WINDOW;

            loop {
                tokio::select! {
                    _ = token.cancelled() => return,
                    event = event_rx.recv() => match event {
                        Some(_) => {
                            state = state.reset();
                            deadline = Instant::now() + INACTIVITY_WINDOW;
                            let _ = state_tx.send(state);
                        }
                        // All handles dropped; nothing left to observe.
                        None => return,
                    },
                    _ = sleep_until(deadline) => {
                        state = state.on_timeout();
                        let _ = state_tx.send(state);
                        match state.window() {
                            Some(window) => deadline = Instant::now() + window,
                            None => {
                                if let Some(logout) = logout.take() {
                                    logout().await;
                                }
                                return;
                            }
                        }
                    }
                }
            }
        });

        Self {
            events: event_tx,
            state: state_rx,
            cancel,
        }
    }

    /// Records a qualifying activity event. Dropped silently once the task
    /// has exited.
    pub fn record_activity(&self, event: ActivityEvent) {
        let _ = self.events.try_send(event);
    }

    pub fn state(&self) -> ActivityState {
        *self.state.borrow()
    }

    /// The page-close exit path: stops the task without walking the state
    /// machine. Any logout notification on this path is the caller's
    /// fire-and-forget concern.
    pub fn shutdown(&self) {
        self.cancel.cancel();
    }
}
