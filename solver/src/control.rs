use std::sync::{Condvar, Mutex, MutexGuard};
use std::time::Duration;

use log::debug;
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControllerConfig {
    /// Pause applied at every checkpoint while running freely
    pub delay: Duration,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            delay: Duration::from_millis(50),
        }
    }
}

/// What the search should do after a checkpoint
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Checkpoint {
    Continue,
    Cancelled,
}

#[derive(Debug, Default)]
struct ControlState {
    paused: bool,
    step_requested: bool,
    cancelled: bool,
}

/// Cooperative pause, step and cancel for a running search.
///
/// The worker running the search calls [`StepController::checkpoint`] after
/// every node expansion; any other thread may drive it through
/// [`pause`](StepController::pause), [`resume`](StepController::resume),
/// [`step`](StepController::step) and [`cancel`](StepController::cancel).
/// Share it between the two with an `Arc`.
#[derive(Debug)]
pub struct StepController {
    state: Mutex<ControlState>,
    signal: Condvar,
    delay: Duration,
}

impl Default for StepController {
    fn default() -> Self {
        Self::new(ControllerConfig::default())
    }
}

impl StepController {
    pub fn new(config: ControllerConfig) -> Self {
        Self {
            state: Mutex::new(ControlState::default()),
            signal: Condvar::new(),
            delay: config.delay,
        }
    }

    /// A controller that never throttles
    pub fn unthrottled() -> Self {
        Self::new(ControllerConfig {
            delay: Duration::ZERO,
        })
    }

    fn lock(&self) -> MutexGuard<'_, ControlState> {
        // the state is plain flags, a panicked holder cannot leave it torn
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn update(&self, f: impl FnOnce(&mut ControlState)) {
        f(&mut self.lock());
        self.signal.notify_all();
    }

    pub fn pause(&self) {
        debug!("pause requested");
        self.update(|s| s.paused = true);
    }

    pub fn resume(&self) {
        debug!("resume requested");
        self.update(|s| {
            s.paused = false;
            s.step_requested = false;
        });
    }

    /// Let a paused search advance exactly one checkpoint. Returns false,
    /// and does nothing, when the controller is not paused.
    pub fn step(&self) -> bool {
        let mut state = self.lock();
        if !state.paused {
            return false;
        }
        state.step_requested = true;
        drop(state);
        self.signal.notify_all();
        true
    }

    pub fn cancel(&self) {
        debug!("cancel requested");
        self.update(|s| s.cancelled = true);
    }

    pub fn is_paused(&self) -> bool {
        self.lock().paused
    }

    pub fn is_cancelled(&self) -> bool {
        self.lock().cancelled
    }

    /// Called by the search after every expansion.
    ///
    /// Blocks while paused until a step or resume arrives. While running
    /// freely the configured delay is applied; cancelling wakes both waits
    /// immediately.
    pub fn checkpoint(&self) -> Checkpoint {
        let mut state = self.lock();

        loop {
            if state.cancelled {
                return Checkpoint::Cancelled;
            }
            if !state.paused {
                break;
            }
            if state.step_requested {
                state.step_requested = false;
                return Checkpoint::Continue;
            }
            state = match self.signal.wait(state) {
                Ok(state) => state,
                Err(_) => return Checkpoint::Cancelled,
            };
        }

        if self.delay.is_zero() {
            return Checkpoint::Continue;
        }

        match self
            .signal
            .wait_timeout_while(state, self.delay, |s| !s.cancelled)
        {
            Ok((state, _)) if !state.cancelled => Checkpoint::Continue,
            _ => Checkpoint::Cancelled,
        }
    }
}
