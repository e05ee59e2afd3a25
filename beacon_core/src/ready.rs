//! A one-shot readiness gate and the background timer that guarantees it fires.
//!
//! The gate lets integrators defer destination-specific setup (e.g., waiting for a user session)
//! until just before the first real analytics event, while the timer guarantees forward progress
//! if no event ever fires.

use std::{
    io,
    sync::{mpsc::RecvTimeoutError, Arc, Mutex},
    time::Duration,
};

use crate::{Error, Result};

/// Callback registered with [`ReadinessGate::register`].
pub type ReadyCallback = Box<dyn FnOnce() + Send>;

enum GateState {
    /// Callback slot is armed. Holds the pending callback, if one has been registered.
    Armed(Option<ReadyCallback>),
    /// The gate fired. All further triggers and registrations are no-ops.
    Fired,
}

/// A single-slot, fire-once callback gate.
///
/// The pending callback executes at most once in total: either just before the first dispatched
/// operation, or when the fallback [`ReadyTimer`] expires, whichever comes first. After it runs,
/// the slot is cleared and further dispatches do not re-invoke it.
///
/// Registering while a callback is already pending replaces it — last write wins, there is no
/// queue. This is intentional, not a race: the slot holds the single "ready" hook of the
/// application, not a subscription list.
pub struct ReadinessGate {
    state: Mutex<GateState>,
}

impl ReadinessGate {
    /// Create a new gate in the armed state with an empty callback slot.
    pub fn new() -> ReadinessGate {
        ReadinessGate {
            state: Mutex::new(GateState::Armed(None)),
        }
    }

    /// Set or replace the pending callback. No-op once the gate has fired.
    pub fn register(&self, callback: impl FnOnce() + Send + 'static) {
        let mut state = self
            .state
            .lock()
            .expect("thread holding ready state lock should not panic");

        if let GateState::Armed(slot) = &mut *state {
            *slot = Some(Box::new(callback));
        }
    }

    /// Fire the pending callback if the gate is still armed, then transition to fired.
    ///
    /// Triggering an armed gate with an empty slot transitions it to fired with no other
    /// effect. Triggering a fired gate is a no-op. The callback runs after the internal lock is
    /// released, so it may itself dispatch or re-register without deadlocking (a re-registration
    /// lands on an already-fired gate and is dropped).
    pub fn trigger(&self) {
        let callback = {
            let mut state = self
                .state
                .lock()
                .expect("thread holding ready state lock should not panic");

            match std::mem::replace(&mut *state, GateState::Fired) {
                GateState::Armed(slot) => slot,
                GateState::Fired => None,
            }
        };

        if let Some(callback) = callback {
            log::debug!(target: "beacon", "firing ready callback");
            callback();
        }
    }

    /// Whether the gate has fired.
    pub fn has_fired(&self) -> bool {
        let state = self
            .state
            .lock()
            .expect("thread holding ready state lock should not panic");

        matches!(*state, GateState::Fired)
    }
}

impl Default for ReadinessGate {
    fn default() -> ReadinessGate {
        ReadinessGate::new()
    }
}

/// A background timer that triggers a [`ReadinessGate`] after a fixed delay.
///
/// The timer races the first real dispatch call; whichever triggers the gate first wins, and the
/// loser's trigger is a no-op. Both run through the gate's mutex, so the race is benign.
pub struct ReadyTimer {
    join_handle: std::thread::JoinHandle<()>,

    /// Used to cancel the timer before it fires.
    stop_sender: std::sync::mpsc::SyncSender<()>,
}

impl ReadyTimer {
    /// Default fallback delay before the gate is triggered unconditionally.
    pub const DEFAULT_DELAY: Duration = Duration::from_secs(5);

    /// Start the fallback timer with [`ReadyTimer::DEFAULT_DELAY`].
    ///
    /// # Errors
    ///
    /// Returns an IO error if the timer thread failed to start.
    pub fn start(gate: Arc<ReadinessGate>) -> io::Result<ReadyTimer> {
        ReadyTimer::start_with_delay(gate, ReadyTimer::DEFAULT_DELAY)
    }

    /// Start the fallback timer, triggering `gate` after `delay` unless stopped first.
    ///
    /// # Errors
    ///
    /// Returns an IO error if the timer thread failed to start.
    pub fn start_with_delay(gate: Arc<ReadinessGate>, delay: Duration) -> io::Result<ReadyTimer> {
        // Using `sync_channel` here as it makes `stop_sender` `Sync` (shareable between
        // threads). Buffer size of 1 is enough: the timer fires at most once, and a full buffer
        // means another thread has sent a stop command already.
        let (stop_sender, stop_receiver) = std::sync::mpsc::sync_channel::<()>(1);

        let join_handle = std::thread::Builder::new()
            .name("beacon-ready".to_owned())
            .spawn(move || {
                match stop_receiver.recv_timeout(delay) {
                    Err(RecvTimeoutError::Timeout) => {
                        log::debug!(target: "beacon", "ready timer expired, triggering gate");
                        // The ready callback is integrator code; a panic in it must not cross
                        // the thread boundary.
                        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(
                            || gate.trigger(),
                        ));
                        if result.is_err() {
                            log::warn!(target: "beacon", "ready callback panicked");
                        }
                    }
                    Ok(()) => {
                        log::debug!(target: "beacon", "ready timer received stop command");
                    }
                    Err(RecvTimeoutError::Disconnected) => {
                        // When the other end of channel disconnects, calls to .recv_timeout()
                        // return immediately. Stop the thread without firing.
                        log::debug!(target: "beacon", "ready timer received disconnected");
                    }
                }
            })?;

        Ok(ReadyTimer {
            join_handle,
            stop_sender,
        })
    }

    /// Cancel the timer.
    ///
    /// This function does not wait for the thread to actually stop.
    pub fn stop(&self) {
        // Error means that the receiver was dropped (thread exited) or the channel buffer is
        // full. Both can be ignored: the timer has either already finished or a stop command is
        // already on its way.
        let _ = self.stop_sender.try_send(());
    }

    /// Cancel the timer and block waiting for the thread to exit.
    ///
    /// If you don't need to wait for the thread to exit, use [`ReadyTimer::stop`] instead.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ReadyTimerPanicked`] if the thread has panicked.
    pub fn shutdown(self) -> Result<()> {
        // Send stop signal in case it wasn't sent before.
        self.stop();

        // Error means that the thread has panicked and there's nothing useful we can do in that
        // case.
        self.join_handle
            .join()
            .map_err(|_| Error::ReadyTimerPanicked)?;

        Ok(())
    }
}
