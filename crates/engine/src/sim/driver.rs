//! Generic timer-paced stepping driver.
//!
//! The driver owns a piece of state and advances it one step at a time at a
//! fixed cadence, without the caller managing timers. It provides:
//! 1. **Lifecycle:** Idempotent `start`, tick-cancelling `pause`, and `reset`.
//! 2. **Pacing:** A background worker that sleeps `step_interval` between
//!    ticks on a condition variable, so cancellation interrupts the sleep
//!    immediately.
//! 3. **Publication:** Cloned state snapshots, a progress percentage, and an
//!    observer callback fired after every completed step.
//! 4. **Failure Latching:** A failing step function stops the run, preserves
//!    the last good state, and records the error.
//!
//! # Concurrency contract
//!
//! Each run has at most one worker; every tick completes fully (read,
//! transform, publish, reschedule) before the next is considered. A worker
//! wakeup re-checks run liveness — the `running` flag and an epoch counter —
//! under the lock before touching state, so a tick can never land on a run
//! that was paused, reset, or superseded while the worker slept. `pause`
//! joins the worker: once it returns, no further tick or observer call can
//! occur. Controls are meant for the consuming thread; calling `pause` or
//! `reset` from inside the observer callback would self-join and is not
//! supported.

use std::fmt;
use std::sync::{Arc, Condvar, Mutex, MutexGuard};
use std::thread::{self, JoinHandle};
use std::time::Instant;

use crate::common::{ConfigError, StepError};
use crate::config::DriverConfig;

/// Caller-supplied state transition. Failures are fatal to the run.
type StepFn<S> = dyn Fn(&S, u64) -> Result<S, StepError> + Send + Sync;

/// Observer invoked with the new state and the index of the completed step.
type Observer<S> = dyn Fn(&S, u64) + Send + Sync;

/// Locks a mutex, recovering the guard from a poisoned lock.
///
/// A panic in an observer must not brick the run's state for every other
/// accessor; the shared data is valid at every release point.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

/// Mutable run state behind the shared lock.
struct Shared<S> {
    state: S,
    step_index: u64,
    running: bool,
    /// Bumped on every start and reset; a worker holding a stale epoch exits
    /// without touching the run.
    epoch: u64,
    error: Option<StepError>,
}

/// State shared between the driver handle and its worker.
struct Inner<S> {
    shared: Mutex<Shared<S>>,
    wakeup: Condvar,
    step: Box<StepFn<S>>,
    observer: Mutex<Option<Box<Observer<S>>>>,
    total_steps: u64,
    step_interval: std::time::Duration,
}

/// A timer-paced stepping engine over an arbitrary state type.
///
/// # Examples
///
/// Driving a counter synchronously with [`Driver::step_once`]:
///
/// ```
/// use ilvsim_core::config::DriverConfig;
/// use ilvsim_core::sim::Driver;
///
/// let config = DriverConfig { total_steps: 3, step_interval_ms: 0 };
/// let driver = Driver::new(&config, 0_u64, |count, _i| Ok(count + 1)).unwrap();
///
/// while driver.step_once().unwrap() {}
/// assert_eq!(driver.state(), 3);
/// assert_eq!(driver.progress_pct(), 100.0);
/// ```
pub struct Driver<S> {
    inner: Arc<Inner<S>>,
    initial: S,
    worker: Mutex<Option<JoinHandle<()>>>,
}

impl<S> fmt::Debug for Driver<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let guard = lock(&self.inner.shared);
        f.debug_struct("Driver")
            .field("step_index", &guard.step_index)
            .field("total_steps", &self.inner.total_steps)
            .field("running", &guard.running)
            .finish_non_exhaustive()
    }
}

impl<S: Clone + Send + 'static> Driver<S> {
    /// Creates a driver over the given initial state and step function.
    ///
    /// The driver does not start ticking until [`Driver::start`] is called.
    ///
    /// # Arguments
    ///
    /// * `config` - Step budget and tick cadence.
    /// * `initial` - State the run begins from; also the state [`Driver::reset`]
    ///   restores when given no replacement.
    /// * `step` - State transition applied once per tick.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ZeroSteps`] for an empty step budget.
    pub fn new<F>(config: &DriverConfig, initial: S, step: F) -> Result<Self, ConfigError>
    where
        F: Fn(&S, u64) -> Result<S, StepError> + Send + Sync + 'static,
    {
        config.validate()?;
        Ok(Self {
            inner: Arc::new(Inner {
                shared: Mutex::new(Shared {
                    state: initial.clone(),
                    step_index: 0,
                    running: false,
                    epoch: 0,
                    error: None,
                }),
                wakeup: Condvar::new(),
                step: Box::new(step),
                observer: Mutex::new(None),
                total_steps: config.total_steps,
                step_interval: config.step_interval(),
            }),
            initial,
            worker: Mutex::new(None),
        })
    }

    /// Installs the observer fired after every completed step.
    ///
    /// The observer receives the new state and the zero-based index of the
    /// step that produced it. Replaces any previously installed observer.
    pub fn set_observer<F>(&self, observer: F)
    where
        F: Fn(&S, u64) + Send + Sync + 'static,
    {
        *lock(&self.inner.observer) = Some(Box::new(observer));
    }

    /// Begins ticking at the configured cadence.
    ///
    /// Idempotent: a second `start` while running is a no-op, as is starting
    /// a run that has already reached its step budget (use [`Driver::reset`]
    /// to rearm a finished run).
    pub fn start(&self) {
        let epoch = {
            let mut guard = lock(&self.inner.shared);
            if guard.running || guard.step_index >= self.inner.total_steps {
                return;
            }
            guard.epoch += 1;
            guard.running = true;
            guard.epoch
        };
        tracing::debug!(epoch, "run started");

        let inner = Arc::clone(&self.inner);
        let handle = thread::spawn(move || worker_loop(&inner, epoch));
        // A previous worker handle here is already finished or exiting on a
        // stale epoch; dropping it detaches nothing that can still tick.
        *lock(&self.worker) = Some(handle);
    }

    /// Stops ticking without touching the step counter or state.
    ///
    /// Cancels any pending tick and joins the worker; when this returns, no
    /// further step or observer call can occur. No-op when already paused.
    pub fn pause(&self) {
        {
            let mut guard = lock(&self.inner.shared);
            guard.running = false;
        }
        self.inner.wakeup.notify_all();
        if let Some(handle) = lock(&self.worker).take() {
            let _ = handle.join();
        }
        tracing::debug!("run paused");
    }

    /// Pauses, then rewinds the run to step zero.
    ///
    /// The state becomes `next` when supplied, otherwise the original
    /// initial state. Any latched error is cleared. Never auto-starts.
    pub fn reset(&self, next: Option<S>) {
        self.pause();
        let mut guard = lock(&self.inner.shared);
        guard.step_index = 0;
        guard.error = None;
        guard.epoch += 1;
        guard.state = next.unwrap_or_else(|| self.initial.clone());
        tracing::debug!("run reset");
    }

    /// Applies a single step synchronously.
    ///
    /// Returns `Ok(true)` when a step was applied, `Ok(false)` when the run
    /// is currently ticking on its worker or has reached its step budget.
    ///
    /// # Errors
    ///
    /// Propagates a step-function failure after latching it; the state keeps
    /// its last good value.
    pub fn step_once(&self) -> Result<bool, StepError> {
        let mut guard = lock(&self.inner.shared);
        if guard.running || guard.step_index >= self.inner.total_steps {
            return Ok(false);
        }
        let idx = guard.step_index;
        match (self.inner.step)(&guard.state, idx) {
            Ok(next) => {
                guard.state = next;
                guard.step_index = idx + 1;
                let snapshot = guard.state.clone();
                drop(guard);
                if let Some(observer) = lock(&self.inner.observer).as_ref() {
                    observer(&snapshot, idx);
                }
                Ok(true)
            }
            Err(err) => {
                guard.error = Some(err.clone());
                drop(guard);
                tracing::error!(step = idx, error = %err, "step function failed; run stopped");
                Err(err)
            }
        }
    }

    /// Blocks until the worker exits (natural completion or a step failure).
    ///
    /// Returns immediately when no worker is active.
    pub fn wait(&self) {
        if let Some(handle) = lock(&self.worker).take() {
            let _ = handle.join();
        }
    }

    /// Returns a clone of the current state.
    pub fn state(&self) -> S {
        lock(&self.inner.shared).state.clone()
    }

    /// Returns the number of steps completed so far.
    pub fn step_index(&self) -> u64 {
        lock(&self.inner.shared).step_index
    }

    /// Returns the configured step budget.
    pub fn total_steps(&self) -> u64 {
        self.inner.total_steps
    }

    /// Returns run progress as a percentage in `[0, 100]`.
    pub fn progress_pct(&self) -> f64 {
        let idx = self.step_index();
        (idx as f64 / self.inner.total_steps as f64 * 100.0).min(100.0)
    }

    /// Returns whether the worker is currently ticking.
    pub fn is_running(&self) -> bool {
        lock(&self.inner.shared).running
    }

    /// Returns whether the run has reached its step budget.
    pub fn is_complete(&self) -> bool {
        self.step_index() >= self.inner.total_steps
    }

    /// Returns the latched error from a failed step, if any.
    pub fn last_error(&self) -> Option<StepError> {
        lock(&self.inner.shared).error.clone()
    }
}

impl<S> Drop for Driver<S> {
    /// Releases the worker on disposal so no tick can fire against a
    /// dropped run.
    fn drop(&mut self) {
        {
            let mut guard = lock(&self.inner.shared);
            guard.running = false;
        }
        self.inner.wakeup.notify_all();
        if let Some(handle) = lock(&self.worker).take() {
            let _ = handle.join();
        }
    }
}

/// Worker body: pace, re-check liveness, tick, repeat.
fn worker_loop<S: Clone>(inner: &Inner<S>, epoch: u64) {
    loop {
        let guard = lock(&inner.shared);
        let Some(mut guard) = pace(inner, guard, epoch) else {
            return;
        };

        if guard.step_index >= inner.total_steps {
            guard.running = false;
            return;
        }

        let idx = guard.step_index;
        match (inner.step)(&guard.state, idx) {
            Ok(next) => {
                guard.state = next;
                guard.step_index = idx + 1;
                let done = guard.step_index >= inner.total_steps;
                if done {
                    guard.running = false;
                }
                let snapshot = guard.state.clone();
                drop(guard);
                if let Some(observer) = lock(&inner.observer).as_ref() {
                    observer(&snapshot, idx);
                }
                if done {
                    tracing::debug!(steps = idx + 1, "run completed");
                    return;
                }
            }
            Err(err) => {
                guard.running = false;
                guard.error = Some(err.clone());
                drop(guard);
                tracing::error!(step = idx, error = %err, "step function failed; run stopped");
                return;
            }
        }
    }
}

/// Sleeps out one tick interval on the condition variable.
///
/// Returns the re-acquired guard when the interval elapsed with the run
/// still live, or `None` when the run was paused, reset, or superseded —
/// checked under the lock on every wakeup, so a cancellation racing the
/// timer can never be missed.
fn pace<'a, S>(
    inner: &'a Inner<S>,
    mut guard: MutexGuard<'a, Shared<S>>,
    epoch: u64,
) -> Option<MutexGuard<'a, Shared<S>>> {
    let deadline = Instant::now() + inner.step_interval;
    loop {
        if !guard.running || guard.epoch != epoch {
            return None;
        }
        let now = Instant::now();
        if now >= deadline {
            return Some(guard);
        }
        guard = match inner.wakeup.wait_timeout(guard, deadline - now) {
            Ok((guard, _timeout)) => guard,
            Err(poisoned) => poisoned.into_inner().0,
        };
    }
}
