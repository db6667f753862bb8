//! Interleaving model wired into a stepping driver.
//!
//! A thin owner in front of [`Driver`]: validates the configuration eagerly,
//! seeds the initial state, and installs the model transition as the step
//! function. Consumers that want animated playback use the lifecycle
//! controls; batch consumers call [`InterleaveSimulator::run_to_completion`].

use std::fmt;

use crate::common::{ConfigError, StepError};
use crate::config::{DriverConfig, InterleaveConfig};
use crate::model::{self, InterleaveState};
use crate::sim::Driver;

/// A complete interleaving simulation: configuration plus driver.
pub struct InterleaveSimulator {
    config: InterleaveConfig,
    driver: Driver<InterleaveState>,
}

impl fmt::Debug for InterleaveSimulator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InterleaveSimulator")
            .field("config", &self.config)
            .field("driver", &self.driver)
            .finish()
    }
}

impl InterleaveSimulator {
    /// Creates a simulator for the given model and driver configurations.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when either configuration is malformed;
    /// nothing is constructed on failure.
    ///
    /// # Examples
    ///
    /// ```
    /// use ilvsim_core::config::{DriverConfig, InterleaveConfig};
    /// use ilvsim_core::sim::InterleaveSimulator;
    ///
    /// let driver_config = DriverConfig { total_steps: 8, step_interval_ms: 0 };
    /// let sim = InterleaveSimulator::new(InterleaveConfig::default(), &driver_config).unwrap();
    ///
    /// let finished = sim.run_to_completion().unwrap();
    /// assert_eq!(finished.stats.total_accesses, 8);
    /// ```
    pub fn new(config: InterleaveConfig, driver_config: &DriverConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let initial = InterleaveState::new(&config);
        let step_config = config.clone();
        let driver = Driver::new(driver_config, initial, move |state, i| {
            Ok(model::step(state, &step_config, i))
        })?;
        Ok(Self { config, driver })
    }

    /// Returns the model configuration.
    pub const fn config(&self) -> &InterleaveConfig {
        &self.config
    }

    /// Returns the underlying driver for direct control or observation.
    pub const fn driver(&self) -> &Driver<InterleaveState> {
        &self.driver
    }

    /// Begins paced ticking. Idempotent; see [`Driver::start`].
    pub fn start(&self) {
        self.driver.start();
    }

    /// Stops paced ticking. See [`Driver::pause`].
    pub fn pause(&self) {
        self.driver.pause();
    }

    /// Rewinds the run to a fresh initial state (same seed, so the run
    /// replays identically).
    pub fn reset(&self) {
        self.driver.reset(None);
    }

    /// Applies a single access synchronously. See [`Driver::step_once`].
    ///
    /// # Errors
    ///
    /// Propagates a step failure; the model transition itself is total, so
    /// this only fails for a poisoned run.
    pub fn step_once(&self) -> Result<bool, StepError> {
        self.driver.step_once()
    }

    /// Returns a clone of the current state snapshot.
    pub fn snapshot(&self) -> InterleaveState {
        self.driver.state()
    }

    /// Runs every remaining step back-to-back with no pacing delay.
    ///
    /// # Errors
    ///
    /// Propagates the first step failure.
    pub fn run_to_completion(&self) -> Result<InterleaveState, StepError> {
        while self.driver.step_once()? {}
        Ok(self.driver.state())
    }
}
