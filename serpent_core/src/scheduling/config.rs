use crate::error::{SerpentError, SerpentResult};
use crate::params::RuntimeParams;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Frame pacing settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimingConfig {
    /// Ticks per second for the whole loop
    pub global_rate_hz: f64,
}

/// Scheduler configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchedulerConfig {
    pub name: String,
    pub timing: TimingConfig,
    /// Route Ctrl+C to the scheduler's stop signal
    pub install_signal_handler: bool,
}

impl SchedulerConfig {
    /// Interactive preset: display-rate ticking and Ctrl+C handling
    pub fn standard() -> Self {
        Self {
            name: "SnakeScheduler".to_string(),
            timing: TimingConfig {
                global_rate_hz: 60.0,
            },
            install_signal_handler: true,
        }
    }

    /// Preset for tests and batch runs: no signal handler
    pub fn headless(rate_hz: f64) -> Self {
        Self {
            name: "HeadlessScheduler".to_string(),
            timing: TimingConfig {
                global_rate_hz: rate_hz,
            },
            install_signal_handler: false,
        }
    }

    /// Standard preset with the tick rate taken from `tick_rate`
    pub fn from_params(params: &RuntimeParams) -> Self {
        let mut config = Self::standard();
        config.timing.global_rate_hz = params.get_f64("tick_rate", config.timing.global_rate_hz);
        config
    }

    pub fn validate(&self) -> SerpentResult<()> {
        let rate = self.timing.global_rate_hz;
        if !rate.is_finite() || rate <= 0.0 {
            return Err(SerpentError::config(format!(
                "tick rate must be a positive number of Hz, got {}",
                rate
            )));
        }
        Ok(())
    }

    /// Time between two ticks
    pub fn tick_period(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.timing.global_rate_hz)
    }
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_period() {
        let config = SchedulerConfig::standard();
        assert!(config.validate().is_ok());
        assert_eq!(config.tick_period(), Duration::from_secs_f64(1.0 / 60.0));
    }

    #[test]
    fn test_rejects_non_positive_rate() {
        assert!(SchedulerConfig::headless(0.0).validate().is_err());
        assert!(SchedulerConfig::headless(-5.0).validate().is_err());
        assert!(SchedulerConfig::headless(f64::NAN).validate().is_err());
    }

    #[test]
    fn test_rate_from_params() {
        let params = RuntimeParams::empty();
        params.set("tick_rate", 30.0).unwrap();

        let config = SchedulerConfig::from_params(&params);
        assert_eq!(config.timing.global_rate_hz, 30.0);
        assert!(config.install_signal_handler);
    }
}
