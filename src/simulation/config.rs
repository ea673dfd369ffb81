// src/simulation/config.rs

use crate::model::Tick;
use crate::simulation::error::ConfigError;

#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    pub num_servers: usize,
    pub hours_in_work_day: u32,
    pub clock_ticks_per_hour: u32,
    pub avg_clients_per_day: u32,
    /// Print the minute-by-minute trace and stop after `abbreviated_ticks`.
    pub verbose: bool,
    /// Fixed seed for a reproducible run. `None` draws one from the OS.
    pub seed: Option<u64>,
    pub abbreviated_ticks: Tick,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            num_servers: 1,
            hours_in_work_day: 8,
            clock_ticks_per_hour: 60,
            avg_clients_per_day: 100,
            verbose: false,
            seed: None,
            abbreviated_ticks: 16,
        }
    }
}

impl SimulationConfig {
    pub fn total_ticks(&self) -> Tick {
        Tick::from(self.hours_in_work_day) * Tick::from(self.clock_ticks_per_hour)
    }

    /// Chance that one customer arrives on a given tick.
    pub fn arrival_rate(&self) -> f64 {
        let total = self.total_ticks();
        if total == 0 {
            return 0.0;
        }
        f64::from(self.avg_clients_per_day) / total as f64
    }

    /// Number of ticks the loop actually runs: the whole day, or the
    /// abbreviated demonstration window in verbose mode.
    pub fn run_length(&self) -> Tick {
        if self.verbose {
            self.total_ticks().min(self.abbreviated_ticks)
        } else {
            self.total_ticks()
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.num_servers == 0 {
            return Err(ConfigError::NoServers);
        }
        if self.hours_in_work_day == 0 {
            return Err(ConfigError::NoHours);
        }
        if self.clock_ticks_per_hour == 0 {
            return Err(ConfigError::NoTicksPerHour);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_day_derivations() {
        let config = SimulationConfig::default();
        assert_eq!(config.total_ticks(), 480);
        assert!((config.arrival_rate() - 100.0 / 480.0).abs() < 1e-12);
        assert_eq!(config.run_length(), 480);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn verbose_mode_abbreviates_the_run() {
        let config = SimulationConfig {
            verbose: true,
            ..SimulationConfig::default()
        };
        assert_eq!(config.run_length(), 16);

        let short_day = SimulationConfig {
            verbose: true,
            hours_in_work_day: 1,
            clock_ticks_per_hour: 10,
            ..SimulationConfig::default()
        };
        assert_eq!(short_day.run_length(), 10);
    }

    #[test]
    fn rejects_zero_sized_inputs() {
        let no_servers = SimulationConfig {
            num_servers: 0,
            ..SimulationConfig::default()
        };
        assert_eq!(no_servers.validate(), Err(ConfigError::NoServers));

        let no_hours = SimulationConfig {
            hours_in_work_day: 0,
            ..SimulationConfig::default()
        };
        assert_eq!(no_hours.validate(), Err(ConfigError::NoHours));
        assert_eq!(no_hours.arrival_rate(), 0.0);

        let no_ticks = SimulationConfig {
            clock_ticks_per_hour: 0,
            ..SimulationConfig::default()
        };
        assert_eq!(no_ticks.validate(), Err(ConfigError::NoTicksPerHour));
    }

    #[test]
    fn busy_day_rate_exceeds_one_but_is_valid() {
        let config = SimulationConfig {
            avg_clients_per_day: 1_000,
            ..SimulationConfig::default()
        };
        assert!(config.arrival_rate() > 1.0);
        assert!(config.validate().is_ok());
    }
}
