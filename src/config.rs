//! Configuration for the SutraAuton runner
//!
//! Loads configuration from a TOML file. Routines themselves are compiled-in
//! data; configuration only selects which routine runs and tunes the
//! hardware-free simulation behind the runner binary.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Top-level application configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    pub routine: RoutineConfig,
    pub simulation: SimConfig,
    pub logging: LoggingConfig,
}

/// Routine selection
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RoutineConfig {
    /// Name of the compiled-in routine to run
    pub name: String,
}

impl Default for RoutineConfig {
    fn default() -> Self {
        Self {
            name: "left_wall_stake".to_string(),
        }
    }
}

/// Simulated hardware tuning
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SimConfig {
    /// Physics/pose integration tick (milliseconds)
    pub tick_ms: u64,

    /// Chassis linear speed at full command (inches/sec)
    pub linear_speed: f32,

    /// Chassis angular speed at full command (degrees/sec)
    pub angular_speed: f32,

    /// Lateral settle range (inches)
    pub settle_range: f32,

    /// Angular settle range (degrees)
    pub settle_range_deg: f32,

    /// Dwell inside the settle range before a motion reports settled
    /// (milliseconds)
    pub settle_dwell_ms: u64,

    /// Auxiliary motor travel at full command (encoder units/sec)
    pub motor_units_per_sec: f32,

    /// Uniform noise applied to distance readings (millimeters, 0 = none)
    pub sensor_jitter_mm: f32,

    /// When the simulated arm ring sensor reports a ring present
    /// (milliseconds after startup, 0 = never)
    pub ring_detect_after_ms: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            tick_ms: 10,
            linear_speed: 40.0,
            angular_speed: 180.0,
            settle_range: 1.0,
            settle_range_deg: 2.0,
            settle_dwell_ms: 100,
            motor_units_per_sec: 400.0,
            sensor_jitter_mm: 0.0,
            ring_detect_after_ms: 1200,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load from file if it exists, otherwise use defaults
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        if path.as_ref().exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }
}
