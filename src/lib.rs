//! SutraAuton - Autonomous routine executor for a competition robot
//!
//! Executes fixed scripts of motion commands, sensor-gated waits and
//! actuator commands against a pose-aware chassis collaborator. The chassis
//! owns pose estimation and PID settle logic; this crate owns sequencing and
//! synchronization: strict entry ordering, bounded waits everywhere, and
//! timeout-as-normal-outcome semantics.
//!
//! ## Architecture
//!
//! - [`sequencer::Sequencer`] runs a [`routine::RoutineStage`] to completion
//!   on the foreground thread, one entry at a time.
//! - [`gate`] provides the bounded polling wait used between mechanical
//!   actions and motion steps.
//! - [`chassis::Chassis`] and the [`devices`] traits are the collaborator
//!   seams; [`devices::mock`] provides hardware-free implementations whose
//!   background pose thread keeps estimating during blocking calls.

pub mod chassis;
pub mod config;
pub mod devices;
pub mod error;
pub mod gate;
pub mod pose;
pub mod routine;
pub mod sequencer;
pub mod telemetry;

// Re-export commonly used types
pub use chassis::{Chassis, MoveParams, SettleOutcome, TurnParams};
pub use config::AppConfig;
pub use error::{Error, Result};
pub use gate::{ConditionGate, GateOutcome};
pub use pose::{Point, Pose};
pub use routine::RoutineStage;
pub use sequencer::Sequencer;
