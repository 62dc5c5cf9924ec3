//! Simulated devices for hardware-free routine execution
//!
//! Stand-ins for the chassis and auxiliary hardware, letting routines run and
//! be tested without a robot:
//!
//! | Component | Simulation method |
//! |-----------|-------------------|
//! | Chassis | Background pose-integration thread + settle/timeout loop |
//! | Motors | Lazily-integrated position slew from command timestamps |
//! | Solenoid / switch | Atomic state |
//! | Distance sensor | Scripted reading with optional noise |
//!
//! The simulated chassis mirrors the real collaborator's concurrency shape:
//! pose keeps updating on a background thread while a blocking motion call
//! polls for its settle condition on the caller's thread.

mod actuators;
mod chassis;

pub use actuators::{SimDistanceSensor, SimMotor, SimSolenoid, SimSwitch};
pub use chassis::SimChassis;

use super::Rig;
use crate::config::SimConfig;
use std::sync::Arc;
use std::time::Duration;

/// Build a full simulated rig from simulation tuning
///
/// The arm ring sensor starts reading far (no ring) and drops below the
/// detection range after `ring_detect_after_ms`, so sensor-gated waits have
/// something to wait for.
pub fn sim_rig(config: &SimConfig) -> Rig {
    let arm_ring = if config.ring_detect_after_ms > 0 {
        SimDistanceSensor::scripted(
            200.0,
            30.0,
            Duration::from_millis(config.ring_detect_after_ms),
            config.sensor_jitter_mm,
        )
    } else {
        SimDistanceSensor::fixed(200.0, config.sensor_jitter_mm)
    };

    Rig {
        lift: Arc::new(SimMotor::new(config.motor_units_per_sec)),
        intake: Arc::new(SimMotor::new(config.motor_units_per_sec)),
        arm: Arc::new(SimMotor::new(config.motor_units_per_sec)),
        clamp: Arc::new(SimSolenoid::new()),
        arm_home: Arc::new(SimSwitch::new(true)),
        arm_ring: Arc::new(arm_ring),
        forward: Arc::new(SimDistanceSensor::fixed(400.0, config.sensor_jitter_mm)),
    }
}
