//! Actuator and sensor device abstractions
//!
//! Hardware handles are explicitly constructed and injected into the
//! sequencer as a [`Rig`] rather than declared as ambient globals, so
//! simulated devices can stand in for real ones in tests and the runner.
//! All device calls are non-blocking; synchronization against mechanism
//! motion happens through condition gates, never inside a handle.

pub mod mock;

use std::sync::Arc;

/// Position/power controlled motor
pub trait Motor: Send + Sync {
    /// Command the motor toward an absolute encoder position at a speed
    /// (motor units, 0..=127). Returns immediately.
    fn move_absolute(&self, target: f32, speed: f32);

    /// Apply raw power (motor units, -127..=127). Returns immediately.
    fn set_power(&self, power: f32);

    /// Current encoder position
    fn position(&self) -> f32;
}

/// Binary output (pneumatic solenoid, indicator)
pub trait DigitalOutput: Send + Sync {
    /// Set the output state
    fn set(&self, state: bool);
}

/// Binary input (limit switch, bumper)
pub trait DigitalInput: Send + Sync {
    /// Read the input state
    fn state(&self) -> bool;
}

/// Ranging sensor
pub trait DistanceSensor: Send + Sync {
    /// Current distance reading (millimeters)
    fn distance_mm(&self) -> f32;
}

/// Motor slots a routine may reference
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotorRole {
    /// Ring lift
    Lift,
    /// Intake rollers
    Intake,
    /// Wall-stake arm
    Arm,
}

/// Binary output slots
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputRole {
    /// Mobile-goal clamp
    Clamp,
}

/// Distance sensor slots
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorRole {
    /// Ring check in front of the arm
    ArmRing,
    /// Forward-facing rangefinder
    Forward,
}

/// Binary input slots
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputRole {
    /// Arm stowed-position limit switch
    ArmHome,
}

/// The full set of non-chassis hardware handles for one robot
///
/// Shared handles (`Arc`) let gate predicates read a sensor on the
/// foreground thread while simulation threads update it.
pub struct Rig {
    pub lift: Arc<dyn Motor>,
    pub intake: Arc<dyn Motor>,
    pub arm: Arc<dyn Motor>,
    pub clamp: Arc<dyn DigitalOutput>,
    pub arm_home: Arc<dyn DigitalInput>,
    pub arm_ring: Arc<dyn DistanceSensor>,
    pub forward: Arc<dyn DistanceSensor>,
}

impl Rig {
    /// Resolve a motor handle by role
    pub fn motor(&self, role: MotorRole) -> Arc<dyn Motor> {
        match role {
            MotorRole::Lift => Arc::clone(&self.lift),
            MotorRole::Intake => Arc::clone(&self.intake),
            MotorRole::Arm => Arc::clone(&self.arm),
        }
    }

    /// Resolve a binary output handle by role
    pub fn output(&self, role: OutputRole) -> Arc<dyn DigitalOutput> {
        match role {
            OutputRole::Clamp => Arc::clone(&self.clamp),
        }
    }

    /// Resolve a distance sensor handle by role
    pub fn distance(&self, role: SensorRole) -> Arc<dyn DistanceSensor> {
        match role {
            SensorRole::ArmRing => Arc::clone(&self.arm_ring),
            SensorRole::Forward => Arc::clone(&self.forward),
        }
    }

    /// Resolve a binary input handle by role
    pub fn input(&self, role: InputRole) -> Arc<dyn DigitalInput> {
        match role {
            InputRole::ArmHome => Arc::clone(&self.arm_home),
        }
    }
}
