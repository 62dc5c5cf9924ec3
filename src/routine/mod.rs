//! Routine definitions as data
//!
//! A routine is an ordered, immutable script of motion, actuation and wait
//! entries. Multiple named routines are just multiple [`RoutineStage`] values
//! sharing the same sequencer and gate machinery; they are constructed once
//! at definition time and validated there, so execution never has to handle
//! a malformed entry.

pub mod library;

use crate::chassis::{MoveParams, TurnParams};
use crate::devices::{InputRole, MotorRole, OutputRole, SensorRole};
use crate::error::{Error, Result};
use crate::pose::Pose;
use std::time::Duration;

/// Lazily-resolved axis value
///
/// `At` is an absolute coordinate fixed at definition time. `Offset` is
/// resolved against the live pose immediately before its step executes —
/// `Offset(0.0)` means "the current value of this axis". Offsets must read
/// pose at execution time, never a definition-time snapshot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Coord {
    /// Absolute field coordinate
    At(f32),
    /// Current axis value plus an offset, read when the step runs
    Offset(f32),
}

impl Coord {
    /// Resolve against the current value of the axis
    pub fn resolve(&self, current: f32) -> f32 {
        match self {
            Self::At(value) => *value,
            Self::Offset(offset) => current + offset,
        }
    }

    fn is_finite(&self) -> bool {
        match self {
            Self::At(value) | Self::Offset(value) => value.is_finite(),
        }
    }
}

/// One blocking motion command
#[derive(Debug, Clone)]
pub enum MotionStep {
    /// Drive to a field point
    MoveToPoint {
        x: Coord,
        y: Coord,
        timeout: Duration,
        params: MoveParams,
    },
    /// Drive to a field pose (position + final heading)
    MoveToPose {
        x: Coord,
        y: Coord,
        heading: Coord,
        timeout: Duration,
        params: MoveParams,
    },
    /// Turn in place to a heading
    TurnToHeading {
        heading: Coord,
        timeout: Duration,
        params: TurnParams,
    },
    /// Turn in place to face a field point
    TurnToPoint {
        x: Coord,
        y: Coord,
        timeout: Duration,
        params: TurnParams,
    },
}

impl MotionStep {
    /// Hard time bound for the blocking call
    pub fn timeout(&self) -> Duration {
        match self {
            Self::MoveToPoint { timeout, .. }
            | Self::MoveToPose { timeout, .. }
            | Self::TurnToHeading { timeout, .. }
            | Self::TurnToPoint { timeout, .. } => *timeout,
        }
    }

    /// Step kind for logging
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MoveToPoint { .. } => "move_to_point",
            Self::MoveToPose { .. } => "move_to_pose",
            Self::TurnToHeading { .. } => "turn_to_heading",
            Self::TurnToPoint { .. } => "turn_to_point",
        }
    }

    fn coords(&self) -> Vec<Coord> {
        match self {
            Self::MoveToPoint { x, y, .. } => vec![*x, *y],
            Self::MoveToPose { x, y, heading, .. } => vec![*x, *y, *heading],
            Self::TurnToHeading { heading, .. } => vec![*heading],
            Self::TurnToPoint { x, y, .. } => vec![*x, *y],
        }
    }
}

/// Predicate data for a sensor-gated wait
#[derive(Debug, Clone, Copy)]
pub enum GateCondition {
    /// A distance sensor reads below a threshold (object detected)
    DistanceBelow {
        sensor: SensorRole,
        threshold_mm: f32,
    },
    /// A motor mechanism has reached at least a position
    PositionAtLeast { motor: MotorRole, position: f32 },
    /// A binary input is high
    DigitalHigh { input: InputRole },
}

/// Bounded sensor-gated wait entry
#[derive(Debug, Clone, Copy)]
pub struct GateSpec {
    pub condition: GateCondition,
    /// Poll cadence
    pub poll: Duration,
    /// Upper time bound
    pub max_wait: Duration,
}

/// Fire-and-forget actuator command
#[derive(Debug, Clone, Copy)]
pub enum Actuation {
    /// Command a motor toward an absolute position
    MotorAbsolute {
        motor: MotorRole,
        position: f32,
        speed: f32,
    },
    /// Apply raw power to a motor
    MotorPower { motor: MotorRole, power: f32 },
    /// Set a binary output
    Solenoid { output: OutputRole, state: bool },
}

/// One routine entry; insertion order is execution order
#[derive(Debug, Clone)]
pub enum Entry {
    /// Blocking chassis motion
    Motion(MotionStep),
    /// Bounded sensor-gated wait
    Gate(GateSpec),
    /// Non-blocking actuator command
    Act(Actuation),
    /// Plain dwell
    Wait(Duration),
}

/// An ordered, immutable autonomous script
///
/// Validated on construction; every invariant violation surfaces here and
/// never during execution.
#[derive(Debug, Clone)]
pub struct RoutineStage {
    name: &'static str,
    initial_pose: Pose,
    entries: Vec<Entry>,
}

impl RoutineStage {
    /// Build a stage, rejecting invalid entries
    ///
    /// Rejects non-positive motion timeouts, non-finite targets, zero gate
    /// poll intervals, and gate polls longer than their bound.
    pub fn new(name: &'static str, initial_pose: Pose, entries: Vec<Entry>) -> Result<Self> {
        for (index, entry) in entries.iter().enumerate() {
            match entry {
                Entry::Motion(step) => {
                    if step.timeout().is_zero() {
                        return Err(Error::InvalidRoutine(format!(
                            "{}: entry {} ({}) has a zero timeout",
                            name,
                            index,
                            step.kind()
                        )));
                    }
                    if !step.coords().iter().all(Coord::is_finite) {
                        return Err(Error::InvalidRoutine(format!(
                            "{}: entry {} ({}) has a non-finite target",
                            name,
                            index,
                            step.kind()
                        )));
                    }
                }
                Entry::Gate(spec) => {
                    if spec.poll.is_zero() {
                        return Err(Error::InvalidRoutine(format!(
                            "{}: entry {} gate poll interval must be > 0",
                            name, index
                        )));
                    }
                    if spec.poll > spec.max_wait {
                        return Err(Error::InvalidRoutine(format!(
                            "{}: entry {} gate poll {:?} exceeds max wait {:?}",
                            name, index, spec.poll, spec.max_wait
                        )));
                    }
                }
                Entry::Act(_) | Entry::Wait(_) => {}
            }
        }

        if !initial_pose.x.is_finite()
            || !initial_pose.y.is_finite()
            || !initial_pose.heading.is_finite()
        {
            return Err(Error::InvalidRoutine(format!(
                "{}: initial pose is non-finite",
                name
            )));
        }

        Ok(Self {
            name,
            initial_pose,
            entries,
        })
    }

    /// Routine name
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Known starting pose, applied through the chassis reset at run start
    pub fn initial_pose(&self) -> Pose {
        self.initial_pose
    }

    /// Entries in execution order
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the stage has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn move_entry(timeout_ms: u64) -> Entry {
        Entry::Motion(MotionStep::MoveToPoint {
            x: Coord::At(0.0),
            y: Coord::At(10.0),
            timeout: Duration::from_millis(timeout_ms),
            params: MoveParams::default(),
        })
    }

    #[test]
    fn test_coord_resolution() {
        assert_eq!(Coord::At(5.0).resolve(99.0), 5.0);
        assert_eq!(Coord::Offset(-3.0).resolve(10.0), 7.0);
        assert_eq!(Coord::Offset(0.0).resolve(42.5), 42.5);
    }

    #[test]
    fn test_valid_stage_accepted() {
        let stage = RoutineStage::new(
            "test",
            Pose::new(0.0, 0.0, 0.0),
            vec![move_entry(1000), Entry::Wait(Duration::from_millis(100))],
        )
        .unwrap();
        assert_eq!(stage.len(), 2);
        assert_eq!(stage.name(), "test");
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let result = RoutineStage::new("test", Pose::new(0.0, 0.0, 0.0), vec![move_entry(0)]);
        assert!(matches!(result, Err(Error::InvalidRoutine(_))));
    }

    #[test]
    fn test_non_finite_target_rejected() {
        let entry = Entry::Motion(MotionStep::TurnToHeading {
            heading: Coord::At(f32::NAN),
            timeout: Duration::from_millis(1000),
            params: TurnParams::default(),
        });
        let result = RoutineStage::new("test", Pose::new(0.0, 0.0, 0.0), vec![entry]);
        assert!(result.is_err());
    }

    #[test]
    fn test_bad_gate_bounds_rejected() {
        let gate = Entry::Gate(GateSpec {
            condition: GateCondition::PositionAtLeast {
                motor: MotorRole::Arm,
                position: 600.0,
            },
            poll: Duration::from_millis(50),
            max_wait: Duration::from_millis(10),
        });
        let result = RoutineStage::new("test", Pose::new(0.0, 0.0, 0.0), vec![gate]);
        assert!(result.is_err());

        let zero_poll = Entry::Gate(GateSpec {
            condition: GateCondition::DigitalHigh {
                input: InputRole::ArmHome,
            },
            poll: Duration::ZERO,
            max_wait: Duration::from_millis(100),
        });
        let result = RoutineStage::new("test", Pose::new(0.0, 0.0, 0.0), vec![zero_poll]);
        assert!(result.is_err());
    }

    #[test]
    fn test_non_finite_initial_pose_rejected() {
        let result = RoutineStage::new("test", Pose::new(f32::INFINITY, 0.0, 0.0), vec![]);
        assert!(result.is_err());
    }
}
