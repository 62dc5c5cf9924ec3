//! Chassis collaborator contract
//!
//! The chassis owns pose estimation and the PID settle logic. Every motion
//! call blocks the calling thread until the chassis' own settle condition is
//! met (small-error dwell, large-error timeout fallback) or the supplied hard
//! timeout elapses. The sequencer supplies targets, timeouts and parameter
//! bags and trusts this blocking contract; it never reimplements the settle
//! state machine.

use crate::pose::{Point, Pose};
use std::time::Duration;

/// Maximum speed command value (motor units)
pub const SPEED_MAX: f32 = 127.0;

/// How a blocking motion call returned
///
/// A timeout is a normal exit path, not an error: the robot proceeds with
/// whatever pose it reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettleOutcome {
    /// Settle condition met within the time bound
    Settled,
    /// Hard timeout elapsed first
    TimedOut,
}

impl SettleOutcome {
    /// Check for the settled case
    pub fn is_settled(&self) -> bool {
        matches!(self, Self::Settled)
    }
}

/// Configuration bag for lateral motion commands
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveParams {
    /// Drive facing the target (false = drive in reverse)
    pub forwards: bool,
    /// Maximum speed (motor units, 0..=127)
    pub max_speed: f32,
    /// Minimum speed held through the motion (motor units)
    pub min_speed: f32,
    /// Exit early once within this range of the target (inches, 0 = disabled)
    pub early_exit_range: f32,
}

impl Default for MoveParams {
    fn default() -> Self {
        Self {
            forwards: true,
            max_speed: SPEED_MAX,
            min_speed: 0.0,
            early_exit_range: 0.0,
        }
    }
}

impl MoveParams {
    /// Reverse motion at default speeds
    pub fn reverse() -> Self {
        Self {
            forwards: false,
            ..Self::default()
        }
    }

    /// Cap the maximum speed
    pub fn with_max_speed(mut self, max_speed: f32) -> Self {
        self.max_speed = max_speed;
        self
    }
}

/// Configuration bag for turning commands
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TurnParams {
    /// Maximum speed (motor units, 0..=127)
    pub max_speed: f32,
    /// Minimum speed held through the turn (motor units)
    pub min_speed: f32,
    /// Exit early once within this range of the target (degrees, 0 = disabled)
    pub early_exit_range: f32,
}

impl Default for TurnParams {
    fn default() -> Self {
        Self {
            max_speed: SPEED_MAX,
            min_speed: 0.0,
            early_exit_range: 0.0,
        }
    }
}

/// Pose-aware chassis abstraction
///
/// Methods take `&self` so a telemetry thread can read pose while a blocking
/// motion call is in flight on the foreground thread; implementations use
/// interior mutability and keep their pose estimator running during every
/// blocking call.
pub trait Chassis: Send + Sync {
    /// One-time sensor calibration, blocking. Called before any routine runs.
    fn calibrate(&self);

    /// Reset the pose estimate. Issued once at routine start.
    fn set_pose(&self, pose: Pose);

    /// Read the current pose estimate (copy semantics)
    fn pose(&self) -> Pose;

    /// Drive to a field point, blocking until settled or timeout
    fn move_to_point(&self, target: Point, timeout: Duration, params: MoveParams) -> SettleOutcome;

    /// Drive to a field pose (position + final heading), blocking
    fn move_to_pose(&self, target: Pose, timeout: Duration, params: MoveParams) -> SettleOutcome;

    /// Turn in place to a heading (degrees), blocking
    fn turn_to_heading(&self, heading: f32, timeout: Duration, params: TurnParams) -> SettleOutcome;

    /// Turn in place to face a field point, blocking
    fn turn_to_point(&self, target: Point, timeout: Duration, params: TurnParams) -> SettleOutcome;
}
