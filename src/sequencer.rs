//! Motion sequencer: executes a routine stage to completion
//!
//! Translates each entry of a [`RoutineStage`] into a call against the
//! chassis or rig collaborators, in strict definition order. Timed-out
//! entries are a normal exit path: execution always continues to the next
//! entry, because abandoning the rest of a scored routine is worse than
//! continuing with a possibly-imperfect pose. `run` is infallible — every
//! invalid-configuration case was rejected when the stage was built.

use crate::chassis::{Chassis, SettleOutcome};
use crate::devices::Rig;
use crate::gate::{self, GateOutcome};
use crate::pose::{Point, Pose};
use crate::routine::{Actuation, Entry, GateCondition, GateSpec, MotionStep, RoutineStage};
use std::sync::Arc;
use std::thread;

/// Executes routine stages against injected collaborators
pub struct Sequencer {
    chassis: Arc<dyn Chassis>,
    rig: Rig,
}

impl Sequencer {
    /// Create a sequencer over explicit chassis and rig handles
    pub fn new(chassis: Arc<dyn Chassis>, rig: Rig) -> Self {
        Self { chassis, rig }
    }

    /// Run a stage: reset pose, then execute every entry in order
    ///
    /// Returns only after the last entry completes. No entry is skipped and
    /// no timeout aborts the stage.
    pub fn run(&self, stage: &RoutineStage) {
        log::info!(
            "Sequencer: starting '{}' ({} entries)",
            stage.name(),
            stage.len()
        );
        self.chassis.set_pose(stage.initial_pose());

        let total = stage.len();
        for (index, entry) in stage.entries().iter().enumerate() {
            match entry {
                Entry::Motion(step) => self.run_motion(index, total, step),
                Entry::Gate(spec) => self.run_gate(index, total, spec),
                Entry::Act(act) => self.apply(index, total, act),
                Entry::Wait(duration) => {
                    log::debug!("Sequencer: [{}/{}] wait {:?}", index + 1, total, duration);
                    thread::sleep(*duration);
                }
            }
        }

        let pose = self.chassis.pose();
        log::info!(
            "Sequencer: '{}' complete, final pose ({:.2}, {:.2}, {:.1}°)",
            stage.name(),
            pose.x,
            pose.y,
            pose.heading
        );
    }

    /// Issue one blocking motion call
    ///
    /// Pose-dependent coordinates are resolved against the pose read here,
    /// immediately before the call — never against a definition-time
    /// snapshot.
    fn run_motion(&self, index: usize, total: usize, step: &MotionStep) {
        let pose = self.chassis.pose();
        let timeout = step.timeout();

        let outcome = match step {
            MotionStep::MoveToPoint { x, y, params, .. } => {
                let target = Point::new(x.resolve(pose.x), y.resolve(pose.y));
                log::debug!(
                    "Sequencer: [{}/{}] move_to_point ({:.2}, {:.2}) timeout {:?}",
                    index + 1,
                    total,
                    target.x,
                    target.y,
                    timeout
                );
                self.chassis.move_to_point(target, timeout, *params)
            }
            MotionStep::MoveToPose {
                x,
                y,
                heading,
                params,
                ..
            } => {
                let target = Pose::new(
                    x.resolve(pose.x),
                    y.resolve(pose.y),
                    heading.resolve(pose.heading),
                );
                log::debug!(
                    "Sequencer: [{}/{}] move_to_pose ({:.2}, {:.2}, {:.1}°) timeout {:?}",
                    index + 1,
                    total,
                    target.x,
                    target.y,
                    target.heading,
                    timeout
                );
                self.chassis.move_to_pose(target, timeout, *params)
            }
            MotionStep::TurnToHeading {
                heading, params, ..
            } => {
                let target = heading.resolve(pose.heading);
                log::debug!(
                    "Sequencer: [{}/{}] turn_to_heading {:.1}° timeout {:?}",
                    index + 1,
                    total,
                    target,
                    timeout
                );
                self.chassis.turn_to_heading(target, timeout, *params)
            }
            MotionStep::TurnToPoint { x, y, params, .. } => {
                let target = Point::new(x.resolve(pose.x), y.resolve(pose.y));
                log::debug!(
                    "Sequencer: [{}/{}] turn_to_point ({:.2}, {:.2}) timeout {:?}",
                    index + 1,
                    total,
                    target.x,
                    target.y,
                    timeout
                );
                self.chassis.turn_to_point(target, timeout, *params)
            }
        };

        match outcome {
            SettleOutcome::Settled => {
                log::debug!("Sequencer: [{}/{}] settled", index + 1, total);
            }
            SettleOutcome::TimedOut => {
                // Normal exit path: continue with whatever pose was reached
                log::info!(
                    "Sequencer: [{}/{}] {} timed out after {:?}, continuing",
                    index + 1,
                    total,
                    step.kind(),
                    timeout
                );
            }
        }
    }

    /// Poll one condition gate, proceeding on either outcome
    fn run_gate(&self, index: usize, total: usize, spec: &GateSpec) {
        log::debug!(
            "Sequencer: [{}/{}] gate {:?} (poll {:?}, max {:?})",
            index + 1,
            total,
            spec.condition,
            spec.poll,
            spec.max_wait
        );

        let outcome = match spec.condition {
            GateCondition::DistanceBelow {
                sensor,
                threshold_mm,
            } => {
                let handle = self.rig.distance(sensor);
                gate::wait(
                    || handle.distance_mm() < threshold_mm,
                    spec.poll,
                    spec.max_wait,
                )
            }
            GateCondition::PositionAtLeast { motor, position } => {
                let handle = self.rig.motor(motor);
                gate::wait(|| handle.position() >= position, spec.poll, spec.max_wait)
            }
            GateCondition::DigitalHigh { input } => {
                let handle = self.rig.input(input);
                gate::wait(|| handle.state(), spec.poll, spec.max_wait)
            }
        };

        match outcome {
            GateOutcome::Satisfied => {
                log::debug!("Sequencer: [{}/{}] gate satisfied", index + 1, total);
            }
            GateOutcome::TimedOut => {
                log::info!(
                    "Sequencer: [{}/{}] gate {:?} timed out after {:?}, continuing",
                    index + 1,
                    total,
                    spec.condition,
                    spec.max_wait
                );
            }
        }
    }

    /// Issue one fire-and-forget actuator command
    fn apply(&self, index: usize, total: usize, act: &Actuation) {
        log::debug!("Sequencer: [{}/{}] {:?}", index + 1, total, act);
        match *act {
            Actuation::MotorAbsolute {
                motor,
                position,
                speed,
            } => self.rig.motor(motor).move_absolute(position, speed),
            Actuation::MotorPower { motor, power } => self.rig.motor(motor).set_power(power),
            Actuation::Solenoid { output, state } => self.rig.output(output).set(state),
        }
    }
}
