//! Compiled-in routine library
//!
//! The two match scripts differ only in mirroring and a few tuning
//! constants, so both are produced by one builder over a tuning value
//! rather than duplicated as separate code paths.

use super::{Actuation, Coord, Entry, GateCondition, GateSpec, MotionStep, RoutineStage};
use crate::chassis::{MoveParams, TurnParams, SPEED_MAX};
use crate::devices::{InputRole, MotorRole, OutputRole, SensorRole};
use crate::error::{Error, Result};
use crate::pose::Pose;
use std::time::Duration;

/// Names of every registered routine
pub const NAMES: &[&str] = &["left_wall_stake", "right_wall_stake"];

/// Select a routine by name at routine start
pub fn by_name(name: &str) -> Result<RoutineStage> {
    match name {
        "left_wall_stake" => left_wall_stake(),
        "right_wall_stake" => right_wall_stake(),
        _ => Err(Error::UnknownRoutine(name.to_string())),
    }
}

/// Left-side match routine: alliance stake, mobile goal, two rings, wall
/// stake cycle
pub fn left_wall_stake() -> Result<RoutineStage> {
    wall_stake(
        "left_wall_stake",
        SideTuning {
            mirror: 1.0,
            mogo_approach_speed: 63.0,
            ring_wait: Duration::from_millis(3000),
            check_arm_home: false,
        },
    )
}

/// Right-side variant: mirrored field coordinates, a slightly faster mobile
/// goal approach, and an arm-stow check before parking
pub fn right_wall_stake() -> Result<RoutineStage> {
    wall_stake(
        "right_wall_stake",
        SideTuning {
            mirror: -1.0,
            mogo_approach_speed: 70.0,
            ring_wait: Duration::from_millis(2500),
            check_arm_home: true,
        },
    )
}

/// Per-side tuning for the wall stake script
struct SideTuning {
    /// +1 for the left side, -1 mirrors x coordinates and headings
    mirror: f32,
    /// Max speed while backing onto the mobile goal
    mogo_approach_speed: f32,
    /// Bound on the ring-detect wait at the wall stake
    ring_wait: Duration,
    /// Verify the arm limit switch before the final back-out
    check_arm_home: bool,
}

fn wall_stake(name: &'static str, tuning: SideTuning) -> Result<RoutineStage> {
    let m = tuning.mirror;
    let sec = Duration::from_secs;
    let ms = Duration::from_millis;

    let mut entries = vec![
        // Score the preload on the alliance stake with a short lift pulse
        Entry::Act(Actuation::MotorPower {
            motor: MotorRole::Lift,
            power: SPEED_MAX,
        }),
        Entry::Wait(ms(300)),
        Entry::Motion(MotionStep::MoveToPoint {
            x: Coord::At(0.0),
            y: Coord::At(0.0),
            timeout: sec(1),
            params: MoveParams::default(),
        }),
        Entry::Motion(MotionStep::TurnToHeading {
            heading: Coord::At(m * 90.0),
            timeout: sec(1),
            params: TurnParams::default(),
        }),
        // Back onto the first mobile goal, slow so the clamp seats
        Entry::Motion(MotionStep::MoveToPoint {
            x: Coord::At(m * -26.0),
            y: Coord::Offset(0.0),
            timeout: ms(700),
            params: MoveParams::reverse().with_max_speed(tuning.mogo_approach_speed),
        }),
        Entry::Act(Actuation::Solenoid {
            output: OutputRole::Clamp,
            state: true,
        }),
        Entry::Motion(MotionStep::TurnToHeading {
            heading: Coord::At(0.0),
            timeout: sec(1),
            params: TurnParams::default(),
        }),
        Entry::Act(Actuation::MotorPower {
            motor: MotorRole::Intake,
            power: SPEED_MAX,
        }),
        // First ring, straight ahead
        Entry::Motion(MotionStep::MoveToPoint {
            x: Coord::Offset(0.0),
            y: Coord::At(24.0),
            timeout: sec(1),
            params: MoveParams::default(),
        }),
        Entry::Motion(MotionStep::TurnToHeading {
            heading: Coord::At(m * -45.0),
            timeout: sec(1),
            params: TurnParams::default(),
        }),
        // Second ring, sweeping to a known exit heading
        Entry::Motion(MotionStep::MoveToPose {
            x: Coord::Offset(m * -20.0),
            y: Coord::Offset(48.0),
            heading: Coord::At(0.0),
            timeout: sec(5),
            params: MoveParams::default(),
        }),
        Entry::Motion(MotionStep::MoveToPoint {
            x: Coord::Offset(m * 3.0),
            y: Coord::Offset(-25.0),
            timeout: sec(5),
            params: MoveParams::reverse(),
        }),
        // Line up on the wall stake and raise the arm to its loading notch
        Entry::Motion(MotionStep::TurnToPoint {
            x: Coord::At(m * -72.0),
            y: Coord::At(47.0),
            timeout: sec(3),
            params: TurnParams::default(),
        }),
        Entry::Act(Actuation::MotorAbsolute {
            motor: MotorRole::Arm,
            position: 65.0,
            speed: SPEED_MAX,
        }),
        Entry::Motion(MotionStep::MoveToPoint {
            x: Coord::At(m * -72.0),
            y: Coord::At(47.0),
            timeout: sec(1),
            params: MoveParams::default(),
        }),
        // Wait for the intake to feed a ring into the arm, then score it
        Entry::Gate(GateSpec {
            condition: GateCondition::DistanceBelow {
                sensor: SensorRole::ArmRing,
                threshold_mm: 50.0,
            },
            poll: ms(10),
            max_wait: tuning.ring_wait,
        }),
        Entry::Act(Actuation::MotorAbsolute {
            motor: MotorRole::Arm,
            position: 720.0,
            speed: SPEED_MAX,
        }),
        Entry::Gate(GateSpec {
            condition: GateCondition::PositionAtLeast {
                motor: MotorRole::Arm,
                position: 600.0,
            },
            poll: ms(10),
            max_wait: sec(2),
        }),
        Entry::Act(Actuation::MotorAbsolute {
            motor: MotorRole::Arm,
            position: 0.0,
            speed: SPEED_MAX,
        }),
        Entry::Wait(sec(1)),
    ];

    if tuning.check_arm_home {
        entries.push(Entry::Gate(GateSpec {
            condition: GateCondition::DigitalHigh {
                input: InputRole::ArmHome,
            },
            poll: ms(10),
            max_wait: ms(1500),
        }));
    }

    entries.push(Entry::Motion(MotionStep::MoveToPoint {
        x: Coord::At(m * -36.0),
        y: Coord::At(47.0),
        timeout: sec(1),
        params: MoveParams::reverse(),
    }));

    RoutineStage::new(name, Pose::new(0.0, -12.0, 0.0), entries)
}
