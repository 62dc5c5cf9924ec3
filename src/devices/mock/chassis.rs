//! Simulated chassis with background pose integration

use crate::chassis::{Chassis, MoveParams, SettleOutcome, TurnParams, SPEED_MAX};
use crate::config::SimConfig;
use crate::pose::{heading_error, normalize_heading, Point, Pose};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

/// Active motion target for the integration thread
#[derive(Debug, Clone, Copy)]
enum SimTarget {
    Point {
        target: Point,
        speed: f32,
        forwards: bool,
    },
    PoseTarget {
        target: Pose,
        speed: f32,
        forwards: bool,
    },
    Heading {
        heading: f32,
        speed: f32,
    },
    Face {
        target: Point,
        speed: f32,
    },
}

#[derive(Debug)]
struct SimState {
    pose: Pose,
    target: Option<SimTarget>,
}

/// Hardware-free chassis collaborator
///
/// A background thread integrates pose toward the active target every tick,
/// independent of the foreground thread's progress — blocking motion calls
/// poll that shared pose for their settle condition, so pose estimation keeps
/// running for the whole duration of a blocking call.
///
/// Settle policy: the pose must hold inside the settle range for the
/// configured dwell, else the hard timeout ends the call. `min_speed` is
/// accepted but the simulation only honors `max_speed` and
/// `early_exit_range`.
pub struct SimChassis {
    state: Arc<Mutex<SimState>>,
    config: SimConfig,
    stop: Arc<AtomicBool>,
    tracker: Mutex<Option<thread::JoinHandle<()>>>,
}

impl SimChassis {
    /// Create a simulated chassis and start its pose-integration thread
    pub fn new(config: &SimConfig) -> Self {
        let state = Arc::new(Mutex::new(SimState {
            pose: Pose::new(0.0, 0.0, 0.0),
            target: None,
        }));
        let stop = Arc::new(AtomicBool::new(false));

        let tracker = {
            let state = Arc::clone(&state);
            let stop = Arc::clone(&stop);
            let config = config.clone();
            thread::spawn(move || {
                let tick = Duration::from_millis(config.tick_ms);
                let mut last = Instant::now();
                while !stop.load(Ordering::Relaxed) {
                    thread::sleep(tick);
                    let now = Instant::now();
                    let dt = (now - last).as_secs_f32();
                    last = now;
                    integrate(&mut state.lock(), &config, dt);
                }
            })
        };

        Self {
            state,
            config: config.clone(),
            stop,
            tracker: Mutex::new(Some(tracker)),
        }
    }

    /// Install a target and block until it settles or the timeout elapses
    fn block_on_target(
        &self,
        target: SimTarget,
        timeout: Duration,
        in_range: impl Fn(&Pose) -> bool,
    ) -> SettleOutcome {
        self.state.lock().target = Some(target);

        let start = Instant::now();
        let tick = Duration::from_millis(self.config.tick_ms);
        let dwell = Duration::from_millis(self.config.settle_dwell_ms);
        let mut in_range_since: Option<Instant> = None;

        let outcome = loop {
            let pose = self.pose();
            if in_range(&pose) {
                let since = *in_range_since.get_or_insert_with(Instant::now);
                if since.elapsed() >= dwell {
                    break SettleOutcome::Settled;
                }
            } else {
                in_range_since = None;
            }

            if start.elapsed() >= timeout {
                break SettleOutcome::TimedOut;
            }
            thread::sleep(tick);
        };

        self.state.lock().target = None;
        outcome
    }

    fn lateral_range(&self, params: &MoveParams) -> f32 {
        self.config.settle_range.max(params.early_exit_range)
    }

    fn angular_range(&self, params: &TurnParams) -> f32 {
        self.config.settle_range_deg.max(params.early_exit_range)
    }
}

impl Chassis for SimChassis {
    fn calibrate(&self) {
        log::info!("SimChassis: calibrating");
        thread::sleep(Duration::from_millis(self.config.tick_ms * 2));
    }

    fn set_pose(&self, pose: Pose) {
        log::debug!(
            "SimChassis: pose reset to ({:.2}, {:.2}, {:.1}°)",
            pose.x,
            pose.y,
            pose.heading
        );
        self.state.lock().pose = pose;
    }

    fn pose(&self) -> Pose {
        self.state.lock().pose
    }

    fn move_to_point(&self, target: Point, timeout: Duration, params: MoveParams) -> SettleOutcome {
        let range = self.lateral_range(&params);
        self.block_on_target(
            SimTarget::Point {
                target,
                speed: params.max_speed,
                forwards: params.forwards,
            },
            timeout,
            move |pose| pose.distance_to(target) <= range,
        )
    }

    fn move_to_pose(&self, target: Pose, timeout: Duration, params: MoveParams) -> SettleOutcome {
        let range = self.lateral_range(&params);
        let range_deg = self.config.settle_range_deg;
        self.block_on_target(
            SimTarget::PoseTarget {
                target,
                speed: params.max_speed,
                forwards: params.forwards,
            },
            timeout,
            move |pose| {
                pose.distance_to(target.point()) <= range
                    && heading_error(pose.heading, target.heading).abs() <= range_deg
            },
        )
    }

    fn turn_to_heading(&self, heading: f32, timeout: Duration, params: TurnParams) -> SettleOutcome {
        let range_deg = self.angular_range(&params);
        let heading = normalize_heading(heading);
        self.block_on_target(
            SimTarget::Heading {
                heading,
                speed: params.max_speed,
            },
            timeout,
            move |pose| heading_error(pose.heading, heading).abs() <= range_deg,
        )
    }

    fn turn_to_point(&self, target: Point, timeout: Duration, params: TurnParams) -> SettleOutcome {
        let range_deg = self.angular_range(&params);
        // Bearing is recomputed each tick as the pose changes; the settle
        // check compares against the live bearing as well
        self.block_on_target(
            SimTarget::Face {
                target,
                speed: params.max_speed,
            },
            timeout,
            move |pose| heading_error(pose.heading, pose.heading_to(target)).abs() <= range_deg,
        )
    }
}

impl Drop for SimChassis {
    fn drop(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        if let Some(handle) = self.tracker.lock().take() {
            let _ = handle.join();
        }
    }
}

/// Advance the pose one tick toward the active target
fn integrate(state: &mut SimState, config: &SimConfig, dt: f32) {
    let Some(target) = state.target else {
        return;
    };

    match target {
        SimTarget::Point {
            target,
            speed,
            forwards,
        } => {
            drive_toward(&mut state.pose, target, speed, forwards, config, dt);
        }
        SimTarget::PoseTarget {
            target,
            speed,
            forwards,
        } => {
            let point = target.point();
            if state.pose.distance_to(point) > config.settle_range * 0.5 {
                drive_toward(&mut state.pose, point, speed, forwards, config, dt);
            } else {
                turn_toward(&mut state.pose, target.heading, speed, config, dt);
            }
        }
        SimTarget::Heading { heading, speed } => {
            turn_toward(&mut state.pose, heading, speed, config, dt);
        }
        SimTarget::Face { target, speed } => {
            // Turn in place toward the live bearing, no translation
            let bearing = state.pose.heading_to(target);
            turn_toward(&mut state.pose, bearing, speed, config, dt);
        }
    }
}

fn speed_fraction(speed: f32) -> f32 {
    (speed.abs() / SPEED_MAX).clamp(0.0, 1.0)
}

fn drive_toward(
    pose: &mut Pose,
    target: Point,
    speed: f32,
    forwards: bool,
    config: &SimConfig,
    dt: f32,
) {
    let distance = pose.distance_to(target);
    if distance < 1e-4 {
        return;
    }

    // Face the travel direction (reversed when driving backwards)
    let mut bearing = pose.heading_to(target);
    if !forwards {
        bearing = normalize_heading(bearing + 180.0);
    }
    turn_toward(pose, bearing, speed, config, dt);

    let step = (config.linear_speed * speed_fraction(speed) * dt).min(distance);
    pose.x += (target.x - pose.x) / distance * step;
    pose.y += (target.y - pose.y) / distance * step;
}

fn turn_toward(pose: &mut Pose, heading: f32, speed: f32, config: &SimConfig, dt: f32) {
    let error = heading_error(pose.heading, heading);
    let step = config.angular_speed * speed_fraction(speed) * dt;
    if error.abs() <= step {
        pose.heading = normalize_heading(heading);
    } else {
        pose.heading = normalize_heading(pose.heading + step * error.signum());
    }
}
