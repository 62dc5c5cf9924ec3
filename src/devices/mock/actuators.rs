//! Simulated auxiliary actuators and sensors

use crate::chassis::SPEED_MAX;
use crate::devices::{DigitalInput, DigitalOutput, DistanceSensor, Motor};
use parking_lot::Mutex;
use rand::Rng;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy)]
enum MotorMode {
    Idle,
    Absolute { target: f32, speed: f32 },
    Power { power: f32 },
}

#[derive(Debug)]
struct MotorState {
    position: f32,
    mode: MotorMode,
    updated: Instant,
}

/// Simulated position/power motor
///
/// Position is integrated lazily from command timestamps on every read, so
/// no per-motor thread is needed: a gate polling `position()` observes the
/// mechanism slewing toward its target in real time.
pub struct SimMotor {
    units_per_sec: f32,
    state: Mutex<MotorState>,
}

impl SimMotor {
    /// Create a motor that travels `units_per_sec` encoder units per second
    /// at full command
    pub fn new(units_per_sec: f32) -> Self {
        Self {
            units_per_sec,
            state: Mutex::new(MotorState {
                position: 0.0,
                mode: MotorMode::Idle,
                updated: Instant::now(),
            }),
        }
    }

    fn advance(&self, state: &mut MotorState) {
        let now = Instant::now();
        let dt = (now - state.updated).as_secs_f32();
        state.updated = now;

        match state.mode {
            MotorMode::Idle => {}
            MotorMode::Absolute { target, speed } => {
                let step = self.units_per_sec * (speed.abs() / SPEED_MAX).clamp(0.0, 1.0) * dt;
                let error = target - state.position;
                if error.abs() <= step {
                    state.position = target;
                    state.mode = MotorMode::Idle;
                } else {
                    state.position += step * error.signum();
                }
            }
            MotorMode::Power { power } => {
                state.position +=
                    self.units_per_sec * (power / SPEED_MAX).clamp(-1.0, 1.0) * dt;
            }
        }
    }
}

impl Motor for SimMotor {
    fn move_absolute(&self, target: f32, speed: f32) {
        let mut state = self.state.lock();
        self.advance(&mut state);
        state.mode = MotorMode::Absolute { target, speed };
    }

    fn set_power(&self, power: f32) {
        let mut state = self.state.lock();
        self.advance(&mut state);
        state.mode = if power == 0.0 {
            MotorMode::Idle
        } else {
            MotorMode::Power { power }
        };
    }

    fn position(&self) -> f32 {
        let mut state = self.state.lock();
        self.advance(&mut state);
        state.position
    }
}

/// Simulated pneumatic solenoid
pub struct SimSolenoid {
    state: AtomicBool,
}

impl SimSolenoid {
    pub fn new() -> Self {
        Self {
            state: AtomicBool::new(false),
        }
    }

    /// Read back the commanded state (test observation point)
    pub fn is_set(&self) -> bool {
        self.state.load(Ordering::Relaxed)
    }
}

impl Default for SimSolenoid {
    fn default() -> Self {
        Self::new()
    }
}

impl DigitalOutput for SimSolenoid {
    fn set(&self, state: bool) {
        self.state.store(state, Ordering::Relaxed);
    }
}

/// Simulated limit switch
pub struct SimSwitch {
    state: AtomicBool,
}

impl SimSwitch {
    pub fn new(pressed: bool) -> Self {
        Self {
            state: AtomicBool::new(pressed),
        }
    }

    /// Drive the switch from a test or simulation script
    pub fn set_state(&self, pressed: bool) {
        self.state.store(pressed, Ordering::Relaxed);
    }
}

impl DigitalInput for SimSwitch {
    fn state(&self) -> bool {
        self.state.load(Ordering::Relaxed)
    }
}

/// Simulated ranging sensor
///
/// Reads `initial_mm` until `switch_after` elapses, then `later_mm`, with
/// optional uniform jitter on every read.
pub struct SimDistanceSensor {
    initial_mm: f32,
    later_mm: f32,
    switch_after: Option<Duration>,
    jitter_mm: f32,
    created: Instant,
}

impl SimDistanceSensor {
    /// Constant reading
    pub fn fixed(distance_mm: f32, jitter_mm: f32) -> Self {
        Self {
            initial_mm: distance_mm,
            later_mm: distance_mm,
            switch_after: None,
            jitter_mm,
            created: Instant::now(),
        }
    }

    /// Reading that changes once after a delay
    pub fn scripted(initial_mm: f32, later_mm: f32, after: Duration, jitter_mm: f32) -> Self {
        Self {
            initial_mm,
            later_mm,
            switch_after: Some(after),
            jitter_mm,
            created: Instant::now(),
        }
    }
}

impl DistanceSensor for SimDistanceSensor {
    fn distance_mm(&self) -> f32 {
        let base = match self.switch_after {
            Some(after) if self.created.elapsed() >= after => self.later_mm,
            _ => self.initial_mm,
        };
        if self.jitter_mm > 0.0 {
            base + rand::thread_rng().gen_range(-self.jitter_mm..=self.jitter_mm)
        } else {
            base
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_motor_slews_toward_absolute_target() {
        let motor = SimMotor::new(1000.0);
        motor.move_absolute(100.0, SPEED_MAX);

        thread::sleep(Duration::from_millis(20));
        let mid = motor.position();
        assert!(mid > 0.0, "motor should have started moving, at {}", mid);

        thread::sleep(Duration::from_millis(200));
        assert_eq!(motor.position(), 100.0);
    }

    #[test]
    fn test_motor_speed_scales_travel() {
        let motor = SimMotor::new(1000.0);
        // Half command = half rate; far target so it never arrives
        motor.move_absolute(10_000.0, SPEED_MAX / 2.0);

        thread::sleep(Duration::from_millis(100));
        let pos = motor.position();
        assert!(pos > 20.0 && pos < 90.0, "position {} out of range", pos);
    }

    #[test]
    fn test_motor_power_integrates_unbounded() {
        let motor = SimMotor::new(1000.0);
        motor.set_power(-SPEED_MAX);

        thread::sleep(Duration::from_millis(50));
        assert!(motor.position() < -20.0);

        motor.set_power(0.0);
        let stopped = motor.position();
        thread::sleep(Duration::from_millis(30));
        assert_eq!(motor.position(), stopped);
    }

    #[test]
    fn test_solenoid_and_switch_state() {
        let solenoid = SimSolenoid::new();
        assert!(!solenoid.is_set());
        solenoid.set(true);
        assert!(solenoid.is_set());

        let switch = SimSwitch::new(false);
        assert!(!switch.state());
        switch.set_state(true);
        assert!(switch.state());
    }

    #[test]
    fn test_scripted_sensor_flips_after_delay() {
        let sensor =
            SimDistanceSensor::scripted(200.0, 30.0, Duration::from_millis(40), 0.0);
        assert_eq!(sensor.distance_mm(), 200.0);

        thread::sleep(Duration::from_millis(60));
        assert_eq!(sensor.distance_mm(), 30.0);
    }
}
