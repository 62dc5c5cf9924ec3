//! Background pose telemetry
//!
//! Purely observational: a background thread reads the chassis pose at a
//! fixed cadence and logs it. Has no influence on sequencing.

use crate::chassis::Chassis;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// Telemetry cadence (~50 Hz)
const POLL: Duration = Duration::from_millis(20);

/// Spawn the pose logger; runs until `stop` is set
pub fn spawn(chassis: Arc<dyn Chassis>, stop: Arc<AtomicBool>) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        while !stop.load(Ordering::Relaxed) {
            let pose = chassis.pose();
            log::trace!(
                "Telemetry: x={:.2} y={:.2} heading={:.1}°",
                pose.x,
                pose.y,
                pose.heading
            );
            thread::sleep(POLL);
        }
    })
}
