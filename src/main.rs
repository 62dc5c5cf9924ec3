//! SutraAuton runner - executes a compiled-in routine against the simulated
//! robot
//!
//! Usage:
//! - `sutra-auton <config.toml>` (positional)
//! - `sutra-auton --config <config.toml>` / `-c <config.toml>`
//! - `sutra-auton --routine <name>` (overrides the configured routine)
//!
//! Without a config file, defaults apply.

use std::env;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use sutra_auton::chassis::Chassis;
use sutra_auton::config::AppConfig;
use sutra_auton::devices::mock::{sim_rig, SimChassis};
use sutra_auton::error::{Error, Result};
use sutra_auton::routine::library;
use sutra_auton::sequencer::Sequencer;
use sutra_auton::telemetry;

/// Parse the config path from command line arguments
fn parse_config_path(args: &[String]) -> Option<String> {
    for i in 1..args.len() {
        if (args[i] == "--config" || args[i] == "-c") && i + 1 < args.len() {
            return Some(args[i + 1].clone());
        }
    }
    if args.len() > 1 && !args[1].starts_with('-') {
        return Some(args[1].clone());
    }
    None
}

/// Parse a `--routine <name>` override
fn parse_routine_override(args: &[String]) -> Option<String> {
    args.iter()
        .position(|a| a == "--routine")
        .and_then(|i| args.get(i + 1))
        .cloned()
}

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    let config_path = parse_config_path(&args);
    let config = match &config_path {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::load_or_default("sutra.toml")?,
    };

    // RUST_LOG still wins over the configured level
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.logging.level.as_str()),
    )
    .init();

    log::info!("SutraAuton starting...");
    if let Some(path) = &config_path {
        log::info!("Using config: {}", path);
    }

    let routine_name = parse_routine_override(&args).unwrap_or_else(|| config.routine.name.clone());
    let stage = library::by_name(&routine_name)?;
    log::info!("Selected routine '{}'", stage.name());

    // Explicitly constructed collaborators, injected into the sequencer
    let chassis: Arc<dyn Chassis> = Arc::new(SimChassis::new(&config.simulation));
    let rig = sim_rig(&config.simulation);

    // One-time calibration before any routine runs
    chassis.calibrate();

    // Ctrl-C only stops the process around the routine; a started routine
    // itself always runs to its final entry
    let interrupted = Arc::new(AtomicBool::new(false));
    {
        let interrupted = Arc::clone(&interrupted);
        ctrlc::set_handler(move || {
            log::info!("Received shutdown signal");
            interrupted.store(true, Ordering::Relaxed);
        })
        .map_err(|e| Error::InvalidParameter(format!("Error setting Ctrl-C handler: {}", e)))?;
    }

    let telemetry_stop = Arc::new(AtomicBool::new(false));
    let telemetry_handle = telemetry::spawn(Arc::clone(&chassis), Arc::clone(&telemetry_stop));

    let sequencer = Sequencer::new(Arc::clone(&chassis), rig);
    sequencer.run(&stage);

    telemetry_stop.store(true, Ordering::Relaxed);
    let _ = telemetry_handle.join();

    let pose = chassis.pose();
    log::info!(
        "Routine '{}' finished at ({:.2}, {:.2}, {:.1}°)",
        stage.name(),
        pose.x,
        pose.y,
        pose.heading
    );

    if interrupted.load(Ordering::Relaxed) {
        log::info!("Exiting after shutdown signal");
    }

    Ok(())
}
