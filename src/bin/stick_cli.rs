use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use stick_pilot::calibration::{CalibrationEvent, CalibrationStep};
use stick_pilot::config::AppConfig;
use stick_pilot::fixtures::{self, FixtureCatalog};
use stick_pilot::sensor::{SensorSource, SimulatedStick, StickSample};
use stick_pilot::session::{Session, SessionOutput};
use stick_pilot::Reading;

#[derive(Parser, Debug)]
#[command(
    name = "stick_cli",
    about = "Joystick calibration and direction monitor harness"
)]
struct Cli {
    /// Override directory containing fixture scripts (defaults to fixtures/)
    #[arg(long)]
    fixtures_dir: Option<PathBuf>,
    /// Optional JSON config file (defaults used when absent)
    #[arg(long)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Replay a fixture script and optionally verify expected readings
    Replay {
        #[arg(long)]
        fixture: String,
        /// Write the reading report to a file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Run a simulated operator through calibration, then stream readings
    Simulate {
        #[arg(long, default_value_t = 42)]
        seed: u64,
        /// Readings to print after calibration completes
        #[arg(long, default_value_t = 40)]
        readings: u32,
        /// Skip the tick sleep (useful for tests/CI)
        #[arg(long)]
        no_sleep: bool,
    },
    /// List available fixture scripts on disk
    DumpFixtures,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt::init();
    tracing::debug!("stick_cli starting");

    match run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {err:?}");
            ExitCode::from(1)
        }
    }
}

fn run() -> Result<ExitCode> {
    let cli = Cli::parse();
    let config = cli
        .config
        .map(AppConfig::load_from_file)
        .unwrap_or_default();
    let catalog = cli
        .fixtures_dir
        .map(FixtureCatalog::new)
        .unwrap_or_default();

    match cli.command {
        Commands::Replay { fixture, output } => run_replay(&catalog, &config, &fixture, output),
        Commands::Simulate {
            seed,
            readings,
            no_sleep,
        } => run_simulate(&config, seed, readings, no_sleep),
        Commands::DumpFixtures => run_dump(&catalog),
    }
}

fn run_replay(
    catalog: &FixtureCatalog,
    config: &AppConfig,
    fixture: &str,
    output_path: Option<PathBuf>,
) -> Result<ExitCode> {
    let script = catalog.load(fixture)?;
    let outcome = fixtures::run_script(&script, config);

    let report = serde_json::json!({
        "fixture": script.name,
        "reading_count": outcome.readings.len(),
        "readings": outcome.readings,
    });
    let json = serde_json::to_string_pretty(&report)?;
    if let Some(path) = output_path {
        fs::write(&path, json).with_context(|| format!("writing {}", path.display()))?;
    } else {
        println!("{json}");
    }

    if let Some(expectations) = &script.expectations {
        if let Err(diff) = fixtures::verify(expectations, &outcome.readings) {
            eprintln!("{}", serde_json::to_string_pretty(&diff.to_json())?);
            return Ok(ExitCode::from(2));
        }
    }
    Ok(ExitCode::from(0))
}

fn run_simulate(config: &AppConfig, seed: u64, readings: u32, no_sleep: bool) -> Result<ExitCode> {
    let mut sensor = SimulatedStick::new(seed);
    let mut session = Session::new(config.calibration.clone());
    let mut last_button_released = true;
    let mut printed = 0u32;

    println!("Joystick monitor (simulated stick, seed {seed})");
    println!("Guided calibration starting...");
    println!("{}", "-".repeat(50));

    while printed < readings {
        let sample = sensor.sample();
        let button_released = sensor.read_button();

        match session.tick(sample, button_released) {
            SessionOutput::Calibrating(event) => render_event(&event),
            SessionOutput::Reading(reading) => {
                render_reading(&reading, sample);
                announce_button_change(last_button_released, button_released);
                printed += 1;
            }
        }
        last_button_released = button_released;

        if !no_sleep {
            let ms = if session.is_calibrated() {
                config.session.run_tick_ms
            } else {
                config.session.calibration_tick_ms
            };
            thread::sleep(Duration::from_millis(ms));
        }
    }
    Ok(ExitCode::from(0))
}

fn run_dump(catalog: &FixtureCatalog) -> Result<ExitCode> {
    let fixtures = catalog.discover()?;
    if fixtures.is_empty() {
        println!("No fixtures found under {}", catalog.root().display());
        return Ok(ExitCode::from(0));
    }

    for name in fixtures {
        println!("{name}");
    }
    Ok(ExitCode::from(0))
}

fn render_event(event: &CalibrationEvent) {
    match event {
        CalibrationEvent::Idle => {}
        CalibrationEvent::Prompt { step } => {
            println!(
                "\nStep {}/{}: {}",
                step.index() + 1,
                CalibrationStep::COUNT,
                step.instruction()
            );
            println!("Press the button to START capturing...");
        }
        CalibrationEvent::CaptureStarted { .. } => {
            println!("Capturing... hold the position.");
            println!("Press again to FINISH this step.");
        }
        CalibrationEvent::SampleRecorded {
            samples, sample, ..
        } => {
            println!("sample {}: X={}, Y={}", samples, sample.x, sample.y);
        }
        CalibrationEvent::StepCompleted { step, .. } => {
            println!("{} position recorded.", step.display_name());
        }
        CalibrationEvent::Finished { calibration } => {
            println!("\nCalibration finished!");
            println!(
                "Center: X={}, Y={}",
                calibration.center.0, calibration.center.1
            );
            println!(
                "Ranges: X[{}-{}], Y[{}-{}]",
                calibration.min.0, calibration.max.0, calibration.min.1, calibration.max.1
            );
            println!(
                "Dead zone: X={:.0}, Y={:.0}",
                calibration.dead_zone.0, calibration.dead_zone.1
            );
            println!("Now move the joystick in every direction...");
            println!("{}", "-".repeat(60));
        }
        CalibrationEvent::Done => {}
    }
}

fn render_reading(reading: &Reading, sample: StickSample) {
    println!(
        "X: {:+4}% ({:5}) | Y: {:+4}% ({:5}) | Direction: {:8} | Button: {}",
        reading.x_percent,
        sample.x,
        reading.y_percent,
        sample.y,
        reading.direction.display_name(),
        if reading.button_pressed {
            "PRESSED"
        } else {
            "RELEASED"
        }
    );
}

fn announce_button_change(last_released: bool, released: bool) {
    if last_released != released {
        if released {
            println!("*** BUTTON RELEASED ***");
        } else {
            println!("*** BUTTON PRESSED ***");
        }
    }
}
