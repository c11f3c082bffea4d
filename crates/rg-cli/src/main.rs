//! roomgrid: generate a room layout from the command line
//!
//! Prints a short summary by default, or the full layout as JSON.

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use log::{error, info};

use rg_core::layout::{RoomEntity, RoomSpawner, StepResult};
use rg_core::{CenterBypass, GenerationScheduler, Layout, LayoutConfig, LayoutRng};

/// Procedural room layout generator
#[derive(Parser, Debug)]
#[command(name = "roomgrid")]
#[command(author, version, about = "Grow a grid of connected rooms", long_about = None)]
struct Args {
    /// RNG seed (random if omitted)
    #[arg(short = 's', long = "seed")]
    seed: Option<u64>,

    /// JSON config file; command line options override its values
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Grid width in cells
    #[arg(long = "grid-x")]
    grid_x: Option<u32>,

    /// Grid height in cells
    #[arg(long = "grid-y")]
    grid_y: Option<u32>,

    /// Minimum rooms for a layout to be accepted
    #[arg(long = "min-rooms")]
    min_rooms: Option<u32>,

    /// Maximum rooms to place
    #[arg(long = "max-rooms")]
    max_rooms: Option<u32>,

    /// Smallest room scale
    #[arg(long = "min-scale")]
    min_scale: Option<f32>,

    /// Largest room scale
    #[arg(long = "max-scale")]
    max_scale: Option<f32>,

    /// Maximum random elements per room
    #[arg(long = "max-elements")]
    max_elements: Option<u32>,

    /// Generation attempts before giving up on the minimum
    #[arg(long = "max-attempts")]
    max_attempts: Option<u32>,

    /// Exempt (0, 0) from the placement coin flip instead of the seed cell
    #[arg(long = "legacy-bypass")]
    legacy_bypass: bool,

    /// Print the layout as JSON
    #[arg(long = "json")]
    json: bool,

    /// Print every scheduler step
    #[arg(long = "trace")]
    trace: bool,

    /// Verbose logging
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,
}

impl Args {
    fn layout_config(&self) -> Result<LayoutConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let text = fs::read_to_string(path)
                    .with_context(|| format!("reading config {}", path.display()))?;
                LayoutConfig::from_json(&text)?
            }
            None => LayoutConfig::default(),
        };

        if let Some(x) = self.grid_x {
            config.grid_size_x = x;
        }
        if let Some(y) = self.grid_y {
            config.grid_size_y = y;
        }
        if let Some(min) = self.min_rooms {
            config.min_rooms = min;
        }
        if let Some(max) = self.max_rooms {
            config.max_rooms = max;
        }
        if let Some(min) = self.min_scale {
            config.min_room_scale = min;
        }
        if let Some(max) = self.max_scale {
            config.max_room_scale = max;
        }
        if let Some(n) = self.max_elements {
            config.max_random_elements = n;
        }
        if let Some(n) = self.max_attempts {
            config.max_attempts = n;
        }
        if self.legacy_bypass {
            config.center_bypass = CenterBypass::ZeroIndex;
        }
        Ok(config)
    }
}

/// Spawner that logs what a renderer would create
struct LogSpawner;

impl RoomSpawner for LogSpawner {
    type Handle = String;

    fn spawn_room(&mut self, room: &RoomEntity) -> String {
        info!(
            "{} at {} pos=({:.0}, {:.0}) scale={:.2} doors={:?}",
            room.name(),
            room.index(),
            room.position().x,
            room.position().y,
            room.scale().unwrap_or(1.0),
            room.open_doors().collect::<Vec<_>>()
        );
        room.name().to_string()
    }

    fn spawn_element(&mut self, parent: &String, element: &rg_core::layout::ElementPlacement) {
        info!(
            "  {parent}: {} at ({:.1}, {:.1})",
            element.kind, element.position.x, element.position.y
        );
    }
}

fn print_summary(layout: &Layout) {
    println!("seed:       {}", layout.seed());
    println!("attempts:   {}", layout.attempts());
    println!("rooms:      {}", layout.room_count());
    println!("door pairs: {}", layout.door_pairs().len());
    println!("elements:   {}", layout.element_count());
}

fn run(args: &Args) -> Result<()> {
    let config = args.layout_config()?;
    let rng = args.seed.map(LayoutRng::new).unwrap_or_else(LayoutRng::from_entropy);
    let scheduler = GenerationScheduler::new(config, rng)?;

    let trace = args.trace;
    let layout = scheduler.run_with_progress(|step| {
        if trace && *step != StepResult::Idle {
            println!("{step:?}");
        }
    })?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&layout)?);
    } else {
        layout.instantiate(&mut LogSpawner);
        print_summary(&layout);
    }
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();

    let level = if args.verbose { "debug" } else { "warn" };
    let _ = env_logger::Builder::from_env(
        env_logger::Env::default()
            .filter_or("ROOMGRID_LOG", level)
            .write_style_or("ROOMGRID_LOG_STYLE", "auto"),
    )
    .try_init();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err:#}");
            eprintln!("roomgrid: {err:#}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_apply() {
        let args = Args::parse_from([
            "roomgrid",
            "--grid-x",
            "6",
            "--min-rooms",
            "2",
            "--max-rooms",
            "4",
            "--legacy-bypass",
        ]);
        let config = args.layout_config().unwrap();
        assert_eq!(config.grid_size_x, 6);
        assert_eq!(config.grid_size_y, 10);
        assert_eq!(config.min_rooms, 2);
        assert_eq!(config.max_rooms, 4);
        assert_eq!(config.center_bypass, CenterBypass::ZeroIndex);
    }

    #[test]
    fn test_run_with_seed() {
        let args = Args::parse_from(["roomgrid", "--seed", "17", "--min-rooms", "1"]);
        assert!(run(&args).is_ok());
    }

    #[test]
    fn test_unreachable_minimum_fails() {
        let args = Args::parse_from([
            "roomgrid",
            "--seed",
            "1",
            "--min-rooms",
            "3",
            "--max-rooms",
            "1",
            "--max-attempts",
            "2",
        ]);
        let err = run(&args).unwrap_err();
        assert!(err.to_string().contains("retry budget"));
    }
}
