#[cfg(test)]
#[path = "main_test.rs"]
mod main_test;

mod error;
mod runner;

use std::fs::File;
use std::io::{self, BufRead, BufReader};

use clap::{Args, Parser, Subcommand};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use wheel::consts::DEFAULT_SPIN_DURATION_SECS;
use wheel::driver::WheelDriver;
use wheel::frame::{ManualFrames, VirtualClock};
use wheel::geometry::WheelLayout;
use wheel::random::FixedOffset;
use wheel::roster::Roster;
use wheel::settings::SpinSettings;

use crate::error::CliError;
use crate::runner::{Offsets, SpinReport, TerminalSound, frame_interval_ms, run_realtime, run_virtual};

#[derive(Parser, Debug)]
#[command(name = "spinwheel", about = "Spin a prize wheel from the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Spin the wheel and print each winner.
    Spin(SpinArgs),
    /// Print segment geometry as JSON.
    Layout(EntriesArgs),
}

#[derive(Args, Debug)]
struct EntriesArgs {
    /// Entries to put on the wheel. Defaults to eight sample names.
    names: Vec<String>,

    #[arg(long, help = "Read entries from a file, one per line, or - for stdin")]
    file: Option<String>,

    #[arg(long, default_value_t = false)]
    dedupe: bool,
}

#[derive(Args, Debug)]
struct SpinArgs {
    #[command(flatten)]
    entries: EntriesArgs,

    #[arg(long, env = "WHEEL_SPIN_DURATION_SECS", default_value_t = DEFAULT_SPIN_DURATION_SECS)]
    duration: f64,

    #[arg(long, env = "WHEEL_SOUND", default_value_t = true, action = clap::ArgAction::Set)]
    sound: bool,

    #[arg(long, env = "WHEEL_REMOVE_WINNER", default_value_t = false)]
    remove_winner: bool,

    #[arg(long, help = "Seed for reproducible offsets")]
    seed: Option<u64>,

    #[arg(long, conflicts_with = "seed", help = "Land every spin this many degrees past five full turns")]
    offset: Option<f64>,

    #[arg(long, default_value_t = 1)]
    rounds: usize,

    #[arg(long, default_value_t = 60)]
    fps: u32,

    #[arg(long, default_value_t = false, help = "Animate at wall-clock speed instead of instantly")]
    realtime: bool,

    #[arg(long, default_value_t = false, help = "Print one JSON report per round")]
    json: bool,
}

impl SpinArgs {
    /// Settings from flags and environment, with the duration clamped.
    fn settings(&self) -> SpinSettings {
        SpinSettings { sound_enabled: self.sound, remove_winner: self.remove_winner, ..SpinSettings::default() }
            .with_duration(self.duration)
    }
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt().with_writer(io::stderr).init();

    let cli = Cli::parse();
    match cli.command {
        Command::Spin(args) => run_spin(args).await,
        Command::Layout(args) => run_layout(&args),
    }
}

async fn run_spin(args: SpinArgs) -> Result<(), CliError> {
    let roster = load_roster(&args.entries)?;
    let settings = args.settings();
    let offsets = match (args.offset, args.seed) {
        (Some(offset), _) => Offsets::Fixed(FixedOffset(offset)),
        (None, Some(seed)) => Offsets::Seeded(SmallRng::seed_from_u64(seed)),
        (None, None) => Offsets::Seeded(SmallRng::from_os_rng()),
    };
    let frame_ms = frame_interval_ms(args.fps)?;

    let mut driver = WheelDriver::new(roster, settings, ManualFrames::new(), TerminalSound, offsets)?;
    let mut clock = VirtualClock::starting_at(0.0);
    tracing::info!(entries = driver.roster().len(), duration_secs = driver.settings().duration_secs, "spinning");

    for round in 1..=args.rounds {
        if round > 1 && !driver.roster().can_spin() {
            tracing::warn!(round, "not enough entries left; stopping");
            break;
        }
        let report = if args.realtime {
            run_realtime(&mut driver, frame_ms).await?
        } else {
            run_virtual(&mut driver, &mut clock, frame_ms)?
        };
        print_report(round, &report, args.json)?;
        driver.acknowledge_winner()?;
    }
    Ok(())
}

fn run_layout(args: &EntriesArgs) -> Result<(), CliError> {
    let roster = load_roster(args)?;
    let layout = WheelLayout::build(&roster.display_segments())?;
    println!("{}", serde_json::to_string_pretty(&layout)?);
    Ok(())
}

fn load_roster(args: &EntriesArgs) -> Result<Roster, CliError> {
    let mut lines = args.names.clone();
    if let Some(path) = &args.file {
        lines.extend(read_lines(path)?);
    }

    let mut roster = if lines.is_empty() { Roster::with_defaults() } else { Roster::from_entries(lines).roster };
    if args.dedupe {
        let removed = roster.dedupe();
        tracing::debug!(removed, "deduplicated entries");
    }
    Ok(roster)
}

fn read_lines(path: &str) -> Result<Vec<String>, CliError> {
    let reader: Box<dyn BufRead> =
        if path == "-" { Box::new(BufReader::new(io::stdin())) } else { Box::new(BufReader::new(File::open(path)?)) };
    Ok(reader.lines().collect::<Result<Vec<_>, _>>()?)
}

fn print_report(round: usize, report: &SpinReport, json: bool) -> Result<(), CliError> {
    if json {
        println!("{}", serde_json::to_string(report)?);
    } else {
        println!(
            "round {round}: {} (segment {}) after {} ticks, resting at {:.2}°",
            report.winner, report.index, report.ticks, report.rotation
        );
    }
    Ok(())
}
