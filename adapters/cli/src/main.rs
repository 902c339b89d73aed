#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter for Forest Siege and the coloring canvas.

mod fill;
mod play;

use std::{
    fs,
    io::{self, BufReader},
    path::{Path, PathBuf},
    process::ExitCode,
};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use forest_siege_core::{MatchConfig, UNIT_TEMPLATES};
use forest_siege_world::{query, World};
use tracing_subscriber::EnvFilter;

/// Turn-based castle skirmish on a 7x7 board, plus a flood-fill painter.
#[derive(Parser, Debug)]
#[command(name = "forest-siege", version, about, long_about = None)]
struct Cli {
    /// Log accepted and rejected commands to stderr.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: CliCommand,
}

#[derive(Subcommand, Debug)]
enum CliCommand {
    /// Play a hot-seat match, reading commands from stdin or a script.
    Play {
        /// TOML file overriding the match configuration.
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// File of commands to run instead of reading stdin.
        #[arg(short, long)]
        script: Option<PathBuf>,
    },

    /// List the unit catalog.
    Units,

    /// Flood-fill a region of a PNG image.
    Fill {
        /// Image to read.
        input: PathBuf,

        /// Where to write the filled image.
        output: PathBuf,

        /// Seed column in pixels.
        #[arg(short, long)]
        x: u32,

        /// Seed row in pixels.
        #[arg(short, long)]
        y: u32,

        /// Palette color name or #RRGGBB.
        #[arg(short, long, default_value = "Mint")]
        color: String,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(command: CliCommand) -> Result<()> {
    match command {
        CliCommand::Play { config, script } => {
            let mut world = load_world(config.as_deref())?;
            println!("{}", query::welcome_banner(&world));
            let mut out = io::stdout().lock();
            match script {
                Some(path) => {
                    let file = fs::File::open(&path)
                        .with_context(|| format!("failed to open script {}", path.display()))?;
                    play::run(&mut world, BufReader::new(file), &mut out)
                }
                None => play::run(&mut world, io::stdin().lock(), &mut out),
            }
        }
        CliCommand::Units => {
            print_units();
            Ok(())
        }
        CliCommand::Fill {
            input,
            output,
            x,
            y,
            color,
        } => {
            let color = coloring_canvas::resolve_color(&color)?;
            let outcome = fill::fill_png(&input, &output, x, y, color)?;
            println!("{}", fill::describe(outcome));
            Ok(())
        }
    }
}

fn load_world(config: Option<&Path>) -> Result<World> {
    let config = match config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("failed to read config {}", path.display()))?;
            toml::from_str::<MatchConfig>(&text)
                .with_context(|| format!("failed to parse config {}", path.display()))?
        }
        None => MatchConfig::default(),
    };
    World::with_config(config).context("invalid match configuration")
}

fn print_units() {
    println!(
        "{:<14}{:>5}{:>5}{:>6}{:>6}  traits",
        "unit", "hp", "atk", "move", "cost"
    );
    for template in &UNIT_TEMPLATES {
        let stats = template.stats;
        let mut traits = Vec::new();
        if stats.airborne {
            traits.push("air");
        }
        if stats.castle_only {
            traits.push("castle-only");
        }
        println!(
            "{:<14}{:>5}{:>5}{:>6}{:>6}  {} {}",
            template.name,
            stats.max_health,
            stats.attack,
            stats.move_range,
            template.cost,
            traits.join(","),
            template.description
        );
    }
}
