//! modal - modal interchange analyzer for chord progressions
//!
//! Subcommands:
//! - `modal analyze <CHORDS>...` - Detect the mode and print borrowed chords
//! - `modal demo` - Analyze the showcase progressions
//! - `modal modes` - Show the mode table
//! - `modal config` - Show the effective configuration
//! - `modal completions <SHELL>` - Generate shell completions

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use modal_analysis::{AnalysisError, ModalEngine};
use modalconf::{ModalConfig, OutputFormat};
use std::path::PathBuf;
use tracing::debug;

mod render;

use render::Renderer;

/// Progressions analyzed by `modal demo`, with their tonic hints.
const DEMO_PROGRESSIONS: &[(&[&str], Option<&str>)] = &[
    (&["Cm", "D°", "Eb"], None),
    (&["Cm", "D#", "G#", "A#"], Some("A#")),
    (&["D", "C", "G", "Am"], Some("C")),
];

#[derive(Parser)]
#[command(name = "modal")]
#[command(about = "Mode detection and modal interchange for chord progressions")]
#[command(version)]
struct Cli {
    /// Config file (replaces ./modal.toml)
    #[arg(long, global = true, env = "MODAL_CONFIG")]
    config: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Detect the mode of a progression and list substitutions
    Analyze {
        /// Chord names, e.g. `Dm7 G7 Cmaj7` or `"Cm, D°, Eb"`
        #[arg(required = true)]
        chords: Vec<String>,

        /// Tonic to prefer when several keys fit
        #[arg(short, long)]
        tonic: Option<String>,

        /// Output format: table or json
        #[arg(short, long)]
        format: Option<OutputFormat>,

        /// Column width for chord lists
        #[arg(short, long)]
        width: Option<usize>,

        /// Also list the top N candidate keys
        #[arg(long)]
        candidates: Option<usize>,
    },

    /// Analyze the built-in showcase progressions
    Demo,

    /// Show intervals and diatonic chords of every mode
    Modes,

    /// Show the effective configuration and where it came from
    Config,

    /// Generate shell completions
    Completions {
        shell: Shell,
    },
}

/// Display settings after merging config and flags.
struct Settings {
    format: OutputFormat,
    width: usize,
    color: bool,
    candidates: usize,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let (config, sources) = ModalConfig::load_with_sources_from(cli.config.as_deref())
        .context("Failed to load configuration")?;

    init_tracing(&config.logging.log_level);
    debug!(files = ?sources.files, env = ?sources.env_overrides, "configuration loaded");

    let settings = Settings {
        format: config.display.format,
        width: config.display.column_width,
        color: config.display.color && !cli.no_color,
        candidates: config.display.candidates,
    };

    match cli.command {
        Commands::Analyze {
            chords,
            tonic,
            format,
            width,
            candidates,
        } => {
            let settings = Settings {
                format: format.unwrap_or(settings.format),
                width: width.unwrap_or(settings.width),
                candidates: candidates.unwrap_or(settings.candidates),
                ..settings
            };
            let chords = split_chords(&chords);
            analyze(&chords, tonic.as_deref(), &settings)?;
        }
        Commands::Demo => {
            for (i, &(chords, tonic)) in DEMO_PROGRESSIONS.iter().enumerate() {
                if i > 0 {
                    println!();
                }
                analyze(chords, tonic, &settings)?;
            }
        }
        Commands::Modes => {
            print!("{}", Renderer::new(settings.width, settings.color).modes()?);
        }
        Commands::Config => {
            for file in &sources.files {
                println!("# Loaded from: {}", file.display());
            }
            for var in &sources.env_overrides {
                println!("# Overridden by: {}", var);
            }
            print!("{}", config.to_toml());
        }
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "modal", &mut std::io::stdout());
        }
    }

    Ok(())
}

/// Logs go to stderr so JSON on stdout stays parseable.
fn init_tracing(log_level: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(log_level))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Accept chords as separate arguments or as one comma/space separated list.
fn split_chords(args: &[String]) -> Vec<String> {
    args.iter()
        .flat_map(|arg| arg.split(|c: char| c == ',' || c.is_whitespace()))
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn analyze<S: AsRef<str>>(chords: &[S], tonic: Option<&str>, settings: &Settings) -> Result<()> {
    let engine = ModalEngine::new();
    let renderer = Renderer::new(settings.width, settings.color);

    let analysis = match engine.analyze(chords, tonic) {
        Ok(analysis) => analysis,
        Err(AnalysisError::ProgressionTooShort { len }) => {
            eprintln!(
                "{} The progression is empty or too short ({} chord(s)).",
                renderer.warning("Warning:"),
                len
            );
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    let ranked = if settings.candidates > 0 {
        engine.rank(chords)?
    } else {
        Vec::new()
    };

    match settings.format {
        OutputFormat::Json => {
            let json = if settings.candidates > 0 {
                let top: Vec<_> = ranked.iter().take(settings.candidates).collect();
                serde_json::to_string_pretty(&serde_json::json!({
                    "analysis": analysis,
                    "candidates": top,
                }))
            } else {
                analysis.to_json_pretty()
            }
            .context("Failed to serialize analysis")?;
            println!("{}", json);
        }
        OutputFormat::Table => {
            print!("{}", renderer.feedback(&analysis.feedback));
            print!("{}", renderer.report(&analysis)?);
            if settings.candidates > 0 {
                print!("{}", renderer.candidates(&ranked, settings.candidates)?);
            }
        }
    }

    Ok(())
}
