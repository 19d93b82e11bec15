//! deskwatch CLI
//!
//! Usage:
//!   deskwatch                                     # Apply new_input.json to log.json
//!   deskwatch --convert input/score_output.json   # score output → new_input.json
//!   deskwatch --detect desk.jpg --detector-cmd ./detect.sh
//!   deskwatch --show                              # Print current log
//!   deskwatch --serve                             # HTTP API server

use clap::Parser;
use colored::Colorize;
use std::path::PathBuf;
use std::process::ExitCode;

use deskwatch::core::{
    convert_file, run_pipeline, run_server, update_log, CommandDetector, JsonFileStore, LogStore,
};
use deskwatch::types::{ClutterLevel, LogState, Score, UpdateOutcome};
use deskwatch::{DeskConfig, DeskResult, VERSION};

#[derive(Parser, Debug)]
#[command(
    name = "deskwatch",
    version = VERSION,
    about = "Desk clutter monitor - keep an orientation-consistent rolling log of detection snapshots",
    long_about = "deskwatch folds detection snapshots into a persisted log.\n\n\
                  Each snapshot is checked against the stored timestamp, rotated\n\
                  into the landscape frame if it was captured in portrait, and\n\
                  appended to a bounded history.\n\n\
                  Modes:\n  \
                  (default)   Apply the newest snapshot once\n  \
                  --convert   Turn detector score output into a snapshot\n  \
                  --detect    Run detector → score → convert → update\n  \
                  --show      Print the current log\n  \
                  --serve     HTTP API server"
)]
struct Args {
    /// Snapshot document to apply
    #[arg(long)]
    input: Option<PathBuf>,

    /// Persisted log document
    #[arg(long)]
    log: Option<PathBuf>,

    /// History entries to keep
    #[arg(long)]
    max_history: Option<usize>,

    /// Score output path (written by --detect, read by default by --convert)
    #[arg(long)]
    score_output: Option<PathBuf>,

    /// Convert a score output file into the snapshot document
    #[arg(long, value_name = "SCORE_OUTPUT")]
    convert: Option<Option<PathBuf>>,

    /// Run the full pipeline on an image
    #[arg(long, value_name = "IMAGE", requires = "detector_cmd")]
    detect: Option<PathBuf>,

    /// Detector program; called as `<cmd> [args..] <image>`, prints JSON detections
    #[arg(long)]
    detector_cmd: Option<PathBuf>,

    /// Extra detector argument (repeatable)
    #[arg(long = "detector-arg", allow_hyphen_values = true)]
    detector_args: Vec<String>,

    /// Print the current log
    #[arg(long)]
    show: bool,

    /// Run as HTTP API server
    #[arg(short, long)]
    serve: bool,

    /// Server address
    #[arg(long)]
    addr: Option<String>,

    /// Ignore detections below this confidence (0-1)
    #[arg(long)]
    min_confidence: Option<f64>,

    /// Output as JSON
    #[arg(long)]
    json: bool,

    /// Disable colors in output
    #[arg(long)]
    no_color: bool,
}

impl Args {
    /// Config file + env, then command-line overrides
    fn config(&self) -> DeskResult<DeskConfig> {
        let mut cfg = DeskConfig::load()?;
        if let Some(input) = &self.input {
            cfg.input_path = input.clone();
        }
        if let Some(log) = &self.log {
            cfg.log_path = log.clone();
        }
        if let Some(max) = self.max_history {
            cfg.max_history = max;
        }
        if let Some(path) = &self.score_output {
            cfg.score_output_path = path.clone();
        }
        if let Some(addr) = &self.addr {
            cfg.api_addr = addr.clone();
        }
        if let Some(conf) = self.min_confidence {
            cfg.min_confidence = conf;
        }
        cfg.validate()?;
        Ok(cfg)
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    if args.no_color {
        colored::control::set_override(false);
    }

    match run(&args).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

async fn run(args: &Args) -> DeskResult<ExitCode> {
    let config = args.config()?;

    if args.serve {
        run_server(config).await?;
        return Ok(ExitCode::SUCCESS);
    }

    if args.show {
        print_log(JsonFileStore::new(&config.log_path).load()?, args.json)?;
        return Ok(ExitCode::SUCCESS);
    }

    if let Some(score_path) = &args.convert {
        let source = score_path
            .clone()
            .unwrap_or_else(|| config.score_output_path.clone());
        let snapshot = convert_file(&source, &config.input_path)?;
        if args.json {
            println!("{}", serde_json::to_string_pretty(&snapshot)?);
        } else {
            println!(
                "{} {} → {}",
                "Converted".green(),
                source.display(),
                config.input_path.display()
            );
        }
        return Ok(ExitCode::SUCCESS);
    }

    let outcome = match (&args.detect, &args.detector_cmd) {
        (Some(image), Some(cmd)) => {
            let mut detector = CommandDetector::new(cmd).with_args(args.detector_args.iter().cloned());
            run_pipeline(&mut detector, image, &config)?
        }
        _ => update_log(&config),
    };

    print_outcome(&outcome, args.json)?;
    Ok(if outcome.reason.is_benign() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn print_outcome(outcome: &UpdateOutcome, json: bool) -> DeskResult<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(outcome)?);
        return Ok(());
    }

    let code = outcome.reason.code();
    if outcome.accepted {
        println!("{} [{}] {}", "✓".green(), code, outcome.message);
        if let Some(state) = &outcome.state {
            print_summary(state);
        }
    } else if outcome.reason.is_benign() {
        println!("{} [{}] {}", "·".dimmed(), code, outcome.message.dimmed());
    } else {
        println!("{} [{}] {}", "✗".red(), code, outcome.message.red());
    }
    Ok(())
}

fn print_log(state: Option<LogState>, json: bool) -> DeskResult<()> {
    let Some(state) = state else {
        println!("{}", "No log yet".dimmed());
        return Ok(());
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&state)?);
        return Ok(());
    }

    print_summary(&state);
    if !state.history.is_empty() {
        println!("  history:");
        for entry in &state.history {
            println!("    {}  {:>5.1}", entry.timestamp, entry.score.as_f64());
        }
    }
    Ok(())
}

fn print_summary(state: &LogState) {
    let score = state.score.as_ref().map(Score::as_f64).unwrap_or_default();
    let level = ClutterLevel::from_score(score.round().clamp(0.0, 100.0) as u32);
    let colored_level = match level {
        ClutterLevel::Tidy | ClutterLevel::Organized => level.to_string().green(),
        ClutterLevel::SlightlyCluttered => level.to_string().yellow(),
        ClutterLevel::Cluttered | ClutterLevel::VeryCluttered => level.to_string().red(),
    };

    println!(
        "  {} score={:.1} {} | {}x{} | {} objects",
        state.timestamp.as_deref().unwrap_or("-"),
        score,
        colored_level,
        state.image_width.unwrap_or_default(),
        state.image_height.unwrap_or_default(),
        state.objects.len()
    );
    println!("  {}", level.message().dimmed());
}
