//! Optimal-path extractor CLI.
//!
//! Reads a model checker's induced-strategy export and writes the maximum
//! probability path to the goal as a text report.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use extractor::core::goals::GoalSource;
use extractor::core::types::StateId;
use extractor::core::verification::parse_verification_probability;
use extractor::exit_codes;
use extractor::extract::{ExtractionResult, ExtractionSuccess, extract};
use extractor::inspect::inspect;
use extractor::io::artifact_set::ArtifactSet;
use extractor::io::config::{ExtractorConfig, load_config, write_config};
use extractor::io::meta::update_meta;
use extractor::logging;
use serde::Serialize;
use tracing::warn;

#[derive(Parser)]
#[command(
    name = "extractor",
    version,
    about = "Maximum-probability path extraction from strategy exports"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Find the optimal path and write the text report into the output directory.
    Extract {
        #[command(flatten)]
        export: ExportArgs,
        /// Directory receiving the report.
        #[arg(long)]
        out_dir: PathBuf,
        /// Longest path, in transitions, to explore (overrides config).
        #[arg(long)]
        max_steps: Option<usize>,
        /// TOML config file.
        #[arg(long)]
        config: Option<PathBuf>,
        /// Print the structured result as JSON.
        #[arg(long)]
        json: bool,
        /// Record the result under `optimal_path` in `<out-dir>/meta.json`.
        #[arg(long)]
        meta: bool,
        /// Model-checker console output to take the verified probability from.
        #[arg(long, requires = "meta")]
        verification_log: Option<PathBuf>,
    },
    /// Print table sizes, resolved endpoints, and consistency findings.
    Inspect {
        #[command(flatten)]
        export: ExportArgs,
        /// TOML config file.
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Write the default configuration as TOML.
    InitConfig {
        path: PathBuf,
        /// Overwrite an existing file.
        #[arg(short, long)]
        force: bool,
    },
}

/// Which export to read: three explicit files, a manifest, or a run directory.
#[derive(Args, Debug, Default)]
struct ExportArgs {
    /// Induced strategy file (`.tra`).
    #[arg(long, requires_all = ["states", "labels"], conflicts_with_all = ["manifest", "run_dir"])]
    strategy: Option<PathBuf>,
    /// State enumeration file (`.sta`).
    #[arg(long, requires_all = ["strategy", "labels"])]
    states: Option<PathBuf>,
    /// Label file (`.lab`).
    #[arg(long, requires_all = ["strategy", "states"])]
    labels: Option<PathBuf>,
    /// File listing the strategy, state, and label paths, one per line.
    #[arg(long, conflicts_with = "run_dir")]
    manifest: Option<PathBuf>,
    /// Pipeline run directory holding `restricted.*` or `strat.*` files.
    #[arg(long)]
    run_dir: Option<PathBuf>,
}

impl ExportArgs {
    fn resolve(&self) -> Result<ArtifactSet> {
        if let (Some(strategy), Some(states), Some(labels)) =
            (&self.strategy, &self.states, &self.labels)
        {
            return Ok(ArtifactSet::new(strategy, states, labels));
        }
        if let Some(manifest) = &self.manifest {
            return ArtifactSet::from_manifest(manifest);
        }
        if let Some(run_dir) = &self.run_dir {
            return ArtifactSet::discover(run_dir);
        }
        bail!("specify --strategy/--states/--labels, --manifest, or --run-dir")
    }
}

/// Entry recorded in `meta.json` after a successful extraction.
#[derive(Debug, Serialize)]
struct PathMeta<'a> {
    num_steps: usize,
    optimal_path_probability: f64,
    optimal_path_probability_description: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    verification_probability: Option<f64>,
    initial_state: StateId,
    final_state: StateId,
    files: MetaFiles<'a>,
}

#[derive(Debug, Serialize)]
struct MetaFiles<'a> {
    txt: &'a Path,
}

fn main() {
    logging::init();
    match run() {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("{:#}", err);
            std::process::exit(exit_codes::INVALID);
        }
    }
}

fn run() -> Result<i32> {
    let cli = Cli::parse();
    match cli.command {
        Command::Extract {
            export,
            out_dir,
            max_steps,
            config,
            json,
            meta,
            verification_log,
        } => {
            let mut cfg = resolve_config(config.as_deref())?;
            if let Some(max_steps) = max_steps {
                cfg.search.max_steps = max_steps;
            }
            let options = ExtractOptions {
                json,
                meta,
                verification_log,
            };
            cmd_extract(&export.resolve()?, &out_dir, &cfg, &options)
        }
        Command::Inspect { export, config } => {
            let cfg = resolve_config(config.as_deref())?;
            cmd_inspect(&export.resolve()?, &cfg)
        }
        Command::InitConfig { path, force } => cmd_init_config(&path, force),
    }
}

struct ExtractOptions {
    json: bool,
    meta: bool,
    verification_log: Option<PathBuf>,
}

/// An explicitly named config must exist; otherwise defaults apply.
fn resolve_config(path: Option<&Path>) -> Result<ExtractorConfig> {
    match path {
        Some(path) if !path.exists() => bail!("config {} not found", path.display()),
        Some(path) => load_config(path),
        None => Ok(ExtractorConfig::default()),
    }
}

fn cmd_extract(
    set: &ArtifactSet,
    out_dir: &Path,
    cfg: &ExtractorConfig,
    options: &ExtractOptions,
) -> Result<i32> {
    cfg.validate()?;
    let result = extract(set, out_dir, cfg)?;

    if options.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&result).context("serialize result")?
        );
    }

    match &result {
        ExtractionResult::Success(success) => {
            if !options.json {
                println!(
                    "extract: steps={} probability={:.6} initial={} final={} report={}",
                    success.num_steps,
                    success.optimal_path_probability,
                    success.initial_state,
                    success.final_state,
                    success.txt_file.display()
                );
            }
            if options.meta {
                record_meta(out_dir, success, options.verification_log.as_deref())?;
            }
            Ok(exit_codes::OK)
        }
        ExtractionResult::Error(err) => {
            if !options.json {
                match err.states_explored {
                    Some(explored) => {
                        println!("extract: error={} states_explored={}", err.message, explored);
                    }
                    None => println!("extract: error={}", err.message),
                }
            }
            Ok(exit_codes::NOT_FOUND)
        }
    }
}

fn record_meta(
    out_dir: &Path,
    success: &ExtractionSuccess,
    verification_log: Option<&Path>,
) -> Result<()> {
    let verification_probability = match verification_log {
        Some(path) => {
            let stdout =
                fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
            let probability = parse_verification_probability(&stdout);
            if probability.is_none() {
                warn!(log = %path.display(), "no verification result found in log");
            }
            probability
        }
        None => None,
    };
    let entry = PathMeta {
        num_steps: success.num_steps,
        optimal_path_probability: success.optimal_path_probability,
        optimal_path_probability_description:
            "Probability of success for this specific optimal path from the initial state",
        verification_probability,
        initial_state: success.initial_state,
        final_state: success.final_state,
        files: MetaFiles {
            txt: &success.txt_file,
        },
    };
    update_meta(out_dir, "optimal_path", &entry)?;
    Ok(())
}

fn cmd_inspect(set: &ArtifactSet, cfg: &ExtractorConfig) -> Result<i32> {
    cfg.validate()?;
    let artifacts = set.load()?;
    let outcome = inspect(&artifacts, cfg);

    let labels: Vec<String> = outcome
        .label_definitions
        .iter()
        .map(|(id, name)| format!("{id}:{name}"))
        .collect();
    let goals: Vec<String> = outcome.goals.iter().map(u64::to_string).collect();
    let source = match outcome.goal_source {
        GoalSource::Label => "label",
        GoalSource::Threshold => "threshold",
    };

    println!("inspect: variables={}", outcome.variables.join(","));
    println!(
        "inspect: states={} strategy_states={} rows={}",
        outcome.states, outcome.strategy_states, outcome.rows
    );
    println!("inspect: labels={}", labels.join(" "));
    match outcome.initial_state {
        Some(initial) => println!("inspect: initial_state={initial}"),
        None => println!("inspect: initial_state=none"),
    }
    println!("inspect: goals={} source={}", goals.join(","), source);
    println!("inspect: failed_states={}", outcome.failed_states);
    for finding in &outcome.findings {
        println!("finding: {finding}");
    }
    Ok(exit_codes::OK)
}

fn cmd_init_config(path: &Path, force: bool) -> Result<i32> {
    if !force && path.exists() {
        bail!("{} already exists (use --force to overwrite)", path.display());
    }
    write_config(path, &ExtractorConfig::default())?;
    Ok(exit_codes::OK)
}
