//! Rolling Artist CLI — roll, partition, and normalize commands.
//!
//! Commands:
//! - `roll` — select artists and print the weighted prompt fragment
//! - `partition` — report how a ratio splits the reference list
//! - `normalize` — clean up a raw reference file (underscores, escaped parentheses)
//!
//! Prompts go to stdout; logs go to stderr (`RUST_LOG`, default `warn`).

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

use rolling_artist_core::rng::batch_seeds;
use rolling_artist_core::{normalize_file, ArtistRoller, ReferenceList, RollRequest, RollerConfig};

#[derive(Parser)]
#[command(
    name = "rolling-artist",
    about = "Rolling Artist — seeded artist selection with bounded weights"
)]
struct Cli {
    /// Path to a TOML config file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Reference list (overrides the config's `reference`).
    #[arg(long, global = true, env = "ROLLING_ARTIST_REFERENCE")]
    reference: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Select artists and print the weighted prompt.
    Roll(RollArgs),
    /// Show how a top ratio splits the reference list.
    Partition {
        /// Fraction of the list treated as top, in (0, 1].
        #[arg(long)]
        top_ratio: Option<f64>,

        /// How many entries of each side to print.
        #[arg(long, default_value_t = 5)]
        show: usize,
    },
    /// Normalize a raw reference file.
    Normalize {
        /// File to normalize.
        input: PathBuf,

        /// Write here instead of rewriting the input in place.
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

#[derive(Args)]
struct RollArgs {
    /// Number of artists to select.
    #[arg(long)]
    count: Option<usize>,

    /// Number of top artists to include.
    #[arg(long)]
    top_count: Option<usize>,

    /// Fraction of the list treated as top, in (0, 1].
    #[arg(long)]
    top_ratio: Option<f64>,

    /// Do not prefix artist names.
    #[arg(long, default_value_t = false)]
    no_prefix: bool,

    /// Minimum weight per artist.
    #[arg(long)]
    weight_min: Option<f64>,

    /// Maximum weight per artist.
    #[arg(long)]
    weight_max: Option<f64>,

    /// Target sum of all weights.
    #[arg(long)]
    weight_total: Option<f64>,

    /// Random seed.
    #[arg(long)]
    seed: Option<u64>,

    /// Number of prompts to print, with consecutive seeds.
    #[arg(long, default_value_t = 1)]
    batch: usize,

    /// Print each roll as a JSON line instead of the prompt string.
    #[arg(long, default_value_t = false)]
    json: bool,
}

impl RollArgs {
    fn apply(&self, defaults: &RollRequest) -> RollRequest {
        RollRequest {
            total_count: self.count.unwrap_or(defaults.total_count),
            top_count: self.top_count.unwrap_or(defaults.top_count),
            top_ratio: self.top_ratio.unwrap_or(defaults.top_ratio),
            use_prefix: defaults.use_prefix && !self.no_prefix,
            weight_min: self.weight_min.unwrap_or(defaults.weight_min),
            weight_max: self.weight_max.unwrap_or(defaults.weight_max),
            weight_total: self.weight_total.unwrap_or(defaults.weight_total),
            seed: self.seed.unwrap_or(defaults.seed),
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Roll(args) => {
            let config = load_config(cli.config.as_deref(), cli.reference)?;
            run_roll(&config, &args)
        }
        Commands::Partition { top_ratio, show } => {
            let config = load_config(cli.config.as_deref(), cli.reference)?;
            run_partition(&config, top_ratio, show)
        }
        Commands::Normalize { input, output } => run_normalize(&input, output.as_deref()),
    }
}

fn load_config(path: Option<&Path>, reference: Option<PathBuf>) -> Result<RollerConfig> {
    let mut config = match path {
        Some(path) => RollerConfig::from_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => RollerConfig::default(),
    };
    if let Some(reference) = reference {
        config.reference = reference;
    }
    debug!(reference = %config.reference.display(), "config resolved");
    Ok(config)
}

fn run_roll(config: &RollerConfig, args: &RollArgs) -> Result<()> {
    let request = args.apply(&config.defaults);
    // Surface bad parameters as a CLI error rather than an empty line.
    request.validate().context("invalid roll parameters")?;

    let roller = ArtistRoller::from_config(config);
    if roller.reference().is_empty() {
        warn!(
            reference = %config.reference.display(),
            "reference list is empty or unavailable; output will be empty"
        );
    }

    for seed in batch_seeds(request.seed, args.batch) {
        let roll = roller.roll(&request.clone().with_seed(seed))?;
        if args.json {
            println!("{}", serde_json::to_string(&roll)?);
        } else {
            println!("{roll}");
        }
    }
    Ok(())
}

fn run_partition(config: &RollerConfig, top_ratio: Option<f64>, show: usize) -> Result<()> {
    let ratio = top_ratio.unwrap_or(config.defaults.top_ratio);
    if !(ratio.is_finite() && ratio > 0.0 && ratio <= 1.0) {
        bail!("--top-ratio must be in (0, 1], got {ratio}");
    }

    let reference = ReferenceList::load(&config.reference)
        .with_context(|| format!("loading reference list {}", config.reference.display()))?;
    let roller = ArtistRoller::new(reference, config.prefix.clone());
    let partition = roller.partition(ratio);

    println!("Reference list: {}", config.reference.display());
    println!("Entries:        {}", roller.reference().len());
    println!("Prefix:         {:?}", roller.prefix());
    println!("Top ratio:      {ratio}");
    println!("Top:            {}", partition.top().len());
    println!("Non-top:        {}", partition.non_top().len());
    print_head("Top head", partition.top(), show);
    print_head("Non-top head", partition.non_top(), show);
    Ok(())
}

fn print_head(label: &str, names: &[String], show: usize) {
    if show == 0 || names.is_empty() {
        return;
    }
    println!();
    println!("{label}:");
    for name in names.iter().take(show) {
        println!("  {name}");
    }
}

fn run_normalize(input: &Path, output: Option<&Path>) -> Result<()> {
    let lines = normalize_file(input, output)
        .with_context(|| format!("normalizing {}", input.display()))?;
    let target = output.unwrap_or(input);
    println!("Normalized {lines} lines -> {}", target.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("rolling-artist").chain(args.iter().copied()))
            .unwrap()
    }

    #[test]
    fn roll_flags_override_defaults() {
        let cli = parse(&["roll", "--count", "8", "--seed", "42", "--no-prefix"]);
        let Commands::Roll(args) = cli.command else {
            panic!("expected roll");
        };
        let req = args.apply(&RollRequest::default());
        assert_eq!(req.total_count, 8);
        assert_eq!(req.seed, 42);
        assert!(!req.use_prefix);
        assert_eq!(req.top_count, 3);
        assert_eq!(req.weight_total, 3.0);
    }

    #[test]
    fn config_defaults_apply_when_flags_absent() {
        let cli = parse(&["roll"]);
        let Commands::Roll(args) = cli.command else {
            panic!("expected roll");
        };
        let defaults = RollRequest {
            top_ratio: 0.5,
            use_prefix: false,
            ..RollRequest::default()
        };
        let req = args.apply(&defaults);
        assert_eq!(req.top_ratio, 0.5);
        assert!(!req.use_prefix);
        assert_eq!(args.batch, 1);
    }

    #[test]
    fn global_reference_flag_after_subcommand() {
        let cli = parse(&["partition", "--reference", "list.csv", "--top-ratio", "0.3"]);
        assert_eq!(cli.reference, Some(PathBuf::from("list.csv")));
        assert!(matches!(
            cli.command,
            Commands::Partition { top_ratio: Some(r), show: 5 } if r == 0.3
        ));
    }

    #[test]
    fn normalize_takes_positional_input() {
        let cli = parse(&["normalize", "raw.csv", "--output", "clean.csv"]);
        let Commands::Normalize { input, output } = cli.command else {
            panic!("expected normalize");
        };
        assert_eq!(input, PathBuf::from("raw.csv"));
        assert_eq!(output, Some(PathBuf::from("clean.csv")));
    }
}
