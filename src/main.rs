use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use splitrule::config::{SplitRuleConfig, StatisticKind, build_registry};
use splitrule::core::{NodeSampleRecord, OutcomeFamily, OwnedNodeSample};
use splitrule::registry::{SplitRuleRegistry, global_registry};
use std::fs;
use std::path::{Path, PathBuf};
use std::process;
use strum::{EnumMessage, IntoEnumIterator};

#[derive(Parser)]
#[command(
    name = "splitrule",
    about = "Score candidate node splits with registered split statistics"
)]
struct Cli {
    /// Log short-circuits and registry changes
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score one node sample under one split rule
    Score {
        /// JSON node sample (membership plus the columns the family needs)
        #[arg(long, value_name = "NODE_JSON")]
        sample: PathBuf,

        /// Outcome family: classification, regression, survival or competing-risk
        #[arg(long)]
        family: OutcomeFamily,

        /// Split rule name, `custom` or `customN`
        #[arg(long, default_value = "custom")]
        rule: String,

        /// Split rule configuration replacing the builtin registration
        #[arg(long, value_name = "RULES_JSON")]
        config: Option<PathBuf>,
    },

    /// List the registered (family, slot, statistic) entries
    List {
        #[arg(long, value_name = "RULES_JSON")]
        config: Option<PathBuf>,
    },

    /// Describe the statistics a configuration can name
    Kinds,

    /// Print the JSON schema of the split rule configuration
    Schema,
}

fn main() {
    let cli = Cli::parse();
    let level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    if let Err(err) = run(cli.command) {
        eprintln!("error: {err:#}");
        process::exit(1);
    }
}

fn run(command: Commands) -> Result<()> {
    match command {
        Commands::Score {
            sample,
            family,
            rule,
            config,
        } => {
            let configured = load_registry(config.as_deref())?;
            let registry = configured.as_ref().unwrap_or_else(|| global_registry());
            let score = score_sample(registry, &sample, family, &rule)?;
            println!("{score}");
        }
        Commands::List { config } => {
            let configured = load_registry(config.as_deref())?;
            let registry = configured.as_ref().unwrap_or_else(|| global_registry());
            for (family, slot, statistic) in registry.registered() {
                println!("{family}\tcustom{slot}\t{}", statistic.name());
            }
        }
        Commands::Kinds => {
            for kind in StatisticKind::iter() {
                println!(
                    "{kind}\t{}\t{}",
                    kind.family(),
                    kind.get_detailed_message().unwrap_or_default()
                );
            }
        }
        Commands::Schema => {
            let schema = SplitRuleConfig::json_schema();
            println!("{}", serde_json::to_string_pretty(&schema)?);
        }
    }
    Ok(())
}

fn load_registry(config: Option<&Path>) -> Result<Option<SplitRuleRegistry>> {
    let Some(path) = config else {
        return Ok(None);
    };
    let config = SplitRuleConfig::from_path(path)
        .with_context(|| format!("failed to load split rules from {}", path.display()))?;
    Ok(Some(build_registry(&config)?))
}

fn score_sample(
    registry: &SplitRuleRegistry,
    path: &Path,
    family: OutcomeFamily,
    rule: &str,
) -> Result<f64> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read node sample {}", path.display()))?;
    let record: NodeSampleRecord = serde_json::from_str(&text)
        .with_context(|| format!("malformed node sample {}", path.display()))?;
    let sample = OwnedNodeSample::try_from(record)?;
    let statistic = registry.resolve(family, rule)?;
    let score = statistic
        .compute(&sample.view())
        .with_context(|| format!("{} failed on {}", statistic.name(), path.display()))?;
    Ok(score)
}
