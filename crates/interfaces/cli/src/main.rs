mod doctor;
mod trend_cmds;

use std::path::{Path, PathBuf};

use anyhow::{Result, bail};
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use moodjournal_config::AppConfig;
use moodjournal_sentiment::{SentimentAnalyzer, SentimentInput};

const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

#[derive(Debug, Parser)]
#[command(
    name = "moodjournal",
    version,
    about = "Sentiment scoring and trend advice for a mood journal"
)]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Score one journal entry.
    Analyze {
        #[arg(long)]
        text: String,
        /// Comma-delimited emoji selection, e.g. "😊,😄".
        #[arg(long, default_value = "")]
        emojis: String,
        /// Self-reported mood, 1 (worst) to 5 (best).
        #[arg(long, default_value_t = 3, allow_negative_numbers = true)]
        mood: i32,
        /// Print the result as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Suggest something based on recent composite scores.
    Suggest {
        /// Scores in date-ascending order.
        #[arg(allow_negative_numbers = true)]
        scores: Vec<f64>,
        /// JSON file of `{date, mood, score}` entries to read instead.
        #[arg(long, conflicts_with = "scores")]
        history: Option<PathBuf>,
    },
    /// Check the remote analyzer and run the reference entries.
    Doctor,
    /// Write the default configuration file.
    Init {
        #[arg(long)]
        force: bool,
    },
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.telemetry.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = AppConfig::load_from(&cli.config)?;
    init_tracing(&config);
    debug!(path = %cli.config.display(), "configuration loaded");

    match cli.command {
        Commands::Analyze {
            text,
            emojis,
            mood,
            json,
        } => {
            let analyzer = SentimentAnalyzer::from_config(&config);
            let input = SentimentInput::new(text, &emojis, mood);
            let analysis = analyzer.analyze_detailed(&input).await;
            if json {
                println!("{}", serde_json::to_string_pretty(&analysis)?);
            } else {
                println!("score     : {:.3}", analysis.result.score);
                println!("magnitude : {:.3}", analysis.result.magnitude);
                println!("source    : {}", analysis.source.as_str());
            }
        }
        Commands::Suggest { scores, history } => {
            let scores = match history {
                Some(path) => trend_cmds::load_series(&path, config.journal.history_window)?.scores(),
                None => scores,
            };
            println!("{}", trend_cmds::render_suggestion(&scores));
        }
        Commands::Doctor => doctor::run_doctor(&config).await?,
        Commands::Init { force } => run_init(&config, &cli.config, force)?,
    }

    Ok(())
}

fn run_init(config: &AppConfig, path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!(
            "{} already exists (use --force to overwrite)",
            path.display()
        );
    }
    config.save_to(path)?;
    println!("wrote {}", path.display());
    Ok(())
}
