mod insights;
mod predict;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use growify_core::Platform;

#[derive(Debug, Parser)]
#[command(name = "growify-cli")]
#[command(about = "Growify analytics pipeline command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Normalize a snapshot of platform payloads and print the ranked insights
    Insights {
        /// JSON file holding an array of {"platform": ..., "payload": ...}
        /// entries; omit to run against the built-in sample data
        #[arg(long)]
        file: Option<PathBuf>,
        /// Maximum number of insights to print
        #[arg(long)]
        cap: Option<usize>,
    },
    /// Score a draft post with the engagement predictor
    Predict {
        /// Draft caption text
        #[arg(long)]
        caption: String,
        /// Comma-separated hashtags (without the # prefix)
        #[arg(long, value_delimiter = ',')]
        hashtags: Vec<String>,
        /// Target platform (e.g. instagram)
        #[arg(long)]
        platform: Platform,
        /// Planned posting hour, 0-23
        #[arg(long)]
        hour: u32,
        /// Seed for the jitter RNG; omit for a random draw
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Insights { file, cap } => insights::run_insights(file.as_deref(), cap),
        Commands::Predict {
            caption,
            hashtags,
            platform,
            hour,
            seed,
        } => predict::run_predict(&caption, hashtags, platform, hour, seed),
    }
}
