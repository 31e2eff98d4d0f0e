#![deny(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

mod command;

use clap::{Parser, Subcommand};
use command::{
    CheckStrategy, CommandStrategy, EnrichInput, EnrichStrategy, InfoStrategy, InitStrategy,
    ReviewInput, ReviewStrategy, VersionStrategy,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "lexicon")]
#[command(about = "Enrich a vocabulary database with model-generated context", long_about = None)]
struct Cli {
    /// More log output (-v info, -vv debug); RUST_LOG takes precedence
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Enrich every word with Status = Ready
    Enrich {
        /// Model to use
        #[arg(short = 'M', long)]
        model: Option<String>,

        /// Delay between words in milliseconds
        #[arg(long)]
        pacing_ms: Option<u64>,
    },
    /// Verify both API connections before running
    Check,
    /// Show enriched words as flashcards
    Review {
        /// Maximum number of cards to show
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },
    /// Show configuration
    Info,
    /// Initialize configuration
    Init,
    /// Show version
    Version,
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    lexicon_config::load_dotenv();
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Enrich { model, pacing_ms } => {
            EnrichStrategy
                .execute(EnrichInput { model, pacing_ms })
                .await
        }
        Commands::Check => CheckStrategy.execute(()).await,
        Commands::Review { limit } => ReviewStrategy.execute(ReviewInput { limit }).await,
        Commands::Info => InfoStrategy.execute(()).await,
        Commands::Init => InitStrategy.execute(()).await,
        Commands::Version => VersionStrategy.execute(()).await,
    }
}
