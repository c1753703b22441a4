//! Hookline CLI - apply request hooks to JSON documents.

use clap::{Parser, Subcommand};
use hookline_core::CoercionOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

mod commands;
mod output;

use commands::{apply, coerce};

#[derive(Parser)]
#[command(name = "hookline")]
#[command(about = "Coerce and stamp JSON request payloads")]
struct Cli {
    /// Log hook decisions to stderr
    #[arg(long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Coerce string values of a JSON document
    Coerce {
        /// Input JSON file (or stdin if not provided)
        input: Option<String>,
        /// Start from the query preset instead of the body preset
        #[arg(long)]
        query: bool,
        /// Start with every rule off
        #[arg(long)]
        no_defaults: bool,
        /// Coerce "true"/"false"
        #[arg(long = "bool")]
        with_bool: bool,
        /// Coerce decimal numbers
        #[arg(long = "num")]
        with_num: bool,
        /// Coerce zone-less timestamps as UTC
        #[arg(long = "naive")]
        with_naive: bool,
        /// Coerce Z-suffixed timestamps
        #[arg(long = "utc")]
        with_utc: bool,
        /// Coerce 24-hex strings at _id/_ids paths
        #[arg(long = "id")]
        with_id: bool,
        /// Leave $text/$search values alone
        #[arg(long = "text")]
        with_text: bool,
    },
    /// Run hooks over a context document
    Apply {
        /// Context JSON file (or stdin if not provided)
        input: Option<String>,
        /// Hook to run, in order: coerce, coerce-query, timestamp, userstamp,
        /// split-list:PATH[:SEP], unique-array:PATH
        #[arg(long = "hook", required = true)]
        hooks: Vec<String>,
    },
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Coerce {
            input,
            query,
            no_defaults,
            with_bool,
            with_num,
            with_naive,
            with_utc,
            with_id,
            with_text,
        } => {
            let base = match (no_defaults, query) {
                (true, _) => CoercionOptions::none(),
                (false, true) => CoercionOptions::query(),
                (false, false) => CoercionOptions::data(),
            };
            let options = CoercionOptions {
                bool: base.bool || with_bool,
                num: base.num || with_num,
                naive: base.naive || with_naive,
                utc: base.utc || with_utc,
                id: base.id || with_id,
                text: base.text || with_text,
            };
            coerce::run(input, options)
        }
        Commands::Apply { input, hooks } => apply::run(input, hooks),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
