mod commands;
mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "triagem",
    version,
    about = "Sector classification of scanned hospital pages and duty-roster normalization"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify a batch of OCR'd pages (JSON array of page objects)
    Classify {
        /// Path to the JSON page batch
        input_file: PathBuf,

        /// Custom JSON sector catalog (default: builtin "hospital" preset)
        #[arg(short, long, value_name = "FILE")]
        catalog: Option<PathBuf>,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,
    },
    /// Normalize a duty-roster workbook into one row per person, day and shift
    Schedule {
        /// Path to the xlsx roster
        input_file: PathBuf,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,

        /// Write the records to a JSON file
        #[arg(short = 'O', long = "out", value_name = "FILE")]
        out: Option<PathBuf>,
    },
    /// Inspect and validate sector catalogs
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },
    /// Serve both operations over HTTP
    Serve {
        /// Address to listen on
        #[arg(short, long, default_value = "127.0.0.1:8080")]
        addr: String,

        /// Custom JSON sector catalog (default: builtin "hospital" preset)
        #[arg(short, long, value_name = "FILE")]
        catalog: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
enum CatalogAction {
    /// List predefined catalogs
    List,
    /// Print the entries and heuristics of a catalog in match order
    Show {
        /// Custom JSON sector catalog (default: builtin "hospital" preset)
        #[arg(short, long, value_name = "FILE")]
        catalog: Option<PathBuf>,
    },
    /// Validate a custom catalog file
    Validate {
        /// Path to JSON catalog file
        file: PathBuf,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Classify {
            input_file,
            catalog,
            output,
        } => commands::classify::run(input_file, catalog, &output),
        Commands::Schedule {
            input_file,
            output,
            out,
        } => commands::schedule::run(input_file, &output, out),
        Commands::Catalog { action } => match action {
            CatalogAction::List => commands::catalog::list(),
            CatalogAction::Show { catalog } => commands::catalog::show(catalog),
            CatalogAction::Validate { file } => commands::catalog::validate(&file),
        },
        Commands::Serve { addr, catalog } => commands::serve::run(&addr, catalog),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
