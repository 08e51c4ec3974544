use anyhow::Context;
use askql_core::{AppConfig, DatasetLoader, Executor, NLTranslator, Session, STUDENTS};
use clap::Parser;
use std::io;
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Ask questions about the student table in plain English.
#[derive(Debug, Parser)]
#[command(name = "askql", version, about)]
struct Args {
    /// SQLite database holding the students table
    #[arg(long, env = "ASKQL_DATABASE", default_value = askql_core::config::DEFAULT_DATABASE)]
    database: PathBuf,

    /// Student spreadsheet exported as CSV, loaded before starting (.xlsx is not read)
    #[arg(long, env = "ASKQL_DATASET", value_name = "CSV")]
    dataset: Option<PathBuf>,

    /// Text-generation endpoint (Ollama /api/generate compatible)
    #[arg(long, env = "ASKQL_ENDPOINT", default_value = askql_core::config::DEFAULT_ENDPOINT)]
    endpoint: String,

    /// Model identifier sent with every request
    #[arg(long, env = "ASKQL_MODEL", default_value = askql_core::config::DEFAULT_MODEL)]
    model: String,

    /// Request timeout in seconds; the HTTP client default applies when unset
    #[arg(long, env = "ASKQL_TIMEOUT_SECS")]
    timeout_secs: Option<u64>,
}

impl From<Args> for AppConfig {
    fn from(args: Args) -> Self {
        AppConfig {
            database_path: args.database,
            dataset_path: args.dataset,
            endpoint: args.endpoint,
            model: args.model,
            request_timeout: args.timeout_secs.map(Duration::from_secs),
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let config = AppConfig::from(Args::parse());
    config.validate()?;

    if let Some(dataset) = &config.dataset_path {
        println!("[INFO] Loading dataset into SQLite database...");
        DatasetLoader::new(&STUDENTS)
            .load_file(&config.database_path, dataset)
            .with_context(|| format!("loading {}", dataset.display()))?;
        println!("[INFO] Data loaded successfully!");
    }

    let executor = Executor::open(&config.database_path)
        .with_context(|| format!("opening {}", config.database_path.display()))?;
    let translator = NLTranslator::new(&config)?;
    info!(endpoint = %config.endpoint, model = translator.model(), "session starting");

    let mut session = Session::new(translator, executor);
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    session.run(stdin.lock(), &mut stdout)?;

    Ok(())
}
