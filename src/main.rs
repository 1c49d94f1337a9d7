use anyhow::{Context, Result};
use book_harvest::config::{find_config_file, load_config, Config};
use book_harvest::selector::{parse_selection, prompt_topic};
use book_harvest::sources::{OpenLibrarySource, Source};
use book_harvest::ui::{self, Status};
use book_harvest::utils::HttpClient;
use book_harvest::{write_csv, Fetcher, TopicStore};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Book Harvest - Save recent books on a topic from Open Library to CSV
#[derive(Parser, Debug)]
#[command(name = "book-harvest")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Save books published after 2000 on a topic from Open Library to CSV", long_about = None)]
struct Cli {
    /// Enable verbose logging (can be used multiple times for more verbosity: -v, -vv)
    #[arg(long, short, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(long, short)]
    quiet: bool,

    /// Configuration file path
    #[arg(long)]
    config: Option<PathBuf>,

    /// Topic number or free-text query (skips the interactive prompt)
    #[arg(long, short)]
    topic: Option<String>,

    /// Maximum number of books to collect
    #[arg(long, short = 'n')]
    count: Option<usize>,

    /// Topics file, one topic per line
    #[arg(long)]
    topics_file: Option<PathBuf>,

    /// CSV output file
    #[arg(long, short)]
    output_file: Option<PathBuf>,

    /// Request timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,

    /// Print the collected books as a table
    #[arg(long)]
    show: bool,
}

impl Cli {
    /// Command-line flags take precedence over file and environment settings
    fn apply_overrides(&self, config: &mut Config) {
        if let Some(count) = self.count {
            config.harvest.target_count = count;
        }
        if let Some(path) = &self.topics_file {
            config.paths.topics_file = path.clone();
        }
        if let Some(path) = &self.output_file {
            config.paths.output_file = path.clone();
        }
        if let Some(timeout) = self.timeout {
            config.api.timeout_secs = timeout;
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing based on verbosity
    let log_level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };

    let env_filter = if cli.quiet { "error" } else { log_level };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| format!("book_harvest={}", env_filter)),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config_path = cli.config.clone().or_else(find_config_file);
    if let Some(path) = &config_path {
        tracing::info!("Using config file: {}", path.display());
    }
    let mut config = load_config(config_path.as_deref())?;
    cli.apply_overrides(&mut config);

    let store = TopicStore::new(&config.paths.topics_file);
    let topics = store
        .load_topics()
        .with_context(|| format!("Failed to load topics from {}", store.path().display()))?;

    let mut rng = rand::thread_rng();
    let query = match &cli.topic {
        Some(input) => parse_selection(input, topics.len()).resolve(&topics, &mut rng),
        None => {
            let stdin = std::io::stdin();
            let mut stdout = std::io::stdout();
            prompt_topic(&topics, &mut stdin.lock(), &mut stdout, &mut rng)?
        }
    }
    .context("No topics available to choose from")?;

    let client = HttpClient::new(config.api.timeout())?;
    let source: Arc<dyn Source> = Arc::new(OpenLibrarySource::with_base_url(
        client,
        config.api.base_url.clone(),
    ));
    let fetcher = Fetcher::new(Arc::clone(&source)).fields(config.api.field_hint());

    if !cli.quiet {
        ui::print_status(
            Status::Search,
            &format!("Connecting to {} for: {}...", source.name(), query),
        );
    }

    let spinner = if cli.quiet {
        indicatif::ProgressBar::hidden()
    } else {
        ui::fetch_spinner(&query, source.name())
    };
    let result = fetcher
        .fetch_books(&query, config.harvest.target_count)
        .await;
    spinner.finish_and_clear();

    if !cli.quiet {
        ui::print_fetch_outcome(&result);
    } else if let book_harvest::StopReason::Failed(err) = &result.stop_reason {
        ui::print_status(Status::Error, &format!("Error: {}", err));
    }

    if cli.show && !result.is_empty() {
        println!("{}", ui::books_table(&result.books));
    }

    let output = &config.paths.output_file;
    let written = write_csv(&result.books, output)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    if written {
        if !cli.quiet {
            ui::print_saved(result.len(), output);
        }
    } else if !cli.quiet {
        ui::print_status(Status::Warning, "No matching books found; nothing written");
    }

    Ok(())
}
