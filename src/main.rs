mod commit;
mod config;
mod error;
mod extract;
mod fetch;
mod filter;
mod paginate;
mod pipeline;
mod report;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::info;

use commit::CommitManager;
use config::Config;
use error::PipelineError;
use fetch::HttpFetcher;
use report::{notify, status_message, RunLog};

#[derive(Parser)]
#[command(name = "aurlist", about = "Orphan-filtered AUR package list maintainer")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch all result pages and replace the persisted package list
    Run {
        /// Search keyword for the catalog query
        #[arg(short, long)]
        query: String,
        /// Catalog base URL
        #[arg(long, default_value = config::DEFAULT_BASE_URL)]
        base_url: String,
        /// Results per page (catalog-side constant)
        #[arg(long, default_value_t = config::DEFAULT_PAGE_SIZE)]
        page_size: u64,
        /// Directory holding the list, backup, scratch and log files
        #[arg(long, default_value = config::DEFAULT_DATA_DIR)]
        data_dir: PathBuf,
    },
    /// Print the currently persisted package list
    Show {
        #[arg(long, default_value = config::DEFAULT_DATA_DIR)]
        data_dir: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            query,
            base_url,
            page_size,
            data_dir,
        } => {
            let cfg = Config::new(base_url, query, page_size, data_dir);
            run_and_exit(&cfg)
        }
        Commands::Show { data_dir } => {
            let cfg = Config::new(String::new(), String::new(), 1, data_dir);
            let text = std::fs::read_to_string(cfg.list_path())?;
            print!("{}", text);
            println!("{} packages", text.lines().count());
            Ok(())
        }
    }
}

/// The single exit point for a pipeline run. Success or any failure funnels
/// through here exactly once: restore on failure, log, notify, exit with
/// the mapped status code.
fn run_and_exit(cfg: &Config) -> ! {
    let log = match RunLog::open(cfg.log_path()) {
        Ok(log) => log,
        Err(e) => {
            eprintln!("{}: {}", status_message(99), e);
            notify(99, status_message(99));
            std::process::exit(99);
        }
    };

    let outcome = HttpFetcher::new()
        .map_err(PipelineError::CountFetch)
        .and_then(|fetcher| pipeline::run(cfg, &fetcher));

    let (code, message) = match outcome {
        Ok(count) => {
            info!("{} packages listed", count);
            (0, format!("{} ({} packages)", status_message(0), count))
        }
        Err(ref e) => {
            CommitManager::new(cfg).restore_backup();
            (
                e.exit_code(),
                format!("{}: {}", status_message(e.exit_code()), e),
            )
        }
    };

    if let Err(e) = log.record(code, &message) {
        eprintln!("could not append to run log: {}", e);
    }
    if code != 0 {
        log.dump_to_stderr();
    }
    notify(code, &message);
    std::process::exit(code);
}
