use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "applicant-ingest")]
#[command(about = "Spreadsheet ingest service for welfare-scheme applicant records", long_about = None)]
struct Cli {
    /// SQLite database file
    #[arg(long, global = true, env = "APPLICANT_INGEST_DB_PATH")]
    db_path: Option<PathBuf>,

    /// PostgreSQL connection URL; selects the PostgreSQL backend
    #[arg(long, global = true, env = "DATABASE_URL", hide_env_values = true)]
    database_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP server
    Serve {
        #[arg(short, long, env = "PORT", default_value = "3001")]
        port: u16,
        #[arg(short = 'H', long, env = "HOST", default_value = "127.0.0.1")]
        host: String,
    },
    /// Ingest a local spreadsheet and print the summary
    Import { file: PathBuf },
    /// Print one page of stored records
    List {
        #[arg(long)]
        page: Option<u64>,
        #[arg(short, long)]
        limit: Option<u64>,
        #[arg(short, long)]
        search: Option<String>,
        #[arg(long)]
        district: Option<String>,
        #[arg(long)]
        taluka: Option<String>,
        #[arg(long)]
        status: Option<String>,
        #[arg(long)]
        year: Option<i64>,
        #[arg(long)]
        gender: Option<String>,
        #[arg(long)]
        scheme_name: Option<String>,
        #[arg(long)]
        beneficiary_category: Option<String>,
    },
    /// Print the record count and latest upload date
    Stats,
    /// Delete every stored record
    Wipe {
        /// Confirm the deletion
        #[arg(long)]
        yes: bool,
    },
}

pub(crate) fn default_db_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("applicant-ingest")
        .join("applicants.db")
}

pub(crate) fn ensure_db_dir(db_path: &Path) -> Result<()> {
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let target = commands::StorageTarget::new(cli.db_path, cli.database_url);

    match cli.command {
        Commands::Serve { port, host } => commands::serve::run(&target, port, &host).await?,
        Commands::Import { file } => commands::import::run(&target, &file).await?,
        Commands::List {
            page,
            limit,
            search,
            district,
            taluka,
            status,
            year,
            gender,
            scheme_name,
            beneficiary_category,
        } => {
            let filter = applicant_ingest_core::ApplicantFilter {
                district,
                taluka,
                status,
                year,
                gender,
                scheme_name,
                beneficiary_category,
                search,
            };
            commands::records::run_list(&target, filter, page, limit).await?;
        },
        Commands::Stats => commands::records::run_stats(&target).await?,
        Commands::Wipe { yes } => commands::records::run_wipe(&target, yes).await?,
    }

    Ok(())
}
