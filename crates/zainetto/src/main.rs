use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::{info, Level};
use tracing_subscriber::{fmt, EnvFilter};

mod help;
mod html;
mod notify;
mod server;
mod storage;
mod store;
mod types;
mod view;

use notify::LogSink;
use storage::Storage;
use store::AssignmentStore;
use types::AssignmentDraft;

#[derive(Parser, Debug)]
#[command(name = "zainetto")]
#[command(about = "Track homework assignments with a local store and web view")]
struct Args {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Directory holding the assignment store
    #[arg(short, long, default_value = ".", global = true)]
    data_dir: PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", global = true)]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the web server (default)
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "8080")]
        port: u16,
    },

    /// Add an assignment
    Add {
        /// Display name, e.g. "Essay"
        name: String,

        /// Subject label, e.g. "English"
        subject: String,

        /// Deadline as YYYY-MM-DD or a full RFC 3339 timestamp
        deadline: String,
    },

    /// Toggle an assignment's completion flag
    Done {
        /// Assignment id
        id: String,
    },

    /// Delete an assignment
    Remove {
        /// Assignment id
        id: String,
    },

    /// Print all assignments in display order
    List,
}

fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level))
        .add_directive("hyper=warn".parse().unwrap());

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_max_level(Level::TRACE)
        .init();
}

fn open_store(data_dir: &Path) -> Result<AssignmentStore> {
    let storage = Storage::open(&data_dir.join("assignments.db"))?;
    Ok(AssignmentStore::open(storage, Box::new(LogSink)))
}

/// Parse a deadline given as a bare date (midnight UTC) or a full RFC 3339
/// timestamp
fn parse_deadline(raw: &str) -> Result<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }

    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .with_context(|| format!("Invalid deadline: {raw}"))?;
    Ok(Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN)))
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    init_tracing(&args.log_level);

    match args.command {
        // Default to serve if no command specified
        None | Some(Commands::Serve { port: 8080 }) => {
            let store = open_store(&args.data_dir)?;
            server::serve(8080, store).await?;
        }
        Some(Commands::Serve { port }) => {
            let store = open_store(&args.data_dir)?;
            server::serve(port, store).await?;
        }
        Some(Commands::Add {
            name,
            subject,
            deadline,
        }) => {
            if name.trim().is_empty() {
                anyhow::bail!("Assignment name must not be empty");
            }
            let deadline = parse_deadline(&deadline)?;
            let mut store = open_store(&args.data_dir)?;
            let assignment = store.add(AssignmentDraft {
                name,
                subject,
                deadline,
            });
            info!(id = %assignment.id, "Assignment created");
        }
        Some(Commands::Done { id }) => {
            let mut store = open_store(&args.data_dir)?;
            if store.toggle_complete(&id) {
                info!(id = %id, "Completion flag toggled");
            } else {
                info!(id = %id, "No assignment with that id");
            }
        }
        Some(Commands::Remove { id }) => {
            let mut store = open_store(&args.data_dir)?;
            if !store.remove(&id) {
                info!(id = %id, "No assignment with that id");
            }
        }
        Some(Commands::List) => {
            let store = open_store(&args.data_dir)?;
            for assignment in view::display_order(store.assignments()) {
                info!(
                    id = %assignment.id,
                    subject = %assignment.subject,
                    deadline = %assignment.deadline.format("%Y-%m-%d %H:%M"),
                    completed = assignment.completed,
                    "{}",
                    assignment.name
                );
            }
        }
    }

    Ok(())
}
