// crates/server/src/main.rs
//! Parceltrack server binary.
//!
//! Opens (or creates) the portal database, builds the Axum app and serves it.
//! The SSO proxy in front of the service handles authentication and injects
//! the `x-staff-username` header on every request.

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use parceltrack_db::Database;
use parceltrack_server::create_app;
use tracing_subscriber::EnvFilter;

/// Default port for the server.
const DEFAULT_PORT: u16 = 47310;

#[derive(Debug, Parser)]
#[command(name = "parceltrack", version, about = "Logistics job-tracking portal API")]
struct Args {
    /// Port to listen on (falls back to PARCELTRACK_PORT, then the default).
    #[arg(long)]
    port: Option<u16>,

    /// Path to the SQLite database (falls back to PARCELTRACK_DB).
    #[arg(long)]
    db: Option<PathBuf>,
}

impl Args {
    fn port(&self) -> u16 {
        self.port
            .or_else(|| {
                std::env::var("PARCELTRACK_PORT")
                    .ok()
                    .and_then(|p| p.parse().ok())
            })
            .unwrap_or(DEFAULT_PORT)
    }

    fn db_path(&self) -> PathBuf {
        self.db
            .clone()
            .or_else(|| std::env::var("PARCELTRACK_DB").ok().map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from("parceltrack.db"))
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .compact()
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let args = Args::parse();

    let db = Database::new(&args.db_path()).await?;
    let app = create_app(db);

    let addr = SocketAddr::from(([127, 0, 0, 1], args.port()));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "parceltrack v{} listening", env!("CARGO_PKG_VERSION"));

    axum::serve(listener, app).await?;
    Ok(())
}
