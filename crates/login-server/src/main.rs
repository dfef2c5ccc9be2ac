//! login-server binary: configuration, logging, and serving the API router.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use login_core::{Database, SqliteUserStore, TokenService, UserService};
use login_server::create_router;

#[derive(Parser)]
#[command(name = "login-server")]
#[command(author, version, about = "Account registration and authentication service", long_about = None)]
struct Args {
    /// Address to bind the HTTP server to
    #[arg(long, env = "LOGIN_ADDR", default_value = "127.0.0.1:8080")]
    addr: String,

    /// Path to the SQLite database file
    #[arg(long, env = "LOGIN_DB_PATH", default_value = "login.db")]
    db: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let db = Database::open(&args.db).await?;
    let tokens = Arc::new(TokenService::from_env());
    let service = Arc::new(UserService::new(SqliteUserStore::new(&db), tokens));

    let listener = tokio::net::TcpListener::bind(&args.addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, create_router(service)).await?;

    Ok(())
}
