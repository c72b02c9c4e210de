//! Tic-tac-toe game server binary.

use anyhow::Result;
use axum::body::Body;
use axum::http::Request;
use clap::Parser;
use tictactoe_server::{GameRegistry, router};
use tower::ServiceBuilder;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod cli;

use cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("Starting tic-tac-toe game server");

    // One registry for the process lifetime, injected into the router.
    let registry = GameRegistry::new();

    let app = router(registry).layer(ServiceBuilder::new().map_request(|req: Request<Body>| {
        info!(method = %req.method(), uri = %req.uri(), "Incoming HTTP request");
        req
    }));

    let listener = tokio::net::TcpListener::bind((cli.host.as_str(), cli.port)).await?;
    info!(host = %cli.host, port = cli.port, "Server ready");

    axum::serve(listener, app).await?;

    Ok(())
}
