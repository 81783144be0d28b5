//! # Static Host
//!
//! Thin entry point: load `.env`, read configuration, serve `dist/`.

use splitsure_server::{init_tracing, start_server, ServerConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = ServerConfig::from_env()?;
    start_server(config).await
}
