use std::sync::Arc;

use anyhow::Context as _;
use clap::Parser;
use tokio::net::TcpListener;

use todo_core::{MemoryStore, TodoStore};
use todo_server::config::{Config, StoreKind};
use todo_server::{logging, seed};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    let config = Config::parse();
    logging::init(config.log_level.as_deref());

    let store = open_store(&config).await?;
    if let Some(path) = &config.seed {
        let added = seed::load(store.as_ref(), path).await?;
        tracing::info!(added, path = %path.display(), "seeded todos");
    }

    let addr = config.bind_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!(%addr, store = ?config.store, "listening");
    todo_server::run(listener, store).await?;
    Ok(())
}

async fn open_store(config: &Config) -> anyhow::Result<Arc<dyn TodoStore>> {
    match config.store {
        StoreKind::Memory => Ok(Arc::new(MemoryStore::new())),
        #[cfg(feature = "mongo")]
        StoreKind::Mongo => {
            let store = todo_core::MongoStore::connect(&config.mongo_uri, &config.database)
                .await
                .with_context(|| format!("failed to connect to {}", config.mongo_uri))?;
            tracing::info!(database = %config.database, "using MongoDB");
            Ok(Arc::new(store))
        }
        #[cfg(not(feature = "mongo"))]
        StoreKind::Mongo => anyhow::bail!(
            "MongoDB store requested but todo-server was built without the `mongo` feature"
        ),
    }
}
