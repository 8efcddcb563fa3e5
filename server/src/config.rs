//! Command-line and environment configuration.
//!
//! Every flag falls back to an environment variable; `main` loads a `.env`
//! file first so local overrides can live there.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Backing store for the todo collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StoreKind {
    /// In-process store, lost on exit.
    Memory,
    /// MongoDB (requires the `mongo` feature).
    Mongo,
}

#[derive(Parser, Debug, Clone)]
#[command(name = "todo-server")]
#[command(about = "HTTP service for listing, looking up and creating todos")]
#[command(version)]
pub struct Config {
    /// Address to bind to
    #[arg(long, env = "HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port to listen on
    #[arg(long, env = "PORT", default_value_t = 4567)]
    pub port: u16,

    /// Where todos are kept
    #[arg(long, env = "TODO_STORE", value_enum, default_value_t = StoreKind::Memory)]
    pub store: StoreKind,

    /// MongoDB connection string
    #[arg(long, env = "MONGO_URI", default_value = "mongodb://localhost:27017")]
    pub mongo_uri: String,

    /// MongoDB database holding the `todos` collection
    #[arg(long, env = "MONGO_DB", default_value = "dev")]
    pub database: String,

    /// JSON file with an array of todos to insert at startup
    #[arg(long, env = "TODO_SEED")]
    pub seed: Option<PathBuf>,

    /// Tracing filter directive (overrides the built-in default)
    #[arg(long, env = "RUST_LOG")]
    pub log_level: Option<String>,
}

impl Config {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Environment variables can leak into these; only assert on flags given
    // explicitly or on values no test environment sets.

    #[test]
    fn explicit_flags_win() {
        let config = Config::try_parse_from([
            "todo-server",
            "--host",
            "0.0.0.0",
            "--port",
            "8080",
            "--store",
            "mongo",
            "--database",
            "test",
            "--seed",
            "seed/todos.json",
        ])
        .unwrap();

        assert_eq!(config.bind_addr(), "0.0.0.0:8080");
        assert_eq!(config.store, StoreKind::Mongo);
        assert_eq!(config.database, "test");
        assert_eq!(config.seed, Some(PathBuf::from("seed/todos.json")));
    }

    #[test]
    fn rejects_unknown_store() {
        assert!(Config::try_parse_from(["todo-server", "--store", "sqlite"]).is_err());
    }

    #[test]
    fn rejects_bad_port() {
        assert!(Config::try_parse_from(["todo-server", "--port", "http"]).is_err());
    }

    #[test]
    fn hostname_is_kept_verbatim() {
        let config =
            Config::try_parse_from(["todo-server", "--host", "localhost", "--port", "1"]).unwrap();
        assert_eq!(config.bind_addr(), "localhost:1");
    }
}
