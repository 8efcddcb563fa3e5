//! Startup seeding from a JSON file.
//!
//! The file holds an array of todo objects (`owner`, `category`, `body`,
//! `status`). Extra fields, including exported `_id`s, are ignored and every
//! todo gets a fresh id.

use std::path::Path;

use anyhow::Context as _;
use todo_core::{NewTodo, TodoStore};

pub fn parse(raw: &str) -> anyhow::Result<Vec<NewTodo>> {
    serde_json::from_str(raw).context("seed file is not a JSON array of todos")
}

/// Insert every todo in `path` and return how many were added.
pub async fn load(store: &dyn TodoStore, path: &Path) -> anyhow::Result<usize> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("failed to read seed file `{}`", path.display()))?;
    let todos = parse(&raw).with_context(|| format!("in `{}`", path.display()))?;
    let ids = store.insert_many(todos).await?;
    Ok(ids.len())
}
