//! Document store abstraction.

use async_trait::async_trait;

use crate::error::StoreError;
use crate::filter::TodoFilter;
use crate::types::{NewTodo, Todo, TodoId};

/// Name of the collection todos are kept in.
pub const COLLECTION: &str = "todos";

/// A collection of todo documents.
///
/// Implementations provide their own consistency for single-document reads
/// and writes; callers never coordinate.
#[async_trait]
pub trait TodoStore: Send + Sync {
    /// Insert one todo and return the id the store assigned to it.
    async fn insert_one(&self, todo: NewTodo) -> Result<TodoId, StoreError>;

    /// Insert several todos; ids come back in input order.
    async fn insert_many(&self, todos: Vec<NewTodo>) -> Result<Vec<TodoId>, StoreError>;

    /// All todos satisfying `filter`, in store order.
    async fn find(&self, filter: &TodoFilter) -> Result<Vec<Todo>, StoreError>;

    async fn find_by_id(&self, id: &TodoId) -> Result<Option<Todo>, StoreError>;

    async fn count(&self) -> Result<u64, StoreError>;
}
