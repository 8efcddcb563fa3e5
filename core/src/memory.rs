//! In-process `TodoStore` keeping native BSON documents.
//!
//! Documents are held in insertion order behind a tokio `RwLock` and decoded
//! into `Todo`s on read, so they go through the same conversion as documents
//! coming back from MongoDB.

use async_trait::async_trait;
use bson::Document;
use tokio::sync::RwLock;

use crate::error::StoreError;
use crate::filter::TodoFilter;
use crate::store::TodoStore;
use crate::types::{NewTodo, Todo, TodoId, ID_KEY};

#[derive(Debug, Default)]
pub struct MemoryStore {
    docs: RwLock<Vec<Document>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a raw document as-is, assigning an `_id` only when it has none.
    #[cfg(test)]
    async fn insert_document(&self, mut doc: Document) -> TodoId {
        let id = match doc.get_object_id(ID_KEY) {
            Ok(oid) => TodoId::from(oid),
            Err(_) => {
                let id = TodoId::new();
                doc.insert(ID_KEY, id.as_object_id());
                id
            }
        };
        self.docs.write().await.push(doc);
        id
    }
}

fn with_new_id(todo: &NewTodo) -> (TodoId, Document) {
    let id = TodoId::new();
    let mut doc = todo.to_document();
    doc.insert(ID_KEY, id.as_object_id());
    (id, doc)
}

#[async_trait]
impl TodoStore for MemoryStore {
    async fn insert_one(&self, todo: NewTodo) -> Result<TodoId, StoreError> {
        let (id, doc) = with_new_id(&todo);
        self.docs.write().await.push(doc);
        Ok(id)
    }

    async fn insert_many(&self, todos: Vec<NewTodo>) -> Result<Vec<TodoId>, StoreError> {
        let mut docs = self.docs.write().await;
        let ids = todos
            .iter()
            .map(|todo| {
                let (id, doc) = with_new_id(todo);
                docs.push(doc);
                id
            })
            .collect();
        Ok(ids)
    }

    async fn find(&self, filter: &TodoFilter) -> Result<Vec<Todo>, StoreError> {
        let docs = self.docs.read().await;
        let mut todos = Vec::new();
        for doc in docs.iter() {
            let todo = Todo::try_from(doc)?;
            if filter.matches(&todo) {
                todos.push(todo);
            }
        }
        Ok(todos)
    }

    async fn find_by_id(&self, id: &TodoId) -> Result<Option<Todo>, StoreError> {
        let oid = id.as_object_id();
        let docs = self.docs.read().await;
        docs.iter()
            .find(|doc| doc.get_object_id(ID_KEY).is_ok_and(|found| found == oid))
            .map(Todo::try_from)
            .transpose()
    }

    async fn count(&self) -> Result<u64, StoreError> {
        Ok(self.docs.read().await.len() as u64)
    }
}
