//! MongoDB-backed `TodoStore`, enabled with the `mongo` feature.

use async_trait::async_trait;
use bson::{doc, Bson, Document};
use futures::TryStreamExt;
use mongodb::options::ClientOptions;
use mongodb::{Client, Collection, Database};

use crate::error::StoreError;
use crate::filter::TodoFilter;
use crate::store::{TodoStore, COLLECTION};
use crate::types::{NewTodo, Todo, TodoId, ID_KEY};

#[derive(Debug, Clone)]
pub struct MongoStore {
    collection: Collection<Document>,
}

impl MongoStore {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection::<Document>(COLLECTION),
        }
    }

    /// Connect to `uri` and use the `todos` collection of `database`.
    pub async fn connect(uri: &str, database: &str) -> Result<Self, StoreError> {
        let options = ClientOptions::parse(uri).await?;
        let client = Client::with_options(options)?;
        Ok(Self::new(&client.database(database)))
    }
}

impl From<mongodb::error::Error> for StoreError {
    fn from(err: mongodb::error::Error) -> Self {
        StoreError::Backend(err.to_string())
    }
}

fn inserted_id(id: &Bson) -> Result<TodoId, StoreError> {
    id.as_object_id()
        .map(TodoId::from)
        .ok_or_else(|| StoreError::Malformed(format!("inserted `{ID_KEY}` is not an ObjectId: {id}")))
}

#[async_trait]
impl TodoStore for MongoStore {
    async fn insert_one(&self, todo: NewTodo) -> Result<TodoId, StoreError> {
        let result = self.collection.insert_one(todo.to_document()).await?;
        inserted_id(&result.inserted_id)
    }

    async fn insert_many(&self, todos: Vec<NewTodo>) -> Result<Vec<TodoId>, StoreError> {
        if todos.is_empty() {
            return Ok(Vec::new());
        }
        let docs: Vec<Document> = todos.iter().map(NewTodo::to_document).collect();
        let result = self.collection.insert_many(docs).await?;
        let mut ids: Vec<(usize, &Bson)> = result.inserted_ids.iter().map(|(i, id)| (*i, id)).collect();
        ids.sort_by_key(|(i, _)| *i);
        ids.into_iter().map(|(_, id)| inserted_id(id)).collect()
    }

    async fn find(&self, filter: &TodoFilter) -> Result<Vec<Todo>, StoreError> {
        let cursor = self.collection.find(filter.to_document()).await?;
        let docs: Vec<Document> = cursor.try_collect().await?;
        docs.iter().map(Todo::try_from).collect()
    }

    async fn find_by_id(&self, id: &TodoId) -> Result<Option<Todo>, StoreError> {
        let found = self
            .collection
            .find_one(doc! { ID_KEY: id.as_object_id() })
            .await?;
        found.as_ref().map(Todo::try_from).transpose()
    }

    async fn count(&self) -> Result<u64, StoreError> {
        Ok(self.collection.count_documents(doc! {}).await?)
    }
}
