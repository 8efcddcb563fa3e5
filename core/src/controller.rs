//! Query/lookup controller for the todo collection.
//!
//! # Design
//! `TodoController` holds only a handle to the store. Each operation reads
//! its inputs from a `Context`, validates them, queries the store and writes
//! a JSON body plus status back to the same `Context`. Validation failures
//! return `Err` before the store is touched, so the transport decides how to
//! render them.

use std::sync::Arc;

use serde_json::json;
use tracing::{debug, info, instrument};

use crate::error::ApiError;
use crate::filter::TodoFilter;
use crate::http::{Context, HttpMethod, HttpStatus};
use crate::store::TodoStore;
use crate::types::{NewTodo, TodoId};

pub const TODOS_PATH: &str = "/api/todos";
pub const TODO_PATH: &str = "/api/todos/{id}";
pub const ID_PARAM: &str = "id";

/// Operations a route can be bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    ListTodos,
    GetTodo,
    CreateTodo,
}

/// Something routes can be registered on.
pub trait RouteRegistry {
    fn route(&mut self, method: HttpMethod, path: &str, endpoint: Endpoint);
}

#[derive(Clone)]
pub struct TodoController {
    store: Arc<dyn TodoStore>,
}

impl TodoController {
    pub fn new(store: Arc<dyn TodoStore>) -> Self {
        Self { store }
    }

    pub fn add_routes<R: RouteRegistry + ?Sized>(&self, routes: &mut R) {
        routes.route(HttpMethod::Get, TODOS_PATH, Endpoint::ListTodos);
        routes.route(HttpMethod::Get, TODO_PATH, Endpoint::GetTodo);
        routes.route(HttpMethod::Post, TODOS_PATH, Endpoint::CreateTodo);
    }

    /// Run the operation bound to `endpoint`.
    #[instrument(skip(self, ctx))]
    pub async fn handle<C: Context>(&self, endpoint: Endpoint, ctx: &mut C) -> Result<(), ApiError> {
        match endpoint {
            Endpoint::ListTodos => self.get_todos(ctx).await,
            Endpoint::GetTodo => self.get_todo(ctx).await,
            Endpoint::CreateTodo => self.add_new_todo(ctx).await,
        }
    }

    /// List the todos matching the query parameters.
    ///
    /// # Errors
    /// `BadRequest` for a malformed filter value; store failures propagate.
    pub async fn get_todos<C: Context>(&self, ctx: &mut C) -> Result<(), ApiError> {
        let filter = TodoFilter::from_query(ctx.query_param_map())?;
        let todos = self.store.find(&filter).await?;
        debug!(?filter, count = todos.len(), "listed todos");

        ctx.json(serde_json::to_value(&todos)?);
        ctx.status(HttpStatus::Ok);
        Ok(())
    }

    /// Look up the todo named by the `id` path parameter.
    ///
    /// # Errors
    /// `BadRequest` when the id is not a well-formed ObjectId, `NotFound`
    /// when no todo has it.
    pub async fn get_todo<C: Context>(&self, ctx: &mut C) -> Result<(), ApiError> {
        let id = parse_id(ctx.path_param(ID_PARAM))?;
        let todo = self
            .store
            .find_by_id(&id)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("the requested todo `{id}` was not found")))?;
        debug!(%id, "found todo");

        ctx.json(serde_json::to_value(&todo)?);
        ctx.status(HttpStatus::Ok);
        Ok(())
    }

    /// Insert the todo in the request body and answer with its new id.
    ///
    /// # Errors
    /// `BadRequest` when the body is not a todo.
    pub async fn add_new_todo<C: Context>(&self, ctx: &mut C) -> Result<(), ApiError> {
        let todo: NewTodo = ctx.body_as()?;
        let id = self.store.insert_one(todo).await?;
        info!(%id, "created todo");

        ctx.json(json!({ "id": id.to_hex() }));
        ctx.status(HttpStatus::Created);
        Ok(())
    }
}

fn parse_id(raw: Option<&str>) -> Result<TodoId, ApiError> {
    let raw = raw.unwrap_or_default();
    raw.parse().map_err(|_| {
        ApiError::BadRequest(format!(
            "the requested todo id wasn't a legal Mongo Object ID: `{raw}`"
        ))
    })
}
