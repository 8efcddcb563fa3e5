//! Core of the todo service: list filtering, lookup by id and creation.
//!
//! # Overview
//! `TodoController` translates query parameters, path parameters and request
//! bodies into store queries and JSON responses. It depends on two seams:
//! - `TodoStore`, the document store (`MemoryStore` in process, `MongoStore`
//!   behind the `mongo` feature).
//! - `Context`, the transport. `HttpExchange` implements it as plain data so
//!   the server and the tests drive the controller the same way.
//!
//! # Design
//! - Query parameters are validated into a typed `TodoFilter` before any
//!   store access; a malformed value never reaches the store.
//! - Stored documents are decoded into typed `Todo`s at the store boundary.
//! - The crate does not depend on any web framework.

pub mod controller;
pub mod error;
pub mod filter;
pub mod http;
pub mod memory;
#[cfg(feature = "mongo")]
pub mod mongo;
pub mod store;
pub mod types;

pub use controller::{Endpoint, RouteRegistry, TodoController};
pub use error::{ApiError, StoreError};
pub use filter::TodoFilter;
pub use http::{Context, HttpExchange, HttpMethod, HttpRequest, HttpResponse, HttpStatus, QueryParams};
pub use memory::MemoryStore;
#[cfg(feature = "mongo")]
pub use mongo::MongoStore;
pub use store::TodoStore;
pub use types::{NewTodo, Todo, TodoId};
