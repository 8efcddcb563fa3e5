use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{on, MethodFilter, MethodRouter},
    Json, Router,
};
use serde::Serialize;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use todo_core::controller::ID_PARAM;
use todo_core::{
    ApiError, Endpoint, HttpExchange, HttpMethod, HttpRequest, HttpResponse, HttpStatus,
    RouteRegistry, TodoController, TodoStore,
};

pub mod config;
pub mod logging;
pub mod seed;

#[derive(Clone)]
pub struct AppState {
    controller: Arc<TodoController>,
}

impl AppState {
    pub fn new(store: Arc<dyn TodoStore>) -> Self {
        Self {
            controller: Arc::new(TodoController::new(store)),
        }
    }

    async fn respond(&self, endpoint: Endpoint, request: HttpRequest) -> Result<Response, AppError> {
        let mut exchange = HttpExchange::new(request);
        self.controller.handle(endpoint, &mut exchange).await?;
        Ok(render(exchange.into_response()))
    }
}

pub fn app(store: Arc<dyn TodoStore>) -> Router {
    let state = AppState::new(store);
    let mut routes = AxumRoutes::default();
    state.controller.add_routes(&mut routes);

    routes
        .into_router()
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run(listener: TcpListener, store: Arc<dyn TodoStore>) -> Result<(), std::io::Error> {
    axum::serve(listener, app(store))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}

/// Collects controller routes, merging methods registered on the same path.
#[derive(Default)]
struct AxumRoutes {
    paths: BTreeMap<String, MethodRouter<AppState>>,
}

impl AxumRoutes {
    fn into_router(self) -> Router<AppState> {
        self.paths
            .into_iter()
            .fold(Router::new(), |router, (path, methods)| router.route(&path, methods))
    }
}

impl RouteRegistry for AxumRoutes {
    fn route(&mut self, method: HttpMethod, path: &str, endpoint: Endpoint) {
        let filter = match method {
            HttpMethod::Get => MethodFilter::GET,
            HttpMethod::Post => MethodFilter::POST,
        };
        let added = match endpoint {
            Endpoint::ListTodos => on(filter, list_todos),
            Endpoint::GetTodo => on(filter, get_todo),
            Endpoint::CreateTodo => on(filter, create_todo),
        };
        let merged = match self.paths.remove(path) {
            Some(existing) => existing.merge(added),
            None => added,
        };
        self.paths.insert(path.to_string(), merged);
    }
}

async fn list_todos(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Response, AppError> {
    let request = HttpRequest::new().with_query_pairs(pairs);
    state.respond(Endpoint::ListTodos, request).await
}

async fn get_todo(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let request = HttpRequest::new().with_path_param(ID_PARAM, &id);
    state.respond(Endpoint::GetTodo, request).await
}

async fn create_todo(State(state): State<AppState>, body: Bytes) -> Result<Response, AppError> {
    let request = HttpRequest::new().with_body(body.to_vec());
    state.respond(Endpoint::CreateTodo, request).await
}

fn status_code(status: HttpStatus) -> StatusCode {
    StatusCode::from_u16(status.code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}

fn render(response: HttpResponse) -> Response {
    let status = status_code(response.status.unwrap_or(HttpStatus::Ok));
    match response.body {
        Some(body) => (status, Json(body)).into_response(),
        None => status.into_response(),
    }
}

/// Error body sent for any failed request.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: &'static str,
    pub message: String,
}

/// `ApiError` rendered as an HTTP response.
#[derive(Debug)]
pub struct AppError(pub ApiError);

impl From<ApiError> for AppError {
    fn from(err: ApiError) -> Self {
        Self(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.0.status();
        let code = match status {
            HttpStatus::BadRequest => "BAD_REQUEST",
            HttpStatus::NotFound => "NOT_FOUND",
            _ => "INTERNAL_SERVER_ERROR",
        };
        let message = if status == HttpStatus::InternalServerError {
            tracing::error!(error = %self.0, "request failed");
            "an internal error occurred".to_string()
        } else {
            tracing::debug!(error = %self.0, "rejected request");
            self.0.to_string()
        };
        (status_code(status), Json(ErrorBody { code, message })).into_response()
    }
}
