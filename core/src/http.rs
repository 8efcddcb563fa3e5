//! Transport capability consumed by the controller.
//!
//! # Design
//! The controller never sees a web framework. It talks to a `Context`, which
//! hands out query and path parameters and the request body, and collects the
//! JSON body and status to answer with. `HttpExchange` implements `Context` as
//! plain data: the server fills in an `HttpRequest` from its extractors, runs
//! the controller, then turns the resulting `HttpResponse` into a real
//! response. Tests use the same type directly.

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ApiError;

/// HTTP method a route is registered under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

/// Response statuses the service produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpStatus {
    Ok,
    Created,
    BadRequest,
    NotFound,
    InternalServerError,
}

impl HttpStatus {
    pub fn code(self) -> u16 {
        match self {
            HttpStatus::Ok => 200,
            HttpStatus::Created => 201,
            HttpStatus::BadRequest => 400,
            HttpStatus::NotFound => 404,
            HttpStatus::InternalServerError => 500,
        }
    }
}

/// Query parameters keyed by name, every value in arrival order.
pub type QueryParams = BTreeMap<String, Vec<String>>;

/// First value supplied for `key`, if any.
pub fn first_value<'a>(params: &'a QueryParams, key: &str) -> Option<&'a str> {
    params.get(key).and_then(|values| values.first()).map(String::as_str)
}

/// Request/response capability for a single HTTP exchange.
pub trait Context {
    fn query_param_map(&self) -> &QueryParams;

    fn query_param(&self, key: &str) -> Option<&str> {
        first_value(self.query_param_map(), key)
    }

    fn path_param(&self, key: &str) -> Option<&str>;

    fn body(&self) -> &[u8];

    /// Deserialize the JSON body, reporting any failure as `BadRequest`.
    fn body_as<T: DeserializeOwned>(&self) -> Result<T, ApiError> {
        serde_json::from_slice(self.body())
            .map_err(|e| ApiError::BadRequest(format!("invalid request body: {e}")))
    }

    fn json(&mut self, body: Value);

    fn status(&mut self, status: HttpStatus);
}

/// An incoming request described as plain data.
#[derive(Debug, Clone, Default)]
pub struct HttpRequest {
    pub query: QueryParams,
    pub path_params: BTreeMap<String, String>,
    pub body: Vec<u8>,
}

impl HttpRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_query(mut self, key: &str, value: &str) -> Self {
        self.query
            .entry(key.to_string())
            .or_default()
            .push(value.to_string());
        self
    }

    /// Append decoded `key=value` pairs, keeping repeated keys.
    pub fn with_query_pairs<I>(mut self, pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        for (key, value) in pairs {
            self.query.entry(key).or_default().push(value);
        }
        self
    }

    pub fn with_path_param(mut self, key: &str, value: &str) -> Self {
        self.path_params.insert(key.to_string(), value.to_string());
        self
    }

    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }
}

/// The answer collected from the controller.
///
/// `status` stays `None` when the controller failed before responding; the
/// caller then reports the returned `ApiError` instead.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HttpResponse {
    pub status: Option<HttpStatus>,
    pub body: Option<Value>,
}

/// One request/response pair.
#[derive(Debug, Clone, Default)]
pub struct HttpExchange {
    pub request: HttpRequest,
    pub response: HttpResponse,
}

impl HttpExchange {
    pub fn new(request: HttpRequest) -> Self {
        Self {
            request,
            response: HttpResponse::default(),
        }
    }

    pub fn into_response(self) -> HttpResponse {
        self.response
    }
}

impl Context for HttpExchange {
    fn query_param_map(&self) -> &QueryParams {
        &self.request.query
    }

    fn path_param(&self, key: &str) -> Option<&str> {
        self.request.path_params.get(key).map(String::as_str)
    }

    fn body(&self) -> &[u8] {
        &self.request.body
    }

    fn json(&mut self, body: Value) {
        self.response.body = Some(body);
    }

    fn status(&mut self, status: HttpStatus) {
        self.response.status = Some(status);
    }
}
