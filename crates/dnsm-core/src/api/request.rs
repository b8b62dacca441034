use std::fmt;

use serde::Serialize;
use serde_json::Value;

use super::ApiError;

/// Login endpoint. Its failures are reported by the login workflow itself.
pub const LOGIN_PATH: &str = "/api/v1/user/login";

/// Logout endpoint. Called best-effort, often with a session that is already gone.
pub const LOGOUT_PATH: &str = "/api/v1/user/logout";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        };
        f.write_str(name)
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

/// A call before it reaches the transport. `path` is relative to the API base URL.
#[derive(Debug, Clone, PartialEq)]
pub struct OutboundRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
    pub bearer: Option<String>,
}

impl OutboundRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
            bearer: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::Post, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::Put, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete, path)
    }

    pub fn query(mut self, key: &str, value: impl ToString) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }

    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self, ApiError> {
        let value = serde_json::to_value(body).map_err(|e| ApiError::Encode(e.to_string()))?;
        self.body = Some(value);
        Ok(self)
    }

    /// True for the dedicated login and logout endpoints, matched exactly.
    pub fn is_auth_endpoint(&self) -> bool {
        self.method == Method::Post && (self.path == LOGIN_PATH || self.path == LOGOUT_PATH)
    }
}

/// Attach the session token as a bearer credential, or strip any credential
/// when there is no session.
pub fn authorize(request: OutboundRequest, token: Option<&str>) -> OutboundRequest {
    OutboundRequest {
        bearer: token.map(str::to_owned),
        ..request
    }
}
