//! HTTP Basic authentication gate for protected routes.
//!
//! The gate is stateless: every request is checked on its own against the
//! [`Credentials`] allow-list held in [`AppState`]. Any failure, whatever
//! its cause, produces the same 401 response.

use std::collections::HashMap;

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Response},
};
use base64::{engine::general_purpose, Engine as _};
use tracing::{debug, warn};

use super::error::AppError;
use super::state::AppState;

/// Accepted username/password pairs.
///
/// Built once at startup and injected through [`AppState`]; it is never
/// modified while serving.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    users: HashMap<String, String>,
}

impl Default for Credentials {
    fn default() -> Self {
        Self::from_pairs([("admin", "password123"), ("user1", "pass1"), ("user2", "pass2")])
    }
}

impl Credentials {
    /// Build an allow-list from `(username, password)` pairs.
    pub fn from_pairs<U, P>(pairs: impl IntoIterator<Item = (U, P)>) -> Self
    where
        U: Into<String>,
        P: Into<String>,
    {
        Self {
            users: pairs
                .into_iter()
                .map(|(u, p)| (u.into(), p.into()))
                .collect(),
        }
    }

    /// True when `username` is known and `password` matches it exactly.
    pub fn verify(&self, username: &str, password: &str) -> bool {
        self.users
            .get(username)
            .is_some_and(|expected| expected == password)
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

/// Why a request was refused. Only used for logging; the client always sees
/// a plain 401.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("missing Authorization header")]
    MissingHeader,
    #[error("Authorization header is not valid text")]
    InvalidHeader,
    #[error("authorization scheme is not Basic")]
    UnsupportedScheme,
    #[error("credentials are not valid base64")]
    InvalidEncoding,
    #[error("credentials are not in username:password form")]
    MalformedCredentials,
    #[error("unknown user or wrong password")]
    InvalidCredentials,
}

/// Split a `Basic <base64(username:password)>` header value.
///
/// The scheme must be exactly `Basic` followed by one space. The decoded
/// payload is split at the first `:`, so passwords may contain colons.
pub fn parse_basic_auth(value: &str) -> Result<(String, String), AuthError> {
    let (scheme, payload) = value
        .split_once(' ')
        .ok_or(AuthError::UnsupportedScheme)?;
    if scheme != "Basic" {
        return Err(AuthError::UnsupportedScheme);
    }

    let decoded = general_purpose::STANDARD
        .decode(payload)
        .map_err(|_| AuthError::InvalidEncoding)?;
    let decoded = String::from_utf8(decoded).map_err(|_| AuthError::InvalidEncoding)?;

    let (username, password) = decoded
        .split_once(':')
        .ok_or(AuthError::MalformedCredentials)?;
    Ok((username.to_string(), password.to_string()))
}

/// Check the `Authorization` header against `credentials`, returning the
/// authenticated username.
pub fn authenticate(headers: &HeaderMap, credentials: &Credentials) -> Result<String, AuthError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .ok_or(AuthError::MissingHeader)?
        .to_str()
        .map_err(|_| AuthError::InvalidHeader)?;
    if value.is_empty() {
        return Err(AuthError::MissingHeader);
    }

    let (username, password) = parse_basic_auth(value)?;
    if !credentials.verify(&username, &password) {
        return Err(AuthError::InvalidCredentials);
    }
    Ok(username)
}

/// Middleware guarding the `/students` routes.
pub async fn require_basic_auth(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    match authenticate(request.headers(), &state.credentials) {
        Ok(username) => {
            debug!(%username, path = %request.uri().path(), "request authenticated");
            next.run(request).await
        }
        Err(reason) => {
            warn!(
                %reason,
                method = %request.method(),
                path = %request.uri().path(),
                "rejecting unauthenticated request"
            );
            AppError::Unauthorized.into_response()
        }
    }
}
