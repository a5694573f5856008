//! Thin typed HTTP client shared by the backend API implementations.
//!
//! Performs one outbound call, validates the response body against the
//! expected shape, and classifies failures into [`BackendError`]. No
//! retries: failures are surfaced, never replayed.

use std::time::Duration;

use common::{USER_HEADER, Username};
use reqwest::{Method, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::BackendError;

/// Default per-request timeout applied when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Shared outbound HTTP client with a per-request timeout and identity
/// propagation via the `X-User-Name` header.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: reqwest::Client,
}

impl HttpClient {
    /// Creates a client with the given per-request timeout.
    pub fn new(timeout: Duration) -> Result<Self, BackendError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| BackendError::Internal(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { client })
    }

    /// Sends one request and classifies transport/status failures.
    ///
    /// Returns the raw response only for 2xx statuses; 404 becomes
    /// [`BackendError::NotFound`], connection failures become
    /// [`BackendError::Unavailable`], everything else is internal.
    async fn send(
        &self,
        method: Method,
        url: &str,
        user: Option<&Username>,
        body: Option<&(impl Serialize + ?Sized)>,
    ) -> Result<reqwest::Response, BackendError> {
        let mut request = self.client.request(method.clone(), url);
        if let Some(user) = user {
            request = request.header(USER_HEADER, user.as_str());
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(classify_transport)?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(BackendError::NotFound);
        }
        if !status.is_success() {
            tracing::error!(%method, url, %status, "backend returned error status");
            return Err(BackendError::Internal(format!(
                "backend responded {status}"
            )));
        }
        Ok(response)
    }

    /// GET expecting a body of shape `T`. An empty 2xx body is invalid.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        user: Option<&Username>,
    ) -> Result<T, BackendError> {
        let response = self.send(Method::GET, url, user, None::<&()>).await?;
        match read_body(url, response).await? {
            Some(value) => Ok(value),
            None => {
                tracing::error!(url, "backend returned an empty body for a required shape");
                Err(BackendError::invalid_response("empty response body"))
            }
        }
    }

    /// GET where an empty 2xx body means "absent".
    pub async fn get_optional<T: DeserializeOwned>(
        &self,
        url: &str,
        user: Option<&Username>,
    ) -> Result<Option<T>, BackendError> {
        let response = self.send(Method::GET, url, user, None::<&()>).await?;
        read_body(url, response).await
    }

    /// GET with query parameters, expecting a body of shape `T`.
    pub async fn get_json_with_query<Q: Serialize, T: DeserializeOwned>(
        &self,
        url: &str,
        query: &Q,
        user: Option<&Username>,
    ) -> Result<T, BackendError> {
        let mut request = self.client.get(url).query(query);
        if let Some(user) = user {
            request = request.header(USER_HEADER, user.as_str());
        }
        let response = request.send().await.map_err(classify_transport)?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(BackendError::NotFound);
        }
        if !status.is_success() {
            tracing::error!(url, %status, "backend returned error status");
            return Err(BackendError::Internal(format!(
                "backend responded {status}"
            )));
        }
        match read_body(url, response).await? {
            Some(value) => Ok(value),
            None => Err(BackendError::invalid_response("empty response body")),
        }
    }

    /// POST with a JSON body, expecting a body of shape `T`.
    pub async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        url: &str,
        user: Option<&Username>,
        body: &B,
    ) -> Result<T, BackendError> {
        let response = self.send(Method::POST, url, user, Some(body)).await?;
        match read_body(url, response).await? {
            Some(value) => Ok(value),
            None => Err(BackendError::invalid_response("empty response body")),
        }
    }

    /// POST without a body where the response content is irrelevant.
    pub async fn post_empty(&self, url: &str, user: Option<&Username>) -> Result<(), BackendError> {
        self.send(Method::POST, url, user, None::<&()>).await?;
        Ok(())
    }

    /// DELETE expecting a 2xx with no meaningful body.
    pub async fn delete(&self, url: &str, user: Option<&Username>) -> Result<(), BackendError> {
        self.send(Method::DELETE, url, user, None::<&()>).await?;
        Ok(())
    }

    /// GET forwarding the upstream status code and JSON body untouched.
    ///
    /// Only transport unreachability is classified; any response,
    /// success or not, is handed back as-is for the caller to forward.
    pub async fn get_raw(
        &self,
        url: &str,
        user: Option<&Username>,
    ) -> Result<(u16, serde_json::Value), BackendError> {
        let mut request = self.client.get(url);
        if let Some(user) = user {
            request = request.header(USER_HEADER, user.as_str());
        }
        let response = request.send().await.map_err(classify_transport)?;

        let status = response.status().as_u16();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| BackendError::Internal(format!("failed to read response body: {e}")))?;
        let body = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null)
        };
        Ok((status, body))
    }
}

fn classify_transport(err: reqwest::Error) -> BackendError {
    if err.is_connect() || err.is_timeout() {
        tracing::warn!(error = %err, "backend unreachable");
        BackendError::Unavailable
    } else {
        BackendError::Internal(err.to_string())
    }
}

/// Reads a 2xx response body: `None` for empty, parsed `T` otherwise.
///
/// A body that fails to parse into the expected shape is classified as
/// invalid-response and logged; serde's message names the offending
/// field (e.g. "missing field `price`").
async fn read_body<T: DeserializeOwned>(
    url: &str,
    response: reqwest::Response,
) -> Result<Option<T>, BackendError> {
    let bytes = response
        .bytes()
        .await
        .map_err(|e| BackendError::Internal(format!("failed to read response body: {e}")))?;

    if bytes.is_empty() {
        return Ok(None);
    }

    match serde_json::from_slice(&bytes) {
        Ok(value) => Ok(Some(value)),
        Err(e) => {
            tracing::error!(url, error = %e, "backend response failed shape validation");
            Err(BackendError::invalid_response(e.to_string()))
        }
    }
}
