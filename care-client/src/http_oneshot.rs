//! Oneshot HTTP client - in-process calls
//!
//! Requires the "in-process" feature.

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use http::Request;
use tower::ServiceExt;

use crate::error::{ClientError, ClientResult};
use crate::http::{ApiRequest, HttpClient, RawResponse};

/// Oneshot HTTP client
///
/// Calls an axum `Router` directly through Tower's `oneshot`, with the same
/// request shape and response handling as the network client.
///
/// # Example
///
/// ```ignore
/// use axum::Router;
/// use care_client::{CareClient, OneshotHttpClient};
///
/// let router: Router = build_backend();
/// let client = CareClient::with_transport(OneshotHttpClient::new(router), session);
/// ```
#[derive(Debug, Clone)]
pub struct OneshotHttpClient {
    router: Router,
}

impl OneshotHttpClient {
    /// `router` must already have its state attached
    pub fn new(router: Router) -> Self {
        Self { router }
    }

    fn build_uri(request: &ApiRequest) -> ClientResult<String> {
        if request.query.is_empty() {
            return Ok(request.path.clone());
        }
        let mut url = reqwest::Url::parse("http://in-process")
            .and_then(|base| base.join(&request.path))
            .map_err(|e| ClientError::Internal(format!("Invalid path {}: {}", request.path, e)))?;
        url.query_pairs_mut().extend_pairs(request.query.iter());
        Ok(format!("{}?{}", url.path(), url.query().unwrap_or_default()))
    }

    fn build_request(request: &ApiRequest) -> ClientResult<Request<Body>> {
        let mut builder = Request::builder()
            .method(request.method.clone())
            .uri(Self::build_uri(request)?);

        if let Some(auth) = request.auth_header() {
            builder = builder.header(http::header::AUTHORIZATION, auth);
        }

        let body = match &request.body {
            Some(json) => {
                builder = builder.header(http::header::CONTENT_TYPE, "application/json");
                Body::from(serde_json::to_vec(json)?)
            }
            None => Body::empty(),
        };

        builder
            .body(body)
            .map_err(|e| ClientError::Internal(format!("Failed to build request: {}", e)))
    }
}

#[async_trait]
impl HttpClient for OneshotHttpClient {
    async fn send(&self, request: ApiRequest) -> ClientResult<RawResponse> {
        let http_request = Self::build_request(&request)?;

        let response = self
            .router
            .clone()
            .oneshot(http_request)
            .await
            .map_err(|e| ClientError::Internal(format!("Oneshot call failed: {}", e)))?;

        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .map_err(|e| ClientError::Internal(format!("Failed to read body: {}", e)))?;

        Ok(RawResponse {
            status,
            body: body.to_vec(),
        })
    }
}
