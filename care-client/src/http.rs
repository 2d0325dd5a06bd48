//! HTTP transport
//!
//! Repositories describe a request as an [`ApiRequest`]; an [`HttpClient`]
//! delivers it and hands back the raw status and body. Decoding and error
//! mapping live in [`decode_response`] so every transport behaves the same.

use async_trait::async_trait;
use http::{Method, StatusCode};
use reqwest::Client;
use serde::Serialize;
use serde::de::DeserializeOwned;
use shared::ApiErrorBody;

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};

/// One request to the practice API
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    /// Absolute API path, e.g. `/children/4`
    pub path: String,
    pub query: Vec<(String, String)>,
    /// Bearer token; `None` only for public endpoints such as login
    pub bearer: Option<String>,
    pub body: Option<serde_json::Value>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            bearer: None,
            body: None,
        }
    }

    pub fn bearer(mut self, token: impl Into<String>) -> Self {
        self.bearer = Some(token.into());
        self
    }

    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> ClientResult<Self> {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }

    /// Build the `Authorization` header value
    pub(crate) fn auth_header(&self) -> Option<String> {
        self.bearer.as_ref().map(|t| format!("Bearer {}", t))
    }
}

/// Undecoded response
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: StatusCode,
    pub body: Vec<u8>,
}

/// HTTP client trait
#[async_trait]
pub trait HttpClient: Send + Sync + std::fmt::Debug {
    /// Deliver exactly one request
    async fn send(&self, request: ApiRequest) -> ClientResult<RawResponse>;
}

/// Decode a 2xx body as `T`, or map a failure to a [`ClientError`].
///
/// An empty 2xx body decodes as JSON `null`, so `T = ()` and `Option<_>`
/// work for 204 responses.
pub fn decode_response<T: DeserializeOwned>(response: RawResponse) -> ClientResult<T> {
    let RawResponse { status, body } = response;

    if !status.is_success() {
        let text = String::from_utf8_lossy(&body).to_string();
        let message = serde_json::from_slice::<ApiErrorBody>(&body)
            .ok()
            .and_then(|b| b.message().map(str::to_string))
            .unwrap_or(text);

        return Err(match status {
            StatusCode::UNAUTHORIZED => ClientError::Unauthorized(message),
            StatusCode::FORBIDDEN => ClientError::Forbidden(message),
            StatusCode::NOT_FOUND => ClientError::NotFound(message),
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                ClientError::Validation(message)
            }
            _ => ClientError::Api { status, message },
        });
    }

    let body: &[u8] = if body.iter().all(u8::is_ascii_whitespace) {
        b"null"
    } else {
        &body
    };

    serde_json::from_slice(body)
        .map_err(|e| ClientError::InvalidResponse(format!("JSON parse error: {}", e)))
}

/// Network HTTP client backed by one shared `reqwest::Client`
#[derive(Debug, Clone)]
pub struct NetworkHttpClient {
    client: Client,
    base_url: String,
}

impl NetworkHttpClient {
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .default_headers({
                let mut headers = reqwest::header::HeaderMap::new();
                headers.insert(
                    reqwest::header::ACCEPT,
                    reqwest::header::HeaderValue::from_static("application/json"),
                );
                headers
            })
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Base URL without trailing slash
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl HttpClient for NetworkHttpClient {
    async fn send(&self, request: ApiRequest) -> ClientResult<RawResponse> {
        let url = format!("{}{}", self.base_url, request.path);
        let mut req = self.client.request(request.method.clone(), &url);

        if !request.query.is_empty() {
            req = req.query(&request.query);
        }
        if let Some(auth) = request.auth_header() {
            req = req.header(reqwest::header::AUTHORIZATION, auth);
        }
        if let Some(body) = &request.body {
            req = req.json(body);
        }

        let response = req.send().await?;
        let status = response.status();
        let body = response.bytes().await?.to_vec();
        Ok(RawResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(status: StatusCode, body: &str) -> RawResponse {
        RawResponse {
            status,
            body: body.as_bytes().to_vec(),
        }
    }

    #[test]
    fn test_decode_success() {
        let v: Vec<i64> = decode_response(raw(StatusCode::OK, "[1,2,3]")).unwrap();
        assert_eq!(v, vec![1, 2, 3]);
    }

    #[test]
    fn test_decode_empty_body_as_unit() {
        let () = decode_response(raw(StatusCode::NO_CONTENT, "")).unwrap();
        let v: Option<i64> = decode_response(raw(StatusCode::OK, "  ")).unwrap();
        assert_eq!(v, None);
    }

    #[test]
    fn test_error_mapping_uses_backend_message() {
        let err = decode_response::<()>(raw(
            StatusCode::BAD_REQUEST,
            r#"{"message":"Campo obrigatório"}"#,
        ))
        .unwrap_err();
        assert!(matches!(err, ClientError::Validation(ref m) if m == "Campo obrigatório"));

        let err = decode_response::<()>(raw(StatusCode::NOT_FOUND, "no route")).unwrap_err();
        assert!(matches!(err, ClientError::NotFound(ref m) if m == "no route"));

        let err = decode_response::<()>(raw(StatusCode::CONFLICT, r#"{"error":"dup"}"#)).unwrap_err();
        assert!(
            matches!(err, ClientError::Api { status, ref message } if status == StatusCode::CONFLICT && message == "dup")
        );
    }

    #[test]
    fn test_invalid_json() {
        let err = decode_response::<Vec<i64>>(raw(StatusCode::OK, "{oops")).unwrap_err();
        assert!(matches!(err, ClientError::InvalidResponse(_)));
    }

    #[test]
    fn test_request_builder() {
        let req = ApiRequest::new(Method::GET, "/children/lite")
            .query("search", "ana")
            .bearer("tok");
        assert_eq!(req.auth_header().as_deref(), Some("Bearer tok"));
        assert_eq!(req.query, vec![("search".to_string(), "ana".to_string())]);
    }
}
