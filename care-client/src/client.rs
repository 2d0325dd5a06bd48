//! Practice API client
//!
//! [`CareClient`] pairs one transport with the session store. Every
//! authenticated helper resolves the bearer token first, so a missing
//! session fails with [`ClientError::Unauthenticated`] before anything
//! reaches the transport.

use std::sync::Arc;

use http::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;
use shared::models::User;
use shared::{LoginRequest, LoginResponse};

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::http::{ApiRequest, HttpClient, NetworkHttpClient, decode_response};
use crate::repository::{
    CategoryRepository, ChatRepository, ChildRepository, ConsultationRepository, GoalRepository,
    InvoiceRepository, LocationRepository, ProfileRepository, ReportRepository, UserRepository,
};
use crate::session::{SessionStorage, SessionStore};

/// Client for the practice-management REST API
#[derive(Debug, Clone)]
pub struct CareClient {
    http: Arc<dyn HttpClient>,
    session: SessionStore,
    config: ClientConfig,
}

impl CareClient {
    /// Network client; restores the persisted session when `session_path` is set
    pub fn new(config: ClientConfig) -> ClientResult<Self> {
        let http = NetworkHttpClient::new(&config)?;
        let session = match &config.session_path {
            Some(path) => SessionStore::restore(SessionStorage::new(path)),
            None => SessionStore::new(),
        };
        Ok(Self {
            http: Arc::new(http),
            session,
            config,
        })
    }

    /// Network client configured from the environment
    pub fn from_env() -> ClientResult<Self> {
        Self::new(ClientConfig::from_env()?)
    }

    /// Client over an arbitrary transport
    pub fn with_transport(http: impl HttpClient + 'static, session: SessionStore) -> Self {
        Self {
            http: Arc::new(http),
            session,
            config: ClientConfig::default(),
        }
    }

    /// In-process client calling `router` directly
    #[cfg(feature = "in-process")]
    pub fn in_process(router: axum::Router, session: SessionStore) -> Self {
        Self::with_transport(crate::http_oneshot::OneshotHttpClient::new(router), session)
    }

    pub fn with_config(mut self, config: ClientConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    // ========== Auth ==========

    /// Authenticate, persist `{user, token}` and return the user.
    ///
    /// No retry and no refresh-token flow.
    pub async fn login(&self, email: &str, password: &str) -> ClientResult<User> {
        let request = ApiRequest::new(Method::POST, "/auth/login").json(&LoginRequest {
            email: email.trim().to_string(),
            password: password.to_string(),
        })?;

        let response: LoginResponse = decode_response(self.http.send(request).await?)?;
        if response.token.is_empty() {
            return Err(ClientError::InvalidResponse("Missing token in login response".into()));
        }

        self.session.set_user(response.user.clone(), response.token)?;
        tracing::info!(user_id = response.user.id, role = %response.user.role, "Logged in");
        Ok(response.user)
    }

    /// Drop the session, in memory and on disk
    pub fn logout(&self) -> ClientResult<()> {
        self.session.logout()?;
        tracing::info!("Logged out");
        Ok(())
    }

    // ========== Authenticated requests ==========

    /// Fail with [`ClientError::Unauthenticated`] when no token is available.
    /// Calls that check their input locally run this first.
    pub fn require_session(&self) -> ClientResult<()> {
        self.session.bearer().map(|_| ())
    }

    /// Send `request` with the session's bearer token attached
    pub async fn execute<T: DeserializeOwned>(&self, request: ApiRequest) -> ClientResult<T> {
        let token = self.session.bearer()?;
        let request = request.bearer(token);
        tracing::debug!(method = %request.method, path = %request.path, "API request");
        decode_response(self.http.send(request).await?)
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        self.execute(ApiRequest::new(Method::GET, path)).await
    }

    pub async fn get_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> ClientResult<T> {
        let mut request = ApiRequest::new(Method::GET, path);
        for (key, value) in query {
            request = request.query(*key, *value);
        }
        self.execute(request).await
    }

    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        self.execute(ApiRequest::new(Method::POST, path).json(body)?)
            .await
    }

    pub async fn put<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        self.execute(ApiRequest::new(Method::PUT, path).json(body)?)
            .await
    }

    pub async fn patch<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        self.execute(ApiRequest::new(Method::PATCH, path).json(body)?)
            .await
    }

    pub async fn delete(&self, path: &str) -> ClientResult<()> {
        let _: serde_json::Value = self.execute(ApiRequest::new(Method::DELETE, path)).await?;
        Ok(())
    }

    // ========== Repositories ==========

    pub fn users(&self) -> UserRepository<'_> {
        UserRepository::new(self)
    }

    pub fn children(&self) -> ChildRepository<'_> {
        ChildRepository::new(self)
    }

    pub fn consultations(&self) -> ConsultationRepository<'_> {
        ConsultationRepository::new(self)
    }

    pub fn goals(&self) -> GoalRepository<'_> {
        GoalRepository::new(self)
    }

    pub fn reports(&self) -> ReportRepository<'_> {
        ReportRepository::new(self)
    }

    pub fn invoices(&self) -> InvoiceRepository<'_> {
        InvoiceRepository::new(self)
    }

    pub fn chats(&self) -> ChatRepository<'_> {
        ChatRepository::new(self)
    }

    pub fn locations(&self) -> LocationRepository<'_> {
        LocationRepository::new(self)
    }

    pub fn categories(&self) -> CategoryRepository<'_> {
        CategoryRepository::new(self)
    }

    pub fn profiles(&self) -> ProfileRepository<'_> {
        ProfileRepository::new(self)
    }
}
