//! `/users`

use shared::models::{Role, User, UserCreate, UserStatusUpdate, UserUpdate};

use crate::CareClient;
use crate::error::ClientResult;
use crate::validation::UserForm;

pub struct UserRepository<'a> {
    client: &'a CareClient,
}

impl<'a> UserRepository<'a> {
    pub fn new(client: &'a CareClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> ClientResult<Vec<User>> {
        self.client.get("/users").await
    }

    /// Users with `role`, filtered client-side
    pub async fn list_by_role(&self, role: Role) -> ClientResult<Vec<User>> {
        let users = self.list().await?;
        Ok(users.into_iter().filter(|u| u.role == role).collect())
    }

    pub async fn get(&self, id: i64) -> ClientResult<User> {
        self.client.get(&format!("/users/{id}")).await
    }

    pub async fn create(&self, payload: &UserCreate) -> ClientResult<User> {
        self.client.post("/users", payload).await
    }

    /// Validate the create-user form, then create the user
    pub async fn register(&self, form: UserForm) -> ClientResult<User> {
        self.client.require_session()?;
        let payload = form.into_payload()?;
        self.create(&payload).await
    }

    pub async fn update(&self, id: i64, payload: &UserUpdate) -> ClientResult<User> {
        self.client.put(&format!("/users/{id}"), payload).await
    }

    /// Activate or deactivate an account
    pub async fn update_status(&self, id: i64, is_active: bool) -> ClientResult<User> {
        self.client
            .patch(&format!("/users/{id}/status"), &UserStatusUpdate { is_active })
            .await
    }

    pub async fn delete(&self, id: i64) -> ClientResult<()> {
        self.client.delete(&format!("/users/{id}")).await
    }

    /// Psychologists related to user `id` (through the user's children)
    pub async fn psychologists_of(&self, id: i64) -> ClientResult<Vec<User>> {
        self.client.get(&format!("/users/{id}/psychologists")).await
    }

    /// Parents related to user `id` (through the psychologist's children)
    pub async fn parents_of(&self, id: i64) -> ClientResult<Vec<User>> {
        self.client.get(&format!("/users/{id}/parents")).await
    }
}
