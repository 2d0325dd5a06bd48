//! `/categories`

use shared::models::{Category, CategoryCreate};

use crate::CareClient;
use crate::error::{ClientError, ClientResult};

pub struct CategoryRepository<'a> {
    client: &'a CareClient,
}

impl<'a> CategoryRepository<'a> {
    pub fn new(client: &'a CareClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> ClientResult<Vec<Category>> {
        self.client.get("/categories").await
    }

    pub async fn create(&self, payload: &CategoryCreate) -> ClientResult<Category> {
        self.client.require_session()?;
        if payload.name.trim().is_empty() {
            return Err(ClientError::Validation("Nome da categoria é obrigatório".into()));
        }
        self.client.post("/categories", payload).await
    }
}
