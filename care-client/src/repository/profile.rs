//! Child health and school sub-records

use shared::models::{ChildHealth, ChildSchool};

use crate::CareClient;
use crate::error::ClientResult;

pub struct ProfileRepository<'a> {
    client: &'a CareClient,
}

impl<'a> ProfileRepository<'a> {
    pub fn new(client: &'a CareClient) -> Self {
        Self { client }
    }

    pub async fn health(&self, child_id: i64) -> ClientResult<ChildHealth> {
        self.client
            .get(&format!("/childrenHealth/{child_id}/health"))
            .await
    }

    pub async fn update_health(&self, child_id: i64, patch: &ChildHealth) -> ClientResult<ChildHealth> {
        self.client
            .patch(&format!("/childrenHealth/{child_id}/health"), patch)
            .await
    }

    pub async fn school(&self, child_id: i64) -> ClientResult<ChildSchool> {
        self.client
            .get(&format!("/childrenSchool/{child_id}/school"))
            .await
    }

    pub async fn update_school(&self, child_id: i64, patch: &ChildSchool) -> ClientResult<ChildSchool> {
        self.client
            .patch(&format!("/childrenSchool/{child_id}/school"), patch)
            .await
    }
}
