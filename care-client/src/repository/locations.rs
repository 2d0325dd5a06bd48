//! `/locations` and the child location sub-record

use shared::models::{ChildLocation, Location};

use crate::CareClient;
use crate::error::ClientResult;

pub struct LocationRepository<'a> {
    client: &'a CareClient,
}

impl<'a> LocationRepository<'a> {
    pub fn new(client: &'a CareClient) -> Self {
        Self { client }
    }

    /// Practice locations for in-person consultations
    pub async fn list(&self) -> ClientResult<Vec<Location>> {
        self.client.get("/locations").await
    }

    pub async fn child_location(&self, child_id: i64) -> ClientResult<ChildLocation> {
        self.client
            .get(&format!("/location/{child_id}/location"))
            .await
    }

    pub async fn update_child_location(
        &self,
        child_id: i64,
        patch: &ChildLocation,
    ) -> ClientResult<ChildLocation> {
        self.client
            .patch(&format!("/location/{child_id}/location"), patch)
            .await
    }
}
