//! `/consultations`

use shared::models::{
    Consultation, ConsultationCreate, ConsultationLite, ConsultationStatus, ConsultationUpdate,
    Goal,
};

use super::lite_with_fallback;
use crate::CareClient;
use crate::error::ClientResult;
use crate::validation::{check_consultation_create, check_consultation_update};
use crate::view::filter::matches_text;

pub struct ConsultationRepository<'a> {
    client: &'a CareClient,
}

impl<'a> ConsultationRepository<'a> {
    pub fn new(client: &'a CareClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> ClientResult<Vec<Consultation>> {
        self.client.get("/consultations").await
    }

    pub async fn get(&self, id: i64) -> ClientResult<Consultation> {
        self.client.get(&format!("/consultations/{id}")).await
    }

    /// Rejects a malformed `time` or a missing in-person `location` before sending
    pub async fn create(&self, payload: &ConsultationCreate) -> ClientResult<Consultation> {
        self.client.require_session()?;
        check_consultation_create(payload)?;
        self.client.post("/consultations", payload).await
    }

    pub async fn update(&self, id: i64, payload: &ConsultationUpdate) -> ClientResult<Consultation> {
        self.client.require_session()?;
        check_consultation_update(payload)?;
        self.client
            .put(&format!("/consultations/{id}"), payload)
            .await
    }

    /// Mark done / cancelled / scheduled
    pub async fn set_status(
        &self,
        id: i64,
        status: ConsultationStatus,
    ) -> ClientResult<Consultation> {
        let payload = ConsultationUpdate {
            status: Some(status),
            ..Default::default()
        };
        self.update(id, &payload).await
    }

    pub async fn delete(&self, id: i64) -> ClientResult<()> {
        self.client.delete(&format!("/consultations/{id}")).await
    }

    /// Goals scoped to one consultation
    pub async fn goals(&self, id: i64) -> ClientResult<Vec<Goal>> {
        self.client.get(&format!("/consultations/{id}/goals")).await
    }

    /// Search by reason, child, psychologist or date (`YYYY-MM-DD`)
    pub async fn search_lite(&self, query: &str) -> ClientResult<Vec<ConsultationLite>> {
        lite_with_fallback::<Consultation, ConsultationLite, _>(
            self.client,
            "/consultations/lite",
            "/consultations",
            query,
            |c, q| {
                let date = c.date.format("%Y-%m-%d").to_string();
                matches_text(
                    q,
                    [
                        c.reason.as_str(),
                        c.child_name().unwrap_or_default(),
                        c.psychologist_name().unwrap_or_default(),
                        date.as_str(),
                    ],
                )
            },
        )
        .await
    }
}
