//! `/reports`

use shared::models::{ConsultationWithReport, Report, ReportCreate, ReportUpdate};

use crate::CareClient;
use crate::error::ClientResult;

pub struct ReportRepository<'a> {
    client: &'a CareClient,
}

impl<'a> ReportRepository<'a> {
    pub fn new(client: &'a CareClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> ClientResult<Vec<Report>> {
        self.client.get("/reports").await
    }

    pub async fn get(&self, id: i64) -> ClientResult<Report> {
        self.client.get(&format!("/reports/{id}")).await
    }

    pub async fn create(&self, payload: &ReportCreate) -> ClientResult<Report> {
        self.client.post("/reports", payload).await
    }

    pub async fn update(&self, id: i64, payload: &ReportUpdate) -> ClientResult<Report> {
        self.client.put(&format!("/reports/{id}"), payload).await
    }

    pub async fn delete(&self, id: i64) -> ClientResult<()> {
        self.client.delete(&format!("/reports/{id}")).await
    }

    /// Consultation joined with its report (if written yet)
    pub async fn consultation_full(
        &self,
        consultation_id: i64,
    ) -> ClientResult<ConsultationWithReport> {
        self.client
            .get(&format!("/reports/consultation/{consultation_id}/full"))
            .await
    }
}
