//! `/goals`

use shared::models::{Goal, GoalCreate, GoalStatus, GoalUpdate};

use crate::CareClient;
use crate::error::ClientResult;
use crate::validation::{GoalForm, check_progress};

pub struct GoalRepository<'a> {
    client: &'a CareClient,
}

impl<'a> GoalRepository<'a> {
    pub fn new(client: &'a CareClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> ClientResult<Vec<Goal>> {
        self.client.get("/goals").await
    }

    pub async fn get(&self, id: i64) -> ClientResult<Goal> {
        self.client.get(&format!("/goals/{id}")).await
    }

    pub async fn by_consultation(&self, consultation_id: i64) -> ClientResult<Vec<Goal>> {
        self.client.consultations().goals(consultation_id).await
    }

    pub async fn create(&self, payload: &GoalCreate) -> ClientResult<Goal> {
        self.client.require_session()?;
        check_progress(payload.progress)?;
        self.client.post("/goals", payload).await
    }

    /// Validate the goal form, then create the goal
    pub async fn add(&self, form: GoalForm) -> ClientResult<Goal> {
        self.client.require_session()?;
        let payload = form.into_payload()?;
        self.create(&payload).await
    }

    pub async fn update(&self, id: i64, payload: &GoalUpdate) -> ClientResult<Goal> {
        self.client.require_session()?;
        if let Some(progress) = payload.progress {
            check_progress(progress)?;
        }
        self.client.put(&format!("/goals/{id}"), payload).await
    }

    /// Set progress and derive the status from it (0 pending, 100 completed)
    pub async fn set_progress(&self, id: i64, progress: u8) -> ClientResult<Goal> {
        let payload = GoalUpdate {
            progress: Some(progress),
            status: Some(GoalStatus::from_progress(progress)),
            ..Default::default()
        };
        self.update(id, &payload).await
    }

    pub async fn delete(&self, id: i64) -> ClientResult<()> {
        self.client.delete(&format!("/goals/{id}")).await
    }
}
