//! `/children`

use shared::models::{Child, ChildCreate, ChildLite, ChildUpdate, PsychologistLink, User};

use super::lite_with_fallback;
use crate::CareClient;
use crate::error::ClientResult;
use crate::validation::ChildForm;
use crate::view::filter::matches_text;

pub struct ChildRepository<'a> {
    client: &'a CareClient,
}

impl<'a> ChildRepository<'a> {
    pub fn new(client: &'a CareClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> ClientResult<Vec<Child>> {
        self.client.get("/children").await
    }

    pub async fn get(&self, id: i64) -> ClientResult<Child> {
        self.client.get(&format!("/children/{id}")).await
    }

    pub async fn create(&self, payload: &ChildCreate) -> ClientResult<Child> {
        self.client.post("/children", payload).await
    }

    /// Validate the create-child form, then create the child
    pub async fn register(&self, form: ChildForm) -> ClientResult<Child> {
        self.client.require_session()?;
        let payload = form.into_payload()?;
        self.create(&payload).await
    }

    pub async fn update(&self, id: i64, payload: &ChildUpdate) -> ClientResult<Child> {
        self.client.put(&format!("/children/{id}"), payload).await
    }

    pub async fn delete(&self, id: i64) -> ClientResult<()> {
        self.client.delete(&format!("/children/{id}")).await
    }

    /// Psychologists linked through the many-to-many join
    pub async fn psychologists(&self, id: i64) -> ClientResult<Vec<User>> {
        self.client
            .get(&format!("/children/{id}/psychologists"))
            .await
    }

    pub async fn link_psychologist(&self, id: i64, psychologist_id: i64) -> ClientResult<()> {
        let _: serde_json::Value = self
            .client
            .post(
                &format!("/children/{id}/psychologists"),
                &PsychologistLink { psychologist_id },
            )
            .await?;
        Ok(())
    }

    pub async fn unlink_psychologist(&self, id: i64, psychologist_id: i64) -> ClientResult<()> {
        self.client
            .delete(&format!("/children/{id}/psychologists/{psychologist_id}"))
            .await
    }

    /// Name search for autocomplete
    pub async fn search_lite(&self, query: &str) -> ClientResult<Vec<ChildLite>> {
        lite_with_fallback::<Child, ChildLite, _>(
            self.client,
            "/children/lite",
            "/children",
            query,
            |child, q| matches_text(q, [child.name.as_str()]),
        )
        .await
    }
}
