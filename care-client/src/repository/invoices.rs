//! `/invoices`

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use shared::models::{Invoice, InvoiceCreate, InvoiceStatus, InvoiceStatusUpdate, ProofUpload};

use crate::CareClient;
use crate::error::{ClientError, ClientResult};

/// Largest payment proof accepted client-side
pub const MAX_PROOF_BYTES: usize = 5 * 1024 * 1024;

pub struct InvoiceRepository<'a> {
    client: &'a CareClient,
}

impl<'a> InvoiceRepository<'a> {
    pub fn new(client: &'a CareClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> ClientResult<Vec<Invoice>> {
        self.client.get("/invoices").await
    }

    pub async fn get(&self, id: i64) -> ClientResult<Invoice> {
        self.client.get(&format!("/invoices/{id}")).await
    }

    pub async fn create(&self, payload: &InvoiceCreate) -> ClientResult<Invoice> {
        self.client.require_session()?;
        if payload.number.trim().is_empty() {
            return Err(ClientError::Validation("Número da fatura é obrigatório".into()));
        }
        if payload.total.is_sign_negative() {
            return Err(ClientError::Validation("Total não pode ser negativo".into()));
        }
        self.client.post("/invoices", payload).await
    }

    pub async fn update_status(&self, id: i64, status: InvoiceStatus) -> ClientResult<Invoice> {
        self.client
            .patch(
                &format!("/invoices/{id}/status"),
                &InvoiceStatusUpdate { status },
            )
            .await
    }

    /// Attach a payment proof; the content type is guessed from `file_name`
    pub async fn upload_proof(
        &self,
        id: i64,
        file_name: &str,
        bytes: &[u8],
    ) -> ClientResult<Invoice> {
        self.client.require_session()?;
        let payload = proof_payload(file_name, bytes)?;
        self.client
            .post(&format!("/invoices/{id}/proof"), &payload)
            .await
    }
}

fn proof_payload(file_name: &str, bytes: &[u8]) -> ClientResult<ProofUpload> {
    if file_name.trim().is_empty() {
        return Err(ClientError::Validation("Nome do arquivo é obrigatório".into()));
    }
    if bytes.is_empty() {
        return Err(ClientError::Validation("Arquivo vazio".into()));
    }
    if bytes.len() > MAX_PROOF_BYTES {
        return Err(ClientError::Validation(format!(
            "Arquivo maior que {} MB",
            MAX_PROOF_BYTES / (1024 * 1024)
        )));
    }
    let content_type = mime_guess::from_path(file_name)
        .first_or_octet_stream()
        .essence_str()
        .to_string();

    Ok(ProofUpload {
        file_name: file_name.to_string(),
        content_type,
        data: STANDARD.encode(bytes),
    })
}
