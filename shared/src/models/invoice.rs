//! Invoice Model

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::UserRef;

/// Invoice status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    #[default]
    Pending,
    Paid,
    Cancelled,
}

/// Invoice entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    pub id: i64,
    pub number: String,
    pub date: NaiveDate,
    pub total: Decimal,
    #[serde(default)]
    pub status: InvoiceStatus,
    pub customer_id: i64,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub proof_url: Option<String>,
    #[serde(default)]
    pub customer: Option<UserRef>,
}

impl Invoice {
    /// Pending past its due date
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        self.status == InvoiceStatus::Pending && self.due_date.is_some_and(|due| due < today)
    }
}

/// Create invoice payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceCreate {
    pub number: String,
    pub date: NaiveDate,
    pub total: Decimal,
    pub customer_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
}

/// Body of `PATCH /invoices/{id}/status`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoiceStatusUpdate {
    pub status: InvoiceStatus,
}

/// Body of `POST /invoices/{id}/proof`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProofUpload {
    pub file_name: String,
    pub content_type: String,
    /// Base64 (standard alphabet)
    pub data: String,
}
