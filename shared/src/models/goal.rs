//! Goal Model

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use super::Category;

/// Progress as sent by the backend: any number (or null), clamped to 0..=100
fn lenient_progress<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<f64>::deserialize(deserializer)?.unwrap_or(0.0);
    if value.is_nan() {
        return Ok(0);
    }
    Ok(value.clamp(0.0, 100.0).round() as u8)
}

/// Goal status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
}

impl GoalStatus {
    pub const ALL: [GoalStatus; 3] = [Self::Pending, Self::InProgress, Self::Completed];

    /// 0 is pending, 100 is completed, anything between is in progress
    pub fn from_progress(progress: u8) -> Self {
        match progress {
            0 => Self::Pending,
            p if p >= 100 => Self::Completed,
            _ => Self::InProgress,
        }
    }
}

/// Therapeutic goal attached to a consultation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: GoalStatus,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    pub consultation_id: i64,
    #[serde(default)]
    pub category_id: Option<i64>,
    /// Percentage, 0..=100
    #[serde(default, deserialize_with = "lenient_progress")]
    pub progress: u8,
    #[serde(default)]
    pub category: Option<Category>,
}

impl Goal {
    /// Past due and not completed
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        self.status != GoalStatus::Completed && self.due_date.is_some_and(|due| due < today)
    }
}

/// Create goal payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalCreate {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub status: GoalStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    pub consultation_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<i64>,
    #[serde(default)]
    pub progress: u8,
}

/// Update goal payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<GoalStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress: Option<u8>,
}
