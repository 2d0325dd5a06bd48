//! Consultation Model

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use super::UserRef;

/// Consultation status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConsultationStatus {
    #[default]
    Scheduled,
    Done,
    Cancelled,
}

impl ConsultationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Scheduled => "scheduled",
            Self::Done => "done",
            Self::Cancelled => "cancelled",
        }
    }
}

/// Consultation entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Consultation {
    pub id: i64,
    pub date: NaiveDate,
    /// 24-hour `HH:MM`
    pub time: String,
    pub reason: String,
    #[serde(default)]
    pub status: ConsultationStatus,
    #[serde(default)]
    pub notes: Option<String>,
    pub child_id: i64,
    pub psychologist_id: i64,
    #[serde(default)]
    pub start_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub end_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub is_in_person: Option<bool>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub child: Option<UserRef>,
    #[serde(default)]
    pub psychologist: Option<UserRef>,
}

impl Consultation {
    /// Start instant: `startAt` when present, otherwise `date` + `time`
    /// (midnight when `time` does not parse).
    pub fn scheduled_at(&self) -> NaiveDateTime {
        if let Some(start) = self.start_at {
            return start.naive_utc();
        }
        let time = NaiveTime::parse_from_str(&self.time, "%H:%M").unwrap_or(NaiveTime::MIN);
        self.date.and_time(time)
    }

    pub fn child_name(&self) -> Option<&str> {
        self.child.as_ref().map(|c| c.name.as_str())
    }

    pub fn psychologist_name(&self) -> Option<&str> {
        self.psychologist.as_ref().map(|p| p.name.as_str())
    }
}

/// Reduced projection for search/autocomplete
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsultationLite {
    pub id: i64,
    pub date: NaiveDate,
    pub time: String,
    pub reason: String,
    #[serde(default)]
    pub status: ConsultationStatus,
    pub child_id: i64,
    #[serde(default)]
    pub child_name: Option<String>,
}

impl From<&Consultation> for ConsultationLite {
    fn from(c: &Consultation) -> Self {
        Self {
            id: c.id,
            date: c.date,
            time: c.time.clone(),
            reason: c.reason.clone(),
            status: c.status,
            child_id: c.child_id,
            child_name: c.child_name().map(str::to_string),
        }
    }
}

/// Create consultation payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsultationCreate {
    pub date: NaiveDate,
    pub time: String,
    pub reason: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub child_id: i64,
    pub psychologist_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_in_person: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

/// Update consultation payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsultationUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ConsultationStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub psychologist_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_in_person: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}
