//! Child Model

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::UserRef;

/// Child status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChildStatus {
    #[default]
    Active,
    Inactive,
}

/// Child entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Child {
    pub id: i64,
    pub name: String,
    pub birthdate: NaiveDate,
    #[serde(default)]
    pub gender: Option<String>,
    pub parent_id: i64,
    /// Legacy single link; the many-to-many join lives at `/children/{id}/psychologists`
    #[serde(default)]
    pub psychologist_id: Option<i64>,
    #[serde(default)]
    pub status: ChildStatus,
    #[serde(default)]
    pub parent: Option<UserRef>,
    #[serde(default)]
    pub psychologists: Vec<UserRef>,
}

impl Child {
    /// Age in whole years on `today`
    pub fn age_on(&self, today: NaiveDate) -> u32 {
        let mut years = today.year() - self.birthdate.year();
        if (today.month(), today.day()) < (self.birthdate.month(), self.birthdate.day()) {
            years -= 1;
        }
        years.max(0) as u32
    }

    /// Whether the psychologist follows this child, via the join list or the legacy link
    pub fn is_followed_by(&self, psychologist_id: i64) -> bool {
        self.psychologist_id == Some(psychologist_id)
            || self.psychologists.iter().any(|p| p.id == psychologist_id)
    }
}

/// Reduced projection for search/autocomplete
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChildLite {
    pub id: i64,
    pub name: String,
    pub parent_id: i64,
}

impl From<&Child> for ChildLite {
    fn from(child: &Child) -> Self {
        Self {
            id: child.id,
            name: child.name.clone(),
            parent_id: child.parent_id,
        }
    }
}

/// Create child payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChildCreate {
    pub name: String,
    pub birthdate: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    pub parent_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub psychologist_id: Option<i64>,
}

/// Update child payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChildUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birthdate: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ChildStatus>,
}

/// Body of `POST /children/{id}/psychologists`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PsychologistLink {
    pub psychologist_id: i64,
}
