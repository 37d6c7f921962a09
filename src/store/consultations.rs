//! Consultation booking requests and their status lifecycle.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Status assigned to every new consultation.
pub const DEFAULT_STATUS: &str = "pending";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Consultation {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub service_area: Option<String>,
    pub project_type: Option<String>,
    pub project_details: Option<String>,
    /// Free-text slot label such as "morning" or "weekend".
    pub preferred_date: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

/// Validated booking input. Status is server-assigned and not part of it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NewConsultation {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub service_area: Option<String>,
    pub project_type: Option<String>,
    pub project_details: Option<String>,
    pub preferred_date: Option<String>,
}

impl NewConsultation {
    pub(super) fn to_record(&self, id: String, created_at: DateTime<Utc>) -> Consultation {
        Consultation {
            id,
            name: self.name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            service_area: self.service_area.clone(),
            project_type: self.project_type.clone(),
            project_details: self.project_details.clone(),
            preferred_date: self.preferred_date.clone(),
            status: DEFAULT_STATUS.to_string(),
            created_at,
        }
    }
}
