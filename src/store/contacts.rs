//! Contact-form submissions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How the prospect wants to be reached back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PreferredContact {
    Phone,
    Email,
    Either,
}

impl PreferredContact {
    pub const VALUES: [&'static str; 3] = ["phone", "email", "either"];
}

impl FromStr for PreferredContact {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "phone" => Ok(PreferredContact::Phone),
            "email" => Ok(PreferredContact::Email),
            "either" => Ok(PreferredContact::Either),
            other => Err(format!(
                "expected one of {}, got {other:?}",
                Self::VALUES.join(", ")
            )),
        }
    }
}

impl fmt::Display for PreferredContact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PreferredContact::Phone => "phone",
            PreferredContact::Email => "email",
            PreferredContact::Either => "either",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub service_area: Option<String>,
    pub project_type: Option<String>,
    pub project_details: Option<String>,
    pub preferred_contact: Option<PreferredContact>,
    pub created_at: DateTime<Utc>,
}

/// Validated contact-form input.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NewContact {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub service_area: Option<String>,
    pub project_type: Option<String>,
    pub project_details: Option<String>,
    pub preferred_contact: Option<PreferredContact>,
}

impl NewContact {
    pub(super) fn to_record(&self, id: String, created_at: DateTime<Utc>) -> Contact {
        Contact {
            id,
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            service_area: self.service_area.clone(),
            project_type: self.project_type.clone(),
            project_details: self.project_details.clone(),
            preferred_contact: self.preferred_contact,
            created_at,
        }
    }
}
