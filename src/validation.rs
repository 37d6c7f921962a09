//! # Validation — Request Body Schemas
//!
//! Turns untrusted JSON bodies into the store's create-input types. Every
//! field is checked and all failures are collected, so a client gets the full
//! list of problems in one response. Unknown keys are ignored; optional keys
//! that are missing or `null` become `None`.
//!
//! Validation runs before any store call, so a rejected body never leaves a
//! partial record behind.

use crate::estimate::{self, Estimate, EstimateError};
use crate::store::{NewConsultation, NewContact, NewCostEstimate, PreferredContact};
use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

/// Largest amount a saved estimate may carry (ten digits, two after the point).
pub const MAX_AMOUNT: f64 = 99_999_999.99;

/// One failed field. `path` is the JSON key, empty for the body itself.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldIssue {
    pub path: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Error)]
#[error("{} invalid field(s)", .issues.len())]
pub struct ValidationErrors {
    pub issues: Vec<FieldIssue>,
}

impl ValidationErrors {
    /// A failure of the body as a whole (not JSON, not an object, ...).
    pub fn body(message: impl Into<String>) -> Self {
        ValidationErrors {
            issues: vec![FieldIssue {
                path: String::new(),
                message: message.into(),
            }],
        }
    }

    pub fn has_path(&self, path: &str) -> bool {
        self.issues.iter().any(|issue| issue.path == path)
    }
}

struct Fields<'a> {
    obj: Option<&'a Map<String, Value>>,
    issues: Vec<FieldIssue>,
}

impl<'a> Fields<'a> {
    fn new(body: &'a Value) -> Self {
        let obj = body.as_object();
        let mut issues = Vec::new();
        if obj.is_none() {
            issues.push(FieldIssue {
                path: String::new(),
                message: "Expected a JSON object".to_string(),
            });
        }
        Fields { obj, issues }
    }

    fn issue(&mut self, key: &str, message: impl Into<String>) {
        self.issues.push(FieldIssue {
            path: key.to_string(),
            message: message.into(),
        });
    }

    /// The value under `key`, treating `null` as missing.
    fn value(&self, key: &str) -> Option<&'a Value> {
        self.obj
            .and_then(|obj| obj.get(key))
            .filter(|value| !value.is_null())
    }

    fn required_str(&mut self, key: &str) -> String {
        match self.value(key) {
            // body-level issue already recorded
            None if self.obj.is_none() => String::new(),
            None => {
                self.issue(key, "Required");
                String::new()
            }
            Some(Value::String(s)) if s.trim().is_empty() => {
                self.issue(key, "Must not be empty");
                String::new()
            }
            Some(Value::String(s)) => s.clone(),
            Some(_) => {
                self.issue(key, "Expected string");
                String::new()
            }
        }
    }

    fn optional_str(&mut self, key: &str) -> Option<String> {
        match self.value(key)? {
            Value::String(s) => Some(s.clone()),
            _ => {
                self.issue(key, "Expected string");
                None
            }
        }
    }

    fn optional_preferred_contact(&mut self, key: &str) -> Option<PreferredContact> {
        let raw = self.optional_str(key)?;
        match raw.parse::<PreferredContact>() {
            Ok(pc) => Some(pc),
            Err(message) => {
                self.issue(key, message);
                None
            }
        }
    }

    fn optional_count(&mut self, key: &str) -> Option<u32> {
        let value = self.value(key)?;
        match value.as_u64().and_then(|n| u32::try_from(n).ok()) {
            Some(n) => Some(n),
            None => {
                self.issue(key, "Expected a non-negative integer");
                None
            }
        }
    }

    /// Non-negative decimal given as a number or numeric string, kept to
    /// two decimal places and at most [`MAX_AMOUNT`].
    fn required_amount(&mut self, key: &str) -> f64 {
        let parsed = match self.value(key) {
            None if self.obj.is_none() => return 0.0,
            None => {
                self.issue(key, "Required");
                return 0.0;
            }
            Some(Value::Number(n)) => n.as_f64(),
            Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
            Some(_) => None,
        };
        let rounded = parsed
            .filter(|amount| amount.is_finite() && *amount >= 0.0)
            .map(|amount| (amount * 100.0).round() / 100.0);
        match rounded {
            Some(amount) if amount <= MAX_AMOUNT => amount,
            Some(_) => {
                self.issue(key, format!("Must not exceed {MAX_AMOUNT}"));
                0.0
            }
            None => {
                self.issue(key, "Expected a non-negative decimal amount");
                0.0
            }
        }
    }

    fn finish<T>(self, value: T) -> Result<T, ValidationErrors> {
        if self.issues.is_empty() {
            Ok(value)
        } else {
            Err(ValidationErrors {
                issues: self.issues,
            })
        }
    }
}

pub fn contact_input(body: &Value) -> Result<NewContact, ValidationErrors> {
    let mut f = Fields::new(body);
    let input = NewContact {
        first_name: f.required_str("firstName"),
        last_name: f.required_str("lastName"),
        email: f.required_str("email"),
        phone: f.required_str("phone"),
        service_area: f.optional_str("serviceArea"),
        project_type: f.optional_str("projectType"),
        project_details: f.optional_str("projectDetails"),
        preferred_contact: f.optional_preferred_contact("preferredContact"),
    };
    f.finish(input)
}

/// A `status` key in the body is ignored; new consultations are always pending.
pub fn consultation_input(body: &Value) -> Result<NewConsultation, ValidationErrors> {
    let mut f = Fields::new(body);
    let input = NewConsultation {
        name: f.required_str("name"),
        email: f.required_str("email"),
        phone: f.required_str("phone"),
        service_area: f.optional_str("serviceArea"),
        project_type: f.optional_str("projectType"),
        project_details: f.optional_str("projectDetails"),
        preferred_date: f.optional_str("preferredDate"),
    };
    f.finish(input)
}

pub fn cost_estimate_input(body: &Value) -> Result<NewCostEstimate, ValidationErrors> {
    let mut f = Fields::new(body);
    let input = NewCostEstimate {
        project_type: f.required_str("projectType"),
        square_footage: f.optional_count("squareFootage"),
        quality_level: f.required_str("qualityLevel"),
        estimated_cost: f.required_amount("estimatedCost"),
        materials_cost: f.required_amount("materialsCost"),
        labor_cost: f.required_amount("laborCost"),
        permits_cost: f.required_amount("permitsCost"),
    };
    f.finish(input)
}

/// Body of `PATCH /api/consultations/{id}/status`.
pub fn status_update(body: &Value) -> Result<String, ValidationErrors> {
    let mut f = Fields::new(body);
    let status = f.required_str("status");
    f.finish(status)
}

/// Body of `POST /api/estimate`, evaluated straight away.
pub fn estimate_request(body: &Value) -> Result<Estimate, ValidationErrors> {
    let mut f = Fields::new(body);
    let project_type = f.required_str("projectType");
    let square_footage = f.optional_count("squareFootage");
    let quality_level = f.required_str("qualityLevel");
    if !f.issues.is_empty() {
        return Err(ValidationErrors { issues: f.issues });
    }

    match estimate::estimate_from_input(&project_type, square_footage, &quality_level) {
        Ok(estimate) => Ok(estimate),
        Err(e) => {
            let path = match e {
                EstimateError::UnknownProjectType(_) => "projectType",
                EstimateError::InvalidQualityLevel(_) => "qualityLevel",
                EstimateError::MissingSquareFootage => "squareFootage",
            };
            Err(ValidationErrors {
                issues: vec![FieldIssue {
                    path: path.to_string(),
                    message: e.to_string(),
                }],
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn full_contact() -> Value {
        json!({
            "firstName": "Maria",
            "lastName": "Garza",
            "email": "maria@example.com",
            "phone": "979-555-0100",
            "serviceArea": "bryan",
            "projectType": "kitchen",
            "projectDetails": "Gut the kitchen",
            "preferredContact": "email",
        })
    }

    #[test]
    fn contact_all_fields() {
        let input = contact_input(&full_contact()).unwrap();
        assert_eq!(input.first_name, "Maria");
        assert_eq!(input.service_area.as_deref(), Some("bryan"));
        assert_eq!(input.preferred_contact, Some(PreferredContact::Email));
    }

    #[test]
    fn contact_missing_email_reported() {
        let mut body = full_contact();
        body.as_object_mut().unwrap().remove("email");
        let err = contact_input(&body).unwrap_err();
        assert_eq!(
            err.issues,
            vec![FieldIssue {
                path: "email".into(),
                message: "Required".into()
            }]
        );
    }

    #[test]
    fn contact_collects_every_issue() {
        let err = contact_input(&json!({ "firstName": "", "phone": 5 })).unwrap_err();
        assert!(err.has_path("firstName"));
        assert!(err.has_path("lastName"));
        assert!(err.has_path("email"));
        assert!(err.has_path("phone"));
        assert_eq!(err.issues.len(), 4);
    }

    #[test]
    fn contact_null_optionals_and_extra_keys() {
        let body = json!({
            "firstName": "Ana",
            "lastName": "Lopez",
            "email": "ana@example.com",
            "phone": "555",
            "serviceArea": null,
            "favouriteColour": "teal",
        });
        let input = contact_input(&body).unwrap();
        assert_eq!(input.service_area, None);
        assert_eq!(input.project_type, None);
        assert_eq!(input.preferred_contact, None);
    }

    #[test]
    fn contact_bad_preferred_contact() {
        let mut body = full_contact();
        body["preferredContact"] = json!("carrier pigeon");
        let err = contact_input(&body).unwrap_err();
        assert!(err.has_path("preferredContact"));
    }

    #[test]
    fn non_object_body_rejected() {
        let err = contact_input(&json!([1, 2, 3])).unwrap_err();
        assert_eq!(err.issues.len(), 1);
        assert!(err.has_path(""));
    }

    #[test]
    fn consultation_ignores_client_status() {
        let body = json!({
            "name": "Lee",
            "email": "lee@example.com",
            "phone": "555",
            "preferredDate": "weekend",
            "status": "confirmed",
        });
        let input = consultation_input(&body).unwrap();
        assert_eq!(input.preferred_date.as_deref(), Some("weekend"));
    }

    #[test]
    fn cost_estimate_accepts_string_amounts() {
        let body = json!({
            "projectType": "flooring",
            "squareFootage": 200,
            "qualityLevel": "1.0",
            "estimatedCost": "1600",
            "materialsCost": 960,
            "laborCost": "480.004",
            "permitsCost": "160",
        });
        let input = cost_estimate_input(&body).unwrap();
        assert_eq!(input.square_footage, Some(200));
        assert_eq!(input.estimated_cost, 1600.0);
        assert_eq!(input.materials_cost, 960.0);
        assert_eq!(input.labor_cost, 480.0);
    }

    #[test]
    fn cost_estimate_rejects_negative_values() {
        let body = json!({
            "projectType": "kitchen",
            "squareFootage": -5,
            "qualityLevel": "1.0",
            "estimatedCost": -1,
            "materialsCost": "abc",
            "laborCost": 0,
            "permitsCost": 0,
        });
        let err = cost_estimate_input(&body).unwrap_err();
        assert!(err.has_path("squareFootage"));
        assert!(err.has_path("estimatedCost"));
        assert!(err.has_path("materialsCost"));
        assert!(!err.has_path("laborCost"));
    }

    #[test]
    fn cost_estimate_rejects_oversized_amounts() {
        let body = json!({
            "projectType": "kitchen",
            "qualityLevel": "1.0",
            "estimatedCost": 1e307,
            "materialsCost": "1e308",
            "laborCost": 100_000_000,
            "permitsCost": MAX_AMOUNT,
        });
        let err = cost_estimate_input(&body).unwrap_err();
        assert!(err.has_path("estimatedCost"));
        assert!(err.has_path("materialsCost"));
        assert!(err.has_path("laborCost"));
        assert!(!err.has_path("permitsCost"));
        assert_eq!(err.issues.len(), 3);
    }

    #[test]
    fn status_update_requires_status() {
        assert_eq!(
            status_update(&json!({ "status": "confirmed" })),
            Ok("confirmed".to_string())
        );
        assert!(status_update(&json!({})).unwrap_err().has_path("status"));
    }

    #[test]
    fn estimate_request_evaluates() {
        let e = estimate_request(&json!({ "projectType": "kitchen", "qualityLevel": "1.0" }))
            .unwrap();
        assert_eq!(e.materials, 15_000.0);
    }

    #[test]
    fn estimate_request_unknown_type() {
        let err =
            estimate_request(&json!({ "projectType": "pool", "qualityLevel": "1.0" })).unwrap_err();
        assert!(err.has_path("projectType"));
    }

    #[test]
    fn estimate_request_flooring_needs_area() {
        let err = estimate_request(&json!({ "projectType": "flooring", "qualityLevel": "luxury" }))
            .unwrap_err();
        assert!(err.has_path("squareFootage"));
    }
}
