//! Saved calculator results.
//!
//! Amounts are stored as submitted (to two decimal places). The store does not
//! recompute them, and the three parts are not required to add up to the total.

use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CostEstimate {
    pub id: String,
    pub project_type: String,
    pub square_footage: Option<u32>,
    /// Numeric multiplier as entered, e.g. `"1.0"`.
    pub quality_level: String,
    pub estimated_cost: f64,
    pub materials_cost: f64,
    pub labor_cost: f64,
    pub permits_cost: f64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct NewCostEstimate {
    pub project_type: String,
    pub square_footage: Option<u32>,
    pub quality_level: String,
    pub estimated_cost: f64,
    pub materials_cost: f64,
    pub labor_cost: f64,
    pub permits_cost: f64,
}

impl NewCostEstimate {
    pub(super) fn to_record(&self, id: String, created_at: DateTime<Utc>) -> CostEstimate {
        CostEstimate {
            id,
            project_type: self.project_type.clone(),
            square_footage: self.square_footage,
            quality_level: self.quality_level.clone(),
            estimated_cost: self.estimated_cost,
            materials_cost: self.materials_cost,
            labor_cost: self.labor_cost,
            permits_cost: self.permits_cost,
            created_at,
        }
    }
}
