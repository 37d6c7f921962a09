//! # Estimate — Renovation Cost Model
//!
//! Deterministic price breakdown for a project selection. A fixed base cost per
//! project type is scaled by a quality multiplier; flooring is priced per unit
//! area, every other type is a flat job price.
//!
//! | Project type | Base cost | Scales with area |
//! |--------------|-----------|------------------|
//! | `kitchen` | 25,000 | no |
//! | `bathroom` | 15,000 | no |
//! | `flooring` | 8 | yes |
//! | `roofing` | 12,000 | no |
//! | `exterior` | 20,000 | no |
//! | `full_home` | 80,000 | no |
//!
//! The breakdown splits the total 60/30/10 into materials, labor and permits.
//! Each part is rounded on its own, so the parts can differ from the rounded
//! total by a unit or two.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub const MATERIALS_SHARE: f64 = 0.6;
pub const LABOR_SHARE: f64 = 0.3;
pub const PERMITS_SHARE: f64 = 0.1;

#[derive(Debug, Error, PartialEq)]
pub enum EstimateError {
    #[error("unknown project type: {0:?}")]
    UnknownProjectType(String),
    #[error("invalid quality level: {0:?}")]
    InvalidQualityLevel(String),
    #[error("square footage is required for flooring")]
    MissingSquareFootage,
}

/// Renovation categories offered by the calculator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectType {
    Kitchen,
    Bathroom,
    Flooring,
    Roofing,
    Exterior,
    #[serde(alias = "full-home")]
    FullHome,
}

impl ProjectType {
    pub const ALL: [ProjectType; 6] = [
        ProjectType::Kitchen,
        ProjectType::Bathroom,
        ProjectType::Flooring,
        ProjectType::Roofing,
        ProjectType::Exterior,
        ProjectType::FullHome,
    ];

    /// Base cost in whole currency units. Per unit area for flooring.
    pub fn base_cost(self) -> f64 {
        match self {
            ProjectType::Kitchen => 25_000.0,
            ProjectType::Bathroom => 15_000.0,
            ProjectType::Flooring => 8.0,
            ProjectType::Roofing => 12_000.0,
            ProjectType::Exterior => 20_000.0,
            ProjectType::FullHome => 80_000.0,
        }
    }

    pub fn priced_per_area(self) -> bool {
        self == ProjectType::Flooring
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ProjectType::Kitchen => "kitchen",
            ProjectType::Bathroom => "bathroom",
            ProjectType::Flooring => "flooring",
            ProjectType::Roofing => "roofing",
            ProjectType::Exterior => "exterior",
            ProjectType::FullHome => "full_home",
        }
    }
}

impl fmt::Display for ProjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProjectType {
    type Err = EstimateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "kitchen" => Ok(ProjectType::Kitchen),
            "bathroom" => Ok(ProjectType::Bathroom),
            "flooring" => Ok(ProjectType::Flooring),
            "roofing" => Ok(ProjectType::Roofing),
            "exterior" => Ok(ProjectType::Exterior),
            "full_home" | "full-home" => Ok(ProjectType::FullHome),
            other => Err(EstimateError::UnknownProjectType(other.to_string())),
        }
    }
}

/// Finish tiers and their multipliers. Any other non-negative multiplier is
/// accepted as-is by [`parse_quality`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QualityLevel {
    Standard,
    Premium,
    Luxury,
}

impl QualityLevel {
    pub const ALL: [QualityLevel; 3] = [
        QualityLevel::Standard,
        QualityLevel::Premium,
        QualityLevel::Luxury,
    ];

    pub fn multiplier(self) -> f64 {
        match self {
            QualityLevel::Standard => 0.8,
            QualityLevel::Premium => 1.0,
            QualityLevel::Luxury => 1.3,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            QualityLevel::Standard => "standard",
            QualityLevel::Premium => "premium",
            QualityLevel::Luxury => "luxury",
        }
    }
}

/// Parse a quality level given either as a tier name or as a numeric string.
pub fn parse_quality(raw: &str) -> Result<f64, EstimateError> {
    let trimmed = raw.trim();
    if let Some(tier) = QualityLevel::ALL
        .iter()
        .find(|tier| tier.name().eq_ignore_ascii_case(trimmed))
    {
        return Ok(tier.multiplier());
    }
    match trimmed.parse::<f64>() {
        Ok(q) if q.is_finite() && q >= 0.0 => Ok(q),
        _ => Err(EstimateError::InvalidQualityLevel(raw.to_string())),
    }
}

/// Price breakdown returned to the calculator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Estimate {
    /// Unrounded total.
    pub total_estimate: f64,
    pub materials: f64,
    pub labor: f64,
    pub permits: f64,
}

/// Compute the breakdown. `square_footage` only matters for flooring.
pub fn estimate(project_type: ProjectType, square_footage: u32, quality: f64) -> Estimate {
    let base = project_type.base_cost();
    let total_estimate = if project_type.priced_per_area() {
        base * f64::from(square_footage) * quality
    } else {
        base * quality
    };

    Estimate {
        total_estimate,
        materials: (total_estimate * MATERIALS_SHARE).round(),
        labor: (total_estimate * LABOR_SHARE).round(),
        permits: (total_estimate * PERMITS_SHARE).round(),
    }
}

/// Parse raw calculator input and compute the breakdown.
///
/// An unrecognised project type is an error, never a zero-cost estimate.
/// Flooring requires a square footage; other types ignore it.
pub fn estimate_from_input(
    project_type: &str,
    square_footage: Option<u32>,
    quality_level: &str,
) -> Result<Estimate, EstimateError> {
    let project_type: ProjectType = project_type.parse()?;
    let quality = parse_quality(quality_level)?;
    let square_footage = match (project_type.priced_per_area(), square_footage) {
        (true, None) => return Err(EstimateError::MissingSquareFootage),
        (_, sqft) => sqft.unwrap_or(0),
    };
    Ok(estimate(project_type, square_footage, quality))
}
