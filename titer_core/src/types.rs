//! Core domain types for the Titer compound tracker.
//!
//! This module defines the fundamental types used throughout the system:
//! - Dose events and the per-profile event book
//! - Projection output points
//! - Compound reference data (catalog entries, risk assessments)
//! - The refresh signal returned by successful mutations

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use uuid::Uuid;

// ============================================================================
// Dose Event Types
// ============================================================================

/// A single logged administration of a compound
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct DoseEvent {
    pub id: Uuid,
    /// Key into the compound reference catalog
    pub compound: String,
    pub dose_mg: f64,
    /// May be past or future; future doses contribute nothing before their time
    pub taken_at: DateTime<Utc>,
}

/// The full per-profile event mapping, as persisted under the
/// `profile_data` key.
///
/// Serialized transparently as a map from profile name to its events,
/// in insertion order. Insertion order carries no meaning for
/// computation; displays sort by timestamp.
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct ProfileBook {
    pub profiles: BTreeMap<String, Vec<DoseEvent>>,
}

impl ProfileBook {
    /// An empty book with a slot for each of the given profile names
    pub fn seeded(names: &[String]) -> Self {
        let mut profiles = BTreeMap::new();
        for name in names {
            profiles.insert(name.clone(), Vec::new());
        }
        Self { profiles }
    }
}

/// One sample of a projected level curve
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ProjectionPoint {
    pub at: DateTime<Utc>,
    pub level_mg: f64,
}

/// Signal that a mutation succeeded and downstream views are stale.
///
/// Every successful store or tracker mutation returns one of these; the
/// caller re-queries the log and projection instead of the store reaching
/// into display code.
#[must_use = "a Refresh means displayed state is stale until re-queried"]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Refresh;

// ============================================================================
// Compound Reference Types
// ============================================================================

/// Five-step risk scale used by the reference dataset
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    VeryLow,
    Low,
    Moderate,
    High,
    VeryHigh,
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RiskLevel::VeryLow => "Very Low",
            RiskLevel::Low => "Low",
            RiskLevel::Moderate => "Moderate",
            RiskLevel::High => "High",
            RiskLevel::VeryHigh => "Very High",
        };
        f.write_str(s)
    }
}

/// A risk rating: either a bare level, or a level carrying a warning
/// message that displays must surface
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RiskAssessment {
    Plain { level: RiskLevel },
    Warning { level: RiskLevel, message: String },
}

impl RiskAssessment {
    pub fn level(&self) -> RiskLevel {
        match self {
            RiskAssessment::Plain { level } => *level,
            RiskAssessment::Warning { level, .. } => *level,
        }
    }

    /// The warning message, if this assessment carries one
    pub fn warning(&self) -> Option<&str> {
        match self {
            RiskAssessment::Plain { .. } => None,
            RiskAssessment::Warning { message, .. } => Some(message),
        }
    }
}

/// Side-effect profile for a compound
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Risks {
    pub hair_loss: RiskAssessment,
    pub bloating: RiskAssessment,
    pub aggression: RiskAssessment,
}

/// Scientific classification of a compound
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ScientificClass {
    Androgen,
    NorTestosterone,
    Dht,
    Testosterone,
}

impl fmt::Display for ScientificClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ScientificClass::Androgen => "Androgen and Anabolic Steroid",
            ScientificClass::NorTestosterone => "19-nor Testosterone Derivative",
            ScientificClass::Dht => "DHT Derivative",
            ScientificClass::Testosterone => "Testosterone Derivative",
        };
        f.write_str(s)
    }
}

/// A compound reference entry (display name, kinetics, UI metadata)
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Compound {
    pub key: String,
    pub name: String,
    pub class: ScientificClass,
    /// Elimination half-life in days; strictly positive
    pub half_life_days: f64,
    /// Hex color used by chart displays
    pub color: String,
    pub risks: Risks,
}

/// The complete compound reference catalog
#[derive(Clone, Debug)]
pub struct Catalog {
    pub compounds: HashMap<String, Compound>,
}
