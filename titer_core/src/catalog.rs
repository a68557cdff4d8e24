//! Compound reference catalog.
//!
//! The catalog is a read-only lookup table from compound key to display
//! name, elimination half-life, and side-effect ratings. Dose validation
//! and projection both resolve compound keys against it.

use crate::types::*;
use crate::{Error, Result};
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Cached default catalog - built once and reused across all operations
static DEFAULT_CATALOG: Lazy<Catalog> = Lazy::new(build_default_catalog);

/// Get a reference to the cached default catalog
pub fn get_default_catalog() -> &'static Catalog {
    &DEFAULT_CATALOG
}

fn plain(level: RiskLevel) -> RiskAssessment {
    RiskAssessment::Plain { level }
}

fn warning(level: RiskLevel, message: &str) -> RiskAssessment {
    RiskAssessment::Warning {
        level,
        message: message.into(),
    }
}

const AGGRESSION_SENSITIVE: &str =
    "May cause increased aggression in sensitive individuals";
const AGGRESSION_SIGNIFICANT: &str = "Known to significantly increase aggression";
const AGGRESSION_SEVERE: &str = "Known to cause severe aggression";

/// Builds the default catalog of compound reference entries
///
/// **Note**: For production use, prefer `get_default_catalog()` which
/// returns a cached reference.
pub fn build_default_catalog() -> Catalog {
    use RiskLevel::*;
    use ScientificClass::*;

    let mut compounds = HashMap::new();

    let mut insert = |key: &str,
                      name: &str,
                      class: ScientificClass,
                      half_life_days: f64,
                      color: &str,
                      hair_loss: RiskAssessment,
                      bloating: RiskAssessment,
                      aggression: RiskAssessment| {
        compounds.insert(
            key.to_string(),
            Compound {
                key: key.into(),
                name: name.into(),
                class,
                half_life_days,
                color: color.into(),
                risks: Risks {
                    hair_loss,
                    bloating,
                    aggression,
                },
            },
        );
    };

    // ========================================================================
    // Testosterone esters
    // ========================================================================

    insert(
        "test-e",
        "Testosterone Enanthate",
        Androgen,
        4.5,
        "#2ecc71",
        plain(High),
        plain(Moderate),
        warning(Moderate, AGGRESSION_SENSITIVE),
    );
    insert(
        "test-c",
        "Testosterone Cypionate",
        Androgen,
        5.0,
        "#27ae60",
        plain(High),
        plain(Moderate),
        warning(Moderate, AGGRESSION_SENSITIVE),
    );
    insert(
        "test-p",
        "Testosterone Propionate",
        Androgen,
        0.8,
        "#3498db",
        plain(High),
        plain(Low),
        warning(Moderate, AGGRESSION_SENSITIVE),
    );
    insert(
        "test-s",
        "Testosterone Suspension",
        Androgen,
        0.1,
        "#2980b9",
        plain(High),
        plain(Low),
        plain(High),
    );
    insert(
        "test-u",
        "Testosterone Undecanoate",
        Androgen,
        16.0,
        "#16a085",
        plain(High),
        plain(Moderate),
        plain(Moderate),
    );

    // ========================================================================
    // 19-nor derivatives
    // ========================================================================

    insert(
        "deca",
        "Nandrolone Decanoate",
        NorTestosterone,
        7.0,
        "#8e44ad",
        plain(Low),
        plain(High),
        plain(Low),
    );
    insert(
        "npp",
        "Nandrolone Phenylpropionate",
        NorTestosterone,
        2.0,
        "#9b59b6",
        plain(Low),
        plain(Moderate),
        plain(Low),
    );
    insert(
        "tren-a",
        "Trenbolone Acetate",
        NorTestosterone,
        1.0,
        "#e74c3c",
        plain(Moderate),
        plain(Low),
        warning(High, AGGRESSION_SIGNIFICANT),
    );
    insert(
        "tren-e",
        "Trenbolone Enanthate",
        NorTestosterone,
        5.0,
        "#c0392b",
        plain(Moderate),
        plain(Low),
        warning(High, AGGRESSION_SIGNIFICANT),
    );
    insert(
        "tren-h",
        "Trenbolone Hexahydrobenzylcarbonate",
        NorTestosterone,
        7.0,
        "#d35400",
        plain(Moderate),
        plain(Low),
        warning(High, AGGRESSION_SIGNIFICANT),
    );

    // ========================================================================
    // DHT derivatives
    // ========================================================================

    insert(
        "mast-p",
        "Masteron Propionate",
        Dht,
        0.8,
        "#f39c12",
        plain(VeryHigh),
        plain(VeryLow),
        plain(Moderate),
    );
    insert(
        "mast-e",
        "Masteron Enanthate",
        Dht,
        5.0,
        "#e67e22",
        plain(VeryHigh),
        plain(VeryLow),
        plain(Moderate),
    );
    insert(
        "primo-e",
        "Primobolan Enanthate",
        Dht,
        5.0,
        "#f1c40f",
        plain(Low),
        plain(VeryLow),
        plain(VeryLow),
    );
    insert(
        "primo-a",
        "Primobolan Acetate",
        Dht,
        0.8,
        "#f4d03f",
        plain(Low),
        plain(VeryLow),
        plain(VeryLow),
    );
    insert(
        "primo-oral",
        "Primobolan Oral",
        Dht,
        0.2,
        "#f1c40f",
        plain(Low),
        plain(VeryLow),
        plain(VeryLow),
    );
    insert(
        "var",
        "Anavar",
        Dht,
        0.5,
        "#2ecc71",
        plain(Low),
        plain(VeryLow),
        plain(Low),
    );
    insert(
        "win",
        "Winstrol",
        Dht,
        0.5,
        "#27ae60",
        plain(High),
        plain(VeryLow),
        plain(Moderate),
    );
    insert(
        "tbol",
        "Turinabol",
        Dht,
        0.3,
        "#c0392b",
        plain(Moderate),
        plain(Low),
        plain(Low),
    );
    insert(
        "halo",
        "Halotestin",
        Dht,
        0.3,
        "#d35400",
        plain(High),
        plain(VeryLow),
        warning(VeryHigh, AGGRESSION_SEVERE),
    );
    insert(
        "anadrol",
        "Anadrol",
        Dht,
        0.3,
        "#e67e22",
        plain(High),
        plain(VeryHigh),
        plain(High),
    );
    insert(
        "prov",
        "Proviron",
        Dht,
        0.5,
        "#f4d03f",
        plain(VeryHigh),
        plain(VeryLow),
        plain(Low),
    );

    // ========================================================================
    // Other testosterone derivatives
    // ========================================================================

    insert(
        "eq",
        "Boldenone Undecylenate",
        Testosterone,
        14.0,
        "#3498db",
        plain(Low),
        plain(Low),
        plain(Low),
    );
    insert(
        "bold-c",
        "Boldenone Cypionate",
        Testosterone,
        5.0,
        "#2980b9",
        plain(Low),
        plain(Low),
        plain(Low),
    );
    insert(
        "dbol",
        "Dianabol",
        Testosterone,
        0.2,
        "#e74c3c",
        plain(High),
        plain(VeryHigh),
        plain(High),
    );

    Catalog { compounds }
}

impl Catalog {
    /// Look up a compound by key
    pub fn get(&self, key: &str) -> Option<&Compound> {
        self.compounds.get(key)
    }

    /// Half-life for a compound key, failing on unknown keys
    pub fn half_life_days(&self, key: &str) -> Result<f64> {
        self.get(key)
            .map(|c| c.half_life_days)
            .ok_or_else(|| Error::UnknownCompound(key.into()))
    }

    /// Validate the catalog for consistency and completeness
    ///
    /// Returns a list of validation errors, or empty Vec if valid.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        for (key, compound) in &self.compounds {
            if key.is_empty() || compound.key.is_empty() {
                errors.push("Compound has empty key".to_string());
            }
            if key != &compound.key {
                errors.push(format!(
                    "Compound map key '{}' doesn't match compound.key '{}'",
                    key, compound.key
                ));
            }
            if compound.name.is_empty() {
                errors.push(format!("Compound '{}' has empty name", key));
            }
            if !compound.half_life_days.is_finite() || compound.half_life_days <= 0.0 {
                errors.push(format!(
                    "Compound '{}' has non-positive half-life {}",
                    key, compound.half_life_days
                ));
            }
            if !compound.color.starts_with('#') {
                errors.push(format!(
                    "Compound '{}' has malformed color '{}'",
                    key, compound.color
                ));
            }
        }

        errors
    }
}
