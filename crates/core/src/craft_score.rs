//! Craft Score: pricing and sustainability heuristic for a handmade item.
//!
//! The request body comes straight from a browser form, so every field is
//! optional and numeric fields accept numbers or numeric strings. Anything
//! that does not coerce to a finite number counts as zero.
//!
//! ```
//! use artify_core::craft_score::{CraftScoreInput, DemandLevel, Origin};
//!
//! let input = CraftScoreInput {
//!     materials: vec!["Recycled Paper".into()],
//!     origin: Origin::Local,
//!     material_cost: 500.0,
//!     hours_spent: 5.0,
//!     demand_level: DemandLevel::Medium,
//!     energy_used: 20.0,
//!     production_hours: 5.0,
//!     ..CraftScoreInput::default()
//! };
//! let score = input.compute();
//! assert!((score.suggested_price - 1500.0).abs() < 1e-9);
//! assert!((score.carbon_footprint - 16.0).abs() < 1e-9);
//! ```

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Labour rate applied to each hour spent, in the seller's currency.
pub const HOURLY_RATE: f64 = 150.0;

/// Materials that earn the high per-material eco score.
pub const ECO_MATERIALS: [&str; 4] = ["Recycled Paper", "Natural Fibers", "Wood", "Clay"];

const ECO_MATERIAL_SCORE: f64 = 80.0;
const OTHER_MATERIAL_SCORE: f64 = 40.0;
const NO_MATERIALS_SCORE: f64 = 50.0;

const NEGOTIATION_FLOOR: f64 = 0.95;
const NEGOTIATION_CEILING: f64 = 1.15;

const DEFAULT_PRODUCT_NAME: &str = "Handicraft";
const DEFAULT_PRODUCT_DESC: &str = "A beautiful handmade item.";

/// Expected market demand for the product.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum DemandLevel {
    /// Anything that is not "Medium" or "High".
    Low,
    #[default]
    Medium,
    High,
}

impl DemandLevel {
    /// Price multiplier for this demand level.
    #[must_use]
    pub const fn multiplier(self) -> f64 {
        match self {
            Self::Low => 1.0,
            Self::Medium => 1.2,
            Self::High => 1.4,
        }
    }

    /// Interpret a form value. Blank means the default (`Medium`); any
    /// unrecognised label prices like `Low`.
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        let label = label.trim();
        if label.is_empty() {
            Self::default()
        } else if label.eq_ignore_ascii_case("high") {
            Self::High
        } else if label.eq_ignore_ascii_case("medium") {
            Self::Medium
        } else {
            Self::Low
        }
    }
}

impl fmt::Display for DemandLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        })
    }
}

impl<'de> Deserialize<'de> for DemandLevel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(value
            .as_str()
            .map_or_else(Self::default, Self::from_label))
    }
}

/// Where the product is made relative to where it is sold.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Origin {
    #[default]
    Local,
    Imported,
    /// Any other label: not local for scoring, not imported for carbon.
    Other(String),
}

impl Origin {
    /// Interpret a form value, ignoring case. Blank means `Local`.
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        let label = label.trim();
        if label.is_empty() || label.eq_ignore_ascii_case("local") {
            Self::Local
        } else if label.eq_ignore_ascii_case("imported") {
            Self::Imported
        } else {
            Self::Other(label.to_owned())
        }
    }

    /// Score multiplier: local production is not penalised.
    #[must_use]
    pub const fn score_factor(&self) -> f64 {
        match self {
            Self::Local => 1.0,
            Self::Imported | Self::Other(_) => 0.8,
        }
    }

    /// Carbon emitted per unit of energy used.
    #[must_use]
    pub const fn carbon_factor(&self) -> f64 {
        match self {
            Self::Imported => 1.2,
            Self::Local | Self::Other(_) => 0.8,
        }
    }

    /// The label as shown to users and in prompts.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Local => "Local",
            Self::Imported => "Imported",
            Self::Other(label) => label,
        }
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Origin {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(value.as_str().map_or_else(Self::default, Self::from_label))
    }
}

/// Craft Score request body.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CraftScoreInput {
    #[serde(deserialize_with = "text_or_default")]
    pub product_name: String,
    #[serde(deserialize_with = "text_or_default")]
    pub product_desc: String,
    #[serde(deserialize_with = "material_list")]
    pub materials: Vec<String>,
    pub origin: Origin,
    #[serde(deserialize_with = "lenient_number")]
    pub material_cost: f64,
    #[serde(deserialize_with = "lenient_number")]
    pub hours_spent: f64,
    pub demand_level: DemandLevel,
    #[serde(deserialize_with = "lenient_number")]
    pub energy_used: f64,
    #[serde(deserialize_with = "lenient_number")]
    pub production_hours: f64,
}

impl Default for CraftScoreInput {
    fn default() -> Self {
        Self {
            product_name: DEFAULT_PRODUCT_NAME.to_owned(),
            product_desc: DEFAULT_PRODUCT_DESC.to_owned(),
            materials: Vec::new(),
            origin: Origin::default(),
            material_cost: 0.0,
            hours_spent: 0.0,
            demand_level: DemandLevel::default(),
            energy_used: 0.0,
            production_hours: 0.0,
        }
    }
}

/// Computed Craft Score figures.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CraftScore {
    pub suggested_price: f64,
    pub negotiation_range: [f64; 2],
    pub eco_score: f64,
    pub carbon_footprint: f64,
    pub total_score: f64,
}

impl CraftScoreInput {
    /// Price before the demand multiplier.
    #[must_use]
    pub fn base_price(&self) -> f64 {
        self.hours_spent.mul_add(HOURLY_RATE, self.material_cost)
    }

    /// Average per-material eco score, or the neutral score with no materials.
    #[must_use]
    pub fn eco_score(&self) -> f64 {
        if self.materials.is_empty() {
            return NO_MATERIALS_SCORE;
        }
        let sum: f64 = self
            .materials
            .iter()
            .map(|m| {
                if ECO_MATERIALS.contains(&m.as_str()) {
                    ECO_MATERIAL_SCORE
                } else {
                    OTHER_MATERIAL_SCORE
                }
            })
            .sum();
        #[allow(clippy::cast_precision_loss)] // material lists are a handful of entries
        let count = self.materials.len() as f64;
        sum / count
    }

    /// Run the heuristic.
    #[must_use]
    pub fn compute(&self) -> CraftScore {
        let suggested_price = self.base_price() * self.demand_level.multiplier();
        let eco_score = self.eco_score();

        let energy_factor = (1.0 - self.energy_used / 200.0).max(0.3);
        let time_factor = (1.0 - self.production_hours / 100.0).max(0.4);
        let total_score = eco_score * self.origin.score_factor() * energy_factor * time_factor;

        CraftScore {
            suggested_price,
            negotiation_range: [
                suggested_price * NEGOTIATION_FLOOR,
                suggested_price * NEGOTIATION_CEILING,
            ],
            eco_score,
            carbon_footprint: round2(self.energy_used * self.origin.carbon_factor()),
            total_score,
        }
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Coerce a JSON value to a finite number, or zero.
fn coerce_number(value: &Value) -> f64 {
    let n = match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) if s.trim().is_empty() => 0.0,
        Value::String(s) => s.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    };
    if n.is_finite() { n } else { 0.0 }
}

fn lenient_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    Ok(coerce_number(&Value::deserialize(deserializer)?))
}

fn text_or_default<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    // Which default applies depends on the field, so a blank value is
    // resolved after deserialization by `CraftScoreInput::normalized`.
    let value = Value::deserialize(deserializer)?;
    Ok(value.as_str().unwrap_or_default().trim().to_owned())
}

fn material_list<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    let value = Value::deserialize(deserializer)?;
    let Value::Array(items) = value else {
        return Ok(Vec::new());
    };
    Ok(items
        .into_iter()
        .map(|item| match item {
            Value::String(s) => s,
            other => other.to_string(),
        })
        .collect())
}

impl CraftScoreInput {
    /// Parse a request body, filling blank text fields with their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error only if the body is not a JSON object.
    pub fn from_json(body: Value) -> Result<Self, serde_json::Error> {
        let body = if body.is_null() {
            Value::Object(serde_json::Map::new())
        } else {
            body
        };
        serde_json::from_value::<Self>(body).map(Self::normalized)
    }

    /// Replace blank name and description with the defaults.
    #[must_use]
    pub fn normalized(mut self) -> Self {
        if self.product_name.is_empty() {
            DEFAULT_PRODUCT_NAME.clone_into(&mut self.product_name);
        }
        if self.product_desc.is_empty() {
            DEFAULT_PRODUCT_DESC.clone_into(&mut self.product_desc);
        }
        self
    }
}
