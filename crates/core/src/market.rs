//! Market-demand report shapes.
//!
//! Both model replies are parsed into these types before anything is
//! returned, so the browser always receives the same structure.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Shortest product name worth looking up.
pub const MIN_PRODUCT_NAME_CHARS: usize = 3;

/// Lowest confidence at which a product is treated as real.
pub const MIN_CONFIDENCE: f64 = 5.0;

/// Years covered by the historical series.
pub const HISTORICAL_YEARS: std::ops::RangeInclusive<u16> = 2019..=2024;

/// Years covered by the forecast series.
pub const FORECAST_YEARS: std::ops::RangeInclusive<u16> = 2025..=2029;

/// The model's opinion on whether a product exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductValidation {
    pub exists: bool,
    /// 1 (guess) to 10 (certain).
    pub confidence: f64,
    #[serde(default)]
    pub reason: String,
}

impl ProductValidation {
    /// Whether the product is real enough to analyse.
    #[must_use]
    pub fn accepted(&self) -> bool {
        self.exists && self.confidence >= MIN_CONFIDENCE
    }
}

/// Demand analysis for a product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemandAnalysis {
    /// Demand index by year, keyed by the year as a string.
    pub historical_data: BTreeMap<String, f64>,
    pub forecast_data: BTreeMap<String, f64>,
    #[serde(default)]
    pub competitors: Vec<String>,
    #[serde(default)]
    pub regions: Vec<String>,
    #[serde(default)]
    pub insights: String,
    #[serde(default)]
    pub tips: Vec<String>,
}

impl DemandAnalysis {
    /// Years requested but absent from either series.
    #[must_use]
    pub fn missing_years(&self) -> Vec<u16> {
        let missing_in = |series: &BTreeMap<String, f64>, years: std::ops::RangeInclusive<u16>| {
            years
                .filter(|year| !series.contains_key(&year.to_string()))
                .collect::<Vec<_>>()
        };
        let mut missing = missing_in(&self.historical_data, HISTORICAL_YEARS);
        missing.extend(missing_in(&self.forecast_data, FORECAST_YEARS));
        missing
    }
}

/// Trim a product name and check it is long enough to look up.
#[must_use]
pub fn normalize_product_name(raw: &str) -> Option<&str> {
    let name = raw.trim();
    (name.chars().count() >= MIN_PRODUCT_NAME_CHARS).then_some(name)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_validation_threshold() {
        let v = |exists, confidence| ProductValidation {
            exists,
            confidence,
            reason: String::new(),
        };
        assert!(v(true, 5.0).accepted());
        assert!(v(true, 9.0).accepted());
        assert!(!v(true, 4.0).accepted());
        assert!(!v(false, 10.0).accepted());
    }

    #[test]
    fn test_product_name() {
        assert_eq!(normalize_product_name("  jute bag "), Some("jute bag"));
        assert_eq!(normalize_product_name(" ab "), None);
        assert_eq!(normalize_product_name(""), None);
    }

    #[test]
    fn test_analysis_parses_and_reports_gaps() {
        let analysis: DemandAnalysis = serde_json::from_value(json!({
            "historical_data": {"2019": 40, "2020": 35, "2021": 48, "2022": 55, "2023": 61, "2024": 66},
            "forecast_data": {"2025": 70, "2026": 74, "2028": 81, "2029": 85},
            "competitors": ["Fabindia"],
            "regions": ["India", "USA"],
            "insights": "Growing",
            "tips": ["Sell online"]
        }))
        .unwrap();
        assert_eq!(analysis.missing_years(), vec![2027]);
    }

    #[test]
    fn test_analysis_requires_series() {
        assert!(serde_json::from_value::<DemandAnalysis>(json!({"insights": "x"})).is_err());
    }
}
