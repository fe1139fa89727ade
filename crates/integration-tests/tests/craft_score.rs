//! Craft Score heuristic properties over request bodies.

#![allow(clippy::unwrap_used)]

use artify_core::craft_score::{CraftScoreInput, HOURLY_RATE};
use serde_json::{Value, json};

fn score(body: Value) -> artify_core::craft_score::CraftScore {
    CraftScoreInput::from_json(body).unwrap().compute()
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6
}

#[test]
fn test_price_scales_with_demand() {
    let base = json!({"materialCost": 800, "hoursSpent": 4});
    let with = |level: &str| {
        let mut body = base.clone();
        body["demandLevel"] = json!(level);
        score(body).suggested_price
    };

    let expected_base = 4.0f64.mul_add(HOURLY_RATE, 800.0);
    assert!(close(with("Low"), expected_base));
    assert!(close(with("Medium"), expected_base * 1.2));
    assert!(close(with("High"), expected_base * 1.4));
    assert!(with("Low") < with("Medium"));
    assert!(with("Medium") < with("High"));
}

#[test]
fn test_negotiation_range_brackets_price() {
    for body in [
        json!({"materialCost": 0}),
        json!({"materialCost": 120, "hoursSpent": 2.5, "demandLevel": "High"}),
        json!({"materialCost": "300", "hoursSpent": "1"}),
    ] {
        let result = score(body);
        let [low, high] = result.negotiation_range;
        assert!(close(low, result.suggested_price * 0.95));
        assert!(close(high, result.suggested_price * 1.15));
        assert!(low <= result.suggested_price && result.suggested_price <= high);
    }
}

#[test]
fn test_eco_score_bounds() {
    let eco = |materials: Value| score(json!({"materials": materials})).eco_score;
    assert!(close(eco(json!([])), 50.0));
    assert!(close(eco(json!(["Clay", "Wood"])), 80.0));
    assert!(close(eco(json!(["Plastic"])), 40.0));
    assert!(close(eco(json!(["Clay", "Plastic"])), 60.0));
}

#[test]
fn test_total_score_never_increases_with_energy_or_hours() {
    let total = |energy: f64, hours: f64| {
        score(json!({
            "materials": ["Natural Fibers"],
            "origin": "Local",
            "energyUsed": energy,
            "productionHours": hours
        }))
        .total_score
    };

    let mut previous = f64::INFINITY;
    for energy in [0.0, 50.0, 100.0, 140.0, 200.0, 400.0] {
        let current = total(energy, 10.0);
        assert!(current <= previous + 1e-9);
        previous = current;
    }

    // Both factors bottom out.
    assert!(close(total(1_000.0, 1_000.0), total(2_000.0, 5_000.0)));
}

#[test]
fn test_garbage_fields_are_coerced() {
    let result = score(json!({
        "materials": "Clay",
        "materialCost": "abc",
        "hoursSpent": null,
        "demandLevel": 3,
        "origin": "Mars"
    }));
    assert!(close(result.suggested_price, 0.0));
    assert!(close(result.eco_score, 50.0));
    assert!(close(result.carbon_footprint, 0.0));
}
