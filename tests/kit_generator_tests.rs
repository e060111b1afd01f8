use proptest::prelude::*;

use disastersense::models::kit::{BudgetTier, DisasterType, KitRequest, Priority};
use disastersense::services::kit_generator::{estimated_cost, generate};

fn request(disaster: &str, family_size: u32, duration: u32, budget: &str) -> KitRequest {
    KitRequest {
        disaster_type: DisasterType::parse(disaster),
        family_size,
        adults: family_size,
        children: 0,
        seniors: 0,
        has_medical: false,
        has_disabilities: false,
        has_pets: false,
        duration,
        budget_range: BudgetTier::parse(budget),
    }
}

fn disaster() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("Flood".to_string()),
        Just("Earthquake".to_string()),
        Just("Cyclone".to_string()),
        Just("Landslide".to_string()),
        "[a-z]{1,10}",
    ]
}

fn budget() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("basic".to_string()),
        Just("standard".to_string()),
        Just("premium".to_string()),
        "[a-z]{1,8}",
    ]
}

/// Mostly realistic households, with the full `u32` range mixed in.
fn count(min: u32) -> impl Strategy<Value = u32> {
    prop_oneof![
        3 => min..50,
        1 => (i32::MAX as u32 - 50)..=i32::MAX as u32,
        1 => min..u32::MAX,
    ]
}

fn kit_request() -> impl Strategy<Value = KitRequest> {
    (
        disaster(),
        count(0),
        count(1),
        budget(),
        any::<bool>(),
        any::<bool>(),
        any::<bool>(),
    )
        .prop_map(|(d, size, duration, b, medical, disabled, pets)| KitRequest {
            has_medical: medical,
            has_disabilities: disabled,
            has_pets: pets,
            ..request(&d, size, duration, &b)
        })
}

proptest! {
    #[test]
    fn generation_is_deterministic(req in kit_request()) {
        prop_assert_eq!(generate(&req), generate(&req));
    }

    #[test]
    fn counts_match_items(req in kit_request()) {
        let kit = generate(&req);
        prop_assert_eq!(kit.total_items, kit.items.len());
        let high = kit.items.values().filter(|i| i.priority == Priority::High).count();
        prop_assert_eq!(kit.high_priority_items, high);
        prop_assert!(kit.high_priority_items <= kit.total_items);
    }

    #[test]
    fn cost_grows_with_household_and_duration(
        size in count(0),
        duration in count(1),
        b in budget(),
    ) {
        let base = estimated_cost(&request("Flood", size, duration, &b));
        prop_assert!(estimated_cost(&request("Flood", size + 1, duration, &b)) >= base);
        prop_assert!(estimated_cost(&request("Flood", size, duration + 1, &b)) >= base);
    }

    #[test]
    fn cost_follows_budget_tiers(size in count(0), duration in count(1)) {
        let basic = estimated_cost(&request("Flood", size, duration, "basic"));
        let standard = estimated_cost(&request("Flood", size, duration, "standard"));
        let premium = estimated_cost(&request("Flood", size, duration, "premium"));
        prop_assert!(basic <= standard && standard <= premium);
        prop_assert_eq!(basic, estimated_cost(&request("Flood", size, duration, "luxury")));
    }
}

#[test]
fn test_earthquake_kit_for_a_couple() {
    let kit = generate(&request("Earthquake", 2, 3, "premium"));

    assert_eq!(kit.item("water").unwrap().quantity.to_string(), "24 liters");
    assert!(kit.item("whistle").is_some());
    assert!(kit.item("life_jackets").is_none());
    assert_eq!(kit.estimated_cost, 2 * 3 * 500 * 2);
}

#[test]
fn test_disaster_type_is_case_sensitive() {
    let upper = generate(&request("Flood", 3, 2, "basic"));
    let lower = generate(&request("flood", 3, 2, "basic"));

    assert!(upper.item("life_jackets").is_some());
    assert!(lower.item("life_jackets").is_none());
    assert_eq!(lower.total_items, 10);
}

#[test]
fn test_cost_near_storage_limits_is_exact() {
    let max = i32::MAX as u32;
    let kit = generate(&request("Cyclone", max, 1, "standard"));
    assert_eq!(kit.estimated_cost, u64::from(max) * 750);

    let kit = generate(&request("Cyclone", 20_000_000, 20_000_000, "premium"));
    assert_eq!(kit.estimated_cost, 400_000_000_000_000_000);

    let kit = generate(&request("Cyclone", max, max, "basic"));
    assert_eq!(kit.estimated_cost, u64::MAX);
}
