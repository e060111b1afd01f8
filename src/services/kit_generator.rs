//! Emergency kit rule engine.
//!
//! Every kit is assembled from static rule tables merged in a fixed order:
//! base items, the disaster table, then the medical, disability and pet
//! blocks. A later stage replaces any item of the same name from an earlier
//! one.

use crate::models::kit::{
    DisasterType, ItemSpec, KitItems, KitRequest, KitResult, Priority, Quantity,
};

/// Base cost of supplies per person per day, in rupees.
pub const BASE_COST_PER_PERSON_DAY: u64 = 500;

/// How an item's quantity scales with the household.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Scaling {
    Flat(u64),
    PerPerson(u64),
    PerPersonPerDay(u64),
    PerDay(u64),
    /// Duration plus a fixed number of spare days.
    DurationPlus(u64),
    Descriptive(&'static str),
}

#[derive(Clone, Copy, Debug)]
pub struct ItemRule {
    pub name: &'static str,
    pub scaling: Scaling,
    pub unit: &'static str,
    pub priority: Priority,
}

const fn rule(
    name: &'static str,
    scaling: Scaling,
    unit: &'static str,
    priority: Priority,
) -> ItemRule {
    ItemRule { name, scaling, unit, priority }
}

const fn described(name: &'static str, text: &'static str, priority: Priority) -> ItemRule {
    ItemRule { name, scaling: Scaling::Descriptive(text), unit: "", priority }
}

use Priority::{High, Medium};
use Scaling::{DurationPlus, Flat, PerDay, PerPerson, PerPersonPerDay};

pub static BASE_ITEMS: &[ItemRule] = &[
    rule("water", PerPersonPerDay(4), "liters", High),
    rule("food", PerPersonPerDay(3), "meals", High),
    rule("first_aid_kit", Flat(1), "kit", High),
    rule("flashlight", PerPerson(1), "piece", High),
    rule("batteries", Flat(20), "pieces", High),
    rule("radio", Flat(1), "piece", Medium),
    rule("whistle", PerPerson(1), "piece", Medium),
    rule("blankets", PerPerson(1), "piece", Medium),
    rule("important_documents", Flat(1), "set", High),
    rule("cash", Flat(5000), "rupees", High),
];

static FLOOD_ITEMS: &[ItemRule] = &[
    rule("water_purification_tablets", Flat(50), "tablets", High),
    rule("waterproof_bags", PerPerson(1), "piece", High),
    rule("life_jackets", PerPerson(1), "piece", High),
    rule("sandbags", Flat(20), "bags", Medium),
];

static EARTHQUAKE_ITEMS: &[ItemRule] = &[
    rule("hard_hats", PerPerson(1), "piece", High),
    rule("work_gloves", PerPerson(2), "pairs", Medium),
    rule("crowbar", Flat(1), "piece", Medium),
    rule("dust_masks", PerPerson(5), "pieces", High),
];

static CYCLONE_ITEMS: &[ItemRule] = &[
    rule("tarps", Flat(2), "pieces", High),
    rule("rope", Flat(50), "meters", Medium),
    rule("duct_tape", Flat(5), "rolls", Medium),
    rule("emergency_shelter", Flat(1), "piece", High),
];

static LANDSLIDE_ITEMS: &[ItemRule] = &[
    rule("emergency_shovel", Flat(1), "piece", High),
    rule("walkie_talkies", Flat(2), "pairs", Medium),
    rule("emergency_blanket", PerPerson(1), "piece", High),
];

pub static MEDICAL_ITEMS: &[ItemRule] = &[
    rule("prescription_medications", DurationPlus(3), "days supply", High),
    described("medical_equipment", "As needed", High),
    described("medical_records", "1 copy", High),
];

pub static DISABILITY_ITEMS: &[ItemRule] = &[
    described("assistive_devices", "As needed", High),
    described("communication_aids", "As needed", High),
];

pub static PET_ITEMS: &[ItemRule] = &[
    rule("pet_food", PerDay(2), "days", Medium),
    described("pet_carrier", "1+", Medium),
    described("pet_medications", "As needed", Medium),
];

/// Items specific to a disaster. Unrecognized disasters add nothing.
pub fn disaster_items(disaster: &DisasterType) -> &'static [ItemRule] {
    match disaster {
        DisasterType::Flood => FLOOD_ITEMS,
        DisasterType::Earthquake => EARTHQUAKE_ITEMS,
        DisasterType::Cyclone => CYCLONE_ITEMS,
        DisasterType::Landslide => LANDSLIDE_ITEMS,
        DisasterType::Other(_) => &[],
    }
}

impl Scaling {
    fn quantity(self, unit: &'static str, family_size: u64, duration: u64) -> Quantity {
        let amount = match self {
            Scaling::Flat(n) => n,
            Scaling::PerPerson(n) => n.saturating_mul(family_size),
            Scaling::PerPersonPerDay(n) => n.saturating_mul(family_size).saturating_mul(duration),
            Scaling::PerDay(n) => n.saturating_mul(duration),
            Scaling::DurationPlus(n) => duration.saturating_add(n),
            Scaling::Descriptive(text) => return Quantity::Descriptive(text),
        };
        Quantity::Measured { amount, unit }
    }
}

/// Evaluates `rules` and inserts them into `items`, replacing same-named entries.
pub fn merge_rules(items: &mut KitItems, rules: &[ItemRule], request: &KitRequest) {
    let family_size = u64::from(request.family_size);
    let duration = u64::from(request.duration);

    for rule in rules {
        items.insert(
            rule.name.to_string(),
            ItemSpec {
                quantity: rule.scaling.quantity(rule.unit, family_size, duration),
                priority: rule.priority,
            },
        );
    }
}

/// Saturates at `u64::MAX` for households too large to price.
pub fn estimated_cost(request: &KitRequest) -> u64 {
    let cost = u128::from(request.family_size)
        * u128::from(request.duration)
        * u128::from(BASE_COST_PER_PERSON_DAY)
        * u128::from(request.budget_range.multiplier_percent())
        / 100;
    u64::try_from(cost).unwrap_or(u64::MAX)
}

pub fn generate(request: &KitRequest) -> KitResult {
    let mut items = KitItems::new();

    merge_rules(&mut items, BASE_ITEMS, request);
    merge_rules(&mut items, disaster_items(&request.disaster_type), request);
    if request.has_medical {
        merge_rules(&mut items, MEDICAL_ITEMS, request);
    }
    if request.has_disabilities {
        merge_rules(&mut items, DISABILITY_ITEMS, request);
    }
    if request.has_pets {
        merge_rules(&mut items, PET_ITEMS, request);
    }

    let high_priority_items = items
        .values()
        .filter(|item| item.priority == Priority::High)
        .count();

    KitResult {
        total_items: items.len(),
        high_priority_items,
        estimated_cost: estimated_cost(request),
        items,
        disaster_type: request.disaster_type.clone(),
        family_size: request.family_size,
        duration_days: request.duration,
        budget_range: request.budget_range.clone(),
    }
}
