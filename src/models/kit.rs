use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

/// Urgency tag attached to every kit item.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

/// How much of an item to pack.
///
/// Serialized as its rendered form, e.g. `"48 liters"` or `"As needed"`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Quantity {
    Measured { amount: u64, unit: &'static str },
    Descriptive(&'static str),
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Quantity::Measured { amount, unit } => write!(f, "{} {}", amount, unit),
            Quantity::Descriptive(text) => f.write_str(text),
        }
    }
}

impl Serialize for Quantity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ItemSpec {
    pub quantity: Quantity,
    pub priority: Priority,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum DisasterType {
    Flood,
    Earthquake,
    Cyclone,
    Landslide,
    Other(String),
}

impl DisasterType {
    pub fn parse(value: &str) -> Self {
        match value {
            "Flood" => DisasterType::Flood,
            "Earthquake" => DisasterType::Earthquake,
            "Cyclone" => DisasterType::Cyclone,
            "Landslide" => DisasterType::Landslide,
            other => DisasterType::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            DisasterType::Flood => "Flood",
            DisasterType::Earthquake => "Earthquake",
            DisasterType::Cyclone => "Cyclone",
            DisasterType::Landslide => "Landslide",
            DisasterType::Other(name) => name,
        }
    }
}

impl fmt::Display for DisasterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for DisasterType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum BudgetTier {
    Basic,
    Standard,
    Premium,
    Other(String),
}

impl BudgetTier {
    pub fn parse(value: &str) -> Self {
        match value {
            "basic" => BudgetTier::Basic,
            "standard" => BudgetTier::Standard,
            "premium" => BudgetTier::Premium,
            other => BudgetTier::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            BudgetTier::Basic => "basic",
            BudgetTier::Standard => "standard",
            BudgetTier::Premium => "premium",
            BudgetTier::Other(name) => name,
        }
    }

    /// Cost multiplier in percent. Unrecognized tiers cost the same as basic.
    pub fn multiplier_percent(&self) -> u64 {
        match self {
            BudgetTier::Basic | BudgetTier::Other(_) => 100,
            BudgetTier::Standard => 150,
            BudgetTier::Premium => 200,
        }
    }
}

impl fmt::Display for BudgetTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for BudgetTier {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Household and scenario parameters for a kit. Ranges are checked by the
/// caller before generation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KitRequest {
    pub disaster_type: DisasterType,
    pub family_size: u32,
    pub adults: u32,
    pub children: u32,
    pub seniors: u32,
    pub has_medical: bool,
    pub has_disabilities: bool,
    pub has_pets: bool,
    pub duration: u32,
    pub budget_range: BudgetTier,
}

pub type KitItems = BTreeMap<String, ItemSpec>;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct KitResult {
    pub items: KitItems,
    pub estimated_cost: u64,
    pub total_items: usize,
    pub high_priority_items: usize,
    pub disaster_type: DisasterType,
    pub family_size: u32,
    pub duration_days: u32,
    pub budget_range: BudgetTier,
}

impl KitResult {
    pub fn item(&self, name: &str) -> Option<&ItemSpec> {
        self.items.get(name)
    }
}
