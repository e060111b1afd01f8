use crate::models::safe_spot::{SafeSpot, SpotType};
use crate::utils::calculate_distance;

pub const DEFAULT_RADIUS_KM: f64 = 5.0;

struct SpotTemplate {
    name: &'static str,
    spot_type: SpotType,
    lat_offset: f64,
    lng_offset: f64,
    capacity: u32,
    facilities: &'static [&'static str],
}

static NEARBY_SPOTS: &[SpotTemplate] = &[
    SpotTemplate {
        name: "Local Park",
        spot_type: SpotType::OpenSpace,
        lat_offset: 0.01,
        lng_offset: 0.01,
        capacity: 100,
        facilities: &["shelter", "water", "toilets"],
    },
    SpotTemplate {
        name: "Community Center",
        spot_type: SpotType::Shelter,
        lat_offset: -0.01,
        lng_offset: 0.02,
        capacity: 200,
        facilities: &["shelter", "medical", "food"],
    },
];

/// Evacuation points around a location. Spots are synthesized around the
/// query point until a map provider is integrated.
#[derive(Default)]
pub struct SafeSpotService;

impl SafeSpotService {
    pub fn new() -> Self {
        Self
    }

    /// Earthquakes keep people in the open; floods allow shelters too; any
    /// other disaster accepts every spot. Spots beyond `radius_km` are dropped.
    pub fn find_safe_spots(
        &self,
        lat: f64,
        lng: f64,
        disaster_type: &str,
        radius_km: f64,
    ) -> Vec<SafeSpot> {
        let suitable = |spot_type: SpotType| match disaster_type.to_ascii_lowercase().as_str() {
            "earthquake" => spot_type == SpotType::OpenSpace,
            "flood" => matches!(spot_type, SpotType::Shelter | SpotType::OpenSpace),
            _ => true,
        };

        NEARBY_SPOTS
            .iter()
            .enumerate()
            .filter(|(_, t)| suitable(t.spot_type))
            .filter_map(|(index, t)| {
                let latitude = lat + t.lat_offset;
                let longitude = lng + t.lng_offset;
                let distance = calculate_distance(lat, lng, latitude, longitude);
                (distance <= radius_km).then(|| SafeSpot {
                    id: index as u32 + 1,
                    name: t.name.to_string(),
                    spot_type: t.spot_type,
                    latitude,
                    longitude,
                    distance_km: (distance * 10.0).round() / 10.0,
                    capacity: t.capacity,
                    facilities: t.facilities.to_vec(),
                })
            })
            .collect()
    }
}
