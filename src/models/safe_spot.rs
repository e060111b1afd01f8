use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SpotType {
    OpenSpace,
    Shelter,
}

#[derive(Clone, Debug, Serialize)]
pub struct SafeSpot {
    pub id: u32,
    pub name: String,
    #[serde(rename = "type")]
    pub spot_type: SpotType,
    pub latitude: f64,
    pub longitude: f64,
    pub distance_km: f64,
    pub capacity: u32,
    pub facilities: Vec<&'static str>,
}
