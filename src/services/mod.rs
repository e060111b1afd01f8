pub mod kit_generator;
pub mod mail;
pub mod safe_spots;
pub mod uploads;
pub mod weather;

use crate::config::Config;
use crate::repository::Store;
use std::sync::Arc;

pub struct AppState {
    pub config: Config,
    pub store: Arc<dyn Store>,
    pub mail: mail::MailService,
    pub uploads: uploads::UploadService,
    pub weather: weather::WeatherService,
    pub safe_spots: safe_spots::SafeSpotService,
}

impl AppState {
    pub async fn new(
        config: Config,
        store: Arc<dyn Store>,
        mail: mail::MailService,
    ) -> anyhow::Result<Self> {
        let uploads = uploads::UploadService::new(config.upload_dir.clone()).await?;
        let weather = weather::WeatherService::new(config.weather_api_key.clone());

        Ok(Self {
            config,
            store,
            mail,
            uploads,
            weather,
            safe_spots: safe_spots::SafeSpotService::new(),
        })
    }
}
