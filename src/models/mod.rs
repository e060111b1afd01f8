pub mod alert;
pub mod emergency_kit;
pub mod incident;
pub mod kit;
pub mod newsletter;
pub mod safe_spot;
