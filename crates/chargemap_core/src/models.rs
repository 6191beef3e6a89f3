use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A geographic point in WGS84 degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// A user review of a charging station, as delivered by the data source.
///
/// Fields the source may omit are `Option`; defaulting happens during
/// enrichment, not at parse time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StationReview {
    pub user_id: u64,
    pub user_name: String,
    pub car_model: String,
    /// Power actually drawn during the charge, in kW.
    pub kilowatts: Option<f64>,
    pub message: Option<String>,
    pub created_at: DateTime<Utc>,
    /// Rating from 0 to 5.
    pub rating: Option<f64>,
    pub user_metadata: Option<serde_json::Value>,
}

/// A charging station as delivered by the data source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChargingStation {
    pub id: u64,
    pub name: String,
    pub description: Option<String>,
    pub coordinates: Coordinates,
    pub address: Option<String>,
    pub provider: String,
    /// Share of successful connection attempts, 0 to 100.
    pub success_rate: Option<f64>,
    pub kilowatt_price: Option<f64>,
    /// Power advertised by the operator, in kW.
    pub kilowatts_declared: Option<f64>,
    #[serde(default)]
    pub reviews: Vec<StationReview>,
}

/// A review after normalization: every defaultable field is concrete.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedReview {
    pub user_id: u64,
    pub user_name: String,
    pub car_model: String,
    pub kilowatts: f64,
    pub message: String,
    pub created_at: DateTime<Utc>,
    pub rating: f64,
    pub user_metadata: Option<serde_json::Value>,
}

/// A station after normalization, carrying the two derived metrics.
///
/// `address`, `success_rate` and `kilowatt_price` stay optional: there is
/// no sensible default for them and consumers render their absence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedStation {
    pub id: u64,
    pub name: String,
    pub description: String,
    pub coordinates: Coordinates,
    pub address: Option<String>,
    pub provider: String,
    pub success_rate: Option<f64>,
    /// Rounded to 2 decimals when present.
    pub kilowatt_price: Option<f64>,
    pub kilowatts_declared: f64,
    pub reviews: Vec<EnrichedReview>,
    /// Average review rating, 0 to 5, rounded to 1 decimal. 0 without reviews.
    pub rating: f64,
    /// Median observed power in kW, rounded to 1 decimal. 0 without reviews.
    pub kilowatts_calculated: f64,
}
