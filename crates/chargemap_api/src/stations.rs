use axum::{Json, extract::State};
use chargemap_core::{EnrichedStation, SEGMENT_COUNT, StationEngine};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DistributionResponse {
    pub buckets: [u32; SEGMENT_COUNT],
    /// Upper end of the power scale the buckets divide, in kW.
    pub scale_max: f64,
}

/// Get stations above the power threshold, nearest first
pub async fn list_stations(
    State(engine): State<Arc<Mutex<StationEngine>>>,
) -> Json<Vec<EnrichedStation>> {
    tracing::info!("Listing ranked stations");
    let mut engine = engine.lock().unwrap();
    Json(engine.ranked_stations().to_vec())
}

/// Get the full enriched station collection, unranked
pub async fn list_all_stations(
    State(engine): State<Arc<Mutex<StationEngine>>>,
) -> Json<Vec<EnrichedStation>> {
    tracing::info!("Listing all stations");
    let mut engine = engine.lock().unwrap();
    Json(engine.enriched_stations().to_vec())
}

/// Get the power distribution histogram and its scale
pub async fn get_power_distribution(
    State(engine): State<Arc<Mutex<StationEngine>>>,
) -> Json<DistributionResponse> {
    tracing::info!("Getting power distribution");
    let mut engine = engine.lock().unwrap();
    let buckets = engine.power_distribution();
    let scale_max = engine.power_scale_max();
    Json(DistributionResponse { buckets, scale_max })
}

/// Get the currently selected station, `null` when none resolves
pub async fn get_selected_station(
    State(engine): State<Arc<Mutex<StationEngine>>>,
) -> Json<Option<EnrichedStation>> {
    tracing::info!("Getting selected station");
    let mut engine = engine.lock().unwrap();
    Json(engine.selected_station().cloned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        Router,
        body::Body,
        http::{Request, StatusCode},
        routing::get,
    };
    use chargemap_core::{ChargingStation, Coordinates};
    use tower::util::ServiceExt;

    /// Create the application router with the read-side endpoints
    pub fn create_app(engine: StationEngine) -> Router {
        let shared_engine = Arc::new(Mutex::new(engine));
        Router::new()
            .route("/stations", get(list_stations))
            .route("/stations/all", get(list_all_stations))
            .route("/stations/distribution", get(get_power_distribution))
            .route("/stations/selected", get(get_selected_station))
            .with_state(shared_engine)
    }

    fn test_station(id: u64, latitude: f64) -> ChargingStation {
        ChargingStation {
            id,
            name: format!("Station {id}"),
            description: None,
            coordinates: Coordinates {
                latitude,
                longitude: 37.618423,
            },
            address: None,
            provider: "Tesla".into(),
            success_rate: None,
            kilowatt_price: None,
            kilowatts_declared: None,
            reviews: vec![],
        }
    }

    #[tokio::test]
    async fn test_list_stations_empty_dataset() {
        let app = create_app(StationEngine::new(vec![]));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/stations")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let stations: Vec<EnrichedStation> = serde_json::from_slice(&body).unwrap();
        assert!(stations.is_empty());
    }

    #[tokio::test]
    async fn test_list_all_stations_applies_defaults() {
        let app = create_app(StationEngine::new(vec![test_station(1, 55.76)]));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/stations/all")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let stations: Vec<EnrichedStation> = serde_json::from_slice(&body).unwrap();
        assert_eq!(stations.len(), 1);
        assert_eq!(stations[0].description, "No description");
        assert_eq!(stations[0].rating, 0.0);
        assert_eq!(stations[0].kilowatts_calculated, 0.0);
    }

    #[tokio::test]
    async fn test_distribution_endpoint_empty_dataset() {
        let app = create_app(StationEngine::new(vec![]));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/stations/distribution")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let distribution: DistributionResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(distribution.buckets, [0, 0, 0, 0, 0]);
        assert_eq!(distribution.scale_max, 300.0);
    }

    #[tokio::test]
    async fn test_selected_station_null_without_selection() {
        let app = create_app(StationEngine::new(vec![test_station(1, 55.76)]));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/stations/selected")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let selected: Option<EnrichedStation> = serde_json::from_slice(&body).unwrap();
        assert!(selected.is_none());
    }
}
