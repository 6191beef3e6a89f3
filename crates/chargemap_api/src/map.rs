use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use chargemap_core::{EngineError, StationEngine};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapCenterRequest {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PowerFilterRequest {
    pub min_power: f64,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub error: String,
}

fn engine_error_to_response(error: EngineError) -> impl IntoResponse {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: error.to_string(),
        }),
    )
}

/// Update the map reference point distances are measured from
pub async fn update_map_center(
    State(engine): State<Arc<Mutex<StationEngine>>>,
    Json(payload): Json<MapCenterRequest>,
) -> impl IntoResponse {
    let mut engine = engine.lock().unwrap();
    match engine.set_reference_point(payload.latitude, payload.longitude) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(error) => engine_error_to_response(error).into_response(),
    }
}

/// Update the minimum power a station needs to stay in the ranked view
pub async fn update_power_filter(
    State(engine): State<Arc<Mutex<StationEngine>>>,
    Json(payload): Json<PowerFilterRequest>,
) -> impl IntoResponse {
    let mut engine = engine.lock().unwrap();
    match engine.set_power_threshold(payload.min_power) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(error) => engine_error_to_response(error).into_response(),
    }
}

/// Select a station by id
pub async fn select_station(
    State(engine): State<Arc<Mutex<StationEngine>>>,
    Path(station_id): Path<u64>,
) -> impl IntoResponse {
    let mut engine = engine.lock().unwrap();
    engine.select_station(station_id);
    StatusCode::NO_CONTENT
}

/// Clear the current station selection
pub async fn clear_selection(
    State(engine): State<Arc<Mutex<StationEngine>>>,
) -> impl IntoResponse {
    let mut engine = engine.lock().unwrap();
    engine.clear_selection();
    StatusCode::NO_CONTENT
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        Router,
        body::Body,
        http::{Request, StatusCode},
        routing::{delete, post},
    };
    use tower::util::ServiceExt;

    /// Create the application router with the mutation endpoints
    pub fn create_app(engine: StationEngine) -> Router {
        let shared_engine = Arc::new(Mutex::new(engine));
        Router::new()
            .route("/map/center", post(update_map_center))
            .route("/filter/min-power", post(update_power_filter))
            .route("/stations/{station_id}/select", post(select_station))
            .route("/stations/selected", delete(clear_selection))
            .with_state(shared_engine)
    }

    #[tokio::test]
    async fn test_update_map_center() {
        let app = create_app(StationEngine::new(vec![]));

        let request = MapCenterRequest {
            latitude: 59.9311,
            longitude: 30.3609,
        };
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/map/center")
                    .method("POST")
                    .header("content-type", "application/json")
                    .body(Body::from(serde_json::to_string(&request).unwrap()))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }

    #[tokio::test]
    async fn test_update_map_center_out_of_range() {
        let app = create_app(StationEngine::new(vec![]));

        let request = MapCenterRequest {
            latitude: 95.0,
            longitude: 30.0,
        };
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/map/center")
                    .method("POST")
                    .header("content-type", "application/json")
                    .body(Body::from(serde_json::to_string(&request).unwrap()))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let error_response: ErrorResponse = serde_json::from_slice(&body).unwrap();
        assert!(error_response.error.contains("latitude"));
    }

    #[tokio::test]
    async fn test_negative_power_filter_rejected() {
        let app = create_app(StationEngine::new(vec![]));

        let request = PowerFilterRequest { min_power: -5.0 };
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/filter/min-power")
                    .method("POST")
                    .header("content-type", "application/json")
                    .body(Body::from(serde_json::to_string(&request).unwrap()))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_select_and_clear() {
        let engine = StationEngine::new(vec![]);
        let shared_engine = Arc::new(Mutex::new(engine));
        let app = Router::new()
            .route("/stations/{station_id}/select", post(select_station))
            .route("/stations/selected", delete(clear_selection))
            .with_state(shared_engine.clone());

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/stations/42/select")
                    .method("POST")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        assert_eq!(shared_engine.lock().unwrap().selected_station_id(), Some(42));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/stations/selected")
                    .method("DELETE")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        assert_eq!(shared_engine.lock().unwrap().selected_station_id(), None);
    }
}
