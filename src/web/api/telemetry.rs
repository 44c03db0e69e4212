use axum::{
    extract::State,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::telemetry::TelemetrySample;
use crate::web::state::AppState;

#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn no_data() -> Self {
        MessageResponse {
            message: "No data available".to_string(),
        }
    }
}

#[utoipa::path(
    get,
    path = "/live-data",
    responses(
        (status = 200, description = "Latest telemetry sample, or a no-data message", body = TelemetrySample),
        (status = 404, description = "No sample yet (when configured)", body = MessageResponse)
    ),
    tag = "telemetry"
)]
pub async fn live_data(State(state): State<AppState>) -> Response {
    match state.store.latest() {
        Some(sample) => Json(sample).into_response(),
        None => (
            state.config.web.empty_live_data.status(),
            Json(MessageResponse::no_data()),
        )
            .into_response(),
    }
}

#[utoipa::path(
    get,
    path = "/history",
    responses(
        (status = 200, description = "Stored telemetry, oldest first", body = Vec<TelemetrySample>)
    ),
    tag = "telemetry"
)]
pub async fn history(State(state): State<AppState>) -> Json<Vec<TelemetrySample>> {
    Json(state.store.snapshot())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use chrono::{TimeZone, Utc};
    use serde_json::{json, Value};
    use std::sync::Arc;

    use crate::telemetry::TelemetryStore;
    use crate::web::config::{Config, EmptyLiveData};

    fn state(capacity: usize, empty_live_data: EmptyLiveData) -> AppState {
        let mut config = Config::default();
        config.web.empty_live_data = empty_live_data;
        AppState {
            config: Arc::new(config),
            store: Arc::new(TelemetryStore::new(capacity)),
        }
    }

    fn sample(second: u32, altitude: f64) -> TelemetrySample {
        TelemetrySample {
            timestamp: Utc.with_ymd_and_hms(2024, 6, 1, 8, 0, second).unwrap(),
            latitude: 36.5,
            longitude: -119.4,
            altitude,
            temperature: -10.0,
        }
    }

    async fn body_json(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn live_data_without_samples_reports_no_data() {
        let response = live_data(State(state(10, EmptyLiveData::Ok))).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await,
            json!({"message": "No data available"})
        );
    }

    #[tokio::test]
    async fn live_data_without_samples_can_be_404() {
        let response = live_data(State(state(10, EmptyLiveData::NotFound))).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            body_json(response).await,
            json!({"message": "No data available"})
        );
    }

    #[tokio::test]
    async fn live_data_returns_latest_sample() {
        let state = state(10, EmptyLiveData::NotFound);
        state.store.append(sample(0, 1000.0));
        state.store.append(sample(5, 1040.0));

        let response = live_data(State(state)).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await,
            json!({
                "time": "2024-06-01T08:00:05Z",
                "latitude": 36.5,
                "longitude": -119.4,
                "altitude": 1040.0,
                "temperature": -10.0
            })
        );
    }

    #[tokio::test]
    async fn history_is_oldest_first_and_bounded() {
        let state = state(3, EmptyLiveData::Ok);
        for (i, altitude) in [1000.0, 1010.0, 1020.0, 1030.0].into_iter().enumerate() {
            state.store.append(sample(i as u32, altitude));
        }

        let Json(samples) = history(State(state)).await;
        let altitudes: Vec<f64> = samples.iter().map(|s| s.altitude).collect();
        assert_eq!(altitudes, vec![1010.0, 1020.0, 1030.0]);
    }

    #[tokio::test]
    async fn history_of_empty_store_is_empty_array() {
        let Json(samples) = history(State(state(3, EmptyLiveData::Ok))).await;
        assert!(samples.is_empty());
    }
}
