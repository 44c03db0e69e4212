use utoipa::OpenApi;

use super::api::telemetry::MessageResponse;
use crate::telemetry::TelemetrySample;

#[derive(OpenApi)]
#[openapi(
    paths(
        super::api::telemetry::live_data,
        super::api::telemetry::history,
    ),
    components(
        schemas(
            TelemetrySample,
            MessageResponse,
        )
    ),
    info(
        title = "Sat Telemetry API",
        description = "Simulated satellite telemetry, latest sample and bounded history",
        version = "0.1.0"
    ),
    tags(
        (name = "telemetry", description = "Telemetry readouts")
    )
)]
pub struct ApiDoc;
