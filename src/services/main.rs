use chrono::{SecondsFormat, Utc};

use crate::SERVICE_NAME;
use crate::dto::vod::ServiceInfoDto;

/// Paths served by this application, as advertised by the health endpoint.
pub const ENDPOINTS: &[&str] = &[
    "/health",
    "/api/vod/list",
    "/api/vod/detail/{id}",
    "/api/vod/search",
    "/api/vod/class",
    "/api/vod/stats",
    "/admin/collect",
    "/cron/collect",
];

/// Service metadata returned by `/` and `/health`.
pub fn service_info() -> ServiceInfoDto {
    ServiceInfoDto {
        name: SERVICE_NAME,
        version: env!("CARGO_PKG_VERSION"),
        status: "ok",
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        endpoints: ENDPOINTS.to_vec(),
    }
}
