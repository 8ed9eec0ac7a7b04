//! HTTP surface of the service.
//!
//! Handlers stay thin: they coerce the request into a payload, call the
//! matching service function and translate its result into the JSON
//! envelope `{success, data?, message?, error?}`.

use actix_web::http::{StatusCode, header};
use actix_web::middleware::DefaultHeaders;
use actix_web::{HttpResponse, guard, web};
use serde::Serialize;
use serde_json::json;

pub mod api;
pub mod collect;
pub mod main;

/// Standard JSON envelope.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// `200 OK` with `data`.
pub fn success<T: Serialize>(data: T) -> HttpResponse {
    HttpResponse::Ok().json(ApiResponse {
        success: true,
        data: Some(data),
        message: None,
        error: None,
    })
}

/// `200 OK` with a human readable `message` and optional `data`.
pub fn success_message<T: Serialize>(message: impl Into<String>, data: Option<T>) -> HttpResponse {
    HttpResponse::Ok().json(ApiResponse {
        success: true,
        data,
        message: Some(message.into()),
        error: None,
    })
}

/// An error envelope with the given status.
pub fn failure(status: StatusCode, error: impl Into<String>) -> HttpResponse {
    HttpResponse::build(status).json(ApiResponse::<()> {
        success: false,
        data: None,
        message: None,
        error: Some(error.into()),
    })
}

/// Permissive CORS headers added to every response.
pub fn cors_headers() -> DefaultHeaders {
    DefaultHeaders::new()
        .add((header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"))
        .add((header::ACCESS_CONTROL_ALLOW_METHODS, "GET, POST, OPTIONS"))
        .add((
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            "Content-Type, X-Cron-Auth",
        ))
}

/// Fallback for every unmatched path.
pub async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(json!({ "error": "Not Found" }))
}

/// CORS preflight answer for any path.
pub async fn preflight() -> HttpResponse {
    HttpResponse::NoContent().finish()
}

/// Register every route of the service.
///
/// Resources answer any method; only `OPTIONS` is intercepted for preflight.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/{tail:.*}")
            .guard(guard::Options())
            .to(preflight),
    )
    .service(web::resource("/").to(main::index))
    .service(web::resource("/health").to(main::health))
    .service(
        web::scope("/api/vod")
            .service(web::resource("/list").to(api::list_videos))
            .service(web::resource(["/detail", "/detail/{id:.*}"]).to(api::video_detail))
            .service(web::resource("/search").to(api::search_videos))
            .service(web::resource("/class").to(api::list_categories))
            .service(web::resource("/stats").to(api::catalog_stats)),
    )
    .service(web::resource("/admin/collect").to(collect::admin_collect))
    .service(web::resource("/cron/collect").to(collect::cron_collect))
    .default_service(web::to(not_found));
}
