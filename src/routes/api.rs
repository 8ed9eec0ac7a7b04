use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, Responder, web};

use crate::forms::QueryParams;
use crate::forms::vod::{ListVideosForm, SearchVideosForm};
use crate::repository::DieselRepository;
use crate::services::ServiceError;
use crate::services::vod::{
    current_catalog_stats as catalog_stats_service, get_video as get_video_service,
    list_categories as list_categories_service, list_videos as list_videos_service,
    search_videos as search_videos_service,
};

use super::{failure, success};

/// Map read failures to their response; internals are never echoed back.
fn read_failure(err: ServiceError) -> HttpResponse {
    match err {
        ServiceError::NotFound => failure(StatusCode::NOT_FOUND, "Video not found"),
        _ => failure(StatusCode::INTERNAL_SERVER_ERROR, "Server error"),
    }
}

pub async fn list_videos(
    req: HttpRequest,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let form = ListVideosForm::from(QueryParams::parse(req.query_string()));

    match list_videos_service(form.into(), repo.get_ref()) {
        Ok(page) => success(page),
        Err(err) => read_failure(err),
    }
}

/// Everything after `/detail/` is the id; an empty or missing one is a 404.
pub async fn video_detail(
    req: HttpRequest,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let raw_id = req.match_info().get("id").unwrap_or_default();

    match get_video_service(raw_id, repo.get_ref()) {
        Ok(video) => success(video),
        Err(err) => read_failure(err),
    }
}

pub async fn search_videos(
    req: HttpRequest,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let form = SearchVideosForm::from(QueryParams::parse(req.query_string()));

    match search_videos_service(form.into(), repo.get_ref()) {
        Ok(result) => success(result),
        Err(err) => read_failure(err),
    }
}

pub async fn list_categories(repo: web::Data<DieselRepository>) -> impl Responder {
    match list_categories_service(repo.get_ref()) {
        Ok(categories) => success(categories),
        Err(err) => read_failure(err),
    }
}

pub async fn catalog_stats(repo: web::Data<DieselRepository>) -> impl Responder {
    match catalog_stats_service(repo.get_ref()) {
        Ok(stats) => success(stats),
        Err(err) => read_failure(err),
    }
}
