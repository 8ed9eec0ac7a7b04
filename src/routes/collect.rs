use std::time::Duration;

use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, Responder, web};

use crate::dto::vod::CollectSummaryDto;
use crate::forms::QueryParams;
use crate::forms::collect::CollectForm;
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::services::ServiceError;
use crate::services::collect::{check_credential, collect_manual, collect_scheduled};
use crate::upstream::HttpVodSource;

use super::{failure, success_message};

/// Header carrying the scheduler's shared secret.
pub const CRON_AUTH_HEADER: &str = "X-Cron-Auth";

pub async fn admin_collect(
    req: HttpRequest,
    repo: web::Data<DieselRepository>,
    source: web::Data<HttpVodSource>,
    server_config: web::Data<ServerConfig>,
) -> impl Responder {
    let form = CollectForm::from(QueryParams::parse(req.query_string()));
    let page_delay = Duration::from_millis(server_config.collect_delay_ms);

    match collect_manual(
        form.into(),
        &server_config.admin_key,
        source.get_ref(),
        repo.get_ref(),
        page_delay,
    )
    .await
    {
        Ok(count) => HttpResponse::Ok().json(CollectSummaryDto::new(count)),
        Err(ServiceError::Unauthorized) => failure(StatusCode::UNAUTHORIZED, "Unauthorized"),
        Err(ServiceError::Ingest(message)) => {
            failure(StatusCode::INTERNAL_SERVER_ERROR, message)
        }
        Err(err) => {
            log::error!("Manual collection failed: {err}");
            failure(StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
        }
    }
}

pub async fn cron_collect(
    req: HttpRequest,
    repo: web::Data<DieselRepository>,
    source: web::Data<HttpVodSource>,
    server_config: web::Data<ServerConfig>,
) -> impl Responder {
    let presented = req
        .headers()
        .get(CRON_AUTH_HEADER)
        .and_then(|value| value.to_str().ok());

    if check_credential(presented, &server_config.cron_secret).is_err() {
        return failure(StatusCode::UNAUTHORIZED, "Unauthorized");
    }

    let page_delay = Duration::from_millis(server_config.collect_delay_ms);
    actix_web::rt::spawn(async move {
        collect_scheduled(source.get_ref(), repo.get_ref(), page_delay).await;
    });

    success_message::<()>("Collection started", None)
}
