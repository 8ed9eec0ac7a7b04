use actix_web::{Responder, web};

use crate::services::main::service_info;

pub async fn index() -> impl Responder {
    web::Json(service_info())
}

pub async fn health() -> impl Responder {
    web::Json(service_info())
}
