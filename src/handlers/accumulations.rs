use crate::models::*;
use crate::services::AccumulationService;
use actix_web::{HttpResponse, ResponseError, Result, web};
use chrono::Utc;

#[utoipa::path(
    post,
    path = "/accumulations",
    tag = "accumulations",
    request_body = AccumulateRequest,
    responses(
        (status = 200, description = "Purchase recorded", body = AccumulationWithBenefits),
        (status = 404, description = "No margin rule or customer"),
        (status = 422, description = "Invalid amount or station price")
    )
)]
pub async fn accumulate(
    accumulation_service: web::Data<AccumulationService>,
    request: web::Json<AccumulateRequest>,
) -> Result<HttpResponse> {
    match accumulation_service
        .accumulate(request.into_inner(), Utc::now())
        .await
    {
        Ok(recorded) => Ok(HttpResponse::Ok().json(ApiResponse::ok(recorded))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn accumulations_config(cfg: &mut web::ServiceConfig) {
    cfg.route("/accumulations", web::post().to(accumulate));
}
