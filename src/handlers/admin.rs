use crate::models::*;
use crate::services::{BenefitService, GenerationService, LevelService};
use actix_web::{HttpResponse, ResponseError, Result, web};
use chrono::Utc;
use serde_json::json;

#[utoipa::path(
    post,
    path = "/admin/benefits",
    tag = "admin",
    request_body = BenefitTerms,
    responses(
        (status = 200, description = "Benefit template created", body = BenefitResponse),
        (status = 400, description = "Invalid benefit"),
        (status = 404, description = "Level not found")
    )
)]
pub async fn create_benefit(
    benefit_service: web::Data<BenefitService>,
    request: web::Json<CreateBenefitRequest>,
) -> Result<HttpResponse> {
    match benefit_service.create_benefit(request.into_inner()).await {
        Ok(benefit) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": BenefitResponse::from(benefit)
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/admin/benefits/{id}",
    tag = "admin",
    params(
        ("id" = i64, Path, description = "Benefit template id")
    ),
    request_body = UpdateBenefitRequest,
    responses(
        (status = 200, description = "Benefit template updated", body = BenefitResponse),
        (status = 400, description = "Invalid benefit"),
        (status = 404, description = "Benefit not found")
    )
)]
pub async fn update_benefit(
    benefit_service: web::Data<BenefitService>,
    path: web::Path<i64>,
    request: web::Json<UpdateBenefitRequest>,
) -> Result<HttpResponse> {
    match benefit_service
        .update_benefit(path.into_inner(), request.into_inner())
        .await
    {
        Ok(benefit) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": BenefitResponse::from(benefit)
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/admin/benefits-generated/{id}",
    tag = "admin",
    params(
        ("id" = i64, Path, description = "Generated benefit id")
    ),
    request_body = UpdateGeneratedBenefitRequest,
    responses(
        (status = 200, description = "Generated benefit updated", body = GeneratedBenefitResponse),
        (status = 404, description = "Generated benefit not found")
    )
)]
pub async fn update_generated_benefit(
    benefit_service: web::Data<BenefitService>,
    path: web::Path<i64>,
    request: web::Json<UpdateGeneratedBenefitRequest>,
) -> Result<HttpResponse> {
    match benefit_service
        .update_generated_benefit(path.into_inner(), request.into_inner())
        .await
    {
        Ok(generated) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": GeneratedBenefitResponse::from(generated)
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/admin/levels",
    tag = "admin",
    request_body = LevelTerms,
    responses(
        (status = 200, description = "Level created", body = LevelResponse),
        (status = 400, description = "Invalid level")
    )
)]
pub async fn add_level(
    level_service: web::Data<LevelService>,
    request: web::Json<CreateLevelRequest>,
) -> Result<HttpResponse> {
    match level_service.add_level(request.into_inner()).await {
        Ok(level) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": LevelResponse::from(level)
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/admin/levels/{id}",
    tag = "admin",
    params(
        ("id" = i64, Path, description = "Level id")
    ),
    request_body = UpdateLevelRequest,
    responses(
        (status = 200, description = "Level updated", body = LevelResponse),
        (status = 404, description = "Level not found")
    )
)]
pub async fn update_level(
    level_service: web::Data<LevelService>,
    path: web::Path<i64>,
    request: web::Json<UpdateLevelRequest>,
) -> Result<HttpResponse> {
    match level_service
        .update_level(path.into_inner(), request.into_inner())
        .await
    {
        Ok(level) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": LevelResponse::from(level)
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/admin/cycles/run",
    tag = "admin",
    responses(
        (status = 200, description = "Cycle ran or was already covered", body = CycleReport),
        (status = 500, description = "Cycle aborted")
    )
)]
pub async fn run_cycle(generation_service: web::Data<GenerationService>) -> Result<HttpResponse> {
    match generation_service.run_generation_cycle(Utc::now()).await {
        Ok(report) => Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message(
            report,
            "Generation cycle finished",
        ))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/admin/cycles/activate",
    tag = "admin",
    responses(
        (status = 200, description = "Templates activated into the open period", body = ActivationReport),
        (status = 404, description = "No active period")
    )
)]
pub async fn run_activation(
    generation_service: web::Data<GenerationService>,
) -> Result<HttpResponse> {
    match generation_service.run_activation(Utc::now()).await {
        Ok(report) => Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message(
            report,
            "Benefit activation finished",
        ))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn admin_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/admin")
            .route("/benefits", web::post().to(create_benefit))
            .route("/benefits/{id}", web::put().to(update_benefit))
            .route(
                "/benefits-generated/{id}",
                web::put().to(update_generated_benefit),
            )
            .route("/levels", web::post().to(add_level))
            .route("/levels/{id}", web::put().to(update_level))
            .route("/cycles/run", web::post().to(run_cycle))
            .route("/cycles/activate", web::post().to(run_activation)),
    );
}
