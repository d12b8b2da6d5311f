use crate::models::*;
use crate::services::BenefitService;
use actix_web::{HttpResponse, ResponseError, Result, web};
use chrono::Utc;
use serde_json::json;

#[utoipa::path(
    post,
    path = "/benefits/tickets/{id}/redeem",
    tag = "benefits",
    params(
        ("id" = i64, Path, description = "Benefit ticket id")
    ),
    request_body = RedeemBenefitRequest,
    responses(
        (status = 200, description = "Benefit redeemed", body = BenefitTicketResponse),
        (status = 404, description = "Ticket not found"),
        (status = 409, description = "Already redeemed or out of stock"),
        (status = 422, description = "Ticket not valid right now")
    )
)]
pub async fn redeem_benefit(
    benefit_service: web::Data<BenefitService>,
    path: web::Path<i64>,
    request: web::Json<RedeemBenefitRequest>,
) -> Result<HttpResponse> {
    let ticket_id = path.into_inner();

    match benefit_service
        .redeem_benefit(ticket_id, request.customer_id, Utc::now())
        .await
    {
        Ok(redeemed) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": BenefitTicketResponse::from(redeemed)
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/benefits/dependent",
    tag = "benefits",
    params(
        ("phone" = String, Query, description = "Customer phone number"),
        ("charged_amount" = f64, Query, description = "Amount of the current purchase")
    ),
    responses(
        (status = 200, description = "Dependent benefits unlocked by the amount", body = [BenefitTicketResponse])
    )
)]
pub async fn get_dependent_benefits(
    benefit_service: web::Data<BenefitService>,
    query: web::Query<DependentBenefitsQuery>,
) -> Result<HttpResponse> {
    match benefit_service
        .get_active_dependent_benefits(&query.phone, query.charged_amount, Utc::now())
        .await
    {
        Ok(tickets) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": tickets.into_iter().map(BenefitTicketResponse::from).collect::<Vec<_>>()
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/benefits/active",
    tag = "benefits",
    params(
        ("phone" = String, Query, description = "Customer phone number"),
        ("benefit_type" = Option<BenefitType>, Query, description = "Defaults to digital")
    ),
    responses(
        (status = 200, description = "Open, non-dependent benefits", body = [BenefitTicketResponse])
    )
)]
pub async fn get_active_benefits(
    benefit_service: web::Data<BenefitService>,
    query: web::Query<ActiveBenefitsQuery>,
) -> Result<HttpResponse> {
    let query = query.into_inner();

    match benefit_service
        .get_active_benefits_by_phone(&query.phone, query.benefit_type, Utc::now())
        .await
    {
        Ok(tickets) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": tickets.into_iter().map(BenefitTicketResponse::from).collect::<Vec<_>>()
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/benefits/gas-discount",
    tag = "benefits",
    params(
        ("phone" = String, Query, description = "Customer phone number")
    ),
    responses(
        (status = 200, description = "Gas discount ticket", body = BenefitTicketResponse),
        (status = 404, description = "No gas discount available")
    )
)]
pub async fn get_gas_discount(
    benefit_service: web::Data<BenefitService>,
    query: web::Query<PhoneQuery>,
) -> Result<HttpResponse> {
    match benefit_service
        .get_gas_discount_by_phone(&query.phone, Utc::now())
        .await
    {
        Ok(ticket) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": BenefitTicketResponse::from(ticket)
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn benefits_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/benefits")
            .route("/tickets/{id}/redeem", web::post().to(redeem_benefit))
            .route("/dependent", web::get().to(get_dependent_benefits))
            .route("/active", web::get().to(get_active_benefits))
            .route("/gas-discount", web::get().to(get_gas_discount)),
    );
}
