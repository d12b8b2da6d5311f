use crate::models::*;
use crate::services::{CustomerService, LevelService};
use actix_web::{HttpResponse, ResponseError, Result, web};
use chrono::Utc;
use serde_json::json;

#[utoipa::path(
    post,
    path = "/customers",
    tag = "customers",
    request_body = RegisterCustomerRequest,
    responses(
        (status = 200, description = "Customer created or refreshed", body = RegisterCustomerResponse),
        (status = 400, description = "Invalid customer data")
    )
)]
pub async fn register_customer(
    customer_service: web::Data<CustomerService>,
    request: web::Json<RegisterCustomerRequest>,
) -> Result<HttpResponse> {
    match customer_service
        .register_customer(request.into_inner(), Utc::now())
        .await
    {
        Ok((customer, created)) => {
            let response = RegisterCustomerResponse {
                customer: customer.into(),
                created,
            };
            Ok(HttpResponse::Ok().json(json!({
                "success": true,
                "data": response
            })))
        }
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/customers/level",
    tag = "customers",
    params(
        ("phone" = String, Query, description = "Customer phone number")
    ),
    responses(
        (status = 200, description = "Current customer level", body = CustomerLevelResponse),
        (status = 404, description = "No active level")
    )
)]
pub async fn get_customer_level(
    level_service: web::Data<LevelService>,
    query: web::Query<PhoneQuery>,
) -> Result<HttpResponse> {
    match level_service
        .get_customer_level_by_phone(&query.phone, Utc::now())
        .await
    {
        Ok((row, level)) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": CustomerLevelResponse::new(row, level)
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn customers_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/customers")
            .route("", web::post().to(register_customer))
            .route("/level", web::get().to(get_customer_level)),
    );
}
