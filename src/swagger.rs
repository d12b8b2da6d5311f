use actix_web::web;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::entities::{BenefitFrequency, BenefitType, MarginType};
use crate::handlers;
use crate::models::*;

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::benefits::redeem_benefit,
        handlers::benefits::get_dependent_benefits,
        handlers::benefits::get_active_benefits,
        handlers::benefits::get_gas_discount,
        handlers::accumulations::accumulate,
        handlers::customers::register_customer,
        handlers::customers::get_customer_level,
        handlers::admin::create_benefit,
        handlers::admin::update_benefit,
        handlers::admin::update_generated_benefit,
        handlers::admin::add_level,
        handlers::admin::update_level,
        handlers::admin::run_cycle,
        handlers::admin::run_activation,
    ),
    components(
        schemas(
            BenefitType,
            BenefitFrequency,
            MarginType,
            BenefitTerms,
            UpdateBenefitRequest,
            UpdateGeneratedBenefitRequest,
            BenefitResponse,
            GeneratedBenefitResponse,
            BenefitTicketResponse,
            RedeemBenefitRequest,
            AccumulateRequest,
            AccumulationResponse,
            AccumulationWithBenefits,
            RegisterCustomerRequest,
            CustomerResponse,
            RegisterCustomerResponse,
            LevelTerms,
            UpdateLevelRequest,
            LevelResponse,
            CustomerLevelResponse,
            CycleStatus,
            LevelingReport,
            CycleReport,
            ActivationReport,
            ApiError,
        )
    ),
    tags(
        (name = "benefits", description = "Customer benefit tickets API"),
        (name = "accumulations", description = "Purchase accumulation API"),
        (name = "customers", description = "Customer registration and level API"),
        (name = "admin", description = "Benefit, level and cycle administration API"),
    ),
    info(
        title = "Fuel Loyalty API",
        version = "1.0.0",
        description = "Points accrual and benefit generation REST API"
    ),
    servers(
        (url = "/api/v1", description = "Local server")
    )
)]
pub struct ApiDoc;

pub fn swagger_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
    )
    .route(
        "/swagger-ui",
        web::get().to(|| async {
            actix_web::HttpResponse::Found()
                .append_header(("Location", "/swagger-ui/"))
                .finish()
        }),
    );
}
