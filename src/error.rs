use crate::models::ApiResponse;
use actix_web::{HttpResponse, ResponseError};
use thiserror::Error;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] sea_orm::DbErr),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Benefit already redeemed")]
    AlreadyRedeemed,

    #[error("Benefit not in date range")]
    NotInDateRange,

    #[error("No more stock for this benefit")]
    NoStockLeft,

    #[error("Division by zero: {0}")]
    DivisionByZero(String),

    #[error("Invalid pricing input: {0}")]
    InvalidPricingInput(String),

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("Internal server error: {0}")]
    InternalError(String),

    #[error("JSON serialization/deserialization error: {0}")]
    SerdeJsonError(#[from] serde_json::Error),
}

impl AppError {
    pub fn code(&self) -> &'static str {
        match self {
            AppError::ValidationError(_) => "VALIDATION_ERROR",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::AlreadyRedeemed => "ALREADY_REDEEMED",
            AppError::NotInDateRange => "NOT_IN_DATE_RANGE",
            AppError::NoStockLeft => "NO_STOCK_LEFT",
            AppError::DivisionByZero(_) => "DIVISION_BY_ZERO",
            AppError::InvalidPricingInput(_) => "INVALID_PRICING_INPUT",
            AppError::DatabaseError(_) => "DATABASE_ERROR",
            AppError::ConfigError(_) => "CONFIG_ERROR",
            _ => "INTERNAL_ERROR",
        }
    }

    /// Client-side rejections expected during normal operation. These are
    /// logged at warn level; everything else is a server fault.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            AppError::ValidationError(_)
                | AppError::NotFound(_)
                | AppError::AlreadyRedeemed
                | AppError::NotInDateRange
                | AppError::NoStockLeft
                | AppError::DivisionByZero(_)
                | AppError::InvalidPricingInput(_)
        )
    }
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        use actix_web::http::StatusCode;

        let (status_code, message) = match self {
            AppError::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::AlreadyRedeemed | AppError::NoStockLeft => {
                (StatusCode::CONFLICT, self.to_string())
            }
            AppError::NotInDateRange => (StatusCode::UNPROCESSABLE_ENTITY, self.to_string()),
            AppError::DivisionByZero(msg) | AppError::InvalidPricingInput(msg) => {
                (StatusCode::UNPROCESSABLE_ENTITY, msg.clone())
            }
            AppError::DatabaseError(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Database error".to_string())
            }
            _ => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
        };

        if self.is_rejection() {
            log::warn!("Rejected request ({}): {self}", self.code());
        } else {
            log::error!("Request failed ({}): {self}", self.code());
        }

        HttpResponse::build(status_code).json(ApiResponse::<()>::failure(self.code(), message))
    }
}
