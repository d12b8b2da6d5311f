use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// JSON envelope shared by every endpoint.
///
/// Successful calls carry `data` and sometimes a `message`; failed calls
/// carry only `error`, whose `code` is the stable `AppError::code` string.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiError>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiError {
    /// e.g. `NO_STOCK_LEFT`
    pub code: String,
    pub message: String,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
            error: None,
        }
    }

    /// Used by the admin endpoints to say which job finished.
    pub fn ok_with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            ..Self::ok(data)
        }
    }
}

impl ApiResponse<()> {
    pub fn failure(code: &str, message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            message: None,
            error: Some(ApiError {
                code: code.to_string(),
                message: message.into(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_failure_envelope_omits_data() {
        let body = serde_json::to_value(ApiResponse::<()>::failure("NO_STOCK_LEFT", "sold out")).unwrap();
        assert_eq!(
            body,
            json!({
                "success": false,
                "error": { "code": "NO_STOCK_LEFT", "message": "sold out" }
            })
        );
    }

    #[test]
    fn test_success_envelope_with_message() {
        let body = serde_json::to_value(ApiResponse::ok_with_message(3, "Generation cycle finished"))
            .unwrap();
        assert_eq!(
            body,
            json!({ "success": true, "data": 3, "message": "Generation cycle finished" })
        );
        let plain = serde_json::to_value(ApiResponse::ok("x")).unwrap();
        assert_eq!(plain, json!({ "success": true, "data": "x" }));
    }
}
