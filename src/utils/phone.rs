use crate::error::{AppError, AppResult};
use regex::Regex;

/// Checks a normalized phone: exactly 10 digits.
pub fn validate_phone(phone: &str) -> AppResult<()> {
    let phone_regex =
        Regex::new(r"^\d{10}$").map_err(|e| AppError::InternalError(e.to_string()))?;

    if !phone_regex.is_match(phone) {
        return Err(AppError::ValidationError(
            "Invalid phone number, expected 10 digits".to_string(),
        ));
    }

    Ok(())
}

/// Strips formatting and the +52 / +521 country prefixes.
pub fn normalize_phone(phone: &str) -> String {
    let digits: String = phone.chars().filter(|c| c.is_ascii_digit()).collect();

    if digits.len() == 13 && digits.starts_with("521") {
        digits[3..].to_string()
    } else if digits.len() == 12 && digits.starts_with("52") {
        digits[2..].to_string()
    } else if digits.is_empty() {
        phone.trim().to_string()
    } else {
        digits
    }
}
