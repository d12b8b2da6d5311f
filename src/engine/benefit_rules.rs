use crate::entities::BenefitFrequency;
use crate::error::{AppError, AppResult};
use crate::models::BenefitTerms;

pub const MAX_NAME_LEN: usize = 100;

fn validate_name(name: &str, what: &str) -> AppResult<()> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(AppError::ValidationError(format!("{what} name is required")));
    }
    if trimmed.chars().count() > MAX_NAME_LEN {
        return Err(AppError::ValidationError(format!(
            "{what} name must be at most {MAX_NAME_LEN} characters"
        )));
    }
    Ok(())
}

/// Validates benefit terms and applies the type-dependent coercions:
/// gas and peripheral benefits are always-on with no stock, count, product,
/// dependency or minimum; any other frequency than `NTimes` drops `num_times`.
pub fn normalize_benefit(mut terms: BenefitTerms) -> AppResult<BenefitTerms> {
    validate_name(&terms.name, "benefit")?;
    terms.name = terms.name.trim().to_string();

    if !terms.discount.is_finite() || terms.discount < 0.0 {
        return Err(AppError::ValidationError(
            "discount must be zero or positive".to_string(),
        ));
    }
    if terms.num_times < 0 {
        return Err(AppError::ValidationError(
            "num_times must be zero or positive".to_string(),
        ));
    }
    if terms.stock < -1 {
        return Err(AppError::ValidationError(
            "stock must be -1 (unlimited) or zero or positive".to_string(),
        ));
    }
    if !terms.min_amount.is_finite() || terms.min_amount < 0.0 {
        return Err(AppError::ValidationError(
            "min_amount must be zero or positive".to_string(),
        ));
    }

    if terms.benefit_type.is_always_on() {
        terms.frequency = BenefitFrequency::Always;
        terms.num_times = 0;
        terms.stock = 0;
        terms.external_product_id.clear();
        terms.dependency = false;
        terms.min_amount = 0.0;
    } else if terms.frequency != BenefitFrequency::NTimes {
        terms.num_times = 0;
    }

    Ok(terms)
}

pub fn validate_level(name: &str, min_points: f64) -> AppResult<()> {
    validate_name(name, "level")?;
    if !min_points.is_finite() || min_points < 0.0 {
        return Err(AppError::ValidationError(
            "min_points must be zero or positive".to_string(),
        ));
    }
    Ok(())
}
