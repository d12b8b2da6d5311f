use crate::entities::MarginType;
use crate::error::{AppError, AppResult};
use crate::models::{PointsOutcome, PricingRule};

/// Rounds to 2 decimals, halves to even.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

/// Points earned by a purchase of `amount` under `rule`.
///
/// - ByMargin: `amount * margin% * points`
/// - ByVolume: liters at the station price for the product, times points per liter
///
/// A missing, zero or negative station price rejects the purchase instead of
/// producing infinite points.
pub fn calculate_points(rule: &PricingRule, amount: f64) -> AppResult<PointsOutcome> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(AppError::InvalidPricingInput(format!(
            "amount must be positive, got {amount}"
        )));
    }

    match rule.margin_type {
        MarginType::ByMargin => Ok(PointsOutcome {
            points: round2(amount * (rule.margin_percent / 100.0) * rule.points_per_unit),
            gas_price: 0.0,
        }),
        MarginType::ByVolume => {
            let prices = rule.station_prices.ok_or_else(|| {
                AppError::InvalidPricingInput(
                    "by-volume pricing requires a gas station".to_string(),
                )
            })?;
            let gas_price = prices.price_for(&rule.product_codename);
            if gas_price == 0.0 {
                return Err(AppError::DivisionByZero(format!(
                    "gas price for {} is zero",
                    rule.product_codename
                )));
            }
            if !gas_price.is_finite() || gas_price < 0.0 {
                return Err(AppError::InvalidPricingInput(format!(
                    "invalid gas price {gas_price} for {}",
                    rule.product_codename
                )));
            }
            let liters = round2(amount / gas_price);
            Ok(PointsOutcome {
                points: round2(liters * rule.points_per_unit),
                gas_price,
            })
        }
    }
}
