use crate::entities::MarginType;

/// Per-liter prices of the station where the purchase happened.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StationPrices {
    pub regular: f64,
    pub premium: f64,
    pub diesel: f64,
}

impl StationPrices {
    /// `gas_premium` and `gas_diesel` have their own price, anything else pays regular.
    pub fn price_for(&self, product_codename: &str) -> f64 {
        match product_codename {
            "gas_premium" => self.premium,
            "gas_diesel" => self.diesel,
            _ => self.regular,
        }
    }
}

/// Pricing inputs resolved for one purchase: the margin rule plus the product
/// and station data it depends on.
#[derive(Debug, Clone, PartialEq)]
pub struct PricingRule {
    pub product_id: i64,
    pub product_codename: String,
    pub gas_station_id: Option<i64>,
    pub margin_type: MarginType,
    pub margin_percent: f64,
    pub points_per_unit: f64,
    pub station_prices: Option<StationPrices>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointsOutcome {
    pub points: f64,
    /// 0 for by-margin rules
    pub gas_price: f64,
}
