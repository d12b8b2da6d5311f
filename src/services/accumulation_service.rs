use super::BenefitService;
use crate::engine::calculate_points;
use crate::entities::customer_entity as customers;
use crate::error::{AppError, AppResult};
use crate::models::{AccumulateRequest, AccumulationWithBenefits, NewAccumulation};
use crate::repositories::SharedRepository;
use crate::utils::normalize_phone;
use chrono::{DateTime, Utc};

#[derive(Clone)]
pub struct AccumulationService {
    repo: SharedRepository,
    benefits: BenefitService,
}

impl AccumulationService {
    pub fn new(repo: SharedRepository, benefits: BenefitService) -> Self {
        Self { repo, benefits }
    }

    /// Records a purchase and returns the dependent benefits its amount unlocks.
    pub async fn accumulate(
        &self,
        req: AccumulateRequest,
        now: DateTime<Utc>,
    ) -> AppResult<AccumulationWithBenefits> {
        let station = req
            .external_gas_station_id
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty());

        let rule = self
            .repo
            .find_pricing_rule(&req.product_codename, station)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "No margin rule for product {} at station {}",
                    req.product_codename,
                    station.unwrap_or("-")
                ))
            })?;

        let customer = self
            .find_customer(&req.customer_phone)
            .await?
            .ok_or_else(|| AppError::NotFound("Customer not found".to_string()))?;

        let outcome = calculate_points(&rule, req.amount)?;
        let accumulation = self
            .repo
            .insert_accumulation(NewAccumulation::from_rule(
                &rule,
                outcome,
                customer.id,
                req.amount,
                now,
            ))
            .await?;
        log::info!(
            "Customer {} earned {} points on {} ({})",
            customer.id,
            accumulation.generated_points,
            rule.product_codename,
            req.amount
        );

        let benefits = self
            .benefits
            .get_active_dependent_benefits(&customer.phone_number, req.amount, now)
            .await?;
        Ok(AccumulationWithBenefits {
            accumulation: accumulation.into(),
            benefits: benefits.into_iter().map(Into::into).collect(),
        })
    }

    /// The key is tried verbatim first so external ids survive; phone
    /// formatting is only stripped when that misses.
    async fn find_customer(&self, key: &str) -> AppResult<Option<customers::Model>> {
        let key = key.trim();
        if let Some(customer) = self.repo.find_customer_by_phone_or_external_id(key).await? {
            return Ok(Some(customer));
        }
        let phone = normalize_phone(key);
        if phone == key {
            return Ok(None);
        }
        self.repo.find_customer_by_phone_or_external_id(&phone).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{BenefitFrequency, BenefitType, MarginType};
    use crate::models::StationPrices;
    use crate::services::test_support::{Harness, at, terms};

    fn request(codename: &str, station: Option<&str>, amount: f64) -> AccumulateRequest {
        AccumulateRequest {
            product_codename: codename.to_string(),
            external_gas_station_id: station.map(str::to_string),
            amount,
            customer_phone: "+52 55 1111 1111".to_string(),
        }
    }

    #[tokio::test]
    async fn test_by_volume_accumulation_copies_rule() {
        let h = Harness::new();
        let product = h.repo.add_product("gas_premium").await;
        let station = h
            .repo
            .add_station(
                "E-100",
                StationPrices {
                    regular: 22.5,
                    premium: 24.0,
                    diesel: 25.0,
                },
            )
            .await;
        h.repo
            .add_margin(product.id, Some(station.id), MarginType::ByVolume, 0.0, 1.5)
            .await;
        let customer = h.customer("C-1", "5511111111").await;
        let now = at(2025, 3, 1);

        let out = h
            .accumulations
            .accumulate(request("gas_premium", Some("E-100"), 600.0), now)
            .await
            .unwrap();
        // 600 / 24 = 25 liters
        assert_eq!(out.accumulation.generated_points, 37.5);
        assert_eq!(out.accumulation.gas_price_applied, 24.0);
        assert_eq!(out.accumulation.gas_station_id, Some(station.id));
        assert_eq!(out.accumulation.customer_id, customer.id);
        assert_eq!(out.accumulation.created_at, now);
        assert!(out.benefits.is_empty());
    }

    #[tokio::test]
    async fn test_empty_station_uses_global_rule() {
        let h = Harness::new();
        let product = h.repo.add_product("car_wash").await;
        h.repo
            .add_margin(product.id, None, MarginType::ByMargin, 10.0, 2.0)
            .await;
        h.customer("C-1", "5511111111").await;

        let out = h
            .accumulations
            .accumulate(request("car_wash", Some("  "), 150.0), at(2025, 3, 1))
            .await
            .unwrap();
        assert_eq!(out.accumulation.generated_points, 30.0);
        assert_eq!(out.accumulation.gas_station_id, None);
        assert_eq!(h.repo.accumulations().await.len(), 1);
    }

    #[tokio::test]
    async fn test_missing_rule_or_customer() {
        let h = Harness::new();
        let product = h.repo.add_product("car_wash").await;
        h.repo
            .add_margin(product.id, None, MarginType::ByMargin, 10.0, 2.0)
            .await;
        let now = at(2025, 3, 1);

        let err = h
            .accumulations
            .accumulate(request("car_wash", Some("E-404"), 100.0), now)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));

        let err = h
            .accumulations
            .accumulate(request("car_wash", None, 100.0), now)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
        assert!(h.repo.accumulations().await.is_empty());
    }

    #[tokio::test]
    async fn test_zero_price_is_rejected_without_writing() {
        let h = Harness::new();
        let product = h.repo.add_product("gas_regular").await;
        let station = h
            .repo
            .add_station(
                "E-1",
                StationPrices {
                    regular: 0.0,
                    premium: 24.0,
                    diesel: 25.0,
                },
            )
            .await;
        h.repo
            .add_margin(product.id, Some(station.id), MarginType::ByVolume, 0.0, 1.0)
            .await;
        h.customer("C-1", "5511111111").await;

        let err = h
            .accumulations
            .accumulate(request("gas_regular", Some("E-1"), 100.0), at(2025, 3, 1))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::DivisionByZero(_)));
        assert!(h.repo.accumulations().await.is_empty());
    }

    #[tokio::test]
    async fn test_returns_unlocked_dependent_benefits() {
        let h = Harness::new();
        let level = h.level("Classic", 0.0).await;
        let mut dependent = terms(level.id, BenefitType::Physical, BenefitFrequency::Always);
        dependent.dependency = true;
        dependent.min_amount = 300.0;
        h.benefits.create_benefit(dependent).await.unwrap();
        let product = h.repo.add_product("car_wash").await;
        h.repo
            .add_margin(product.id, None, MarginType::ByMargin, 10.0, 1.0)
            .await;
        h.customer("C-1", "5511111111").await;
        let now = at(2025, 3, 1);
        h.generation.run_generation_cycle(now).await.unwrap();

        let small = h
            .accumulations
            .accumulate(request("car_wash", None, 100.0), now)
            .await
            .unwrap();
        assert!(small.benefits.is_empty());

        let big = h
            .accumulations
            .accumulate(request("car_wash", None, 300.0), now)
            .await
            .unwrap();
        assert_eq!(big.benefits.len(), 1);
        assert!(big.benefits[0].benefit.dependency);
    }

    #[tokio::test]
    async fn test_customer_found_by_external_id() {
        let h = Harness::new();
        let product = h.repo.add_product("car_wash").await;
        h.repo
            .add_margin(product.id, None, MarginType::ByMargin, 10.0, 2.0)
            .await;
        // "C-1" would normalize to the phone "1"
        h.customer("1", "5522222222").await;
        let customer = h.customer("C-1", "5511111111").await;

        let mut req = request("car_wash", None, 150.0);
        req.customer_phone = " C-1 ".to_string();
        let out = h.accumulations.accumulate(req, at(2025, 3, 1)).await.unwrap();
        assert_eq!(out.accumulation.customer_id, customer.id);

        let mut req = request("car_wash", None, 150.0);
        req.customer_phone = "C-404".to_string();
        let err = h.accumulations.accumulate(req, at(2025, 3, 1)).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
