use super::LevelService;
use crate::entities::customer_entity as customers;
use crate::error::{AppError, AppResult};
use crate::models::{LevelAssignment, RegisterCustomerRequest};
use crate::repositories::SharedRepository;
use crate::utils::{normalize_phone, validate_phone};
use chrono::{DateTime, Utc};

#[derive(Clone)]
pub struct CustomerService {
    repo: SharedRepository,
    levels: LevelService,
}

impl CustomerService {
    pub fn new(repo: SharedRepository, levels: LevelService) -> Self {
        Self { repo, levels }
    }

    /// Creates or refreshes a customer keyed by external id. A newly created
    /// customer is leveled right away with zero points; leveling failures are
    /// logged and never fail the registration.
    pub async fn register_customer(
        &self,
        mut req: RegisterCustomerRequest,
        now: DateTime<Utc>,
    ) -> AppResult<(customers::Model, bool)> {
        req.external_id = req.external_id.trim().to_string();
        if req.external_id.is_empty() {
            return Err(AppError::ValidationError("external_id is required".to_string()));
        }
        if req.name.trim().is_empty() {
            return Err(AppError::ValidationError("name is required".to_string()));
        }
        req.email = req.email.trim().to_lowercase();
        if !req.email.contains('@') {
            return Err(AppError::ValidationError("Invalid email address".to_string()));
        }
        req.phone_number = normalize_phone(&req.phone_number);
        validate_phone(&req.phone_number)?;

        let (customer, created) = self.repo.upsert_customer(&req).await?;
        if !created {
            log::debug!("Customer {} refreshed", customer.id);
            return Ok((customer, created));
        }

        log::info!("Registered customer {} ({})", customer.id, customer.external_id);
        match self.levels.generate_customer_level(customer.id, now, true).await {
            Ok(LevelAssignment::Assigned { tickets, .. }) => {
                log::info!("New customer {} leveled with {tickets} tickets", customer.id);
            }
            Ok(other) => log::info!("New customer {} not leveled: {other:?}", customer.id),
            Err(e) => log::warn!("Failed to level new customer {}: {e}", customer.id),
        }
        Ok((customer, created))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::BenefitFrequency;
    use crate::services::test_support::{Harness, at, customer_request};

    #[tokio::test]
    async fn test_registration_normalizes_and_upserts() {
        let h = Harness::new();
        let now = at(2025, 3, 1);
        let mut req = customer_request("C-1", "+52 1 55 1111 1111");
        req.email = " Ana@Example.com ".to_string();

        let (first, created) = h.customers.register_customer(req.clone(), now).await.unwrap();
        assert!(created);
        assert_eq!(first.phone_number, "5511111111");
        assert_eq!(first.email, "ana@example.com");

        req.name = "Ana María".to_string();
        let (second, created) = h.customers.register_customer(req, now).await.unwrap();
        assert!(!created);
        assert_eq!(second.id, first.id);
        assert_eq!(second.name, "Ana María");
    }

    #[tokio::test]
    async fn test_registration_rejects_bad_input() {
        let h = Harness::new();
        let now = at(2025, 3, 1);

        let err = h
            .customers
            .register_customer(customer_request("C-1", "12345"), now)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));

        let err = h
            .customers
            .register_customer(customer_request("  ", "5511111111"), now)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
    }

    #[tokio::test]
    async fn test_new_customer_gets_level_and_tickets() {
        let h = Harness::new();
        let level = h.level("Classic", 0.0).await;
        h.benefit(level.id, BenefitFrequency::Daily, -1).await;
        let now = at(2025, 3, 1);
        h.generation.run_generation_cycle(now).await.unwrap();

        let later = now + chrono::Duration::days(2);
        let (customer, created) = h
            .customers
            .register_customer(customer_request("C-9", "5599999999"), later)
            .await
            .unwrap();
        assert!(created);
        let levels = h.repo.customer_levels().await;
        assert_eq!(levels.len(), 1);
        assert_eq!(levels[0].customer_id, customer.id);
        assert_eq!(h.repo.tickets().await.len(), 30);
    }

    #[tokio::test]
    async fn test_leveling_failure_does_not_fail_registration() {
        let h = Harness::new();
        let level = h.level("Classic", 0.0).await;
        h.benefit(level.id, BenefitFrequency::Daily, -1).await;
        let now = at(2025, 3, 1);
        h.generation.run_generation_cycle(now).await.unwrap();
        h.repo.fail_ticket_writes().await;

        let (customer, created) = h
            .customers
            .register_customer(customer_request("C-9", "5599999999"), now)
            .await
            .unwrap();
        assert!(created);
        assert_eq!(customer.external_id, "C-9");
        assert!(h.repo.tickets().await.is_empty());
    }
}
