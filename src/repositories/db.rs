use super::{
    AccumulationStore, BenefitStore, CustomerDirectory, LevelStore, PeriodStore, PricingStore,
    SettingsStore,
};
use crate::engine::RedemptionPlan;
use crate::entities::{
    BenefitType, accumulation_entity as accumulations, benefit_entity as benefits,
    benefit_generated_entity as benefits_generated, benefit_ticket_entity as benefit_tickets,
    customer_entity as customers, customer_level_entity as customer_levels,
    gas_station_entity as gas_stations, gas_station_margin_entity as margins,
    level_entity as levels, period_covered_entity as periods_covered,
    product_entity as products, setting_entity as settings,
};
use crate::error::{AppError, AppResult};
use crate::models::{
    BenefitTerms, LevelTerms, NewAccumulation, NewBenefitGenerated, NewCustomerLevel, PeriodGate,
    PointsInWindow, PricingRule, RegisterCustomerRequest, StationPrices, TicketDraft,
    TicketWithBenefit, UpdateGeneratedBenefitRequest,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, DatabaseBackend,
    DatabaseConnection, EntityTrait, FromQueryResult, IntoActiveModel, QueryFilter, QueryOrder,
    QuerySelect, Set, Statement, TransactionTrait, Value,
};
use std::collections::HashMap;

/// Serializes period gating across processes sharing the database.
const PERIOD_GATE_LOCK_KEY: i64 = 0x6c6f_7961_6c74_79;

const INSERT_CHUNK: usize = 1000;

#[derive(Clone)]
pub struct DbRepository {
    pool: DatabaseConnection,
}

impl DbRepository {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    async fn customer_id_by_phone(&self, phone: &str) -> AppResult<Option<i64>> {
        Ok(customers::Entity::find()
            .filter(customers::Column::PhoneNumber.eq(phone))
            .one(&self.pool)
            .await?
            .map(|c| c.id))
    }

    /// Un-redeemed tickets of the customer whose window covers `now`.
    async fn open_tickets(
        &self,
        customer_id: i64,
        now: DateTime<Utc>,
    ) -> AppResult<Vec<benefit_tickets::Model>> {
        Ok(benefit_tickets::Entity::find()
            .filter(benefit_tickets::Column::CustomerId.eq(customer_id))
            .filter(benefit_tickets::Column::Redeemed.eq(false))
            .filter(benefit_tickets::Column::StartDate.lte(now))
            .filter(benefit_tickets::Column::EndDate.gte(now))
            .order_by_asc(benefit_tickets::Column::Id)
            .all(&self.pool)
            .await?)
    }

    /// Pairs tickets with their snapshots, keeping only snapshots that are
    /// active, cover `now` and match `extra`.
    async fn attach_benefits<C: ConnectionTrait>(
        conn: &C,
        tickets: Vec<benefit_tickets::Model>,
        now: DateTime<Utc>,
        extra: Condition,
    ) -> AppResult<Vec<TicketWithBenefit>> {
        if tickets.is_empty() {
            return Ok(Vec::new());
        }
        let ids: Vec<i64> = tickets.iter().map(|t| t.benefit_generated_id).collect();
        let generated: HashMap<i64, benefits_generated::Model> =
            benefits_generated::Entity::find()
                .filter(benefits_generated::Column::Id.is_in(ids))
                .filter(benefits_generated::Column::IsActive.eq(true))
                .filter(benefits_generated::Column::StartDate.lte(now))
                .filter(benefits_generated::Column::EndDate.gte(now))
                .filter(extra)
                .all(conn)
                .await?
                .into_iter()
                .map(|g| (g.id, g))
                .collect();

        Ok(tickets
            .into_iter()
            .filter_map(|ticket| {
                generated
                    .get(&ticket.benefit_generated_id)
                    .cloned()
                    .map(|benefit| TicketWithBenefit { ticket, benefit })
            })
            .collect())
    }

    async fn load_ticket<C: ConnectionTrait>(
        conn: &C,
        ticket_id: i64,
    ) -> AppResult<TicketWithBenefit> {
        let ticket = benefit_tickets::Entity::find_by_id(ticket_id)
            .one(conn)
            .await?
            .ok_or_else(|| AppError::NotFound("Benefit ticket not found".to_string()))?;
        let benefit = benefits_generated::Entity::find_by_id(ticket.benefit_generated_id)
            .one(conn)
            .await?
            .ok_or_else(|| AppError::NotFound("Generated benefit not found".to_string()))?;
        Ok(TicketWithBenefit { ticket, benefit })
    }
}

fn term_columns(terms: BenefitTerms) -> benefits::ActiveModel {
    benefits::ActiveModel {
        level_id: Set(terms.level_id),
        name: Set(terms.name),
        benefit_type: Set(terms.benefit_type),
        external_product_id: Set(terms.external_product_id),
        frequency: Set(terms.frequency),
        discount: Set(terms.discount),
        num_times: Set(terms.num_times),
        stock: Set(terms.stock),
        dependency: Set(terms.dependency),
        min_amount: Set(terms.min_amount),
        is_active: Set(terms.is_active),
        ..Default::default()
    }
}

fn generated_active_model(g: NewBenefitGenerated) -> benefits_generated::ActiveModel {
    let t = g.terms;
    benefits_generated::ActiveModel {
        benefit_id: Set(g.benefit_id),
        source_revision: Set(g.source_revision),
        level_id: Set(t.level_id),
        name: Set(t.name),
        benefit_type: Set(t.benefit_type),
        external_product_id: Set(t.external_product_id),
        frequency: Set(t.frequency),
        discount: Set(t.discount),
        num_times: Set(t.num_times),
        stock: Set(t.stock),
        stock_used: Set(0),
        dependency: Set(t.dependency),
        min_amount: Set(t.min_amount),
        is_active: Set(t.is_active),
        start_date: Set(g.start_date),
        end_date: Set(g.end_date),
        ..Default::default()
    }
}

#[async_trait]
impl CustomerDirectory for DbRepository {
    async fn list_all_customers(&self) -> AppResult<Vec<customers::Model>> {
        Ok(customers::Entity::find()
            .order_by_asc(customers::Column::Id)
            .all(&self.pool)
            .await?)
    }

    async fn find_customer_by_id(&self, id: i64) -> AppResult<Option<customers::Model>> {
        Ok(customers::Entity::find_by_id(id).one(&self.pool).await?)
    }

    async fn find_customer_by_phone_or_external_id(
        &self,
        key: &str,
    ) -> AppResult<Option<customers::Model>> {
        Ok(customers::Entity::find()
            .filter(
                Condition::any()
                    .add(customers::Column::PhoneNumber.eq(key))
                    .add(customers::Column::ExternalId.eq(key)),
            )
            .one(&self.pool)
            .await?)
    }

    async fn upsert_customer(
        &self,
        customer: &RegisterCustomerRequest,
    ) -> AppResult<(customers::Model, bool)> {
        let existing = customers::Entity::find()
            .filter(customers::Column::ExternalId.eq(customer.external_id.as_str()))
            .one(&self.pool)
            .await?;

        match existing {
            Some(row) => {
                let mut am = row.into_active_model();
                am.name = Set(customer.name.clone());
                am.last_name = Set(customer.last_name.clone());
                am.status = Set(customer.status.clone());
                am.phone_number = Set(customer.phone_number.clone());
                am.email = Set(customer.email.clone());
                am.push_token = Set(customer.push_token.clone());
                am.updated_at = Set(Some(Utc::now()));
                Ok((am.update(&self.pool).await?, false))
            }
            None => {
                let created = customers::ActiveModel {
                    external_id: Set(customer.external_id.clone()),
                    name: Set(customer.name.clone()),
                    last_name: Set(customer.last_name.clone()),
                    status: Set(customer.status.clone()),
                    phone_number: Set(customer.phone_number.clone()),
                    email: Set(customer.email.clone()),
                    push_token: Set(customer.push_token.clone()),
                    ..Default::default()
                }
                .insert(&self.pool)
                .await?;
                Ok((created, true))
            }
        }
    }
}

#[async_trait]
impl AccumulationStore for DbRepository {
    async fn insert_accumulation(
        &self,
        a: NewAccumulation,
    ) -> AppResult<accumulations::Model> {
        Ok(accumulations::ActiveModel {
            customer_id: Set(a.customer_id),
            product_id: Set(a.product_id),
            gas_station_id: Set(a.gas_station_id),
            amount: Set(a.amount),
            generated_points: Set(a.generated_points),
            margin_type: Set(a.margin_type),
            margin_applied: Set(a.margin_applied),
            points_applied: Set(a.points_applied),
            gas_price_applied: Set(a.gas_price_applied),
            used_points: Set(0.0),
            is_active: Set(true),
            created_at: Set(a.created_at),
            ..Default::default()
        }
        .insert(&self.pool)
        .await?)
    }

    async fn sum_points_in_window(
        &self,
        customer_id: i64,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> AppResult<PointsInWindow> {
        #[derive(Debug, FromQueryResult)]
        struct PointsRow {
            total: Option<f64>,
            count: i64,
        }
        let row: Option<PointsRow> = accumulations::Entity::find()
            .filter(accumulations::Column::CustomerId.eq(customer_id))
            .filter(accumulations::Column::CreatedAt.gte(start))
            .filter(accumulations::Column::CreatedAt.lte(end))
            .select_only()
            .column_as(
                Expr::col(accumulations::Column::GeneratedPoints).sum(),
                "total",
            )
            .column_as(Expr::col(accumulations::Column::Id).count(), "count")
            .into_model::<PointsRow>()
            .one(&self.pool)
            .await?;

        Ok(row
            .map(|r| PointsInWindow {
                total: r.total.unwrap_or(0.0),
                count: u64::try_from(r.count).unwrap_or(0),
            })
            .unwrap_or_default())
    }
}

#[async_trait]
impl PricingStore for DbRepository {
    async fn find_pricing_rule(
        &self,
        product_codename: &str,
        station_external_id: Option<&str>,
    ) -> AppResult<Option<PricingRule>> {
        let Some(product) = products::Entity::find()
            .filter(products::Column::Codename.eq(product_codename))
            .one(&self.pool)
            .await?
        else {
            return Ok(None);
        };

        let station = match station_external_id {
            Some(external_id) => {
                match gas_stations::Entity::find()
                    .filter(gas_stations::Column::ExternalId.eq(external_id))
                    .one(&self.pool)
                    .await?
                {
                    Some(s) => Some(s),
                    None => return Ok(None),
                }
            }
            None => None,
        };

        let mut query = margins::Entity::find().filter(margins::Column::ProductId.eq(product.id));
        query = match &station {
            Some(s) => query.filter(margins::Column::GasStationId.eq(s.id)),
            None => query.filter(margins::Column::GasStationId.is_null()),
        };
        let Some(margin) = query.one(&self.pool).await? else {
            return Ok(None);
        };

        Ok(Some(PricingRule {
            product_id: product.id,
            product_codename: product.codename,
            gas_station_id: station.as_ref().map(|s| s.id),
            margin_type: margin.margin_type,
            margin_percent: margin.margin,
            points_per_unit: margin.points,
            station_prices: station.map(|s| StationPrices {
                regular: s.regular_price,
                premium: s.premium_price,
                diesel: s.diesel_price,
            }),
        }))
    }
}

#[async_trait]
impl LevelStore for DbRepository {
    async fn find_level(&self, id: i64) -> AppResult<Option<levels::Model>> {
        Ok(levels::Entity::find_by_id(id).one(&self.pool).await?)
    }

    async fn insert_level(&self, level: LevelTerms) -> AppResult<levels::Model> {
        Ok(levels::ActiveModel {
            name: Set(level.name),
            min_points: Set(level.min_points),
            is_active: Set(level.is_active),
            ..Default::default()
        }
        .insert(&self.pool)
        .await?)
    }

    async fn update_level(&self, id: i64, level: LevelTerms) -> AppResult<levels::Model> {
        let row = levels::Entity::find_by_id(id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Level not found".to_string()))?;
        let mut am = row.into_active_model();
        am.name = Set(level.name);
        am.min_points = Set(level.min_points);
        am.is_active = Set(level.is_active);
        am.updated_at = Set(Some(Utc::now()));
        Ok(am.update(&self.pool).await?)
    }

    async fn find_suitable_level(&self, points: f64) -> AppResult<Option<levels::Model>> {
        Ok(levels::Entity::find()
            .filter(levels::Column::IsActive.eq(true))
            .filter(levels::Column::MinPoints.lte(points))
            .order_by_desc(levels::Column::MinPoints)
            .one(&self.pool)
            .await?)
    }

    async fn active_customer_level(
        &self,
        customer_id: i64,
        now: DateTime<Utc>,
    ) -> AppResult<Option<customer_levels::Model>> {
        Ok(customer_levels::Entity::find()
            .filter(customer_levels::Column::CustomerId.eq(customer_id))
            .filter(customer_levels::Column::IsActive.eq(true))
            .filter(customer_levels::Column::StartDate.lte(now))
            .filter(customer_levels::Column::EndDate.gte(now))
            .one(&self.pool)
            .await?)
    }

    async fn customer_level_by_phone(
        &self,
        phone: &str,
        now: DateTime<Utc>,
    ) -> AppResult<Option<(customer_levels::Model, levels::Model)>> {
        let Some(customer_id) = self.customer_id_by_phone(phone).await? else {
            return Ok(None);
        };
        let Some(row) = self.active_customer_level(customer_id, now).await? else {
            return Ok(None);
        };
        let level = levels::Entity::find_by_id(row.level_id)
            .one(&self.pool)
            .await?;
        Ok(level.map(|l| (row, l)))
    }

    async fn insert_customer_level(
        &self,
        level: NewCustomerLevel,
    ) -> AppResult<customer_levels::Model> {
        Ok(customer_levels::ActiveModel {
            customer_id: Set(level.customer_id),
            level_id: Set(level.level_id),
            start_date: Set(level.start_date),
            end_date: Set(level.end_date),
            is_active: Set(true),
            ..Default::default()
        }
        .insert(&self.pool)
        .await?)
    }
}

#[async_trait]
impl BenefitStore for DbRepository {
    async fn find_benefit(&self, id: i64) -> AppResult<Option<benefits::Model>> {
        Ok(benefits::Entity::find_by_id(id).one(&self.pool).await?)
    }

    async fn insert_benefit(&self, terms: BenefitTerms) -> AppResult<benefits::Model> {
        let mut am = term_columns(terms);
        am.revision = Set(1);
        Ok(am.insert(&self.pool).await?)
    }

    async fn update_benefit(&self, id: i64, terms: BenefitTerms) -> AppResult<benefits::Model> {
        let current = benefits::Entity::find_by_id(id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Benefit not found".to_string()))?;
        let mut am = term_columns(terms);
        am.id = Set(current.id);
        am.revision = Set(current.revision + 1);
        am.updated_at = Set(Some(Utc::now()));
        Ok(am.update(&self.pool).await?)
    }

    async fn list_active_benefits(&self) -> AppResult<Vec<benefits::Model>> {
        Ok(benefits::Entity::find()
            .filter(benefits::Column::IsActive.eq(true))
            .order_by_asc(benefits::Column::Id)
            .all(&self.pool)
            .await?)
    }

    async fn generated_covering(
        &self,
        benefit_ids: &[i64],
        now: DateTime<Utc>,
    ) -> AppResult<Vec<benefits_generated::Model>> {
        if benefit_ids.is_empty() {
            return Ok(Vec::new());
        }
        Ok(benefits_generated::Entity::find()
            .filter(benefits_generated::Column::BenefitId.is_in(benefit_ids.to_vec()))
            .filter(benefits_generated::Column::StartDate.lte(now))
            .filter(benefits_generated::Column::EndDate.gte(now))
            .all(&self.pool)
            .await?)
    }

    async fn generated_for_level(
        &self,
        level_id: i64,
        now: DateTime<Utc>,
    ) -> AppResult<Vec<benefits_generated::Model>> {
        Ok(benefits_generated::Entity::find()
            .filter(benefits_generated::Column::LevelId.eq(level_id))
            .filter(benefits_generated::Column::IsActive.eq(true))
            .filter(benefits_generated::Column::StartDate.lte(now))
            .filter(benefits_generated::Column::EndDate.gte(now))
            .order_by_asc(benefits_generated::Column::Id)
            .all(&self.pool)
            .await?)
    }

    async fn insert_generated_many(&self, generated: Vec<NewBenefitGenerated>) -> AppResult<usize> {
        let total = generated.len();
        if total == 0 {
            return Ok(0);
        }
        let txn = self.pool.begin().await?;
        let models: Vec<_> = generated.into_iter().map(generated_active_model).collect();
        for chunk in models.chunks(INSERT_CHUNK) {
            benefits_generated::Entity::insert_many(chunk.to_vec())
                .exec(&txn)
                .await?;
        }
        txn.commit().await?;
        Ok(total)
    }

    async fn update_generated_benefit(
        &self,
        id: i64,
        update: UpdateGeneratedBenefitRequest,
    ) -> AppResult<benefits_generated::Model> {
        let row = benefits_generated::Entity::find_by_id(id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Generated benefit not found".to_string()))?;
        let mut am = row.into_active_model();
        if let Some(stock) = update.stock {
            am.stock = Set(stock);
        }
        if let Some(is_active) = update.is_active {
            am.is_active = Set(is_active);
        }
        am.updated_at = Set(Some(Utc::now()));
        Ok(am.update(&self.pool).await?)
    }

    async fn insert_tickets(&self, drafts: Vec<TicketDraft>) -> AppResult<usize> {
        let total = drafts.len();
        if total == 0 {
            return Ok(0);
        }
        let models: Vec<benefit_tickets::ActiveModel> = drafts
            .into_iter()
            .map(|d| benefit_tickets::ActiveModel {
                customer_id: Set(d.customer_id),
                benefit_generated_id: Set(d.benefit_generated_id),
                start_date: Set(d.start_date),
                end_date: Set(d.end_date),
                redeemed: Set(false),
                ..Default::default()
            })
            .collect();
        let txn = self.pool.begin().await?;
        for chunk in models.chunks(INSERT_CHUNK) {
            benefit_tickets::Entity::insert_many(chunk.to_vec())
                .exec(&txn)
                .await?;
        }
        txn.commit().await?;
        Ok(total)
    }

    async fn find_redeemable_ticket(
        &self,
        ticket_id: i64,
        customer_id: i64,
    ) -> AppResult<Option<TicketWithBenefit>> {
        let Some(ticket) = benefit_tickets::Entity::find_by_id(ticket_id)
            .filter(benefit_tickets::Column::CustomerId.eq(customer_id))
            .one(&self.pool)
            .await?
        else {
            return Ok(None);
        };
        let benefit = benefits_generated::Entity::find_by_id(ticket.benefit_generated_id)
            .filter(benefits_generated::Column::IsActive.eq(true))
            .filter(benefits_generated::Column::BenefitType.ne(BenefitType::Gas))
            .filter(benefits_generated::Column::BenefitType.ne(BenefitType::Peripheral))
            .one(&self.pool)
            .await?;
        Ok(benefit.map(|benefit| TicketWithBenefit { ticket, benefit }))
    }

    async fn commit_redemption(&self, plan: RedemptionPlan) -> AppResult<TicketWithBenefit> {
        let txn = self.pool.begin().await?;

        let stock = benefits_generated::Entity::update_many()
            .col_expr(
                benefits_generated::Column::StockUsed,
                Expr::col(benefits_generated::Column::StockUsed).add(1),
            )
            .col_expr(benefits_generated::Column::UpdatedAt, Expr::cust("NOW()"))
            .filter(benefits_generated::Column::Id.eq(plan.benefit_generated_id))
            .filter(
                Condition::any()
                    .add(benefits_generated::Column::Stock.lte(-1))
                    .add(
                        Expr::col(benefits_generated::Column::StockUsed)
                            .lt(Expr::col(benefits_generated::Column::Stock)),
                    ),
            )
            .exec(&txn)
            .await?;
        if stock.rows_affected == 0 {
            txn.rollback().await?;
            return Err(AppError::NoStockLeft);
        }

        if plan.mark_redeemed {
            let flipped = benefit_tickets::Entity::update_many()
                .col_expr(benefit_tickets::Column::Redeemed, Expr::value(true))
                .col_expr(benefit_tickets::Column::UpdatedAt, Expr::cust("NOW()"))
                .filter(benefit_tickets::Column::Id.eq(plan.ticket_id))
                .filter(benefit_tickets::Column::Redeemed.eq(false))
                .exec(&txn)
                .await?;
            if flipped.rows_affected == 0 {
                txn.rollback().await?;
                return Err(AppError::AlreadyRedeemed);
            }
        }

        let redeemed = Self::load_ticket(&txn, plan.ticket_id).await?;
        txn.commit().await?;
        Ok(redeemed)
    }

    async fn dependent_tickets_by_phone(
        &self,
        phone: &str,
        charged_amount: f64,
        now: DateTime<Utc>,
    ) -> AppResult<Vec<TicketWithBenefit>> {
        let Some(customer_id) = self.customer_id_by_phone(phone).await? else {
            return Ok(Vec::new());
        };
        let tickets = self.open_tickets(customer_id, now).await?;
        Self::attach_benefits(
            &self.pool,
            tickets,
            now,
            Condition::all()
                .add(benefits_generated::Column::Dependency.eq(true))
                .add(benefits_generated::Column::MinAmount.lte(charged_amount)),
        )
        .await
    }

    async fn active_tickets_by_phone(
        &self,
        phone: &str,
        benefit_type: BenefitType,
        now: DateTime<Utc>,
    ) -> AppResult<Vec<TicketWithBenefit>> {
        let Some(customer_id) = self.customer_id_by_phone(phone).await? else {
            return Ok(Vec::new());
        };
        let tickets = self.open_tickets(customer_id, now).await?;
        Self::attach_benefits(
            &self.pool,
            tickets,
            now,
            Condition::all()
                .add(benefits_generated::Column::BenefitType.eq(benefit_type))
                .add(benefits_generated::Column::Dependency.eq(false)),
        )
        .await
    }

    async fn gas_ticket_by_phone(
        &self,
        phone: &str,
        now: DateTime<Utc>,
    ) -> AppResult<Option<TicketWithBenefit>> {
        let Some(customer_id) = self.customer_id_by_phone(phone).await? else {
            return Ok(None);
        };
        let tickets = self.open_tickets(customer_id, now).await?;
        let found = Self::attach_benefits(
            &self.pool,
            tickets,
            now,
            Condition::all().add(benefits_generated::Column::BenefitType.eq(BenefitType::Gas)),
        )
        .await?;
        Ok(found.into_iter().next())
    }
}

#[async_trait]
impl PeriodStore for DbRepository {
    async fn find_active_period(
        &self,
        now: DateTime<Utc>,
    ) -> AppResult<Option<periods_covered::Model>> {
        Ok(periods_covered::Entity::find()
            .filter(periods_covered::Column::IsActive.eq(true))
            .filter(periods_covered::Column::StartDate.lte(now))
            .filter(periods_covered::Column::EndDate.gte(now))
            .order_by_desc(periods_covered::Column::StartDate)
            .one(&self.pool)
            .await?)
    }

    async fn open_period(
        &self,
        now: DateTime<Utc>,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> AppResult<PeriodGate> {
        let txn = self.pool.begin().await?;
        // released on commit/rollback
        txn.execute(Statement::from_sql_and_values(
            DatabaseBackend::Postgres,
            "SELECT pg_advisory_xact_lock($1)",
            [Value::from(PERIOD_GATE_LOCK_KEY)],
        ))
        .await?;

        let covering = periods_covered::Entity::find()
            .filter(periods_covered::Column::IsActive.eq(true))
            .filter(periods_covered::Column::StartDate.lte(now))
            .filter(periods_covered::Column::EndDate.gte(now))
            .one(&txn)
            .await?;
        if let Some(period) = covering {
            txn.commit().await?;
            return Ok(PeriodGate::AlreadyCovered(period));
        }

        let period = periods_covered::ActiveModel {
            start_date: Set(start),
            end_date: Set(end),
            is_active: Set(true),
            ..Default::default()
        }
        .insert(&txn)
        .await?;
        txn.commit().await?;
        Ok(PeriodGate::Opened(period))
    }
}

#[async_trait]
impl SettingsStore for DbRepository {
    async fn get_setting(&self, key: &str) -> AppResult<Option<String>> {
        Ok(settings::Entity::find()
            .filter(settings::Column::Key.eq(key))
            .one(&self.pool)
            .await?
            .map(|s| s.value))
    }
}
