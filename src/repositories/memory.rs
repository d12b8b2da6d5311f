use super::{
    AccumulationStore, BenefitStore, CustomerDirectory, LevelStore, PeriodStore, PricingStore,
    SettingsStore,
};
use crate::engine::{RedemptionPlan, select_suitable_level};
use crate::entities::{
    BenefitType, MarginType, accumulation_entity as accumulations, benefit_entity as benefits,
    benefit_generated_entity as benefits_generated, benefit_ticket_entity as benefit_tickets,
    customer_entity as customers, customer_level_entity as customer_levels,
    gas_station_entity as gas_stations, gas_station_margin_entity as margins,
    level_entity as levels, period_covered_entity as periods_covered,
    product_entity as products,
};
use crate::error::{AppError, AppResult};
use crate::models::{
    BenefitTerms, LevelTerms, NewAccumulation, NewBenefitGenerated, NewCustomerLevel, PeriodGate,
    PointsInWindow, PricingRule, RegisterCustomerRequest, StationPrices, TicketDraft,
    TicketWithBenefit, UpdateGeneratedBenefitRequest,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::{HashMap, HashSet};
use tokio::sync::Mutex;

#[derive(Default)]
struct State {
    next_id: i64,
    customers: Vec<customers::Model>,
    products: Vec<products::Model>,
    stations: Vec<gas_stations::Model>,
    margins: Vec<margins::Model>,
    accumulations: Vec<accumulations::Model>,
    levels: Vec<levels::Model>,
    customer_levels: Vec<customer_levels::Model>,
    benefits: Vec<benefits::Model>,
    generated: Vec<benefits_generated::Model>,
    tickets: Vec<benefit_tickets::Model>,
    periods: Vec<periods_covered::Model>,
    settings: HashMap<String, String>,
    failing_ticket_customers: HashSet<i64>,
    failing_ticket_writes: bool,
    failing_period_writes: bool,
}

impl State {
    fn id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn customer_id_by_phone(&self, phone: &str) -> Option<i64> {
        self.customers
            .iter()
            .find(|c| c.phone_number == phone)
            .map(|c| c.id)
    }

    fn open_tickets_with<F>(&self, customer_id: i64, now: DateTime<Utc>, keep: F) -> Vec<TicketWithBenefit>
    where
        F: Fn(&benefits_generated::Model) -> bool,
    {
        self.tickets
            .iter()
            .filter(|t| t.customer_id == customer_id && !t.redeemed && t.covers(now))
            .filter_map(|t| {
                self.generated
                    .iter()
                    .find(|g| g.id == t.benefit_generated_id)
                    .filter(|g| g.is_active && g.covers(now) && keep(g))
                    .map(|g| TicketWithBenefit {
                        ticket: t.clone(),
                        benefit: g.clone(),
                    })
            })
            .collect()
    }
}

/// In-process store with the same contracts as `DbRepository`.
#[derive(Default)]
pub struct MemoryRepository {
    state: Mutex<State>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn add_product(&self, codename: &str) -> products::Model {
        let mut s = self.state.lock().await;
        let product = products::Model {
            id: s.id(),
            name: codename.to_string(),
            codename: codename.to_string(),
            is_active: true,
        };
        s.products.push(product.clone());
        product
    }

    pub async fn add_station(&self, external_id: &str, prices: StationPrices) -> gas_stations::Model {
        let mut s = self.state.lock().await;
        let station = gas_stations::Model {
            id: s.id(),
            name: external_id.to_string(),
            external_id: external_id.to_string(),
            city: String::new(),
            regular_price: prices.regular,
            premium_price: prices.premium,
            diesel_price: prices.diesel,
            created_at: None,
            updated_at: None,
        };
        s.stations.push(station.clone());
        station
    }

    pub async fn add_margin(
        &self,
        product_id: i64,
        gas_station_id: Option<i64>,
        margin_type: MarginType,
        margin: f64,
        points: f64,
    ) -> margins::Model {
        let mut s = self.state.lock().await;
        let row = margins::Model {
            id: s.id(),
            gas_station_id,
            product_id,
            margin_type,
            margin,
            points,
        };
        s.margins.push(row.clone());
        row
    }

    pub async fn set_setting(&self, key: &str, value: &str) {
        self.state
            .lock()
            .await
            .settings
            .insert(key.to_string(), value.to_string());
    }

    /// Makes ticket inserts for this customer fail.
    pub async fn fail_tickets_for(&self, customer_id: i64) {
        self.state
            .lock()
            .await
            .failing_ticket_customers
            .insert(customer_id);
    }

    /// Makes every ticket insert fail.
    pub async fn fail_ticket_writes(&self) {
        self.state.lock().await.failing_ticket_writes = true;
    }

    /// Makes `open_period` fail.
    pub async fn fail_period_writes(&self) {
        self.state.lock().await.failing_period_writes = true;
    }

    pub async fn periods(&self) -> Vec<periods_covered::Model> {
        self.state.lock().await.periods.clone()
    }

    pub async fn generated(&self) -> Vec<benefits_generated::Model> {
        self.state.lock().await.generated.clone()
    }

    pub async fn tickets(&self) -> Vec<benefit_tickets::Model> {
        self.state.lock().await.tickets.clone()
    }

    pub async fn customer_levels(&self) -> Vec<customer_levels::Model> {
        self.state.lock().await.customer_levels.clone()
    }

    pub async fn accumulations(&self) -> Vec<accumulations::Model> {
        self.state.lock().await.accumulations.clone()
    }
}

#[async_trait]
impl CustomerDirectory for MemoryRepository {
    async fn list_all_customers(&self) -> AppResult<Vec<customers::Model>> {
        Ok(self.state.lock().await.customers.clone())
    }

    async fn find_customer_by_id(&self, id: i64) -> AppResult<Option<customers::Model>> {
        let s = self.state.lock().await;
        Ok(s.customers.iter().find(|c| c.id == id).cloned())
    }

    async fn find_customer_by_phone_or_external_id(
        &self,
        key: &str,
    ) -> AppResult<Option<customers::Model>> {
        let s = self.state.lock().await;
        Ok(s
            .customers
            .iter()
            .find(|c| c.phone_number == key || c.external_id == key)
            .cloned())
    }

    async fn upsert_customer(
        &self,
        customer: &RegisterCustomerRequest,
    ) -> AppResult<(customers::Model, bool)> {
        let mut s = self.state.lock().await;
        if let Some(row) = s
            .customers
            .iter_mut()
            .find(|c| c.external_id == customer.external_id)
        {
            row.name = customer.name.clone();
            row.last_name = customer.last_name.clone();
            row.status = customer.status.clone();
            row.phone_number = customer.phone_number.clone();
            row.email = customer.email.clone();
            row.push_token = customer.push_token.clone();
            row.updated_at = Some(Utc::now());
            return Ok((row.clone(), false));
        }
        if s
            .customers
            .iter()
            .any(|c| c.phone_number == customer.phone_number || c.email == customer.email)
        {
            return Err(AppError::DatabaseError(sea_orm::DbErr::Custom(
                "duplicate phone number or email".to_string(),
            )));
        }
        let row = customers::Model {
            id: s.id(),
            external_id: customer.external_id.clone(),
            name: customer.name.clone(),
            last_name: customer.last_name.clone(),
            status: customer.status.clone(),
            phone_number: customer.phone_number.clone(),
            email: customer.email.clone(),
            push_token: customer.push_token.clone(),
            created_at: Some(Utc::now()),
            updated_at: None,
        };
        s.customers.push(row.clone());
        Ok((row, true))
    }
}

#[async_trait]
impl AccumulationStore for MemoryRepository {
    async fn insert_accumulation(&self, a: NewAccumulation) -> AppResult<accumulations::Model> {
        let mut s = self.state.lock().await;
        let row = accumulations::Model {
            id: s.id(),
            customer_id: a.customer_id,
            product_id: a.product_id,
            gas_station_id: a.gas_station_id,
            amount: a.amount,
            generated_points: a.generated_points,
            margin_type: a.margin_type,
            margin_applied: a.margin_applied,
            points_applied: a.points_applied,
            gas_price_applied: a.gas_price_applied,
            used_points: 0.0,
            is_active: true,
            created_at: a.created_at,
        };
        s.accumulations.push(row.clone());
        Ok(row)
    }

    async fn sum_points_in_window(
        &self,
        customer_id: i64,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> AppResult<PointsInWindow> {
        let s = self.state.lock().await;
        Ok(s
            .accumulations
            .iter()
            .filter(|a| a.customer_id == customer_id && a.created_at >= start && a.created_at <= end)
            .fold(PointsInWindow::default(), |acc, a| PointsInWindow {
                total: acc.total + a.generated_points,
                count: acc.count + 1,
            }))
    }
}

#[async_trait]
impl PricingStore for MemoryRepository {
    async fn find_pricing_rule(
        &self,
        product_codename: &str,
        station_external_id: Option<&str>,
    ) -> AppResult<Option<PricingRule>> {
        let s = self.state.lock().await;
        let Some(product) = s.products.iter().find(|p| p.codename == product_codename) else {
            return Ok(None);
        };
        let station = match station_external_id {
            Some(external_id) => match s.stations.iter().find(|st| st.external_id == external_id) {
                Some(st) => Some(st),
                None => return Ok(None),
            },
            None => None,
        };
        let station_id = station.map(|st| st.id);
        let Some(margin) = s
            .margins
            .iter()
            .find(|m| m.product_id == product.id && m.gas_station_id == station_id)
        else {
            return Ok(None);
        };
        Ok(Some(PricingRule {
            product_id: product.id,
            product_codename: product.codename.clone(),
            gas_station_id: station_id,
            margin_type: margin.margin_type,
            margin_percent: margin.margin,
            points_per_unit: margin.points,
            station_prices: station.map(|st| StationPrices {
                regular: st.regular_price,
                premium: st.premium_price,
                diesel: st.diesel_price,
            }),
        }))
    }
}

#[async_trait]
impl LevelStore for MemoryRepository {
    async fn find_level(&self, id: i64) -> AppResult<Option<levels::Model>> {
        let s = self.state.lock().await;
        Ok(s.levels.iter().find(|l| l.id == id).cloned())
    }

    async fn insert_level(&self, level: LevelTerms) -> AppResult<levels::Model> {
        let mut s = self.state.lock().await;
        let row = levels::Model {
            id: s.id(),
            name: level.name,
            min_points: level.min_points,
            is_active: level.is_active,
            created_at: Some(Utc::now()),
            updated_at: None,
        };
        s.levels.push(row.clone());
        Ok(row)
    }

    async fn update_level(&self, id: i64, level: LevelTerms) -> AppResult<levels::Model> {
        let mut s = self.state.lock().await;
        let row = s
            .levels
            .iter_mut()
            .find(|l| l.id == id)
            .ok_or_else(|| AppError::NotFound("Level not found".to_string()))?;
        row.name = level.name;
        row.min_points = level.min_points;
        row.is_active = level.is_active;
        row.updated_at = Some(Utc::now());
        Ok(row.clone())
    }

    async fn find_suitable_level(&self, points: f64) -> AppResult<Option<levels::Model>> {
        let s = self.state.lock().await;
        Ok(select_suitable_level(&s.levels, points).cloned())
    }

    async fn active_customer_level(
        &self,
        customer_id: i64,
        now: DateTime<Utc>,
    ) -> AppResult<Option<customer_levels::Model>> {
        let s = self.state.lock().await;
        Ok(s
            .customer_levels
            .iter()
            .find(|cl| {
                cl.customer_id == customer_id
                    && cl.is_active
                    && cl.start_date <= now
                    && now <= cl.end_date
            })
            .cloned())
    }

    async fn customer_level_by_phone(
        &self,
        phone: &str,
        now: DateTime<Utc>,
    ) -> AppResult<Option<(customer_levels::Model, levels::Model)>> {
        let Some(customer_id) = self.state.lock().await.customer_id_by_phone(phone) else {
            return Ok(None);
        };
        let Some(row) = self.active_customer_level(customer_id, now).await? else {
            return Ok(None);
        };
        let level = self.find_level(row.level_id).await?;
        Ok(level.map(|l| (row, l)))
    }

    async fn insert_customer_level(
        &self,
        level: NewCustomerLevel,
    ) -> AppResult<customer_levels::Model> {
        let mut s = self.state.lock().await;
        let row = customer_levels::Model {
            id: s.id(),
            customer_id: level.customer_id,
            level_id: level.level_id,
            start_date: level.start_date,
            end_date: level.end_date,
            is_active: true,
            created_at: Some(Utc::now()),
        };
        s.customer_levels.push(row.clone());
        Ok(row)
    }
}

fn template_row(id: i64, revision: i32, t: BenefitTerms) -> benefits::Model {
    benefits::Model {
        id,
        level_id: t.level_id,
        name: t.name,
        benefit_type: t.benefit_type,
        external_product_id: t.external_product_id,
        frequency: t.frequency,
        discount: t.discount,
        num_times: t.num_times,
        stock: t.stock,
        dependency: t.dependency,
        min_amount: t.min_amount,
        is_active: t.is_active,
        revision,
        created_at: Some(Utc::now()),
        updated_at: None,
    }
}

#[async_trait]
impl BenefitStore for MemoryRepository {
    async fn find_benefit(&self, id: i64) -> AppResult<Option<benefits::Model>> {
        let s = self.state.lock().await;
        Ok(s.benefits.iter().find(|b| b.id == id).cloned())
    }

    async fn insert_benefit(&self, terms: BenefitTerms) -> AppResult<benefits::Model> {
        let mut s = self.state.lock().await;
        let id = s.id();
        let row = template_row(id, 1, terms);
        s.benefits.push(row.clone());
        Ok(row)
    }

    async fn update_benefit(&self, id: i64, terms: BenefitTerms) -> AppResult<benefits::Model> {
        let mut s = self.state.lock().await;
        let row = s
            .benefits
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or_else(|| AppError::NotFound("Benefit not found".to_string()))?;
        let created_at = row.created_at;
        *row = template_row(id, row.revision + 1, terms);
        row.created_at = created_at;
        row.updated_at = Some(Utc::now());
        Ok(row.clone())
    }

    async fn list_active_benefits(&self) -> AppResult<Vec<benefits::Model>> {
        let s = self.state.lock().await;
        Ok(s.benefits.iter().filter(|b| b.is_active).cloned().collect())
    }

    async fn generated_covering(
        &self,
        benefit_ids: &[i64],
        now: DateTime<Utc>,
    ) -> AppResult<Vec<benefits_generated::Model>> {
        let s = self.state.lock().await;
        Ok(s
            .generated
            .iter()
            .filter(|g| benefit_ids.contains(&g.benefit_id) && g.covers(now))
            .cloned()
            .collect())
    }

    async fn generated_for_level(
        &self,
        level_id: i64,
        now: DateTime<Utc>,
    ) -> AppResult<Vec<benefits_generated::Model>> {
        let s = self.state.lock().await;
        Ok(s
            .generated
            .iter()
            .filter(|g| g.level_id == level_id && g.is_active && g.covers(now))
            .cloned()
            .collect())
    }

    async fn insert_generated_many(&self, generated: Vec<NewBenefitGenerated>) -> AppResult<usize> {
        let mut s = self.state.lock().await;
        let total = generated.len();
        for g in generated {
            let t = g.terms;
            let row = benefits_generated::Model {
                id: s.id(),
                benefit_id: g.benefit_id,
                source_revision: g.source_revision,
                level_id: t.level_id,
                name: t.name,
                benefit_type: t.benefit_type,
                external_product_id: t.external_product_id,
                frequency: t.frequency,
                discount: t.discount,
                num_times: t.num_times,
                stock: t.stock,
                stock_used: 0,
                dependency: t.dependency,
                min_amount: t.min_amount,
                is_active: t.is_active,
                start_date: g.start_date,
                end_date: g.end_date,
                created_at: Some(Utc::now()),
                updated_at: None,
            };
            s.generated.push(row);
        }
        Ok(total)
    }

    async fn update_generated_benefit(
        &self,
        id: i64,
        update: UpdateGeneratedBenefitRequest,
    ) -> AppResult<benefits_generated::Model> {
        let mut s = self.state.lock().await;
        let row = s
            .generated
            .iter_mut()
            .find(|g| g.id == id)
            .ok_or_else(|| AppError::NotFound("Generated benefit not found".to_string()))?;
        if let Some(stock) = update.stock {
            row.stock = stock;
        }
        if let Some(is_active) = update.is_active {
            row.is_active = is_active;
        }
        row.updated_at = Some(Utc::now());
        Ok(row.clone())
    }

    async fn insert_tickets(&self, drafts: Vec<TicketDraft>) -> AppResult<usize> {
        let mut s = self.state.lock().await;
        if s.failing_ticket_writes
            || drafts
                .iter()
                .any(|d| s.failing_ticket_customers.contains(&d.customer_id))
        {
            return Err(AppError::DatabaseError(sea_orm::DbErr::Custom(
                "ticket insert failed".to_string(),
            )));
        }
        let total = drafts.len();
        for d in drafts {
            let row = benefit_tickets::Model {
                id: s.id(),
                customer_id: d.customer_id,
                benefit_generated_id: d.benefit_generated_id,
                start_date: d.start_date,
                end_date: d.end_date,
                redeemed: false,
                created_at: Some(Utc::now()),
                updated_at: None,
            };
            s.tickets.push(row);
        }
        Ok(total)
    }

    async fn find_redeemable_ticket(
        &self,
        ticket_id: i64,
        customer_id: i64,
    ) -> AppResult<Option<TicketWithBenefit>> {
        let s = self.state.lock().await;
        let Some(ticket) = s
            .tickets
            .iter()
            .find(|t| t.id == ticket_id && t.customer_id == customer_id)
        else {
            return Ok(None);
        };
        Ok(s
            .generated
            .iter()
            .find(|g| {
                g.id == ticket.benefit_generated_id
                    && g.is_active
                    && !g.benefit_type.is_always_on()
            })
            .map(|g| TicketWithBenefit {
                ticket: ticket.clone(),
                benefit: g.clone(),
            }))
    }

    async fn commit_redemption(&self, plan: RedemptionPlan) -> AppResult<TicketWithBenefit> {
        let mut s = self.state.lock().await;
        let t_idx = s
            .tickets
            .iter()
            .position(|t| t.id == plan.ticket_id)
            .ok_or_else(|| AppError::NotFound("Benefit ticket not found".to_string()))?;
        let g_idx = s
            .generated
            .iter()
            .position(|g| g.id == plan.benefit_generated_id)
            .ok_or_else(|| AppError::NotFound("Generated benefit not found".to_string()))?;

        let g = &s.generated[g_idx];
        if g.has_bounded_stock() && g.stock_used >= g.stock {
            return Err(AppError::NoStockLeft);
        }
        if plan.mark_redeemed && s.tickets[t_idx].redeemed {
            return Err(AppError::AlreadyRedeemed);
        }

        let now = Utc::now();
        s.generated[g_idx].stock_used += 1;
        s.generated[g_idx].updated_at = Some(now);
        if plan.mark_redeemed {
            s.tickets[t_idx].redeemed = true;
            s.tickets[t_idx].updated_at = Some(now);
        }
        Ok(TicketWithBenefit {
            ticket: s.tickets[t_idx].clone(),
            benefit: s.generated[g_idx].clone(),
        })
    }

    async fn dependent_tickets_by_phone(
        &self,
        phone: &str,
        charged_amount: f64,
        now: DateTime<Utc>,
    ) -> AppResult<Vec<TicketWithBenefit>> {
        let s = self.state.lock().await;
        let Some(customer_id) = s.customer_id_by_phone(phone) else {
            return Ok(Vec::new());
        };
        Ok(s.open_tickets_with(customer_id, now, |g| {
            g.dependency && g.min_amount <= charged_amount
        }))
    }

    async fn active_tickets_by_phone(
        &self,
        phone: &str,
        benefit_type: BenefitType,
        now: DateTime<Utc>,
    ) -> AppResult<Vec<TicketWithBenefit>> {
        let s = self.state.lock().await;
        let Some(customer_id) = s.customer_id_by_phone(phone) else {
            return Ok(Vec::new());
        };
        Ok(s.open_tickets_with(customer_id, now, |g| {
            g.benefit_type == benefit_type && !g.dependency
        }))
    }

    async fn gas_ticket_by_phone(
        &self,
        phone: &str,
        now: DateTime<Utc>,
    ) -> AppResult<Option<TicketWithBenefit>> {
        let s = self.state.lock().await;
        let Some(customer_id) = s.customer_id_by_phone(phone) else {
            return Ok(None);
        };
        Ok(s
            .open_tickets_with(customer_id, now, |g| g.benefit_type == BenefitType::Gas)
            .into_iter()
            .next())
    }
}

#[async_trait]
impl PeriodStore for MemoryRepository {
    async fn find_active_period(
        &self,
        now: DateTime<Utc>,
    ) -> AppResult<Option<periods_covered::Model>> {
        let s = self.state.lock().await;
        Ok(s
            .periods
            .iter()
            .filter(|p| p.is_active && p.start_date <= now && now <= p.end_date)
            .max_by_key(|p| p.start_date)
            .cloned())
    }

    async fn open_period(
        &self,
        now: DateTime<Utc>,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> AppResult<PeriodGate> {
        let mut s = self.state.lock().await;
        if s.failing_period_writes {
            return Err(AppError::DatabaseError(sea_orm::DbErr::Custom(
                "period insert failed".to_string(),
            )));
        }
        if let Some(p) = s
            .periods
            .iter()
            .find(|p| p.is_active && p.start_date <= now && now <= p.end_date)
        {
            return Ok(PeriodGate::AlreadyCovered(p.clone()));
        }
        let period = periods_covered::Model {
            id: s.id(),
            start_date: start,
            end_date: end,
            is_active: true,
            created_at: Some(Utc::now()),
        };
        s.periods.push(period.clone());
        Ok(PeriodGate::Opened(period))
    }
}

#[async_trait]
impl SettingsStore for MemoryRepository {
    async fn get_setting(&self, key: &str) -> AppResult<Option<String>> {
        Ok(self.state.lock().await.settings.get(key).cloned())
    }
}
