use crate::entities::BenefitFrequency;
use crate::error::{AppError, AppResult};
use crate::models::TicketWithBenefit;
use chrono::{DateTime, Utc};

/// Writes a successful redemption must make.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RedemptionPlan {
    pub ticket_id: i64,
    pub benefit_generated_id: i64,
    /// false for `Always` tickets, which stay redeemable
    pub mark_redeemed: bool,
}

/// Runs the redemption guards in order: missing ticket, already redeemed,
/// outside the ticket window, out of stock. The first failing guard wins.
///
/// The stock check here reads a snapshot; the store re-checks it with a
/// conditional update when committing.
pub fn plan_redemption(
    found: Option<&TicketWithBenefit>,
    now: DateTime<Utc>,
) -> AppResult<RedemptionPlan> {
    let Some(TicketWithBenefit { ticket, benefit }) = found else {
        return Err(AppError::NotFound("Benefit ticket not found".to_string()));
    };
    if ticket.redeemed {
        return Err(AppError::AlreadyRedeemed);
    }
    if !ticket.covers(now) {
        return Err(AppError::NotInDateRange);
    }
    if benefit.has_bounded_stock() && benefit.stock_used >= benefit.stock {
        return Err(AppError::NoStockLeft);
    }
    Ok(RedemptionPlan {
        ticket_id: ticket.id,
        benefit_generated_id: benefit.id,
        mark_redeemed: benefit.frequency != BenefitFrequency::Always,
    })
}
