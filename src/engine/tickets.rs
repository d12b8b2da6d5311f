use crate::entities::{BenefitFrequency, benefit_generated_entity as benefits_generated};
use crate::models::TicketDraft;
use chrono::{DateTime, Duration, Months, Utc};

/// Calendar-month step. The day is clamped to the target month's length, so
/// Jan 31 steps to Feb 28 (or 29) and the clamped day carries forward.
pub fn add_one_month(t: DateTime<Utc>) -> Option<DateTime<Utc>> {
    t.checked_add_months(Months::new(1))
}

fn step(frequency: BenefitFrequency, t: DateTime<Utc>) -> Option<DateTime<Utc>> {
    match frequency {
        BenefitFrequency::Hourly => t.checked_add_signed(Duration::hours(1)),
        BenefitFrequency::Daily => t.checked_add_signed(Duration::days(1)),
        BenefitFrequency::Weekly => t.checked_add_signed(Duration::days(7)),
        BenefitFrequency::Monthly => add_one_month(t),
        BenefitFrequency::NTimes | BenefitFrequency::Always => None,
    }
}

/// Splits one generated benefit into redeemable tickets for `customer_id`.
///
/// Always-on benefits (and `Always` frequency) get one ticket over the whole
/// window, `NTimes` gets `num_times` tickets over the whole window, and the
/// periodic frequencies walk the window one step at a time. The last periodic
/// ticket keeps its full step even when that runs past the window end.
pub fn expand_tickets(generated: &benefits_generated::Model, customer_id: i64) -> Vec<TicketDraft> {
    let draft = |start_date, end_date| TicketDraft {
        customer_id,
        benefit_generated_id: generated.id,
        start_date,
        end_date,
    };

    if generated.benefit_type.is_always_on() || generated.frequency == BenefitFrequency::Always {
        return vec![draft(generated.start_date, generated.end_date)];
    }

    if generated.frequency == BenefitFrequency::NTimes {
        let n = usize::try_from(generated.num_times).unwrap_or(0);
        return (0..n)
            .map(|_| draft(generated.start_date, generated.end_date))
            .collect();
    }

    let mut drafts = Vec::new();
    let mut cursor = generated.start_date;
    while cursor < generated.end_date {
        let Some(next) = step(generated.frequency, cursor) else {
            break;
        };
        drafts.push(draft(cursor, next));
        cursor = next;
    }
    drafts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::BenefitType;
    use chrono::TimeZone;

    fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
    }

    fn generated(
        benefit_type: BenefitType,
        frequency: BenefitFrequency,
        num_times: i32,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> benefits_generated::Model {
        benefits_generated::Model {
            id: 11,
            benefit_id: 1,
            source_revision: 1,
            level_id: 1,
            name: "perk".to_string(),
            benefit_type,
            external_product_id: String::new(),
            frequency,
            discount: 0.0,
            num_times,
            stock: -1,
            stock_used: 0,
            dependency: false,
            min_amount: 0.0,
            is_active: true,
            start_date: start,
            end_date: end,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_n_times_tickets_span_full_window() {
        let (start, end) = (at(2025, 3, 1), at(2025, 3, 31));
        let g = generated(BenefitType::Digital, BenefitFrequency::NTimes, 5, start, end);
        let drafts = expand_tickets(&g, 42);
        assert_eq!(drafts.len(), 5);
        assert!(drafts.iter().all(|d| d.start_date == start && d.end_date == end));
        assert!(drafts.iter().all(|d| d.customer_id == 42 && d.benefit_generated_id == 11));
    }

    #[test]
    fn test_daily_tickets_are_consecutive() {
        let start = at(2025, 3, 1);
        let end = start + Duration::days(10);
        let g = generated(BenefitType::Digital, BenefitFrequency::Daily, 0, start, end);
        let drafts = expand_tickets(&g, 1);
        assert_eq!(drafts.len(), 10);
        assert_eq!(drafts[0].start_date, start);
        for pair in drafts.windows(2) {
            assert_eq!(pair[0].end_date, pair[1].start_date);
        }
        assert!(drafts.iter().all(|d| d.end_date - d.start_date == Duration::days(1)));
        assert_eq!(drafts[9].end_date, end);
    }

    #[test]
    fn test_monthly_steps_by_calendar_month() {
        let g = generated(
            BenefitType::Physical,
            BenefitFrequency::Monthly,
            0,
            at(2025, 1, 31),
            at(2025, 4, 1),
        );
        let drafts = expand_tickets(&g, 1);
        let spans: Vec<_> = drafts.iter().map(|d| (d.start_date, d.end_date)).collect();
        assert_eq!(
            spans,
            vec![
                (at(2025, 1, 31), at(2025, 2, 28)),
                (at(2025, 2, 28), at(2025, 3, 28)),
                (at(2025, 3, 28), at(2025, 4, 28)),
            ]
        );
    }

    #[test]
    fn test_monthly_leap_year_clamp() {
        assert_eq!(add_one_month(at(2024, 1, 31)), Some(at(2024, 2, 29)));
    }

    #[test]
    fn test_last_weekly_ticket_keeps_nominal_end() {
        let start = at(2025, 3, 1);
        let end = start + Duration::days(10);
        let g = generated(BenefitType::Digital, BenefitFrequency::Weekly, 0, start, end);
        let drafts = expand_tickets(&g, 1);
        assert_eq!(drafts.len(), 2);
        assert_eq!(drafts[1].end_date, start + Duration::days(14));
    }

    #[test]
    fn test_hourly_ticket_count() {
        let start = at(2025, 3, 1);
        let g = generated(
            BenefitType::Digital,
            BenefitFrequency::Hourly,
            0,
            start,
            start + Duration::hours(24),
        );
        assert_eq!(expand_tickets(&g, 1).len(), 24);
    }

    #[test]
    fn test_always_on_types_get_single_ticket() {
        let (start, end) = (at(2025, 3, 1), at(2025, 3, 31));
        // frequency is ignored for gas benefits
        let gas = generated(BenefitType::Gas, BenefitFrequency::Daily, 0, start, end);
        let drafts = expand_tickets(&gas, 1);
        assert_eq!(drafts.len(), 1);
        assert_eq!((drafts[0].start_date, drafts[0].end_date), (start, end));

        let always = generated(BenefitType::Digital, BenefitFrequency::Always, 0, start, end);
        assert_eq!(expand_tickets(&always, 1).len(), 1);
    }

    #[test]
    fn test_empty_window_yields_no_periodic_tickets() {
        let start = at(2025, 3, 1);
        let g = generated(BenefitType::Digital, BenefitFrequency::Daily, 0, start, start);
        assert!(expand_tickets(&g, 1).is_empty());
    }
}
