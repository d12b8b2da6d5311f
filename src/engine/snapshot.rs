use crate::entities::benefit_entity as benefits;
use crate::models::{BenefitTerms, NewBenefitGenerated};
use chrono::{DateTime, Utc};

/// Value copy of a template bound to a cycle window.
pub fn snapshot_benefit(
    template: &benefits::Model,
    start_date: DateTime<Utc>,
    end_date: DateTime<Utc>,
) -> NewBenefitGenerated {
    NewBenefitGenerated {
        benefit_id: template.id,
        source_revision: template.revision,
        terms: BenefitTerms::from(template),
        start_date,
        end_date,
    }
}
