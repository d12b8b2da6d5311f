use crate::entities::level_entity as levels;

/// Highest active level whose `min_points` the customer reaches.
pub fn select_suitable_level(candidates: &[levels::Model], points: f64) -> Option<&levels::Model> {
    candidates
        .iter()
        .filter(|l| l.is_active && l.min_points <= points)
        .max_by(|a, b| a.min_points.total_cmp(&b.min_points))
}
