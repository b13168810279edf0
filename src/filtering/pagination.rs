use crate::config::DEFAULT_LIMIT;

/// Clamp a requested limit into `[0, limit_max]`.
///
/// Values above `limit_max` become `limit_max`. Negative values fall back to
/// the default limit (not zero), itself capped by `limit_max`.
#[must_use]
pub fn clamp_limit(requested: i64, limit_max: i64) -> i64 {
    if requested > limit_max {
        limit_max
    } else if requested < 0 {
        DEFAULT_LIMIT.min(limit_max)
    } else {
        requested
    }
}

/// Pages are never negative; there is no upper bound.
#[must_use]
pub const fn clamp_page(requested: i64) -> i64 {
    if requested < 0 { 0 } else { requested }
}

/// Rows to skip for a 1-based `page`.
///
/// Pages 0 and 1 both mean "from the start".
#[must_use]
pub fn calculate_offset(limit: i64, page: i64) -> u64 {
    if page < 2 {
        return 0;
    }
    let offset = limit.saturating_mul(page - 1);
    u64::try_from(offset).unwrap_or(0)
}
