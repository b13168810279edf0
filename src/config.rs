use serde::Deserialize;

/// Limit applied when a request does not ask for one, and the value a
/// negative `set_limit` falls back to.
pub const DEFAULT_LIMIT: i64 = 10;

/// Upper bound for `limit` when no configuration is supplied.
pub const DEFAULT_LIMIT_MAX: i64 = 100;

/// Settings shared by every [`QueryState`](crate::QueryState) an application creates.
///
/// Deserializable so it can live in the application's own config file:
///
/// ```rust
/// let config: filtercrate::QueryConfig = serde_json::from_str(r#"{"limit_max": 50}"#).unwrap();
/// assert_eq!(config.limit_max, 50);
/// assert_eq!(config.default_limit, 10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct QueryConfig {
    /// Largest accepted `limit`. Requests asking for more keep the default.
    pub limit_max: i64,
    /// Limit used before (or instead of) a valid `limit` parameter.
    pub default_limit: i64,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            limit_max: DEFAULT_LIMIT_MAX,
            default_limit: DEFAULT_LIMIT,
        }
    }
}

impl QueryConfig {
    #[must_use]
    pub fn with_limit_max(limit_max: i64) -> Self {
        Self {
            limit_max,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = QueryConfig::default();
        assert_eq!(config.limit_max, 100);
        assert_eq!(config.default_limit, 10);
    }

    #[test]
    fn test_partial_deserialize_keeps_defaults() {
        let config: QueryConfig = serde_json::from_str(r#"{"default_limit": 25}"#).unwrap();
        assert_eq!(config.limit_max, DEFAULT_LIMIT_MAX);
        assert_eq!(config.default_limit, 25);
    }
}
