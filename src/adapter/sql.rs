//! Sea-ORM backend: every predicate becomes a bound-parameter condition on
//! any query implementing [`QueryFilter`] and [`QuerySelect`], e.g.
//! `Entity::find()`.
//!
//! | Operator | Rendered |
//! |---|---|
//! | `equal` / `not-equal` | `"col" = ?` / `"col" <> ?` |
//! | `is-null` / `is-not-null` | `"col" IS NULL` / `"col" IS NOT NULL` |
//! | `starts-with` | `"col" LIKE ? ESCAPE '!'` bound to `value%` |
//! | `ends-with` | `"col" LIKE ? ESCAPE '!'` bound to `%value` |
//! | `contains` | `"col" LIKE ? ESCAPE '!'` bound to `%value%` |
//!
//! The `not-` variants render `NOT LIKE`.

use super::{DbAdapter, PagerFn, PredicateFn};
use crate::errors::FilterError;
use crate::filtering::{Operator, QueryState};
use sea_orm::sea_query::{Alias, Expr, LikeExpr};
use sea_orm::{QueryFilter, QuerySelect};
use std::marker::PhantomData;

/// Needs no quoting in any backend's string literal syntax
const LIKE_ESCAPE: char = '!';

/// Adapter for Sea-ORM select queries of type `Q`.
pub struct SeaOrmAdapter<Q>(PhantomData<fn() -> Q>);

impl<Q> DbAdapter for SeaOrmAdapter<Q>
where
    Q: QueryFilter + QuerySelect,
{
    type Query = Q;

    fn predicate(operator: Operator) -> PredicateFn<Q> {
        match operator {
            Operator::Equal => equal::<Q>,
            Operator::NotEqual => not_equal::<Q>,
            Operator::IsNull => is_null::<Q>,
            Operator::IsNotNull => is_not_null::<Q>,
            Operator::StartsWith => starts_with::<Q>,
            Operator::NotStartsWith => not_starts_with::<Q>,
            Operator::EndsWith => ends_with::<Q>,
            Operator::NotEndsWith => not_ends_with::<Q>,
            Operator::Contains => contains::<Q>,
            Operator::NotContains => not_contains::<Q>,
        }
    }

    fn pager() -> PagerFn<Q> {
        paginate::<Q>
    }
}

/// Escape LIKE wildcards so a value only ever matches literally.
/// Escapes: % (match any) and _ (match single char)
pub(crate) fn escape_like_wildcards(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '%' | '_') || c == LIKE_ESCAPE {
            escaped.push(LIKE_ESCAPE);
        }
        escaped.push(c);
    }
    escaped
}

fn column(name: &str) -> Expr {
    Expr::col(Alias::new(name))
}

fn pattern(prefix: &str, value: &str, suffix: &str) -> LikeExpr {
    LikeExpr::new(format!("{prefix}{}{suffix}", escape_like_wildcards(value))).escape(LIKE_ESCAPE)
}

fn equal<Q: QueryFilter>(name: &str, value: &str, query: Q, _: &QueryState) -> Result<Q, FilterError> {
    Ok(query.filter(column(name).eq(value)))
}

fn not_equal<Q: QueryFilter>(name: &str, value: &str, query: Q, _: &QueryState) -> Result<Q, FilterError> {
    Ok(query.filter(column(name).ne(value)))
}

fn is_null<Q: QueryFilter>(name: &str, _: &str, query: Q, _: &QueryState) -> Result<Q, FilterError> {
    Ok(query.filter(column(name).is_null()))
}

fn is_not_null<Q: QueryFilter>(name: &str, _: &str, query: Q, _: &QueryState) -> Result<Q, FilterError> {
    Ok(query.filter(column(name).is_not_null()))
}

fn starts_with<Q: QueryFilter>(name: &str, value: &str, query: Q, _: &QueryState) -> Result<Q, FilterError> {
    Ok(query.filter(column(name).like(pattern("", value, "%"))))
}

fn not_starts_with<Q: QueryFilter>(name: &str, value: &str, query: Q, _: &QueryState) -> Result<Q, FilterError> {
    Ok(query.filter(column(name).not_like(pattern("", value, "%"))))
}

fn ends_with<Q: QueryFilter>(name: &str, value: &str, query: Q, _: &QueryState) -> Result<Q, FilterError> {
    Ok(query.filter(column(name).like(pattern("%", value, ""))))
}

fn not_ends_with<Q: QueryFilter>(name: &str, value: &str, query: Q, _: &QueryState) -> Result<Q, FilterError> {
    Ok(query.filter(column(name).not_like(pattern("%", value, ""))))
}

fn contains<Q: QueryFilter>(name: &str, value: &str, query: Q, _: &QueryState) -> Result<Q, FilterError> {
    Ok(query.filter(column(name).like(pattern("%", value, "%"))))
}

fn not_contains<Q: QueryFilter>(name: &str, value: &str, query: Q, _: &QueryState) -> Result<Q, FilterError> {
    Ok(query.filter(column(name).not_like(pattern("%", value, "%"))))
}

fn paginate<Q: QuerySelect>(query: Q, limit: u64, offset: u64) -> Result<Q, FilterError> {
    let query = query.limit(limit);
    // Page 0 and 1 render no OFFSET clause at all
    if offset == 0 {
        Ok(query)
    } else {
        Ok(query.offset(offset))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wildcard_escaping() {
        assert_eq!(escape_like_wildcards("test"), "test", "Normal text should pass through");
        assert_eq!(escape_like_wildcards("100%"), "100!%", "% should be escaped");
        assert_eq!(escape_like_wildcards("test_value"), "test!_value", "_ should be escaped");
        assert_eq!(escape_like_wildcards("wow!"), "wow!!", "The escape character itself should be escaped");
        assert_eq!(escape_like_wildcards("!%"), "!!!%", "Escape character and % should both be escaped");
        assert_eq!(escape_like_wildcards("C:\\temp"), "C:\\temp", "Backslash is an ordinary character");
    }

    #[test]
    fn test_quotes_are_not_touched() {
        // Quotes need no escaping: the value is bound, not spliced
        assert_eq!(escape_like_wildcards("'; drop table x;'"), "'; drop table x;'");
    }
}
