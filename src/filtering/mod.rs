//! # Query Parameter Filtering
//!
//! Turns decoded URL query parameters into typed filter attributes and
//! pagination state.
//!
//! ## Parameter Forms
//!
//! ```text
//! GET /contents?id=10                      // bare name: implicit equal
//! GET /contents?title_contains=Hello       // field + "_" + operator
//! GET /contents?body_not-starts-with=Draft
//! GET /contents?published_is-null=1        // value is required but unused
//! GET /contents?limit=5&page=3             // pagination: LIMIT 5 OFFSET 10
//! ```
//!
//! Recognised operators: `equal`, `not-equal`, `is-null`, `is-not-null`,
//! `starts-with`, `not-starts-with`, `ends-with`, `not-ends-with`,
//! `contains`, `not-contains`.
//!
//! A name containing `_` must end with a recognised operator, otherwise the
//! parameter is ignored: `created_at=...` is dropped, `created_at_equal=...`
//! filters `created_at`.

pub mod operator;
pub mod pagination;
pub mod query_parser;

pub use operator::Operator;
pub use pagination::calculate_offset;
pub use query_parser::{FilterAttribute, LIMIT_PARAM, PAGE_PARAM, QueryState};
