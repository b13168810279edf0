//! # filtercrate
//!
//! Translate untrusted URL query parameters into parameterized backend
//! queries.
//!
//! The pipeline has three stages:
//! 1. [`QueryState::parse_params`] turns `name → values` into typed
//!    [`FilterAttribute`]s plus `limit`/`page`.
//! 2. [`FieldMetadataCache`] derives, once per model type, which fields are
//!    filterable, under which parameter name and logical type.
//! 3. [`QueryBuilder::build`] dispatches every matching attribute through the
//!    [`AdapterRegistry`] (logical type × operator) and applies pagination.
//!
//! ```rust,ignore
//! use filtercrate::{FilterModel, QueryBuilder, QueryState};
//!
//! let builder = QueryBuilder::sea_orm();
//! let mut state = QueryState::new(50);
//! state.parse_params([("title_contains", ["Hello"]), ("limit", ["5"]), ("page", ["3"])])?;
//! // SELECT ... WHERE "title" LIKE ? ESCAPE '!' LIMIT 5 OFFSET 10
//! let query = builder.build::<content::Model>(&state, content::Entity::find())?;
//! ```
//!
//! Parameters that do not resolve to a declared field and a supported
//! operator have no effect on the query.

pub mod adapter;
pub mod builder;
pub mod config;
pub mod errors;
pub mod filtering;
pub mod metadata;

#[cfg(feature = "derive")]
pub use filtercrate_derive::FilterModel;

pub use adapter::{AdapterRegistry, DbAdapter, PagerFn, PredicateFn, SeaOrmAdapter};
pub use builder::QueryBuilder;
pub use config::QueryConfig;
pub use errors::{FilterError, MetadataError};
pub use filtering::{FilterAttribute, Operator, QueryState};
pub use metadata::{
    FieldDeclaration, FieldFilterConfig, FieldMetadataCache, FilterModel, LogicalType, ModelDescriptor,
    ModelFilterConfig, StructuralField,
};
