//! # Adapter Registry
//!
//! Two-level dispatch table: logical field type → operator → predicate
//! function. The table is built once from [`LogicalType::base_operators`]
//! and a [`DbAdapter`] that supplies one predicate per operator; alias types
//! (`text`, `blob`, `json`, `time`, `dateOnly`) share their target's table
//! rather than copying it.
//!
//! Lookups for an unknown type, or an operator the type does not register,
//! return the backend query untouched. Unexpected input therefore never
//! reaches the backend.
//!
//! ## Writing a backend
//!
//! ```rust,ignore
//! struct MemoryAdapter;
//!
//! impl DbAdapter for MemoryAdapter {
//!     type Query = Vec<Predicate>;
//!
//!     fn predicate(operator: Operator) -> PredicateFn<Self::Query> {
//!         match operator {
//!             Operator::Equal => |column, value, mut query, _| {
//!                 query.push(Predicate::eq(column, value));
//!                 Ok(query)
//!             },
//!             // ... every other operator
//!         }
//!     }
//!
//!     fn pager() -> PagerFn<Self::Query> {
//!         |query, _limit, _offset| Ok(query)
//!     }
//! }
//! ```

pub mod sql;

use crate::errors::FilterError;
use crate::filtering::{Operator, QueryState};
use crate::metadata::LogicalType;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::Arc;

pub use sql::SeaOrmAdapter;

/// Builds one predicate into the backend query.
///
/// Receives the resolved backend column, the raw value (to be bound, never
/// spliced into query text), the query so far and the request state.
pub type PredicateFn<Q> =
    fn(column: &str, value: &str, query: Q, state: &QueryState) -> Result<Q, FilterError>;

/// Applies `limit` and `offset` to the backend query.
pub type PagerFn<Q> = fn(query: Q, limit: u64, offset: u64) -> Result<Q, FilterError>;

/// Predicates registered for one logical type
pub type OperatorTable<Q> = BTreeMap<Operator, PredicateFn<Q>>;

/// A backend able to express every operator.
///
/// `predicate` must match exhaustively over [`Operator`], so adding an
/// operator forces every backend to handle it.
pub trait DbAdapter {
    type Query;

    fn predicate(operator: Operator) -> PredicateFn<Self::Query>;

    fn pager() -> PagerFn<Self::Query>;
}

/// Read-only dispatch table for backend query type `Q`.
pub struct AdapterRegistry<Q> {
    types: HashMap<LogicalType, Arc<OperatorTable<Q>>>,
    pager: PagerFn<Q>,
}

impl<Q> AdapterRegistry<Q> {
    #[must_use]
    pub fn for_adapter<A: DbAdapter<Query = Q>>() -> Self {
        let mut types: HashMap<LogicalType, Arc<OperatorTable<Q>>> = HashMap::new();

        for logical_type in LogicalType::ALL {
            if logical_type.alias_of().is_none() {
                let table: OperatorTable<Q> = logical_type
                    .base_operators()
                    .iter()
                    .map(|&operator| (operator, A::predicate(operator)))
                    .collect();
                types.insert(logical_type, Arc::new(table));
            }
        }

        for logical_type in LogicalType::ALL {
            if let Some(target) = logical_type.alias_of()
                && let Some(table) = types.get(&target).map(Arc::clone)
            {
                types.insert(logical_type, table);
            }
        }

        Self {
            types,
            pager: A::pager(),
        }
    }

    /// Operators registered for `logical_type`, in [`Operator`] order
    pub fn operators(&self, logical_type: LogicalType) -> impl Iterator<Item = Operator> + '_ {
        self.types
            .get(&logical_type)
            .into_iter()
            .flat_map(|table| table.keys().copied())
    }

    #[must_use]
    pub fn supports(&self, logical_type: &str, operator: Operator) -> bool {
        self.lookup(logical_type, operator).is_some()
    }

    /// Whether two types dispatch through the very same table
    #[must_use]
    pub fn shares_table(&self, a: LogicalType, b: LogicalType) -> bool {
        match (self.types.get(&a), self.types.get(&b)) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }

    fn lookup(&self, logical_type: &str, operator: Operator) -> Option<PredicateFn<Q>> {
        let logical_type = LogicalType::from_name(logical_type)?;
        self.types.get(&logical_type)?.get(&operator).copied()
    }

    /// Apply `operator` on `column` for a field of `logical_type`.
    ///
    /// An unknown type or unregistered operator is a no-op.
    ///
    /// # Errors
    ///
    /// Propagates the predicate's own error.
    pub fn run(
        &self,
        logical_type: &str,
        operator: Operator,
        column: &str,
        value: &str,
        query: Q,
        state: &QueryState,
    ) -> Result<Q, FilterError> {
        match self.lookup(logical_type, operator) {
            Some(predicate) => {
                tracing::trace!(logical_type, operator = %operator, column, "Applying filter predicate");
                predicate(column, value, query, state)
            }
            None => {
                tracing::debug!(
                    logical_type,
                    operator = %operator,
                    column,
                    "No predicate registered, filter ignored"
                );
                Ok(query)
            }
        }
    }

    /// [`run`](Self::run) keyed by operator tag, for callers holding raw names.
    ///
    /// # Errors
    ///
    /// Propagates the predicate's own error.
    pub fn run_tag(
        &self,
        logical_type: &str,
        operator_tag: &str,
        column: &str,
        value: &str,
        query: Q,
        state: &QueryState,
    ) -> Result<Q, FilterError> {
        match Operator::from_tag(operator_tag) {
            Some(operator) => self.run(logical_type, operator, column, value, query, state),
            None => Ok(query),
        }
    }

    /// Apply the state's limit and offset.
    ///
    /// # Errors
    ///
    /// Propagates the pager's error.
    pub fn paginate(&self, query: Q, state: &QueryState) -> Result<Q, FilterError> {
        let limit = u64::try_from(state.limit()).unwrap_or(0);
        (self.pager)(query, limit, state.offset())
    }
}

impl<Q> fmt::Debug for AdapterRegistry<Q> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut types: Vec<_> = self
            .types
            .iter()
            .map(|(ty, table)| (ty.as_str(), table.keys().map(|op| op.tag()).collect::<Vec<_>>()))
            .collect();
        types.sort_unstable();
        f.debug_struct("AdapterRegistry").field("types", &types).finish_non_exhaustive()
    }
}
