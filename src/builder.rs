use crate::adapter::{AdapterRegistry, DbAdapter, SeaOrmAdapter};
use crate::errors::FilterError;
use crate::filtering::QueryState;
use crate::metadata::{FieldMetadataCache, FilterModel};
use sea_orm::{QueryFilter, QuerySelect};
use std::sync::Arc;

/// Applies a request's [`QueryState`] to backend queries for a model.
///
/// Build one at startup and share it; it only holds read-only tables.
///
/// ```rust,ignore
/// let builder = QueryBuilder::<Select<content::Entity>>::sea_orm();
///
/// let mut state = QueryState::new(50);
/// state.parse_params(params)?;
/// let rows = builder
///     .build::<content::Model>(&state, content::Entity::find())?
///     .all(&db)
///     .await?;
/// ```
pub struct QueryBuilder<Q> {
    registry: Arc<AdapterRegistry<Q>>,
    cache: Option<Arc<FieldMetadataCache>>,
}

impl<Q> QueryBuilder<Q> {
    /// Builder over `registry`, resolving model metadata through the global cache.
    #[must_use]
    pub fn new(registry: AdapterRegistry<Q>) -> Self {
        Self {
            registry: Arc::new(registry),
            cache: None,
        }
    }

    #[must_use]
    pub fn for_adapter<A: DbAdapter<Query = Q>>() -> Self {
        Self::new(AdapterRegistry::for_adapter::<A>())
    }

    /// Resolve model metadata through `cache` instead of the global one.
    #[must_use]
    pub fn with_cache(mut self, cache: Arc<FieldMetadataCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    #[must_use]
    pub fn registry(&self) -> &AdapterRegistry<Q> {
        &self.registry
    }

    #[must_use]
    pub fn cache(&self) -> &FieldMetadataCache {
        match self.cache.as_deref() {
            Some(cache) => cache,
            None => FieldMetadataCache::global(),
        }
    }

    /// Apply every filter of `state` that targets a filterable field of `M`,
    /// then the state's limit and offset.
    ///
    /// Fields are visited in declaration order. A field uses the first
    /// attribute parsed for its external parameter, and only that
    /// attribute's first value. Pagination applies even when `M` has no
    /// filterable fields.
    ///
    /// # Errors
    ///
    /// - [`FilterError::ModelMetadata`] when `M` can not be introspected
    /// - [`FilterError::Backend`] when a predicate or the pager fails
    pub fn build<M: FilterModel>(&self, state: &QueryState, query: Q) -> Result<Q, FilterError> {
        let metadata = self.cache().get_or_derive::<M>()?;

        let mut query = query;
        for field in metadata.fields() {
            let Some(attribute) = state.param(&field.external_param) else {
                continue;
            };

            if attribute.is_multi_valued() {
                tracing::debug!(
                    param = %field.external_param,
                    ignored = attribute.values().len() - 1,
                    "Only the first value of a multi-valued filter is applied"
                );
            }

            query = self.registry.run(
                &field.logical_type,
                attribute.operator(),
                &field.backend_field_name,
                attribute.first_value(),
                query,
                state,
            )?;
        }

        self.registry.paginate(query, state)
    }
}

impl<Q> QueryBuilder<Q>
where
    Q: QueryFilter + QuerySelect,
{
    /// Builder backed by [`SeaOrmAdapter`].
    #[must_use]
    pub fn sea_orm() -> Self {
        Self::for_adapter::<SeaOrmAdapter<Q>>()
    }
}

impl<Q> Clone for QueryBuilder<Q> {
    fn clone(&self) -> Self {
        Self {
            registry: Arc::clone(&self.registry),
            cache: self.cache.clone(),
        }
    }
}

impl<Q> std::fmt::Debug for QueryBuilder<Q> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryBuilder")
            .field("registry", &self.registry)
            .field("shared_cache", &self.cache.is_none())
            .finish_non_exhaustive()
    }
}
