/*!
# Field Metadata Cache

Derives the filterable fields of a model once per model type and keeps the
result for the life of the process.

The check-and-populate path runs under a lock, so concurrent first use of a
model derives its metadata exactly once. Applications that want every model
resolved before serving traffic call [`FieldMetadataCache::register`] (or
[`register_filter_models!`](crate::register_filter_models)) at startup.
*/

use super::declaration::{DEFAULT_LOGICAL_TYPE, FieldDeclaration, LogicalType};
use super::descriptor::{FilterAnnotation, FilterModel, ModelDescriptor};
use crate::errors::{FilterError, MetadataError};
use indexmap::IndexMap;
use std::any::TypeId;
use std::collections::HashMap;
use std::sync::{Arc, LazyLock, PoisonError, RwLock};

static GLOBAL_CACHE: LazyLock<FieldMetadataCache> = LazyLock::new(FieldMetadataCache::new);

/// Filter configuration of one model field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldFilterConfig {
    /// Query parameter name clients use
    pub external_param: String,
    /// Logical type name as declared (`default` when omitted)
    pub logical_type: String,
    /// Column the backend filters on
    pub backend_field_name: String,
}

impl FieldFilterConfig {
    /// The declared type, if it names a known logical type
    #[must_use]
    pub fn resolved_type(&self) -> Option<LogicalType> {
        LogicalType::from_name(&self.logical_type)
    }
}

/// Filterable fields of one model, keyed by external parameter name, in
/// declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelFilterConfig {
    model: &'static str,
    fields: IndexMap<String, FieldFilterConfig>,
}

impl ModelFilterConfig {
    #[must_use]
    pub fn model(&self) -> &'static str {
        self.model
    }

    pub fn fields(&self) -> impl Iterator<Item = &FieldFilterConfig> {
        self.fields.values()
    }

    #[must_use]
    pub fn get(&self, external_param: &str) -> Option<&FieldFilterConfig> {
        self.fields.get(external_param)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Extract the filterable fields from a model descriptor.
///
/// Fields without a declaration and fields declared `-` are skipped. Two
/// fields exposing the same parameter name: the later one wins and keeps
/// the earlier one's position.
///
/// # Errors
///
/// Returns a [`MetadataError`] for an empty field name or a malformed
/// declaration segment.
pub fn derive_model_config(descriptor: &ModelDescriptor) -> Result<ModelFilterConfig, MetadataError> {
    let mut fields = IndexMap::new();

    for field in descriptor.fields() {
        if field.name().is_empty() {
            return Err(MetadataError::EmptyFieldName);
        }

        let declaration = match field.annotation() {
            None | Some(FilterAnnotation::Disabled) => continue,
            Some(FilterAnnotation::Declared(declaration)) => declaration.clone(),
            Some(FilterAnnotation::Tag(tag)) => match FieldDeclaration::parse(field.name(), tag)? {
                Some(declaration) => declaration,
                None => continue,
            },
        };

        let config = FieldFilterConfig {
            external_param: declaration
                .param_override()
                .unwrap_or(field.name())
                .to_string(),
            logical_type: declaration
                .logical_type_override()
                .unwrap_or(DEFAULT_LOGICAL_TYPE)
                .to_string(),
            backend_field_name: field.column().to_string(),
        };

        if config.resolved_type().is_none() {
            tracing::debug!(
                model = descriptor.name(),
                field = field.name(),
                logical_type = %config.logical_type,
                "Field declares an unregistered logical type and will never be filtered"
            );
        }

        fields.insert(config.external_param.clone(), config);
    }

    Ok(ModelFilterConfig {
        model: descriptor.name(),
        fields,
    })
}

/// Process-wide memo of model filter metadata, keyed by model type.
///
/// Entries are never evicted or recomputed.
#[derive(Debug, Default)]
pub struct FieldMetadataCache {
    models: RwLock<HashMap<TypeId, Arc<ModelFilterConfig>>>,
}

impl FieldMetadataCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The cache shared by every [`QueryBuilder`](crate::QueryBuilder) that
    /// does not bring its own.
    #[must_use]
    pub fn global() -> &'static Self {
        &GLOBAL_CACHE
    }

    /// Metadata for `M`, derived on first request.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::ModelMetadata`] if the descriptor of `M` can
    /// not be introspected. Nothing is cached in that case.
    pub fn get_or_derive<M: FilterModel>(&self) -> Result<Arc<ModelFilterConfig>, FilterError> {
        let key = TypeId::of::<M>();

        if let Some(config) = self
            .models
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&key)
        {
            return Ok(Arc::clone(config));
        }

        let mut models = self.models.write().unwrap_or_else(PoisonError::into_inner);
        // Another caller may have populated the entry between the two locks
        if let Some(config) = models.get(&key) {
            return Ok(Arc::clone(config));
        }

        let descriptor = M::model_descriptor();
        let config = derive_model_config(&descriptor).map_err(|source| {
            FilterError::ModelMetadata {
                model: descriptor.name(),
                source,
            }
        })?;
        tracing::debug!(
            model = descriptor.name(),
            fields = config.len(),
            "Cached filter metadata"
        );

        let config = Arc::new(config);
        models.insert(key, Arc::clone(&config));
        Ok(config)
    }

    /// Resolve `M` ahead of time.
    ///
    /// # Errors
    ///
    /// Same as [`get_or_derive`](Self::get_or_derive).
    pub fn register<M: FilterModel>(&self) -> Result<(), FilterError> {
        self.get_or_derive::<M>().map(|_| ())
    }

    #[must_use]
    pub fn contains<M: FilterModel>(&self) -> bool {
        self.models
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(&TypeId::of::<M>())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.models
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Precompute filter metadata for models in the global cache.
///
/// Usage: `register_filter_models!(Content, Comment)?;`
#[macro_export]
macro_rules! register_filter_models {
    ($($model_type:ty),+ $(,)?) => {
        (|| -> ::std::result::Result<(), $crate::FilterError> {
            $(
                $crate::FieldMetadataCache::global().register::<$model_type>()?;
            )+
            Ok(())
        })()
    };
}
