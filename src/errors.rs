//! # Error Handling
//!
//! The pipeline has exactly three ways to fail:
//! - [`FilterError::InvalidOperator`]: the `limit` parameter is not a base-10 integer
//! - [`FilterError::ModelMetadata`]: a model descriptor could not be introspected
//! - [`FilterError::Backend`]: a predicate or the pager refused to build
//!
//! Everything else a client can send (unknown parameters, unknown operator
//! suffixes, operators a field's type does not support) is ignored and never
//! reaches the backend query.
//!
//! `FilterError` converts into an axum response. Client mistakes become
//! `400 Bad Request`; internal failures become `500` with a generic message
//! while the details go to `tracing`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use std::fmt;

/// Reasons a model descriptor can not be turned into filter metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetadataError {
    /// A structural field was declared with an empty name.
    EmptyFieldName,
    /// A declaration segment is not of the form `key:value`.
    MalformedSegment { field: String, segment: String },
}

impl fmt::Display for MetadataError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyFieldName => write!(f, "structural field with an empty name"),
            Self::MalformedSegment { field, segment } => write!(
                f,
                "field '{field}': declaration segment '{segment}' is not of the form key:value"
            ),
        }
    }
}

impl std::error::Error for MetadataError {}

/// Error returned by parsing and query building.
#[derive(Debug)]
pub enum FilterError {
    /// The `limit` parameter could not be parsed as an integer.
    InvalidOperator {
        /// The rejected raw value
        value: String,
    },

    /// Filter metadata for a model could not be derived.
    ModelMetadata {
        /// Type name of the model
        model: &'static str,
        source: MetadataError,
    },

    /// A backend predicate or pager failed.
    Backend {
        /// Operator tag or `pager`
        operation: String,
        message: String,
    },
}

impl FilterError {
    pub fn invalid_operator(value: impl Into<String>) -> Self {
        Self::InvalidOperator {
            value: value.into(),
        }
    }

    pub fn backend(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Backend {
            operation: operation.into(),
            message: message.into(),
        }
    }

    /// HTTP status code for this error
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidOperator { .. } => StatusCode::BAD_REQUEST,
            Self::ModelMetadata { .. } | Self::Backend { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to send to a client
    fn user_message(&self) -> String {
        match self {
            Self::InvalidOperator { .. } => self.to_string(),
            Self::ModelMetadata { .. } | Self::Backend { .. } => {
                "Failed to build the requested query".to_string()
            }
        }
    }

    fn log_internal(&self) {
        match self {
            Self::ModelMetadata { model, source } => {
                tracing::error!(model = %model, error = %source, "Filter metadata error");
            }
            Self::Backend { operation, message } => {
                tracing::error!(operation = %operation, details = %message, "Filter backend error");
            }
            Self::InvalidOperator { .. } => {
                tracing::debug!(error = %self, "Rejected query parameters");
            }
        }
    }
}

impl fmt::Display for FilterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidOperator { value } => {
                write!(f, "invalid query operator: limit '{value}' is not an integer")
            }
            Self::ModelMetadata { model, source } => {
                write!(f, "query parser: model parse error for {model}: {source}")
            }
            Self::Backend { operation, message } => {
                write!(f, "backend rejected '{operation}': {message}")
            }
        }
    }
}

impl std::error::Error for FilterError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ModelMetadata { source, .. } => Some(source),
            _ => None,
        }
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

impl IntoResponse for FilterError {
    fn into_response(self) -> Response {
        self.log_internal();
        let body = ErrorResponse {
            error: self.user_message(),
        };
        (self.status_code(), Json(body)).into_response()
    }
}
