use crate::errors::MetadataError;
use crate::filtering::Operator;
use std::fmt;

/// Declaration value that excludes a field from filtering
pub const DISABLED_DECLARATION: &str = "-";

/// Logical type assumed when a declaration does not name one
pub const DEFAULT_LOGICAL_TYPE: &str = "default";

/// Abstract field category deciding which operators a field accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LogicalType {
    Default,
    String,
    Text,
    Blob,
    Bool,
    Number,
    Json,
    Date,
    Time,
    DateOnly,
}

const EQUALITY_OPERATORS: &[Operator] = &[
    Operator::Equal,
    Operator::NotEqual,
    Operator::IsNull,
    Operator::IsNotNull,
];

const STRING_OPERATORS: &[Operator] = &[
    Operator::Equal,
    Operator::NotEqual,
    Operator::IsNull,
    Operator::IsNotNull,
    Operator::StartsWith,
    Operator::NotStartsWith,
    Operator::EndsWith,
    Operator::NotEndsWith,
    Operator::Contains,
    Operator::NotContains,
];

impl LogicalType {
    pub const ALL: [Self; 10] = [
        Self::Default,
        Self::String,
        Self::Text,
        Self::Blob,
        Self::Bool,
        Self::Number,
        Self::Json,
        Self::Date,
        Self::Time,
        Self::DateOnly,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::String => "string",
            Self::Text => "text",
            Self::Blob => "blob",
            Self::Bool => "bool",
            Self::Number => "number",
            Self::Json => "json",
            Self::Date => "date",
            Self::Time => "time",
            Self::DateOnly => "dateOnly",
        }
    }

    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|ty| ty.as_str() == name)
    }

    /// The type whose operator set this type shares, if it is an alias.
    #[must_use]
    pub const fn alias_of(self) -> Option<Self> {
        match self {
            Self::Text | Self::Blob => Some(Self::String),
            Self::Json => Some(Self::Default),
            Self::Time | Self::DateOnly => Some(Self::Date),
            Self::Default | Self::String | Self::Bool | Self::Number | Self::Date => None,
        }
    }

    /// Operators registered for a base type; aliases resolve through [`alias_of`](Self::alias_of).
    #[must_use]
    pub const fn base_operators(self) -> &'static [Operator] {
        match self.canonical() {
            Self::String => STRING_OPERATORS,
            _ => EQUALITY_OPERATORS,
        }
    }

    #[must_use]
    pub const fn canonical(self) -> Self {
        match self.alias_of() {
            Some(target) => target,
            None => self,
        }
    }
}

impl fmt::Display for LogicalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Overrides carried by a field's filter declaration.
///
/// Missing entries fall back to the structural field name and the
/// `default` logical type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldDeclaration {
    param: Option<String>,
    logical_type: Option<String>,
}

impl FieldDeclaration {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Expose the field under another query parameter name
    #[must_use]
    pub fn param(mut self, param: impl Into<String>) -> Self {
        self.param = Some(param.into());
        self
    }

    #[must_use]
    pub fn logical_type(mut self, logical_type: LogicalType) -> Self {
        self.logical_type = Some(logical_type.as_str().to_string());
        self
    }

    /// Parse the `param:<name>;type:<type>` mini-syntax.
    ///
    /// Returns `Ok(None)` for the disabled marker `-`. Segments are
    /// order-independent, unknown keys and empty values are ignored, and an
    /// empty declaration accepts every default. Type names are kept as
    /// written: a name with no registered operators makes the field inert.
    ///
    /// # Errors
    ///
    /// [`MetadataError::MalformedSegment`] when a non-empty segment has no `:`.
    pub fn parse(field: &str, raw: &str) -> Result<Option<Self>, MetadataError> {
        let raw = raw.trim();
        if raw == DISABLED_DECLARATION {
            return Ok(None);
        }

        let mut declaration = Self::default();
        for segment in raw.split(';').map(str::trim).filter(|s| !s.is_empty()) {
            let Some((key, value)) = segment.split_once(':') else {
                return Err(MetadataError::MalformedSegment {
                    field: field.to_string(),
                    segment: segment.to_string(),
                });
            };
            let value = value.trim();
            if value.is_empty() {
                continue;
            }
            match key.trim() {
                "param" => declaration.param = Some(value.to_string()),
                "type" => declaration.logical_type = Some(value.to_string()),
                _ => {}
            }
        }

        Ok(Some(declaration))
    }

    #[must_use]
    pub fn param_override(&self) -> Option<&str> {
        self.param.as_deref()
    }

    #[must_use]
    pub fn logical_type_override(&self) -> Option<&str> {
        self.logical_type.as_deref()
    }
}
