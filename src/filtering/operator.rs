use std::fmt;

/// Separator between a field name and its operator suffix (`title_contains`).
pub const OPERATOR_SEPARATOR: char = '_';

/// Comparison operators recognised in query parameter suffixes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Operator {
    /// `= ?`
    Equal,
    /// `!= ?`
    NotEqual,
    /// `IS NULL`
    IsNull,
    /// `IS NOT NULL`
    IsNotNull,
    /// `LIKE 'value%'`
    StartsWith,
    /// `NOT LIKE 'value%'`
    NotStartsWith,
    /// `LIKE '%value'`
    EndsWith,
    /// `NOT LIKE '%value'`
    NotEndsWith,
    /// `LIKE '%value%'`
    Contains,
    /// `NOT LIKE '%value%'`
    NotContains,
}

impl Operator {
    /// Every operator in suffix matching priority: longest tag first, so a
    /// parameter name resolves the same way on every run.
    pub const ALL: [Self; 10] = [
        Self::NotStartsWith,
        Self::NotEndsWith,
        Self::NotContains,
        Self::IsNotNull,
        Self::StartsWith,
        Self::EndsWith,
        Self::NotEqual,
        Self::Contains,
        Self::IsNull,
        Self::Equal,
    ];

    /// Tag used in parameter names and adapter tables.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Equal => "equal",
            Self::NotEqual => "not-equal",
            Self::IsNull => "is-null",
            Self::IsNotNull => "is-not-null",
            Self::StartsWith => "starts-with",
            Self::NotStartsWith => "not-starts-with",
            Self::EndsWith => "ends-with",
            Self::NotEndsWith => "not-ends-with",
            Self::Contains => "contains",
            Self::NotContains => "not-contains",
        }
    }

    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.tag() == tag)
    }

    /// Split `name` into `(field, operator)` when it ends with `_<tag>`.
    ///
    /// The field part must be non-empty: `_contains` alone is not a filter.
    #[must_use]
    pub fn strip_suffix(name: &str) -> Option<(&str, Self)> {
        Self::ALL.into_iter().find_map(|op| {
            let field = name.strip_suffix(op.tag())?.strip_suffix(OPERATOR_SEPARATOR)?;
            (!field.is_empty()).then_some((field, op))
        })
    }

    /// Operators that never read the value.
    #[must_use]
    pub const fn is_nullary(self) -> bool {
        matches!(self, Self::IsNull | Self::IsNotNull)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}
