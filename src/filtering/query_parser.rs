use super::operator::{OPERATOR_SEPARATOR, Operator};
use super::pagination::{calculate_offset, clamp_limit, clamp_page};
use crate::config::QueryConfig;
use crate::errors::FilterError;

/// Reserved parameter carrying the page size
pub const LIMIT_PARAM: &str = "limit";
/// Reserved parameter carrying the 1-based page number
pub const PAGE_PARAM: &str = "page";

/// One parsed filter: `title_contains=He` becomes `("title", Contains, ["He"])`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterAttribute {
    parameter_name: String,
    operator: Operator,
    values: Vec<String>,
    is_multi_valued: bool,
}

impl FilterAttribute {
    /// Returns `None` when `values` is empty; an attribute always has a value.
    #[must_use]
    pub fn new(parameter_name: impl Into<String>, operator: Operator, values: Vec<String>) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        Some(Self {
            parameter_name: parameter_name.into(),
            operator,
            is_multi_valued: values.len() > 1,
            values,
        })
    }

    /// Field name with the operator suffix removed
    #[must_use]
    pub fn parameter_name(&self) -> &str {
        &self.parameter_name
    }

    #[must_use]
    pub fn operator(&self) -> Operator {
        self.operator
    }

    #[must_use]
    pub fn values(&self) -> &[String] {
        &self.values
    }

    /// The value handed to predicate builders
    #[must_use]
    pub fn first_value(&self) -> &str {
        // `new` guarantees at least one value
        self.values.first().map_or("", String::as_str)
    }

    #[must_use]
    pub fn is_multi_valued(&self) -> bool {
        self.is_multi_valued
    }
}

/// Per-request filter state: parsed attributes plus pagination.
///
/// Owned by the request that created it; the pipeline never shares it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryState {
    filters: Vec<FilterAttribute>,
    limit: i64,
    limit_max: i64,
    page: i64,
    raw_query_string: String,
}

impl QueryState {
    #[must_use]
    pub fn new(limit_max: i64) -> Self {
        Self::from_config(&QueryConfig::with_limit_max(limit_max))
    }

    #[must_use]
    pub fn from_config(config: &QueryConfig) -> Self {
        let limit_max = config.limit_max.max(0);
        Self {
            filters: Vec::new(),
            limit: clamp_limit(config.default_limit, limit_max),
            limit_max,
            page: 0,
            raw_query_string: String::new(),
        }
    }

    /// Parse decoded query parameters (name → values) into this state.
    ///
    /// `limit` and `page` are consumed as pagination. Every other parameter
    /// with at least one value becomes a [`FilterAttribute`] when its name is
    /// a bare field (`id=10`, implicit `equal`) or ends with `_<operator>`;
    /// anything else is dropped silently.
    ///
    /// Attributes keep the iteration order of `params`.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::InvalidOperator`] when a single `limit` value
    /// is not a base-10 integer. Parsing stops at that parameter.
    pub fn parse_params<I, K, V, S>(&mut self, params: I) -> Result<(), FilterError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for (name, values) in params {
            let name = name.as_ref();
            let values: Vec<String> = values.into_iter().map(Into::into).collect();

            match name {
                LIMIT_PARAM => {
                    if let [raw] = values.as_slice() {
                        let requested: i64 = raw
                            .parse()
                            .map_err(|_| FilterError::invalid_operator(raw.as_str()))?;
                        // Out-of-range requests keep the current limit
                        if requested > 0 && requested < self.limit_max {
                            self.limit = requested;
                        }
                    }
                }
                PAGE_PARAM => {
                    if let [raw] = values.as_slice()
                        && let Ok(page) = raw.parse::<i64>()
                    {
                        self.set_page(page);
                    }
                }
                _ => {
                    self.add_param_from_raw(name, values);
                }
            }
        }

        Ok(())
    }

    /// Interpret a single raw parameter, appending a filter attribute when
    /// the name resolves to a field and operator.
    ///
    /// The parameter is echoed into the raw query string even when no
    /// operator matches. Returns whether an attribute was added.
    pub fn add_param_from_raw(&mut self, name: &str, values: Vec<String>) -> bool {
        if values.is_empty() || name == LIMIT_PARAM || name == PAGE_PARAM {
            return false;
        }

        self.add_query_string(name, &values);

        let resolved = if name.contains(OPERATOR_SEPARATOR) {
            Operator::strip_suffix(name)
        } else {
            Some((name, Operator::Equal))
        };

        let Some((field, operator)) = resolved else {
            tracing::debug!(param = %name, "Dropping query parameter without a known operator suffix");
            return false;
        };

        match FilterAttribute::new(field, operator, values) {
            Some(attribute) => {
                self.filters.push(attribute);
                true
            }
            None => false,
        }
    }

    /// Append `name=value` (or `name[]=v1&name[]=v2`) to the raw query string.
    pub fn add_query_string(&mut self, name: &str, values: &[String]) {
        let rendered = render_param(name, values);
        if rendered.is_empty() {
            return;
        }
        if !self.raw_query_string.is_empty() {
            self.raw_query_string.push('&');
        }
        self.raw_query_string.push_str(&rendered);
    }

    /// Re-render the first attribute for `param` in query-string form.
    #[must_use]
    pub fn query_string_for(&self, param: &str) -> Option<String> {
        self.param(param)
            .map(|attribute| render_param(param, attribute.values()))
    }

    /// Parsed attributes in input order
    #[must_use]
    pub fn filters(&self) -> &[FilterAttribute] {
        &self.filters
    }

    /// First attribute targeting field `param`
    #[must_use]
    pub fn param(&self, param: &str) -> Option<&FilterAttribute> {
        self.filters
            .iter()
            .find(|attribute| attribute.parameter_name() == param)
    }

    /// First value of the first attribute targeting field `param`
    #[must_use]
    pub fn param_value(&self, param: &str) -> Option<&str> {
        self.param(param).map(FilterAttribute::first_value)
    }

    /// Echo of every interpreted parameter, for audit and replay
    #[must_use]
    pub fn raw_query_string(&self) -> &str {
        &self.raw_query_string
    }

    #[must_use]
    pub fn limit(&self) -> i64 {
        self.limit
    }

    pub fn set_limit(&mut self, limit: i64) {
        self.limit = clamp_limit(limit, self.limit_max);
    }

    #[must_use]
    pub fn limit_max(&self) -> i64 {
        self.limit_max
    }

    #[must_use]
    pub fn page(&self) -> i64 {
        self.page
    }

    pub fn set_page(&mut self, page: i64) {
        self.page = clamp_page(page);
    }

    /// Rows to skip: `limit * (page - 1)` from page 2 on, otherwise zero.
    #[must_use]
    pub fn offset(&self) -> u64 {
        calculate_offset(self.limit, self.page)
    }
}

fn render_param(name: &str, values: &[String]) -> String {
    match values {
        [] => String::new(),
        [value] => format!("{name}={value}"),
        _ => values
            .iter()
            .map(|value| format!("{name}[]={value}"))
            .collect::<Vec<_>>()
            .join("&"),
    }
}
