use super::declaration::FieldDeclaration;

/// How a structural field opts into filtering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterAnnotation {
    /// Raw `param:<name>;type:<type>` declaration (or `-`), parsed when the
    /// model's metadata is derived.
    Tag(String),
    /// Declaration already validated, as produced by `#[derive(FilterModel)]`.
    Declared(FieldDeclaration),
    /// Explicitly excluded.
    Disabled,
}

/// One field of a model shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructuralField {
    name: String,
    column: Option<String>,
    annotation: Option<FilterAnnotation>,
}

impl StructuralField {
    /// A field with no filter declaration: never filterable.
    pub fn untagged(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            column: None,
            annotation: None,
        }
    }

    pub fn tagged(name: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            column: None,
            annotation: Some(FilterAnnotation::Tag(tag.into())),
        }
    }

    pub fn declared(name: impl Into<String>, declaration: FieldDeclaration) -> Self {
        Self {
            name: name.into(),
            column: None,
            annotation: Some(FilterAnnotation::Declared(declaration)),
        }
    }

    pub fn disabled(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            column: None,
            annotation: Some(FilterAnnotation::Disabled),
        }
    }

    /// Backend column, when it differs from the field name
    #[must_use]
    pub fn with_column(mut self, column: impl Into<String>) -> Self {
        self.column = Some(column.into());
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn column(&self) -> &str {
        self.column.as_deref().unwrap_or(&self.name)
    }

    #[must_use]
    pub fn annotation(&self) -> Option<&FilterAnnotation> {
        self.annotation.as_ref()
    }
}

/// Structural description of a model: its name and fields in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelDescriptor {
    name: &'static str,
    fields: Vec<StructuralField>,
}

impl ModelDescriptor {
    #[must_use]
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            fields: Vec::new(),
        }
    }

    #[must_use]
    pub fn field(mut self, field: StructuralField) -> Self {
        self.fields.push(field);
        self
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    #[must_use]
    pub fn fields(&self) -> &[StructuralField] {
        &self.fields
    }
}

/// A model whose fields can be filtered from query parameters.
///
/// Usually derived:
///
/// ```rust,ignore
/// #[derive(FilterModel)]
/// pub struct Content {
///     #[filter(kind = "string")]
///     pub title: String,
///     #[filter(param = "clickCount", kind = "number")]
///     pub click_count: i64,
///     #[filter(skip)]
///     pub private_bio: String,
///     pub secret: String,
/// }
/// ```
pub trait FilterModel: 'static {
    fn model_descriptor() -> ModelDescriptor;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_defaults_to_field_name() {
        let field = StructuralField::tagged("title", "type:string");
        assert_eq!(field.column(), "title");
        let field = field.with_column("post_title");
        assert_eq!(field.column(), "post_title");
        assert_eq!(field.name(), "title");
    }

    #[test]
    fn test_descriptor_keeps_declaration_order() {
        let descriptor = ModelDescriptor::new("Content")
            .field(StructuralField::untagged("secret"))
            .field(StructuralField::disabled("private_bio"))
            .field(StructuralField::declared("id", FieldDeclaration::new()));
        let names: Vec<&str> = descriptor.fields().iter().map(StructuralField::name).collect();
        assert_eq!(names, ["secret", "private_bio", "id"]);
        assert_eq!(descriptor.name(), "Content");
    }
}
