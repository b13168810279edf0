//! The derive works on plain structs and generic structs
use filtercrate::{FilterModel, StructuralField};

#[derive(FilterModel)]
pub struct Article {
    #[filter]
    pub slug: String,
    #[filter(kind = "dateOnly", column = "published_on")]
    pub published: String,
    pub r#type: String,
}

#[derive(FilterModel)]
pub struct Wrapper<T: 'static> {
    #[filter(kind = "json")]
    pub payload: T,
}

fn main() {
    let descriptor = Article::model_descriptor();
    assert_eq!(descriptor.name(), "Article");
    let fields: Vec<&StructuralField> = descriptor.fields().iter().collect();
    assert_eq!(fields.len(), 3);
    assert_eq!(fields[1].column(), "published_on");
    assert_eq!(fields[2].name(), "type");
    assert!(fields[2].annotation().is_none());

    assert_eq!(Wrapper::<u8>::model_descriptor().fields().len(), 1);
}
