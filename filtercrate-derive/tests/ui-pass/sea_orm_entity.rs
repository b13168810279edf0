//! A Sea-ORM entity using every `#[filter]` form
use filtercrate::{FilterModel, FieldMetadataCache, LogicalType};
use sea_orm::entity::prelude::*;

pub mod content {
    use super::*;

    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, FilterModel)]
    #[sea_orm(table_name = "content")]
    pub struct Model {
        #[sea_orm(primary_key)]
        #[filter(kind = "number")]
        pub id: i32,

        #[filter(kind = "string")]
        pub title: String,

        #[filter = "param:body;type:text"]
        pub body: String,

        #[sea_orm(column_name = "click_total")]
        #[filter(param = "clickCount", kind = "number")]
        pub click_count: i64,

        #[filter(skip)]
        pub private_bio: String,

        pub secret: String,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}

fn main() {
    let cache = FieldMetadataCache::new();
    let config = cache.get_or_derive::<content::Model>().unwrap();
    assert_eq!(config.model(), "content");
    assert_eq!(config.len(), 4);

    let clicks = config.get("clickCount").unwrap();
    assert_eq!(clicks.external_param, "clickCount");
    assert_eq!(clicks.backend_field_name, "click_total");
    assert_eq!(clicks.resolved_type(), Some(LogicalType::Number));
}
