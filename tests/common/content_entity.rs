use filtercrate::FilterModel;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, FilterModel, Serialize, Deserialize)]
#[sea_orm(table_name = "content")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    #[filter(kind = "number")]
    pub id: i32,

    #[filter(kind = "string")]
    pub title: String,

    // Exposed under a different parameter name
    #[filter = "param:content;type:text"]
    pub body: String,

    #[filter(kind = "bool")]
    pub published: bool,

    #[sea_orm(column_name = "click_total")]
    #[filter(param = "clickCount", kind = "number")]
    pub click_count: i64,

    #[filter]
    pub email: Option<String>,

    #[filter(skip)]
    pub private_bio: String,

    pub secret: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
