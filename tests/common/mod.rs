#![allow(dead_code)]

use axum::{
    Json, Router,
    extract::{RawQuery, State},
    routing::get,
};
use filtercrate::{FilterError, QueryBuilder, QueryConfig, QueryState};
use sea_orm::{
    ConnectionTrait, Database, DatabaseConnection, DbErr, EntityTrait, IntoActiveModel, QueryOrder,
    Schema, Select,
};

pub mod content_entity;

use content_entity as content;

pub type ContentQuery = Select<content::Entity>;

/// Group a raw query string into `(name, values)` pairs, first occurrence order.
pub fn query_pairs(query: &str) -> Vec<(String, Vec<String>)> {
    let mut pairs: Vec<(String, Vec<String>)> = Vec::new();
    for (name, value) in url::form_urlencoded::parse(query.as_bytes()) {
        match pairs.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, values)) => values.push(value.into_owned()),
            None => pairs.push((name.into_owned(), vec![value.into_owned()])),
        }
    }
    pairs
}

/// Parse `query` into a fresh state capped at `limit_max`.
pub fn parse_query(query: &str, limit_max: i64) -> Result<QueryState, FilterError> {
    let mut state = QueryState::new(limit_max);
    state.parse_params(query_pairs(query))?;
    Ok(state)
}

pub fn sample_rows() -> Vec<content::Model> {
    vec![
        content::Model {
            id: 1,
            title: "Hello world".to_string(),
            body: "Hello there".to_string(),
            published: true,
            click_count: 10,
            email: Some("ada@example.com".to_string()),
            private_bio: "likes engines".to_string(),
            secret: "s1".to_string(),
        },
        content::Model {
            id: 2,
            title: "Help wanted".to_string(),
            body: "Greetings".to_string(),
            published: false,
            click_count: 25,
            email: None,
            private_bio: "likes gardens".to_string(),
            secret: "s2".to_string(),
        },
        content::Model {
            id: 3,
            title: "Goodbye".to_string(),
            body: "He said 100%_done".to_string(),
            published: true,
            click_count: 5,
            email: Some("grace@example.com".to_string()),
            private_bio: "likes compilers".to_string(),
            secret: "s3".to_string(),
        },
    ]
}

/// Route library logs to the test output; filter with `RUST_LOG=filtercrate=debug`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .compact()
        .try_init();
}

pub async fn setup_test_db() -> Result<DatabaseConnection, DbErr> {
    init_tracing();
    let db = Database::connect("sqlite::memory:").await?;

    let backend = db.get_database_backend();
    let schema = Schema::new(backend);
    db.execute(backend.build(&schema.create_table_from_entity(content::Entity)))
        .await?;

    content::Entity::insert_many(sample_rows().into_iter().map(IntoActiveModel::into_active_model))
        .exec(&db)
        .await?;

    Ok(db)
}

#[derive(Clone)]
struct AppState {
    db: DatabaseConnection,
    builder: QueryBuilder<ContentQuery>,
    config: QueryConfig,
}

async fn list_content(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
) -> Result<Json<Vec<content::Model>>, FilterError> {
    let mut filters = QueryState::from_config(&state.config);
    filters.parse_params(query_pairs(query.as_deref().unwrap_or_default()))?;

    let select = content::Entity::find().order_by_asc(content::Column::Id);
    let rows = state
        .builder
        .build::<content::Model>(&filters, select)?
        .all(&state.db)
        .await
        .map_err(|e| FilterError::backend("select", e.to_string()))?;

    Ok(Json(rows))
}

pub fn setup_content_app(db: DatabaseConnection, config: QueryConfig) -> Router {
    let state = AppState {
        db,
        builder: QueryBuilder::sea_orm(),
        config,
    };

    Router::new()
        .route("/content", get(list_content))
        .with_state(state)
}
