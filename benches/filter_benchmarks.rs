/*!
# Filter Benchmarks

Cost of turning a query string into a Sea-ORM select: parameter parsing,
metadata lookup and predicate application. No database is involved.

## Usage

```bash
# Run all benchmarks
cargo bench --bench filter_benchmarks

# Run a single group
cargo bench --bench filter_benchmarks -- "Query Building"

# Quick benchmark with fewer samples
cargo bench --bench filter_benchmarks -- --quick
```

HTML reports are generated in `target/criterion/report/index.html`.
*/

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use filtercrate::{FilterModel, QueryBuilder, QueryState};
use sea_orm::entity::prelude::*;
use sea_orm::{DbBackend, QueryTrait, Select};
use std::hint::black_box;
use std::time::Duration;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, FilterModel)]
#[sea_orm(table_name = "benchmark_posts")]
pub struct Model {
    #[sea_orm(primary_key)]
    #[filter(kind = "number")]
    pub id: i32,

    #[filter(kind = "string")]
    pub title: String,

    #[sea_orm(column_type = "Text")]
    #[filter(param = "content", kind = "text")]
    pub body: String,

    #[filter(kind = "bool")]
    pub published: bool,

    #[filter(param = "viewCount", kind = "number")]
    pub view_count: i64,

    #[filter(kind = "string")]
    pub author: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

const QUERIES: &[(&str, &str)] = &[
    ("empty", ""),
    ("single_equal", "id=42"),
    ("string_ops", "title_starts-with=Hello&content_not-contains=draft&author_is-not-null=1"),
    (
        "noisy",
        "id=1&title_contains=a&viewCount_not-equal=3&published=true&unknown=1&title_like=x&utm_source=mail&limit=25&page=4",
    ),
];

fn pairs(query: &str) -> Vec<(String, Vec<String>)> {
    let mut grouped: Vec<(String, Vec<String>)> = Vec::new();
    for (name, value) in url::form_urlencoded::parse(query.as_bytes()) {
        match grouped.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, values)) => values.push(value.into_owned()),
            None => grouped.push((name.into_owned(), vec![value.into_owned()])),
        }
    }
    grouped
}

fn bench_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("Query Parsing");

    for (name, query) in QUERIES {
        let params = pairs(query);
        group.bench_with_input(BenchmarkId::new("parse_params", name), &params, |b, params| {
            b.iter(|| {
                let mut state = QueryState::new(100);
                state.parse_params(black_box(params.clone())).unwrap();
                state
            });
        });
    }

    group.finish();
}

fn bench_building(c: &mut Criterion) {
    let builder = QueryBuilder::<Select<Entity>>::sea_orm();
    // Warm the metadata cache so only the steady state is measured
    builder.cache().register::<Model>().unwrap();

    let mut group = c.benchmark_group("Query Building");

    for (name, query) in QUERIES {
        let mut state = QueryState::new(100);
        state.parse_params(pairs(query)).unwrap();

        group.bench_with_input(BenchmarkId::new("build", name), &state, |b, state| {
            b.iter(|| {
                builder
                    .build::<Model>(black_box(state), Entity::find())
                    .unwrap()
            });
        });

        group.bench_with_input(BenchmarkId::new("build_and_render", name), &state, |b, state| {
            b.iter(|| {
                builder
                    .build::<Model>(black_box(state), Entity::find())
                    .unwrap()
                    .build(DbBackend::Postgres)
            });
        });
    }

    group.finish();
}

fn configure_criterion() -> Criterion {
    Criterion::default()
        .sample_size(50)
        .measurement_time(Duration::from_secs(5))
        .warm_up_time(Duration::from_secs(1))
}

criterion_group! {
    name = benches;
    config = configure_criterion();
    targets = bench_parsing, bench_building
}
criterion_main!(benches);
