use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::error::StorageResult;
use crate::filter::{DogFilter, Predicate};
use crate::model::{Dog, SortDirection};
use crate::pagination::DogSearchPagination;
use crate::storage::DogStorage;

#[derive(Debug, sqlx::FromRow)]
struct DogRow {
    id: String,
    breed: String,
    name: String,
    age: i32,
    zip_code: String,
    image_link: String,
}

impl From<DogRow> for Dog {
    fn from(row: DogRow) -> Self {
        Dog {
            id: row.id,
            breed: row.breed,
            name: row.name,
            age: u32::try_from(row.age).unwrap_or(0),
            zip_code: row.zip_code,
            image_link: row.image_link,
        }
    }
}

fn age_param(age: u32) -> i32 {
    i32::try_from(age).unwrap_or(i32::MAX)
}

/// Appends the filter as a `WHERE` clause with bound parameters
fn push_filter(builder: &mut QueryBuilder<'_, Postgres>, filter: &DogFilter) {
    for (position, predicate) in filter.predicates().iter().enumerate() {
        builder.push(if position == 0 { " WHERE " } else { " AND " });
        match predicate {
            Predicate::BreedIn(breeds) => {
                builder.push("breed = ANY(").push_bind(breeds.clone()).push(")");
            }
            Predicate::ZipCodeIn(zip_codes) => {
                builder.push("zip_code = ANY(").push_bind(zip_codes.clone()).push(")");
            }
            Predicate::AgeAtLeast(min) => {
                builder.push("age >= ").push_bind(age_param(*min));
            }
            Predicate::AgeAtMost(max) => {
                builder.push("age <= ").push_bind(age_param(*max));
            }
        }
    }
}

/// Record store backed by the `dog` table
#[derive(Debug, Clone)]
pub struct PgDogStorage {
    pool: PgPool,
}

impl PgDogStorage {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl DogStorage for PgDogStorage {
    async fn find_matching(
        &self,
        filter: &DogFilter,
        page: &DogSearchPagination,
    ) -> StorageResult<(Vec<String>, u64)> {
        let mut count = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM dog");
        push_filter(&mut count, filter);
        let total: i64 = count.build_query_scalar().fetch_one(&self.pool).await?;

        let sort = page.sort();
        let direction = match sort.direction {
            SortDirection::Asc => " ASC",
            SortDirection::Desc => " DESC",
        };
        let mut select = QueryBuilder::<Postgres>::new("SELECT id FROM dog");
        push_filter(&mut select, filter);
        select
            .push(" ORDER BY ")
            .push(sort.field.column())
            .push(direction)
            .push(", id LIMIT ")
            .push_bind(i64::from(page.page_size()))
            .push(" OFFSET ")
            .push_bind(i64::try_from(page.offset()).unwrap_or(i64::MAX));
        let ids: Vec<String> = select.build_query_scalar().fetch_all(&self.pool).await?;

        Ok((ids, u64::try_from(total).unwrap_or(0)))
    }

    async fn find_by_ids(&self, ids: &[String]) -> StorageResult<Vec<Dog>> {
        let rows: Vec<DogRow> = sqlx::query_as(
            "SELECT id, breed, name, age, zip_code, image_link FROM dog WHERE id = ANY($1)",
        )
        .bind(ids.to_vec())
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(Dog::from).collect())
    }

    async fn distinct_breeds(&self) -> StorageResult<Vec<String>> {
        let breeds = sqlx::query_scalar("SELECT DISTINCT breed FROM dog ORDER BY breed")
            .fetch_all(&self.pool)
            .await?;
        Ok(breeds)
    }
}
