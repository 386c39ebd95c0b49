//! Schema setup and teardown for the Postgres record store.
//!
//! Installs the `dog` table together with the statement-level trigger that
//! publishes ingestion notifications on [`DEFAULT_INGESTION_CHANNEL`](crate::DEFAULT_INGESTION_CHANNEL).

use sqlx::PgPool;

/// Create the `dog` table, its indexes and the `notify_dog_ingestion()` trigger
///
/// # Example
///
/// ```rust,no_run
/// use sqlx::PgPool;
/// use dog_search::init_dog_schema;
///
/// # async fn example(pool: &PgPool) -> Result<(), Box<dyn std::error::Error>> {
/// init_dog_schema(pool).await?;
/// # Ok(())
/// # }
/// ```
pub async fn init_dog_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    const SQL: &str = include_str!("../sql/dog_schema.sql");
    sqlx::raw_sql(SQL).execute(pool).await?;
    Ok(())
}

/// Drop the trigger, its function and the `dog` table
pub async fn cleanup_dog_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    const SQL: &str = include_str!("../cleanup/cleanup_dog_schema.sql");
    sqlx::raw_sql(SQL).execute(pool).await?;
    Ok(())
}
