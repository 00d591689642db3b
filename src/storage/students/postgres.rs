//! Student collection stored as JSONB documents in PostgreSQL.
//!
//! Layout: `doc_id BIGSERIAL` (insertion order, never exposed), `roll_number BIGINT`
//! and `document JSONB` holding `{name, age, address}`.

use super::store::StudentStore;
use crate::domain::student::{Student, StudentFilter, StudentPatch};
use crate::infra::config::Config;
use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use serde_json::Value as JsonValue;
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Postgres, QueryBuilder, Row};
use std::time::Duration;

#[derive(Clone)]
pub struct PostgresStudentStore {
    pool: PgPool,
    table: String,
}

impl PostgresStudentStore {
    /// Opens a pool from `config` and makes sure the collection table exists.
    pub async fn connect(config: &Config) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(config.db_max_connections)
            .acquire_timeout(Duration::from_secs(config.db_acquire_timeout_secs))
            .connect(&config.database_url)
            .await
            .context("Failed to connect to the student database")?;

        let store = Self::new(pool, &config.students_table)?;
        store.ensure_collection().await?;
        Ok(store)
    }

    pub fn new(pool: PgPool, table: &str) -> Result<Self> {
        if !validate_ident(table) {
            bail!("Invalid students table name '{}'", table);
        }
        Ok(Self {
            pool,
            table: table.to_string(),
        })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub async fn ensure_collection(&self) -> Result<()> {
        sqlx::query(&format!(
            "CREATE TABLE IF NOT EXISTS {t} (
                doc_id BIGSERIAL PRIMARY KEY,
                roll_number BIGINT NOT NULL,
                document JSONB NOT NULL
            )",
            t = self.table
        ))
        .execute(&self.pool)
        .await?;

        sqlx::query(&format!(
            "CREATE INDEX IF NOT EXISTS {t}_roll_number_idx ON {t} (roll_number)",
            t = self.table
        ))
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Whether the collection table is present in the current schema.
    pub async fn collection_exists(&self) -> Result<bool> {
        let row = sqlx::query("SELECT to_regclass($1) IS NOT NULL AS present")
            .bind(&self.table)
            .fetch_one(&self.pool)
            .await?;
        Ok(row.try_get("present")?)
    }

    /// Drops every document. Used by tests.
    pub async fn clear(&self) -> Result<()> {
        sqlx::query(&format!("TRUNCATE TABLE {}", self.table))
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    fn first_match_sql(&self) -> String {
        format!(
            "SELECT doc_id FROM {} WHERE roll_number = $1 ORDER BY doc_id LIMIT 1",
            self.table
        )
    }
}

fn decode_document(row: &sqlx::postgres::PgRow) -> Result<Student> {
    let document: JsonValue = row.try_get("document")?;
    serde_json::from_value(document).context("Stored student document is malformed")
}

/// Accepts plain SQL identifiers only; the table name is interpolated into queries.
fn validate_ident(ident: &str) -> bool {
    let mut chars = ident.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[async_trait]
impl StudentStore for PostgresStudentStore {
    fn backend_name(&self) -> &'static str {
        "postgres"
    }

    async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn count(&self) -> Result<u64> {
        let row = sqlx::query(&format!("SELECT COUNT(*) AS n FROM {}", self.table))
            .fetch_one(&self.pool)
            .await?;
        let n: i64 = row.try_get("n")?;
        Ok(n as u64)
    }

    async fn insert(&self, roll_number: i64, student: &Student) -> Result<()> {
        let document = serde_json::to_value(student)?;
        sqlx::query(&format!(
            "INSERT INTO {} (roll_number, document) VALUES ($1, $2)",
            self.table
        ))
        .bind(roll_number)
        .bind(document)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find(&self, filter: &StudentFilter) -> Result<Vec<Student>> {
        let mut qb: QueryBuilder<Postgres> =
            QueryBuilder::new(format!("SELECT document FROM {} WHERE TRUE", self.table));
        if let Some(country) = filter.country.as_deref() {
            qb.push(" AND lower(document->'address'->>'country') = lower(");
            qb.push_bind(country.to_string());
            qb.push(")");
        }
        if let Some(min_age) = filter.min_age {
            qb.push(" AND (document->>'age')::bigint >= ");
            qb.push_bind(min_age);
        }
        qb.push(" ORDER BY doc_id");

        let rows = qb.build().fetch_all(&self.pool).await?;
        rows.iter().map(decode_document).collect()
    }

    async fn find_one(&self, roll_number: i64) -> Result<Option<Student>> {
        let row = sqlx::query(&format!(
            "SELECT document FROM {} WHERE roll_number = $1 ORDER BY doc_id LIMIT 1",
            self.table
        ))
        .bind(roll_number)
        .fetch_optional(&self.pool)
        .await?;
        row.as_ref().map(decode_document).transpose()
    }

    async fn update_one(&self, roll_number: i64, patch: &StudentPatch) -> Result<u64> {
        if patch.is_empty() {
            return Ok(0);
        }
        let fields = JsonValue::Object(patch.to_document_fields());
        // `||` is a shallow merge, so only the supplied top-level keys are replaced.
        let result = sqlx::query(&format!(
            "UPDATE {t} SET document = document || $2
             WHERE doc_id = ({first}) AND document <> document || $2",
            t = self.table,
            first = self.first_match_sql()
        ))
        .bind(roll_number)
        .bind(fields)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected())
    }

    async fn delete_one(&self, roll_number: i64) -> Result<u64> {
        let result = sqlx::query(&format!(
            "DELETE FROM {t} WHERE doc_id = ({first})",
            t = self.table,
            first = self.first_match_sql()
        ))
        .bind(roll_number)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected())
    }
}
