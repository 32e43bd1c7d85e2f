//! PostgreSQL storage implementation with connection pooling

use std::fmt::Debug;
use std::marker::PhantomData;

use async_trait::async_trait;
use serde_json::{Map, Value};
use sqlx::postgres::{PgPool, PgPoolOptions, PgRow};
use sqlx::Row;

use crate::domain::storage::{reject_persisted, require_id, Storage, StorageEntity};
use crate::domain::DomainError;

/// PostgreSQL storage configuration
#[derive(Debug, Clone)]
pub struct PostgresConfig {
    /// Database connection URL
    pub url: String,
    /// Maximum number of connections in the pool
    pub max_connections: u32,
    /// Minimum number of connections to maintain
    pub min_connections: u32,
    /// Connection timeout in seconds
    pub connect_timeout_secs: u64,
    /// Idle timeout in seconds
    pub idle_timeout_secs: u64,
}

impl Default for PostgresConfig {
    fn default() -> Self {
        Self {
            url: "postgres://localhost/team_registry".to_string(),
            max_connections: 10,
            min_connections: 1,
            connect_timeout_secs: 30,
            idle_timeout_secs: 600,
        }
    }
}

impl PostgresConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    pub fn with_max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    pub fn with_min_connections(mut self, min: u32) -> Self {
        self.min_connections = min;
        self
    }

    pub fn with_connect_timeout(mut self, secs: u64) -> Self {
        self.connect_timeout_secs = secs;
        self
    }

    pub fn with_idle_timeout(mut self, secs: u64) -> Self {
        self.idle_timeout_secs = secs;
        self
    }
}

/// PostgreSQL storage implementation with connection pooling
///
/// Rows live in the entity's own table: a `BIGSERIAL` id handed out by the database and
/// a JSONB document holding every other field.
pub struct PostgresStorage<E>
where
    E: StorageEntity,
{
    pool: PgPool,
    table: String,
    _phantom: PhantomData<E>,
}

impl<E> Debug for PostgresStorage<E>
where
    E: StorageEntity,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PostgresStorage")
            .field("table", &self.table)
            .finish()
    }
}

impl<E> PostgresStorage<E>
where
    E: StorageEntity,
{
    /// Creates a new PostgreSQL storage over the entity's table
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            table: quote_identifier(E::TABLE_NAME),
            _phantom: PhantomData,
        }
    }

    /// Creates a new PostgreSQL storage with connection pooling
    pub async fn connect(config: &PostgresConfig) -> Result<Self, DomainError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(std::time::Duration::from_secs(config.connect_timeout_secs))
            .idle_timeout(std::time::Duration::from_secs(config.idle_timeout_secs))
            .connect(&config.url)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to connect to PostgreSQL: {}", e)))?;

        Ok(Self::new(pool))
    }

    /// Ensures the storage table exists
    pub async fn ensure_table(&self) -> Result<(), DomainError> {
        let query = format!(
            r#"
            CREATE TABLE IF NOT EXISTS {} (
                id BIGSERIAL PRIMARY KEY,
                data JSONB NOT NULL,
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
            )
            "#,
            self.table
        );

        sqlx::query(&query)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to create table: {}", e)))?;

        Ok(())
    }
}

/// Double-quote a table name so mixed case like `Teams` survives
fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Field document stored in the `data` column; the id lives in its own column
fn encode_document<E: StorageEntity>(entity: &E) -> Value {
    let mut fields = entity.fields();
    fields.remove("id");
    Value::Object(fields)
}

fn decode_row<E: StorageEntity>(row: &PgRow) -> Result<E, DomainError> {
    let id: i64 = try_column(row, "id")?;
    let data: Value = try_column(row, "data")?;
    decode_document(id, data)
}

/// Rebuild an entity from its stored document, filling omitted fields from `E::defaults()`
fn decode_document<E: StorageEntity>(id: i64, data: Value) -> Result<E, DomainError> {
    let mut document: Map<String, Value> = match data {
        Value::Object(map) => map,
        other => {
            return Err(DomainError::storage(format!(
                "Row {} holds a non-object document: {}",
                id, other
            )));
        }
    };

    for (key, value) in E::defaults() {
        document.entry(key).or_insert(value);
    }
    document.insert("id".to_string(), Value::from(id));

    serde_json::from_value(Value::Object(document))
        .map_err(|e| DomainError::storage(format!("Failed to deserialize entity {}: {}", id, e)))
}

fn try_column<'r, T>(row: &'r PgRow, column: &str) -> Result<T, DomainError>
where
    T: sqlx::Decode<'r, sqlx::Postgres> + sqlx::Type<sqlx::Postgres>,
{
    row.try_get(column)
        .map_err(|e| DomainError::storage(format!("Failed to read column '{}': {}", column, e)))
}

#[async_trait]
impl<E> Storage<E> for PostgresStorage<E>
where
    E: StorageEntity + 'static,
{
    async fn get(&self, id: i64) -> Result<Option<E>, DomainError> {
        let query = format!("SELECT id, data FROM {} WHERE id = $1", self.table);

        let result = sqlx::query(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to get entity: {}", e)))?;

        result.as_ref().map(decode_row::<E>).transpose()
    }

    async fn list(&self) -> Result<Vec<E>, DomainError> {
        let query = format!("SELECT id, data FROM {} ORDER BY id", self.table);

        let rows = sqlx::query(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to list entities: {}", e)))?;

        rows.iter().map(decode_row::<E>).collect()
    }

    async fn insert(&self, mut entity: E) -> Result<E, DomainError> {
        reject_persisted(&entity)?;

        let query = format!(
            "INSERT INTO {} (data) VALUES ($1) RETURNING id",
            self.table
        );

        let row = sqlx::query(&query)
            .bind(encode_document(&entity))
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to insert entity: {}", e)))?;

        entity.assign_id(try_column(&row, "id")?)?;
        Ok(entity)
    }

    async fn update(&self, entity: E) -> Result<E, DomainError> {
        let id = require_id(&entity)?;

        let query = format!(
            r#"
            UPDATE {}
            SET data = $2, updated_at = NOW()
            WHERE id = $1
            "#,
            self.table
        );

        let result = sqlx::query(&query)
            .bind(id)
            .bind(encode_document(&entity))
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to update entity: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found(format!(
                "Entity {} in '{}' not found",
                id,
                E::TABLE_NAME
            )));
        }

        Ok(entity)
    }

    async fn delete(&self, id: i64) -> Result<bool, DomainError> {
        let query = format!("DELETE FROM {} WHERE id = $1", self.table);

        let result = sqlx::query(&query)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to delete entity: {}", e)))?;

        Ok(result.rows_affected() > 0)
    }

    async fn count(&self) -> Result<usize, DomainError> {
        let query = format!("SELECT COUNT(*) AS count FROM {}", self.table);

        let row = sqlx::query(&query)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to count entities: {}", e)))?;

        let count: i64 = try_column(&row, "count")?;
        Ok(count as usize)
    }

    async fn exists(&self, id: i64) -> Result<bool, DomainError> {
        let query = format!(
            "SELECT EXISTS(SELECT 1 FROM {} WHERE id = $1) AS exists",
            self.table
        );

        let row = sqlx::query(&query)
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to check existence: {}", e)))?;

        try_column(&row, "exists")
    }
}
