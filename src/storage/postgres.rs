//! Persistent entity store implementation using PostgreSQL.
//!
//! Every entity lives in one `entities` table as a JSONB property bag keyed
//! by a `BIGSERIAL` id. Equality queries compare top-level JSONB members.

use crate::storage::store::{
    EntityId, EntityKind, EntityStore, Properties, StoreError, StoreResult, StoredEntity,
    REVIEW_UNIQUE_CONSTRAINT,
};
use async_trait::async_trait;
use serde_json::Value as JsonValue;
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::types::Json;
use sqlx::{PgPool, Postgres, QueryBuilder, Row};

/// Name of the partial unique index backing the one-review-per-(user, business) rule.
pub const REVIEW_UNIQUE_INDEX: &str = REVIEW_UNIQUE_CONSTRAINT;

/// An entity store that uses a PostgreSQL connection pool.
#[derive(Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Connects to the database and makes sure the schema exists.
    pub async fn connect(database_url: &str, max_connections: u32) -> anyhow::Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;
        Self::new_with_pool(pool).await
    }

    pub async fn new_with_pool(pool: PgPool) -> anyhow::Result<Self> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS entities (
                id BIGSERIAL PRIMARY KEY,
                kind TEXT NOT NULL,
                properties JSONB NOT NULL
            )",
        )
        .execute(&pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS entities_kind_idx ON entities (kind)")
            .execute(&pool)
            .await?;

        // Conditional write for review uniqueness: concurrent creates for the
        // same (user_id, business_id) cannot both commit.
        sqlx::query(&format!(
            "CREATE UNIQUE INDEX IF NOT EXISTS {} ON entities \
             ((properties->>'user_id'), (properties->>'business_id')) \
             WHERE kind = 'Review'",
            REVIEW_UNIQUE_INDEX
        ))
        .execute(&pool)
        .await?;

        Ok(Self { pool })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

fn row_to_entity(row: &PgRow) -> StoreResult<StoredEntity> {
    let id: i64 = row.try_get("id")?;
    let Json(properties): Json<Properties> = row.try_get("properties")?;
    Ok(StoredEntity { id, properties })
}

#[async_trait]
impl EntityStore for PostgresStore {
    async fn put(
        &self,
        kind: EntityKind,
        id: Option<EntityId>,
        properties: Properties,
    ) -> StoreResult<EntityId> {
        match id {
            None => {
                let id: i64 = sqlx::query_scalar(
                    "INSERT INTO entities (kind, properties) VALUES ($1, $2) RETURNING id",
                )
                .bind(kind.as_str())
                .bind(Json(properties))
                .fetch_one(&self.pool)
                .await?;
                Ok(id)
            }
            Some(id) => {
                let written: Option<i64> = sqlx::query_scalar(
                    "INSERT INTO entities (id, kind, properties) VALUES ($1, $2, $3)
                     ON CONFLICT (id) DO UPDATE SET properties = EXCLUDED.properties
                     WHERE entities.kind = EXCLUDED.kind
                     RETURNING id",
                )
                .bind(id)
                .bind(kind.as_str())
                .bind(Json(properties))
                .fetch_optional(&self.pool)
                .await?;
                written.ok_or_else(|| {
                    StoreError::Backend(anyhow::anyhow!(
                        "entity {} is stored under a different kind than {}",
                        id,
                        kind
                    ))
                })
            }
        }
    }

    async fn get(&self, kind: EntityKind, id: EntityId) -> StoreResult<Option<StoredEntity>> {
        let row = sqlx::query("SELECT id, properties FROM entities WHERE kind = $1 AND id = $2")
            .bind(kind.as_str())
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(row_to_entity).transpose()
    }

    async fn query_equal(
        &self,
        kind: EntityKind,
        filters: &[(&str, JsonValue)],
    ) -> StoreResult<Vec<StoredEntity>> {
        let mut qb: QueryBuilder<Postgres> =
            QueryBuilder::new("SELECT id, properties FROM entities WHERE kind = ");
        qb.push_bind(kind.as_str());
        for (field, value) in filters {
            qb.push(" AND properties -> ");
            qb.push_bind(field.to_string());
            qb.push(" = ");
            qb.push_bind(Json(value.clone()));
        }
        qb.push(" ORDER BY id");

        let rows = qb.build().fetch_all(&self.pool).await?;
        rows.iter().map(row_to_entity).collect()
    }

    async fn delete(&self, kind: EntityKind, id: EntityId) -> StoreResult<()> {
        sqlx::query("DELETE FROM entities WHERE kind = $1 AND id = $2")
            .bind(kind.as_str())
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn health_check(&self) -> StoreResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
