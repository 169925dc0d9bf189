use anyhow::Context;
use async_trait::async_trait;
use serde_json::Value;
use sqlx::{postgres::PgPoolOptions, FromRow, PgPool};

use crate::storage::{CreateOutcome, KvEntry, KvKey, KvStore, StoreError};

/// PostgreSQL-backed key-value store over the `kv_entries` table.
#[derive(Clone)]
pub struct PgKv {
    db: PgPool,
}

#[derive(Debug, FromRow)]
struct KvRow {
    key: Vec<String>,
    value: Value,
    versionstamp: i64,
}

impl From<KvRow> for KvEntry {
    fn from(row: KvRow) -> Self {
        Self {
            key: KvKey::new(row.key),
            value: row.value,
            versionstamp: row.versionstamp as u64,
        }
    }
}

impl PgKv {
    pub async fn connect(database_url: &str) -> anyhow::Result<Self> {
        let db = PgPoolOptions::new()
            .max_connections(10)
            .connect(database_url)
            .await
            .context("connect to database")?;

        if let Err(e) = sqlx::migrate!("./migrations").run(&db).await {
            tracing::warn!(error = %e, "migration failed; continuing");
        }

        Ok(Self { db })
    }
}

#[async_trait]
impl KvStore for PgKv {
    async fn get(&self, key: &KvKey) -> Result<Option<KvEntry>, StoreError> {
        let row = sqlx::query_as::<_, KvRow>(
            r#"
            SELECT key, value, versionstamp
            FROM kv_entries
            WHERE key = $1
            "#,
        )
        .bind(key.parts())
        .fetch_optional(&self.db)
        .await?;
        Ok(row.map(KvEntry::from))
    }

    async fn create_if_absent(
        &self,
        key: &KvKey,
        value: Value,
    ) -> Result<CreateOutcome, StoreError> {
        // The primary key makes the conflict check and the insert one statement.
        let inserted: Option<(i64,)> = sqlx::query_as(
            r#"
            INSERT INTO kv_entries (key, value)
            VALUES ($1, $2)
            ON CONFLICT (key) DO NOTHING
            RETURNING versionstamp
            "#,
        )
        .bind(key.parts())
        .bind(value)
        .fetch_optional(&self.db)
        .await?;

        Ok(match inserted {
            Some((v,)) => CreateOutcome::Created {
                versionstamp: v as u64,
            },
            None => CreateOutcome::AlreadyExists,
        })
    }

    async fn scan_prefix(&self, prefix: &KvKey) -> Result<Vec<KvEntry>, StoreError> {
        let rows = sqlx::query_as::<_, KvRow>(
            r#"
            SELECT key, value, versionstamp
            FROM kv_entries
            WHERE key[1:$2] = $1
            ORDER BY key
            "#,
        )
        .bind(prefix.parts())
        .bind(prefix.parts().len() as i32)
        .fetch_all(&self.db)
        .await?;
        Ok(rows.into_iter().map(KvEntry::from).collect())
    }
}
