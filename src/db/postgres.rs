use async_trait::async_trait;
use serde_json::Value;
use sqlx::PgPool;

use super::Store;
use crate::{
    models::{ActiveNap, Collection, Singleton},
    AppError, AppResult,
};

const SCHEMA: &[&str] = &[
    r#"CREATE TABLE IF NOT EXISTS food_entries (
        id VARCHAR(255) PRIMARY KEY,
        data JSONB NOT NULL,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )"#,
    r#"CREATE TABLE IF NOT EXISTS potty_entries (
        id VARCHAR(255) PRIMARY KEY,
        data JSONB NOT NULL,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )"#,
    r#"CREATE TABLE IF NOT EXISTS sleep_entries (
        id VARCHAR(255) PRIMARY KEY,
        data JSONB NOT NULL,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )"#,
    r#"CREATE TABLE IF NOT EXISTS todo_entries (
        id VARCHAR(255) PRIMARY KEY,
        data JSONB NOT NULL,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )"#,
    r#"CREATE TABLE IF NOT EXISTS training_tasks (
        id INTEGER PRIMARY KEY DEFAULT 1,
        data JSONB NOT NULL,
        updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )"#,
    r#"CREATE TABLE IF NOT EXISTS puppy_info (
        id INTEGER PRIMARY KEY DEFAULT 1,
        data JSONB NOT NULL,
        updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )"#,
    r#"CREATE TABLE IF NOT EXISTS active_nap (
        id VARCHAR(255) PRIMARY KEY,
        start_time TIMESTAMPTZ NOT NULL
    )"#,
];

fn table(collection: Collection) -> &'static str {
    match collection {
        Collection::Food => "food_entries",
        Collection::Potty => "potty_entries",
        Collection::Sleep => "sleep_entries",
        Collection::Todo => "todo_entries",
    }
}

fn list_order(collection: Collection) -> &'static str {
    match collection {
        Collection::Todo => "updated_at DESC",
        _ => "created_at ASC",
    }
}

fn singleton_table(singleton: Singleton) -> &'static str {
    match singleton {
        Singleton::TrainingTasks => "training_tasks",
        Singleton::PuppyInfo => "puppy_info",
    }
}

/// One JSONB row per record.
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Creates missing tables. Existing tables are left untouched.
    pub async fn init_schema(&self) -> AppResult<()> {
        for statement in SCHEMA {
            sqlx::query(statement).execute(&self.pool).await?;
        }
        tracing::info!("Database tables initialized");
        Ok(())
    }
}

#[async_trait]
impl Store for PgStore {
    fn backend(&self) -> &'static str {
        "postgres"
    }

    async fn list(&self, collection: Collection) -> AppResult<Vec<Value>> {
        let sql = format!(
            "SELECT data FROM {} ORDER BY {}",
            table(collection),
            list_order(collection)
        );
        let rows = sqlx::query_scalar::<_, Value>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn upsert(&self, collection: Collection, id: &str, record: Value) -> AppResult<()> {
        let sql = format!(
            r#"
            INSERT INTO {} (id, data) VALUES ($1, $2)
            ON CONFLICT (id) DO UPDATE SET data = EXCLUDED.data, updated_at = NOW()
            "#,
            table(collection)
        );
        sqlx::query(&sql)
            .bind(id)
            .bind(record)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn replace(&self, collection: Collection, id: &str, record: Value) -> AppResult<()> {
        let sql = format!(
            "UPDATE {} SET data = $1, updated_at = NOW() WHERE id = $2",
            table(collection)
        );
        let result = sqlx::query(&sql)
            .bind(record)
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("{} {} not found", collection, id)));
        }
        Ok(())
    }

    async fn remove(&self, collection: Collection, id: &str) -> AppResult<()> {
        let sql = format!("DELETE FROM {} WHERE id = $1", table(collection));
        let result = sqlx::query(&sql).bind(id).execute(&self.pool).await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("{} {} not found", collection, id)));
        }
        Ok(())
    }

    async fn clear(&self, collection: Collection) -> AppResult<u64> {
        let sql = format!("DELETE FROM {}", table(collection));
        let result = sqlx::query(&sql).execute(&self.pool).await?;
        Ok(result.rows_affected())
    }

    async fn load_singleton(&self, singleton: Singleton) -> AppResult<Option<Value>> {
        let sql = format!("SELECT data FROM {} WHERE id = 1", singleton_table(singleton));
        let value = sqlx::query_scalar::<_, Value>(&sql)
            .fetch_optional(&self.pool)
            .await?;
        Ok(value)
    }

    async fn save_singleton(&self, singleton: Singleton, value: Value) -> AppResult<()> {
        let sql = format!(
            r#"
            INSERT INTO {} (id, data) VALUES (1, $1)
            ON CONFLICT (id) DO UPDATE SET data = EXCLUDED.data, updated_at = NOW()
            "#,
            singleton_table(singleton)
        );
        sqlx::query(&sql).bind(value).execute(&self.pool).await?;
        Ok(())
    }

    async fn active_nap(&self) -> AppResult<Option<ActiveNap>> {
        let nap = sqlx::query_as::<_, ActiveNap>(
            "SELECT id, start_time FROM active_nap ORDER BY start_time DESC LIMIT 1",
        )
        .fetch_optional(&self.pool)
        .await?;
        Ok(nap)
    }

    async fn start_nap(&self, nap: &ActiveNap) -> AppResult<()> {
        // Two separate statements: a crash in between leaves no nap running.
        sqlx::query("DELETE FROM active_nap")
            .execute(&self.pool)
            .await?;
        sqlx::query("INSERT INTO active_nap (id, start_time) VALUES ($1, $2)")
            .bind(&nap.id)
            .bind(nap.start_time)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn clear_nap(&self) -> AppResult<Option<ActiveNap>> {
        let removed = sqlx::query_as::<_, ActiveNap>(
            "DELETE FROM active_nap RETURNING id, start_time",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(removed.into_iter().max_by_key(|nap| nap.start_time))
    }

    async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn close(&self) {
        self.pool.close().await;
        tracing::info!("Database pool closed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    async fn connect() -> PgStore {
        let url = std::env::var("DATABASE_URL").unwrap();
        let pool = crate::db::create_pool(&url, false).await.unwrap();
        let store = PgStore::new(pool);
        store.init_schema().await.unwrap();
        store
    }

    #[test]
    fn test_every_collection_has_a_table_in_schema() {
        for collection in Collection::ALL {
            let name = table(collection);
            assert!(SCHEMA.iter().any(|sql| sql.contains(name)), "{}", name);
        }
    }

    // Requires a disposable Postgres database in DATABASE_URL.
    #[tokio::test]
    #[ignore]
    async fn test_missing_ids_are_not_found() {
        let store = connect().await;
        let id = uuid::Uuid::new_v4().to_string();

        let replaced = store
            .replace(Collection::Potty, &id, json!({ "id": id }))
            .await;
        assert!(matches!(replaced, Err(AppError::NotFound(_))));

        let removed = store.remove(Collection::Potty, &id).await;
        assert!(matches!(removed, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    #[ignore]
    async fn test_nap_start_replaces() {
        let store = connect().await;

        store.start_nap(&ActiveNap::start_now()).await.unwrap();
        let second = ActiveNap::start_now();
        store.start_nap(&second).await.unwrap();

        assert_eq!(store.active_nap().await.unwrap().map(|n| n.id), Some(second.id));
        assert!(store.clear_nap().await.unwrap().is_some());
        assert!(store.active_nap().await.unwrap().is_none());
    }
}
