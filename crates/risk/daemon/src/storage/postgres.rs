//! PostgreSQL risk store
//!
//! Each risk is one row: the aggregate as a JSONB document plus a `version`
//! column. Saves are conditional on that column. Applied transitions are
//! appended to `risk_events` so history survives a restart.

use super::EventLog;
use async_trait::async_trait;
use risk_engine::{NotificationSink, NotifyError, RiskStore, StoreError, StoreResult, WorkflowEvent};
use risk_types::{Risk, RiskId};
use serde_json::Value;
use sqlx::{postgres::PgPoolOptions, postgres::PgRow, PgPool, Row};
use std::time::Duration;

/// PostgreSQL-backed [`RiskStore`]
#[derive(Debug, Clone)]
pub struct PostgresRiskStore {
    pool: PgPool,
}

impl PostgresRiskStore {
    /// Connect to PostgreSQL and initialize schema
    pub async fn new(url: &str, max_connections: u32, connect_timeout_secs: u64) -> StoreResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(Duration::from_secs(connect_timeout_secs))
            .connect(url)
            .await
            .map_err(|e| StoreError::Backend(format!("connect: {}", e)))?;

        let store = Self { pool };
        store.initialize_schema().await?;
        Ok(store)
    }

    async fn initialize_schema(&self) -> StoreResult<()> {
        let statements = [
            r#"
            CREATE TABLE IF NOT EXISTS risks (
                id TEXT PRIMARY KEY,
                status TEXT NOT NULL,
                version BIGINT NOT NULL,
                data JSONB NOT NULL,
                created_at TIMESTAMPTZ NOT NULL,
                updated_at TIMESTAMPTZ NOT NULL
            );
            "#,
            r#"CREATE INDEX IF NOT EXISTS risks_status ON risks(status);"#,
            r#"CREATE INDEX IF NOT EXISTS risks_created_at ON risks(created_at);"#,
            r#"
            CREATE TABLE IF NOT EXISTS risk_events (
                sequence BIGSERIAL PRIMARY KEY,
                risk_id TEXT NOT NULL,
                action TEXT NOT NULL,
                version BIGINT NOT NULL,
                data JSONB NOT NULL,
                occurred_at TIMESTAMPTZ NOT NULL
            );
            "#,
            r#"CREATE INDEX IF NOT EXISTS risk_events_risk_id ON risk_events(risk_id);"#,
        ];

        for stmt in statements {
            sqlx::query(stmt).execute(&self.pool).await.map_err(query_error)?;
        }

        Ok(())
    }

    fn to_json(risk: &Risk) -> StoreResult<Value> {
        serde_json::to_value(risk).map_err(|e| StoreError::Backend(format!("encode: {}", e)))
    }

    fn from_row(row: &PgRow) -> StoreResult<Risk> {
        let data: Value = row.try_get("data").map_err(query_error)?;
        let version: i64 = row.try_get("version").map_err(query_error)?;
        let mut risk: Risk =
            serde_json::from_value(data).map_err(|e| StoreError::Backend(format!("decode: {}", e)))?;
        // the column wins over whatever the document carries
        risk.version = to_version(version)?;
        Ok(risk)
    }

    fn event_to_json(event: &WorkflowEvent) -> StoreResult<Value> {
        serde_json::to_value(event).map_err(|e| StoreError::Backend(format!("encode event: {}", e)))
    }

    fn event_from_row(row: &PgRow) -> StoreResult<WorkflowEvent> {
        let data: Value = row.try_get("data").map_err(query_error)?;
        serde_json::from_value(data).map_err(|e| StoreError::Backend(format!("decode event: {}", e)))
    }

    /// Append one applied transition to the event log
    pub async fn append_event(&self, event: &WorkflowEvent) -> StoreResult<()> {
        let data = Self::event_to_json(event)?;
        sqlx::query(
            r#"
            INSERT INTO risk_events (risk_id, action, version, data, occurred_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(event.risk_id.as_str())
        .bind(event.action.as_str())
        .bind(from_version(event.version)?)
        .bind(data)
        .bind(event.occurred_at)
        .execute(&self.pool)
        .await
        .map_err(query_error)?;
        Ok(())
    }

    async fn current_version(&self, id: &RiskId) -> StoreResult<Option<u64>> {
        let row = sqlx::query("SELECT version FROM risks WHERE id = $1")
            .bind(id.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(query_error)?;

        match row {
            Some(row) => {
                let version: i64 = row.try_get("version").map_err(query_error)?;
                Ok(Some(to_version(version)?))
            }
            None => Ok(None),
        }
    }
}

#[async_trait]
impl RiskStore for PostgresRiskStore {
    async fn get(&self, id: &RiskId) -> StoreResult<Option<Risk>> {
        let row = sqlx::query("SELECT data, version FROM risks WHERE id = $1")
            .bind(id.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(query_error)?;

        row.as_ref().map(Self::from_row).transpose()
    }

    async fn list(&self) -> StoreResult<Vec<Risk>> {
        let rows = sqlx::query("SELECT data, version FROM risks ORDER BY created_at ASC, id ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(query_error)?;

        rows.iter().map(Self::from_row).collect()
    }

    async fn insert(&self, mut risk: Risk) -> StoreResult<Risk> {
        risk.version = 0;
        let data = Self::to_json(&risk)?;

        let result = sqlx::query(
            r#"
            INSERT INTO risks (id, status, version, data, created_at, updated_at)
            VALUES ($1, $2, 0, $3, $4, $5)
            ON CONFLICT (id) DO NOTHING
            "#,
        )
        .bind(risk.id.as_str())
        .bind(risk.status.as_str())
        .bind(data)
        .bind(risk.created_at)
        .bind(risk.updated_at)
        .execute(&self.pool)
        .await
        .map_err(query_error)?;

        if result.rows_affected() == 0 {
            return Err(StoreError::AlreadyExists(risk.id));
        }
        Ok(risk)
    }

    async fn save(&self, mut risk: Risk, expected_version: u64) -> StoreResult<Risk> {
        risk.version = expected_version + 1;
        let data = Self::to_json(&risk)?;

        let result = sqlx::query(
            r#"
            UPDATE risks
            SET status = $3, version = $4, data = $5, updated_at = $6
            WHERE id = $1 AND version = $2
            "#,
        )
        .bind(risk.id.as_str())
        .bind(from_version(expected_version)?)
        .bind(risk.status.as_str())
        .bind(from_version(risk.version)?)
        .bind(data)
        .bind(risk.updated_at)
        .execute(&self.pool)
        .await
        .map_err(query_error)?;

        if result.rows_affected() == 1 {
            return Ok(risk);
        }

        match self.current_version(&risk.id).await? {
            Some(actual) => Err(StoreError::VersionConflict {
                risk_id: risk.id,
                expected: expected_version,
                actual,
            }),
            None => Err(StoreError::NotFound(risk.id)),
        }
    }
}

#[async_trait]
impl EventLog for PostgresRiskStore {
    async fn load_events(&self) -> StoreResult<Vec<WorkflowEvent>> {
        let rows = sqlx::query("SELECT data FROM risk_events ORDER BY sequence ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(query_error)?;

        rows.iter().map(Self::event_from_row).collect()
    }
}

#[async_trait]
impl NotificationSink for PostgresRiskStore {
    async fn notify(&self, event: &WorkflowEvent) -> Result<(), NotifyError> {
        self.append_event(event)
            .await
            .map_err(|e| NotifyError::Delivery(e.to_string()))
    }
}

fn query_error(err: sqlx::Error) -> StoreError {
    StoreError::Backend(format!("query: {}", err))
}

fn to_version(version: i64) -> StoreResult<u64> {
    u64::try_from(version).map_err(|_| StoreError::Backend(format!("negative version {}", version)))
}

fn from_version(version: u64) -> StoreResult<i64> {
    i64::try_from(version).map_err(|_| StoreError::Backend(format!("version overflow {}", version)))
}
