/*
 * Responsibility
 * - calculations CRUD
 * - すべての操作は owner (user_id) でスコープする。他人の行は「存在しない」扱い
 * - result は保存時に計算済みの値 (読み出し時に再計算しない)
 */
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, types::Json};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::repos::error::RepoError;
use crate::services::calc::CalculationType;

#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct CalculationRow {
    pub id: Uuid,
    pub user_id: Uuid,

    #[sqlx(rename = "type")]
    pub calc_type: String,

    pub inputs: Json<Vec<f64>>,
    pub result: Option<f64>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewCalculation {
    pub user_id: Uuid,
    pub kind: CalculationType,
    pub inputs: Vec<f64>,
    pub result: f64,
}

#[async_trait]
pub trait CalculationRepo: Send + Sync {
    async fn create(&self, new: NewCalculation) -> Result<CalculationRow, RepoError>;

    /// Newest first.
    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<CalculationRow>, RepoError>;

    async fn get(&self, user_id: Uuid, id: Uuid) -> Result<Option<CalculationRow>, RepoError>;

    async fn update_inputs(
        &self,
        user_id: Uuid,
        id: Uuid,
        inputs: &[f64],
        result: f64,
    ) -> Result<Option<CalculationRow>, RepoError>;

    async fn delete(&self, user_id: Uuid, id: Uuid) -> Result<bool, RepoError>;
}

#[derive(Debug, Clone)]
pub struct PgCalculationRepo {
    pool: PgPool,
}

impl PgCalculationRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CalculationRepo for PgCalculationRepo {
    async fn create(&self, new: NewCalculation) -> Result<CalculationRow, RepoError> {
        let row = sqlx::query_as::<_, CalculationRow>(
            r#"
            INSERT INTO calculations (id, user_id, type, inputs, result)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING
                id, user_id, type, inputs, result, created_at, updated_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(new.user_id)
        .bind(new.kind.as_str())
        .bind(Json(&new.inputs))
        .bind(new.result)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<CalculationRow>, RepoError> {
        let rows = sqlx::query_as::<_, CalculationRow>(
            r#"
            SELECT
                id, user_id, type, inputs, result, created_at, updated_at
            FROM calculations
            WHERE user_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn get(&self, user_id: Uuid, id: Uuid) -> Result<Option<CalculationRow>, RepoError> {
        let row = sqlx::query_as::<_, CalculationRow>(
            r#"
            SELECT
                id, user_id, type, inputs, result, created_at, updated_at
            FROM calculations
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn update_inputs(
        &self,
        user_id: Uuid,
        id: Uuid,
        inputs: &[f64],
        result: f64,
    ) -> Result<Option<CalculationRow>, RepoError> {
        let row = sqlx::query_as::<_, CalculationRow>(
            r#"
            UPDATE calculations
            SET
                inputs = $3,
                result = $4,
                updated_at = now()
            WHERE id = $1 AND user_id = $2
            RETURNING
                id, user_id, type, inputs, result, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(user_id)
        .bind(Json(inputs))
        .bind(result)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn delete(&self, user_id: Uuid, id: Uuid) -> Result<bool, RepoError> {
        let result = sqlx::query(
            r#"
            DELETE FROM calculations
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(id)
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}

/// Process-local store used when `DATABASE_URL` is not set.
///
/// Rows are kept in insertion order; listing walks them backwards.
#[derive(Debug, Default)]
pub struct MemoryCalculationRepo {
    rows: RwLock<Vec<CalculationRow>>,
}

impl MemoryCalculationRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CalculationRepo for MemoryCalculationRepo {
    async fn create(&self, new: NewCalculation) -> Result<CalculationRow, RepoError> {
        let now = Utc::now();
        let row = CalculationRow {
            id: Uuid::new_v4(),
            user_id: new.user_id,
            calc_type: new.kind.as_str().to_string(),
            inputs: Json(new.inputs),
            result: Some(new.result),
            created_at: now,
            updated_at: now,
        };
        self.rows.write().await.push(row.clone());
        Ok(row)
    }

    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<CalculationRow>, RepoError> {
        let rows = self.rows.read().await;
        Ok(rows
            .iter()
            .rev()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn get(&self, user_id: Uuid, id: Uuid) -> Result<Option<CalculationRow>, RepoError> {
        let rows = self.rows.read().await;
        Ok(rows
            .iter()
            .find(|r| r.id == id && r.user_id == user_id)
            .cloned())
    }

    async fn update_inputs(
        &self,
        user_id: Uuid,
        id: Uuid,
        inputs: &[f64],
        result: f64,
    ) -> Result<Option<CalculationRow>, RepoError> {
        let mut rows = self.rows.write().await;
        let Some(row) = rows.iter_mut().find(|r| r.id == id && r.user_id == user_id) else {
            return Ok(None);
        };
        row.inputs = Json(inputs.to_vec());
        row.result = Some(result);
        row.updated_at = Utc::now();
        Ok(Some(row.clone()))
    }

    async fn delete(&self, user_id: Uuid, id: Uuid) -> Result<bool, RepoError> {
        let mut rows = self.rows.write().await;
        let before = rows.len();
        rows.retain(|r| !(r.id == id && r.user_id == user_id));
        Ok(rows.len() < before)
    }
}
