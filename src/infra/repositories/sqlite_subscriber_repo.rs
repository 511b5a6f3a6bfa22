use crate::domain::{
    models::subscriber::{PlanTier, Subscriber},
    ports::SubscriberRepository,
};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

pub struct SqliteSubscriberRepo {
    pool: SqlitePool,
}

impl SqliteSubscriberRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SubscriberRepository for SqliteSubscriberRepo {
    async fn create(&self, subscriber: &Subscriber) -> Result<Subscriber, AppError> {
        sqlx::query_as::<_, Subscriber>(
            "INSERT INTO subscribers (id, email, phone, plan, subscription_end, created_at) VALUES (?, ?, ?, ?, ?, ?) RETURNING *"
        )
            .bind(&subscriber.id)
            .bind(&subscriber.email)
            .bind(&subscriber.phone)
            .bind(subscriber.plan)
            .bind(subscriber.subscription_end)
            .bind(subscriber.created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Subscriber>, AppError> {
        sqlx::query_as::<_, Subscriber>(
            "SELECT * FROM subscribers WHERE id = ?",
        )
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list(&self) -> Result<Vec<Subscriber>, AppError> {
        sqlx::query_as::<_, Subscriber>(
            "SELECT * FROM subscribers ORDER BY created_at DESC",
        )
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn update_plan(
        &self,
        id: &str,
        plan: PlanTier,
        subscription_end: Option<DateTime<Utc>>,
    ) -> Result<Subscriber, AppError> {
        // Single statement so the pair of fields commits atomically.
        sqlx::query_as::<_, Subscriber>(
            "UPDATE subscribers SET plan = ?, subscription_end = ? WHERE id = ? RETURNING *"
        )
            .bind(plan)
            .bind(subscription_end)
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }
}
