use crate::domain::{models::property::Property, ports::PropertyRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;

pub struct SqlitePropertyRepo {
    pool: SqlitePool,
}

impl SqlitePropertyRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PropertyRepository for SqlitePropertyRepo {
    async fn create(&self, property: &Property) -> Result<Property, AppError> {
        sqlx::query_as::<_, Property>(
            "INSERT INTO properties (id, owner_id, name, address, created_at) VALUES (?, ?, ?, ?, ?) RETURNING *"
        )
            .bind(&property.id)
            .bind(&property.owner_id)
            .bind(&property.name)
            .bind(&property.address)
            .bind(property.created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_id(&self, owner_id: &str, id: &str) -> Result<Option<Property>, AppError> {
        sqlx::query_as::<_, Property>(
            "SELECT * FROM properties WHERE id = ? AND owner_id = ?",
        )
            .bind(id)
            .bind(owner_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_by_owner(&self, owner_id: &str) -> Result<Vec<Property>, AppError> {
        sqlx::query_as::<_, Property>(
            "SELECT * FROM properties WHERE owner_id = ? ORDER BY created_at ASC",
        )
            .bind(owner_id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn count_by_owner(&self, owner_id: &str) -> Result<i64, AppError> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM properties WHERE owner_id = ?",
        )
            .bind(owner_id)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn update(&self, property: &Property) -> Result<Property, AppError> {
        sqlx::query_as::<_, Property>(
            "UPDATE properties SET name = ?, address = ? WHERE id = ? AND owner_id = ? RETURNING *"
        )
            .bind(&property.name)
            .bind(&property.address)
            .bind(&property.id)
            .bind(&property.owner_id)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn delete(&self, owner_id: &str, id: &str) -> Result<(), AppError> {
        // Explicit cascade, leaves first, all inside one transaction.
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            "DELETE FROM payments WHERE tenant_id IN (
                SELECT t.id FROM tenants t
                JOIN units u ON t.unit_id = u.id
                WHERE u.property_id = ?
            )",
        )
        .bind(id)
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            "DELETE FROM tenants WHERE unit_id IN (SELECT id FROM units WHERE property_id = ?)",
        )
        .bind(id)
        .execute(&mut *tx)
        .await?;

        sqlx::query("DELETE FROM units WHERE property_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM properties WHERE id = ? AND owner_id = ?")
            .bind(id)
            .bind(owner_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }
}
