use crate::domain::{models::unit::Unit, ports::UnitRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;

pub struct SqliteUnitRepo {
    pool: SqlitePool,
}

impl SqliteUnitRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UnitRepository for SqliteUnitRepo {
    async fn create(&self, unit: &Unit) -> Result<Unit, AppError> {
        sqlx::query_as::<_, Unit>(
            "INSERT INTO units (id, property_id, door_number, rent_amount, created_at) VALUES (?, ?, ?, ?, ?) RETURNING *"
        )
            .bind(&unit.id)
            .bind(&unit.property_id)
            .bind(&unit.door_number)
            .bind(unit.rent_amount)
            .bind(unit.created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Unit>, AppError> {
        sqlx::query_as::<_, Unit>(
            "SELECT * FROM units WHERE id = ?",
        )
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_by_property(&self, property_id: &str) -> Result<Vec<Unit>, AppError> {
        sqlx::query_as::<_, Unit>(
            "SELECT * FROM units WHERE property_id = ? ORDER BY created_at ASC",
        )
            .bind(property_id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn count_by_owner(&self, owner_id: &str) -> Result<i64, AppError> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM units u JOIN properties p ON u.property_id = p.id WHERE p.owner_id = ?",
        )
            .bind(owner_id)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn update(&self, unit: &Unit) -> Result<Unit, AppError> {
        sqlx::query_as::<_, Unit>(
            "UPDATE units SET door_number = ?, rent_amount = ? WHERE id = ? RETURNING *"
        )
            .bind(&unit.door_number)
            .bind(unit.rent_amount)
            .bind(&unit.id)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            "DELETE FROM payments WHERE tenant_id IN (SELECT id FROM tenants WHERE unit_id = ?)",
        )
        .bind(id)
        .execute(&mut *tx)
        .await?;

        sqlx::query("DELETE FROM tenants WHERE unit_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM units WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }
}
