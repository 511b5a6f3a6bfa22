use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Resource not found: {0}")]
    NotFound(String),
    #[error("Occupancy conflict: {0}")]
    OccupancyConflict(String),
    #[error("Invalid amount: {0} (must be strictly positive)")]
    InvalidAmount(f64),
    #[error("Invalid period: {0} (expected YYYY-MM)")]
    InvalidPeriod(String),
}
