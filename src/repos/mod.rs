pub mod calculation_repo;
pub mod error;

pub use calculation_repo::{
    CalculationRepo, CalculationRow, MemoryCalculationRepo, NewCalculation, PgCalculationRepo,
};
pub use error::RepoError;

use sqlx::PgPool;

/// Run the embedded migrations under `./migrations`.
pub async fn migrate(pool: &PgPool) -> Result<(), RepoError> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}
