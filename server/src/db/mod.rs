//! Database Module
//!
//! Embedded SurrealDB: RocksDB on disk in production, in-memory engine
//! for tests.

pub mod models;
pub mod repository;

use crate::utils::AppError;
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem, RocksDb};

const NAMESPACE: &str = "saffron";
const DATABASE: &str = "main";

/// Database service — owns the embedded SurrealDB handle
#[derive(Clone)]
pub struct DbService {
    pub db: Surreal<Db>,
}

impl DbService {
    /// Open the on-disk database under `data_dir` and apply schema definitions
    pub async fn open(data_dir: &str) -> Result<Self, AppError> {
        let path = format!("{data_dir}/saffron.db");
        let db = Surreal::new::<RocksDb>(path.as_str())
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;
        Self::init(db).await
    }

    /// Open an in-memory database (tests)
    pub async fn memory() -> Result<Self, AppError> {
        let db = Surreal::new::<Mem>(())
            .await
            .map_err(|e| AppError::database(format!("Failed to open in-memory database: {e}")))?;
        Self::init(db).await
    }

    async fn init(db: Surreal<Db>) -> Result<Self, AppError> {
        db.use_ns(NAMESPACE)
            .use_db(DATABASE)
            .await
            .map_err(|e| AppError::database(format!("Failed to select namespace: {e}")))?;

        define_schema(&db)
            .await
            .map_err(|e| AppError::database(format!("Failed to define schema: {e}")))?;

        tracing::info!("Database ready (ns={NAMESPACE}, db={DATABASE})");
        Ok(Self { db })
    }
}

/// Uniqueness and lookup indexes.
///
/// `OVERWRITE` keeps the definitions idempotent across restarts.
async fn define_schema(db: &Surreal<Db>) -> Result<(), surrealdb::Error> {
    db.query(
        "
        DEFINE INDEX OVERWRITE idx_table_number ON TABLE dining_table COLUMNS table_number UNIQUE;
        DEFINE INDEX OVERWRITE idx_menu_name ON TABLE menu_item COLUMNS name UNIQUE;
        DEFINE INDEX OVERWRITE idx_user_email ON TABLE user COLUMNS email UNIQUE;
        DEFINE INDEX OVERWRITE idx_employee_email ON TABLE employee COLUMNS email UNIQUE;
        DEFINE INDEX OVERWRITE idx_cart_customer ON TABLE cart COLUMNS customer UNIQUE;
        DEFINE INDEX OVERWRITE idx_reservation_table ON TABLE reservation COLUMNS `table`, start_time;
        ",
    )
    .await?
    .check()?;
    Ok(())
}
