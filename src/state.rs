use std::sync::Arc;

use crate::config::Config;
use crate::db::queries::transactions;
use crate::db::DbPool;
use crate::error::AppResult;
use crate::models::Transaction;

#[derive(Clone)]
pub struct AppState {
    pub db: DbPool,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(db: DbPool, config: Config) -> Self {
        Self {
            db,
            config: Arc::new(config),
        }
    }

    /// Point-in-time copy of every stored transaction. Statistics are always
    /// computed over this snapshot, never over a filtered listing.
    pub fn transaction_snapshot(&self) -> AppResult<Vec<Transaction>> {
        let conn = self.db.get()?;
        Ok(transactions::list_all_transactions(&conn)?)
    }
}
