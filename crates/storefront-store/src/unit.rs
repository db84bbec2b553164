use sqlx::{Sqlite, SqliteConnection, SqlitePool, Transaction};
use tracing::debug;

use storefront_core::Result;

use crate::errors::map_db_error;

/// A scoped transaction.
///
/// Writes issued through [`UnitOfWork::conn`] become visible only after
/// [`UnitOfWork::commit`]. Dropping the unit without committing rolls back.
pub struct UnitOfWork {
    tx: Transaction<'static, Sqlite>,
}

impl UnitOfWork {
    pub async fn begin(pool: &SqlitePool) -> Result<Self> {
        let tx = pool.begin().await.map_err(map_db_error)?;
        debug!(event = "unit_of_work_started");
        Ok(Self { tx })
    }

    /// Connection to run statements on inside this unit.
    pub fn conn(&mut self) -> &mut SqliteConnection {
        &mut self.tx
    }

    pub async fn commit(self) -> Result<()> {
        self.tx.commit().await.map_err(map_db_error)?;
        debug!(event = "unit_of_work_committed");
        Ok(())
    }

    pub async fn rollback(self) -> Result<()> {
        self.tx.rollback().await.map_err(map_db_error)?;
        debug!(event = "unit_of_work_rolled_back");
        Ok(())
    }
}
