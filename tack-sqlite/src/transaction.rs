use crate::{SqliteConnection, SqlitePrepared};
use std::sync::PoisonError;
use tack_core::{Executor, Result, RowSet, RowsAffected, Transaction, Value};

/// A transaction over the shared connection, opened with `BEGIN`.
///
/// Every statement run on the connection while the transaction is open belongs to it. Dropping it
/// without committing rolls it back.
pub struct SqliteTransaction {
    connection: SqliteConnection,
    done: bool,
}

impl SqliteTransaction {
    pub(crate) async fn new(connection: SqliteConnection) -> Result<Self> {
        connection.execute("BEGIN", Vec::new()).await?;
        Ok(Self {
            connection,
            done: false,
        })
    }
}

impl Executor for SqliteTransaction {
    type Prepared = SqlitePrepared;

    async fn query(&self, sql: &str, args: Vec<Value>) -> Result<RowSet> {
        self.connection.query(sql, args).await
    }

    async fn execute(&self, sql: &str, args: Vec<Value>) -> Result<RowsAffected> {
        self.connection.execute(sql, args).await
    }

    async fn prepare(&self, sql: &str) -> Result<SqlitePrepared> {
        self.connection.prepare(sql).await
    }
}

impl Transaction for SqliteTransaction {
    async fn commit(mut self) -> Result<()> {
        self.connection.execute("COMMIT", Vec::new()).await?;
        self.done = true;
        Ok(())
    }

    async fn rollback(mut self) -> Result<()> {
        self.done = true;
        self.connection.execute("ROLLBACK", Vec::new()).await?;
        Ok(())
    }
}

impl Drop for SqliteTransaction {
    fn drop(&mut self) {
        if self.done {
            return;
        }
        log::warn!("Transaction dropped while still open, rolling it back");
        let connection = self
            .connection
            .connection
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if let Err(e) = connection.execute_batch("ROLLBACK") {
            log::error!("Could not roll back the dropped transaction: {}", e);
        }
    }
}
