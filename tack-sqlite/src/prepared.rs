use crate::{
    SqliteConnection,
    connection::{execute, query},
};
use std::{
    fmt::{self, Display},
    sync::Arc,
};
use tack_core::{
    Prepared, Result, RowSet, RowsAffected, Value,
    stream::{self, StreamExt},
};

/// A statement compiled once and kept in the statement cache of the connection.
pub struct SqlitePrepared {
    connection: SqliteConnection,
    sql: Arc<str>,
}

impl SqlitePrepared {
    pub(crate) fn new(connection: SqliteConnection, sql: Arc<str>) -> Self {
        Self { connection, sql }
    }
}

impl Prepared for SqlitePrepared {
    async fn execute(&self, args: Vec<Value>) -> Result<RowsAffected> {
        let sql = self.sql.clone();
        self.connection
            .run(move |connection| execute(connection, &sql, &args))
            .await
    }

    async fn query(&self, args: Vec<Value>) -> Result<RowSet> {
        let sql = self.sql.clone();
        let (labels, rows) = self
            .connection
            .run(move |connection| query(connection, &sql, &args))
            .await?;
        Ok(RowSet {
            labels,
            rows: stream::iter(rows.into_iter().map(Ok)).boxed(),
        })
    }

    async fn close(self) -> Result<()> {
        let sql = self.sql.clone();
        self.connection
            .run(move |connection| {
                // Finalizes the cached statement
                connection.prepare_cached(&sql)?.discard();
                Ok(())
            })
            .await
    }
}

impl Display for SqlitePrepared {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.sql)
    }
}
