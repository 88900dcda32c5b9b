use crate::{
    SqlitePrepared, SqliteTransaction,
    extract::{SqliteArg, extract_value},
};
use rusqlite::params_from_iter;
use std::sync::{Arc, Mutex, PoisonError};
use tack_core::{
    Connection, Context, Error, Executor, Result, Row, RowSet, RowsAffected, Value,
    stream::{self, StreamExt},
    truncate_long,
};
use tokio::task::spawn_blocking;

/// A SQLite database, opened from `sqlite://<path>` or `sqlite://:memory:`.
///
/// Clones share the same underlying connection, calls are serialized and run on the blocking
/// thread pool.
#[derive(Clone)]
pub struct SqliteConnection {
    pub(crate) connection: Arc<Mutex<rusqlite::Connection>>,
}

impl SqliteConnection {
    pub const PREFIX: &'static str = "sqlite://";

    /// Runs `f` with exclusive access to the connection, on the blocking thread pool.
    pub(crate) async fn run<T, F>(&self, f: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&rusqlite::Connection) -> Result<T> + Send + 'static,
    {
        let connection = self.connection.clone();
        spawn_blocking(move || {
            let connection = connection.lock().unwrap_or_else(PoisonError::into_inner);
            f(&connection)
        })
        .await?
    }
}

pub(crate) fn execute(
    connection: &rusqlite::Connection,
    sql: &str,
    args: &[Value],
) -> Result<RowsAffected> {
    // `changes()` is not reset by DDL statements, the running total is the reliable counter
    let before = total_changes(connection)?;
    if args.is_empty() {
        connection.execute_batch(sql)?;
    } else {
        connection
            .prepare_cached(sql)?
            .execute(params_from_iter(args.iter().map(SqliteArg)))?;
    }
    Ok(RowsAffected {
        rows_affected: total_changes(connection)?.saturating_sub(before),
        last_insert_id: Some(connection.last_insert_rowid()),
    })
}

fn total_changes(connection: &rusqlite::Connection) -> Result<u64> {
    Ok(connection.query_row("SELECT total_changes()", [], |row| row.get::<_, i64>(0))? as u64)
}

pub(crate) fn query(
    connection: &rusqlite::Connection,
    sql: &str,
    args: &[Value],
) -> Result<(Arc<[String]>, Vec<Row>)> {
    let mut statement = connection.prepare_cached(sql)?;
    let columns = statement.columns();
    let labels: Arc<[String]> = columns.iter().map(|v| v.name().to_string()).collect();
    let decltypes: Vec<_> = columns
        .iter()
        .map(|v| v.decl_type().map(str::to_ascii_uppercase))
        .collect();
    let mut rows = statement.query(params_from_iter(args.iter().map(SqliteArg)))?;
    let mut result = Vec::new();
    while let Some(row) = rows.next()? {
        let values = decltypes
            .iter()
            .enumerate()
            .map(|(i, decltype)| extract_value(row, i, decltype.as_deref()))
            .collect::<Result<_>>()?;
        result.push(Row {
            labels: labels.clone(),
            values,
        });
    }
    Ok((labels, result))
}

fn failed(error: Error, action: &str, sql: &str) -> Error {
    let error = error.context(format!("While {} the query:\n{}", action, truncate_long(sql)));
    log::error!("{:#}", error);
    error
}

impl Executor for SqliteConnection {
    type Prepared = SqlitePrepared;

    async fn query(&self, sql: &str, args: Vec<Value>) -> Result<RowSet> {
        let owned = sql.to_string();
        let (labels, rows) = self
            .run(move |connection| query(connection, &owned, &args))
            .await
            .map_err(|e| failed(e, "running", sql))?;
        Ok(RowSet {
            labels,
            rows: stream::iter(rows.into_iter().map(Ok)).boxed(),
        })
    }

    async fn execute(&self, sql: &str, args: Vec<Value>) -> Result<RowsAffected> {
        let owned = sql.to_string();
        self.run(move |connection| execute(connection, &owned, &args))
            .await
            .map_err(|e| failed(e, "executing", sql))
    }

    async fn prepare(&self, sql: &str) -> Result<SqlitePrepared> {
        let owned = sql.to_string();
        self.run(move |connection| {
            connection.prepare_cached(&owned)?;
            Ok(())
        })
        .await
        .map_err(|e| failed(e, "preparing", sql))?;
        Ok(SqlitePrepared::new(self.clone(), sql.into()))
    }
}

impl Connection for SqliteConnection {
    type Transaction = SqliteTransaction;

    async fn connect(url: &str) -> Result<SqliteConnection> {
        let Some(path) = url.strip_prefix(Self::PREFIX) else {
            return Err(Error::msg(format!(
                "Expected sqlite connection url to start with `{}`",
                Self::PREFIX
            )));
        };
        let connection = if path == ":memory:" {
            rusqlite::Connection::open_in_memory()
        } else {
            rusqlite::Connection::open(format!("file:{}", path))
        }
        .with_context(|| format!("Error while opening the database: `{}`", url))?;
        log::debug!("Connected to {}", url);
        Ok(Self {
            connection: Arc::new(Mutex::new(connection)),
        })
    }

    async fn begin(&self) -> Result<SqliteTransaction> {
        SqliteTransaction::new(self.clone()).await
    }
}
