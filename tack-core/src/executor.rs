use crate::{Result, Value};
use futures::stream::BoxStream;
use std::{fmt::Display, future::Future, sync::Arc};

/// A result row: the column labels (shared by every row of the same result) and the cells.
#[derive(Default, Debug, Clone, PartialEq)]
pub struct Row {
    pub labels: Arc<[String]>,
    pub values: Box<[Value]>,
}

impl Row {
    pub fn get(&self, label: &str) -> Option<&Value> {
        self.labels
            .iter()
            .position(|v| v == label)
            .map(|i| &self.values[i])
    }
}

/// Outcome of a statement that does not return rows.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowsAffected {
    pub rows_affected: u64,
    /// Rowid or auto increment value assigned by the last insert, when the backend reports one.
    pub last_insert_id: Option<i64>,
}

/// Owned stream of rows, it does not borrow the executor that produced it.
pub type RowStream = BoxStream<'static, Result<Row>>;

/// Outcome of a statement returning rows: the column labels, known before any row is read and
/// also when there are none, followed by the rows themselves.
pub struct RowSet {
    pub labels: Arc<[String]>,
    pub rows: RowStream,
}

/// Something able to run SQL: a connection or a transaction.
///
/// Methods take `&self`: the handle is shared read only by everything that uses it, any
/// synchronization is the implementation's business.
pub trait Executor: Send + Sync {
    type Prepared: Prepared;

    /// Runs a statement returning rows.
    fn query(&self, sql: &str, args: Vec<Value>)
    -> impl Future<Output = Result<RowSet>> + Send;

    /// Runs a statement and returns the number of rows affected.
    fn execute(
        &self,
        sql: &str,
        args: Vec<Value>,
    ) -> impl Future<Output = Result<RowsAffected>> + Send;

    /// Prepares a statement for repeated execution.
    fn prepare(&self, sql: &str) -> impl Future<Output = Result<Self::Prepared>> + Send;
}

pub trait Connection: Executor + Sized {
    type Transaction: Transaction + Executor<Prepared = Self::Prepared>;

    /// Opens a connection to the given URL.
    fn connect(url: &str) -> impl Future<Output = Result<Self>>;

    /// Starts a transaction, statements run through the returned handle belong to it.
    fn begin(&self) -> impl Future<Output = Result<Self::Transaction>> + Send;
}

pub trait Transaction: Executor + Sized {
    fn commit(self) -> impl Future<Output = Result<()>> + Send;
    fn rollback(self) -> impl Future<Output = Result<()>> + Send;
}

/// A statement prepared by the backend, `Display` renders its SQL.
pub trait Prepared: Send + Sync + Display + Sized {
    fn execute(&self, args: Vec<Value>) -> impl Future<Output = Result<RowsAffected>> + Send;
    fn query(&self, args: Vec<Value>) -> impl Future<Output = Result<RowSet>> + Send;
    fn close(self) -> impl Future<Output = Result<()>> + Send;
}
