use crate::{
    Connection, Database, Error, ExecResult, Executor, Latch, OperationTable, Record, Result, Rows,
    Select, Stmt, TableMapping, Transaction, Value,
    util::{printable_args, truncate_long},
};
use std::sync::Arc;
use tokio::sync::RwLock;

/// A short lived, single purpose sequence of database calls.
///
/// The first failure of any call is latched and from then on every call made through the
/// operation, or through anything spawned from it (results, rows, statements, selects), does
/// nothing and returns zero values. This makes it safe to chain dependent statements and check
/// for an error only once, at the end.
///
/// While a transaction is active every statement is routed through it instead of the connection.
/// Only one transaction at a time is supported.
///
/// An operation is meant for one logical call sequence: nothing orders the calls of concurrent
/// users, so the error they observe could come from someone else's statement.
pub struct Operation<C: Connection> {
    database: Database<C>,
    transaction: RwLock<Option<C::Transaction>>,
    latch: Latch,
}

impl<C: Connection> Operation<C> {
    pub(crate) fn new(database: Database<C>) -> Self {
        Self {
            database,
            transaction: RwLock::new(None),
            latch: Latch::new(),
        }
    }

    pub fn database(&self) -> &Database<C> {
        &self.database
    }

    pub fn latch(&self) -> &Latch {
        &self.latch
    }

    /// The first error that occurred on any call owned by this operation.
    pub fn error(&self) -> Option<&Error> {
        self.latch.error()
    }

    pub fn is_err(&self) -> bool {
        self.latch.is_set()
    }

    /// Halts the operation with `error`, unless it is already halted.
    ///
    /// Also the way to force a rollback: the following `end_transaction` will not commit.
    pub fn set_error(&self, error: impl Into<Error>) {
        self.latch.set(error);
    }

    /// Halts the operation if `result` is an error, returns its value otherwise.
    pub fn absorb<T>(&self, result: Result<T>) -> Option<T> {
        self.latch.absorb(result)
    }

    /// Clears the error, the operation goes back to normal.
    pub fn reset(&mut self) {
        self.latch.take();
    }

    /// Clears the error and returns it.
    pub fn take_error(&mut self) -> Option<Error> {
        self.latch.take()
    }

    /// Consumes the operation, returning its error if any. An active transaction is dropped and
    /// its fate is left to the driver.
    pub fn into_result(mut self) -> Result<()> {
        match self.latch.take() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    pub async fn in_transaction(&self) -> bool {
        self.transaction.read().await.is_some()
    }

    pub async fn exec(&self, sql: &str, args: impl IntoIterator<Item = Value>) -> ExecResult<'_> {
        if self.latch.is_set() {
            return ExecResult::empty(&self.latch);
        }
        let args: Vec<_> = args.into_iter().collect();
        log::debug!("Executing: {} {}", truncate_long(sql), printable_args(&args));
        let transaction = self.transaction.read().await;
        let result = match transaction.as_ref() {
            Some(transaction) => transaction.execute(sql, args).await,
            None => self.database.connection().execute(sql, args).await,
        };
        drop(transaction);
        ExecResult::new(self.latch.absorb(result), &self.latch)
    }

    pub async fn query(&self, sql: &str, args: impl IntoIterator<Item = Value>) -> Rows<'_> {
        if self.latch.is_set() {
            return Rows::empty(&self.latch);
        }
        let args: Vec<_> = args.into_iter().collect();
        log::debug!("Querying: {} {}", truncate_long(sql), printable_args(&args));
        let transaction = self.transaction.read().await;
        let result = match transaction.as_ref() {
            Some(transaction) => transaction.query(sql, args).await,
            None => self.database.connection().query(sql, args).await,
        };
        drop(transaction);
        Rows::new(self.latch.absorb(result), &self.latch)
    }

    /// Prepares a statement, it should be closed once done with it.
    pub async fn prepare(&self, sql: &str) -> Stmt<'_, C::Prepared> {
        if self.latch.is_set() {
            return Stmt::new(None, &self.latch);
        }
        log::debug!("Preparing: {}", truncate_long(sql));
        let transaction = self.transaction.read().await;
        let result = match transaction.as_ref() {
            Some(transaction) => transaction.prepare(sql).await,
            None => self.database.connection().prepare(sql).await,
        };
        drop(transaction);
        Stmt::new(self.latch.absorb(result), &self.latch)
    }

    /// Starts a transaction, every following statement runs inside it until `end_transaction`.
    ///
    /// Starting a transaction while another is active halts the operation and leaves the active
    /// one in place.
    pub async fn begin_transaction(&self) {
        if self.latch.is_set() {
            return;
        }
        let mut transaction = self.transaction.write().await;
        if transaction.is_some() {
            self.latch.set(Error::msg("cannot nest transactions"));
            return;
        }
        log::debug!("Beginning a transaction");
        *transaction = self.latch.absorb(self.database.connection().begin().await);
    }

    /// Commits the active transaction, or rolls it back when the operation is in error. When the
    /// commit fails its error is latched. Does nothing without an active transaction.
    pub async fn end_transaction(&self) {
        let Some(transaction) = self.transaction.write().await.take() else {
            return;
        };
        if let Some(error) = self.latch.error() {
            log::info!("Rolling back the transaction because of: {:#}", error);
            if let Err(e) = transaction.rollback().await {
                log::error!("{:#}", e.context("While rolling back the transaction"));
            }
            return;
        }
        log::info!("Committing the transaction");
        let result = transaction.commit().await;
        self.latch.absorb(result);
    }

    /// Rolls back the active transaction even if the operation is not in error. A failing
    /// rollback is logged, not latched.
    pub async fn rollback(&self) {
        let Some(transaction) = self.transaction.write().await.take() else {
            return;
        };
        log::info!("Rolling back the transaction");
        if let Err(e) = transaction.rollback().await {
            log::error!("{:#}", e.context("While rolling back the transaction"));
        }
    }

    /// Binds `R` to the table `name` for this operation only, reading the declarative tags of
    /// the type.
    pub fn table<R: Record + Default>(&self, name: impl Into<String>) -> OperationTable<'_, C, R> {
        let mapping = self.latch.absorb(TableMapping::new(name)).map(Arc::new);
        OperationTable::new(self, mapping)
    }

    /// Binds an already built mapping to this operation.
    pub fn operation_table<R: Record>(
        &self,
        mapping: Arc<TableMapping<R>>,
    ) -> OperationTable<'_, C, R> {
        OperationTable::new(self, Some(mapping))
    }

    /// A select over the registered table `name`.
    pub fn from<R: Record>(&self, name: &str) -> Select<'_, C, R> {
        let mapping = self.latch.absorb(self.database.find_table_by_name(name));
        Select::new(self, mapping)
    }

    /// A select over the table `name`, mapped from the declarative tags of `R`.
    pub fn select<R: Record + Default>(&self, name: impl Into<String>) -> Select<'_, C, R> {
        self.table(name).select()
    }

    /// Inserts or updates `record` into the table `name`, mapped from the declarative tags of
    /// `R`. See [`OperationTable::save`].
    pub async fn save<R: Record + Default>(
        &self,
        name: impl Into<String>,
        record: &mut R,
    ) -> ExecResult<'_> {
        if self.latch.is_set() {
            return ExecResult::empty(&self.latch);
        }
        self.table(name).save(record).await
    }

    /// Inserts or updates `record` into the table registered for its type.
    pub async fn save_record<R: Record>(&self, record: &mut R) -> ExecResult<'_> {
        if self.latch.is_set() {
            return ExecResult::empty(&self.latch);
        }
        let Some(mapping) = self.database.find_table_by_type::<R>() else {
            self.latch.set(Error::msg(format!(
                "table for type {} not registered",
                R::record_name()
            )));
            return ExecResult::empty(&self.latch);
        };
        if mapping.primary_key().is_none() {
            self.latch.set(Error::msg(format!(
                "table for type {} has no primary key",
                R::record_name()
            )));
            return ExecResult::empty(&self.latch);
        }
        self.operation_table(mapping).save(record).await
    }
}
