use crate::{Connection, NullableField, Operation, QueryScope, Record, Rows, TableMapping, Value};
use std::sync::Arc;

/// An in progress SELECT over a mapped table, refined through a [`QueryScope`].
///
/// A value: the builder methods return a modified copy, and a partially built select can be
/// cloned and refined along different branches. Terminal methods run the statement through the
/// operation, transaction included.
pub struct Select<'o, C: Connection, R: Record> {
    operation: &'o Operation<C>,
    mapping: Option<Arc<TableMapping<R>>>,
    scope: QueryScope,
}

impl<'o, C: Connection, R: Record> Clone for Select<'o, C, R> {
    fn clone(&self) -> Self {
        Self {
            operation: self.operation,
            mapping: self.mapping.clone(),
            scope: self.scope.clone(),
        }
    }
}

impl<'o, C: Connection, R: Record> Select<'o, C, R> {
    pub(crate) fn new(operation: &'o Operation<C>, mapping: Option<Arc<TableMapping<R>>>) -> Self {
        Self {
            operation,
            mapping,
            scope: Default::default(),
        }
    }

    /// Sets (or overwrites) the WHERE clause and its arguments.
    pub fn filter<V: Into<Value>>(
        mut self,
        clause: impl Into<String>,
        args: impl IntoIterator<Item = V>,
    ) -> Self {
        self.scope = self.scope.filter(clause, args);
        self
    }

    /// Sets (or overwrites) the ORDER BY clause.
    pub fn order(mut self, order: impl Into<String>) -> Self {
        self.scope = self.scope.order(order);
        self
    }

    pub fn limit(mut self, limit: u64) -> Self {
        self.scope = self.scope.limit(limit);
        self
    }

    pub fn offset(mut self, offset: u64) -> Self {
        self.scope = self.scope.offset(offset);
        self
    }

    /// Replaces the whole scope.
    pub fn scope(mut self, scope: QueryScope) -> Self {
        self.scope = scope;
        self
    }

    pub fn query_scope(&self) -> &QueryScope {
        &self.scope
    }

    pub fn mapping(&self) -> Option<&Arc<TableMapping<R>>> {
        self.mapping.as_ref()
    }

    /// The statement this select runs, empty when there is no mapping.
    pub fn sql(&self) -> String {
        self.mapping
            .as_ref()
            .map(|v| v.select_sql(&self.scope))
            .unwrap_or_default()
    }

    pub async fn query(&self) -> Rows<'o> {
        let latch = self.operation.latch();
        let Some(mapping) = self.mapping.as_ref().filter(|_| !latch.is_set()) else {
            return Rows::empty(latch);
        };
        self.operation
            .query(&mapping.select_sql(&self.scope), self.scope.where_args.clone())
            .await
    }

    /// Scans the first row into `record`. Returns false, leaving `record` untouched, when there
    /// are no rows or the operation is in error.
    pub async fn first(&self, record: &mut R) -> bool {
        let Some(mapping) = self.mapping.as_ref() else {
            return false;
        };
        let mut rows = self.query().await;
        if !rows.next().await {
            return false;
        }
        rows.scan_record(mapping, record);
        rows.close();
        !self.operation.is_err()
    }

    /// Every row scanned into a fresh record, in the order returned by the database.
    pub async fn all_objects(&self) -> Vec<R> {
        let mut result = Vec::new();
        self.each(|record| result.push(record)).await;
        result
    }

    /// Calls `callback` with the cursor positioned on each row, in turn.
    pub async fn each_row(&self, mut callback: impl FnMut(&mut Rows<'o>)) {
        let mut rows = self.query().await;
        while rows.next().await {
            callback(&mut rows);
        }
        rows.close();
    }

    /// Scans each row into the same `record` and calls `callback` after every scan. The record
    /// keeps the values of the last row scanned.
    pub async fn each_object(&self, record: &mut R, mut callback: impl FnMut(&R)) {
        let Some(mapping) = self.mapping.as_ref() else {
            return;
        };
        let mut rows = self.query().await;
        while rows.next().await {
            rows.scan_record(mapping, record);
            if self.operation.is_err() {
                break;
            }
            callback(record);
        }
        rows.close();
    }

    /// A count of the rows matching the WHERE clause of this select.
    pub fn count(&self) -> Count<'o, C, R> {
        Count {
            select: self.clone(),
        }
    }

    async fn each(&self, mut callback: impl FnMut(R)) {
        let Some(mapping) = self.mapping.as_ref() else {
            return;
        };
        let mut rows = self.query().await;
        while rows.next().await {
            let mut record = mapping.create();
            rows.scan_record(mapping, &mut record);
            if self.operation.is_err() {
                break;
            }
            callback(record);
        }
        rows.close();
    }
}

/// `SELECT COUNT(*)` over the table and WHERE clause of a [`Select`], ordering and paging are
/// ignored.
pub struct Count<'o, C: Connection, R: Record> {
    select: Select<'o, C, R>,
}

impl<'o, C: Connection, R: Record> Count<'o, C, R> {
    pub fn sql(&self) -> String {
        self.select
            .mapping
            .as_ref()
            .map(|v| v.count_sql(&self.select.scope))
            .unwrap_or_default()
    }

    /// Number of matching rows, zero when the operation is in error.
    pub async fn row_count(&self) -> u64 {
        let operation = self.select.operation;
        let latch = operation.latch();
        let Some(mapping) = self.select.mapping.as_ref().filter(|_| !latch.is_set()) else {
            return 0;
        };
        let scope = &self.select.scope;
        let mut rows = operation
            .query(&mapping.count_sql(scope), scope.where_args.clone())
            .await;
        let mut count = 0u64;
        if rows.next().await {
            rows.scan(&mut [&mut NullableField::new(&mut count)]);
        }
        rows.close();
        if latch.is_set() { 0 } else { count }
    }
}
