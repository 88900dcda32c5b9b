use crate::{ConfigTags, Connection, Error, ExecResult, Operation, Record, Select, TableMapping, Value};
use std::sync::Arc;

/// A table mapping tied to an in progress [`Operation`].
///
/// Holds no mapping when building it failed, the operation is then in error and every method
/// does nothing.
pub struct OperationTable<'o, C: Connection, R: Record> {
    operation: &'o Operation<C>,
    mapping: Option<Arc<TableMapping<R>>>,
}

impl<'o, C: Connection, R: Record> OperationTable<'o, C, R> {
    pub(crate) fn new(operation: &'o Operation<C>, mapping: Option<Arc<TableMapping<R>>>) -> Self {
        Self { operation, mapping }
    }

    pub fn mapping(&self) -> Option<&Arc<TableMapping<R>>> {
        self.mapping.as_ref()
    }

    /// Replaces the declarative tags of the type with `tags`.
    ///
    /// Only this binding sees the new configuration, a mapping shared with others (for example a
    /// registered one) is copied first.
    pub fn reconfigure(&mut self, tags: &ConfigTags) -> &mut Self {
        if let Some(mapping) = self.mapping.as_mut() {
            let result = Arc::make_mut(mapping).configure(Some(tags));
            if self.operation.absorb(result).is_none() {
                self.mapping = None;
            }
        }
        self
    }

    pub fn select(&self) -> Select<'o, C, R> {
        Select::new(self.operation, self.mapping.clone())
    }

    /// Inserts `record` when its primary key is zero, then stores the id assigned by the
    /// database into the primary key. Updates the row having its primary key otherwise.
    ///
    /// Halts the operation if the mapping has no primary key.
    pub async fn save(&self, record: &mut R) -> ExecResult<'o> {
        let latch = self.operation.latch();
        let Some(mapping) = self.mapping.as_ref().filter(|_| !latch.is_set()) else {
            return ExecResult::empty(latch);
        };
        let Some(primary_key) = mapping.primary_key() else {
            latch.set(Error::msg(format!(
                "no primary key tagged for structure {}",
                R::record_name()
            )));
            return ExecResult::empty(latch);
        };
        if !(primary_key.get)(record).is_zero_key() {
            return self
                .operation
                .exec(&mapping.update_sql(), mapping.update_args(record))
                .await;
        }
        let result = self
            .operation
            .exec(&mapping.insert_sql(), mapping.insert_args(record))
            .await;
        let id = result.last_insert_id();
        if !latch.is_set() {
            (primary_key.set)(record, &Value::Int64(Some(id)));
        }
        result
    }

    /// Inserts `record` regardless of its primary key, which is not updated afterwards.
    pub async fn insert(&self, record: &R) -> ExecResult<'o> {
        let latch = self.operation.latch();
        let Some(mapping) = self.mapping.as_ref().filter(|_| !latch.is_set()) else {
            return ExecResult::empty(latch);
        };
        self.operation
            .exec(&mapping.insert_sql(), mapping.insert_args(record))
            .await
    }
}
