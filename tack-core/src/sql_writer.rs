use crate::{QueryScope, Record, TableMapping, Value, separated_by};
use std::fmt::Write;

/// Renders the parameterized statements of a [`TableMapping`].
///
/// Pure text generation, placeholders are always `?`. Every method appends to `out` so a caller
/// can reuse its buffer.
#[derive(Default, Debug, Clone, Copy)]
pub struct SqlWriter;

impl SqlWriter {
    pub const fn new() -> Self {
        Self
    }

    /// `SELECT <columns> FROM <table>[ WHERE ..][ ORDER BY ..][ LIMIT n][ OFFSET n]`, the clauses
    /// always appear in this order and only when set.
    pub fn write_select<R: Record>(
        &self,
        out: &mut String,
        mapping: &TableMapping<R>,
        scope: &QueryScope,
    ) {
        out.push_str("SELECT ");
        separated_by(out, mapping.column_names(), |out, v| out.push_str(v), ",");
        out.push_str(" FROM ");
        out.push_str(mapping.name());
        self.write_where(out, scope);
        if !scope.order.is_empty() {
            out.push_str(" ORDER BY ");
            out.push_str(&scope.order);
        }
        if scope.limit > 0 {
            let _ = write!(out, " LIMIT {}", scope.limit);
        }
        if scope.offset > 0 {
            let _ = write!(out, " OFFSET {}", scope.offset);
        }
    }

    /// `SELECT COUNT(*) FROM <table>[ WHERE ..]`, order and paging are ignored.
    pub fn write_count<R: Record>(
        &self,
        out: &mut String,
        mapping: &TableMapping<R>,
        scope: &QueryScope,
    ) {
        out.push_str("SELECT COUNT(*) FROM ");
        out.push_str(mapping.name());
        self.write_where(out, scope);
    }

    pub fn write_insert<R: Record>(&self, out: &mut String, mapping: &TableMapping<R>) {
        out.push_str("INSERT INTO ");
        out.push_str(mapping.name());
        out.push_str(" (");
        separated_by(
            out,
            mapping.insertable(),
            |out, v| out.push_str(&v.column),
            ",",
        );
        out.push_str(") VALUES (");
        separated_by(out, mapping.insertable(), |out, _| out.push('?'), ",");
        out.push(')');
    }

    /// Writes nothing when the mapping has no primary key.
    pub fn write_update<R: Record>(&self, out: &mut String, mapping: &TableMapping<R>) {
        let Some(primary_key) = mapping.primary_key() else {
            return;
        };
        out.push_str("UPDATE ");
        out.push_str(mapping.name());
        out.push_str(" SET ");
        separated_by(
            out,
            mapping.updatable(),
            |out, v| {
                out.push_str(&v.column);
                out.push_str(" = ?");
            },
            ",",
        );
        out.push_str(" WHERE ");
        out.push_str(&primary_key.column);
        out.push_str(" = ?");
    }

    fn write_where(&self, out: &mut String, scope: &QueryScope) {
        if !scope.where_clause.is_empty() {
            out.push_str(" WHERE ");
            out.push_str(&scope.where_clause);
        }
    }
}

impl<R: Record> TableMapping<R> {
    pub fn select_sql(&self, scope: &QueryScope) -> String {
        let mut out = String::with_capacity(128);
        SqlWriter::new().write_select(&mut out, self, scope);
        out
    }

    pub fn count_sql(&self, scope: &QueryScope) -> String {
        let mut out = String::with_capacity(64);
        SqlWriter::new().write_count(&mut out, self, scope);
        out
    }

    pub fn insert_sql(&self) -> String {
        let mut out = String::with_capacity(128);
        SqlWriter::new().write_insert(&mut out, self);
        out
    }

    /// Empty when there is no primary key: such a mapping cannot be updated.
    pub fn update_sql(&self) -> String {
        let mut out = String::with_capacity(128);
        SqlWriter::new().write_update(&mut out, self);
        out
    }

    /// Arguments of the insert statement, mirroring its column selection.
    pub fn insert_args(&self, record: &R) -> Vec<Value> {
        self.insertable().map(|v| (v.get)(record)).collect()
    }

    /// Arguments of the update statement: the assigned columns followed by the primary key.
    /// Empty when there is no primary key.
    pub fn update_args(&self, record: &R) -> Vec<Value> {
        let Some(primary_key) = self.primary_key() else {
            return Vec::new();
        };
        self.updatable()
            .chain([primary_key])
            .map(|v| (v.get)(record))
            .collect()
    }
}
