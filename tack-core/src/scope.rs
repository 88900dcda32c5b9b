use crate::Value;

/// Filtering, ordering and paging of a SELECT.
///
/// A value type: every builder method returns a modified copy, so a partially built scope can be
/// cloned and refined along different branches. Calling a builder again overwrites the previous
/// setting.
///
/// ```rust
/// use tack_core::QueryScope;
/// let base = QueryScope::default().filter("x = ?", [1]);
/// let paged = base.clone().limit(10).offset(100);
/// assert_eq!(base.limit_value(), 0);
/// assert_eq!(paged.limit_value(), 10);
/// ```
#[derive(Default, Debug, Clone, PartialEq)]
pub struct QueryScope {
    pub(crate) where_clause: String,
    pub(crate) where_args: Vec<Value>,
    pub(crate) order: String,
    pub(crate) limit: u64,
    pub(crate) offset: u64,
}

impl QueryScope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the WHERE clause and the arguments of its placeholders.
    pub fn filter<V: Into<Value>>(
        mut self,
        clause: impl Into<String>,
        args: impl IntoIterator<Item = V>,
    ) -> Self {
        self.where_clause = clause.into();
        self.where_args = args.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the ORDER BY clause.
    pub fn order(mut self, order: impl Into<String>) -> Self {
        self.order = order.into();
        self
    }

    /// Zero means no limit.
    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = limit;
        self
    }

    /// Zero means no offset.
    pub fn offset(mut self, offset: u64) -> Self {
        self.offset = offset;
        self
    }

    pub fn where_clause(&self) -> &str {
        &self.where_clause
    }

    pub fn where_args(&self) -> &[Value] {
        &self.where_args
    }

    pub fn order_clause(&self) -> &str {
        &self.order
    }

    pub fn limit_value(&self) -> u64 {
        self.limit
    }

    pub fn offset_value(&self) -> u64 {
        self.offset
    }
}
