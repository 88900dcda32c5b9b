use crate::Value;

/// A type whose fields can be bound to table columns.
///
/// Usually derived with `#[derive(Record)]`, which lists every non private field in declaration
/// order together with its `#[sql = "..."]` tag. A manual implementation is fine as long as the
/// accessors of each [`FieldDef`] read and write the same field.
pub trait Record: Sized + Send + Sync + 'static {
    /// Name of the type, used in error messages.
    fn record_name() -> &'static str;

    /// Descriptor of every mappable field, in declaration order.
    fn fields() -> Vec<FieldDef<Self>>;
}

/// Descriptor of a single field: its identifier, its declarative tag and an accessor/mutator pair.
pub struct FieldDef<R> {
    /// Field identifier as written in the type (without any `r#` prefix).
    pub name: &'static str,
    /// Declarative tag, empty when the field has none.
    pub tag: &'static str,
    /// Reads the current value of the field.
    pub get: fn(&R) -> Value,
    /// Stores a row cell into the field, through the nullable scan adapter.
    pub set: fn(&mut R, &Value),
}

impl<R> Clone for FieldDef<R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R> Copy for FieldDef<R> {}

impl<R> std::fmt::Debug for FieldDef<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldDef")
            .field("name", &self.name)
            .field("tag", &self.tag)
            .finish()
    }
}
