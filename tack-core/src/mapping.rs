use crate::{Error, FieldDef, Record, Result, Value, to_snake_case};
use std::{
    collections::{HashMap, HashSet},
    fmt::{self, Debug},
};

/// Explicit tags keyed by field identifier, used in place of the declarative tags of a type.
///
/// When a mapping is configured with `ConfigTags`, every declarative tag is ignored: a field that
/// has no entry is mapped with an empty tag, meaning an inferred column name and no flags.
///
/// ```rust
/// use tack_core::ConfigTags;
/// let tags = ConfigTags::from([("ID", ",primary"), ("Three", "tree"), ("Five", "-")]);
/// assert_eq!(tags.get("Three"), "tree");
/// assert_eq!(tags.get("Four"), "");
/// ```
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct ConfigTags(HashMap<String, String>);

impl ConfigTags {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn tag(mut self, field: impl Into<String>, tag: impl Into<String>) -> Self {
        self.0.insert(field.into(), tag.into());
        self
    }
    pub fn get(&self, field: &str) -> &str {
        self.0.get(field).map(String::as_str).unwrap_or_default()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ConfigTags {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl<K: Into<String>, V: Into<String>, const N: usize> From<[(K, V); N]> for ConfigTags {
    fn from(value: [(K, V); N]) -> Self {
        value.into_iter().collect()
    }
}

/// Parsed form of a tag string `"<column>[,flag[,flag...]]"`.
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct Tag<'t> {
    pub column: &'t str,
    pub excluded: bool,
    pub primary: bool,
    pub readonly: bool,
    pub no_insert: bool,
    pub no_update: bool,
}

impl<'t> Tag<'t> {
    pub fn parse(tag: &'t str) -> Self {
        let mut parts = tag.split(',');
        let column = parts.next().unwrap_or_default();
        let mut result = Tag {
            column,
            excluded: column == "-",
            ..Default::default()
        };
        for flag in parts {
            match flag {
                "primary" => result.primary = true,
                "readonly" => result.readonly = true,
                "noinsert" => result.no_insert = true,
                "noupdate" => result.no_update = true,
                _ => {}
            }
        }
        result
    }
}

/// One field bound to one column, together with its write policy.
pub struct FieldBinding<R> {
    pub column: String,
    pub field: &'static str,
    pub insertable: bool,
    pub updatable: bool,
    pub get: fn(&R) -> Value,
    pub set: fn(&mut R, &Value),
}

impl<R> Clone for FieldBinding<R> {
    fn clone(&self) -> Self {
        Self {
            column: self.column.clone(),
            field: self.field,
            insertable: self.insertable,
            updatable: self.updatable,
            get: self.get,
            set: self.set,
        }
    }
}

impl<R> Debug for FieldBinding<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldBinding")
            .field("column", &self.column)
            .field("field", &self.field)
            .field("insertable", &self.insertable)
            .field("updatable", &self.updatable)
            .finish()
    }
}

/// The compiled column binding plan of a record type against a table.
///
/// Built once and then shared read only, usually through an `Arc`. The binding order is the
/// field declaration order and it is the column order of every statement rendered from it.
pub struct TableMapping<R: Record> {
    name: String,
    fields: Vec<FieldDef<R>>,
    bindings: Vec<FieldBinding<R>>,
    primary_key: Option<usize>,
    factory: fn() -> R,
}

impl<R: Record> Clone for TableMapping<R> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            fields: self.fields.clone(),
            bindings: self.bindings.clone(),
            primary_key: self.primary_key,
            factory: self.factory,
        }
    }
}

impl<R: Record> Debug for TableMapping<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TableMapping")
            .field("name", &self.name)
            .field("record", &R::record_name())
            .field("bindings", &self.bindings)
            .field("primary_key", &self.primary_key())
            .finish()
    }
}

impl<R: Record + Default> TableMapping<R> {
    /// Maps `R` to the table `name` reading the declarative tags of its fields.
    pub fn new(name: impl Into<String>) -> Result<Self> {
        Self::with_factory(name, R::default)
    }
}

impl<R: Record> TableMapping<R> {
    /// Like [`TableMapping::new`], `factory` creates the fresh instances rows are scanned into.
    pub fn with_factory(name: impl Into<String>, factory: fn() -> R) -> Result<Self> {
        let mut result = Self {
            name: name.into(),
            fields: R::fields(),
            bindings: Vec::new(),
            primary_key: None,
            factory,
        };
        result.configure(None)?;
        Ok(result)
    }

    /// Rebuilds the bindings and the primary key from scratch. With `tags` the declarative tags
    /// are ignored entirely.
    pub fn configure(&mut self, tags: Option<&ConfigTags>) -> Result<()> {
        let mut bindings = Vec::with_capacity(self.fields.len());
        let mut primary_key = None;
        let mut columns = HashSet::new();
        for field in &self.fields {
            let tag = match tags {
                Some(tags) => Tag::parse(tags.get(field.name)),
                None => Tag::parse(field.tag),
            };
            if tag.excluded {
                continue;
            }
            let column = if tag.column.is_empty() {
                to_snake_case(field.name)
            } else {
                tag.column.to_string()
            };
            if !columns.insert(column.clone()) {
                let error = Error::msg(format!(
                    "Column `{}` is mapped more than once in type {} (table {})",
                    column,
                    R::record_name(),
                    self.name
                ));
                log::error!("{}", error);
                return Err(error);
            }
            let mut binding = FieldBinding {
                column,
                field: field.name,
                insertable: !(tag.readonly || tag.no_insert),
                updatable: !(tag.readonly || tag.no_update),
                get: field.get,
                set: field.set,
            };
            if tag.primary && primary_key.is_none() {
                binding.insertable = false;
                binding.updatable = false;
                primary_key = Some(bindings.len());
            }
            bindings.push(binding);
        }
        self.bindings = bindings;
        self.primary_key = primary_key;
        Ok(())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn bindings(&self) -> &[FieldBinding<R>] {
        &self.bindings
    }

    pub fn primary_key(&self) -> Option<&FieldBinding<R>> {
        self.primary_key.map(|i| &self.bindings[i])
    }

    /// All the column names, in binding order.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.bindings.iter().map(|v| v.column.as_str())
    }

    pub fn insertable(&self) -> impl Iterator<Item = &FieldBinding<R>> {
        self.bindings.iter().filter(|v| v.insertable)
    }

    pub fn updatable(&self) -> impl Iterator<Item = &FieldBinding<R>> {
        self.bindings.iter().filter(|v| v.updatable)
    }

    /// A fresh instance of the record.
    pub fn create(&self) -> R {
        (self.factory)()
    }

    /// Stores the cells of a row into `record`, one per binding and in binding order.
    pub fn scan(&self, record: &mut R, values: &[Value]) -> Result<()> {
        if values.len() != self.bindings.len() {
            return Err(Error::msg(format!(
                "Expected {} columns to scan into {} but the row has {}",
                self.bindings.len(),
                R::record_name(),
                values.len()
            )));
        }
        for (binding, value) in self.bindings.iter().zip(values) {
            if !value.is_null() {
                (binding.set)(record, value);
            }
        }
        Ok(())
    }
}
