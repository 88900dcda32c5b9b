use crate::{ConfigTags, Connection, Error, Operation, Record, Result, TableMapping};
use std::{
    any::{Any, TypeId},
    collections::HashMap,
    sync::{Arc, PoisonError, RwLock},
};

#[derive(Clone)]
struct Registered {
    record: &'static str,
    type_id: TypeId,
    mapping: Arc<dyn Any + Send + Sync>,
}

#[derive(Default)]
struct Tables {
    by_name: HashMap<String, Registered>,
    by_type: HashMap<TypeId, Registered>,
}

struct Inner<C: Connection> {
    connection: C,
    tables: RwLock<Tables>,
}

/// Long lived handle to a connection plus the registry of table mappings.
///
/// Cloning is cheap and every clone shares the same connection and registry. Work is done through
/// short lived [`Operation`]s spawned with [`Database::operation`].
pub struct Database<C: Connection> {
    inner: Arc<Inner<C>>,
}

impl<C: Connection> Clone for Database<C> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<C: Connection> Database<C> {
    pub fn new(connection: C) -> Self {
        Self {
            inner: Arc::new(Inner {
                connection,
                tables: Default::default(),
            }),
        }
    }

    pub async fn connect(url: &str) -> Result<Self> {
        Ok(Self::new(C::connect(url).await?))
    }

    /// The underlying connection, for work this crate does not wrap.
    pub fn connection(&self) -> &C {
        &self.inner.connection
    }

    /// Spawns a new operation, in its clear state and outside of any transaction.
    pub fn operation(&self) -> Operation<C> {
        Operation::new(self.clone())
    }

    /// Maps `R` to the table `name` and stores the mapping for lookups by table name and by type.
    /// A previous registration of the same name or type is replaced.
    pub fn register_table<R: Record + Default>(
        &self,
        name: impl Into<String>,
    ) -> Result<Arc<TableMapping<R>>> {
        self.register_table_with(name, R::default)
    }

    /// Like [`Database::register_table`], rows are scanned into instances created by `factory`.
    pub fn register_table_with<R: Record>(
        &self,
        name: impl Into<String>,
        factory: fn() -> R,
    ) -> Result<Arc<TableMapping<R>>> {
        Ok(self.register_mapping(TableMapping::with_factory(name, factory)?))
    }

    pub fn register_mapping<R: Record>(&self, mapping: TableMapping<R>) -> Arc<TableMapping<R>> {
        let mapping = Arc::new(mapping);
        let registered = Registered {
            record: R::record_name(),
            type_id: TypeId::of::<R>(),
            mapping: mapping.clone(),
        };
        let mut tables = self
            .inner
            .tables
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        tables
            .by_name
            .insert(mapping.name().to_string(), registered.clone());
        tables.by_type.insert(registered.type_id, registered);
        log::debug!(
            "Registered table {} for type {}",
            mapping.name(),
            R::record_name()
        );
        mapping
    }

    /// Replaces the registered mapping of table `name` with one configured by `tags`. Operations
    /// already holding the previous mapping keep using it.
    pub fn reconfigure_table<R: Record>(
        &self,
        name: &str,
        tags: &ConfigTags,
    ) -> Result<Arc<TableMapping<R>>> {
        let mut mapping = TableMapping::clone(&*self.find_table_by_name::<R>(name)?);
        mapping.configure(Some(tags))?;
        Ok(self.register_mapping(mapping))
    }

    pub fn find_table_by_name<R: Record>(&self, name: &str) -> Result<Arc<TableMapping<R>>> {
        let registered = self
            .inner
            .tables
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .by_name
            .get(name)
            .cloned();
        let Some(registered) = registered else {
            return Err(Error::msg(format!("table {} not registered", name)));
        };
        let record = registered.record;
        registered.mapping.downcast().map_err(|_| {
            Error::msg(format!(
                "table {} is registered for type {}, not {}",
                name,
                record,
                R::record_name()
            ))
        })
    }

    pub fn find_table_by_type<R: Record>(&self) -> Option<Arc<TableMapping<R>>> {
        self.inner
            .tables
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .by_type
            .get(&TypeId::of::<R>())
            .and_then(|v| v.mapping.clone().downcast().ok())
    }
}
