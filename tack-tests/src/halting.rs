use indoc::indoc;
use std::sync::LazyLock;
use tack::{Connection, Database, Error, NullableField, Record, args};
use tokio::sync::Mutex;

#[derive(Record, Default, Debug, Clone)]
pub struct Ghost {
    #[sql = "id,primary"]
    pub id: i64,
    pub name: String,
}

#[derive(Record, Default, Debug, Clone)]
pub struct Unregistered {
    #[sql = "id,primary"]
    pub id: i64,
}

#[derive(Record, Default, Debug, Clone)]
pub struct NoKey {
    pub name: String,
}

static MUTEX: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));

pub async fn halting<C: Connection>(database: &Database<C>) {
    let _lock = MUTEX.lock().await;
    let mut operation = database.operation();

    // Setup
    operation
        .exec(
            indoc! {"
                DROP TABLE IF EXISTS ghosts;
                CREATE TABLE ghosts (
                    id INTEGER PRIMARY KEY,
                    name TEXT NOT NULL
                );
            "},
            [],
        )
        .await;
    assert!(!operation.is_err(), "{:?}", operation.error());

    // A failing statement halts the operation
    crate::silent_logs! {
        operation
            .exec("INSERT INTO nowhere (name) VALUES (?)", args!["boo"])
            .await;
    }
    assert!(operation.is_err());
    let first = format!(
        "{:#}",
        operation.error().expect("The operation is expected to fail")
    );

    // Everything that follows does nothing and reports the first error
    let result = operation
        .exec("INSERT INTO ghosts (name) VALUES (?)", args!["casper"])
        .await;
    assert!(result.is_err());
    assert_eq!(result.rows_affected(), 0);
    assert_eq!(result.last_insert_id(), 0);
    let mut rows = operation.query("SELECT id, name FROM ghosts", []).await;
    assert!(!rows.next().await);
    assert!(rows.columns().is_empty());
    let statement = operation.prepare("SELECT 1").await;
    assert!(statement.sql().is_none());
    assert_eq!(statement.exec([]).await.rows_affected(), 0);
    let mut ghost = Ghost {
        name: "slimer".into(),
        ..Default::default()
    };
    assert_eq!(operation.save("ghosts", &mut ghost).await.rows_affected(), 0);
    assert_eq!(ghost.id, 0, "Nothing was inserted, the key is untouched");
    assert!(
        !operation
            .select::<Ghost>("ghosts")
            .first(&mut ghost)
            .await
    );
    assert_eq!(operation.select::<Ghost>("ghosts").count().row_count().await, 0);
    operation.begin_transaction().await;
    assert!(!operation.in_transaction().await);
    operation.set_error(Error::msg("a second error"));
    assert_eq!(format!("{:#}", operation.error().unwrap()), first);

    // Recovery
    let error = operation.take_error().expect("The error is expected");
    assert_eq!(format!("{:#}", error), first);
    assert!(!operation.is_err());
    assert_eq!(operation.select::<Ghost>("ghosts").count().row_count().await, 0);

    // Unregistered tables
    let all = operation.from::<Ghost>("ghosts").all_objects().await;
    assert!(all.is_empty());
    assert_eq!(
        operation.error().map(ToString::to_string).as_deref(),
        Some("table ghosts not registered")
    );
    operation.reset();
    operation.save_record(&mut Unregistered::default()).await;
    assert_eq!(
        operation.error().map(ToString::to_string).as_deref(),
        Some("table for type Unregistered not registered")
    );
    operation.reset();

    // Missing primary key
    database
        .register_table::<NoKey>("no_keys")
        .expect("Could not register the no_keys table");
    operation.save_record(&mut NoKey::default()).await;
    assert_eq!(
        operation.error().map(ToString::to_string).as_deref(),
        Some("table for type NoKey has no primary key")
    );
    operation.reset();
    operation.save("no_keys", &mut NoKey::default()).await;
    assert_eq!(
        operation.error().map(ToString::to_string).as_deref(),
        Some("no primary key tagged for structure NoKey")
    );
    operation.reset();

    // Scanning into the wrong number of targets
    let mut rows = operation.query("SELECT 1, 2", []).await;
    assert!(rows.next().await);
    assert_eq!(rows.values().len(), 2);
    let mut one = 0i64;
    rows.scan(&mut [&mut NullableField::new(&mut one)]);
    assert_eq!(one, 0);
    assert_eq!(
        operation.error().map(ToString::to_string).as_deref(),
        Some("expected 2 destination arguments in scan, not 1")
    );
    assert!(operation.into_result().is_err());
}
