use indoc::indoc;
use std::sync::LazyLock;
use tack::{Connection, Database, Record};
use time::{OffsetDateTime, PrimitiveDateTime, macros::datetime};
use tokio::sync::Mutex;

#[derive(Record, Debug, Clone, PartialEq)]
pub struct FooTime {
    #[sql = "id,primary"]
    pub id: i64,
    pub created_at: OffsetDateTime,
    pub updated_at: PrimitiveDateTime,
    pub deleted_at: Option<OffsetDateTime>,
}

impl FooTime {
    pub fn new() -> Self {
        Self {
            id: 0,
            created_at: OffsetDateTime::UNIX_EPOCH,
            updated_at: datetime!(1970-01-01 0:00),
            deleted_at: None,
        }
    }
}

static MUTEX: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));

pub async fn times<C: Connection>(database: &Database<C>) {
    let _lock = MUTEX.lock().await;
    database
        .register_table_with("foo_times", FooTime::new)
        .expect("Could not register the foo_times table");
    let operation = database.operation();

    // Setup
    operation
        .exec(
            indoc! {"
                DROP TABLE IF EXISTS foo_times;
                CREATE TABLE foo_times (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    created_at DATETIME,
                    updated_at TIMESTAMP,
                    deleted_at DATETIME
                );
            "},
            [],
        )
        .await;

    let created = datetime!(2016-09-04 14:40 UTC);
    let updated = datetime!(2016-09-16 04:26:40.125);
    let mut foo = FooTime {
        created_at: created,
        updated_at: updated,
        ..FooTime::new()
    };
    let result = operation.save_record(&mut foo).await;
    assert_eq!(result.rows_affected(), 1);
    assert_ne!(foo.id, 0);

    let all = operation.from::<FooTime>("foo_times").all_objects().await;
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].id, foo.id);
    assert_eq!(all[0].created_at, created);
    assert_eq!(all[0].updated_at, updated);
    assert_eq!(all[0].deleted_at, None);

    // Saving and reloading again keeps the values
    let mut reloaded = all[0].clone();
    let deleted = datetime!(2020-02-29 23:59:59 +02:00);
    reloaded.deleted_at = Some(deleted);
    operation.save_record(&mut reloaded).await;
    let mut again = FooTime::new();
    assert!(
        operation
            .from::<FooTime>("foo_times")
            .filter("id = ?", [foo.id])
            .first(&mut again)
            .await
    );
    assert_eq!(again, reloaded);
    assert_eq!(again.deleted_at.map(|v| v.offset()), Some(deleted.offset()));

    operation
        .into_result()
        .expect("The operation is expected to succeed");
}
