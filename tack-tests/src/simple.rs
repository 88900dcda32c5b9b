use indoc::indoc;
use std::sync::LazyLock;
use tack::{Connection, Database, Record, Value};
use tokio::sync::Mutex;

#[derive(Record, Default, Debug, Clone, PartialEq)]
pub struct Person {
    #[sql = "id,primary"]
    pub id: i64,
    pub name: String,
    #[sql = ",readonly"]
    pub title: String,
    #[sql = ",noinsert"]
    pub score: i32,
    pub nickname: Option<String>,
    #[sql("is_active")]
    pub active: bool,
    secret: String,
}

static MUTEX: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));

pub async fn simple<C: Connection>(database: &Database<C>) {
    let _lock = MUTEX.lock().await;

    database
        .register_table::<Person>("people")
        .expect("Could not register the people table");
    let operation = database.operation();

    // Setup
    operation
        .exec(
            indoc! {"
                DROP TABLE IF EXISTS people;
                CREATE TABLE people (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    name TEXT NOT NULL,
                    title TEXT NOT NULL DEFAULT 'newcomer',
                    score INTEGER NOT NULL DEFAULT 10,
                    nickname TEXT,
                    is_active BOOLEAN NOT NULL DEFAULT 0
                );
            "},
            [],
        )
        .await;
    assert!(
        !operation.is_err(),
        "Failed to create the people table: {:?}",
        operation.error()
    );

    // Insert
    let mut alice = Person {
        name: "Alice".into(),
        title: "boss".into(),
        score: 99,
        nickname: Some("al".into()),
        active: true,
        secret: "hidden".into(),
        ..Default::default()
    };
    let result = operation.save_record(&mut alice).await;
    assert_eq!(result.rows_affected(), 1);
    assert_ne!(alice.id, 0, "The primary key is written back after an insert");
    let mut bob = Person {
        name: "Bob".into(),
        ..Default::default()
    };
    operation.save_record(&mut bob).await;
    assert!(bob.id > alice.id);

    // Read back, readonly and noinsert columns hold the column defaults
    let mut loaded = Person::default();
    let found = operation
        .from::<Person>("people")
        .filter("id = ?", [alice.id])
        .first(&mut loaded)
        .await;
    assert!(found);
    assert_eq!(loaded.id, alice.id);
    assert_eq!(loaded.name, "Alice");
    assert_eq!(loaded.title, "newcomer");
    assert_eq!(loaded.score, 10);
    assert_eq!(loaded.nickname.as_deref(), Some("al"));
    assert!(loaded.active);
    assert_eq!(loaded.secret, "", "Private fields are not mapped");

    // Update, readonly columns are left alone
    loaded.name = "Alice Liddell".into();
    loaded.title = "queen".into();
    loaded.score = 42;
    let result = operation.save_record(&mut loaded).await;
    assert_eq!(result.rows_affected(), 1);
    let mut reloaded = Person::default();
    assert!(
        operation
            .select::<Person>("people")
            .filter("id = ?", [alice.id])
            .first(&mut reloaded)
            .await
    );
    assert_eq!(reloaded.name, "Alice Liddell");
    assert_eq!(reloaded.title, "newcomer");
    assert_eq!(reloaded.score, 42);

    // A NULL column leaves the field as it was
    let mut probe = Person {
        nickname: Some("kept".into()),
        ..Default::default()
    };
    assert!(
        operation
            .from::<Person>("people")
            .filter("id = ?", [bob.id])
            .first(&mut probe)
            .await
    );
    assert_eq!(probe.name, "Bob");
    assert_eq!(probe.nickname.as_deref(), Some("kept"));
    assert!(!probe.active);

    // Nothing found, the destination is untouched
    let mut missing = Person {
        name: "untouched".into(),
        ..Default::default()
    };
    assert!(
        !operation
            .from::<Person>("people")
            .filter("id = ?", [-1])
            .first(&mut missing)
            .await
    );
    assert_eq!(missing.name, "untouched");

    // All objects, in the order returned by the database
    let everyone = operation
        .from::<Person>("people")
        .order("name DESC")
        .all_objects()
        .await;
    let names: Vec<_> = everyone.iter().map(|v| v.name.as_str()).collect();
    assert_eq!(names, ["Bob", "Alice Liddell"]);

    // One object reused for every row
    let mut names = Vec::new();
    let mut reusable = Person::default();
    operation
        .from::<Person>("people")
        .order("id")
        .each_object(&mut reusable, |v| names.push(v.name.clone()))
        .await;
    assert_eq!(names, ["Alice Liddell", "Bob"]);
    assert_eq!(reusable.name, "Bob");

    // Raw rows
    let mut ids = Vec::new();
    operation
        .from::<Person>("people")
        .order("id DESC")
        .each_row(|rows| {
            assert_eq!(rows.columns()[0], "id");
            ids.push(rows.row().and_then(|v| v.get("id")).and_then(Value::as_integer));
        })
        .await;
    assert_eq!(ids, [Some(bob.id), Some(alice.id)]);

    // Paging
    let second = operation
        .from::<Person>("people")
        .order("id")
        .limit(1)
        .offset(1)
        .all_objects()
        .await;
    assert_eq!(second.len(), 1);
    assert_eq!(second[0].id, bob.id);

    operation
        .into_result()
        .expect("The operation is expected to succeed");
}
