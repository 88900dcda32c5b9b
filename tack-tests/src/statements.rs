use indoc::indoc;
use std::sync::LazyLock;
use tack::{Connection, Database, NullableField, args};
use tokio::sync::Mutex;

static MUTEX: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));

pub async fn statements<C: Connection>(database: &Database<C>) {
    let _lock = MUTEX.lock().await;
    let operation = database.operation();

    // Setup
    operation
        .exec(
            indoc! {"
                DROP TABLE IF EXISTS items;
                CREATE TABLE items (
                    id INTEGER PRIMARY KEY,
                    name TEXT NOT NULL,
                    quantity INTEGER,
                    payload BLOB
                );
            "},
            [],
        )
        .await;

    // Labels are known before the first row, and without any row
    let mut rows = operation.query("SELECT id, name FROM items", []).await;
    assert_eq!(rows.columns(), ["id", "name"]);
    assert!(!rows.next().await);
    assert_eq!(rows.columns(), ["id", "name"]);
    assert!(rows.values().is_empty());

    // Prepared once, executed many times
    let insert = operation
        .prepare("INSERT INTO items (name, quantity, payload) VALUES (?, ?, ?)")
        .await;
    assert_eq!(
        insert.sql().as_deref(),
        Some("INSERT INTO items (name, quantity, payload) VALUES (?, ?, ?)")
    );
    let mut ids = Vec::new();
    for (name, quantity) in [("bolt", 40), ("nut", 0), ("washer", 12)] {
        let result = insert
            .exec(args![name, Some(quantity).filter(|v| *v > 0), name.as_bytes()])
            .await;
        assert_eq!(result.rows_affected(), 1);
        ids.push(result.last_insert_id());
    }
    insert.close().await;
    assert!(!operation.is_err(), "{:?}", operation.error());
    assert_eq!(ids.len(), 3);
    assert!(ids.windows(2).all(|v| v[0] < v[1]));

    // Plain statements report the affected rows
    let result = operation
        .exec("UPDATE items SET quantity = quantity + 1 WHERE quantity > ?", args![1])
        .await;
    assert_eq!(result.rows_affected(), 2);

    // Scan adapters
    let select = operation
        .prepare("SELECT name, quantity, payload FROM items WHERE id >= ? ORDER BY id")
        .await;
    let mut rows = select.query(args![ids[0]]).await;
    assert_eq!(rows.columns(), ["name", "quantity", "payload"]);
    let mut found = Vec::new();
    while rows.next().await {
        assert_eq!(rows.columns(), ["name", "quantity", "payload"]);
        let mut name = String::new();
        let mut quantity = -1i32;
        let mut payload = Vec::<u8>::new();
        rows.scan(&mut [
            &mut NullableField::new(&mut name),
            &mut NullableField::new(&mut quantity),
            &mut NullableField::new(&mut payload),
        ]);
        assert_eq!(payload, name.as_bytes());
        found.push((name, quantity));
    }
    select.close().await;
    assert_eq!(
        found,
        [
            ("bolt".to_string(), 41),
            ("nut".to_string(), -1),
            ("washer".to_string(), 13)
        ]
    );

    operation
        .into_result()
        .expect("The operation is expected to succeed");
}
