#[cfg(test)]
mod tests {
    use tack::{Database, Record, Value, args, future::join_all};
    use tack_sqlite::SqliteConnection;

    #[derive(Record, Default, Debug, Clone, PartialEq)]
    struct Note {
        #[sql = "id,primary"]
        pub id: i64,
        pub body: String,
        #[sql = "pinned,noupdate"]
        pub pinned: bool,
    }

    async fn database() -> Database<SqliteConnection> {
        Database::connect("sqlite://:memory:")
            .await
            .expect("Could not open the database")
    }

    #[tokio::test]
    async fn chain_without_intermediate_checks() {
        let database = database().await;
        let operation = database.operation();
        operation
            .exec(
                "CREATE TABLE notes (id INTEGER PRIMARY KEY, body TEXT, pinned BOOLEAN)",
                [],
            )
            .await;
        let mut note = Note {
            body: "first".into(),
            pinned: true,
            ..Default::default()
        };
        operation.save("notes", &mut note).await;
        assert_eq!(note.id, 1);
        note.body = "edited".into();
        note.pinned = false;
        let result = operation.save("notes", &mut note).await;
        assert_eq!(result.rows_affected(), 1);

        let mut stored = Note::default();
        let found = operation
            .select::<Note>("notes")
            .filter("id = ?", [note.id])
            .first(&mut stored)
            .await;
        assert!(found);
        assert_eq!(stored.body, "edited");
        assert!(stored.pinned, "pinned is not updatable");
        operation
            .into_result()
            .expect("The operation is expected to succeed");
    }

    #[tokio::test]
    async fn concurrent_statements() {
        let database = database().await;
        let operation = database.operation();
        operation
            .exec("CREATE TABLE notes (id INTEGER PRIMARY KEY, body TEXT, pinned BOOLEAN)", [])
            .await;
        let inserts = (0..8).map(|i| {
            operation.exec(
                "INSERT INTO notes (body, pinned) VALUES (?, ?)",
                args![format!("note {i}"), i % 2 == 0],
            )
        });
        let results = join_all(inserts).await;
        assert!(results.iter().all(|v| v.rows_affected() == 1));
        drop(results);
        let count = operation.select::<Note>("notes").count();
        assert_eq!(count.row_count().await, 8);
        let pinned = operation
            .select::<Note>("notes")
            .filter("pinned = ?", [true])
            .count();
        assert_eq!(pinned.row_count().await, 4);
        assert!(!operation.is_err());
    }

    #[tokio::test]
    async fn first_error_wins() {
        let database = database().await;
        let mut operation = database.operation();
        let failed = operation.exec("INSERT INTO nowhere VALUES (1)", []).await;
        assert_eq!(failed.rows_affected(), 0);
        assert!(failed.is_err());
        let first = operation
            .error()
            .map(ToString::to_string)
            .expect("The operation is expected to fail");

        operation.set_error(tack::Error::msg("second"));
        operation.exec("CREATE TABLE t (v INTEGER)", []).await;
        let mut rows = operation.query("SELECT 1", []).await;
        assert!(!rows.next().await);
        assert!(rows.values().is_empty());
        let mut note = Note::default();
        assert_eq!(operation.save("notes", &mut note).await.last_insert_id(), 0);
        assert_eq!(note.id, 0);
        assert_eq!(operation.error().map(ToString::to_string), Some(first));
        drop(rows);

        // The table was never created
        operation.reset();
        let mut rows = operation
            .query("SELECT name FROM sqlite_master WHERE type = ?", args!["table"])
            .await;
        assert!(!rows.next().await);
        assert!(rows.error().is_none());
        drop(rows);
        assert!(operation.take_error().is_none());
    }

    #[tokio::test]
    async fn prepared_statement_reuse() {
        let database = database().await;
        let operation = database.operation();
        operation
            .exec("CREATE TABLE notes (id INTEGER PRIMARY KEY, body TEXT, pinned BOOLEAN)", [])
            .await;
        let statement = operation
            .prepare("INSERT INTO notes (body, pinned) VALUES (?, ?)")
            .await;
        for body in ["a", "b", "c"] {
            let result = statement.exec([Value::from(body), Value::from(false)]).await;
            assert!(result.last_insert_id() > 0);
        }
        statement.close().await;
        let notes = operation.select::<Note>("notes").order("id DESC").all_objects().await;
        assert_eq!(
            notes.iter().map(|v| v.body.as_str()).collect::<Vec<_>>(),
            ["c", "b", "a"]
        );
        assert!(!operation.is_err(), "{:?}", operation.error());
    }
}
