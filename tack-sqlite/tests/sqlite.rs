#[cfg(test)]
mod tests {
    use std::{env, path::Path};
    use tack_core::{Connection, Database, Executor, RowSet, Value, stream::StreamExt};
    use tack_sqlite::SqliteConnection;
    use tack_tests::{execute_tests, init_logs};

    #[tokio::test]
    async fn sqlite() {
        init_logs();
        let database = Database::<SqliteConnection>::connect("sqlite://:memory:")
            .await
            .expect("Could not open the database");
        execute_tests(database).await;
    }

    #[tokio::test]
    async fn create_database() {
        init_logs();
        let path = env::temp_dir().join(format!("tack_creation_{}.sqlite", std::process::id()));
        let _ = std::fs::remove_file(&path);
        let url = format!("sqlite://{}?mode=rwc", path.display());
        SqliteConnection::connect(&url)
            .await
            .expect("Could not create the database");
        assert!(
            Path::new(&path).exists(),
            "Database file should be created after connection"
        );
        let _ = std::fs::remove_file(&path);
        assert!(
            SqliteConnection::connect(&format!("sqlite://{}?mode=ro", path.display()))
                .await
                .is_err(),
            "Opening a missing database read only must fail"
        );
        assert!(
            SqliteConnection::connect("postgres://localhost")
                .await
                .is_err(),
            "Only sqlite urls are accepted"
        );
    }

    #[tokio::test]
    async fn driver_errors_are_kept() {
        init_logs();
        let connection = SqliteConnection::connect("sqlite://:memory:")
            .await
            .expect("Could not open the database");
        let error = connection
            .execute("SELECT * FROM missing WHERE id = ?", vec![Value::Int32(Some(1))])
            .await
            .expect_err("The table does not exist");
        assert!(error.downcast_ref::<rusqlite::Error>().is_some());
        let database = Database::new(connection);
        let operation = database.operation();
        operation.query("SELECT * FROM missing", []).await;
        assert!(
            operation
                .error()
                .and_then(|v| v.downcast_ref::<rusqlite::Error>())
                .is_some()
        );
    }

    #[tokio::test]
    async fn values() {
        init_logs();
        let connection = SqliteConnection::connect("sqlite://:memory:")
            .await
            .expect("Could not open the database");
        let RowSet {
            labels,
            rows: mut stream,
        } = connection
            .query(
                "SELECT ? AS a, ? AS b, ? AS c, ? AS d, NULL AS e",
                vec![
                    Value::Boolean(Some(true)),
                    Value::UInt16(Some(7)),
                    Value::Float32(Some(1.5)),
                    Value::Varchar(Some("text".into())),
                ],
            )
            .await
            .expect("Could not run the query");
        assert_eq!(&*labels, ["a", "b", "c", "d", "e"]);
        let row = stream
            .next()
            .await
            .expect("A row is expected")
            .expect("The row is expected to be valid");
        assert_eq!(&*row.labels, ["a", "b", "c", "d", "e"]);
        assert_eq!(
            &*row.values,
            [
                Value::Int64(Some(1)),
                Value::Int64(Some(7)),
                Value::Float64(Some(1.5)),
                Value::Varchar(Some("text".into())),
                Value::Null,
            ]
        );
        assert!(stream.next().await.is_none());
        let error = connection
            .query("SELECT ?", vec![Value::UInt64(Some(u64::MAX))])
            .await;
        assert!(error.is_err(), "Values above i64::MAX cannot be bound");
    }

    #[tokio::test]
    async fn labels_without_rows() {
        init_logs();
        let connection = SqliteConnection::connect("sqlite://:memory:")
            .await
            .expect("Could not open the database");
        connection
            .execute("CREATE TABLE t (id INTEGER PRIMARY KEY, name TEXT)", Vec::new())
            .await
            .expect("Could not create the table");
        let RowSet { labels, mut rows } = connection
            .query("SELECT id, name FROM t WHERE id = ?", vec![Value::Int32(Some(99))])
            .await
            .expect("Could not run the query");
        assert_eq!(&*labels, ["id", "name"]);
        assert!(rows.next().await.is_none());
    }

    #[tokio::test]
    async fn rows_affected_by_ddl() {
        init_logs();
        let connection = SqliteConnection::connect("sqlite://:memory:")
            .await
            .expect("Could not open the database");
        connection
            .execute("CREATE TABLE t (id INTEGER PRIMARY KEY, name TEXT)", Vec::new())
            .await
            .expect("Could not create the table");
        let inserted = connection
            .execute(
                "INSERT INTO t (name) VALUES (?), (?)",
                vec![Value::from("a"), Value::from("b")],
            )
            .await
            .expect("Could not insert");
        assert_eq!(inserted.rows_affected, 2);
        let created = connection
            .execute("CREATE TABLE other (id INTEGER)", Vec::new())
            .await
            .expect("Could not create the table");
        assert_eq!(created.rows_affected, 0, "DDL does not report the previous count");
        let deleted = connection
            .execute("DELETE FROM t", Vec::new())
            .await
            .expect("Could not delete");
        assert_eq!(deleted.rows_affected, 2);
    }
}
