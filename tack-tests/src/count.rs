use indoc::indoc;
use std::sync::LazyLock;
use tack::{Connection, Database, Record, args};
use tokio::sync::Mutex;

#[derive(Record, Default, Debug, Clone)]
pub struct Reading {
    #[sql = "id,primary"]
    pub id: i64,
    pub sensor: String,
    pub celsius: f64,
}

static MUTEX: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));

pub async fn count<C: Connection>(database: &Database<C>) {
    let _lock = MUTEX.lock().await;
    let operation = database.operation();

    // Setup
    operation
        .exec(
            indoc! {"
                DROP TABLE IF EXISTS readings;
                CREATE TABLE readings (
                    id INTEGER PRIMARY KEY,
                    sensor TEXT NOT NULL,
                    celsius REAL NOT NULL
                );
            "},
            [],
        )
        .await;

    // Empty table
    let select = operation
        .select::<Reading>("readings")
        .filter("sensor = ?", ["kitchen"]);
    assert_eq!(select.count().row_count().await, 0);
    assert!(!operation.is_err(), "{:?}", operation.error());

    let table = operation.table::<Reading>("readings");
    for (sensor, celsius) in [
        ("kitchen", 21.5),
        ("kitchen", 22.0),
        ("garage", 9.25),
        ("kitchen", 23.5),
    ] {
        let mut reading = Reading {
            sensor: sensor.into(),
            celsius,
            ..Default::default()
        };
        table.save(&mut reading).await;
    }

    // Ordering and paging are ignored
    let count = select.clone().order("celsius").limit(1).offset(2).count();
    assert_eq!(count.sql(), "SELECT COUNT(*) FROM readings WHERE sensor = ?");
    assert_eq!(count.row_count().await, 3);
    assert_eq!(
        operation
            .select::<Reading>("readings")
            .filter("celsius > ?", args![20])
            .count()
            .row_count()
            .await,
        3
    );
    assert_eq!(
        operation
            .select::<Reading>("readings")
            .count()
            .row_count()
            .await,
        4
    );

    // Floating point columns scan back
    let warmest = operation
        .select::<Reading>("readings")
        .order("celsius DESC")
        .limit(1)
        .all_objects()
        .await;
    assert_eq!(warmest.len(), 1);
    assert_eq!(warmest[0].celsius, 23.5);

    operation
        .into_result()
        .expect("The operation is expected to succeed");
}
