use indoc::indoc;
use std::sync::LazyLock;
use tack::{Connection, Database, Error, Operation, Record};
use tokio::sync::Mutex;

#[derive(Record, Default, Debug, Clone)]
pub struct Entry {
    #[sql = "id,primary"]
    pub id: i64,
    pub description: String,
    pub amount: i64,
}

static MUTEX: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));

async fn rows<C: Connection>(operation: &Operation<C>) -> u64 {
    operation
        .from::<Entry>("ledger")
        .count()
        .row_count()
        .await
}

pub async fn transaction1<C: Connection>(database: &Database<C>) {
    let _lock = MUTEX.lock().await;
    let mut operation = database.operation();

    // Setup
    operation
        .exec(
            indoc! {"
                DROP TABLE IF EXISTS ledger;
                CREATE TABLE ledger (
                    id INTEGER PRIMARY KEY,
                    description TEXT NOT NULL,
                    amount INTEGER NOT NULL
                );
            "},
            [],
        )
        .await;
    let ledger = database
        .register_table::<Entry>("ledger")
        .expect("Could not register the ledger table");
    let entry = |description: &str, amount| Entry {
        description: description.into(),
        amount,
        ..Default::default()
    };
    operation.save_record(&mut entry("opening", 100)).await;
    operation.save_record(&mut entry("coffee", -3)).await;
    assert!(!operation.is_err(), "{:?}", operation.error());
    assert_eq!(rows(&operation).await, 2);

    // An error inside the transaction rolls it back
    operation.begin_transaction().await;
    assert!(operation.in_transaction().await);
    operation.save_record(&mut entry("rent", -900)).await;
    assert_eq!(rows(&operation).await, 3);
    operation.set_error(Error::msg("forced rollback"));
    operation.end_transaction().await;
    assert!(!operation.in_transaction().await);
    assert_eq!(
        operation.error().map(ToString::to_string).as_deref(),
        Some("forced rollback")
    );
    operation.reset();
    assert_eq!(rows(&operation).await, 2);

    // Transactions do not nest, the active one stays in place
    operation.begin_transaction().await;
    operation.begin_transaction().await;
    assert_eq!(
        operation.error().map(ToString::to_string).as_deref(),
        Some("cannot nest transactions")
    );
    assert!(operation.in_transaction().await);
    operation.end_transaction().await;
    operation.reset();
    assert!(!operation.in_transaction().await);

    // Commit
    operation.begin_transaction().await;
    let table = operation.operation_table(ledger.clone());
    let mut salary = entry("salary", 2500);
    table.save(&mut salary).await;
    salary.amount = 2600;
    table.save(&mut salary).await;
    operation.end_transaction().await;
    assert!(!operation.is_err(), "{:?}", operation.error());
    assert_eq!(rows(&operation).await, 3);
    let mut stored = Entry::default();
    operation
        .from::<Entry>("ledger")
        .filter("id = ?", [salary.id])
        .first(&mut stored)
        .await;
    assert_eq!(stored.amount, 2600);

    // Forced rollback without any error
    operation.begin_transaction().await;
    table.insert(&entry("refund", 40)).await;
    operation.rollback().await;
    assert!(!operation.is_err());
    assert_eq!(rows(&operation).await, 3);

    // Nothing to end
    operation.end_transaction().await;
    assert!(!operation.is_err());

    operation
        .into_result()
        .expect("The operation is expected to succeed");
}
