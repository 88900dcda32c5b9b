use indoc::indoc;
use std::sync::LazyLock;
use tack::{ConfigTags, Connection, Database, Record, args};
use tokio::sync::Mutex;

/// Mostly untagged, the configuration is supplied at runtime. The tag on `TwO` is ignored as soon
/// as explicit tags are given, even if they do not mention it.
#[allow(non_snake_case)]
#[derive(Record, Default, Debug, Clone, PartialEq)]
pub struct UntaggedFoo {
    pub ID: i64,
    pub ONE: String,
    #[sql = "blargh"]
    pub TwO: i32,
    pub Three: bool,
    pub Four: i32,
    pub Five: i32,
    six: String,
}

static MUTEX: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));

pub async fn config_tags<C: Connection>(database: &Database<C>) {
    let _lock = MUTEX.lock().await;
    let tags = ConfigTags::from([("ID", ",primary"), ("Three", "tree"), ("Five", "-")]);

    let operation = database.operation();
    let mut table = operation.table::<UntaggedFoo>("untagged_foos");
    table.reconfigure(&tags);
    let mapping = table.mapping().expect("The table is expected to be mapped");
    assert_eq!(
        mapping.column_names().collect::<Vec<_>>(),
        ["id", "one", "tw_o", "tree", "four"]
    );

    // Setup
    operation.exec("DROP TABLE IF EXISTS untagged_foos", []).await;
    operation
        .exec(
            indoc! {"
                CREATE TABLE untagged_foos (
                    id INTEGER NOT NULL PRIMARY KEY,
                    one TEXT,
                    tw_o INT,
                    tree BOOL,
                    four INT
                );
            "},
            [],
        )
        .await;

    operation.begin_transaction().await;
    for (one, two, three, four) in [
        ("one", 2, true, 4),
        ("thing", 5, false, 7),
        ("blargh", 1, true, 5),
        ("sploop", 2, true, 4),
    ] {
        let mut foo = UntaggedFoo {
            ONE: one.into(),
            TwO: two,
            Three: three,
            Four: four,
            Five: 99,
            six: "ignored".into(),
            ..Default::default()
        };
        table.save(&mut foo).await;
        assert_ne!(foo.ID, 0);
    }
    operation.end_transaction().await;
    assert!(
        !operation.is_err(),
        "Failed to insert the foos: {:?}",
        operation.error()
    );

    let foos = table
        .select()
        .filter("tw_o > 1", args![])
        .limit(2)
        .offset(1)
        .all_objects()
        .await;
    let found: Vec<_> = foos
        .iter()
        .map(|v| (v.ID, v.ONE.as_str(), v.TwO, v.Three, v.Four, v.Five))
        .collect();
    assert_eq!(found, [(2, "thing", 5, false, 7, 0), (4, "sploop", 2, true, 4, 0)]);

    // Reconfiguring the registered mapping replaces it for the operations to come, a copy held
    // by a table binding is not affected
    let registered = database
        .register_table::<UntaggedFoo>("untagged_foos")
        .expect("Could not register the untagged_foos table");
    assert!(registered.primary_key().is_none());
    assert_eq!(
        registered.column_names().collect::<Vec<_>>(),
        ["id", "one", "blargh", "three", "four", "five"]
    );
    let mut bound = operation.operation_table(registered.clone());
    bound.reconfigure(&tags);
    assert_eq!(
        bound.mapping().and_then(|v| v.primary_key()).map(|v| v.column.as_str()),
        Some("id")
    );
    assert!(registered.primary_key().is_none());
    let reconfigured = database
        .reconfigure_table::<UntaggedFoo>("untagged_foos", &tags)
        .expect("Could not reconfigure the untagged_foos table");
    assert_eq!(
        reconfigured.insert_sql(),
        "INSERT INTO untagged_foos (one,tw_o,tree,four) VALUES (?,?,?,?)"
    );
    let mut first = UntaggedFoo::default();
    assert!(
        operation
            .from::<UntaggedFoo>("untagged_foos")
            .order("id")
            .first(&mut first)
            .await
    );
    assert_eq!(first.ONE, "one");
    assert_eq!(first.six, "");

    operation
        .into_result()
        .expect("The operation is expected to succeed");
}
