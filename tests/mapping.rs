#[cfg(test)]
#[allow(non_snake_case)]
mod tests {
    use tack::{AsValue, ConfigTags, Nullable, Record, TableMapping, Tag, Value, to_snake_case};

    #[derive(Record, Default, Debug, Clone, PartialEq)]
    pub struct Foo {
        pub ONE: String,
        #[sql = ",primary"]
        pub two: i32,
        #[sql = "tree"]
        pub Three: bool,
        pub Four: i32,
        #[sql = "-"]
        pub Five: i32,
        six: String,
    }

    #[derive(Record, Default, Debug)]
    pub struct Policies {
        #[sql = "id,primary"]
        pub id: i64,
        #[sql = "other_id,primary"]
        pub other_id: i64,
        #[sql(",readonly")]
        pub created: String,
        #[sql = ",noinsert"]
        pub revision: u32,
        #[sql = ",noupdate"]
        pub author: String,
        #[sql = ",noinsert,noupdate,whatever"]
        pub computed: f64,
        pub r#type: String,
        pub(crate) visible_in_crate: i8,
    }

    /// The mixed case field of the `Foo` scenario, left untagged
    #[derive(Record, Default, Debug)]
    pub struct MixedCase {
        pub ONE: String,
        #[sql = ",primary"]
        pub TwO: i32,
        #[sql = "tree"]
        pub Three: bool,
        pub Four: i32,
    }

    #[derive(Record, Default, Debug)]
    pub struct Tagged<T: AsValue + Nullable + Clone> {
        #[sql = "id,primary"]
        pub id: i64,
        pub payload: T,
    }

    #[derive(Record, Default, Debug)]
    pub struct Empty {
        hidden: i32,
    }

    #[derive(Record, Default, Debug)]
    pub struct Clash {
        pub first: i32,
        #[sql = "first"]
        pub second: i32,
    }

    #[test]
    fn foo() {
        let mapping = TableMapping::<Foo>::new("foos").expect("Could not map Foo");
        assert_eq!(mapping.name(), "foos");
        assert_eq!(
            mapping.column_names().collect::<Vec<_>>(),
            ["one", "two", "tree", "four"]
        );
        assert_eq!(mapping.bindings().len(), 4);
        assert_eq!(mapping.primary_key().map(|v| v.field), Some("two"));
        assert_eq!(
            mapping.select_sql(&Default::default()),
            "SELECT one,two,tree,four FROM foos"
        );
        assert_eq!(
            mapping.insert_sql(),
            "INSERT INTO foos (one,tree,four) VALUES (?,?,?)"
        );
        assert_eq!(
            mapping.update_sql(),
            "UPDATE foos SET one = ?,tree = ?,four = ? WHERE two = ?"
        );
    }

    #[test]
    fn mixed_case() {
        assert_eq!(to_snake_case("TwO"), "tw_o");
        let mapping = TableMapping::<MixedCase>::new("foos").expect("Could not map MixedCase");
        assert_eq!(
            mapping.select_sql(&Default::default()),
            "SELECT one,tw_o,tree,four FROM foos"
        );
        assert_eq!(
            mapping.update_sql(),
            "UPDATE foos SET one = ?,tree = ?,four = ? WHERE tw_o = ?"
        );
    }

    #[test]
    fn generic_record() {
        let mapping =
            TableMapping::<Tagged<String>>::new("tagged").expect("Could not map Tagged");
        assert_eq!(
            mapping.insert_sql(),
            "INSERT INTO tagged (payload) VALUES (?)"
        );
        let mut record = Tagged {
            id: 1,
            payload: String::from("before"),
        };
        mapping
            .scan(&mut record, &[Value::Null, Value::Varchar(Some("after".into()))])
            .expect("Could not scan");
        assert_eq!(record.id, 1);
        assert_eq!(record.payload, "after");
        assert_eq!(Tagged::<i32>::record_name(), "Tagged");
    }

    #[test]
    fn foo_args() {
        let mapping = TableMapping::<Foo>::new("foos").expect("Could not map Foo");
        let foo = Foo {
            ONE: "blargh".into(),
            two: 7,
            Three: true,
            Four: 4,
            Five: 5,
            six: "six".into(),
        };
        assert_eq!(
            mapping.insert_args(&foo),
            [
                Value::Varchar(Some("blargh".into())),
                Value::Boolean(Some(true)),
                Value::Int32(Some(4)),
            ]
        );
        assert_eq!(
            mapping.update_args(&foo),
            [
                Value::Varchar(Some("blargh".into())),
                Value::Boolean(Some(true)),
                Value::Int32(Some(4)),
                Value::Int32(Some(7)),
            ]
        );
    }

    #[test]
    fn foo_scan() {
        let mapping = TableMapping::<Foo>::new("foos").expect("Could not map Foo");
        let mut foo = Foo {
            ONE: "blargh".into(),
            ..Default::default()
        };
        mapping
            .scan(
                &mut foo,
                &[
                    Value::Null,
                    Value::Int64(Some(12)),
                    Value::Int64(Some(1)),
                    Value::Varchar(Some("44".into())),
                ],
            )
            .expect("Could not scan");
        assert_eq!(foo.ONE, "blargh");
        assert_eq!(foo.two, 12);
        assert!(foo.Three);
        assert_eq!(foo.Four, 44);
        assert!(mapping.scan(&mut foo, &[Value::Null]).is_err());
        let created = mapping.create();
        assert_eq!(created, Foo::default());
    }

    #[test]
    fn excluded_fields_never_appear() {
        let mapping = TableMapping::<Foo>::new("foos").expect("Could not map Foo");
        for sql in [
            mapping.select_sql(&Default::default()),
            mapping.count_sql(&Default::default()),
            mapping.insert_sql(),
            mapping.update_sql(),
        ] {
            assert!(!sql.contains("five"), "{}", sql);
            assert!(!sql.contains("six"), "{}", sql);
        }
    }

    #[test]
    fn policies() {
        let mapping = TableMapping::<Policies>::new("policies").expect("Could not map Policies");
        assert_eq!(
            mapping.column_names().collect::<Vec<_>>(),
            [
                "id",
                "other_id",
                "created",
                "revision",
                "author",
                "computed",
                "type",
                "visible_in_crate"
            ]
        );
        assert_eq!(mapping.primary_key().map(|v| v.column.as_str()), Some("id"));
        let other = &mapping.bindings()[1];
        assert!(other.insertable, "Only the first primary flag counts");
        assert!(other.updatable);
        assert_eq!(
            mapping.insert_sql(),
            "INSERT INTO policies (other_id,author,type,visible_in_crate) VALUES (?,?,?,?)"
        );
        assert_eq!(
            mapping.update_sql(),
            "UPDATE policies SET other_id = ?,revision = ?,type = ?,visible_in_crate = ? WHERE id = ?"
        );
    }

    #[test]
    fn degenerate() {
        let mapping = TableMapping::<Empty>::new("empties").expect("Could not map Empty");
        assert!(mapping.bindings().is_empty());
        assert!(mapping.primary_key().is_none());
        assert_eq!(mapping.select_sql(&Default::default()), "SELECT  FROM empties");
        assert_eq!(mapping.update_sql(), "");
        assert!(mapping.update_args(&Empty::default()).is_empty());
    }

    #[test]
    fn duplicated_column() {
        assert!(TableMapping::<Clash>::new("clashes").is_err());
    }

    #[test]
    fn config_tags() {
        let mut mapping = TableMapping::<Foo>::new("foos").expect("Could not map Foo");
        let tags = ConfigTags::new()
            .tag("ONE", "uno,primary")
            .tag("Five", "cinque");
        mapping.configure(Some(&tags)).expect("Could not configure");
        assert_eq!(
            mapping.column_names().collect::<Vec<_>>(),
            ["uno", "two", "three", "four", "cinque"]
        );
        assert_eq!(mapping.primary_key().map(|v| v.field), Some("ONE"));
        assert_eq!(
            mapping.update_sql(),
            "UPDATE foos SET two = ?,three = ?,four = ?,cinque = ? WHERE uno = ?"
        );
        mapping.configure(None).expect("Could not configure");
        assert_eq!(mapping.primary_key().map(|v| v.field), Some("two"));
    }

    #[test]
    fn tags() {
        assert_eq!(Tag::parse(""), Tag::default());
        assert!(Tag::parse("-").excluded);
        assert!(!Tag::parse("-x").excluded);
        let tag = Tag::parse("name,readonly,primary,unknown");
        assert_eq!(tag.column, "name");
        assert!(tag.readonly && tag.primary && !tag.no_insert && !tag.no_update);
        let tag = Tag::parse(",noinsert,noupdate");
        assert_eq!(tag.column, "");
        assert!(tag.no_insert && tag.no_update && !tag.readonly);
    }

    #[test]
    fn record_fields() {
        let fields = Policies::fields();
        assert_eq!(Policies::record_name(), "Policies");
        assert_eq!(fields[0].tag, "id,primary");
        assert_eq!(fields[2].tag, ",readonly");
        assert_eq!(fields[6].name, "type");
        assert_eq!(fields[6].tag, "");
        let mut record = Policies::default();
        (fields[6].set)(&mut record, &Value::Varchar(Some("kind".into())));
        assert_eq!((fields[6].get)(&record), Value::Varchar(Some("kind".into())));
    }
}
