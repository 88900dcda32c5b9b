#[cfg(test)]
mod tests {
    use tack::{QueryScope, Record, SqlWriter, TableMapping, Value, args};

    #[derive(Record, Default)]
    struct Article {
        #[sql = "id,primary"]
        pub id: u64,
        pub title: String,
        #[sql = "published_at,noupdate"]
        pub published: Option<i64>,
    }

    fn articles() -> TableMapping<Article> {
        TableMapping::new("articles").expect("Could not map Article")
    }

    #[test]
    fn select_clause_order() {
        let mapping = articles();
        let scope = QueryScope::new()
            .offset(100)
            .limit(10)
            .filter("x = ?", [1]);
        assert_eq!(
            mapping.select_sql(&scope),
            "SELECT id,title,published_at FROM articles WHERE x = ? LIMIT 10 OFFSET 100"
        );
        let scope = scope.order("title DESC");
        assert_eq!(
            mapping.select_sql(&scope),
            "SELECT id,title,published_at FROM articles WHERE x = ? ORDER BY title DESC LIMIT 10 OFFSET 100"
        );
        assert_eq!(
            mapping.select_sql(&QueryScope::new().offset(5)),
            "SELECT id,title,published_at FROM articles OFFSET 5"
        );
    }

    #[test]
    fn scope_is_a_value() {
        let base = QueryScope::new().filter("title LIKE ?", ["%rust%"]);
        let first_page = base.clone().limit(20);
        let second_page = first_page.clone().offset(20);
        assert_eq!(base.limit_value(), 0);
        assert_eq!(first_page.offset_value(), 0);
        assert_eq!(second_page.limit_value(), 20);
        assert_eq!(second_page.offset_value(), 20);
        assert_eq!(second_page.where_clause(), "title LIKE ?");
        assert_eq!(second_page.where_args(), [Value::Varchar(Some("%rust%".into()))]);

        // Later calls overwrite
        let scope = base.filter("id = ? OR id = ?", args![1, 2u8]).limit(3).limit(0);
        assert_eq!(scope.where_clause(), "id = ? OR id = ?");
        assert_eq!(
            scope.where_args(),
            [Value::Int32(Some(1)), Value::UInt8(Some(2))]
        );
        assert_eq!(scope.limit_value(), 0);
        assert_eq!(scope.order_clause(), "");
    }

    #[test]
    fn count() {
        let mapping = articles();
        let scope = QueryScope::new()
            .filter("x = ?", [1])
            .order("id")
            .limit(10)
            .offset(4);
        assert_eq!(
            mapping.count_sql(&scope),
            "SELECT COUNT(*) FROM articles WHERE x = ?"
        );
        assert_eq!(
            mapping.count_sql(&QueryScope::new()),
            "SELECT COUNT(*) FROM articles"
        );
    }

    #[test]
    fn writes() {
        let mapping = articles();
        assert_eq!(
            mapping.insert_sql(),
            "INSERT INTO articles (title,published_at) VALUES (?,?)"
        );
        assert_eq!(
            mapping.update_sql(),
            "UPDATE articles SET title = ? WHERE id = ?"
        );
        let article = Article {
            id: 3,
            title: "Ownership".into(),
            published: None,
        };
        assert_eq!(
            mapping.insert_args(&article),
            [Value::Varchar(Some("Ownership".into())), Value::Int64(None)]
        );
        assert_eq!(
            mapping.update_args(&article),
            [Value::Varchar(Some("Ownership".into())), Value::UInt64(Some(3))]
        );
    }

    #[test]
    fn writer_appends() {
        let mapping = articles();
        let writer = SqlWriter::new();
        let mut out = String::from("EXPLAIN ");
        writer.write_count(&mut out, &mapping, &QueryScope::new());
        assert_eq!(out, "EXPLAIN SELECT COUNT(*) FROM articles");
    }
}
