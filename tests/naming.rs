#[cfg(test)]
mod tests {
    use tack::to_snake_case;

    #[test]
    fn camel_case() {
        assert_eq!(to_snake_case("ONE"), "one");
        assert_eq!(to_snake_case("OneTwo"), "one_two");
        assert_eq!(to_snake_case("oneTwo"), "one_two");
        assert_eq!(to_snake_case("ONETwo"), "one_two");
        assert_eq!(to_snake_case("JobID"), "job_id");
        assert_eq!(to_snake_case("HTTPServerURL"), "http_server_url");
        assert_eq!(to_snake_case("Version2Name"), "version2_name");
        assert_eq!(to_snake_case("TwO"), "tw_o");
    }

    #[test]
    fn digits() {
        assert_eq!(to_snake_case("Field1"), "field1");
        assert_eq!(to_snake_case("a1B"), "a1_b");
        assert_eq!(to_snake_case("HTTPServer2Go"), "http_server2_go");
    }

    #[test]
    fn unchanged() {
        for name in ["", "one", "created_at", "a", "two_3"] {
            assert_eq!(to_snake_case(name), name);
            assert_eq!(to_snake_case(&to_snake_case(name)), name);
        }
    }

    #[test]
    fn dashes_and_raw_identifiers() {
        assert_eq!(to_snake_case("first-name"), "first_name");
        assert_eq!(to_snake_case("r#type"), "type");
        assert_eq!(to_snake_case("r#MatchArm"), "match_arm");
    }
}
