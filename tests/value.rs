#[cfg(test)]
mod tests {
    use tack::{AsValue, Value, args, printable_args, truncate_long};
    use time::macros::datetime;

    #[test]
    fn as_value() {
        assert_eq!(true.as_value(), Value::Boolean(Some(true)));
        assert_eq!(5u16.as_value(), Value::UInt16(Some(5)));
        assert_eq!((-3isize).as_value(), Value::Int64(Some(-3)));
        assert_eq!(7usize.as_value(), Value::UInt64(Some(7)));
        assert_eq!(1.25f32.as_value(), Value::Float32(Some(1.25)));
        assert_eq!("hello".as_value(), Value::Varchar(Some("hello".into())));
        assert_eq!(
            vec![1u8, 2, 3].as_value(),
            Value::Blob(Some([1, 2, 3].into()))
        );
        assert_eq!(Some(9i64).as_value(), Value::Int64(Some(9)));
        assert_eq!(None::<String>.as_value(), Value::Varchar(None));
        assert_eq!(
            datetime!(2020-01-01 10:00).as_value(),
            Value::Timestamp(Some(datetime!(2020-01-01 10:00)))
        );
        assert_eq!(
            datetime!(2020-01-01 10:00 UTC).as_value(),
            Value::TimestampWithTimezone(Some(datetime!(2020-01-01 10:00 UTC)))
        );
    }

    #[test]
    fn nulls() {
        assert!(Value::Null.is_null());
        assert!(Value::Varchar(None).is_null());
        assert!(!Value::Int8(Some(0)).is_null());
        // Typed NULLs of the same kind compare equal, different kinds do not
        assert_eq!(Value::Int32(None), Value::Int32(None));
        assert_ne!(Value::Int32(None), Value::Int64(None));
        assert_ne!(Value::Int32(Some(1)), Value::Int64(Some(1)));
    }

    #[test]
    fn zero_key() {
        assert!(Value::Null.is_zero_key());
        assert!(Value::Int64(Some(0)).is_zero_key());
        assert!(Value::UInt8(Some(0)).is_zero_key());
        assert!(Value::Int32(None).is_zero_key());
        assert!(!Value::Int64(Some(12)).is_zero_key());
        assert!(!Value::Varchar(Some("0".into())).is_zero_key());
    }

    #[test]
    fn display() {
        assert_eq!(Value::Null.to_string(), "NULL");
        assert_eq!(Value::Float64(None).to_string(), "NULL");
        assert_eq!(Value::Int16(Some(-4)).to_string(), "-4");
        assert_eq!(Value::UInt64(Some(u64::MAX)).to_string(), u64::MAX.to_string());
        assert_eq!(Value::Boolean(Some(false)).to_string(), "false");
        assert_eq!(Value::Varchar(Some("it's".into())).to_string(), "'it''s'");
        assert_eq!(Value::Blob(Some([0u8; 4].into())).to_string(), "<4 bytes>");
    }

    #[test]
    fn logging_helpers() {
        assert_eq!(
            printable_args(&args![1, "thing", None::<f64>]),
            "[1, 'thing', NULL]"
        );
        assert_eq!(printable_args(&[]), "[]");
        assert_eq!(truncate_long("SELECT 1"), "SELECT 1");
        let long = format!("SELECT {} FROM t", "x,".repeat(400));
        let truncated = truncate_long(&long);
        assert!(truncated.ends_with("..."));
        assert!(truncated.len() <= 500);
        assert!(long.starts_with(truncated.trim_end_matches("...")));
    }

    #[test]
    fn args_macro() {
        let args = args![1u8, 2.5, "three", String::from("four"), Some(true)];
        assert_eq!(
            args,
            [
                Value::UInt8(Some(1)),
                Value::Float64(Some(2.5)),
                Value::Varchar(Some("three".into())),
                Value::Varchar(Some("four".into())),
                Value::Boolean(Some(true)),
            ]
        );
        assert!(args![].is_empty());
    }
}
