use rusqlite::{
    Row,
    types::{ToSql, ToSqlOutput, Value as SqlValue, ValueRef},
};
use tack_core::{AsValue, Error, Result, Value};
use time::{
    OffsetDateTime, PrimitiveDateTime, format_description::well_known::Rfc3339,
    macros::format_description,
};

fn owned<'a>(value: SqlValue) -> rusqlite::Result<ToSqlOutput<'a>> {
    Ok(ToSqlOutput::Owned(value))
}

/// Binds a [`Value`] as a statement parameter. Timestamps are stored as text: RFC 3339 when
/// they carry an offset, `YYYY-MM-DD HH:MM:SS[.SSS]` otherwise.
pub(crate) struct SqliteArg<'a>(pub(crate) &'a Value);

impl ToSql for SqliteArg<'_> {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        if self.0.is_null() {
            return owned(SqlValue::Null);
        }
        match self.0 {
            Value::Boolean(Some(v)) => owned(SqlValue::Integer(*v as i64)),
            Value::Int8(Some(v)) => owned(SqlValue::Integer(*v as i64)),
            Value::Int16(Some(v)) => owned(SqlValue::Integer(*v as i64)),
            Value::Int32(Some(v)) => owned(SqlValue::Integer(*v as i64)),
            Value::Int64(Some(v)) => owned(SqlValue::Integer(*v)),
            Value::UInt8(Some(v)) => owned(SqlValue::Integer(*v as i64)),
            Value::UInt16(Some(v)) => owned(SqlValue::Integer(*v as i64)),
            Value::UInt32(Some(v)) => owned(SqlValue::Integer(*v as i64)),
            Value::UInt64(Some(v)) => i64::try_from(*v)
                .map(|v| ToSqlOutput::Owned(SqlValue::Integer(v)))
                .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e))),
            Value::Float32(Some(v)) => owned(SqlValue::Real(*v as f64)),
            Value::Float64(Some(v)) => owned(SqlValue::Real(*v)),
            Value::Varchar(Some(v)) => Ok(ToSqlOutput::Borrowed(ValueRef::Text(v.as_bytes()))),
            Value::Blob(Some(v)) => Ok(ToSqlOutput::Borrowed(ValueRef::Blob(&v[..]))),
            Value::Timestamp(Some(v)) => v
                .format(format_description!(
                    "[year]-[month]-[day] [hour]:[minute]:[second].[subsecond]"
                ))
                .map(|v| ToSqlOutput::Owned(SqlValue::Text(v)))
                .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e))),
            Value::TimestampWithTimezone(Some(v)) => v
                .format(&Rfc3339)
                .map(|v| ToSqlOutput::Owned(SqlValue::Text(v)))
                .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e))),
            _ => owned(SqlValue::Null),
        }
    }
}

/// Reads a cell, `decltype` is the declared type of the column (uppercase) when it comes
/// straight from a table.
pub(crate) fn extract_value(row: &Row, index: usize, decltype: Option<&str>) -> Result<Value> {
    let is_bool = decltype.is_some_and(|v| v.starts_with("BOOL"));
    let is_time = decltype.is_some_and(|v| v.contains("TIMESTAMP") || v.contains("DATETIME"));
    Ok(match row.get_ref(index)? {
        ValueRef::Null => Value::Null,
        ValueRef::Integer(v) if is_bool => Value::Boolean(Some(v != 0)),
        ValueRef::Integer(v) => v.as_value(),
        ValueRef::Real(v) => v.as_value(),
        ValueRef::Text(v) => {
            let text = std::str::from_utf8(v).map_err(|e| {
                Error::new(e).context(format!("Column {} does not contain valid UTF-8", index))
            })?;
            if is_time {
                if let Ok(v) = OffsetDateTime::parse(text, &Rfc3339) {
                    return Ok(v.as_value());
                }
                if let Ok(v) = PrimitiveDateTime::parse(
                    text,
                    format_description!(
                        "[year]-[month]-[day] [hour]:[minute]:[second].[subsecond]"
                    ),
                ) {
                    return Ok(v.as_value());
                }
                if let Ok(v) = PrimitiveDateTime::parse(
                    text,
                    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]"),
                ) {
                    return Ok(v.as_value());
                }
            }
            text.as_value()
        }
        ValueRef::Blob(v) => v.as_value(),
    })
}
