use crate::Value;
use time::{OffsetDateTime, PrimitiveDateTime};

/// Field types that can be populated from a result cell.
///
/// `coerce` is the enumerated coercion table of the type: it returns `None` for a NULL cell and
/// for any cell type the field does not accept, in which case `store` leaves `self` untouched.
/// Narrowing into a smaller integer width follows the `as` cast semantics.
pub trait Nullable: Sized {
    fn coerce(value: &Value) -> Option<Self>;
    fn store(&mut self, value: &Value) {
        if let Some(v) = Self::coerce(value) {
            *self = v;
        }
    }
}

/// Something a row cell can be scanned into.
pub trait ScanTarget {
    fn scan(&mut self, value: &Value);
}

/// Wraps a mutable reference to a field so that a NULL column leaves the field with whatever it
/// held before the scan.
///
/// ```rust
/// use tack_core::{NullableField, ScanTarget, Value};
/// let mut age = 7u8;
/// NullableField::new(&mut age).scan(&Value::Null);
/// assert_eq!(age, 7);
/// NullableField::new(&mut age).scan(&Value::Int64(Some(42)));
/// assert_eq!(age, 42);
/// ```
pub struct NullableField<'a, T: Nullable> {
    pub value: &'a mut T,
}

impl<'a, T: Nullable> NullableField<'a, T> {
    pub fn new(value: &'a mut T) -> Self {
        Self { value }
    }
}

impl<T: Nullable> ScanTarget for NullableField<'_, T> {
    fn scan(&mut self, value: &Value) {
        if value.is_null() {
            return;
        }
        self.value.store(value);
    }
}

fn integer_of(value: &Value) -> Option<i64> {
    match value {
        Value::Boolean(Some(v)) => Some(*v as i64),
        Value::UInt64(Some(v)) => Some(*v as i64),
        Value::Varchar(Some(v)) => v.trim().parse::<i64>().ok(),
        _ => value.as_integer(),
    }
}

fn float_of(value: &Value) -> Option<f64> {
    match value {
        Value::Varchar(Some(v)) => v.trim().parse::<f64>().ok(),
        _ => value.as_float(),
    }
}

fn bool_of(value: &Value) -> Option<bool> {
    match value {
        Value::Boolean(Some(v)) => Some(*v),
        Value::Varchar(Some(v)) => match v.trim().to_ascii_lowercase().as_str() {
            "1" | "t" | "true" => Some(true),
            "0" | "f" | "false" => Some(false),
            _ => None,
        },
        _ => value.as_integer().map(|v| v != 0),
    }
}

macro_rules! impl_nullable {
    ($extract:ident => $($target:ty),+ $(,)?) => {
        $(
            impl Nullable for $target {
                fn coerce(value: &Value) -> Option<Self> {
                    $extract(value).map(|v| v as $target)
                }
            }
        )+
    };
}

impl_nullable!(integer_of => i8, i16, i32, i64, isize, u8, u16, u32, usize);
impl_nullable!(float_of => f32, f64);

impl Nullable for u64 {
    fn coerce(value: &Value) -> Option<Self> {
        match value {
            Value::UInt64(Some(v)) => Some(*v),
            Value::Varchar(Some(v)) => v
                .trim()
                .parse::<u64>()
                .ok()
                .or_else(|| integer_of(value).map(|v| v as u64)),
            _ => integer_of(value).map(|v| v as u64),
        }
    }
}

impl Nullable for bool {
    fn coerce(value: &Value) -> Option<Self> {
        bool_of(value)
    }
}

impl Nullable for String {
    fn coerce(value: &Value) -> Option<Self> {
        match value {
            Value::Varchar(Some(v)) => Some(v.clone()),
            Value::Blob(Some(v)) => std::str::from_utf8(v).ok().map(Into::into),
            _ => None,
        }
    }
}

impl Nullable for Vec<u8> {
    fn coerce(value: &Value) -> Option<Self> {
        match value {
            Value::Blob(Some(v)) => Some(v.to_vec()),
            Value::Varchar(Some(v)) => Some(v.as_bytes().to_vec()),
            _ => None,
        }
    }
}

impl Nullable for PrimitiveDateTime {
    fn coerce(value: &Value) -> Option<Self> {
        match value {
            Value::Timestamp(Some(v)) => Some(*v),
            _ => None,
        }
    }
}

impl Nullable for OffsetDateTime {
    fn coerce(value: &Value) -> Option<Self> {
        match value {
            Value::TimestampWithTimezone(Some(v)) => Some(*v),
            _ => None,
        }
    }
}

impl<T: Nullable> Nullable for Option<T> {
    fn coerce(value: &Value) -> Option<Self> {
        T::coerce(value).map(Some)
    }
}
