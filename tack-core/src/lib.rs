mod as_value;
mod database;
mod exec_result;
mod executor;
mod latch;
mod mapping;
mod naming;
mod nullable;
mod operation;
mod record;
mod rows;
mod scope;
mod select;
mod sql_writer;
mod statement;
mod table;
mod util;
mod value;

pub use ::anyhow::Context;
pub use as_value::*;
pub use database::*;
pub use exec_result::*;
pub use executor::*;
pub use latch::*;
pub use mapping::*;
pub use naming::*;
pub use nullable::*;
pub use operation::*;
pub use record::*;
pub use rows::*;
pub use scope::*;
pub use select::*;
pub use sql_writer::*;
pub use statement::*;
pub use table::*;
pub use util::*;
pub use value::*;
pub mod stream {
    pub use ::futures::stream::*;
}
pub use ::futures::future;

pub type Result<T> = anyhow::Result<T>;
pub type Error = anyhow::Error;

/// Builds the argument list of a statement, converting every expression into a [`Value`].
///
/// ```rust
/// use tack_core::{Value, args};
/// let args = args![1, "two", None::<f64>];
/// assert_eq!(args[1], Value::Varchar(Some("two".into())));
/// assert!(args[2].is_null());
/// ```
#[macro_export]
macro_rules! args {
    ($($value:expr),* $(,)?) => {{
        let args: ::std::vec::Vec<$crate::Value> = ::std::vec![$($crate::Value::from($value)),*];
        args
    }};
}
