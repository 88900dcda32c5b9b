mod connection;
mod extract;
mod prepared;
mod transaction;

pub use connection::*;
pub use prepared::*;
pub use transaction::*;
