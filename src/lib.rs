pub use tack_core::*;
pub use tack_macros::*;
