pub mod accounts;
pub mod pool;

pub use accounts::*;
pub use pool::*;
