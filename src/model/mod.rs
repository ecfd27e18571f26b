pub mod common;
pub mod item;
pub mod summary;
pub mod transaction;

pub use common::*;
pub use item::*;
pub use summary::*;
pub use transaction::*;
