pub mod aggregate;
pub mod error;
pub mod items;
pub mod summary;
pub mod validate;

pub use aggregate::*;
pub use error::*;
pub use items::*;
pub use summary::*;
pub use validate::*;
