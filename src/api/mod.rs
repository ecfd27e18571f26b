pub mod error;
pub mod extract;
pub mod handlers;
pub mod item_handlers;
pub mod routes;
pub mod summary_handlers;

pub use error::*;
pub use extract::*;
pub use handlers::*;
pub use item_handlers::*;
pub use routes::*;
pub use summary_handlers::*;
