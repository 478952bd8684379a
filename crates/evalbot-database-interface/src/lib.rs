mod errors;
mod exchange;
mod interface;

pub use errors::{DatabaseError, Result};
pub use exchange::Exchanger;
pub use interface::DbService;
