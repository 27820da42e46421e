pub mod aliases;
pub mod connection;
pub mod observations;
pub mod pairs;
pub mod players;
pub mod setup;

pub use connection::{create_pool, get_connection, DbConn, DbPool, IN_MEMORY};
pub use setup::{clear_all, ensure_schema, reset_database};
