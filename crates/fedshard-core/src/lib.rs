pub mod connection;
pub mod error;
pub mod memory;
pub mod params;
pub mod types;

pub use connection::Connection;
pub use error::ShardingError;
pub use memory::MemoryConnection;
pub use params::{ConnectionParams, ShardingParams};
pub use types::{Column, DataRow, DataValue, SqlResult};

#[cfg(test)]
mod tests;
