pub mod config;
pub mod distribution;
pub mod manager;
pub mod members;
pub mod parser;
pub mod statement;

pub use config::ShardConfiguration;
pub use distribution::{DistributionType, DistributionValue};
pub use manager::SqlAzureShardManager;
pub use members::ShardInfo;
pub use parser::parse_sql;
