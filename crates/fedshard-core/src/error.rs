use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ShardingError {
    #[error("{0}")]
    Configuration(String),
    #[error("{0}")]
    Operation(String),
    #[error("{0}")]
    InvalidArgument(String),
    #[error("sql error: {0}")]
    Sql(String),
    #[error("connection error: {0}")]
    Connection(String),
}

impl ShardingError {
    pub fn missing_federation_name() -> Self {
        Self::Configuration(
            "SQLAzure requires a federation name to be set during sharding configuration.".into(),
        )
    }

    pub fn missing_distribution_key() -> Self {
        Self::Configuration(
            "SQLAzure requires a distribution key to be set during sharding configuration.".into(),
        )
    }

    pub fn missing_distribution_type() -> Self {
        Self::Configuration(
            "SQLAzure requires a distribution type to be set during sharding configuration.".into(),
        )
    }

    pub fn unsupported_distribution_type(name: &str) -> Self {
        Self::Configuration(format!("unsupported distribution type: {name}"))
    }

    pub fn active_transaction() -> Self {
        Self::Operation("Cannot switch shard during an active transaction.".into())
    }

    pub fn no_distribution_value() -> Self {
        Self::InvalidArgument(
            "You have to specify a string or integer as shard distribution value.".into(),
        )
    }
}
