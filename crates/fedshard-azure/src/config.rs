use crate::distribution::DistributionType;
use fedshard_core::error::ShardingError;
use fedshard_core::params::ConnectionParams;

/// Validated `sharding` block of a connection's parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShardConfiguration {
    pub federation_name: String,
    pub distribution_key: String,
    pub distribution_type: DistributionType,
}

impl ShardConfiguration {
    pub fn from_params(params: &ConnectionParams) -> Result<Self, ShardingError> {
        let sharding = params.sharding.clone().unwrap_or_default();
        let federation_name =
            non_empty(sharding.federation_name).ok_or_else(ShardingError::missing_federation_name)?;
        let distribution_key =
            non_empty(sharding.distribution_key).ok_or_else(ShardingError::missing_distribution_key)?;
        let distribution_type = non_empty(sharding.distribution_type)
            .ok_or_else(ShardingError::missing_distribution_type)?
            .parse()?;
        Ok(Self {
            federation_name,
            distribution_key,
            distribution_type,
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
