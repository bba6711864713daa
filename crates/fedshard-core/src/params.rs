use serde::Deserialize;

/// Parameters a connection was opened with. Only the pieces the shard
/// manager reads are modelled; other keys in a parameter file are ignored.
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
pub struct ConnectionParams {
    #[serde(default)]
    pub dbname: Option<String>,
    #[serde(default)]
    pub sharding: Option<ShardingParams>,
}

#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ShardingParams {
    #[serde(default)]
    pub federation_name: Option<String>,
    #[serde(default)]
    pub distribution_key: Option<String>,
    #[serde(default)]
    pub distribution_type: Option<String>,
    #[serde(default)]
    pub filtering_enabled: bool,
}

impl ConnectionParams {
    pub fn with_sharding(sharding: ShardingParams) -> Self {
        Self {
            dbname: None,
            sharding: Some(sharding),
        }
    }

    pub fn from_path(path: &str) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> anyhow::Result<Self> {
        let params = toml::from_str(contents)?;
        Ok(params)
    }
}

impl ShardingParams {
    pub fn new(federation_name: &str, distribution_key: &str, distribution_type: &str) -> Self {
        Self {
            federation_name: Some(federation_name.to_string()),
            distribution_key: Some(distribution_key.to_string()),
            distribution_type: Some(distribution_type.to_string()),
            filtering_enabled: false,
        }
    }
}
