use fedshard_core::error::ShardingError;
use fedshard_core::types::{DataValue, SqlResult};

static NULL: DataValue = DataValue::Null;

/// One federation member as listed by `sys.federation_member_distributions`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShardInfo {
    pub id: i64,
    pub distribution_key: String,
    pub range_low: String,
    /// `None` for the last member, whose range is open-ended.
    pub range_high: Option<String>,
}

impl ShardInfo {
    pub fn from_result(result: &SqlResult) -> Result<Vec<ShardInfo>, ShardingError> {
        let id_idx = column(result, "id")?;
        let key_idx = column(result, "distribution_key")?;
        let low_idx = column(result, "rangeLow")?;
        let high_idx = column(result, "rangeHigh")?;

        result
            .rows
            .iter()
            .map(|row| {
                let cell = |idx: usize| row.values.get(idx).unwrap_or(&NULL);
                let id = match cell(id_idx) {
                    DataValue::Int64(n) => *n,
                    DataValue::String(s) => s
                        .trim()
                        .parse()
                        .map_err(|_| ShardingError::Sql(format!("invalid member id: {s}")))?,
                    other => return Err(ShardingError::Sql(format!("invalid member id: {other}"))),
                };
                let distribution_key = cell(key_idx)
                    .as_text()
                    .ok_or_else(|| ShardingError::Sql(format!("member {id} has no distribution key")))?;
                let range_low = cell(low_idx)
                    .as_text()
                    .map(|s| s.trim().to_string())
                    .ok_or_else(|| ShardingError::Sql(format!("member {id} has no low range bound")))?;
                let range_high = cell(high_idx).as_text().map(|s| s.trim().to_string());
                Ok(ShardInfo {
                    id,
                    distribution_key,
                    range_low,
                    range_high,
                })
            })
            .collect()
    }
}

fn column(result: &SqlResult, name: &str) -> Result<usize, ShardingError> {
    result
        .column_index(name)
        .ok_or_else(|| ShardingError::Sql(format!("missing column {name} in federation members")))
}
