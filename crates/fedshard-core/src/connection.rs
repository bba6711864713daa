use crate::error::ShardingError;
use crate::params::ConnectionParams;
use crate::types::{DataValue, SqlResult};

/// The slice of a database connection the shard manager drives.
///
/// Quoting defaults follow SQL Server rules; drivers with different escaping
/// override `quote` and `quote_identifier`.
pub trait Connection {
    fn params(&self) -> &ConnectionParams;

    fn is_transaction_active(&self) -> bool;

    /// Runs a statement that returns no rows and reports rows affected.
    fn exec(&mut self, sql: &str) -> Result<u64, ShardingError>;

    fn fetch_all(&mut self, sql: &str) -> Result<SqlResult, ShardingError>;

    fn quote(&self, value: &DataValue) -> String {
        quote_literal(value)
    }

    fn quote_identifier(&self, ident: &str) -> String {
        quote_identifier(ident)
    }
}

pub fn quote_literal(value: &DataValue) -> String {
    match value {
        DataValue::Null => "NULL".to_string(),
        DataValue::Int64(v) => v.to_string(),
        DataValue::Float64(v) => v.to_string(),
        DataValue::Bool(v) => if *v { "1" } else { "0" }.to_string(),
        DataValue::String(v) => format!("'{}'", v.replace('\'', "''")),
        DataValue::Bytes(v) => {
            let hex: String = v.iter().map(|b| format!("{b:02X}")).collect();
            format!("0x{hex}")
        }
    }
}

/// Brackets each dot-separated part: `sys.federations` -> `[sys].[federations]`.
pub fn quote_identifier(ident: &str) -> String {
    ident
        .split('.')
        .map(|part| format!("[{}]", part.replace(']', "]]")))
        .collect::<Vec<_>>()
        .join(".")
}
