use fedshard_core::connection::Connection;
use fedshard_core::error::ShardingError;
use fedshard_core::types::DataValue;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Column type of a federation's distribution key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DistributionType {
    Integer,
    BigInt,
    String,
    Guid,
}

impl DistributionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DistributionType::Integer => "integer",
            DistributionType::BigInt => "bigint",
            DistributionType::String => "string",
            DistributionType::Guid => "guid",
        }
    }

    /// Renders `value` as a literal for this key type, quoted by `conn`.
    pub fn format_value<C: Connection + ?Sized>(
        &self,
        value: &DistributionValue,
        conn: &C,
    ) -> Result<String, ShardingError> {
        let literal = match (self, value) {
            (DistributionType::Integer, _) => {
                let n = self.parse_int(value)?;
                i32::try_from(n).map_err(|_| self.mismatch(value))?;
                DataValue::Int64(n)
            }
            (DistributionType::BigInt, _) => DataValue::Int64(self.parse_int(value)?),
            (DistributionType::String, DistributionValue::Int(n)) => DataValue::String(n.to_string()),
            (DistributionType::String, DistributionValue::String(s)) => DataValue::String(s.clone()),
            (DistributionType::Guid, DistributionValue::String(s)) => {
                let guid = Uuid::parse_str(s.trim()).map_err(|_| self.mismatch(value))?;
                DataValue::String(guid.hyphenated().to_string())
            }
            (DistributionType::Guid, DistributionValue::Int(_)) => return Err(self.mismatch(value)),
        };
        Ok(conn.quote(&literal))
    }

    fn parse_int(&self, value: &DistributionValue) -> Result<i64, ShardingError> {
        match value {
            DistributionValue::Int(n) => Ok(*n),
            DistributionValue::String(s) => s.trim().parse().map_err(|_| self.mismatch(value)),
        }
    }

    fn mismatch(&self, value: &DistributionValue) -> ShardingError {
        ShardingError::InvalidArgument(format!(
            "distribution value {value} is not a valid {} key",
            self.as_str()
        ))
    }
}

impl FromStr for DistributionType {
    type Err = ShardingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "integer" | "int" => Ok(DistributionType::Integer),
            "bigint" => Ok(DistributionType::BigInt),
            "string" => Ok(DistributionType::String),
            "guid" | "uniqueidentifier" => Ok(DistributionType::Guid),
            _ => Err(ShardingError::unsupported_distribution_type(s)),
        }
    }
}

impl fmt::Display for DistributionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A value selecting one federation member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DistributionValue {
    Int(i64),
    String(String),
}

impl TryFrom<DataValue> for DistributionValue {
    type Error = ShardingError;

    fn try_from(value: DataValue) -> Result<Self, Self::Error> {
        match value {
            DataValue::Int64(n) => Ok(DistributionValue::Int(n)),
            DataValue::String(s) => Ok(DistributionValue::String(s)),
            _ => Err(ShardingError::no_distribution_value()),
        }
    }
}

impl From<DistributionValue> for DataValue {
    fn from(value: DistributionValue) -> Self {
        match value {
            DistributionValue::Int(n) => DataValue::Int64(n),
            DistributionValue::String(s) => DataValue::String(s),
        }
    }
}

impl From<i64> for DistributionValue {
    fn from(value: i64) -> Self {
        DistributionValue::Int(value)
    }
}

impl From<&str> for DistributionValue {
    fn from(value: &str) -> Self {
        DistributionValue::String(value.to_string())
    }
}

impl fmt::Display for DistributionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DistributionValue::Int(n) => write!(f, "{n}"),
            DistributionValue::String(s) => write!(f, "'{s}'"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{DistributionType, DistributionValue};
    use fedshard_core::error::ShardingError;
    use fedshard_core::memory::MemoryConnection;
    use fedshard_core::types::DataValue;

    #[test]
    fn parses_known_type_names() {
        assert_eq!("integer".parse::<DistributionType>(), Ok(DistributionType::Integer));
        assert_eq!("BigInt".parse::<DistributionType>(), Ok(DistributionType::BigInt));
        assert_eq!("string".parse::<DistributionType>(), Ok(DistributionType::String));
        assert_eq!("guid".parse::<DistributionType>(), Ok(DistributionType::Guid));
        assert!(matches!(
            "decimal".parse::<DistributionType>(),
            Err(ShardingError::Configuration(_))
        ));
    }

    #[test]
    fn integer_keys_render_bare() {
        let conn = MemoryConnection::default();
        let ty = DistributionType::Integer;
        assert_eq!(ty.format_value(&DistributionValue::Int(1234), &conn), Ok("1234".into()));
        assert_eq!(ty.format_value(&"-5".into(), &conn), Ok("-5".into()));
        assert!(ty.format_value(&"abc".into(), &conn).is_err());
        assert!(ty.format_value(&DistributionValue::Int(i64::MAX), &conn).is_err());
        assert_eq!(
            DistributionType::BigInt.format_value(&DistributionValue::Int(i64::MAX), &conn),
            Ok(i64::MAX.to_string())
        );
    }

    #[test]
    fn string_and_guid_keys_render_quoted() {
        let conn = MemoryConnection::default();
        assert_eq!(
            DistributionType::String.format_value(&"o'neil".into(), &conn),
            Ok("'o''neil'".into())
        );
        assert_eq!(
            DistributionType::String.format_value(&DistributionValue::Int(7), &conn),
            Ok("'7'".into())
        );
        assert_eq!(
            DistributionType::Guid.format_value(&"936DA01F-9ABD-4D9D-80C7-02AF85C822A8".into(), &conn),
            Ok("'936da01f-9abd-4d9d-80c7-02af85c822a8'".into())
        );
        assert!(DistributionType::Guid.format_value(&"not-a-guid".into(), &conn).is_err());
        assert!(DistributionType::Guid.format_value(&DistributionValue::Int(1), &conn).is_err());
    }

    #[test]
    fn only_strings_and_integers_convert() {
        assert_eq!(
            DistributionValue::try_from(DataValue::Int64(3)),
            Ok(DistributionValue::Int(3))
        );
        for value in [
            DataValue::Null,
            DataValue::Bool(true),
            DataValue::Float64(1.5),
            DataValue::Bytes(vec![1]),
        ] {
            assert_eq!(
                DistributionValue::try_from(value),
                Err(ShardingError::no_distribution_value())
            );
        }
    }
}
