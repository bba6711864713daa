#[cfg(test)]
mod tests {
    use crate::connection::Connection;
    use crate::error::ShardingError;
    use crate::memory::MemoryConnection;
    use crate::params::{ConnectionParams, ShardingParams};
    use crate::types::{Column, DataValue, SqlResult};
    use tempfile::TempDir;

    #[test]
    fn params_load_from_toml_file() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("params.toml");
        std::fs::write(
            &path,
            r#"
dbname = "salesdb"

[sharding]
federationName = "orders_fed"
distributionKey = "customer_id"
distributionType = "integer"
filteringEnabled = true
"#,
        )
        .expect("write");

        let params = ConnectionParams::from_path(&path.to_string_lossy()).expect("load");
        assert_eq!(params.dbname.as_deref(), Some("salesdb"));
        let sharding = params.sharding.expect("sharding");
        assert_eq!(sharding.federation_name.as_deref(), Some("orders_fed"));
        assert_eq!(sharding.distribution_key.as_deref(), Some("customer_id"));
        assert_eq!(sharding.distribution_type.as_deref(), Some("integer"));
        assert!(sharding.filtering_enabled);
    }

    #[test]
    fn partial_sharding_block_still_loads() {
        let params = ConnectionParams::from_toml_str(
            "[sharding]\ndistributionKey = \"abc\"\n",
        )
        .expect("load");
        let sharding = params.sharding.expect("sharding");
        assert_eq!(sharding.federation_name, None);
        assert_eq!(sharding.distribution_key.as_deref(), Some("abc"));
        assert!(!sharding.filtering_enabled);

        let empty = ConnectionParams::from_toml_str("").expect("load");
        assert_eq!(empty.sharding, None);
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("absent.toml");
        assert!(ConnectionParams::from_path(&path.to_string_lossy()).is_err());
    }

    #[test]
    fn memory_connection_records_and_replays() {
        let params = ConnectionParams::with_sharding(ShardingParams::new("abc", "foo", "integer"));
        let mut conn = MemoryConnection::new(params.clone());
        assert_eq!(conn.params(), &params);
        assert!(!conn.is_transaction_active());
        conn.set_transaction_active(true);
        assert!(conn.is_transaction_active());

        conn.exec("USE FEDERATION ROOT WITH RESET").expect("exec");
        assert_eq!(conn.executed(), ["USE FEDERATION ROOT WITH RESET".to_string()]);

        conn.push_result(SqlResult::from_rows(
            vec![Column::new("id", "int")],
            vec![vec![DataValue::Int64(1)]],
        ));
        let first = conn.fetch_all("SELECT id FROM t").expect("fetch");
        assert_eq!(first.rows.len(), 1);
        let drained = conn.fetch_all("SELECT id FROM t").expect("fetch");
        assert!(drained.rows.is_empty());
        assert_eq!(conn.fetched().len(), 2);
    }

    #[test]
    fn memory_connection_injects_failures_once() {
        let mut conn = MemoryConnection::default();
        conn.fail_next_exec("link down");
        assert_eq!(
            conn.exec("SELECT 1"),
            Err(ShardingError::Connection("link down".into()))
        );
        assert!(conn.exec("SELECT 1").is_ok());
        assert_eq!(conn.executed().len(), 1);

        conn.fail_next_fetch("timeout");
        assert!(conn.fetch_all("SELECT 1").is_err());
        assert!(conn.fetched().is_empty());
    }

    #[test]
    fn memory_connection_fails_matching_statement_once() {
        let mut conn = MemoryConnection::default();
        conn.fail_matching("FROM orders", "member offline");
        assert!(conn.exec("SELECT 1").is_ok());
        assert_eq!(
            conn.fetch_all("SELECT id FROM orders"),
            Err(ShardingError::Connection("member offline".into()))
        );
        assert!(conn.fetch_all("SELECT id FROM orders").is_ok());
        assert_eq!(conn.fetched(), ["SELECT id FROM orders".to_string()]);
    }

    #[test]
    fn error_messages_are_literal() {
        assert_eq!(
            ShardingError::active_transaction().to_string(),
            "Cannot switch shard during an active transaction."
        );
        assert_eq!(
            ShardingError::no_distribution_value().to_string(),
            "You have to specify a string or integer as shard distribution value."
        );
        assert_eq!(
            ShardingError::Sql("bad".into()).to_string(),
            "sql error: bad"
        );
    }

    #[test]
    fn option_values_map_to_null() {
        let absent: Option<i64> = None;
        assert_eq!(DataValue::from(absent), DataValue::Null);
        assert_eq!(DataValue::from(Some(5i64)), DataValue::Int64(5));
        assert_eq!(DataValue::Int64(12).as_text().as_deref(), Some("12"));
        assert_eq!(DataValue::Null.as_text(), None);
    }
}
