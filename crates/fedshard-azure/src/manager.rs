use crate::config::ShardConfiguration;
use crate::distribution::{DistributionType, DistributionValue};
use crate::members::ShardInfo;
use crate::parser::is_read_only;
use crate::statement;
use fedshard_core::connection::Connection;
use fedshard_core::error::ShardingError;
use fedshard_core::types::{DataValue, SqlResult};
use metrics::counter;
use tracing::{debug, info, warn};

/// Points a SQL Azure connection at the federation root or at one member.
///
/// The manager borrows the connection mutably for its whole lifetime, so
/// shard switches on one connection are serialised by construction.
#[derive(Debug)]
pub struct SqlAzureShardManager<'a, C: Connection> {
    conn: &'a mut C,
    config: ShardConfiguration,
    filtering_enabled: bool,
    current_distribution_value: Option<DistributionValue>,
}

impl<'a, C: Connection> SqlAzureShardManager<'a, C> {
    pub fn new(conn: &'a mut C) -> Result<Self, ShardingError> {
        let config = ShardConfiguration::from_params(conn.params())?;
        let filtering_enabled = conn
            .params()
            .sharding
            .as_ref()
            .map_or(false, |sharding| sharding.filtering_enabled);
        debug!(
            federation = %config.federation_name,
            key = %config.distribution_key,
            kind = %config.distribution_type,
            "shard manager configured"
        );
        Ok(Self {
            conn,
            config,
            filtering_enabled,
            current_distribution_value: None,
        })
    }

    pub fn federation_name(&self) -> &str {
        &self.config.federation_name
    }

    pub fn distribution_key(&self) -> &str {
        &self.config.distribution_key
    }

    pub fn distribution_type(&self) -> DistributionType {
        self.config.distribution_type
    }

    pub fn filtering_enabled(&self) -> bool {
        self.filtering_enabled
    }

    /// Takes effect on the next `select_shard`.
    pub fn set_filtering_enabled(&mut self, enabled: bool) {
        self.filtering_enabled = enabled;
    }

    /// `None` while connected to the federation root.
    pub fn current_distribution_value(&self) -> Option<&DistributionValue> {
        self.current_distribution_value.as_ref()
    }

    pub fn connection(&self) -> &C {
        &*self.conn
    }

    pub fn select_global(&mut self) -> Result<(), ShardingError> {
        self.ensure_no_transaction()?;
        self.run(statement::USE_FEDERATION_ROOT)?;
        self.current_distribution_value = None;
        counter!("federation_switch_total", "target" => "root").increment(1);
        info!(federation = %self.config.federation_name, "selected federation root");
        Ok(())
    }

    pub fn select_shard(&mut self, value: impl Into<DataValue>) -> Result<(), ShardingError> {
        self.ensure_no_transaction()?;
        let value = DistributionValue::try_from(value.into())?;
        let literal = self.format_value(&value)?;
        let sql = statement::use_federation_member(
            &self.conn.quote_identifier(&self.config.federation_name),
            &self.conn.quote_identifier(&self.config.distribution_key),
            &literal,
            self.filtering_enabled,
        );
        self.run(&sql)?;
        counter!("federation_switch_total", "target" => "member").increment(1);
        info!(federation = %self.config.federation_name, value = %value, "selected federation member");
        self.current_distribution_value = Some(value);
        Ok(())
    }

    /// Lists the federation's members.
    pub fn shards(&mut self) -> Result<Vec<ShardInfo>, ShardingError> {
        let name = self
            .conn
            .quote(&DataValue::String(self.config.federation_name.clone()));
        let sql = statement::federation_members_query(&name);
        debug!(federation = %self.config.federation_name, statement = %sql, "listing federation members");
        let result = self.conn.fetch_all(&sql)?;
        ShardInfo::from_result(&result)
    }

    /// Runs a read-only query on every member and concatenates the rows.
    ///
    /// The previous selection is restored afterwards, also when a member
    /// fails; the first error is returned.
    pub fn query_all(&mut self, sql: &str) -> Result<SqlResult, ShardingError> {
        self.ensure_no_transaction()?;
        if !is_read_only(sql)? {
            return Err(ShardingError::InvalidArgument(format!(
                "only read-only queries can run on all shards: {sql}"
            )));
        }
        let shards = self.shards()?;
        if shards.is_empty() {
            return Err(ShardingError::Operation(format!(
                "no shards found for federation {}",
                self.config.federation_name
            )));
        }

        let previous = self.current_distribution_value.clone();
        let outcome = self.fan_out(&shards, sql);
        let restored = match previous {
            Some(value) => self.select_shard(value),
            None => self.select_global(),
        };
        match (outcome, restored) {
            (Ok(result), Ok(())) => Ok(result),
            (Ok(_), Err(err)) => Err(err),
            (Err(err), restored) => {
                if let Err(restore_err) = restored {
                    warn!(
                        federation = %self.config.federation_name,
                        "failed to restore shard selection: {restore_err}"
                    );
                }
                Err(err)
            }
        }
    }

    /// Splits the member holding `value` into two at that value.
    pub fn split_federation(&mut self, value: impl Into<DataValue>) -> Result<(), ShardingError> {
        self.ensure_no_transaction()?;
        let value = DistributionValue::try_from(value.into())?;
        let literal = self.format_value(&value)?;
        let sql = statement::alter_federation_split(
            &self.conn.quote_identifier(&self.config.federation_name),
            &self.conn.quote_identifier(&self.config.distribution_key),
            &literal,
        );
        self.run(&sql)?;
        info!(federation = %self.config.federation_name, at = %value, "split federation");
        Ok(())
    }

    fn fan_out(&mut self, shards: &[ShardInfo], sql: &str) -> Result<SqlResult, ShardingError> {
        let mut combined: Option<SqlResult> = None;
        for shard in shards {
            self.select_shard(shard.range_low.as_str())?;
            let mut result = self.conn.fetch_all(sql)?;
            debug!(member = shard.id, rows = result.rows.len(), "member query finished");
            combined = Some(match combined.take() {
                Some(mut all) => {
                    all.rows_affected += result.rows_affected;
                    all.rows.append(&mut result.rows);
                    all
                }
                None => result,
            });
        }
        Ok(combined.unwrap_or_default())
    }

    fn ensure_no_transaction(&self) -> Result<(), ShardingError> {
        if self.conn.is_transaction_active() {
            return Err(ShardingError::active_transaction());
        }
        Ok(())
    }

    fn format_value(&self, value: &DistributionValue) -> Result<String, ShardingError> {
        self.config.distribution_type.format_value(value, &*self.conn)
    }

    fn run(&mut self, sql: &str) -> Result<u64, ShardingError> {
        debug!(federation = %self.config.federation_name, statement = sql, "issuing federation statement");
        self.conn.exec(sql)
    }
}
