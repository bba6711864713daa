use crate::connection::Connection;
use crate::error::ShardingError;
use crate::params::ConnectionParams;
use crate::types::SqlResult;
use std::collections::VecDeque;
use tracing::debug;

/// In-memory connection that records statements instead of sending them.
///
/// `fetch_all` pops canned results in FIFO order and falls back to an empty
/// result once the queue is drained. Failures can be injected for the next
/// `exec` or `fetch_all` call, or for the first statement containing a
/// given fragment.
#[derive(Debug, Default)]
pub struct MemoryConnection {
    params: ConnectionParams,
    transaction_active: bool,
    executed: Vec<String>,
    fetched: Vec<String>,
    results: VecDeque<SqlResult>,
    fail_next_exec: Option<String>,
    fail_next_fetch: Option<String>,
    fail_matching: Vec<(String, String)>,
}

impl MemoryConnection {
    pub fn new(params: ConnectionParams) -> Self {
        Self {
            params,
            ..Self::default()
        }
    }

    pub fn set_transaction_active(&mut self, active: bool) {
        self.transaction_active = active;
    }

    pub fn push_result(&mut self, result: SqlResult) {
        self.results.push_back(result);
    }

    pub fn fail_next_exec(&mut self, message: &str) {
        self.fail_next_exec = Some(message.to_string());
    }

    pub fn fail_next_fetch(&mut self, message: &str) {
        self.fail_next_fetch = Some(message.to_string());
    }

    /// Fails the first `exec` or `fetch_all` whose statement contains `fragment`.
    pub fn fail_matching(&mut self, fragment: &str, message: &str) {
        self.fail_matching
            .push((fragment.to_string(), message.to_string()));
    }

    fn take_failure(&mut self, sql: &str) -> Option<String> {
        let idx = self
            .fail_matching
            .iter()
            .position(|(fragment, _)| sql.contains(fragment.as_str()))?;
        Some(self.fail_matching.remove(idx).1)
    }

    /// Statements passed to `exec`, in order.
    pub fn executed(&self) -> &[String] {
        &self.executed
    }

    /// Statements passed to `fetch_all`, in order.
    pub fn fetched(&self) -> &[String] {
        &self.fetched
    }
}

impl Connection for MemoryConnection {
    fn params(&self) -> &ConnectionParams {
        &self.params
    }

    fn is_transaction_active(&self) -> bool {
        self.transaction_active
    }

    fn exec(&mut self, sql: &str) -> Result<u64, ShardingError> {
        if let Some(message) = self.fail_next_exec.take().or_else(|| self.take_failure(sql)) {
            return Err(ShardingError::Connection(message));
        }
        debug!(statement = sql, "memory exec");
        self.executed.push(sql.to_string());
        Ok(0)
    }

    fn fetch_all(&mut self, sql: &str) -> Result<SqlResult, ShardingError> {
        if let Some(message) = self.fail_next_fetch.take().or_else(|| self.take_failure(sql)) {
            return Err(ShardingError::Connection(message));
        }
        debug!(statement = sql, "memory fetch");
        self.fetched.push(sql.to_string());
        Ok(self.results.pop_front().unwrap_or_default())
    }
}
