use fedshard_core::error::ShardingError;
use sqlparser::ast::{Query, SetExpr, Statement};
use sqlparser::dialect::MsSqlDialect;
use sqlparser::parser::Parser;

pub fn parse_sql(sql: &str) -> Result<Vec<Statement>, ShardingError> {
    let dialect = MsSqlDialect {};
    Parser::parse_sql(&dialect, sql).map_err(|err| ShardingError::Sql(err.to_string()))
}

/// True when every statement in `sql` is a plain query; an empty batch is not.
///
/// `SELECT ... INTO` and locking clauses such as `FOR UPDATE` count as writes.
pub fn is_read_only(sql: &str) -> Result<bool, ShardingError> {
    let statements = parse_sql(sql)?;
    Ok(!statements.is_empty()
        && statements.iter().all(|stmt| match stmt {
            Statement::Query(query) => query_is_read_only(query),
            _ => false,
        }))
}

fn query_is_read_only(query: &Query) -> bool {
    query.locks.is_empty()
        && query.with.as_ref().map_or(true, |with| {
            with.cte_tables
                .iter()
                .all(|cte| query_is_read_only(&cte.query))
        })
        && body_is_read_only(&query.body)
}

fn body_is_read_only(body: &SetExpr) -> bool {
    match body {
        SetExpr::Select(select) => select.into.is_none(),
        SetExpr::Query(query) => query_is_read_only(query),
        SetExpr::SetOperation { left, right, .. } => {
            body_is_read_only(left) && body_is_read_only(right)
        }
        SetExpr::Values(_) | SetExpr::Table(_) => true,
        _ => false,
    }
}
