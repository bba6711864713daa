//! Text of the federation control statements. Callers pass identifiers and
//! values already quoted by the connection.

pub const USE_FEDERATION_ROOT: &str = "USE FEDERATION ROOT WITH RESET";

pub fn use_federation_member(federation: &str, key: &str, value: &str, filtering: bool) -> String {
    format!(
        "USE FEDERATION {federation} ({key} = {value}) WITH RESET, FILTERING = {};",
        if filtering { "ON" } else { "OFF" }
    )
}

pub fn alter_federation_split(federation: &str, key: &str, value: &str) -> String {
    format!("ALTER FEDERATION {federation} SPLIT AT ({key} = {value})")
}

/// Lists the members of the federation whose quoted name literal is given.
pub fn federation_members_query(federation_literal: &str) -> String {
    format!(
        "SELECT member_id AS id, distribution_name AS distribution_key, \
         CAST(range_low AS NVARCHAR(100)) AS rangeLow, \
         CAST(range_high AS NVARCHAR(100)) AS rangeHigh \
         FROM sys.federation_member_distributions d \
         INNER JOIN sys.federations f ON f.federation_id = d.federation_id \
         WHERE f.name = {federation_literal}"
    )
}
