//! Exporting built permissions for seeding a backend.

use tracing::debug;

use crate::error::PermissionError;
use crate::types::PermissionRecord;

/// Default table for [`insert_statements`].
pub const DEFAULT_TABLE: &str = "permissions";

/// One upsert statement per record, in record order.
///
/// Columns are `code`, `name`, `type`, `parent_code` and `route_name`; a
/// missing optional value is written as `NULL`.
pub fn insert_statements(records: &[PermissionRecord], table: &str) -> Vec<String> {
    let statements: Vec<String> = records
        .iter()
        .map(|record| {
            format!(
                "INSERT INTO {table} (code, name, type, parent_code, route_name) \
                 VALUES ({}, {}, {}, {}, {}) \
                 ON DUPLICATE KEY UPDATE name = VALUES(name), type = VALUES(type), \
                 parent_code = VALUES(parent_code), route_name = VALUES(route_name);",
                sql_literal(Some(&record.code)),
                sql_literal(Some(&record.name)),
                sql_literal(Some(record.kind.as_ref())),
                sql_literal(record.parent_code.as_deref()),
                sql_literal(record.route_name.as_deref()),
            )
        })
        .collect();

    debug!(
        event = "Export",
        phase = "Sql",
        table = table,
        count = statements.len()
    );
    statements
}

/// All statements as one script, one statement per line.
pub fn insert_script(records: &[PermissionRecord], table: &str) -> String {
    let mut script = insert_statements(records, table).join("\n");
    if !script.is_empty() {
        script.push('\n');
    }
    script
}

/// `CREATE TABLE IF NOT EXISTS` for the permission table written by
/// [`insert_statements`].
pub fn create_table_statement(table: &str) -> String {
    format!(
        "CREATE TABLE IF NOT EXISTS {table} (\n\
         \x20 id BIGINT PRIMARY KEY AUTO_INCREMENT,\n\
         \x20 code VARCHAR(50) NOT NULL UNIQUE,\n\
         \x20 name VARCHAR(100) NOT NULL,\n\
         \x20 type VARCHAR(20) NOT NULL,\n\
         \x20 parent_code VARCHAR(50) NULL,\n\
         \x20 route_name VARCHAR(100) NULL,\n\
         \x20 created_at DATETIME DEFAULT CURRENT_TIMESTAMP,\n\
         \x20 updated_at DATETIME DEFAULT CURRENT_TIMESTAMP ON UPDATE CURRENT_TIMESTAMP,\n\
         \x20 INDEX idx_parent_code (parent_code),\n\
         \x20 INDEX idx_type (type)\n\
         ) ENGINE=InnoDB DEFAULT CHARSET=utf8mb4;"
    )
}

/// The table definition followed by the insert script.
pub fn full_script(records: &[PermissionRecord], table: &str) -> String {
    let inserts = insert_script(records, table);
    if inserts.is_empty() {
        format!("{}\n", create_table_statement(table))
    } else {
        format!("{}\n\n{inserts}", create_table_statement(table))
    }
}

/// The records as a pretty-printed JSON array.
pub fn to_json(records: &[PermissionRecord]) -> Result<String, PermissionError> {
    Ok(serde_json::to_string_pretty(records)?)
}

fn sql_literal(value: Option<&str>) -> String {
    match value {
        Some(text) => format!("'{}'", text.replace('\\', "\\\\").replace('\'', "''")),
        None => "NULL".to_string(),
    }
}
