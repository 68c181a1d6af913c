//! SQL dialects for rivven-bind
//!
//! A dialect decides how a resolved `${...}` token is written back into the
//! statement text: `$1` for PostgreSQL, `?` for MySQL/MariaDB/SQLite and
//! `@p1` for SQL Server.

/// SQL dialect for vendor-specific placeholder syntax
pub trait SqlDialect: Send + Sync {
    /// Get the dialect name
    fn name(&self) -> &'static str;

    /// Get the placeholder for a 1-based parameter index (e.g., $1, ?, @p1)
    fn placeholder(&self, index: usize) -> String;
}

/// PostgreSQL dialect
#[derive(Debug, Clone, Copy, Default)]
pub struct PostgresDialect;

impl SqlDialect for PostgresDialect {
    fn name(&self) -> &'static str {
        "PostgreSQL"
    }

    fn placeholder(&self, index: usize) -> String {
        format!("${}", index)
    }
}

/// MySQL dialect
#[derive(Debug, Clone, Copy, Default)]
pub struct MySqlDialect;

impl SqlDialect for MySqlDialect {
    fn name(&self) -> &'static str {
        "MySQL"
    }

    fn placeholder(&self, _index: usize) -> String {
        "?".to_string()
    }
}

/// MariaDB dialect
#[derive(Debug, Clone, Copy, Default)]
pub struct MariaDbDialect;

impl SqlDialect for MariaDbDialect {
    fn name(&self) -> &'static str {
        "MariaDB"
    }

    fn placeholder(&self, _index: usize) -> String {
        "?".to_string()
    }
}

/// SQLite dialect
#[derive(Debug, Clone, Copy, Default)]
pub struct SqliteDialect;

impl SqlDialect for SqliteDialect {
    fn name(&self) -> &'static str {
        "SQLite"
    }

    fn placeholder(&self, index: usize) -> String {
        format!("?{}", index)
    }
}

/// SQL Server dialect
#[derive(Debug, Clone, Copy, Default)]
pub struct SqlServerDialect;

impl SqlDialect for SqlServerDialect {
    fn name(&self) -> &'static str {
        "SQL Server"
    }

    fn placeholder(&self, index: usize) -> String {
        format!("@p{}", index)
    }
}

/// Look up a dialect by name, `None` if the name is unknown
pub fn try_dialect_for(name: &str) -> Option<Box<dyn SqlDialect>> {
    match name.to_lowercase().as_str() {
        "postgres" | "postgresql" => Some(Box::new(PostgresDialect)),
        "mysql" => Some(Box::new(MySqlDialect)),
        "mariadb" => Some(Box::new(MariaDbDialect)),
        "sqlite" => Some(Box::new(SqliteDialect)),
        "sqlserver" | "mssql" => Some(Box::new(SqlServerDialect)),
        _ => None,
    }
}

/// Look up a dialect by name, defaulting to PostgreSQL
pub fn dialect_for(name: &str) -> Box<dyn SqlDialect> {
    try_dialect_for(name).unwrap_or_else(|| Box::new(PostgresDialect))
}
