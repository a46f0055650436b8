/// Placeholder and identifier syntax for the target database.
///
/// The builder only needs these two operations; everything else it emits is
/// dialect-neutral SQL.
pub trait QueryDialect: Send + Sync {
    /// Renders the bind placeholder for the 1-based argument index.
    fn placeholder(&self, index: usize) -> String;

    /// Quotes a single identifier (not a dotted path).
    fn quote_identifier(&self, identifier: &str) -> String;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PostgresDialect;

impl QueryDialect for PostgresDialect {
    fn placeholder(&self, index: usize) -> String {
        format!("${}", index)
    }

    fn quote_identifier(&self, identifier: &str) -> String {
        format!("\"{}\"", identifier.replace('"', "\"\""))
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SqliteDialect;

impl QueryDialect for SqliteDialect {
    fn placeholder(&self, index: usize) -> String {
        format!("?{}", index)
    }

    fn quote_identifier(&self, identifier: &str) -> String {
        format!("\"{}\"", identifier.replace('"', "\"\""))
    }
}
