mod builders;
pub(crate) mod internal;
mod metamodel;
mod models;

pub use builders::*;
pub use internal::{PostgresDialect, QueryDialect, SqliteDialect};
pub use metamodel::*;
pub use models::*;
