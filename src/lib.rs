mod criteria;

pub use crate::criteria::{
    Attribute, AuditingCriteria, BooleanFilter, CollectionRelation, DoubleFilter, Filter,
    InstantFilter, IntegerFilter, JoinPath, LocalDateFilter, LocalDateTimeFilter, LongFilter,
    PostgresDialect, QueryDialect, RangeFilter, Relation, RelationStep, Specification,
    SpecificationBuilder, SqliteDialect, StringFilter, UuidFilter, ZonedDateTimeFilter,
};

pub mod prelude {
    pub use super::{
        Attribute, AuditingCriteria, BooleanFilter, CollectionRelation, DoubleFilter, Filter,
        InstantFilter, IntegerFilter, JoinPath, LocalDateFilter, LocalDateTimeFilter, LongFilter,
        PostgresDialect, QueryDialect, RangeFilter, Relation, RelationStep, Specification,
        SpecificationBuilder, SqliteDialect, StringFilter, UuidFilter, ZonedDateTimeFilter,
    };
}
