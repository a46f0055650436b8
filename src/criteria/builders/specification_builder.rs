use crate::criteria::internal::{wrap_like_query, PostgresDialect, QueryDialect};
use crate::criteria::metamodel::{Attribute, CollectionRelation, JoinPath, Relation};
use crate::criteria::models::{Filter, RangeFilter, StringFilter};
use sqlx::{Arguments, Database, Encode, Type};
use std::marker::PhantomData;

/// A built filter expression: AND-composed conditions, their bound arguments,
/// and the JOIN clauses the conditions rely on.
///
/// A specification with no conditions is neutral; its `where_clause()` renders
/// as the empty string and the query matches every row.
pub struct Specification<'q, DB: Database> {
    /// SQL conditions to be combined with AND in the WHERE clause
    pub conditions: Vec<String>,
    /// Database-specific arguments for parameter binding
    pub arguments: DB::Arguments<'q>,
    /// JOIN clauses required by the conditions (in activation order)
    pub joins: Vec<String>,
    /// Alias used to qualify base-table columns
    pub table_alias: String,
}

impl<'q, DB: Database> Specification<'q, DB> {
    pub fn is_neutral(&self) -> bool {
        self.conditions.is_empty()
    }

    /// Renders the WHERE clause (with a leading space), or the empty string
    /// when the specification is neutral.
    pub fn where_clause(&self) -> String {
        if self.conditions.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", self.conditions.join(" AND "))
        }
    }

    /// Renders the JOIN clauses (with a leading space), or the empty string
    /// when no relation was touched.
    pub fn join_clause(&self) -> String {
        if self.joins.is_empty() {
            String::new()
        } else {
            format!(" {}", self.joins.join(" "))
        }
    }
}

/// Builds composable predicate fragments for entity `E` from declarative
/// filter objects and typed attribute references.
///
/// Every `with_*` method appends zero or more conditions; absent filters
/// (`None`) and filters with no populated field are no-ops, so a request's
/// whole criteria struct can be applied unconditionally:
///
/// ```rust
/// use sqlx::Postgres;
/// use sqlx_criteria::{Attribute, LongFilter, SpecificationBuilder, StringFilter};
///
/// struct Employee;
///
/// impl Employee {
///     pub const NAME: Attribute<Employee, String> = Attribute::new("name");
///     pub const SALARY: Attribute<Employee, i64> = Attribute::new("salary");
/// }
///
/// #[derive(Default)]
/// struct EmployeeCriteria {
///     name: Option<StringFilter>,
///     salary: Option<LongFilter>,
/// }
///
/// let criteria = EmployeeCriteria {
///     name: Some(StringFilter::new().with_contains("smith".to_string())),
///     salary: Some(LongFilter::new().with_greater_than(50_000)),
/// };
///
/// let spec = SpecificationBuilder::<Employee, Postgres>::new()
///     .with_string_filter(criteria.name.as_ref(), &Employee::NAME)
///     .with_range_filter(criteria.salary.as_ref(), &Employee::SALARY)
///     .build();
///
/// assert_eq!(spec.conditions.len(), 2);
/// ```
pub struct SpecificationBuilder<'q, E, DB: Database> {
    pub conditions: Vec<String>,
    pub arguments: DB::Arguments<'q>,
    pub(crate) joins: Vec<String>,
    pub(crate) table_alias: String,
    pub(crate) dialect: Box<dyn QueryDialect>,
    pub(crate) _marker: PhantomData<&'q E>,
}

impl<'q, E, DB> Default for SpecificationBuilder<'q, E, DB>
where
    DB: Database,
    String: for<'a> Encode<'a, DB> + Type<DB>,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<'q, E, DB> SpecificationBuilder<'q, E, DB>
where
    DB: Database,
    String: for<'a> Encode<'a, DB> + Type<DB>,
{
    pub fn new() -> Self {
        Self {
            conditions: Vec::new(),
            arguments: Default::default(),
            joins: Vec::new(),
            table_alias: "base_query".to_string(),
            dialect: Box::new(PostgresDialect),
            _marker: PhantomData,
        }
    }

    /// Sets the alias used to qualify base-table columns.
    ///
    /// Defaults to `"base_query"`, matching the CTE wrapping convention of
    /// paginated list queries. Use the raw table name when composing into a
    /// plain SELECT.
    pub fn with_table_alias(mut self, alias: impl Into<String>) -> Self {
        self.table_alias = alias.into();
        self
    }

    pub fn with_dialect(mut self, dialect: impl QueryDialect + 'static) -> Self {
        self.dialect = Box::new(dialect);
        self
    }

    /// Formats a base-table column as `"alias"."column"`.
    fn format_column(&self, column: &str) -> String {
        format!(
            "{}.{}",
            self.dialect.quote_identifier(&self.table_alias),
            self.dialect.quote_identifier(column)
        )
    }

    fn format_related_column(&self, alias: &str, column: &str) -> String {
        format!(
            "{}.{}",
            self.dialect.quote_identifier(alias),
            self.dialect.quote_identifier(column)
        )
    }

    fn activate_join(&mut self, join: &str) {
        if !self.joins.iter().any(|existing| existing == join) {
            self.joins.push(join.to_string());
        }
    }

    /// Binds a value and returns its placeholder.
    fn bind<V>(&mut self, value: V) -> String
    where
        V: Encode<'q, DB> + Type<DB> + 'q,
    {
        let placeholder = self.dialect.placeholder(self.arguments.len() + 1);
        self.arguments.add(value).unwrap_or_default();
        placeholder
    }

    fn push_equals<V>(&mut self, column: String, value: V)
    where
        V: Encode<'q, DB> + Type<DB> + 'q,
    {
        let placeholder = self.bind(value);
        self.conditions.push(format!("{} = {}", column, placeholder));
    }

    fn push_not_equals<V>(&mut self, column: String, value: V)
    where
        V: Encode<'q, DB> + Type<DB> + 'q,
    {
        let placeholder = self.bind(value);
        self.conditions.push(format!("{} <> {}", column, placeholder));
    }

    fn push_compare<V>(&mut self, column: &str, operator: &str, value: V)
    where
        V: Encode<'q, DB> + Type<DB> + 'q,
    {
        let placeholder = self.bind(value);
        self.conditions
            .push(format!("{} {} {}", column, operator, placeholder));
    }

    fn push_like_upper(&mut self, column: String, fragment: &str) {
        let placeholder = self.bind(wrap_like_query(fragment));
        self.conditions
            .push(format!("UPPER({}) LIKE {}", column, placeholder));
    }

    fn push_specified(&mut self, column: String, specified: bool) {
        let condition = if specified {
            format!("{} IS NOT NULL", column)
        } else {
            format!("{} IS NULL", column)
        };
        self.conditions.push(condition);
    }

    /// An empty candidate list matches nothing.
    fn push_value_in<V>(&mut self, column: String, values: &[V])
    where
        V: Clone + Encode<'q, DB> + Type<DB> + 'q,
    {
        if values.is_empty() {
            #[cfg(feature = "tracing")]
            tracing::warn!(column = %column, "Empty candidate list for IN filter, matching nothing");
            self.conditions.push("FALSE".to_string());
            return;
        }

        let placeholders: Vec<String> = values
            .iter()
            .map(|value| self.bind(value.clone()))
            .collect();
        self.conditions
            .push(format!("{} IN ({})", column, placeholders.join(", ")));
    }

    /// Applies a generic attribute filter.
    ///
    /// When several conditions are populated, `equals` wins over `in`, which
    /// wins over `specified`; the rest are ignored. This precedence is
    /// documented policy, reproduced by regression tests.
    pub fn with_filter<V>(mut self, filter: Option<&Filter<V>>, attribute: &Attribute<E, V>) -> Self
    where
        V: Clone + Encode<'q, DB> + Type<DB> + 'q,
    {
        let Some(filter) = filter else {
            return self;
        };
        let column = self.format_column(attribute.name());

        if let Some(value) = &filter.equals {
            self.push_equals(column, value.clone());
        } else if let Some(values) = &filter.in_list {
            self.push_value_in(column, values);
        } else if let Some(specified) = filter.specified {
            self.push_specified(column, specified);
        }
        self
    }

    /// Applies a text attribute filter, adding negated equality and
    /// case-insensitive containment to the generic conditions.
    ///
    /// Precedence: `equals` > `not_equals` > `in` > `contains` > `specified`,
    /// first populated condition wins.
    pub fn with_string_filter(
        mut self,
        filter: Option<&StringFilter>,
        attribute: &Attribute<E, String>,
    ) -> Self {
        let Some(filter) = filter else {
            return self;
        };
        let column = self.format_column(attribute.name());

        if let Some(value) = &filter.equals {
            self.push_equals(column, value.clone());
        } else if let Some(value) = &filter.not_equals {
            self.push_not_equals(column, value.clone());
        } else if let Some(values) = &filter.in_list {
            self.push_value_in(column, values);
        } else if let Some(fragment) = &filter.contains {
            self.push_like_upper(column, fragment);
        } else if let Some(specified) = filter.specified {
            self.push_specified(column, specified);
        }
        self
    }

    /// Applies a range filter over a totally-ordered attribute.
    ///
    /// `equals` and `in` are early exits; otherwise every populated condition
    /// among `specified` and the four bounds is ANDed in. The asymmetry with
    /// `with_filter` is deliberate: multiple bounds are meaningful together,
    /// multiple identity conditions are not.
    pub fn with_range_filter<V>(
        mut self,
        filter: Option<&RangeFilter<V>>,
        attribute: &Attribute<E, V>,
    ) -> Self
    where
        V: Clone + Encode<'q, DB> + Type<DB> + 'q,
    {
        let Some(filter) = filter else {
            return self;
        };
        let column = self.format_column(attribute.name());

        if let Some(value) = &filter.filter.equals {
            self.push_equals(column, value.clone());
            return self;
        }
        if let Some(values) = &filter.filter.in_list {
            self.push_value_in(column, values);
            return self;
        }

        if let Some(specified) = filter.filter.specified {
            self.push_specified(column.clone(), specified);
        }
        if let Some(bound) = &filter.greater_than {
            self.push_compare(&column, ">", bound.clone());
        }
        if let Some(bound) = &filter.greater_or_equal_than {
            self.push_compare(&column, ">=", bound.clone());
        }
        if let Some(bound) = &filter.less_than {
            self.push_compare(&column, "<", bound.clone());
        }
        if let Some(bound) = &filter.less_or_equal_than {
            self.push_compare(&column, "<=", bound.clone());
        }
        self
    }

    /// Applies a filter to an attribute of a to-one referenced entity.
    ///
    /// Unlike the direct-attribute drivers, every populated condition is ANDed
    /// in. Conditions touching the referenced table activate the relation's
    /// join; the presence check tests the base table's FK column and needs no
    /// join.
    pub fn with_related_filter<O, V>(
        mut self,
        filter: Option<&Filter<V>>,
        relation: &Relation<E, O>,
        attribute: &Attribute<O, V>,
    ) -> Self
    where
        V: Clone + ToString + Encode<'q, DB> + Type<DB> + 'q,
    {
        let Some(filter) = filter else {
            return self;
        };
        if filter.equals.is_some() || filter.in_list.is_some() || filter.contains.is_some() {
            self.activate_join(relation.join());
        }
        let column = self.format_related_column(relation.alias(), attribute.name());

        if let Some(value) = &filter.equals {
            self.push_equals(column.clone(), value.clone());
        }
        if let Some(values) = &filter.in_list {
            self.push_value_in(column.clone(), values);
        }
        if let Some(fragment) = &filter.contains {
            self.push_like_upper(column, &fragment.to_string());
        }
        if let Some(specified) = filter.specified {
            let fk = self.format_column(relation.fk_column());
            self.push_specified(fk, specified);
        }
        self
    }

    /// Applies a range filter to an attribute of a to-one referenced entity:
    /// the related conditions plus every populated bound, all ANDed.
    pub fn with_related_range_filter<O, V>(
        self,
        filter: Option<&RangeFilter<V>>,
        relation: &Relation<E, O>,
        attribute: &Attribute<O, V>,
    ) -> Self
    where
        V: Clone + ToString + Encode<'q, DB> + Type<DB> + 'q,
    {
        let Some(filter) = filter else {
            return self;
        };
        let mut builder = self.with_related_filter(Some(&filter.filter), relation, attribute);

        let has_bound = filter.greater_than.is_some()
            || filter.greater_or_equal_than.is_some()
            || filter.less_than.is_some()
            || filter.less_or_equal_than.is_some();
        if has_bound {
            builder.activate_join(relation.join());
        }
        let column = builder.format_related_column(relation.alias(), attribute.name());

        if let Some(bound) = &filter.greater_than {
            builder.push_compare(&column, ">", bound.clone());
        }
        if let Some(bound) = &filter.greater_or_equal_than {
            builder.push_compare(&column, ">=", bound.clone());
        }
        if let Some(bound) = &filter.less_than {
            builder.push_compare(&column, "<", bound.clone());
        }
        if let Some(bound) = &filter.less_or_equal_than {
            builder.push_compare(&column, "<=", bound.clone());
        }
        builder
    }

    /// Applies a filter through a to-many relation.
    ///
    /// `equals` joins through the relation and tests the referenced attribute;
    /// otherwise `specified` maps to an EXISTS / NOT EXISTS presence check
    /// (non-empty / empty). Other conditions are not supported on collections
    /// and are ignored.
    pub fn with_collection_filter<O, V>(
        mut self,
        filter: Option<&Filter<V>>,
        relation: &CollectionRelation<E, O>,
        attribute: &Attribute<O, V>,
    ) -> Self
    where
        V: Clone + Encode<'q, DB> + Type<DB> + 'q,
    {
        let Some(filter) = filter else {
            return self;
        };

        if let Some(value) = &filter.equals {
            self.activate_join(relation.join());
            let column = self.format_related_column(relation.alias(), attribute.name());
            self.push_equals(column, value.clone());
        } else if let Some(specified) = filter.specified {
            let condition = if specified {
                format!("EXISTS ({})", relation.exists())
            } else {
                format!("NOT EXISTS ({})", relation.exists())
            };
            self.conditions.push(condition);
        }
        self
    }

    /// Applies an identity filter through a multi-hop join path.
    ///
    /// Only `equals` and `in` are meaningful through a walked path
    /// (`equals` wins); every hop's join clause is activated in order.
    pub fn with_path_filter<O, V>(
        mut self,
        filter: Option<&Filter<V>>,
        path: &JoinPath<E, O>,
        attribute: &Attribute<O, V>,
    ) -> Self
    where
        V: Clone + Encode<'q, DB> + Type<DB> + 'q,
    {
        let Some(filter) = filter else {
            return self;
        };
        if filter.equals.is_none() && filter.in_list.is_none() {
            return self;
        }
        for join in path.joins() {
            self.activate_join(join);
        }
        let column = self.format_related_column(path.alias(), attribute.name());

        if let Some(value) = &filter.equals {
            self.push_equals(column, value.clone());
        } else if let Some(values) = &filter.in_list {
            self.push_value_in(column, values);
        }
        self
    }

    /// Adds a single typed comparison against a base-table attribute, for
    /// conditions the filter objects don't express.
    pub fn with_condition<V>(
        mut self,
        attribute: &Attribute<E, V>,
        operator: impl AsRef<str>,
        value: V,
    ) -> Self
    where
        V: Encode<'q, DB> + Type<DB> + 'q,
    {
        let column = self.format_column(attribute.name());
        self.push_compare(&column, operator.as_ref(), value);
        self
    }

    /// Adds a raw SQL condition without quoting or binding.
    ///
    /// # Safety
    ///
    /// The condition is interpolated verbatim; never build it from untrusted
    /// input.
    pub fn with_raw_condition(mut self, condition: impl Into<String>) -> Self {
        self.conditions.push(condition.into());
        self
    }

    pub fn build(self) -> Specification<'q, DB> {
        Specification {
            conditions: self.conditions,
            arguments: self.arguments,
            joins: self.joins,
            table_alias: self.table_alias,
        }
    }
}
