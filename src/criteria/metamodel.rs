use std::fmt;
use std::marker::PhantomData;

/// Typed handle for a column of entity `E` holding values of type `V`.
///
/// Entities expose these as `const` items so filter call sites stay free of
/// stringly-typed column names:
///
/// ```rust
/// use sqlx_criteria::Attribute;
///
/// struct Employee;
///
/// impl Employee {
///     pub const NAME: Attribute<Employee, String> = Attribute::new("name");
///     pub const SALARY: Attribute<Employee, i64> = Attribute::new("salary");
/// }
/// ```
pub struct Attribute<E, V> {
    name: &'static str,
    _marker: PhantomData<fn(E) -> V>,
}

impl<E, V> Attribute<E, V> {
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            _marker: PhantomData,
        }
    }

    pub const fn name(&self) -> &'static str {
        self.name
    }
}

impl<E, V> Clone for Attribute<E, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E, V> Copy for Attribute<E, V> {}

impl<E, V> fmt::Debug for Attribute<E, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Attribute").field(&self.name).finish()
    }
}

/// Typed handle for a to-one relation from entity `E` to entity `O`.
///
/// `fk_column` is the foreign-key column on the base table, used for presence
/// checks without joining. `join` is the clause that makes `alias` available
/// for conditions on the referenced entity's attributes.
pub struct Relation<E, O> {
    alias: &'static str,
    fk_column: &'static str,
    join: &'static str,
    _marker: PhantomData<fn(E) -> O>,
}

impl<E, O> Relation<E, O> {
    pub const fn new(alias: &'static str, fk_column: &'static str, join: &'static str) -> Self {
        Self {
            alias,
            fk_column,
            join,
            _marker: PhantomData,
        }
    }

    pub const fn alias(&self) -> &'static str {
        self.alias
    }

    pub const fn fk_column(&self) -> &'static str {
        self.fk_column
    }

    pub const fn join(&self) -> &'static str {
        self.join
    }

    /// Erases the entity types, for assembling paths from heterogeneous hops.
    pub const fn step(&self) -> RelationStep {
        RelationStep {
            alias: self.alias,
            join: self.join,
        }
    }

    /// Starts a multi-hop join path continuing into a relation of `O`.
    pub fn then<N>(&self, next: &Relation<O, N>) -> JoinPath<E, N> {
        JoinPath {
            joins: vec![self.join, next.join],
            alias: next.alias,
            _marker: PhantomData,
        }
    }
}

impl<E, O> Clone for Relation<E, O> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E, O> Copy for Relation<E, O> {}

impl<E, O> fmt::Debug for Relation<E, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Relation")
            .field("alias", &self.alias)
            .field("fk_column", &self.fk_column)
            .finish()
    }
}

/// Typed handle for a to-many relation from entity `E` to entity `O`.
///
/// `exists` is the correlated subquery used for non-empty/empty presence
/// checks (`EXISTS (...)` / `NOT EXISTS (...)`).
pub struct CollectionRelation<E, O> {
    alias: &'static str,
    join: &'static str,
    exists: &'static str,
    _marker: PhantomData<fn(E) -> O>,
}

impl<E, O> CollectionRelation<E, O> {
    pub const fn new(alias: &'static str, join: &'static str, exists: &'static str) -> Self {
        Self {
            alias,
            join,
            exists,
            _marker: PhantomData,
        }
    }

    pub const fn alias(&self) -> &'static str {
        self.alias
    }

    pub const fn join(&self) -> &'static str {
        self.join
    }

    pub const fn exists(&self) -> &'static str {
        self.exists
    }
}

impl<E, O> Clone for CollectionRelation<E, O> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E, O> Copy for CollectionRelation<E, O> {}

impl<E, O> fmt::Debug for CollectionRelation<E, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CollectionRelation")
            .field("alias", &self.alias)
            .finish()
    }
}

/// Type-erased hop of a join path: the join clause plus the alias it exposes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RelationStep {
    pub alias: &'static str,
    pub join: &'static str,
}

/// A walked chain of to-one relations ending at entity `O`.
///
/// Conditions placed through the path are qualified with the terminal alias,
/// and every hop's join clause is activated in order.
pub struct JoinPath<E, O> {
    joins: Vec<&'static str>,
    alias: &'static str,
    _marker: PhantomData<fn(E) -> O>,
}

impl<E, O> JoinPath<E, O> {
    /// Builds a path from erased steps, in hop order.
    ///
    /// # Panics
    ///
    /// Panics if `steps` is empty. A path with no hops has no terminal alias;
    /// passing one is a programmer error, not a recoverable condition.
    pub fn from_steps(steps: &[RelationStep]) -> Self {
        assert!(!steps.is_empty(), "join path requires at least one relation");
        Self {
            joins: steps.iter().map(|step| step.join).collect(),
            alias: steps[steps.len() - 1].alias,
            _marker: PhantomData,
        }
    }

    /// Extends the path into a relation of the current terminal entity.
    pub fn then<N>(mut self, next: &Relation<O, N>) -> JoinPath<E, N> {
        self.joins.push(next.join());
        JoinPath {
            joins: self.joins,
            alias: next.alias(),
            _marker: PhantomData,
        }
    }

    pub fn alias(&self) -> &'static str {
        self.alias
    }

    pub fn joins(&self) -> &[&'static str] {
        &self.joins
    }
}

impl<E, O> From<&Relation<E, O>> for JoinPath<E, O> {
    fn from(relation: &Relation<E, O>) -> Self {
        JoinPath {
            joins: vec![relation.join()],
            alias: relation.alias(),
            _marker: PhantomData,
        }
    }
}

impl<E, O> fmt::Debug for JoinPath<E, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JoinPath")
            .field("alias", &self.alias)
            .field("joins", &self.joins)
            .finish()
    }
}
