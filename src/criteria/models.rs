use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Per-field filter for a single entity attribute, deserialized from the
/// `field.equals` / `field.in` / `field.specified` query-parameter convention.
///
/// All fields are independently optional; which conditions actually apply (and
/// in which precedence) is decided by the `SpecificationBuilder`, not here.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Filter<T> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub equals: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub not_equals: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contains: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specified: Option<bool>,
    #[serde(rename = "in", default, skip_serializing_if = "Option::is_none")]
    pub in_list: Option<Vec<T>>,
}

impl<T> Default for Filter<T> {
    fn default() -> Self {
        Self {
            equals: None,
            not_equals: None,
            contains: None,
            specified: None,
            in_list: None,
        }
    }
}

impl<T> Filter<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_equals(mut self, value: T) -> Self {
        self.equals = Some(value);
        self
    }

    pub fn with_not_equals(mut self, value: T) -> Self {
        self.not_equals = Some(value);
        self
    }

    pub fn with_contains(mut self, fragment: T) -> Self {
        self.contains = Some(fragment);
        self
    }

    pub fn with_specified(mut self, specified: bool) -> Self {
        self.specified = Some(specified);
        self
    }

    pub fn with_in(mut self, values: Vec<T>) -> Self {
        self.in_list = Some(values);
        self
    }

    /// Returns true if no condition at all has been requested.
    pub fn is_empty(&self) -> bool {
        self.equals.is_none()
            && self.not_equals.is_none()
            && self.contains.is_none()
            && self.specified.is_none()
            && self.in_list.is_none()
    }
}

impl<T: fmt::Display> fmt::Display for Filter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Filter [")?;
        let mut sep = "";
        if let Some(value) = &self.equals {
            write!(f, "{}equals={}", sep, value)?;
            sep = ", ";
        }
        if let Some(value) = &self.not_equals {
            write!(f, "{}notEquals={}", sep, value)?;
            sep = ", ";
        }
        if let Some(fragment) = &self.contains {
            write!(f, "{}contains={}", sep, fragment)?;
            sep = ", ";
        }
        if let Some(values) = &self.in_list {
            write!(f, "{}in=[", sep)?;
            for (i, value) in values.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}", value)?;
            }
            write!(f, "]")?;
            sep = ", ";
        }
        if let Some(specified) = self.specified {
            write!(f, "{}specified={}", sep, specified)?;
        }
        write!(f, "]")
    }
}

/// Filter for text attributes.
///
/// Carries the same fields as `Filter<String>`; the string-specific behavior
/// (negated equality, case-insensitive containment) lives in
/// `SpecificationBuilder::with_string_filter`.
pub type StringFilter = Filter<String>;

/// Filter for totally-ordered attributes, adding the four optional bounds.
///
/// Deserializes from the `field.greaterThan` / `field.lessOrEqualThan` (etc.)
/// query-parameter convention, alongside the embedded base conditions.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RangeFilter<T> {
    #[serde(flatten)]
    pub filter: Filter<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub greater_than: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub greater_or_equal_than: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub less_than: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub less_or_equal_than: Option<T>,
}

impl<T> Default for RangeFilter<T> {
    fn default() -> Self {
        Self {
            filter: Filter::default(),
            greater_than: None,
            greater_or_equal_than: None,
            less_than: None,
            less_or_equal_than: None,
        }
    }
}

impl<T> RangeFilter<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_equals(mut self, value: T) -> Self {
        self.filter.equals = Some(value);
        self
    }

    pub fn with_specified(mut self, specified: bool) -> Self {
        self.filter.specified = Some(specified);
        self
    }

    pub fn with_in(mut self, values: Vec<T>) -> Self {
        self.filter.in_list = Some(values);
        self
    }

    pub fn with_greater_than(mut self, bound: T) -> Self {
        self.greater_than = Some(bound);
        self
    }

    pub fn with_greater_or_equal_than(mut self, bound: T) -> Self {
        self.greater_or_equal_than = Some(bound);
        self
    }

    pub fn with_less_than(mut self, bound: T) -> Self {
        self.less_than = Some(bound);
        self
    }

    pub fn with_less_or_equal_than(mut self, bound: T) -> Self {
        self.less_or_equal_than = Some(bound);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.filter.is_empty()
            && self.greater_than.is_none()
            && self.greater_or_equal_than.is_none()
            && self.less_than.is_none()
            && self.less_or_equal_than.is_none()
    }
}

impl<T: fmt::Display> fmt::Display for RangeFilter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RangeFilter [")?;
        let mut sep = "";
        if let Some(bound) = &self.greater_than {
            write!(f, "{}greaterThan={}", sep, bound)?;
            sep = ", ";
        }
        if let Some(bound) = &self.greater_or_equal_than {
            write!(f, "{}greaterOrEqualThan={}", sep, bound)?;
            sep = ", ";
        }
        if let Some(bound) = &self.less_than {
            write!(f, "{}lessThan={}", sep, bound)?;
            sep = ", ";
        }
        if let Some(bound) = &self.less_or_equal_than {
            write!(f, "{}lessOrEqualThan={}", sep, bound)?;
            sep = ", ";
        }
        if let Some(value) = &self.filter.equals {
            write!(f, "{}equals={}", sep, value)?;
            sep = ", ";
        }
        if let Some(specified) = self.filter.specified {
            write!(f, "{}specified={}", sep, specified)?;
            sep = ", ";
        }
        if let Some(values) = &self.filter.in_list {
            write!(f, "{}in=[", sep)?;
            for (i, value) in values.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}", value)?;
            }
            write!(f, "]")?;
        }
        write!(f, "]")
    }
}

// Typed aliases pinning the generic parameter, so criteria structs can spell
// out their field types the same way on every entity.
pub type BooleanFilter = Filter<bool>;
pub type UuidFilter = Filter<Uuid>;
pub type IntegerFilter = RangeFilter<i32>;
pub type LongFilter = RangeFilter<i64>;
pub type DoubleFilter = RangeFilter<f64>;
/// Filter for UTC instants; ISO-8601 on the wire via chrono's serde support.
pub type InstantFilter = RangeFilter<DateTime<Utc>>;
pub type LocalDateFilter = RangeFilter<NaiveDate>;
pub type LocalDateTimeFilter = RangeFilter<NaiveDateTime>;
/// Filter for date-times carrying an explicit UTC offset, preserved on the wire.
pub type ZonedDateTimeFilter = RangeFilter<DateTime<FixedOffset>>;

/// Reusable criteria fragment for the standard audit columns, for embedding
/// into entity criteria structs that share the auditing convention.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AuditingCriteria {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<StringFilter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_date: Option<InstantFilter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified_by: Option<StringFilter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified_date: Option<InstantFilter>,
}

impl AuditingCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.created_by.is_none()
            && self.created_date.is_none()
            && self.last_modified_by.is_none()
            && self.last_modified_date.is_none()
    }
}
