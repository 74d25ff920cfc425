use crate::{Expression, Operator, Value};
use std::collections::BTreeMap;

pub const ORDER_PROPERTY: &str = "order";
pub const LIMIT_PROPERTY: &str = "limit";
pub const OFFSET_PROPERTY: &str = "offset";

/// Ordered list of expressions joined by `AND`/`OR`, plus the query properties (order, limit, offset).
///
/// Criteria are expressions too, so they nest: `(A AND (B OR C))`.
///
/// ```
/// # use quarry_core::{Criteria, Expression, Filter, Operator};
/// let mut criteria = Criteria::new();
/// criteria.add(Filter::new("date", ">=", "2019-09-10"));
/// criteria.add_with(Filter::new("salary", ">", 2000), Operator::Or);
/// assert_eq!(criteria.dump(), "(date >= '2019-09-10' OR salary > 2000)");
/// ```
#[derive(Debug, Default)]
pub struct Criteria {
    expressions: Vec<(Option<Operator>, Box<dyn Expression>)>,
    properties: BTreeMap<String, Value>,
}

impl Criteria {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `expression` joined with `AND`.
    pub fn add(&mut self, expression: impl Expression + 'static) -> &mut Self {
        self.add_with(expression, Operator::And)
    }

    /// Appends `expression` joined with `operator`, the first expression never carries one.
    pub fn add_with(
        &mut self,
        expression: impl Expression + 'static,
        operator: Operator,
    ) -> &mut Self {
        let operator = if self.expressions.is_empty() {
            None
        } else {
            Some(operator)
        };
        self.expressions.push((operator, Box::new(expression)));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.expressions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.expressions.len()
    }

    /// The rendered boolean expression, `None` when nothing was added.
    pub fn where_clause(&self) -> Option<String> {
        let result = self.dump();
        if result.is_empty() { None } else { Some(result) }
    }

    /// Stores a property, `Value::Null` (or `None`) marks it as set without a value.
    pub fn set_property(&mut self, property: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.properties.insert(property.into(), value.into());
        self
    }

    /// Value of the property, `None` when it was never set or was set without a value.
    pub fn get_property(&self, property: &str) -> Option<&Value> {
        self.properties.get(property).filter(|v| !v.is_null())
    }

    /// Whether the property was ever set, even without a value.
    pub fn has_property(&self, property: &str) -> bool {
        self.properties.contains_key(property)
    }

    pub fn order_by(&mut self, order: impl Into<String>) -> &mut Self {
        self.set_property(ORDER_PROPERTY, order.into())
    }

    pub fn limit(&mut self, limit: i64) -> &mut Self {
        self.set_property(LIMIT_PROPERTY, limit)
    }

    pub fn offset(&mut self, offset: i64) -> &mut Self {
        self.set_property(OFFSET_PROPERTY, offset)
    }

    /// Property usable in a statement: present and not empty.
    pub(crate) fn clause_property(&self, property: &str) -> Option<&Value> {
        self.get_property(property).filter(|v| !v.is_empty())
    }
}

impl Expression for Criteria {
    fn write_query(&self, out: &mut String) {
        if self.expressions.is_empty() {
            return;
        }
        let mut result = String::with_capacity(self.expressions.len() * 32);
        for (operator, expression) in &self.expressions {
            if let Some(operator) = operator {
                result.push_str(operator.as_str());
            }
            expression.write_query(&mut result);
            result.push(' ');
        }
        out.push('(');
        out.push_str(result.trim());
        out.push(')');
    }
}
