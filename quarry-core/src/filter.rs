use crate::{Expression, Value, util::write_hex};
use std::fmt::Write;

/// `<variable> <operator> <value>` comparison, the leaf of a [`crate::Criteria`].
///
/// The value is turned into its SQL literal when the filter is built:
/// * lists become `(a, b, c)` keeping only integers (bare) and strings (single quoted), anything else is left out
/// * strings are single quoted as they are, no escaping happens here
/// * `NULL`, `TRUE` and `FALSE` for null and booleans
/// * numbers are printed bare
///
/// ```
/// # use quarry_core::{Expression, Filter};
/// assert_eq!(Filter::new("id", "IN", vec![12, 16, 20]).dump(), "id IN (12, 16, 20)");
/// assert_eq!(Filter::new("date", ">", "2019-09-10").dump(), "date > '2019-09-10'");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    variable: String,
    operator: String,
    value: String,
}

impl Filter {
    pub fn new(
        variable: impl Into<String>,
        operator: impl Into<String>,
        value: impl Into<Value>,
    ) -> Self {
        Self {
            variable: variable.into(),
            operator: operator.into(),
            value: Self::transform(&value.into()),
        }
    }

    pub fn variable(&self) -> &str {
        &self.variable
    }

    pub fn operator(&self) -> &str {
        &self.operator
    }

    /// The already rendered literal.
    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn transform(value: &Value) -> String {
        let mut out = String::new();
        match value {
            Value::List(items) => {
                out.push('(');
                let mut first = true;
                for item in items {
                    let separator = if first { "" } else { ", " };
                    match item {
                        Value::Int64(v) => {
                            out.push_str(separator);
                            out.push_str(itoa::Buffer::new().format(*v));
                        }
                        Value::Varchar(v) => {
                            out.push_str(separator);
                            let _ = write!(out, "'{}'", v);
                        }
                        _ => continue,
                    }
                    first = false;
                }
                out.push(')');
            }
            Value::Varchar(v) => {
                let _ = write!(out, "'{}'", v);
            }
            Value::Null => out.push_str("NULL"),
            Value::Boolean(v) => out.push_str(if *v { "TRUE" } else { "FALSE" }),
            Value::Int64(v) => out.push_str(itoa::Buffer::new().format(*v)),
            Value::Float64(v) => {
                let _ = write!(out, "{}", v);
            }
            Value::Blob(v) => write_hex(&mut out, v),
        }
        out
    }
}

impl Expression for Filter {
    fn write_query(&self, out: &mut String) {
        let _ = write!(out, "{} {} {}", self.variable, self.operator, self.value);
    }
}
