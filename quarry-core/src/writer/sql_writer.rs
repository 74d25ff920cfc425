use crate::{Criteria, Expression, IndexMap, Value, add_slashes, separated_by};
use std::fmt::Write;

/// Dialect printer converting records and criteria into concrete SQL strings.
///
/// Every method has a default producing plain ANSI-ish SQL, drivers override only what their dialect does differently.
pub trait SqlWriter: Send + Sync {
    /// Emit a single quoted text literal, quotes, backslashes and NUL are escaped with a backslash.
    fn write_string_literal(&self, out: &mut String, value: &str) {
        out.reserve(value.len() + 2);
        out.push('\'');
        add_slashes(out, value);
        out.push('\'');
    }

    /// Append ` WHERE <criteria>` unless the criteria renders to nothing.
    fn write_where(&self, out: &mut String, criteria: &Criteria) {
        let len = out.len();
        out.push_str(" WHERE ");
        let before = out.len();
        criteria.write_query(out);
        if out.len() == before {
            out.truncate(len);
        }
    }

    fn write_order_by(&self, out: &mut String, order: &Value) {
        let _ = write!(out, " ORDER BY {}", order);
    }

    fn write_limit(&self, out: &mut String, limit: &Value) {
        let _ = write!(out, " LIMIT {}", limit);
    }

    fn write_offset(&self, out: &mut String, offset: &Value, _has_limit: bool) {
        let _ = write!(out, " OFFSET {}", offset);
    }

    /// Emit `SELECT * FROM` honoring the `order`, `limit` and `offset` criteria properties.
    fn write_select(&self, out: &mut String, table: &str, criteria: &Criteria) {
        out.reserve(64 + table.len());
        out.push_str("SELECT * FROM ");
        out.push_str(table);
        self.write_where(out, criteria);
        if let Some(order) = criteria.clause_property(crate::ORDER_PROPERTY) {
            self.write_order_by(out, order);
        }
        let limit = criteria.clause_property(crate::LIMIT_PROPERTY);
        if let Some(limit) = limit {
            self.write_limit(out, limit);
        }
        if let Some(offset) = criteria.clause_property(crate::OFFSET_PROPERTY) {
            self.write_offset(out, offset, limit.is_some());
        }
    }

    fn write_count(&self, out: &mut String, table: &str, criteria: &Criteria) {
        out.push_str("SELECT COUNT(1) FROM ");
        out.push_str(table);
        self.write_where(out, criteria);
    }

    /// Emit `DELETE FROM`, the properties of the criteria do not apply here.
    fn write_delete(&self, out: &mut String, table: &str, criteria: &Criteria) {
        out.push_str("DELETE FROM ");
        out.push_str(table);
        self.write_where(out, criteria);
    }

    fn write_select_by_key(&self, out: &mut String, table: &str, primary_key: &str, key: &str) {
        let _ = write!(out, "SELECT * FROM {} WHERE {} = {}", table, primary_key, key);
    }

    fn write_select_max(&self, out: &mut String, table: &str, primary_key: &str) {
        let _ = write!(out, "SELECT MAX({}) FROM {}", primary_key, table);
    }

    fn write_delete_by_key(&self, out: &mut String, table: &str, primary_key: &str, key: &str) {
        let _ = write!(out, "DELETE FROM {} WHERE {} = {}", table, primary_key, key);
    }

    /// Emit INSERT from escaped values keyed by column, in their order.
    fn write_insert(&self, out: &mut String, table: &str, values: &IndexMap<String, String>) {
        out.reserve(32 + table.len() + values.len() * 24);
        out.push_str("INSERT INTO ");
        out.push_str(table);
        out.push_str(" (");
        separated_by(out, values.keys(), |out, v| out.push_str(v), ", ");
        out.push_str(") VALUES (");
        separated_by(out, values.values(), |out, v| out.push_str(v), ", ");
        out.push(')');
    }

    /// Emit UPDATE of every escaped value except the primary key.
    fn write_update(
        &self,
        out: &mut String,
        table: &str,
        primary_key: &str,
        values: &IndexMap<String, String>,
        key: i64,
    ) {
        out.reserve(32 + table.len() + values.len() * 24);
        out.push_str("UPDATE ");
        out.push_str(table);
        out.push_str(" SET ");
        separated_by(
            out,
            values.iter().filter(|(column, _)| *column != primary_key),
            |out, (column, value)| {
                let _ = write!(out, "{} = {}", column, value);
            },
            ", ",
        );
        let _ = write!(out, " WHERE {} = {}", primary_key, key);
    }

    /// Emit BEGIN statement.
    fn write_transaction_begin(&self, out: &mut String) {
        out.push_str("BEGIN;");
    }

    /// Emit COMMIT statement.
    fn write_transaction_commit(&self, out: &mut String) {
        out.push_str("COMMIT;");
    }

    /// Emit ROLLBACK statement.
    fn write_transaction_rollback(&self, out: &mut String) {
        out.push_str("ROLLBACK;");
    }
}

/// Fallback generic SQL writer.
#[derive(Debug, Default, Clone, Copy)]
pub struct GenericSqlWriter;

impl GenericSqlWriter {
    pub const fn new() -> Self {
        Self
    }
}

impl SqlWriter for GenericSqlWriter {}
