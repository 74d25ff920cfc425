use quarry_core::{SqlWriter, Value};
use std::fmt::Write;

#[derive(Debug, Default, Clone, Copy)]
pub struct SqliteSqlWriter;

impl SqlWriter for SqliteSqlWriter {
    fn write_string_literal(&self, out: &mut String, value: &str) {
        // Backslash is a plain character in sqlite, only the quote is escaped by doubling it
        out.reserve(value.len() + 2);
        out.push('\'');
        let mut pos = 0;
        for (i, c) in value.char_indices() {
            if c == '\'' {
                out.push_str(&value[pos..i]);
                out.push_str("''");
                pos = i + 1;
            }
        }
        out.push_str(&value[pos..]);
        out.push('\'');
    }

    fn write_offset(&self, out: &mut String, offset: &Value, has_limit: bool) {
        // Sqlite accepts OFFSET only after a LIMIT
        if !has_limit {
            out.push_str(" LIMIT -1");
        }
        let _ = write!(out, " OFFSET {}", offset);
    }
}
