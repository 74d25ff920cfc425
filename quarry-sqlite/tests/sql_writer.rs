#[cfg(test)]
mod tests {
    use quarry_core::{Criteria, SqlWriter, escape_literal};
    use quarry_sqlite::SqliteSqlWriter;

    #[test]
    fn string_literals() {
        let writer = SqliteSqlWriter;
        assert_eq!(escape_literal(&writer, &"O'Reilly".into()), "'O''Reilly'");
        assert_eq!(escape_literal(&writer, &"C:\\dir".into()), "'C:\\dir'");
        assert_eq!(
            escape_literal(&writer, &"say \"hi\"".into()),
            "'say \"hi\"'"
        );
        assert_eq!(escape_literal(&writer, &"''".into()), "''''''");
        assert_eq!(escape_literal(&writer, &"".into()), "NULL");
    }

    #[test]
    fn offset_without_limit() {
        let writer = SqliteSqlWriter;
        let mut criteria = Criteria::new();
        criteria.offset(2);
        let mut sql = String::new();
        writer.write_select(&mut sql, "products", &criteria);
        assert_eq!(sql, "SELECT * FROM products LIMIT -1 OFFSET 2");

        criteria.limit(3);
        let mut sql = String::new();
        writer.write_select(&mut sql, "products", &criteria);
        assert_eq!(sql, "SELECT * FROM products LIMIT 3 OFFSET 2");
    }
}
