#[cfg(test)]
mod tests {
    use quarry_core::{Expression, Filter, Value};

    #[test]
    fn filter_lists() {
        assert_eq!(
            Filter::new("id", "IN", vec![12, 16, 20]).dump(),
            "id IN (12, 16, 20)"
        );
        assert_eq!(
            Filter::new("code", "IN", vec!["a", "b"]).dump(),
            "code IN ('a', 'b')"
        );
        assert_eq!(
            Filter::new(
                "mixed",
                "IN",
                Value::List(vec![
                    Value::Float64(1.5),
                    Value::Int64(3),
                    Value::Null,
                    Value::Varchar("x".into()),
                    Value::Boolean(true),
                ])
            )
            .dump(),
            "mixed IN (3, 'x')"
        );
        assert_eq!(Filter::new("id", "IN", Vec::<i64>::new()).dump(), "id IN ()");
    }

    #[test]
    fn filter_scalars() {
        assert_eq!(
            Filter::new("date", ">", "2019-09-10").dump(),
            "date > '2019-09-10'"
        );
        // Filters do not escape
        assert_eq!(
            Filter::new("name", "=", "O'Reilly").dump(),
            "name = 'O'Reilly'"
        );
        assert_eq!(Filter::new("deleted", "IS", Value::Null).dump(), "deleted IS NULL");
        assert_eq!(Filter::new("parent", "IS", None::<i64>).dump(), "parent IS NULL");
        assert_eq!(Filter::new("active", "=", true).dump(), "active = TRUE");
        assert_eq!(Filter::new("active", "=", false).dump(), "active = FALSE");
        assert_eq!(Filter::new("salary", ">", 2000).dump(), "salary > 2000");
        assert_eq!(Filter::new("ratio", "<", -0.25).dump(), "ratio < -0.25");
        assert_eq!(Filter::new("empty", "=", "").dump(), "empty = ''");
    }

    #[test]
    fn filter_parts() {
        let filter = Filter::new("salary", ">=", 1000u32);
        assert_eq!(filter.variable(), "salary");
        assert_eq!(filter.operator(), ">=");
        assert_eq!(filter.value(), "1000");
        assert_eq!(filter.dump(), filter.clone().dump());
        assert_eq!(Filter::transform(&"text".into()), "'text'");
    }
}
