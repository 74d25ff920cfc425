#[cfg(test)]
mod tests {
    use quarry_core::{
        Criteria, Expression, Filter, LIMIT_PROPERTY, ORDER_PROPERTY, Operator, Value,
    };

    #[test]
    fn criteria_empty() {
        let criteria = Criteria::new();
        assert!(criteria.is_empty());
        assert_eq!(criteria.dump(), "");
        assert_eq!(criteria.where_clause(), None);
    }

    #[test]
    fn criteria_operators() {
        let mut criteria = Criteria::new();
        criteria.add(Filter::new("a", "=", 1));
        assert_eq!(criteria.dump(), "(a = 1)");
        criteria.add(Filter::new("b", "=", 2));
        assert_eq!(criteria.dump(), "(a = 1 AND b = 2)");

        let mut criteria = Criteria::new();
        criteria.add(Filter::new("date", ">=", "2019-09-10"));
        criteria.add_with(Filter::new("salary", ">", 2000), Operator::Or);
        assert_eq!(criteria.dump(), "(date >= '2019-09-10' OR salary > 2000)");
        assert_eq!(
            criteria.where_clause().as_deref(),
            Some("(date >= '2019-09-10' OR salary > 2000)")
        );

        // The first expression never carries a keyword
        let mut criteria = Criteria::new();
        criteria.add_with(Filter::new("a", "=", 1), Operator::Or);
        assert_eq!(criteria.dump(), "(a = 1)");
    }

    #[test]
    fn criteria_keyword_count() {
        let mut criteria = Criteria::new();
        for i in 0..6 {
            let operator = if i % 2 == 0 { Operator::And } else { Operator::Or };
            criteria.add_with(Filter::new(format!("c{}", i), "<>", i), operator);
        }
        let result = criteria.dump();
        assert_eq!(criteria.len(), 6);
        assert!(result.starts_with("(c0 <> 0 "));
        assert!(result.ends_with(')'));
        assert_eq!(
            result.matches(" AND ").count() + result.matches(" OR ").count(),
            5
        );
        assert_eq!(
            result,
            "(c0 <> 0 OR c1 <> 1 AND c2 <> 2 OR c3 <> 3 AND c4 <> 4 OR c5 <> 5)"
        );
    }

    #[test]
    fn criteria_nested() {
        let mut inner = Criteria::new();
        inner.add(Filter::new("b", "=", 2));
        inner.add_with(Filter::new("c", "=", 3), Operator::Or);
        let mut outer = Criteria::new();
        outer.add(Filter::new("a", "=", 1));
        outer.add(inner);
        assert_eq!(outer.dump(), "(a = 1 AND (b = 2 OR c = 3))");

        // Empty children render nothing
        let mut outer = Criteria::new();
        outer.add(Filter::new("a", "=", 1));
        outer.add(Criteria::new());
        assert_eq!(outer.dump(), "(a = 1 AND)");
    }

    #[test]
    fn criteria_properties() {
        let mut criteria = Criteria::new();
        assert!(!criteria.has_property(LIMIT_PROPERTY));
        assert_eq!(criteria.get_property(LIMIT_PROPERTY), None);

        criteria.set_property("LIMIT", Value::Null);
        assert!(criteria.has_property("LIMIT"));
        assert_eq!(criteria.get_property("LIMIT"), None);
        // Names are case sensitive
        assert!(!criteria.has_property(LIMIT_PROPERTY));

        criteria.limit(10).order_by("name DESC");
        assert_eq!(criteria.get_property(LIMIT_PROPERTY), Some(&Value::Int64(10)));
        assert_eq!(
            criteria.get_property(ORDER_PROPERTY),
            Some(&Value::Varchar("name DESC".into()))
        );
        criteria.set_property(LIMIT_PROPERTY, None::<i64>);
        assert!(criteria.has_property(LIMIT_PROPERTY));
        assert_eq!(criteria.get_property(LIMIT_PROPERTY), None);
        assert!(criteria.is_empty());
    }
}
