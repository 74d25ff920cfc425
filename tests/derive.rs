#[cfg(test)]
mod tests {
    use quarry::{Attributes, Record, Value};
    use std::marker::PhantomData;

    #[derive(Default, Debug, Record)]
    struct SimpleProduct {
        data: Attributes,
    }

    #[derive(Default, Debug, Record)]
    #[quarry(table = "shop_customers", primary_key = "code")]
    struct Customer {
        note: String,
        values: quarry::Attributes,
    }

    #[derive(Default, Debug, Record)]
    #[quarry(primary_key = "uid")]
    struct TaggedItem<T: Default + Send + Sync> {
        attributes: Attributes,
        _tag: PhantomData<T>,
    }

    #[test]
    fn derive_names() {
        assert_eq!(SimpleProduct::TABLE_NAME, "simple_product");
        assert_eq!(SimpleProduct::PRIMARY_KEY, "id");
        assert_eq!(Customer::TABLE_NAME, "shop_customers");
        assert_eq!(Customer::PRIMARY_KEY, "code");
        assert_eq!(TaggedItem::<u8>::TABLE_NAME, "tagged_item");
        assert_eq!(TaggedItem::<u8>::default().primary_key(), "uid");
        assert_eq!(Customer::default().entity(), "shop_customers");
    }

    #[test]
    fn derive_attributes() {
        let mut customer = Customer::default();
        customer.note = "unrelated".into();
        customer.set("code", "C42");
        customer.set("name", "Ada");
        assert_eq!(customer.values.len(), 2);
        assert_eq!(customer.get("name"), Some(Value::Varchar("Ada".into())));
        customer.set("name", Value::Null);
        assert_eq!(customer.get("name"), None);
        assert_eq!(customer.attributes().keys().collect::<Vec<_>>(), ["code"]);
    }

    #[test]
    fn derive_clone() {
        let mut product = SimpleProduct::default();
        product.set("id", 7);
        product.set("name", "Ruler");
        let copy = product.clone();
        assert_eq!(copy.get("id"), None);
        assert_eq!(copy.get("name"), Some("Ruler".into()));
        assert_eq!(product.get("id"), Some(7.into()));

        let mut customer = Customer::default();
        customer.note = "not copied".into();
        customer.set("code", "C1");
        customer.set("id", 3);
        let copy = customer.clone();
        assert_eq!(copy.get("code"), None);
        assert_eq!(copy.get("id"), Some(3.into()));
        assert_eq!(copy.note, "");

        let mut item = TaggedItem::<String>::default();
        item.set("uid", 1);
        item.set("label", "first");
        let copy = item.clone();
        assert_eq!(copy.get("uid"), None);
        assert_eq!(copy.to_array().len(), 1);
    }
}
