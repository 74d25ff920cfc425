use crate::{MUTEX, Product, name_of, seed_products};
use quarry::{Criteria, Filter, Operator, Repository, Transaction};

pub async fn repository(connection: &str) {
    let _lock = MUTEX.lock().await;
    seed_products(connection).await;
    Transaction::open(connection)
        .await
        .expect("Could not open the transaction");
    let products = Repository::<Product>::new();

    // Everything
    let mut criteria = Criteria::new();
    criteria.order_by("id");
    let result = products
        .load(&mut Transaction, &criteria)
        .await
        .expect("Failed to load every product");
    assert_eq!(
        result.iter().map(name_of).collect::<Vec<_>>(),
        ["Notebook", "Pen", "Backpack"]
    );
    assert_eq!(
        products
            .count(&mut Transaction, &Criteria::new())
            .await
            .expect("Failed to count the products"),
        3
    );

    // Single filter
    let mut criteria = Criteria::new();
    criteria.add(Filter::new("id", "=", 2));
    let result = products
        .load(&mut Transaction, &criteria)
        .await
        .expect("Failed to load product 2");
    assert_eq!(result.len(), 1);
    assert_eq!(name_of(&result[0]), "Pen");

    // Text and list literals
    let mut criteria = Criteria::new();
    criteria.add(Filter::new("name", "LIKE", "%pack%"));
    let result = products
        .load(&mut Transaction, &criteria)
        .await
        .expect("Failed to load by name");
    assert_eq!(result.iter().map(name_of).collect::<Vec<_>>(), ["Backpack"]);
    let mut criteria = Criteria::new();
    criteria
        .add(Filter::new("id", "IN", vec![1, 3]))
        .order_by("id DESC");
    let result = products
        .load(&mut Transaction, &criteria)
        .await
        .expect("Failed to load by id list");
    assert_eq!(
        result.iter().map(name_of).collect::<Vec<_>>(),
        ["Backpack", "Notebook"]
    );

    // Nested criteria
    let mut either = Criteria::new();
    either.add(Filter::new("id", "=", 1));
    either.add_with(Filter::new("id", "=", 2), Operator::Or);
    let mut criteria = Criteria::new();
    criteria.add(Filter::new("price", ">", 10));
    criteria.add(either);
    let result = products
        .load(&mut Transaction, &criteria)
        .await
        .expect("Failed to load with nested criteria");
    assert_eq!(result.iter().map(name_of).collect::<Vec<_>>(), ["Notebook"]);

    // Order, limit and offset
    let mut criteria = Criteria::new();
    criteria.order_by("price DESC").limit(2);
    let result = products
        .load(&mut Transaction, &criteria)
        .await
        .expect("Failed to load the two most expensive products");
    assert_eq!(
        result.iter().map(name_of).collect::<Vec<_>>(),
        ["Backpack", "Notebook"]
    );
    let mut criteria = Criteria::new();
    criteria.order_by("id").offset(1);
    let result = products
        .load(&mut Transaction, &criteria)
        .await
        .expect("Failed to load skipping the first product");
    assert_eq!(
        result.iter().map(name_of).collect::<Vec<_>>(),
        ["Pen", "Backpack"]
    );
    let mut criteria = Criteria::new();
    criteria.order_by("id").limit(1).offset(2);
    let result = products
        .load(&mut Transaction, &criteria)
        .await
        .expect("Failed to load the third product");
    assert_eq!(result.iter().map(name_of).collect::<Vec<_>>(), ["Backpack"]);

    // Nothing matches
    let mut criteria = Criteria::new();
    criteria.add(Filter::new("name", "=", "Nothing"));
    assert!(
        products
            .load(&mut Transaction, &criteria)
            .await
            .expect("Failed to load a missing product")
            .is_empty()
    );
    assert_eq!(
        products
            .count(&mut Transaction, &criteria)
            .await
            .expect("Failed to count a missing product"),
        0
    );

    // Count and delete
    let mut criteria = Criteria::new();
    criteria.add(Filter::new("price", ">", 10));
    assert_eq!(
        products
            .count(&mut Transaction, &criteria)
            .await
            .expect("Failed to count the expensive products"),
        2
    );
    let mut criteria = Criteria::new();
    criteria.add(Filter::new("price", "<", 2)).limit(100);
    let result = products
        .delete(&mut Transaction, &criteria)
        .await
        .expect("Failed to delete the cheap products");
    assert_eq!(result.rows_affected, 1);
    assert_eq!(
        products
            .count(&mut Transaction, &Criteria::new())
            .await
            .expect("Failed to count the products"),
        2
    );

    Transaction::rollback()
        .await
        .expect("Failed to roll back the transaction");
}
