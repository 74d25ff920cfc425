use crate::{MUTEX, Product, name_of, seed_products, silent_logs};
use quarry::{QuarryError, Record, Transaction, Value};

pub async fn records(connection: &str) {
    let _lock = MUTEX.lock().await;
    seed_products(connection).await;

    // Closed transaction
    silent_logs! {
        let error = Product::find(&mut Transaction, 1)
            .await
            .expect_err("Loading without a transaction should fail");
        assert_eq!(
            QuarryError::kind_of(&error),
            Some(&QuarryError::NoActiveTransaction)
        );
    }

    Transaction::open(connection)
        .await
        .expect("Could not open the transaction");

    // Load
    let product = Product::find(&mut Transaction, 1)
        .await
        .expect("Failed to query product 1")
        .expect("Product 1 should exist");
    assert_eq!(product.get("id"), Some(Value::Int64(1)));
    assert_eq!(name_of(&product), "Notebook");
    assert_eq!(product.get("price"), Some(Value::Float64(12.5)));
    assert!(
        Product::find(&mut Transaction, 42)
            .await
            .expect("Failed to query product 42")
            .is_none()
    );
    let product = Product::default()
        .load(&mut Transaction, "3")
        .await
        .expect("Failed to query product 3")
        .expect("Product 3 should exist");
    assert_eq!(name_of(&product), "Backpack");

    // Constructed with an id
    let product = Product::with_id(&mut Transaction, 2)
        .await
        .expect("Failed to construct product 2");
    assert_eq!(name_of(&product), "Pen");
    let product = Product::with_id(&mut Transaction, 0)
        .await
        .expect("Failed to construct an empty product");
    assert!(product.attributes().is_empty());
    let product = Product::with_id(&mut Transaction, 99)
        .await
        .expect("Failed to construct a missing product");
    assert!(product.attributes().is_empty());

    // Insert computing the key
    let mut product = Product::default();
    product.set("name", "Stapler");
    product.set("price", 7.25);
    let result = product
        .store(&mut Transaction)
        .await
        .expect("Failed to store the stapler");
    assert_eq!(result.rows_affected, 1);
    assert_eq!(product.get("id"), Some(Value::Int64(4)));
    let stored = Product::find(&mut Transaction, 4)
        .await
        .expect("Failed to query product 4")
        .expect("Product 4 should exist");
    assert_eq!(name_of(&stored), "Stapler");
    assert_eq!(stored.get("price"), Some(Value::Float64(7.25)));

    // Update
    let mut product = Product::find(&mut Transaction, 2)
        .await
        .expect("Failed to query product 2")
        .expect("Product 2 should exist");
    product.set("price", 1.5);
    let result = product
        .store(&mut Transaction)
        .await
        .expect("Failed to update product 2");
    assert_eq!(result.rows_affected, 1);
    let product = Product::find(&mut Transaction, 2)
        .await
        .expect("Failed to query product 2")
        .expect("Product 2 should exist");
    assert_eq!(product.get("price"), Some(Value::Float64(1.5)));
    assert_eq!(name_of(&product), "Pen");

    // Insert with a key not yet in the table
    let mut product = Product::default();
    product.set("id", 10);
    product.set("name", "Ruler");
    product
        .store(&mut Transaction)
        .await
        .expect("Failed to store the ruler");
    let ruler = Product::find(&mut Transaction, 10)
        .await
        .expect("Failed to query product 10")
        .expect("Product 10 should exist");
    assert_eq!(name_of(&ruler), "Ruler");
    assert_eq!(ruler.get("price"), None);

    // Copies are new rows
    let mut copy = ruler.clone();
    assert_eq!(copy.get("id"), None);
    assert_eq!(name_of(&copy), "Ruler");
    copy.store(&mut Transaction)
        .await
        .expect("Failed to store the copy");
    assert_eq!(copy.get("id"), Some(Value::Int64(11)));
    assert_eq!(ruler.get("id"), Some(Value::Int64(10)));

    // Quotes and backslashes survive the round trip
    let mut product = Product::default();
    product.set("name", "O'Reilly \"Notes\"");
    product
        .store(&mut Transaction)
        .await
        .expect("Failed to store the notes");
    assert_eq!(product.get("id"), Some(Value::Int64(12)));
    let mut notes = Product::find(&mut Transaction, 12)
        .await
        .expect("Failed to query product 12")
        .expect("Product 12 should exist");
    assert_eq!(name_of(&notes), "O'Reilly \"Notes\"");
    notes.set("name", "It's in C:\\dir\\");
    notes
        .store(&mut Transaction)
        .await
        .expect("Failed to update the notes");
    let notes = Product::find(&mut Transaction, 12)
        .await
        .expect("Failed to query product 12")
        .expect("Product 12 should exist");
    assert_eq!(name_of(&notes), "It's in C:\\dir\\");
    assert!(
        Product::find(&mut Transaction, "x' OR '1' = '1")
            .await
            .expect("Failed to query a quoted key")
            .is_none()
    );

    // Nothing to update besides the key
    let mut product = Product::default();
    product.set("id", 12);
    let result = product
        .store(&mut Transaction)
        .await
        .expect("Failed to store a key only product");
    assert_eq!(result.rows_affected, 0);

    // Delete
    let product = Product::find(&mut Transaction, 1)
        .await
        .expect("Failed to query product 1")
        .expect("Product 1 should exist");
    let result = product
        .delete(&mut Transaction)
        .await
        .expect("Failed to delete product 1");
    assert_eq!(result.rows_affected, 1);
    assert!(
        Product::find(&mut Transaction, 1)
            .await
            .expect("Failed to query product 1")
            .is_none()
    );
    let result = Product::default()
        .delete_by_id(&mut Transaction, 2)
        .await
        .expect("Failed to delete product 2");
    assert_eq!(result.rows_affected, 1);
    let result = Product::default()
        .delete_by_id(&mut Transaction, 2)
        .await
        .expect("Failed to delete product 2 again");
    assert_eq!(result.rows_affected, 0);

    Transaction::rollback()
        .await
        .expect("Failed to roll back the transaction");
    assert!(!Transaction::is_active().await);
}
