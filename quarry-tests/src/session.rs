use crate::{MUTEX, Product, seed_products};
use quarry::{Criteria, Record, Repository, Session};

pub async fn session(connection: &str) {
    let _lock = MUTEX.lock().await;
    seed_products(connection).await;
    let products = Repository::<Product>::new();

    // Rollback
    let mut session = Session::open(connection)
        .await
        .expect("Could not open the session");
    let mut product = Product::default();
    product.set("name", "Glue");
    product
        .store(&mut session)
        .await
        .expect("Failed to store the glue");
    assert_eq!(
        products
            .count(&mut session, &Criteria::new())
            .await
            .expect("Failed to count the products"),
        4
    );
    session
        .rollback()
        .await
        .expect("Failed to roll back the session");

    // Commit
    let mut session = Session::open(connection)
        .await
        .expect("Could not open the session");
    assert_eq!(
        products
            .count(&mut session, &Criteria::new())
            .await
            .expect("Failed to count the products"),
        3
    );
    let mut product = Product::find(&mut session, 3)
        .await
        .expect("Failed to query product 3")
        .expect("Product 3 should exist");
    product.set("name", "Rucksack");
    product
        .store(&mut session)
        .await
        .expect("Failed to rename product 3");
    session
        .commit()
        .await
        .expect("Failed to commit the session");

    let mut session = Session::open(connection)
        .await
        .expect("Could not open the session");
    let product = Product::with_id(&mut session, 3)
        .await
        .expect("Failed to construct product 3");
    assert_eq!(product.get("name"), Some("Rucksack".into()));
    session
        .commit()
        .await
        .expect("Failed to commit the session");
}
