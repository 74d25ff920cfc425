use crate::{MUTEX, Product, seed_products, silent_logs};
use quarry::{Criteria, QuarryError, Record, Repository, Transaction};

pub async fn transaction(connection: &str) {
    let _lock = MUTEX.lock().await;
    seed_products(connection).await;

    // Closed
    assert!(!Transaction::is_active().await);
    assert!(Transaction::get().await.is_none());
    let error = Transaction::current()
        .await
        .err()
        .expect("There should be no current session");
    assert_eq!(
        QuarryError::kind_of(&error),
        Some(&QuarryError::NoActiveTransaction)
    );
    Transaction::close()
        .await
        .expect("Closing a closed transaction should do nothing");
    Transaction::rollback()
        .await
        .expect("Rolling back a closed transaction should do nothing");
    silent_logs! {
        let error = Transaction::open("missing connection")
            .await
            .expect_err("Opening an unknown connection should fail");
        assert_eq!(
            QuarryError::kind_of(&error),
            Some(&QuarryError::UnknownConnection("missing connection".into()))
        );
    }
    assert!(!Transaction::is_active().await);

    // Opening twice keeps the session
    Transaction::open(connection)
        .await
        .expect("Could not open the transaction");
    assert!(Transaction::is_active().await);
    Transaction::open("missing connection")
        .await
        .expect("Opening again should reuse the session");
    assert!(Transaction::is_active().await);
    assert!(Transaction::get().await.is_some());

    // Statements run on the guard, it is released before using the transaction again
    {
        let mut session = Transaction::current()
            .await
            .expect("The session should be there");
        let count = Repository::<Product>::new()
            .count(&mut *session, &Criteria::new())
            .await
            .expect("Failed to count through the session guard");
        assert_eq!(count, 3);
    }
    assert_eq!(
        Repository::<Product>::new()
            .count(&mut Transaction, &Criteria::new())
            .await
            .expect("Failed to count through the transaction"),
        3
    );

    // Commit makes the work visible
    let mut product = Product::default();
    product.set("name", "Eraser");
    product.set("price", 0.5);
    product
        .store(&mut Transaction)
        .await
        .expect("Failed to store the eraser");
    Transaction::close()
        .await
        .expect("Failed to commit the transaction");
    assert!(!Transaction::is_active().await);

    Transaction::open(connection)
        .await
        .expect("Could not open the transaction");
    let eraser = Product::find(&mut Transaction, 4)
        .await
        .expect("Failed to query product 4")
        .expect("The committed product should be there");
    assert_eq!(eraser.get("name"), Some("Eraser".into()));

    // Rollback discards the work
    eraser
        .delete(&mut Transaction)
        .await
        .expect("Failed to delete the eraser");
    assert!(
        Product::find(&mut Transaction, 4)
            .await
            .expect("Failed to query product 4")
            .is_none()
    );
    Transaction::rollback()
        .await
        .expect("Failed to roll back the transaction");

    Transaction::open(connection)
        .await
        .expect("Could not open the transaction");
    assert!(
        Product::find(&mut Transaction, 4)
            .await
            .expect("Failed to query product 4")
            .is_some(),
        "The rolled back delete should have no effect"
    );
    {
        let mut session = Transaction::current()
            .await
            .expect("The transaction should be open");
        assert!(
            Product::find(&mut *session, 3)
                .await
                .expect("Failed to query product 3 through the session")
                .is_some()
        );
    }
    Transaction::close()
        .await
        .expect("Failed to commit the transaction");
}
