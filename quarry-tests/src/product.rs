use quarry::{Attributes, Connections, Executor, Record};
use std::sync::LazyLock;
use tokio::sync::Mutex;

#[derive(Default, Debug, Record)]
#[quarry(table = "products")]
pub struct Product {
    data: Attributes,
}

/// Serializes the tests, they all share the process-wide transaction and the products table.
pub(crate) static MUTEX: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));

/// Recreate the products table with Notebook (1), Pen (2) and Backpack (3).
pub async fn seed_products(connection: &str) {
    let mut setup = Connections::open(connection)
        .await
        .expect("Could not open the setup connection");
    setup
        .execute(
            "DROP TABLE IF EXISTS products;\n\
             CREATE TABLE products (id INTEGER PRIMARY KEY, name TEXT NOT NULL, price REAL);\n\
             INSERT INTO products (id, name, price) VALUES (1, 'Notebook', 12.5);\n\
             INSERT INTO products (id, name, price) VALUES (2, 'Pen', 1.2);\n\
             INSERT INTO products (id, name, price) VALUES (3, 'Backpack', 35.0);"
                .into(),
        )
        .await
        .expect("Failed to seed the products table");
}

pub(crate) fn name_of(product: &Product) -> String {
    match product.get("name") {
        Some(quarry::Value::Varchar(name)) => name,
        other => panic!("Unexpected product name {:?}", other),
    }
}
