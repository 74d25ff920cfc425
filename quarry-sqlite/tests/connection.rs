#[cfg(test)]
mod tests {
    use quarry_core::{Connection, Executor, QueryResult, RowsAffected, Value, stream::StreamExt};
    use quarry_sqlite::SqliteConnection;
    use quarry_tests::{init_logs, silent_logs};
    use std::{path::Path, sync::Mutex};
    use tokio::fs;

    static MUTEX: Mutex<()> = Mutex::new(());

    #[tokio::test]
    async fn create_database() {
        init_logs();
        const DB_PATH: &'static str = "../target/debug/creation.sqlite";
        let _guard = MUTEX.lock().unwrap();
        if Path::new(DB_PATH).exists() {
            fs::remove_file(DB_PATH)
                .await
                .expect(format!("Failed to remove test database file {}", DB_PATH).as_str());
        }
        assert!(
            !Path::new(DB_PATH).exists(),
            "Database file should not exist before test"
        );
        SqliteConnection::connect(&format!("sqlite://{}?mode=rwc", DB_PATH))
            .await
            .expect("Could not open the database");
        assert!(
            Path::new(DB_PATH).exists(),
            "Database file should be created after connection"
        );
        SqliteConnection::connect(&format!("sqlite://{}?mode=ro", DB_PATH))
            .await
            .expect("Could not open the database");
        fs::remove_file(DB_PATH)
            .await
            .expect(format!("Failed to remove existing test database file {}", DB_PATH).as_str());
        silent_logs! {
            assert!(
                SqliteConnection::connect(&format!("sqlite://{}?mode=ro", DB_PATH))
                    .await
                    .is_err(),
                "Should not be able to open in read only unexisting database"
            );
        }
    }

    #[tokio::test]
    async fn wrong_url() {
        silent_logs! {
            assert!(
                SqliteConnection::connect("postgres://some_value")
                    .await
                    .is_err()
            );
        };
    }

    #[tokio::test]
    async fn multiple_statements() {
        init_logs();
        let mut connection = SqliteConnection::connect("sqlite://:memory:")
            .await
            .expect("Could not open the in memory database");
        let result = connection
            .execute(
                "CREATE TABLE numbers (value INTEGER);\n\
                 INSERT INTO numbers (value) VALUES (1), (2);\n\
                 -- trailing comment\n\
                 INSERT INTO numbers (value) VALUES (3);\n"
                    .into(),
            )
            .await
            .expect("Failed to run the statements");
        assert_eq!(
            result,
            RowsAffected {
                rows_affected: 3,
                last_affected_id: Some(3),
            }
        );
        let results = connection
            .run("SELECT value FROM numbers ORDER BY value; SELECT COUNT(*) AS total FROM numbers;".into())
            .collect::<Vec<_>>()
            .await;
        let values = results
            .into_iter()
            .map(|v| match v.expect("Failed to read a row") {
                QueryResult::Row(row) => row.values[0].clone(),
                QueryResult::Affected(..) => panic!("Only rows were expected"),
            })
            .collect::<Vec<_>>();
        assert_eq!(
            values,
            [Value::Int64(1), Value::Int64(2), Value::Int64(3), Value::Int64(3)]
        );
        silent_logs! {
            assert!(connection.execute("SELEC 1".into()).await.is_err());
        }
    }
}
