#[cfg(test)]
mod tests {
    use quarry_core::Connections;
    use quarry_sqlite::SqliteDriver;
    use quarry_tests::{execute_tests, init_logs};
    use std::path::Path;
    use tokio::fs;

    #[tokio::test]
    async fn sqlite() {
        init_logs();
        const DB_PATH: &'static str = "../target/debug/tests.sqlite";
        const CONFIG_PATH: &'static str = "../target/debug/quarry.toml";
        if Path::new(DB_PATH).exists() {
            fs::remove_file(DB_PATH).await.expect(
                format!("Failed to remove existing test database file {}", DB_PATH).as_str(),
            );
        }
        fs::write(
            CONFIG_PATH,
            format!("[sqlite]\ntype = \"sqlite\"\nname = \"{}?mode=rwc\"\n", DB_PATH),
        )
        .await
        .expect("Failed to write the connections file");
        Connections::load(CONFIG_PATH).expect("Could not load the connections file");
        Connections::register(SqliteDriver::new());
        Connections::open("sqlite")
            .await
            .expect("Could not open the database");
        assert!(
            Path::new(DB_PATH).exists(),
            "Database file should be created after connection"
        );
        execute_tests("sqlite").await;
    }
}
