mod product;
mod record;
mod repository;
mod session;
mod transaction;

pub use product::*;
use record::records;
use repository::repository;
use session::session;
use transaction::transaction;

use log::LevelFilter;
use std::env;

pub fn init_logs() {
    let mut logger = env_logger::builder();
    logger
        .is_test(true)
        .format_file(true)
        .format_line_number(true);
    if env::var("RUST_LOG").is_err() {
        logger.filter_level(LevelFilter::Warn);
    }
    let _ = logger.try_init();
}

/// Run the whole suite against the configured connection named `connection`.
///
/// The connection must already be loaded in `quarry::Connections` and its driver registered.
pub async fn execute_tests(connection: &str) {
    records(connection).await;
    repository(connection).await;
    transaction(connection).await;
    session(connection).await;
}

#[macro_export]
macro_rules! silent_logs {
    ($($code:tt)+) => {{
        let level = log::max_level();
        log::set_max_level(log::LevelFilter::Off);
        $($code)+
        log::set_max_level(level);
    }};
}
