use crate::{
    Executor, Result,
    future::{BoxFuture, FutureExt, TryFutureExt},
};
use std::future::Future;

/// A live database connection, able to open and close a unit of work.
pub trait Connection: Executor {
    /// Connect to the database at the given URL.
    fn connect(url: &str) -> impl Future<Output = Result<Self>>
    where
        Self: Sized;

    fn begin(&mut self) -> BoxFuture<'_, Result<()>> {
        let mut sql = String::new();
        self.sql_writer().write_transaction_begin(&mut sql);
        self.execute(sql).map_ok(|_| ()).boxed()
    }

    fn commit(&mut self) -> BoxFuture<'_, Result<()>> {
        let mut sql = String::new();
        self.sql_writer().write_transaction_commit(&mut sql);
        self.execute(sql).map_ok(|_| ()).boxed()
    }

    fn rollback(&mut self) -> BoxFuture<'_, Result<()>> {
        let mut sql = String::new();
        self.sql_writer().write_transaction_rollback(&mut sql);
        self.execute(sql).map_ok(|_| ()).boxed()
    }
}
