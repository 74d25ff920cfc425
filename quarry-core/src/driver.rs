use crate::{Connection, Result, SqlWriter, future::BoxFuture};

/// Entry point of a backend, registered in [`crate::Connections`] to serve one dialect.
pub trait Driver: Send + Sync {
    /// Name matching the scheme of the connection URLs this driver accepts, e.g. `sqlite`.
    fn name(&self) -> &'static str;
    fn sql_writer(&self) -> &'static dyn SqlWriter;
    fn connect<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<Box<dyn Connection>>>;
}
