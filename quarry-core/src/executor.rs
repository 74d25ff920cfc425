use crate::{
    QueryResult, Result, RowLabeled, RowsAffected, SqlWriter,
    future::{BoxFuture, FutureExt},
    stream::{BoxStream, StreamExt, TryStreamExt},
};

/// Something statements can be sent to: a connection, a [`crate::Session`] or the process-wide
/// [`crate::Transaction`].
pub trait Executor: Send + Sync {
    /// Dialect printer used to build statements for this executor.
    fn sql_writer(&self) -> &'static dyn SqlWriter;

    /// General method to send any query and return any result type (either row or count)
    fn run<'s>(&'s mut self, sql: String) -> BoxStream<'s, Result<QueryResult>>;

    /// Execute the query and returns the rows.
    fn fetch<'s>(&'s mut self, sql: String) -> BoxStream<'s, Result<RowLabeled>> {
        self.run(sql)
            .filter_map(|v| async move {
                match v {
                    Ok(QueryResult::Row(v)) => Some(Ok(v)),
                    Err(e) => Some(Err(e)),
                    _ => None,
                }
            })
            .boxed()
    }

    /// Execute the query and return the total number of rows affected.
    fn execute<'s>(&'s mut self, sql: String) -> BoxFuture<'s, Result<RowsAffected>> {
        self.run(sql)
            .filter_map(|v| async move {
                match v {
                    Ok(QueryResult::Affected(v)) => Some(Ok(v)),
                    Err(e) => Some(Err(e)),
                    _ => None,
                }
            })
            .try_collect()
            .boxed()
    }
}
