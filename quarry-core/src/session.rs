use crate::{
    Connection, Connections, Executor, QueryResult, Result, SqlWriter, future::BoxFuture,
    stream::BoxStream,
};

/// An explicit unit of work: one connection with a transaction already begun.
///
/// It is an [`Executor`], records and repositories run against it directly. Dropping a session without calling
/// [`Session::commit`] leaves the outcome to the driver, which normally discards the work when the connection closes.
pub struct Session {
    connection: Box<dyn Connection>,
}

impl Session {
    pub async fn begin(mut connection: Box<dyn Connection>) -> Result<Self> {
        connection.begin().await?;
        Ok(Self { connection })
    }

    /// Connect to the named entry of [`Connections`] and begin.
    pub async fn open(name: &str) -> Result<Self> {
        let connection = Connections::open(name).await?;
        Self::begin(connection).await
    }

    pub async fn commit(mut self) -> Result<()> {
        self.connection.commit().await
    }

    pub async fn rollback(mut self) -> Result<()> {
        self.connection.rollback().await
    }
}

impl Executor for Session {
    fn sql_writer(&self) -> &'static dyn SqlWriter {
        self.connection.sql_writer()
    }

    fn run<'s>(&'s mut self, sql: String) -> BoxStream<'s, Result<QueryResult>> {
        self.connection.run(sql)
    }

    fn execute<'s>(&'s mut self, sql: String) -> BoxFuture<'s, Result<crate::RowsAffected>> {
        self.connection.execute(sql)
    }
}
