use crate::{SqliteConnection, SqliteSqlWriter};
use quarry_core::{
    Connection, Driver, Result, SqlWriter,
    future::{BoxFuture, FutureExt},
};

#[derive(Debug, Default, Clone, Copy)]
pub struct SqliteDriver;

impl SqliteDriver {
    pub const NAME: &'static str = "sqlite";

    pub const fn new() -> Self {
        Self
    }
}

impl Driver for SqliteDriver {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn sql_writer(&self) -> &'static dyn SqlWriter {
        &SqliteSqlWriter
    }

    fn connect<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<Box<dyn Connection>>> {
        async move {
            let connection = SqliteConnection::open(url).await?;
            Ok(Box::new(connection) as Box<dyn Connection>)
        }
        .boxed()
    }
}
