use crate::{
    Criteria, Executor, Record, Result, RowsAffected, Value,
    stream::{StreamExt, TryStreamExt},
    truncate_long,
};
use std::{future::Future, marker::PhantomData};

/// Bulk operations on the table of `R`, selected through a [`Criteria`].
///
/// ```ignore
/// let mut criteria = Criteria::new();
/// criteria.add(Filter::new("price", ">", 10)).order_by("name").limit(20);
/// let products = Repository::<Product>::new().load(&mut Transaction, &criteria).await?;
/// ```
#[derive(Debug)]
pub struct Repository<R: Record> {
    _record: PhantomData<fn() -> R>,
}

impl<R: Record> Default for Repository<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Record> Clone for Repository<R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R: Record> Copy for Repository<R> {}

impl<R: Record> Repository<R> {
    pub const fn new() -> Self {
        Self {
            _record: PhantomData,
        }
    }

    /// Repository of the same kind as `record`.
    pub const fn of(_record: &R) -> Self {
        Self::new()
    }

    pub fn table(&self) -> &'static str {
        R::TABLE_NAME
    }

    /// Every row matching `criteria`, honoring its `order`, `limit` and `offset` properties.
    pub fn load<E: Executor + ?Sized>(
        &self,
        executor: &mut E,
        criteria: &Criteria,
    ) -> impl Future<Output = Result<Vec<R>>> + Send {
        let mut sql = String::with_capacity(128);
        executor
            .sql_writer()
            .write_select(&mut sql, R::TABLE_NAME, criteria);
        async move {
            log::debug!("{}", truncate_long!(sql));
            executor
                .fetch(sql)
                .map_ok(R::from_row)
                .try_collect()
                .await
        }
    }

    /// Delete every row matching `criteria`, its properties are ignored.
    pub fn delete<E: Executor + ?Sized>(
        &self,
        executor: &mut E,
        criteria: &Criteria,
    ) -> impl Future<Output = Result<RowsAffected>> + Send {
        let mut sql = String::with_capacity(64);
        executor
            .sql_writer()
            .write_delete(&mut sql, R::TABLE_NAME, criteria);
        async move {
            log::debug!("{}", truncate_long!(sql));
            executor.execute(sql).await
        }
    }

    /// Number of rows matching `criteria`.
    pub fn count<E: Executor + ?Sized>(
        &self,
        executor: &mut E,
        criteria: &Criteria,
    ) -> impl Future<Output = Result<u64>> + Send {
        let mut sql = String::with_capacity(64);
        executor
            .sql_writer()
            .write_count(&mut sql, R::TABLE_NAME, criteria);
        async move {
            log::debug!("{}", truncate_long!(sql));
            let row = executor.fetch(sql).next().await.transpose()?;
            Ok(row
                .and_then(|row| row.values.first().map(Value::to_integer))
                .map_or(0, |v| v.max(0) as u64))
        }
    }
}
