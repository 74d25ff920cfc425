use crate::{
    Executor, GenericSqlWriter, QuarryError, QueryResult, Result, Session, SqlWriter,
    stream::{BoxStream, StreamExt},
};
use async_stream::try_stream;
use std::sync::{LazyLock, RwLock};
use tokio::sync::{MappedMutexGuard, Mutex, MutexGuard};

static ACTIVE: LazyLock<Mutex<Option<Session>>> = LazyLock::new(|| Mutex::new(None));
static DIALECT: RwLock<Option<&'static dyn SqlWriter>> = RwLock::new(None);

/// Exclusive access to the session held by [`Transaction`].
///
/// While a guard is alive every other use of the transaction waits, drop it before calling
/// [`Transaction::close`] or [`Transaction::rollback`].
pub type ActiveSession = MappedMutexGuard<'static, Session>;

fn set_dialect(writer: Option<&'static dyn SqlWriter>) {
    *DIALECT.write().unwrap_or_else(|e| e.into_inner()) = writer;
}

/// The one unit of work shared by the whole process.
///
/// It is either closed or open with a single [`Session`]. Opening again while open keeps the current session, even
/// when a different connection name is passed. `Transaction` is also an [`Executor`] bound to that session, so
/// `Product::find(&mut Transaction, 1)` fails with [`QuarryError::NoActiveTransaction`] while closed.
///
/// ```ignore
/// Transaction::open("main").await?;
/// let product = Product::find(&mut Transaction, 1).await?;
/// Transaction::close().await?;
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct Transaction;

impl Transaction {
    pub async fn open(name: &str) -> Result<()> {
        let mut active = ACTIVE.lock().await;
        if active.is_some() {
            log::debug!(
                "A transaction is already open, `{}` will use the existing connection",
                name
            );
            return Ok(());
        }
        let session = Session::open(name).await?;
        set_dialect(Some(session.sql_writer()));
        *active = Some(session);
        Ok(())
    }

    /// The open session, `None` when closed.
    ///
    /// # Deadlock
    /// The returned guard locks the transaction. Running anything on `&mut Transaction`, or calling
    /// [`Transaction::close`], [`Transaction::rollback`] or [`Transaction::open`], from the same task while the guard is
    /// alive waits forever: run statements on the guard itself, or drop it first. Use [`Transaction::is_active`] to only
    /// check the state.
    pub async fn get() -> Option<ActiveSession> {
        MutexGuard::try_map(ACTIVE.lock().await, Option::as_mut).ok()
    }

    /// The open session or [`QuarryError::NoActiveTransaction`], the guard locks the transaction as
    /// [`Transaction::get`] does.
    pub async fn current() -> Result<ActiveSession> {
        Self::get()
            .await
            .ok_or_else(|| QuarryError::NoActiveTransaction.into())
    }

    pub async fn is_active() -> bool {
        ACTIVE.lock().await.is_some()
    }

    /// Commit and discard the session, nothing happens when closed.
    pub async fn close() -> Result<()> {
        let Some(session) = Self::take().await else {
            return Ok(());
        };
        session.commit().await
    }

    /// Revert and discard the session, nothing happens when closed.
    pub async fn rollback() -> Result<()> {
        let Some(session) = Self::take().await else {
            return Ok(());
        };
        session.rollback().await
    }

    async fn take() -> Option<Session> {
        let session = ACTIVE.lock().await.take();
        if session.is_some() {
            set_dialect(None);
        }
        session
    }
}

impl Executor for Transaction {
    fn sql_writer(&self) -> &'static dyn SqlWriter {
        DIALECT
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .unwrap_or(&GenericSqlWriter)
    }

    fn run<'s>(&'s mut self, sql: String) -> BoxStream<'s, Result<QueryResult>> {
        try_stream! {
            let mut session = Transaction::current()
                .await
                .inspect_err(|e| log::error!("{:#}", e))?;
            let mut stream = session.run(sql);
            while let Some(value) = stream.next().await {
                yield value?;
            }
        }
        .boxed()
    }
}
