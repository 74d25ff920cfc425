use crate::{
    CBox, SqliteDriver, SqliteSqlWriter, error_message_from_ptr,
    extract::{extract_name, extract_value},
};
use async_stream::try_stream;
use libsqlite3_sys::{
    SQLITE_BUSY, SQLITE_DONE, SQLITE_OK, SQLITE_OPEN_CREATE, SQLITE_OPEN_READWRITE,
    SQLITE_OPEN_URI, SQLITE_ROW, sqlite3, sqlite3_close, sqlite3_column_count, sqlite3_db_handle,
    sqlite3_errmsg, sqlite3_finalize, sqlite3_last_insert_rowid, sqlite3_open_v2,
    sqlite3_prepare_v2, sqlite3_step, sqlite3_stmt, sqlite3_total_changes,
};
use quarry_core::{
    Connection, Context, Error, Executor, QueryResult, Result, RowLabeled, RowNames,
    RowsAffected, SqlWriter,
    stream::{BoxStream, StreamExt},
    truncate_long,
};
use std::{
    ffi::{CString, c_int},
    ptr,
    sync::Arc,
};
use tokio::task::spawn_blocking;

pub struct SqliteConnection {
    pub(crate) connection: CBox<*mut sqlite3>,
}

impl SqliteConnection {
    /// Open the database at `sqlite://<path>`, the query part is passed to sqlite as URI parameters (`?mode=ro`).
    pub async fn open(url: &str) -> Result<Self> {
        let prefix = format!("{}://", SqliteDriver::NAME);
        let Some(path) = url.strip_prefix(&prefix) else {
            let error = Error::msg(format!(
                "Expected sqlite connection url to start with `{}`",
                &prefix
            ));
            log::error!("{:#}", error);
            return Err(error);
        };
        let context = || format!("Error while decoding connection URL: `{}`", url);
        let path = CString::new(format!("file:{}", path)).with_context(context)?;
        let mut connection = CBox::new(ptr::null_mut(), |p| unsafe {
            sqlite3_close(p);
        });
        let rc = unsafe {
            sqlite3_open_v2(
                path.as_ptr(),
                &mut *connection,
                SQLITE_OPEN_READWRITE | SQLITE_OPEN_CREATE | SQLITE_OPEN_URI,
                ptr::null(),
            )
        };
        if rc != SQLITE_OK {
            let error = Error::msg(error_message_from_ptr(unsafe { sqlite3_errmsg(*connection) }))
                .context(format!("Could not open the database `{}`", url));
            log::error!("{:#}", error);
            return Err(error);
        }
        Ok(Self { connection })
    }
}

/// Prepare the first statement found at `offset`, returns it along with the offset of the rest of the text.
async fn prepare_next(
    connection: Arc<CBox<*mut sqlite3>>,
    sql: Arc<CString>,
    offset: usize,
) -> Result<(CBox<*mut sqlite3_stmt>, usize)> {
    spawn_blocking(move || unsafe {
        let mut statement = CBox::new(ptr::null_mut(), |p| {
            sqlite3_finalize(p);
        });
        let head = sql.as_ptr().add(offset);
        let mut tail = ptr::null();
        let rc = sqlite3_prepare_v2(**connection, head, -1, &mut *statement, &mut tail);
        if rc != SQLITE_OK {
            return Err(Error::msg(error_message_from_ptr(sqlite3_errmsg(
                **connection,
            ))));
        }
        let next = if tail.is_null() {
            sql.as_bytes().len()
        } else {
            tail.offset_from(sql.as_ptr()) as usize
        };
        Ok((statement, next))
    })
    .await?
}

/// Advance the statement, `true` when a row is available.
fn step(statement: *mut sqlite3_stmt) -> Result<bool> {
    loop {
        match unsafe { sqlite3_step(statement) } {
            SQLITE_BUSY => continue,
            SQLITE_ROW => return Ok(true),
            SQLITE_DONE => return Ok(false),
            _ => {
                return Err(Error::msg(error_message_from_ptr(unsafe {
                    sqlite3_errmsg(sqlite3_db_handle(statement))
                })));
            }
        }
    }
}

impl Executor for SqliteConnection {
    fn sql_writer(&self) -> &'static dyn SqlWriter {
        &SqliteSqlWriter
    }

    fn run<'s>(&'s mut self, sql: String) -> BoxStream<'s, Result<QueryResult>> {
        // Borrowed handle, it is closed by `self`
        let connection = Arc::new(CBox::new(*self.connection, |_| {}));
        try_stream! {
            let context = format!("While running the query:\n{}", truncate_long!(sql));
            let sql = Arc::new(
                CString::new(sql)
                    .map_err(|e| Error::new(e).context(context.clone()))
                    .inspect_err(|e| log::error!("{:#}", e))?,
            );
            let len = sql.as_bytes().len();
            let mut offset = 0;
            while offset < len {
                let (statement, next) = prepare_next(connection.clone(), sql.clone(), offset)
                    .await
                    .map_err(|e| e.context(context.clone()))
                    .inspect_err(|e| log::error!("{:#}", e))?;
                offset = next;
                if statement.is_null() {
                    // Whitespace or comment only
                    continue;
                }
                let count: c_int = unsafe { sqlite3_column_count(*statement) };
                let labels = (0..count)
                    .map(|i| extract_name(*statement, i))
                    .collect::<Result<RowNames>>()?;
                let changes = unsafe { sqlite3_total_changes(**connection) };
                let rowid = unsafe { sqlite3_last_insert_rowid(**connection) };
                while step(*statement)
                    .map_err(|e| e.context(context.clone()))
                    .inspect_err(|e| log::error!("{:#}", e))?
                {
                    let values = (0..count)
                        .map(|i| extract_value(*statement, i))
                        .collect::<Result<_>>()?;
                    yield QueryResult::Row(RowLabeled::new(labels.clone(), values));
                }
                if count == 0 {
                    let rows_affected = unsafe { sqlite3_total_changes(**connection) } - changes;
                    let last_rowid = unsafe { sqlite3_last_insert_rowid(**connection) };
                    yield QueryResult::Affected(RowsAffected {
                        rows_affected: rows_affected.max(0) as u64,
                        last_affected_id: (last_rowid != rowid).then_some(last_rowid),
                    });
                }
            }
        }
        .boxed()
    }
}

impl Connection for SqliteConnection {
    async fn connect(url: &str) -> Result<SqliteConnection> {
        Self::open(url).await
    }
}
