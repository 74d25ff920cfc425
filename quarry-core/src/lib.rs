mod config;
mod connection;
mod criteria;
mod driver;
mod error;
mod executor;
mod expression;
mod filter;
mod query;
mod record;
mod repository;
mod session;
mod transaction;
mod util;
mod value;
mod writer;

pub use ::anyhow::Context;
pub use config::*;
pub use connection::*;
pub use criteria::*;
pub use driver::*;
pub use error::*;
pub use executor::*;
pub use expression::*;
pub use filter::*;
pub use indexmap::IndexMap;
pub use query::*;
pub use record::*;
pub use repository::*;
pub use session::*;
pub use transaction::*;
pub use util::*;
pub use value::*;
pub use writer::*;
pub mod stream {
    pub use ::futures::stream::*;
}
pub use ::futures::future;

pub type Result<T> = anyhow::Result<T>;
pub type Error = anyhow::Error;
