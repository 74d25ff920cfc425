use crate::{
    Executor, IndexMap, Result, RowLabeled, RowsAffected, SqlWriter, Value, stream::StreamExt,
    truncate_long, write_hex,
};
use std::future::Future;

/// Column values of a record, kept in the order they were first assigned.
#[derive(Default, Debug, Clone, PartialEq)]
pub struct Attributes(IndexMap<String, Value>);

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    /// Assigns `value`, a null value removes the attribute instead.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        let name = name.into();
        match value.into() {
            Value::Null => {
                self.0.shift_remove(&name);
            }
            value => {
                self.0.insert(name, value);
            }
        }
    }

    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.0.shift_remove(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Attributes {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl From<IndexMap<String, Value>> for Attributes {
    fn from(value: IndexMap<String, Value>) -> Self {
        Self(value)
    }
}

impl IntoIterator for Attributes {
    type Item = (String, Value);
    type IntoIter = indexmap::map::IntoIter<String, Value>;
    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Literal used when storing a record, text is quoted by [`SqlWriter::write_string_literal`] of `writer`.
///
/// Unlike [`crate::Filter::transform`], non empty strings are escaped, and both null and the empty string become
/// `NULL`.
pub fn escape_literal(writer: &dyn SqlWriter, value: &Value) -> String {
    let mut out = String::new();
    match value {
        Value::Varchar(v) if !v.is_empty() => writer.write_string_literal(&mut out, v),
        Value::Boolean(v) => out.push_str(if *v { "TRUE" } else { "FALSE" }),
        Value::Null | Value::Varchar(..) => out.push_str("NULL"),
        Value::Int64(v) => out.push_str(itoa::Buffer::new().format(*v)),
        Value::Float64(v) => out.push_str(&v.to_string()),
        Value::Blob(v) => write_hex(&mut out, v),
        Value::List(v) => {
            out.push('(');
            crate::separated_by(
                &mut out,
                v,
                |out, v| out.push_str(&escape_literal(writer, v)),
                ", ",
            );
            out.push(')');
        }
    }
    out
}

/// Escapes every scalar attribute, the others are left out.
pub fn prepare_literals(writer: &dyn SqlWriter, data: &Attributes) -> IndexMap<String, String> {
    data.iter()
        .filter(|(_, v)| v.is_scalar())
        .map(|(k, v)| (k.to_string(), escape_literal(writer, v)))
        .collect()
}

async fn max_key<E: Executor + ?Sized>(executor: &mut E, sql: String) -> Result<i64> {
    log::debug!("{}", truncate_long!(sql));
    let row = executor.fetch(sql).next().await.transpose()?;
    Ok(row
        .and_then(|row| row.values.first().map(Value::to_integer))
        .unwrap_or(0))
}

/// A table row mapped onto an object.
///
/// Implementors own an [`Attributes`] map and name their table. Attribute access goes through [`Record::get`] and
/// [`Record::set`]: override them to declare computed accessors for some names and fall back to the map for the
/// others. Loaded rows are assigned column by column through `set`.
///
/// ```ignore
/// #[derive(Default, Debug, Record)]
/// #[quarry(table = "products")]
/// struct Product {
///     data: Attributes,
/// }
/// ```
///
/// All the database operations take the [`Executor`] to run on, pass `&mut Transaction` to use the process-wide
/// transaction.
pub trait Record: Default + Send + Sync {
    const TABLE_NAME: &'static str;
    const PRIMARY_KEY: &'static str = "id";

    fn attributes(&self) -> &Attributes;
    fn attributes_mut(&mut self) -> &mut Attributes;

    fn entity(&self) -> &'static str {
        Self::TABLE_NAME
    }

    fn primary_key(&self) -> &'static str {
        Self::PRIMARY_KEY
    }

    fn get(&self, name: &str) -> Option<Value> {
        self.attributes().get(name).cloned()
    }

    /// Assigns an attribute, `Value::Null` removes it.
    fn set(&mut self, name: &str, value: impl Into<Value>) {
        self.attributes_mut().set(name, value)
    }

    /// Replaces all the attributes, bypassing `set`.
    fn from_array(&mut self, data: Attributes) {
        *self.attributes_mut() = data;
    }

    fn to_array(&self) -> Attributes {
        self.attributes().clone()
    }

    fn from_row(row: RowLabeled) -> Self {
        let mut record = Self::default();
        for (name, value) in row.labels.iter().zip(row.values.into_vec()) {
            record.set(name, value);
        }
        record
    }

    /// Copy of the attributes without the primary key: the result is not yet a row in the database.
    fn duplicate(&self) -> Self {
        let mut result = Self::default();
        result.from_array(self.to_array());
        result.attributes_mut().remove(Self::PRIMARY_KEY);
        result
    }

    fn escape(&self, writer: &dyn SqlWriter, value: &Value) -> String {
        escape_literal(writer, value)
    }

    fn prepare(&self, writer: &dyn SqlWriter, data: &Attributes) -> IndexMap<String, String> {
        prepare_literals(writer, data)
    }

    /// Fetch the row having `id` as primary key.
    fn load<E: Executor + ?Sized>(
        &self,
        executor: &mut E,
        id: impl Into<Value>,
    ) -> impl Future<Output = Result<Option<Self>>> + Send {
        let writer = executor.sql_writer();
        let mut sql = String::with_capacity(64);
        writer.write_select_by_key(
            &mut sql,
            self.entity(),
            self.primary_key(),
            &self.escape(writer, &id.into()),
        );
        async move {
            log::debug!("{}", truncate_long!(sql));
            let row = executor.fetch(sql).next().await.transpose()?;
            Ok(row.map(Self::from_row))
        }
    }

    /// Same as [`Record::load`] on a fresh instance.
    fn find<E: Executor + ?Sized>(
        executor: &mut E,
        id: impl Into<Value>,
    ) -> impl Future<Output = Result<Option<Self>>> + Send {
        let id = id.into();
        async move { Self::default().load(executor, id).await }
    }

    /// New instance filled with the row having `id` as primary key, empty when there is no such row.
    fn with_id<E: Executor + ?Sized>(
        executor: &mut E,
        id: impl Into<Value>,
    ) -> impl Future<Output = Result<Self>> + Send {
        let id = id.into();
        async move {
            let mut record = Self::default();
            if id.is_empty() {
                return Ok(record);
            }
            let loaded = record.load(executor, id).await?;
            if let Some(loaded) = loaded {
                record.from_array(loaded.to_array());
            }
            Ok(record)
        }
    }

    /// Insert the record, or update it when a row with its primary key already exists.
    ///
    /// # Warning
    /// Without a primary key the next one is computed as `MAX(key) + 1`, two concurrent writers can pick the same
    /// value. Prefer assigning keys from a database sequence when more than one process writes the table.
    fn store<E: Executor + ?Sized>(
        &mut self,
        executor: &mut E,
    ) -> impl Future<Output = Result<RowsAffected>> + Send {
        async move {
            let writer = executor.sql_writer();
            let table = self.entity();
            let primary_key = self.primary_key();
            let mut prepared = self.prepare(writer, self.attributes());
            let has_key = self
                .attributes()
                .get(primary_key)
                .is_some_and(|v| !v.is_empty());
            let exists = has_key
                && self
                    .load(executor, self.get(primary_key).unwrap_or_default())
                    .await?
                    .is_some();
            let mut sql = String::with_capacity(128);
            if exists {
                if prepared.keys().all(|column| column == primary_key) {
                    log::debug!(
                        "Nothing to update in `{}` besides the primary key, skipping the statement",
                        table
                    );
                    return Ok(RowsAffected::default());
                }
                let key = self
                    .attributes()
                    .get(primary_key)
                    .map(Value::to_integer)
                    .unwrap_or_default();
                writer.write_update(&mut sql, table, primary_key, &prepared, key);
            } else {
                if !has_key {
                    let mut query = String::with_capacity(64);
                    writer.write_select_max(&mut query, table, primary_key);
                    log::warn!(
                        "Generating the primary key of `{}` as MAX({}) + 1, this is not safe with concurrent writers",
                        table,
                        primary_key
                    );
                    let key = max_key(executor, query).await? + 1;
                    self.set(primary_key, key);
                    let key = self.escape(writer, &self.get(primary_key).unwrap_or_default());
                    prepared.insert(primary_key.to_string(), key);
                }
                writer.write_insert(&mut sql, table, &prepared);
            }
            log::debug!("{}", truncate_long!(sql));
            executor.execute(sql).await
        }
    }

    /// Delete the row of this record.
    fn delete<E: Executor + ?Sized>(
        &self,
        executor: &mut E,
    ) -> impl Future<Output = Result<RowsAffected>> + Send {
        let id = self.get(self.primary_key()).unwrap_or_default();
        self.delete_by_id(executor, id)
    }

    /// Delete the row having `id` as primary key.
    fn delete_by_id<E: Executor + ?Sized>(
        &self,
        executor: &mut E,
        id: impl Into<Value>,
    ) -> impl Future<Output = Result<RowsAffected>> + Send {
        let writer = executor.sql_writer();
        let mut sql = String::with_capacity(64);
        writer.write_delete_by_key(
            &mut sql,
            self.entity(),
            self.primary_key(),
            &self.escape(writer, &id.into()),
        );
        async move {
            log::debug!("{}", truncate_long!(sql));
            executor.execute(sql).await
        }
    }
}
