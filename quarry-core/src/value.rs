use crate::{Error, Result, util::write_hex};
use std::fmt::{self, Display, Write};

/// A single cell: attribute of a record, literal of a filter or column of a fetched row.
#[derive(Default, Debug, Clone, PartialEq)]
pub enum Value {
    #[default]
    Null,
    Boolean(bool),
    Int64(i64),
    Float64(f64),
    Varchar(String),
    Blob(Box<[u8]>),
    List(Vec<Value>),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Boolean, number, text or blob.
    pub fn is_scalar(&self) -> bool {
        !matches!(self, Value::Null | Value::List(..))
    }

    /// Whether the value counts as "nothing there": null, false, zero, `""`, `"0"` or an empty collection.
    pub fn is_empty(&self) -> bool {
        match self {
            Value::Null => true,
            Value::Boolean(v) => !v,
            Value::Int64(v) => *v == 0,
            Value::Float64(v) => *v == 0.0,
            Value::Varchar(v) => v.is_empty() || v == "0",
            Value::Blob(v) => v.is_empty(),
            Value::List(v) => v.is_empty(),
        }
    }

    /// Integer cast, text is parsed up to the first non digit and falls back to zero.
    pub fn to_integer(&self) -> i64 {
        match self {
            Value::Boolean(v) => *v as i64,
            Value::Int64(v) => *v,
            Value::Float64(v) => *v as i64,
            Value::Varchar(v) => {
                let v = v.trim_start();
                let digits = v
                    .char_indices()
                    .take_while(|(i, c)| c.is_ascii_digit() || (*i == 0 && (*c == '-' || *c == '+')))
                    .count();
                v[..digits].parse().unwrap_or(0)
            }
            Value::Null | Value::Blob(..) | Value::List(..) => 0,
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("NULL"),
            Value::Boolean(v) => f.write_str(if *v { "TRUE" } else { "FALSE" }),
            Value::Int64(v) => f.write_str(itoa::Buffer::new().format(*v)),
            Value::Float64(v) => write!(f, "{}", v),
            Value::Varchar(v) => f.write_str(v),
            Value::Blob(v) => {
                let mut out = String::new();
                write_hex(&mut out, v);
                f.write_str(&out)
            }
            Value::List(v) => {
                f.write_char('(')?;
                for (i, item) in v.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_char(')')
            }
        }
    }
}

pub trait AsValue {
    fn as_value(self) -> Value;
    fn try_from_value(value: Value) -> Result<Self>
    where
        Self: Sized;
}

macro_rules! impl_as_value {
    ($source:ty, $into:path, $from:pat => $result:expr) => {
        impl AsValue for $source {
            fn as_value(self) -> Value {
                $into(self.into())
            }
            fn try_from_value(value: Value) -> Result<Self> {
                match value {
                    $from => Ok($result),
                    _ => Err(Error::msg(format!(
                        "Cannot convert {:?} into {}",
                        value,
                        stringify!($source)
                    ))),
                }
            }
        }
    };
}

impl_as_value!(bool, Value::Boolean, Value::Boolean(v) => v);
impl_as_value!(i64, Value::Int64, Value::Int64(v) => v);
impl_as_value!(f64, Value::Float64, Value::Float64(v) => v);
impl_as_value!(String, Value::Varchar, Value::Varchar(v) => v);

macro_rules! impl_as_value_integer {
    ($($source:ty),+ $(,)?) => {
        $(
            impl AsValue for $source {
                fn as_value(self) -> Value {
                    Value::Int64(self as i64)
                }
                fn try_from_value(value: Value) -> Result<Self> {
                    let Value::Int64(v) = value else {
                        return Err(Error::msg(format!(
                            "Cannot convert {:?} into {}",
                            value,
                            stringify!($source)
                        )));
                    };
                    <$source>::try_from(v).map_err(Error::new)
                }
            }
        )+
    };
}

impl_as_value_integer!(i8, i16, i32, u8, u16, u32);

impl AsValue for f32 {
    fn as_value(self) -> Value {
        Value::Float64(self as f64)
    }
    fn try_from_value(value: Value) -> Result<Self> {
        f64::try_from_value(value).map(|v| v as f32)
    }
}

impl AsValue for &str {
    fn as_value(self) -> Value {
        Value::Varchar(self.to_owned())
    }
    fn try_from_value(value: Value) -> Result<Self> {
        Err(Error::msg(format!(
            "Cannot borrow a &str out of {:?}, use String instead",
            value
        )))
    }
}

impl AsValue for Box<[u8]> {
    fn as_value(self) -> Value {
        Value::Blob(self)
    }
    fn try_from_value(value: Value) -> Result<Self> {
        match value {
            Value::Blob(v) => Ok(v),
            _ => Err(Error::msg(format!("Cannot convert {:?} into a blob", value))),
        }
    }
}

impl<T: AsValue> AsValue for Option<T> {
    fn as_value(self) -> Value {
        match self {
            Some(v) => v.as_value(),
            None => Value::Null,
        }
    }
    fn try_from_value(value: Value) -> Result<Self> {
        match value {
            Value::Null => Ok(None),
            v => T::try_from_value(v).map(Some),
        }
    }
}

impl<T: AsValue> AsValue for Vec<T> {
    fn as_value(self) -> Value {
        Value::List(self.into_iter().map(AsValue::as_value).collect())
    }
    fn try_from_value(value: Value) -> Result<Self> {
        match value {
            Value::List(v) => v.into_iter().map(T::try_from_value).collect(),
            _ => Err(Error::msg(format!("Cannot convert {:?} into a list", value))),
        }
    }
}

impl<T: AsValue> From<T> for Value {
    fn from(value: T) -> Self {
        value.as_value()
    }
}
