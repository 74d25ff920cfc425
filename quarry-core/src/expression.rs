use std::fmt::{self, Debug, Display};

pub const AND_OPERATOR: &str = "AND ";
pub const OR_OPERATOR: &str = "OR ";

/// Anything that can print itself as a SQL boolean fragment.
///
/// Rendering is pure: it never touches the database and depends only on the current state of the expression.
pub trait Expression: Debug + Send + Sync {
    fn write_query(&self, out: &mut String);

    fn dump(&self) -> String {
        let mut out = String::new();
        self.write_query(&mut out);
        out
    }
}

impl<E: Expression + ?Sized> Expression for &E {
    fn write_query(&self, out: &mut String) {
        (**self).write_query(out)
    }
}

impl<E: Expression + ?Sized> Expression for Box<E> {
    fn write_query(&self, out: &mut String) {
        (**self).write_query(out)
    }
}

/// Boolean keyword joining an expression to the ones before it.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    #[default]
    And,
    Or,
}

impl Operator {
    /// The keyword with its trailing space.
    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::And => AND_OPERATOR,
            Operator::Or => OR_OPERATOR,
        }
    }
}

impl Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
