use crate::Literal;
use std::fmt;

/// A reference to a column, optionally qualified by a table name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ColumnRef {
    pub table: Option<String>,
    pub column: String,
}

impl ColumnRef {
    pub fn new(column: impl Into<String>) -> Self {
        Self {
            table: None,
            column: column.into(),
        }
    }

    pub fn qualified(table: impl Into<String>, column: impl Into<String>) -> Self {
        Self {
            table: Some(table.into()),
            column: column.into(),
        }
    }
}

impl fmt::Display for ColumnRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.table {
            Some(table) => write!(f, "{table}.{}", self.column),
            None => write!(f, "{}", self.column),
        }
    }
}

/// A scalar expression over columns, variables and literals.
///
/// Expressions are immutable trees. The boxed representation keeps the enum
/// small; cloning shares nothing but is cheap enough for plan construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Expression {
    Literal(Literal),
    Column(ColumnRef),
    Variable(String),
    Not(Box<Expression>),
    Negate(Box<Expression>),
    IsNull(Box<Expression>),
    Equal(Box<Expression>, Box<Expression>),
    NotEqual(Box<Expression>, Box<Expression>),
    LessThan(Box<Expression>, Box<Expression>),
    LessOrEqual(Box<Expression>, Box<Expression>),
    GreaterThan(Box<Expression>, Box<Expression>),
    GreaterOrEqual(Box<Expression>, Box<Expression>),
    And(Box<Expression>, Box<Expression>),
    Or(Box<Expression>, Box<Expression>),
    Add(Box<Expression>, Box<Expression>),
    Sub(Box<Expression>, Box<Expression>),
    Mul(Box<Expression>, Box<Expression>),
    Div(Box<Expression>, Box<Expression>),
    Mod(Box<Expression>, Box<Expression>),
    Call { name: String, args: Vec<Expression> },
    In { expr: Box<Expression>, list: Vec<Expression> },
    Between { expr: Box<Expression>, low: Box<Expression>, high: Box<Expression> },
}

impl Expression {
    pub fn literal(value: impl Into<Literal>) -> Self {
        Expression::Literal(value.into())
    }

    pub fn variable(name: impl Into<String>) -> Self {
        Expression::Variable(name.into())
    }

    pub fn column(column: impl Into<String>) -> Self {
        Expression::Column(ColumnRef::new(column))
    }

    pub fn call(name: impl Into<String>, args: Vec<Expression>) -> Self {
        Expression::Call {
            name: name.into(),
            args,
        }
    }

    #[must_use]
    pub fn not(self) -> Self {
        Expression::Not(Box::new(self))
    }

    #[must_use]
    pub fn negate(self) -> Self {
        Expression::Negate(Box::new(self))
    }

    #[must_use]
    pub fn is_null(self) -> Self {
        Expression::IsNull(Box::new(self))
    }

    #[must_use]
    pub fn equal(self, other: Expression) -> Self {
        Expression::Equal(Box::new(self), Box::new(other))
    }

    #[must_use]
    pub fn not_equal(self, other: Expression) -> Self {
        Expression::NotEqual(Box::new(self), Box::new(other))
    }

    #[must_use]
    pub fn less_than(self, other: Expression) -> Self {
        Expression::LessThan(Box::new(self), Box::new(other))
    }

    #[must_use]
    pub fn less_or_equal(self, other: Expression) -> Self {
        Expression::LessOrEqual(Box::new(self), Box::new(other))
    }

    #[must_use]
    pub fn greater_than(self, other: Expression) -> Self {
        Expression::GreaterThan(Box::new(self), Box::new(other))
    }

    #[must_use]
    pub fn greater_or_equal(self, other: Expression) -> Self {
        Expression::GreaterOrEqual(Box::new(self), Box::new(other))
    }

    #[must_use]
    pub fn and(self, other: Expression) -> Self {
        Expression::And(Box::new(self), Box::new(other))
    }

    #[must_use]
    pub fn or(self, other: Expression) -> Self {
        Expression::Or(Box::new(self), Box::new(other))
    }

    #[must_use]
    pub fn add(self, other: Expression) -> Self {
        Expression::Add(Box::new(self), Box::new(other))
    }

    #[must_use]
    pub fn sub(self, other: Expression) -> Self {
        Expression::Sub(Box::new(self), Box::new(other))
    }

    #[must_use]
    pub fn mul(self, other: Expression) -> Self {
        Expression::Mul(Box::new(self), Box::new(other))
    }

    #[must_use]
    pub fn div(self, other: Expression) -> Self {
        Expression::Div(Box::new(self), Box::new(other))
    }

    #[must_use]
    pub fn modulo(self, other: Expression) -> Self {
        Expression::Mod(Box::new(self), Box::new(other))
    }

    #[must_use]
    pub fn in_list(self, list: Vec<Expression>) -> Self {
        Expression::In {
            expr: Box::new(self),
            list,
        }
    }

    #[must_use]
    pub fn between(self, low: Expression, high: Expression) -> Self {
        Expression::Between {
            expr: Box::new(self),
            low: Box::new(low),
            high: Box::new(high),
        }
    }
}

impl From<Literal> for Expression {
    fn from(value: Literal) -> Self {
        Expression::Literal(value)
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Literal(value) => write!(f, "{value}"),
            Expression::Column(column) => write!(f, "{column}"),
            Expression::Variable(name) => write!(f, "?{name}"),
            Expression::Not(inner) => write!(f, "!{}", Operand(inner)),
            Expression::Negate(inner) => write!(f, "-{}", Operand(inner)),
            Expression::IsNull(inner) => write!(f, "{} IS NULL", Operand(inner)),
            Expression::Equal(a, b) => write_binary(f, a, "=", b),
            Expression::NotEqual(a, b) => write_binary(f, a, "!=", b),
            Expression::LessThan(a, b) => write_binary(f, a, "<", b),
            Expression::LessOrEqual(a, b) => write_binary(f, a, "<=", b),
            Expression::GreaterThan(a, b) => write_binary(f, a, ">", b),
            Expression::GreaterOrEqual(a, b) => write_binary(f, a, ">=", b),
            Expression::And(a, b) => write_binary(f, a, "&&", b),
            Expression::Or(a, b) => write_binary(f, a, "||", b),
            Expression::Add(a, b) => write_binary(f, a, "+", b),
            Expression::Sub(a, b) => write_binary(f, a, "-", b),
            Expression::Mul(a, b) => write_binary(f, a, "*", b),
            Expression::Div(a, b) => write_binary(f, a, "/", b),
            Expression::Mod(a, b) => write_binary(f, a, "%", b),
            Expression::Call { name, args } => {
                write!(f, "{name}(")?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{arg}")?;
                }
                f.write_str(")")
            }
            Expression::In { expr, list } => {
                write!(f, "{} IN (", Operand(expr))?;
                for (i, item) in list.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str(")")
            }
            Expression::Between { expr, low, high } => {
                write!(
                    f,
                    "{} BETWEEN {} AND {}",
                    Operand(expr),
                    Operand(low),
                    Operand(high)
                )
            }
        }
    }
}

fn write_binary(
    f: &mut fmt::Formatter<'_>,
    left: &Expression,
    op: &str,
    right: &Expression,
) -> fmt::Result {
    write!(f, "{} {op} {}", Operand(left), Operand(right))
}

/// Wraps compound operands in parentheses so the rendering is unambiguous
/// without a precedence table.
struct Operand<'a>(&'a Expression);

impl fmt::Display for Operand<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Expression::Literal(_)
            | Expression::Column(_)
            | Expression::Variable(_)
            | Expression::Call { .. } => write!(f, "{}", self.0),
            _ => write!(f, "({})", self.0),
        }
    }
}
