use std::fmt;
use std::hash::{Hash, Hasher};

/// A scalar value as it appears in query expressions and plans.
///
/// The RDF-specific variants (`Iri`, `BlankNode`, `LangString`, `Typed`) carry
/// their lexical form without any validation. Whether an IRI is well-formed is
/// a concern of layers above the front end.
#[derive(Debug, Clone)]
pub enum Literal {
    Null,
    Boolean(bool),
    Int(i64),
    Double(f64),
    String(String),
    Iri(String),
    BlankNode(String),
    LangString { value: String, language: String },
    Typed { value: String, datatype: String },
}

impl Literal {
    pub fn iri(iri: impl Into<String>) -> Self {
        Literal::Iri(iri.into())
    }

    pub fn blank_node(id: impl Into<String>) -> Self {
        Literal::BlankNode(id.into())
    }

    pub fn lang_string(value: impl Into<String>, language: impl Into<String>) -> Self {
        Literal::LangString {
            value: value.into(),
            language: language.into(),
        }
    }

    pub fn typed(value: impl Into<String>, datatype: impl Into<String>) -> Self {
        Literal::Typed {
            value: value.into(),
            datatype: datatype.into(),
        }
    }

    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Literal::Null)
    }
}

/// Structural equality. `Double` compares by IEEE-754 bit pattern, so a plan
/// containing a `NaN` stays equal to a clone of itself and `0.0 != -0.0`.
impl PartialEq for Literal {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Literal::Null, Literal::Null) => true,
            (Literal::Boolean(a), Literal::Boolean(b)) => a == b,
            (Literal::Int(a), Literal::Int(b)) => a == b,
            (Literal::Double(a), Literal::Double(b)) => a.to_bits() == b.to_bits(),
            (Literal::String(a), Literal::String(b)) => a == b,
            (Literal::Iri(a), Literal::Iri(b)) => a == b,
            (Literal::BlankNode(a), Literal::BlankNode(b)) => a == b,
            (
                Literal::LangString { value: a, language: al },
                Literal::LangString { value: b, language: bl },
            ) => a == b && al == bl,
            (
                Literal::Typed { value: a, datatype: ad },
                Literal::Typed { value: b, datatype: bd },
            ) => a == b && ad == bd,
            _ => false,
        }
    }
}

impl Eq for Literal {}

impl Hash for Literal {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            Literal::Null => state.write_u8(0),
            Literal::Boolean(value) => {
                state.write_u8(1);
                value.hash(state);
            }
            Literal::Int(value) => {
                state.write_u8(2);
                value.hash(state);
            }
            Literal::Double(value) => {
                state.write_u8(3);
                value.to_bits().hash(state);
            }
            Literal::String(value) => {
                state.write_u8(4);
                value.hash(state);
            }
            Literal::Iri(value) => {
                state.write_u8(5);
                value.hash(state);
            }
            Literal::BlankNode(value) => {
                state.write_u8(6);
                value.hash(state);
            }
            Literal::LangString { value, language } => {
                state.write_u8(7);
                value.hash(state);
                language.hash(state);
            }
            Literal::Typed { value, datatype } => {
                state.write_u8(8);
                value.hash(state);
                datatype.hash(state);
            }
        }
    }
}

impl From<bool> for Literal {
    #[inline]
    fn from(value: bool) -> Self {
        Literal::Boolean(value)
    }
}

impl From<i64> for Literal {
    #[inline]
    fn from(value: i64) -> Self {
        Literal::Int(value)
    }
}

impl From<f64> for Literal {
    #[inline]
    fn from(value: f64) -> Self {
        Literal::Double(value)
    }
}

impl From<&str> for Literal {
    #[inline]
    fn from(value: &str) -> Self {
        Literal::String(value.into())
    }
}

impl From<String> for Literal {
    #[inline]
    fn from(value: String) -> Self {
        Literal::String(value)
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Null => write!(f, "null"),
            Literal::Boolean(value) => write!(f, "{value}"),
            Literal::Int(value) => write!(f, "{value}"),
            Literal::Double(value) => write!(f, "{value}"),
            Literal::String(value) => write_quoted(f, value),
            Literal::Iri(iri) => write!(f, "<{iri}>"),
            Literal::BlankNode(id) => write!(f, "_:{id}"),
            Literal::LangString { value, language } => {
                write_quoted(f, value)?;
                write!(f, "@{language}")
            }
            Literal::Typed { value, datatype } => {
                write_quoted(f, value)?;
                write!(f, "^^<{datatype}>")
            }
        }
    }
}

fn write_quoted(f: &mut fmt::Formatter<'_>, value: &str) -> fmt::Result {
    f.write_str("\"")?;
    for c in value.chars() {
        match c {
            '"' => f.write_str("\\\"")?,
            '\\' => f.write_str("\\\\")?,
            '\n' => f.write_str("\\n")?,
            '\r' => f.write_str("\\r")?,
            '\t' => f.write_str("\\t")?,
            _ => fmt::Write::write_char(f, c)?,
        }
    }
    f.write_str("\"")
}
