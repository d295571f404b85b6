use std::fmt;

/// A SPARQL property path expression.
///
/// Paths are regular expressions over predicates. `Negated` holds the set of
/// forbidden predicate IRIs of a `!(…)` group.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PropertyPath {
    Iri(String),
    Inverse(Box<PropertyPath>),
    Sequence(Box<PropertyPath>, Box<PropertyPath>),
    Alternative(Box<PropertyPath>, Box<PropertyPath>),
    ZeroOrMore(Box<PropertyPath>),
    OneOrMore(Box<PropertyPath>),
    ZeroOrOne(Box<PropertyPath>),
    Negated(Vec<String>),
}

impl PropertyPath {
    pub fn iri(iri: impl Into<String>) -> Self {
        PropertyPath::Iri(iri.into())
    }

    #[must_use]
    pub fn inverse(self) -> Self {
        PropertyPath::Inverse(Box::new(self))
    }

    #[must_use]
    pub fn then(self, next: PropertyPath) -> Self {
        PropertyPath::Sequence(Box::new(self), Box::new(next))
    }

    #[must_use]
    pub fn or(self, other: PropertyPath) -> Self {
        PropertyPath::Alternative(Box::new(self), Box::new(other))
    }

    #[must_use]
    pub fn zero_or_more(self) -> Self {
        PropertyPath::ZeroOrMore(Box::new(self))
    }

    #[must_use]
    pub fn one_or_more(self) -> Self {
        PropertyPath::OneOrMore(Box::new(self))
    }

    #[must_use]
    pub fn zero_or_one(self) -> Self {
        PropertyPath::ZeroOrOne(Box::new(self))
    }

    /// Whether this path is a single forward predicate.
    #[must_use]
    pub fn as_trivial_iri(&self) -> Option<&str> {
        match self {
            PropertyPath::Iri(iri) => Some(iri),
            _ => None,
        }
    }
}

impl fmt::Display for PropertyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyPath::Iri(iri) => write!(f, "<{iri}>"),
            PropertyPath::Inverse(path) => write!(f, "^{path}"),
            PropertyPath::Sequence(a, b) => write!(f, "({a} / {b})"),
            PropertyPath::Alternative(a, b) => write!(f, "({a} | {b})"),
            PropertyPath::ZeroOrMore(path) => write!(f, "{path}*"),
            PropertyPath::OneOrMore(path) => write!(f, "{path}+"),
            PropertyPath::ZeroOrOne(path) => write!(f, "{path}?"),
            PropertyPath::Negated(iris) => {
                f.write_str("!(")?;
                for (i, iri) in iris.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" | ")?;
                    }
                    write!(f, "<{iri}>")?;
                }
                f.write_str(")")
            }
        }
    }
}
