use omniql_model::{Expression, PropertyPath, Term, TriplePattern};
use rustc_hash::FxHashSet;

/// The WHERE-clause pattern tree.
///
/// `Basic` is a conjunctive block of triple patterns; everything else wraps or
/// combines patterns. A non-trivial property path in the verb position
/// produces a dedicated `Path` node instead of a triple.
#[derive(Debug, Clone, PartialEq)]
pub enum GraphPattern {
    Basic(Vec<TriplePattern>),
    Path {
        subject: Term,
        path: PropertyPath,
        object: Term,
    },
    Optional(Box<GraphPattern>),
    Union(Box<GraphPattern>, Box<GraphPattern>),
    Minus(Box<GraphPattern>, Box<GraphPattern>),
    Filter {
        condition: Expression,
        inner: Box<GraphPattern>,
    },
    Bind {
        expression: Expression,
        variable: String,
        inner: Box<GraphPattern>,
    },
    Values(ValuesBlock),
    Service {
        name: Term,
        silent: bool,
        inner: Box<GraphPattern>,
    },
    Lateral(Box<GraphPattern>),
    Graph {
        name: Term,
        inner: Box<GraphPattern>,
    },
    Group(Vec<GraphPattern>),
}

impl GraphPattern {
    /// Collapses a sequence of patterns: one element stands alone, anything
    /// else becomes a `Group`.
    #[must_use]
    pub fn group(mut patterns: Vec<GraphPattern>) -> GraphPattern {
        if patterns.len() == 1 {
            patterns.remove(0)
        } else {
            GraphPattern::Group(patterns)
        }
    }

    /// The variables this pattern can bind, in first-occurrence order.
    ///
    /// `MINUS` right-hand sides and filter conditions do not bind and are not
    /// visited.
    pub fn variables(&self) -> Vec<String> {
        let mut seen = FxHashSet::default();
        let mut out = Vec::new();
        self.collect_variables(&mut seen, &mut out);
        out
    }

    fn collect_variables(&self, seen: &mut FxHashSet<String>, out: &mut Vec<String>) {
        let push = |name: &str, seen: &mut FxHashSet<String>, out: &mut Vec<String>| {
            if seen.insert(name.to_owned()) {
                out.push(name.to_owned());
            }
        };
        match self {
            GraphPattern::Basic(triples) => {
                for triple in triples {
                    for name in triple.variables() {
                        push(name, seen, out);
                    }
                }
            }
            GraphPattern::Path { subject, object, .. } => {
                for term in [subject, object] {
                    if let Some(name) = term.as_variable() {
                        push(name, seen, out);
                    }
                }
            }
            GraphPattern::Optional(inner) | GraphPattern::Lateral(inner) => {
                inner.collect_variables(seen, out);
            }
            GraphPattern::Union(left, right) => {
                left.collect_variables(seen, out);
                right.collect_variables(seen, out);
            }
            GraphPattern::Minus(left, _) => left.collect_variables(seen, out),
            GraphPattern::Filter { inner, .. } => inner.collect_variables(seen, out),
            GraphPattern::Bind {
                variable, inner, ..
            } => {
                inner.collect_variables(seen, out);
                push(variable, seen, out);
            }
            GraphPattern::Values(values) => {
                for variable in &values.variables {
                    push(variable, seen, out);
                }
            }
            GraphPattern::Service { inner, .. } => inner.collect_variables(seen, out),
            GraphPattern::Graph { name, inner } => {
                if let Some(variable) = name.as_variable() {
                    push(variable, seen, out);
                }
                inner.collect_variables(seen, out);
            }
            GraphPattern::Group(children) => {
                for child in children {
                    child.collect_variables(seen, out);
                }
            }
        }
    }

    /// All triple patterns of the `Basic` blocks in this tree, in order.
    /// Used by the `CONSTRUCT WHERE { … }` shorthand.
    pub fn basic_triples(&self) -> Vec<TriplePattern> {
        let mut out = Vec::new();
        self.collect_basic_triples(&mut out);
        out
    }

    fn collect_basic_triples(&self, out: &mut Vec<TriplePattern>) {
        match self {
            GraphPattern::Basic(triples) => out.extend(triples.iter().cloned()),
            GraphPattern::Optional(inner)
            | GraphPattern::Lateral(inner)
            | GraphPattern::Filter { inner, .. }
            | GraphPattern::Bind { inner, .. }
            | GraphPattern::Service { inner, .. }
            | GraphPattern::Graph { inner, .. } => inner.collect_basic_triples(out),
            GraphPattern::Union(left, right) | GraphPattern::Minus(left, right) => {
                left.collect_basic_triples(out);
                right.collect_basic_triples(out);
            }
            GraphPattern::Group(children) => {
                for child in children {
                    child.collect_basic_triples(out);
                }
            }
            GraphPattern::Path { .. } | GraphPattern::Values(_) => {}
        }
    }
}

/// An inline `VALUES` data block. A row entry of `None` is `UNDEF`.
#[derive(Debug, Clone, PartialEq)]
pub struct ValuesBlock {
    pub variables: Vec<String>,
    pub rows: Vec<Vec<Option<Term>>>,
}
