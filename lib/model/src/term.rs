use crate::Literal;
use std::fmt;

/// A term in a triple pattern position.
///
/// Any position may hold a variable. Quoted triples (RDF-star) nest a whole
/// [`TriplePattern`] as a subject or object term.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Term {
    Variable(String),
    Iri(String),
    Literal(Literal),
    BlankNode(String),
    QuotedTriple(Box<TriplePattern>),
}

impl Term {
    pub fn variable(name: impl Into<String>) -> Self {
        Term::Variable(name.into())
    }

    pub fn iri(iri: impl Into<String>) -> Self {
        Term::Iri(iri.into())
    }

    pub fn literal(value: impl Into<Literal>) -> Self {
        Term::Literal(value.into())
    }

    pub fn blank_node(id: impl Into<String>) -> Self {
        Term::BlankNode(id.into())
    }

    pub fn quoted_triple(triple: TriplePattern) -> Self {
        Term::QuotedTriple(Box::new(triple))
    }

    /// Returns the variable name if this term is a variable.
    #[must_use]
    pub fn as_variable(&self) -> Option<&str> {
        match self {
            Term::Variable(name) => Some(name),
            _ => None,
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Variable(name) => write!(f, "?{name}"),
            Term::Iri(iri) => write!(f, "<{iri}>"),
            Term::Literal(value) => write!(f, "{value}"),
            Term::BlankNode(id) => write!(f, "_:{id}"),
            Term::QuotedTriple(triple) => write!(f, "<< {triple} >>"),
        }
    }
}

/// An RDF-style subject-predicate-object pattern.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TriplePattern {
    pub subject: Term,
    pub predicate: Term,
    pub object: Term,
}

impl TriplePattern {
    pub fn new(subject: Term, predicate: Term, object: Term) -> Self {
        Self {
            subject,
            predicate,
            object,
        }
    }

    /// The variables bound by this pattern, in subject-predicate-object order.
    pub fn variables(&self) -> Vec<&str> {
        let mut variables = Vec::new();
        collect_variables(&self.subject, &mut variables);
        collect_variables(&self.predicate, &mut variables);
        collect_variables(&self.object, &mut variables);
        variables
    }
}

fn collect_variables<'pattern>(term: &'pattern Term, out: &mut Vec<&'pattern str>) {
    match term {
        Term::Variable(name) => out.push(name),
        Term::QuotedTriple(triple) => {
            collect_variables(&triple.subject, out);
            collect_variables(&triple.predicate, out);
            collect_variables(&triple.object, out);
        }
        _ => {}
    }
}

impl fmt::Display for TriplePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.subject, self.predicate, self.object)
    }
}

/// A triple plus the graph it belongs to. `graph` of `None` addresses the
/// default graph. Used by update data blocks and graph-wrapped templates.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Quad {
    pub subject: Term,
    pub predicate: Term,
    pub object: Term,
    pub graph: Option<Term>,
}

impl Quad {
    pub fn new(subject: Term, predicate: Term, object: Term, graph: Option<Term>) -> Self {
        Self {
            subject,
            predicate,
            object,
            graph,
        }
    }

    pub fn from_triple(triple: TriplePattern, graph: Option<Term>) -> Self {
        Self {
            subject: triple.subject,
            predicate: triple.predicate,
            object: triple.object,
            graph,
        }
    }
}

impl fmt::Display for Quad {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.subject, self.predicate, self.object)?;
        if let Some(graph) = &self.graph {
            write!(f, " {graph}")?;
        }
        Ok(())
    }
}
