use crate::algebra::GraphPattern;
use crate::update::UpdateOperation;
use omniql_model::{Expression, Term, TriplePattern};
use rustc_hash::FxHashMap;

/// A parsed statement: one of the four query forms or an update operation.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryStatement {
    Select(SelectQuery),
    Construct(ConstructQuery),
    Ask(AskQuery),
    Describe(DescribeQuery),
    Update(UpdateOperation),
}

/// The prologue shared by all statements: `BASE`, `PREFIX` declarations and
/// the optional `VERSION` string.
///
/// `VERSION` is recorded verbatim; the front end attaches no semantics to it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Prologue {
    pub base: Option<String>,
    pub prefixes: FxHashMap<String, String>,
    pub version: Option<String>,
}

impl Prologue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves `prefix:local` by concatenating the declared IRI and the
    /// local part. Returns `None` for undeclared prefixes.
    #[must_use]
    pub fn resolve(&self, prefix: &str, local: &str) -> Option<String> {
        self.prefixes.get(prefix).map(|iri| format!("{iri}{local}"))
    }
}

/// What a SELECT query projects.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Projection {
    /// `SELECT *`.
    #[default]
    All,
    /// An explicit, non-empty item list.
    Items(Vec<ProjectionItem>),
}

/// One projection item: a bare variable or an aliased expression.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectionItem {
    pub expression: Expression,
    pub alias: Option<String>,
}

impl ProjectionItem {
    /// A bare `?name` item.
    pub fn variable(name: impl Into<String>) -> Self {
        Self {
            expression: Expression::Variable(name.into()),
            alias: None,
        }
    }

    pub fn aliased(expression: Expression, alias: impl Into<String>) -> Self {
        Self {
            expression,
            alias: Some(alias.into()),
        }
    }
}

/// A `FROM` or `FROM NAMED` dataset clause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetClause {
    pub iri: String,
    pub named: bool,
}

/// One `ORDER BY` key.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderKey {
    pub expression: Expression,
    pub descending: bool,
}

impl OrderKey {
    pub fn ascending(expression: Expression) -> Self {
        Self {
            expression,
            descending: false,
        }
    }

    pub fn descending(expression: Expression) -> Self {
        Self {
            expression,
            descending: true,
        }
    }
}

/// A SELECT query: projection, WHERE pattern and solution modifiers.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectQuery {
    pub prologue: Prologue,
    pub projection: Projection,
    pub datasets: Vec<DatasetClause>,
    pub source: GraphPattern,
    pub group_by: Vec<Expression>,
    pub having: Option<Expression>,
    pub order_by: Vec<OrderKey>,
    pub limit: Option<u64>,
    pub offset: u64,
    pub distinct: bool,
    pub reduced: bool,
}

impl SelectQuery {
    /// A query with the given projection and pattern and default modifiers:
    /// no grouping, no ordering, unbounded, offset zero, not distinct.
    pub fn new(prologue: Prologue, projection: Projection, source: GraphPattern) -> Self {
        Self {
            prologue,
            projection,
            datasets: Vec::new(),
            source,
            group_by: Vec::new(),
            having: None,
            order_by: Vec::new(),
            limit: None,
            offset: 0,
            distinct: false,
            reduced: false,
        }
    }
}

/// A CONSTRUCT query: a triple template instantiated per solution.
#[derive(Debug, Clone, PartialEq)]
pub struct ConstructQuery {
    pub prologue: Prologue,
    pub template: Vec<TriplePattern>,
    pub datasets: Vec<DatasetClause>,
    pub source: GraphPattern,
    pub order_by: Vec<OrderKey>,
    pub limit: Option<u64>,
    pub offset: u64,
}

/// An ASK query: true iff the pattern has at least one solution.
#[derive(Debug, Clone, PartialEq)]
pub struct AskQuery {
    pub prologue: Prologue,
    pub datasets: Vec<DatasetClause>,
    pub source: GraphPattern,
}

/// A DESCRIBE query. Empty `targets` means `DESCRIBE *`.
#[derive(Debug, Clone, PartialEq)]
pub struct DescribeQuery {
    pub prologue: Prologue,
    pub targets: Vec<Term>,
    pub datasets: Vec<DatasetClause>,
    pub source: Option<GraphPattern>,
}
