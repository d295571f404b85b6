use crate::algebra::GraphPattern;
use crate::query::DatasetClause;
use omniql_model::Quad;

/// A SPARQL Update operation.
#[derive(Debug, Clone, PartialEq)]
pub enum UpdateOperation {
    Load {
        source: String,
        into: Option<String>,
        silent: bool,
    },
    Clear {
        target: GraphTarget,
        silent: bool,
    },
    Create {
        graph: String,
        silent: bool,
    },
    Drop {
        target: GraphTarget,
        silent: bool,
    },
    Copy {
        from: GraphOrDefault,
        to: GraphOrDefault,
        silent: bool,
    },
    Move {
        from: GraphOrDefault,
        to: GraphOrDefault,
        silent: bool,
    },
    Add {
        from: GraphOrDefault,
        to: GraphOrDefault,
        silent: bool,
    },
    InsertData {
        quads: Vec<Quad>,
    },
    DeleteData {
        quads: Vec<Quad>,
    },
    /// `DELETE WHERE { … }`: the pattern doubles as the deletion template.
    DeleteWhere {
        pattern: Vec<Quad>,
    },
    /// The general `[WITH] DELETE/INSERT … [USING] WHERE` form.
    Modify {
        with: Option<String>,
        delete: Option<Vec<Quad>>,
        insert: Option<Vec<Quad>>,
        using: Vec<DatasetClause>,
        pattern: GraphPattern,
    },
}

/// The graphs addressed by `CLEAR` and `DROP`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphTarget {
    Graph(String),
    Default,
    Named,
    All,
}

/// The graphs addressed by `COPY`, `MOVE` and `ADD`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphOrDefault {
    Graph(String),
    Default,
}
