//! OmniQL: the query front end of a hybrid relational/RDF/graph/vector
//! engine.
//!
//! The crate bundles the three core namespaces:
//!
//! - [`model`]: literals, expressions, triple and graph patterns.
//! - [`sparql`]: the SPARQL-dialect lexer, parser and query IR.
//! - [`plan`]: the physical query-plan algebra consumed by optimizers and
//!   executors.

pub mod model {
    pub use omniql_model::*;
}

pub mod sparql {
    pub use omniql_sparql::*;
}

pub mod plan {
    pub use omniql_plan::*;
}

pub use omniql_sparql::{parse, parse_select, ParseError, ParseErrorKind};
