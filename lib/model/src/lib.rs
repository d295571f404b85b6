//! This crate contains the OmniQL value model: scalar literals, expressions,
//! triple patterns, graph match patterns, and property paths.
//!
//! Everything here is an immutable value type with structural equality. The
//! SPARQL front end produces these types and the plan algebra embeds them, so
//! both sides of the engine share a single vocabulary.

mod expression;
mod graph;
mod literal;
mod path;
mod term;
pub mod vocab;

pub use expression::{ColumnRef, Expression};
pub use graph::{EdgeDirection, EdgePattern, MatchPattern, NodePattern, PathElement, PathPattern};
pub use literal::Literal;
pub use path::PropertyPath;
pub use term::{Quad, Term, TriplePattern};
