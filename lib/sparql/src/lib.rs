//! This crate contains the OmniQL SPARQL front end: a hand-written lexer and
//! recursive-descent parser producing a typed query IR.
//!
//! The accepted grammar is a superset of SPARQL 1.1: quoted triples
//! (`<< … >>`), `LATERAL { … }`, a `VERSION "x.y"` prologue declaration, the
//! update forms, case-insensitive boolean literals and 8-digit `\U` escapes.
//!
//! Parsing is pure and single-threaded; a parser invocation owns its lexer
//! and reports the first error with its source position.
//!
//! ```
//! use omniql_sparql::{parse_select, Projection};
//!
//! let query = parse_select("SELECT * WHERE { ?s ?p ?o }").unwrap();
//! assert_eq!(query.projection, Projection::All);
//! ```

mod algebra;
mod error;
mod lexer;
mod parser;
mod query;
mod update;

pub use algebra::{GraphPattern, ValuesBlock};
pub use error::{ParseError, ParseErrorKind};
pub use lexer::{Lexer, Token, TokenKind};
pub use query::{
    AskQuery, ConstructQuery, DatasetClause, DescribeQuery, OrderKey, Projection, ProjectionItem,
    Prologue, QueryStatement, SelectQuery,
};
pub use update::{GraphOrDefault, GraphTarget, UpdateOperation};

use parser::Parser;

/// Parses a complete query or update statement.
///
/// # Errors
///
/// Returns the first syntax error with its position. Empty input is an error,
/// as are tokens following a complete statement.
pub fn parse(text: &str) -> Result<QueryStatement, ParseError> {
    Parser::new(text)?.parse_statement()
}

/// Parses a statement that must be a SELECT query.
///
/// # Errors
///
/// Returns the first syntax error, or `ExpectedToken("`SELECT`")` when the
/// input is a different statement form.
pub fn parse_select(text: &str) -> Result<SelectQuery, ParseError> {
    Parser::new(text)?.parse_select_statement()
}
