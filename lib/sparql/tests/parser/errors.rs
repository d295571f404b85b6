use omniql_sparql::{parse, parse_select, ParseError, ParseErrorKind};

fn error_of(source: &str) -> ParseError {
    parse(source).expect_err("parse should fail")
}

#[test]
fn empty_input_is_an_error() {
    assert_eq!(error_of("").kind(), &ParseErrorKind::EmptyInput);
    assert_eq!(error_of("   \n\t").kind(), &ParseErrorKind::EmptyInput);
    assert_eq!(
        error_of("# only a comment\n").kind(),
        &ParseErrorKind::EmptyInput
    );
}

#[test]
fn unknown_query_form_names_the_token() {
    let error = error_of("FROB ?x WHERE { }");
    assert_eq!(error.kind(), &ParseErrorKind::UnknownQueryForm);
    assert!(error.message().contains("FROB"));
}

#[test]
fn unterminated_string_reports_position() {
    let error = error_of("SELECT * WHERE { ?s ?p \"abc }");
    assert_eq!(error.kind(), &ParseErrorKind::UnterminatedString);
}

#[test]
fn invalid_escapes_are_rejected() {
    assert_eq!(
        error_of("SELECT * WHERE { ?s ?p \"\\q\" }").kind(),
        &ParseErrorKind::InvalidEscape
    );
    assert_eq!(
        error_of("SELECT * WHERE { ?s ?p \"\\UFFFFFFFF\" }").kind(),
        &ParseErrorKind::InvalidEscape
    );
    assert_eq!(
        error_of("SELECT * WHERE { ?s ?p \"\\uD800\" }").kind(),
        &ParseErrorKind::InvalidEscape
    );
}

#[test]
fn numeric_overflow_is_rejected() {
    assert_eq!(
        error_of("SELECT * WHERE { ?s ?p 99999999999999999999 }").kind(),
        &ParseErrorKind::NumericOutOfRange
    );
}

#[test]
fn unclosed_delimiters() {
    assert_eq!(
        error_of("SELECT * WHERE { ?s ?p ?o").kind(),
        &ParseErrorKind::UnclosedBrace
    );
    assert_eq!(
        error_of("SELECT * WHERE { [ <http://example.com/p> 1 }").kind(),
        &ParseErrorKind::UnclosedBracket
    );
    assert_eq!(
        error_of("SELECT * WHERE { ?s <http://example.com/p> (1 2 }").kind(),
        &ParseErrorKind::UnclosedParen
    );
}

#[test]
fn unclosed_quoted_triple() {
    let error = error_of("SELECT * WHERE { ?s ?p << ?a ?b ?c }");
    assert_eq!(error.kind(), &ParseErrorKind::UnclosedQuotedTriple);
}

#[test]
fn delete_template_requires_where() {
    let error = error_of("DELETE { ?s ?p ?o }");
    assert_eq!(error.kind(), &ParseErrorKind::ExpectedWhere);
}

#[test]
fn updates_require_iris() {
    assert_eq!(error_of("LOAD 42").kind(), &ParseErrorKind::ExpectedIri);
    assert_eq!(
        error_of("CREATE GRAPH 42").kind(),
        &ParseErrorKind::ExpectedIri
    );
    assert_eq!(error_of("CLEAR 42").kind(), &ParseErrorKind::ExpectedIri);
}

#[test]
fn lateral_requires_a_braced_group() {
    assert_eq!(
        error_of("SELECT * WHERE { LATERAL ?x }").kind(),
        &ParseErrorKind::ExpectedLBrace
    );
    assert_eq!(
        error_of("SELECT * WHERE { LATERAL { ?s ?p ?o").kind(),
        &ParseErrorKind::UnclosedBrace
    );
}

#[test]
fn version_requires_a_quoted_string() {
    let error = error_of("VERSION 1.2 SELECT * WHERE { ?s ?p ?o }");
    assert_eq!(error.kind(), &ParseErrorKind::ExpectedVersionString);
}

#[test]
fn malformed_construct() {
    assert_eq!(
        error_of("CONSTRUCT").kind(),
        &ParseErrorKind::MalformedConstruct
    );
    assert_eq!(
        error_of("CONSTRUCT { ?s ?p ?o }").kind(),
        &ParseErrorKind::MalformedConstruct
    );
}

#[test]
fn trailing_input_is_rejected() {
    assert_eq!(
        error_of("ASK { ?s ?p ?o } ?x").kind(),
        &ParseErrorKind::UnexpectedTrailingInput
    );
    assert_eq!(
        error_of("SELECT * WHERE { ?s ?p ?o } }").kind(),
        &ParseErrorKind::UnexpectedTrailingInput
    );
}

#[test]
fn insert_data_unclosed_brace() {
    let error = error_of("INSERT DATA { <http://example.com/a> <http://example.com/p> 1");
    assert_eq!(error.kind(), &ParseErrorKind::UnclosedBrace);
}

#[test]
fn parse_select_rejects_other_forms() {
    let error = parse_select("ASK { ?s ?p ?o }").expect_err("parse_select should fail");
    assert_eq!(
        error.kind(),
        &ParseErrorKind::ExpectedToken("`SELECT`".into())
    );
}

#[test]
fn errors_carry_line_column_and_snippet() {
    let error = error_of("SELECT *\nWHERE { ?s ?p\n<< ?a ?b ?c }");
    assert_eq!(error.kind(), &ParseErrorKind::UnclosedQuotedTriple);
    assert_eq!(error.line(), 3);
    assert_eq!(error.snippet(), "<< ?a ?b ?c }");
}

#[test]
fn undeclared_prefix_is_reported() {
    let error = error_of("SELECT * WHERE { ?s foaf:name ?o }");
    assert_eq!(
        error.kind(),
        &ParseErrorKind::ExpectedToken("a declared prefix".into())
    );
}
