use omniql_model::{Term, TriplePattern};
use omniql_sparql::{parse, GraphPattern, QueryStatement};

#[test]
fn construct_with_template() {
    let statement = parse(
        "CONSTRUCT { ?s <http://example.com/knows> ?o } WHERE { ?s <http://example.com/met> ?o }",
    )
    .unwrap();
    let QueryStatement::Construct(query) = statement else {
        panic!("expected a construct query");
    };
    assert_eq!(
        query.template,
        vec![TriplePattern::new(
            Term::variable("s"),
            Term::iri("http://example.com/knows"),
            Term::variable("o"),
        )]
    );
    assert!(matches!(query.source, GraphPattern::Basic(_)));
}

#[test]
fn construct_where_shorthand_copies_pattern() {
    let statement = parse("CONSTRUCT WHERE { ?s ?p ?o }").unwrap();
    let QueryStatement::Construct(query) = statement else {
        panic!("expected a construct query");
    };
    assert_eq!(
        query.template,
        vec![TriplePattern::new(
            Term::variable("s"),
            Term::variable("p"),
            Term::variable("o"),
        )]
    );
}

#[test]
fn construct_supports_modifiers() {
    let statement =
        parse("CONSTRUCT { ?s ?p ?o } WHERE { ?s ?p ?o } ORDER BY ?s LIMIT 5").unwrap();
    let QueryStatement::Construct(query) = statement else {
        panic!("expected a construct query");
    };
    assert_eq!(query.limit, Some(5));
    assert_eq!(query.order_by.len(), 1);
}

#[test]
fn ask_with_and_without_where_keyword() {
    for source in ["ASK { ?s ?p ?o }", "ASK WHERE { ?s ?p ?o }"] {
        let statement = parse(source).unwrap();
        let QueryStatement::Ask(query) = statement else {
            panic!("expected an ask query for {source}");
        };
        assert!(matches!(query.source, GraphPattern::Basic(_)));
    }
}

#[test]
fn describe_star_has_no_targets() {
    let statement = parse("DESCRIBE *").unwrap();
    let QueryStatement::Describe(query) = statement else {
        panic!("expected a describe query");
    };
    assert!(query.targets.is_empty());
    assert!(query.source.is_none());
}

#[test]
fn describe_terms_with_pattern() {
    let statement = parse(
        "PREFIX ex: <http://example.com/> DESCRIBE ex:alice ?other WHERE { ?other ?p ?o }",
    )
    .unwrap();
    let QueryStatement::Describe(query) = statement else {
        panic!("expected a describe query");
    };
    assert_eq!(
        query.targets,
        vec![
            Term::iri("http://example.com/alice"),
            Term::variable("other"),
        ]
    );
    assert!(query.source.is_some());
}
