use omniql_model::{vocab, Expression, Literal, PropertyPath, Term, TriplePattern};
use omniql_sparql::{parse_select, GraphPattern};

fn source_of(query: &str) -> GraphPattern {
    parse_select(query).unwrap().source
}

#[test]
fn semicolon_and_comma_chains_share_subject() {
    let GraphPattern::Basic(triples) = source_of(
        "SELECT * WHERE { ?s <http://example.com/p> ?a ; <http://example.com/q> ?b , ?c . }",
    ) else {
        panic!("expected a basic pattern");
    };
    assert_eq!(triples.len(), 3);
    assert!(triples.iter().all(|t| t.subject == Term::variable("s")));
    assert_eq!(triples[1].predicate, Term::iri("http://example.com/q"));
    assert_eq!(triples[2].object, Term::variable("c"));
}

#[test]
fn a_expands_to_rdf_type() {
    let GraphPattern::Basic(triples) =
        source_of("SELECT * WHERE { ?s a <http://example.com/Person> }")
    else {
        panic!("expected a basic pattern");
    };
    assert_eq!(triples[0].predicate, Term::iri(vocab::rdf::TYPE));
}

#[test]
fn optional_wraps_inner_group() {
    let source = source_of("SELECT * WHERE { ?s ?p ?o OPTIONAL { ?s ?q ?r } }");
    let GraphPattern::Group(children) = source else {
        panic!("expected a group");
    };
    assert!(matches!(children[0], GraphPattern::Basic(_)));
    assert!(matches!(children[1], GraphPattern::Optional(_)));
}

#[test]
fn union_is_left_associative() {
    let source =
        source_of("SELECT * WHERE { { ?a ?b ?c } UNION { ?d ?e ?f } UNION { ?g ?h ?i } }");
    let GraphPattern::Union(left, _) = source else {
        panic!("expected a union");
    };
    assert!(matches!(*left, GraphPattern::Union(_, _)));
}

#[test]
fn minus_subtracts_the_preceding_pattern() {
    let source = source_of("SELECT * WHERE { ?s ?p ?o MINUS { ?s <http://example.com/x> ?o } }");
    let GraphPattern::Minus(left, right) = source else {
        panic!("expected a minus");
    };
    assert!(matches!(*left, GraphPattern::Basic(_)));
    assert!(matches!(*right, GraphPattern::Basic(_)));
}

#[test]
fn filter_wraps_the_whole_group() {
    let source = source_of("SELECT * WHERE { ?s ?p ?o FILTER(?o > 10) ?s ?q ?r }");
    let GraphPattern::Filter { condition, inner } = source else {
        panic!("expected a filter");
    };
    assert_eq!(
        condition,
        Expression::variable("o").greater_than(Expression::literal(10i64))
    );
    let GraphPattern::Group(children) = *inner else {
        panic!("expected the filtered group");
    };
    assert_eq!(children.len(), 2);
}

#[test]
fn bind_captures_preceding_pattern() {
    let source = source_of("SELECT * WHERE { ?s ?p ?o BIND(?o + 1 AS ?next) }");
    let GraphPattern::Bind {
        expression,
        variable,
        inner,
    } = source
    else {
        panic!("expected a bind");
    };
    assert_eq!(
        expression,
        Expression::variable("o").add(Expression::literal(1i64))
    );
    assert_eq!(variable, "next");
    assert!(matches!(*inner, GraphPattern::Basic(_)));
}

#[test]
fn values_rows_with_undef() {
    let source = source_of(
        "SELECT * WHERE { VALUES (?x ?y) { (1 2) (UNDEF \"a\") } }",
    );
    let GraphPattern::Values(values) = source else {
        panic!("expected a values block");
    };
    assert_eq!(values.variables, vec!["x", "y"]);
    assert_eq!(values.rows.len(), 2);
    assert_eq!(values.rows[0][0], Some(Term::literal(1i64)));
    assert_eq!(values.rows[1][0], None);
    assert_eq!(values.rows[1][1], Some(Term::literal("a")));
}

#[test]
fn service_keeps_silent_flag_and_name() {
    let source = source_of(
        "SELECT * WHERE { SERVICE SILENT <http://example.com/sparql> { ?s ?p ?o } }",
    );
    let GraphPattern::Service { name, silent, .. } = source else {
        panic!("expected a service pattern");
    };
    assert!(silent);
    assert_eq!(name, Term::iri("http://example.com/sparql"));
}

#[test]
fn lateral_nests_a_group() {
    let source = source_of("SELECT * WHERE { ?s ?p ?o LATERAL { ?s ?q ?r } }");
    let GraphPattern::Group(children) = source else {
        panic!("expected a group");
    };
    assert!(matches!(children[1], GraphPattern::Lateral(_)));
}

#[test]
fn graph_pattern_binds_name() {
    let source = source_of("SELECT * WHERE { GRAPH ?g { ?s ?p ?o } }");
    let GraphPattern::Graph { name, .. } = source else {
        panic!("expected a graph pattern");
    };
    assert_eq!(name, Term::variable("g"));
}

#[test]
fn quoted_triples_nest_as_terms() {
    let GraphPattern::Basic(triples) = source_of(
        "SELECT * WHERE { << ?a <http://example.com/said> ?b >> <http://example.com/src> ?s }",
    ) else {
        panic!("expected a basic pattern");
    };
    let Term::QuotedTriple(inner) = &triples[0].subject else {
        panic!("expected a quoted triple subject");
    };
    assert_eq!(
        **inner,
        TriplePattern::new(
            Term::variable("a"),
            Term::iri("http://example.com/said"),
            Term::variable("b"),
        )
    );
}

#[test]
fn blank_node_property_lists_allocate_fresh_labels() {
    let GraphPattern::Basic(triples) = source_of(
        "SELECT * WHERE { [ <http://example.com/name> \"x\" ] <http://example.com/age> 7 }",
    ) else {
        panic!("expected a basic pattern");
    };
    assert_eq!(triples.len(), 2);
    let Term::BlankNode(label) = &triples[0].subject else {
        panic!("expected a blank node subject");
    };
    assert_eq!(triples[1].subject, Term::blank_node(label.clone()));
    assert_eq!(triples[1].object, Term::literal(7i64));
}

#[test]
fn collections_desugar_to_first_rest_chains() {
    let GraphPattern::Basic(triples) =
        source_of("SELECT * WHERE { ?s <http://example.com/list> (1 2) }")
    else {
        panic!("expected a basic pattern");
    };
    // Two cells, each with rdf:first and rdf:rest, plus the containing triple.
    assert_eq!(triples.len(), 5);
    let first = Term::iri(vocab::rdf::FIRST);
    let rest = Term::iri(vocab::rdf::REST);
    let nil = Term::iri(vocab::rdf::NIL);
    assert_eq!(triples.iter().filter(|t| t.predicate == first).count(), 2);
    assert_eq!(triples.iter().filter(|t| t.predicate == rest).count(), 2);
    assert_eq!(triples.iter().filter(|t| t.object == nil).count(), 1);
}

#[test]
fn empty_collection_is_rdf_nil() {
    let GraphPattern::Basic(triples) =
        source_of("SELECT * WHERE { ?s <http://example.com/list> () }")
    else {
        panic!("expected a basic pattern");
    };
    assert_eq!(triples.len(), 1);
    assert_eq!(triples[0].object, Term::iri(vocab::rdf::NIL));
}

#[test]
fn one_or_more_path_becomes_a_path_pattern() {
    let source = source_of("SELECT * WHERE { ?s <http://example.com/knows>+ ?o }");
    let GraphPattern::Path { subject, path, object } = source else {
        panic!("expected a path pattern");
    };
    assert_eq!(subject, Term::variable("s"));
    assert_eq!(object, Term::variable("o"));
    assert_eq!(
        path,
        PropertyPath::iri("http://example.com/knows").one_or_more()
    );
}

#[test]
fn sequence_and_alternative_paths() {
    let source = source_of(
        "SELECT * WHERE { ?s <http://example.com/a>/<http://example.com/b>|^<http://example.com/c> ?o }",
    );
    let GraphPattern::Path { path, .. } = source else {
        panic!("expected a path pattern");
    };
    assert_eq!(
        path,
        PropertyPath::iri("http://example.com/a")
            .then(PropertyPath::iri("http://example.com/b"))
            .or(PropertyPath::iri("http://example.com/c").inverse())
    );
}

#[test]
fn negated_path_collects_forbidden_iris() {
    let source = source_of(
        "SELECT * WHERE { ?s !(<http://example.com/a>|<http://example.com/b>) ?o }",
    );
    let GraphPattern::Path { path, .. } = source else {
        panic!("expected a path pattern");
    };
    assert_eq!(
        path,
        PropertyPath::Negated(vec![
            "http://example.com/a".to_owned(),
            "http://example.com/b".to_owned(),
        ])
    );
}

#[test]
fn trivial_parenthesized_path_stays_a_triple() {
    let GraphPattern::Basic(triples) =
        source_of("SELECT * WHERE { ?s (<http://example.com/p>) ?o }")
    else {
        panic!("expected a basic pattern");
    };
    assert_eq!(triples[0].predicate, Term::iri("http://example.com/p"));
}

#[test]
fn mixed_triples_and_paths_group() {
    let source = source_of(
        "SELECT * WHERE { ?s <http://example.com/p> ?o . ?o <http://example.com/q>* ?end }",
    );
    let GraphPattern::Group(children) = source else {
        panic!("expected a group");
    };
    assert!(matches!(children[0], GraphPattern::Basic(_)));
    assert!(matches!(children[1], GraphPattern::Path { .. }));
}

#[test]
fn language_tags_and_datatypes_attach_to_literals() {
    let GraphPattern::Basic(triples) = source_of(
        "SELECT * WHERE { ?s ?p \"chat\"@fr . ?s ?q \"42\"^^<http://www.w3.org/2001/XMLSchema#integer> }",
    ) else {
        panic!("expected a basic pattern");
    };
    assert_eq!(
        triples[0].object,
        Term::Literal(Literal::lang_string("chat", "fr"))
    );
    assert_eq!(
        triples[1].object,
        Term::Literal(Literal::typed("42", "http://www.w3.org/2001/XMLSchema#integer"))
    );
}

#[test]
fn signed_numbers_in_object_position() {
    let GraphPattern::Basic(triples) =
        source_of("SELECT * WHERE { ?s ?p -5 . ?s ?q +2.5 }")
    else {
        panic!("expected a basic pattern");
    };
    assert_eq!(triples[0].object, Term::literal(-5i64));
    assert_eq!(triples[1].object, Term::literal(2.5));
}

#[test]
fn nested_subgroups_parse() {
    let source = source_of("SELECT * WHERE { { ?s ?p ?o } }");
    assert!(matches!(source, GraphPattern::Basic(_)));
}
