use omniql_model::{Expression, Term, TriplePattern};
use omniql_sparql::{parse_select, GraphPattern, Projection, ProjectionItem};

fn var(name: &str) -> Term {
    Term::variable(name)
}

#[test]
fn select_star_single_triple() {
    let query = parse_select("SELECT * WHERE { ?s ?p ?o }").unwrap();
    assert_eq!(query.projection, Projection::All);
    assert_eq!(
        query.source,
        GraphPattern::Basic(vec![TriplePattern::new(var("s"), var("p"), var("o"))])
    );
    assert_eq!(query.limit, None);
    assert_eq!(query.offset, 0);
    assert!(!query.distinct);
}

#[test]
fn select_bare_variable_projection() {
    let query = parse_select("SELECT ?x WHERE { ?x ?p ?o }").unwrap();
    assert_eq!(
        query.projection,
        Projection::Items(vec![ProjectionItem::variable("x")])
    );
}

#[test]
fn select_aliased_expression_projection() {
    let query = parse_select("SELECT (STRLEN(?s) AS ?len) ?s WHERE { ?s ?p ?o }").unwrap();
    let items = match query.projection {
        Projection::Items(items) => items,
        Projection::All => panic!("expected an item list"),
    };
    assert_eq!(items.len(), 2);
    assert_eq!(
        items[0],
        ProjectionItem::aliased(
            Expression::call("STRLEN", vec![Expression::variable("s")]),
            "len"
        )
    );
    assert_eq!(items[1], ProjectionItem::variable("s"));
}

#[test]
fn lenient_projection_falls_back_to_pattern_variables() {
    // `123` cannot begin a projection item; the projection is inferred from
    // the WHERE pattern instead of failing.
    let query = parse_select("SELECT 123 WHERE { ?s ?p ?o }").unwrap();
    assert_eq!(
        query.projection,
        Projection::Items(vec![
            ProjectionItem::variable("s"),
            ProjectionItem::variable("p"),
            ProjectionItem::variable("o"),
        ])
    );
}

#[test]
fn lenient_projection_over_empty_pattern_projects_all() {
    let query = parse_select("SELECT 123 WHERE { }").unwrap();
    assert_eq!(query.projection, Projection::All);
}

#[test]
fn unicode_escapes_decode_in_object_literals() {
    let query = parse_select(r#"SELECT * WHERE { ?s ?p "caf\u00E9" }"#).unwrap();
    let GraphPattern::Basic(triples) = &query.source else {
        panic!("expected a basic pattern");
    };
    let Term::Literal(omniql_model::Literal::String(value)) = &triples[0].object else {
        panic!("expected a string literal object");
    };
    assert_eq!(value, "café");
    assert_eq!(value.chars().count(), 4);
}

#[test]
fn distinct_and_modifiers() {
    let query = parse_select(
        "SELECT DISTINCT ?name WHERE { ?s ?p ?name } ORDER BY DESC(?name) LIMIT 10 OFFSET 5",
    )
    .unwrap();
    assert!(query.distinct);
    assert_eq!(query.limit, Some(10));
    assert_eq!(query.offset, 5);
    assert_eq!(query.order_by.len(), 1);
    assert!(query.order_by[0].descending);
    assert_eq!(
        query.order_by[0].expression,
        Expression::variable("name")
    );
}

#[test]
fn offset_may_precede_limit() {
    let query = parse_select("SELECT * WHERE { ?s ?p ?o } OFFSET 2 LIMIT 3").unwrap();
    assert_eq!(query.limit, Some(3));
    assert_eq!(query.offset, 2);
}

#[test]
fn group_by_and_having() {
    let query = parse_select(
        "SELECT ?dept WHERE { ?x ?p ?dept } GROUP BY ?dept HAVING (COUNT(?x) > 3)",
    )
    .unwrap();
    assert_eq!(query.group_by, vec![Expression::variable("dept")]);
    assert_eq!(
        query.having,
        Some(
            Expression::call("COUNT", vec![Expression::variable("x")])
                .greater_than(Expression::literal(3i64))
        )
    );
}

#[test]
fn prologue_prefixes_resolve_in_patterns() {
    let query = parse_select(
        "PREFIX foaf: <http://xmlns.com/foaf/0.1/>\n\
         SELECT * WHERE { ?s foaf:name ?name }",
    )
    .unwrap();
    let GraphPattern::Basic(triples) = &query.source else {
        panic!("expected a basic pattern");
    };
    assert_eq!(
        triples[0].predicate,
        Term::iri("http://xmlns.com/foaf/0.1/name")
    );
    assert_eq!(
        query.prologue.resolve("foaf", "age").as_deref(),
        Some("http://xmlns.com/foaf/0.1/age")
    );
}

#[test]
fn base_and_version_are_recorded() {
    let query = parse_select(
        "BASE <http://example.com/> VERSION \"1.2\" SELECT * WHERE { ?s ?p ?o }",
    )
    .unwrap();
    assert_eq!(query.prologue.base.as_deref(), Some("http://example.com/"));
    assert_eq!(query.prologue.version.as_deref(), Some("1.2"));
}

#[test]
fn dataset_clauses_keep_named_flag() {
    let query = parse_select(
        "SELECT * FROM <http://example.com/g1> FROM NAMED <http://example.com/g2> \
         WHERE { ?s ?p ?o }",
    )
    .unwrap();
    assert_eq!(query.datasets.len(), 2);
    assert!(!query.datasets[0].named);
    assert!(query.datasets[1].named);
    assert_eq!(query.datasets[1].iri, "http://example.com/g2");
}

#[test]
fn trailing_values_joins_the_pattern() {
    let query = parse_select(
        "SELECT * WHERE { ?s ?p ?o } VALUES ?s { <http://example.com/a> }",
    )
    .unwrap();
    let GraphPattern::Group(children) = &query.source else {
        panic!("expected a group with the values block");
    };
    assert_eq!(children.len(), 2);
    assert!(matches!(children[1], GraphPattern::Values(_)));
}

#[test]
fn thousand_character_variable_name() {
    let name = "v".repeat(1000);
    let query = parse_select(&format!("SELECT ?{name} WHERE {{ ?{name} ?p ?o }}")).unwrap();
    assert_eq!(
        query.projection,
        Projection::Items(vec![ProjectionItem::variable(name)])
    );
}

#[test]
fn fifty_triples_form_one_basic_block() {
    let mut body = String::new();
    for i in 0..50 {
        body.push_str(&format!("?s{i} ?p{i} ?o{i} . "));
    }
    let query = parse_select(&format!("SELECT * WHERE {{ {body} }}")).unwrap();
    let GraphPattern::Basic(triples) = &query.source else {
        panic!("expected a basic pattern");
    };
    assert_eq!(triples.len(), 50);
}

#[test]
fn optional_nests_to_depth_three() {
    let query = parse_select(
        "SELECT * WHERE { ?a ?b ?c OPTIONAL { ?d ?e ?f OPTIONAL { ?g ?h ?i OPTIONAL { ?j ?k ?l } } } }",
    )
    .unwrap();
    let GraphPattern::Group(children) = &query.source else {
        panic!("expected a group");
    };
    let GraphPattern::Optional(level1) = &children[1] else {
        panic!("expected an optional");
    };
    let GraphPattern::Group(children1) = level1.as_ref() else {
        panic!("expected a group");
    };
    let GraphPattern::Optional(level2) = &children1[1] else {
        panic!("expected an optional");
    };
    let GraphPattern::Group(children2) = level2.as_ref() else {
        panic!("expected a group");
    };
    assert!(matches!(children2[1], GraphPattern::Optional(_)));
}

#[test]
fn projection_invariant_holds_for_well_formed_queries() {
    for source in [
        "SELECT * WHERE { ?s ?p ?o }",
        "SELECT ?s WHERE { ?s ?p ?o }",
        "SELECT WHERE { ?s ?p ?o }",
    ] {
        let query = parse_select(source).unwrap();
        match query.projection {
            Projection::All => {}
            Projection::Items(items) => assert!(!items.is_empty(), "{source}"),
        }
    }
}
