use omniql_model::{Quad, Term};
use omniql_sparql::{parse, GraphOrDefault, GraphTarget, QueryStatement, UpdateOperation};

fn update(source: &str) -> UpdateOperation {
    match parse(source).unwrap() {
        QueryStatement::Update(operation) => operation,
        other => panic!("expected an update, got {other:?}"),
    }
}

#[test]
fn load_with_target_graph() {
    assert_eq!(
        update("LOAD SILENT <http://example.com/data.ttl> INTO GRAPH <http://example.com/g>"),
        UpdateOperation::Load {
            source: "http://example.com/data.ttl".into(),
            into: Some("http://example.com/g".into()),
            silent: true,
        }
    );
}

#[test]
fn clear_targets() {
    assert_eq!(
        update("CLEAR GRAPH <http://example.com/g>"),
        UpdateOperation::Clear {
            target: GraphTarget::Graph("http://example.com/g".into()),
            silent: false,
        }
    );
    assert_eq!(
        update("CLEAR SILENT DEFAULT"),
        UpdateOperation::Clear {
            target: GraphTarget::Default,
            silent: true,
        }
    );
    assert_eq!(
        update("CLEAR NAMED"),
        UpdateOperation::Clear {
            target: GraphTarget::Named,
            silent: false,
        }
    );
    assert_eq!(
        update("CLEAR ALL"),
        UpdateOperation::Clear {
            target: GraphTarget::All,
            silent: false,
        }
    );
}

#[test]
fn create_and_drop_graphs() {
    assert_eq!(
        update("CREATE GRAPH <http://example.com/g>"),
        UpdateOperation::Create {
            graph: "http://example.com/g".into(),
            silent: false,
        }
    );
    assert_eq!(
        update("DROP SILENT GRAPH <http://example.com/g>"),
        UpdateOperation::Drop {
            target: GraphTarget::Graph("http://example.com/g".into()),
            silent: true,
        }
    );
}

#[test]
fn copy_move_add_between_graphs() {
    assert_eq!(
        update("COPY DEFAULT TO GRAPH <http://example.com/g>"),
        UpdateOperation::Copy {
            from: GraphOrDefault::Default,
            to: GraphOrDefault::Graph("http://example.com/g".into()),
            silent: false,
        }
    );
    assert_eq!(
        update("MOVE GRAPH <http://example.com/a> TO DEFAULT"),
        UpdateOperation::Move {
            from: GraphOrDefault::Graph("http://example.com/a".into()),
            to: GraphOrDefault::Default,
            silent: false,
        }
    );
    assert_eq!(
        update("ADD SILENT <http://example.com/a> TO <http://example.com/b>"),
        UpdateOperation::Add {
            from: GraphOrDefault::Graph("http://example.com/a".into()),
            to: GraphOrDefault::Graph("http://example.com/b".into()),
            silent: true,
        }
    );
}

#[test]
fn insert_data_collects_quads() {
    let operation = update(
        "INSERT DATA { <http://example.com/a> <http://example.com/p> 1 . \
         GRAPH <http://example.com/g> { <http://example.com/b> <http://example.com/q> 2 } }",
    );
    let UpdateOperation::InsertData { quads } = operation else {
        panic!("expected insert data");
    };
    assert_eq!(quads.len(), 2);
    assert_eq!(quads[0].graph, None);
    assert_eq!(
        quads[1].graph,
        Some(Term::iri("http://example.com/g"))
    );
    assert_eq!(quads[1].object, Term::literal(2i64));
}

#[test]
fn delete_data_parses_like_insert_data() {
    let operation =
        update("DELETE DATA { <http://example.com/a> <http://example.com/p> \"x\" }");
    let UpdateOperation::DeleteData { quads } = operation else {
        panic!("expected delete data");
    };
    assert_eq!(
        quads,
        vec![Quad::new(
            Term::iri("http://example.com/a"),
            Term::iri("http://example.com/p"),
            Term::literal("x"),
            None,
        )]
    );
}

#[test]
fn delete_where_uses_pattern_as_template() {
    let operation = update("DELETE WHERE { ?s ?p ?o }");
    let UpdateOperation::DeleteWhere { pattern } = operation else {
        panic!("expected delete where");
    };
    assert_eq!(
        pattern,
        vec![Quad::new(
            Term::variable("s"),
            Term::variable("p"),
            Term::variable("o"),
            None,
        )]
    );
}

#[test]
fn modify_with_all_clauses() {
    let operation = update(
        "WITH <http://example.com/g> \
         DELETE { ?s <http://example.com/old> ?o } \
         INSERT { ?s <http://example.com/new> ?o } \
         USING NAMED <http://example.com/u> \
         WHERE { ?s <http://example.com/old> ?o }",
    );
    let UpdateOperation::Modify {
        with,
        delete,
        insert,
        using,
        pattern,
    } = operation
    else {
        panic!("expected a modify operation");
    };
    assert_eq!(with.as_deref(), Some("http://example.com/g"));
    assert_eq!(delete.map(|quads| quads.len()), Some(1));
    assert_eq!(insert.map(|quads| quads.len()), Some(1));
    assert_eq!(using.len(), 1);
    assert!(using[0].named);
    assert!(matches!(pattern, omniql_sparql::GraphPattern::Basic(_)));
}

#[test]
fn insert_only_modify() {
    let operation = update(
        "INSERT { ?s <http://example.com/flag> true } WHERE { ?s ?p ?o }",
    );
    let UpdateOperation::Modify {
        with,
        delete,
        insert,
        ..
    } = operation
    else {
        panic!("expected a modify operation");
    };
    assert_eq!(with, None);
    assert_eq!(delete, None);
    assert_eq!(insert.map(|quads| quads.len()), Some(1));
}
