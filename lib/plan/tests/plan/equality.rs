use omniql_model::{Expression, Term, TriplePattern};
use omniql_plan::{
    BitmapOperation, BitmapScanPlan, FilterPlan, HashJoinPlan, IndexBounds, IndexScanPlan,
    JoinType, LimitPlan, QueryCost, QueryPlan, QueryPlanNode, TableScanPlan, TripleIndex,
    TriplePatternScanPlan,
};

fn people_scan() -> QueryPlanNode {
    QueryPlanNode::TableScan(TableScanPlan::new("people", vec!["id".into()], None))
}

fn orders_scan() -> QueryPlanNode {
    QueryPlanNode::TableScan(TableScanPlan::new("orders", vec!["person_id".into()], None))
}

fn index_scan(name: &str) -> IndexScanPlan {
    IndexScanPlan::new(name, "people", IndexBounds::exact(vec![7i64.into()]))
}

#[test]
fn nodes_are_reflexively_equal() {
    let plan = QueryPlanNode::Filter(FilterPlan::new(
        people_scan(),
        Expression::column("id").greater_than(Expression::literal(10i64)),
    ));
    assert_eq!(plan, plan.clone());
}

#[test]
fn bitmap_scans_compare_structurally() {
    let a = BitmapScanPlan::try_new(
        vec![index_scan("idx_age"), index_scan("idx_name")],
        BitmapOperation::And,
    )
    .unwrap();
    let b = BitmapScanPlan::try_new(
        vec![index_scan("idx_age"), index_scan("idx_name")],
        BitmapOperation::And,
    )
    .unwrap();
    assert_eq!(a, b);

    let c = BitmapScanPlan::try_new(
        vec![index_scan("idx_age"), index_scan("idx_city")],
        BitmapOperation::And,
    )
    .unwrap();
    assert_ne!(a, c);
}

#[test]
fn equal_nodes_have_equal_children() {
    let a = QueryPlanNode::HashJoin(
        HashJoinPlan::try_new(
            people_scan(),
            orders_scan(),
            JoinType::Inner,
            vec![Expression::column("id")],
            vec![Expression::column("person_id")],
        )
        .unwrap(),
    );
    let b = a.clone();
    assert_eq!(a, b);
    let children_a = a.children();
    let children_b = b.children();
    assert_eq!(children_a.len(), children_b.len());
    for (left, right) in children_a.iter().zip(&children_b) {
        assert_eq!(left, right);
    }
}

#[test]
fn children_enumeration_covers_both_join_sides() {
    let join = QueryPlanNode::HashJoin(
        HashJoinPlan::try_new(
            people_scan(),
            orders_scan(),
            JoinType::Left,
            vec![Expression::column("id")],
            vec![Expression::column("person_id")],
        )
        .unwrap(),
    );
    let children = join.children();
    assert_eq!(children.len(), 2);
    assert_eq!(children[0], &people_scan());
    assert_eq!(children[1], &orders_scan());
}

#[test]
fn leaves_have_no_children() {
    let scan = QueryPlanNode::TriplePatternScan(TriplePatternScanPlan::new(
        TriplePattern::new(
            Term::variable("s"),
            Term::variable("p"),
            Term::variable("o"),
        ),
        TripleIndex::Spo,
        Vec::new(),
    ));
    assert!(scan.children().is_empty());
}

#[test]
fn nan_literals_in_plans_compare_equal() {
    let make = || {
        QueryPlanNode::Filter(FilterPlan::new(
            people_scan(),
            Expression::column("score").equal(Expression::literal(f64::NAN)),
        ))
    };
    assert_eq!(make(), make());
}

#[test]
fn annotated_plans_compare_with_cost() {
    let cost = QueryCost::new(0.0, 12.5, 100, 8).unwrap();
    let a = QueryPlan::new(people_scan(), cost);
    let b = QueryPlan::new(people_scan(), cost);
    assert_eq!(a, b);
    assert_ne!(a, QueryPlan::new(people_scan(), QueryCost::zero()));
}

#[test]
fn limit_plans_distinguish_bounds() {
    let a = QueryPlanNode::Limit(LimitPlan::new(people_scan(), Some(10), 0));
    let b = QueryPlanNode::Limit(LimitPlan::new(people_scan(), Some(10), 0));
    let c = QueryPlanNode::Limit(LimitPlan::new(people_scan(), None, 0));
    assert_eq!(a, b);
    assert_ne!(a, c);
}
