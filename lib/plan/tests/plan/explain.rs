use omniql_model::{Expression, Term, TriplePattern};
use omniql_plan::{
    AggregateExpr, AggregatePlan, FilterPlan, FullTextSearchMode, FullTextSearchPlan,
    HashJoinPlan, JoinType, LimitPlan, QueryCost, QueryPlan, QueryPlanNode, SortKey, SortPlan,
    SpatialRegion, SpatialSearchPlan, TableScanPlan, TripleIndex, TriplePatternScanPlan,
    VectorMetric, VectorSearchPlan,
};

#[test]
fn filter_over_triple_scan() {
    let scan = QueryPlanNode::TriplePatternScan(TriplePatternScanPlan::new(
        TriplePattern::new(
            Term::variable("s"),
            Term::iri("http://example.com/age"),
            Term::variable("age"),
        ),
        TripleIndex::Spo,
        Vec::new(),
    ));
    let plan = QueryPlanNode::Filter(FilterPlan::new(
        scan,
        Expression::variable("age").greater_than(Expression::literal(30i64)),
    ));
    insta::assert_snapshot!(plan, @r"
    Filter: ?age > 30
      TriplePatternScan: spo (?s <http://example.com/age> ?age)
    ");
}

#[test]
fn hash_join_tree() {
    let plan = QueryPlanNode::HashJoin(
        HashJoinPlan::try_new(
            QueryPlanNode::TableScan(TableScanPlan::new("people", Vec::new(), None)),
            QueryPlanNode::TableScan(TableScanPlan::new("orders", Vec::new(), None)),
            JoinType::Inner,
            vec![Expression::column("id")],
            vec![Expression::column("person_id")],
        )
        .unwrap(),
    );
    insta::assert_snapshot!(plan, @r"
    HashJoin: inner (id = person_id)
      TableScan: people
      TableScan: orders
    ");
}

#[test]
fn modifier_stack() {
    let aggregate = QueryPlanNode::Aggregate(
        AggregatePlan::try_new(
            QueryPlanNode::TableScan(TableScanPlan::new("orders", Vec::new(), None)),
            vec![Expression::column("person")],
            vec![AggregateExpr {
                function: "COUNT".into(),
                argument: None,
                distinct: false,
                alias: Some("total".into()),
            }],
        )
        .unwrap(),
    );
    let sort = QueryPlanNode::Sort(
        SortPlan::try_new(aggregate, vec![SortKey::descending(Expression::column("total"))])
            .unwrap(),
    );
    let plan = QueryPlanNode::Limit(LimitPlan::new(sort, Some(10), 0));
    insta::assert_snapshot!(plan, @r"
    Limit: 10
      Sort: total desc
        Aggregate: group by person; COUNT(*) as total
          TableScan: orders
    ");
}

#[test]
fn search_leaves() {
    let vector = QueryPlanNode::VectorSearch(
        VectorSearchPlan::try_new("docs", "embedding", vec![0.5, 0.25], 5, VectorMetric::Cosine)
            .unwrap(),
    );
    insta::assert_snapshot!(vector, @"VectorSearch: embedding on docs k=5 metric=cosine");

    let text = QueryPlanNode::FullTextSearch(
        FullTextSearchPlan::try_new("docs", "body", "needle", FullTextSearchMode::Phrase).unwrap(),
    );
    insta::assert_snapshot!(text, @r#"FullTextSearch: body on docs ~ "needle" (phrase)"#);

    let spatial = QueryPlanNode::SpatialSearch(
        SpatialSearchPlan::try_new(
            "places",
            "location",
            SpatialRegion::WithinDistance {
                x: 1.0,
                y: 2.0,
                distance: 10.0,
            },
        )
        .unwrap(),
    );
    insta::assert_snapshot!(spatial, @"SpatialSearch: location on places within 10 of [1, 2]");
}

#[test]
fn annotated_plan_shows_cost() {
    let plan = QueryPlan::new(
        QueryPlanNode::TableScan(TableScanPlan::new("people", Vec::new(), None)),
        QueryCost::new(0.0, 12.5, 100, 8).unwrap(),
    );
    insta::assert_snapshot!(plan, @r"
    QueryPlan (cost=0.00..12.50 rows=100 width=8)
      TableScan: people
    ");
}
