use omniql_model::{Expression, Literal};
use omniql_plan::{
    AggregatePlan, BitmapOperation, BitmapScanPlan, FullTextSearchMode, FullTextSearchPlan,
    HashJoinPlan, IndexBounds, IndexScanPlan, JoinType, MergeJoinPlan, ProjectPlan, QueryCost,
    QueryPlanNode, SortPlan, SpatialRegion, SpatialSearchPlan, TableScanPlan, ValuesPlan,
    VectorMetric, VectorSearchPlan,
};

fn scan() -> QueryPlanNode {
    QueryPlanNode::TableScan(TableScanPlan::new("t", Vec::new(), None))
}

#[test]
fn hash_join_requires_matching_key_arity() {
    let result = HashJoinPlan::try_new(
        scan(),
        scan(),
        JoinType::Inner,
        vec![Expression::column("a")],
        vec![Expression::column("b"), Expression::column("c")],
    );
    assert!(result.is_err());
    assert!(result.unwrap_err().reason().contains("build keys"));
}

#[test]
fn merge_join_requires_matching_key_arity() {
    let result = MergeJoinPlan::try_new(
        scan(),
        scan(),
        JoinType::Inner,
        vec![],
        vec![Expression::column("b")],
    );
    assert!(result.is_err());
}

#[test]
fn bitmap_scan_requires_two_inputs() {
    let only = IndexScanPlan::new("idx", "t", IndexBounds::unbounded());
    assert!(BitmapScanPlan::try_new(vec![only], BitmapOperation::Or).is_err());
    assert!(BitmapScanPlan::try_new(Vec::new(), BitmapOperation::And).is_err());
}

#[test]
fn index_bounds_invariants() {
    let exact = IndexBounds::exact(vec![Literal::from("x"), Literal::Int(3)]);
    assert_eq!(exact.lower(), exact.upper());
    assert!(exact.lower_inclusive());
    assert!(exact.upper_inclusive());

    let prefix = IndexBounds::prefix(vec![Literal::from("x")]);
    assert_eq!(prefix.lower(), prefix.upper());

    assert!(IndexBounds::unbounded().is_unbounded());
    assert!(IndexBounds::range(
        vec![Literal::Int(1)],
        vec![Literal::Int(2), Literal::Int(3)],
        true,
        false,
    )
    .is_err());
}

#[test]
fn vector_search_validates_k_and_query() {
    assert!(
        VectorSearchPlan::try_new("docs", "embedding", vec![0.5, 0.1], 0, VectorMetric::Cosine)
            .is_err()
    );
    assert!(
        VectorSearchPlan::try_new("docs", "embedding", Vec::new(), 5, VectorMetric::Cosine)
            .is_err()
    );
    assert!(
        VectorSearchPlan::try_new("docs", "embedding", vec![0.5], 5, VectorMetric::Cosine).is_ok()
    );
}

#[test]
fn full_text_search_requires_a_query() {
    assert!(FullTextSearchPlan::try_new("docs", "body", "", FullTextSearchMode::Match).is_err());
    assert!(
        FullTextSearchPlan::try_new("docs", "body", "needle", FullTextSearchMode::Phrase).is_ok()
    );
}

#[test]
fn spatial_search_rejects_negative_distance() {
    let bad = SpatialSearchPlan::try_new(
        "places",
        "location",
        SpatialRegion::WithinDistance {
            x: 1.0,
            y: 2.0,
            distance: -3.0,
        },
    );
    assert!(bad.is_err());

    let good = SpatialSearchPlan::try_new(
        "places",
        "location",
        SpatialRegion::BoundingBox {
            min_x: 0.0,
            min_y: 0.0,
            max_x: 1.0,
            max_y: 1.0,
        },
    );
    assert!(good.is_ok());
}

#[test]
fn sort_and_project_require_content() {
    assert!(SortPlan::try_new(scan(), Vec::new()).is_err());
    assert!(ProjectPlan::try_new(scan(), Vec::new()).is_err());
}

#[test]
fn aggregate_requires_keys_or_aggregates() {
    assert!(AggregatePlan::try_new(scan(), Vec::new(), Vec::new()).is_err());
    assert!(
        AggregatePlan::try_new(scan(), vec![Expression::column("dept")], Vec::new()).is_ok()
    );
}

#[test]
fn values_rows_must_match_columns() {
    let bad = ValuesPlan::try_new(
        vec!["a".into(), "b".into()],
        vec![vec![Literal::Int(1)]],
    );
    assert!(bad.is_err());

    let good = ValuesPlan::try_new(
        vec!["a".into(), "b".into()],
        vec![vec![Literal::Int(1), Literal::Int(2)]],
    );
    assert!(good.is_ok());
}

#[test]
fn query_cost_rejects_inverted_bounds() {
    assert!(QueryCost::new(5.0, 1.0, 10, 8).is_err());
}
