mod graph;
mod join;
mod scan;
mod search;
mod transform;

pub use graph::{
    GraphTraversalPlan, PathAlgorithm, PropertyPathPlan, ShortestPathAlgorithm, ShortestPathPlan,
    TraversalStrategy,
};
pub use join::{HashJoinPlan, JoinPlan, JoinType, MergeJoinPlan, NestedLoopJoinPlan};
pub use scan::{
    BitmapOperation, BitmapScanPlan, IndexScanPlan, TableScanPlan, TriplePatternScanPlan,
    ValuesPlan,
};
pub use search::{
    FullTextSearchMode, FullTextSearchPlan, SpatialRegion, SpatialSearchPlan, VectorMetric,
    VectorSearchPlan,
};
pub use transform::{
    AggregateExpr, AggregatePlan, DistinctPlan, FilterPlan, LimitPlan, MaterializeHint,
    MaterializePlan, ProjectPlan, SetOperationKind, SetOperationPlan, SortKey, SortPlan,
    SubqueryPlan,
};

use crate::cost::{PlanStatistics, QueryCost};
use crate::index::IndexUsage;
use itertools::Itertools;
use std::fmt;

/// The closed family of physical plan operators.
///
/// Nodes own their children by value; a plan is always a tree and dropping
/// the root releases it entirely. Structural equality is derived recursively
/// over all fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryPlanNode {
    TableScan(TableScanPlan),
    IndexScan(IndexScanPlan),
    BitmapScan(BitmapScanPlan),
    Join(JoinPlan),
    HashJoin(HashJoinPlan),
    MergeJoin(MergeJoinPlan),
    NestedLoopJoin(NestedLoopJoinPlan),
    GraphTraversal(GraphTraversalPlan),
    ShortestPath(ShortestPathPlan),
    TriplePatternScan(TriplePatternScanPlan),
    PropertyPath(PropertyPathPlan),
    Filter(FilterPlan),
    Project(ProjectPlan),
    Sort(SortPlan),
    Limit(LimitPlan),
    Distinct(DistinctPlan),
    Aggregate(AggregatePlan),
    SetOperation(SetOperationPlan),
    VectorSearch(VectorSearchPlan),
    FullTextSearch(FullTextSearchPlan),
    SpatialSearch(SpatialSearchPlan),
    Values(ValuesPlan),
    Subquery(SubqueryPlan),
    Materialize(MaterializePlan),
}

impl QueryPlanNode {
    pub fn name(&self) -> &'static str {
        match self {
            QueryPlanNode::TableScan(_) => "TableScan",
            QueryPlanNode::IndexScan(_) => "IndexScan",
            QueryPlanNode::BitmapScan(_) => "BitmapScan",
            QueryPlanNode::Join(_) => "Join",
            QueryPlanNode::HashJoin(_) => "HashJoin",
            QueryPlanNode::MergeJoin(_) => "MergeJoin",
            QueryPlanNode::NestedLoopJoin(_) => "NestedLoopJoin",
            QueryPlanNode::GraphTraversal(_) => "GraphTraversal",
            QueryPlanNode::ShortestPath(_) => "ShortestPath",
            QueryPlanNode::TriplePatternScan(_) => "TriplePatternScan",
            QueryPlanNode::PropertyPath(_) => "PropertyPath",
            QueryPlanNode::Filter(_) => "Filter",
            QueryPlanNode::Project(_) => "Project",
            QueryPlanNode::Sort(_) => "Sort",
            QueryPlanNode::Limit(_) => "Limit",
            QueryPlanNode::Distinct(_) => "Distinct",
            QueryPlanNode::Aggregate(_) => "Aggregate",
            QueryPlanNode::SetOperation(_) => "SetOperation",
            QueryPlanNode::VectorSearch(_) => "VectorSearch",
            QueryPlanNode::FullTextSearch(_) => "FullTextSearch",
            QueryPlanNode::SpatialSearch(_) => "SpatialSearch",
            QueryPlanNode::Values(_) => "Values",
            QueryPlanNode::Subquery(_) => "Subquery",
            QueryPlanNode::Materialize(_) => "Materialize",
        }
    }

    /// The immediate child plans in evaluation order. Tree walkers use this
    /// to traverse without matching on variants.
    pub fn children(&self) -> Vec<&QueryPlanNode> {
        match self {
            QueryPlanNode::TableScan(_)
            | QueryPlanNode::IndexScan(_)
            | QueryPlanNode::BitmapScan(_)
            | QueryPlanNode::TriplePatternScan(_)
            | QueryPlanNode::PropertyPath(_)
            | QueryPlanNode::VectorSearch(_)
            | QueryPlanNode::FullTextSearch(_)
            | QueryPlanNode::SpatialSearch(_)
            | QueryPlanNode::Values(_) => Vec::new(),
            QueryPlanNode::Join(plan) => vec![plan.left(), plan.right()],
            QueryPlanNode::HashJoin(plan) => vec![plan.build(), plan.probe()],
            QueryPlanNode::MergeJoin(plan) => vec![plan.left(), plan.right()],
            QueryPlanNode::NestedLoopJoin(plan) => vec![plan.outer(), plan.inner()],
            QueryPlanNode::GraphTraversal(plan) => vec![plan.start()],
            QueryPlanNode::ShortestPath(plan) => vec![plan.start(), plan.end()],
            QueryPlanNode::Filter(plan) => vec![plan.input()],
            QueryPlanNode::Project(plan) => vec![plan.input()],
            QueryPlanNode::Sort(plan) => vec![plan.input()],
            QueryPlanNode::Limit(plan) => vec![plan.input()],
            QueryPlanNode::Distinct(plan) => vec![plan.input()],
            QueryPlanNode::Aggregate(plan) => vec![plan.input()],
            QueryPlanNode::SetOperation(plan) => vec![plan.left(), plan.right()],
            QueryPlanNode::Subquery(plan) => vec![plan.input()],
            QueryPlanNode::Materialize(plan) => vec![plan.input()],
        }
    }

    fn fmt_line(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryPlanNode::TableScan(plan) => {
                write!(f, "TableScan: {}", plan.table())?;
                if let Some(filter) = plan.filter() {
                    write!(f, " filter {filter}")?;
                }
                Ok(())
            }
            QueryPlanNode::IndexScan(plan) => {
                write!(f, "IndexScan: {} on {}", plan.index_name(), plan.table())
            }
            QueryPlanNode::BitmapScan(plan) => {
                let operation = match plan.operation() {
                    BitmapOperation::And => "and",
                    BitmapOperation::Or => "or",
                };
                write!(
                    f,
                    "BitmapScan: {operation} of [{}]",
                    plan.scans().iter().map(IndexScanPlan::index_name).join(", ")
                )
            }
            QueryPlanNode::Join(plan) => write!(f, "Join: {}", plan.join_type()),
            QueryPlanNode::HashJoin(plan) => {
                write!(
                    f,
                    "HashJoin: {} ({})",
                    plan.join_type(),
                    plan.build_keys()
                        .iter()
                        .zip(plan.probe_keys())
                        .map(|(build, probe)| format!("{build} = {probe}"))
                        .join(", ")
                )
            }
            QueryPlanNode::MergeJoin(plan) => {
                write!(
                    f,
                    "MergeJoin: {} ({})",
                    plan.join_type(),
                    plan.left_keys()
                        .iter()
                        .zip(plan.right_keys())
                        .map(|(left, right)| format!("{left} = {right}"))
                        .join(", ")
                )
            }
            QueryPlanNode::NestedLoopJoin(plan) => {
                write!(f, "NestedLoopJoin: {}", plan.join_type())?;
                if let Some(condition) = plan.condition() {
                    write!(f, " on {condition}")?;
                }
                Ok(())
            }
            QueryPlanNode::GraphTraversal(plan) => {
                write!(
                    f,
                    "GraphTraversal: {} {}",
                    plan.strategy(),
                    plan.pattern()
                )?;
                if let Some(max_depth) = plan.max_depth() {
                    write!(f, " max-depth {max_depth}")?;
                }
                Ok(())
            }
            QueryPlanNode::ShortestPath(plan) => {
                write!(f, "ShortestPath: {} {}", plan.algorithm(), plan.pattern())?;
                if plan.find_all() {
                    f.write_str(" all")?;
                }
                Ok(())
            }
            QueryPlanNode::TriplePatternScan(plan) => {
                write!(
                    f,
                    "TriplePatternScan: {} ({})",
                    plan.index(),
                    plan.pattern()
                )
            }
            QueryPlanNode::PropertyPath(plan) => {
                write!(
                    f,
                    "PropertyPath: {} {} {} [{}]",
                    plan.subject(),
                    plan.path(),
                    plan.object(),
                    plan.algorithm()
                )
            }
            QueryPlanNode::Filter(plan) => write!(f, "Filter: {}", plan.predicate()),
            QueryPlanNode::Project(plan) => {
                write!(
                    f,
                    "Project: {}",
                    plan.expressions()
                        .iter()
                        .map(|(expression, alias)| match alias {
                            Some(alias) => format!("{expression} as {alias}"),
                            None => expression.to_string(),
                        })
                        .join(", ")
                )
            }
            QueryPlanNode::Sort(plan) => {
                write!(f, "Sort: {}", plan.keys().iter().join(", "))
            }
            QueryPlanNode::Limit(plan) => {
                match plan.limit() {
                    Some(limit) => write!(f, "Limit: {limit}")?,
                    None => write!(f, "Limit: all")?,
                }
                if plan.offset() > 0 {
                    write!(f, " offset {}", plan.offset())?;
                }
                Ok(())
            }
            QueryPlanNode::Distinct(_) => f.write_str("Distinct"),
            QueryPlanNode::Aggregate(plan) => {
                f.write_str("Aggregate:")?;
                if !plan.group_by().is_empty() {
                    write!(f, " group by {}", plan.group_by().iter().join(", "))?;
                }
                if !plan.aggregates().is_empty() {
                    if !plan.group_by().is_empty() {
                        f.write_str(";")?;
                    }
                    write!(f, " {}", plan.aggregates().iter().join(", "))?;
                }
                Ok(())
            }
            QueryPlanNode::SetOperation(plan) => {
                write!(f, "SetOperation: {}", plan.kind())?;
                if plan.preserve_duplicates() {
                    f.write_str(" all")?;
                }
                Ok(())
            }
            QueryPlanNode::VectorSearch(plan) => {
                write!(
                    f,
                    "VectorSearch: {} on {} k={} metric={}",
                    plan.column(),
                    plan.table(),
                    plan.k(),
                    plan.metric()
                )
            }
            QueryPlanNode::FullTextSearch(plan) => {
                write!(
                    f,
                    "FullTextSearch: {} on {} ~ \"{}\" ({})",
                    plan.column(),
                    plan.table(),
                    plan.query(),
                    plan.mode()
                )
            }
            QueryPlanNode::SpatialSearch(plan) => {
                write!(
                    f,
                    "SpatialSearch: {} on {} {}",
                    plan.column(),
                    plan.table(),
                    plan.region()
                )
            }
            QueryPlanNode::Values(plan) => {
                write!(
                    f,
                    "Values: {} rows of ({})",
                    plan.rows().len(),
                    plan.columns().join(", ")
                )
            }
            QueryPlanNode::Subquery(plan) => {
                f.write_str("Subquery")?;
                if let Some(alias) = plan.alias() {
                    write!(f, " as {alias}")?;
                }
                if plan.correlated() {
                    f.write_str(" (correlated)")?;
                }
                Ok(())
            }
            QueryPlanNode::Materialize(plan) => write!(f, "Materialize: {}", plan.hint()),
        }
    }

    fn fmt_tree(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        for _ in 0..depth {
            f.write_str("  ")?;
        }
        self.fmt_line(f)?;
        for child in self.children() {
            f.write_str("\n")?;
            child.fmt_tree(f, depth + 1)?;
        }
        Ok(())
    }
}

impl fmt::Display for QueryPlanNode {
    /// Renders the plan as an indented explain tree, one node per line.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_tree(f, 0)
    }
}

/// A plan tree with its cost annotation and index-usage metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryPlan {
    node: QueryPlanNode,
    cost: QueryCost,
    indexes: Vec<IndexUsage>,
    statistics: Option<PlanStatistics>,
}

impl QueryPlan {
    pub fn new(node: QueryPlanNode, cost: QueryCost) -> Self {
        Self {
            node,
            cost,
            indexes: Vec::new(),
            statistics: None,
        }
    }

    #[must_use]
    pub fn with_indexes(mut self, indexes: Vec<IndexUsage>) -> Self {
        self.indexes = indexes;
        self
    }

    #[must_use]
    pub fn with_statistics(mut self, statistics: PlanStatistics) -> Self {
        self.statistics = Some(statistics);
        self
    }

    pub fn node(&self) -> &QueryPlanNode {
        &self.node
    }

    pub fn cost(&self) -> QueryCost {
        self.cost
    }

    pub fn indexes(&self) -> &[IndexUsage] {
        &self.indexes
    }

    pub fn statistics(&self) -> Option<&PlanStatistics> {
        self.statistics.as_ref()
    }
}

impl fmt::Display for QueryPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "QueryPlan ({})", self.cost)?;
        self.node.fmt_tree(f, 1)
    }
}
