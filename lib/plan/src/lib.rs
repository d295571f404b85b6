//! This crate contains the OmniQL physical plan algebra: the closed family
//! of operator nodes an optimizer composes into executable plans.
//!
//! Nodes validate their invariants at construction and surface violations as
//! [`InvalidPlan`]. Plan trees are immutable values with structural equality,
//! freely shareable across threads. The algebra is executor-neutral: it can
//! express relational scans and joins, triple-index scans, graph traversals,
//! and vector/full-text/spatial search without fixing an execution strategy.

mod cost;
mod error;
mod index;
mod node;

pub use cost::{PlanStatistics, QueryCost};
pub use error::{InvalidPlan, PlanResult};
pub use index::{AccessPattern, IndexBounds, IndexKind, IndexUsage, TripleComponent, TripleIndex};
pub use node::{
    AggregateExpr, AggregatePlan, BitmapOperation, BitmapScanPlan, DistinctPlan, FilterPlan,
    FullTextSearchMode, FullTextSearchPlan, GraphTraversalPlan, HashJoinPlan, IndexScanPlan,
    JoinPlan, JoinType, LimitPlan, MaterializeHint, MaterializePlan, MergeJoinPlan,
    NestedLoopJoinPlan, PathAlgorithm, ProjectPlan, PropertyPathPlan, QueryPlan, QueryPlanNode,
    SetOperationKind, SetOperationPlan, ShortestPathAlgorithm, ShortestPathPlan, SortKey,
    SortPlan, SpatialRegion, SpatialSearchPlan, SubqueryPlan, TableScanPlan, TraversalStrategy,
    TriplePatternScanPlan, ValuesPlan, VectorMetric, VectorSearchPlan,
};
