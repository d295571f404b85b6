use crate::error::{InvalidPlan, PlanResult};
use crate::node::QueryPlanNode;
use omniql_model::Expression;
use std::fmt;

/// Logical join semantics shared by all physical join forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JoinType {
    Inner,
    Left,
    Right,
    Full,
    Semi,
    Anti,
    Cross,
}

impl fmt::Display for JoinType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            JoinType::Inner => "inner",
            JoinType::Left => "left",
            JoinType::Right => "right",
            JoinType::Full => "full",
            JoinType::Semi => "semi",
            JoinType::Anti => "anti",
            JoinType::Cross => "cross",
        })
    }
}

/// A join with no physical strategy chosen yet. The optimizer replaces it
/// with one of the specialized forms below.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinPlan {
    left: Box<QueryPlanNode>,
    right: Box<QueryPlanNode>,
    join_type: JoinType,
    condition: Option<Expression>,
}

impl JoinPlan {
    pub fn new(
        left: QueryPlanNode,
        right: QueryPlanNode,
        join_type: JoinType,
        condition: Option<Expression>,
    ) -> Self {
        Self {
            left: Box::new(left),
            right: Box::new(right),
            join_type,
            condition,
        }
    }

    pub fn left(&self) -> &QueryPlanNode {
        &self.left
    }

    pub fn right(&self) -> &QueryPlanNode {
        &self.right
    }

    pub fn join_type(&self) -> JoinType {
        self.join_type
    }

    pub fn condition(&self) -> Option<&Expression> {
        self.condition.as_ref()
    }
}

/// Hash join: the build side is materialized into a hash table keyed by
/// `build_keys`, the probe side streams against it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HashJoinPlan {
    build: Box<QueryPlanNode>,
    probe: Box<QueryPlanNode>,
    join_type: JoinType,
    build_keys: Vec<Expression>,
    probe_keys: Vec<Expression>,
}

impl HashJoinPlan {
    /// # Errors
    ///
    /// Fails when the key lists have different lengths.
    pub fn try_new(
        build: QueryPlanNode,
        probe: QueryPlanNode,
        join_type: JoinType,
        build_keys: Vec<Expression>,
        probe_keys: Vec<Expression>,
    ) -> PlanResult<Self> {
        if build_keys.len() != probe_keys.len() {
            return Err(InvalidPlan::new(format!(
                "hash join has {} build keys but {} probe keys",
                build_keys.len(),
                probe_keys.len()
            )));
        }
        Ok(Self {
            build: Box::new(build),
            probe: Box::new(probe),
            join_type,
            build_keys,
            probe_keys,
        })
    }

    pub fn build(&self) -> &QueryPlanNode {
        &self.build
    }

    pub fn probe(&self) -> &QueryPlanNode {
        &self.probe
    }

    pub fn join_type(&self) -> JoinType {
        self.join_type
    }

    pub fn build_keys(&self) -> &[Expression] {
        &self.build_keys
    }

    pub fn probe_keys(&self) -> &[Expression] {
        &self.probe_keys
    }
}

/// Merge join over two inputs already sorted on their keys. The constructor
/// does not verify sortedness; the optimizer asserts it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeJoinPlan {
    left: Box<QueryPlanNode>,
    right: Box<QueryPlanNode>,
    join_type: JoinType,
    left_keys: Vec<Expression>,
    right_keys: Vec<Expression>,
}

impl MergeJoinPlan {
    /// # Errors
    ///
    /// Fails when the key lists have different lengths.
    pub fn try_new(
        left: QueryPlanNode,
        right: QueryPlanNode,
        join_type: JoinType,
        left_keys: Vec<Expression>,
        right_keys: Vec<Expression>,
    ) -> PlanResult<Self> {
        if left_keys.len() != right_keys.len() {
            return Err(InvalidPlan::new(format!(
                "merge join has {} left keys but {} right keys",
                left_keys.len(),
                right_keys.len()
            )));
        }
        Ok(Self {
            left: Box::new(left),
            right: Box::new(right),
            join_type,
            left_keys,
            right_keys,
        })
    }

    pub fn left(&self) -> &QueryPlanNode {
        &self.left
    }

    pub fn right(&self) -> &QueryPlanNode {
        &self.right
    }

    pub fn join_type(&self) -> JoinType {
        self.join_type
    }

    pub fn left_keys(&self) -> &[Expression] {
        &self.left_keys
    }

    pub fn right_keys(&self) -> &[Expression] {
        &self.right_keys
    }
}

/// The fallback join: scans the inner input once per outer row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NestedLoopJoinPlan {
    outer: Box<QueryPlanNode>,
    inner: Box<QueryPlanNode>,
    join_type: JoinType,
    condition: Option<Expression>,
}

impl NestedLoopJoinPlan {
    pub fn new(
        outer: QueryPlanNode,
        inner: QueryPlanNode,
        join_type: JoinType,
        condition: Option<Expression>,
    ) -> Self {
        Self {
            outer: Box::new(outer),
            inner: Box::new(inner),
            join_type,
            condition,
        }
    }

    pub fn outer(&self) -> &QueryPlanNode {
        &self.outer
    }

    pub fn inner(&self) -> &QueryPlanNode {
        &self.inner
    }

    pub fn join_type(&self) -> JoinType {
        self.join_type
    }

    pub fn condition(&self) -> Option<&Expression> {
        self.condition.as_ref()
    }
}
