use crate::node::QueryPlanNode;
use omniql_model::{MatchPattern, PropertyPath, Term};
use std::fmt;

/// Order in which a traversal expands the graph frontier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TraversalStrategy {
    DepthFirst,
    BreadthFirst,
    Bidirectional,
}

impl fmt::Display for TraversalStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TraversalStrategy::DepthFirst => "depth-first",
            TraversalStrategy::BreadthFirst => "breadth-first",
            TraversalStrategy::Bidirectional => "bidirectional",
        })
    }
}

/// Drives graph pattern matching from the rows of `start`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphTraversalPlan {
    start: Box<QueryPlanNode>,
    pattern: MatchPattern,
    strategy: TraversalStrategy,
    max_depth: Option<u32>,
}

impl GraphTraversalPlan {
    pub fn new(
        start: QueryPlanNode,
        pattern: MatchPattern,
        strategy: TraversalStrategy,
        max_depth: Option<u32>,
    ) -> Self {
        Self {
            start: Box::new(start),
            pattern,
            strategy,
            max_depth,
        }
    }

    pub fn start(&self) -> &QueryPlanNode {
        &self.start
    }

    pub fn pattern(&self) -> &MatchPattern {
        &self.pattern
    }

    pub fn strategy(&self) -> TraversalStrategy {
        self.strategy
    }

    pub fn max_depth(&self) -> Option<u32> {
        self.max_depth
    }
}

/// Algorithm choice for shortest-path computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShortestPathAlgorithm {
    Dijkstra,
    BellmanFord,
    Bfs,
    BidirectionalBfs,
}

impl fmt::Display for ShortestPathAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ShortestPathAlgorithm::Dijkstra => "dijkstra",
            ShortestPathAlgorithm::BellmanFord => "bellman-ford",
            ShortestPathAlgorithm::Bfs => "bfs",
            ShortestPathAlgorithm::BidirectionalBfs => "bidirectional-bfs",
        })
    }
}

/// Computes one or all shortest paths between the rows of two input plans.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortestPathPlan {
    start: Box<QueryPlanNode>,
    end: Box<QueryPlanNode>,
    pattern: MatchPattern,
    algorithm: ShortestPathAlgorithm,
    find_all: bool,
}

impl ShortestPathPlan {
    pub fn new(
        start: QueryPlanNode,
        end: QueryPlanNode,
        pattern: MatchPattern,
        algorithm: ShortestPathAlgorithm,
        find_all: bool,
    ) -> Self {
        Self {
            start: Box::new(start),
            end: Box::new(end),
            pattern,
            algorithm,
            find_all,
        }
    }

    pub fn start(&self) -> &QueryPlanNode {
        &self.start
    }

    pub fn end(&self) -> &QueryPlanNode {
        &self.end
    }

    pub fn pattern(&self) -> &MatchPattern {
        &self.pattern
    }

    pub fn algorithm(&self) -> ShortestPathAlgorithm {
        self.algorithm
    }

    /// Whether all shortest paths are produced rather than one.
    pub fn find_all(&self) -> bool {
        self.find_all
    }
}

/// Evaluation strategy for SPARQL property paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PathAlgorithm {
    /// Fixpoint iteration over the frontier.
    Iterative,
    /// Memoized recursive descent over the path expression.
    Recursive,
    /// A Glushkov/NFA automaton compiled from the path.
    Automaton,
}

impl fmt::Display for PathAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PathAlgorithm::Iterative => "iterative",
            PathAlgorithm::Recursive => "recursive",
            PathAlgorithm::Automaton => "automaton",
        })
    }
}

/// Evaluates a property path between two terms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyPathPlan {
    subject: Term,
    path: PropertyPath,
    object: Term,
    algorithm: PathAlgorithm,
}

impl PropertyPathPlan {
    pub fn new(subject: Term, path: PropertyPath, object: Term, algorithm: PathAlgorithm) -> Self {
        Self {
            subject,
            path,
            object,
            algorithm,
        }
    }

    pub fn subject(&self) -> &Term {
        &self.subject
    }

    pub fn path(&self) -> &PropertyPath {
        &self.path
    }

    pub fn object(&self) -> &Term {
        &self.object
    }

    pub fn algorithm(&self) -> PathAlgorithm {
        self.algorithm
    }
}
