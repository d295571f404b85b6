use crate::error::{InvalidPlan, PlanResult};
use omniql_model::{Literal, Term, TriplePattern};
use std::fmt;

/// The family an index belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndexKind {
    Scalar,
    Composite,
    FullText,
    Vector,
    Spatial,
    Triple,
}

/// How a plan accesses an index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccessPattern {
    ExactMatch,
    RangeScan,
    PrefixScan,
    FullScan,
}

/// Metadata describing one index access a plan performs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexUsage {
    pub index_name: String,
    pub kind: IndexKind,
    pub access_pattern: AccessPattern,
}

impl IndexUsage {
    pub fn new(index_name: impl Into<String>, kind: IndexKind, access_pattern: AccessPattern) -> Self {
        Self {
            index_name: index_name.into(),
            kind,
            access_pattern,
        }
    }
}

/// Key bounds of an index scan.
///
/// An exact match stores the key as both bounds, inclusive. A prefix match
/// shares that representation; the difference is carried by the access
/// pattern tag of the surrounding [`IndexUsage`]. Empty bounds on both sides
/// mean an unbounded scan; a bound on one side gives a half-open range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexBounds {
    lower: Vec<Literal>,
    upper: Vec<Literal>,
    lower_inclusive: bool,
    upper_inclusive: bool,
}

impl IndexBounds {
    #[must_use]
    pub fn unbounded() -> Self {
        Self {
            lower: Vec::new(),
            upper: Vec::new(),
            lower_inclusive: true,
            upper_inclusive: true,
        }
    }

    /// `key == values`.
    #[must_use]
    pub fn exact(values: Vec<Literal>) -> Self {
        Self {
            lower: values.clone(),
            upper: values,
            lower_inclusive: true,
            upper_inclusive: true,
        }
    }

    /// `key starts with values`. Representationally identical to [`exact`];
    /// the engine distinguishes the two by the access pattern.
    ///
    /// [`exact`]: IndexBounds::exact
    #[must_use]
    pub fn prefix(values: Vec<Literal>) -> Self {
        Self::exact(values)
    }

    /// A (half-)open range. An empty side is unbounded.
    ///
    /// # Errors
    ///
    /// Fails when both sides are present with different arities.
    pub fn range(
        lower: Vec<Literal>,
        upper: Vec<Literal>,
        lower_inclusive: bool,
        upper_inclusive: bool,
    ) -> PlanResult<Self> {
        if !lower.is_empty() && !upper.is_empty() && lower.len() != upper.len() {
            return Err(InvalidPlan::new(format!(
                "range bounds have mismatched arity: {} vs {}",
                lower.len(),
                upper.len()
            )));
        }
        Ok(Self {
            lower,
            upper,
            lower_inclusive,
            upper_inclusive,
        })
    }

    pub fn lower(&self) -> &[Literal] {
        &self.lower
    }

    pub fn upper(&self) -> &[Literal] {
        &self.upper
    }

    pub fn lower_inclusive(&self) -> bool {
        self.lower_inclusive
    }

    pub fn upper_inclusive(&self) -> bool {
        self.upper_inclusive
    }

    #[must_use]
    pub fn is_unbounded(&self) -> bool {
        self.lower.is_empty() && self.upper.is_empty()
    }
}

/// One position of a triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TripleComponent {
    Subject,
    Predicate,
    Object,
}

/// A physical triple-store layout: the permutation of subject, predicate and
/// object the index is ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TripleIndex {
    Spo,
    Pos,
    Osp,
    Sop,
    Pso,
    Ops,
}

impl TripleIndex {
    /// Index preference order, used to break ties between equally good
    /// candidates deterministically.
    pub const PREFERENCE: [TripleIndex; 6] = [
        TripleIndex::Spo,
        TripleIndex::Pos,
        TripleIndex::Osp,
        TripleIndex::Sop,
        TripleIndex::Pso,
        TripleIndex::Ops,
    ];

    #[must_use]
    pub fn columns(self) -> [TripleComponent; 3] {
        match self {
            TripleIndex::Spo => [
                TripleComponent::Subject,
                TripleComponent::Predicate,
                TripleComponent::Object,
            ],
            TripleIndex::Pos => [
                TripleComponent::Predicate,
                TripleComponent::Object,
                TripleComponent::Subject,
            ],
            TripleIndex::Osp => [
                TripleComponent::Object,
                TripleComponent::Subject,
                TripleComponent::Predicate,
            ],
            TripleIndex::Sop => [
                TripleComponent::Subject,
                TripleComponent::Object,
                TripleComponent::Predicate,
            ],
            TripleIndex::Pso => [
                TripleComponent::Predicate,
                TripleComponent::Subject,
                TripleComponent::Object,
            ],
            TripleIndex::Ops => [
                TripleComponent::Object,
                TripleComponent::Predicate,
                TripleComponent::Subject,
            ],
        }
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            TripleIndex::Spo => "spo",
            TripleIndex::Pos => "pos",
            TripleIndex::Osp => "osp",
            TripleIndex::Sop => "sop",
            TripleIndex::Pso => "pso",
            TripleIndex::Ops => "ops",
        }
    }

    /// Picks the index whose leading columns cover the largest bound prefix
    /// of `pattern`. A position counts as bound when it holds a constant or a
    /// variable listed in `bindings`. Ties resolve by [`Self::PREFERENCE`].
    #[must_use]
    pub fn select(pattern: &TriplePattern, bindings: &[String]) -> TripleIndex {
        let is_bound = |term: &Term| match term {
            Term::Variable(name) => bindings.iter().any(|bound| bound == name),
            _ => true,
        };
        let bound = [
            is_bound(&pattern.subject),
            is_bound(&pattern.predicate),
            is_bound(&pattern.object),
        ];

        let mut best = TripleIndex::Spo;
        let mut best_len = 0;
        for candidate in Self::PREFERENCE {
            let len = candidate
                .columns()
                .iter()
                .take_while(|component| match component {
                    TripleComponent::Subject => bound[0],
                    TripleComponent::Predicate => bound[1],
                    TripleComponent::Object => bound[2],
                })
                .count();
            if len > best_len {
                best = candidate;
                best_len = len;
            }
        }
        best
    }
}

impl fmt::Display for TripleIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
