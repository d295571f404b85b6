use crate::error::{InvalidPlan, PlanResult};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Estimated cost of a plan, in the planner's abstract units.
///
/// `startup` is the cost before the first row can be produced, `total` the
/// cost to exhaustion. Equality is by IEEE-754 bit pattern so annotated plans
/// compare structurally.
#[derive(Debug, Clone, Copy)]
pub struct QueryCost {
    startup: f64,
    total: f64,
    rows: u64,
    width: u64,
}

impl QueryCost {
    /// # Errors
    ///
    /// Fails when either cost is negative (or NaN) or `startup > total`.
    pub fn new(startup: f64, total: f64, rows: u64, width: u64) -> PlanResult<Self> {
        if startup.is_nan() || total.is_nan() || startup < 0.0 || total < 0.0 {
            return Err(InvalidPlan::new("plan costs must be non-negative"));
        }
        if startup > total {
            return Err(InvalidPlan::new(format!(
                "startup cost {startup} exceeds total cost {total}"
            )));
        }
        Ok(Self {
            startup,
            total,
            rows,
            width,
        })
    }

    #[must_use]
    pub fn zero() -> Self {
        Self {
            startup: 0.0,
            total: 0.0,
            rows: 0,
            width: 0,
        }
    }

    pub fn startup(&self) -> f64 {
        self.startup
    }

    pub fn total(&self) -> f64 {
        self.total
    }

    pub fn rows(&self) -> u64 {
        self.rows
    }

    pub fn width(&self) -> u64 {
        self.width
    }
}

impl PartialEq for QueryCost {
    fn eq(&self, other: &Self) -> bool {
        self.startup.to_bits() == other.startup.to_bits()
            && self.total.to_bits() == other.total.to_bits()
            && self.rows == other.rows
            && self.width == other.width
    }
}

impl Eq for QueryCost {}

impl Hash for QueryCost {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.startup.to_bits().hash(state);
        self.total.to_bits().hash(state);
        self.rows.hash(state);
        self.width.hash(state);
    }
}

impl fmt::Display for QueryCost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "cost={:.2}..{:.2} rows={} width={}",
            self.startup, self.total, self.rows, self.width
        )
    }
}

/// Cardinality and timing information an executor can attach to a plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlanStatistics {
    pub estimated_rows: u64,
    pub actual_rows: Option<u64>,
    pub elapsed_micros: Option<u64>,
}

impl PlanStatistics {
    pub fn estimated(estimated_rows: u64) -> Self {
        Self {
            estimated_rows,
            actual_rows: None,
            elapsed_micros: None,
        }
    }
}
