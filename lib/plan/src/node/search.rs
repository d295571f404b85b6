use crate::error::{InvalidPlan, PlanResult};
use std::fmt;

/// Distance function of a vector similarity search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VectorMetric {
    Cosine,
    Euclidean,
    DotProduct,
    Manhattan,
}

impl fmt::Display for VectorMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            VectorMetric::Cosine => "cosine",
            VectorMetric::Euclidean => "euclidean",
            VectorMetric::DotProduct => "dot-product",
            VectorMetric::Manhattan => "manhattan",
        })
    }
}

/// k-nearest-neighbour search over a vector column.
///
/// Equality compares the query vector by bit pattern, like every float in
/// the algebra.
#[derive(Debug, Clone)]
pub struct VectorSearchPlan {
    table: String,
    column: String,
    query: Vec<f32>,
    k: usize,
    metric: VectorMetric,
}

impl VectorSearchPlan {
    /// # Errors
    ///
    /// Fails when `k` is zero or the query vector is empty.
    pub fn try_new(
        table: impl Into<String>,
        column: impl Into<String>,
        query: Vec<f32>,
        k: usize,
        metric: VectorMetric,
    ) -> PlanResult<Self> {
        if k == 0 {
            return Err(InvalidPlan::new("vector search requires a positive k"));
        }
        if query.is_empty() {
            return Err(InvalidPlan::new("vector search requires a query vector"));
        }
        Ok(Self {
            table: table.into(),
            column: column.into(),
            query,
            k,
            metric,
        })
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn column(&self) -> &str {
        &self.column
    }

    pub fn query(&self) -> &[f32] {
        &self.query
    }

    pub fn k(&self) -> usize {
        self.k
    }

    pub fn metric(&self) -> VectorMetric {
        self.metric
    }
}

impl PartialEq for VectorSearchPlan {
    fn eq(&self, other: &Self) -> bool {
        self.table == other.table
            && self.column == other.column
            && self.k == other.k
            && self.metric == other.metric
            && self.query.len() == other.query.len()
            && self
                .query
                .iter()
                .zip(&other.query)
                .all(|(a, b)| a.to_bits() == b.to_bits())
    }
}

impl Eq for VectorSearchPlan {}

/// Matching semantics of a full-text search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FullTextSearchMode {
    Match,
    Phrase,
    Prefix,
    Fuzzy,
    Boolean,
}

impl fmt::Display for FullTextSearchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FullTextSearchMode::Match => "match",
            FullTextSearchMode::Phrase => "phrase",
            FullTextSearchMode::Prefix => "prefix",
            FullTextSearchMode::Fuzzy => "fuzzy",
            FullTextSearchMode::Boolean => "boolean",
        })
    }
}

/// Full-text search over an indexed text column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FullTextSearchPlan {
    table: String,
    column: String,
    query: String,
    mode: FullTextSearchMode,
}

impl FullTextSearchPlan {
    /// # Errors
    ///
    /// Fails on an empty query string.
    pub fn try_new(
        table: impl Into<String>,
        column: impl Into<String>,
        query: impl Into<String>,
        mode: FullTextSearchMode,
    ) -> PlanResult<Self> {
        let query = query.into();
        if query.is_empty() {
            return Err(InvalidPlan::new("full-text search requires a query"));
        }
        Ok(Self {
            table: table.into(),
            column: column.into(),
            query,
            mode,
        })
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn column(&self) -> &str {
        &self.column
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn mode(&self) -> FullTextSearchMode {
        self.mode
    }
}

/// The region a spatial search matches against.
#[derive(Debug, Clone)]
pub enum SpatialRegion {
    BoundingBox {
        min_x: f64,
        min_y: f64,
        max_x: f64,
        max_y: f64,
    },
    WithinDistance {
        x: f64,
        y: f64,
        distance: f64,
    },
}

impl PartialEq for SpatialRegion {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (
                SpatialRegion::BoundingBox {
                    min_x: a1,
                    min_y: a2,
                    max_x: a3,
                    max_y: a4,
                },
                SpatialRegion::BoundingBox {
                    min_x: b1,
                    min_y: b2,
                    max_x: b3,
                    max_y: b4,
                },
            ) => {
                a1.to_bits() == b1.to_bits()
                    && a2.to_bits() == b2.to_bits()
                    && a3.to_bits() == b3.to_bits()
                    && a4.to_bits() == b4.to_bits()
            }
            (
                SpatialRegion::WithinDistance {
                    x: a1,
                    y: a2,
                    distance: a3,
                },
                SpatialRegion::WithinDistance {
                    x: b1,
                    y: b2,
                    distance: b3,
                },
            ) => {
                a1.to_bits() == b1.to_bits()
                    && a2.to_bits() == b2.to_bits()
                    && a3.to_bits() == b3.to_bits()
            }
            _ => false,
        }
    }
}

impl Eq for SpatialRegion {}

impl fmt::Display for SpatialRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpatialRegion::BoundingBox {
                min_x,
                min_y,
                max_x,
                max_y,
            } => write!(f, "box [{min_x}, {min_y}] .. [{max_x}, {max_y}]"),
            SpatialRegion::WithinDistance { x, y, distance } => {
                write!(f, "within {distance} of [{x}, {y}]")
            }
        }
    }
}

/// Spatial search over an indexed geometry column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpatialSearchPlan {
    table: String,
    column: String,
    region: SpatialRegion,
}

impl SpatialSearchPlan {
    /// # Errors
    ///
    /// Fails when a distance region has a negative or NaN radius.
    pub fn try_new(
        table: impl Into<String>,
        column: impl Into<String>,
        region: SpatialRegion,
    ) -> PlanResult<Self> {
        if let SpatialRegion::WithinDistance { distance, .. } = &region {
            if distance.is_nan() || *distance < 0.0 {
                return Err(InvalidPlan::new(
                    "spatial search requires a non-negative distance",
                ));
            }
        }
        Ok(Self {
            table: table.into(),
            column: column.into(),
            region,
        })
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn column(&self) -> &str {
        &self.column
    }

    pub fn region(&self) -> &SpatialRegion {
        &self.region
    }
}
