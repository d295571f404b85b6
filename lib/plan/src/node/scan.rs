use crate::error::{InvalidPlan, PlanResult};
use crate::index::{IndexBounds, TripleIndex};
use omniql_model::{Expression, Literal, TriplePattern};

/// Full scan of a relational table, optionally pre-filtered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableScanPlan {
    table: String,
    columns: Vec<String>,
    filter: Option<Expression>,
}

impl TableScanPlan {
    pub fn new(table: impl Into<String>, columns: Vec<String>, filter: Option<Expression>) -> Self {
        Self {
            table: table.into(),
            columns,
            filter,
        }
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn filter(&self) -> Option<&Expression> {
        self.filter.as_ref()
    }
}

/// Scan of a secondary index under the given key bounds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexScanPlan {
    index_name: String,
    table: String,
    bounds: IndexBounds,
}

impl IndexScanPlan {
    pub fn new(
        index_name: impl Into<String>,
        table: impl Into<String>,
        bounds: IndexBounds,
    ) -> Self {
        Self {
            index_name: index_name.into(),
            table: table.into(),
            bounds,
        }
    }

    pub fn index_name(&self) -> &str {
        &self.index_name
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn bounds(&self) -> &IndexBounds {
        &self.bounds
    }
}

/// How a bitmap scan combines its per-index row sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BitmapOperation {
    And,
    Or,
}

/// Combines two or more index scans through set operations on row ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitmapScanPlan {
    scans: Vec<IndexScanPlan>,
    operation: BitmapOperation,
}

impl BitmapScanPlan {
    /// # Errors
    ///
    /// Fails with fewer than two scans: a one-input bitmap is an index scan.
    pub fn try_new(scans: Vec<IndexScanPlan>, operation: BitmapOperation) -> PlanResult<Self> {
        if scans.len() < 2 {
            return Err(InvalidPlan::new(format!(
                "bitmap scan requires at least two index scans, got {}",
                scans.len()
            )));
        }
        Ok(Self { scans, operation })
    }

    pub fn scans(&self) -> &[IndexScanPlan] {
        &self.scans
    }

    pub fn operation(&self) -> BitmapOperation {
        self.operation
    }
}

/// Scan of one triple index with whatever pattern positions are bound.
///
/// `bindings` lists the variables already bound by the surrounding plan;
/// those positions participate in the index prefix alongside constants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriplePatternScanPlan {
    pattern: TriplePattern,
    index: TripleIndex,
    bindings: Vec<String>,
}

impl TriplePatternScanPlan {
    pub fn new(pattern: TriplePattern, index: TripleIndex, bindings: Vec<String>) -> Self {
        Self {
            pattern,
            index,
            bindings,
        }
    }

    /// Convenience constructor letting [`TripleIndex::select`] pick the
    /// index for the bound positions.
    pub fn with_selected_index(pattern: TriplePattern, bindings: Vec<String>) -> Self {
        let index = TripleIndex::select(&pattern, &bindings);
        Self::new(pattern, index, bindings)
    }

    pub fn pattern(&self) -> &TriplePattern {
        &self.pattern
    }

    pub fn index(&self) -> TripleIndex {
        self.index
    }

    pub fn bindings(&self) -> &[String] {
        &self.bindings
    }
}

/// An inline table of literal rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValuesPlan {
    columns: Vec<String>,
    rows: Vec<Vec<Literal>>,
}

impl ValuesPlan {
    /// # Errors
    ///
    /// Fails when any row's arity differs from the column count.
    pub fn try_new(columns: Vec<String>, rows: Vec<Vec<Literal>>) -> PlanResult<Self> {
        for (i, row) in rows.iter().enumerate() {
            if row.len() != columns.len() {
                return Err(InvalidPlan::new(format!(
                    "values row {i} has {} entries for {} columns",
                    row.len(),
                    columns.len()
                )));
            }
        }
        Ok(Self { columns, rows })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Literal>] {
        &self.rows
    }
}
