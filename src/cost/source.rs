use super::loader::load_matrix_file;
use super::matrix::MatrixLookup;
use crate::error::CoResult;
use crate::model::{AttributeConfig, Order};
use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;
use tracing::info;

/// What a matrix provider is asked for before an optimization run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PrefetchRequest {
    pub attributes: Vec<String>,
    /// Distinct non-empty values seen per attribute across the orders.
    pub observed: BTreeMap<String, BTreeSet<String>>,
}

impl PrefetchRequest {
    pub fn from_orders(orders: &[Order], attributes: &[AttributeConfig]) -> Self {
        let mut observed: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
        for attr in attributes {
            let values = observed.entry(attr.column.clone()).or_default();
            for order in orders {
                let v = order.value(&attr.column);
                if !v.is_empty() {
                    values.insert(v.to_string());
                }
            }
        }
        Self {
            attributes: attributes.iter().map(|a| a.column.clone()).collect(),
            observed,
        }
    }

    pub fn value_count(&self) -> usize {
        self.observed.values().map(BTreeSet::len).sum()
    }
}

/// Resolves matrix data ahead of a run. The engine never calls this itself;
/// callers prefetch and pass the result in through the options.
pub trait MatrixSource {
    fn prefetch(&self, request: &PrefetchRequest) -> CoResult<MatrixLookup>;
}

impl MatrixSource for MatrixLookup {
    fn prefetch(&self, request: &PrefetchRequest) -> CoResult<MatrixLookup> {
        Ok(self.restricted_to(&request.observed))
    }
}

/// Matrix data kept in a CSV file, read on every prefetch.
#[derive(Debug, Clone)]
pub struct CsvMatrixSource {
    pub path: PathBuf,
}

impl CsvMatrixSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl MatrixSource for CsvMatrixSource {
    fn prefetch(&self, request: &PrefetchRequest) -> CoResult<MatrixLookup> {
        let full = load_matrix_file(&self.path)?;
        let matrix = full.restricted_to(&request.observed);
        info!(
            "Prefetched {} of {} matrix entries from {} for {} observed values",
            matrix.len(),
            full.len(),
            self.path.display(),
            request.value_count()
        );
        Ok(matrix)
    }
}
