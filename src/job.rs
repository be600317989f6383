use crate::cost::MatrixLookup;
use crate::error::{ChangeoverError, CoResult};
use crate::model::{AttributeConfig, Order};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// A self-contained optimization input as stored on disk (JSON).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub attributes: Vec<AttributeConfig>,
    pub orders: Vec<Order>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matrix: Option<MatrixLookup>,
}

impl Job {
    pub fn new(attributes: Vec<AttributeConfig>, orders: Vec<Order>) -> Self {
        let mut job = Self {
            name: None,
            attributes,
            orders,
            matrix: None,
        };
        job.normalize_indices();
        job
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> CoResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            ChangeoverError::Config(format!(
                "Failed to read job file '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> CoResult<Self> {
        let mut job: Job = serde_json::from_str(content)?;
        job.normalize_indices();
        Ok(job)
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> CoResult<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// The original index is the position in the file, whatever it says.
    pub fn normalize_indices(&mut self) {
        for (i, order) in self.orders.iter_mut().enumerate() {
            order.original_index = i;
        }
    }

    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("job")
    }

    pub fn validate(&self) -> ValidationReport {
        validate_input(&self.orders, &self.attributes)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingValue {
    pub order_id: String,
    pub column: String,
}

/// Configuration mismatches found at the boundary, before optimizing.
///
/// The engine tolerates all of these; the report exists so callers can
/// surface them once instead of getting silent fallbacks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    pub duplicate_columns: Vec<String>,
    pub duplicate_order_ids: Vec<String>,
    /// Orders whose value map lacks a configured column.
    pub missing_values: Vec<MissingValue>,
    /// Columns whose changeover time is negative or not finite.
    pub invalid_times: Vec<String>,
}

impl ValidationReport {
    pub fn is_clean(&self) -> bool {
        self.issue_count() == 0
    }

    pub fn issue_count(&self) -> usize {
        self.duplicate_columns.len()
            + self.duplicate_order_ids.len()
            + self.missing_values.len()
            + self.invalid_times.len()
    }

    pub fn messages(&self) -> Vec<String> {
        let mut out = Vec::new();
        for c in &self.duplicate_columns {
            out.push(format!("Attribute column '{}' is configured more than once", c));
        }
        for id in &self.duplicate_order_ids {
            out.push(format!("Order id '{}' occurs more than once", id));
        }
        for c in &self.invalid_times {
            out.push(format!("Attribute '{}' has an invalid changeover time", c));
        }
        for m in &self.missing_values {
            out.push(format!("Order '{}' has no value for '{}'", m.order_id, m.column));
        }
        out
    }

    pub fn into_result(self) -> CoResult<()> {
        if self.is_clean() {
            return Ok(());
        }
        let messages = self.messages();
        Err(ChangeoverError::Validation(format!(
            "{} issue(s): {}",
            messages.len(),
            messages.join("; ")
        )))
    }
}

pub fn validate_input(orders: &[Order], attributes: &[AttributeConfig]) -> ValidationReport {
    let mut report = ValidationReport::default();

    let mut seen = HashSet::new();
    for attr in attributes {
        if !seen.insert(attr.column.as_str()) && !report.duplicate_columns.contains(&attr.column) {
            report.duplicate_columns.push(attr.column.clone());
        }
        if !attr.changeover_time.is_finite() || attr.changeover_time < 0.0 {
            report.invalid_times.push(attr.column.clone());
        }
    }

    let mut ids = HashSet::new();
    for order in orders {
        if !ids.insert(order.id.as_str()) && !report.duplicate_order_ids.contains(&order.id) {
            report.duplicate_order_ids.push(order.id.clone());
        }
        for attr in attributes {
            if !order.values.contains_key(&attr.column) {
                report.missing_values.push(MissingValue {
                    order_id: order.id.clone(),
                    column: attr.column.clone(),
                });
            }
        }
    }

    report
}
