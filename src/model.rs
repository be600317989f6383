use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A production order. Missing or empty attribute values are treated as "".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    #[serde(default)]
    pub original_index: usize,
    #[serde(default)]
    pub values: BTreeMap<String, String>,
}

impl Order {
    pub fn new<I, K, V>(id: impl Into<String>, original_index: usize, values: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            id: id.into(),
            original_index,
            values: values
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    #[inline]
    pub fn value(&self, column: &str) -> &str {
        self.values.get(column).map(String::as_str).unwrap_or("")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributeConfig {
    pub column: String,
    /// Flat minutes charged when the value changes and no matrix entry applies.
    pub changeover_time: f64,
    /// Attributes sharing a group are changed over concurrently.
    /// `None` puts the attribute in a group of its own.
    #[serde(default)]
    pub parallel_group: Option<String>,
}

impl AttributeConfig {
    pub fn new(column: impl Into<String>, changeover_time: f64) -> Self {
        Self {
            column: column.into(),
            changeover_time,
            parallel_group: None,
        }
    }

    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.parallel_group = Some(group.into());
        self
    }

    /// Configured time with negative and non-finite values clamped to 0.
    #[inline]
    pub fn effective_time(&self) -> f64 {
        clamp_minutes(self.changeover_time)
    }
}

#[inline]
pub(crate) fn clamp_minutes(minutes: f64) -> f64 {
    if minutes.is_finite() && minutes > 0.0 {
        minutes
    } else {
        0.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizedOrder {
    #[serde(flatten)]
    pub order: Order,
    /// 1-based position in the final sequence.
    pub sequence_number: usize,
    pub work_time: f64,
    pub downtime: f64,
    pub changeover_reasons: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributeStat {
    pub column: String,
    pub changeover_count: usize,
    pub total_time: f64,
    pub parallel_group: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizationResult {
    pub sequence: Vec<OptimizedOrder>,

    pub total_before: f64,
    pub total_after: f64,
    pub savings: f64,
    pub savings_percent: f64,

    pub total_downtime_before: f64,
    pub total_downtime_after: f64,
    pub downtime_savings: f64,
    pub downtime_savings_percent: f64,

    pub attribute_stats: Vec<AttributeStat>,
}

impl OptimizationResult {
    pub fn order_ids(&self) -> Vec<&str> {
        self.sequence.iter().map(|o| o.order.id.as_str()).collect()
    }

    pub fn stat(&self, column: &str) -> Option<&AttributeStat> {
        self.attribute_stats.iter().find(|s| s.column == column)
    }
}

/// `savings / before * 100`, or 0 when nothing was spent before.
#[inline]
pub(crate) fn percent_of(savings: f64, before: f64) -> f64 {
    if before > 0.0 {
        savings / before * 100.0
    } else {
        0.0
    }
}
