use crate::cost::CostModel;
use crate::model::{AttributeConfig, OptimizationResult, Order};
use crate::optimizer::{OptimizeOptions, Optimizer};
use crate::stats;
use tracing::info;

pub use crate::job::{validate_input, ValidationReport};

/// Reorders `orders` to minimize changeover cost.
///
/// Never fails: invalid times are clamped, missing matrix entries fall back
/// to flat times, missing values read as empty and degenerate input (no
/// orders, one order, no attributes) yields a zeroed result. The same input
/// always produces the same output.
pub fn optimize(
    orders: &[Order],
    attributes: &[AttributeConfig],
    options: &OptimizeOptions,
) -> OptimizationResult {
    let model = CostModel::new(orders, attributes, options.effective_matrix());
    let original: Vec<usize> = (0..orders.len()).collect();

    let outcome = Optimizer::new(&model, options).run();
    let result = stats::aggregate(&model, orders, &original, &outcome.sequence);

    info!(
        orders = orders.len(),
        objective = %outcome.objective,
        source = %outcome.source,
        rounds = outcome.rounds,
        passes = outcome.stats.passes,
        swaps = outcome.stats.swaps,
        converged = outcome.stats.converged,
        "Optimized: work {:.1} -> {:.1}, downtime {:.1} -> {:.1}",
        result.total_before,
        result.total_after,
        result.total_downtime_before,
        result.total_downtime_after
    );

    result
}

/// Statistics for `orders` exactly as given, without reordering.
pub fn evaluate(
    orders: &[Order],
    attributes: &[AttributeConfig],
    options: &OptimizeOptions,
) -> OptimizationResult {
    let model = CostModel::new(orders, attributes, options.effective_matrix());
    let identity: Vec<usize> = (0..orders.len()).collect();
    stats::aggregate(&model, orders, &identity, &identity)
}
