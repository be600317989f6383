use crate::cost::{CostModel, PairCost};
use crate::model::{percent_of, AttributeStat, OptimizationResult, OptimizedOrder, Order};

/// Builds the result for a final ordering, measured against the original one.
///
/// Both slices hold indices into `orders` (the same indices the cost model was
/// built over). The final sequence is walked once: each transition's breakdown
/// feeds the order's own costs and the per-attribute counters.
pub fn aggregate(
    model: &CostModel,
    orders: &[Order],
    original: &[usize],
    final_sequence: &[usize],
) -> OptimizationResult {
    debug_assert_eq!(original.len(), final_sequence.len());

    let before = model.sequence_cost(original);

    let mut attribute_stats: Vec<AttributeStat> = model
        .attributes
        .iter()
        .map(|attr| AttributeStat {
            column: attr.column.clone(),
            changeover_count: 0,
            total_time: 0.0,
            parallel_group: attr.parallel_group.clone(),
        })
        .collect();

    let mut after = PairCost::ZERO;
    let mut sequence = Vec::with_capacity(final_sequence.len());

    for (pos, &idx) in final_sequence.iter().enumerate() {
        let (cost, reasons) = if pos == 0 {
            (PairCost::ZERO, Vec::new())
        } else {
            let t = model.transition(final_sequence[pos - 1], idx);
            let mut reasons = Vec::with_capacity(t.changes.len());
            for change in &t.changes {
                let stat = &mut attribute_stats[change.attribute];
                stat.changeover_count += 1;
                stat.total_time += change.cost;
                reasons.push(stat.column.clone());
            }
            (t.cost, reasons)
        };
        after += cost;

        sequence.push(OptimizedOrder {
            order: orders[idx].clone(),
            sequence_number: pos + 1,
            work_time: cost.work_time,
            downtime: cost.downtime,
            changeover_reasons: reasons,
        });
    }

    let savings = before.work_time - after.work_time;
    let downtime_savings = before.downtime - after.downtime;

    OptimizationResult {
        sequence,
        total_before: before.work_time,
        total_after: after.work_time,
        savings,
        savings_percent: percent_of(savings, before.work_time),
        total_downtime_before: before.downtime,
        total_downtime_after: after.downtime,
        downtime_savings,
        downtime_savings_percent: percent_of(downtime_savings, before.downtime),
        attribute_stats,
    }
}
