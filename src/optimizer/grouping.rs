use crate::cost::CostModel;
use std::collections::HashMap;

/// Initial ordering by hierarchical grouping.
///
/// Orders are partitioned by the most expensive attribute first, buckets kept
/// in the order their value first appears, then each bucket is partitioned by
/// the next attribute in the ranking. Terminal buckets are ordered by
/// `original_index`; equal indices keep their position in `sequence`.
pub fn group_by_priority(model: &CostModel, sequence: &[usize]) -> Vec<usize> {
    let ranked = model.ranked_attributes();
    let mut out = Vec::with_capacity(sequence.len());
    partition(model, &ranked, sequence.to_vec(), 0, &mut out);
    out
}

fn partition(
    model: &CostModel,
    ranked: &[usize],
    items: Vec<usize>,
    depth: usize,
    out: &mut Vec<usize>,
) {
    if depth >= ranked.len() || items.len() <= 1 {
        let mut items = items;
        items.sort_by_key(|&idx| model.original_index(idx));
        out.extend(items);
        return;
    }

    for bucket in split_by_value(model, ranked[depth], items) {
        partition(model, ranked, bucket, depth + 1, out);
    }
}

/// Stable split of `items` by their code for `attribute`, buckets in
/// first-appearance order.
pub fn split_by_value(model: &CostModel, attribute: usize, items: Vec<usize>) -> Vec<Vec<usize>> {
    let mut slot_of: HashMap<u32, usize> = HashMap::new();
    let mut buckets: Vec<Vec<usize>> = Vec::new();

    for idx in items {
        let code = model.encoded.code(idx, attribute);
        let slot = *slot_of.entry(code).or_insert_with(|| {
            buckets.push(Vec::new());
            buckets.len() - 1
        });
        buckets[slot].push(idx);
    }
    buckets
}
