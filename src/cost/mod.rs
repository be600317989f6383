pub mod encode;
pub mod loader;
pub mod matrix;
pub mod source;
pub mod types;

use self::encode::EncodedOrders;
pub use self::matrix::{MatrixEntry, MatrixLookup};
pub use self::types::{AttributeChange, PairCost, Transition};
use crate::model::{clamp_minutes, AttributeConfig, Order};
use std::collections::HashMap;
use tracing::{debug, warn};

/// Changeover cost between any two orders of one optimization run.
///
/// Built once per run: values are encoded, flat times clamped, matrix entries
/// resolved to code pairs and attributes bucketed by parallel group. After
/// that every query is allocation-free except [`CostModel::transition`].
pub struct CostModel {
    pub attributes: Vec<AttributeConfig>,
    pub encoded: EncodedOrders,

    flat_times: Vec<f64>,
    original_index: Vec<usize>,
    // Per attribute: (from_code, to_code) -> minutes
    overrides: Vec<HashMap<(u32, u32), f64>>,
    // Attribute indices per parallel group, groups in first-appearance order
    groups: Vec<Vec<usize>>,
    group_of: Vec<usize>,
}

impl CostModel {
    pub fn new(
        orders: &[Order],
        attributes: &[AttributeConfig],
        matrix: Option<&MatrixLookup>,
    ) -> Self {
        let encoded = EncodedOrders::encode(orders, attributes);

        let flat_times: Vec<f64> = attributes
            .iter()
            .map(|attr| {
                let t = attr.effective_time();
                if t != attr.changeover_time {
                    warn!(
                        column = %attr.column,
                        configured = attr.changeover_time,
                        "Invalid changeover time clamped to 0"
                    );
                }
                t
            })
            .collect();

        let overrides = match matrix {
            Some(m) => resolve_overrides(&encoded, attributes, m),
            None => vec![HashMap::new(); attributes.len()],
        };

        let mut groups: Vec<Vec<usize>> = Vec::new();
        let mut group_of = Vec::with_capacity(attributes.len());
        let mut named: HashMap<&str, usize> = HashMap::new();
        for (a, attr) in attributes.iter().enumerate() {
            let g = match &attr.parallel_group {
                Some(name) => *named.entry(name.as_str()).or_insert_with(|| {
                    groups.push(Vec::new());
                    groups.len() - 1
                }),
                None => {
                    groups.push(Vec::new());
                    groups.len() - 1
                }
            };
            groups[g].push(a);
            group_of.push(g);
        }

        debug!(
            orders = encoded.len(),
            attributes = attributes.len(),
            groups = groups.len(),
            values = (0..attributes.len()).map(|a| encoded.cardinality(a)).sum::<usize>(),
            overrides = overrides.iter().map(HashMap::len).sum::<usize>(),
            "Cost model ready"
        );

        Self {
            attributes: attributes.to_vec(),
            encoded,
            flat_times,
            original_index: orders.iter().map(|o| o.original_index).collect(),
            overrides,
            groups,
            group_of,
        }
    }

    pub fn order_count(&self) -> usize {
        self.encoded.len()
    }

    pub fn attribute_count(&self) -> usize {
        self.attributes.len()
    }

    /// Clamped flat time of an attribute.
    #[inline]
    pub fn flat_time(&self, attribute: usize) -> f64 {
        self.flat_times[attribute]
    }

    /// The caller-supplied `original_index` of an order.
    #[inline]
    pub fn original_index(&self, order: usize) -> usize {
        self.original_index[order]
    }

    pub fn group_of(&self, attribute: usize) -> usize {
        self.group_of[attribute]
    }

    /// True when at least two attributes share a parallel group, i.e. when
    /// downtime can differ from work time.
    pub fn has_shared_groups(&self) -> bool {
        self.groups.iter().any(|g| g.len() > 1)
    }

    /// Attribute indices by descending flat time; ties keep configuration order.
    pub fn ranked_attributes(&self) -> Vec<usize> {
        let mut ranked: Vec<usize> = (0..self.attributes.len()).collect();
        ranked.sort_by(|&x, &y| self.flat_times[y].total_cmp(&self.flat_times[x]));
        ranked
    }

    #[inline(always)]
    fn code_cost(&self, attribute: usize, from: u32, to: u32) -> f64 {
        let table = &self.overrides[attribute];
        if !table.is_empty() {
            if let Some(&minutes) = table.get(&(from, to)) {
                return minutes;
            }
        }
        self.flat_times[attribute]
    }

    /// Cost of one attribute between two orders; 0 when the values match.
    #[inline]
    pub fn attribute_cost(&self, attribute: usize, a: usize, b: usize) -> f64 {
        let from = self.encoded.code(a, attribute);
        let to = self.encoded.code(b, attribute);
        if from == to {
            0.0
        } else {
            self.code_cost(attribute, from, to)
        }
    }

    /// Work time and downtime of placing `b` directly after `a`.
    #[inline]
    pub fn pair_cost(&self, a: usize, b: usize) -> PairCost {
        let ra = self.encoded.row(a);
        let rb = self.encoded.row(b);
        let mut cost = PairCost::ZERO;

        for members in &self.groups {
            let mut slowest = 0.0f64;
            for &attr in members {
                let (from, to) = (ra[attr], rb[attr]);
                if from != to {
                    let c = self.code_cost(attr, from, to);
                    cost.work_time += c;
                    if c > slowest {
                        slowest = c;
                    }
                }
            }
            cost.downtime += slowest;
        }
        cost
    }

    /// Same totals as [`CostModel::pair_cost`] plus the per-attribute detail.
    pub fn transition(&self, a: usize, b: usize) -> Transition {
        let ra = self.encoded.row(a);
        let rb = self.encoded.row(b);
        let mut t = Transition::default();

        for members in &self.groups {
            let mut slowest = 0.0f64;
            for &attr in members {
                let (from, to) = (ra[attr], rb[attr]);
                if from != to {
                    let c = self.code_cost(attr, from, to);
                    t.cost.work_time += c;
                    if c > slowest {
                        slowest = c;
                    }
                    t.changes.push(AttributeChange {
                        attribute: attr,
                        cost: c,
                    });
                }
            }
            t.cost.downtime += slowest;
        }
        t.changes.sort_by_key(|c| c.attribute);
        t
    }

    /// Summed cost of every adjacent pair of a sequence of order indices.
    pub fn sequence_cost(&self, sequence: &[usize]) -> PairCost {
        sequence
            .windows(2)
            .map(|w| self.pair_cost(w[0], w[1]))
            .sum()
    }
}

fn resolve_overrides(
    encoded: &EncodedOrders,
    attributes: &[AttributeConfig],
    matrix: &MatrixLookup,
) -> Vec<HashMap<(u32, u32), f64>> {
    let mut overrides = Vec::with_capacity(attributes.len());
    let mut clamped = 0usize;

    for (a, attr) in attributes.iter().enumerate() {
        let mut table = HashMap::new();
        for (from, to, minutes) in matrix.transitions(&attr.column) {
            if from == to {
                continue;
            }
            // Entries for values no order carries can never apply.
            let (Some(f), Some(t)) = (encoded.code_of(a, from), encoded.code_of(a, to)) else {
                continue;
            };
            let m = clamp_minutes(minutes);
            if m != minutes {
                clamped += 1;
            }
            table.insert((f, t), m);
        }
        overrides.push(table);
    }

    if clamped > 0 {
        warn!("{} matrix entries had invalid minutes and were clamped to 0", clamped);
    }
    overrides
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_orders(a: &[(&str, &str)], b: &[(&str, &str)]) -> Vec<Order> {
        vec![
            Order::new("a", 0, a.iter().copied()),
            Order::new("b", 1, b.iter().copied()),
        ]
    }

    #[test]
    fn ranking_is_stable_on_ties() {
        let attrs = vec![
            AttributeConfig::new("A", 10.0),
            AttributeConfig::new("B", 30.0),
            AttributeConfig::new("C", 10.0),
            AttributeConfig::new("D", 30.0),
        ];
        let model = CostModel::new(&[], &attrs, None);
        assert_eq!(model.ranked_attributes(), vec![1, 3, 0, 2]);
    }

    #[test]
    fn transition_matches_pair_cost() {
        let attrs = vec![
            AttributeConfig::new("Color", 30.0).with_group("A"),
            AttributeConfig::new("Size", 10.0).with_group("A"),
            AttributeConfig::new("Tool", 5.0),
        ];
        let orders = two_orders(
            &[("Color", "Red"), ("Size", "S"), ("Tool", "T1")],
            &[("Color", "Blue"), ("Size", "M"), ("Tool", "T2")],
        );
        let model = CostModel::new(&orders, &attrs, None);
        let t = model.transition(0, 1);
        assert_eq!(t.cost, model.pair_cost(0, 1));
        assert_eq!(t.cost.work_time, 45.0);
        assert_eq!(t.cost.downtime, 35.0);
        let order: Vec<usize> = t.changes.iter().map(|c| c.attribute).collect();
        assert_eq!(order, vec![0, 1, 2]);
    }

    #[test]
    fn matrix_for_unseen_values_is_ignored() {
        let attrs = vec![AttributeConfig::new("Material", 15.0)];
        let mut m = MatrixLookup::new();
        m.insert("Material", "Gold", "Steel", 1.0);
        let orders = two_orders(&[("Material", "Steel")], &[("Material", "Gold")]);
        let model = CostModel::new(&orders, &attrs, Some(&m));
        // Only Gold -> Steel is in the matrix; Steel -> Gold is flat.
        assert_eq!(model.pair_cost(0, 1).work_time, 15.0);
        assert_eq!(model.pair_cost(1, 0).work_time, 1.0);
    }
}
