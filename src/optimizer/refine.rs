use super::Objective;
use crate::cost::{CostModel, PairCost};
use tracing::debug;

/// Swaps must beat the current cost by more than this to count as strict
/// improvements; absorbs float noise so ties never trigger a swap.
pub const IMPROVEMENT_EPSILON: f64 = 1e-9;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RefineStats {
    pub passes: usize,
    pub swaps: usize,
    /// A full pass completed without any improving swap.
    pub converged: bool,
}

/// First-improvement hill climbing over adjacent transpositions.
pub struct Refiner<'a> {
    model: &'a CostModel,
    objective: Objective,
    max_passes: usize,

    pub sequence: Vec<usize>,
    pub cost: PairCost,
}

impl<'a> Refiner<'a> {
    /// `objective` must already be resolved (not [`Objective::Auto`]).
    pub fn new(
        model: &'a CostModel,
        sequence: Vec<usize>,
        objective: Objective,
        max_passes: usize,
    ) -> Self {
        let cost = model.sequence_cost(&sequence);
        Self {
            model,
            objective,
            max_passes,
            sequence,
            cost,
        }
    }

    /// Cost change of swapping positions `i` and `i + 1`.
    ///
    /// Only the transitions touching the pair change: `prev -> a`, `a -> b`
    /// and `b -> next` become `prev -> b`, `b -> a` and `a -> next`. The
    /// middle one is kept because matrix entries may be directional.
    #[inline(always)]
    pub fn calc_delta(&self, i: usize) -> PairCost {
        let s = &self.sequence;
        let a = s[i];
        let b = s[i + 1];

        let mut old = self.model.pair_cost(a, b);
        let mut new = self.model.pair_cost(b, a);

        if i > 0 {
            let prev = s[i - 1];
            old += self.model.pair_cost(prev, a);
            new += self.model.pair_cost(prev, b);
        }
        if i + 2 < s.len() {
            let next = s[i + 2];
            old += self.model.pair_cost(b, next);
            new += self.model.pair_cost(a, next);
        }

        new - old
    }

    /// Strictly lowers the objective without raising the other total.
    #[inline(always)]
    fn accepts(&self, delta: &PairCost) -> bool {
        self.objective.primary(delta) < -IMPROVEMENT_EPSILON
            && self.objective.secondary(delta) <= IMPROVEMENT_EPSILON
    }

    fn try_swap(&mut self, i: usize) -> bool {
        let delta = self.calc_delta(i);
        if self.accepts(&delta) {
            self.sequence.swap(i, i + 1);
            self.cost += delta;
            true
        } else {
            false
        }
    }

    /// Scans adjacent pairs left to right. After a swap at `i` the pair it
    /// just formed on the left, `(i - 1, i)`, is checked once before the
    /// scan moves on, which keeps a pass linear.
    pub fn run(&mut self) -> RefineStats {
        let mut stats = RefineStats::default();
        let n = self.sequence.len();
        if n < 2 {
            stats.converged = true;
            return stats;
        }

        for pass in 0..self.max_passes {
            let mut swaps = 0;
            for i in 0..n - 1 {
                if self.try_swap(i) {
                    swaps += 1;
                    if i > 0 && self.try_swap(i - 1) {
                        swaps += 1;
                    }
                }
            }

            stats.passes += 1;
            stats.swaps += swaps;
            debug!(
                pass,
                swaps,
                work_time = self.cost.work_time,
                downtime = self.cost.downtime,
                "Refinement pass"
            );

            if swaps == 0 {
                stats.converged = true;
                break;
            }
        }

        // Incremental deltas drift; re-score once at the end.
        self.cost = self.model.sequence_cost(&self.sequence);
        stats
    }

    pub fn into_sequence(self) -> Vec<usize> {
        self.sequence
    }
}
