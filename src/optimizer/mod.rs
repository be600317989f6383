pub mod grouping;
pub mod refine;

use self::grouping::group_by_priority;
use self::refine::{RefineStats, Refiner, IMPROVEMENT_EPSILON};
use crate::config::Config;
use crate::cost::{CostModel, MatrixLookup, PairCost};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};
use tracing::debug;

/// Which total the refiner minimizes.
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    EnumIter,
    EnumString,
    Display,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Objective {
    /// Downtime when some attributes share a parallel group, else work time.
    #[default]
    Auto,
    Downtime,
    WorkTime,
}

impl Objective {
    pub fn resolve(self, model: &CostModel) -> Objective {
        match self {
            Objective::Auto if model.has_shared_groups() => Objective::Downtime,
            Objective::Auto => Objective::WorkTime,
            other => other,
        }
    }

    #[inline(always)]
    pub fn primary(self, cost: &PairCost) -> f64 {
        match self {
            Objective::WorkTime => cost.work_time,
            Objective::Auto | Objective::Downtime => cost.downtime,
        }
    }

    #[inline(always)]
    pub fn secondary(self, cost: &PairCost) -> f64 {
        match self {
            Objective::WorkTime => cost.downtime,
            Objective::Auto | Objective::Downtime => cost.work_time,
        }
    }
}

/// Everything a single optimization call depends on besides its input.
#[derive(Debug, Clone, Default)]
pub struct OptimizeOptions {
    pub use_matrix_lookup: bool,
    /// Consulted only when `use_matrix_lookup` is set.
    pub matrix: Option<MatrixLookup>,
    /// Refinement pass cap. `None` allows one pass per order.
    pub max_passes: Option<usize>,
    pub objective: Objective,
}

impl OptimizeOptions {
    pub fn with_matrix(mut self, matrix: MatrixLookup) -> Self {
        self.use_matrix_lookup = true;
        self.matrix = Some(matrix);
        self
    }

    pub fn effective_matrix(&self) -> Option<&MatrixLookup> {
        if self.use_matrix_lookup {
            self.matrix.as_ref()
        } else {
            None
        }
    }

    pub fn pass_cap(&self, order_count: usize) -> usize {
        self.max_passes.unwrap_or(order_count).max(1)
    }

    /// Optimizer rounds: unbounded unless `max_passes` is set.
    pub fn round_cap(&self) -> usize {
        self.max_passes.map_or(usize::MAX, |p| p.max(1))
    }
}

impl From<&Config> for OptimizeOptions {
    fn from(cfg: &Config) -> Self {
        Self {
            use_matrix_lookup: cfg.search.use_matrix,
            matrix: None, // Resolved by the caller
            max_passes: cfg.search.max_passes,
            objective: cfg.search.objective,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum CandidateSource {
    Original,
    Grouped,
}

pub struct SearchOutcome {
    pub sequence: Vec<usize>,
    pub cost: PairCost,
    pub objective: Objective,
    /// Candidate that produced the last improvement.
    pub source: CandidateSource,
    /// Summed over all rounds; `converged` means a fixed point was reached.
    pub stats: RefineStats,
    pub rounds: usize,
}

pub struct Optimizer<'a> {
    model: &'a CostModel,
    options: &'a OptimizeOptions,
}

impl<'a> Optimizer<'a> {
    pub fn new(model: &'a CostModel, options: &'a OptimizeOptions) -> Self {
        Self { model, options }
    }

    /// Improves the input order in rounds until it stops moving.
    ///
    /// Each round refines the current order and a regrouped copy of it. The
    /// regrouped result wins only if it is strictly better and does not
    /// exceed the current totals; otherwise the refined order carries on.
    /// A round in which the refiner makes no swap and regrouping does not
    /// win is a fixed point: running again on the returned order gives it
    /// back unchanged. Every other round strictly improves the order, so the
    /// loop ends; an explicit `max_passes` also caps the number of rounds.
    pub fn run(&self) -> SearchOutcome {
        let n = self.model.order_count();
        let objective = self.options.objective.resolve(self.model);
        let cap = self.options.pass_cap(n);
        let round_cap = self.options.round_cap();

        let mut sequence: Vec<usize> = (0..n).collect();
        let mut cost = self.model.sequence_cost(&sequence);
        let mut source = CandidateSource::Original;
        let mut stats = RefineStats::default();
        let mut rounds = 0;

        while rounds < round_cap {
            rounds += 1;
            let grouped = group_by_priority(self.model, &sequence);

            let mut refined = Refiner::new(self.model, sequence.clone(), objective, cap);
            let refined_stats = refined.run();

            let mut regrouped = Refiner::new(self.model, grouped, objective, cap);
            let grouped_stats = regrouped.run();

            let dominates_current = regrouped.cost.work_time
                <= cost.work_time + IMPROVEMENT_EPSILON
                && regrouped.cost.downtime <= cost.downtime + IMPROVEMENT_EPSILON;
            let use_grouped =
                dominates_current && strictly_better(objective, &regrouped.cost, &refined.cost);

            stats.passes += refined_stats.passes + grouped_stats.passes;

            debug!(
                round = rounds,
                %objective,
                pass_cap = cap,
                refined_primary = objective.primary(&refined.cost),
                grouped_primary = objective.primary(&regrouped.cost),
                refined_swaps = refined_stats.swaps,
                use_grouped,
                "Candidates refined"
            );

            if use_grouped {
                stats.swaps += grouped_stats.swaps;
                source = CandidateSource::Grouped;
                cost = regrouped.cost;
                sequence = regrouped.into_sequence();
            } else if refined_stats.swaps > 0 {
                stats.swaps += refined_stats.swaps;
                source = CandidateSource::Original;
                cost = refined.cost;
                sequence = refined.into_sequence();
            } else {
                stats.converged = true;
                break;
            }
        }

        SearchOutcome {
            sequence,
            cost,
            objective,
            source,
            stats,
            rounds,
        }
    }
}

/// Lexicographic: primary objective first, the other total breaks ties.
fn strictly_better(objective: Objective, a: &PairCost, b: &PairCost) -> bool {
    let (pa, pb) = (objective.primary(a), objective.primary(b));
    if pa < pb - IMPROVEMENT_EPSILON {
        return true;
    }
    if pa > pb + IMPROVEMENT_EPSILON {
        return false;
    }
    objective.secondary(a) < objective.secondary(b) - IMPROVEMENT_EPSILON
}
