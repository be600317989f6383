use std::ops::{Add, AddAssign, Sub};

/// Both aggregates of one transition (or a sum of transitions).
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct PairCost {
    /// Serial labor minutes: every differing attribute counted.
    pub work_time: f64,
    /// Line idle minutes: slowest differing attribute per parallel group.
    pub downtime: f64,
}

impl PairCost {
    pub const ZERO: PairCost = PairCost {
        work_time: 0.0,
        downtime: 0.0,
    };
}

impl Add for PairCost {
    type Output = PairCost;

    fn add(self, rhs: PairCost) -> PairCost {
        PairCost {
            work_time: self.work_time + rhs.work_time,
            downtime: self.downtime + rhs.downtime,
        }
    }
}

impl AddAssign for PairCost {
    fn add_assign(&mut self, rhs: PairCost) {
        self.work_time += rhs.work_time;
        self.downtime += rhs.downtime;
    }
}

impl Sub for PairCost {
    type Output = PairCost;

    fn sub(self, rhs: PairCost) -> PairCost {
        PairCost {
            work_time: self.work_time - rhs.work_time,
            downtime: self.downtime - rhs.downtime,
        }
    }
}

impl std::iter::Sum for PairCost {
    fn sum<I: Iterator<Item = PairCost>>(iter: I) -> Self {
        iter.fold(PairCost::ZERO, |acc, c| acc + c)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttributeChange {
    /// Index into the configured attribute list.
    pub attribute: usize,
    pub cost: f64,
}

/// Full breakdown of a transition, used for reporting.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Transition {
    pub cost: PairCost,
    /// Differing attributes in configuration order.
    pub changes: Vec<AttributeChange>,
}

impl Transition {
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }
}
