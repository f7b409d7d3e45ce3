/// Water stored in the tank during one run.
///
/// Starts empty. Each hour the pumped volume is added and the hour's demand
/// withdrawn; anything above capacity spills as overflow and any shortfall
/// below zero is recorded as deficit. Neither is carried into the next hour.
#[derive(Debug, Clone)]
pub struct ReservoirState {
    /// Tank capacity in litres.
    pub capacity_l: f64,

    /// Stored volume in litres, always within `[0, capacity_l]` between steps.
    pub stored_l: f64,
}

/// Losses and shortfalls of one reservoir step.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct HourBalance {
    /// Pumped water lost because the tank was full (L).
    pub overflow_l: f64,
    /// Demand that could not be met this hour (L).
    pub deficit_l: f64,
}

impl ReservoirState {
    /// Empty tank of the given capacity.
    ///
    /// `capacity_l` must be finite and non-negative; `SimulationConfig::new`
    /// guarantees this for every engine run.
    pub fn empty(capacity_l: f64) -> Self {
        debug_assert!(capacity_l.is_finite() && capacity_l >= 0.0);
        Self {
            capacity_l,
            stored_l: 0.0,
        }
    }

    /// Adds `pumped_l`, withdraws `demand_l`, then clamps to `[0, capacity]`.
    pub fn step(&mut self, pumped_l: f64, demand_l: f64) -> HourBalance {
        self.stored_l += pumped_l;
        self.stored_l -= demand_l;

        let mut balance = HourBalance::default();
        if self.stored_l > self.capacity_l {
            balance.overflow_l = self.stored_l - self.capacity_l;
            self.stored_l = self.capacity_l;
        }
        if self.stored_l < 0.0 {
            balance.deficit_l = -self.stored_l;
            self.stored_l = 0.0;
        }
        balance
    }

    /// Fill level as a fraction of capacity (0 for a zero-capacity tank).
    pub fn fill_fraction(&self) -> f64 {
        if self.capacity_l > 0.0 {
            self.stored_l / self.capacity_l
        } else {
            0.0
        }
    }
}
