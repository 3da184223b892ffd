/// Numerator and denominator magnitudes at or below this value count as zero.
pub const NEAR_ZERO: f64 = 1.0e-9;

/// Running log-rank sums: observed minus expected LEFT events, and the
/// hypergeometric variance of that difference.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LogRankSum {
    numerator: f64,
    variance: f64,
}

impl LogRankSum {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one event-time bucket.
    ///
    /// `left_at_risk`/`parent_at_risk` are the risk-set sizes used for the
    /// expected count. The variance term is only added when `variance_at_risk`
    /// (the plain parent risk set) holds at least two individuals.
    pub fn observe(
        &mut self,
        left_events: usize,
        parent_events: usize,
        left_at_risk: usize,
        parent_at_risk: usize,
        variance_at_risk: usize,
    ) {
        if parent_at_risk == 0 {
            return;
        }
        let events = parent_events as f64;
        let at_risk = parent_at_risk as f64;
        let share = left_at_risk as f64 / at_risk;

        self.numerator += left_events as f64 - events * share;
        if variance_at_risk >= 2 {
            self.variance += share * (1.0 - share) * ((at_risk - events) / (at_risk - 1.0)) * events;
        }
    }

    /// Folds another sum into this one.
    pub fn merge(&mut self, other: LogRankSum) {
        self.numerator += other.numerator;
        self.variance += other.variance;
    }

    pub fn numerator(&self) -> f64 {
        self.numerator
    }

    pub fn variance(&self) -> f64 {
        self.variance
    }

    /// `|numerator| / sqrt(variance)`.
    ///
    /// Returns `0.0` only when both parts are within [`NEAR_ZERO`]; a
    /// vanishing denominator with a non-vanishing numerator is divided through
    /// and may give a very large (or infinite) score.
    pub fn statistic(&self) -> f64 {
        let numerator = self.numerator.abs();
        let denominator = self.variance.sqrt();
        if denominator <= NEAR_ZERO && numerator <= NEAR_ZERO {
            0.0
        } else {
            numerator / denominator
        }
    }
}
