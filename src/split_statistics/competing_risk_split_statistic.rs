use crate::core::NodeSample;
use crate::split_statistics::{SplitStatistic, SplitStatisticError};
use crate::survival::{CompetingRiskSet, LogRankSum};

/// Log-rank statistic summed over event types, each type compared against
/// its inclusive risk set (individuals who already failed from a competing
/// cause stay at risk).
#[derive(Debug, Default, Clone, Copy)]
pub struct CompetingRiskSplitStatistic {}

impl CompetingRiskSplitStatistic {
    pub fn new() -> Self {
        Self {}
    }

    pub fn log_rank_sum(&self, sample: &NodeSample<'_>) -> Result<LogRankSum, SplitStatisticError> {
        let risk_sets = CompetingRiskSet::tally(&sample.survival()?, sample.event_type_size())?;
        let plain = risk_sets.risk_set();
        let mut sum = LogRankSum::new();
        for j in 0..risk_sets.event_type_size() {
            for k in 0..plain.buckets() {
                sum.observe(
                    risk_sets.left_event().get(j, k),
                    risk_sets.parent_event().get(j, k),
                    risk_sets.left_inclusive_at_risk().get(j, k),
                    risk_sets.parent_inclusive_at_risk().get(j, k),
                    plain.parent_at_risk().get(k),
                );
            }
        }
        Ok(sum)
    }
}

impl SplitStatistic for CompetingRiskSplitStatistic {
    fn name(&self) -> &'static str {
        "competing-risk-log-rank"
    }

    fn compute(&self, sample: &NodeSample<'_>) -> Result<f64, SplitStatisticError> {
        Ok(self.log_rank_sum(sample)?.statistic())
    }
}
