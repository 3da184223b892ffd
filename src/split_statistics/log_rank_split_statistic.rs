use crate::core::NodeSample;
use crate::split_statistics::{SplitStatistic, SplitStatisticError};
use crate::survival::{LogRankSum, RiskSet};

/// Two-sample log-rank statistic between the LEFT daughter and the parent node.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogRankSplitStatistic {}

impl LogRankSplitStatistic {
    pub fn new() -> Self {
        Self {}
    }

    pub fn log_rank_sum(&self, sample: &NodeSample<'_>) -> Result<LogRankSum, SplitStatisticError> {
        let risk_set = RiskSet::tally(&sample.survival()?);
        let mut sum = LogRankSum::new();
        for k in 0..risk_set.buckets() {
            let parent_at_risk = risk_set.parent_at_risk().get(k);
            sum.observe(
                risk_set.left_event().get(k),
                risk_set.parent_event().get(k),
                risk_set.left_at_risk().get(k),
                parent_at_risk,
                parent_at_risk,
            );
        }
        Ok(sum)
    }
}

impl SplitStatistic for LogRankSplitStatistic {
    fn name(&self) -> &'static str {
        "log-rank"
    }

    fn compute(&self, sample: &NodeSample<'_>) -> Result<f64, SplitStatisticError> {
        Ok(self.log_rank_sum(sample)?.statistic())
    }
}
