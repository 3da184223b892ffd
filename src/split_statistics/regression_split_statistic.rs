use crate::core::NodeSample;
use crate::split_statistics::{SplitStatistic, SplitStatisticError};
use log::debug;

/// Between-daughter sum of squares, normalised by the node variance:
/// `sumLeft^2 / (nLeft * var) + sumRight^2 / (nRight * var)`, where each sum
/// runs over `response - mean` within one daughter.
///
/// Scores `0.0` when either daughter is empty or the variance is not positive.
#[derive(Debug, Default, Clone, Copy)]
pub struct RegressionSplitStatistic {}

impl RegressionSplitStatistic {
    pub fn new() -> Self {
        Self {}
    }
}

impl SplitStatistic for RegressionSplitStatistic {
    fn name(&self) -> &'static str {
        "regression"
    }

    fn compute(&self, sample: &NodeSample<'_>) -> Result<f64, SplitStatisticError> {
        let response = sample.response()?;
        let mean = sample.mean();
        let variance = sample.variance();

        let mut sum_left = 0.0;
        let mut sum_right = 0.0;
        let mut left_size = 0usize;
        let mut right_size = 0usize;
        for (member, y) in sample.membership().iter().zip(response) {
            if member.is_left() {
                sum_left += y - mean;
                left_size += 1;
            } else {
                sum_right += y - mean;
                right_size += 1;
            }
        }

        if left_size == 0 || right_size == 0 || !(variance > 0.0) {
            debug!(
                "regression split degenerate (left={left_size}, right={right_size}, variance={variance})"
            );
            return Ok(0.0);
        }

        Ok(sum_left.powi(2) / (left_size as f64 * variance)
            + sum_right.powi(2) / (right_size as f64 * variance))
    }
}
