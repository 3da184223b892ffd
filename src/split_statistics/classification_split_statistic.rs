use crate::buffers::CountVector;
use crate::core::NodeSample;
use crate::split_statistics::{SplitStatistic, SplitStatisticError};
use log::debug;

/// Gini-style class purity of the two daughters:
/// `sum_p left[p]^2 / nLeft + sum_p right[p]^2 / nRight`, with `left[p]` and
/// `right[p]` the per-level counts. Responses encode levels `1..=max_level`.
#[derive(Debug, Default, Clone, Copy)]
pub struct ClassificationSplitStatistic {}

impl ClassificationSplitStatistic {
    pub fn new() -> Self {
        Self {}
    }

    /// Per-level histograms of the LEFT and RIGHT daughters; level `p` is bucket `p - 1`.
    pub fn class_counts(
        &self,
        sample: &NodeSample<'_>,
    ) -> Result<(CountVector, CountVector), SplitStatisticError> {
        let response = sample.response()?;
        let max_level = sample.max_level();
        let mut left = CountVector::zeroed(max_level);
        let mut right = CountVector::zeroed(max_level);
        for (member, &level) in sample.membership().iter().zip(response) {
            let bucket = level_bucket(level, max_level)?;
            if member.is_left() {
                left.increment(bucket);
            } else {
                right.increment(bucket);
            }
        }
        Ok((left, right))
    }
}

fn level_bucket(level: f64, max_level: usize) -> Result<usize, SplitStatisticError> {
    if !level.is_finite() || level < 1.0 || level as usize > max_level {
        return Err(SplitStatisticError::LevelOutOfRange { level, max_level });
    }
    Ok(level as usize - 1)
}

impl SplitStatistic for ClassificationSplitStatistic {
    fn name(&self) -> &'static str {
        "classification"
    }

    fn compute(&self, sample: &NodeSample<'_>) -> Result<f64, SplitStatisticError> {
        let (left, right) = self.class_counts(sample)?;
        let (left_size, right_size) = sample.side_sizes();
        if left_size == 0 || right_size == 0 {
            debug!("classification split degenerate (left={left_size}, right={right_size})");
            return Ok(0.0);
        }
        Ok(left.sum_of_squares() / left_size as f64 + right.sum_of_squares() / right_size as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Membership::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn two_level_example() {
        let membership = [Left, Left, Right, Right];
        let response = [1.0, 1.0, 1.0, 2.0];
        let sample = NodeSample::new(&membership)
            .with_response(&response, 1.25, 0.1875)
            .with_max_level(2);
        let stat = ClassificationSplitStatistic::new();

        let (left, right) = stat.class_counts(&sample).unwrap();
        assert_eq!(left.as_slice(), &[2, 0]);
        assert_eq!(right.as_slice(), &[1, 1]);
        // (4 + 0) / 2 + (1 + 1) / 2
        assert_abs_diff_eq!(stat.compute(&sample).unwrap(), 3.0, epsilon = 1e-12);
    }

    #[test]
    fn pure_daughters_beat_mixed_daughters() {
        let response = [1.0, 1.0, 2.0, 2.0];
        let stat = ClassificationSplitStatistic::new();

        let pure = [Left, Left, Right, Right];
        let mixed = [Left, Right, Left, Right];
        let pure_score = stat
            .compute(&NodeSample::new(&pure).with_response(&response, 1.5, 0.25).with_max_level(2))
            .unwrap();
        let mixed_score = stat
            .compute(&NodeSample::new(&mixed).with_response(&response, 1.5, 0.25).with_max_level(2))
            .unwrap();
        assert_abs_diff_eq!(pure_score, 4.0, epsilon = 1e-12);
        assert_abs_diff_eq!(mixed_score, 2.0, epsilon = 1e-12);
    }

    #[test]
    fn levels_outside_range_are_rejected() {
        let membership = [Left, Right];
        let stat = ClassificationSplitStatistic::new();
        for bad in [0.0, 3.0, f64::NAN] {
            let response = [1.0, bad];
            let sample = NodeSample::new(&membership)
                .with_response(&response, 0.0, 0.0)
                .with_max_level(2);
            assert!(matches!(
                stat.compute(&sample),
                Err(SplitStatisticError::LevelOutOfRange { max_level: 2, .. })
            ));
        }
    }

    #[test]
    fn empty_daughter_scores_zero() {
        let membership = [Right, Right];
        let response = [1.0, 2.0];
        let sample = NodeSample::new(&membership)
            .with_response(&response, 1.5, 0.25)
            .with_max_level(2);
        assert_eq!(ClassificationSplitStatistic::new().compute(&sample).unwrap(), 0.0);
    }
}
