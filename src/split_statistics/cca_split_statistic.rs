use crate::core::NodeSample;
use crate::linalg::CanonicalCorrelation;
use crate::split_statistics::{SplitStatistic, SplitStatisticError};
use log::debug;
use ndarray::{Array2, ArrayView2, Axis, s};

/// How the feature block of a node splits into an `X` part and a `Y` part.
///
/// The last feature row carries `dim_x` in its first entry. Rows
/// `0..dim_x` are `X` and the `dim_y` rows after them are `Y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CcaLayout {
    pub dim_x: usize,
    pub dim_y: usize,
}

impl CcaLayout {
    /// Reads the layout from a `feature_count x n` block. `None` when either
    /// part would be empty or `dim_x` does not fit in the block.
    pub fn decode(features: &ArrayView2<'_, f64>) -> Option<Self> {
        let (feature_count, n) = features.dim();
        if feature_count == 0 || n == 0 {
            return None;
        }
        let encoded = features[[feature_count - 1, 0]].trunc();
        if !encoded.is_finite() || encoded < 1.0 || encoded >= feature_count as f64 {
            return None;
        }
        let dim_x = encoded as usize;
        let dim_y = feature_count.checked_sub(dim_x + 1)?;
        (dim_y > 0).then_some(Self { dim_x, dim_y })
    }

    /// Observations each daughter needs beyond this count.
    pub fn width(&self) -> usize {
        self.dim_x.saturating_add(self.dim_y)
    }
}

/// `sqrt(nLeft * nRight) * |rhoLeft - rhoRight|`, where `rho` is the leading
/// canonical correlation between the `X` and `Y` feature blocks within a
/// daughter.
#[derive(Debug, Default, Clone, Copy)]
pub struct CcaSplitStatistic {
    correlation: CanonicalCorrelation,
}

impl CcaSplitStatistic {
    pub fn new(correlation: CanonicalCorrelation) -> Self {
        Self { correlation }
    }

    pub fn correlation(&self) -> &CanonicalCorrelation {
        &self.correlation
    }

    fn side_correlation(
        &self,
        features: &ArrayView2<'_, f64>,
        layout: CcaLayout,
        rows: &[usize],
    ) -> Result<f64, SplitStatisticError> {
        let side = features.select(Axis(1), rows);
        let x: Array2<f64> = side.slice(s![..layout.dim_x, ..]).t().to_owned();
        let y: Array2<f64> = side.slice(s![layout.dim_x..layout.width(), ..]).t().to_owned();
        Ok(self.correlation.leading(&x, &y)?)
    }
}

impl SplitStatistic for CcaSplitStatistic {
    fn name(&self) -> &'static str {
        "canonical-correlation"
    }

    fn compute(&self, sample: &NodeSample<'_>) -> Result<f64, SplitStatisticError> {
        let features = sample.features()?;
        let Some(layout) = CcaLayout::decode(&features) else {
            debug!("cca split skipped: feature block {:?} encodes no X/Y layout", features.dim());
            return Ok(0.0);
        };

        let (left, right): (Vec<usize>, Vec<usize>) =
            (0..sample.len()).partition(|&i| sample.membership()[i].is_left());
        if left.len() <= layout.width() || right.len() <= layout.width() {
            debug!(
                "cca split skipped: daughters {}/{} need more than {} observations",
                left.len(),
                right.len(),
                layout.width()
            );
            return Ok(0.0);
        }

        let rho_left = self.side_correlation(&features, layout, &left)?;
        let rho_right = self.side_correlation(&features, layout, &right)?;
        Ok(((left.len() * right.len()) as f64).sqrt() * (rho_left - rho_right).abs())
    }
}
