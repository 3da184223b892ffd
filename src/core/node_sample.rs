use crate::core::membership::{Membership, side_sizes};
use crate::split_statistics::SplitStatisticError;
use ndarray::ArrayView2;

/// Borrowed view over the observations of one node under one candidate split.
///
/// Every slice is indexed by observation and must have the length of
/// `membership`. Fields that do not apply to an outcome family stay `None`;
/// the accessors report them as [`SplitStatisticError::MissingInput`].
#[derive(Debug, Clone, Copy)]
pub struct NodeSample<'a> {
    membership: &'a [Membership],
    time: Option<&'a [f64]>,
    event: Option<&'a [u32]>,
    event_times: Option<&'a [f64]>,
    event_type_size: usize,
    response: Option<&'a [f64]>,
    mean: f64,
    variance: f64,
    max_level: usize,
    features: Option<ArrayView2<'a, f64>>,
}

/// The time-to-event part of a [`NodeSample`], validated.
#[derive(Debug, Clone, Copy)]
pub struct SurvivalView<'a> {
    pub membership: &'a [Membership],
    /// Observation times, ascending.
    pub time: &'a [f64],
    /// Event type codes, `0` for censored.
    pub event: &'a [u32],
    /// Distinct event times of the node, ascending.
    pub event_times: &'a [f64],
}

impl<'a> NodeSample<'a> {
    pub fn new(membership: &'a [Membership]) -> Self {
        Self {
            membership,
            time: None,
            event: None,
            event_times: None,
            event_type_size: 1,
            response: None,
            mean: 0.0,
            variance: 0.0,
            max_level: 0,
            features: None,
        }
    }

    /// Attaches one response column with its node-level mean and variance.
    pub fn with_response(mut self, response: &'a [f64], mean: f64, variance: f64) -> Self {
        self.response = Some(response);
        self.mean = mean;
        self.variance = variance;
        self
    }

    pub fn with_max_level(mut self, max_level: usize) -> Self {
        self.max_level = max_level;
        self
    }

    pub fn with_survival(
        mut self,
        time: &'a [f64],
        event: &'a [u32],
        event_times: &'a [f64],
    ) -> Self {
        self.time = Some(time);
        self.event = Some(event);
        self.event_times = Some(event_times);
        self
    }

    pub fn with_event_type_size(mut self, event_type_size: usize) -> Self {
        self.event_type_size = event_type_size;
        self
    }

    /// Attaches the `feature_count x n` feature block.
    pub fn with_features(mut self, features: ArrayView2<'a, f64>) -> Self {
        self.features = Some(features);
        self
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.membership.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.membership.is_empty()
    }

    #[inline]
    pub fn membership(&self) -> &'a [Membership] {
        self.membership
    }

    /// `(left, right)` daughter sizes.
    pub fn side_sizes(&self) -> (usize, usize) {
        side_sizes(self.membership)
    }

    pub fn mean(&self) -> f64 {
        self.mean
    }

    pub fn variance(&self) -> f64 {
        self.variance
    }

    pub fn max_level(&self) -> usize {
        self.max_level
    }

    pub fn event_type_size(&self) -> usize {
        self.event_type_size
    }

    pub fn response(&self) -> Result<&'a [f64], SplitStatisticError> {
        let response = self
            .response
            .ok_or(SplitStatisticError::MissingInput("response"))?;
        self.check_len("response", response.len())?;
        Ok(response)
    }

    pub fn survival(&self) -> Result<SurvivalView<'a>, SplitStatisticError> {
        let time = self.time.ok_or(SplitStatisticError::MissingInput("time"))?;
        let event = self.event.ok_or(SplitStatisticError::MissingInput("event"))?;
        let event_times = self
            .event_times
            .ok_or(SplitStatisticError::MissingInput("event_times"))?;
        self.check_len("time", time.len())?;
        self.check_len("event", event.len())?;
        if !time.windows(2).all(|w| w[0] <= w[1]) {
            return Err(SplitStatisticError::Unordered("time"));
        }
        if !event_times.windows(2).all(|w| w[0] < w[1]) {
            return Err(SplitStatisticError::Unordered("event_times"));
        }
        Ok(SurvivalView {
            membership: self.membership,
            time,
            event,
            event_times,
        })
    }

    pub fn features(&self) -> Result<ArrayView2<'a, f64>, SplitStatisticError> {
        let features = self
            .features
            .ok_or(SplitStatisticError::MissingInput("features"))?;
        self.check_len("features", features.ncols())?;
        Ok(features)
    }

    fn check_len(&self, field: &'static str, found: usize) -> Result<(), SplitStatisticError> {
        if found != self.len() {
            return Err(SplitStatisticError::LengthMismatch {
                field,
                expected: self.len(),
                found,
            });
        }
        Ok(())
    }
}
