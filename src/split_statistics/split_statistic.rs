use crate::core::NodeSample;
use crate::split_statistics::SplitStatisticError;

/// Scores one candidate split of a node; larger is better.
///
/// Implementations keep all scratch state local to [`SplitStatistic::compute`],
/// so a single instance may be shared by any number of threads.
pub trait SplitStatistic: Send + Sync {
    /// Short kebab-case name used in listings and logs.
    fn name(&self) -> &'static str;

    fn compute(&self, sample: &NodeSample<'_>) -> Result<f64, SplitStatisticError>;
}

/// A user-supplied scoring function with a name.
pub struct FnStatistic<F> {
    name: &'static str,
    function: F,
}

impl<F> FnStatistic<F>
where
    F: Fn(&NodeSample<'_>) -> Result<f64, SplitStatisticError> + Send + Sync,
{
    pub fn new(name: &'static str, function: F) -> Self {
        Self { name, function }
    }
}

impl<F> SplitStatistic for FnStatistic<F>
where
    F: Fn(&NodeSample<'_>) -> Result<f64, SplitStatisticError> + Send + Sync,
{
    fn name(&self) -> &'static str {
        self.name
    }

    fn compute(&self, sample: &NodeSample<'_>) -> Result<f64, SplitStatisticError> {
        (self.function)(sample)
    }
}
