use crate::config::{BuildError, CcaParams, SplitRuleConfig, SplitStatisticChoice};
use crate::linalg::CanonicalCorrelation;
use crate::registry::SplitRuleRegistry;
use crate::split_statistics::{
    CcaSplitStatistic, ClassificationSplitStatistic, CompetingRiskSplitStatistic,
    LogRankSplitStatistic, RegressionSplitStatistic, SplitStatistic,
};
use log::{info, warn};
use std::sync::Arc;

impl TryFrom<CcaParams> for CanonicalCorrelation {
    type Error = BuildError;

    fn try_from(parameters: CcaParams) -> Result<Self, Self::Error> {
        if parameters.max_iterations == 0 {
            return Err(BuildError::InvalidParameter(
                "max_iterations must be at least 1".into(),
            ));
        }
        if !(parameters.tolerance.is_finite() && parameters.tolerance > 0.0) {
            return Err(BuildError::InvalidParameter(format!(
                "tolerance must be finite and positive, got {}",
                parameters.tolerance
            )));
        }
        Ok(CanonicalCorrelation {
            fallback: parameters.fallback,
            max_iterations: parameters.max_iterations,
            tolerance: parameters.tolerance,
        })
    }
}

pub fn build_statistic(choice: SplitStatisticChoice) -> Result<Arc<dyn SplitStatistic>, BuildError> {
    match choice {
        SplitStatisticChoice::Classification(_) => Ok(Arc::new(ClassificationSplitStatistic::new())),
        SplitStatisticChoice::Regression(_) => Ok(Arc::new(RegressionSplitStatistic::new())),
        SplitStatisticChoice::LogRank(_) => Ok(Arc::new(LogRankSplitStatistic::new())),
        SplitStatisticChoice::CompetingRiskLogRank(_) => {
            Ok(Arc::new(CompetingRiskSplitStatistic::new()))
        }
        SplitStatisticChoice::CanonicalCorrelation(p) => Ok(Arc::new(CcaSplitStatistic::new(
            CanonicalCorrelation::try_from(p)?,
        ))),
    }
}

/// Registers every binding of `config` into an empty table.
pub fn build_registry(config: &SplitRuleConfig) -> Result<SplitRuleRegistry, BuildError> {
    let mut registry = SplitRuleRegistry::new();
    for binding in &config.rules {
        let kind = binding.statistic.kind();
        if kind.family() != binding.family {
            warn!(
                "{kind} is meant for {} outcomes but is registered under {}",
                kind.family(),
                binding.family
            );
        }
        let statistic = build_statistic(binding.statistic.clone())?;
        registry.register(binding.family, binding.slot, statistic)?;
    }
    info!("split rule registry built with {} configured rules", registry.len());
    Ok(registry)
}
