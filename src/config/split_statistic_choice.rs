use crate::core::OutcomeFamily;
use crate::linalg::{DEFAULT_MAX_ITERATIONS, DEFAULT_TOLERANCE, SvdFallback};
use schemars::{JsonSchema, Schema, schema_for};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use strum_macros::{Display, EnumDiscriminants, EnumIter, EnumMessage, EnumString, IntoStaticStr};

fn default_max_iterations() -> usize {
    DEFAULT_MAX_ITERATIONS
}

fn default_tolerance() -> f64 {
    DEFAULT_TOLERANCE
}

/// Empty parameter object for statistics without settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema, Default)]
pub struct NoParams {}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CcaParams {
    #[serde(default)]
    #[schemars(
        title = "SVD fallback",
        description = "Recovery used when the singular value decomposition does not converge"
    )]
    pub fallback: SvdFallback,

    #[serde(default = "default_max_iterations")]
    #[schemars(
        title = "Power iterations",
        description = "Iteration budget of the power-iteration fallback",
        range(min = 1),
        default = "default_max_iterations"
    )]
    pub max_iterations: usize,

    #[serde(default = "default_tolerance")]
    #[schemars(
        title = "Power-iteration tolerance",
        description = "Relative change of the eigenvalue estimate that ends the iteration",
        default = "default_tolerance"
    )]
    pub tolerance: f64,
}

impl Default for CcaParams {
    fn default() -> Self {
        Self {
            fallback: SvdFallback::default(),
            max_iterations: default_max_iterations(),
            tolerance: default_tolerance(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema, EnumDiscriminants)]
#[serde(tag = "type", content = "params", rename_all = "kebab-case")]
#[strum_discriminants(name(StatisticKind))]
#[strum_discriminants(derive(EnumIter, EnumString, Display, IntoStaticStr, EnumMessage))]
#[strum_discriminants(strum(serialize_all = "kebab-case"))]
pub enum SplitStatisticChoice {
    #[strum_discriminants(strum(
        message = "Class purity",
        detailed_message = "Gini-like sum of squared class counts over daughter size."
    ))]
    Classification(NoParams),

    #[strum_discriminants(strum(
        message = "Sum of squares",
        detailed_message = "Between-daughter sum of squares normalised by the node variance."
    ))]
    Regression(NoParams),

    #[strum_discriminants(strum(
        message = "Log-rank",
        detailed_message = "Two-sample log-rank test for right-censored survival."
    ))]
    LogRank(NoParams),

    #[strum_discriminants(strum(
        message = "Competing-risk log-rank",
        detailed_message = "Log-rank summed over event types with inclusive risk sets."
    ))]
    CompetingRiskLogRank(NoParams),

    #[strum_discriminants(strum(
        message = "Canonical correlation difference",
        detailed_message = "Weighted absolute difference of daughter canonical correlations."
    ))]
    CanonicalCorrelation(CcaParams),
}

impl SplitStatisticChoice {
    /// JSON Schema for the whole tagged enum.
    pub fn schema() -> Schema {
        schema_for!(SplitStatisticChoice)
    }

    pub fn kind(&self) -> StatisticKind {
        StatisticKind::from(self)
    }

    /// Default `params` JSON for a given kind.
    pub fn default_params(kind: StatisticKind) -> Result<Value, serde_json::Error> {
        match kind {
            StatisticKind::CanonicalCorrelation => serde_json::to_value(CcaParams::default()),
            StatisticKind::Classification
            | StatisticKind::Regression
            | StatisticKind::LogRank
            | StatisticKind::CompetingRiskLogRank => serde_json::to_value(NoParams::default()),
        }
    }

    /// Builds the typed enum from kind + params.
    pub fn from_parts(kind: StatisticKind, params: Value) -> Result<Self, serde_json::Error> {
        let key: &'static str = kind.into();
        serde_json::from_value(json!({ "type": key, "params": params }))
    }

    pub fn with_defaults(kind: StatisticKind) -> Result<Self, serde_json::Error> {
        Self::from_parts(kind, Self::default_params(kind)?)
    }
}

impl StatisticKind {
    /// Family the statistic is designed for.
    pub fn family(self) -> OutcomeFamily {
        match self {
            StatisticKind::Classification => OutcomeFamily::Classification,
            StatisticKind::Regression | StatisticKind::CanonicalCorrelation => {
                OutcomeFamily::Regression
            }
            StatisticKind::LogRank => OutcomeFamily::Survival,
            StatisticKind::CompetingRiskLogRank => OutcomeFamily::CompetingRisk,
        }
    }
}
