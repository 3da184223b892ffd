use crate::config::{BuildError, CcaParams, NoParams, SplitStatisticChoice};
use crate::core::OutcomeFamily;
use schemars::{JsonSchema, Schema, schema_for};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// One `(family, slot) -> statistic` entry of the registration table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SplitRuleBinding {
    #[schemars(title = "Family", description = "Outcome family the rule is registered under")]
    pub family: OutcomeFamily,

    #[schemars(
        title = "Slot",
        description = "Slot within the family; rule name customN selects slot N",
        range(min = 1, max = 16)
    )]
    pub slot: usize,

    #[schemars(title = "Statistic")]
    pub statistic: SplitStatisticChoice,
}

/// The split rules to register, in order; later bindings replace earlier ones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema, Default)]
pub struct SplitRuleConfig {
    #[serde(default)]
    pub rules: Vec<SplitRuleBinding>,
}

impl SplitRuleConfig {
    /// Mirrors [`SplitRuleRegistry::with_builtin_rules`](crate::registry::SplitRuleRegistry::with_builtin_rules).
    pub fn builtin() -> Self {
        let bind = |family, slot, statistic| SplitRuleBinding {
            family,
            slot,
            statistic,
        };
        Self {
            rules: vec![
                bind(
                    OutcomeFamily::Classification,
                    1,
                    SplitStatisticChoice::Classification(NoParams {}),
                ),
                bind(
                    OutcomeFamily::Regression,
                    1,
                    SplitStatisticChoice::Regression(NoParams {}),
                ),
                bind(
                    OutcomeFamily::Survival,
                    1,
                    SplitStatisticChoice::LogRank(NoParams {}),
                ),
                bind(
                    OutcomeFamily::CompetingRisk,
                    1,
                    SplitStatisticChoice::CompetingRiskLogRank(NoParams {}),
                ),
                bind(
                    OutcomeFamily::Regression,
                    2,
                    SplitStatisticChoice::CanonicalCorrelation(CcaParams::default()),
                ),
            ],
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self, BuildError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, BuildError> {
        Self::from_json_str(&fs::read_to_string(path)?)
    }

    pub fn to_json_string(&self) -> Result<String, BuildError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn json_schema() -> Schema {
        schema_for!(SplitRuleConfig)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::linalg::SvdFallback;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn builtin_round_trips_through_json() {
        let config = SplitRuleConfig::builtin();
        let json = config.to_json_string().unwrap();
        assert_eq!(SplitRuleConfig::from_json_str(&json).unwrap(), config);
    }

    #[test]
    fn loads_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "rules": [
                    {{ "family": "survival", "slot": 3, "statistic": {{ "type": "log-rank", "params": {{}} }} }},
                    {{ "family": "regression", "slot": 2,
                       "statistic": {{ "type": "canonical-correlation", "params": {{ "fallback": "zero", "max_iterations": 50 }} }} }}
                ]
            }}"#
        )
        .unwrap();

        let config = SplitRuleConfig::from_path(file.path()).unwrap();
        assert_eq!(config.rules.len(), 2);
        assert_eq!(config.rules[0].family, OutcomeFamily::Survival);
        assert_eq!(config.rules[0].slot, 3);
        match &config.rules[1].statistic {
            SplitStatisticChoice::CanonicalCorrelation(params) => {
                assert_eq!(params.fallback, SvdFallback::Zero);
                assert_eq!(params.max_iterations, 50);
            }
            other => panic!("unexpected statistic {other:?}"),
        }
    }

    #[test]
    fn empty_object_is_an_empty_config() {
        assert_eq!(SplitRuleConfig::from_json_str("{}").unwrap(), SplitRuleConfig::default());
    }

    #[test]
    fn malformed_json_and_missing_files_are_reported() {
        assert!(matches!(
            SplitRuleConfig::from_json_str(r#"{ "rules": [ { "family": "botany" } ] }"#),
            Err(BuildError::Json(_))
        ));
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            SplitRuleConfig::from_path(dir.path().join("absent.json")),
            Err(BuildError::Io(_))
        ));
    }

    #[test]
    fn schema_describes_bindings() {
        let schema = serde_json::to_string(&SplitRuleConfig::json_schema()).unwrap();
        assert!(schema.contains("\"rules\""));
        assert!(schema.contains("competing-risk"));
    }
}
