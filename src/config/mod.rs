mod build;
mod error;
mod split_rule_config;
mod split_statistic_choice;

pub use build::{build_registry, build_statistic};
pub use error::BuildError;
pub use split_rule_config::{SplitRuleBinding, SplitRuleConfig};
pub use split_statistic_choice::{CcaParams, NoParams, SplitStatisticChoice, StatisticKind};
