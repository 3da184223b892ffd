mod cca_split_statistic;
mod classification_split_statistic;
mod competing_risk_split_statistic;
mod error;
mod log_rank_split_statistic;
mod regression_split_statistic;
mod split_statistic;

pub use cca_split_statistic::{CcaLayout, CcaSplitStatistic};
pub use classification_split_statistic::ClassificationSplitStatistic;
pub use competing_risk_split_statistic::CompetingRiskSplitStatistic;
pub use error::SplitStatisticError;
pub use log_rank_split_statistic::LogRankSplitStatistic;
pub use regression_split_statistic::RegressionSplitStatistic;
pub use split_statistic::{FnStatistic, SplitStatistic};
