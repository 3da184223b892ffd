mod competing_risk_set;
mod log_rank;
mod risk_set;

pub use competing_risk_set::CompetingRiskSet;
pub use log_rank::{LogRankSum, NEAR_ZERO};
pub use risk_set::RiskSet;
