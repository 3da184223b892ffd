mod error;
mod split_rule;
mod split_rule_registry;

pub use error::RegistryError;
pub use split_rule::SplitRule;
pub use split_rule_registry::{MAX_SLOTS, SplitRuleRegistry, global_registry};
