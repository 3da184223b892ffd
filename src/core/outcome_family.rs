use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumMessage, EnumString, IntoStaticStr};

/// Outcome family a split statistic is registered under.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    JsonSchema,
    Display,
    EnumIter,
    EnumString,
    IntoStaticStr,
    EnumMessage,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum OutcomeFamily {
    #[strum(message = "Classification", detailed_message = "Factor responses.")]
    Classification,
    #[strum(message = "Regression", detailed_message = "Real-valued responses.")]
    Regression,
    #[strum(
        message = "Survival",
        detailed_message = "Right-censored time-to-event responses."
    )]
    Survival,
    #[strum(
        message = "Competing risk",
        detailed_message = "Time-to-event responses with several event types."
    )]
    CompetingRisk,
}

impl OutcomeFamily {
    pub const COUNT: usize = 4;

    /// Row of this family in the registration table.
    #[inline]
    pub fn index(self) -> usize {
        match self {
            OutcomeFamily::Classification => 0,
            OutcomeFamily::Regression => 1,
            OutcomeFamily::Survival => 2,
            OutcomeFamily::CompetingRisk => 3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::{EnumMessage, IntoEnumIterator};

    #[test]
    fn indices_are_dense_and_unique() {
        let mut seen: Vec<usize> = OutcomeFamily::iter().map(OutcomeFamily::index).collect();
        seen.sort_unstable();
        assert_eq!(seen, (0..OutcomeFamily::COUNT).collect::<Vec<_>>());
    }

    #[test]
    fn names_round_trip() {
        for family in OutcomeFamily::iter() {
            let name: &'static str = family.into();
            assert_eq!(OutcomeFamily::from_str(name).unwrap(), family);
        }
        assert_eq!(OutcomeFamily::CompetingRisk.to_string(), "competing-risk");
    }

    #[test]
    fn messages_available() {
        assert_eq!(
            OutcomeFamily::Survival.get_message(),
            Some("Survival")
        );
        assert!(OutcomeFamily::Regression.get_detailed_message().is_some());
    }
}
