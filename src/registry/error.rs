use crate::core::OutcomeFamily;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("slot {slot} outside 1..={max}")]
    SlotOutOfRange { slot: usize, max: usize },

    #[error("no {family} statistic registered in slot {slot}")]
    Unregistered { family: OutcomeFamily, slot: usize },

    #[error("invalid split rule name: {0:?} (expected \"custom\" or \"customN\")")]
    InvalidRuleName(String),
}
