use crate::registry::RegistryError;
use crate::registry::split_rule_registry::MAX_SLOTS;
use std::fmt;
use std::str::FromStr;

const PREFIX: &str = "custom";

/// A user-facing split rule name: `custom` is slot 1, `customN` is slot `N`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SplitRule {
    slot: usize,
}

impl SplitRule {
    pub fn new(slot: usize) -> Result<Self, RegistryError> {
        if slot == 0 || slot > MAX_SLOTS {
            return Err(RegistryError::SlotOutOfRange {
                slot,
                max: MAX_SLOTS,
            });
        }
        Ok(Self { slot })
    }

    #[inline]
    pub fn slot(self) -> usize {
        self.slot
    }
}

impl Default for SplitRule {
    fn default() -> Self {
        Self { slot: 1 }
    }
}

impl FromStr for SplitRule {
    type Err = RegistryError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        let invalid = || RegistryError::InvalidRuleName(name.to_string());
        let digits = name.strip_prefix(PREFIX).ok_or_else(invalid)?;
        if digits.is_empty() {
            return Ok(Self::default());
        }
        if !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let slot = digits.parse::<usize>().map_err(|_| invalid())?;
        Self::new(slot)
    }
}

impl fmt::Display for SplitRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{PREFIX}{}", self.slot)
    }
}
