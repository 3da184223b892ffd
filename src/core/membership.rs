use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

/// Daughter assignment of one observation under a candidate split.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
    IntoStaticStr,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum Membership {
    Left,
    Right,
}

impl Membership {
    #[inline]
    pub fn is_left(self) -> bool {
        matches!(self, Membership::Left)
    }

    /// The opposite daughter.
    #[inline]
    pub fn swapped(self) -> Self {
        match self {
            Membership::Left => Membership::Right,
            Membership::Right => Membership::Left,
        }
    }
}

/// Counts of `(left, right)` members.
pub fn side_sizes(membership: &[Membership]) -> (usize, usize) {
    let left = membership.iter().filter(|m| m.is_left()).count();
    (left, membership.len() - left)
}
