//! Privilege tiers: regular users, half-ops and ops.

use std::collections::{BTreeSet, HashSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CommandError;

/// Privilege tier, ordered `None < HalfOp < Op`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Tier {
    #[default]
    None,
    HalfOp,
    Op,
}

impl Tier {
    /// Weight of this tier's vote in a kickvote.
    pub fn kick_influence(self) -> u32 {
        match self {
            Tier::Op => 3,
            Tier::HalfOp => 2,
            Tier::None => 1,
        }
    }

    /// Maximum number of points a user of this tier may give at once.
    pub fn points_cap(self) -> i64 {
        match self {
            Tier::Op => 1000,
            Tier::HalfOp => 500,
            Tier::None => 1,
        }
    }

    /// e.g. "an op", for notices.
    pub fn with_article(self) -> &'static str {
        match self {
            Tier::Op => "an op",
            Tier::HalfOp => "a half-op",
            Tier::None => "a user",
        }
    }

    /// Prefix used by `!list`.
    pub fn marker(self) -> &'static str {
        match self {
            Tier::Op => "@",
            Tier::HalfOp => "%",
            Tier::None => "",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Tier::None => "user",
            Tier::HalfOp => "half-op",
            Tier::Op => "op",
        };
        f.write_str(name)
    }
}

/// Op and half-op membership. Names are stored lowercased.
#[derive(Debug, Default)]
pub struct PrivilegeModel {
    ops: HashSet<String>,
    hops: BTreeSet<String>,
}

impl PrivilegeModel {
    /// Highest tier held by `user`.
    pub fn tier_of(&self, user: &str) -> Tier {
        let user = user.to_lowercase();
        if self.ops.contains(&user) {
            Tier::Op
        } else if self.hops.contains(&user) {
            Tier::HalfOp
        } else {
            Tier::None
        }
    }

    /// Check that `user` holds at least `required` for `command`.
    pub fn authorize(&self, user: &str, required: Tier, command: &str) -> Result<(), CommandError> {
        if self.tier_of(user) >= required {
            Ok(())
        } else {
            Err(CommandError::PermissionDenied {
                user: user.to_string(),
                required,
                command: command.to_string(),
            })
        }
    }

    /// Grant op, e.g. on an `Opping` console line.
    pub fn add_op(&mut self, user: &str) {
        self.ops.insert(user.to_lowercase());
    }

    pub fn remove_op(&mut self, user: &str) {
        self.ops.remove(&user.to_lowercase());
    }

    /// Returns false if the user was already a half-op.
    pub fn add_hop(&mut self, user: &str) -> bool {
        self.hops.insert(user.to_lowercase())
    }

    pub fn remove_hop(&mut self, user: &str) -> bool {
        self.hops.remove(&user.to_lowercase())
    }

    /// Half-op names, lowercased.
    pub fn hops(&self) -> &BTreeSet<String> {
        &self.hops
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model() -> PrivilegeModel {
        let mut pm = PrivilegeModel::default();
        pm.add_op("basicxman");
        pm.add_hop("Mike_N_7");
        pm
    }

    #[test]
    fn tiers_are_ordered() {
        assert!(Tier::None < Tier::HalfOp);
        assert!(Tier::HalfOp < Tier::Op);
    }

    #[test]
    fn tier_lookup_ignores_case() {
        let pm = model();
        assert_eq!(pm.tier_of("BasicXman"), Tier::Op);
        assert_eq!(pm.tier_of("mike_n_7"), Tier::HalfOp);
        assert_eq!(pm.tier_of("blizzard4U"), Tier::None);
    }

    #[test]
    fn op_outranks_half_op_set() {
        let mut pm = model();
        pm.add_hop("basicxman");
        assert_eq!(pm.tier_of("basicxman"), Tier::Op);
    }

    #[test]
    fn authorize_checks_minimum_tier() {
        let pm = model();
        assert!(pm.authorize("mike_n_7", Tier::HalfOp, "give").is_ok());
        assert!(pm.authorize("basicxman", Tier::HalfOp, "give").is_ok());
        assert!(pm.authorize("mike_n_7", Tier::Op, "morning").is_err());
        assert!(pm.authorize("anyone", Tier::None, "list").is_ok());
    }

    #[test]
    fn hop_and_dehop() {
        let mut pm = model();
        assert!(pm.add_hop("Blizzard4U"));
        assert!(!pm.add_hop("blizzard4u"));
        assert_eq!(pm.tier_of("blizzard4U"), Tier::HalfOp);
        assert!(pm.remove_hop("BLIZZARD4U"));
        assert_eq!(pm.tier_of("blizzard4U"), Tier::None);
    }

    #[test]
    fn op_events_update_membership() {
        let mut pm = model();
        pm.add_op("Ian_zers");
        assert_eq!(pm.tier_of("ian_zers"), Tier::Op);
        pm.remove_op("basicxman");
        assert_eq!(pm.tier_of("basicxman"), Tier::None);
    }

    #[test]
    fn cap_and_influence_per_tier() {
        assert_eq!(Tier::Op.points_cap(), 1000);
        assert_eq!(Tier::HalfOp.points_cap(), 500);
        assert_eq!(Tier::None.points_cap(), 1);
        assert_eq!(
            Tier::Op.kick_influence() + Tier::HalfOp.kick_influence() + Tier::None.kick_influence(),
            6
        );
    }
}
