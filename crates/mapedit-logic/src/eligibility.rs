//! Teleport eligibility — the combined gate consulted on every trigger.
//!
//! All of the following must hold for an attempt to proceed:
//!
//! | Rule | Denial |
//! |------|--------|
//! | The node's target index binds at least one live node | `NoReachableTargets` |
//! | No world event matching the node's lock mask is active | `LockedByEvent` |
//! | The node's cooldown has expired | `CoolingDown` |
//! | The entity's category is in the node's teleport flags | `CategoryBlocked` |
//! | A player's role is on the node's allowlist | `RoleNotAllowed` |
//!
//! An empty role allowlist rejects every player — it does not mean "any".

use serde::{Deserialize, Serialize};

use crate::entity::EntityCategory;

/// One teleport attempt, flattened to plain data.
#[derive(Debug, Clone)]
pub struct EligibilityRequest<'a> {
    /// Whether the node's target index currently binds at least one live node.
    pub has_reachable_target: bool,
    /// The node's lock mask (see [`crate::constants::lock_flags`]).
    pub lock_on_event: u8,
    /// World lock flags currently asserted.
    pub active_locks: u8,
    /// Current sim-clock time in seconds.
    pub now: f64,
    /// Earliest time the node may be used again.
    pub next_time_use: f64,
    /// Category of the entity in the trigger volume.
    pub category: EntityCategory,
    /// Entity categories the node accepts (bit mask).
    pub teleport_flags: u8,
    /// The player's role, when the entity is a player.
    pub player_role: Option<&'a str>,
    /// Roles admitted by the node.
    pub allowed_roles: &'a [String],
}

/// Result of an eligibility check.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EligibilityResult {
    /// Whether the teleport may proceed.
    pub allowed: bool,
    /// Reason for denial (if denied).
    pub denial: Option<DenialReason>,
}

impl EligibilityResult {
    fn denied(reason: DenialReason) -> Self {
        Self {
            allowed: false,
            denial: Some(reason),
        }
    }
}

/// Why a teleport attempt was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DenialReason {
    /// No configured target currently resolves to a live node.
    NoReachableTargets,
    /// A world event matching the node's lock mask is active.
    LockedByEvent,
    /// The node was used too recently.
    CoolingDown,
    /// The entity's category is not accepted by the node.
    CategoryBlocked,
    /// The player's role is not on the node's allowlist.
    RoleNotAllowed,
}

/// Check whether a teleport attempt may proceed.
///
/// Locks are OR'd block conditions: any single bit set in both the node's
/// mask and the world state disables the node.
pub fn check_eligibility(req: &EligibilityRequest) -> EligibilityResult {
    if !req.has_reachable_target {
        return EligibilityResult::denied(DenialReason::NoReachableTargets);
    }

    if req.lock_on_event & req.active_locks != 0 {
        return EligibilityResult::denied(DenialReason::LockedByEvent);
    }

    if req.now < req.next_time_use {
        return EligibilityResult::denied(DenialReason::CoolingDown);
    }

    if req.category.flag() & req.teleport_flags == 0 {
        return EligibilityResult::denied(DenialReason::CategoryBlocked);
    }

    if req.category == EntityCategory::Player {
        let admitted = match req.player_role {
            Some(role) => req.allowed_roles.iter().any(|r| r == role),
            None => false,
        };
        if !admitted {
            return EligibilityResult::denied(DenialReason::RoleNotAllowed);
        }
    }

    EligibilityResult {
        allowed: true,
        denial: None,
    }
}
