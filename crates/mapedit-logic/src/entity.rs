//! Entity category classification.
//!
//! The host supplies a tag and an object name for whatever entered a trigger
//! volume; everything the gate needs to know about the entity's kind is
//! derived from those two strings.

use serde::{Deserialize, Serialize};

use crate::constants::teleport_flags;

/// Kind of entity attempting to use a teleport node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityCategory {
    Player,
    Pickup,
    Projectile,
}

impl EntityCategory {
    /// The bit this category occupies in a node's teleport flags.
    pub fn flag(self) -> u8 {
        match self {
            EntityCategory::Player => teleport_flags::PLAYER,
            EntityCategory::Pickup => teleport_flags::PICKUP,
            EntityCategory::Projectile => teleport_flags::ACTIVE_PROJECTILE,
        }
    }
}

/// Classify an entity from its host-supplied tag and object name.
///
/// Tags take precedence; untagged objects fall back to name matching, with
/// projectiles checked before pickups. Anything unrecognized is `None` and
/// never teleports.
pub fn classify_entity(tag: &str, name: &str) -> Option<EntityCategory> {
    match tag {
        "Player" => Some(EntityCategory::Player),
        "Pickup" => Some(EntityCategory::Pickup),
        _ => {
            if name.contains("Projectile") {
                Some(EntityCategory::Projectile)
            } else if name.contains("Pickup") {
                Some(EntityCategory::Pickup)
            } else {
                None
            }
        }
    }
}
