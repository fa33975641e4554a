//! Component definitions for teleportable entities.
//!
//! Components are pure data attached to entities.
//! They have no behavior - that lives on the editor runtime.

use serde::{Deserialize, Serialize};

pub use mapedit_logic::geometry::Vec3;

/// World-space location of an entity.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct Position {
    pub world: Vec3,
}

impl Position {
    pub fn new(world: Vec3) -> Self {
        Self { world }
    }
}

/// A player's synced look direction: vertical (x) and horizontal (y) degrees.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct LookDirection {
    pub x: f32,
    pub y: f32,
}

/// Host-supplied identity strings, used to classify what entered a trigger.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityInfo {
    pub tag: String,
    pub name: String,
}

impl EntityInfo {
    pub fn new(tag: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            name: name.into(),
        }
    }
}

/// Player-only state the plugin cares about.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerInfo {
    /// Current role name, matched against node allowlists.
    pub role: String,
    /// Serials of carried items.
    pub items: Vec<u16>,
}

impl PlayerInfo {
    pub fn new(role: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            items: Vec::new(),
        }
    }
}
