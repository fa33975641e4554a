//! Serializable map-object definitions — the fields that round-trip through
//! map saves.
//!
//! These structs carry no runtime state. The live server wraps a
//! [`TeleportNodeConfig`] in its own node type; native tooling reads and
//! writes them directly.

use serde::{Deserialize, Serialize};

use crate::constants::{self, sound_id_in_range};
use crate::geometry::Vec3;

/// One weighted destination reference.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TargetRef {
    /// Object id of the destination node.
    pub id: u32,
    /// Relative selection weight. Zero disables the entry.
    pub chance: f32,
}

impl TargetRef {
    pub fn new(id: u32, chance: f32) -> Self {
        Self { id, chance }
    }
}

/// Forced look direction applied to a player on arrival.
///
/// `None` components leave the corresponding axis of the player's current
/// aim untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerRotation {
    pub x: Option<f32>,
    pub y: Option<f32>,
}

impl PlayerRotation {
    /// Whether applying this rotation would change anything at all.
    pub fn is_some(&self) -> bool {
        self.x.is_some() || self.y.is_some()
    }
}

/// Serializable definition of one teleport node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeleportNodeConfig {
    /// Unique among live teleport nodes; assigned at creation.
    pub object_id: u32,
    /// World position. Arriving entities are placed here.
    pub position: Vec3,
    /// Ordered candidate destinations.
    #[serde(default)]
    pub targets: Vec<TargetRef>,
    /// Seconds before the node can be used again after a teleport.
    pub cooldown: f32,
    /// Player roles admitted by the node. An empty list admits no player.
    #[serde(default)]
    pub allowed_roles: Vec<String>,
    /// Entity categories the node accepts (see [`constants::teleport_flags`]).
    pub teleport_flags: u8,
    /// World events that disable the node (see [`constants::lock_flags`]).
    #[serde(default)]
    pub lock_on_event: u8,
    /// Look direction forced on arriving players.
    #[serde(default)]
    pub player_rotation: PlayerRotation,
    /// Spatial sound played on use. -1 is silent; valid ids are 0-31.
    #[serde(default = "silent_sound_id")]
    pub teleport_sound_id: i32,
}

fn silent_sound_id() -> i32 {
    constants::SOUND_ID_NONE
}

impl Default for TeleportNodeConfig {
    fn default() -> Self {
        Self {
            object_id: 0,
            position: Vec3::ZERO,
            targets: Vec::new(),
            cooldown: 10.0,
            allowed_roles: Vec::new(),
            teleport_flags: constants::teleport_flags::PLAYER,
            lock_on_event: 0,
            player_rotation: PlayerRotation::default(),
            teleport_sound_id: constants::SOUND_ID_NONE,
        }
    }
}

impl TeleportNodeConfig {
    /// Check the config for values a saved map must never contain.
    ///
    /// Loaders skip nodes that fail here and keep loading the rest.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.cooldown.is_finite() || self.cooldown < 0.0 {
            return Err(ConfigError::BadCooldown(self.cooldown));
        }
        for target in &self.targets {
            if !target.chance.is_finite() || target.chance < 0.0 {
                return Err(ConfigError::BadChance {
                    target_id: target.id,
                    chance: target.chance,
                });
            }
        }
        if self.teleport_sound_id != constants::SOUND_ID_NONE
            && !sound_id_in_range(self.teleport_sound_id)
        {
            return Err(ConfigError::SoundIdOutOfRange(self.teleport_sound_id));
        }
        Ok(())
    }
}

/// Serializable placement record for a prefab schematic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchematicConfig {
    /// The schematic's name.
    pub schematic_name: String,
    #[serde(default)]
    pub position: Vec3,
    /// Euler angles in degrees.
    #[serde(default)]
    pub rotation: Vec3,
    #[serde(default = "unit_scale")]
    pub scale: Vec3,
    /// Room the spawn transform is resolved against.
    #[serde(default)]
    pub room_type: String,
}

fn unit_scale() -> Vec3 {
    Vec3::ONE
}

impl Default for SchematicConfig {
    fn default() -> Self {
        Self {
            schematic_name: "None".to_string(),
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
            room_type: String::new(),
        }
    }
}

/// Why a saved map object was rejected.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Cooldown is negative or not a number.
    BadCooldown(f32),
    /// A target carries a negative or non-finite chance.
    BadChance { target_id: u32, chance: f32 },
    /// Sound id outside -1 and 0-31.
    SoundIdOutOfRange(i32),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::BadCooldown(value) => {
                write!(f, "cooldown must be a non-negative number, got {}", value)
            }
            ConfigError::BadChance { target_id, chance } => {
                write!(
                    f,
                    "target {} has chance {}, expected a non-negative number",
                    target_id, chance
                )
            }
            ConfigError::SoundIdOutOfRange(id) => {
                write!(
                    f,
                    "the teleport sound id must be between 0 and 31 (or -1 for none), got {}",
                    id
                )
            }
        }
    }
}

impl std::error::Error for ConfigError {}
