//! Runtime state of one teleport node.

use std::collections::HashMap;

use mapedit_logic::config::TeleportNodeConfig;

/// A live teleport node: its serialized definition plus runtime state.
#[derive(Debug, Clone)]
pub struct TeleportNode {
    /// Serialized definition; the part that round-trips through map saves.
    pub config: TeleportNodeConfig,
    /// Target id → object id of the live node currently bound to it.
    ///
    /// A lookup aid into the registry, not an ownership edge. Rebuilt
    /// wholesale by the registry and may briefly lag topology changes: a
    /// missing entry means "currently unreachable", never an error.
    pub target_index: HashMap<u32, u32>,
    /// Sim-clock time before which the node refuses to fire.
    pub next_time_use: f64,
}

impl TeleportNode {
    pub fn new(config: TeleportNodeConfig) -> Self {
        Self {
            config,
            target_index: HashMap::new(),
            next_time_use: 0.0,
        }
    }

    pub fn object_id(&self) -> u32 {
        self.config.object_id
    }

    /// Whether the cooldown window is still open at `now`.
    pub fn is_cooling_down(&self, now: f64) -> bool {
        now < self.next_time_use
    }

    /// Start the cooldown window from `now`.
    pub fn start_cooldown(&mut self, now: f64) {
        self.next_time_use = now + self.config.cooldown as f64;
    }

    /// Live node bound to `target_id`, if the index currently has one.
    pub fn resolve_target(&self, target_id: u32) -> Option<u32> {
        self.target_index.get(&target_id).copied()
    }
}
