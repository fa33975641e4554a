//! MapEdit Core - runtime for the live map-editing plugin.
//!
//! Teleport nodes, schematics, and the machinery that keeps them coherent
//! while operators edit a running session: an id-keyed node registry, a
//! debounced index-rebuild scheduler, cancellable notifications, and an ECS
//! world (via `hecs`) standing in for the host's entity state.
//!
//! # Architecture
//!
//! - **Entities**: players, pickups, and projectiles that can pass through
//!   trigger volumes. Pure data components ([`components`]).
//! - **Nodes**: placed teleporters owned by the [`registry`], keyed by
//!   object id. Cross-references are ids, never references, so a dangling
//!   lookup is a quiet miss.
//! - **Scheduler**: deferred work described as data and drained once per
//!   [`editor::MapEditor::update`] tick.
//!
//! # Example
//!
//! ```rust
//! use mapedit_core::prelude::*;
//! use mapedit_logic::config::{TargetRef, TeleportNodeConfig};
//!
//! let mut editor = MapEditor::new();
//! let a = editor.spawn_node(TeleportNodeConfig {
//!     targets: vec![TargetRef::new(0, 1.0)],
//!     ..Default::default()
//! });
//! let _b = editor.spawn_node(TeleportNodeConfig {
//!     targets: vec![TargetRef::new(a, 1.0)],
//!     ..Default::default()
//! });
//!
//! // Drain the deferred index rebuilds.
//! editor.update(0.2);
//! ```

pub mod commands;
pub mod components;
pub mod editor;
pub mod events;
pub mod node;
pub mod persistence;
pub mod registry;
pub mod scheduler;

/// Commonly used types for convenient importing
pub mod prelude {
    pub use crate::components::*;
    pub use crate::editor::{LockState, MapEditor, SoundRequest, TriggerOutcome};
    pub use crate::events::MapObjectRef;
}
