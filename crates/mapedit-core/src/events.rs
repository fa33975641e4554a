//! Cancellable notifications dispatched to registered listeners.
//!
//! Listeners run in registration order. Each listener sees the mutations of
//! those registered before it, and the event's final allow flag decides the
//! outcome. Dispatch is synchronous and happens before any state mutation,
//! so a veto leaves the world exactly as it was.

use hecs::Entity;
use mapedit_logic::config::PlayerRotation;
use mapedit_logic::geometry::Vec3;

/// Reference to a placed map object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapObjectRef {
    Teleport(u32),
    Schematic(u32),
}

/// A teleport about to happen. Listeners may veto it or rewrite the
/// destination, arrival rotation, or sound.
#[derive(Debug, Clone)]
pub struct TeleportingEvent {
    /// Node whose trigger volume fired.
    pub source_id: u32,
    /// Node chosen as the destination.
    pub target_id: u32,
    /// Entity being teleported.
    pub entity: Entity,
    /// Proposed destination; the target node's position unless rewritten.
    pub destination: Vec3,
    /// Proposed arrival rotation; the target node's override unless rewritten.
    pub rotation: PlayerRotation,
    /// Proposed sound id; the source node's unless rewritten.
    pub sound_id: i32,
    /// Cleared by a listener to veto the teleport.
    pub is_allowed: bool,
}

pub trait TeleportListener {
    fn on_teleporting(&mut self, ev: &mut TeleportingEvent);
}

/// What an operator edit would change on a map object.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ObjectChange {
    /// Euler angles in degrees.
    Rotation(Vec3),
    Position(Vec3),
}

/// An operator edit about to be applied. Listeners may veto it or rewrite
/// the value.
#[derive(Debug, Clone)]
pub struct ObjectChangeEvent {
    pub object: MapObjectRef,
    pub change: ObjectChange,
    /// Cleared by a listener to reject the edit.
    pub is_allowed: bool,
    /// Message shown to the operator when a listener rejects the edit.
    pub response: String,
}

/// Registered listeners for the plugin's cancellable notifications.
#[derive(Default)]
pub struct Dispatcher {
    teleport: Vec<Box<dyn TeleportListener>>,
    object_change: Vec<Box<dyn ObjectChangeListener>>,
}

pub trait ObjectChangeListener {
    fn on_changing_object(&mut self, ev: &mut ObjectChangeEvent);
}

impl Dispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_teleport_listener(&mut self, listener: Box<dyn TeleportListener>) {
        self.teleport.push(listener);
    }

    pub fn register_object_change_listener(&mut self, listener: Box<dyn ObjectChangeListener>) {
        self.object_change.push(listener);
    }

    pub fn dispatch_teleporting(&mut self, ev: &mut TeleportingEvent) {
        for listener in &mut self.teleport {
            listener.on_teleporting(ev);
        }
    }

    pub fn dispatch_object_change(&mut self, ev: &mut ObjectChangeEvent) {
        for listener in &mut self.object_change {
            listener.on_changing_object(ev);
        }
    }
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("teleport_listeners", &self.teleport.len())
            .field("object_change_listeners", &self.object_change.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Deny;
    impl TeleportListener for Deny {
        fn on_teleporting(&mut self, ev: &mut TeleportingEvent) {
            ev.is_allowed = false;
        }
    }

    struct Redirect(Vec3);
    impl TeleportListener for Redirect {
        fn on_teleporting(&mut self, ev: &mut TeleportingEvent) {
            ev.destination = self.0;
        }
    }

    fn event(world: &mut hecs::World) -> TeleportingEvent {
        TeleportingEvent {
            source_id: 0,
            target_id: 1,
            entity: world.spawn(()),
            destination: Vec3::ZERO,
            rotation: PlayerRotation::default(),
            sound_id: -1,
            is_allowed: true,
        }
    }

    #[test]
    fn test_veto_sticks() {
        let mut world = hecs::World::new();
        let mut dispatcher = Dispatcher::new();
        dispatcher.register_teleport_listener(Box::new(Deny));

        let mut ev = event(&mut world);
        dispatcher.dispatch_teleporting(&mut ev);
        assert!(!ev.is_allowed);
    }

    #[test]
    fn test_listeners_run_in_registration_order() {
        let mut world = hecs::World::new();
        let mut dispatcher = Dispatcher::new();
        let rewritten = Vec3::new(5.0, 0.0, 5.0);
        dispatcher.register_teleport_listener(Box::new(Redirect(rewritten)));
        // Registered second, so it must observe the first listener's rewrite.
        dispatcher.register_teleport_listener(Box::new(Deny));

        let mut ev = event(&mut world);
        dispatcher.dispatch_teleporting(&mut ev);
        assert_eq!(ev.destination, rewritten);
        assert!(!ev.is_allowed);
    }
}
