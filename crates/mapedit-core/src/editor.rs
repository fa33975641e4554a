//! Map editor runtime - main entry point for the plugin core.
//!
//! Owns the ECS world of teleportable entities, the node registry, the
//! deferred scheduler, and the notification listeners. The host calls
//! [`MapEditor::handle_trigger`] when something enters a node's trigger
//! volume and [`MapEditor::update`] once per scheduler tick.

use std::collections::{BTreeMap, HashSet};

use hecs::{Entity, World};
use rand::Rng;

use mapedit_logic::config::{SchematicConfig, TeleportNodeConfig};
use mapedit_logic::constants::{lock_flags, sound_id_in_range, SOUND_ID_NONE};
use mapedit_logic::eligibility::{check_eligibility, DenialReason, EligibilityRequest};
use mapedit_logic::entity::{classify_entity, EntityCategory};
use mapedit_logic::geometry::Vec3;
use mapedit_logic::ids::next_free_id;

use crate::components::{EntityInfo, LookDirection, PlayerInfo, Position};
use crate::events::{Dispatcher, ObjectChangeEvent, ObjectChangeListener, TeleportListener, TeleportingEvent};
use crate::node::TeleportNode;
use crate::registry::{NodeRegistry, REBUILD_DELAY};
use crate::scheduler::{DeferredQueue, DeferredTask};

/// Maximum items a player can carry.
pub const INVENTORY_CAPACITY: usize = 8;

/// World flags that can suppress nodes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LockState {
    /// Light containment decontamination has started.
    pub decontamination_active: bool,
    /// The warhead has detonated.
    pub warhead_detonated: bool,
}

impl LockState {
    /// Bit mask matched against node lock masks.
    pub fn active_locks(&self) -> u8 {
        let mut mask = 0;
        if self.decontamination_active {
            mask |= lock_flags::LIGHT_DECONTAMINATED;
        }
        if self.warhead_detonated {
            mask |= lock_flags::WARHEAD_DETONATED;
        }
        mask
    }
}

/// A spatial sound the host should replicate to nearby clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SoundRequest {
    pub entity: Entity,
    pub sound_id: i32,
}

/// A placed schematic.
#[derive(Debug, Clone)]
pub struct SchematicInstance {
    pub id: u32,
    pub config: SchematicConfig,
}

/// Outcome of one trigger event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerOutcome {
    /// Entity was relocated to the chosen node.
    Teleported { target_id: u32 },
    /// The eligibility gate rejected the attempt.
    Denied(DenialReason),
    /// Selection produced nothing usable: all chances zero, or the chosen
    /// target is not (yet) in the index.
    NoTarget,
    /// A listener vetoed the teleporting notification.
    Vetoed,
}

/// Plugin runtime state
pub struct MapEditor {
    /// ECS world holding teleportable entities.
    pub world: World,
    /// All live teleport nodes.
    pub registry: NodeRegistry,
    /// Placed schematics, keyed in their own id space.
    pub schematics: BTreeMap<u32, SchematicInstance>,
    /// World flags consulted by the eligibility gate.
    pub lock_state: LockState,
    dispatcher: Dispatcher,
    queue: DeferredQueue,
    sound_requests: Vec<SoundRequest>,
    sim_time: f64,
    /// Item serials currently flagged as gravity guns.
    gravity_guns: HashSet<u16>,
    next_item_serial: u16,
}

impl MapEditor {
    pub fn new() -> Self {
        Self {
            world: World::new(),
            registry: NodeRegistry::new(),
            schematics: BTreeMap::new(),
            lock_state: LockState::default(),
            dispatcher: Dispatcher::new(),
            queue: DeferredQueue::new(),
            sound_requests: Vec::new(),
            sim_time: 0.0,
            gravity_guns: HashSet::new(),
            next_item_serial: 0,
        }
    }

    /// Current sim-clock time in seconds.
    pub fn sim_time(&self) -> f64 {
        self.sim_time
    }

    /// Advance the clock by `dt` seconds and run every deferred task that
    /// came due. Each task is its own atomic step.
    pub fn update(&mut self, dt: f64) {
        self.sim_time += dt;
        for task in self.queue.drain_due(self.sim_time) {
            match task {
                DeferredTask::RebuildIndex { node_id } => {
                    if self.registry.rebuild_index(node_id) {
                        log::debug!("rebuilt target index of node {}", node_id);
                    } else {
                        log::debug!("dropped index rebuild for dead node {}", node_id);
                    }
                }
            }
        }
    }

    /// Deferred tasks not yet due.
    pub fn pending_tasks(&self) -> usize {
        self.queue.len()
    }

    // ── Node lifecycle ─────────────────────────────────────────────────

    /// Spawn an operator-created node and return its assigned object id.
    ///
    /// If another teleport already exists, the new node's first target slot
    /// is pointed at the most recently added one so a fresh pair links up
    /// without further edits.
    pub fn spawn_node(&mut self, mut config: TeleportNodeConfig) -> u32 {
        let object_id = self.registry.assign_object_id();
        config.object_id = object_id;

        if let Some(last) = self.registry.last_added() {
            if let Some(first) = config.targets.first_mut() {
                first.id = last;
            }
        }

        self.registry.insert(TeleportNode::new(config));
        self.schedule_rebuild(object_id);
        for other in self.registry.nodes_targeting(object_id) {
            self.schedule_rebuild(other);
        }
        object_id
    }

    /// Remove a node. Every node whose index bound it schedules its own
    /// rebuild after the debounce delay.
    pub fn remove_node(&mut self, object_id: u32) -> bool {
        if self.registry.remove(object_id).is_none() {
            return false;
        }
        for dependent in self.registry.nodes_bound_to(object_id) {
            self.schedule_rebuild(dependent);
        }
        true
    }

    /// Re-index a node after an operator edit.
    pub fn apply_changes(&mut self, object_id: u32) {
        self.schedule_rebuild(object_id);
    }

    fn schedule_rebuild(&mut self, object_id: u32) {
        self.queue.call_delayed(
            self.sim_time,
            REBUILD_DELAY,
            DeferredTask::RebuildIndex { node_id: object_id },
        );
    }

    // ── Schematics ─────────────────────────────────────────────────────

    pub fn place_schematic(&mut self, config: SchematicConfig) -> u32 {
        let id = next_free_id(self.schematics.keys().copied());
        self.schematics.insert(id, SchematicInstance { id, config });
        id
    }

    pub fn remove_schematic(&mut self, id: u32) -> bool {
        self.schematics.remove(&id).is_some()
    }

    // ── Entities ───────────────────────────────────────────────────────

    pub fn spawn_player(&mut self, role: &str, position: Vec3) -> Entity {
        self.world.spawn((
            Position::new(position),
            LookDirection::default(),
            EntityInfo::new("Player", "Player"),
            PlayerInfo::new(role),
        ))
    }

    pub fn spawn_pickup(&mut self, name: &str, position: Vec3) -> Entity {
        self.world
            .spawn((Position::new(position), EntityInfo::new("Pickup", name)))
    }

    /// Spawn an untagged entity classified by name alone (projectiles).
    pub fn spawn_projectile(&mut self, name: &str, position: Vec3) -> Entity {
        self.world
            .spawn((Position::new(position), EntityInfo::new("Untagged", name)))
    }

    pub fn entity_position(&self, entity: Entity) -> Option<Vec3> {
        self.world
            .get::<&Position>(entity)
            .ok()
            .map(|position| position.world)
    }

    // ── Listeners & boundary queues ────────────────────────────────────

    pub fn register_teleport_listener(&mut self, listener: Box<dyn TeleportListener>) {
        self.dispatcher.register_teleport_listener(listener);
    }

    pub fn register_object_change_listener(&mut self, listener: Box<dyn ObjectChangeListener>) {
        self.dispatcher.register_object_change_listener(listener);
    }

    pub fn dispatch_object_change(&mut self, ev: &mut ObjectChangeEvent) {
        self.dispatcher.dispatch_object_change(ev);
    }

    /// Sounds queued for the host to replicate, clearing the queue.
    pub fn drain_sound_requests(&mut self) -> Vec<SoundRequest> {
        std::mem::take(&mut self.sound_requests)
    }

    // ── Trigger handling ───────────────────────────────────────────────

    /// React to `entity` entering the trigger volume of node `node_id`.
    pub fn handle_trigger(&mut self, node_id: u32, entity: Entity) -> TriggerOutcome {
        self.handle_trigger_with_rng(node_id, entity, &mut rand::thread_rng())
    }

    /// Trigger handling with a caller-supplied random source.
    ///
    /// Runs the full pipeline synchronously: classification, the
    /// eligibility gate, weighted selection, index resolution, the
    /// cancellable teleporting notification, then the move and the
    /// symmetric cooldown reset. Rejections at any stage leave every node
    /// and entity untouched.
    pub fn handle_trigger_with_rng(
        &mut self,
        node_id: u32,
        entity: Entity,
        rng: &mut impl Rng,
    ) -> TriggerOutcome {
        let now = self.sim_time;

        let (tag, name) = match self.world.get::<&EntityInfo>(entity) {
            Ok(info) => (info.tag.clone(), info.name.clone()),
            Err(_) => {
                log::debug!("trigger on node {} from an entity with no info", node_id);
                return TriggerOutcome::Denied(DenialReason::CategoryBlocked);
            }
        };
        let category = match classify_entity(&tag, &name) {
            Some(category) => category,
            None => return TriggerOutcome::Denied(DenialReason::CategoryBlocked),
        };
        let player_role = if category == EntityCategory::Player {
            self.world
                .get::<&PlayerInfo>(entity)
                .ok()
                .map(|player| player.role.clone())
        } else {
            None
        };

        let (bound_id, mut ev) = {
            let node = match self.registry.get(node_id) {
                Some(node) => node,
                None => {
                    log::debug!("trigger on unknown node {}", node_id);
                    return TriggerOutcome::NoTarget;
                }
            };

            let gate = check_eligibility(&EligibilityRequest {
                has_reachable_target: !node.target_index.is_empty(),
                lock_on_event: node.config.lock_on_event,
                active_locks: self.lock_state.active_locks(),
                now,
                next_time_use: node.next_time_use,
                category,
                teleport_flags: node.config.teleport_flags,
                player_role: player_role.as_deref(),
                allowed_roles: &node.config.allowed_roles,
            });
            if let Some(reason) = gate.denial {
                return TriggerOutcome::Denied(reason);
            }

            let chosen = match mapedit_logic::selection::choose_target(&node.config.targets, rng) {
                Some(id) => id,
                None => return TriggerOutcome::NoTarget,
            };

            let bound_id = match node.resolve_target(chosen) {
                Some(id) => id,
                None => {
                    log::debug!("node {}: chosen target {} is not indexed yet", node_id, chosen);
                    return TriggerOutcome::NoTarget;
                }
            };
            let target = match self.registry.get(bound_id) {
                Some(target) => target,
                None => {
                    log::debug!("node {}: binding to {} went stale", node_id, bound_id);
                    return TriggerOutcome::NoTarget;
                }
            };

            let ev = TeleportingEvent {
                source_id: node_id,
                target_id: bound_id,
                entity,
                destination: target.config.position,
                rotation: target.config.player_rotation,
                sound_id: node.config.teleport_sound_id,
                is_allowed: true,
            };
            (bound_id, ev)
        };

        self.dispatcher.dispatch_teleporting(&mut ev);
        if !ev.is_allowed {
            return TriggerOutcome::Vetoed;
        }

        // Cooldown on both ends, each from its own duration, so a round trip
        // cannot bounce straight back.
        if let Some(node) = self.registry.get_mut(node_id) {
            node.start_cooldown(now);
        }
        if let Some(target) = self.registry.get_mut(bound_id) {
            target.start_cooldown(now);
        }

        if let Ok(mut position) = self.world.get::<&mut Position>(entity) {
            position.world = ev.destination;
        }

        if category == EntityCategory::Player && ev.rotation.is_some() {
            if let Ok(mut look) = self.world.get::<&mut LookDirection>(entity) {
                if let Some(x) = ev.rotation.x {
                    look.x = x;
                }
                if let Some(y) = ev.rotation.y {
                    look.y = y;
                }
            }
        }

        if ev.sound_id != SOUND_ID_NONE {
            if sound_id_in_range(ev.sound_id) {
                self.sound_requests.push(SoundRequest {
                    entity,
                    sound_id: ev.sound_id,
                });
            } else {
                log::error!(
                    "The teleport sound id must be between 0 and 31. It is currently {} for teleport with {} ID.",
                    ev.sound_id,
                    node_id
                );
            }
        }

        TriggerOutcome::Teleported { target_id: bound_id }
    }

    // ── Gravity gun ────────────────────────────────────────────────────

    /// Give the player a gravity gun, or take it back if they carry one.
    pub fn toggle_gravity_gun(&mut self, player: Entity) -> Result<String, String> {
        let mut info = match self.world.get::<&mut PlayerInfo>(player) {
            Ok(info) => info,
            Err(_) => return Err("You must be a player to use the Gravity Gun!".to_string()),
        };

        if let Some(index) = info
            .items
            .iter()
            .position(|serial| self.gravity_guns.contains(serial))
        {
            let serial = info.items.remove(index);
            self.gravity_guns.remove(&serial);
            return Ok("You no longer have a Gravity Gun!".to_string());
        }

        if info.items.len() >= INVENTORY_CAPACITY {
            return Err("You have a full inventory!".to_string());
        }

        let serial = self.next_item_serial;
        self.next_item_serial += 1;
        info.items.push(serial);
        self.gravity_guns.insert(serial);
        Ok("You now have the Gravity Gun!".to_string())
    }

    /// Whether an item serial is currently flagged as a gravity gun.
    pub fn is_gravity_gun(&self, serial: u16) -> bool {
        self.gravity_guns.contains(&serial)
    }
}

impl Default for MapEditor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mapedit_logic::config::{PlayerRotation, TargetRef};
    use mapedit_logic::constants::teleport_flags;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn linked_pair(editor: &mut MapEditor, cooldown: f32) -> (u32, u32) {
        let a = editor.spawn_node(TeleportNodeConfig {
            position: Vec3::new(0.0, 0.0, 0.0),
            targets: vec![TargetRef::new(0, 1.0)],
            cooldown,
            allowed_roles: vec!["ClassD".to_string()],
            teleport_flags: teleport_flags::PLAYER,
            ..Default::default()
        });
        let b = editor.spawn_node(TeleportNodeConfig {
            position: Vec3::new(10.0, 0.0, 10.0),
            targets: vec![TargetRef::new(a, 1.0)],
            cooldown,
            allowed_roles: vec!["ClassD".to_string()],
            teleport_flags: teleport_flags::PLAYER,
            ..Default::default()
        });
        // spawn_node points the first node's initial target slot at nothing
        // useful until a second node exists; fix the link and re-index.
        editor
            .registry
            .get_mut(a)
            .unwrap()
            .config
            .targets[0]
            .id = b;
        editor.apply_changes(a);
        editor.update(0.2);
        (a, b)
    }

    #[test]
    fn test_round_trip_with_cooldowns() {
        let mut editor = MapEditor::new();
        let (a, b) = linked_pair(&mut editor, 5.0);
        let player = editor.spawn_player("ClassD", Vec3::ZERO);
        let mut rng = StdRng::seed_from_u64(1);

        let outcome = editor.handle_trigger_with_rng(a, player, &mut rng);
        assert_eq!(outcome, TriggerOutcome::Teleported { target_id: b });
        assert_eq!(
            editor.entity_position(player),
            Some(Vec3::new(10.0, 0.0, 10.0))
        );
        // Default sound id of -1 never requests a sound.
        assert!(editor.drain_sound_requests().is_empty());

        // Both ends cool down from the instant of the teleport.
        let now = editor.sim_time();
        assert!(editor.registry.get(a).unwrap().is_cooling_down(now + 4.9));
        assert!(editor.registry.get(b).unwrap().is_cooling_down(now + 4.9));

        // Re-entering B within the window is rejected.
        editor.update(3.0);
        assert_eq!(
            editor.handle_trigger_with_rng(b, player, &mut rng),
            TriggerOutcome::Denied(DenialReason::CoolingDown)
        );

        // After the window it fires again.
        editor.update(3.0);
        assert_eq!(
            editor.handle_trigger_with_rng(b, player, &mut rng),
            TriggerOutcome::Teleported { target_id: a }
        );
    }

    #[test]
    fn test_cooldowns_use_each_nodes_own_duration() {
        let mut editor = MapEditor::new();
        let (a, b) = linked_pair(&mut editor, 5.0);
        editor.registry.get_mut(b).unwrap().config.cooldown = 2.0;

        let player = editor.spawn_player("ClassD", Vec3::ZERO);
        let mut rng = StdRng::seed_from_u64(10);
        editor.handle_trigger_with_rng(a, player, &mut rng);

        let now = editor.sim_time();
        assert_eq!(editor.registry.get(a).unwrap().next_time_use, now + 5.0);
        assert_eq!(editor.registry.get(b).unwrap().next_time_use, now + 2.0);
    }

    #[test]
    fn test_index_becomes_consistent_after_debounce() {
        let mut editor = MapEditor::new();
        let a = editor.spawn_node(TeleportNodeConfig {
            targets: vec![TargetRef::new(1, 1.0)],
            ..Default::default()
        });

        // Referenced node does not exist yet: lookups miss but never panic.
        editor.update(0.2);
        assert_eq!(editor.registry.get(a).unwrap().resolve_target(1), None);

        let b = editor.spawn_node(TeleportNodeConfig::default());
        assert_eq!(b, 1);

        // Inside the debounce window the binding may still be absent.
        let player = editor.spawn_player("ClassD", Vec3::ZERO);
        let mut rng = StdRng::seed_from_u64(2);
        assert_eq!(
            editor.handle_trigger_with_rng(a, player, &mut rng),
            TriggerOutcome::Denied(DenialReason::NoReachableTargets)
        );

        editor.update(0.2);
        assert_eq!(editor.registry.get(a).unwrap().resolve_target(b), Some(b));
    }

    #[test]
    fn test_removal_reindexes_dependents() {
        let mut editor = MapEditor::new();
        let (a, b) = linked_pair(&mut editor, 0.0);

        assert!(editor.remove_node(b));
        // Stale binding remains until the deferred rebuild runs.
        assert_eq!(editor.registry.get(a).unwrap().resolve_target(b), Some(b));
        editor.update(0.2);
        assert_eq!(editor.registry.get(a).unwrap().resolve_target(b), None);
    }

    #[test]
    fn test_stale_binding_is_a_quiet_miss() {
        let mut editor = MapEditor::new();
        let (a, b) = linked_pair(&mut editor, 0.0);
        let player = editor.spawn_player("ClassD", Vec3::ZERO);
        let mut rng = StdRng::seed_from_u64(3);

        editor.registry.remove(b);
        // Index still claims b; resolution must degrade to a no-op.
        assert_eq!(
            editor.handle_trigger_with_rng(a, player, &mut rng),
            TriggerOutcome::NoTarget
        );
        assert_eq!(editor.entity_position(player), Some(Vec3::ZERO));
    }

    #[test]
    fn test_veto_leaves_world_untouched() {
        struct Deny;
        impl TeleportListener for Deny {
            fn on_teleporting(&mut self, ev: &mut TeleportingEvent) {
                ev.is_allowed = false;
            }
        }

        let mut editor = MapEditor::new();
        let (a, _b) = linked_pair(&mut editor, 5.0);
        editor.register_teleport_listener(Box::new(Deny));
        let player = editor.spawn_player("ClassD", Vec3::ZERO);
        let mut rng = StdRng::seed_from_u64(4);

        assert_eq!(
            editor.handle_trigger_with_rng(a, player, &mut rng),
            TriggerOutcome::Vetoed
        );
        assert_eq!(editor.entity_position(player), Some(Vec3::ZERO));
        let now = editor.sim_time();
        assert!(!editor.registry.get(a).unwrap().is_cooling_down(now));
    }

    #[test]
    fn test_listener_rewrites_destination() {
        struct Redirect;
        impl TeleportListener for Redirect {
            fn on_teleporting(&mut self, ev: &mut TeleportingEvent) {
                ev.destination = Vec3::new(1.0, 2.0, 3.0);
            }
        }

        let mut editor = MapEditor::new();
        let (a, _b) = linked_pair(&mut editor, 5.0);
        editor.register_teleport_listener(Box::new(Redirect));
        let player = editor.spawn_player("ClassD", Vec3::ZERO);
        let mut rng = StdRng::seed_from_u64(5);

        assert!(matches!(
            editor.handle_trigger_with_rng(a, player, &mut rng),
            TriggerOutcome::Teleported { .. }
        ));
        assert_eq!(
            editor.entity_position(player),
            Some(Vec3::new(1.0, 2.0, 3.0))
        );
    }

    #[test]
    fn test_rotation_override_applied_per_axis() {
        let mut editor = MapEditor::new();
        let (a, b) = linked_pair(&mut editor, 5.0);
        editor.registry.get_mut(b).unwrap().config.player_rotation = PlayerRotation {
            x: None,
            y: Some(90.0),
        };

        let player = editor.spawn_player("ClassD", Vec3::ZERO);
        {
            let mut look = editor.world.get::<&mut LookDirection>(player).unwrap();
            look.x = 15.0;
            look.y = 30.0;
        }

        let mut rng = StdRng::seed_from_u64(6);
        editor.handle_trigger_with_rng(a, player, &mut rng);

        let look = editor.world.get::<&LookDirection>(player).unwrap();
        assert_eq!(look.x, 15.0); // untouched axis
        assert_eq!(look.y, 90.0);
    }

    #[test]
    fn test_sound_requests_and_bounds() {
        let mut editor = MapEditor::new();
        let (a, b) = linked_pair(&mut editor, 0.0);
        editor.registry.get_mut(a).unwrap().config.teleport_sound_id = 7;
        editor.registry.get_mut(b).unwrap().config.teleport_sound_id = 32;

        let player = editor.spawn_player("ClassD", Vec3::ZERO);
        let mut rng = StdRng::seed_from_u64(7);

        editor.handle_trigger_with_rng(a, player, &mut rng);
        let requests = editor.drain_sound_requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].sound_id, 7);

        // Out-of-range id is diagnosed and never queued; the move happened.
        editor.update(0.01);
        assert!(matches!(
            editor.handle_trigger_with_rng(b, player, &mut rng),
            TriggerOutcome::Teleported { .. }
        ));
        assert!(editor.drain_sound_requests().is_empty());
    }

    #[test]
    fn test_pickup_and_projectile_gating() {
        let mut editor = MapEditor::new();
        let (a, _b) = linked_pair(&mut editor, 0.0);
        editor.registry.get_mut(a).unwrap().config.teleport_flags =
            teleport_flags::PICKUP | teleport_flags::ACTIVE_PROJECTILE;

        let pickup = editor.spawn_pickup("MedkitPickup", Vec3::ZERO);
        let projectile = editor.spawn_projectile("GrenadeProjectile(Clone)", Vec3::ZERO);
        let player = editor.spawn_player("ClassD", Vec3::ZERO);
        let mut rng = StdRng::seed_from_u64(8);

        assert!(matches!(
            editor.handle_trigger_with_rng(a, pickup, &mut rng),
            TriggerOutcome::Teleported { .. }
        ));
        editor.update(0.01);
        assert!(matches!(
            editor.handle_trigger_with_rng(a, projectile, &mut rng),
            TriggerOutcome::Teleported { .. }
        ));
        editor.update(0.01);
        assert_eq!(
            editor.handle_trigger_with_rng(a, player, &mut rng),
            TriggerOutcome::Denied(DenialReason::CategoryBlocked)
        );
    }

    #[test]
    fn test_all_zero_chances_never_notify() {
        struct Panic;
        impl TeleportListener for Panic {
            fn on_teleporting(&mut self, _ev: &mut TeleportingEvent) {
                panic!("no notification expected");
            }
        }

        let mut editor = MapEditor::new();
        let (a, _b) = linked_pair(&mut editor, 0.0);
        for target in &mut editor.registry.get_mut(a).unwrap().config.targets {
            target.chance = 0.0;
        }
        editor.register_teleport_listener(Box::new(Panic));

        let player = editor.spawn_player("ClassD", Vec3::ZERO);
        let mut rng = StdRng::seed_from_u64(9);
        assert_eq!(
            editor.handle_trigger_with_rng(a, player, &mut rng),
            TriggerOutcome::NoTarget
        );
    }

    #[test]
    fn test_gravity_gun_toggle_and_capacity() {
        let mut editor = MapEditor::new();
        let player = editor.spawn_player("Tutorial", Vec3::ZERO);

        let given = editor.toggle_gravity_gun(player).unwrap();
        assert_eq!(given, "You now have the Gravity Gun!");
        let taken = editor.toggle_gravity_gun(player).unwrap();
        assert_eq!(taken, "You no longer have a Gravity Gun!");

        {
            let mut info = editor.world.get::<&mut PlayerInfo>(player).unwrap();
            info.items = (100..100 + INVENTORY_CAPACITY as u16).collect();
        }
        assert_eq!(
            editor.toggle_gravity_gun(player),
            Err("You have a full inventory!".to_string())
        );
    }
}
