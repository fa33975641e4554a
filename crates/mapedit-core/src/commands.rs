//! Operator command surface.
//!
//! Each command resolves the session's currently selected object, mutates
//! one field, and calls the editor's apply-changes entry point. Responses
//! are plain success/failure strings; nothing here panics past the command
//! boundary. Permission checks are the host's concern and do not appear.

use hecs::Entity;

use mapedit_logic::config::TeleportNodeConfig;
use mapedit_logic::constants::{sound_id_in_range, SOUND_ID_NONE};
use mapedit_logic::geometry::Vec3;

use crate::editor::MapEditor;
use crate::events::{MapObjectRef, ObjectChange, ObjectChangeEvent};

/// Per-operator command state.
#[derive(Debug, Default)]
pub struct Session {
    /// Object targeted by modifying commands.
    pub selected: Option<MapObjectRef>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select(&mut self, object: MapObjectRef) {
        self.selected = Some(object);
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }
}

fn selected_object(session: &Session) -> Result<MapObjectRef, String> {
    session
        .selected
        .ok_or_else(|| "You haven't selected any object!".to_string())
}

fn parse_vec3(args: &[&str]) -> Option<Vec3> {
    if args.len() < 3 {
        return None;
    }
    let x = args[0].parse().ok()?;
    let y = args[1].parse().ok()?;
    let z = args[2].parse().ok()?;
    Some(Vec3::new(x, y, z))
}

fn wrap_angles(v: Vec3) -> Vec3 {
    Vec3::new(
        v.x.rem_euclid(360.0),
        v.y.rem_euclid(360.0),
        v.z.rem_euclid(360.0),
    )
}

enum RotationMode {
    Add,
    Set,
}

/// `rotation add <x> <y> <z>` — rotate the selected schematic by a delta.
pub fn rotation_add(
    editor: &mut MapEditor,
    session: &Session,
    args: &[&str],
) -> Result<String, String> {
    rotate(editor, session, args, RotationMode::Add)
}

/// `rotation set <x> <y> <z>` — overwrite the selected schematic's rotation.
pub fn rotation_set(
    editor: &mut MapEditor,
    session: &Session,
    args: &[&str],
) -> Result<String, String> {
    rotate(editor, session, args, RotationMode::Set)
}

fn rotate(
    editor: &mut MapEditor,
    session: &Session,
    args: &[&str],
    mode: RotationMode,
) -> Result<String, String> {
    let object = selected_object(session)?;
    let schematic_id = match object {
        MapObjectRef::Schematic(id) => id,
        MapObjectRef::Teleport(_) => {
            return Err("You can't modify this object's rotation!".to_string())
        }
    };
    let requested = parse_vec3(args).ok_or_else(|| "Invalid values.".to_string())?;

    let mut ev = ObjectChangeEvent {
        object,
        change: ObjectChange::Rotation(requested),
        is_allowed: true,
        response: String::new(),
    };
    editor.dispatch_object_change(&mut ev);
    if !ev.is_allowed {
        // A denial is a handled command; the listener supplies the response.
        return Ok(ev.response);
    }
    let applied = match ev.change {
        ObjectChange::Rotation(v) => v,
        _ => requested,
    };

    match editor.schematics.get_mut(&schematic_id) {
        Some(schematic) => {
            schematic.config.rotation = match mode {
                RotationMode::Add => wrap_angles(schematic.config.rotation + applied),
                RotationMode::Set => wrap_angles(applied),
            };
            Ok(format!(
                "{:.3} {:.3} {:.3}",
                applied.x, applied.y, applied.z
            ))
        }
        None => Err("The selected object no longer exists!".to_string()),
    }
}

/// `position set <x> <y> <z>` — move the selected object.
pub fn position_set(
    editor: &mut MapEditor,
    session: &Session,
    args: &[&str],
) -> Result<String, String> {
    let object = selected_object(session)?;
    let requested = parse_vec3(args).ok_or_else(|| "Invalid values.".to_string())?;

    let mut ev = ObjectChangeEvent {
        object,
        change: ObjectChange::Position(requested),
        is_allowed: true,
        response: String::new(),
    };
    editor.dispatch_object_change(&mut ev);
    if !ev.is_allowed {
        return Ok(ev.response);
    }
    let applied = match ev.change {
        ObjectChange::Position(v) => v,
        _ => requested,
    };

    match object {
        MapObjectRef::Teleport(id) => match editor.registry.get_mut(id) {
            Some(node) => {
                node.config.position = applied;
                editor.apply_changes(id);
                Ok(format!("{:.3} {:.3} {:.3}", applied.x, applied.y, applied.z))
            }
            None => Err("The selected object no longer exists!".to_string()),
        },
        MapObjectRef::Schematic(id) => match editor.schematics.get_mut(&id) {
            Some(schematic) => {
                schematic.config.position = applied;
                Ok(format!("{:.3} {:.3} {:.3}", applied.x, applied.y, applied.z))
            }
            None => Err("The selected object no longer exists!".to_string()),
        },
    }
}

/// `teleport add <x> <y> <z>` — spawn a node at the given position and
/// select it.
pub fn teleport_add(
    editor: &mut MapEditor,
    session: &mut Session,
    args: &[&str],
) -> Result<String, String> {
    let position = parse_vec3(args).ok_or_else(|| "Invalid values.".to_string())?;

    let object_id = editor.spawn_node(TeleportNodeConfig {
        position,
        ..Default::default()
    });
    session.select(MapObjectRef::Teleport(object_id));
    Ok(format!("Teleport {} spawned.", object_id))
}

/// `teleport remove` — destroy the selected node.
pub fn teleport_remove(editor: &mut MapEditor, session: &mut Session) -> Result<String, String> {
    let object = selected_object(session)?;
    let object_id = match object {
        MapObjectRef::Teleport(id) => id,
        MapObjectRef::Schematic(_) => {
            return Err("You haven't selected a teleport!".to_string())
        }
    };

    if !editor.remove_node(object_id) {
        return Err("The selected object no longer exists!".to_string());
    }
    session.clear_selection();
    Ok(format!("Teleport {} removed.", object_id))
}

/// `teleport sound <id>` — set the selected node's teleport sound.
pub fn teleport_set_sound(
    editor: &mut MapEditor,
    session: &Session,
    args: &[&str],
) -> Result<String, String> {
    let object = selected_object(session)?;
    let object_id = match object {
        MapObjectRef::Teleport(id) => id,
        MapObjectRef::Schematic(_) => {
            return Err("You haven't selected a teleport!".to_string())
        }
    };

    let sound_id: i32 = args
        .first()
        .and_then(|arg| arg.parse().ok())
        .ok_or_else(|| "Invalid values.".to_string())?;
    if sound_id != SOUND_ID_NONE && !sound_id_in_range(sound_id) {
        return Err(format!(
            "The teleport sound id must be between 0 and 31. It is currently {}.",
            sound_id
        ));
    }

    match editor.registry.get_mut(object_id) {
        Some(node) => {
            node.config.teleport_sound_id = sound_id;
            editor.apply_changes(object_id);
            Ok(format!("Teleport sound set to {}.", sound_id))
        }
        None => Err("The selected object no longer exists!".to_string()),
    }
}

/// `gravitygun` — toggle the gravity gun tool for a player.
pub fn gravity_gun(editor: &mut MapEditor, player: Entity) -> Result<String, String> {
    editor.toggle_gravity_gun(player)
}
