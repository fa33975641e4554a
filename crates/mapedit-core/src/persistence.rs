//! Save/Load for map files.
//!
//! Maps are stored as JSON for operator editing and as bincode for compact
//! snapshots. Only each object's own serializable fields are modeled here;
//! the surrounding save-file structure belongs to the host. Malformed nodes
//! are skipped at load with a warning and the rest of the map still loads.

use std::io::{Read, Write};

use serde::{Deserialize, Serialize};

use mapedit_logic::config::{SchematicConfig, TeleportNodeConfig};

use crate::editor::MapEditor;
use crate::node::TeleportNode;

/// Version number for the map format (increment when the format changes)
pub const MAP_VERSION: u32 = 1;

/// Serializable snapshot of every placed object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapData {
    /// Map format version
    pub version: u32,
    pub teleports: Vec<TeleportNodeConfig>,
    pub schematics: Vec<SchematicConfig>,
}

impl MapData {
    /// Snapshot the editor's placed objects.
    pub fn capture(editor: &MapEditor) -> Self {
        Self {
            version: MAP_VERSION,
            teleports: editor.registry.iter().map(|node| node.config.clone()).collect(),
            schematics: editor
                .schematics
                .values()
                .map(|schematic| schematic.config.clone())
                .collect(),
        }
    }
}

/// Write the current map as operator-editable JSON.
pub fn save_map_json<W: Write>(writer: W, editor: &MapEditor) -> Result<(), MapFileError> {
    serde_json::to_writer_pretty(writer, &MapData::capture(editor))?;
    Ok(())
}

/// Read a JSON map file.
pub fn load_map_json<R: Read>(reader: R) -> Result<MapData, MapFileError> {
    let data: MapData = serde_json::from_reader(reader)?;
    check_version(data.version)?;
    Ok(data)
}

/// Write the current map as a compact binary snapshot.
pub fn save_map<W: Write>(writer: W, editor: &MapEditor) -> Result<(), MapFileError> {
    bincode::serialize_into(writer, &MapData::capture(editor))?;
    Ok(())
}

/// Read a binary map snapshot.
pub fn load_map<R: Read>(reader: R) -> Result<MapData, MapFileError> {
    let data: MapData = bincode::deserialize_from(reader)?;
    check_version(data.version)?;
    Ok(data)
}

fn check_version(found: u32) -> Result<(), MapFileError> {
    if found != MAP_VERSION {
        return Err(MapFileError::VersionMismatch {
            expected: MAP_VERSION,
            found,
        });
    }
    Ok(())
}

impl MapEditor {
    /// Spawn every object a loaded map describes.
    ///
    /// Nodes that fail validation or collide with a live object id are
    /// skipped with a warning; the rest of the map still loads. Every loaded
    /// node schedules its index rebuild, so a bulk load converges in one
    /// debounce window. Returns how many teleports were spawned.
    pub fn apply_map(&mut self, data: MapData) -> usize {
        let mut loaded = 0;
        for config in data.teleports {
            if let Err(err) = config.validate() {
                log::warn!("skipping teleport {}: {}", config.object_id, err);
                continue;
            }
            if self.registry.contains(config.object_id) {
                log::warn!("skipping teleport {}: object id already in use", config.object_id);
                continue;
            }
            let object_id = config.object_id;
            self.registry.insert(TeleportNode::new(config));
            self.apply_changes(object_id);
            loaded += 1;
        }
        for config in data.schematics {
            self.place_schematic(config);
        }
        loaded
    }
}

/// Errors that can occur reading or writing a map file.
#[derive(Debug)]
pub enum MapFileError {
    Io(std::io::Error),
    Json(serde_json::Error),
    Bincode(Box<bincode::ErrorKind>),
    VersionMismatch { expected: u32, found: u32 },
}

impl From<std::io::Error> for MapFileError {
    fn from(e: std::io::Error) -> Self {
        MapFileError::Io(e)
    }
}

impl From<serde_json::Error> for MapFileError {
    fn from(e: serde_json::Error) -> Self {
        MapFileError::Json(e)
    }
}

impl From<Box<bincode::ErrorKind>> for MapFileError {
    fn from(e: Box<bincode::ErrorKind>) -> Self {
        MapFileError::Bincode(e)
    }
}

impl std::fmt::Display for MapFileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MapFileError::Io(e) => write!(f, "IO error: {}", e),
            MapFileError::Json(e) => write!(f, "JSON error: {}", e),
            MapFileError::Bincode(e) => write!(f, "Serialization error: {}", e),
            MapFileError::VersionMismatch { expected, found } => {
                write!(
                    f,
                    "Map version mismatch: expected {}, found {}",
                    expected, found
                )
            }
        }
    }
}

impl std::error::Error for MapFileError {}

#[cfg(test)]
mod tests {
    use super::*;
    use mapedit_logic::config::TargetRef;
    use mapedit_logic::geometry::Vec3;

    fn sample_editor() -> MapEditor {
        let mut editor = MapEditor::new();
        editor.spawn_node(TeleportNodeConfig {
            position: Vec3::new(1.0, 2.0, 3.0),
            targets: vec![TargetRef::new(1, 0.75)],
            cooldown: 4.0,
            allowed_roles: vec!["Scientist".to_string()],
            teleport_sound_id: 9,
            ..Default::default()
        });
        editor.spawn_node(TeleportNodeConfig::default());
        editor.place_schematic(SchematicConfig {
            schematic_name: "Bunker".to_string(),
            position: Vec3::new(5.0, 0.0, 5.0),
            ..Default::default()
        });
        editor
    }

    #[test]
    fn test_json_round_trip_is_lossless() {
        let editor = sample_editor();
        let mut buffer = Vec::new();
        save_map_json(&mut buffer, &editor).expect("save failed");

        let loaded = load_map_json(&buffer[..]).expect("load failed");
        assert_eq!(loaded.teleports, MapData::capture(&editor).teleports);
        assert_eq!(loaded.schematics, MapData::capture(&editor).schematics);
    }

    #[test]
    fn test_bincode_round_trip_is_lossless() {
        let editor = sample_editor();
        let mut buffer = Vec::new();
        save_map(&mut buffer, &editor).expect("save failed");

        let loaded = load_map(&buffer[..]).expect("load failed");
        assert_eq!(loaded.teleports, MapData::capture(&editor).teleports);
    }

    #[test]
    fn test_version_mismatch_is_rejected() {
        let editor = sample_editor();
        let mut data = MapData::capture(&editor);
        data.version = MAP_VERSION + 1;
        let json = serde_json::to_vec(&data).unwrap();

        match load_map_json(&json[..]) {
            Err(MapFileError::VersionMismatch { found, .. }) => {
                assert_eq!(found, MAP_VERSION + 1);
            }
            other => panic!("expected version mismatch, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_malformed_node_is_skipped_not_fatal() {
        let data = MapData {
            version: MAP_VERSION,
            teleports: vec![
                TeleportNodeConfig {
                    object_id: 0,
                    teleport_sound_id: 99, // out of range
                    ..Default::default()
                },
                TeleportNodeConfig {
                    object_id: 1,
                    ..Default::default()
                },
            ],
            schematics: Vec::new(),
        };

        let mut editor = MapEditor::new();
        assert_eq!(editor.apply_map(data), 1);
        assert!(!editor.registry.contains(0));
        assert!(editor.registry.contains(1));
    }

    #[test]
    fn test_duplicate_object_id_is_skipped() {
        let data = MapData {
            version: MAP_VERSION,
            teleports: vec![
                TeleportNodeConfig {
                    object_id: 3,
                    cooldown: 1.0,
                    ..Default::default()
                },
                TeleportNodeConfig {
                    object_id: 3,
                    cooldown: 2.0,
                    ..Default::default()
                },
            ],
            schematics: Vec::new(),
        };

        let mut editor = MapEditor::new();
        assert_eq!(editor.apply_map(data), 1);
        assert_eq!(editor.registry.get(3).unwrap().config.cooldown, 1.0);
    }

    #[test]
    fn test_bulk_load_converges_in_one_window() {
        let editor = sample_editor();
        let data = MapData::capture(&editor);

        let mut fresh = MapEditor::new();
        fresh.apply_map(data);
        fresh.update(0.2);

        // Node 0 references node 1 and both loaded together.
        assert_eq!(fresh.registry.get(0).unwrap().resolve_target(1), Some(1));
    }
}
