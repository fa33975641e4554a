//! MapEdit Headless Validation Harness
//!
//! Exercises the plugin core end-to-end without a host server.
//! Runs entirely in-process — no networking, no engine, no rendering.
//!
//! Usage:
//!   cargo run -p mapedit-simtest
//!   cargo run -p mapedit-simtest -- --verbose

use mapedit_core::commands::{self, Session};
use mapedit_core::persistence::{self, MapData};
use mapedit_core::prelude::*;
use mapedit_logic::config::{SchematicConfig, TargetRef, TeleportNodeConfig};
use mapedit_logic::constants::teleport_flags;
use mapedit_logic::eligibility::DenialReason;
use mapedit_logic::selection::choose_target;
use rand::rngs::StdRng;
use rand::SeedableRng;

// ── Test harness ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

fn check(name: &str, passed: bool, detail: String) -> TestResult {
    TestResult {
        name: name.to_string(),
        passed,
        detail,
    }
}

fn main() {
    let verbose = std::env::args().any(|a| a == "--verbose");
    println!("=== MapEdit Validation Harness ===\n");

    let mut results = Vec::new();

    // 1. The canonical two-node round trip with cooldowns
    results.extend(validate_round_trip());

    // 2. Index consistency across topology changes
    results.extend(validate_index_consistency());

    // 3. Object id recycling
    results.extend(validate_id_recycling());

    // 4. Weighted selection distribution
    results.extend(validate_selection_distribution());

    // 5. Map persistence
    results.extend(validate_persistence());

    // 6. Operator command surface
    results.extend(validate_commands());

    // 7. Lock gating against world state
    results.extend(validate_lock_gating());

    // ── Summary ──
    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    let total = results.len();

    for r in &results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    println!(
        "\n=== RESULT: {}/{} passed, {} failed ===",
        passed, total, failed
    );

    if failed > 0 {
        std::process::exit(1);
    }
}

// ── Helpers ─────────────────────────────────────────────────────────────

/// Two nodes linked to each other, indices settled.
fn linked_editor(cooldown: f32) -> (MapEditor, u32, u32) {
    let mut editor = MapEditor::new();
    let a = editor.spawn_node(TeleportNodeConfig {
        position: Vec3::new(0.0, 0.0, 0.0),
        targets: vec![TargetRef::new(1, 1.0)],
        cooldown,
        allowed_roles: vec!["ClassD".to_string()],
        teleport_flags: teleport_flags::PLAYER,
        ..Default::default()
    });
    let b = editor.spawn_node(TeleportNodeConfig {
        position: Vec3::new(25.0, 0.0, 25.0),
        targets: vec![TargetRef::new(a, 1.0)],
        cooldown,
        allowed_roles: vec!["ClassD".to_string()],
        teleport_flags: teleport_flags::PLAYER,
        ..Default::default()
    });
    editor.update(0.2);
    (editor, a, b)
}

// ── 1. Round trip ───────────────────────────────────────────────────────

fn validate_round_trip() -> Vec<TestResult> {
    println!("--- Round Trip ---");
    let mut results = Vec::new();
    let (mut editor, a, b) = linked_editor(5.0);
    let player = editor.spawn_player("ClassD", Vec3::ZERO);
    let mut rng = StdRng::seed_from_u64(11);

    let outcome = editor.handle_trigger_with_rng(a, player, &mut rng);
    results.push(check(
        "enter_a_moves_to_b",
        outcome == TriggerOutcome::Teleported { target_id: b }
            && editor.entity_position(player) == Some(Vec3::new(25.0, 0.0, 25.0)),
        format!("outcome {:?}", outcome),
    ));

    let now = editor.sim_time();
    let a_cooling = editor.registry.get(a).map(|n| n.is_cooling_down(now + 4.9));
    let b_cooling = editor.registry.get(b).map(|n| n.is_cooling_down(now + 4.9));
    results.push(check(
        "both_ends_cool_down",
        a_cooling == Some(true) && b_cooling == Some(true),
        format!("a {:?}, b {:?}", a_cooling, b_cooling),
    ));

    editor.update(3.0);
    let early = editor.handle_trigger_with_rng(b, player, &mut rng);
    results.push(check(
        "reentry_at_3s_rejected",
        early == TriggerOutcome::Denied(DenialReason::CoolingDown),
        format!("outcome {:?}", early),
    ));

    editor.update(3.0);
    let late = editor.handle_trigger_with_rng(b, player, &mut rng);
    results.push(check(
        "reentry_at_6s_allowed",
        late == TriggerOutcome::Teleported { target_id: a },
        format!("outcome {:?}", late),
    ));

    results
}

// ── 2. Index consistency ────────────────────────────────────────────────

fn validate_index_consistency() -> Vec<TestResult> {
    println!("--- Index Consistency ---");
    let mut results = Vec::new();

    let mut editor = MapEditor::new();
    let a = editor.spawn_node(TeleportNodeConfig {
        targets: vec![TargetRef::new(1, 1.0)],
        ..Default::default()
    });
    editor.update(0.2);

    let before = editor.registry.get(a).and_then(|n| n.resolve_target(1));
    let b = editor.spawn_node(TeleportNodeConfig::default());
    let inside_window = editor.registry.get(a).and_then(|n| n.resolve_target(b));
    editor.update(0.2);
    let after = editor.registry.get(a).and_then(|n| n.resolve_target(b));

    results.push(check(
        "binding_appears_after_debounce",
        before.is_none() && inside_window.is_none() && after == Some(b),
        format!("before {:?}, inside {:?}, after {:?}", before, inside_window, after),
    ));

    editor.remove_node(b);
    editor.update(0.2);
    let removed = editor.registry.get(a).and_then(|n| n.resolve_target(b));
    results.push(check(
        "binding_drops_after_removal",
        removed.is_none(),
        format!("binding {:?}", removed),
    ));

    results
}

// ── 3. Id recycling ─────────────────────────────────────────────────────

fn validate_id_recycling() -> Vec<TestResult> {
    println!("--- Id Recycling ---");
    let mut editor = MapEditor::new();
    let ids: Vec<u32> = (0..3)
        .map(|_| editor.spawn_node(TeleportNodeConfig::default()))
        .collect();
    editor.remove_node(1);
    let recycled = editor.spawn_node(TeleportNodeConfig::default());

    vec![check(
        "lowest_free_slot_reused",
        ids == vec![0, 1, 2] && recycled == 1,
        format!("initial {:?}, next {}", ids, recycled),
    )]
}

// ── 4. Selection distribution ───────────────────────────────────────────

fn validate_selection_distribution() -> Vec<TestResult> {
    println!("--- Selection Distribution ---");
    let mut results = Vec::new();
    let targets = vec![
        TargetRef::new(1, 1.0),
        TargetRef::new(2, 0.0),
        TargetRef::new(3, 3.0),
    ];

    let mut rng = StdRng::seed_from_u64(99);
    let trials = 40_000u32;
    let mut hits = std::collections::HashMap::new();
    for _ in 0..trials {
        if let Some(id) = choose_target(&targets, &mut rng) {
            *hits.entry(id).or_insert(0u32) += 1;
        }
    }

    let share_3 = hits.get(&3).copied().unwrap_or(0) as f64 / trials as f64;
    results.push(check(
        "weights_converge",
        (share_3 - 0.75).abs() < 0.01,
        format!("share of id 3 = {:.3}", share_3),
    ));
    results.push(check(
        "zero_weight_never_selected",
        !hits.contains_key(&2),
        format!("hits for id 2: {:?}", hits.get(&2)),
    ));

    let mut rng = StdRng::seed_from_u64(100);
    let dead = vec![TargetRef::new(1, 0.0)];
    results.push(check(
        "all_zero_yields_none",
        choose_target(&dead, &mut rng).is_none(),
        "no selectable target".to_string(),
    ));

    results
}

// ── 5. Persistence ──────────────────────────────────────────────────────

fn validate_persistence() -> Vec<TestResult> {
    println!("--- Persistence ---");
    let mut results = Vec::new();

    let (mut editor, _a, _b) = linked_editor(7.0);
    editor.place_schematic(SchematicConfig {
        schematic_name: "Checkpoint".to_string(),
        position: Vec3::new(3.0, 0.0, -3.0),
        ..Default::default()
    });

    let mut json = Vec::new();
    let saved = persistence::save_map_json(&mut json, &editor).is_ok();
    let loaded = persistence::load_map_json(&json[..]);
    results.push(check(
        "json_round_trip",
        saved
            && loaded
                .as_ref()
                .map(|d| *d == MapData::capture(&editor))
                .unwrap_or(false),
        format!("{} bytes", json.len()),
    ));

    let mut binary = Vec::new();
    let saved = persistence::save_map(&mut binary, &editor).is_ok();
    let reloaded = persistence::load_map(&binary[..]);
    results.push(check(
        "bincode_round_trip",
        saved
            && reloaded
                .map(|d| d.teleports == MapData::capture(&editor).teleports)
                .unwrap_or(false),
        format!("{} bytes", binary.len()),
    ));

    let broken = MapData {
        version: persistence::MAP_VERSION,
        teleports: vec![
            TeleportNodeConfig {
                object_id: 0,
                cooldown: -3.0,
                ..Default::default()
            },
            TeleportNodeConfig {
                object_id: 1,
                ..Default::default()
            },
        ],
        schematics: Vec::new(),
    };
    let mut fresh = MapEditor::new();
    let count = fresh.apply_map(broken);
    results.push(check(
        "malformed_node_skipped",
        count == 1 && fresh.registry.contains(1) && !fresh.registry.contains(0),
        format!("loaded {}", count),
    ));

    results
}

// ── 6. Commands ─────────────────────────────────────────────────────────

fn validate_commands() -> Vec<TestResult> {
    println!("--- Commands ---");
    let mut results = Vec::new();
    let mut editor = MapEditor::new();
    let mut session = Session::new();

    let spawned = commands::teleport_add(&mut editor, &mut session, &["4", "0", "4"]);
    results.push(check(
        "teleport_add",
        spawned == Ok("Teleport 0 spawned.".to_string()),
        format!("{:?}", spawned),
    ));

    let moved = commands::position_set(&mut editor, &session, &["6", "0", "6"]);
    results.push(check(
        "position_set",
        moved.is_ok()
            && editor.registry.get(0).map(|n| n.config.position) == Some(Vec3::new(6.0, 0.0, 6.0)),
        format!("{:?}", moved),
    ));

    let bad_sound = commands::teleport_set_sound(&mut editor, &session, &["32"]);
    results.push(check(
        "sound_bounds_rejected",
        bad_sound.is_err()
            && editor.registry.get(0).map(|n| n.config.teleport_sound_id) == Some(-1),
        format!("{:?}", bad_sound),
    ));

    let schematic = editor.place_schematic(SchematicConfig::default());
    session.select(MapObjectRef::Schematic(schematic));
    let rotated = commands::rotation_add(&mut editor, &session, &["0", "45", "0"]);
    results.push(check(
        "rotation_add",
        rotated.is_ok()
            && editor
                .schematics
                .get(&schematic)
                .map(|s| s.config.rotation.y)
                == Some(45.0),
        format!("{:?}", rotated),
    ));

    let player = editor.spawn_player("Tutorial", Vec3::ZERO);
    let armed = commands::gravity_gun(&mut editor, player);
    let disarmed = commands::gravity_gun(&mut editor, player);
    results.push(check(
        "gravity_gun_toggles",
        armed == Ok("You now have the Gravity Gun!".to_string())
            && disarmed == Ok("You no longer have a Gravity Gun!".to_string()),
        format!("{:?} / {:?}", armed, disarmed),
    ));

    results
}

// ── 7. Lock gating ──────────────────────────────────────────────────────

fn validate_lock_gating() -> Vec<TestResult> {
    println!("--- Lock Gating ---");
    let mut results = Vec::new();
    let (mut editor, a, _b) = linked_editor(0.0);
    editor.registry.get_mut(a).unwrap().config.lock_on_event =
        mapedit_logic::constants::lock_flags::WARHEAD_DETONATED;

    let player = editor.spawn_player("ClassD", Vec3::ZERO);
    let mut rng = StdRng::seed_from_u64(21);

    editor.lock_state.warhead_detonated = true;
    let locked = editor.handle_trigger_with_rng(a, player, &mut rng);
    results.push(check(
        "locked_while_event_active",
        locked == TriggerOutcome::Denied(DenialReason::LockedByEvent),
        format!("{:?}", locked),
    ));

    editor.lock_state.warhead_detonated = false;
    let unlocked = editor.handle_trigger_with_rng(a, player, &mut rng);
    results.push(check(
        "restored_when_cleared",
        matches!(unlocked, TriggerOutcome::Teleported { .. }),
        format!("{:?}", unlocked),
    ));

    results
}
