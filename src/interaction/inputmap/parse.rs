use super::types::*;
use bevy::prelude::*;
use smallvec::SmallVec;
use std::collections::{BTreeMap, HashSet};

/// Used when no input file is found on disk.
pub const DEFAULT_INPUT_TOML: &str = r#"
[actions]
SortLeft = { description = "Send the bomb to the left basket" }
SortRight = { description = "Send the bomb to the right basket" }
Confirm = { description = "Start / retry" }
Back = { description = "Return to title" }
ToggleWireframe = { description = "Toggle the physics wireframe (debug builds)" }

[bindings]
SortLeft = ["Key:ArrowLeft", "Key:A"]
SortRight = ["Key:ArrowRight", "Key:D"]
Confirm = ["Key:Enter", "Key:Space"]
Back = ["Key:Escape"]

[debug.bindings]
ToggleWireframe = ["Key:F1"]
"#;

#[derive(Debug, Default)]
pub struct ParsedInputConfig { pub input_map: InputMap, pub errors: Vec<String> }

#[derive(Debug, serde::Deserialize)]
struct ActionDecl { description: Option<String> }

// BTreeMap keeps action ids stable across reloads.
#[derive(Debug, serde::Deserialize)]
struct RootToml { actions: Option<BTreeMap<String, ActionDecl>>, bindings: Option<BTreeMap<String, Vec<String>>>, #[serde(rename = "debug")] debug: Option<DebugToml> }

#[derive(Debug, serde::Deserialize)]
struct DebugToml { bindings: Option<BTreeMap<String, Vec<String>>> }

pub fn parse_input_toml(raw: &str, debug_layer: bool) -> ParsedInputConfig {
    let mut result = ParsedInputConfig::default();
    let root: RootToml = match toml::from_str(raw) { Ok(r) => r, Err(e) => { result.errors.push(format!("Top-level parse: {e}")); return result; } };
    let mut input_map = InputMap::default();
    if let Some(map) = root.actions {
        for (name, decl) in map {
            if !validate_action_name(&name) { result.errors.push(format!("Invalid action name '{}': must be PascalCase", name)); continue; }
            let id = ActionId(input_map.actions.len() as u16);
            input_map.actions.push(ActionMeta { id, name: name.clone(), description: decl.description.unwrap_or_default() });
            input_map.name_to_id.insert(name, id);
        }
    }
    input_map.states = vec![ActionState::default(); input_map.actions.len()];

    // Merge bindings (normal + debug overlay if allowed)
    let mut all_bindings: BTreeMap<String, Vec<String>> = BTreeMap::new();
    if let Some(b) = root.bindings { for (k, v) in b { all_bindings.entry(k).or_default().extend(v); } }
    if debug_layer { if let Some(db) = root.debug.and_then(|d| d.bindings) { for (k, v) in db { all_bindings.entry(k).or_default().extend(v); } } }

    for (action_name, list) in all_bindings {
        let Some(aid) = input_map.name_to_id.get(&action_name).copied() else { result.errors.push(format!("Binding references unknown action '{}'", action_name)); continue; };
        for spec in &list {
            match parse_binding(spec) {
                Ok(keys) => { let id = input_map.bindings.len() as u32; input_map.bindings.push(Binding { id, action: aid, keys }); }
                Err(err) => result.errors.push(format!("[binding {} '{}'] {err}", action_name, spec)),
            }
        }
    }
    input_map.bindings_runtime = vec![BindingRuntime::default(); input_map.bindings.len()];
    result.input_map = input_map; result
}

fn validate_action_name(name: &str) -> bool { let bytes = name.as_bytes(); if bytes.is_empty() { return false; } if !bytes[0].is_ascii_uppercase() { return false; } !name.chars().any(|c| !c.is_ascii_alphanumeric()) }

fn parse_binding(spec: &str) -> Result<SmallVec<[KeyCode; 2]>, String> {
    let mut keys: SmallVec<[KeyCode; 2]> = SmallVec::new();
    let mut seen: HashSet<KeyCode> = HashSet::new();
    for part in spec.split('+') {
        let p = part.trim(); if p.is_empty() { continue; }
        let key = parse_token(p)?;
        if !seen.insert(key) { return Err(format!("Duplicate token in chord: {:?}", key)); }
        keys.push(key);
    }
    if keys.is_empty() { return Err("Empty binding".into()); }
    Ok(keys)
}

fn parse_token(s: &str) -> Result<KeyCode, String> { match s.strip_prefix("Key:") { Some(rest) => parse_keycode(rest), None => Err(format!("Unrecognized token '{}' (expected Key:<name>)", s)) } }

fn parse_keycode(name: &str) -> Result<KeyCode, String> {
    let kc = match name {
        "ArrowLeft" | "Left" => KeyCode::ArrowLeft, "ArrowRight" | "Right" => KeyCode::ArrowRight,
        "ArrowUp" | "Up" => KeyCode::ArrowUp, "ArrowDown" | "Down" => KeyCode::ArrowDown,
        "Space" => KeyCode::Space, "Enter" => KeyCode::Enter, "Escape" | "Esc" => KeyCode::Escape, "Backspace" => KeyCode::Backspace,
        "A" | "KeyA" => KeyCode::KeyA, "D" | "KeyD" => KeyCode::KeyD, "J" | "KeyJ" => KeyCode::KeyJ, "L" | "KeyL" => KeyCode::KeyL,
        "Q" | "KeyQ" => KeyCode::KeyQ, "R" | "KeyR" => KeyCode::KeyR, "T" | "KeyT" => KeyCode::KeyT,
        "ControlLeft" => KeyCode::ControlLeft, "ShiftLeft" => KeyCode::ShiftLeft, "F1" => KeyCode::F1,
        other => return Err(format!("Unsupported KeyCode '{}' (extend parser)", other)),
    };
    Ok(kc)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_map_parses_cleanly() {
        let parsed = parse_input_toml(DEFAULT_INPUT_TOML, false);
        assert!(parsed.errors.is_empty(), "{:?}", parsed.errors);
        let names: Vec<&str> = parsed.input_map.actions.iter().map(|a| a.name.as_str()).collect();
        for expected in ["SortLeft", "SortRight", "Confirm", "Back"] { assert!(names.contains(&expected), "missing {expected}"); }
        assert_eq!(parsed.input_map.bindings.len(), 7);
    }

    #[test]
    fn chords_and_errors_are_collected() {
        let raw = r#"
[actions]
SortLeft = {}
bad_name = {}

[bindings]
SortLeft = ["Key:ControlLeft+Key:A", "Key:A+Key:A", "Mouse:Left"]
Missing = ["Key:D"]
"#;
        let parsed = parse_input_toml(raw, false);
        assert_eq!(parsed.input_map.bindings.len(), 1);
        assert_eq!(parsed.input_map.bindings[0].keys.as_slice(), &[KeyCode::ControlLeft, KeyCode::KeyA]);
        let joined = parsed.errors.join("\n");
        assert!(joined.contains("bad_name"));
        assert!(joined.contains("Duplicate token"));
        assert!(joined.contains("Mouse:Left"));
        assert!(joined.contains("unknown action 'Missing'"));
    }

    #[test]
    fn debug_layer_only_when_enabled() {
        let raw = r#"
[actions]
Confirm = {}

[bindings]
Confirm = ["Key:Enter"]

[debug.bindings]
Confirm = ["Key:F1"]
"#;
        assert_eq!(parse_input_toml(raw, false).input_map.bindings.len(), 1);
        assert_eq!(parse_input_toml(raw, true).input_map.bindings.len(), 2);
    }

    #[test]
    fn broken_toml_reports_top_level_error() {
        let parsed = parse_input_toml("[actions", false);
        assert_eq!(parsed.errors.len(), 1);
        assert!(parsed.input_map.actions.is_empty());
    }
}
