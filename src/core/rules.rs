// SnapSleuth - core/rules.rs
//
// Control rule parsing, validation, and the built-in rule set.
// Core layer: accepts TOML strings, never touches the filesystem.
// Directory loading is handled by app::rule_mgr which feeds content here.

use crate::core::model::{ControlRule, Qualifier};
use crate::util::error::RuleError;
use serde::Deserialize;
use std::path::Path;
use std::sync::OnceLock;

// =============================================================================
// TOML deserialization structures (raw input)
// =============================================================================

/// Raw TOML rule definition as deserialized from a .toml file.
/// This is validated and compiled into a `ControlRule` for runtime use.
#[derive(Debug, Deserialize)]
pub struct RuleDefinition {
    pub rule: RuleMeta,
    #[serde(default, rename = "qualifier")]
    pub qualifiers: Vec<Qualifier>,
}

#[derive(Debug, Deserialize)]
pub struct RuleMeta {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub probes: Vec<String>,
    #[serde(default)]
    pub element_types: Vec<String>,
}

// =============================================================================
// Rule validation and compilation
// =============================================================================

/// Parse a TOML string into a `RuleDefinition`.
///
/// `source_path` is used for error messages only (not for I/O).
pub fn parse_rule_toml(toml_content: &str, source_path: &Path) -> Result<RuleDefinition, RuleError> {
    toml::from_str(toml_content).map_err(|e| RuleError::TomlParse {
        path: source_path.to_path_buf(),
        source: e,
    })
}

/// Validate a `RuleDefinition` and compile it into a runtime `ControlRule`.
///
/// Validates:
/// - `id` and `name` are non-empty
/// - at least one probe and one qualifier exist
/// - no probe, qualifier term, or element type is an empty string
pub fn validate_and_compile(def: RuleDefinition, is_builtin: bool) -> Result<ControlRule, RuleError> {
    let id = def.rule.id.trim().to_string();

    if id.is_empty() {
        return Err(RuleError::MissingField {
            rule_id: "(empty)".to_string(),
            field: "rule.id",
        });
    }
    if def.rule.name.trim().is_empty() {
        return Err(RuleError::MissingField {
            rule_id: id,
            field: "rule.name",
        });
    }
    if def.rule.probes.is_empty() {
        return Err(RuleError::MissingField {
            rule_id: id,
            field: "rule.probes",
        });
    }
    if def.qualifiers.is_empty() {
        return Err(RuleError::MissingField {
            rule_id: id,
            field: "qualifier",
        });
    }

    check_non_empty(&id, "rule.probes", def.rule.probes.iter().map(String::as_str))?;
    check_non_empty(&id, "qualifier.term", def.qualifiers.iter().map(|q| q.term.as_str()))?;
    check_non_empty(
        &id,
        "rule.element_types",
        def.rule.element_types.iter().map(String::as_str),
    )?;

    Ok(ControlRule {
        id,
        name: def.rule.name,
        probes: def.rule.probes,
        qualifiers: def.qualifiers,
        element_types: def.rule.element_types,
        is_builtin,
    })
}

fn check_non_empty<'a>(
    rule_id: &str,
    field: &'static str,
    values: impl Iterator<Item = &'a str>,
) -> Result<(), RuleError> {
    for (index, value) in values.enumerate() {
        if value.is_empty() {
            return Err(RuleError::EmptyValue {
                rule_id: rule_id.to_string(),
                field,
                index,
            });
        }
    }
    Ok(())
}

// =============================================================================
// Built-in rules (embedded at compile time)
// =============================================================================

/// Embedded TOML content for built-in rules.
/// Each tuple is (filename, TOML content).
pub fn builtin_rule_sources() -> Vec<(&'static str, &'static str)> {
    vec![
        (
            "like_button.toml",
            include_str!("../../rules/like_button.toml"),
        ),
        (
            "favorite_button.toml",
            include_str!("../../rules/favorite_button.toml"),
        ),
        (
            "favorite_confirm.toml",
            include_str!("../../rules/favorite_confirm.toml"),
        ),
    ]
}

/// Load and validate all built-in rules.
///
/// Invalid rules are logged as errors and skipped (non-fatal).
pub fn load_builtin_rules() -> Vec<ControlRule> {
    let mut rules = Vec::new();

    for (filename, content) in builtin_rule_sources() {
        let path = Path::new("<builtin>").join(filename);
        match parse_rule_toml(content, &path).and_then(|def| validate_and_compile(def, true)) {
            Ok(rule) => {
                tracing::debug!(rule = %rule.id, "Loaded built-in rule");
                rules.push(rule);
            }
            Err(e) => {
                // Built-in rule failures are bugs, but we still degrade gracefully
                tracing::error!(file = filename, error = %e, "Failed to load built-in rule");
            }
        }
    }

    rules
}

/// The built-in rules, compiled once per process.
pub fn builtin_rules() -> &'static [ControlRule] {
    static BUILTIN: OnceLock<Vec<ControlRule>> = OnceLock::new();
    BUILTIN.get_or_init(load_builtin_rules)
}

/// Look up a built-in rule by id.
pub fn builtin_rule(id: &str) -> Option<&'static ControlRule> {
    builtin_rules().iter().find(|r| r.id == id)
}

// =============================================================================
// Tests
// =============================================================================
