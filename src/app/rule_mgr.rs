// SnapSleuth - app/rule_mgr.rs
//
// Merges the embedded control rules with user rule files on disk.
// A user file whose id matches a built-in replaces that built-in; any other
// id extends the set. User files are read in file name order, and the first
// file to claim an id keeps it.

use crate::core::model::ControlRule;
use crate::core::rules;
use crate::util::constants;
use crate::util::error::RuleError;
use std::path::{Path, PathBuf};

/// A compiled user rule and the file it came from.
struct UserRule {
    rule: ControlRule,
    path: PathBuf,
}

/// Load all available rules: built-in first, then user files.
///
/// Bad user files are reported in the returned error list and skipped.
/// The merged set is capped at `MAX_RULES`; built-ins always come first so
/// truncation only ever drops user rules.
pub fn load_all_rules(user_rule_dir: Option<&Path>) -> (Vec<ControlRule>, Vec<RuleError>) {
    let mut rules = rules::builtin_rules().to_vec();
    let mut errors = Vec::new();

    tracing::debug!(builtin_count = rules.len(), "Loaded built-in rules");

    match user_rule_dir {
        Some(dir) if dir.is_dir() => {
            let user_rules = load_user_rules(dir, &mut errors);
            let overridden = merge_user_rules(&mut rules, user_rules);
            if !overridden.is_empty() {
                tracing::info!(
                    rules = ?overridden,
                    dir = %dir.display(),
                    "Built-in rules replaced by user files"
                );
            }
        }
        Some(dir) => {
            tracing::debug!(dir = %dir.display(), "No user rule directory (skipping)");
        }
        None => {}
    }

    if rules.len() > constants::MAX_RULES {
        tracing::warn!(
            count = rules.len(),
            max = constants::MAX_RULES,
            dropped = rules.len() - constants::MAX_RULES,
            "Too many rules loaded, dropping the last user rules"
        );
        errors.push(RuleError::TooManyRules {
            count: rules.len(),
            max: constants::MAX_RULES,
        });
        rules.truncate(constants::MAX_RULES);
    }

    tracing::debug!(total = rules.len(), "Rule loading complete");

    (rules, errors)
}

/// Fold `user_rules` into `rules`, returning the ids of replaced built-ins.
fn merge_user_rules(rules: &mut Vec<ControlRule>, user_rules: Vec<UserRule>) -> Vec<String> {
    let mut overridden = Vec::new();

    for UserRule { rule, path } in user_rules {
        match rules.iter().position(|r| r.id == rule.id) {
            Some(pos) => {
                tracing::info!(
                    rule = %rule.id,
                    file = %path.display(),
                    "User rule overrides built-in"
                );
                overridden.push(rule.id.clone());
                rules[pos] = rule;
            }
            None => {
                tracing::info!(
                    rule = %rule.id,
                    file = %path.display(),
                    "Loaded user-defined rule"
                );
                rules.push(rule);
            }
        }
    }

    overridden
}

/// Compile every `.toml` file in `dir`, in file name order.
///
/// A second file declaring an id already seen is reported as
/// `DuplicateId` and ignored.
fn load_user_rules(dir: &Path, errors: &mut Vec<RuleError>) -> Vec<UserRule> {
    let mut loaded: Vec<UserRule> = Vec::new();

    for path in rule_files(dir, errors) {
        let rule = match read_rule_file(&path) {
            Ok(rule) => rule,
            Err(e) => {
                tracing::warn!(file = %path.display(), error = %e, "Skipping user rule");
                errors.push(e);
                continue;
            }
        };

        if let Some(first) = loaded.iter().find(|u| u.rule.id == rule.id) {
            tracing::warn!(
                rule = %rule.id,
                file = %path.display(),
                first = %first.path.display(),
                "Duplicate user rule id, keeping the first file"
            );
            errors.push(RuleError::DuplicateId {
                id: rule.id,
                first: first.path.clone(),
                second: path,
            });
            continue;
        }

        loaded.push(UserRule { rule, path });
    }

    loaded
}

/// Sorted `.toml` paths directly inside `dir`.
fn rule_files(dir: &Path, errors: &mut Vec<RuleError>) -> Vec<PathBuf> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            errors.push(RuleError::Io {
                path: dir.to_path_buf(),
                source: e,
            });
            return Vec::new();
        }
    };

    let mut paths = Vec::new();
    for entry in entries {
        match entry {
            Ok(entry) => {
                let path = entry.path();
                if path.extension().and_then(|e| e.to_str()) == Some("toml") {
                    paths.push(path);
                }
            }
            Err(e) => errors.push(RuleError::Io {
                path: dir.to_path_buf(),
                source: e,
            }),
        }
    }
    paths.sort();
    paths
}

/// Read, size-check, and compile one user rule file.
fn read_rule_file(path: &Path) -> Result<ControlRule, RuleError> {
    let io_err = |source| RuleError::Io {
        path: path.to_path_buf(),
        source,
    };

    let size = std::fs::metadata(path).map_err(io_err)?.len();
    if size > constants::MAX_RULE_FILE_SIZE {
        return Err(RuleError::FileTooLarge {
            path: path.to_path_buf(),
            size,
            max_size: constants::MAX_RULE_FILE_SIZE,
        });
    }

    let content = std::fs::read_to_string(path).map_err(io_err)?;
    let def = rules::parse_rule_toml(&content, path)?;
    rules::validate_and_compile(def, false)
}
