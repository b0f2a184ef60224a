//! Config file maintenance: detect keys missing from an older YAML file and
//! fill them with their defaults without touching the values already set.

use super::Config;
use crate::errors::{AppError, AppResult};
use serde_yaml::{Mapping, Value};
use std::fs;
use std::path::Path;

fn read_yaml(path: &Path) -> AppResult<Value> {
    let content = fs::read_to_string(path)?;
    if content.trim().is_empty() {
        return Ok(Value::Mapping(Mapping::new()));
    }
    Ok(serde_yaml::from_str(&content)?)
}

fn defaults_yaml() -> AppResult<Value> {
    Ok(serde_yaml::to_value(Config::default())?)
}

/// Collect dotted paths present in `defaults` but absent from `current`.
fn collect_missing(defaults: &Mapping, current: &Mapping, prefix: &str, out: &mut Vec<String>) {
    for (key, default_val) in defaults {
        let Some(name) = key.as_str() else { continue };
        let path = if prefix.is_empty() {
            name.to_string()
        } else {
            format!("{prefix}.{name}")
        };

        match current.get(key) {
            None => out.push(path),
            Some(Value::Mapping(cur)) => {
                if let Value::Mapping(def) = default_val {
                    collect_missing(def, cur, &path, out);
                }
            }
            Some(_) => {}
        }
    }
}

/// Insert every default missing from `current`, recursing into sections.
fn merge_missing(defaults: &Mapping, current: &mut Mapping) {
    for (key, default_val) in defaults {
        match current.get_mut(key) {
            None => {
                current.insert(key.clone(), default_val.clone());
            }
            Some(Value::Mapping(cur)) => {
                if let Value::Mapping(def) = default_val {
                    merge_missing(def, cur);
                }
            }
            Some(_) => {}
        }
    }
}

/// Dotted names of the keys missing from the config file at `path`.
pub fn missing_keys(path: &Path) -> AppResult<Vec<String>> {
    let current = read_yaml(path)?;
    let Value::Mapping(current) = current else {
        return Err(AppError::Config(format!(
            "{} is not a YAML mapping",
            path.display()
        )));
    };

    let mut out = Vec::new();
    if let Value::Mapping(defaults) = defaults_yaml()? {
        collect_missing(&defaults, &current, "", &mut out);
    }
    Ok(out)
}

/// Rewrite the config file at `path` with defaults for every missing key.
/// Returns the dotted names that were added (empty when nothing changed).
pub fn fill_missing_keys(path: &Path) -> AppResult<Vec<String>> {
    let missing = missing_keys(path)?;
    if missing.is_empty() {
        return Ok(missing);
    }

    let mut current = read_yaml(path)?;
    if let (Value::Mapping(cur), Value::Mapping(defaults)) = (&mut current, defaults_yaml()?) {
        merge_missing(&defaults, cur);
    }

    fs::write(path, serde_yaml::to_string(&current)?)?;
    Ok(missing)
}
