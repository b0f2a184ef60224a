//! Category → glyph table with an explicit fallback.

use crate::core::grouping::DateGroup;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

const BUILTIN: &[(&str, &str)] = &[
    ("battle", "⚔️"),
    ("romance", "💕"),
    ("discovery", "🔍"),
    ("betrayal", "🗡️"),
    ("death", "💀"),
    ("travel", "🧭"),
    ("politics", "👑"),
    ("magic", "✨"),
    ("mystery", "❓"),
    ("celebration", "🎉"),
    ("other", "📌"),
];

fn default_glyph() -> String {
    "📌".to_string()
}

/// Icon section of the configuration file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IconConfig {
    #[serde(default = "default_glyph")]
    pub default: String,
    /// Extra or overriding entries, keyed by category name.
    #[serde(default)]
    pub categories: BTreeMap<String, String>,
}

impl Default for IconConfig {
    fn default() -> Self {
        Self {
            default: default_glyph(),
            categories: BTreeMap::new(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct IconSet {
    glyphs: HashMap<String, String>,
    default: String,
}

impl IconSet {
    pub fn from_config(cfg: &IconConfig) -> Self {
        let mut glyphs: HashMap<String, String> = BUILTIN
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();

        for (category, glyph) in &cfg.categories {
            glyphs.insert(category.trim().to_lowercase(), glyph.clone());
        }

        Self {
            glyphs,
            default: cfg.default.clone(),
        }
    }

    /// Case-insensitive lookup; unknown categories get the default glyph.
    pub fn for_category(&self, category: &str) -> &str {
        self.glyphs
            .get(&category.trim().to_lowercase())
            .unwrap_or(&self.default)
    }

    /// A group is drawn with the icon of its first event.
    pub fn for_group(&self, group: &DateGroup) -> &str {
        group
            .events
            .first()
            .map(|e| self.for_category(&e.category))
            .unwrap_or(&self.default)
    }
}
