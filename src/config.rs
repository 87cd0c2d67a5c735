//! Configuration file support
//!
//! Loads the highlighter setup from ~/.uemacs-hl.toml (or
//! %USERPROFILE%\.uemacs-hl.toml on Windows).
//!
//! Example:
//! ```toml
//! disabled = ["search"]
//! scroll-margin = 3
//!
//! [[highlighter]]
//! type = "group"
//! params = ["code"]
//!
//! [[highlighter]]
//! parent = "code"
//! type = "regex"
//! params = ["\\d+", "0:cyan"]
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use toml::{Table, Value};

use crate::error::{HighlightError, Result};
use crate::registry::HighlighterRegistry;
use crate::window::Window;

/// One highlighter to instantiate at startup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlighterSpec {
    /// Path of the parent group, the root when empty
    pub parent: String,
    pub type_name: String,
    pub params: Vec<String>,
}

impl HighlighterSpec {
    pub fn new(type_name: &str, params: &[&str]) -> Self {
        Self {
            parent: String::new(),
            type_name: type_name.to_string(),
            params: params.iter().map(|p| p.to_string()).collect(),
        }
    }
}

/// Configuration settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Highlighters in the order they are added
    pub highlighters: Vec<HighlighterSpec>,
    /// Ids disabled in the window
    pub disabled: Vec<String>,
    /// Lines kept visible around the cursor
    pub scroll_margin: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            highlighters: vec![HighlighterSpec::new("cursor", &[])],
            disabled: Vec::new(),
            scroll_margin: None,
        }
    }
}

/// Read an array of strings, warning about non-string items
fn string_array(key: &str, value: &Value) -> Option<Vec<String>> {
    let Some(items) = value.as_array() else {
        tracing::warn!(key, "expected an array of strings, ignoring");
        return None;
    };
    let strings = items
        .iter()
        .filter_map(|item| {
            let s = item.as_str().map(str::to_string);
            if s.is_none() {
                tracing::warn!(key, item = %item, "ignoring non-string item");
            }
            s
        })
        .collect();
    Some(strings)
}

fn parse_highlighter(index: usize, value: &Value) -> Option<HighlighterSpec> {
    let Some(table) = value.as_table() else {
        tracing::warn!(index, "highlighter entry is not a table, ignoring");
        return None;
    };
    let Some(type_name) = table.get("type").and_then(Value::as_str) else {
        tracing::warn!(index, "highlighter entry has no type, ignoring");
        return None;
    };
    let parent = match table.get("parent") {
        Some(parent) => match parent.as_str() {
            Some(parent) => parent.to_string(),
            None => {
                tracing::warn!(index, "highlighter parent is not a string, ignoring entry");
                return None;
            }
        },
        None => String::new(),
    };
    let params = match table.get("params") {
        Some(params) => string_array("params", params)?,
        None => Vec::new(),
    };
    Some(HighlighterSpec {
        parent,
        type_name: type_name.to_string(),
        params,
    })
}

impl Config {
    /// Get the config file path
    pub fn config_path() -> Option<PathBuf> {
        #[cfg(windows)]
        {
            std::env::var("USERPROFILE")
                .ok()
                .map(|home| PathBuf::from(home).join(".uemacs-hl.toml"))
        }

        #[cfg(not(windows))]
        {
            std::env::var("HOME")
                .ok()
                .map(|home| PathBuf::from(home).join(".uemacs-hl.toml"))
        }
    }

    /// Load configuration from the default location
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load configuration from `path`; a missing file gives the defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        match fs::read_to_string(path) {
            Ok(contents) => {
                tracing::debug!(path = %path.display(), "loading config");
                Self::parse(&contents)
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(err.into()),
        }
    }

    /// Parse config file contents
    ///
    /// Syntax errors fail; entries of the wrong shape are skipped with a
    /// warning.
    pub fn parse(contents: &str) -> Result<Self> {
        let table: Table = contents.parse()?;
        let mut config = Config {
            highlighters: Vec::new(),
            disabled: Vec::new(),
            scroll_margin: None,
        };

        for (key, value) in &table {
            match key.as_str() {
                "disabled" => {
                    if let Some(disabled) = string_array(key, value) {
                        config.disabled = disabled;
                    }
                }
                "scroll-margin" => match value.as_integer().and_then(|n| usize::try_from(n).ok()) {
                    Some(margin) => config.scroll_margin = Some(margin),
                    None => tracing::warn!(value = %value, "invalid scroll-margin, ignoring"),
                },
                "highlighter" => match value.as_array() {
                    Some(entries) => {
                        config.highlighters = entries
                            .iter()
                            .enumerate()
                            .filter_map(|(index, entry)| parse_highlighter(index, entry))
                            .collect();
                    }
                    None => tracing::warn!("'highlighter' must be an array of tables, ignoring"),
                },
                _ => tracing::warn!(key = %key, "unknown config key, ignoring"),
            }
        }

        Ok(config)
    }

    /// Build the window's highlighters and disable list
    ///
    /// Entries that fail are skipped; their errors are logged and returned.
    pub fn apply(&self, registry: &HighlighterRegistry, window: &mut Window) -> Vec<HighlightError> {
        let mut errors = Vec::new();

        let margin = self
            .scroll_margin
            .map(|margin| HighlighterSpec::new("scroll-margin", &[&margin.to_string()]));
        for spec in self.highlighters.iter().chain(margin.as_ref()) {
            let added = registry
                .instantiate(&spec.type_name, &spec.params)
                .and_then(|child| window.highlighters_mut().add_child_at(&spec.parent, child));
            if let Err(err) = added {
                tracing::warn!(type_name = %spec.type_name, parent = %spec.parent, error = %err, "rejected highlighter");
                errors.push(err);
            }
        }

        let mut disabled = Vec::new();
        for id in &self.disabled {
            match window.highlighters().validate_disabled(std::slice::from_ref(id)) {
                Ok(()) => disabled.push(id.clone()),
                Err(err) => {
                    tracing::warn!(id = %id, "cannot disable unknown highlighter");
                    errors.push(err);
                }
            }
        }
        if let Err(err) = window.set_disabled(disabled) {
            errors.push(err);
        }

        errors
    }
}
