//! Highlighter registry
//!
//! Maps highlighter type names to constructors and documentation, so that
//! highlighters can be created from textual commands. The registry is an
//! ordinary value: the application builds one at startup, usually with
//! [`HighlighterRegistry::with_builtins`], and passes it by reference to
//! whatever constructs highlighter trees.

use std::collections::HashMap;

use crate::completion::{complete, Completions};
use crate::error::{HighlightError, Result};
use crate::highlighter::HighlighterAndId;
use crate::highlighters;

/// Constructor from raw parameters to a new highlighter and its id
pub type HighlighterFactory = Box<dyn Fn(&[String]) -> Result<HighlighterAndId>>;

/// A registered highlighter type
pub struct HighlighterFactoryAndDocstring {
    pub factory: HighlighterFactory,
    pub docstring: String,
}

/// Highlighter type table
#[derive(Default)]
pub struct HighlighterRegistry {
    entries: HashMap<String, HighlighterFactoryAndDocstring>,
}

impl HighlighterRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with the built-in highlighter types
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        highlighters::register_builtins(&mut registry);
        registry
    }

    /// Register a highlighter type, replacing any previous entry of that name
    pub fn register<F>(&mut self, type_name: &str, factory: F, docstring: &str)
    where
        F: Fn(&[String]) -> Result<HighlighterAndId> + 'static,
    {
        let replaced = self
            .entries
            .insert(
                type_name.to_string(),
                HighlighterFactoryAndDocstring {
                    factory: Box::new(factory),
                    docstring: docstring.to_string(),
                },
            )
            .is_some();
        tracing::debug!(type_name, replaced, "registered highlighter type");
    }

    /// Build a highlighter of the given type from raw parameters
    ///
    /// Errors raised by the constructor are returned unchanged.
    pub fn instantiate(&self, type_name: &str, params: &[String]) -> Result<HighlighterAndId> {
        let entry = self
            .entries
            .get(type_name)
            .ok_or_else(|| HighlightError::UnknownType(type_name.to_string()))?;
        let (id, highlighter) = (entry.factory)(params)?;
        tracing::debug!(type_name, id = %id, "instantiated highlighter");
        Ok((id, highlighter))
    }

    /// Documentation of a highlighter type
    pub fn describe(&self, type_name: &str) -> Result<&str> {
        self.entries
            .get(type_name)
            .map(|entry| entry.docstring.as_str())
            .ok_or_else(|| HighlightError::UnknownType(type_name.to_string()))
    }

    pub fn contains(&self, type_name: &str) -> bool {
        self.entries.contains_key(type_name)
    }

    /// All registered type names (sorted)
    pub fn type_names(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.entries.keys().map(String::as_str).collect();
        names.sort();
        names
    }

    /// Complete a partially typed type name
    pub fn complete_type(&self, prefix: &str, cursor_pos: usize) -> Completions<'_> {
        let end = cursor_pos.min(prefix.len());
        let query = prefix.get(..end).unwrap_or(prefix);
        Completions::new(0, end, complete(query, self.type_names().into_iter()))
    }
}
