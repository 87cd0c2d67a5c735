//! Highlighter groups
//!
//! A group holds named child highlighters and runs them in insertion order.
//! Ids double as path segments (`parent/child`) in configuration and as
//! keys of the disable list, so every id must be unique across the whole
//! tree, not only among siblings. All groups of a tree share one id set, so
//! the check holds whichever group receives the child.

use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

use indexmap::IndexMap;

use crate::completion::{complete, Completions};
use crate::coord::BufferRange;
use crate::display_buffer::DisplayBuffer;
use crate::error::{HighlightError, Result};
use crate::highlighter::{Highlighter, HighlighterAndId, LayoutRequest, RenderContext};
use crate::pass::HighlightPass;

/// Separator between path segments
pub const PATH_SEPARATOR: char = '/';

/// Ids in use anywhere in a highlighter tree, shared by all its groups
#[derive(Debug, Clone, Default)]
pub struct TreeIds(Rc<RefCell<HashSet<String>>>);

impl TreeIds {
    pub fn contains(&self, id: &str) -> bool {
        self.0.borrow().contains(id)
    }

    fn insert_all(&self, ids: &[&str]) {
        self.0.borrow_mut().extend(ids.iter().map(|id| id.to_string()));
    }

    fn remove_all(&self, ids: &[&str]) {
        let mut set = self.0.borrow_mut();
        for id in ids {
            set.remove(*id);
        }
    }
}

/// Ordered, named collection of highlighters
pub struct HighlighterGroup {
    passes: HighlightPass,
    highlighters: IndexMap<String, Box<dyn Highlighter>>,
    tree_ids: TreeIds,
}

impl HighlighterGroup {
    pub fn new(passes: HighlightPass) -> Self {
        Self {
            passes,
            highlighters: IndexMap::new(),
            tree_ids: TreeIds::default(),
        }
    }

    pub fn len(&self) -> usize {
        self.highlighters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.highlighters.is_empty()
    }

    /// Ids of the direct children, in execution order
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.highlighters.keys().map(String::as_str)
    }

    /// Resolve a path, the empty path naming the group itself
    pub fn resolve(&self, path: &str) -> Result<&dyn Highlighter> {
        let path = path.trim_matches(PATH_SEPARATOR);
        if path.is_empty() {
            Ok(self)
        } else {
            self.get_child(path)
        }
    }

    pub fn resolve_mut(&mut self, path: &str) -> Result<&mut dyn Highlighter> {
        let path = path.trim_matches(PATH_SEPARATOR);
        if path.is_empty() {
            Ok(self)
        } else {
            self.get_child_mut(path)
        }
    }

    /// Insert `child` into the group at `parent_path`
    pub fn add_child_at(&mut self, parent_path: &str, child: HighlighterAndId) -> Result<()> {
        check_unique(&self.tree_ids, &child)?;

        let parent = self.resolve_mut(parent_path)?;
        if !parent.has_children() {
            return Err(HighlightError::NotComposite(parent_path.to_string()));
        }
        parent.add_child(child)
    }

    /// Remove the highlighter at `path`
    pub fn remove_child_at(&mut self, path: &str) -> Result<()> {
        let path = path.trim_matches(PATH_SEPARATOR);
        match path.rsplit_once(PATH_SEPARATOR) {
            Some((parent, id)) => self.get_child_mut(parent)?.remove_child(id),
            None => self.remove_child(path),
        }
    }

    /// Check that each disabled id names a highlighter in this tree
    pub fn validate_disabled(&self, disabled_ids: &[String]) -> Result<()> {
        match disabled_ids.iter().find(|id| !self.tree_ids.contains(id)) {
            Some(unknown) => Err(HighlightError::NotFound(unknown.clone())),
            None => Ok(()),
        }
    }
}

impl Default for HighlighterGroup {
    fn default() -> Self {
        Self::new(HighlightPass::ALL)
    }
}

/// Ids of `child` and of its whole subtree
fn subtree_ids(child: &HighlighterAndId) -> Vec<&str> {
    let (id, highlighter) = child;
    let mut ids = vec![id.as_str()];
    highlighter.collect_identifiers(&mut ids);
    ids
}

/// Reject `child` if its id or any id below it is already in `existing`,
/// or if its own subtree repeats an id
fn check_unique(existing: &TreeIds, child: &HighlighterAndId) -> Result<()> {
    let incoming = subtree_ids(child);
    for (idx, new_id) in incoming.iter().enumerate() {
        if existing.contains(new_id) || incoming[..idx].contains(new_id) {
            return Err(HighlightError::DuplicateIdentifier(new_id.to_string()));
        }
    }
    Ok(())
}

impl Highlighter for HighlighterGroup {
    fn passes(&self) -> HighlightPass {
        self.passes
    }

    fn do_render(&mut self, ctx: RenderContext<'_>, display_buffer: &mut DisplayBuffer, range: BufferRange) {
        for (id, highlighter) in self.highlighters.iter_mut() {
            if !ctx.is_disabled(id) {
                highlighter.render(ctx, display_buffer, range);
            }
        }
    }

    fn do_propose_layout(&mut self, ctx: RenderContext<'_>, layout: &mut LayoutRequest) {
        for (id, highlighter) in self.highlighters.iter_mut() {
            if !ctx.is_disabled(id) {
                highlighter.propose_layout(ctx, layout);
            }
        }
    }

    fn has_children(&self) -> bool {
        true
    }

    fn get_child(&self, path: &str) -> Result<&dyn Highlighter> {
        let (id, rest) = match path.split_once(PATH_SEPARATOR) {
            Some((id, rest)) => (id, Some(rest)),
            None => (path, None),
        };
        let child = self
            .highlighters
            .get(id)
            .ok_or_else(|| HighlightError::NotFound(id.to_string()))?;

        match rest {
            None => Ok(&**child),
            Some(_) if !child.has_children() => Err(HighlightError::NotComposite(id.to_string())),
            Some(rest) => child.get_child(rest),
        }
    }

    fn get_child_mut(&mut self, path: &str) -> Result<&mut dyn Highlighter> {
        let (id, rest) = match path.split_once(PATH_SEPARATOR) {
            Some((id, rest)) => (id, Some(rest)),
            None => (path, None),
        };
        let child = self
            .highlighters
            .get_mut(id)
            .ok_or_else(|| HighlightError::NotFound(id.to_string()))?;

        match rest {
            None => Ok(&mut **child),
            Some(_) if !child.has_children() => Err(HighlightError::NotComposite(id.to_string())),
            Some(rest) => child.get_child_mut(rest),
        }
    }

    fn add_child(&mut self, child: HighlighterAndId) -> Result<()> {
        let id = child.0.as_str();
        if id.is_empty() || id.contains(PATH_SEPARATOR) {
            return Err(HighlightError::bad_params(format!("invalid highlighter id: '{}'", id)));
        }
        check_unique(&self.tree_ids, &child)?;
        self.tree_ids.insert_all(&subtree_ids(&child));

        let (id, mut highlighter) = child;
        highlighter.join_tree(&self.tree_ids);
        tracing::debug!(id = %id, passes = ?highlighter.passes(), "adding highlighter");
        self.highlighters.insert(id, highlighter);
        Ok(())
    }

    fn remove_child(&mut self, id: &str) -> Result<()> {
        match self.highlighters.shift_remove_entry(id) {
            Some(removed) => {
                self.tree_ids.remove_all(&subtree_ids(&removed));
                tracing::debug!(id, "removed highlighter");
                Ok(())
            }
            None => Err(HighlightError::NotFound(id.to_string())),
        }
    }

    fn complete_child(&self, path: &str, cursor_pos: usize, group_only: bool) -> Result<Completions<'_>> {
        if let Some(sep) = path.find(PATH_SEPARATOR) {
            let offset = sep + 1;
            let child = self.get_child(&path[..sep])?;
            let completions = child.complete_child(
                &path[offset..],
                cursor_pos.saturating_sub(offset),
                group_only,
            )?;
            return Ok(completions.offset(offset));
        }

        let end = cursor_pos.min(path.len());
        let query = path.get(..end).unwrap_or(path);
        let candidates = self
            .highlighters
            .iter()
            .filter(move |(_, highlighter)| !group_only || highlighter.has_children())
            .map(|(id, _)| id.as_str());

        Ok(Completions::new(0, end, complete(query, candidates)))
    }

    fn join_tree(&mut self, tree_ids: &TreeIds) {
        self.tree_ids = tree_ids.clone();
        for highlighter in self.highlighters.values_mut() {
            highlighter.join_tree(tree_ids);
        }
    }

    fn collect_identifiers<'s>(&'s self, out: &mut Vec<&'s str>) {
        out.extend(self.highlighters.keys().map(String::as_str));
        for highlighter in self.highlighters.values() {
            if highlighter.has_children() {
                highlighter.collect_identifiers(out);
            }
        }
    }
}
