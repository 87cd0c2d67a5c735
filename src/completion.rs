//! Completion candidates for highlighter ids and type names

use std::fmt;

/// Candidates for replacing `start..end` of the completed input
///
/// Candidates are produced lazily and can only be walked once.
pub struct Completions<'a> {
    pub start: usize,
    pub end: usize,
    candidates: Box<dyn Iterator<Item = &'a str> + 'a>,
}

impl<'a> Completions<'a> {
    pub fn new(start: usize, end: usize, candidates: impl Iterator<Item = &'a str> + 'a) -> Self {
        Self {
            start,
            end,
            candidates: Box::new(candidates),
        }
    }

    /// Shift the replaced range, for completions computed on a suffix
    pub fn offset(mut self, offset: usize) -> Self {
        self.start += offset;
        self.end += offset;
        self
    }
}

impl<'a> Iterator for Completions<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        self.candidates.next()
    }
}

impl fmt::Debug for Completions<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Completions")
            .field("start", &self.start)
            .field("end", &self.end)
            .finish_non_exhaustive()
    }
}

/// Check if the chars of `query` appear in order in `candidate`
fn is_subsequence(query: &str, candidate: &str) -> bool {
    let mut chars = candidate.chars();
    query.chars().all(|q| chars.any(|c| c == q))
}

/// Match `query` against `candidates`: prefix matches first, then
/// subsequence matches
pub fn complete<'a, I>(query: &str, candidates: I) -> impl Iterator<Item = &'a str> + 'a
where
    I: Iterator<Item = &'a str> + Clone + 'a,
{
    let prefix = query.to_string();
    let query = query.to_string();
    let prefixed = candidates.clone().filter(move |c| c.starts_with(prefix.as_str()));
    let fuzzy = candidates
        .filter(move |c| !c.starts_with(query.as_str()) && is_subsequence(&query, c));
    prefixed.chain(fuzzy)
}
