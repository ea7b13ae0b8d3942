//! Command catalog and fuzzy filtering.
//!
//! The catalog is tiny and static, so every call rescans it; there is no
//! index. Filtering keeps almost any subsequence match and leaves precision
//! to the ranking plus the result cap.

mod search;

use std::collections::HashSet;
use std::fmt;
use thiserror::Error;

pub use search::{Scorer, SearchTarget, strip_icon};

/// One selectable entry in the palette.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandDescriptor {
    /// Display label, optionally prefixed with a `$(icon)` token.
    pub label: String,
    pub description: String,
    pub keywords: Vec<String>,
    pub command_id: String,
}

impl CommandDescriptor {
    pub fn new(label: &str, description: &str, keywords: &[&str], command_id: &str) -> Self {
        Self {
            label: label.to_string(),
            description: description.to_string(),
            keywords: keywords.iter().map(|k| (*k).to_string()).collect(),
            command_id: command_id.to_string(),
        }
    }

    /// Label with the icon token removed.
    pub fn title(&self) -> &str {
        strip_icon(&self.label)
    }
}

impl fmt::Display for CommandDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.title(), self.description)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("duplicate command id in catalog: {0}")]
    DuplicateId(String),
}

/// Immutable, id-unique list of descriptors.
#[derive(Debug, Clone)]
pub struct Catalog {
    entries: Vec<CommandDescriptor>,
}

impl Catalog {
    /// # Errors
    /// Returns [`CatalogError::DuplicateId`] if two entries share a `command_id`.
    pub fn new(entries: Vec<CommandDescriptor>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        for e in &entries {
            if !seen.insert(e.command_id.as_str()) {
                return Err(CatalogError::DuplicateId(e.command_id.clone()));
            }
        }
        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[CommandDescriptor] {
        &self.entries
    }

    #[cfg(test)]
    pub fn get(&self, command_id: &str) -> Option<&CommandDescriptor> {
        self.entries.iter().find(|e| e.command_id == command_id)
    }

    pub fn filter(&self, query: &str, opts: &MatchOptions) -> Vec<&CommandDescriptor> {
        filter_commands_with(query, &self.entries, opts)
    }
}

/// Tuning knobs for [`filter_commands_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchOptions {
    /// Maximum number of ranked results.
    pub limit: usize,
    /// Matches scoring below this are dropped.
    pub min_score: i64,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            limit: 7,
            min_score: i64::MIN,
        }
    }
}

/// Filter and rank `catalog` against `query` with default options.
pub fn filter_commands<'a>(query: &str, catalog: &'a [CommandDescriptor]) -> Vec<&'a CommandDescriptor> {
    filter_commands_with(query, catalog, &MatchOptions::default())
}

/// Filter and rank `catalog` against `query`.
///
/// - Empty query: the whole catalog in its original order.
/// - Otherwise: subsequence matches above `opts.min_score`, best first,
///   ties in catalog order, at most `opts.limit` entries.
pub fn filter_commands_with<'a>(
    query: &str,
    catalog: &'a [CommandDescriptor],
    opts: &MatchOptions,
) -> Vec<&'a CommandDescriptor> {
    if query.is_empty() {
        return catalog.iter().collect();
    }

    let pattern = query.to_lowercase();
    let scorer = Scorer::new();

    let mut scored: Vec<(i64, &CommandDescriptor)> = catalog
        .iter()
        .map(SearchTarget::new)
        .filter_map(|t| {
            scorer
                .score(&t.text, &pattern)
                .filter(|s| *s >= opts.min_score)
                .map(|s| (s, t.descriptor))
        })
        .collect();

    // stable: equal scores keep catalog order
    scored.sort_by(|a, b| b.0.cmp(&a.0));
    scored.truncate(opts.limit);
    scored.into_iter().map(|(_, d)| d).collect()
}
