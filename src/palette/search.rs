use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;
use regex::Regex;
use std::sync::LazyLock;

use super::CommandDescriptor;

static ICON_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\$\([^)]+\)\s*").expect("icon token pattern compiles"));

/// Remove a leading `$(icon)` token and the whitespace after it.
pub fn strip_icon(label: &str) -> &str {
    match ICON_TOKEN.find(label) {
        Some(m) => &label[m.end()..],
        None => label,
    }
}

/// Lower-cased haystack for one descriptor, borrowed back to its source.
pub struct SearchTarget<'a> {
    pub text: String,
    pub descriptor: &'a CommandDescriptor,
}

impl<'a> SearchTarget<'a> {
    pub fn new(descriptor: &'a CommandDescriptor) -> Self {
        let mut parts: Vec<&str> = Vec::with_capacity(2 + descriptor.keywords.len());
        parts.push(strip_icon(&descriptor.label));
        parts.push(&descriptor.description);
        parts.extend(descriptor.keywords.iter().map(String::as_str));
        Self {
            text: parts.join(" ").to_lowercase(),
            descriptor,
        }
    }
}

/// Subsequence scorer: contiguous runs score high, sparse hits low.
///
/// Returns `None` when `pattern` is not a subsequence of `text`.
pub struct Scorer {
    matcher: SkimMatcherV2,
}

impl Scorer {
    pub fn new() -> Self {
        Self {
            matcher: SkimMatcherV2::default(),
        }
    }

    pub fn score(&self, text: &str, pattern: &str) -> Option<i64> {
        self.matcher.fuzzy_match(text, pattern)
    }
}

impl Default for Scorer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strip_icon_removes_leading_token_only() {
        assert_eq!(strip_icon("$(check) Commit"), "Commit");
        assert_eq!(strip_icon("$(cloud-upload)Push"), "Push");
        assert_eq!(strip_icon("Pull $(sync)"), "Pull $(sync)");
        assert_eq!(strip_icon("Plain"), "Plain");
    }

    #[test]
    fn target_joins_fields_lowercased() {
        let d = CommandDescriptor::new(
            "$(add) Add",
            "Add file contents to the Index",
            &["stage", "changes"],
            "gct.add",
        );
        let t = SearchTarget::new(&d);
        assert_eq!(t.text, "add add file contents to the index stage changes");
        assert_eq!(t.descriptor.command_id, "gct.add");
    }

    #[test]
    fn scorer_prefers_contiguous_over_sparse() {
        let s = Scorer::new();
        let dense = s.score("push local changes", "push").unwrap();
        let sparse = s.score("pick up some history", "push").unwrap();
        assert!(dense > sparse);
        assert!(s.score("pull", "xyz").is_none());
    }
}
