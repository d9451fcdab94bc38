/// Tags typed one at a time, the way the capture panel collects them.
///
/// Unlike [`crate::collect_tags`], duplicates are rejected without regard to
/// case: committing `"Work"` after `"work"` keeps only the first. Typing a comma
/// or a space ends a tag, so tags never contain either.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagEntry {
    tags: Vec<String>,
}

impl TagEntry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one tag, ignoring surrounding whitespace and commas.
    ///
    /// Returns `true` when the tag was added.
    pub fn commit(&mut self, input: &str) -> bool {
        let cleaned = input.trim_matches(|c: char| c.is_whitespace() || c == ',');
        if cleaned.is_empty() {
            return false;
        }

        let lowered = cleaned.to_lowercase();
        if self.tags.iter().any(|tag| tag.to_lowercase() == lowered) {
            return false;
        }

        self.tags.push(cleaned.to_string());
        true
    }

    /// Commits every piece of `input` separated by commas or whitespace.
    pub fn commit_csv(&mut self, input: &str) {
        for piece in input.split(|c: char| c == ',' || c.is_whitespace()) {
            self.commit(piece);
        }
    }

    pub fn remove(&mut self, tag: &str) {
        self.tags.retain(|t| t != tag);
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// The tags joined with `", "`, ready for [`crate::NoteStore::save`].
    pub fn to_csv(&self) -> String {
        self.tags.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commit_cleans_input() {
        let mut entry = TagEntry::new();
        assert!(entry.commit("  rust, "));
        assert!(entry.commit(",notes"));
        assert!(!entry.commit(" , "));
        assert_eq!(entry.tags(), ["rust", "notes"]);
    }

    #[test]
    fn commit_dedups_ignoring_case() {
        let mut entry = TagEntry::new();
        assert!(entry.commit("Work"));
        assert!(!entry.commit("work"));
        assert!(!entry.commit("WORK"));
        assert_eq!(entry.tags(), ["Work"]);
    }

    #[test]
    fn commit_csv_keeps_order() {
        let mut entry = TagEntry::new();
        entry.commit("dev");
        entry.commit_csv("swift, Dev,, macos");
        assert_eq!(entry.to_csv(), "dev, swift, macos");
    }

    #[test]
    fn whitespace_ends_a_tag() {
        let mut entry = TagEntry::new();
        entry.commit_csv("deep work,  side project\tdeep");
        assert_eq!(entry.tags(), ["deep", "work", "side", "project"]);
    }

    #[test]
    fn remove_is_exact() {
        let mut entry = TagEntry::new();
        entry.commit_csv("swift, dev");
        entry.remove("Swift");
        assert_eq!(entry.tags(), ["swift", "dev"]);
        entry.remove("swift");
        assert_eq!(entry.tags(), ["dev"]);
    }

    #[test]
    fn csv_feeds_collector_with_exact_default_check() {
        let mut entry = TagEntry::new();
        entry.commit_csv("Work, dev, work");
        let tags = crate::collect_tags(&entry.to_csv(), "work");
        assert_eq!(tags, ["work", "Work", "dev"]);
    }

    #[test]
    fn empty_entry_yields_empty_csv() {
        let entry = TagEntry::new();
        assert!(entry.is_empty());
        assert_eq!(entry.to_csv(), "");
    }
}
