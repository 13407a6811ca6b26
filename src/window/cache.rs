//! Append-only line store with a search-filtered projection.
//!
//! The store never forgets a line. What the view sees is the filtered index:
//! the ascending list of store indices whose line contains the search term.
//! Masking and error tagging are applied when rows are read, never when
//! lines are stored, so changing them costs nothing until the next read.

use crate::window::highlight::contains_ignore_case;
use crate::window::page_range::PageRange;
use crate::window::row::Row;

#[derive(Debug, Default)]
pub struct Cache {
    lines: Vec<String>,
    /// Store indices matching `search_term`, ascending.
    filtered: Vec<usize>,
    /// Store indices that matched in the most recent push, ascending.
    last_added: Vec<usize>,
    refresh_count: u64,
    search_term: String,
    mask: String,
    error_tag: String,
}

impl Cache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a batch of lines and index the ones matching the current search term.
    pub fn push<I, S>(&mut self, lines: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.last_added.clear();
        for line in lines {
            let line = line.into();
            let index = self.lines.len();
            if contains_ignore_case(&line, &self.search_term) {
                self.filtered.push(index);
                self.last_added.push(index);
            }
            self.lines.push(line);
        }
        self.refresh_count += 1;
    }

    /// True once a second batch has arrived.
    ///
    /// The first load is the file's existing content, not something the user
    /// should see flagged as new.
    pub fn is_initialized(&self) -> bool {
        self.refresh_count > 1
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
        let term = &self.search_term;
        self.filtered = self
            .lines
            .iter()
            .enumerate()
            .filter(|(_, line)| contains_ignore_case(line, term))
            .map(|(index, _)| index)
            .collect();
    }

    pub fn set_mask(&mut self, mask: impl Into<String>) {
        self.mask = mask.into();
    }

    pub fn set_error_tag(&mut self, tag: impl Into<String>) {
        self.error_tag = tag.into();
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn mask(&self) -> &str {
        &self.mask
    }

    pub fn error_tag(&self) -> &str {
        &self.error_tag
    }

    /// Number of lines ever stored.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn filtered_len(&self) -> usize {
        self.filtered.len()
    }

    pub fn filtered_index(&self) -> &[usize] {
        &self.filtered
    }

    pub fn last_added_index(&self) -> &[usize] {
        &self.last_added
    }

    /// Forget which lines were just added, so they render as ordinary rows from now on.
    pub fn clear_last_added(&mut self) {
        self.last_added.clear();
    }

    /// Materialize rows for positions `range` of the filtered index, oldest first.
    ///
    /// Positions past the end of the filtered index are skipped.
    pub fn rows(&self, range: PageRange) -> Vec<Row> {
        let end = range.as_range().end.min(self.filtered.len());
        let start = range.start().min(end);
        let is_initialized = self.is_initialized();

        self.filtered[start..end]
            .iter()
            .map(|&index| {
                let raw = &self.lines[index];
                let is_error =
                    !self.error_tag.is_empty() && contains_ignore_case(raw, &self.error_tag);
                let text = if self.mask.is_empty() {
                    raw.clone()
                } else {
                    raw.replacen(self.mask.as_str(), "", 1)
                };
                Row {
                    text,
                    is_new_line: is_initialized && self.last_added.binary_search(&index).is_ok(),
                    is_error,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(rows: &[Row]) -> Vec<&str> {
        rows.iter().map(|row| row.text.as_str()).collect()
    }

    #[test]
    fn last_added_tracks_latest_batch() {
        let mut cache = Cache::new();
        cache.push(["a", "b"]);
        cache.push(["c", "d"]);
        assert_eq!(cache.last_added_index(), &[2, 3]);
        assert_eq!(cache.filtered_index(), &[0, 1, 2, 3]);
    }

    #[test]
    fn first_load_is_not_initialized() {
        let mut cache = Cache::new();
        cache.push(["a"]);
        assert!(!cache.is_initialized());
        assert!(cache.rows(PageRange::new(0, 1)).iter().all(|r| !r.is_new_line));

        cache.push(["b"]);
        assert!(cache.is_initialized());
        let rows = cache.rows(PageRange::new(0, 2));
        assert!(!rows[0].is_new_line);
        assert!(rows[1].is_new_line);
    }

    #[test]
    fn search_term_round_trip_restores_index() {
        let mut cache = Cache::new();
        cache.push(["alpha", "beta", "gamma", "delta"]);
        let original = cache.filtered_index().to_vec();

        cache.set_search_term("");
        cache.set_search_term("a");
        cache.set_search_term("");
        assert_eq!(cache.filtered_index(), original.as_slice());
    }

    #[test]
    fn search_is_case_insensitive_and_applies_to_new_lines() {
        let mut cache = Cache::new();
        cache.push(["INFO start", "warn disk", "info stop"]);
        cache.set_search_term("info");
        assert_eq!(cache.filtered_index(), &[0, 2]);

        cache.push(["Info again", "debug"]);
        assert_eq!(cache.filtered_index(), &[0, 2, 3]);
        assert_eq!(cache.last_added_index(), &[3]);
    }

    #[test]
    fn reads_clamp_out_of_range_positions() {
        let mut cache = Cache::new();
        cache.push(["a", "b", "c"]);
        assert_eq!(texts(&cache.rows(PageRange::new(1, 10))), vec!["b", "c"]);
        assert!(cache.rows(PageRange::new(7, 3)).is_empty());
    }

    #[test]
    fn mask_removes_first_case_sensitive_occurrence() {
        let mut cache = Cache::new();
        cache.push(["[app] [app] ready", "[APP] shout"]);
        cache.set_mask("[app] ");
        assert_eq!(
            texts(&cache.rows(PageRange::new(0, 2))),
            vec!["[app] ready", "[APP] shout"]
        );
    }

    #[test]
    fn error_tag_marks_rows_ignoring_case() {
        let mut cache = Cache::new();
        cache.push(["ERROR boom", "fine", "an error"]);
        cache.set_error_tag("error");
        let flags: Vec<bool> = cache
            .rows(PageRange::new(0, 3))
            .iter()
            .map(|row| row.is_error)
            .collect();
        assert_eq!(flags, vec![true, false, true]);
    }

    #[test]
    fn error_tag_sees_text_before_masking() {
        let mut cache = Cache::new();
        cache.push(["E: failed"]);
        cache.set_mask("E: ");
        cache.set_error_tag("E:");
        let rows = cache.rows(PageRange::new(0, 1));
        assert_eq!(rows[0].text, "failed");
        assert!(rows[0].is_error);
    }
}
