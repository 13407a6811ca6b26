//! Row values read out of the cache and their displayed, span-split form.

use crate::window::highlight::cut;

/// One log line as read from the cache, after mask and error-tag projection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub text: String,
    pub is_new_line: bool,
    pub is_error: bool,
}

impl Row {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_new_line: false,
            is_error: false,
        }
    }
}

/// A run of text inside a displayed row sharing the same tags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextBlock {
    pub text: String,
    pub is_highlighted: bool,
    pub is_error: bool,
    pub is_just_added: bool,
}

impl TextBlock {
    fn same_tags(&self, other: &TextBlock) -> bool {
        self.is_highlighted == other.is_highlighted
            && self.is_error == other.is_error
            && self.is_just_added == other.is_just_added
    }
}

/// A row decomposed into ordered, non-overlapping text blocks.
///
/// No two consecutive blocks share all three tags.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DisplayedRow {
    pub blocks: Vec<TextBlock>,
}

impl DisplayedRow {
    /// Split `row` around every occurrence of `highlight` and merge compatible neighbours.
    pub fn from_row(row: &Row, highlight: &str) -> Self {
        let mut displayed = DisplayedRow::default();
        for span in cut(&row.text, highlight) {
            displayed.push(TextBlock {
                text: row.text[span.start..span.end].to_string(),
                is_highlighted: span.is_highlighted,
                is_error: row.is_error,
                is_just_added: row.is_new_line,
            });
        }
        displayed
    }

    /// Append a block, folding it into the previous one when the tags match.
    pub fn push(&mut self, block: TextBlock) {
        match self.blocks.last_mut() {
            Some(last) if last.same_tags(&block) => last.text.push_str(&block.text),
            _ => self.blocks.push(block),
        }
    }

    /// The row's full text with tags stripped.
    pub fn text(&self) -> String {
        self.blocks.iter().map(|block| block.text.as_str()).collect()
    }

    pub fn is_error(&self) -> bool {
        self.blocks.first().is_some_and(|block| block.is_error)
    }

    pub fn is_just_added(&self) -> bool {
        self.blocks.first().is_some_and(|block| block.is_just_added)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_row_is_one_block() {
        let row = Row::new("plain text");
        let displayed = DisplayedRow::from_row(&row, "");
        assert_eq!(displayed.blocks.len(), 1);
        assert_eq!(displayed.text(), "plain text");
        assert!(!displayed.blocks[0].is_highlighted);
    }

    #[test]
    fn adjacent_matches_are_merged() {
        let row = Row::new("aaaab");
        let displayed = DisplayedRow::from_row(&row, "aa");
        let tags: Vec<(&str, bool)> = displayed
            .blocks
            .iter()
            .map(|block| (block.text.as_str(), block.is_highlighted))
            .collect();
        assert_eq!(tags, vec![("aaaa", true), ("b", false)]);
    }

    #[test]
    fn row_flags_flow_into_blocks() {
        let row = Row {
            text: "disk failure".to_string(),
            is_new_line: true,
            is_error: true,
        };
        let displayed = DisplayedRow::from_row(&row, "fail");
        assert!(displayed.is_error());
        assert!(displayed.is_just_added());
        assert!(displayed
            .blocks
            .iter()
            .all(|block| block.is_error && block.is_just_added));
        for pair in displayed.blocks.windows(2) {
            assert!(!pair[0].same_tags(&pair[1]));
        }
    }
}
