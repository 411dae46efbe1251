//! Parser for pipe-delimited vocabulary files.
//!
//! # Format
//! ```text
//! // term | phonetic hint | translation | category | level
//! cat | kat | gato | Animals | A1
//! break the ice | breik dhi ais | quebrar o gelo | Idioms
//! Order a coffee | - | Pedir um cafe | Mission
//! ```
//!
//! Category and level are optional and default to `General`.

use crate::types::{ParseMode, VocabularyItem, DEFAULT_TAG, MISSING_FIELD};
use std::collections::HashSet;

/// Minimum number of fields a line needs in strict mode.
pub const STRICT_MIN_FIELDS: usize = 3;

/// Parse vocabulary content into items.
///
/// Lines that do not satisfy `mode` are skipped. Only the first occurrence
/// of a term is kept.
pub fn parse(content: &str, mode: ParseMode) -> Vec<VocabularyItem> {
    let mut parser = Parser::new(mode);
    for (idx, line) in content.lines().enumerate() {
        parser.process_line(line, idx + 1);
    }
    parser.finish()
}

enum LineType<'a> {
    Comment,
    Empty,
    Fields(Vec<&'a str>),
}

struct Parser {
    mode: ParseMode,
    items: Vec<VocabularyItem>,
    seen_terms: HashSet<String>,
}

impl Parser {
    fn new(mode: ParseMode) -> Self {
        Self {
            mode,
            items: Vec::new(),
            seen_terms: HashSet::new(),
        }
    }

    fn process_line(&mut self, line: &str, line_num: usize) {
        let fields = match Self::parse_line(line) {
            LineType::Comment | LineType::Empty => return,
            LineType::Fields(fields) => fields,
        };

        let Some(item) = self.build_item(&fields, line_num) else {
            tracing::debug!(line = line_num, fields = fields.len(), "skipping vocabulary line");
            return;
        };

        if !self.seen_terms.insert(item.term.clone()) {
            tracing::debug!(line = line_num, term = %item.term, "dropping duplicate term");
            return;
        }
        self.items.push(item);
    }

    fn parse_line(line: &str) -> LineType<'_> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            LineType::Empty
        } else if trimmed.starts_with("//") {
            LineType::Comment
        } else {
            LineType::Fields(trimmed.split('|').map(str::trim).collect())
        }
    }

    fn build_item(&self, fields: &[&str], line_num: usize) -> Option<VocabularyItem> {
        let term = fields.first().copied().filter(|t| !t.is_empty())?;
        if self.mode == ParseMode::Strict && fields.len() < STRICT_MIN_FIELDS {
            return None;
        }

        let field = |idx: usize, default: &str| {
            fields
                .get(idx)
                .copied()
                .filter(|value| !value.is_empty())
                .unwrap_or(default)
                .to_string()
        };

        Some(VocabularyItem {
            term: term.to_string(),
            phonetic: field(1, MISSING_FIELD),
            translation: field(2, MISSING_FIELD),
            category: field(3, DEFAULT_TAG),
            level: field(4, DEFAULT_TAG),
            line_number: line_num,
        })
    }

    fn finish(self) -> Vec<VocabularyItem> {
        self.items
    }
}
