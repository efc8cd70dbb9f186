//! Script source text with a precomputed line table.

use std::sync::Arc;

/// Zero-based line and character column of a byte offset.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct LineCol {
    pub line: u32,
    /// Counted in characters, not bytes.
    pub column: u32,
}

/// A named piece of script text.
///
/// Every diagnostic position and every
/// arena points back at the document it was parsed from, so diagnostics can
/// quote the offending line long after parsing finished.
#[derive(Debug)]
pub struct SourceDocument {
    path: String,
    content: String,
    /// Byte offset of each line start; `line_starts[0] == 0`.
    line_starts: Vec<u32>,
}

/// Documents are shared by the arena, diagnostics, and script functions.
pub type SharedDocument = Arc<SourceDocument>;

fn clamp_offset(offset: usize) -> u32 {
    u32::try_from(offset).unwrap_or(u32::MAX)
}

impl SourceDocument {
    pub fn new(path: impl Into<String>, content: impl Into<String>) -> Self {
        let content = content.into();
        let mut line_starts = vec![0];
        line_starts.extend(
            memchr::memchr_iter(b'\n', content.as_bytes()).map(|i| clamp_offset(i + 1)),
        );
        SourceDocument {
            path: path.into(),
            content,
            line_starts,
        }
    }

    /// Convenience constructor returning a [`SharedDocument`].
    pub fn shared(path: impl Into<String>, content: impl Into<String>) -> SharedDocument {
        Arc::new(Self::new(path, content))
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    #[inline]
    pub fn len(&self) -> u32 {
        clamp_offset(self.content.len())
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Zero-based line containing `offset`.
    pub fn line_of(&self, offset: u32) -> u32 {
        let index = match self.line_starts.binary_search(&offset) {
            Ok(exact) => exact,
            Err(insert) => insert.saturating_sub(1),
        };
        clamp_offset(index)
    }

    /// Line and character column of a byte offset. Offsets past the end
    /// resolve to the end of the last line.
    pub fn line_col(&self, offset: u32) -> LineCol {
        let line = self.line_of(offset);
        let start = self.line_starts.get(line as usize).copied().unwrap_or(0) as usize;
        let end = (offset as usize).min(self.content.len());
        let column = self
            .content
            .get(start..end.max(start))
            .map_or(0, |prefix| prefix.chars().count());
        LineCol {
            line,
            column: clamp_offset(column),
        }
    }

    /// Text of a zero-based line without its line terminator.
    pub fn line_text(&self, line: u32) -> &str {
        let Some(&start) = self.line_starts.get(line as usize) else {
            return "";
        };
        let end = self
            .line_starts
            .get(line as usize + 1)
            .map_or(self.content.len(), |&next| next as usize);
        let text = self.content.get(start as usize..end).unwrap_or("");
        text.trim_end_matches(['\n', '\r'])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn resolves_lines_and_columns() {
        let doc = SourceDocument::new("main.sprig", "$x = 5\nx + 1\n\ttail");
        assert_eq!(doc.line_count(), 3);
        assert_eq!(doc.line_col(0), LineCol { line: 0, column: 0 });
        assert_eq!(doc.line_col(7), LineCol { line: 1, column: 0 });
        assert_eq!(doc.line_col(11), LineCol { line: 1, column: 4 });
        assert_eq!(doc.line_col(14), LineCol { line: 2, column: 1 });
    }

    #[test]
    fn columns_count_characters() {
        let doc = SourceDocument::new("u.sprig", "\"äö\" x");
        // `x` sits at byte 7 but is the sixth character.
        assert_eq!(doc.line_col(7), LineCol { line: 0, column: 5 });
    }

    #[test]
    fn line_text_strips_terminators() {
        let doc = SourceDocument::new("crlf.sprig", "a\r\nbb\r\n");
        assert_eq!(doc.line_text(0), "a");
        assert_eq!(doc.line_text(1), "bb");
        assert_eq!(doc.line_text(2), "");
        assert_eq!(doc.line_text(9), "");
    }

    #[test]
    fn offsets_past_end_clamp() {
        let doc = SourceDocument::new("short.sprig", "ab");
        assert_eq!(doc.line_col(50), LineCol { line: 0, column: 2 });
    }
}
