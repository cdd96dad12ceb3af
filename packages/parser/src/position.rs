use svgsync_common::Position;

/// Byte offset ↔ 1-based line/column conversion for one source text.
///
/// Columns count Unicode scalar values, matching what editor widgets report.
pub struct LineIndex<'src> {
    source: &'src str,
    line_starts: Vec<usize>,
}

impl<'src> LineIndex<'src> {
    pub fn new(source: &'src str) -> Self {
        let mut line_starts = vec![0];
        line_starts.extend(
            source
                .bytes()
                .enumerate()
                .filter(|(_, b)| *b == b'\n')
                .map(|(i, _)| i + 1),
        );

        Self {
            source,
            line_starts,
        }
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Position of a byte offset; offsets past the end clamp to the end.
    pub fn position(&self, offset: usize) -> Position {
        let mut offset = offset.min(self.source.len());
        while !self.source.is_char_boundary(offset) {
            offset -= 1;
        }

        let line = self.line_starts.partition_point(|&start| start <= offset) - 1;
        let line_start = self.line_starts[line];
        let column = self.source[line_start..offset].chars().count();

        Position::new(line as u32 + 1, column as u32 + 1)
    }

    /// Byte offset of a position, or `source.len()` when out of bounds
    pub fn offset(&self, position: Position) -> usize {
        if position.line == 0 || position.column == 0 {
            return 0;
        }

        let Some(&line_start) = self.line_starts.get(position.line as usize - 1) else {
            return self.source.len();
        };

        let line_end = self
            .line_starts
            .get(position.line as usize)
            .map(|next| next - 1)
            .unwrap_or(self.source.len());

        self.source[line_start..line_end]
            .char_indices()
            .nth(position.column as usize - 1)
            .map(|(i, _)| line_start + i)
            .unwrap_or(line_end)
    }
}

/// Convert a byte offset to a 1-based position
pub fn byte_offset_to_position(source: &str, offset: usize) -> Position {
    LineIndex::new(source).position(offset)
}

/// Convert a 1-based position to a byte offset
pub fn position_to_byte_offset(source: &str, position: Position) -> usize {
    LineIndex::new(source).offset(position)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_byte_offset_to_position() {
        let source = "line 1\nline 2\nline 3";

        assert_eq!(byte_offset_to_position(source, 0), Position::new(1, 1));
        assert_eq!(byte_offset_to_position(source, 7), Position::new(2, 1));
        assert_eq!(byte_offset_to_position(source, 10), Position::new(2, 4));
        assert_eq!(byte_offset_to_position(source, 14), Position::new(3, 1));
    }

    #[test]
    fn test_position_to_byte_offset() {
        let source = "line 1\nline 2\nline 3";

        assert_eq!(position_to_byte_offset(source, Position::new(1, 1)), 0);
        assert_eq!(position_to_byte_offset(source, Position::new(2, 1)), 7);
        assert_eq!(position_to_byte_offset(source, Position::new(2, 4)), 10);
        assert_eq!(position_to_byte_offset(source, Position::new(3, 1)), 14);
    }

    #[test]
    fn test_end_of_line_column_is_exclusive() {
        let source = "<rect/>\n<g/>";
        // Offset just past '>' on line 1 sits at column 8
        assert_eq!(byte_offset_to_position(source, 7), Position::new(1, 8));
        assert_eq!(position_to_byte_offset(source, Position::new(1, 8)), 7);
    }

    #[test]
    fn test_unicode_columns_count_chars() {
        let source = "日本語\ntext";
        assert_eq!(byte_offset_to_position(source, 3), Position::new(1, 2));
        assert_eq!(byte_offset_to_position(source, 10), Position::new(2, 1));
        // Inside a multi-byte char snaps back to its start
        assert_eq!(byte_offset_to_position(source, 4), Position::new(1, 2));
    }

    #[test]
    fn test_out_of_bounds() {
        let source = "short";
        assert_eq!(byte_offset_to_position(source, 1000), Position::new(1, 6));
        assert_eq!(
            position_to_byte_offset(source, Position::new(10, 1)),
            source.len()
        );
    }

    #[test]
    fn test_empty_source() {
        let index = LineIndex::new("");
        assert_eq!(index.line_count(), 1);
        assert_eq!(index.position(0), Position::new(1, 1));
        assert_eq!(index.offset(Position::new(1, 1)), 0);
    }
}
