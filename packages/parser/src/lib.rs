//! # svgsync Parser
//!
//! Minimal document collaborator for the sync engine: scans SVG markup into
//! an ordered list of [`ElementRecord`]s, each carrying the 1-based source
//! range it was parsed from.
//!
//! This is not a full XML parser. It recognises tags, attributes, comments,
//! CDATA, processing instructions and doctype declarations well enough to
//! map elements back to their text; entity expansion and namespaces are left
//! to the rendering side.
//!
//! ```rust
//! use svgsync_parser::scan;
//!
//! let records = scan("<svg>\n  <rect id=\"r1\"/>\n</svg>").unwrap();
//! assert_eq!(records[0].id, "r1");
//! assert_eq!(records[0].source_range.start_line, 2);
//! ```

pub mod error;
pub mod id_generator;
pub mod parser;
pub mod position;
pub mod tokenizer;

pub use error::{format_error, ParseError, ParseResult};
pub use id_generator::{get_document_id, IDGenerator};
pub use parser::{scan, scan_with_options, ScanOptions, Scanner};
pub use position::{byte_offset_to_position, position_to_byte_offset, LineIndex};
pub use tokenizer::{tokenize, Token};

pub use svgsync_common::ElementRecord;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenizer_basic() {
        let tokens = tokenize("<svg/>");
        assert_eq!(tokens.len(), 2);
    }
}
