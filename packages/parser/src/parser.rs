use crate::error::{ParseError, ParseResult};
use crate::id_generator::IDGenerator;
use crate::position::LineIndex;
use crate::tokenizer::{tokenize, Token};
use serde::{Deserialize, Serialize};
use std::ops::Range;
use svgsync_common::{ElementRecord, RenderedHandle, SourceRange};

/// Options controlling which elements the scanner reports
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanOptions {
    /// Report the outermost element (normally `<svg>`) as well
    #[serde(default)]
    pub include_root: bool,

    /// Document path, seeds the ids generated for elements without `id`
    #[serde(default = "default_path")]
    pub path: String,
}

fn default_path() -> String {
    "untitled.svg".to_string()
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            include_root: false,
            path: default_path(),
        }
    }
}

/// Element found in the markup, before ids are assigned
struct ScannedElement<'src> {
    tag: &'src str,
    explicit_id: Option<(&'src str, Range<usize>)>,
    start: usize,
    end: usize,
}

struct OpenElement<'src> {
    name: &'src str,
    open_span: Range<usize>,
    /// Slot in the scanned list, `None` when the element is not reported
    slot: Option<usize>,
}

/// Single-pass scanner turning SVG markup into source-mapped element records
pub struct Scanner<'src> {
    source: &'src str,
    tokens: Vec<(Token<'src>, Range<usize>)>,
    pos: usize,
    options: ScanOptions,
}

impl<'src> Scanner<'src> {
    pub fn new(source: &'src str, options: ScanOptions) -> Self {
        Self {
            source,
            tokens: tokenize(source),
            pos: 0,
            options,
        }
    }

    /// Scan the whole document.
    ///
    /// Records come out in document order (pre-order: a parent precedes its
    /// children). Each range starts at the `<` of the start tag and ends just
    /// past the `>` closing the element.
    pub fn scan(mut self) -> ParseResult<Vec<ElementRecord>> {
        let mut scanned: Vec<ScannedElement<'src>> = Vec::new();
        let mut stack: Vec<OpenElement<'src>> = Vec::new();

        while let Some((token, span)) = self.advance() {
            match token {
                Token::StartTagOpen(name) => {
                    let reported = !stack.is_empty() || self.options.include_root;
                    let (explicit_id, self_closing, end) = self.parse_start_tag(&span)?;

                    let slot = if reported {
                        scanned.push(ScannedElement {
                            tag: name,
                            explicit_id,
                            start: span.start,
                            end,
                        });
                        Some(scanned.len() - 1)
                    } else {
                        None
                    };

                    if !self_closing {
                        stack.push(OpenElement {
                            name,
                            open_span: span,
                            slot,
                        });
                    }
                }
                Token::EndTagOpen(name) => {
                    let end = self.expect_tag_close()?;
                    let open = stack.pop().ok_or_else(|| ParseError::UnexpectedClosingTag {
                        span: span.start..end,
                        name: name.to_string(),
                    })?;

                    if open.name != name {
                        return Err(ParseError::MismatchedTag {
                            span: span.start..end,
                            expected: open.name.to_string(),
                            found: name.to_string(),
                        });
                    }

                    if let Some(slot) = open.slot {
                        scanned[slot].end = end;
                    }
                }
                Token::Text
                | Token::Comment
                | Token::CData
                | Token::ProcessingInstruction
                | Token::Doctype => {}
                Token::Error => return Err(ParseError::lexer_error(span)),
                other => {
                    return Err(ParseError::unexpected_token(
                        span,
                        "markup",
                        format!("{:?}", other),
                    ))
                }
            }
        }

        if let Some(open) = stack.pop() {
            return Err(ParseError::UnclosedTag {
                span: open.open_span,
                name: open.name.to_string(),
            });
        }

        self.into_records(scanned)
    }

    /// Parse attributes up to `>` or `/>`.
    /// Returns the `id` attribute (if any), whether the tag self-closes and
    /// the byte offset just past the tag.
    #[allow(clippy::type_complexity)]
    fn parse_start_tag(
        &mut self,
        open_span: &Range<usize>,
    ) -> ParseResult<(Option<(&'src str, Range<usize>)>, bool, usize)> {
        let mut explicit_id = None;

        loop {
            let Some((token, span)) = self.advance() else {
                return Err(ParseError::unexpected_eof(
                    self.source.len(),
                    "'>' or '/>' closing the start tag",
                ));
            };

            match token {
                Token::TagClose => return Ok((explicit_id, false, span.end)),
                Token::SelfClose => return Ok((explicit_id, true, span.end)),
                Token::AttrName(name) => {
                    if !matches!(self.peek(), Some(Token::Eq)) {
                        // Valueless attribute, tolerated the way browsers do
                        continue;
                    }
                    self.advance();

                    match self.advance() {
                        Some((Token::AttrValue(value), value_span)) => {
                            if name == "id" && !value.is_empty() {
                                explicit_id = Some((value, value_span));
                            }
                        }
                        Some((Token::Error, span)) => return Err(ParseError::lexer_error(span)),
                        Some((other, span)) => {
                            return Err(ParseError::unexpected_token(
                                span,
                                "quoted attribute value",
                                format!("{:?}", other),
                            ))
                        }
                        None => {
                            return Err(ParseError::unexpected_eof(
                                self.source.len(),
                                "quoted attribute value",
                            ))
                        }
                    }
                }
                Token::Error => return Err(ParseError::lexer_error(span)),
                other => {
                    return Err(ParseError::unexpected_token(
                        open_span.start..span.end,
                        "attribute, '>' or '/>'",
                        format!("{:?}", other),
                    ))
                }
            }
        }
    }

    fn expect_tag_close(&mut self) -> ParseResult<usize> {
        match self.advance() {
            Some((Token::TagClose, span)) => Ok(span.end),
            Some((Token::Error, span)) => Err(ParseError::lexer_error(span)),
            Some((other, span)) => Err(ParseError::unexpected_token(
                span,
                "'>'",
                format!("{:?}", other),
            )),
            None => Err(ParseError::unexpected_eof(self.source.len(), "'>'")),
        }
    }

    fn into_records(self, scanned: Vec<ScannedElement<'src>>) -> ParseResult<Vec<ElementRecord>> {
        let mut ids = IDGenerator::new(&self.options.path);
        for element in &scanned {
            if let Some((id, span)) = &element.explicit_id {
                if !ids.reserve(id) {
                    return Err(ParseError::DuplicateId {
                        span: span.clone(),
                        id: id.to_string(),
                    });
                }
            }
        }

        let lines = LineIndex::new(self.source);

        let records = scanned
            .into_iter()
            .enumerate()
            .map(|(n, element)| {
                let id = match element.explicit_id {
                    Some((id, _)) => id.to_string(),
                    None => ids.new_id(),
                };

                let range = SourceRange::from_positions(
                    lines.position(element.start),
                    lines.position(element.end),
                );

                ElementRecord::new(id, range)
                    .with_tag(element.tag)
                    .with_handle(RenderedHandle(n as u64))
            })
            .collect();

        Ok(records)
    }

    fn advance(&mut self) -> Option<(Token<'src>, Range<usize>)> {
        let item = self.tokens.get(self.pos).cloned();
        if item.is_some() {
            self.pos += 1;
        }
        item
    }

    fn peek(&self) -> Option<Token<'src>> {
        self.tokens.get(self.pos).map(|(token, _)| *token)
    }
}

/// Scan markup with default options
pub fn scan(source: &str) -> ParseResult<Vec<ElementRecord>> {
    scan_with_options(source, ScanOptions::default())
}

pub fn scan_with_options(source: &str, options: ScanOptions) -> ParseResult<Vec<ElementRecord>> {
    let path = options.path.clone();
    let records = Scanner::new(source, options).scan()?;
    tracing::debug!(path = %path, elements = records.len(), "Scanned SVG document");
    Ok(records)
}
