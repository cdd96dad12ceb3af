//! Tokenizer for SVG markup using logos
//!
//! Markup needs two lexing modes: between tags everything up to the next `<`
//! is text, while inside a tag whitespace separates names, `=` and quoted
//! values. Each mode is its own logos lexer and `tokenize` morphs between
//! them whenever a tag opens or closes.

use logos::{Lexer, Logos};
use std::ops::Range;

/// Flat token stream consumed by the scanner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'src> {
    /// `<name`
    StartTagOpen(&'src str),
    /// `</name`
    EndTagOpen(&'src str),
    /// `>`
    TagClose,
    /// `/>`
    SelfClose,
    AttrName(&'src str),
    Eq,
    /// Attribute value without its quotes
    AttrValue(&'src str),
    Text,
    Comment,
    CData,
    ProcessingInstruction,
    Doctype,
    Error,
}

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
enum Content<'src> {
    #[regex(r"<[A-Za-z_:][A-Za-z0-9_:.\-]*", |lex| &lex.slice()[1..])]
    StartTagOpen(&'src str),

    #[regex(r"</[A-Za-z_:][A-Za-z0-9_:.\-]*", |lex| &lex.slice()[2..])]
    EndTagOpen(&'src str),

    #[token("<!--", |lex| skip_past(lex, "-->"))]
    Comment,

    #[token("<![CDATA[", |lex| skip_past(lex, "]]>"))]
    CData,

    #[token("<?", |lex| skip_past(lex, "?>"))]
    ProcessingInstruction,

    #[token("<!", |lex| skip_past(lex, ">"))]
    Doctype,

    #[regex(r"[^<]+")]
    Text,
}

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n]+")]
enum InTag<'src> {
    #[regex(r"[A-Za-z_:][A-Za-z0-9_:.\-]*", |lex| lex.slice())]
    Name(&'src str),

    #[token("=")]
    Eq,

    #[regex(r#""[^"]*""#, |lex| strip_quotes(lex.slice()))]
    #[regex(r"'[^']*'", |lex| strip_quotes(lex.slice()))]
    Value(&'src str),

    #[token(">")]
    Close,

    #[token("/>")]
    SelfClose,
}

/// Consume everything up to and including `terminator`; an unterminated
/// construct swallows the rest of the input and lexes as an error.
fn skip_past<'src>(lex: &mut Lexer<'src, Content<'src>>, terminator: &str) -> bool {
    match lex.remainder().find(terminator) {
        Some(offset) => {
            lex.bump(offset + terminator.len());
            true
        }
        None => {
            lex.bump(lex.remainder().len());
            false
        }
    }
}

fn strip_quotes(s: &str) -> &str {
    &s[1..s.len() - 1]
}

/// Tokenize SVG markup into `(token, byte span)` pairs.
pub fn tokenize(source: &str) -> Vec<(Token<'_>, Range<usize>)> {
    let mut tokens = Vec::new();
    let mut content = Content::lexer(source);

    while let Some(result) = content.next() {
        let span = content.span();
        let token = match result {
            Ok(Content::StartTagOpen(name)) => Token::StartTagOpen(name),
            Ok(Content::EndTagOpen(name)) => Token::EndTagOpen(name),
            Ok(Content::Comment) => Token::Comment,
            Ok(Content::CData) => Token::CData,
            Ok(Content::ProcessingInstruction) => Token::ProcessingInstruction,
            Ok(Content::Doctype) => Token::Doctype,
            Ok(Content::Text) => Token::Text,
            Err(_) => Token::Error,
        };

        let opens_tag = matches!(token, Token::StartTagOpen(_) | Token::EndTagOpen(_));
        tokens.push((token, span));

        if opens_tag {
            let mut tag = content.morph::<InTag>();

            while let Some(result) = tag.next() {
                let span = tag.span();
                let token = match result {
                    Ok(InTag::Name(name)) => Token::AttrName(name),
                    Ok(InTag::Eq) => Token::Eq,
                    Ok(InTag::Value(value)) => Token::AttrValue(value),
                    Ok(InTag::Close) => Token::TagClose,
                    Ok(InTag::SelfClose) => Token::SelfClose,
                    Err(_) => Token::Error,
                };

                let closes_tag = matches!(token, Token::TagClose | Token::SelfClose);
                tokens.push((token, span));

                if closes_tag {
                    break;
                }
            }

            content = tag.morph();
        }
    }

    tokens
}
