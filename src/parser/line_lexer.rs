//! Line lexer for splitting a command buffer into word tokens
//!
//! The lexer splits on whitespace while honoring `\` escapes and single or
//! double quoting, so `foo\ bar` and `"foo bar"` each come out as one token.
//! Token text is kept exactly as typed (quotes and escapes included) and each
//! token carries its byte span in the original buffer, which is what the
//! completion engine needs to translate in-token offsets back to buffer
//! offsets.
//!
//! Unlike most lexers in this crate's lineage, this one is allowed to fail:
//! an unterminated quote or a trailing escape is reported as an error so the
//! caller can decide how to degrade (the completion engine falls back to
//! treating the whole buffer as a single token; the REPL validator asks for
//! a continuation line).

use std::ops::Range;

use crate::error::ParseError;

/// One whitespace-delimited word with its location in the source buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineToken {
    /// Raw token text, exactly as it appears in the buffer.
    pub text: String,
    /// Byte range of the token in the buffer.
    pub span: Range<usize>,
}

impl LineToken {
    /// Create a new token.
    pub fn new(text: impl Into<String>, span: Range<usize>) -> Self {
        Self {
            text: text.into(),
            span,
        }
    }

    /// The token with quotes and escapes resolved, as a command action
    /// should see it. Completion works on the raw `text`; execution works
    /// on this.
    pub fn value(&self) -> String {
        let mut out = String::new();
        let mut quote: Option<char> = None;
        let mut escaped = false;

        for ch in self.text.chars() {
            if escaped {
                out.push(ch);
                escaped = false;
                continue;
            }
            if let Some(q) = quote {
                if ch == q {
                    quote = None;
                } else {
                    out.push(ch);
                }
                continue;
            }
            match ch {
                '\\' => escaped = true,
                '\'' | '"' => quote = Some(ch),
                _ => out.push(ch),
            }
        }

        out
    }
}

/// Escape- and quote-aware word splitter.
pub struct LineLexer;

impl LineLexer {
    /// Tokenize a buffer into word tokens.
    ///
    /// # Arguments
    /// * `input` - The raw command buffer
    ///
    /// # Returns
    /// * `Ok(Vec<LineToken>)` - The word tokens, in buffer order
    /// * `Err(ParseError)` - Unterminated quote or dangling escape
    pub fn tokenize(input: &str) -> Result<Vec<LineToken>, ParseError> {
        let mut tokens = Vec::new();
        let mut start: Option<usize> = None;
        let mut quote: Option<char> = None;
        let mut escaped = false;

        for (i, ch) in input.char_indices() {
            if escaped {
                // The escaped character is token content, whatever it is.
                escaped = false;
                continue;
            }

            if let Some(q) = quote {
                if ch == q {
                    quote = None;
                }
                continue;
            }

            match ch {
                '\\' => {
                    escaped = true;
                    start.get_or_insert(i);
                }
                '\'' | '"' => {
                    quote = Some(ch);
                    start.get_or_insert(i);
                }
                c if c.is_whitespace() => {
                    if let Some(s) = start.take() {
                        tokens.push(LineToken::new(&input[s..i], s..i));
                    }
                }
                _ => {
                    start.get_or_insert(i);
                }
            }
        }

        if escaped {
            return Err(ParseError::DanglingEscape);
        }
        if let Some(q) = quote {
            return Err(ParseError::UnterminatedQuote(q));
        }
        if let Some(s) = start {
            tokens.push(LineToken::new(&input[s..], s..input.len()));
        }

        Ok(tokens)
    }
}
