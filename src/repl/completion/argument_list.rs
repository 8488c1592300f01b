//! Cursor-aware argument list for completion
//!
//! The completion engine does not work on the raw buffer: it works on the
//! word tokens plus a description of where the cursor sits among them. That
//! description is the [`ArgumentList`], a plain immutable value produced
//! fresh for every completion call, never mutated afterwards.

use crate::error::ParseError;
use crate::parser::LineLexer;

/// The result of delimiting a buffer around a cursor position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgumentList {
    /// Word tokens of the buffer, in order.
    arguments: Vec<String>,

    /// Index of the token containing the cursor.
    cursor_index: usize,

    /// Cursor offset within that token.
    offset_in_token: usize,

    /// Absolute cursor offset in the buffer.
    buffer_offset: usize,
}

impl ArgumentList {
    /// Bundle tokenization results into an argument list.
    ///
    /// # Arguments
    /// * `arguments` - The word tokens
    /// * `cursor_index` - Token index of the cursor
    /// * `offset_in_token` - Cursor offset within that token
    /// * `buffer_offset` - Absolute cursor offset in the buffer
    pub fn new(
        arguments: Vec<String>,
        cursor_index: usize,
        offset_in_token: usize,
        buffer_offset: usize,
    ) -> Self {
        Self {
            arguments,
            cursor_index,
            offset_in_token,
            buffer_offset,
        }
    }

    /// Degraded form used when tokenization fails: the whole buffer is one
    /// token and the cursor keeps its absolute offset.
    pub fn whole_buffer(buffer: &str, cursor: usize) -> Self {
        Self {
            arguments: vec![buffer.to_string()],
            cursor_index: 0,
            offset_in_token: cursor,
            buffer_offset: cursor,
        }
    }

    /// The word tokens.
    pub fn arguments(&self) -> &[String] {
        &self.arguments
    }

    /// Token index of the cursor.
    pub fn cursor_index(&self) -> usize {
        self.cursor_index
    }

    /// Cursor offset within the cursor token.
    pub fn offset_in_token(&self) -> usize {
        self.offset_in_token
    }

    /// Absolute cursor offset in the buffer.
    pub fn buffer_offset(&self) -> usize {
        self.buffer_offset
    }

    /// The token under the cursor, or `""` if the index is out of range.
    pub fn cursor_argument(&self) -> &str {
        self.arguments
            .get(self.cursor_index)
            .map(String::as_str)
            .unwrap_or("")
    }
}

/// Tokenizer collaborator consumed by the completion engine.
///
/// Implementations may fail; the engine catches every error and degrades to
/// [`ArgumentList::whole_buffer`], so failures never reach completion
/// callers.
pub trait LineTokenizer: Send + Sync {
    /// Split `buffer` into word tokens and locate `cursor` among them.
    fn delimit(&self, buffer: &str, cursor: usize) -> Result<ArgumentList, ParseError>;
}

/// Word tokenizer built on [`LineLexer`].
///
/// When the cursor does not fall inside any token (it sits in separating
/// whitespace, or past the end of the buffer), an empty token is synthesized
/// at the cursor position so the engine always has a token to complete.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShellTokenizer;

impl LineTokenizer for ShellTokenizer {
    fn delimit(&self, buffer: &str, cursor: usize) -> Result<ArgumentList, ParseError> {
        let cursor = cursor.min(buffer.len());
        let tokens = LineLexer::tokenize(buffer)?;
        let mut arguments: Vec<String> = tokens.iter().map(|t| t.text.clone()).collect();

        let mut inside: Option<(usize, usize)> = None;
        let mut insert_before: Option<usize> = None;
        for (i, token) in tokens.iter().enumerate() {
            if cursor < token.span.start {
                insert_before = Some(i);
                break;
            }
            if cursor <= token.span.end {
                inside = Some((i, cursor - token.span.start));
                break;
            }
        }

        let (cursor_index, offset_in_token) = match (inside, insert_before) {
            (Some(found), _) => found,
            (None, Some(i)) => {
                arguments.insert(i, String::new());
                (i, 0)
            }
            (None, None) => {
                arguments.push(String::new());
                (arguments.len() - 1, 0)
            }
        };

        Ok(ArgumentList::new(
            arguments,
            cursor_index,
            offset_in_token,
            cursor,
        ))
    }
}
