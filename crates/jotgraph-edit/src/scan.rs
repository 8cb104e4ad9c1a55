//! Byte-level scanning of formatted JSON text.
//!
//! `span_of` finds the byte range of the value addressed by a structural
//! path without building a tree, so that everything outside the range can be
//! preserved verbatim. `splice` substitutes a new value into such a range,
//! re-indented to match the surrounding text.
//!
//! The cursor only ever dispatches on ASCII structural bytes, so byte
//! positions are always valid UTF-8 boundaries. Keys are decoded with
//! serde_json before comparison, so escaped keys in the text match their
//! decoded path segments.

use crate::error::EditResult;
use crate::{Path, Seg};
use serde_json::Value;
use std::ops::Range;

/// Byte range of the value at `path` inside `text`.
///
/// Returns `None` whenever the text cannot be navigated to the path: not
/// valid JSON, a missing key, an out-of-range index, a container of the
/// wrong shape. Numeric segments enter arrays by position; on an object they
/// fall back to the stringified key, matching the object-biased write path.
pub fn span_of(text: &str, path: &Path) -> Option<Range<usize>> {
    let mut cursor = Cursor::new(text);
    cursor.skip_ws();
    for seg in path.iter() {
        match seg {
            Seg::Key(key) => cursor.enter_key(key)?,
            Seg::Index(idx) => cursor.enter_index(*idx)?,
        }
    }
    let start = cursor.pos;
    cursor.skip_value()?;
    Some(start..cursor.pos)
}

/// Replace `span` in `text` with the pretty-printed form of `value`.
///
/// The replacement uses 2-space indentation; continuation lines are prefixed
/// with the indentation of the line the span starts on, so nested values
/// land at the surrounding depth.
pub fn splice(text: &str, span: Range<usize>, value: &Value) -> EditResult<String> {
    let mut rendered = serde_json::to_string_pretty(value)?;
    let indent = line_indent(text, span.start);
    if !indent.is_empty() && rendered.contains('\n') {
        rendered = rendered.replace('\n', &format!("\n{indent}"));
    }
    let mut out = String::with_capacity(text.len() - span.len() + rendered.len());
    out.push_str(&text[..span.start]);
    out.push_str(&rendered);
    out.push_str(&text[span.end..]);
    Ok(out)
}

/// Leading whitespace of the line containing byte offset `at`.
fn line_indent(text: &str, at: usize) -> &str {
    let line_start = text[..at].rfind('\n').map_or(0, |n| n + 1);
    let line = &text[line_start..at];
    let end = line
        .find(|c: char| c != ' ' && c != '\t')
        .unwrap_or(line.len());
    &line[..end]
}

struct Cursor<'a> {
    text: &'a str,
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            text,
            buf: text.as_bytes(),
            pos: 0,
        }
    }

    #[inline]
    fn peek(&self) -> Option<u8> {
        self.buf.get(self.pos).copied()
    }

    fn skip_ws(&mut self) {
        while matches!(self.peek(), Some(b' ' | b'\t' | b'\n' | b'\r')) {
            self.pos += 1;
        }
    }

    /// Position the cursor on the value of `key` inside the object starting
    /// at the current position.
    fn enter_key(&mut self, key: &str) -> Option<()> {
        if self.peek()? != b'{' {
            return None;
        }
        self.pos += 1;
        loop {
            self.skip_ws();
            if self.peek()? == b'}' {
                return None;
            }
            let found = self.parse_string()?;
            self.skip_ws();
            if self.peek()? != b':' {
                return None;
            }
            self.pos += 1;
            self.skip_ws();
            if found == key {
                return Some(());
            }
            self.skip_value()?;
            self.skip_ws();
            if self.peek()? != b',' {
                return None;
            }
            self.pos += 1;
        }
    }

    /// Position the cursor on element `idx` of the array starting at the
    /// current position. An object here is entered by stringified key.
    fn enter_index(&mut self, idx: usize) -> Option<()> {
        if self.peek()? == b'{' {
            return self.enter_key(&idx.to_string());
        }
        if self.peek()? != b'[' {
            return None;
        }
        self.pos += 1;
        self.skip_ws();
        if self.peek()? == b']' {
            return None;
        }
        for _ in 0..idx {
            self.skip_value()?;
            self.skip_ws();
            if self.peek()? != b',' {
                return None;
            }
            self.pos += 1;
            self.skip_ws();
        }
        Some(())
    }

    /// Decode the string literal at the cursor and advance past it.
    fn parse_string(&mut self) -> Option<String> {
        let start = self.pos;
        self.skip_string()?;
        serde_json::from_str(&self.text[start..self.pos]).ok()
    }

    fn skip_string(&mut self) -> Option<()> {
        if self.peek()? != b'"' {
            return None;
        }
        self.pos += 1;
        loop {
            match self.peek()? {
                b'\\' => self.pos += 2,
                b'"' => {
                    self.pos += 1;
                    return Some(());
                }
                _ => self.pos += 1,
            }
        }
    }

    /// Advance past one complete value of any kind.
    fn skip_value(&mut self) -> Option<()> {
        self.skip_ws();
        match self.peek()? {
            b'"' => self.skip_string(),
            b'{' | b'[' => {
                let mut depth = 0usize;
                loop {
                    match self.peek()? {
                        b'"' => {
                            self.skip_string()?;
                        }
                        b'{' | b'[' => {
                            depth += 1;
                            self.pos += 1;
                        }
                        b'}' | b']' => {
                            depth = depth.checked_sub(1)?;
                            self.pos += 1;
                            if depth == 0 {
                                return Some(());
                            }
                        }
                        _ => self.pos += 1,
                    }
                }
            }
            _ => {
                // Bare literal: number, true, false, null. Consume to the
                // next delimiter; validity is the reparse check's problem.
                let start = self.pos;
                while let Some(b) = self.peek() {
                    if matches!(b, b',' | b'}' | b']' | b' ' | b'\t' | b'\n' | b'\r') {
                        break;
                    }
                    self.pos += 1;
                }
                (self.pos > start).then_some(())
            }
        }
    }
}
