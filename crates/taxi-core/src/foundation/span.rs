//! Source locations for diagnostics.
//!
//! The parser front end owns the source text; this crate only receives
//! [`Span`]s attached to declaration events and hands them back inside
//! diagnostics. A [`SourceMap`] can be populated by the caller so that
//! [`crate::error::DiagnosticFormatter`] can render snippets.
//!
//! # Examples
//!
//! ```
//! # use taxi_core::foundation::{SourceMap, Span};
//! let mut map = SourceMap::new();
//! let file_id = map.add_file("orders.taxi", "type Money {\n  amount : Decimal\n}".to_string());
//! let span = Span::new(file_id, 15, 31, 2);
//!
//! assert_eq!(map.snippet(&span), Some("amount : Decimal"));
//! assert_eq!(map.line_col(&span), Some((2, 3)));
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Compact source location reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    /// Index into `SourceMap` files
    pub file_id: u16,
    /// Byte offset of start position
    pub start: u32,
    /// Byte offset of end position (exclusive)
    pub end: u32,
    /// Cached line number (1-based) for the start position
    pub start_line: u16,
}

impl Span {
    /// File id used for locations that have no backing source.
    pub const UNKNOWN_FILE: u16 = u16::MAX;

    pub fn new(file_id: u16, start: u32, end: u32, start_line: u16) -> Self {
        Self {
            file_id,
            start,
            end,
            start_line,
        }
    }

    /// A span that points nowhere, for synthesized declarations.
    pub fn unknown() -> Self {
        Self::new(Self::UNKNOWN_FILE, 0, 0, 0)
    }

    pub fn is_unknown(&self) -> bool {
        self.file_id == Self::UNKNOWN_FILE
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    pub fn len(&self) -> u32 {
        self.end.saturating_sub(self.start)
    }

    /// Span covering both inputs, or `self` when they are in different files.
    pub fn merge(&self, other: &Span) -> Span {
        if self.file_id != other.file_id {
            return *self;
        }
        Span {
            file_id: self.file_id,
            start: self.start.min(other.start),
            end: self.end.max(other.end),
            start_line: self.start_line.min(other.start_line),
        }
    }
}

impl Default for Span {
    fn default() -> Self {
        Self::unknown()
    }
}

/// All source fragments that contributed to one compilation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceMap {
    files: Vec<SourceFile>,
}

/// A single source fragment with line indexing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceFile {
    pub path: PathBuf,
    pub source: String,
    /// Byte offsets of each line start, plus an EOF sentinel.
    pub line_starts: Vec<u32>,
}

impl SourceMap {
    pub fn new() -> Self {
        Self { files: Vec::new() }
    }

    /// Add a source fragment and return its id.
    ///
    /// Ids are assigned sequentially; the last id is reserved for
    /// [`Span::unknown`], so additions past that point are rejected.
    pub fn add_file(&mut self, path: impl Into<PathBuf>, source: String) -> u16 {
        let file_id = self.files.len().min(Span::UNKNOWN_FILE as usize) as u16;
        if file_id == Span::UNKNOWN_FILE {
            return file_id;
        }
        self.files.push(SourceFile::new(path.into(), source));
        file_id
    }

    pub fn file(&self, span: &Span) -> Option<&SourceFile> {
        self.files.get(span.file_id as usize)
    }

    pub fn file_path(&self, span: &Span) -> Option<&Path> {
        self.file(span).map(|file| file.path.as_path())
    }

    /// Source text covered by the span, if the span is in range.
    pub fn snippet(&self, span: &Span) -> Option<&str> {
        self.file(span)?
            .source
            .get(span.start as usize..span.end as usize)
    }

    /// 1-based (line, column) of the span start.
    pub fn line_col(&self, span: &Span) -> Option<(u32, u32)> {
        self.file(span)?.line_col(span.start)
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
    }
}

impl SourceFile {
    pub fn new(path: PathBuf, source: String) -> Self {
        let line_starts = compute_line_starts(&source);
        Self {
            path,
            source,
            line_starts,
        }
    }

    /// 1-based (line, column) for a byte offset, `None` past EOF.
    pub fn line_col(&self, offset: u32) -> Option<(u32, u32)> {
        if offset as usize > self.source.len() {
            return None;
        }
        let line_idx = match self.line_starts.binary_search(&offset) {
            Ok(idx) => idx,
            Err(idx) => idx.max(1) - 1,
        };
        let line_start = *self.line_starts.get(line_idx)?;
        Some(((line_idx + 1) as u32, offset - line_start + 1))
    }

    /// Byte range of a 1-based line, including its trailing newline.
    pub fn line_range(&self, line: u32) -> Option<(u32, u32)> {
        if line == 0 {
            return None;
        }
        let idx = (line - 1) as usize;
        let start = *self.line_starts.get(idx)?;
        let end = *self.line_starts.get(idx + 1)?;
        Some((start, end))
    }

    /// Text of a 1-based line without its line terminator.
    pub fn line_text(&self, line: u32) -> Option<&str> {
        let (start, end) = self.line_range(line)?;
        self.source
            .get(start as usize..end as usize)
            .map(|text| text.trim_end_matches(['\n', '\r']))
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len().saturating_sub(1)
    }
}

fn compute_line_starts(source: &str) -> Vec<u32> {
    let mut starts = vec![0];
    starts.extend(
        source
            .bytes()
            .enumerate()
            .filter(|(_, byte)| *byte == b'\n')
            .map(|(idx, _)| (idx + 1) as u32),
    );
    let eof = source.len() as u32;
    if starts.last() != Some(&eof) {
        starts.push(eof);
    }
    starts
}
