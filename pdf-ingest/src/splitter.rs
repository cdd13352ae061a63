//! Recursive character splitter.
//!
//! Text is cut on the coarsest separator that occurs in it (`"\n\n"`, then
//! `"\n"`, then `" "`, then between characters). Pieces shorter than
//! `chunk_size` are merged greedily into chunks with up to `chunk_overlap`
//! characters carried over from the previous chunk; longer pieces are split
//! again with the finer separators. Lengths count Unicode scalar values.
//!
//! Internally everything is a byte range into the input, so every chunk is
//! an exact (trimmed) slice of the source text.

use std::collections::VecDeque;
use std::ops::Range;

use tracing::warn;

use crate::errors::SplitterError;

pub const DEFAULT_CHUNK_SIZE: usize = 2500;
pub const DEFAULT_CHUNK_OVERLAP: usize = 350;

/// Paragraph, line, word, character.
pub const DEFAULT_SEPARATORS: [&str; 4] = ["\n\n", "\n", " ", ""];

/// Chunk length bounds, in characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitterConfig {
    pub chunk_size: usize,
    pub chunk_overlap: usize,
}

impl Default for SplitterConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            chunk_overlap: DEFAULT_CHUNK_OVERLAP,
        }
    }
}

impl SplitterConfig {
    /// # Errors
    /// [`SplitterError::ZeroChunkSize`] or [`SplitterError::OverlapTooLarge`].
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Result<Self, SplitterError> {
        if chunk_size == 0 {
            return Err(SplitterError::ZeroChunkSize);
        }
        if chunk_overlap >= chunk_size {
            return Err(SplitterError::OverlapTooLarge {
                size: chunk_size,
                overlap: chunk_overlap,
            });
        }
        Ok(Self {
            chunk_size,
            chunk_overlap,
        })
    }

    /// Reads `CHUNK_SIZE` / `CHUNK_OVERLAP`, falling back to 2500 / 350.
    pub fn from_env() -> Result<Self, SplitterError> {
        let size = env_usize("CHUNK_SIZE")?.unwrap_or(DEFAULT_CHUNK_SIZE);
        let overlap = env_usize("CHUNK_OVERLAP")?.unwrap_or(DEFAULT_CHUNK_OVERLAP);
        Self::new(size, overlap)
    }
}

fn env_usize(var: &'static str) -> Result<Option<usize>, SplitterError> {
    match std::env::var(var) {
        Ok(v) if !v.trim().is_empty() => v
            .trim()
            .parse::<usize>()
            .map(Some)
            .map_err(|_| SplitterError::InvalidNumber { var, value: v }),
        _ => Ok(None),
    }
}

#[derive(Debug, Clone)]
pub struct RecursiveSplitter {
    cfg: SplitterConfig,
    separators: Vec<&'static str>,
}

impl Default for RecursiveSplitter {
    fn default() -> Self {
        Self::new(SplitterConfig::default())
    }
}

impl RecursiveSplitter {
    pub fn new(cfg: SplitterConfig) -> Self {
        Self {
            cfg,
            separators: DEFAULT_SEPARATORS.to_vec(),
        }
    }

    pub fn config(&self) -> SplitterConfig {
        self.cfg
    }

    /// Splits `text` into ordered chunk strings.
    pub fn split(&self, text: &str) -> Vec<String> {
        self.split_spans(text)
            .into_iter()
            .map(|r| text[r].to_string())
            .collect()
    }

    /// Byte ranges of the chunks in `text`.
    ///
    /// Starts and ends are non-decreasing; each range is trimmed of
    /// surrounding whitespace and non-empty.
    pub fn split_spans(&self, text: &str) -> Vec<Range<usize>> {
        let mut out = Vec::new();
        self.split_range(text, 0..text.len(), &self.separators, &mut out);
        out
    }

    fn split_range(
        &self,
        text: &str,
        range: Range<usize>,
        separators: &[&'static str],
        out: &mut Vec<Range<usize>>,
    ) {
        let segment = &text[range.clone()];

        let mut separator = "";
        let mut finer: &[&'static str] = &[];
        for (i, sep) in separators.iter().enumerate() {
            if sep.is_empty() {
                break;
            }
            if segment.contains(sep) {
                separator = sep;
                finer = &separators[i + 1..];
                break;
            }
        }

        let mut good: Vec<(Range<usize>, usize)> = Vec::new();
        for piece in pieces(segment, separator) {
            let piece = (piece.start + range.start)..(piece.end + range.start);
            let len = text[piece.clone()].chars().count();
            if len < self.cfg.chunk_size {
                good.push((piece, len));
                continue;
            }
            if !good.is_empty() {
                self.merge(text, &good, out);
                good.clear();
            }
            if finer.is_empty() {
                push_trimmed(text, piece, out);
            } else {
                self.split_range(text, piece, finer, out);
            }
        }
        if !good.is_empty() {
            self.merge(text, &good, out);
        }
    }

    /// Greedy merge of contiguous short pieces with character overlap.
    fn merge(&self, text: &str, pieces: &[(Range<usize>, usize)], out: &mut Vec<Range<usize>>) {
        let size = self.cfg.chunk_size;
        let overlap = self.cfg.chunk_overlap;

        let mut window: VecDeque<(Range<usize>, usize)> = VecDeque::new();
        let mut total = 0usize;

        for (piece, len) in pieces {
            if total + len > size {
                if total > size {
                    warn!(total, chunk_size = size, "created a chunk longer than chunk_size");
                }
                if let (Some(first), Some(last)) = (window.front(), window.back()) {
                    push_trimmed(text, first.0.start..last.0.end, out);
                    while total > overlap || (total + len > size && total > 0) {
                        let Some((_, dropped)) = window.pop_front() else {
                            break;
                        };
                        total -= dropped;
                    }
                }
            }
            window.push_back((piece.clone(), *len));
            total += len;
        }

        if let (Some(first), Some(last)) = (window.front(), window.back()) {
            push_trimmed(text, first.0.start..last.0.end, out);
        }
    }
}

/// Splits `segment` before every occurrence of `separator`, keeping the
/// separator at the start of the following piece. Empty pieces are dropped.
/// An empty separator yields one piece per character.
fn pieces(segment: &str, separator: &str) -> Vec<Range<usize>> {
    if separator.is_empty() {
        return segment
            .char_indices()
            .map(|(i, c)| i..i + c.len_utf8())
            .collect();
    }
    let mut out = Vec::new();
    let mut start = 0;
    for (pos, _) in segment.match_indices(separator) {
        if pos > start {
            out.push(start..pos);
        }
        start = pos;
    }
    if segment.len() > start {
        out.push(start..segment.len());
    }
    out
}

fn push_trimmed(text: &str, range: Range<usize>, out: &mut Vec<Range<usize>>) {
    let slice = &text[range.clone()];
    let lead = slice.len() - slice.trim_start().len();
    let trimmed = slice.trim();
    if !trimmed.is_empty() {
        let start = range.start + lead;
        out.push(start..start + trimmed.len());
    }
}
