use crate::error::{EditorError, EditorResult};
use std::ops::{Range, RangeInclusive};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditMode {
    #[default]
    Insert,
    Overwrite,
}

/// Where a `replace` call applies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    Point(usize),
    /// Inclusive byte range, always fully substituted.
    Range(RangeInclusive<usize>),
}

/// The mutable byte sequence behind a document.
///
/// `generation` is bumped once per mutating call so that observers
/// (geometry, strings view) can tell whether they are stale without
/// diffing content.
#[derive(Debug, Clone, Default)]
pub struct ByteBuffer {
    data: Vec<u8>,
    generation: u64,
}

impl ByteBuffer {
    pub fn new(data: Vec<u8>) -> Self {
        Self {
            data,
            generation: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    pub fn get(&self, index: usize) -> Option<u8> {
        self.data.get(index).copied()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Copy of the current content for consumers that outlive a borrow,
    /// e.g. a string scan that is advanced between input events.
    pub fn snapshot(&self) -> Arc<[u8]> {
        Arc::from(self.data.as_slice())
    }

    /// Swaps in a completely new content.
    pub fn set_data(&mut self, data: Vec<u8>) {
        self.data = data;
        self.generation += 1;
    }

    pub fn read(&self, range: Range<usize>) -> EditorResult<&[u8]> {
        if range.start > range.end {
            return Err(EditorError::InvalidRange {
                first: range.start,
                last: range.end,
                size: self.data.len(),
            });
        }
        if range.end > self.data.len() {
            return Err(EditorError::OutOfRange {
                index: range.end.saturating_sub(1),
                size: self.data.len(),
            });
        }
        Ok(&self.data[range])
    }

    /// Applies an edit and returns the index where it took effect.
    pub fn replace(&mut self, target: Target, bytes: &[u8], mode: EditMode) -> EditorResult<usize> {
        let size = self.data.len();
        let at = match target {
            Target::Range(range) => {
                let (first, last) = (*range.start(), *range.end());
                if first > last || last >= size {
                    return Err(EditorError::InvalidRange { first, last, size });
                }
                self.data.splice(first..=last, bytes.iter().copied());
                first
            }
            Target::Point(at) => match mode {
                EditMode::Insert => {
                    if at > size {
                        return Err(EditorError::OutOfRange { index: at, size });
                    }
                    self.data.splice(at..at, bytes.iter().copied());
                    at
                }
                EditMode::Overwrite => {
                    if at >= size {
                        return Err(EditorError::OutOfRange { index: at, size });
                    }
                    let end = (at + bytes.len().max(1)).min(size);
                    self.data.splice(at..end, bytes.iter().copied());
                    at
                }
            },
        };
        self.generation += 1;
        Ok(at)
    }
}
