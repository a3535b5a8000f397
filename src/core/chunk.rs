//! Partitioning of record ranges into chunks and batches
//!
//! Update and delete work on record identifiers `1..=n` split into chunks,
//! one chunk per worker task. Inserts work on synthetic record indices
//! `0..n` split into batches, one transaction per batch.

use std::fmt;
use std::ops::Range;

use crate::core::errors::{BenchError, Result};

/// A contiguous run of record identifiers, `start..end` (end exclusive)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chunk {
    start: i64,
    end: i64,
}

impl Chunk {
    /// Create a chunk covering `start..end`
    pub fn new(start: i64, end: i64) -> Self {
        Chunk { start, end: end.max(start) }
    }

    /// First identifier of the chunk
    pub fn start(&self) -> i64 {
        self.start
    }

    /// One past the last identifier of the chunk
    pub fn end(&self) -> i64 {
        self.end
    }

    pub fn len(&self) -> usize {
        (self.end - self.start) as usize
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Iterate over the identifiers in ascending order
    pub fn ids(&self) -> impl Iterator<Item = i64> {
        self.start..self.end
    }
}

impl fmt::Display for Chunk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            write!(f, "[]")
        } else {
            write!(f, "[{}..={}]", self.start, self.end - 1)
        }
    }
}

fn check_size(size: usize, what: &str) -> Result<()> {
    if size == 0 {
        return Err(BenchError::InvalidConfig(format!("{} must be greater than zero", what)));
    }
    Ok(())
}

/// Split identifiers `1..=count` into chunks of at most `chunk_size` ids
pub fn chunk_ids(count: usize, chunk_size: usize) -> Result<Vec<Chunk>> {
    check_size(chunk_size, "chunk size")?;

    let last = count as i64 + 1;
    let step = chunk_size as i64;
    let chunks = (1..last)
        .step_by(chunk_size)
        .map(|start| Chunk::new(start, (start + step).min(last)))
        .collect();

    Ok(chunks)
}

/// Split record indices `0..count` into batches of at most `batch_size`
pub fn batch_ranges(count: usize, batch_size: usize) -> Result<Vec<Range<usize>>> {
    check_size(batch_size, "batch size")?;

    Ok((0..count)
        .step_by(batch_size)
        .map(|start| start..(start + batch_size).min(count))
        .collect())
}
