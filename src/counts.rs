//! Read/write accounting for a single pipe run.

use std::fmt;

/// Progress of a pipe run through its reader and writer.
///
/// `written` never exceeds `read`: a line has to be read before it can
/// produce an output line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LineCounts {
    pub read: u64,
    pub written: u64,
}

impl LineCounts {
    pub fn new(read: u64, written: u64) -> Self {
        Self { read, written }
    }
}

impl fmt::Display for LineCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} lines read, {} lines written", self.read, self.written)
    }
}
