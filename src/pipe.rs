//! The pipe driver: read a line, transform it, write the result.
//!
//! Lines are pulled one at a time from the reader, handed to a step
//! function, and the step decides whether anything is written. The driver
//! owns the `LineCounts` for the run and stops at the first failure.

use crate::LineCounts;
use crate::error::PipeError;
use crate::splitter::Lines;
use crate::transform::{ByteTransform, LineTransform};
use std::io::{BufReader, BufWriter, Read, Write};
use tracing::{debug, trace, warn};

/// Reads lines from `reader`, passes each through `transform`, and writes
/// the returned lines to `writer`.
///
/// With a shell function `middle` this behaves like
/// `cat reader | middle > writer`. Each line must be valid UTF-8; an
/// undecodable line stops the run with a [`PipeError::Transform`].
pub fn pipe_lines<R, W, T>(
    reader: R,
    writer: W,
    mut transform: T,
) -> Result<LineCounts, PipeError>
where
    R: Read,
    W: Write,
    T: LineTransform,
{
    pipe(reader, writer, |line, sink, counts| {
        let line = String::from_utf8(line).map_err(|e| PipeError::Transform {
            counts: *counts,
            source: Box::new(e),
        })?;

        let out = transform
            .transform(&line)
            .map_err(|source| PipeError::Transform {
                counts: *counts,
                source,
            })?;

        write_line(sink, out.as_bytes(), counts)
    })
}

/// Same as [`pipe_lines`], but the transformation works on raw bytes and
/// no decoding is done.
pub fn pipe_bytes<R, W, T>(
    reader: R,
    writer: W,
    mut transform: T,
) -> Result<LineCounts, PipeError>
where
    R: Read,
    W: Write,
    T: ByteTransform,
{
    pipe(reader, writer, |line, sink, counts| {
        let out = transform
            .transform(&line)
            .map_err(|source| PipeError::Transform {
                counts: *counts,
                source,
            })?;

        write_line(sink, &out, counts)
    })
}

/// Writes `content` plus a newline and flushes it, or does nothing if
/// `content` is empty.
///
/// `written` is only bumped once the line has reached the writer.
fn write_line<W: Write>(
    sink: &mut W,
    content: &[u8],
    counts: &mut LineCounts,
) -> Result<(), PipeError> {
    if content.is_empty() {
        trace!(line = counts.read, "line skipped");
        return Ok(());
    }

    sink.write_all(content)
        .and_then(|()| sink.write_all(b"\n"))
        .and_then(|()| sink.flush())
        .map_err(|source| PipeError::Write {
            counts: *counts,
            source,
        })?;

    counts.written += 1;
    Ok(())
}

/// Drives one run. `step` is called once per line, after `read` has been
/// incremented for it, and returns the error that ends the run.
///
/// The counts embedded in an error returned by `step` are returned as-is.
fn pipe<R, W, S>(reader: R, writer: W, mut step: S) -> Result<LineCounts, PipeError>
where
    R: Read,
    W: Write,
    S: FnMut(Vec<u8>, &mut BufWriter<W>, &mut LineCounts) -> Result<(), PipeError>,
{
    let mut counts = LineCounts::default();
    let mut sink = BufWriter::new(writer);
    debug!("pipe started");

    for line in Lines::new(BufReader::new(reader)) {
        let result = match line {
            Ok(line) => {
                counts.read += 1;
                step(line, &mut sink, &mut counts)
            }
            Err(source) => Err(PipeError::Read { counts, source }),
        };

        if let Err(e) = result {
            // Every counted line has already been flushed. Anything still
            // buffered belongs to the line that failed and is not delivered.
            let (_, unflushed) = sink.into_parts();
            if let Ok(bytes) = unflushed
                && !bytes.is_empty()
            {
                debug!(bytes = bytes.len(), "discarding partial line");
            }

            let failed = e.line_counts();
            warn!(
                origin = e.origin(),
                read = failed.read,
                written = failed.written,
                "pipe stopped: {e}"
            );
            return Err(e);
        }
    }

    sink.flush()
        .map_err(|source| PipeError::Write { counts, source })?;

    debug!(read = counts.read, written = counts.written, "pipe finished");
    Ok(counts)
}
