//! # line-pipe
//!
//! A line-at-a-time stream transformation library.
//!
//! Reads a byte stream, splits it into `\n`-delimited lines, passes each
//! line through a caller-supplied transformation and writes the results,
//! keeping count of lines read and lines written.
//!
//! ## Overview
//!
//! - **Splitting**: lines are `\n`-delimited; a final line without a
//!   delimiter is still read
//! - **Transforming**: a transformation returns the output line, an empty
//!   line to skip, or an error to stop the run
//! - **Accounting**: every failure carries the counts at the moment the
//!   run stopped, and says whether the reader, the writer, or the
//!   transformation failed
//!
//! ## Example
//!
//! ```
//! use line_pipe::{LineCounts, pipe_lines};
//!
//! let input = "foo fighters\narctic monkeys\nlime cordiale\n";
//! let mut output = Vec::new();
//!
//! let counts = pipe_lines(input.as_bytes(), &mut output, |line: &str| {
//!     if line.starts_with("arctic") {
//!         Ok::<_, String>(String::new())
//!     } else {
//!         Ok(line.to_uppercase())
//!     }
//! })
//! .unwrap();
//!
//! assert_eq!(counts, LineCounts::new(3, 2));
//! assert_eq!(output, b"FOO FIGHTERS\nLIME CORDIALE\n");
//! ```

pub mod counts;
pub mod dsl;
pub mod error;
pub mod line_stage;
pub mod pipe;
pub mod splitter;
pub mod transform;

pub use counts::LineCounts;
pub use dsl::{Command, StageError, parse_commands};
pub use error::{BoxError, PipeError};
pub use line_stage::{LineStage, StageChain, command_to_line_stage};
pub use pipe::{pipe_bytes, pipe_lines};
pub use splitter::Lines;
pub use transform::{ByteTransform, LineTransform, identity, identity_bytes};
