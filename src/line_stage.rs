//! Line stage trait and implementations.
//!
//! Each `LineStage` maps one line to zero or one line, which is exactly
//! the contract of a line transformation. A `StageChain` runs several
//! stages in order and can be handed straight to [`crate::pipe_lines`].

use crate::dsl::{Command, StageError, parse_commands};
use crate::error::BoxError;
use crate::transform::LineTransform;

/// A pipeline stage that processes lines one at a time.
pub trait LineStage {
    /// Process a single line, returning `None` to drop it.
    fn process(&mut self, line: String) -> Option<String>;

    /// The display name of this stage.
    fn name(&self) -> &str;
}

// ---------------------------------------------------------------------------
// Stage implementations
// ---------------------------------------------------------------------------

/// LOCATE - keeps lines containing a pattern.
pub struct LocateStage {
    pattern: String,
}

impl LineStage for LocateStage {
    fn process(&mut self, line: String) -> Option<String> {
        line.contains(self.pattern.as_str()).then_some(line)
    }

    fn name(&self) -> &str {
        "LOCATE"
    }
}

/// NLOCATE - keeps lines NOT containing a pattern.
pub struct NlocateStage {
    pattern: String,
}

impl LineStage for NlocateStage {
    fn process(&mut self, line: String) -> Option<String> {
        (!line.contains(self.pattern.as_str())).then_some(line)
    }

    fn name(&self) -> &str {
        "NLOCATE"
    }
}

/// CHANGE - replaces all occurrences of one string with another.
pub struct ChangeStage {
    old: String,
    new: String,
}

impl LineStage for ChangeStage {
    fn process(&mut self, line: String) -> Option<String> {
        Some(line.replace(self.old.as_str(), &self.new))
    }

    fn name(&self) -> &str {
        "CHANGE"
    }
}

/// UPPER - converts lines to uppercase.
pub struct UpperStage;

impl LineStage for UpperStage {
    fn process(&mut self, line: String) -> Option<String> {
        Some(line.to_uppercase())
    }

    fn name(&self) -> &str {
        "UPPER"
    }
}

/// LOWER - converts lines to lowercase.
pub struct LowerStage;

impl LineStage for LowerStage {
    fn process(&mut self, line: String) -> Option<String> {
        Some(line.to_lowercase())
    }

    fn name(&self) -> &str {
        "LOWER"
    }
}

/// REVERSE - reverses characters in each line.
pub struct ReverseStage;

impl LineStage for ReverseStage {
    fn process(&mut self, line: String) -> Option<String> {
        Some(line.chars().rev().collect())
    }

    fn name(&self) -> &str {
        "REVERSE"
    }
}

/// STRIP - trims leading and trailing whitespace.
pub struct StripStage;

impl LineStage for StripStage {
    fn process(&mut self, line: String) -> Option<String> {
        Some(line.trim().to_string())
    }

    fn name(&self) -> &str {
        "STRIP"
    }
}

/// TAKE n - keeps the first n lines, discards the rest.
pub struct TakeStage {
    n: u64,
    seen: u64,
}

impl LineStage for TakeStage {
    fn process(&mut self, line: String) -> Option<String> {
        if self.seen < self.n {
            self.seen += 1;
            Some(line)
        } else {
            None
        }
    }

    fn name(&self) -> &str {
        "TAKE"
    }
}

/// SKIP n - skips the first n lines, passes the rest.
pub struct SkipStage {
    n: u64,
    seen: u64,
}

impl LineStage for SkipStage {
    fn process(&mut self, line: String) -> Option<String> {
        if self.seen < self.n {
            self.seen += 1;
            None
        } else {
            Some(line)
        }
    }

    fn name(&self) -> &str {
        "SKIP"
    }
}

/// Convert a parsed `Command` into a boxed `LineStage`.
pub fn command_to_line_stage(cmd: &Command) -> Box<dyn LineStage> {
    match cmd {
        Command::Locate { pattern } => Box::new(LocateStage {
            pattern: pattern.clone(),
        }),
        Command::Nlocate { pattern } => Box::new(NlocateStage {
            pattern: pattern.clone(),
        }),
        Command::Change { old, new } => Box::new(ChangeStage {
            old: old.clone(),
            new: new.clone(),
        }),
        Command::Upper => Box::new(UpperStage),
        Command::Lower => Box::new(LowerStage),
        Command::Reverse => Box::new(ReverseStage),
        Command::Strip => Box::new(StripStage),
        Command::Take { n } => Box::new(TakeStage { n: *n, seen: 0 }),
        Command::Skip { n } => Box::new(SkipStage { n: *n, seen: 0 }),
    }
}

/// Stages applied to each line in order.
///
/// A line dropped by one stage is not seen by the stages after it. An
/// empty chain passes every line through.
#[derive(Default)]
pub struct StageChain {
    stages: Vec<Box<dyn LineStage>>,
}

impl StageChain {
    pub fn new(stages: Vec<Box<dyn LineStage>>) -> Self {
        Self { stages }
    }

    /// Parse a stage script into a chain.
    pub fn parse(script: &str) -> Result<Self, StageError> {
        let commands = parse_commands(script)?;
        Ok(Self::new(
            commands.iter().map(command_to_line_stage).collect(),
        ))
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    pub fn names(&self) -> Vec<&str> {
        self.stages.iter().map(|s| s.name()).collect()
    }

    /// Push one line through every stage.
    pub fn process(&mut self, line: String) -> Option<String> {
        self.stages
            .iter_mut()
            .try_fold(line, |line, stage| stage.process(line))
    }
}

impl LineTransform for StageChain {
    fn transform(&mut self, line: &str) -> Result<String, BoxError> {
        Ok(self.process(line.to_string()).unwrap_or_default())
    }
}
