//! Program container and the front-end error descriptor

use crate::opcode::Instruction;
use crate::types::Value;

use std::ops::Range;
use thiserror::Error;

/// A fully assembled program, immutable once handed to the interpreter.
#[derive(Debug, Default, Clone)]
pub struct Program {
    /// The instruction sequence, executed from index zero.
    pub instructions: Vec<Instruction>,
    /// String-literal pool indexed by the `STR` opcode.
    pub strings: Vec<String>,
    /// Literal pool, reserved; the emitter currently inlines literals.
    pub literals: Vec<Value>,
}

impl Program {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Stage that produced a [`SourceError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorKind {
    File,
    Lexer,
    Preprocessor,
    Syntax,
    Typing,
    Logic,
    Evaluation,
}

impl ErrorKind {
    /// Three-letter code shown in the failure banner.
    pub const fn code(self) -> &'static str {
        match self {
            Self::File => "FLM",
            Self::Lexer => "LXR",
            Self::Preprocessor => "PPR",
            Self::Syntax => "SYX",
            Self::Typing => "TYP",
            Self::Logic => "LGC",
            Self::Evaluation => "EVL",
        }
    }
}

/// An error raised by one of the front-end collaborators over a source
/// unit. The interpreter itself only ever produces the `Evaluation`
/// kind, and does so through `Crash`, not through this descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("[{}] {file}:{line}: {message}", .kind.code())]
pub struct SourceError {
    file: String,
    message: String,
    line: u32,
    position: Range<u32>,
    kind: ErrorKind,
}

impl SourceError {
    /// Builds a descriptor over `source`, deriving the 1-based line
    /// number from the byte position of the offending lexeme.
    pub fn new(
        file: impl Into<String>,
        message: impl Into<String>,
        source: &str,
        position: Range<u32>,
        kind: ErrorKind,
    ) -> Self {
        let cursor = (position.start as usize).min(source.len());
        let line = source[..cursor].bytes().filter(|byte| *byte == b'\n').count() as u32 + 1;
        Self {
            file: file.into(),
            message: message.into(),
            line,
            position,
            kind,
        }
    }

    pub fn file(&self) -> &str {
        &self.file
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn line(&self) -> u32 {
        self.line
    }

    pub const fn position(&self) -> &Range<u32> {
        &self.position
    }

    pub const fn kind(&self) -> ErrorKind {
        self.kind
    }
}
