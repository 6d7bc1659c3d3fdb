//! Runtime crash representation
//!
//! Faults are produced deep inside the dispatch arms and carry no
//! location; the executor wraps the fault together with the offending
//! program counter and instruction into a [`Crash`], the only error the
//! evaluation entry points surface.

use crate::opcode::{Instruction, Interrupt, Opcode, TypePair};
use crate::types::Type;

use num_enum::TryFromPrimitiveError;
use thiserror::Error;

/// Reason for a runtime crash.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Fault {
    /// The byte can't be mapped to any known opcode.
    #[error("unknown opcode")]
    UnknownOpcode,
    /// The byte can't be mapped to any known type tag.
    #[error("unknown type")]
    UnknownType,
    /// The opcode has no arm for the carried type pair.
    #[error("invalid operand types {}, {}", .0.left.code(), .0.right.code())]
    InvalidTypes(TypePair),
    /// The opcode has no arm for the carried type.
    #[error("invalid operand type {}", .0.code())]
    InvalidType(Type),
    /// Integral division or modulus by zero.
    #[error("division by zero")]
    DivisionByZero,
    /// String, array, stack-slot or string-pool index out of range.
    #[error("index out of range")]
    IndexOutOfRange,
    /// `LAM` through a zero routine address.
    #[error("invalid routine address")]
    NullRoutine,
    /// The native-call code has no table entry.
    #[error("unknown native call {0:#06x}")]
    UnknownNativeCall(u16),
    /// The interrupt code has no handler.
    #[error("unknown interrupt {0:#04x}")]
    UnknownInterrupt(u8),
    /// A value held a different representation than the opcode declared.
    #[error("value representation mismatch")]
    ValueMismatch,
    /// The instruction operand slot holds the wrong operand kind.
    #[error("missing instruction operand")]
    MissingOperand,
    /// A pop or peek on an empty stack.
    #[error("stack underflow")]
    StackUnderflow,
    /// A handle that no longer resolves to a live arena object.
    #[error("dangling object handle")]
    DanglingObject,
    /// The host stream failed during an interrupt.
    #[error("stream failure")]
    Stream,
}

impl From<TryFromPrimitiveError<Opcode>> for Fault {
    fn from(_: TryFromPrimitiveError<Opcode>) -> Self {
        Self::UnknownOpcode
    }
}

impl From<TryFromPrimitiveError<Type>> for Fault {
    fn from(_: TryFromPrimitiveError<Type>) -> Self {
        Self::UnknownType
    }
}

impl From<TryFromPrimitiveError<Interrupt>> for Fault {
    fn from(error: TryFromPrimitiveError<Interrupt>) -> Self {
        Self::UnknownInterrupt(error.number)
    }
}

/// A terminal evaluation error.
///
/// Carries the program counter of the offending instruction and the
/// instruction itself; the arena is swept and the stack cleared before
/// the crash propagates.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[error("crash at {address:#06x} on {}: {fault}", .instruction.op.mnemonic())]
pub struct Crash {
    address: usize,
    instruction: Instruction,
    fault: Fault,
}

impl Crash {
    pub(crate) const fn new(address: usize, instruction: Instruction, fault: Fault) -> Self {
        Self { address, instruction, fault }
    }

    /// Program counter of the offending instruction.
    pub const fn address(&self) -> usize {
        self.address
    }

    /// The offending instruction record.
    pub const fn instruction(&self) -> &Instruction {
        &self.instruction
    }

    /// The crash reason.
    pub const fn fault(&self) -> Fault {
        self.fault
    }

    /// Three-letter error code, the evaluation kind of the toolchain.
    pub const fn code(&self) -> &'static str {
        "EVL"
    }
}
