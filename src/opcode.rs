//! Instruction representation for the interpreter
//!
//! An [`Instruction`] is an [`Opcode`] plus one [`Operand`] slot. Binary
//! typed opcodes carry a [`TypePair`] so the dispatch can pick the arm
//! for the exact pair of static operand types; unary typed opcodes carry
//! a single [`Type`]; control transfers and stack slots carry an index.

use crate::error::Fault;
use crate::types::{Type, Value};

use num_enum::{IntoPrimitive, TryFromPrimitive};

/// Operation code, numbered sequentially.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoPrimitive, TryFromPrimitive, strum::EnumIter, strum::IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum Opcode {
    /// Does nothing.
    RST = 0x00,
    /// Pushes the inline value operand.
    PSH,
    /// Pushes a type constant (a type tag in the byte representation).
    TYP,
    /// Allocates a copy of a string-pool entry and pushes its handle.
    STR,
    /// Pops the top of the stack into the lambda accumulator.
    LLA,
    /// Pushes the lambda accumulator back onto the stack.
    ULA,
    /// Calls through the lambda accumulator as a routine address.
    LAM,
    /// Pops the top of the stack into the transfer accumulator.
    CTP,
    /// Pushes the transfer accumulator back onto the stack.
    LTP,
    /// Pushes the value of an absolute stack slot.
    GET,
    /// Writes the current top into an absolute stack slot.
    SET,
    /// Swaps the two slots whose indices are the top two values.
    SWP,
    /// Pushes the frame base and rebases it over the arity window.
    SSF,
    /// Pushes the value of a frame-relative slot.
    GLF,
    /// Writes the current top into a frame-relative slot.
    SLF,
    /// Typed addition; string concatenation on string pairs.
    ADD,
    /// Typed subtraction.
    SUB,
    /// Typed multiplication.
    MUL,
    /// Typed division.
    DIV,
    /// Typed modulus over integral pairs.
    MOD,
    /// Bitwise shift left.
    BSL,
    /// Bitwise shift right.
    BSR,
    /// Bitwise rotation left.
    BRL,
    /// Bitwise rotation right.
    BRR,
    /// Bitwise and; boolean conjunction on booleans.
    BWA,
    /// Bitwise or; boolean disjunction on booleans.
    BWO,
    /// Bitwise xor.
    BWX,
    /// Bitwise complement.
    INV,
    /// Arithmetic negation.
    NEG,
    /// String element read.
    SGS,
    /// String element write.
    SSS,
    /// Array element read.
    AGS,
    /// Array element write, extending the array when needed.
    ASS,
    /// String length.
    SCN,
    /// Array length.
    ACN,
    /// Complex conjugate.
    CCJ,
    /// Vector conjugate, reserved.
    VCJ,
    /// Matrix conjugate, reserved.
    MCJ,
    /// Pushes `true`.
    PST,
    /// Pushes `false`.
    PSF,
    /// Pushes positive infinity.
    PSI,
    /// Pushes the undefined real.
    PSU,
    /// Allocates an empty complex and pushes its handle.
    PEC,
    /// Allocates an empty string and pushes its handle.
    PES,
    /// Collects the top `n` values into a freshly allocated array.
    PSA,
    /// Allocates an empty array and pushes its handle.
    PEA,
    /// Pops one value.
    POP,
    /// Duplicates the top value.
    DHD,
    /// Drops `n` values.
    DSK,
    /// Absolute jump.
    JMP,
    /// Pops the top and jumps when it is false.
    JIF,
    /// Pops the top and jumps when it is true.
    JIT,
    /// Peeks the top and jumps when it is false.
    JAF,
    /// Peeks the top and jumps when it is true.
    JAT,
    /// Typed equality.
    EQL,
    /// Typed inequality.
    NEQ,
    /// Typed greater-than.
    GRT,
    /// Typed greater-or-equal.
    GEQ,
    /// Typed less-than.
    LSS,
    /// Typed less-or-equal.
    LEQ,
    /// Boolean negation.
    NOT,
    /// Native-library call selected by a 16-bit code.
    CLL,
    /// Routine call to an absolute address.
    CAL,
    /// Return from a routine call.
    RET,
    /// Typed cast; the pair reads as `(from, to)`.
    CST,
    /// Interrupt request.
    INT,
    /// Clears the stack, sweeps the arena and terminates.
    HLT,
}

impl Opcode {
    /// Three-letter mnemonic.
    pub fn mnemonic(self) -> &'static str {
        self.into()
    }

    /// Short human-readable gloss used by the decompiler.
    pub const fn gloss(self) -> &'static str {
        match self {
            Self::RST => "rest",
            Self::PSH => "push",
            Self::TYP => "push type",
            Self::STR => "string literal",
            Self::LLA => "load lambda",
            Self::ULA => "unload lambda",
            Self::LAM => "call lambda",
            Self::CTP => "capture transfer",
            Self::LTP => "release transfer",
            Self::GET => "get slot",
            Self::SET => "set slot",
            Self::SWP => "swap slots",
            Self::SSF => "set stack frame",
            Self::GLF => "get local",
            Self::SLF => "set local",
            Self::ADD => "addition",
            Self::SUB => "subtraction",
            Self::MUL => "multiplication",
            Self::DIV => "division",
            Self::MOD => "modulus",
            Self::BSL => "shift left",
            Self::BSR => "shift right",
            Self::BRL => "rotate left",
            Self::BRR => "rotate right",
            Self::BWA => "bitwise and",
            Self::BWO => "bitwise or",
            Self::BWX => "bitwise xor",
            Self::INV => "inversion",
            Self::NEG => "negation",
            Self::SGS => "string get",
            Self::SSS => "string set",
            Self::AGS => "array get",
            Self::ASS => "array set",
            Self::SCN => "string count",
            Self::ACN => "array count",
            Self::CCJ => "complex conjugate",
            Self::VCJ => "vector conjugate",
            Self::MCJ => "matrix conjugate",
            Self::PST => "push true",
            Self::PSF => "push false",
            Self::PSI => "push infinity",
            Self::PSU => "push undefined",
            Self::PEC => "push empty complex",
            Self::PES => "push empty string",
            Self::PSA => "push array",
            Self::PEA => "push empty array",
            Self::POP => "pop",
            Self::DHD => "duplicate head",
            Self::DSK => "decrease stack",
            Self::JMP => "jump",
            Self::JIF => "jump if false",
            Self::JIT => "jump if true",
            Self::JAF => "jump ahead if false",
            Self::JAT => "jump ahead if true",
            Self::EQL => "equal",
            Self::NEQ => "not equal",
            Self::GRT => "great",
            Self::GEQ => "great equal",
            Self::LSS => "less",
            Self::LEQ => "less equal",
            Self::NOT => "logic not",
            Self::CLL => "library call",
            Self::CAL => "call",
            Self::RET => "return",
            Self::CST => "cast",
            Self::INT => "interrupt",
            Self::HLT => "halt",
        }
    }
}

/// Interrupt request codes for the `INT` opcode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoPrimitive, TryFromPrimitive, strum::EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum Interrupt {
    Write = 0x00,
    WriteLine,
    Read,
    ReadLine,
    Sleep,
    Clock,
    Noise,
}

impl Interrupt {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Write => "write",
            Self::WriteLine => "writeln",
            Self::Read => "read",
            Self::ReadLine => "readln",
            Self::Sleep => "sleep",
            Self::Clock => "clock",
            Self::Noise => "noise",
        }
    }
}

/// Native-library call codes for the `CLL` opcode.
///
/// The table is a flat lookup so new entries stay cheap to add.
pub mod native {
    use crate::types::Type;

    use super::TypePair;

    /// Formats a boolean into a freshly allocated string.
    pub const BOOLEAN_TO_STRING: u16 = TypePair::new(Type::Boolean, Type::String).compose();
}

/// The pair of static operand types carried by every binary typed opcode.
///
/// `left` is the type of the deeper stack operand, `right` the shallower.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TypePair {
    pub left: Type,
    pub right: Type,
}

impl TypePair {
    pub const fn new(left: Type, right: Type) -> Self {
        Self { left, right }
    }

    /// The 16-bit wire form, `(left << 8) | right`.
    pub const fn compose(self) -> u16 {
        ((self.left as u16) << 8) | self.right as u16
    }

    pub const fn split(self) -> (Type, Type) {
        (self.left, self.right)
    }
}

impl TryFrom<u16> for TypePair {
    type Error = Fault;

    fn try_from(composed: u16) -> Result<Self, Fault> {
        let left = Type::try_from((composed >> 8) as u8)?;
        let right = Type::try_from((composed & 0x00ff) as u8)?;
        Ok(Self { left, right })
    }
}

/// The operand slot of an instruction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Operand {
    None,
    Index(u64),
    Value(Value),
    Type(Type),
    Types(TypePair),
}

/// A single bytecode instruction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Instruction {
    pub op: Opcode,
    pub operand: Operand,
}

impl Instruction {
    pub const fn nullary(op: Opcode) -> Self {
        Self { op, operand: Operand::None }
    }

    pub const fn indexed(op: Opcode, index: u64) -> Self {
        Self { op, operand: Operand::Index(index) }
    }

    pub const fn push(value: Value) -> Self {
        Self { op: Opcode::PSH, operand: Operand::Value(value) }
    }

    /// A `TYP` instruction; the tag travels in the byte representation.
    pub const fn type_constant(tag: Type) -> Self {
        Self { op: Opcode::TYP, operand: Operand::Value(Value::Byte(tag as u8)) }
    }

    pub const fn typed(op: Opcode, tag: Type) -> Self {
        Self { op, operand: Operand::Type(tag) }
    }

    pub const fn paired(op: Opcode, types: TypePair) -> Self {
        Self { op, operand: Operand::Types(types) }
    }

    pub const fn interrupt(request: Interrupt) -> Self {
        Self { op: Opcode::INT, operand: Operand::Index(request as u64) }
    }

    /// The index operand, or a fault when the slot holds something else.
    pub fn index(&self) -> Result<usize, Fault> {
        match self.operand {
            Operand::Index(index) => Ok(index as usize),
            _ => Err(Fault::MissingOperand),
        }
    }

    pub fn value(&self) -> Result<Value, Fault> {
        match self.operand {
            Operand::Value(value) => Ok(value),
            _ => Err(Fault::MissingOperand),
        }
    }

    pub fn tag(&self) -> Result<Type, Fault> {
        match self.operand {
            Operand::Type(tag) => Ok(tag),
            _ => Err(Fault::MissingOperand),
        }
    }

    pub fn pair(&self) -> Result<TypePair, Fault> {
        match self.operand {
            Operand::Types(types) => Ok(types),
            _ => Err(Fault::MissingOperand),
        }
    }

    pub fn request(&self) -> Result<Interrupt, Fault> {
        Ok(Interrupt::try_from(self.index()? as u8)?)
    }
}

impl Default for Instruction {
    fn default() -> Self {
        Self::nullary(Opcode::RST)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn opcode_byte_round_trip() {
        for (expected, op) in Opcode::iter().enumerate() {
            assert_eq!(op as usize, expected);
            assert_eq!(Opcode::try_from(op as u8).ok(), Some(op));
        }
        let count = Opcode::iter().count() as u8;
        assert!(Opcode::try_from(count).is_err());
    }

    #[test]
    fn type_pair_wire_round_trip() {
        let pair = TypePair::new(Type::Integer, Type::Imaginary);
        assert_eq!(pair.compose(), 0x0406);
        assert_eq!(TypePair::try_from(0x0406), Ok(pair));
        assert!(TypePair::try_from(0xff00).is_err());
    }

    #[test]
    fn operand_kind_is_checked() {
        let jump = Instruction::indexed(Opcode::JMP, 7);
        assert_eq!(jump.index(), Ok(7));
        assert_eq!(jump.pair(), Err(Fault::MissingOperand));
        assert_eq!(jump.value(), Err(Fault::MissingOperand));
    }

    #[test]
    fn interrupt_request_decodes() {
        let interrupt = Instruction::interrupt(Interrupt::Clock);
        assert_eq!(interrupt.request(), Ok(Interrupt::Clock));
        let bogus = Instruction::indexed(Opcode::INT, 0xff);
        assert_eq!(bogus.request(), Err(Fault::UnknownInterrupt(0xff)));
    }

    #[test]
    fn native_codes_compose_type_pairs() {
        assert_eq!(native::BOOLEAN_TO_STRING, 0x0008);
    }
}
