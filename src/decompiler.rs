//! Bytecode listing formatter
//!
//! Renders one line per instruction: mnemonic, decoded operand and a
//! short gloss. The structural formatter is plain text; ANSI colour is
//! layered on only when styling is requested, so the listing stays the
//! same modulo escape codes.

use crate::conv::real_to_string;
use crate::opcode::{Instruction, Interrupt, Opcode, Operand, TypePair};
use crate::program::Program;
use crate::types::{Type, Value};

use itertools::Itertools;

const RESET: &str = "\x1b[0m";

#[derive(Debug, Clone, Copy)]
enum Colour {
    Red,
    Yellow,
    Orange,
    Blue,
    Green,
    Purple,
    Pink,
    Gray,
    Sky,
    Acqua,
    Peach,
}

impl Colour {
    const fn escape(self) -> &'static str {
        match self {
            Self::Red => "\x1b[38;5;160m",
            Self::Yellow => "\x1b[38;5;220m",
            Self::Orange => "\x1b[38;5;202m",
            Self::Blue => "\x1b[38;5;33m",
            Self::Green => "\x1b[38;5;34m",
            Self::Purple => "\x1b[38;5;164m",
            Self::Pink => "\x1b[38;5;207m",
            Self::Gray => "\x1b[38;5;250m",
            Self::Sky => "\x1b[38;5;14m",
            Self::Acqua => "\x1b[38;5;30m",
            Self::Peach => "\x1b[38;5;211m",
        }
    }
}

/// Width of the operand column, before the gloss marker.
const OPERAND_COLUMN: usize = 20;

#[derive(Debug, Clone, Copy, Default)]
pub struct Decompiler {
    styled: bool,
}

impl Decompiler {
    /// A plain, unstyled formatter.
    pub const fn new() -> Self {
        Self { styled: false }
    }

    /// A formatter emitting ANSI colour.
    pub const fn styled() -> Self {
        Self { styled: true }
    }

    /// Renders the whole program, one line per instruction.
    pub fn program(&self, program: &Program) -> String {
        let mut listing: String = program
            .instructions
            .iter()
            .map(|instruction| self.instruction(instruction))
            .join("\n");
        listing.push('\n');
        listing
    }

    /// Renders a single instruction line.
    pub fn instruction(&self, instruction: &Instruction) -> String {
        let mut line = String::from("    ");
        line.push_str(&self.paint(Self::colour(instruction.op), instruction.op.mnemonic()));
        line.push_str("    ");
        let (plain, painted) = self.operand(instruction);
        line.push_str(&painted);
        for _ in plain.chars().count()..OPERAND_COLUMN {
            line.push(' ');
        }
        line.push_str(&self.paint(Colour::Gray, &format!("! {}", instruction.op.gloss())));
        line
    }

    /// Plain and painted renderings of the operand field.
    fn operand(&self, instruction: &Instruction) -> (String, String) {
        match instruction.operand {
            Operand::None => (String::new(), String::new()),
            Operand::Index(index) if instruction.op == Opcode::INT => {
                let name = Interrupt::try_from(index as u8)
                    .map(Interrupt::name)
                    .unwrap_or("unknown");
                (name.into(), self.paint(Colour::Peach, name))
            }
            Operand::Index(index) => {
                let plain = format!("{index:X}");
                let painted = self.paint(Colour::Acqua, &plain);
                (plain, painted)
            }
            Operand::Value(value) => {
                let plain = match value {
                    Value::Boolean(boolean) => format!("{:X}", boolean as u8),
                    Value::Byte(byte) => format!("{byte:X}"),
                    Value::Integer(integer) => format!("{integer:X}"),
                    Value::Real(real) => real_to_string(real),
                    Value::Object(_) => "UNK".into(),
                };
                let painted = self.paint(Colour::Acqua, &plain);
                (plain, painted)
            }
            Operand::Type(tag) => {
                let plain = tag.code().to_string();
                let painted = self.paint(Self::type_colour(tag), tag.code());
                (plain, painted)
            }
            Operand::Types(types) => self.type_pair(types),
        }
    }

    fn type_pair(&self, types: TypePair) -> (String, String) {
        let plain = format!("{}, {}", types.left.code(), types.right.code());
        let painted = format!(
            "{}, {}",
            self.paint(Self::type_colour(types.left), types.left.code()),
            self.paint(Self::type_colour(types.right), types.right.code()),
        );
        (plain, painted)
    }

    fn paint(&self, colour: Colour, text: &str) -> String {
        if self.styled {
            format!("{}{}{}", colour.escape(), text, RESET)
        } else {
            text.to_string()
        }
    }

    /// Value types render warm, heap types pink.
    const fn type_colour(tag: Type) -> Colour {
        if tag.is_value_type() {
            Colour::Orange
        } else {
            Colour::Pink
        }
    }

    const fn colour(op: Opcode) -> Colour {
        match op {
            Opcode::RST
            | Opcode::LLA
            | Opcode::ULA
            | Opcode::CTP
            | Opcode::LTP
            | Opcode::SWP
            | Opcode::PST
            | Opcode::PSF
            | Opcode::PSI
            | Opcode::PSU
            | Opcode::POP
            | Opcode::DHD
            | Opcode::NOT => Colour::Yellow,
            Opcode::PSH | Opcode::TYP | Opcode::STR | Opcode::PEC | Opcode::PES | Opcode::PSA | Opcode::PEA => {
                Colour::Green
            }
            Opcode::GET
            | Opcode::SET
            | Opcode::SSF
            | Opcode::GLF
            | Opcode::SLF
            | Opcode::DSK
            | Opcode::ADD
            | Opcode::SUB
            | Opcode::MUL
            | Opcode::DIV
            | Opcode::MOD
            | Opcode::BWA
            | Opcode::BWO
            | Opcode::BWX
            | Opcode::SGS
            | Opcode::SSS
            | Opcode::AGS
            | Opcode::ASS
            | Opcode::SCN
            | Opcode::ACN => Colour::Blue,
            Opcode::NEG | Opcode::INV | Opcode::BSL | Opcode::BSR | Opcode::BRL | Opcode::BRR => Colour::Purple,
            Opcode::EQL | Opcode::NEQ | Opcode::GRT | Opcode::GEQ | Opcode::LSS | Opcode::LEQ | Opcode::CST => {
                Colour::Orange
            }
            Opcode::JMP
            | Opcode::JIF
            | Opcode::JIT
            | Opcode::JAF
            | Opcode::JAT
            | Opcode::CAL
            | Opcode::RET
            | Opcode::LAM
            | Opcode::HLT => Colour::Red,
            Opcode::CCJ | Opcode::VCJ | Opcode::MCJ => Colour::Sky,
            Opcode::CLL | Opcode::INT => Colour::Peach,
        }
    }
}
