//! Typed comparison dispatch
//!
//! All six comparison opcodes share one arm table; the operator is
//! applied after the pair picks the common representation. Ordered
//! operators follow the promotion of the pair: byte and natural mixes
//! compare unsigned, the natural-integer mix compares signed. Strings
//! and complexes admit equality only.

use super::Interpreter;
use crate::error::Fault;
use crate::opcode::TypePair;
use crate::types::{Type, Value};

/// Comparison operator selected by the opcode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Comparison {
    Equal,
    NotEqual,
    Greater,
    GreaterEqual,
    Less,
    LessEqual,
}

impl Comparison {
    fn of<T: PartialOrd>(self, a: T, b: T) -> bool {
        match self {
            Self::Equal => a == b,
            Self::NotEqual => a != b,
            Self::Greater => a > b,
            Self::GreaterEqual => a >= b,
            Self::Less => a < b,
            Self::LessEqual => a <= b,
        }
    }

    const fn is_equality(self) -> bool {
        matches!(self, Self::Equal | Self::NotEqual)
    }
}

impl<I, O> Interpreter<I, O> {
    pub(crate) fn compare(&mut self, types: TypePair, comparison: Comparison) -> Result<(), Fault> {
        let b = self.pop()?;
        let a = self.pop()?;
        let outcome = match types.split() {
            (Type::Boolean, Type::Boolean) => comparison.of(a.boolean()?, b.boolean()?),
            (Type::Character | Type::Byte, Type::Character | Type::Byte) => {
                comparison.of(a.byte()?, b.byte()?)
            }
            (Type::Character | Type::Byte, Type::Natural) => {
                comparison.of(a.byte()? as u64, b.natural()?)
            }
            (Type::Character | Type::Byte, Type::Integer) => {
                comparison.of(a.byte()? as i64, b.integer()?)
            }
            (Type::Natural, Type::Character | Type::Byte) => {
                comparison.of(a.natural()?, b.byte()? as u64)
            }
            (Type::Integer, Type::Character | Type::Byte) => {
                comparison.of(a.integer()?, b.byte()? as i64)
            }
            (Type::Natural, Type::Natural) => comparison.of(a.natural()?, b.natural()?),
            // Natural-integer mixes order signed.
            (Type::Natural, Type::Integer) | (Type::Integer, Type::Natural) => {
                comparison.of(a.integer()?, b.integer()?)
            }
            (Type::Integer, Type::Integer) => comparison.of(a.integer()?, b.integer()?),
            (Type::Natural, Type::Real) => comparison.of(a.natural()? as f64, b.real()?),
            (Type::Integer, Type::Real) => comparison.of(a.integer()? as f64, b.real()?),
            (Type::Real, Type::Natural) => comparison.of(a.real()?, b.natural()? as f64),
            (Type::Real, Type::Integer) => comparison.of(a.real()?, b.integer()? as f64),
            (Type::Real, Type::Real) | (Type::Imaginary, Type::Imaginary) => {
                comparison.of(a.real()?, b.real()?)
            }
            (Type::String, Type::String) if comparison.is_equality() => {
                let equal = self.string_at(a)? == self.string_at(b)?;
                (comparison == Comparison::Equal) == equal
            }
            (Type::Complex, Type::Complex) if comparison.is_equality() => {
                let equal = self.complex_at(a)? == self.complex_at(b)?;
                (comparison == Comparison::Equal) == equal
            }
            _ => return Err(Fault::InvalidTypes(types)),
        };
        self.stack.push(Value::Boolean(outcome));
        Ok(())
    }

    pub(crate) fn negate_boolean(&mut self) -> Result<(), Fault> {
        let value = self.pop()?.boolean()?;
        self.stack.push(Value::Boolean(!value));
        Ok(())
    }
}
