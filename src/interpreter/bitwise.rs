//! Shifts, rotates, bit logic and arithmetic negation
//!
//! Shifts and rotates carry a single operand type; the shift count is
//! the shallower stack operand. Each arm is independent. Bit logic is
//! pair-dispatched and doubles as boolean conjunction and disjunction
//! on boolean pairs.

use super::Interpreter;
use crate::error::Fault;
use crate::opcode::TypePair;
use crate::types::{Type, Value};

impl<I, O> Interpreter<I, O> {
    pub(crate) fn shift_left(&mut self, tag: Type) -> Result<(), Fault> {
        let count = self.pop()?.natural()?;
        let a = self.pop()?;
        let value = match tag {
            Type::Character | Type::Byte => {
                Value::Byte(if count >= 8 { 0 } else { a.byte()? << count })
            }
            Type::Natural | Type::Integer => {
                Value::Integer(if count >= 64 { 0 } else { a.integer()? << count })
            }
            _ => return Err(Fault::InvalidType(tag)),
        };
        self.stack.push(value);
        Ok(())
    }

    pub(crate) fn shift_right(&mut self, tag: Type) -> Result<(), Fault> {
        let count = self.pop()?.natural()?;
        let a = self.pop()?;
        let value = match tag {
            Type::Character | Type::Byte => {
                Value::Byte(if count >= 8 { 0 } else { a.byte()? >> count })
            }
            // Naturals shift through the signed representation too.
            Type::Natural | Type::Integer => Value::Integer(a.integer()? >> count.min(63)),
            _ => return Err(Fault::InvalidType(tag)),
        };
        self.stack.push(value);
        Ok(())
    }

    pub(crate) fn rotate_left(&mut self, tag: Type) -> Result<(), Fault> {
        let count = self.pop()?.natural()?;
        let a = self.pop()?;
        let value = match tag {
            Type::Character | Type::Byte => Value::Byte(a.byte()?.rotate_left(count as u32)),
            Type::Natural | Type::Integer => Value::Integer(a.integer()?.rotate_left(count as u32)),
            _ => return Err(Fault::InvalidType(tag)),
        };
        self.stack.push(value);
        Ok(())
    }

    pub(crate) fn rotate_right(&mut self, tag: Type) -> Result<(), Fault> {
        let count = self.pop()?.natural()?;
        let a = self.pop()?;
        let value = match tag {
            Type::Character | Type::Byte => Value::Byte(a.byte()?.rotate_right(count as u32)),
            Type::Natural | Type::Integer => Value::Integer(a.integer()?.rotate_right(count as u32)),
            _ => return Err(Fault::InvalidType(tag)),
        };
        self.stack.push(value);
        Ok(())
    }

    pub(crate) fn bitwise_and(&mut self, types: TypePair) -> Result<(), Fault> {
        let b = self.pop()?;
        let a = self.pop()?;
        let value = match types.split() {
            (Type::Natural, Type::Natural) | (Type::Integer, Type::Integer) => {
                Value::Integer(a.integer()? & b.integer()?)
            }
            (Type::Byte, Type::Byte) | (Type::Character, Type::Character) => {
                Value::Byte(a.byte()? & b.byte()?)
            }
            (Type::Boolean, Type::Boolean) => Value::Boolean(a.boolean()? && b.boolean()?),
            _ => return Err(Fault::InvalidTypes(types)),
        };
        self.stack.push(value);
        Ok(())
    }

    pub(crate) fn bitwise_or(&mut self, types: TypePair) -> Result<(), Fault> {
        let b = self.pop()?;
        let a = self.pop()?;
        let value = match types.split() {
            (Type::Natural, Type::Natural) | (Type::Integer, Type::Integer) => {
                Value::Integer(a.integer()? | b.integer()?)
            }
            (Type::Byte, Type::Byte) | (Type::Character, Type::Character) => {
                Value::Byte(a.byte()? | b.byte()?)
            }
            (Type::Boolean, Type::Boolean) => Value::Boolean(a.boolean()? || b.boolean()?),
            _ => return Err(Fault::InvalidTypes(types)),
        };
        self.stack.push(value);
        Ok(())
    }

    pub(crate) fn bitwise_xor(&mut self, types: TypePair) -> Result<(), Fault> {
        let b = self.pop()?;
        let a = self.pop()?;
        let value = match types.split() {
            (Type::Natural, Type::Natural) | (Type::Integer, Type::Integer) => {
                Value::Integer(a.integer()? ^ b.integer()?)
            }
            (Type::Byte, Type::Byte) | (Type::Character, Type::Character) => {
                Value::Byte(a.byte()? ^ b.byte()?)
            }
            _ => return Err(Fault::InvalidTypes(types)),
        };
        self.stack.push(value);
        Ok(())
    }

    pub(crate) fn invert(&mut self, tag: Type) -> Result<(), Fault> {
        let a = self.pop()?;
        let value = match tag {
            Type::Natural | Type::Integer => Value::Integer(!a.integer()?),
            Type::Byte => Value::Byte(!a.byte()?),
            _ => return Err(Fault::InvalidType(tag)),
        };
        self.stack.push(value);
        Ok(())
    }

    pub(crate) fn negate(&mut self, tag: Type) -> Result<(), Fault> {
        let a = self.pop()?;
        let value = match tag {
            Type::Character | Type::Byte => Value::Integer(-(a.byte()? as i64)),
            Type::Natural | Type::Integer => Value::Integer(a.integer()?.wrapping_neg()),
            Type::Real | Type::Imaginary => Value::Real(-a.real()?),
            Type::Complex => {
                let complex = -self.complex_at(a)?;
                self.register_complex(complex)
            }
            _ => return Err(Fault::InvalidType(tag)),
        };
        self.stack.push(value);
        Ok(())
    }
}
