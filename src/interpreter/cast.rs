//! Cast dispatch and the native-call table
//!
//! The cast pair reads as `(from, to)`. Casts between the two byte
//! kinds keep the value untouched, as does the real-imaginary pair:
//! only the static type changes. Unlisted conversions crash.

use super::Interpreter;
use crate::complex::Complex;
use crate::error::Fault;
use crate::opcode::{native, TypePair};
use crate::types::{Type, Value};

impl<I, O> Interpreter<I, O> {
    pub(crate) fn cast(&mut self, types: TypePair) -> Result<(), Fault> {
        let value = match types.split() {
            (Type::Character, Type::Byte)
            | (Type::Byte, Type::Character)
            | (Type::Real, Type::Imaginary)
            | (Type::Imaginary, Type::Real) => return Ok(()),
            (Type::Character | Type::Byte, Type::Natural | Type::Integer) => {
                let byte = self.pop()?.byte()?;
                Value::Integer(byte as i64)
            }
            (Type::Natural | Type::Integer, Type::Character | Type::Byte) => {
                let integer = self.pop()?.integer()?;
                Value::Byte(integer as u8)
            }
            (Type::Natural, Type::Real) => {
                let natural = self.pop()?.natural()?;
                Value::Real(natural as f64)
            }
            (Type::Integer, Type::Real) => {
                let integer = self.pop()?.integer()?;
                Value::Real(integer as f64)
            }
            (Type::Real, Type::Natural) => {
                let real = self.pop()?.real()?;
                Value::Integer(real as u64 as i64)
            }
            (Type::Real, Type::Integer) => {
                let real = self.pop()?.real()?;
                Value::Integer(real as i64)
            }
            (Type::Natural, Type::Complex) => {
                let natural = self.pop()?.natural()?;
                self.register_complex(Complex::new(natural as f64, 0.0))
            }
            (Type::Integer, Type::Complex) => {
                let integer = self.pop()?.integer()?;
                self.register_complex(Complex::new(integer as f64, 0.0))
            }
            (Type::Real, Type::Complex) => {
                let real = self.pop()?.real()?;
                self.register_complex(Complex::new(real, 0.0))
            }
            (Type::Imaginary, Type::Complex) => {
                let imaginary = self.pop()?.real()?;
                self.register_complex(Complex::new(0.0, imaginary))
            }
            (Type::Complex, Type::Natural) => {
                let complex = self.pop_complex()?;
                Value::Integer(complex.a as u64 as i64)
            }
            (Type::Complex, Type::Integer) => {
                let complex = self.pop_complex()?;
                Value::Integer(complex.a as i64)
            }
            (Type::Complex, Type::Real) => {
                let complex = self.pop_complex()?;
                Value::Real(complex.a)
            }
            (Type::Complex, Type::Imaginary) => {
                let complex = self.pop_complex()?;
                Value::Real(complex.b)
            }
            (Type::Character, Type::String) => {
                let byte = self.pop()?.byte()?;
                self.register_string(vec![byte])
            }
            _ => return Err(Fault::InvalidTypes(types)),
        };
        self.stack.push(value);
        Ok(())
    }

    /// `CLL`: flat lookup of a built-in by its 16-bit code.
    pub(crate) fn native_call(&mut self, types: TypePair) -> Result<(), Fault> {
        match types.compose() {
            native::BOOLEAN_TO_STRING => {
                let text: &[u8] = if self.pop()?.boolean()? { b"true" } else { b"false" };
                let value = self.register_string(text.to_vec());
                self.stack.push(value);
                Ok(())
            }
            code => Err(Fault::UnknownNativeCall(code)),
        }
    }

    fn pop_complex(&mut self) -> Result<Complex, Fault> {
        let value = self.pop()?;
        self.complex_at(value)
    }
}
